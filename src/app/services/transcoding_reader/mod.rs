//! Legacy codepage to UTF-8 transcoding
//!
//! The postal-code export is published in a single-byte Windows codepage.
//! [`TranscodingReader`] wraps any byte source and exposes the decoded text
//! as a plain [`std::io::Read`] stream of UTF-8, so the CSV parser above it
//! never sees the legacy encoding.

pub mod reader;

#[cfg(test)]
pub mod tests;

pub use reader::TranscodingReader;
