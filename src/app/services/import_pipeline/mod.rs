//! End-to-end catalog import
//!
//! Wires the stages together for one run: the source file is transcoded to
//! UTF-8, parsed into rows, validated and handed to the batch loader. The
//! pipeline is a single pass and runs to completion or to the first stream
//! error.

pub mod pipeline;

#[cfg(test)]
pub mod tests;

pub use pipeline::ImportPipeline;
