//! Lenient CSV row splitting for the postal-code export
//!
//! The export is hand-maintained and does not follow RFC 4180 strictly:
//! fields may carry stray quote characters and rows may have more or fewer
//! columns than the header. [`TabularParser`] tolerates both and yields one
//! [`csv::StringRecord`] per data row, in a single forward pass.
//!
//! - [`parser`] - the row iterator over a UTF-8 byte stream
//! - [`header`] - optional check of the header against the fixed layout

pub mod header;
pub mod parser;

#[cfg(test)]
pub mod tests;

pub use header::verify_header;
pub use parser::TabularParser;
