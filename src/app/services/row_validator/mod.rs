//! Row validation and normalization
//!
//! Turns one parsed row into a [`PostalRecord`] or a skip. Columns are read
//! by fixed position (postal code, settlement, municipality, state at 0, 1,
//! 3 and 4); column 2 and anything past 4 is ignored. Bad rows are a normal
//! outcome, tallied by the caller, never an error.

pub mod validator;

#[cfg(test)]
pub mod tests;

pub use validator::{RowOutcome, SkipReason, validate_row};
