//! Header layout check
//!
//! The loader reads columns by position. When the strict header option is
//! on, the header is compared against the expected names at those positions
//! so a reshuffled export fails before the table is cleared.

use csv::StringRecord;

use crate::constants::columns::EXPECTED_HEADER;
use crate::{Error, Result};

/// Check the header names at the extracted positions
///
/// Comparison is trimmed and case-insensitive; columns that are not
/// extracted are ignored.
pub fn verify_header(headers: &StringRecord) -> Result<()> {
    for &(position, expected) in EXPECTED_HEADER {
        let found = headers.get(position).map(str::trim).unwrap_or("");
        if !found.eq_ignore_ascii_case(expected) {
            return Err(Error::header_mismatch(position, expected, found));
        }
    }
    Ok(())
}
