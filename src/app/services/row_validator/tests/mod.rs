//! Tests for the fixed-position row validator

use super::{RowOutcome, SkipReason, validate_row};
use crate::app::models::PostalRecord;
use csv::StringRecord;


/// Build a row from string fields
pub fn row(fields: &[&str]) -> StringRecord {
    StringRecord::from(fields.to_vec())
}
