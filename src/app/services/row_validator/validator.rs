//! Fixed-position row validator

use std::fmt;

use csv::StringRecord;

use crate::app::models::PostalRecord;
use crate::constants::columns::{self, MIN_FIELDS, MUNICIPALITY, POSTAL_CODE, SETTLEMENT, STATE};

/// Result of validating a single row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Record(PostalRecord),
    Skip(SkipReason),
}

/// Why a row was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than five fields
    TooFewFields { found: usize },
    /// An extracted field was empty after trimming (position in the row)
    EmptyField { column: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewFields { found } => {
                write!(f, "expected at least {} fields, found {}", MIN_FIELDS, found)
            }
            SkipReason::EmptyField { column } => {
                write!(f, "empty {} (column {})", columns::name(*column), column)
            }
        }
    }
}

/// Validate one row and extract its postal record
pub fn validate_row(row: &StringRecord) -> RowOutcome {
    if row.len() < MIN_FIELDS {
        return RowOutcome::Skip(SkipReason::TooFewFields { found: row.len() });
    }

    let field = |position: usize| row.get(position).map(str::trim).unwrap_or("");

    for position in [POSTAL_CODE, SETTLEMENT, MUNICIPALITY, STATE] {
        if field(position).is_empty() {
            return RowOutcome::Skip(SkipReason::EmptyField { column: position });
        }
    }

    RowOutcome::Record(PostalRecord::new(
        field(POSTAL_CODE),
        field(SETTLEMENT),
        field(MUNICIPALITY),
        field(STATE),
    ))
}

impl RowOutcome {
    /// The record, if the row was valid
    pub fn into_record(self) -> Option<PostalRecord> {
        match self {
            RowOutcome::Record(record) => Some(record),
            RowOutcome::Skip(_) => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, RowOutcome::Skip(_))
    }
}
