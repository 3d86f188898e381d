//! Core data models for the postal catalog
//!
//! This module defines the record shape moved through the import pipeline,
//! the per-run counters reported to the operator, and the lookup results
//! returned by the catalog query service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One validated row of the postal-code export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalRecord {
    pub postal_code: String,
    pub settlement: String,
    pub municipality: String,
    pub state: String,
}

impl PostalRecord {
    pub fn new(
        postal_code: impl Into<String>,
        settlement: impl Into<String>,
        municipality: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            postal_code: postal_code.into(),
            settlement: settlement.into(),
            municipality: municipality.into(),
            state: state.into(),
        }
    }

    /// Field values in insert column order
    pub fn values(&self) -> [&str; 4] {
        [
            self.postal_code.as_str(),
            self.settlement.as_str(),
            self.municipality.as_str(),
            self.state.as_str(),
        ]
    }
}

/// Counters for a single import run
///
/// Kept in memory only; reported at the end of the job and then dropped.
/// After a completed run `rows_read == imported + skipped + lost`.
#[derive(Debug, Clone, Serialize)]
pub struct ImportRun {
    /// Data rows pulled from the parser (header excluded)
    pub rows_read: usize,

    /// Rows written by a successful insert
    pub imported: usize,

    /// Rows rejected by the row validator
    pub skipped: usize,

    /// Valid rows whose insert failed even after retries
    pub lost: usize,

    /// Flush operations issued (one per full batch plus the remainder)
    pub batches_flushed: usize,

    /// Flushes in which at least one insert failed
    pub batches_failed: usize,

    /// Extra insert statements issued while bisecting failed batches
    pub retried_writes: usize,

    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,

    /// Total run time
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

impl ImportRun {
    pub fn new() -> Self {
        Self {
            rows_read: 0,
            imported: 0,
            skipped: 0,
            lost: 0,
            batches_flushed: 0,
            batches_failed: 0,
            retried_writes: 0,
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
        }
    }

    /// Whether every row is accounted for by exactly one counter
    pub fn is_balanced(&self) -> bool {
        self.rows_read == self.imported + self.skipped + self.lost
    }

    /// Whether any valid row failed to reach the store
    pub fn has_losses(&self) -> bool {
        self.lost > 0
    }

    /// Imported rows as a percentage of rows read
    pub fn import_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            (self.imported as f64 / self.rows_read as f64) * 100.0
        }
    }
}

impl Default for ImportRun {
    fn default() -> Self {
        Self::new()
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}

/// Result of resolving a postal code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalCodeResolution {
    pub postal_code: String,
    pub state: String,
    pub municipality: String,
    /// Distinct settlement names under the code, sorted
    pub settlements: Vec<String>,
}

/// A settlement and the postal code it belongs to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SettlementEntry {
    pub settlement: String,
    pub postal_code: String,
}
