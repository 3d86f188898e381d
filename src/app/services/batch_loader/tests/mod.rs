//! Test utilities for the batch loader
//!
//! Loader tests run against two stores: the recording mock, to observe the
//! exact statement sequence and inject failures, and in-memory SQLite, to
//! check the resulting table.

use super::{BatchLoader, LoaderConfig};
use crate::app::models::{ImportRun, PostalRecord};
use crate::app::services::row_validator::{RowOutcome, SkipReason};
use crate::app::services::store::tests::{
    RecordingStore, create_test_store, index_names, seed_records, table_contents,
};
use crate::app::services::store::{CatalogStore, SqliteStore};
use crate::{Error, Result};

mod loader_tests;

/// A distinct valid record for index `i`
pub fn record(i: usize) -> PostalRecord {
    PostalRecord::new(
        format!("{:05}", i),
        format!("Colonia {}", i),
        format!("Municipio {}", i % 7),
        format!("Estado {}", i % 3),
    )
}

/// `n` valid outcomes
pub fn valid_rows(n: usize) -> Vec<Result<RowOutcome>> {
    (0..n).map(|i| Ok(RowOutcome::Record(record(i)))).collect()
}

/// A validator skip outcome
pub fn skipped_row() -> Result<RowOutcome> {
    Ok(RowOutcome::Skip(SkipReason::EmptyField { column: 0 }))
}

/// Load rows through a loader with the given batch size
pub fn load_with<S: CatalogStore>(
    store: &mut S,
    batch_size: usize,
    rows: Vec<Result<RowOutcome>>,
) -> Result<ImportRun> {
    let config = LoaderConfig::default().with_batch_size(batch_size);
    BatchLoader::new(store, config)?.load(rows)
}
