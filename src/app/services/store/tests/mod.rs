//! Test utilities for store-backed services
//!
//! Provides a recording mock store and helpers for in-memory SQLite
//! catalogs, shared by the loader, pipeline, and query service tests.

use std::cell::RefCell;

use super::{CatalogStore, SqliteStore, ensure_schema};
use crate::app::models::PostalRecord;
use crate::constants::{BEGIN_STATEMENT, COMMIT_STATEMENT};
use crate::{Error, Result};


type FailurePredicate = Box<dyn Fn(&str, &[&str]) -> bool>;

/// Mock store recording every statement it receives
///
/// Parameterised statements are kept with their parameters so tests can
/// count flushes and inspect batch contents. An optional predicate makes
/// matching `execute` calls fail, to exercise batch-failure handling.
/// `BEGIN` and `COMMIT` open and close a tracked transaction; a store
/// built with [`RecordingStore::rolling_back`] closes it when a write fails.
#[derive(Default)]
pub struct RecordingStore {
    pub executed: Vec<(String, Vec<String>)>,
    pub raw: Vec<String>,
    pub queries: RefCell<Vec<String>>,
    fail_when: Option<FailurePredicate>,
    rollback_on_failure: bool,
    transaction_open: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `execute` call for which the predicate returns true
    pub fn failing_when<F>(predicate: F) -> Self
    where
        F: Fn(&str, &[&str]) -> bool + 'static,
    {
        Self {
            fail_when: Some(Box::new(predicate)),
            ..Self::default()
        }
    }

    /// Drop the open transaction whenever an injected failure fires
    pub fn rolling_back(mut self) -> Self {
        self.rollback_on_failure = true;
        self
    }

    /// Parameterised inserts that succeeded, in order
    pub fn inserts(&self) -> Vec<&(String, Vec<String>)> {
        self.executed
            .iter()
            .filter(|(sql, _)| sql.starts_with("INSERT"))
            .collect()
    }

    /// Position of a raw statement in the recorded sequence
    pub fn raw_position(&self, sql: &str) -> Option<usize> {
        self.raw.iter().position(|s| s == sql)
    }
}

impl CatalogStore for RecordingStore {
    fn execute(&mut self, sql: &str, params: &[&str]) -> Result<usize> {
        if let Some(predicate) = &self.fail_when {
            if predicate(sql, params) {
                if self.rollback_on_failure {
                    self.transaction_open = false;
                }
                return Err(Error::store("injected failure", None));
            }
        }
        self.executed
            .push((sql.to_string(), params.iter().map(|p| p.to_string()).collect()));
        Ok(params.len() / 4)
    }

    fn query(&self, sql: &str, _params: &[&str]) -> Result<Vec<Vec<String>>> {
        self.queries.borrow_mut().push(sql.to_string());
        Ok(Vec::new())
    }

    fn execute_raw(&mut self, sql: &str) -> Result<()> {
        if sql == BEGIN_STATEMENT {
            self.transaction_open = true;
        } else if sql == COMMIT_STATEMENT {
            self.transaction_open = false;
        }
        self.raw.push(sql.to_string());
        Ok(())
    }

    fn in_transaction(&self) -> bool {
        self.transaction_open
    }
}

/// Create an in-memory SQLite store with the catalog table
pub fn create_test_store() -> SqliteStore {
    let mut store = SqliteStore::open_in_memory().unwrap();
    ensure_schema(&mut store).unwrap();
    store
}

/// Insert records directly, bypassing the loader
pub fn seed_records(store: &mut SqliteStore, records: &[PostalRecord]) {
    for record in records {
        store
            .execute(
                "INSERT INTO postal_codes (postal_code, settlement, municipality, state) VALUES (?1, ?2, ?3, ?4)",
                &record.values(),
            )
            .unwrap();
    }
}

/// Catalog contents ordered by every column, for comparisons
pub fn table_contents(store: &SqliteStore) -> Vec<Vec<String>> {
    store
        .query(
            "SELECT postal_code, settlement, municipality, state FROM postal_codes \
             ORDER BY postal_code, settlement, municipality, state",
            &[],
        )
        .unwrap()
}

/// Names of the indexes defined on the catalog table
pub fn index_names(store: &SqliteStore) -> Vec<String> {
    store
        .query(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'postal_codes' ORDER BY name",
            &[],
        )
        .unwrap()
        .into_iter()
        .map(|mut row| row.remove(0))
        .collect()
}
