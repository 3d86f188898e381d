//! Relational store boundary for the postal catalog
//!
//! The import pipeline and the query service never talk to a database
//! driver directly. They take a [`CatalogStore`] value, which exposes the
//! capabilities they need: parameterised execute, parameterised query,
//! raw passthrough for pragmas and transaction control, and the
//! transaction state.
//!
//! - [`sqlite`] - the rusqlite-backed store used by the CLI
//! - [`schema`] - table creation and derived index maintenance

pub mod schema;
pub mod sqlite;

#[cfg(test)]
pub mod tests;

pub use schema::{drop_indexes, ensure_schema, rebuild_indexes};
pub use sqlite::SqliteStore;

use crate::Result;

/// Generic relational-execute capability consumed by the catalog core
///
/// Every catalog column is text, so parameters and result cells are strings.
pub trait CatalogStore {
    /// Run a parameterised statement, returning the affected row count
    fn execute(&mut self, sql: &str, params: &[&str]) -> Result<usize>;

    /// Run a parameterised query, returning each row as its column values
    fn query(&self, sql: &str, params: &[&str]) -> Result<Vec<Vec<String>>>;

    /// Run a statement verbatim (pragmas, `BEGIN`, `COMMIT`, DDL)
    fn execute_raw(&mut self, sql: &str) -> Result<()>;

    /// Whether an explicit transaction is open
    ///
    /// A store may roll the whole transaction back on its own when a
    /// statement fails (disk full, I/O error); this reports the state after.
    fn in_transaction(&self) -> bool;
}
