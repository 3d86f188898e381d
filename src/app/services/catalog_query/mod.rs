//! Read-only lookups over the catalog table
//!
//! The query service holds no state of its own between calls; every lookup
//! runs against whatever the table contains at that moment, including a
//! partially loaded table if an import is in progress elsewhere.

pub mod service;

#[cfg(test)]
pub mod tests;

pub use service::CatalogQueryService;
