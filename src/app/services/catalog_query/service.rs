//! Catalog query service

use tracing::debug;

use crate::app::models::{PostalCodeResolution, SettlementEntry};
use crate::app::services::store::CatalogStore;
use crate::constants::{CATALOG_TABLE, POSTAL_CODE_LENGTH};
use crate::{Error, Result};

/// Hierarchical lookups for the address forms
pub struct CatalogQueryService<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> CatalogQueryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Release the store
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Resolve a postal code to its state, municipality and settlements
    ///
    /// The code must be exactly five characters; anything else is rejected
    /// before the store is queried. When a code spans more than one
    /// municipality, the pair from the first matching row is returned.
    pub fn resolve_postal_code(&self, code: &str) -> Result<PostalCodeResolution> {
        let length = code.chars().count();
        if length != POSTAL_CODE_LENGTH {
            return Err(Error::invalid_input(format!(
                "Postal code must be {} characters, got {} ({:?})",
                POSTAL_CODE_LENGTH, length, code
            )));
        }

        let location = self.store.query(
            &format!(
                "SELECT state, municipality FROM {} WHERE postal_code = ?1 LIMIT 1",
                CATALOG_TABLE
            ),
            &[code],
        )?;
        let Some(mut row) = location.into_iter().next() else {
            return Err(Error::not_found(format!("Postal code {} not found", code)));
        };
        let municipality = row.pop().unwrap_or_default();
        let state = row.pop().unwrap_or_default();

        let settlements = self.single_column(
            &format!(
                "SELECT DISTINCT settlement FROM {} WHERE postal_code = ?1 ORDER BY settlement",
                CATALOG_TABLE
            ),
            &[code],
        )?;
        debug!(
            "Resolved {} to {} / {} ({} settlements)",
            code,
            state,
            municipality,
            settlements.len()
        );

        Ok(PostalCodeResolution {
            postal_code: code.to_string(),
            state,
            municipality,
            settlements,
        })
    }

    /// Every distinct state, sorted
    pub fn list_states(&self) -> Result<Vec<String>> {
        self.single_column(
            &format!("SELECT DISTINCT state FROM {} ORDER BY state", CATALOG_TABLE),
            &[],
        )
    }

    /// Every distinct municipality of `state`, sorted
    ///
    /// An unknown state yields an empty list.
    pub fn list_municipalities(&self, state: &str) -> Result<Vec<String>> {
        self.single_column(
            &format!(
                "SELECT DISTINCT municipality FROM {} WHERE state = ?1 ORDER BY municipality",
                CATALOG_TABLE
            ),
            &[state],
        )
    }

    /// Every distinct (settlement, postal code) pair of a municipality,
    /// ordered by settlement name
    pub fn list_settlements(&self, state: &str, municipality: &str) -> Result<Vec<SettlementEntry>> {
        let rows = self.store.query(
            &format!(
                "SELECT DISTINCT settlement, postal_code FROM {} \
                 WHERE state = ?1 AND municipality = ?2 \
                 ORDER BY settlement, postal_code",
                CATALOG_TABLE
            ),
            &[state, municipality],
        )?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let mut cells = row.into_iter();
                Some(SettlementEntry {
                    settlement: cells.next()?,
                    postal_code: cells.next()?,
                })
            })
            .collect())
    }

    fn single_column(&self, sql: &str, params: &[&str]) -> Result<Vec<String>> {
        Ok(self
            .store
            .query(sql, params)?
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .collect())
    }
}
