//! Test utilities for the catalog query service

use super::CatalogQueryService;
use crate::Error;
use crate::app::models::{PostalRecord, SettlementEntry};
use crate::app::services::store::SqliteStore;
use crate::app::services::store::tests::{RecordingStore, create_test_store, seed_records};


/// Query service over an in-memory catalog holding `records`
pub fn service_with(records: &[PostalRecord]) -> CatalogQueryService<SqliteStore> {
    let mut store = create_test_store();
    seed_records(&mut store, records);
    CatalogQueryService::new(store)
}

/// Small catalog spanning two states
pub fn sample_catalog() -> Vec<PostalRecord> {
    vec![
        PostalRecord::new("12345", "Centro", "Cuauhtémoc", "CDMX"),
        PostalRecord::new("67890", "Norte", "Tlalnepantla", "MEX"),
        PostalRecord::new("06700", "Roma Norte", "Cuauhtémoc", "CDMX"),
        PostalRecord::new("06760", "Roma Sur", "Cuauhtémoc", "CDMX"),
        PostalRecord::new("06600", "Juárez", "Cuauhtémoc", "CDMX"),
        PostalRecord::new("04000", "Coyoacán Centro", "Coyoacán", "CDMX"),
        PostalRecord::new("54000", "Centro", "Tlalnepantla", "MEX"),
    ]
}
