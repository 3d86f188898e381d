//! Multi-row insert statement construction

use crate::app::models::PostalRecord;
use crate::constants::{CATALOG_TABLE, INSERT_COLUMNS};

/// `INSERT INTO postal_codes (...) VALUES (?, ?, ?, ?), ...` for `rows` rows
pub fn insert_statement(rows: usize) -> String {
    let placeholder = format!("({})", vec!["?"; INSERT_COLUMNS.len()].join(", "));
    let values = vec![placeholder.as_str(); rows].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES {}",
        CATALOG_TABLE,
        INSERT_COLUMNS.join(", "),
        values
    )
}

/// Flattened parameters for `records`, in column order
pub fn insert_params(records: &[PostalRecord]) -> Vec<&str> {
    records.iter().flat_map(|r| r.values()).collect()
}

/// Statement clearing the catalog before a load
pub fn truncate_statement() -> String {
    format!("DELETE FROM {}", CATALOG_TABLE)
}
