//! Application constants for the postal catalog
//!
//! This module contains the fixed source layout, store schema, default
//! values, and environment variable names used throughout the crate.

// =============================================================================
// Source File Layout
// =============================================================================

/// Default location of the consolidated postal-code export
pub const DEFAULT_INPUT_PATH: &str = "data/CP_CONSOLIDADO.csv";

/// WHATWG label of the legacy codepage the export is written in
pub const DEFAULT_SOURCE_ENCODING: &str = "windows-1252";

/// Fixed column positions in the source file
pub mod columns {
    pub const POSTAL_CODE: usize = 0;
    pub const SETTLEMENT: usize = 1;
    pub const MUNICIPALITY: usize = 3;
    pub const STATE: usize = 4;

    /// Rows with fewer fields than this are skipped
    pub const MIN_FIELDS: usize = 5;

    /// Column names expected at each extracted position when the header is checked
    pub const EXPECTED_HEADER: &[(usize, &str)] = &[
        (POSTAL_CODE, "d_codigo"),
        (SETTLEMENT, "d_asenta"),
        (MUNICIPALITY, "d_mnpio"),
        (STATE, "d_estado"),
    ];

    /// Human-readable name of an extracted column
    pub fn name(position: usize) -> &'static str {
        match position {
            POSTAL_CODE => "postal_code",
            SETTLEMENT => "settlement",
            MUNICIPALITY => "municipality",
            STATE => "state",
            _ => "unused",
        }
    }
}

/// Length of a valid postal code, in characters
pub const POSTAL_CODE_LENGTH: usize = 5;

// =============================================================================
// Store Schema
// =============================================================================

/// Target table of the catalog
pub const CATALOG_TABLE: &str = "postal_codes";

/// Columns written by the bulk loader, in insert order
pub const INSERT_COLUMNS: &[&str] = &["postal_code", "settlement", "municipality", "state"];

/// Table definition, created when absent
pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS postal_codes (
    id INTEGER PRIMARY KEY,
    postal_code TEXT NOT NULL,
    settlement TEXT NOT NULL,
    municipality TEXT NOT NULL,
    state TEXT NOT NULL
)";

/// Derived lookup indexes as (name, column list)
pub const CATALOG_INDEXES: &[(&str, &str)] = &[
    ("idx_postal_codes_code", "postal_code"),
    ("idx_postal_codes_state_municipality", "state, municipality"),
    ("idx_postal_codes_settlement", "settlement"),
];

// =============================================================================
// Bulk Session Statements (SQLite dialect)
// =============================================================================

/// Switches applied before the first batch
pub const RELAX_STATEMENTS: &[&str] = &[
    "PRAGMA foreign_keys = OFF",
    "PRAGMA ignore_check_constraints = ON",
    "PRAGMA synchronous = OFF",
    "PRAGMA encoding = 'UTF-8'",
];

/// Switches restored once loading finishes, successful or not
pub const RESTORE_STATEMENTS: &[&str] = &[
    "PRAGMA foreign_keys = ON",
    "PRAGMA ignore_check_constraints = OFF",
    "PRAGMA synchronous = FULL",
];

pub const BEGIN_STATEMENT: &str = "BEGIN";
pub const COMMIT_STATEMENT: &str = "COMMIT";

// =============================================================================
// Loader Defaults
// =============================================================================

/// Rows per multi-row insert
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// SQLite's default host-parameter ceiling (SQLITE_MAX_VARIABLE_NUMBER)
pub const MAX_HOST_PARAMETERS: usize = 32_766;

/// Largest batch that fits the host-parameter ceiling
pub const MAX_BATCH_SIZE: usize = MAX_HOST_PARAMETERS / 4;

/// Read buffer size for the transcoding reader
pub const TRANSCODE_BUFFER_SIZE: usize = 64 * 1024;

/// Default catalog database file
pub const DEFAULT_DATABASE_PATH: &str = "data/catalog.sqlite3";

// =============================================================================
// Environment and Config File
// =============================================================================

pub mod env {
    pub const DATABASE_PATH: &str = "CATALOG_DATABASE_PATH";
    pub const INPUT_PATH: &str = "CATALOG_INPUT_PATH";
    pub const BATCH_SIZE: &str = "CATALOG_BATCH_SIZE";
    pub const SOURCE_ENCODING: &str = "CATALOG_SOURCE_ENCODING";
}

/// Directory under the user config dir holding `config.json`
pub const CONFIG_DIR_NAME: &str = "postal-catalog";
pub const CONFIG_FILE_NAME: &str = "config.json";
