//! Postal Catalog Library
//!
//! Loads the national postal-code catalog used by the alumni administration
//! app into a relational table and answers the hierarchical lookups the
//! address forms need.
//!
//! This library provides tools for:
//! - Transcoding the legacy single-byte source file into UTF-8 on the fly
//! - Lenient CSV parsing with fixed column positions
//! - Row validation with skip accounting
//! - Batched bulk loading with constraint relaxation and index rebuild
//! - Postal code, state, municipality and settlement lookups
//! - The JSON envelope the web layer wraps lookup results in

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod api;
    pub mod models;
    pub mod services {
        pub mod batch_loader;
        pub mod catalog_query;
        pub mod import_pipeline;
        pub mod row_validator;
        pub mod store;
        pub mod tabular_parser;
        pub mod transcoding_reader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ImportRun, PostalRecord};
pub use config::Config;

/// Result type alias for the postal catalog
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for catalog import and lookup operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The source stream could not be read while transcoding
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The transcoded stream could not be split into rows
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Header row does not match the expected column layout
    #[error("Header mismatch at column {column}: expected '{expected}', found '{found}'")]
    HeaderMismatch {
        column: usize,
        expected: String,
        found: String,
    },

    /// Statement failed against the store
    #[error("Store error: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    /// Lookup found no matching rows
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Lookup arguments rejected before querying
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// JSON serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a decode error, optionally wrapping the underlying I/O failure
    pub fn decode(message: impl Into<String>, source: Option<std::io::Error>) -> Self {
        Self::Decode {
            message: message.into(),
            source,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::Parse {
            message: message.into(),
            source,
        }
    }

    /// Create a header mismatch error
    pub fn header_mismatch(
        column: usize,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::HeaderMismatch {
            column,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>, source: Option<rusqlite::Error>) -> Self {
        Self::Store {
            message: message.into(),
            source,
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Whether the error aborts an import run (stream-level failures)
    pub fn is_stream_error(&self) -> bool {
        matches!(self, Error::Decode { .. } | Error::Parse { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        let position = error
            .position()
            .map(|p| format!(" at line {}", p.line()))
            .unwrap_or_default();

        if error.is_io_error() {
            match error.into_kind() {
                csv::ErrorKind::Io(source) => Self::Decode {
                    message: format!("Failed to read source stream{}", position),
                    source: Some(source),
                },
                _ => Self::decode(format!("Failed to read source stream{}", position), None),
            }
        } else {
            Self::Parse {
                message: format!("CSV parsing failed{}", position),
                source: Some(error),
            }
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Store {
            message: error.to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
