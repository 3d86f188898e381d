//! Configuration management and validation.
//!
//! Provides the import and lookup settings, loaded in layers:
//! defaults, then an optional JSON config file, then environment
//! variables, then CLI flags (applied by the command layer).

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BATCH_SIZE, DEFAULT_DATABASE_PATH,
    DEFAULT_INPUT_PATH, DEFAULT_SOURCE_ENCODING, MAX_BATCH_SIZE, env,
};
use crate::{Error, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for the catalog import job and lookup commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the legacy-encoded postal-code export
    pub input_path: PathBuf,

    /// Path to the SQLite catalog database
    pub database_path: PathBuf,

    /// Rows per multi-row insert statement
    pub batch_size: usize,

    /// WHATWG label of the source encoding
    pub source_encoding: String,

    /// Fail before loading if the header does not match the fixed layout
    pub strict_header: bool,

    /// Bisect and retry failed batches instead of dropping them whole
    pub split_retry: bool,

    /// Show a progress spinner while loading
    #[serde(skip)]
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            batch_size: DEFAULT_BATCH_SIZE,
            source_encoding: DEFAULT_SOURCE_ENCODING.to_string(),
            strict_header: false,
            split_retry: true,
            show_progress: false,
        }
    }
}

impl Config {
    /// Default config file location (`~/.config/postal-catalog/config.json`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Load a JSON config file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!("Loaded config file {}", path.display());
        Ok(config)
    }

    /// Load defaults, then the config file if given, then the process environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides using the given variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(env::DATABASE_PATH) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(env::INPUT_PATH) {
            self.input_path = PathBuf::from(path);
        }
        if let Some(size) = lookup(env::BATCH_SIZE) {
            self.batch_size = size.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a positive integer, got '{}'",
                    env::BATCH_SIZE,
                    size
                ))
            })?;
        }
        if let Some(label) = lookup(env::SOURCE_ENCODING) {
            self.source_encoding = label;
        }
        Ok(())
    }

    /// Set the input file
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Set the database file
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Set the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the source encoding label
    pub fn with_source_encoding(mut self, label: impl Into<String>) -> Self {
        self.source_encoding = label.into();
        self
    }

    /// Require the header to match the fixed layout
    pub fn with_strict_header(mut self) -> Self {
        self.strict_header = true;
        self
    }

    /// Drop failed batches whole instead of bisecting them
    pub fn without_split_retry(mut self) -> Self {
        self.split_retry = false;
        self
    }

    /// Enable the progress spinner
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Resolve the configured source encoding
    pub fn encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.source_encoding.trim().as_bytes()).ok_or_else(|| {
            Error::configuration(format!(
                "Unknown source encoding '{}'",
                self.source_encoding
            ))
        })
    }

    /// Validate settings before any store access
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(Error::configuration(format!(
                "Batch size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE, self.batch_size
            )));
        }
        self.encoding()?;
        if self.database_path.as_os_str().is_empty() {
            return Err(Error::configuration("Database path cannot be empty"));
        }
        Ok(())
    }
}
