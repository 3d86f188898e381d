//! Loader configuration

use crate::config::Config;
use crate::constants::{DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE};
use crate::{Error, Result};

/// Settings for a single load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Rows per multi-row insert
    pub batch_size: usize,

    /// Bisect failed batches down to single rows before giving up on them
    pub split_retry: bool,

    /// Show a progress spinner while loading
    pub show_progress: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            split_retry: true,
            show_progress: false,
        }
    }
}

impl LoaderConfig {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn without_split_retry(mut self) -> Self {
        self.split_retry = false;
        self
    }

    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Validate the batch size against the store's parameter ceiling
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(Error::configuration(format!(
                "Batch size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE, self.batch_size
            )));
        }
        Ok(())
    }
}

impl From<&Config> for LoaderConfig {
    fn from(config: &Config) -> Self {
        Self {
            batch_size: config.batch_size,
            split_retry: config.split_retry,
            show_progress: config.show_progress,
        }
    }
}
