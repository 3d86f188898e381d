//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading and the result type every
//! command hands back to `main`.

use crate::app::api::STATUS_OK;
use crate::app::models::ImportRun;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// What a command did, for the process exit code
#[derive(Debug, Clone)]
pub enum CommandOutcome {
    /// The import ran to completion
    Imported(ImportRun),
    /// A lookup was answered with this status code
    Responded(u16),
    /// Table and indexes are in place
    Reindexed,
}

impl CommandOutcome {
    /// Process exit code: zero unless a lookup was not answered with 200
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandOutcome::Imported(_) | CommandOutcome::Reindexed => 0,
            CommandOutcome::Responded(status) if *status == STATUS_OK => 0,
            CommandOutcome::Responded(_) => 1,
        }
    }
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags. A second call in
/// the same process keeps the first subscriber.
pub fn setup_logging(common: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = common.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("postal_catalog={}", log_level)));

    let result = if common.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if result.is_err() {
        debug!("Logging already initialized");
    } else {
        debug!("Logging initialized at level: {}", log_level);
    }
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(common: &CommonArgs) -> Result<Config> {
    let default_config_path = if common.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file: Option<&Path> = match &common.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        debug!("No config file found, using defaults and environment variables");
    }

    let mut config = Config::load_layered(config_file)?;

    if let Some(database_path) = &common.database_path {
        config.database_path = database_path.clone();
    }

    Ok(config)
}

/// Require an existing catalog database for read-only commands
pub fn require_database(config: &Config) -> Result<()> {
    if !config.database_path.is_file() {
        return Err(Error::file_not_found(
            config.database_path.display().to_string(),
        ));
    }
    Ok(())
}
