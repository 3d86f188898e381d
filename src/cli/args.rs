//! Command-line argument definitions for the postal catalog
//!
//! Defines the CLI surface with the clap derive API: the bulk import job,
//! the lookup subcommands mirroring the web endpoints, and index maintenance.

use crate::constants::MAX_BATCH_SIZE;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the postal catalog tool
///
/// Imports the national postal-code export into the catalog database and
/// answers postal code, state, municipality and settlement lookups.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "postal-catalog",
    version,
    about = "Import and query the national postal-code catalog",
    long_about = "Loads the legacy-encoded national postal-code export into a SQLite catalog \
                  table in batched, transactional bulk inserts, and answers the hierarchical \
                  lookups (postal code, state, municipality, settlement) used by address forms."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Replace the catalog with the contents of the postal-code export
    Import(ImportArgs),
    /// Resolve a postal code to its state, municipality and settlements
    Lookup(LookupArgs),
    /// List every state in the catalog
    States(StatesArgs),
    /// List the municipalities of a state
    Municipalities(MunicipalitiesArgs),
    /// List the settlements of a municipality
    Settlements(SettlementsArgs),
    /// Create the catalog table and lookup indexes if missing
    Reindex(ReindexArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// Path to the SQLite catalog database
    ///
    /// Overrides the config file and CATALOG_DATABASE_PATH.
    #[arg(
        short = 'D',
        long = "database",
        value_name = "FILE",
        help = "Path to the catalog database"
    )]
    pub database_path: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// ~/.config/postal-catalog/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the import command
#[derive(Debug, Clone, Default, Parser)]
pub struct ImportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Path to the postal-code export
    ///
    /// Comma-separated export with the header row first and at least five
    /// columns per row. Defaults to data/CP_CONSOLIDADO.csv
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Path to the postal-code export"
    )]
    pub input_path: Option<PathBuf>,

    /// Rows per multi-row insert
    #[arg(
        short = 'b',
        long = "batch-size",
        value_name = "ROWS",
        help = "Rows per multi-row insert statement"
    )]
    pub batch_size: Option<usize>,

    /// Source file encoding
    ///
    /// Any WHATWG encoding label (windows-1252, latin1, utf-8, ...).
    #[arg(
        short = 'e',
        long = "encoding",
        value_name = "LABEL",
        help = "Encoding of the export file"
    )]
    pub encoding: Option<String>,

    /// Fail before touching the catalog if the header layout differs
    #[arg(
        long = "strict-header",
        help = "Require the expected column names in the header row"
    )]
    pub strict_header: bool,

    /// Drop failed batches whole instead of bisecting them
    #[arg(
        long = "no-split-retry",
        help = "Do not retry failed batches in smaller pieces"
    )]
    pub no_split_retry: bool,

    /// Output format for the import summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the import summary"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the lookup command
#[derive(Debug, Clone, Parser)]
pub struct LookupArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Five-character postal code
    #[arg(value_name = "POSTAL_CODE")]
    pub postal_code: String,
}

/// Arguments for the states command
#[derive(Debug, Clone, Parser)]
pub struct StatesArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the municipalities command
#[derive(Debug, Clone, Parser)]
pub struct MunicipalitiesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// State name as stored in the catalog
    #[arg(value_name = "STATE")]
    pub state: String,
}

/// Arguments for the settlements command
#[derive(Debug, Clone, Parser)]
pub struct SettlementsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// State name as stored in the catalog
    #[arg(value_name = "STATE")]
    pub state: String,

    /// Municipality name as stored in the catalog
    #[arg(value_name = "MUNICIPALITY")]
    pub municipality: String,
}

/// Arguments for the reindex command
#[derive(Debug, Clone, Parser)]
pub struct ReindexArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options for the import summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
}

impl Commands {
    /// Options shared by every subcommand
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Import(args) => &args.common,
            Commands::Lookup(args) => &args.common,
            Commands::States(args) => &args.common,
            Commands::Municipalities(args) => &args.common,
            Commands::Settlements(args) => &args.common,
            Commands::Reindex(args) => &args.common,
        }
    }
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Validate the shared arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }
}

impl ImportArgs {
    /// Validate the import arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if let Some(input_path) = &self.input_path {
            if input_path.is_dir() {
                return Err(Error::configuration(format!(
                    "Input path is a directory: {}",
                    input_path.display()
                )));
            }
        }

        if let Some(batch_size) = self.batch_size {
            if batch_size == 0 || batch_size > MAX_BATCH_SIZE {
                return Err(Error::configuration(format!(
                    "Batch size must be between 1 and {}",
                    MAX_BATCH_SIZE
                )));
            }
        }

        Ok(())
    }

    /// Check if we should show the progress spinner
    pub fn show_progress(&self) -> bool {
        !self.common.quiet && self.output_format == OutputFormat::Human
    }
}
