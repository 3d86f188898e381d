//! Command implementations for the postal catalog CLI
//!
//! Each command is implemented in its own module:
//! - `import`: the bulk import job
//! - `query`: lookups printed as the web response envelope, and reindexing

pub mod import;
pub mod query;
pub mod shared;

pub use shared::CommandOutcome;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Dispatches to the subcommand handler named by the arguments.
pub fn run(args: Args) -> Result<CommandOutcome> {
    let command = args
        .command
        .ok_or_else(|| Error::configuration("No subcommand given"))?;

    match command {
        Commands::Import(args) => import::run_import(args),
        Commands::Lookup(args) => query::run_lookup(args),
        Commands::States(args) => query::run_states(args),
        Commands::Municipalities(args) => query::run_municipalities(args),
        Commands::Settlements(args) => query::run_settlements(args),
        Commands::Reindex(args) => query::run_reindex(args),
    }
}
