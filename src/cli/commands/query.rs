//! Lookup and maintenance commands
//!
//! The lookup commands print the same JSON envelope the web layer returns,
//! so the catalog can be checked from a shell after an import.

use super::shared::{CommandOutcome, load_configuration, require_database, setup_logging};
use crate::app::api::{ApiResponse, CatalogApi};
use crate::app::services::catalog_query::CatalogQueryService;
use crate::app::services::store::{SqliteStore, ensure_schema, rebuild_indexes};
use crate::cli::args::{
    CommonArgs, LookupArgs, MunicipalitiesArgs, ReindexArgs, SettlementsArgs, StatesArgs,
};
use crate::Result;
use serde_json::Value;
use tracing::{debug, info};

/// Resolve one postal code
pub fn run_lookup(args: LookupArgs) -> Result<CommandOutcome> {
    let api = open_api(&args.common)?;
    respond(api.lookup(&args.postal_code))
}

/// List all states
pub fn run_states(args: StatesArgs) -> Result<CommandOutcome> {
    let api = open_api(&args.common)?;
    respond(api.states())
}

/// List the municipalities of a state
pub fn run_municipalities(args: MunicipalitiesArgs) -> Result<CommandOutcome> {
    let api = open_api(&args.common)?;
    respond(api.municipalities(&args.state))
}

/// List the settlements of a municipality
pub fn run_settlements(args: SettlementsArgs) -> Result<CommandOutcome> {
    let api = open_api(&args.common)?;
    respond(api.settlements(&args.state, &args.municipality))
}

/// Create the catalog table and indexes if they are missing
pub fn run_reindex(args: ReindexArgs) -> Result<CommandOutcome> {
    setup_logging(&args.common)?;
    args.common.validate()?;
    let config = load_configuration(&args.common)?;

    let mut store = SqliteStore::open(&config.database_path)?;
    ensure_schema(&mut store)?;
    rebuild_indexes(&mut store)?;

    info!("Catalog indexes ready in {}", config.database_path.display());
    if !args.common.quiet {
        println!("Catalog indexes ready: {}", config.database_path.display());
    }
    Ok(CommandOutcome::Reindexed)
}

fn open_api(common: &CommonArgs) -> Result<CatalogApi<SqliteStore>> {
    setup_logging(common)?;
    common.validate()?;
    let config = load_configuration(common)?;
    require_database(&config)?;

    debug!("Querying {}", config.database_path.display());
    let store = SqliteStore::open(&config.database_path)?;
    Ok(CatalogApi::new(CatalogQueryService::new(store)))
}

fn respond((status, response): (u16, ApiResponse<Value>)) -> Result<CommandOutcome> {
    println!("{}", response.to_json_pretty()?);
    Ok(CommandOutcome::Responded(status))
}
