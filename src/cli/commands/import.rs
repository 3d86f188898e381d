//! Import command implementation
//!
//! Runs the bulk import job against the configured catalog database and
//! reports the run counters.

use super::shared::{CommandOutcome, load_configuration, setup_logging};
use crate::app::models::ImportRun;
use crate::app::services::import_pipeline::ImportPipeline;
use crate::app::services::store::SqliteStore;
use crate::cli::args::{ImportArgs, OutputFormat};
use crate::config::Config;
use crate::{Error, Result};
use indicatif::HumanDuration;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Summary printed after an import
#[derive(Debug, Serialize)]
pub struct ImportSummary<'a> {
    #[serde(flatten)]
    pub run: &'a ImportRun,
    pub database: String,
    pub input: String,
    pub encoding_sample: Option<String>,
}

/// Import command runner
///
/// 1. Set up logging and configuration
/// 2. Open the catalog database
/// 3. Run the import pipeline
/// 4. Report the counters
pub fn run_import(args: ImportArgs) -> Result<CommandOutcome> {
    setup_logging(&args.common)?;
    info!("Starting postal catalog import");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let mut config = load_configuration(&args.common)?;
    apply_import_overrides(&mut config, &args);
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);

    let pipeline = ImportPipeline::new(config)?;
    let config = pipeline.config();

    let mut store = SqliteStore::open(&config.database_path)?;
    let run = pipeline.run(&mut store)?;

    let encoding_sample = match ImportPipeline::encoding_sample(&store) {
        Ok(sample) => sample,
        Err(e) => {
            warn!("Could not read back an encoding sample: {}", e);
            None
        }
    };

    let summary = ImportSummary {
        run: &run,
        database: config.database_path.display().to_string(),
        input: config.input_path.display().to_string(),
        encoding_sample,
    };
    print_summary(&summary, args.output_format)?;

    Ok(CommandOutcome::Imported(run))
}

/// Apply CLI argument overrides to configuration
pub fn apply_import_overrides(config: &mut Config, args: &ImportArgs) {
    if let Some(input_path) = &args.input_path {
        config.input_path = input_path.clone();
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(encoding) = &args.encoding {
        config.source_encoding = encoding.clone();
    }
    if args.strict_header {
        config.strict_header = true;
    }
    if args.no_split_retry {
        config.split_retry = false;
    }
    config.show_progress = args.show_progress();
}

fn print_summary(summary: &ImportSummary<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(summary).map_err(|e| Error::Serialization {
                message: "Failed to serialize import summary".to_string(),
                source: e,
            })?;
            println!("{}", json);
        }
        OutputFormat::Human => println!("{}", format_human_summary(summary)),
    }
    Ok(())
}

/// Human-readable import report
pub fn format_human_summary(summary: &ImportSummary<'_>) -> String {
    let run = summary.run;
    let mut lines = vec![
        String::new(),
        "Import complete".to_string(),
        "===============".to_string(),
        format!("Input:          {}", summary.input),
        format!("Database:       {}", summary.database),
        format!("Rows read:      {}", run.rows_read),
        format!("Imported:       {} ({:.1}%)", run.imported, run.import_rate()),
        format!("Skipped:        {}", run.skipped),
        format!("Lost:           {}", run.lost),
        format!(
            "Batches:        {} ({} failed, {} retry writes)",
            run.batches_flushed, run.batches_failed, run.retried_writes
        ),
        format!("Elapsed:        {}", HumanDuration(run.elapsed)),
    ];

    if let Some(sample) = &summary.encoding_sample {
        lines.push(format!("Encoding check: {}", sample));
    }
    if run.has_losses() {
        lines.push(format!(
            "Warning: {} valid rows could not be written; see the log for the failed batches",
            run.lost
        ));
    }

    lines.join("\n")
}
