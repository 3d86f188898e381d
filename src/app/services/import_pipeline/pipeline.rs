//! Import pipeline orchestration

use std::fs::File;
use std::io::{BufReader, Read};

use tracing::{debug, info, warn};

use crate::app::models::ImportRun;
use crate::app::services::batch_loader::{BatchLoader, LoaderConfig};
use crate::app::services::row_validator::validate_row;
use crate::app::services::store::CatalogStore;
use crate::app::services::tabular_parser::{TabularParser, verify_header};
use crate::app::services::transcoding_reader::TranscodingReader;
use crate::config::Config;
use crate::constants::CATALOG_TABLE;
use crate::{Error, Result};

/// One configured import of the postal-code export
#[derive(Debug, Clone)]
pub struct ImportPipeline {
    config: Config,
}

impl ImportPipeline {
    /// Create a pipeline, rejecting invalid settings up front
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Import the configured input file into `store`
    pub fn run<S: CatalogStore>(&self, store: &mut S) -> Result<ImportRun> {
        let path = &self.config.input_path;
        if !path.is_file() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        if let Ok(metadata) = file.metadata() {
            info!(
                "Importing {} ({} bytes, {})",
                path.display(),
                metadata.len(),
                self.config.source_encoding
            );
        }

        self.run_reader(BufReader::new(file), store)
    }

    /// Import from an arbitrary byte stream in the configured encoding
    ///
    /// Nothing in the store is touched until the header has been read (and,
    /// with the strict header option, checked).
    pub fn run_reader<R: Read, S: CatalogStore>(
        &self,
        reader: R,
        store: &mut S,
    ) -> Result<ImportRun> {
        let encoding = self.config.encoding()?;
        let mut parser = TabularParser::new(TranscodingReader::new(reader, encoding))?;

        let headers = parser.headers();
        if headers.is_empty() {
            warn!("Input has no header row");
        }
        for (position, name) in headers.iter().enumerate() {
            debug!("Header column [{}] {}", position, name.trim());
        }
        info!("Detected {} header columns", headers.len());

        if self.config.strict_header {
            verify_header(headers)?;
            debug!("Header layout verified");
        }

        let loader = BatchLoader::new(store, LoaderConfig::from(&self.config))?;
        let rows = (&mut parser).map(|row| row.map(|record| validate_row(&record)));
        let result = loader.load(rows);

        debug!(
            "Consumed {} source bytes in {} rows",
            parser.source().bytes_consumed(),
            parser.rows_yielded()
        );
        result
    }

    /// One stored state name containing non-ASCII text, if any
    ///
    /// A quick check that accented names survived transcoding.
    pub fn encoding_sample<S: CatalogStore>(store: &S) -> Result<Option<String>> {
        let rows = store.query(
            &format!(
                "SELECT state FROM {} WHERE state GLOB '*[^ -~]*' LIMIT 1",
                CATALOG_TABLE
            ),
            &[],
        )?;
        Ok(rows.into_iter().next().and_then(|row| row.into_iter().next()))
    }
}
