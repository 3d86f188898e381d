//! Bulk load orchestration

use std::time::Instant;

use tracing::{debug, error, info, trace, warn};

use super::config::LoaderConfig;
use super::progress::{PROGRESS_INTERVAL, ProgressReporter};
use super::statements::{insert_params, insert_statement, truncate_statement};
use crate::{Error, Result};
use crate::app::models::{ImportRun, PostalRecord};
use crate::app::services::row_validator::RowOutcome;
use crate::app::services::store::{CatalogStore, drop_indexes, ensure_schema, rebuild_indexes};
use crate::constants::{BEGIN_STATEMENT, COMMIT_STATEMENT, RELAX_STATEMENTS, RESTORE_STATEMENTS};

/// Loads validated rows into the catalog table in fixed-size batches
///
/// A load is a destructive refresh: the table is cleared before the first
/// batch, so the result is exactly the valid rows of this input. A failed
/// insert is logged and does not abort the load; with split retry enabled
/// the batch is bisected so only the rows that fail on their own are lost.
/// If the store rolls back the transaction itself, the load stops and the
/// previous contents stay in place.
pub struct BatchLoader<'a, S: CatalogStore> {
    store: &'a mut S,
    config: LoaderConfig,
    progress: ProgressReporter,
    buffer: Vec<PostalRecord>,
    full_batch_sql: String,
    relaxed: bool,
    in_transaction: bool,
}

impl<'a, S: CatalogStore> BatchLoader<'a, S> {
    /// Create a loader writing through `store`
    pub fn new(store: &'a mut S, config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        let full_batch_sql = insert_statement(config.batch_size);

        Ok(Self {
            store,
            buffer: Vec::with_capacity(config.batch_size),
            full_batch_sql,
            config,
            progress: ProgressReporter::new(),
            relaxed: false,
            in_transaction: false,
        })
    }

    /// Loader configuration
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Run the load over a sequence of validator outcomes
    ///
    /// An `Err` item is a fatal stream error: the load stops, the session
    /// switches are restored (committing the batches already flushed) and
    /// the error is returned.
    pub fn load<I>(mut self, rows: I) -> Result<ImportRun>
    where
        I: IntoIterator<Item = Result<RowOutcome>>,
    {
        let start_time = Instant::now();
        let mut run = ImportRun::new();

        if self.config.show_progress {
            self.progress.setup_spinner();
        }

        info!(
            "Starting catalog load (batch size {}, split retry {})",
            self.config.batch_size, self.config.split_retry
        );

        let outcome = self
            .begin()
            .and_then(|()| self.load_rows(rows, &mut run));
        let finished = self.finish();
        run.elapsed = start_time.elapsed();

        match outcome.and(finished) {
            Ok(()) => {
                debug_assert!(run.is_balanced());
                self.progress.finish(&run);
                info!(
                    "Catalog load complete: {} imported, {} skipped, {} lost in {} batches",
                    run.imported, run.skipped, run.lost, run.batches_flushed
                );
                Ok(run)
            }
            Err(e) => {
                self.progress.finish_with_error(&e.to_string());
                if e.is_stream_error() {
                    error!("Input stream failed after {}: {}", partial_counts(&run), e);
                } else {
                    warn!("Catalog load aborted after {}: {}", partial_counts(&run), e);
                }
                Err(e)
            }
        }
    }

    /// Relax enforcement, open the transaction and clear the table
    fn begin(&mut self) -> Result<()> {
        ensure_schema(&mut *self.store)?;
        drop_indexes(&mut *self.store)?;

        self.relaxed = true;
        for statement in RELAX_STATEMENTS {
            self.store.execute_raw(statement)?;
        }

        self.store.execute_raw(BEGIN_STATEMENT)?;
        self.in_transaction = true;

        info!("Clearing previous catalog contents");
        self.store.execute_raw(&truncate_statement())?;
        Ok(())
    }

    fn load_rows<I>(&mut self, rows: I, run: &mut ImportRun) -> Result<()>
    where
        I: IntoIterator<Item = Result<RowOutcome>>,
    {
        for item in rows {
            let outcome = item?;
            run.rows_read += 1;

            match outcome {
                RowOutcome::Record(record) => {
                    self.buffer.push(record);
                    if self.buffer.len() >= self.config.batch_size {
                        self.flush(run)?;
                    }
                }
                RowOutcome::Skip(reason) => {
                    run.skipped += 1;
                    trace!("Skipped row {}: {}", run.rows_read, reason);
                }
            }

            if run.rows_read % PROGRESS_INTERVAL == 0 {
                self.progress.update(run);
            }
        }

        if !self.buffer.is_empty() {
            debug!("Flushing final batch of {} rows", self.buffer.len());
            self.flush(run)?;
        }
        Ok(())
    }

    /// Write the buffered batch and clear the buffer
    ///
    /// A failed write is not fatal unless the store has rolled back the
    /// whole load transaction, which also undoes the truncate.
    fn flush(&mut self, run: &mut ImportRun) -> Result<()> {
        let mut batch = std::mem::take(&mut self.buffer);
        run.batches_flushed += 1;
        let batch_number = run.batches_flushed;

        let lost_before = run.lost;
        if let Err(e) = self.write_batch(&batch, run) {
            run.batches_failed += 1;
            self.ensure_transaction(run)?;

            if self.config.split_retry && batch.len() > 1 {
                let mid = batch.len() / 2;
                self.retry_chunk(&batch[..mid], run)?;
                self.retry_chunk(&batch[mid..], run)?;
            } else {
                run.lost += batch.len();
            }
            let lost = run.lost - lost_before;
            self.progress.suspend(|| {
                warn!(
                    "Batch {} ({} rows) failed: {}; {} rows could not be written",
                    batch_number,
                    batch.len(),
                    e,
                    lost
                )
            });
        } else {
            info!(
                "Batch {} written: {} rows (total imported {})",
                batch_number,
                batch.len(),
                run.imported
            );
        }

        batch.clear();
        self.buffer = batch;
        self.progress.update(run);
        Ok(())
    }

    /// Bisect a failed chunk until its halves succeed or single rows fail
    fn retry_chunk(&mut self, chunk: &[PostalRecord], run: &mut ImportRun) -> Result<()> {
        run.retried_writes += 1;
        match self.write_batch(chunk, run) {
            Ok(()) => {}
            Err(e) => {
                self.ensure_transaction(run)?;
                if chunk.len() > 1 {
                    debug!("Retry of {} rows failed, splitting: {}", chunk.len(), e);
                    let mid = chunk.len() / 2;
                    self.retry_chunk(&chunk[..mid], run)?;
                    self.retry_chunk(&chunk[mid..], run)?;
                } else {
                    run.lost += 1;
                    debug!(
                        "Dropping postal code {} ({}): {}",
                        chunk[0].postal_code, chunk[0].settlement, e
                    );
                }
            }
        }
        Ok(())
    }

    /// Fail the load if the store dropped the transaction after a write error
    ///
    /// Everything written so far was rolled back with it, so every valid row
    /// read is counted as lost and no COMMIT is attempted.
    fn ensure_transaction(&mut self, run: &mut ImportRun) -> Result<()> {
        if !self.in_transaction || self.store.in_transaction() {
            return Ok(());
        }
        self.in_transaction = false;
        run.imported = 0;
        run.lost = run.rows_read - run.skipped;
        Err(Error::store("load transaction rolled back by the store", None))
    }

    fn write_batch(&mut self, records: &[PostalRecord], run: &mut ImportRun) -> Result<()> {
        let params = insert_params(records);
        let affected = if records.len() == self.config.batch_size {
            self.store.execute(&self.full_batch_sql, &params)?
        } else {
            self.store.execute(&insert_statement(records.len()), &params)?
        };
        run.imported += records.len();
        trace!("Inserted {} rows", affected);
        Ok(())
    }

    /// Commit, restore enforcement and rebuild indexes
    ///
    /// Every step is attempted even if an earlier one fails; the first
    /// error is returned.
    fn finish(&mut self) -> Result<()> {
        let mut first_error = None;

        if self.in_transaction {
            info!("Committing catalog load");
            if let Err(e) = self.store.execute_raw(COMMIT_STATEMENT) {
                first_error.get_or_insert(e);
            }
            self.in_transaction = false;
        }

        if self.relaxed {
            for statement in RESTORE_STATEMENTS {
                if let Err(e) = self.store.execute_raw(statement) {
                    first_error.get_or_insert(e);
                }
            }
            self.relaxed = false;
        }

        info!("Rebuilding catalog indexes");
        if let Err(e) = rebuild_indexes(&mut *self.store) {
            first_error.get_or_insert(e);
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Counters of an interrupted load, for the abort log line
pub(crate) fn partial_counts(run: &ImportRun) -> String {
    format!(
        "{} rows ({} imported, {} skipped, {} lost)",
        run.rows_read, run.imported, run.skipped, run.lost
    )
}
