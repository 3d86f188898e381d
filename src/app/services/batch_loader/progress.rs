//! Progress reporting for catalog loads
//!
//! The row count of the export is not known up front, so progress is shown
//! as a spinner carrying the running counters.

use crate::app::models::ImportRun;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Rows between spinner message refreshes
pub const PROGRESS_INTERVAL: usize = 5_000;

/// Spinner wrapper for load operations
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a reporter with no spinner attached
    pub fn new() -> Self {
        Self { progress_bar: None }
    }

    /// Start the spinner
    pub fn setup_spinner(&mut self) {
        let pb = create_spinner("Loading postal codes");
        debug!("Progress spinner initialized");
        self.progress_bar = Some(pb);
    }

    /// Refresh the spinner with the current counters
    pub fn update(&self, run: &ImportRun) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(format!(
                "Read {} rows | imported {} | skipped {} | lost {}",
                run.rows_read, run.imported, run.skipped, run.lost
            ));
        }
    }

    /// Finish with a completion message
    pub fn finish(&self, run: &ImportRun) {
        if let Some(ref pb) = self.progress_bar {
            let completion_message = format!(
                "Completed: {} imported, {} skipped, {} batches",
                run.imported, run.skipped, run.batches_flushed
            );
            pb.finish_with_message(completion_message.clone());
            debug!("Progress reporting completed: {}", completion_message);
        }
    }

    /// Finish with an error message
    pub fn finish_with_error(&self, error_message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(format!("Failed: {}", error_message));
            debug!("Progress reporting finished with error: {}", error_message);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.progress_bar.is_some()
    }

    /// Suspend the spinner to allow clean console output
    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if let Some(ref pb) = self.progress_bar {
            pb.suspend(f)
        } else {
            f()
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}

/// Create a spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
