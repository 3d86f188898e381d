//! Batched bulk loading of postal records
//!
//! The loader consumes validated rows, buffers them into fixed-size batches
//! and writes each batch as one multi-row insert. Around the load it relaxes
//! constraint enforcement, opens a single transaction and drops the lookup
//! indexes; afterwards it commits, restores enforcement and rebuilds the
//! indexes, whether the load succeeded or not.
//!
//! ## Architecture
//!
//! - [`config`] - batch size and retry policy
//! - [`loader`] - the load orchestration and failure accounting
//! - [`statements`] - multi-row insert statement construction
//! - [`progress`] - operator-facing spinner

pub mod config;
pub mod loader;
pub mod progress;
pub mod statements;

#[cfg(test)]
pub mod tests;

pub use config::LoaderConfig;
pub use loader::BatchLoader;
pub use progress::ProgressReporter;
