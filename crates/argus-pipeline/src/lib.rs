//! Argus Pipeline Orchestrator
//!
//! Sequences the pipeline stages per content item and per scheduled batch:
//! ingest (content-hash dedup) -> extract -> retrieve evidence -> synthesize
//! verdict -> review/resolve, plus the scheduled re-check and nightly
//! re-score batches.
//!
//! Per-item failures are isolated and logged; a batch always completes
//! with a summary of processed/failed counts. Only failure to reach the
//! store at all aborts a run.

pub mod config;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod retry;
pub mod worker;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use metrics::RunSummary;
pub use orchestrator::{content_hash, IngestStatus, ItemOutcome, Pipeline, RawContent};
pub use worker::PipelineWorker;
