//! Batch commands: run, recheck, rescore, worker

use super::{current_timestamp, CliPipeline};
use crate::error::CliError;
use crate::output::Formatter;
use argus_pipeline::{PipelineConfig, PipelineWorker};

/// Process all items that have no claims yet
pub async fn execute_run(pipeline: &CliPipeline, formatter: &Formatter) -> Result<(), CliError> {
    let summary = pipeline.run_pending(current_timestamp()).await?;
    formatter.info(&summary.report());
    Ok(())
}

/// Re-check due claims and settle past-deadline ones
pub async fn execute_recheck(
    pipeline: &CliPipeline,
    formatter: &Formatter,
) -> Result<(), CliError> {
    let summary = pipeline.run_recheck_batch(current_timestamp()).await?;
    formatter.info(&summary.report());
    Ok(())
}

/// Recompute credibility snapshots for all sources with history
pub fn execute_rescore(pipeline: &CliPipeline, formatter: &Formatter) -> Result<(), CliError> {
    let summary = pipeline.run_rescore_batch(current_timestamp())?;
    formatter.info(&summary.report());
    Ok(())
}

/// Run the background worker until Ctrl+C
pub async fn execute_worker(pipeline: CliPipeline, formatter: &Formatter) -> Result<(), CliError> {
    formatter.info("worker running; Ctrl+C to stop");
    let worker = PipelineWorker::new(pipeline, PipelineConfig::default());
    worker.run().await?;
    Ok(())
}
