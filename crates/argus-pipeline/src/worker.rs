//! Background worker for scheduled pipeline cycles

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::orchestrator::Pipeline;
use argus_domain::traits::{CompletionProvider, EvidenceSearch, PipelineStore};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::time::interval;

/// Current timestamp in seconds since Unix epoch
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Background worker that runs re-check and re-score cycles on a schedule
///
/// Re-checks run frequently; credibility re-scoring runs on its own, much
/// longer interval. The two are independent: re-scoring only reads
/// resolution history and writes new snapshots, so it can share a cycle
/// window with claim processing.
///
/// # Examples
///
/// ```no_run
/// # use argus_pipeline::{Pipeline, PipelineConfig, PipelineWorker};
/// # async fn example<P, B, S>(pipeline: Pipeline<P, B, S>)
/// # where
/// #     P: argus_domain::traits::CompletionProvider + Send + Sync + 'static,
/// #     P::Error: std::fmt::Display,
/// #     B: argus_domain::traits::EvidenceSearch + Send + Sync + 'static,
/// #     B::Error: std::fmt::Display,
/// #     S: argus_domain::traits::PipelineStore,
/// #     S::Error: std::fmt::Display,
/// # {
/// let worker = PipelineWorker::new(pipeline, PipelineConfig::default());
///
/// // Run until Ctrl+C
/// worker.run().await.unwrap();
/// # }
/// ```
pub struct PipelineWorker<P, B, S>
where
    P: CompletionProvider,
    B: EvidenceSearch,
    S: PipelineStore,
{
    pipeline: Pipeline<P, B, S>,
    config: PipelineConfig,
}

impl<P, B, S> PipelineWorker<P, B, S>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: std::fmt::Display,
    B: EvidenceSearch + Send + Sync + 'static,
    B::Error: std::fmt::Display,
    S: PipelineStore,
    S::Error: std::fmt::Display,
{
    /// Create a worker over a configured pipeline
    pub fn new(pipeline: Pipeline<P, B, S>, config: PipelineConfig) -> Self {
        Self { pipeline, config }
    }

    /// The wrapped pipeline
    pub fn pipeline(&self) -> &Pipeline<P, B, S> {
        &self.pipeline
    }

    /// Run the worker until a shutdown signal (Ctrl+C) is received
    pub async fn run(&self) -> Result<(), PipelineError> {
        let mut recheck_ticker = interval(self.config.recheck_interval());
        let mut rescore_ticker = interval(self.config.rescore_interval());

        tracing::info!(
            "Pipeline worker started (recheck every {:?}, rescore every {:?})",
            self.config.recheck_interval(),
            self.config.rescore_interval()
        );

        loop {
            tokio::select! {
                _ = recheck_ticker.tick() => {
                    match self.pipeline.run_recheck_batch(current_timestamp()).await {
                        Ok(summary) => {
                            tracing::info!(
                                "Recheck cycle completed: {} rechecked, {} resolved",
                                summary.rechecks_run,
                                summary.claims_resolved
                            );
                        }
                        Err(e) => {
                            tracing::error!("Recheck cycle failed: {}", e);
                        }
                    }
                }
                _ = rescore_ticker.tick() => {
                    match self.pipeline.run_rescore_batch(current_timestamp()) {
                        Ok(summary) => {
                            tracing::info!(
                                "Rescore cycle completed: {} sources",
                                summary.sources_rescored
                            );
                        }
                        Err(e) => {
                            tracing::error!("Rescore cycle failed: {}", e);
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping worker");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Run a fixed number of recheck cycles (useful for testing)
    pub async fn run_recheck_cycles(&self, cycles: usize) -> Result<(), PipelineError> {
        let mut ticker = interval(self.config.recheck_interval());

        for cycle in 0..cycles {
            ticker.tick().await;
            tracing::debug!("Starting recheck cycle {}/{}", cycle + 1, cycles);
            self.pipeline.run_recheck_batch(current_timestamp()).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_credibility::{CredibilityScorer, ScorerConfig};
    use argus_evidence::{EvidenceRetriever, RetrieverConfig, StaticSearchBackend};
    use argus_extractor::{ClaimExtractor, ExtractorConfig};
    use argus_llm::MockProvider;
    use argus_resolver::{ResolutionEngine, ResolverConfig};
    use argus_store::MemoryStore;
    use argus_verdict::{VerdictPolicy, VerdictSynthesizer};
    use std::sync::Arc;

    fn worker() -> PipelineWorker<MockProvider, StaticSearchBackend, MemoryStore> {
        let provider = Arc::new(MockProvider::new("[]"));
        let pipeline = Pipeline::new(
            MemoryStore::new(),
            ClaimExtractor::new(Arc::clone(&provider), ExtractorConfig::default()),
            EvidenceRetriever::new(
                Arc::new(StaticSearchBackend::new()),
                RetrieverConfig::default(),
            ),
            VerdictSynthesizer::rule_based(VerdictPolicy::default()),
            ResolutionEngine::new(ResolverConfig::default()),
            CredibilityScorer::new(ScorerConfig::default()),
            PipelineConfig::default(),
        );
        PipelineWorker::new(pipeline, PipelineConfig::default())
    }

    #[tokio::test]
    async fn test_run_cycle_on_empty_store() {
        // The first tick fires immediately; a cycle over an empty store
        // completes without error
        let worker = worker();
        worker.run_recheck_cycles(1).await.unwrap();
    }
}
