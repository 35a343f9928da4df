//! Command implementations for the `argus` binary

mod ingest;
mod resolve;
mod run;
mod show;
mod source;

pub use ingest::execute_ingest;
pub use resolve::execute_resolve;
pub use run::{execute_recheck, execute_rescore, execute_run, execute_worker};
pub use show::{execute_claims, execute_sources, execute_status};
pub use source::execute_source;

use crate::config::CliConfig;
use crate::error::CliError;
use argus_credibility::{CredibilityScorer, ScorerConfig};
use argus_domain::traits::PipelineStore;
use argus_domain::Source;
use argus_evidence::{EvidenceRetriever, RetrieverConfig, SearchDoc, StaticSearchBackend};
use argus_extractor::{ClaimExtractor, ExtractorConfig};
use argus_llm::OllamaProvider;
use argus_pipeline::{Pipeline, PipelineConfig};
use argus_resolver::{ResolutionEngine, ResolverConfig};
use argus_store::SqliteStore;
use argus_verdict::{VerdictPolicy, VerdictSynthesizer};
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// The pipeline type the CLI drives
pub type CliPipeline = Pipeline<OllamaProvider, StaticSearchBackend, SqliteStore>;

/// Current timestamp in seconds since Unix epoch
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Wire a pipeline from CLI configuration
pub fn build_pipeline(config: &CliConfig, db_override: Option<&Path>) -> Result<CliPipeline, CliError> {
    let db_path = db_override.unwrap_or(&config.db_path);
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let store = SqliteStore::new(db_path)?;

    let provider = Arc::new(OllamaProvider::new(
        &config.ollama.endpoint,
        &config.ollama.model,
    ));

    let backend = match &config.corpus_path {
        Some(path) => {
            let contents = std::fs::read_to_string(path).map_err(|e| {
                CliError::Config(format!("cannot read corpus {}: {}", path.display(), e))
            })?;
            let docs: Vec<SearchDoc> = serde_json::from_str(&contents).map_err(|e| {
                CliError::Config(format!("cannot parse corpus {}: {}", path.display(), e))
            })?;
            StaticSearchBackend::with_docs(docs)
        }
        None => StaticSearchBackend::new(),
    };

    let extractor = ClaimExtractor::new(Arc::clone(&provider), ExtractorConfig::default())
        .with_model_version(config.ollama.model.clone());
    let retriever = EvidenceRetriever::new(Arc::new(backend), RetrieverConfig::default());
    let synthesizer = VerdictSynthesizer::with_provider(provider, VerdictPolicy::default())
        .with_model_version(config.ollama.model.clone());

    Ok(Pipeline::new(
        store,
        extractor,
        retriever,
        synthesizer,
        ResolutionEngine::new(ResolverConfig::default()),
        CredibilityScorer::new(ScorerConfig::default()),
        PipelineConfig::default(),
    ))
}

/// Find a source by its handle
pub fn find_source_by_handle<S: PipelineStore>(
    store: &S,
    handle: &str,
) -> Result<Option<Source>, CliError>
where
    S::Error: std::fmt::Display,
{
    let sources = store
        .list_sources()
        .map_err(|e| CliError::Store(e.to_string()))?;
    Ok(sources.into_iter().find(|s| s.handle == handle))
}

/// Parse an id argument into a `SourceId`-like newtype via its string form
pub fn parse_claim_id(raw: &str) -> Result<argus_domain::ClaimId, CliError> {
    argus_domain::ClaimId::from_string(raw)
        .map_err(|e| CliError::InvalidArg(format!("claim id '{}': {}", raw, e)))
}
