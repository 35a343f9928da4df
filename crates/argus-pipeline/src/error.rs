//! Error types for the pipeline orchestrator

use thiserror::Error;

/// Errors that can occur during pipeline orchestration
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Storage operation failed
    #[error("Store error: {0}")]
    Store(String),

    /// Referenced entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Extraction failed after retries
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Resolution engine error
    #[error("Resolver error: {0}")]
    Resolver(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<argus_resolver::ResolverError> for PipelineError {
    fn from(e: argus_resolver::ResolverError) -> Self {
        PipelineError::Resolver(e.to_string())
    }
}
