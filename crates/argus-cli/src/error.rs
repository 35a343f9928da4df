//! Error types for the CLI

use thiserror::Error;

/// Errors surfaced by the `argus` binary
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration problem
    #[error("Config error: {0}")]
    Config(String),

    /// Storage operation failed
    #[error("Store error: {0}")]
    Store(String),

    /// Pipeline operation failed
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// Bad command-line input
    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<argus_store::StoreError> for CliError {
    fn from(e: argus_store::StoreError) -> Self {
        CliError::Store(e.to_string())
    }
}

impl From<argus_pipeline::PipelineError> for CliError {
    fn from(e: argus_pipeline::PipelineError) -> Self {
        CliError::Pipeline(e.to_string())
    }
}

impl From<argus_resolver::ResolverError> for CliError {
    fn from(e: argus_resolver::ResolverError) -> Self {
        CliError::Pipeline(e.to_string())
    }
}
