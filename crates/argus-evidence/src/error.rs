//! Error types for evidence retrieval

use thiserror::Error;

/// Errors that can occur during evidence search
#[derive(Error, Debug)]
pub enum EvidenceError {
    /// Search backend unavailable or failed
    #[error("Search backend error: {0}")]
    Backend(String),

    /// Search timed out
    #[error("Search timeout")]
    Timeout,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
