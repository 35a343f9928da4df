//! Error types for verdict synthesis

use thiserror::Error;

/// Errors that can occur during verdict synthesis
///
/// These surface only from the optional LLM narrative path; the
/// deterministic scoring path is infallible.
#[derive(Error, Debug)]
pub enum VerdictError {
    /// Completion provider error
    #[error("Completion error: {0}")]
    Completion(String),

    /// Narrative generation timed out
    #[error("Narrative timeout")]
    Timeout,

    /// Narrative response was not the expected JSON
    #[error("Invalid narrative format: {0}")]
    InvalidFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
