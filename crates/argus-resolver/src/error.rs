//! Error types for the resolution engine

use thiserror::Error;

/// Errors that can occur during resolution operations
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Storage operation failed
    #[error("Store error: {0}")]
    Store(String),

    /// Referenced entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Claim already carries a resolution
    #[error("Already resolved: {0}")]
    AlreadyResolved(String),

    /// Operation not valid for the claim's current state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
