//! Configuration for the evidence retriever

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the evidence retriever
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrieverConfig {
    /// Maximum evidence items attached per retrieval round
    pub max_evidence: usize,

    /// Maximum time for one search call (seconds)
    pub search_timeout_secs: u64,
}

impl RetrieverConfig {
    /// Get the search timeout as a Duration
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_evidence == 0 {
            return Err("max_evidence must be greater than 0".to_string());
        }
        if self.search_timeout_secs == 0 {
            return Err("search_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            max_evidence: 8,
            search_timeout_secs: 30,
        }
    }
}
