//! Configuration for the pipeline orchestrator and worker

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for batch processing and scheduled cycles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Attempts per external call before giving up on a unit of work
    pub max_retries: u32,

    /// Base delay for exponential backoff between attempts (milliseconds)
    pub retry_base_delay_ms: u64,

    /// Minutes between scheduled re-check cycles
    pub recheck_interval_minutes: u64,

    /// Minutes between credibility re-score cycles
    pub rescore_interval_minutes: u64,
}

impl PipelineConfig {
    /// Backoff base delay as a Duration
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    /// Re-check cycle interval as a Duration
    pub fn recheck_interval(&self) -> Duration {
        Duration::from_secs(self.recheck_interval_minutes * 60)
    }

    /// Re-score cycle interval as a Duration
    pub fn rescore_interval(&self) -> Duration {
        Duration::from_secs(self.rescore_interval_minutes * 60)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_retries == 0 {
            return Err("max_retries must be greater than 0".to_string());
        }
        if self.recheck_interval_minutes == 0 {
            return Err("recheck_interval_minutes must be greater than 0".to_string());
        }
        if self.rescore_interval_minutes == 0 {
            return Err("rescore_interval_minutes must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_base_delay_ms: 500,
            recheck_interval_minutes: 60,
            // Credibility re-scoring is a nightly concern
            rescore_interval_minutes: 24 * 60,
        }
    }
}
