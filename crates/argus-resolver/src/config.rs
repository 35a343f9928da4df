//! Configuration for the resolution engine

use serde::{Deserialize, Serialize};

/// Tunable thresholds for automatic resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Probability at or above which an immediate-kind claim with a
    /// verified verdict auto-resolves (and mirrored at `1 - threshold`
    /// for misleading verdicts)
    pub high_confidence_threshold: f64,

    /// Probability beyond which a scheduled claim settles before its
    /// deadline (`p >= threshold` resolves true, `p <= 1 - threshold`
    /// resolves false)
    pub conclusive_threshold: f64,

    /// Maximum claims picked up per re-check batch
    pub recheck_batch_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            high_confidence_threshold: 0.9,
            conclusive_threshold: 0.95,
            recheck_batch_limit: 50,
        }
    }
}

impl ResolverConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.5..=1.0).contains(&self.high_confidence_threshold) {
            return Err(format!(
                "high_confidence_threshold {} out of range [0.5, 1.0]",
                self.high_confidence_threshold
            ));
        }
        if !(0.5..=1.0).contains(&self.conclusive_threshold) {
            return Err(format!(
                "conclusive_threshold {} out of range [0.5, 1.0]",
                self.conclusive_threshold
            ));
        }
        if self.recheck_batch_limit == 0 {
            return Err("recheck_batch_limit must be greater than 0".to_string());
        }
        Ok(())
    }
}
