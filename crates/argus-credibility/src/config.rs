//! Configuration for the credibility scorer

use serde::{Deserialize, Serialize};

/// Tunable parameters of the shrinkage estimator
///
/// The prior weight is the pseudo-sample anchoring new sources at the
/// population mean: a source needs roughly that many resolved claims
/// before its own record outweighs the prior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Population prior mean for accuracy [0, 1]
    pub prior_mean: f64,

    /// Pseudo-sample weight of the prior (shrinkage strength)
    pub prior_weight: f64,

    /// Prior mean for the method-discipline ratio [0, 1]
    pub discipline_prior: f64,

    /// z-score for the confidence interval (1.96 = 95%)
    pub interval_z: f64,

    /// Version stamped on every snapshot this config produces
    pub score_version: u32,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            prior_mean: 0.5,
            prior_weight: 10.0,
            discipline_prior: 0.5,
            interval_z: 1.96,
            score_version: 1,
        }
    }
}

impl ScorerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.prior_mean) {
            return Err(format!("prior_mean {} out of range [0.0, 1.0]", self.prior_mean));
        }
        if !(0.0..=1.0).contains(&self.discipline_prior) {
            return Err(format!(
                "discipline_prior {} out of range [0.0, 1.0]",
                self.discipline_prior
            ));
        }
        if self.prior_weight <= 0.0 {
            return Err("prior_weight must be positive".to_string());
        }
        if self.interval_z <= 0.0 {
            return Err("interval_z must be positive".to_string());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScorerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_prior_weight_invalid() {
        let config = ScorerConfig {
            prior_weight: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ScorerConfig::default();
        let parsed = ScorerConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config.prior_weight, parsed.prior_weight);
        assert_eq!(config.score_version, parsed.score_version);
    }
}
