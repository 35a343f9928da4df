//! Tunable scoring policy for verdict synthesis
//!
//! The decision thresholds and blending coefficients are policy, not
//! structure: they are expected to move with calibration against real
//! outcome data, so they live in a config struct rather than constants.

use serde::{Deserialize, Serialize};

/// Tunable coefficients for verdict scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictPolicy {
    /// Contradiction share of all evidence above which a primary-tier
    /// contradiction makes the claim misleading
    pub misleading_contradiction_ratio: f64,

    /// Support share of all evidence above which primary-tier support
    /// makes the claim verified
    pub verified_support_ratio: f64,

    /// Support share of all evidence above which any primary-tier
    /// evidence makes the claim plausible-unverified
    pub plausible_support_ratio: f64,

    /// Prior probability-true with no evidence either way
    pub probability_prior: f64,

    /// Pseudo-mass (in grade-weight units) anchoring the prior; larger
    /// values mean more evidence is needed to move off the prior
    pub probability_prior_mass: f64,

    /// Multiplier applied to probability-true when a primary-tier item
    /// contradicts the claim
    pub primary_contradiction_penalty: f64,

    /// Half-saturation constant for evidence volume: strength scales by
    /// n / (n + this)
    pub strength_saturation: f64,
}

impl Default for VerdictPolicy {
    fn default() -> Self {
        Self {
            misleading_contradiction_ratio: 0.3,
            verified_support_ratio: 0.5,
            plausible_support_ratio: 0.3,
            probability_prior: 0.5,
            probability_prior_mass: 1.0,
            primary_contradiction_penalty: 0.6,
            strength_saturation: 2.0,
        }
    }
}

impl VerdictPolicy {
    /// Validate the policy
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("misleading_contradiction_ratio", self.misleading_contradiction_ratio),
            ("verified_support_ratio", self.verified_support_ratio),
            ("plausible_support_ratio", self.plausible_support_ratio),
            ("probability_prior", self.probability_prior),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} {} out of range [0.0, 1.0]", name, value));
            }
        }
        if self.probability_prior_mass <= 0.0 {
            return Err("probability_prior_mass must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.primary_contradiction_penalty)
            || self.primary_contradiction_penalty == 0.0
        {
            return Err("primary_contradiction_penalty must be in (0.0, 1.0]".to_string());
        }
        if self.strength_saturation <= 0.0 {
            return Err("strength_saturation must be positive".to_string());
        }
        Ok(())
    }

    /// Load a policy from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize the policy to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
