//! Verdict module - the synthesized conclusion for a claim at a point in time

use crate::ids::{ClaimId, EvidenceId, VerdictId};

/// The label a verdict assigns to a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictLabel {
    /// A primary-tier source supports the claim and support dominates
    Verified,
    /// Some credible support exists but the claim is not established
    PlausibleUnverified,
    /// No credible evidence either way
    Speculative,
    /// A primary-tier source contradicts the claim
    Misleading,
}

impl VerdictLabel {
    /// Get the label name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::Verified => "verified",
            VerdictLabel::PlausibleUnverified => "plausible_unverified",
            VerdictLabel::Speculative => "speculative",
            VerdictLabel::Misleading => "misleading",
        }
    }

    /// Parse a label from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "verified" => Some(VerdictLabel::Verified),
            "plausible_unverified" => Some(VerdictLabel::PlausibleUnverified),
            "speculative" => Some(VerdictLabel::Speculative),
            "misleading" => Some(VerdictLabel::Misleading),
            _ => None,
        }
    }

    /// Parse leniently, coercing unrecognized values to `Speculative`
    pub fn coerce(s: &str) -> Self {
        Self::parse(s).unwrap_or(VerdictLabel::Speculative)
    }
}

impl std::str::FromStr for VerdictLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid verdict label: {}", s))
    }
}

/// The analyst's conclusion for a claim at a point in time
///
/// Verdicts are append-only: each synthesis run appends to the claim's
/// ordered verdict log, and "current verdict" is the last entry of that
/// log. History is never mutated; a correction appends a new verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Unique identifier
    pub id: VerdictId,

    /// The claim this verdict concludes on
    pub claim_id: ClaimId,

    /// Conclusion label
    pub label: VerdictLabel,

    /// Probability the claim is true [0, 1]
    pub probability_true: f64,

    /// How strong the evidence base is [0, 1]
    pub evidence_strength: f64,

    /// The evidence items this verdict leans on most
    pub key_evidence: Vec<EvidenceId>,

    /// Short natural-language reasoning summary
    pub reasoning: String,

    /// What new evidence would overturn this verdict; always non-empty
    pub invalidation_trigger: String,

    /// Model/prompt version that produced this verdict
    pub model_version: String,

    /// When this verdict was synthesized (seconds since Unix epoch)
    pub created_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_coercion() {
        assert_eq!(VerdictLabel::coerce("verified"), VerdictLabel::Verified);
        assert_eq!(VerdictLabel::coerce("MISLEADING"), VerdictLabel::Misleading);
        assert_eq!(VerdictLabel::coerce("who_knows"), VerdictLabel::Speculative);
    }

    #[test]
    fn test_label_round_trip() {
        for label in [
            VerdictLabel::Verified,
            VerdictLabel::PlausibleUnverified,
            VerdictLabel::Speculative,
            VerdictLabel::Misleading,
        ] {
            assert_eq!(VerdictLabel::parse(label.as_str()), Some(label));
        }
    }
}
