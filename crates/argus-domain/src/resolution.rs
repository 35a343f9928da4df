//! Resolution module - ground-truth outcomes and the credibility feedback tuple

use crate::ids::{ClaimId, ResolutionId, SourceId};

/// The ground-truth outcome of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The claim turned out true
    True,
    /// The claim turned out false
    False,
    /// The claim was directionally right but materially off
    PartiallyTrue,
    /// Ground truth never became knowable
    Unresolved,
}

impl Outcome {
    /// Get the outcome name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::True => "true",
            Outcome::False => "false",
            Outcome::PartiallyTrue => "partially_true",
            Outcome::Unresolved => "unresolved",
        }
    }

    /// Parse an outcome from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "true" => Some(Outcome::True),
            "false" => Some(Outcome::False),
            "partially_true" => Some(Outcome::PartiallyTrue),
            "unresolved" => Some(Outcome::Unresolved),
            _ => None,
        }
    }

    /// Accuracy signal this outcome contributes to its source's track
    /// record. `None` means the claim is excluded from the sample.
    pub fn accuracy_signal(&self) -> Option<f64> {
        match self {
            Outcome::True => Some(1.0),
            Outcome::PartiallyTrue => Some(0.5),
            Outcome::False => Some(0.0),
            Outcome::Unresolved => None,
        }
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid outcome: {}", s))
    }
}

/// The recorded ground truth for a claim
///
/// At most one resolution exists per claim; once created it is terminal
/// for that claim's credibility contribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Unique identifier
    pub id: ResolutionId,

    /// The claim that settled
    pub claim_id: ClaimId,

    /// Ground-truth outcome
    pub outcome: Outcome,

    /// When the claim settled (seconds since Unix epoch)
    pub resolved_at: u64,

    /// Supporting evidence URL, when one exists
    pub evidence_url: Option<String>,

    /// Free-text notes
    pub notes: Option<String>,
}

/// The feedback tuple handed to the credibility scorer when a claim resolves
///
/// This is the only path by which a source's scoring sample grows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOutcome {
    /// The claim that resolved
    pub claim_id: ClaimId,

    /// The source whose track record this feeds
    pub source_id: SourceId,

    /// Ground-truth outcome
    pub outcome: Outcome,

    /// Whether the current verdict's label matched the outcome
    /// (`None` when no verdict existed at resolution time)
    pub verdict_agreed: Option<bool>,

    /// Whether the claim carried at least one primary-tier (A/B) evidence item
    pub had_primary_evidence: bool,

    /// When the claim resolved (seconds since Unix epoch)
    pub resolved_at: u64,
}
