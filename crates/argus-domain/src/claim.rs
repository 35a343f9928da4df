//! Claim module - the fundamental unit of the verification pipeline

use crate::ids::{ClaimId, ItemId, SourceId};

/// Closed taxonomy of claim types
///
/// The extractor's LLM output is untrusted, so unrecognized strings are
/// coerced to [`ClaimType::MiscClaim`] via [`ClaimType::coerce`] rather
/// than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimType {
    /// A regulator or government action (enforcement, approval, ban)
    RegulatoryAction,
    /// A protocol exploit, hack, or theft of funds
    ExploitOrHack,
    /// A prediction about future asset price
    PricePrediction,
    /// An exchange listing or delisting
    Listing,
    /// A partnership or integration between projects/companies
    Partnership,
    /// An observable on-chain event (transfer, mint, upgrade)
    OnchainActivity,
    /// An unattributed or speculative assertion
    Rumor,
    /// Anything falsifiable that fits no other type
    MiscClaim,
}

impl ClaimType {
    /// All claim types, in prompt-enumeration order
    pub const ALL: [ClaimType; 8] = [
        ClaimType::RegulatoryAction,
        ClaimType::ExploitOrHack,
        ClaimType::PricePrediction,
        ClaimType::Listing,
        ClaimType::Partnership,
        ClaimType::OnchainActivity,
        ClaimType::Rumor,
        ClaimType::MiscClaim,
    ];

    /// Get the claim type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::RegulatoryAction => "regulatory_action",
            ClaimType::ExploitOrHack => "exploit_or_hack",
            ClaimType::PricePrediction => "price_prediction",
            ClaimType::Listing => "listing",
            ClaimType::Partnership => "partnership",
            ClaimType::OnchainActivity => "onchain_activity",
            ClaimType::Rumor => "rumor",
            ClaimType::MiscClaim => "misc_claim",
        }
    }

    /// Parse a claim type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "regulatory_action" => Some(ClaimType::RegulatoryAction),
            "exploit_or_hack" => Some(ClaimType::ExploitOrHack),
            "price_prediction" => Some(ClaimType::PricePrediction),
            "listing" => Some(ClaimType::Listing),
            "partnership" => Some(ClaimType::Partnership),
            "onchain_activity" => Some(ClaimType::OnchainActivity),
            "rumor" => Some(ClaimType::Rumor),
            "misc_claim" => Some(ClaimType::MiscClaim),
            _ => None,
        }
    }

    /// Parse leniently, coercing unrecognized values to `MiscClaim`
    pub fn coerce(s: &str) -> Self {
        Self::parse(s).unwrap_or(ClaimType::MiscClaim)
    }
}

impl std::str::FromStr for ClaimType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid claim type: {}", s))
    }
}

/// How a claim is expected to reach ground truth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionKind {
    /// Verifiable now (e.g., an on-chain event already happened)
    Immediate,
    /// Verifiable at or before a known deadline (e.g., a dated prediction)
    Scheduled,
    /// No natural deadline; only explicit ground truth resolves it
    Indefinite,
}

impl ResolutionKind {
    /// Get the resolution kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionKind::Immediate => "immediate",
            ResolutionKind::Scheduled => "scheduled",
            ResolutionKind::Indefinite => "indefinite",
        }
    }

    /// Parse a resolution kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "immediate" => Some(ResolutionKind::Immediate),
            "scheduled" => Some(ResolutionKind::Scheduled),
            "indefinite" => Some(ResolutionKind::Indefinite),
            _ => None,
        }
    }

    /// Parse leniently, coercing unrecognized values to `Indefinite`
    ///
    /// Indefinite is the conservative default: it never auto-resolves.
    pub fn coerce(s: &str) -> Self {
        Self::parse(s).unwrap_or(ResolutionKind::Indefinite)
    }
}

/// Lifecycle status of a claim
///
/// Status only advances forward (`unreviewed → reviewed → resolved`),
/// never backward. Corrections create a new claim record referencing the
/// old one rather than reopening it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimStatus {
    /// Extracted but no verdict yet
    Unreviewed,
    /// At least one verdict exists
    Reviewed,
    /// Ground truth recorded; terminal
    Resolved,
}

impl ClaimStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Unreviewed => "unreviewed",
            ClaimStatus::Reviewed => "reviewed",
            ClaimStatus::Resolved => "resolved",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unreviewed" => Some(ClaimStatus::Unreviewed),
            "reviewed" => Some(ClaimStatus::Reviewed),
            "resolved" => Some(ClaimStatus::Resolved),
            _ => None,
        }
    }

    /// Position in the forward-only lifecycle
    pub fn rank(&self) -> u8 {
        match self {
            ClaimStatus::Unreviewed => 0,
            ClaimStatus::Reviewed => 1,
            ClaimStatus::Resolved => 2,
        }
    }

    /// Whether a transition from `self` to `to` moves forward
    pub fn can_advance_to(&self, to: ClaimStatus) -> bool {
        to.rank() > self.rank()
    }
}

impl std::str::FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid claim status: {}", s))
    }
}

/// An atomic, falsifiable assertion extracted from one item
///
/// A claim references exactly one item and one source (the item's source).
/// It is mutated only by forward status transitions; evidence and verdicts
/// accumulate in append-only logs keyed by its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,

    /// The item this claim was extracted from
    pub item_id: ItemId,

    /// The source that asserted it (the item's source)
    pub source_id: SourceId,

    /// The assertion, phrased as a single falsifiable statement
    pub text: String,

    /// Taxonomy type
    pub claim_type: ClaimType,

    /// Asset symbols the claim is about (zero or more, e.g. "BTC")
    pub assets: Vec<String>,

    /// When the assertion was made (seconds since Unix epoch)
    pub asserted_at: u64,

    /// How the claim is expected to reach ground truth
    pub resolution_kind: ResolutionKind,

    /// Deadline by which a scheduled claim should be resolvable
    pub resolve_by: Option<u64>,

    /// How falsifiable the claim is [0, 1]
    pub falsifiability: f64,

    /// The extractor's initial confidence that the claim is true [0, 1]
    pub initial_confidence: f64,

    /// Lifecycle status
    pub status: ClaimStatus,

    /// Set when this claim is a correction of an earlier, settled claim
    pub corrects: Option<ClaimId>,

    /// When this claim record was created (seconds since Unix epoch)
    pub created_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_type_coercion() {
        assert_eq!(ClaimType::coerce("exploit_or_hack"), ClaimType::ExploitOrHack);
        assert_eq!(ClaimType::coerce("EXPLOIT_OR_HACK"), ClaimType::ExploitOrHack);
        assert_eq!(ClaimType::coerce("something_new"), ClaimType::MiscClaim);
        assert_eq!(ClaimType::coerce(""), ClaimType::MiscClaim);
    }

    #[test]
    fn test_resolution_kind_coercion() {
        assert_eq!(ResolutionKind::coerce("scheduled"), ResolutionKind::Scheduled);
        assert_eq!(ResolutionKind::coerce("whenever"), ResolutionKind::Indefinite);
    }

    #[test]
    fn test_status_forward_only() {
        assert!(ClaimStatus::Unreviewed.can_advance_to(ClaimStatus::Reviewed));
        assert!(ClaimStatus::Unreviewed.can_advance_to(ClaimStatus::Resolved));
        assert!(ClaimStatus::Reviewed.can_advance_to(ClaimStatus::Resolved));

        assert!(!ClaimStatus::Reviewed.can_advance_to(ClaimStatus::Unreviewed));
        assert!(!ClaimStatus::Resolved.can_advance_to(ClaimStatus::Reviewed));
        assert!(!ClaimStatus::Resolved.can_advance_to(ClaimStatus::Resolved));
    }

    #[test]
    fn test_claim_type_round_trip() {
        for ct in ClaimType::ALL {
            assert_eq!(ClaimType::parse(ct.as_str()), Some(ct));
        }
    }
}
