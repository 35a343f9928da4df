//! Deterministic verdict scoring
//!
//! All numeric conclusions are functions of the evidence set's grade and
//! stance composition under a [`VerdictPolicy`]. Nothing here touches a
//! model: the LLM only writes prose elsewhere.

use crate::policy::VerdictPolicy;
use argus_domain::{EvidenceItem, Grade, Stance, VerdictLabel};

/// Grade/stance composition of one claim's evidence set
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceSummary {
    /// Total evidence items
    pub total: usize,

    /// Items with stance `supports`
    pub support_count: usize,

    /// Items with stance `contradicts`
    pub contradict_count: usize,

    /// Items with stance `mentions`
    pub mention_count: usize,

    /// Sum of grade weights over supporting items
    pub support_mass: f64,

    /// Sum of grade weights over contradicting items
    pub contradict_mass: f64,

    /// Mean grade weight over all items, normalized to [0, 1]; 0 if empty
    pub quality: f64,

    /// Whether an A/B-grade item supports the claim
    pub has_primary_support: bool,

    /// Whether an A/B-grade item contradicts the claim
    pub has_primary_contradiction: bool,
}

impl EvidenceSummary {
    /// Summarize an evidence set
    pub fn from_evidence(evidence: &[EvidenceItem]) -> Self {
        let mut summary = Self {
            total: evidence.len(),
            support_count: 0,
            contradict_count: 0,
            mention_count: 0,
            support_mass: 0.0,
            contradict_mass: 0.0,
            quality: 0.0,
            has_primary_support: false,
            has_primary_contradiction: false,
        };

        let mut weight_sum = 0.0;
        for item in evidence {
            let weight = item.grade.weight();
            weight_sum += weight;
            match item.stance {
                Stance::Supports => {
                    summary.support_count += 1;
                    summary.support_mass += weight;
                    if item.grade.is_primary_tier() {
                        summary.has_primary_support = true;
                    }
                }
                Stance::Contradicts => {
                    summary.contradict_count += 1;
                    summary.contradict_mass += weight;
                    if item.grade.is_primary_tier() {
                        summary.has_primary_contradiction = true;
                    }
                }
                Stance::Mentions => summary.mention_count += 1,
            }
        }

        if summary.total > 0 {
            summary.quality = weight_sum / (summary.total as f64 * Grade::MAX_WEIGHT);
        }

        summary
    }

    /// Supporting share of all evidence; 0 if empty
    pub fn support_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.support_count as f64 / self.total as f64
    }

    /// Contradicting share of all evidence; 0 if empty
    pub fn contradiction_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.contradict_count as f64 / self.total as f64
    }
}

/// Decide the verdict label
///
/// Precedence order; first match wins:
/// 1. Primary-tier contradiction with contradiction share above threshold
///    -> misleading
/// 2. Primary-tier support with support share above threshold -> verified
/// 3. Any primary-tier evidence with support share above the lower
///    threshold -> plausible_unverified
/// 4. Otherwise -> speculative
pub fn decide_label(summary: &EvidenceSummary, policy: &VerdictPolicy) -> VerdictLabel {
    if summary.has_primary_contradiction
        && summary.contradiction_ratio() > policy.misleading_contradiction_ratio
    {
        return VerdictLabel::Misleading;
    }
    if summary.has_primary_support && summary.support_ratio() > policy.verified_support_ratio {
        return VerdictLabel::Verified;
    }
    if (summary.has_primary_support || summary.has_primary_contradiction)
        && summary.support_ratio() > policy.plausible_support_ratio
    {
        return VerdictLabel::PlausibleUnverified;
    }
    VerdictLabel::Speculative
}

/// Probability the claim is true, in [0, 1]
///
/// Grade-mass ratio of support vs contradiction, pulled toward the prior
/// by a pseudo-mass so a single weak item cannot saturate the estimate.
/// Adding supporting evidence never decreases the result; a primary-tier
/// contradiction applies a flat penalty multiplier.
pub fn probability_true(summary: &EvidenceSummary, policy: &VerdictPolicy) -> f64 {
    let prior_mass = policy.probability_prior_mass;
    let p = (summary.support_mass + prior_mass * policy.probability_prior)
        / (summary.support_mass + summary.contradict_mass + prior_mass);

    let p = if summary.has_primary_contradiction {
        p * policy.primary_contradiction_penalty
    } else {
        p
    };

    p.clamp(0.0, 1.0)
}

/// How strong the evidence base is, in [0, 1]
///
/// Mean grade quality scaled by a saturating volume factor: a single item
/// of any grade cannot claim full strength, and strength grows with
/// corroboration volume.
pub fn evidence_strength(summary: &EvidenceSummary, policy: &VerdictPolicy) -> f64 {
    if summary.total == 0 {
        return 0.0;
    }
    let volume = summary.total as f64 / (summary.total as f64 + policy.strength_saturation);
    (summary.quality * volume).clamp(0.0, 1.0)
}
