//! Core synthesizer implementation

use crate::error::VerdictError;
use crate::policy::VerdictPolicy;
use crate::scoring::{decide_label, evidence_strength, probability_true, EvidenceSummary};
use argus_domain::traits::CompletionProvider;
use argus_domain::{Claim, EvidenceId, EvidenceItem, Stance, Verdict, VerdictId, VerdictLabel};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// How many top-graded items are cited as key evidence
const KEY_EVIDENCE_LIMIT: usize = 3;

/// The synthesizer combines a claim and its graded evidence into a verdict
///
/// The provider is optional: without one, or whenever one fails, the
/// rule-based narrative path produces a structurally identical verdict.
pub struct VerdictSynthesizer<P>
where
    P: CompletionProvider,
{
    provider: Option<Arc<P>>,
    policy: VerdictPolicy,
    model_version: String,
    narrative_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct NarrativeResponse {
    reasoning: String,
    invalidation_trigger: String,
}

impl<P> VerdictSynthesizer<P>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: std::fmt::Display,
{
    /// Create a synthesizer that writes its prose with a model
    pub fn with_provider(provider: Arc<P>, policy: VerdictPolicy) -> Self {
        Self {
            provider: Some(provider),
            policy,
            model_version: "llm-v1".to_string(),
            narrative_timeout_secs: 30,
        }
    }

    /// Create a synthesizer that runs entirely rule-based
    pub fn rule_based(policy: VerdictPolicy) -> Self {
        Self {
            provider: None,
            policy,
            model_version: "rule-based-v1".to_string(),
            narrative_timeout_secs: 30,
        }
    }

    /// Set the model/prompt version stamped on verdicts
    pub fn with_model_version(mut self, model_version: impl Into<String>) -> Self {
        self.model_version = model_version.into();
        self
    }

    /// Set the narrative generation timeout
    pub fn with_narrative_timeout_secs(mut self, secs: u64) -> Self {
        self.narrative_timeout_secs = secs;
        self
    }

    /// Synthesize a verdict for one claim from its evidence set
    ///
    /// Never returns an error: every failure path inside degrades to the
    /// rule-based narrative, and the deterministic scores are computed
    /// before any provider call.
    pub async fn synthesize(&self, claim: &Claim, evidence: &[EvidenceItem], now: u64) -> Verdict {
        let summary = EvidenceSummary::from_evidence(evidence);
        let label = decide_label(&summary, &self.policy);
        let probability = probability_true(&summary, &self.policy);
        let strength = evidence_strength(&summary, &self.policy);

        debug!(
            claim_id = %claim.id,
            label = label.as_str(),
            probability,
            strength,
            "Scored claim"
        );

        let (reasoning, invalidation_trigger) = match &self.provider {
            Some(provider) => match self
                .llm_narrative(provider.as_ref(), claim, evidence, label)
                .await
            {
                Ok(narrative) => narrative,
                Err(e) => {
                    warn!(claim_id = %claim.id, "Narrative generation failed, using rule-based fallback: {}", e);
                    rule_narrative(&summary, label)
                }
            },
            None => rule_narrative(&summary, label),
        };

        // The resolution engine depends on the trigger being populated
        let invalidation_trigger = if invalidation_trigger.trim().is_empty() {
            fallback_trigger(label).to_string()
        } else {
            invalidation_trigger
        };

        Verdict {
            id: VerdictId::new(),
            claim_id: claim.id,
            label,
            probability_true: probability,
            evidence_strength: strength,
            key_evidence: select_key_evidence(evidence),
            reasoning,
            invalidation_trigger,
            model_version: self.model_version.clone(),
            created_at: now,
        }
    }

    async fn llm_narrative(
        &self,
        provider: &P,
        claim: &Claim,
        evidence: &[EvidenceItem],
        label: VerdictLabel,
    ) -> Result<(String, String), VerdictError> {
        let mut evidence_block = String::new();
        for item in evidence {
            evidence_block.push_str(&format!(
                "- [{}][{}] {} ({})\n",
                item.grade.as_str(),
                item.stance.as_str(),
                item.excerpt,
                item.publisher
            ));
        }
        if evidence_block.is_empty() {
            evidence_block.push_str("(no evidence found)\n");
        }

        let user_prompt = format!(
            "CLAIM:\n{}\n\nASSESSED LABEL: {}\n\nEVIDENCE:\n{}",
            claim.text,
            label.as_str(),
            evidence_block
        );

        let response = timeout(
            Duration::from_secs(self.narrative_timeout_secs),
            provider.complete(NARRATIVE_INSTRUCTIONS, &user_prompt),
        )
        .await
        .map_err(|_| VerdictError::Timeout)?
        .map_err(|e| VerdictError::Completion(e.to_string()))?;

        let json_str = strip_fences(&response);
        let parsed: NarrativeResponse = serde_json::from_str(json_str)
            .map_err(|e| VerdictError::InvalidFormat(e.to_string()))?;

        Ok((parsed.reasoning, parsed.invalidation_trigger))
    }
}

const NARRATIVE_INSTRUCTIONS: &str = "You summarize evidence assessments for crypto-related claims. \
Given a claim, its assessed label, and graded evidence, output JSON with exactly two keys: \
\"reasoning\" (2-3 sentences explaining how the evidence supports the label) and \
\"invalidation_trigger\" (one sentence naming the concrete new evidence that would overturn \
the label). Output ONLY valid JSON, no markdown code blocks.";

/// Strip markdown code fences from a response, if present
fn strip_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(inner) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    else {
        return trimmed;
    };
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Templated narrative computed purely from grade/stance counts
fn rule_narrative(summary: &EvidenceSummary, label: VerdictLabel) -> (String, String) {
    let reasoning = if summary.total == 0 {
        "No corroborating or contradicting material was found; the claim rests solely on its \
         original source."
            .to_string()
    } else {
        format!(
            "Of {} evidence item(s), {} support the claim, {} contradict it, and {} mention it \
             without taking a position. Primary-tier support: {}; primary-tier contradiction: {}.",
            summary.total,
            summary.support_count,
            summary.contradict_count,
            summary.mention_count,
            if summary.has_primary_support { "yes" } else { "no" },
            if summary.has_primary_contradiction { "yes" } else { "no" },
        )
    };

    (reasoning, fallback_trigger(label).to_string())
}

fn fallback_trigger(label: VerdictLabel) -> &'static str {
    match label {
        VerdictLabel::Verified => {
            "A primary-tier source directly refuting the claim, or a reversal of the cited \
             on-chain evidence, would overturn this verdict."
        }
        VerdictLabel::Misleading => {
            "A primary-tier confirmation from the implicated party or a regulator would overturn \
             this verdict."
        }
        VerdictLabel::PlausibleUnverified => {
            "An authoritative confirmation or denial from a primary source would settle this \
             claim either way."
        }
        VerdictLabel::Speculative => {
            "Any primary-tier evidence taking a position on this claim would change this verdict."
        }
    }
}

/// Cite the primary-flagged item plus the top-graded opinionated items
fn select_key_evidence(evidence: &[EvidenceItem]) -> Vec<EvidenceId> {
    let mut opinionated: Vec<&EvidenceItem> = evidence
        .iter()
        .filter(|e| e.stance != Stance::Mentions)
        .collect();
    // Primary flag first, then grade weight descending
    opinionated.sort_by(|a, b| {
        b.primary
            .cmp(&a.primary)
            .then(b.grade.weight().partial_cmp(&a.grade.weight()).unwrap_or(std::cmp::Ordering::Equal))
    });
    opinionated
        .into_iter()
        .take(KEY_EVIDENCE_LIMIT)
        .map(|e| e.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_domain::{
        ClaimId, ClaimStatus, ClaimType, Grade, ItemId, ResolutionKind, SourceId,
    };
    use argus_llm::MockProvider;

    fn claim(text: &str) -> Claim {
        Claim {
            id: ClaimId::new(),
            item_id: ItemId::new(),
            source_id: SourceId::new(),
            text: text.to_string(),
            claim_type: ClaimType::ExploitOrHack,
            assets: vec!["USDC".to_string()],
            asserted_at: 1_700_000_000,
            resolution_kind: ResolutionKind::Immediate,
            resolve_by: None,
            falsifiability: 0.95,
            initial_confidence: 0.8,
            status: ClaimStatus::Unreviewed,
            corrects: None,
            created_at: 1_700_000_100,
        }
    }

    fn evidence_item(grade: Grade, stance: Stance, publisher: &str) -> EvidenceItem {
        EvidenceItem {
            id: EvidenceId::new(),
            claim_id: ClaimId::from_value(1),
            url: format!("https://{}/a", publisher),
            publisher: publisher.to_string(),
            excerpt: "relevant excerpt".to_string(),
            stance,
            grade,
            primary: false,
            retrieved_at: 0,
        }
    }

    fn rule_synth() -> VerdictSynthesizer<MockProvider> {
        VerdictSynthesizer::rule_based(VerdictPolicy::default())
    }

    #[tokio::test]
    async fn test_exploit_with_onchain_support_is_verified() {
        let synth = rule_synth();
        let c = claim("Protocol X lost $45 million in an exploit");
        let evidence = vec![
            evidence_item(Grade::A, Stance::Supports, "etherscan.io"),
            evidence_item(Grade::B, Stance::Supports, "coindesk.com"),
        ];

        let verdict = synth.synthesize(&c, &evidence, 1_700_000_200).await;
        assert_eq!(verdict.label, VerdictLabel::Verified);
        assert!(verdict.probability_true >= 0.9);
    }

    #[tokio::test]
    async fn test_denied_rumor_is_misleading() {
        let synth = rule_synth();
        let c = claim("Exchange Y is insolvent");
        let evidence = vec![
            evidence_item(Grade::D, Stance::Supports, "@anon"),
            evidence_item(Grade::A, Stance::Contradicts, "sec.gov"),
        ];

        let verdict = synth.synthesize(&c, &evidence, 1_700_000_200).await;
        assert_eq!(verdict.label, VerdictLabel::Misleading);
        assert!(verdict.probability_true <= 0.2);
    }

    #[tokio::test]
    async fn test_zero_evidence_is_speculative_not_an_error() {
        let synth = rule_synth();
        let c = claim("Token Z will be listed next week");

        let verdict = synth.synthesize(&c, &[], 1_700_000_200).await;
        assert_eq!(verdict.label, VerdictLabel::Speculative);
        assert!(verdict.evidence_strength <= 0.3);
        assert!(!verdict.reasoning.is_empty());
        assert!(!verdict.invalidation_trigger.is_empty());
    }

    #[tokio::test]
    async fn test_llm_narrative_used_when_provider_succeeds() {
        let provider = MockProvider::new(
            r#"{"reasoning": "On-chain data confirms the drain.", "invalidation_trigger": "A reversal transaction returning the funds."}"#,
        );
        let synth = VerdictSynthesizer::with_provider(
            Arc::new(provider),
            VerdictPolicy::default(),
        );
        let c = claim("Protocol X lost $45 million in an exploit");
        let evidence = vec![evidence_item(Grade::A, Stance::Supports, "etherscan.io")];

        let verdict = synth.synthesize(&c, &evidence, 1_700_000_200).await;
        assert_eq!(verdict.reasoning, "On-chain data confirms the drain.");
        assert_eq!(
            verdict.invalidation_trigger,
            "A reversal transaction returning the funds."
        );
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back_to_rule_narrative() {
        let mut provider = MockProvider::default();
        provider.add_error("CLAIM");
        let synth = VerdictSynthesizer::with_provider(
            Arc::new(provider),
            VerdictPolicy::default(),
        );
        let c = claim("Protocol X lost $45 million in an exploit");
        let evidence = vec![evidence_item(Grade::A, Stance::Supports, "etherscan.io")];

        let verdict = synth.synthesize(&c, &evidence, 1_700_000_200).await;
        // Scores are unaffected by the narrative path
        assert_eq!(verdict.label, VerdictLabel::Verified);
        assert!(!verdict.reasoning.is_empty());
        assert!(!verdict.invalidation_trigger.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_narrative_falls_back() {
        let provider = MockProvider::new("sure! here's my analysis: it's probably true");
        let synth = VerdictSynthesizer::with_provider(
            Arc::new(provider),
            VerdictPolicy::default(),
        );
        let c = claim("Protocol X lost $45 million in an exploit");

        let verdict = synth.synthesize(&c, &[], 1_700_000_200).await;
        assert!(!verdict.invalidation_trigger.is_empty());
    }

    #[tokio::test]
    async fn test_empty_trigger_replaced() {
        let provider = MockProvider::new(
            r#"{"reasoning": "Looks plausible.", "invalidation_trigger": "  "}"#,
        );
        let synth = VerdictSynthesizer::with_provider(
            Arc::new(provider),
            VerdictPolicy::default(),
        );
        let c = claim("Protocol X lost $45 million in an exploit");

        let verdict = synth.synthesize(&c, &[], 1_700_000_200).await;
        assert!(!verdict.invalidation_trigger.trim().is_empty());
    }

    #[tokio::test]
    async fn test_key_evidence_prefers_primary_and_grade() {
        let synth = rule_synth();
        let c = claim("Protocol X lost $45 million in an exploit");

        let mut strong = evidence_item(Grade::A, Stance::Supports, "etherscan.io");
        strong.primary = true;
        let weak = evidence_item(Grade::D, Stance::Supports, "@anon");
        let neutral = evidence_item(Grade::A, Stance::Mentions, "reuters.com");

        let verdict = synth
            .synthesize(&c, &[weak.clone(), strong.clone(), neutral], 1_700_000_200)
            .await;
        assert_eq!(verdict.key_evidence.first(), Some(&strong.id));
        assert!(verdict.key_evidence.contains(&weak.id));
        assert_eq!(verdict.key_evidence.len(), 2);
    }

    #[test]
    fn test_strip_fences() {
        assert_eq!(strip_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }
}
