//! Core resolution engine implementation

use crate::{ResolverConfig, ResolverError};
use argus_domain::traits::{ClaimFilter, PipelineStore};
use argus_domain::{
    Claim, ClaimId, ClaimStatus, Outcome, Resolution, ResolutionId, ResolutionKind,
    ResolvedOutcome, Verdict, VerdictLabel,
};
use tracing::{debug, info};

/// The resolution engine drives the claim lifecycle
///
/// Holds no store of its own; every operation takes the store as a
/// parameter so the same engine serves batch and interactive callers.
pub struct ResolutionEngine {
    config: ResolverConfig,
}

impl ResolutionEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Create an engine with default configuration
    pub fn default_config() -> Self {
        Self::new(ResolverConfig::default())
    }

    /// Advance a claim to `reviewed` after its first verdict
    ///
    /// Idempotent: a claim already at `reviewed` or `resolved` is left
    /// untouched.
    pub fn mark_reviewed<S: PipelineStore>(
        &self,
        store: &mut S,
        claim_id: ClaimId,
    ) -> Result<(), ResolverError>
    where
        S::Error: std::fmt::Display,
    {
        let claim = get_claim(store, claim_id)?;
        if claim.status != ClaimStatus::Unreviewed {
            return Ok(());
        }
        store
            .advance_claim_status(claim_id, ClaimStatus::Reviewed)
            .map_err(|e| ResolverError::Store(e.to_string()))?;
        debug!(claim_id = %claim_id, "Claim marked reviewed");
        Ok(())
    }

    /// Attempt an automatic resolution for a claim
    ///
    /// Returns the resolution when one was recorded. A claim that is
    /// already `resolved` is never touched again; indefinite claims never
    /// auto-resolve.
    pub fn try_auto_resolve<S: PipelineStore>(
        &self,
        store: &mut S,
        claim_id: ClaimId,
        now: u64,
    ) -> Result<Option<Resolution>, ResolverError>
    where
        S::Error: std::fmt::Display,
    {
        let claim = get_claim(store, claim_id)?;
        if claim.status == ClaimStatus::Resolved {
            return Ok(None);
        }

        let Some(verdict) = store
            .current_verdict(claim_id)
            .map_err(|e| ResolverError::Store(e.to_string()))?
        else {
            return Ok(None);
        };

        let outcome = match claim.resolution_kind {
            ResolutionKind::Immediate => self.immediate_outcome(&verdict),
            ResolutionKind::Scheduled => self.scheduled_outcome(&claim, &verdict, now),
            // Only explicit ground-truth input resolves indefinite claims
            ResolutionKind::Indefinite => None,
        };

        let Some(outcome) = outcome else {
            return Ok(None);
        };

        let resolution = self.record_resolution(
            store,
            &claim,
            outcome,
            None,
            Some("auto-resolved from current verdict".to_string()),
            now,
        )?;
        Ok(Some(resolution))
    }

    /// Record an explicit human/ground-truth resolution
    pub fn resolve_manual<S: PipelineStore>(
        &self,
        store: &mut S,
        claim_id: ClaimId,
        outcome: Outcome,
        evidence_url: Option<String>,
        notes: Option<String>,
        now: u64,
    ) -> Result<Resolution, ResolverError>
    where
        S::Error: std::fmt::Display,
    {
        let claim = get_claim(store, claim_id)?;
        if claim.status == ClaimStatus::Resolved {
            return Err(ResolverError::AlreadyResolved(claim_id.to_string()));
        }
        self.record_resolution(store, &claim, outcome, evidence_url, notes, now)
    }

    /// Claims due for a scheduled re-check: reviewed, scheduled kind, with
    /// a deadline still in the future
    pub fn due_for_recheck<S: PipelineStore>(
        &self,
        store: &S,
        now: u64,
    ) -> Result<Vec<Claim>, ResolverError>
    where
        S::Error: std::fmt::Display,
    {
        store
            .query_claims(&ClaimFilter {
                status: Some(ClaimStatus::Reviewed),
                resolution_kind: Some(ResolutionKind::Scheduled),
                resolve_by_after: Some(now),
                limit: Some(self.config.recheck_batch_limit),
                ..Default::default()
            })
            .map_err(|e| ResolverError::Store(e.to_string()))
    }

    /// Claims whose resolve-by deadline has passed without a resolution
    pub fn past_deadline<S: PipelineStore>(
        &self,
        store: &S,
        now: u64,
    ) -> Result<Vec<Claim>, ResolverError>
    where
        S::Error: std::fmt::Display,
    {
        store
            .query_claims(&ClaimFilter {
                status: Some(ClaimStatus::Reviewed),
                resolution_kind: Some(ResolutionKind::Scheduled),
                resolve_by_before: Some(now),
                ..Default::default()
            })
            .map_err(|e| ResolverError::Store(e.to_string()))
    }

    /// Open a correction for a settled claim
    ///
    /// Creates a new unreviewed claim referencing the old one. The
    /// original record, its verdicts, and its resolution stay untouched.
    pub fn open_correction<S: PipelineStore>(
        &self,
        store: &mut S,
        claim_id: ClaimId,
        corrected_text: String,
        now: u64,
    ) -> Result<Claim, ResolverError>
    where
        S::Error: std::fmt::Display,
    {
        let original = get_claim(store, claim_id)?;
        if original.status != ClaimStatus::Resolved {
            return Err(ResolverError::InvalidState(format!(
                "claim {} is not resolved; corrections only apply to settled claims",
                claim_id
            )));
        }

        let correction = Claim {
            id: ClaimId::new(),
            item_id: original.item_id,
            source_id: original.source_id,
            text: corrected_text,
            claim_type: original.claim_type,
            assets: original.assets.clone(),
            asserted_at: now,
            resolution_kind: original.resolution_kind,
            resolve_by: original.resolve_by,
            falsifiability: original.falsifiability,
            initial_confidence: original.initial_confidence,
            status: ClaimStatus::Unreviewed,
            corrects: Some(original.id),
            created_at: now,
        };

        store
            .put_claim(correction.clone())
            .map_err(|e| ResolverError::Store(e.to_string()))?;
        info!(original = %claim_id, correction = %correction.id, "Opened correction claim");
        Ok(correction)
    }

    /// Whether a verdict label maps onto a ground-truth outcome
    pub fn label_agrees(label: VerdictLabel, outcome: Outcome) -> bool {
        matches!(
            (label, outcome),
            (VerdictLabel::Verified, Outcome::True) | (VerdictLabel::Misleading, Outcome::False)
        )
    }

    fn immediate_outcome(&self, verdict: &Verdict) -> Option<Outcome> {
        let threshold = self.config.high_confidence_threshold;
        match verdict.label {
            VerdictLabel::Verified if verdict.probability_true >= threshold => Some(Outcome::True),
            VerdictLabel::Misleading if verdict.probability_true <= 1.0 - threshold => {
                Some(Outcome::False)
            }
            _ => None,
        }
    }

    fn scheduled_outcome(&self, claim: &Claim, verdict: &Verdict, now: u64) -> Option<Outcome> {
        let deadline_passed = claim.resolve_by.is_some_and(|t| now >= t);
        if deadline_passed {
            return Some(match verdict.label {
                VerdictLabel::Verified => Outcome::True,
                VerdictLabel::Misleading => Outcome::False,
                VerdictLabel::PlausibleUnverified | VerdictLabel::Speculative => {
                    Outcome::Unresolved
                }
            });
        }

        // New evidence can settle a scheduled claim before its deadline
        let threshold = self.config.conclusive_threshold;
        if verdict.probability_true >= threshold {
            Some(Outcome::True)
        } else if verdict.probability_true <= 1.0 - threshold {
            Some(Outcome::False)
        } else {
            None
        }
    }

    fn record_resolution<S: PipelineStore>(
        &self,
        store: &mut S,
        claim: &Claim,
        outcome: Outcome,
        evidence_url: Option<String>,
        notes: Option<String>,
        now: u64,
    ) -> Result<Resolution, ResolverError>
    where
        S::Error: std::fmt::Display,
    {
        // The canonical citation doubles as the resolution's evidence URL
        // when the caller has none
        let evidence = store
            .evidence_for_claim(claim.id)
            .map_err(|e| ResolverError::Store(e.to_string()))?;
        let evidence_url = evidence_url
            .or_else(|| evidence.iter().find(|e| e.primary).map(|e| e.url.clone()));
        let had_primary_evidence = evidence.iter().any(|e| e.grade.is_primary_tier());

        let resolution = Resolution {
            id: ResolutionId::new(),
            claim_id: claim.id,
            outcome,
            resolved_at: now,
            evidence_url,
            notes,
        };
        store
            .put_resolution(resolution.clone())
            .map_err(|e| ResolverError::Store(e.to_string()))?;

        store
            .advance_claim_status(claim.id, ClaimStatus::Resolved)
            .map_err(|e| ResolverError::Store(e.to_string()))?;

        let verdict_agreed = store
            .current_verdict(claim.id)
            .map_err(|e| ResolverError::Store(e.to_string()))?
            .map(|v| Self::label_agrees(v.label, outcome));

        store
            .append_outcome(ResolvedOutcome {
                claim_id: claim.id,
                source_id: claim.source_id,
                outcome,
                verdict_agreed,
                had_primary_evidence,
                resolved_at: now,
            })
            .map_err(|e| ResolverError::Store(e.to_string()))?;

        info!(
            claim_id = %claim.id,
            outcome = outcome.as_str(),
            "Claim resolved"
        );
        Ok(resolution)
    }
}

fn get_claim<S: PipelineStore>(store: &S, claim_id: ClaimId) -> Result<Claim, ResolverError>
where
    S::Error: std::fmt::Display,
{
    store
        .get_claim(claim_id)
        .map_err(|e| ResolverError::Store(e.to_string()))?
        .ok_or_else(|| ResolverError::NotFound(format!("claim {}", claim_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_domain::{
        ClaimType, EvidenceId, EvidenceItem, Grade, Item, ItemId, ItemType, Source, SourceId,
        SourceType, Stance, VerdictId,
    };
    use argus_store::MemoryStore;

    const NOW: u64 = 1_700_000_000;

    struct Fixture {
        store: MemoryStore,
        source_id: SourceId,
        item_id: ItemId,
    }

    fn fixture() -> Fixture {
        let mut store = MemoryStore::new();
        let source_id = store
            .put_source(Source::new(
                SourceId::new(),
                SourceType::Influencer,
                "@cryptoleaks",
                "Crypto Leaks",
            ))
            .unwrap();
        let item_id = store
            .put_item(Item::new(
                ItemId::new(),
                source_id,
                "Protocol X drained".to_string(),
                ItemType::Post,
                NOW,
                "hash".to_string(),
            ))
            .unwrap();
        Fixture {
            store,
            source_id,
            item_id,
        }
    }

    fn put_claim(f: &mut Fixture, kind: ResolutionKind, resolve_by: Option<u64>) -> ClaimId {
        f.store
            .put_claim(Claim {
                id: ClaimId::new(),
                item_id: f.item_id,
                source_id: f.source_id,
                text: "Protocol X lost $45M".to_string(),
                claim_type: ClaimType::ExploitOrHack,
                assets: vec![],
                asserted_at: NOW,
                resolution_kind: kind,
                resolve_by,
                falsifiability: 0.9,
                initial_confidence: 0.7,
                status: ClaimStatus::Unreviewed,
                corrects: None,
                created_at: NOW,
            })
            .unwrap()
    }

    fn put_verdict(f: &mut Fixture, claim_id: ClaimId, label: VerdictLabel, p: f64) {
        f.store
            .append_verdict(Verdict {
                id: VerdictId::new(),
                claim_id,
                label,
                probability_true: p,
                evidence_strength: 0.6,
                key_evidence: vec![],
                reasoning: "r".to_string(),
                invalidation_trigger: "t".to_string(),
                model_version: "test".to_string(),
                created_at: NOW,
            })
            .unwrap();
    }

    fn put_evidence(f: &mut Fixture, claim_id: ClaimId, grade: Grade, primary: bool) {
        f.store
            .append_evidence(EvidenceItem {
                id: EvidenceId::new(),
                claim_id,
                url: "https://etherscan.io/tx/0xabc".to_string(),
                publisher: "etherscan.io".to_string(),
                excerpt: "transfer".to_string(),
                stance: Stance::Supports,
                grade,
                primary,
                retrieved_at: NOW,
            })
            .unwrap();
    }

    #[test]
    fn test_mark_reviewed_is_idempotent() {
        let mut f = fixture();
        let claim_id = put_claim(&mut f, ResolutionKind::Immediate, None);
        let engine = ResolutionEngine::default_config();

        engine.mark_reviewed(&mut f.store, claim_id).unwrap();
        engine.mark_reviewed(&mut f.store, claim_id).unwrap();

        assert_eq!(
            f.store.get_claim(claim_id).unwrap().unwrap().status,
            ClaimStatus::Reviewed
        );
    }

    #[test]
    fn test_immediate_high_confidence_resolves_true() {
        let mut f = fixture();
        let claim_id = put_claim(&mut f, ResolutionKind::Immediate, None);
        put_evidence(&mut f, claim_id, Grade::A, true);
        put_verdict(&mut f, claim_id, VerdictLabel::Verified, 0.94);
        let engine = ResolutionEngine::default_config();
        engine.mark_reviewed(&mut f.store, claim_id).unwrap();

        let resolution = engine
            .try_auto_resolve(&mut f.store, claim_id, NOW + 100)
            .unwrap()
            .expect("should resolve");
        assert_eq!(resolution.outcome, Outcome::True);
        assert_eq!(
            resolution.evidence_url.as_deref(),
            Some("https://etherscan.io/tx/0xabc")
        );

        // The feedback tuple reached the scorer's history
        let outcomes = f.store.outcomes_for_source(f.source_id).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].verdict_agreed, Some(true));
        assert!(outcomes[0].had_primary_evidence);
    }

    #[test]
    fn test_immediate_low_confidence_does_not_resolve() {
        let mut f = fixture();
        let claim_id = put_claim(&mut f, ResolutionKind::Immediate, None);
        put_verdict(&mut f, claim_id, VerdictLabel::PlausibleUnverified, 0.6);
        let engine = ResolutionEngine::default_config();
        engine.mark_reviewed(&mut f.store, claim_id).unwrap();

        let resolution = engine
            .try_auto_resolve(&mut f.store, claim_id, NOW + 100)
            .unwrap();
        assert!(resolution.is_none());
    }

    #[test]
    fn test_scheduled_deadline_maps_label_to_outcome() {
        let mut f = fixture();
        let claim_id = put_claim(&mut f, ResolutionKind::Scheduled, Some(NOW + 1000));
        put_verdict(&mut f, claim_id, VerdictLabel::Speculative, 0.5);
        let engine = ResolutionEngine::default_config();
        engine.mark_reviewed(&mut f.store, claim_id).unwrap();

        // Before the deadline, an inconclusive verdict leaves it open
        assert!(engine
            .try_auto_resolve(&mut f.store, claim_id, NOW + 500)
            .unwrap()
            .is_none());

        // After the deadline, speculative maps to unresolved
        let resolution = engine
            .try_auto_resolve(&mut f.store, claim_id, NOW + 2000)
            .unwrap()
            .expect("should resolve at deadline");
        assert_eq!(resolution.outcome, Outcome::Unresolved);
    }

    #[test]
    fn test_scheduled_conclusive_evidence_settles_early() {
        let mut f = fixture();
        let claim_id = put_claim(&mut f, ResolutionKind::Scheduled, Some(NOW + 100_000));
        put_verdict(&mut f, claim_id, VerdictLabel::Verified, 0.97);
        let engine = ResolutionEngine::default_config();
        engine.mark_reviewed(&mut f.store, claim_id).unwrap();

        let resolution = engine
            .try_auto_resolve(&mut f.store, claim_id, NOW + 500)
            .unwrap()
            .expect("conclusive evidence should settle early");
        assert_eq!(resolution.outcome, Outcome::True);
    }

    #[test]
    fn test_indefinite_never_auto_resolves() {
        let mut f = fixture();
        let claim_id = put_claim(&mut f, ResolutionKind::Indefinite, None);
        put_verdict(&mut f, claim_id, VerdictLabel::Verified, 0.99);
        let engine = ResolutionEngine::default_config();
        engine.mark_reviewed(&mut f.store, claim_id).unwrap();

        assert!(engine
            .try_auto_resolve(&mut f.store, claim_id, NOW + 1_000_000)
            .unwrap()
            .is_none());

        // But explicit ground truth resolves it
        let resolution = engine
            .resolve_manual(
                &mut f.store,
                claim_id,
                Outcome::False,
                None,
                Some("official audit found no loss".to_string()),
                NOW + 2_000_000,
            )
            .unwrap();
        assert_eq!(resolution.outcome, Outcome::False);

        let outcomes = f.store.outcomes_for_source(f.source_id).unwrap();
        assert_eq!(outcomes[0].verdict_agreed, Some(false));
    }

    #[test]
    fn test_resolved_is_terminal_for_auto_transitions() {
        let mut f = fixture();
        let claim_id = put_claim(&mut f, ResolutionKind::Immediate, None);
        put_verdict(&mut f, claim_id, VerdictLabel::Verified, 0.95);
        let engine = ResolutionEngine::default_config();
        engine.mark_reviewed(&mut f.store, claim_id).unwrap();
        engine
            .try_auto_resolve(&mut f.store, claim_id, NOW + 100)
            .unwrap()
            .expect("should resolve");

        // A later, even stronger verdict must not produce a second
        // resolution or touch the status
        put_verdict(&mut f, claim_id, VerdictLabel::Misleading, 0.01);
        assert!(engine
            .try_auto_resolve(&mut f.store, claim_id, NOW + 200)
            .unwrap()
            .is_none());
        assert!(matches!(
            engine.resolve_manual(&mut f.store, claim_id, Outcome::False, None, None, NOW + 300),
            Err(ResolverError::AlreadyResolved(_))
        ));
        assert_eq!(f.store.outcomes_for_source(f.source_id).unwrap().len(), 1);
    }

    #[test]
    fn test_correction_references_original() {
        let mut f = fixture();
        let claim_id = put_claim(&mut f, ResolutionKind::Immediate, None);
        put_verdict(&mut f, claim_id, VerdictLabel::Verified, 0.95);
        let engine = ResolutionEngine::default_config();
        engine.mark_reviewed(&mut f.store, claim_id).unwrap();
        engine
            .try_auto_resolve(&mut f.store, claim_id, NOW + 100)
            .unwrap();

        let correction = engine
            .open_correction(
                &mut f.store,
                claim_id,
                "Protocol X lost $4.5M, not $45M".to_string(),
                NOW + 500,
            )
            .unwrap();

        assert_eq!(correction.corrects, Some(claim_id));
        assert_eq!(correction.status, ClaimStatus::Unreviewed);
        // Original untouched
        let original = f.store.get_claim(claim_id).unwrap().unwrap();
        assert_eq!(original.status, ClaimStatus::Resolved);
    }

    #[test]
    fn test_correction_requires_resolved_claim() {
        let mut f = fixture();
        let claim_id = put_claim(&mut f, ResolutionKind::Immediate, None);
        let engine = ResolutionEngine::default_config();

        assert!(matches!(
            engine.open_correction(&mut f.store, claim_id, "new text".to_string(), NOW),
            Err(ResolverError::InvalidState(_))
        ));
    }

    #[test]
    fn test_due_for_recheck_selection() {
        let mut f = fixture();
        let due = put_claim(&mut f, ResolutionKind::Scheduled, Some(NOW + 10_000));
        let past = put_claim(&mut f, ResolutionKind::Scheduled, Some(NOW - 10));
        let indefinite = put_claim(&mut f, ResolutionKind::Indefinite, None);
        let engine = ResolutionEngine::default_config();
        for id in [due, past, indefinite] {
            engine.mark_reviewed(&mut f.store, id).unwrap();
        }

        let recheck = engine.due_for_recheck(&f.store, NOW).unwrap();
        assert_eq!(recheck.len(), 1);
        assert_eq!(recheck[0].id, due);

        let deadline = engine.past_deadline(&f.store, NOW).unwrap();
        assert_eq!(deadline.len(), 1);
        assert_eq!(deadline[0].id, past);
    }
}
