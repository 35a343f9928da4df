//! Contract tests exercised against both store implementations

use argus_domain::traits::{ClaimFilter, PipelineStore};
use argus_domain::{
    Claim, ClaimId, ClaimStatus, ClaimType, EvidenceId, EvidenceItem, Grade, Item, ItemId,
    ItemType, Outcome, Resolution, ResolutionId, ResolutionKind, ResolvedOutcome, Source, SourceId,
    SourceScore, SourceType, Stance, Verdict, VerdictId, VerdictLabel,
};
use argus_store::{MemoryStore, SqliteStore, StoreError};

fn seed_source<S: PipelineStore<Error = StoreError>>(store: &mut S) -> SourceId {
    store
        .put_source(Source::new(
            SourceId::new(),
            SourceType::Outlet,
            "chainwire.example",
            "Chainwire",
        ))
        .unwrap()
}

fn seed_item<S: PipelineStore<Error = StoreError>>(
    store: &mut S,
    source_id: SourceId,
    hash: &str,
) -> ItemId {
    store
        .put_item(
            Item::new(
                ItemId::new(),
                source_id,
                "Protocol X was drained of $45 million".to_string(),
                ItemType::Article,
                1_700_000_000,
                hash.to_string(),
            )
            .with_url("https://chainwire.example/a/1"),
        )
        .unwrap()
}

fn seed_claim<S: PipelineStore<Error = StoreError>>(
    store: &mut S,
    item_id: ItemId,
    source_id: SourceId,
) -> ClaimId {
    store
        .put_claim(Claim {
            id: ClaimId::new(),
            item_id,
            source_id,
            text: "Protocol X lost $45M in an exploit".to_string(),
            claim_type: ClaimType::ExploitOrHack,
            assets: vec!["X".to_string()],
            asserted_at: 1_700_000_000,
            resolution_kind: ResolutionKind::Immediate,
            resolve_by: None,
            falsifiability: 0.95,
            initial_confidence: 0.8,
            status: ClaimStatus::Unreviewed,
            corrects: None,
            created_at: 1_700_000_100,
        })
        .unwrap()
}

fn make_verdict(claim_id: ClaimId, label: VerdictLabel, p: f64) -> Verdict {
    Verdict {
        id: VerdictId::new(),
        claim_id,
        label,
        probability_true: p,
        evidence_strength: 0.5,
        key_evidence: vec![],
        reasoning: "test reasoning".to_string(),
        invalidation_trigger: "an official denial".to_string(),
        model_version: "test-v1".to_string(),
        created_at: 1_700_000_200,
    }
}

fn exercise_dedup<S: PipelineStore<Error = StoreError>>(store: &mut S) {
    let source_id = seed_source(store);
    seed_item(store, source_id, "hash-a");

    let found = store.find_item_by_hash("hash-a").unwrap();
    assert!(found.is_some());

    let dup = Item::new(
        ItemId::new(),
        source_id,
        "same content".to_string(),
        ItemType::Post,
        1_700_001_000,
        "hash-a".to_string(),
    );
    assert!(matches!(store.put_item(dup), Err(StoreError::Duplicate(_))));
    assert!(store.find_item_by_hash("hash-missing").unwrap().is_none());
}

fn exercise_verdict_log<S: PipelineStore<Error = StoreError>>(store: &mut S) {
    let source_id = seed_source(store);
    let item_id = seed_item(store, source_id, "hash-b");
    let claim_id = seed_claim(store, item_id, source_id);

    assert!(store.current_verdict(claim_id).unwrap().is_none());

    let v1 = make_verdict(claim_id, VerdictLabel::Speculative, 0.5);
    let v2 = make_verdict(claim_id, VerdictLabel::Verified, 0.92);
    store.append_verdict(v1.clone()).unwrap();

    let history = store.verdict_history(claim_id).unwrap();
    assert_eq!(history.len(), 1);

    store.append_verdict(v2.clone()).unwrap();
    let history = store.verdict_history(claim_id).unwrap();
    assert_eq!(history.len(), 2);

    // Appending never mutates prior entries, and "current" is the last entry
    assert_eq!(history[0].id, v1.id);
    assert_eq!(history[0].label, VerdictLabel::Speculative);
    assert_eq!(store.current_verdict(claim_id).unwrap().unwrap().id, v2.id);
}

fn exercise_cascade_delete<S: PipelineStore<Error = StoreError>>(store: &mut S) {
    let source_id = seed_source(store);
    let item_id = seed_item(store, source_id, "hash-c");
    let claim_id = seed_claim(store, item_id, source_id);

    store
        .append_evidence(EvidenceItem {
            id: EvidenceId::new(),
            claim_id,
            url: "https://etherscan.example/tx/0xabc".to_string(),
            publisher: "etherscan.example".to_string(),
            excerpt: "transfer of 45M USDC out of the protocol treasury".to_string(),
            stance: Stance::Supports,
            grade: Grade::A,
            primary: true,
            retrieved_at: 1_700_000_150,
        })
        .unwrap();
    store
        .append_verdict(make_verdict(claim_id, VerdictLabel::Verified, 0.92))
        .unwrap();

    store.delete_claim(claim_id).unwrap();

    assert!(store.get_claim(claim_id).unwrap().is_none());
    assert!(store.evidence_for_claim(claim_id).unwrap().is_empty());
    assert!(store.verdict_history(claim_id).unwrap().is_empty());
}

fn exercise_resolution_and_outcomes<S: PipelineStore<Error = StoreError>>(store: &mut S) {
    let source_id = seed_source(store);
    let item_id = seed_item(store, source_id, "hash-d");
    let claim_id = seed_claim(store, item_id, source_id);

    store
        .put_resolution(Resolution {
            id: ResolutionId::new(),
            claim_id,
            outcome: Outcome::True,
            resolved_at: 1_700_100_000,
            evidence_url: Some("https://etherscan.example/tx/0xabc".to_string()),
            notes: None,
        })
        .unwrap();

    let again = Resolution {
        id: ResolutionId::new(),
        claim_id,
        outcome: Outcome::False,
        resolved_at: 1_700_200_000,
        evidence_url: None,
        notes: None,
    };
    assert!(matches!(store.put_resolution(again), Err(StoreError::Duplicate(_))));

    store
        .append_outcome(ResolvedOutcome {
            claim_id,
            source_id,
            outcome: Outcome::True,
            verdict_agreed: Some(true),
            had_primary_evidence: true,
            resolved_at: 1_700_100_000,
        })
        .unwrap();

    let outcomes = store.outcomes_for_source(source_id).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].outcome, Outcome::True);
}

fn exercise_score_snapshots<S: PipelineStore<Error = StoreError>>(store: &mut S) {
    let source_id = seed_source(store);

    assert!(store.latest_source_score(source_id).unwrap().is_none());

    for (version, tr) in [(1u32, 62.0), (1, 64.5)] {
        store
            .append_source_score(SourceScore {
                source_id,
                track_record: tr,
                method_discipline: 40.0,
                sample_size: 12,
                interval: (tr - 10.0, tr + 10.0),
                score_version: version,
                computed_at: 1_700_000_000 + version as u64,
            })
            .unwrap();
    }

    let latest = store.latest_source_score(source_id).unwrap().unwrap();
    assert_eq!(latest.track_record, 64.5);
}

fn exercise_claim_filter<S: PipelineStore<Error = StoreError>>(store: &mut S) {
    let source_id = seed_source(store);
    let item_id = seed_item(store, source_id, "hash-e");

    let mut scheduled = Claim {
        id: ClaimId::new(),
        item_id,
        source_id,
        text: "BTC will close above 100k by March".to_string(),
        claim_type: ClaimType::PricePrediction,
        assets: vec!["BTC".to_string()],
        asserted_at: 1_700_000_000,
        resolution_kind: ResolutionKind::Scheduled,
        resolve_by: Some(1_710_000_000),
        falsifiability: 0.9,
        initial_confidence: 0.4,
        status: ClaimStatus::Unreviewed,
        corrects: None,
        created_at: 1_700_000_100,
    };
    let scheduled_id = store.put_claim(scheduled.clone()).unwrap();
    scheduled.id = ClaimId::new();
    scheduled.resolution_kind = ResolutionKind::Indefinite;
    scheduled.resolve_by = None;
    store.put_claim(scheduled).unwrap();

    store.advance_claim_status(scheduled_id, ClaimStatus::Reviewed).unwrap();

    let due = store
        .query_claims(&ClaimFilter {
            status: Some(ClaimStatus::Reviewed),
            resolution_kind: Some(ResolutionKind::Scheduled),
            resolve_by_after: Some(1_700_000_000),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, scheduled_id);
}

macro_rules! store_contract_tests {
    ($mod_name:ident, $make:expr) => {
        mod $mod_name {
            use super::*;

            #[test]
            fn dedup_by_content_hash() {
                exercise_dedup(&mut $make);
            }

            #[test]
            fn verdict_log_is_append_only() {
                exercise_verdict_log(&mut $make);
            }

            #[test]
            fn delete_claim_cascades() {
                exercise_cascade_delete(&mut $make);
            }

            #[test]
            fn one_resolution_per_claim() {
                exercise_resolution_and_outcomes(&mut $make);
            }

            #[test]
            fn latest_score_is_last_appended() {
                exercise_score_snapshots(&mut $make);
            }

            #[test]
            fn claim_filter_matches() {
                exercise_claim_filter(&mut $make);
            }
        }
    };
}

store_contract_tests!(memory, MemoryStore::new());
store_contract_tests!(sqlite, SqliteStore::new(":memory:").unwrap());

#[test]
fn sqlite_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("argus.db");

    let source_id;
    {
        let mut store = SqliteStore::new(&path).unwrap();
        source_id = seed_source(&mut store);
        seed_item(&mut store, source_id, "hash-persist");
    }

    let store = SqliteStore::new(&path).unwrap();
    assert!(store.get_source(source_id).unwrap().is_some());
    assert!(store.find_item_by_hash("hash-persist").unwrap().is_some());
}
