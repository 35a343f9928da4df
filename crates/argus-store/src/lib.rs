//! Argus Storage Layer
//!
//! Implements the `PipelineStore` trait twice: an in-memory store for tests
//! and single-run tooling, and a SQLite store for persistence.
//!
//! # Architecture
//!
//! - `MemoryStore`: HashMap-backed, append-only logs as `Vec`s
//! - `SqliteStore`: SQLite-backed, append-only logs ordered by rowid
//!
//! Both enforce the same contract: forward-only claim status transitions,
//! at most one resolution per claim, cascade deletion of a claim's
//! evidence and verdicts, and verdict history as an ordered log.
//!
//! # Examples
//!
//! ```
//! use argus_store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! // Store is now ready for pipeline operations
//! ```

#![warn(missing_docs)]

pub mod sqlite;

use argus_domain::traits::{ClaimFilter, PipelineStore};
use argus_domain::{
    Claim, ClaimId, ClaimStatus, EvidenceId, EvidenceItem, Item, ItemId, Resolution, ResolutionId,
    ResolvedOutcome, Source, SourceId, SourceScore, Verdict, VerdictId,
};
use std::collections::HashMap;
use thiserror::Error;

pub use sqlite::SqliteStore;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Referenced entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Backward claim status transition rejected
    #[error("Invalid status transition: {0} -> {1}")]
    InvalidTransition(String, String),

    /// Duplicate insert rejected (content hash or resolution)
    #[error("Duplicate: {0}")]
    Duplicate(String),
}

pub(crate) fn apply_filter(mut claims: Vec<Claim>, filter: &ClaimFilter) -> Vec<Claim> {
    if let Some(status) = filter.status {
        claims.retain(|c| c.status == status);
    }
    if let Some(source_id) = filter.source_id {
        claims.retain(|c| c.source_id == source_id);
    }
    if let Some(kind) = filter.resolution_kind {
        claims.retain(|c| c.resolution_kind == kind);
    }
    if let Some(before) = filter.resolve_by_before {
        claims.retain(|c| matches!(c.resolve_by, Some(t) if t < before));
    }
    if let Some(after) = filter.resolve_by_after {
        claims.retain(|c| matches!(c.resolve_by, Some(t) if t >= after));
    }
    // Stable order for callers: creation order via chronologically sortable ids
    claims.sort_by_key(|c| c.id);
    if let Some(limit) = filter.limit {
        claims.truncate(limit);
    }
    claims
}

/// In-memory implementation of `PipelineStore`
///
/// Suitable for tests and one-shot CLI runs. All logs are plain `Vec`s in
/// append order, which makes the append-only verdict/evidence contract
/// literal rather than a query convention.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: HashMap<ItemId, Item>,
    items_by_hash: HashMap<String, ItemId>,
    claims: HashMap<ClaimId, Claim>,
    evidence: HashMap<ClaimId, Vec<EvidenceItem>>,
    verdicts: HashMap<ClaimId, Vec<Verdict>>,
    resolutions: HashMap<ClaimId, Resolution>,
    sources: HashMap<SourceId, Source>,
    scores: HashMap<SourceId, Vec<SourceScore>>,
    outcomes: HashMap<SourceId, Vec<ResolvedOutcome>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently stored
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of claims currently stored
    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }
}

impl PipelineStore for MemoryStore {
    type Error = StoreError;

    fn put_item(&mut self, item: Item) -> Result<ItemId, Self::Error> {
        if self.items_by_hash.contains_key(&item.content_hash) {
            return Err(StoreError::Duplicate(format!(
                "item with content hash {}",
                item.content_hash
            )));
        }
        let id = item.id;
        self.items_by_hash.insert(item.content_hash.clone(), id);
        self.items.insert(id, item);
        Ok(id)
    }

    fn get_item(&self, id: ItemId) -> Result<Option<Item>, Self::Error> {
        Ok(self.items.get(&id).cloned())
    }

    fn find_item_by_hash(&self, content_hash: &str) -> Result<Option<Item>, Self::Error> {
        Ok(self
            .items_by_hash
            .get(content_hash)
            .and_then(|id| self.items.get(id))
            .cloned())
    }

    fn list_items(&self) -> Result<Vec<Item>, Self::Error> {
        let mut items: Vec<Item> = self.items.values().cloned().collect();
        items.sort_by_key(|i| i.id);
        Ok(items)
    }

    fn put_claim(&mut self, claim: Claim) -> Result<ClaimId, Self::Error> {
        if !self.items.contains_key(&claim.item_id) {
            return Err(StoreError::NotFound(format!("item {}", claim.item_id)));
        }
        let id = claim.id;
        self.claims.insert(id, claim);
        Ok(id)
    }

    fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, Self::Error> {
        Ok(self.claims.get(&id).cloned())
    }

    fn claims_for_item(&self, item_id: ItemId) -> Result<Vec<Claim>, Self::Error> {
        let mut claims: Vec<Claim> = self
            .claims
            .values()
            .filter(|c| c.item_id == item_id)
            .cloned()
            .collect();
        claims.sort_by_key(|c| c.id);
        Ok(claims)
    }

    fn query_claims(&self, filter: &ClaimFilter) -> Result<Vec<Claim>, Self::Error> {
        Ok(apply_filter(self.claims.values().cloned().collect(), filter))
    }

    fn advance_claim_status(
        &mut self,
        id: ClaimId,
        status: ClaimStatus,
    ) -> Result<(), Self::Error> {
        let claim = self
            .claims
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("claim {}", id)))?;
        if !claim.status.can_advance_to(status) {
            return Err(StoreError::InvalidTransition(
                claim.status.as_str().to_string(),
                status.as_str().to_string(),
            ));
        }
        claim.status = status;
        Ok(())
    }

    fn delete_claim(&mut self, id: ClaimId) -> Result<(), Self::Error> {
        if self.claims.remove(&id).is_none() {
            return Err(StoreError::NotFound(format!("claim {}", id)));
        }
        self.evidence.remove(&id);
        self.verdicts.remove(&id);
        self.resolutions.remove(&id);
        Ok(())
    }

    fn append_evidence(&mut self, evidence: EvidenceItem) -> Result<EvidenceId, Self::Error> {
        if !self.claims.contains_key(&evidence.claim_id) {
            return Err(StoreError::NotFound(format!("claim {}", evidence.claim_id)));
        }
        let id = evidence.id;
        self.evidence.entry(evidence.claim_id).or_default().push(evidence);
        Ok(id)
    }

    fn evidence_for_claim(&self, claim_id: ClaimId) -> Result<Vec<EvidenceItem>, Self::Error> {
        Ok(self.evidence.get(&claim_id).cloned().unwrap_or_default())
    }

    fn append_verdict(&mut self, verdict: Verdict) -> Result<VerdictId, Self::Error> {
        if !self.claims.contains_key(&verdict.claim_id) {
            return Err(StoreError::NotFound(format!("claim {}", verdict.claim_id)));
        }
        let id = verdict.id;
        self.verdicts.entry(verdict.claim_id).or_default().push(verdict);
        Ok(id)
    }

    fn verdict_history(&self, claim_id: ClaimId) -> Result<Vec<Verdict>, Self::Error> {
        Ok(self.verdicts.get(&claim_id).cloned().unwrap_or_default())
    }

    fn current_verdict(&self, claim_id: ClaimId) -> Result<Option<Verdict>, Self::Error> {
        Ok(self
            .verdicts
            .get(&claim_id)
            .and_then(|log| log.last())
            .cloned())
    }

    fn put_resolution(&mut self, resolution: Resolution) -> Result<ResolutionId, Self::Error> {
        if !self.claims.contains_key(&resolution.claim_id) {
            return Err(StoreError::NotFound(format!("claim {}", resolution.claim_id)));
        }
        if self.resolutions.contains_key(&resolution.claim_id) {
            return Err(StoreError::Duplicate(format!(
                "resolution for claim {}",
                resolution.claim_id
            )));
        }
        let id = resolution.id;
        self.resolutions.insert(resolution.claim_id, resolution);
        Ok(id)
    }

    fn resolution_for_claim(&self, claim_id: ClaimId) -> Result<Option<Resolution>, Self::Error> {
        Ok(self.resolutions.get(&claim_id).cloned())
    }

    fn put_source(&mut self, source: Source) -> Result<SourceId, Self::Error> {
        let id = source.id;
        self.sources.insert(id, source);
        Ok(id)
    }

    fn get_source(&self, id: SourceId) -> Result<Option<Source>, Self::Error> {
        Ok(self.sources.get(&id).cloned())
    }

    fn list_sources(&self) -> Result<Vec<Source>, Self::Error> {
        let mut sources: Vec<Source> = self.sources.values().cloned().collect();
        sources.sort_by_key(|s| s.id);
        Ok(sources)
    }

    fn append_source_score(&mut self, score: SourceScore) -> Result<(), Self::Error> {
        if !self.sources.contains_key(&score.source_id) {
            return Err(StoreError::NotFound(format!("source {}", score.source_id)));
        }
        self.scores.entry(score.source_id).or_default().push(score);
        Ok(())
    }

    fn latest_source_score(
        &self,
        source_id: SourceId,
    ) -> Result<Option<SourceScore>, Self::Error> {
        Ok(self
            .scores
            .get(&source_id)
            .and_then(|log| log.last())
            .cloned())
    }

    fn append_outcome(&mut self, outcome: ResolvedOutcome) -> Result<(), Self::Error> {
        if !self.sources.contains_key(&outcome.source_id) {
            return Err(StoreError::NotFound(format!("source {}", outcome.source_id)));
        }
        self.outcomes.entry(outcome.source_id).or_default().push(outcome);
        Ok(())
    }

    fn outcomes_for_source(
        &self,
        source_id: SourceId,
    ) -> Result<Vec<ResolvedOutcome>, Self::Error> {
        Ok(self.outcomes.get(&source_id).cloned().unwrap_or_default())
    }
}
