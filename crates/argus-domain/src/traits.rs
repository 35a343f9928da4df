//! Trait definitions for external interactions
//!
//! These traits define the boundaries between pipeline logic and
//! infrastructure. Implementations live in other crates: storage in
//! `argus-store`, LLM completion in `argus-llm`, evidence search in
//! `argus-evidence`.

use crate::{
    Claim, ClaimId, ClaimStatus, EvidenceId, EvidenceItem, Item, ItemId, Resolution, ResolutionId,
    ResolutionKind, ResolvedOutcome, Source, SourceId, SourceScore, Verdict, VerdictId,
};
use async_trait::async_trait;

/// Query criteria for retrieving claims
#[derive(Debug, Clone, Default)]
pub struct ClaimFilter {
    /// Filter by lifecycle status
    pub status: Option<ClaimStatus>,

    /// Filter by originating source
    pub source_id: Option<SourceId>,

    /// Filter by resolution kind
    pub resolution_kind: Option<ResolutionKind>,

    /// Only claims whose resolve-by deadline is strictly before this time
    pub resolve_by_before: Option<u64>,

    /// Only claims whose resolve-by deadline is at or after this time
    pub resolve_by_after: Option<u64>,

    /// Maximum results to return
    pub limit: Option<usize>,
}

/// Storage contract for the pipeline
///
/// The pipeline depends only on this contract, never on a specific storage
/// engine. Implementations must keep verdict history as an append-only
/// ordered log per claim, and must cascade claim deletion to that claim's
/// evidence and verdicts.
pub trait PipelineStore {
    /// Error type for store operations
    type Error;

    /// Insert an item
    fn put_item(&mut self, item: Item) -> Result<ItemId, Self::Error>;

    /// Get an item by id
    fn get_item(&self, id: ItemId) -> Result<Option<Item>, Self::Error>;

    /// Look up an item by its content hash (dedup key)
    fn find_item_by_hash(&self, content_hash: &str) -> Result<Option<Item>, Self::Error>;

    /// All items, in ingestion order
    fn list_items(&self) -> Result<Vec<Item>, Self::Error>;

    /// Insert a claim
    fn put_claim(&mut self, claim: Claim) -> Result<ClaimId, Self::Error>;

    /// Get a claim by id
    fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, Self::Error>;

    /// All claims extracted from one item
    fn claims_for_item(&self, item_id: ItemId) -> Result<Vec<Claim>, Self::Error>;

    /// Query claims matching criteria
    fn query_claims(&self, filter: &ClaimFilter) -> Result<Vec<Claim>, Self::Error>;

    /// Advance a claim's lifecycle status
    ///
    /// Implementations must reject backward transitions.
    fn advance_claim_status(&mut self, id: ClaimId, status: ClaimStatus)
        -> Result<(), Self::Error>;

    /// Delete a claim, cascading to its evidence and verdicts
    fn delete_claim(&mut self, id: ClaimId) -> Result<(), Self::Error>;

    /// Append one piece of evidence to a claim's evidence log
    fn append_evidence(&mut self, evidence: EvidenceItem) -> Result<EvidenceId, Self::Error>;

    /// All evidence gathered for a claim, in append order
    fn evidence_for_claim(&self, claim_id: ClaimId) -> Result<Vec<EvidenceItem>, Self::Error>;

    /// Append a verdict to a claim's ordered verdict log
    fn append_verdict(&mut self, verdict: Verdict) -> Result<VerdictId, Self::Error>;

    /// The full verdict log for a claim, oldest first
    fn verdict_history(&self, claim_id: ClaimId) -> Result<Vec<Verdict>, Self::Error>;

    /// The most recent verdict for a claim (last element of the log)
    fn current_verdict(&self, claim_id: ClaimId) -> Result<Option<Verdict>, Self::Error>;

    /// Record the ground-truth resolution for a claim (at most one)
    fn put_resolution(&mut self, resolution: Resolution) -> Result<ResolutionId, Self::Error>;

    /// The resolution for a claim, if it has settled
    fn resolution_for_claim(&self, claim_id: ClaimId) -> Result<Option<Resolution>, Self::Error>;

    /// Insert or update a source
    fn put_source(&mut self, source: Source) -> Result<SourceId, Self::Error>;

    /// Get a source by id
    fn get_source(&self, id: SourceId) -> Result<Option<Source>, Self::Error>;

    /// All known sources
    fn list_sources(&self) -> Result<Vec<Source>, Self::Error>;

    /// Append a versioned credibility snapshot
    fn append_source_score(&mut self, score: SourceScore) -> Result<(), Self::Error>;

    /// The latest credibility snapshot for a source
    fn latest_source_score(&self, source_id: SourceId)
        -> Result<Option<SourceScore>, Self::Error>;

    /// Append a resolved-outcome feedback tuple
    fn append_outcome(&mut self, outcome: ResolvedOutcome) -> Result<(), Self::Error>;

    /// All resolved outcomes attributable to a source, in append order
    fn outcomes_for_source(&self, source_id: SourceId)
        -> Result<Vec<ResolvedOutcome>, Self::Error>;
}

/// Trait for LLM completion operations
///
/// Output is untrusted text expected to be JSON, possibly wrapped in
/// markdown code fences; callers must parse defensively and clamp all
/// numeric fields.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Error type for completion operations
    type Error;

    /// Generate a completion for a system/user prompt pair
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, Self::Error>;
}

/// One raw hit from the evidence-search backend, before grading
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Where the material lives
    pub url: String,

    /// Who published it
    pub publisher: String,

    /// Relevant excerpt
    pub excerpt: String,

    /// When the material was published (seconds since Unix epoch)
    pub published_at: Option<u64>,
}

/// Trait for the evidence-search backend
///
/// Swappable: the grader applies grading/stance logic on top, independent
/// of which backend produced the hits.
#[async_trait]
pub trait EvidenceSearch: Send + Sync {
    /// Error type for search operations
    type Error;

    /// Find candidate corroborating/refuting material for a claim
    async fn search(&self, claim_text: &str, assets: &[String])
        -> Result<Vec<SearchHit>, Self::Error>;
}
