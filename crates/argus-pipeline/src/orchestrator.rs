//! Core orchestrator implementation

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::metrics::RunSummary;
use crate::retry::with_retry;
use argus_credibility::CredibilityScorer;
use argus_domain::traits::{CompletionProvider, EvidenceSearch, PipelineStore};
use argus_domain::{Claim, ClaimId, ClaimStatus, Item, ItemId, ItemType, SourceId};
use argus_evidence::EvidenceRetriever;
use argus_extractor::ClaimExtractor;
use argus_resolver::ResolutionEngine;
use argus_verdict::VerdictSynthesizer;
use sha2::{Digest, Sha256};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{info, warn};

/// Hex SHA-256 of a content body; the item dedup key
pub fn content_hash(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Raw content handed to the pipeline before it becomes an item
#[derive(Debug, Clone)]
pub struct RawContent {
    /// The source this content came from
    pub source_id: SourceId,

    /// Optional title
    pub title: Option<String>,

    /// Optional canonical URL
    pub url: Option<String>,

    /// Raw text body
    pub body: String,

    /// Content kind
    pub item_type: ItemType,

    /// When the content was published
    pub published_at: Option<u64>,
}

/// What happened to one piece of raw content at ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStatus {
    /// A new item was created
    Created(ItemId),

    /// An item with the same content hash already exists
    Duplicate(ItemId),
}

impl IngestStatus {
    /// The item id, whether new or pre-existing
    pub fn item_id(&self) -> ItemId {
        match self {
            IngestStatus::Created(id) | IngestStatus::Duplicate(id) => *id,
        }
    }
}

/// Per-item processing outcome
#[derive(Debug, Clone, Default)]
pub struct ItemOutcome {
    /// Claims created from this item
    pub claims_created: usize,

    /// Evidence items attached across those claims
    pub evidence_attached: usize,

    /// Verdicts appended across those claims
    pub verdicts_appended: usize,

    /// Claims that auto-resolved during processing
    pub claims_resolved: usize,

    /// The item already had claims and was left alone
    pub already_processed: bool,
}

/// The orchestrator wires the pipeline stages together
///
/// All collaborators are injected at construction: the store, the
/// completion provider (via extractor/synthesizer), and the search
/// backend (via retriever). Tests substitute in-memory fakes for all
/// three without any module-level state.
pub struct Pipeline<P, B, S>
where
    P: CompletionProvider,
    B: EvidenceSearch,
    S: PipelineStore,
{
    store: Arc<Mutex<S>>,
    extractor: ClaimExtractor<P>,
    retriever: EvidenceRetriever<B>,
    synthesizer: VerdictSynthesizer<P>,
    engine: ResolutionEngine,
    scorer: CredibilityScorer,
    config: PipelineConfig,
}

impl<P, B, S> Pipeline<P, B, S>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: std::fmt::Display,
    B: EvidenceSearch + Send + Sync + 'static,
    B::Error: std::fmt::Display,
    S: PipelineStore,
    S::Error: std::fmt::Display,
{
    /// Create a pipeline over injected collaborators
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: S,
        extractor: ClaimExtractor<P>,
        retriever: EvidenceRetriever<B>,
        synthesizer: VerdictSynthesizer<P>,
        engine: ResolutionEngine,
        scorer: CredibilityScorer,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            extractor,
            retriever,
            synthesizer,
            engine,
            scorer,
            config,
        }
    }

    /// Shared handle to the underlying store
    pub fn store(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.store)
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, S>, PipelineError> {
        self.store
            .lock()
            .map_err(|e| PipelineError::Store(format!("store lock poisoned: {}", e)))
    }

    /// Ingest raw content, deduplicating by content hash
    ///
    /// Reprocessing the same raw content never creates a second item, and
    /// through it never creates duplicate claims.
    pub fn ingest(&self, raw: RawContent, now: u64) -> Result<IngestStatus, PipelineError> {
        let hash = content_hash(&raw.body);
        let mut store = self.lock_store()?;

        if let Some(existing) = store
            .find_item_by_hash(&hash)
            .map_err(|e| PipelineError::Store(e.to_string()))?
        {
            info!(item_id = %existing.id, "Duplicate content hash, skipping ingest");
            return Ok(IngestStatus::Duplicate(existing.id));
        }

        let mut item = Item::new(ItemId::new(), raw.source_id, raw.body, raw.item_type, now, hash);
        item.title = raw.title;
        item.url = raw.url;
        item.published_at = raw.published_at;

        let id = store
            .put_item(item)
            .map_err(|e| PipelineError::Store(e.to_string()))?;
        Ok(IngestStatus::Created(id))
    }

    /// Run the full per-item pipeline: extract, then per claim retrieve
    /// evidence, synthesize a verdict, and advance the lifecycle
    pub async fn process_item(
        &self,
        item_id: ItemId,
        now: u64,
    ) -> Result<ItemOutcome, PipelineError> {
        let item = self
            .lock_store()?
            .get_item(item_id)
            .map_err(|e| PipelineError::Store(e.to_string()))?
            .ok_or_else(|| PipelineError::NotFound(format!("item {}", item_id)))?;

        let existing = self
            .lock_store()?
            .claims_for_item(item_id)
            .map_err(|e| PipelineError::Store(e.to_string()))?;
        if !existing.is_empty() {
            info!(item_id = %item_id, "Item already has claims, skipping");
            return Ok(ItemOutcome {
                already_processed: true,
                ..Default::default()
            });
        }

        let extraction = with_retry(
            self.config.max_retries,
            self.config.retry_base_delay(),
            "claim extraction",
            || self.extractor.extract(&item),
        )
        .await
        .map_err(|e| PipelineError::Extraction(e.to_string()))?;

        let mut outcome = ItemOutcome::default();
        for candidate in extraction.candidates {
            let claim = Claim {
                id: ClaimId::new(),
                item_id,
                source_id: item.source_id,
                text: candidate.text,
                claim_type: candidate.claim_type,
                assets: candidate.assets,
                asserted_at: candidate
                    .asserted_at
                    .or(item.published_at)
                    .unwrap_or(now),
                resolution_kind: candidate.resolution_kind,
                resolve_by: candidate.resolve_by,
                falsifiability: candidate.falsifiability,
                initial_confidence: candidate.initial_confidence,
                status: ClaimStatus::Unreviewed,
                corrects: None,
                created_at: now,
            };

            self.lock_store()?
                .put_claim(claim.clone())
                .map_err(|e| PipelineError::Store(e.to_string()))?;
            outcome.claims_created += 1;

            let review = self.review_claim(&claim, now).await?;
            outcome.evidence_attached += review.evidence_attached;
            outcome.verdicts_appended += review.verdicts_appended;
            outcome.claims_resolved += review.claims_resolved;
        }

        info!(
            item_id = %item_id,
            claims = outcome.claims_created,
            resolved = outcome.claims_resolved,
            "Item processed"
        );
        Ok(outcome)
    }

    /// One verification round for a claim: evidence, verdict, lifecycle
    ///
    /// Evidence and verdicts append to the claim's logs; re-running this
    /// for a claim grows history and never rewrites it.
    async fn review_claim(&self, claim: &Claim, now: u64) -> Result<ItemOutcome, PipelineError> {
        // Stages are strictly sequential within one claim: evidence must
        // exist before a verdict can be synthesized
        let evidence = self.retriever.retrieve(claim, now).await;
        let verdict = self.synthesizer.synthesize(claim, &evidence, now).await;

        let mut outcome = ItemOutcome::default();
        let mut store = self.lock_store()?;
        for item in &evidence {
            store
                .append_evidence(item.clone())
                .map_err(|e| PipelineError::Store(e.to_string()))?;
            outcome.evidence_attached += 1;
        }
        store
            .append_verdict(verdict)
            .map_err(|e| PipelineError::Store(e.to_string()))?;
        outcome.verdicts_appended += 1;

        self.engine.mark_reviewed(&mut *store, claim.id)?;
        if self
            .engine
            .try_auto_resolve(&mut *store, claim.id, now)?
            .is_some()
        {
            outcome.claims_resolved += 1;
        }
        Ok(outcome)
    }

    /// Process a batch of items as independent units of work
    ///
    /// Per-item failures are logged and counted, never propagated; the
    /// summary always reflects every unit attempted.
    pub async fn run_batch(&self, item_ids: &[ItemId], now: u64) -> RunSummary {
        let started = Instant::now();
        let mut summary = RunSummary::started_at(now);

        for &item_id in item_ids {
            match self.process_item(item_id, now).await {
                Ok(outcome) if outcome.already_processed => {
                    summary.items_skipped += 1;
                }
                Ok(outcome) => {
                    summary.items_processed += 1;
                    summary.claims_created += outcome.claims_created;
                    summary.evidence_attached += outcome.evidence_attached;
                    summary.verdicts_appended += outcome.verdicts_appended;
                    summary.claims_resolved += outcome.claims_resolved;
                }
                Err(e) => {
                    warn!(item_id = %item_id, stage = "process_item", "Unit failed, continuing batch: {}", e);
                    summary.items_failed += 1;
                }
            }
        }

        summary.duration_ms = started.elapsed().as_millis() as u64;
        info!("{}", summary.report());
        summary
    }

    /// Process every item that has no claims yet
    pub async fn run_pending(&self, now: u64) -> Result<RunSummary, PipelineError> {
        let pending: Vec<ItemId> = {
            let store = self.lock_store()?;
            let items = store
                .list_items()
                .map_err(|e| PipelineError::Store(e.to_string()))?;
            let mut pending = Vec::new();
            for item in items {
                let has_claims = !store
                    .claims_for_item(item.id)
                    .map_err(|e| PipelineError::Store(e.to_string()))?
                    .is_empty();
                if !has_claims {
                    pending.push(item.id);
                }
            }
            pending
        };
        Ok(self.run_batch(&pending, now).await)
    }

    /// Re-check due claims and settle past-deadline ones
    ///
    /// Each re-check appends a fresh evidence round and verdict to the
    /// claim's history.
    pub async fn run_recheck_batch(&self, now: u64) -> Result<RunSummary, PipelineError> {
        let started = Instant::now();
        let mut summary = RunSummary::started_at(now);

        let due = {
            let store = self.lock_store()?;
            self.engine.due_for_recheck(&*store, now)?
        };
        for claim in due {
            match self.review_claim(&claim, now).await {
                Ok(outcome) => {
                    summary.rechecks_run += 1;
                    summary.evidence_attached += outcome.evidence_attached;
                    summary.verdicts_appended += outcome.verdicts_appended;
                    summary.claims_resolved += outcome.claims_resolved;
                }
                Err(e) => {
                    warn!(claim_id = %claim.id, stage = "recheck", "Unit failed, continuing batch: {}", e);
                    summary.items_failed += 1;
                }
            }
        }

        let past = {
            let store = self.lock_store()?;
            self.engine.past_deadline(&*store, now)?
        };
        for claim in past {
            let mut store = self.lock_store()?;
            match self.engine.try_auto_resolve(&mut *store, claim.id, now) {
                Ok(Some(_)) => summary.claims_resolved += 1,
                Ok(None) => {}
                Err(e) => {
                    warn!(claim_id = %claim.id, stage = "deadline", "Unit failed, continuing batch: {}", e);
                    summary.items_failed += 1;
                }
            }
        }

        summary.duration_ms = started.elapsed().as_millis() as u64;
        info!("{}", summary.report());
        Ok(summary)
    }

    /// Recompute credibility snapshots from resolved-outcome history
    ///
    /// Read-only over claims; writes only new versioned snapshots, so it
    /// can run concurrently with claim processing.
    pub fn run_rescore_batch(&self, now: u64) -> Result<RunSummary, PipelineError> {
        let started = Instant::now();
        let mut summary = RunSummary::started_at(now);

        let sources = self
            .lock_store()?
            .list_sources()
            .map_err(|e| PipelineError::Store(e.to_string()))?;

        for source in sources {
            let outcomes = self
                .lock_store()?
                .outcomes_for_source(source.id)
                .map_err(|e| PipelineError::Store(e.to_string()))?;
            if outcomes.is_empty() {
                continue;
            }
            let score = self.scorer.score(source.id, &outcomes, now);
            self.lock_store()?
                .append_source_score(score)
                .map_err(|e| PipelineError::Store(e.to_string()))?;
            summary.sources_rescored += 1;
        }

        summary.duration_ms = started.elapsed().as_millis() as u64;
        info!("{}", summary.report());
        Ok(summary)
    }
}
