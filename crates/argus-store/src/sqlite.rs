//! SQLite-backed implementation of `PipelineStore`
//!
//! Structured entity data lives in one table per entity; append-only logs
//! (evidence, verdicts, source scores, outcomes) rely on rowid insertion
//! order so history queries need no timestamp sorting convention.
//!
//! # Thread Safety
//!
//! SQLite connections are not thread-safe. Each thread should have its own
//! `SqliteStore` instance.

use crate::StoreError;
use argus_domain::traits::{ClaimFilter, PipelineStore};
use argus_domain::{
    Claim, ClaimId, ClaimStatus, ClaimType, EvidenceId, EvidenceItem, Grade, Item, ItemId,
    ItemType, Outcome, Resolution, ResolutionId, ResolutionKind, ResolvedOutcome, Source, SourceId,
    SourceScore, SourceType, Stance, Verdict, VerdictId, VerdictLabel,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

fn conv_err(e: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, e.into())
}

fn opt_u64(v: Option<i64>) -> Option<u64> {
    v.map(|t| t as u64)
}

/// SQLite-based implementation of `PipelineStore`
///
/// # Examples
///
/// ```no_run
/// use argus_store::SqliteStore;
///
/// let store = SqliteStore::new("argus.db").unwrap();
/// ```
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS items (
                id            TEXT PRIMARY KEY,
                source_id     TEXT NOT NULL,
                title         TEXT,
                url           TEXT,
                body          TEXT NOT NULL,
                item_type     TEXT NOT NULL,
                published_at  INTEGER,
                ingested_at   INTEGER NOT NULL,
                content_hash  TEXT NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS claims (
                id                 TEXT PRIMARY KEY,
                item_id            TEXT NOT NULL,
                source_id          TEXT NOT NULL,
                text               TEXT NOT NULL,
                claim_type         TEXT NOT NULL,
                assets             TEXT NOT NULL,
                asserted_at        INTEGER NOT NULL,
                resolution_kind    TEXT NOT NULL,
                resolve_by         INTEGER,
                falsifiability     REAL NOT NULL,
                initial_confidence REAL NOT NULL,
                status             TEXT NOT NULL,
                corrects           TEXT,
                created_at         INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS evidence (
                id           TEXT PRIMARY KEY,
                claim_id     TEXT NOT NULL,
                url          TEXT NOT NULL,
                publisher    TEXT NOT NULL,
                excerpt      TEXT NOT NULL,
                stance       TEXT NOT NULL,
                grade        TEXT NOT NULL,
                is_primary   INTEGER NOT NULL,
                retrieved_at INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS verdicts (
                id                   TEXT PRIMARY KEY,
                claim_id             TEXT NOT NULL,
                label                TEXT NOT NULL,
                probability_true     REAL NOT NULL,
                evidence_strength    REAL NOT NULL,
                key_evidence         TEXT NOT NULL,
                reasoning            TEXT NOT NULL,
                invalidation_trigger TEXT NOT NULL,
                model_version        TEXT NOT NULL,
                created_at           INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS resolutions (
                id           TEXT PRIMARY KEY,
                claim_id     TEXT NOT NULL UNIQUE,
                outcome      TEXT NOT NULL,
                resolved_at  INTEGER NOT NULL,
                evidence_url TEXT,
                notes        TEXT
            );
            CREATE TABLE IF NOT EXISTS sources (
                id           TEXT PRIMARY KEY,
                source_type  TEXT NOT NULL,
                handle       TEXT NOT NULL,
                display_name TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS source_scores (
                source_id         TEXT NOT NULL,
                track_record      REAL NOT NULL,
                method_discipline REAL NOT NULL,
                sample_size       INTEGER NOT NULL,
                interval_lower    REAL NOT NULL,
                interval_upper    REAL NOT NULL,
                score_version     INTEGER NOT NULL,
                computed_at       INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS outcomes (
                claim_id             TEXT NOT NULL,
                source_id            TEXT NOT NULL,
                outcome              TEXT NOT NULL,
                verdict_agreed       INTEGER,
                had_primary_evidence INTEGER NOT NULL,
                resolved_at          INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_claims_item ON claims(item_id);
            CREATE INDEX IF NOT EXISTS idx_evidence_claim ON evidence(claim_id);
            CREATE INDEX IF NOT EXISTS idx_verdicts_claim ON verdicts(claim_id);
            CREATE INDEX IF NOT EXISTS idx_scores_source ON source_scores(source_id);
            CREATE INDEX IF NOT EXISTS idx_outcomes_source ON outcomes(source_id);",
        )?;
        Ok(())
    }

    fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
        let id: String = row.get(0)?;
        let source_id: String = row.get(1)?;
        Ok(Item {
            id: ItemId::from_string(&id).map_err(conv_err)?,
            source_id: SourceId::from_string(&source_id).map_err(conv_err)?,
            title: row.get(2)?,
            url: row.get(3)?,
            body: row.get(4)?,
            item_type: {
                let s: String = row.get(5)?;
                ItemType::parse(&s).ok_or_else(|| conv_err(format!("item type {}", s)))?
            },
            published_at: opt_u64(row.get(6)?),
            ingested_at: row.get::<_, i64>(7)? as u64,
            content_hash: row.get(8)?,
        })
    }

    fn row_to_claim(row: &Row<'_>) -> rusqlite::Result<Claim> {
        let id: String = row.get(0)?;
        let item_id: String = row.get(1)?;
        let source_id: String = row.get(2)?;
        let assets_json: String = row.get(5)?;
        let corrects: Option<String> = row.get(12)?;
        Ok(Claim {
            id: ClaimId::from_string(&id).map_err(conv_err)?,
            item_id: ItemId::from_string(&item_id).map_err(conv_err)?,
            source_id: SourceId::from_string(&source_id).map_err(conv_err)?,
            text: row.get(3)?,
            claim_type: {
                let s: String = row.get(4)?;
                ClaimType::parse(&s).ok_or_else(|| conv_err(format!("claim type {}", s)))?
            },
            assets: serde_json::from_str(&assets_json)
                .map_err(|e| conv_err(format!("assets json: {}", e)))?,
            asserted_at: row.get::<_, i64>(6)? as u64,
            resolution_kind: {
                let s: String = row.get(7)?;
                ResolutionKind::parse(&s)
                    .ok_or_else(|| conv_err(format!("resolution kind {}", s)))?
            },
            resolve_by: opt_u64(row.get(8)?),
            falsifiability: row.get(9)?,
            initial_confidence: row.get(10)?,
            status: {
                let s: String = row.get(11)?;
                ClaimStatus::parse(&s).ok_or_else(|| conv_err(format!("status {}", s)))?
            },
            corrects: corrects
                .map(|s| ClaimId::from_string(&s).map_err(conv_err))
                .transpose()?,
            created_at: row.get::<_, i64>(13)? as u64,
        })
    }

    fn row_to_evidence(row: &Row<'_>) -> rusqlite::Result<EvidenceItem> {
        let id: String = row.get(0)?;
        let claim_id: String = row.get(1)?;
        Ok(EvidenceItem {
            id: EvidenceId::from_string(&id).map_err(conv_err)?,
            claim_id: ClaimId::from_string(&claim_id).map_err(conv_err)?,
            url: row.get(2)?,
            publisher: row.get(3)?,
            excerpt: row.get(4)?,
            stance: {
                let s: String = row.get(5)?;
                Stance::parse(&s).ok_or_else(|| conv_err(format!("stance {}", s)))?
            },
            grade: {
                let s: String = row.get(6)?;
                Grade::parse(&s).ok_or_else(|| conv_err(format!("grade {}", s)))?
            },
            primary: row.get::<_, i64>(7)? != 0,
            retrieved_at: row.get::<_, i64>(8)? as u64,
        })
    }

    fn row_to_verdict(row: &Row<'_>) -> rusqlite::Result<Verdict> {
        let id: String = row.get(0)?;
        let claim_id: String = row.get(1)?;
        let key_evidence_json: String = row.get(5)?;
        let key_evidence_strs: Vec<String> = serde_json::from_str(&key_evidence_json)
            .map_err(|e| conv_err(format!("key evidence json: {}", e)))?;
        let key_evidence = key_evidence_strs
            .iter()
            .map(|s| EvidenceId::from_string(s).map_err(conv_err))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Verdict {
            id: VerdictId::from_string(&id).map_err(conv_err)?,
            claim_id: ClaimId::from_string(&claim_id).map_err(conv_err)?,
            label: {
                let s: String = row.get(2)?;
                VerdictLabel::parse(&s).ok_or_else(|| conv_err(format!("label {}", s)))?
            },
            probability_true: row.get(3)?,
            evidence_strength: row.get(4)?,
            key_evidence,
            reasoning: row.get(6)?,
            invalidation_trigger: row.get(7)?,
            model_version: row.get(8)?,
            created_at: row.get::<_, i64>(9)? as u64,
        })
    }

    fn row_to_resolution(row: &Row<'_>) -> rusqlite::Result<Resolution> {
        let id: String = row.get(0)?;
        let claim_id: String = row.get(1)?;
        Ok(Resolution {
            id: ResolutionId::from_string(&id).map_err(conv_err)?,
            claim_id: ClaimId::from_string(&claim_id).map_err(conv_err)?,
            outcome: {
                let s: String = row.get(2)?;
                Outcome::parse(&s).ok_or_else(|| conv_err(format!("outcome {}", s)))?
            },
            resolved_at: row.get::<_, i64>(3)? as u64,
            evidence_url: row.get(4)?,
            notes: row.get(5)?,
        })
    }

    fn row_to_source(row: &Row<'_>) -> rusqlite::Result<Source> {
        let id: String = row.get(0)?;
        Ok(Source {
            id: SourceId::from_string(&id).map_err(conv_err)?,
            source_type: {
                let s: String = row.get(1)?;
                SourceType::parse(&s).ok_or_else(|| conv_err(format!("source type {}", s)))?
            },
            handle: row.get(2)?,
            display_name: row.get(3)?,
        })
    }

    fn row_to_score(row: &Row<'_>) -> rusqlite::Result<SourceScore> {
        let source_id: String = row.get(0)?;
        Ok(SourceScore {
            source_id: SourceId::from_string(&source_id).map_err(conv_err)?,
            track_record: row.get(1)?,
            method_discipline: row.get(2)?,
            sample_size: row.get::<_, i64>(3)? as usize,
            interval: (row.get(4)?, row.get(5)?),
            score_version: row.get::<_, i64>(6)? as u32,
            computed_at: row.get::<_, i64>(7)? as u64,
        })
    }

    fn row_to_outcome(row: &Row<'_>) -> rusqlite::Result<ResolvedOutcome> {
        let claim_id: String = row.get(0)?;
        let source_id: String = row.get(1)?;
        let agreed: Option<i64> = row.get(3)?;
        Ok(ResolvedOutcome {
            claim_id: ClaimId::from_string(&claim_id).map_err(conv_err)?,
            source_id: SourceId::from_string(&source_id).map_err(conv_err)?,
            outcome: {
                let s: String = row.get(2)?;
                Outcome::parse(&s).ok_or_else(|| conv_err(format!("outcome {}", s)))?
            },
            verdict_agreed: agreed.map(|v| v != 0),
            had_primary_evidence: row.get::<_, i64>(4)? != 0,
            resolved_at: row.get::<_, i64>(5)? as u64,
        })
    }
}

impl PipelineStore for SqliteStore {
    type Error = StoreError;

    fn put_item(&mut self, item: Item) -> Result<ItemId, Self::Error> {
        if self.find_item_by_hash(&item.content_hash)?.is_some() {
            return Err(StoreError::Duplicate(format!(
                "item with content hash {}",
                item.content_hash
            )));
        }
        self.conn.execute(
            "INSERT INTO items (id, source_id, title, url, body, item_type, published_at, ingested_at, content_hash)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                item.id.to_string(),
                item.source_id.to_string(),
                item.title,
                item.url,
                item.body,
                item.item_type.as_str(),
                item.published_at.map(|t| t as i64),
                item.ingested_at as i64,
                item.content_hash,
            ],
        )?;
        Ok(item.id)
    }

    fn get_item(&self, id: ItemId) -> Result<Option<Item>, Self::Error> {
        let item = self
            .conn
            .query_row(
                "SELECT id, source_id, title, url, body, item_type, published_at, ingested_at, content_hash
                 FROM items WHERE id = ?1",
                params![id.to_string()],
                Self::row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    fn find_item_by_hash(&self, content_hash: &str) -> Result<Option<Item>, Self::Error> {
        let item = self
            .conn
            .query_row(
                "SELECT id, source_id, title, url, body, item_type, published_at, ingested_at, content_hash
                 FROM items WHERE content_hash = ?1",
                params![content_hash],
                Self::row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    fn list_items(&self) -> Result<Vec<Item>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, source_id, title, url, body, item_type, published_at, ingested_at, content_hash
             FROM items ORDER BY id",
        )?;
        let items = stmt
            .query_map([], Self::row_to_item)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    fn put_claim(&mut self, claim: Claim) -> Result<ClaimId, Self::Error> {
        if self.get_item(claim.item_id)?.is_none() {
            return Err(StoreError::NotFound(format!("item {}", claim.item_id)));
        }
        let assets_json = serde_json::to_string(&claim.assets)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;
        self.conn.execute(
            "INSERT INTO claims (id, item_id, source_id, text, claim_type, assets, asserted_at,
                                 resolution_kind, resolve_by, falsifiability, initial_confidence,
                                 status, corrects, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                claim.id.to_string(),
                claim.item_id.to_string(),
                claim.source_id.to_string(),
                claim.text,
                claim.claim_type.as_str(),
                assets_json,
                claim.asserted_at as i64,
                claim.resolution_kind.as_str(),
                claim.resolve_by.map(|t| t as i64),
                claim.falsifiability,
                claim.initial_confidence,
                claim.status.as_str(),
                claim.corrects.map(|c| c.to_string()),
                claim.created_at as i64,
            ],
        )?;
        Ok(claim.id)
    }

    fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, Self::Error> {
        let claim = self
            .conn
            .query_row(
                "SELECT id, item_id, source_id, text, claim_type, assets, asserted_at,
                        resolution_kind, resolve_by, falsifiability, initial_confidence,
                        status, corrects, created_at
                 FROM claims WHERE id = ?1",
                params![id.to_string()],
                Self::row_to_claim,
            )
            .optional()?;
        Ok(claim)
    }

    fn claims_for_item(&self, item_id: ItemId) -> Result<Vec<Claim>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, item_id, source_id, text, claim_type, assets, asserted_at,
                    resolution_kind, resolve_by, falsifiability, initial_confidence,
                    status, corrects, created_at
             FROM claims WHERE item_id = ?1 ORDER BY id",
        )?;
        let claims = stmt
            .query_map(params![item_id.to_string()], Self::row_to_claim)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(claims)
    }

    fn query_claims(&self, filter: &ClaimFilter) -> Result<Vec<Claim>, Self::Error> {
        // Filters are applied in memory; per-deployment claim volumes are
        // well within what a full scan handles.
        let mut stmt = self.conn.prepare(
            "SELECT id, item_id, source_id, text, claim_type, assets, asserted_at,
                    resolution_kind, resolve_by, falsifiability, initial_confidence,
                    status, corrects, created_at
             FROM claims ORDER BY id",
        )?;
        let claims = stmt
            .query_map([], Self::row_to_claim)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(crate::apply_filter(claims, filter))
    }

    fn advance_claim_status(
        &mut self,
        id: ClaimId,
        status: ClaimStatus,
    ) -> Result<(), Self::Error> {
        let claim = self
            .get_claim(id)?
            .ok_or_else(|| StoreError::NotFound(format!("claim {}", id)))?;
        if !claim.status.can_advance_to(status) {
            return Err(StoreError::InvalidTransition(
                claim.status.as_str().to_string(),
                status.as_str().to_string(),
            ));
        }
        self.conn.execute(
            "UPDATE claims SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id.to_string()],
        )?;
        Ok(())
    }

    fn delete_claim(&mut self, id: ClaimId) -> Result<(), Self::Error> {
        let deleted = self
            .conn
            .execute("DELETE FROM claims WHERE id = ?1", params![id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(format!("claim {}", id)));
        }
        self.conn
            .execute("DELETE FROM evidence WHERE claim_id = ?1", params![id.to_string()])?;
        self.conn
            .execute("DELETE FROM verdicts WHERE claim_id = ?1", params![id.to_string()])?;
        self.conn
            .execute("DELETE FROM resolutions WHERE claim_id = ?1", params![id.to_string()])?;
        Ok(())
    }

    fn append_evidence(&mut self, evidence: EvidenceItem) -> Result<EvidenceId, Self::Error> {
        if self.get_claim(evidence.claim_id)?.is_none() {
            return Err(StoreError::NotFound(format!("claim {}", evidence.claim_id)));
        }
        self.conn.execute(
            "INSERT INTO evidence (id, claim_id, url, publisher, excerpt, stance, grade, is_primary, retrieved_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                evidence.id.to_string(),
                evidence.claim_id.to_string(),
                evidence.url,
                evidence.publisher,
                evidence.excerpt,
                evidence.stance.as_str(),
                evidence.grade.as_str(),
                evidence.primary as i64,
                evidence.retrieved_at as i64,
            ],
        )?;
        Ok(evidence.id)
    }

    fn evidence_for_claim(&self, claim_id: ClaimId) -> Result<Vec<EvidenceItem>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, claim_id, url, publisher, excerpt, stance, grade, is_primary, retrieved_at
             FROM evidence WHERE claim_id = ?1 ORDER BY rowid",
        )?;
        let evidence = stmt
            .query_map(params![claim_id.to_string()], Self::row_to_evidence)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(evidence)
    }

    fn append_verdict(&mut self, verdict: Verdict) -> Result<VerdictId, Self::Error> {
        if self.get_claim(verdict.claim_id)?.is_none() {
            return Err(StoreError::NotFound(format!("claim {}", verdict.claim_id)));
        }
        let key_evidence_json = serde_json::to_string(
            &verdict
                .key_evidence
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>(),
        )
        .map_err(|e| StoreError::InvalidData(e.to_string()))?;
        self.conn.execute(
            "INSERT INTO verdicts (id, claim_id, label, probability_true, evidence_strength,
                                   key_evidence, reasoning, invalidation_trigger, model_version, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                verdict.id.to_string(),
                verdict.claim_id.to_string(),
                verdict.label.as_str(),
                verdict.probability_true,
                verdict.evidence_strength,
                key_evidence_json,
                verdict.reasoning,
                verdict.invalidation_trigger,
                verdict.model_version,
                verdict.created_at as i64,
            ],
        )?;
        Ok(verdict.id)
    }

    fn verdict_history(&self, claim_id: ClaimId) -> Result<Vec<Verdict>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, claim_id, label, probability_true, evidence_strength,
                    key_evidence, reasoning, invalidation_trigger, model_version, created_at
             FROM verdicts WHERE claim_id = ?1 ORDER BY rowid",
        )?;
        let verdicts = stmt
            .query_map(params![claim_id.to_string()], Self::row_to_verdict)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(verdicts)
    }

    fn current_verdict(&self, claim_id: ClaimId) -> Result<Option<Verdict>, Self::Error> {
        let verdict = self
            .conn
            .query_row(
                "SELECT id, claim_id, label, probability_true, evidence_strength,
                        key_evidence, reasoning, invalidation_trigger, model_version, created_at
                 FROM verdicts WHERE claim_id = ?1 ORDER BY rowid DESC LIMIT 1",
                params![claim_id.to_string()],
                Self::row_to_verdict,
            )
            .optional()?;
        Ok(verdict)
    }

    fn put_resolution(&mut self, resolution: Resolution) -> Result<ResolutionId, Self::Error> {
        if self.get_claim(resolution.claim_id)?.is_none() {
            return Err(StoreError::NotFound(format!("claim {}", resolution.claim_id)));
        }
        if self.resolution_for_claim(resolution.claim_id)?.is_some() {
            return Err(StoreError::Duplicate(format!(
                "resolution for claim {}",
                resolution.claim_id
            )));
        }
        self.conn.execute(
            "INSERT INTO resolutions (id, claim_id, outcome, resolved_at, evidence_url, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                resolution.id.to_string(),
                resolution.claim_id.to_string(),
                resolution.outcome.as_str(),
                resolution.resolved_at as i64,
                resolution.evidence_url,
                resolution.notes,
            ],
        )?;
        Ok(resolution.id)
    }

    fn resolution_for_claim(&self, claim_id: ClaimId) -> Result<Option<Resolution>, Self::Error> {
        let resolution = self
            .conn
            .query_row(
                "SELECT id, claim_id, outcome, resolved_at, evidence_url, notes
                 FROM resolutions WHERE claim_id = ?1",
                params![claim_id.to_string()],
                Self::row_to_resolution,
            )
            .optional()?;
        Ok(resolution)
    }

    fn put_source(&mut self, source: Source) -> Result<SourceId, Self::Error> {
        self.conn.execute(
            "INSERT INTO sources (id, source_type, handle, display_name)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                source_type = excluded.source_type,
                handle = excluded.handle,
                display_name = excluded.display_name",
            params![
                source.id.to_string(),
                source.source_type.as_str(),
                source.handle,
                source.display_name,
            ],
        )?;
        Ok(source.id)
    }

    fn get_source(&self, id: SourceId) -> Result<Option<Source>, Self::Error> {
        let source = self
            .conn
            .query_row(
                "SELECT id, source_type, handle, display_name FROM sources WHERE id = ?1",
                params![id.to_string()],
                Self::row_to_source,
            )
            .optional()?;
        Ok(source)
    }

    fn list_sources(&self) -> Result<Vec<Source>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, source_type, handle, display_name FROM sources ORDER BY id")?;
        let sources = stmt
            .query_map([], Self::row_to_source)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sources)
    }

    fn append_source_score(&mut self, score: SourceScore) -> Result<(), Self::Error> {
        if self.get_source(score.source_id)?.is_none() {
            return Err(StoreError::NotFound(format!("source {}", score.source_id)));
        }
        self.conn.execute(
            "INSERT INTO source_scores (source_id, track_record, method_discipline, sample_size,
                                        interval_lower, interval_upper, score_version, computed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                score.source_id.to_string(),
                score.track_record,
                score.method_discipline,
                score.sample_size as i64,
                score.interval.0,
                score.interval.1,
                score.score_version as i64,
                score.computed_at as i64,
            ],
        )?;
        Ok(())
    }

    fn latest_source_score(
        &self,
        source_id: SourceId,
    ) -> Result<Option<SourceScore>, Self::Error> {
        let score = self
            .conn
            .query_row(
                "SELECT source_id, track_record, method_discipline, sample_size,
                        interval_lower, interval_upper, score_version, computed_at
                 FROM source_scores WHERE source_id = ?1 ORDER BY rowid DESC LIMIT 1",
                params![source_id.to_string()],
                Self::row_to_score,
            )
            .optional()?;
        Ok(score)
    }

    fn append_outcome(&mut self, outcome: ResolvedOutcome) -> Result<(), Self::Error> {
        if self.get_source(outcome.source_id)?.is_none() {
            return Err(StoreError::NotFound(format!("source {}", outcome.source_id)));
        }
        self.conn.execute(
            "INSERT INTO outcomes (claim_id, source_id, outcome, verdict_agreed, had_primary_evidence, resolved_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                outcome.claim_id.to_string(),
                outcome.source_id.to_string(),
                outcome.outcome.as_str(),
                outcome.verdict_agreed.map(|v| v as i64),
                outcome.had_primary_evidence as i64,
                outcome.resolved_at as i64,
            ],
        )?;
        Ok(())
    }

    fn outcomes_for_source(
        &self,
        source_id: SourceId,
    ) -> Result<Vec<ResolvedOutcome>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT claim_id, source_id, outcome, verdict_agreed, had_primary_evidence, resolved_at
             FROM outcomes WHERE source_id = ?1 ORDER BY rowid",
        )?;
        let outcomes = stmt
            .query_map(params![source_id.to_string()], Self::row_to_outcome)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(outcomes)
    }
}
