//! Core retriever implementation

use crate::config::RetrieverConfig;
use crate::grader::EvidenceGrader;
use argus_domain::traits::EvidenceSearch;
use argus_domain::{Claim, EvidenceId, EvidenceItem, Stance};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, warn};

/// The retriever finds, grades, and stance-classifies evidence for a claim
pub struct EvidenceRetriever<B>
where
    B: EvidenceSearch,
{
    backend: Arc<B>,
    grader: EvidenceGrader,
    config: RetrieverConfig,
}

impl<B> EvidenceRetriever<B>
where
    B: EvidenceSearch + Send + Sync + 'static,
    B::Error: std::fmt::Display,
{
    /// Create a new retriever over a search backend
    pub fn new(backend: Arc<B>, config: RetrieverConfig) -> Self {
        Self {
            backend,
            grader: EvidenceGrader::new(),
            config,
        }
    }

    /// Replace the default grader
    pub fn with_grader(mut self, grader: EvidenceGrader) -> Self {
        self.grader = grader;
        self
    }

    /// Retrieve graded evidence for one claim
    ///
    /// Backend failure or timeout degrades to an empty list; the verdict
    /// synthesizer handles zero evidence as its lowest-confidence branch.
    pub async fn retrieve(&self, claim: &Claim, now: u64) -> Vec<EvidenceItem> {
        let hits = match timeout(
            self.config.search_timeout(),
            self.backend.search(&claim.text, &claim.assets),
        )
        .await
        {
            Ok(Ok(hits)) => hits,
            Ok(Err(e)) => {
                warn!(claim_id = %claim.id, "Evidence search failed: {}", e);
                return Vec::new();
            }
            Err(_) => {
                warn!(claim_id = %claim.id, "Evidence search timed out");
                return Vec::new();
            }
        };

        debug!(claim_id = %claim.id, hits = hits.len(), "Grading search hits");

        let mut evidence: Vec<EvidenceItem> = hits
            .into_iter()
            .take(self.config.max_evidence)
            .map(|hit| {
                let grade = self.grader.grade(&hit);
                let stance = self.grader.stance(&hit);
                EvidenceItem {
                    id: EvidenceId::new(),
                    claim_id: claim.id,
                    url: hit.url,
                    publisher: hit.publisher,
                    excerpt: hit.excerpt,
                    stance,
                    grade,
                    primary: false,
                    retrieved_at: now,
                }
            })
            .collect();

        mark_primary(&mut evidence);
        evidence
    }
}

/// Flag the single strongest opinionated item as the canonical citation
///
/// Strongest = highest grade weight among supports/contradicts; ties go to
/// the earliest-retrieved item. Mentions never carry the flag.
fn mark_primary(evidence: &mut [EvidenceItem]) {
    let best = evidence
        .iter()
        .enumerate()
        .filter(|(_, e)| e.stance != Stance::Mentions)
        .max_by(|(ia, a), (ib, b)| {
            a.grade
                .weight()
                .partial_cmp(&b.grade.weight())
                .unwrap_or(std::cmp::Ordering::Equal)
                // On equal weight prefer the earlier index
                .then(ib.cmp(ia))
        })
        .map(|(i, _)| i);

    if let Some(i) = best {
        evidence[i].primary = true;
    }
}
