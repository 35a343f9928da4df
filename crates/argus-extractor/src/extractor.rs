//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use crate::types::{ClaimCandidate, ExtractionMetadata, ExtractionResult};
use argus_domain::traits::CompletionProvider;
use argus_domain::{ClaimType, Item, ResolutionKind};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Falsifiability assigned to the generic rumor fallback claim
const FALLBACK_FALSIFIABILITY: f64 = 0.2;

/// Initial confidence assigned to the generic rumor fallback claim
const FALLBACK_CONFIDENCE: f64 = 0.3;

/// The Extractor converts one content item into structured claim candidates
pub struct ClaimExtractor<P>
where
    P: CompletionProvider,
{
    provider: Arc<P>,
    config: ExtractorConfig,
    model_version: String,
}

impl<P> ClaimExtractor<P>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: std::fmt::Display,
{
    /// Create a new extractor
    pub fn new(provider: Arc<P>, config: ExtractorConfig) -> Self {
        Self {
            provider,
            config,
            model_version: "llm".to_string(),
        }
    }

    /// Create an extractor with a specific model/prompt version label
    pub fn with_model_version(mut self, model_version: impl Into<String>) -> Self {
        self.model_version = model_version.into();
        self
    }

    /// The model/prompt version stamped on extraction metadata
    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    /// Extract claim candidates from one item
    ///
    /// A provider failure or timeout is returned as an error so the caller
    /// can retry; a malformed response degrades to the rumor fallback and
    /// never fails the item.
    pub async fn extract(&self, item: &Item) -> Result<ExtractionResult, ExtractorError> {
        let start_time = SystemTime::now();

        if item.body.trim().is_empty() {
            debug!(item_id = %item.id, "Empty item body, nothing to extract");
            return Ok(ExtractionResult {
                candidates: Vec::new(),
                failures: Vec::new(),
                metadata: self.metadata(item, 0, start_time, false),
            });
        }

        let builder = PromptBuilder::new(item, self.config.max_text_length);
        let system_prompt = builder.system_prompt();
        let user_prompt = builder.user_prompt();

        debug!(item_id = %item.id, prompt_len = user_prompt.len(), "Calling completion provider");

        let response = timeout(
            self.config.extraction_timeout(),
            self.provider.complete(system_prompt, &user_prompt),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)?
        .map_err(|e| ExtractorError::Completion(e.to_string()))?;

        debug!(item_id = %item.id, response_len = response.len(), "Provider responded");

        let (mut candidates, failures) = match parse_llm_response(&response) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Malformed model output is never fatal for the item
                warn!(item_id = %item.id, "Unparseable extraction response: {}", e);
                (Vec::new(), Vec::new())
            }
        };

        let attempted = candidates.len() + failures.len();

        if candidates.len() > self.config.max_claims_per_item {
            warn!(
                item_id = %item.id,
                "Truncating {} candidates to configured max {}",
                candidates.len(),
                self.config.max_claims_per_item
            );
            candidates.truncate(self.config.max_claims_per_item);
        }

        // Every non-empty item must leave a traceable claim record
        let mut used_fallback = false;
        if candidates.is_empty() {
            candidates.push(self.fallback_candidate(item));
            used_fallback = true;
            info!(item_id = %item.id, "No typed claims extracted, emitting rumor fallback");
        }

        info!(
            item_id = %item.id,
            "Extraction complete: {} candidates, {} failures",
            candidates.len(),
            failures.len()
        );

        Ok(ExtractionResult {
            candidates,
            failures,
            metadata: self.metadata(item, attempted, start_time, used_fallback),
        })
    }

    /// The generic rumor-typed claim emitted when no typed claim matched
    fn fallback_candidate(&self, item: &Item) -> ClaimCandidate {
        let text = item
            .title
            .clone()
            .unwrap_or_else(|| summarize(&item.body, 140));

        ClaimCandidate {
            text,
            claim_type: ClaimType::Rumor,
            assets: Vec::new(),
            asserted_at: item.published_at,
            resolution_kind: ResolutionKind::Indefinite,
            resolve_by: None,
            falsifiability: FALLBACK_FALSIFIABILITY,
            initial_confidence: FALLBACK_CONFIDENCE,
            notes: Some("auto-generated fallback for untyped content".to_string()),
        }
    }

    fn metadata(
        &self,
        item: &Item,
        attempted: usize,
        start_time: SystemTime,
        used_fallback: bool,
    ) -> ExtractionMetadata {
        ExtractionMetadata {
            item_id: item.id,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or(Duration::ZERO)
                .as_secs(),
            model_version: self.model_version.clone(),
            candidates_attempted: attempted,
            processing_time_ms: start_time
                .elapsed()
                .unwrap_or(Duration::ZERO)
                .as_millis() as u64,
            used_fallback,
        }
    }
}

/// First `max` chars of the text, on a char boundary, with an ellipsis
fn summarize(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    if trimmed.len() <= max {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(max).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_domain::{ItemId, ItemType, SourceId};
    use argus_llm::MockProvider;

    fn test_item(body: &str) -> Item {
        Item::new(
            ItemId::new(),
            SourceId::new(),
            body.to_string(),
            ItemType::Article,
            1_700_000_000,
            "hash".to_string(),
        )
    }

    fn extractor(response: &str) -> ClaimExtractor<MockProvider> {
        ClaimExtractor::new(
            Arc::new(MockProvider::new(response)),
            ExtractorConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_extract_typed_claims() {
        let response = r#"[
            {
                "text": "Protocol X lost $45M in an exploit",
                "claim_type": "exploit_or_hack",
                "assets": ["X"],
                "resolution_type": "immediate",
                "falsifiability": 0.95,
                "confidence": 0.8
            }
        ]"#;
        let extractor = extractor(response);
        let item = test_item("Protocol X was drained of $45 million overnight.");

        let result = extractor.extract(&item).await.unwrap();
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].claim_type, ClaimType::ExploitOrHack);
        assert!(!result.metadata.used_fallback);
    }

    #[tokio::test]
    async fn test_empty_body_yields_nothing() {
        let extractor = extractor("[]");
        let item = test_item("   ");

        let result = extractor.extract(&item).await.unwrap();
        assert!(result.candidates.is_empty());
        assert!(!result.metadata.used_fallback);
    }

    #[tokio::test]
    async fn test_empty_response_yields_rumor_fallback() {
        let extractor = extractor("[]");
        let item = test_item("Big things are coming for this token, trust me.");

        let result = extractor.extract(&item).await.unwrap();
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].claim_type, ClaimType::Rumor);
        assert_eq!(result.candidates[0].falsifiability, FALLBACK_FALSIFIABILITY);
        assert!(result.metadata.used_fallback);
    }

    #[tokio::test]
    async fn test_garbage_response_yields_rumor_fallback() {
        let extractor = extractor("I could not find any claims, sorry!");
        let item = test_item("Validator set doubled last week, sources say.");

        let result = extractor.extract(&item).await.unwrap();
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].claim_type, ClaimType::Rumor);
        assert!(result.metadata.used_fallback);
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let mut provider = MockProvider::default();
        provider.add_error("drained");
        let extractor = ClaimExtractor::new(Arc::new(provider), ExtractorConfig::default());
        let item = test_item("Protocol X was drained of $45 million overnight.");

        let result = extractor.extract(&item).await;
        assert!(matches!(result, Err(ExtractorError::Completion(_))));
    }

    #[tokio::test]
    async fn test_candidates_truncated_to_max() {
        let mut entries = Vec::new();
        for i in 0..15 {
            entries.push(format!(
                r#"{{"text": "claim number {}", "claim_type": "misc_claim",
                    "resolution_type": "indefinite", "falsifiability": 0.5, "confidence": 0.5}}"#,
                i
            ));
        }
        let response = format!("[{}]", entries.join(","));

        let config = ExtractorConfig {
            max_claims_per_item: 10,
            ..Default::default()
        };
        let extractor =
            ClaimExtractor::new(Arc::new(MockProvider::new(response)), config);
        let item = test_item("A very claim-dense article.");

        let result = extractor.extract(&item).await.unwrap();
        assert_eq!(result.candidates.len(), 10);
        assert_eq!(result.metadata.candidates_attempted, 15);
    }
}
