//! Keyword-corpus search backend
//!
//! The default `EvidenceSearch` implementation: an in-memory corpus scored
//! by term overlap with the claim text and asset symbols. Any semantic or
//! web-backed search service can replace it behind the same trait.

use crate::error::EvidenceError;
use argus_domain::traits::{EvidenceSearch, SearchHit};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Excerpt length taken from a matching document (characters)
const EXCERPT_LEN: usize = 300;

/// One document in the search corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDoc {
    /// Where the material lives
    pub url: String,

    /// Who published it
    pub publisher: String,

    /// Full text of the material
    pub text: String,

    /// When the material was published (seconds since Unix epoch)
    pub published_at: Option<u64>,
}

/// In-memory keyword search over a fixed corpus
#[derive(Debug, Default)]
pub struct StaticSearchBackend {
    docs: Vec<SearchDoc>,
    max_results: usize,
}

impl StaticSearchBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self {
            docs: Vec::new(),
            max_results: 10,
        }
    }

    /// Create a backend over the given corpus
    pub fn with_docs(docs: Vec<SearchDoc>) -> Self {
        Self {
            docs,
            max_results: 10,
        }
    }

    /// Set the maximum number of hits returned per query
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Add a document to the corpus
    pub fn add_doc(&mut self, doc: SearchDoc) {
        self.docs.push(doc);
    }

    /// Number of documents in the corpus
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn score(doc: &SearchDoc, terms: &[String], assets: &[String]) -> usize {
        let text = doc.text.to_lowercase();
        let mut score = 0;
        for term in terms {
            if text.contains(term.as_str()) {
                score += 1;
            }
        }
        for asset in assets {
            if text.contains(&asset.to_lowercase()) {
                // Asset symbol hits are stronger relevance signals than
                // ordinary term overlap
                score += 2;
            }
        }
        score
    }
}

/// Lowercased terms of at least three characters, punctuation stripped
fn query_terms(claim_text: &str) -> Vec<String> {
    claim_text
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| w.len() >= 3)
        .collect()
}

fn excerpt(text: &str) -> String {
    if text.len() <= EXCERPT_LEN {
        return text.to_string();
    }
    let mut out: String = text.chars().take(EXCERPT_LEN).collect();
    out.push_str("...");
    out
}

#[async_trait]
impl EvidenceSearch for StaticSearchBackend {
    type Error = EvidenceError;

    async fn search(
        &self,
        claim_text: &str,
        assets: &[String],
    ) -> Result<Vec<SearchHit>, Self::Error> {
        let terms = query_terms(claim_text);

        let mut scored: Vec<(usize, &SearchDoc)> = self
            .docs
            .iter()
            .map(|doc| (Self::score(doc, &terms, assets), doc))
            .filter(|(score, _)| *score > 0)
            .collect();

        // Highest score first; stable sort keeps corpus order for ties
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.truncate(self.max_results);

        Ok(scored
            .into_iter()
            .map(|(_, doc)| SearchHit {
                url: doc.url.clone(),
                publisher: doc.publisher.clone(),
                excerpt: excerpt(&doc.text),
                published_at: doc.published_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> StaticSearchBackend {
        StaticSearchBackend::with_docs(vec![
            SearchDoc {
                url: "https://sec.example.gov/press/1".to_string(),
                publisher: "sec.gov".to_string(),
                text: "The Commission announced charges against Exchange Y for operating an unregistered securities exchange".to_string(),
                published_at: Some(1_700_000_000),
            },
            SearchDoc {
                url: "https://cryptobuzz.example/hot".to_string(),
                publisher: "@cryptobuzz".to_string(),
                text: "Dogwifhat to the moon! No exchange drama here".to_string(),
                published_at: None,
            },
            SearchDoc {
                url: "https://explorer.example/tx/0xabc".to_string(),
                publisher: "etherscan.io".to_string(),
                text: "Transfer of 45,000,000 USDC from Protocol X treasury to unknown wallet".to_string(),
                published_at: Some(1_700_000_100),
            },
        ])
    }

    #[tokio::test]
    async fn test_search_matches_by_terms() {
        let backend = corpus();
        let hits = backend
            .search("The SEC announced charges against Exchange Y", &[])
            .await
            .unwrap();

        assert!(!hits.is_empty());
        assert_eq!(hits[0].publisher, "sec.gov");
    }

    #[tokio::test]
    async fn test_search_boosts_asset_symbols() {
        let backend = corpus();
        let hits = backend
            .search("large transfer from treasury", &["USDC".to_string()])
            .await
            .unwrap();

        assert!(!hits.is_empty());
        assert_eq!(hits[0].publisher, "etherscan.io");
    }

    #[tokio::test]
    async fn test_search_no_match_returns_empty() {
        let backend = corpus();
        let hits = backend.search("zzz qqq xxx", &[]).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_max_results_respected() {
        let mut backend = StaticSearchBackend::new().with_max_results(1);
        for i in 0..5 {
            backend.add_doc(SearchDoc {
                url: format!("https://example.com/{}", i),
                publisher: "example.com".to_string(),
                text: "bitcoin price prediction".to_string(),
                published_at: None,
            });
        }

        let hits = backend.search("bitcoin price", &[]).await.unwrap();
        assert_eq!(hits.len(), 1);
    }
}
