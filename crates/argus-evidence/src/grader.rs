//! Grading and stance classification for search hits
//!
//! Grade and stance are independent judgments: grade reflects who
//! published the material and how it is sourced, stance reflects what the
//! excerpt says about the claim.

use argus_domain::traits::SearchHit;
use argus_domain::{Grade, Stance};

/// Publisher tier lists used for grading
///
/// Matching is by substring against the lowercased publisher, so
/// "sec.gov" covers "www.sec.gov" press pages as well.
#[derive(Debug, Clone)]
pub struct PublisherRegistry {
    /// Regulators and government bodies (grade A)
    pub regulators: Vec<String>,

    /// Official project/protocol channels (grade A)
    pub official_channels: Vec<String>,

    /// On-chain data providers (grade A)
    pub onchain_providers: Vec<String>,

    /// Reputable secondary outlets (grade B when citing a primary source)
    pub reputable_outlets: Vec<String>,

    /// Known aggregators (grade C)
    pub aggregators: Vec<String>,
}

impl Default for PublisherRegistry {
    fn default() -> Self {
        Self {
            regulators: vec![
                "sec.gov".to_string(),
                "cftc.gov".to_string(),
                "justice.gov".to_string(),
                "treasury.gov".to_string(),
                "esma.europa.eu".to_string(),
                "fca.org.uk".to_string(),
            ],
            official_channels: vec![
                "blog.ethereum.org".to_string(),
                "bitcoincore.org".to_string(),
                "github.com".to_string(),
            ],
            onchain_providers: vec![
                "etherscan.io".to_string(),
                "blockchair.com".to_string(),
                "solscan.io".to_string(),
                "mempool.space".to_string(),
            ],
            reputable_outlets: vec![
                "reuters.com".to_string(),
                "bloomberg.com".to_string(),
                "coindesk.com".to_string(),
                "theblock.co".to_string(),
            ],
            aggregators: vec![
                "cryptopanic.com".to_string(),
                "coinmarketcal.com".to_string(),
                "newsnow".to_string(),
            ],
        }
    }
}

impl PublisherRegistry {
    fn matches(list: &[String], publisher: &str) -> bool {
        list.iter().any(|entry| publisher.contains(entry.as_str()))
    }

    /// Whether the publisher is itself a primary/authoritative source
    pub fn is_primary(&self, publisher: &str) -> bool {
        let p = publisher.to_lowercase();
        Self::matches(&self.regulators, &p)
            || Self::matches(&self.official_channels, &p)
            || Self::matches(&self.onchain_providers, &p)
    }

    /// Whether the publisher is a reputable secondary outlet
    pub fn is_reputable(&self, publisher: &str) -> bool {
        Self::matches(&self.reputable_outlets, &publisher.to_lowercase())
    }

    /// Whether the publisher is a known aggregator
    pub fn is_aggregator(&self, publisher: &str) -> bool {
        Self::matches(&self.aggregators, &publisher.to_lowercase())
    }
}

/// Cues in an excerpt suggesting it rests on a primary source
const CITATION_CUES: [&str; 7] = [
    "according to the",
    "court filing",
    "press release",
    "official statement",
    "on-chain data",
    "the regulator said",
    "in a filing",
];

/// Cues that an excerpt is refuting a claim
const CONTRADICTION_CUES: [&str; 10] = [
    "denied",
    "denies",
    "refuted",
    "refutes",
    "debunked",
    "no evidence",
    "not true",
    "dismissed",
    "rejected",
    "false claim",
];

/// Cues that an excerpt is corroborating a claim
const SUPPORT_CUES: [&str; 10] = [
    "confirmed",
    "confirms",
    "announced",
    "verified",
    "corroborated",
    "acknowledged",
    "admitted",
    "charges against",
    "filed suit",
    "transfer of",
];

/// Assigns grades and stances to raw search hits
#[derive(Debug, Clone, Default)]
pub struct EvidenceGrader {
    registry: PublisherRegistry,
}

impl EvidenceGrader {
    /// Create a grader with the default publisher registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grader with a custom publisher registry
    pub fn with_registry(registry: PublisherRegistry) -> Self {
        Self { registry }
    }

    /// Grade one hit on the A-D evidence ladder
    ///
    /// - A: the publisher is itself primary/authoritative
    /// - B: a reputable secondary outlet whose excerpt cites a primary source
    /// - C: aggregator, or secondary reporting without visible sourcing
    /// - D: anonymous/influencer/rumor-tier material
    pub fn grade(&self, hit: &SearchHit) -> Grade {
        if self.registry.is_primary(&hit.publisher) {
            return Grade::A;
        }
        if self.registry.is_reputable(&hit.publisher) {
            if cites_primary(&hit.excerpt) {
                return Grade::B;
            }
            return Grade::C;
        }
        if self.registry.is_aggregator(&hit.publisher) {
            return Grade::C;
        }
        Grade::D
    }

    /// Classify the stance one hit takes on the claim
    ///
    /// Contradiction cues win over support cues: a denial usually repeats
    /// the claim's own wording.
    pub fn stance(&self, hit: &SearchHit) -> Stance {
        let excerpt = hit.excerpt.to_lowercase();
        if CONTRADICTION_CUES.iter().any(|cue| excerpt.contains(cue)) {
            return Stance::Contradicts;
        }
        if SUPPORT_CUES.iter().any(|cue| excerpt.contains(cue)) {
            return Stance::Supports;
        }
        Stance::Mentions
    }
}

fn cites_primary(excerpt: &str) -> bool {
    let excerpt = excerpt.to_lowercase();
    CITATION_CUES.iter().any(|cue| excerpt.contains(cue))
}
