//! Source module - publisher entities and their credibility snapshots

use crate::ids::SourceId;

/// What kind of entity a source is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    /// News outlet
    Outlet,
    /// Individual influencer/analyst handle
    Influencer,
    /// Official project/protocol channel
    Project,
    /// Government or regulatory body
    Regulator,
    /// Content aggregator
    Aggregator,
    /// On-chain data provider
    Onchain,
}

impl SourceType {
    /// Get the source type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Outlet => "outlet",
            SourceType::Influencer => "influencer",
            SourceType::Project => "project",
            SourceType::Regulator => "regulator",
            SourceType::Aggregator => "aggregator",
            SourceType::Onchain => "onchain",
        }
    }

    /// Parse a source type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "outlet" => Some(SourceType::Outlet),
            "influencer" => Some(SourceType::Influencer),
            "project" => Some(SourceType::Project),
            "regulator" => Some(SourceType::Regulator),
            "aggregator" => Some(SourceType::Aggregator),
            "onchain" => Some(SourceType::Onchain),
            _ => None,
        }
    }
}

/// A publisher/handle/regulator entity whose assertions get tracked
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// Unique identifier
    pub id: SourceId,

    /// Entity kind
    pub source_type: SourceType,

    /// Handle or domain (e.g. "sec.gov", "@cryptoleaks")
    pub handle: String,

    /// Human-readable name
    pub display_name: String,
}

impl Source {
    /// Create a new source
    pub fn new(
        id: SourceId,
        source_type: SourceType,
        handle: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            source_type,
            handle: handle.into(),
            display_name: display_name.into(),
        }
    }
}

/// A versioned, point-in-time credibility snapshot for a source
///
/// Snapshots are append-only; "current" is the latest by `computed_at`.
/// Re-scoring with the same history produces an identical snapshot apart
/// from `computed_at`, so nightly re-runs are safe.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceScore {
    /// The source this snapshot describes
    pub source_id: SourceId,

    /// Shrinkage-adjusted historical accuracy [0, 100]
    pub track_record: f64,

    /// Evidentiary process quality, independent of accuracy [0, 100]
    pub method_discipline: f64,

    /// Number of resolved claims contributing to the estimate
    pub sample_size: usize,

    /// Confidence interval on the track record, [lower, upper] in [0, 100]
    pub interval: (f64, f64),

    /// Version of the scoring formula that produced this snapshot
    pub score_version: u32,

    /// When this snapshot was computed (seconds since Unix epoch)
    pub computed_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_type_parse() {
        assert_eq!(SourceType::parse("regulator"), Some(SourceType::Regulator));
        assert_eq!(SourceType::parse("OUTLET"), Some(SourceType::Outlet));
        assert_eq!(SourceType::parse("blog"), None);
    }

    #[test]
    fn test_source_builder() {
        let source = Source::new(SourceId::new(), SourceType::Regulator, "sec.gov", "SEC");
        assert_eq!(source.handle, "sec.gov");
        assert_eq!(source.display_name, "SEC");
    }
}
