//! Request and response types for extraction

use argus_domain::{ClaimType, ItemId, ResolutionKind};

/// A structured claim candidate parsed from LLM output
///
/// Numeric fields arrive pre-clamped to [0, 1]; enum fields arrive
/// pre-coerced to the closed taxonomy. The candidate is not yet a `Claim`
/// because the orchestrator owns id assignment and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimCandidate {
    /// The assertion, phrased as a single falsifiable statement
    pub text: String,

    /// Taxonomy type (unrecognized values coerced to misc_claim)
    pub claim_type: ClaimType,

    /// Asset symbols the claim is about
    pub assets: Vec<String>,

    /// When the assertion was made, if the model extracted a time
    pub asserted_at: Option<u64>,

    /// How the claim is expected to reach ground truth
    pub resolution_kind: ResolutionKind,

    /// Deadline by which a scheduled claim should be resolvable
    pub resolve_by: Option<u64>,

    /// How falsifiable the claim is [0, 1]
    pub falsifiability: f64,

    /// The model's initial confidence that the claim is true [0, 1]
    pub initial_confidence: f64,

    /// Free-text notes from the model
    pub notes: Option<String>,
}

impl ClaimCandidate {
    /// Validate that the candidate has the fields downstream stages need
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("text is empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.falsifiability) {
            return Err(format!(
                "falsifiability {} out of range [0.0, 1.0]",
                self.falsifiability
            ));
        }
        if !(0.0..=1.0).contains(&self.initial_confidence) {
            return Err(format!(
                "initial_confidence {} out of range [0.0, 1.0]",
                self.initial_confidence
            ));
        }
        if self.resolution_kind == ResolutionKind::Scheduled && self.resolve_by.is_none() {
            return Err("scheduled claim has no resolve_by".to_string());
        }
        Ok(())
    }
}

/// Information about a candidate that failed to parse
#[derive(Debug, Clone)]
pub struct ExtractionFailure {
    /// Reason for failure
    pub reason: String,

    /// Raw fragment that failed to parse
    pub raw_fragment: String,
}

/// Metadata about an extraction operation
#[derive(Debug, Clone)]
pub struct ExtractionMetadata {
    /// The item extraction ran on
    pub item_id: ItemId,

    /// Timestamp when extraction occurred
    pub timestamp: u64,

    /// Model/prompt version used
    pub model_version: String,

    /// Total number of candidates the model emitted
    pub candidates_attempted: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// Whether the generic rumor fallback was emitted
    pub used_fallback: bool,
}

/// Result of an extraction operation
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Candidates that parsed and validated
    pub candidates: Vec<ClaimCandidate>,

    /// Candidates that failed to parse or validate
    pub failures: Vec<ExtractionFailure>,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> ClaimCandidate {
        ClaimCandidate {
            text: "The SEC sued Exchange Y".to_string(),
            claim_type: ClaimType::RegulatoryAction,
            assets: vec![],
            asserted_at: None,
            resolution_kind: ResolutionKind::Immediate,
            resolve_by: None,
            falsifiability: 0.9,
            initial_confidence: 0.7,
            notes: None,
        }
    }

    #[test]
    fn test_valid_candidate() {
        assert!(candidate().validate().is_ok());
    }

    #[test]
    fn test_empty_text() {
        let mut c = candidate();
        c.text = "  ".to_string();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_scheduled_without_deadline() {
        let mut c = candidate();
        c.resolution_kind = ResolutionKind::Scheduled;
        c.resolve_by = None;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_confidence_out_of_bounds() {
        let mut c = candidate();
        c.initial_confidence = 1.5;
        assert!(c.validate().is_err());
    }
}
