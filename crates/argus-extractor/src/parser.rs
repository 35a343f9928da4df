//! Parse LLM output into claim candidates
//!
//! The model's output is untrusted: JSON may be wrapped in markdown code
//! fences, enum values may be invented, and numeric scores may be out of
//! range. Everything is normalized here, at the boundary, so downstream
//! stages never see an unclamped score or an open-ended type string.

use crate::error::ExtractorError;
use crate::types::{ClaimCandidate, ExtractionFailure};
use argus_domain::{ClaimType, ResolutionKind};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// One candidate as the model emits it, before normalization
#[derive(Debug, Deserialize)]
struct RawCandidate {
    text: String,
    #[serde(default)]
    claim_type: String,
    #[serde(default)]
    assets: Vec<String>,
    #[serde(default)]
    asserted_at: Option<u64>,
    #[serde(default)]
    resolution_type: String,
    #[serde(default)]
    resolve_by: Option<u64>,
    #[serde(default)]
    falsifiability: f64,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    notes: Option<String>,
}

/// Parse LLM JSON response into claim candidates
///
/// Returns the candidates that parsed and validated plus a record of the
/// fragments that did not. A malformed top-level response is an error the
/// caller downgrades to "no claims extracted".
pub fn parse_llm_response(
    response: &str,
) -> Result<(Vec<ClaimCandidate>, Vec<ExtractionFailure>), ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| ExtractorError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let array = json
        .as_array()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON array".to_string()))?;

    let mut candidates = Vec::new();
    let mut failures = Vec::new();
    for (idx, candidate_json) in array.iter().enumerate() {
        match parse_candidate(candidate_json) {
            Ok(candidate) => {
                if let Err(e) = candidate.validate() {
                    warn!("Candidate {} failed validation: {}", idx, e);
                    failures.push(ExtractionFailure {
                        reason: e,
                        raw_fragment: candidate_json.to_string(),
                    });
                    continue;
                }
                candidates.push(candidate);
            }
            Err(e) => {
                warn!("Failed to parse candidate {}: {}", idx, e);
                failures.push(ExtractionFailure {
                    reason: e,
                    raw_fragment: candidate_json.to_string(),
                });
            }
        }
    }

    Ok((candidates, failures))
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```json") || trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip first line (```json or ```) and last line (```)
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse and normalize a single candidate
fn parse_candidate(json: &Value) -> Result<ClaimCandidate, String> {
    let raw: RawCandidate =
        serde_json::from_value(json.clone()).map_err(|e| format!("schema mismatch: {}", e))?;

    Ok(ClaimCandidate {
        text: raw.text,
        claim_type: ClaimType::coerce(&raw.claim_type),
        assets: raw
            .assets
            .into_iter()
            .map(|a| a.trim().to_uppercase())
            .filter(|a| !a.is_empty())
            .collect(),
        asserted_at: raw.asserted_at,
        resolution_kind: ResolutionKind::coerce(&raw.resolution_type),
        resolve_by: raw.resolve_by,
        falsifiability: raw.falsifiability.clamp(0.0, 1.0),
        initial_confidence: raw.confidence.clamp(0.0, 1.0),
        notes: raw.notes,
    })
}
