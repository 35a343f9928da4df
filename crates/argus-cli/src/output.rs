//! Table and message formatting for CLI output

use argus_domain::{Claim, Source, SourceScore, Verdict};
use colored::Colorize;
use tabled::{Table, Tabled};

/// Formats entities for terminal display
pub struct Formatter {
    color: bool,
}

#[derive(Tabled)]
struct ClaimRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    claim_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Assets")]
    assets: String,
    #[tabled(rename = "Claim")]
    text: String,
}

#[derive(Tabled)]
struct SourceRow {
    #[tabled(rename = "Handle")]
    handle: String,
    #[tabled(rename = "Type")]
    source_type: String,
    #[tabled(rename = "Track record")]
    track_record: String,
    #[tabled(rename = "Discipline")]
    discipline: String,
    #[tabled(rename = "Sample")]
    sample: String,
}

#[derive(Tabled)]
struct VerdictRow {
    #[tabled(rename = "At")]
    created_at: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "P(true)")]
    probability: String,
    #[tabled(rename = "Strength")]
    strength: String,
    #[tabled(rename = "Model")]
    model: String,
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

impl Formatter {
    /// Create a formatter
    pub fn new(color: bool) -> Self {
        colored::control::set_override(color);
        Self { color }
    }

    /// Whether colored output is enabled
    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", "ok".green().bold(), message);
    }

    /// Print an informational message
    pub fn info(&self, message: &str) {
        println!("{}", message.dimmed());
    }

    /// Render a claims table
    pub fn claims_table(&self, claims: &[Claim]) -> String {
        let rows: Vec<ClaimRow> = claims
            .iter()
            .map(|c| ClaimRow {
                id: c.id.to_string(),
                claim_type: c.claim_type.as_str().to_string(),
                status: c.status.as_str().to_string(),
                assets: c.assets.join(","),
                text: truncate(&c.text, 60),
            })
            .collect();
        Table::new(rows).to_string()
    }

    /// Render a sources table with latest snapshots
    pub fn sources_table(&self, sources: &[(Source, Option<SourceScore>)]) -> String {
        let rows: Vec<SourceRow> = sources
            .iter()
            .map(|(source, score)| SourceRow {
                handle: source.handle.clone(),
                source_type: source.source_type.as_str().to_string(),
                track_record: score
                    .as_ref()
                    .map(|s| format!("{:.1} [{:.1}, {:.1}]", s.track_record, s.interval.0, s.interval.1))
                    .unwrap_or_else(|| "-".to_string()),
                discipline: score
                    .as_ref()
                    .map(|s| format!("{:.1}", s.method_discipline))
                    .unwrap_or_else(|| "-".to_string()),
                sample: score
                    .as_ref()
                    .map(|s| s.sample_size.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            })
            .collect();
        Table::new(rows).to_string()
    }

    /// Render a verdict history table
    pub fn verdicts_table(&self, verdicts: &[Verdict]) -> String {
        let rows: Vec<VerdictRow> = verdicts
            .iter()
            .map(|v| VerdictRow {
                created_at: v.created_at.to_string(),
                label: v.label.as_str().to_string(),
                probability: format!("{:.2}", v.probability_true),
                strength: format!("{:.2}", v.evidence_strength),
                model: v.model_version.clone(),
            })
            .collect();
        Table::new(rows).to_string()
    }

    /// One-line verdict rendering with the reasoning underneath
    pub fn verdict_detail(&self, verdict: &Verdict) -> String {
        let label = match verdict.label {
            argus_domain::VerdictLabel::Verified => verdict.label.as_str().green().bold(),
            argus_domain::VerdictLabel::Misleading => verdict.label.as_str().red().bold(),
            _ => verdict.label.as_str().yellow(),
        };
        format!(
            "{} (p={:.2}, strength={:.2})\n  {}\n  overturned by: {}",
            label,
            verdict.probability_true,
            verdict.evidence_strength,
            verdict.reasoning,
            verdict.invalidation_trigger
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_domain::{
        ClaimId, ClaimStatus, ClaimType, ItemId, ResolutionKind, SourceId, VerdictId, VerdictLabel,
    };

    #[test]
    fn test_claims_table_renders() {
        let formatter = Formatter::new(false);
        let claims = vec![Claim {
            id: ClaimId::new(),
            item_id: ItemId::new(),
            source_id: SourceId::new(),
            text: "Protocol X lost $45M".to_string(),
            claim_type: ClaimType::ExploitOrHack,
            assets: vec!["X".to_string()],
            asserted_at: 0,
            resolution_kind: ResolutionKind::Immediate,
            resolve_by: None,
            falsifiability: 0.9,
            initial_confidence: 0.8,
            status: ClaimStatus::Reviewed,
            corrects: None,
            created_at: 0,
        }];

        let table = formatter.claims_table(&claims);
        assert!(table.contains("exploit_or_hack"));
        assert!(table.contains("reviewed"));
    }

    #[test]
    fn test_verdict_detail_includes_trigger() {
        let formatter = Formatter::new(false);
        let verdict = Verdict {
            id: VerdictId::new(),
            claim_id: ClaimId::new(),
            label: VerdictLabel::Verified,
            probability_true: 0.92,
            evidence_strength: 0.5,
            key_evidence: vec![],
            reasoning: "on-chain data confirms".to_string(),
            invalidation_trigger: "a reversal transaction".to_string(),
            model_version: "test".to_string(),
            created_at: 0,
        };

        let detail = formatter.verdict_detail(&verdict);
        assert!(detail.contains("a reversal transaction"));
        assert!(detail.contains("0.92"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a".repeat(20).as_str(), 10), format!("{}...", "a".repeat(10)));
    }
}
