//! Run metrics for pipeline batches

/// Counters for one batch run
///
/// A batch always completes with a summary, whatever happened to the
/// individual units inside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Items fully processed
    pub items_processed: usize,

    /// Items that failed and were skipped
    pub items_failed: usize,

    /// Items skipped as already processed
    pub items_skipped: usize,

    /// Claims created across the run
    pub claims_created: usize,

    /// Evidence items attached across the run
    pub evidence_attached: usize,

    /// Verdicts appended across the run
    pub verdicts_appended: usize,

    /// Claims that reached resolution during the run
    pub claims_resolved: usize,

    /// Claims re-checked during the run
    pub rechecks_run: usize,

    /// Sources re-scored during the run
    pub sources_rescored: usize,

    /// When the run started (seconds since Unix epoch)
    pub started_at: u64,

    /// Total runtime in milliseconds
    pub duration_ms: u64,
}

impl RunSummary {
    /// Create an empty summary stamped with a start time
    pub fn started_at(started_at: u64) -> Self {
        Self {
            started_at,
            ..Default::default()
        }
    }

    /// Total units the run attempted
    pub fn total_items(&self) -> usize {
        self.items_processed + self.items_failed + self.items_skipped
    }

    /// Generate a human-readable report of the run
    pub fn report(&self) -> String {
        let mut lines = vec![
            "Pipeline Run Summary".to_string(),
            "====================".to_string(),
            format!("Items: {} processed, {} failed, {} skipped",
                self.items_processed, self.items_failed, self.items_skipped),
        ];
        if self.claims_created > 0 || self.verdicts_appended > 0 {
            lines.push(format!(
                "Claims: {} created, {} evidence items, {} verdicts, {} resolved",
                self.claims_created,
                self.evidence_attached,
                self.verdicts_appended,
                self.claims_resolved
            ));
        }
        if self.rechecks_run > 0 {
            lines.push(format!("Re-checks: {}", self.rechecks_run));
        }
        if self.sources_rescored > 0 {
            lines.push(format!("Sources re-scored: {}", self.sources_rescored));
        }
        lines.push(format!("Runtime: {}ms", self.duration_ms));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let summary = RunSummary {
            items_processed: 3,
            items_failed: 1,
            items_skipped: 2,
            ..Default::default()
        };
        assert_eq!(summary.total_items(), 6);
    }

    #[test]
    fn test_report_mentions_counts() {
        let summary = RunSummary {
            items_processed: 3,
            items_failed: 1,
            claims_created: 5,
            verdicts_appended: 5,
            duration_ms: 120,
            ..Default::default()
        };
        let report = summary.report();
        assert!(report.contains("3 processed"));
        assert!(report.contains("1 failed"));
        assert!(report.contains("5 created"));
        assert!(report.contains("120ms"));
    }
}
