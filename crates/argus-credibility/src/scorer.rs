//! Shrinkage-based credibility scoring

use crate::config::ScorerConfig;
use argus_domain::{ResolvedOutcome, SourceId, SourceScore};
use tracing::debug;

/// Computes versioned credibility snapshots from resolved-claim history
///
/// Track record is a Bayesian-shrinkage estimate: the raw accuracy ratio
/// is pulled toward the population prior with strength inversely
/// proportional to sample size. Method discipline is a separate signal
/// (primary-evidence usage), not a restatement of accuracy.
#[derive(Debug, Clone, Default)]
pub struct CredibilityScorer {
    config: ScorerConfig,
}

impl CredibilityScorer {
    /// Create a scorer with the given configuration
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    /// Create a scorer with default configuration
    pub fn default_config() -> Self {
        Self::new(ScorerConfig::default())
    }

    /// Score one source from its full resolved-outcome history
    ///
    /// Pure and idempotent: the same history and timestamp always produce
    /// the same snapshot. Unresolved outcomes contribute to method
    /// discipline (the claim was still asserted and evidenced) but are
    /// excluded from the accuracy sample.
    pub fn score(
        &self,
        source_id: SourceId,
        history: &[ResolvedOutcome],
        computed_at: u64,
    ) -> SourceScore {
        let signals: Vec<f64> = history
            .iter()
            .filter_map(|o| o.outcome.accuracy_signal())
            .collect();
        let n = signals.len();
        let accuracy_sum: f64 = signals.iter().sum();

        let kappa = self.config.prior_weight;
        let shrunk =
            (accuracy_sum + kappa * self.config.prior_mean) / (n as f64 + kappa);

        let discipline_n = history.len();
        let primary_count = history.iter().filter(|o| o.had_primary_evidence).count();
        let discipline = (primary_count as f64 + kappa * self.config.discipline_prior)
            / (discipline_n as f64 + kappa);

        let half_width = self.config.interval_z
            * (shrunk * (1.0 - shrunk) / (n as f64 + kappa)).sqrt()
            * 100.0;
        let track_record = shrunk * 100.0;
        let interval = (
            (track_record - half_width).max(0.0),
            (track_record + half_width).min(100.0),
        );

        debug!(
            source_id = %source_id,
            sample = n,
            track_record,
            "Computed credibility snapshot"
        );

        SourceScore {
            source_id,
            track_record,
            method_discipline: discipline * 100.0,
            sample_size: n,
            interval,
            score_version: self.config.score_version,
            computed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_domain::{ClaimId, Outcome};

    fn outcome(source_id: SourceId, outcome: Outcome, had_primary: bool) -> ResolvedOutcome {
        ResolvedOutcome {
            claim_id: ClaimId::new(),
            source_id,
            outcome,
            verdict_agreed: Some(true),
            had_primary_evidence: had_primary,
            resolved_at: 1_700_000_000,
        }
    }

    fn history(source_id: SourceId, correct: usize, total: usize) -> Vec<ResolvedOutcome> {
        (0..total)
            .map(|i| {
                outcome(
                    source_id,
                    if i < correct { Outcome::True } else { Outcome::False },
                    i % 2 == 0,
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_history_sits_at_prior() {
        let scorer = CredibilityScorer::default_config();
        let source_id = SourceId::new();

        let score = scorer.score(source_id, &[], 1_700_000_000);
        assert_eq!(score.sample_size, 0);
        assert!((score.track_record - 50.0).abs() < 1e-9);
        assert!((score.method_discipline - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_small_sample_shrinks_toward_prior() {
        // Both sources have an 80% raw ratio; the small sample must land
        // strictly closer to the 50% prior
        let scorer = CredibilityScorer::default_config();
        let small_source = SourceId::new();
        let large_source = SourceId::new();

        let small = scorer.score(small_source, &history(small_source, 4, 5), 1_700_000_000);
        let large = scorer.score(large_source, &history(large_source, 160, 200), 1_700_000_000);

        assert_ne!(small.track_record, large.track_record);

        let prior = 50.0;
        assert!(
            (small.track_record - prior).abs() < (large.track_record - prior).abs(),
            "small sample {} should be closer to prior than large sample {}",
            small.track_record,
            large.track_record
        );
    }

    #[test]
    fn test_interval_wider_for_small_sample() {
        let scorer = CredibilityScorer::default_config();
        let small_source = SourceId::new();
        let large_source = SourceId::new();

        let small = scorer.score(small_source, &history(small_source, 4, 5), 1_700_000_000);
        let large = scorer.score(large_source, &history(large_source, 160, 200), 1_700_000_000);

        let small_width = small.interval.1 - small.interval.0;
        let large_width = large.interval.1 - large.interval.0;
        assert!(small_width > large_width);
    }

    #[test]
    fn test_partially_true_counts_half() {
        let scorer = CredibilityScorer::default_config();
        let source_id = SourceId::new();
        let history = vec![
            outcome(source_id, Outcome::True, true),
            outcome(source_id, Outcome::PartiallyTrue, true),
        ];

        let score = scorer.score(source_id, &history, 1_700_000_000);
        // (1.0 + 0.5 + 10 * 0.5) / (2 + 10) = 0.541..
        assert!((score.track_record - 54.1666).abs() < 0.01);
        assert_eq!(score.sample_size, 2);
    }

    #[test]
    fn test_unresolved_excluded_from_accuracy_but_not_discipline() {
        let scorer = CredibilityScorer::default_config();
        let source_id = SourceId::new();
        let history = vec![
            outcome(source_id, Outcome::True, true),
            outcome(source_id, Outcome::Unresolved, false),
        ];

        let score = scorer.score(source_id, &history, 1_700_000_000);
        assert_eq!(score.sample_size, 1);
        // Discipline denominator still counts both entries:
        // (1 + 10 * 0.5) / (2 + 10) = 0.5
        assert!((score.method_discipline - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_discipline_independent_of_accuracy() {
        // Perfectly accurate source with no primary evidence vs. an
        // inaccurate source that always cites primary material
        let scorer = CredibilityScorer::default_config();
        let sloppy = SourceId::new();
        let rigorous = SourceId::new();

        let sloppy_history: Vec<_> =
            (0..20).map(|_| outcome(sloppy, Outcome::True, false)).collect();
        let rigorous_history: Vec<_> =
            (0..20).map(|_| outcome(rigorous, Outcome::False, true)).collect();

        let sloppy_score = scorer.score(sloppy, &sloppy_history, 1_700_000_000);
        let rigorous_score = scorer.score(rigorous, &rigorous_history, 1_700_000_000);

        assert!(sloppy_score.track_record > rigorous_score.track_record);
        assert!(sloppy_score.method_discipline < rigorous_score.method_discipline);
    }

    #[test]
    fn test_rescoring_is_idempotent() {
        let scorer = CredibilityScorer::default_config();
        let source_id = SourceId::new();
        let history = history(source_id, 7, 10);

        let first = scorer.score(source_id, &history, 1_700_000_000);
        let second = scorer.score(source_id, &history, 1_700_000_000);
        assert_eq!(first, second);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use argus_domain::{ClaimId, Outcome};
    use proptest::prelude::*;

    fn make_history(source_id: SourceId, correct: usize, total: usize) -> Vec<ResolvedOutcome> {
        (0..total)
            .map(|i| ResolvedOutcome {
                claim_id: ClaimId::new(),
                source_id,
                outcome: if i < correct { Outcome::True } else { Outcome::False },
                verdict_agreed: None,
                had_primary_evidence: false,
                resolved_at: 1_700_000_000,
            })
            .collect()
    }

    proptest! {
        /// Property: track record and interval stay within [0, 100]
        #[test]
        fn test_score_bounds(correct in 0usize..50, extra in 0usize..50) {
            let total = correct + extra;
            let scorer = CredibilityScorer::default_config();
            let source_id = SourceId::new();

            let score = scorer.score(source_id, &make_history(source_id, correct, total), 0);

            prop_assert!((0.0..=100.0).contains(&score.track_record));
            prop_assert!((0.0..=100.0).contains(&score.interval.0));
            prop_assert!((0.0..=100.0).contains(&score.interval.1));
            prop_assert!(score.interval.0 <= score.track_record);
            prop_assert!(score.track_record <= score.interval.1);
        }

        /// Property: at a fixed raw ratio, a larger sample is never closer
        /// to the prior than a smaller one
        #[test]
        fn test_shrinkage_monotone_in_sample_size(multiplier in 2usize..20) {
            let scorer = CredibilityScorer::default_config();
            let source_id = SourceId::new();

            // Raw ratio fixed at 3/4
            let small = scorer.score(source_id, &make_history(source_id, 3, 4), 0);
            let large = scorer.score(
                source_id,
                &make_history(source_id, 3 * multiplier, 4 * multiplier),
                0,
            );

            let prior = 50.0;
            prop_assert!(
                (small.track_record - prior).abs() <= (large.track_record - prior).abs(),
                "small {} large {}", small.track_record, large.track_record
            );
        }
    }
}
