//! Argus Credibility Scorer
//!
//! Aggregates a source's resolved-claim history into a versioned
//! credibility snapshot: a Bayesian-shrinkage track record, a separate
//! method-discipline signal, and a sample-size-aware confidence interval.
//!
//! Scoring is a pure function of (source, history, time): re-running a
//! nightly batch with the same history produces the same numbers, so
//! snapshots can be recomputed freely without double-counting.

pub mod config;
pub mod scorer;

pub use config::ScorerConfig;
pub use scorer::CredibilityScorer;
