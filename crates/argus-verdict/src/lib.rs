//! Argus Verdict Synthesizer
//!
//! Combines a claim with its graded evidence into a verdict: a label, a
//! probability-true, an evidence-strength, a reasoning summary, and an
//! invalidation trigger.
//!
//! The label and both scores are deterministic functions of grade/stance
//! counts under a tunable policy; the LLM contributes only the prose. When
//! no provider is configured or the provider fails, a rule-based template
//! produces a structurally identical verdict, so a missing model degrades
//! quality, never availability.

pub mod error;
pub mod policy;
pub mod scoring;
pub mod synthesizer;

pub use error::VerdictError;
pub use policy::VerdictPolicy;
pub use scoring::{decide_label, evidence_strength, probability_true, EvidenceSummary};
pub use synthesizer::VerdictSynthesizer;
