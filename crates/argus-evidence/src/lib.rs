//! Argus Evidence Retriever/Grader
//!
//! Given a claim, finds candidate corroborating/refuting material through a
//! pluggable search backend, then grades each hit on the A-D evidence
//! ladder and classifies its stance independently of grade.
//!
//! Retrieval failure is never fatal: an unavailable backend degrades to an
//! empty evidence list so verdict synthesis can still proceed.

pub mod config;
pub mod error;
pub mod grader;
pub mod retriever;
pub mod search;

pub use config::RetrieverConfig;
pub use error::EvidenceError;
pub use grader::{EvidenceGrader, PublisherRegistry};
pub use retriever::EvidenceRetriever;
pub use search::{SearchDoc, StaticSearchBackend};
