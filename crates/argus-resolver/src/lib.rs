//! Argus Resolution Engine
//!
//! Manages the claim lifecycle state machine
//! (`unreviewed -> reviewed -> resolved`), decides when claims auto-resolve,
//! records ground-truth resolutions, and feeds resolved outcomes back to
//! the credibility scorer's input history. That feedback is the only path
//! by which the scorer's sample grows.
//!
//! `resolved` is terminal. The correction path creates a new claim record
//! referencing the old one; settled ground truth is never rewritten.

pub mod config;
pub mod engine;
pub mod error;

pub use config::ResolverConfig;
pub use engine::ResolutionEngine;
pub use error::ResolverError;
