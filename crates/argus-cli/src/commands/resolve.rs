//! Manual resolution command

use super::{current_timestamp, parse_claim_id, CliPipeline};
use crate::cli::ResolveArgs;
use crate::error::CliError;
use crate::output::Formatter;
use argus_resolver::{ResolutionEngine, ResolverConfig};

/// Record an explicit ground-truth resolution for a claim
pub fn execute_resolve(
    args: ResolveArgs,
    pipeline: &CliPipeline,
    formatter: &Formatter,
) -> Result<(), CliError> {
    let claim_id = parse_claim_id(&args.claim_id)?;
    let engine = ResolutionEngine::new(ResolverConfig::default());

    let store = pipeline.store();
    let mut store = store
        .lock()
        .map_err(|e| CliError::Store(format!("store lock poisoned: {}", e)))?;

    let resolution = engine.resolve_manual(
        &mut *store,
        claim_id,
        args.outcome.into(),
        args.url,
        args.notes,
        current_timestamp(),
    )?;

    formatter.success(&format!(
        "claim {} resolved as {}",
        claim_id,
        resolution.outcome.as_str()
    ));
    Ok(())
}
