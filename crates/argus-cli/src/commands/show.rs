//! Read commands: claims, sources, status

use super::{parse_claim_id, CliPipeline};
use crate::cli::ClaimsArgs;
use crate::error::CliError;
use crate::output::Formatter;
use argus_domain::traits::{ClaimFilter, PipelineStore};
use argus_domain::ClaimStatus;

/// List claims, or show one claim's verdict history
pub fn execute_claims(
    args: ClaimsArgs,
    pipeline: &CliPipeline,
    formatter: &Formatter,
) -> Result<(), CliError> {
    let store = pipeline.store();
    let store = store
        .lock()
        .map_err(|e| CliError::Store(format!("store lock poisoned: {}", e)))?;

    if let Some(raw_id) = args.history {
        let claim_id = parse_claim_id(&raw_id)?;
        let history = store
            .verdict_history(claim_id)
            .map_err(|e| CliError::Store(e.to_string()))?;
        if history.is_empty() {
            formatter.info("no verdicts for this claim");
            return Ok(());
        }
        println!("{}", formatter.verdicts_table(&history));
        if let Some(current) = history.last() {
            println!("\ncurrent: {}", formatter.verdict_detail(current));
        }
        return Ok(());
    }

    let claims = store
        .query_claims(&ClaimFilter {
            status: args.status.map(Into::into),
            limit: Some(args.limit),
            ..Default::default()
        })
        .map_err(|e| CliError::Store(e.to_string()))?;

    if claims.is_empty() {
        formatter.info("no claims match");
        return Ok(());
    }
    println!("{}", formatter.claims_table(&claims));
    Ok(())
}

/// List sources with their latest credibility snapshots
pub fn execute_sources(pipeline: &CliPipeline, formatter: &Formatter) -> Result<(), CliError> {
    let store = pipeline.store();
    let store = store
        .lock()
        .map_err(|e| CliError::Store(format!("store lock poisoned: {}", e)))?;

    let sources = store
        .list_sources()
        .map_err(|e| CliError::Store(e.to_string()))?;
    if sources.is_empty() {
        formatter.info("no sources registered");
        return Ok(());
    }

    let mut rows = Vec::new();
    for source in sources {
        let score = store
            .latest_source_score(source.id)
            .map_err(|e| CliError::Store(e.to_string()))?;
        rows.push((source, score));
    }
    println!("{}", formatter.sources_table(&rows));
    Ok(())
}

/// Show pipeline counters
pub fn execute_status(pipeline: &CliPipeline, formatter: &Formatter) -> Result<(), CliError> {
    let store = pipeline.store();
    let store = store
        .lock()
        .map_err(|e| CliError::Store(format!("store lock poisoned: {}", e)))?;

    let items = store
        .list_items()
        .map_err(|e| CliError::Store(e.to_string()))?
        .len();
    let sources = store
        .list_sources()
        .map_err(|e| CliError::Store(e.to_string()))?
        .len();

    let mut by_status = Vec::new();
    for status in [
        ClaimStatus::Unreviewed,
        ClaimStatus::Reviewed,
        ClaimStatus::Resolved,
    ] {
        let count = store
            .query_claims(&ClaimFilter {
                status: Some(status),
                ..Default::default()
            })
            .map_err(|e| CliError::Store(e.to_string()))?
            .len();
        by_status.push(format!("{} {}", count, status.as_str()));
    }

    formatter.info(&format!(
        "{} item(s), {} source(s); claims: {}",
        items,
        sources,
        by_status.join(", ")
    ));
    Ok(())
}
