//! Ingest command

use super::{current_timestamp, find_source_by_handle, CliPipeline};
use crate::cli::IngestArgs;
use crate::error::CliError;
use crate::output::Formatter;
use argus_pipeline::{IngestStatus, RawContent};

/// Ingest one piece of content, optionally processing it immediately
pub async fn execute_ingest(
    args: IngestArgs,
    pipeline: &CliPipeline,
    formatter: &Formatter,
) -> Result<(), CliError> {
    let body = match (&args.file, &args.text) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(text)) => text.clone(),
        (None, None) => {
            return Err(CliError::InvalidArg(
                "provide body text or --file".to_string(),
            ))
        }
    };

    let source = {
        let store = pipeline.store();
        let store = store
            .lock()
            .map_err(|e| CliError::Store(format!("store lock poisoned: {}", e)))?;
        find_source_by_handle(&*store, &args.source)?
    }
    .ok_or_else(|| {
        CliError::InvalidArg(format!(
            "unknown source '{}'; register it with `argus source add`",
            args.source
        ))
    })?;

    let now = current_timestamp();
    let status = pipeline.ingest(
        RawContent {
            source_id: source.id,
            title: args.title,
            url: args.url,
            body,
            item_type: args.item_type.into(),
            published_at: None,
        },
        now,
    )?;

    match status {
        IngestStatus::Created(item_id) => {
            formatter.success(&format!("ingested item {}", item_id));
            if args.process {
                let outcome = pipeline.process_item(item_id, now).await?;
                formatter.success(&format!(
                    "processed: {} claim(s), {} evidence item(s), {} resolved",
                    outcome.claims_created, outcome.evidence_attached, outcome.claims_resolved
                ));
            }
        }
        IngestStatus::Duplicate(item_id) => {
            formatter.info(&format!("duplicate content, already ingested as {}", item_id));
        }
    }

    Ok(())
}
