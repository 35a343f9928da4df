//! Source management commands

use super::{find_source_by_handle, CliPipeline};
use crate::cli::SourceArgs;
use crate::error::CliError;
use crate::output::Formatter;
use argus_domain::traits::PipelineStore;
use argus_domain::{Source, SourceId};

/// Add or list sources
pub fn execute_source(
    args: SourceArgs,
    pipeline: &CliPipeline,
    formatter: &Formatter,
) -> Result<(), CliError> {
    match args.action {
        crate::cli::SourceAction::Add {
            handle,
            source_type,
            name,
        } => {
            let store = pipeline.store();
            let mut store = store
                .lock()
                .map_err(|e| CliError::Store(format!("store lock poisoned: {}", e)))?;

            if find_source_by_handle(&*store, &handle)?.is_some() {
                return Err(CliError::InvalidArg(format!(
                    "source '{}' already exists",
                    handle
                )));
            }

            let display_name = name.unwrap_or_else(|| handle.clone());
            let source = Source::new(SourceId::new(), source_type.into(), handle, display_name);
            let id = store
                .put_source(source)
                .map_err(|e| CliError::Store(e.to_string()))?;
            formatter.success(&format!("registered source {}", id));
        }
        crate::cli::SourceAction::List => {
            super::execute_sources(pipeline, formatter)?;
        }
    }
    Ok(())
}
