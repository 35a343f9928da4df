//! Argus CLI - command-line interface for the claim-verification pipeline.

use argus_cli::commands;
use argus_cli::{Cli, CliConfig, Command, Formatter};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> argus_cli::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_or_default(cli.config.as_deref().map(Path::new));
    let formatter = Formatter::new(!cli.no_color && config.color);

    let pipeline = commands::build_pipeline(&config, cli.db.as_deref().map(Path::new))?;

    match cli.command {
        Command::Ingest(args) => {
            commands::execute_ingest(args, &pipeline, &formatter).await?;
        }
        Command::Run => {
            commands::execute_run(&pipeline, &formatter).await?;
        }
        Command::Recheck => {
            commands::execute_recheck(&pipeline, &formatter).await?;
        }
        Command::Rescore => {
            commands::execute_rescore(&pipeline, &formatter)?;
        }
        Command::Resolve(args) => {
            commands::execute_resolve(args, &pipeline, &formatter)?;
        }
        Command::Claims(args) => {
            commands::execute_claims(args, &pipeline, &formatter)?;
        }
        Command::Sources => {
            commands::execute_sources(&pipeline, &formatter)?;
        }
        Command::Source(args) => {
            commands::execute_source(args, &pipeline, &formatter)?;
        }
        Command::Status => {
            commands::execute_status(&pipeline, &formatter)?;
        }
        Command::Worker => {
            commands::execute_worker(pipeline, &formatter).await?;
        }
    }

    Ok(())
}
