//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Argus CLI - claim verification and source credibility for crypto news.
#[derive(Debug, Parser)]
#[command(name = "argus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Database file path (overrides config)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ingest one piece of content and optionally process it
    Ingest(IngestArgs),

    /// Process all ingested items that have no claims yet
    Run,

    /// Re-check due claims and settle past-deadline ones
    Recheck,

    /// Recompute credibility snapshots for all sources
    Rescore,

    /// Record an explicit ground-truth resolution for a claim
    Resolve(ResolveArgs),

    /// List claims
    Claims(ClaimsArgs),

    /// List sources with their latest credibility snapshots
    Sources,

    /// Manage sources
    Source(SourceArgs),

    /// Show pipeline counters
    Status,

    /// Run the background worker (recheck + rescore cycles) until Ctrl+C
    Worker,
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// Source handle (must exist; see `argus source add`)
    #[arg(short, long)]
    pub source: String,

    /// Read the body from a file
    #[arg(short, long)]
    pub file: Option<String>,

    /// Body text (ignored when --file is given)
    pub text: Option<String>,

    /// Optional title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Optional canonical URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Content kind
    #[arg(long, value_enum, default_value = "article")]
    pub item_type: ItemTypeArg,

    /// Run the pipeline on the item right away
    #[arg(long)]
    pub process: bool,
}

/// Arguments for the resolve command.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// Claim id
    pub claim_id: String,

    /// Ground-truth outcome
    #[arg(value_enum)]
    pub outcome: OutcomeArg,

    /// Supporting evidence URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Free-text notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

/// Arguments for the claims command.
#[derive(Debug, Parser)]
pub struct ClaimsArgs {
    /// Filter by lifecycle status
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// Maximum number of results
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Show the verdict history for one claim instead
    #[arg(long)]
    pub history: Option<String>,
}

/// Arguments for source management.
#[derive(Debug, Parser)]
pub struct SourceArgs {
    #[command(subcommand)]
    pub action: SourceAction,
}

/// Source management actions.
#[derive(Debug, Subcommand)]
pub enum SourceAction {
    /// Register a new source
    Add {
        /// Handle or domain (e.g. "sec.gov", "@cryptoleaks")
        handle: String,

        /// Entity kind
        #[arg(short = 't', long, value_enum, default_value = "outlet")]
        source_type: SourceTypeArg,

        /// Human-readable name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List registered sources
    List,
}

/// Item type argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ItemTypeArg {
    /// Long-form news article
    Article,
    /// Social media post
    Post,
    /// Chat/forum message
    Message,
}

/// Outcome argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutcomeArg {
    /// The claim turned out true
    True,
    /// The claim turned out false
    False,
    /// Directionally right but materially off
    PartiallyTrue,
    /// Ground truth never became knowable
    Unresolved,
}

/// Claim status argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StatusArg {
    /// Extracted but no verdict yet
    Unreviewed,
    /// At least one verdict exists
    Reviewed,
    /// Ground truth recorded
    Resolved,
}

/// Source type argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SourceTypeArg {
    /// News outlet
    Outlet,
    /// Individual influencer/analyst handle
    Influencer,
    /// Official project/protocol channel
    Project,
    /// Government or regulatory body
    Regulator,
    /// Content aggregator
    Aggregator,
    /// On-chain data provider
    Onchain,
}

impl From<ItemTypeArg> for argus_domain::ItemType {
    fn from(arg: ItemTypeArg) -> Self {
        match arg {
            ItemTypeArg::Article => argus_domain::ItemType::Article,
            ItemTypeArg::Post => argus_domain::ItemType::Post,
            ItemTypeArg::Message => argus_domain::ItemType::Message,
        }
    }
}

impl From<OutcomeArg> for argus_domain::Outcome {
    fn from(arg: OutcomeArg) -> Self {
        match arg {
            OutcomeArg::True => argus_domain::Outcome::True,
            OutcomeArg::False => argus_domain::Outcome::False,
            OutcomeArg::PartiallyTrue => argus_domain::Outcome::PartiallyTrue,
            OutcomeArg::Unresolved => argus_domain::Outcome::Unresolved,
        }
    }
}

impl From<StatusArg> for argus_domain::ClaimStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Unreviewed => argus_domain::ClaimStatus::Unreviewed,
            StatusArg::Reviewed => argus_domain::ClaimStatus::Reviewed,
            StatusArg::Resolved => argus_domain::ClaimStatus::Resolved,
        }
    }
}

impl From<SourceTypeArg> for argus_domain::SourceType {
    fn from(arg: SourceTypeArg) -> Self {
        match arg {
            SourceTypeArg::Outlet => argus_domain::SourceType::Outlet,
            SourceTypeArg::Influencer => argus_domain::SourceType::Influencer,
            SourceTypeArg::Project => argus_domain::SourceType::Project,
            SourceTypeArg::Regulator => argus_domain::SourceType::Regulator,
            SourceTypeArg::Aggregator => argus_domain::SourceType::Aggregator,
            SourceTypeArg::Onchain => argus_domain::SourceType::Onchain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_command_parses() {
        let cli = Cli::parse_from([
            "argus",
            "ingest",
            "--source",
            "chainwire.example",
            "--process",
            "Protocol X was drained of $45 million",
        ]);
        match cli.command {
            Command::Ingest(args) => {
                assert_eq!(args.source, "chainwire.example");
                assert!(args.process);
                assert!(args.text.is_some());
            }
            _ => panic!("Expected Ingest command"),
        }
    }

    #[test]
    fn test_resolve_command_parses() {
        let cli = Cli::parse_from(["argus", "resolve", "some-id", "false", "--notes", "audit"]);
        match cli.command {
            Command::Resolve(args) => {
                assert_eq!(args.claim_id, "some-id");
                assert!(matches!(args.outcome, OutcomeArg::False));
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_status_conversion() {
        let status: argus_domain::ClaimStatus = StatusArg::Reviewed.into();
        assert!(matches!(status, argus_domain::ClaimStatus::Reviewed));
    }
}
