//! Argus CLI - library surface for the `argus` binary

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::CliConfig;
pub use error::CliError;
pub use output::Formatter;

/// CLI result type
pub type Result<T> = std::result::Result<T, CliError>;
