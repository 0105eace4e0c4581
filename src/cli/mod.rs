//! Command line interface for the npm bundler.
//!
//! This module provides the CLI for building and publishing npm packages,
//! with argument parsing, command execution, and user feedback.

mod args;
pub mod commands;
mod output;

pub use args::{Args, BuildArgs, Command, ProjectArgs, PublishArgs, RuntimeConfig};
pub use output::OutputManager;

use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);
    match &args.command {
        Command::Build(build) => commands::build::execute(build, &config).await,
        Command::Publish(publish) => commands::publish::execute(publish, &config).await,
    }
}
