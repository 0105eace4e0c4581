//! Command execution functions for bundler operations.

pub mod build;
pub mod publish;

use crate::bundler::{Settings, SettingsBuilder};
use crate::cli::ProjectArgs;
use crate::error::Result;
use anyhow::Context;
use std::path::PathBuf;

/// Resolves the project root to an absolute path.
pub(crate) fn project_directory(args: &ProjectArgs) -> Result<PathBuf> {
    if args.project.is_absolute() {
        return Ok(args.project.clone());
    }
    let cwd = std::env::current_dir().context("resolving the current directory")?;
    Ok(cwd.join(&args.project))
}

/// Settings builder with the project layout applied.
pub(crate) fn layout(args: &ProjectArgs) -> Result<SettingsBuilder> {
    let mut builder = SettingsBuilder::new().project_directory(project_directory(args)?);
    if let Some(dist) = &args.dist {
        builder = builder.dist_directory(dist);
    }
    Ok(builder)
}

/// Settings for commands that only need the layout.
pub(crate) fn layout_settings(args: &ProjectArgs) -> Result<Settings> {
    Ok(layout(args)?.build()?)
}
