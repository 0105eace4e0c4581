//! `publish` subcommand.

use crate::bundler::{PublishOptions, publish::publish_all};
use crate::cli::{PublishArgs, RuntimeConfig};
use crate::error::Result;

/// Publishes the platform packages, then the umbrella package.
pub async fn execute(args: &PublishArgs, config: &RuntimeConfig) -> Result<i32> {
    let settings = super::layout_settings(&args.project)?;
    let options = PublishOptions {
        tag: args.tag.clone(),
        token: args.token.clone(),
        registry: args.registry.clone(),
        dry_run: args.dry_run,
    };

    let published = publish_all(&settings, &options, config).await?;
    config
        .output()
        .success(&format!("Published {} package(s)", published.len()))?;
    Ok(0)
}
