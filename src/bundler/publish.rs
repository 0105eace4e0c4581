//! Registry publication through the `npm` CLI.
//!
//! Platform packages are published before the umbrella package so that its
//! optional dependencies already resolve when it becomes visible.

use crate::bundler::{
    Reporter, Settings,
    builder::tool_detection::NPM,
    error::{Error, ErrorExt, Result},
    package::PackageManifest,
    utils::fs,
};
use crate::metadata;
use std::path::{Path, PathBuf};

/// Registry used when none is configured.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org/";

/// Environment variable carrying the auth token to `npm`.
pub const TOKEN_ENV: &str = "NODE_AUTH_TOKEN";

/// Options for `npm publish`.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Dist-tag, e.g. `next`
    pub tag: Option<String>,
    /// Registry auth token
    pub token: Option<String>,
    /// Registry URL, defaults to [`DEFAULT_REGISTRY`]
    pub registry: Option<String>,
    /// Run `npm publish --dry-run`
    pub dry_run: bool,
}

impl PublishOptions {
    fn registry(&self) -> &str {
        self.registry.as_deref().unwrap_or(DEFAULT_REGISTRY)
    }

    /// Arguments passed to `npm`.
    pub fn npm_args(&self) -> Vec<String> {
        let mut args = vec![
            "publish".to_string(),
            "--access".to_string(),
            "public".to_string(),
        ];
        if let Some(tag) = self.tag.as_deref().filter(|t| !t.is_empty()) {
            args.push("--tag".to_string());
            args.push(tag.to_string());
        }
        if self.registry.is_some() {
            args.push("--registry".to_string());
            args.push(self.registry().to_string());
        }
        if self.dry_run {
            args.push("--dry-run".to_string());
        }
        args
    }
}

/// `.npmrc` line that reads the token from [`TOKEN_ENV`] for `registry`.
pub fn npmrc_auth_line(registry: &str) -> String {
    let host = registry
        .trim_start_matches("https:")
        .trim_start_matches("http:")
        .trim_end_matches('/');
    format!("{host}/:_authToken=${{{TOKEN_ENV}}}\n")
}

/// Publishes the package in `dir`.
pub async fn publish_package(dir: &Path, options: &PublishOptions) -> Result<()> {
    let npm = (*NPM).as_ref().map_err(|reason| Error::ToolNotFound {
        tool: "npm".to_string(),
        reason: reason.clone(),
    })?;

    let args = options.npm_args();
    let mut command = tokio::process::Command::new(npm);
    command.args(&args).current_dir(dir);

    if let Some(token) = options.token.as_deref().filter(|t| !t.is_empty()) {
        fs::write_file(&dir.join(".npmrc"), npmrc_auth_line(options.registry())).await?;
        command.env(TOKEN_ENV, token);
    }

    let command_line = format!("npm {}", args.join(" "));
    log::info!("Running `{}` in {}", command_line, dir.display());

    let status = command.status().await.map_err(|error| Error::CommandFailed {
        command: command_line.clone(),
        error,
    })?;

    if !status.success() {
        return Err(Error::CommandStatus {
            command: command_line,
            status: status.to_string(),
        });
    }
    Ok(())
}

/// Package directories to publish, and leftovers that are not part of the release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationPlan {
    /// Platform packages sorted by name, then the umbrella package
    pub packages: Vec<PathBuf>,
    /// Package directories the umbrella does not depend on
    pub stale: Vec<PathBuf>,
}

/// Plans publication from the umbrella manifest in `npm_dir/umbrella`.
///
/// Only the umbrella's optional dependencies are published, so directories
/// left behind by earlier releases never reach the registry. Every dependency
/// must exist with the umbrella's version.
pub async fn publication_order(npm_dir: &Path, umbrella: &str) -> Result<PublicationPlan> {
    let umbrella_dir = npm_dir.join(umbrella);
    let umbrella_json = umbrella_dir.join("package.json");
    if !tokio::fs::try_exists(&umbrella_json)
        .await
        .fs_context("checking umbrella package", &umbrella_json)?
    {
        return Err(Error::GenericError(format!(
            "umbrella package `{umbrella}` not found in {}; run `build` first",
            npm_dir.display()
        )));
    }
    let manifest = read_manifest(&umbrella_json).await?;

    let mut packages = Vec::new();
    for (dependency, version) in manifest.optional_dependencies.iter().flatten() {
        // `@scope/name` lives in `npm/name`
        let directory = dependency.rsplit('/').next().unwrap_or(dependency);
        let package_dir = npm_dir.join(directory);
        let platform = read_manifest(&package_dir.join("package.json")).await?;
        if &platform.version != version {
            return Err(Error::GenericError(format!(
                "{dependency} in {} has version {}, umbrella expects {version}; run `build` again",
                package_dir.display(),
                platform.version
            )));
        }
        packages.push(package_dir);
    }
    packages.sort();

    let mut stale = Vec::new();
    let mut entries = tokio::fs::read_dir(npm_dir)
        .await
        .fs_context("reading package directory", npm_dir)?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading package directory", npm_dir)?
    {
        let path = entry.path();
        if path != umbrella_dir && !packages.contains(&path) && path.join("package.json").is_file() {
            stale.push(path);
        }
    }
    stale.sort();

    packages.push(umbrella_dir);
    Ok(PublicationPlan { packages, stale })
}

async fn read_manifest(path: &Path) -> Result<PackageManifest> {
    let content = tokio::fs::read_to_string(path)
        .await
        .fs_context("reading package manifest", path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Publishes every package of the current release.
pub async fn publish_all<R: Reporter + ?Sized>(
    settings: &Settings,
    options: &PublishOptions,
    reporter: &R,
) -> Result<Vec<PathBuf>> {
    let metadata = metadata::load_metadata(&settings.metadata_path()).await?;
    let plan = publication_order(&settings.npm_directory(), &metadata.project_name).await?;

    for dir in &plan.stale {
        reporter.warn(&format!(
            "Skipping {}: not a dependency of {}",
            dir.display(),
            metadata.project_name
        ))?;
    }
    reporter.progress(&format!("Publishing {} package(s)", plan.packages.len()))?;

    for dir in &plan.packages {
        reporter.section(&format!("Publishing {}", dir.display()))?;
        publish_package(dir, options).await?;
        reporter.success(&format!("Published {}", dir.display()))?;
    }
    Ok(plan.packages)
}
