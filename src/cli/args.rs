//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation
//! that runs before any file is touched.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// npm packages for multi-platform release binaries
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_npm",
    version,
    styles = super::output::cli_styles(),
    about = "npm packages for multi-platform release binaries",
    long_about = "Wraps every platform binary of a release build into its own npm package and
generates an umbrella package whose launcher runs the binary matching the host.

Reads dist/artifacts.json and dist/metadata.json, writes packages to dist/npm/.

Usage:
  kodegen_bundler_npm build --project . --prefix @acme --files README.md,LICENSE
  kodegen_bundler_npm publish --project . --tag next

Exit code 0 = every package was written (build) or published (publish)."
)]
pub struct Args {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Show detailed progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build platform packages and the umbrella package
    Build(BuildArgs),
    /// Publish previously built packages to the registry
    Publish(PublishArgs),
}

/// Location of the project and its release output.
#[derive(clap::Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root; artifact paths are relative to it
    #[arg(short = 'p', long, value_name = "DIR", default_value = ".", env = "NPM_BUNDLE_PROJECT")]
    pub project: PathBuf,

    /// Release output directory, relative to the project root
    #[arg(long, value_name = "DIR")]
    pub dist: Option<PathBuf>,
}

/// Options of the `build` subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Builder id whose binaries are packaged (default: project name)
    #[arg(short, long, value_name = "ID", env = "NPM_BUNDLE_BUILDER")]
    pub builder: Option<String>,

    /// Package description
    #[arg(short, long)]
    pub description: Option<String>,

    /// npm scope for every package, e.g. @acme
    #[arg(long, value_name = "SCOPE")]
    pub prefix: Option<String>,

    /// Extra files (glob patterns) copied into every package
    #[arg(short, long, value_name = "GLOB", value_delimiter = ',')]
    pub files: Vec<String>,

    /// Package keywords
    #[arg(short, long, value_name = "KEYWORD", value_delimiter = ',')]
    pub keywords: Vec<String>,

    /// SPDX license identifier
    #[arg(long)]
    pub license: Option<String>,

    /// Homepage URL
    #[arg(long)]
    pub homepage: Option<String>,

    /// Repository URL
    #[arg(long)]
    pub repository: Option<String>,

    /// Package author
    #[arg(long)]
    pub author: Option<String>,
}

/// Options of the `publish` subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct PublishArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Dist-tag to publish under
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Registry auth token
    #[arg(long, env = "NPM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Registry URL
    #[arg(long, value_name = "URL")]
    pub registry: Option<String>,

    /// Run npm publish with --dry-run
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        let project = match &self.command {
            Command::Build(build) => {
                if let Some(prefix) = build.prefix.as_deref().filter(|p| !p.is_empty())
                    && !prefix.starts_with('@')
                {
                    return Err(format!("Invalid prefix: {prefix}. npm scopes start with '@'"));
                }
                if build.files.iter().any(|f| f.trim().is_empty()) {
                    return Err("File patterns cannot be empty".to_string());
                }
                &build.project
            }
            Command::Publish(publish) => {
                if let Some(registry) = &publish.registry
                    && !(registry.starts_with("https://") || registry.starts_with("http://"))
                {
                    return Err(format!("Invalid registry URL: {registry}"));
                }
                &publish.project
            }
        };

        if project.project.as_os_str().is_empty() {
            return Err("Project directory cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);
        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

impl crate::bundler::Reporter for RuntimeConfig {
    fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    fn verbose(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_build_options() {
        let args = Args::try_parse_from([
            "kodegen_bundler_npm",
            "build",
            "--project",
            "/work",
            "--prefix",
            "@acme",
            "--files",
            "README.md,LICENSE",
            "-k",
            "cli",
            "-v",
        ])
        .unwrap();
        assert!(args.verbose);
        let Command::Build(build) = &args.command else {
            panic!("expected build");
        };
        assert_eq!(build.project.project, PathBuf::from("/work"));
        assert_eq!(build.files, vec!["README.md", "LICENSE"]);
        assert_eq!(build.keywords, vec!["cli"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn rejects_unscoped_prefix() {
        let args = Args::try_parse_from(["kodegen_bundler_npm", "build", "--prefix", "acme"]).unwrap();
        assert!(args.validate().unwrap_err().contains("acme"));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["kodegen_bundler_npm", "build", "-v", "-q"]).is_err());
    }

    #[test]
    fn parses_publish_options() {
        let args = Args::try_parse_from([
            "kodegen_bundler_npm",
            "publish",
            "--tag",
            "next",
            "--dry-run",
            "--registry",
            "ftp://example.com",
        ])
        .unwrap();
        let Command::Publish(publish) = &args.command else {
            panic!("expected publish");
        };
        assert_eq!(publish.tag.as_deref(), Some("next"));
        assert!(publish.dry_run);
        assert!(args.validate().is_err());
    }
}
