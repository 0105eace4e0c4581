//! Optional per-project configuration file.
//!
//! `npm-bundle.toml` in the project root supplies defaults for the build
//! options. Values given on the command line take precedence.
//!
//! ```toml
//! builder = "mytool"
//! description = "My tool, installable from npm"
//! prefix = "@acme"
//! keywords = ["cli", "tool"]
//! files = ["README.md", "LICENSE"]
//! license = "MIT"
//! homepage = "https://example.com"
//! repository = "https://github.com/acme/mytool"
//! author = "Acme Inc."
//! ```

use crate::bundler::error::{ErrorExt, Result};
use serde::Deserialize;
use std::path::Path;

/// File name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "npm-bundle.toml";

/// Contents of `npm-bundle.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Builder tag whose binaries are packaged
    #[serde(default)]
    pub builder: Option<String>,
    /// Package description
    #[serde(default)]
    pub description: Option<String>,
    /// npm scope, e.g. `@acme`
    #[serde(default)]
    pub prefix: Option<String>,
    /// Package keywords
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    /// Glob patterns of extra files copied into every package
    #[serde(default)]
    pub files: Option<Vec<String>>,
    /// SPDX license identifier
    #[serde(default)]
    pub license: Option<String>,
    /// Homepage URL
    #[serde(default)]
    pub homepage: Option<String>,
    /// Repository URL
    #[serde(default)]
    pub repository: Option<String>,
    /// Package author
    #[serde(default)]
    pub author: Option<String>,
}

/// Loads `npm-bundle.toml` from `project_dir`, if present.
pub async fn load_project_config(project_dir: &Path) -> Result<Option<ProjectConfig>> {
    let path = project_dir.join(CONFIG_FILE_NAME);
    if !tokio::fs::try_exists(&path)
        .await
        .fs_context("checking config file", &path)?
    {
        log::debug!("No {} in {}", CONFIG_FILE_NAME, project_dir.display());
        return Ok(None);
    }

    let content = tokio::fs::read_to_string(&path)
        .await
        .fs_context("reading config file", &path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    log::info!("Loaded project configuration from {}", path.display());
    Ok(Some(config))
}
