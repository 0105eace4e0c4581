//! Core Settings struct and project layout.

use super::PackageSettings;
use std::path::{Path, PathBuf};

/// Default release output directory, relative to the project root.
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Directory inside the release output that receives the npm packages.
pub const NPM_DIR: &str = "npm";

/// Main settings for npm bundling.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder).
///
/// # Layout
///
/// ```text
/// <project>/
///   dist/
///     artifacts.json
///     metadata.json
///     npm/
///       <project>-<os>-<cpu>/   platform packages
///       <project>/              umbrella package
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// npm metadata.
    package: PackageSettings,

    /// Project root; artifact paths are relative to it.
    project_directory: PathBuf,

    /// Release output directory.
    dist_directory: PathBuf,

    /// Builder tag to package. None means the project name from metadata.
    builder: Option<String>,

    /// Glob patterns of extra files, relative to the project root.
    files: Vec<String>,
}

impl Settings {
    /// Returns the package metadata.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the project root.
    pub fn project_directory(&self) -> &Path {
        &self.project_directory
    }

    /// Resolves a project-relative path.
    pub fn project_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.project_directory.join(relative)
    }

    /// Returns the release output directory.
    pub fn dist_directory(&self) -> &Path {
        &self.dist_directory
    }

    /// Path of `artifacts.json`.
    pub fn artifacts_path(&self) -> PathBuf {
        self.dist_directory.join("artifacts.json")
    }

    /// Path of `metadata.json`.
    pub fn metadata_path(&self) -> PathBuf {
        self.dist_directory.join("metadata.json")
    }

    /// Directory that receives every generated package.
    pub fn npm_directory(&self) -> PathBuf {
        self.dist_directory.join(NPM_DIR)
    }

    /// Directory of the package named `name` (unscoped).
    pub fn package_directory(&self, name: &str) -> PathBuf {
        self.npm_directory().join(name)
    }

    /// `package.json` of the package named `name`.
    pub fn package_json(&self, name: &str) -> PathBuf {
        self.package_directory(name).join("package.json")
    }

    /// Returns the configured builder tag.
    pub fn builder(&self) -> Option<&str> {
        self.builder.as_deref()
    }

    /// Returns the builder tag, defaulting to `project_name`.
    pub fn builder_or<'a>(&'a self, project_name: &'a str) -> &'a str {
        self.builder.as_deref().unwrap_or(project_name)
    }

    /// Returns the extra file patterns.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        project_directory: PathBuf,
        dist_directory: PathBuf,
        builder: Option<String>,
        files: Vec<String>,
    ) -> Self {
        Self {
            package,
            project_directory,
            dist_directory,
            builder,
            files,
        }
    }
}
