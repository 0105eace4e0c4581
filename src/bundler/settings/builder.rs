//! Builder for constructing Settings.

use super::{DEFAULT_DIST_DIR, PackageSettings, Settings};
use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_npm::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_npm::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_directory(".")
///     .package_settings(PackageSettings {
///         prefix: Some("@acme".into()),
///         ..Default::default()
///     })
///     .files(vec!["README.md".into()])
///     .build()?;
/// assert!(settings.npm_directory().ends_with("dist/npm"));
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_directory: Option<PathBuf>,
    dist_directory: Option<PathBuf>,
    package_settings: PackageSettings,
    builder: Option<String>,
    files: Vec<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the release output directory.
    ///
    /// Relative paths are resolved against the project root.
    ///
    /// Default: `dist`
    pub fn dist_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets npm metadata.
    ///
    /// Default: Empty [`PackageSettings`]
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = settings;
        self
    }

    /// Sets the builder tag whose binaries are packaged.
    ///
    /// Default: the project name from release metadata
    pub fn builder(mut self, builder: Option<String>) -> Self {
        self.builder = builder;
        self
    }

    /// Sets the extra file patterns.
    ///
    /// Default: Empty (no extra files)
    pub fn files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// - `project_directory` is missing
    /// - the scope prefix does not start with `@` or contains `/`
    pub fn build(self) -> Result<Settings> {
        use crate::bundler::error::Context;

        let project_directory = self
            .project_directory
            .context("project_directory is required")?;

        let mut package = self.package_settings;
        if let Some(prefix) = package.prefix.take() {
            let prefix = prefix.trim_end_matches('/').to_string();
            if !prefix.is_empty() {
                if !prefix.starts_with('@') || prefix.len() < 2 || prefix[1..].contains('/') {
                    return Err(Error::GenericError(format!(
                        "invalid npm scope `{prefix}`: expected `@name`"
                    )));
                }
                package.prefix = Some(prefix);
            }
        }

        let dist_directory = match self.dist_directory {
            Some(dist) if dist.is_absolute() => dist,
            Some(dist) => project_directory.join(dist),
            None => project_directory.join(DEFAULT_DIST_DIR),
        };

        Ok(Settings::new(
            package,
            project_directory,
            dist_directory,
            self.builder.filter(|b| !b.is_empty()),
            self.files,
        ))
    }
}
