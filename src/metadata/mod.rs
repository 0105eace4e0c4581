//! Release metadata and artifact discovery from a multi-platform build output.
//!
//! The build tool (GoReleaser or anything producing the same shape) leaves two
//! descriptors in its output directory:
//!
//! - `artifacts.json` - every produced artifact (binaries, archives, checksums)
//! - `metadata.json` - project-wide facts about the release
//!
//! Both are read once per run. Artifact entries are kept loose ([`RawArtifact`])
//! so that [`validate_binary_artifacts`] can report every problem at once.

mod config;
mod validate;

pub use config::{CONFIG_FILE_NAME, ProjectConfig, load_project_config};
pub use validate::{IssueSource, ValidationIssue, validate_binary_artifacts, validate_metadata};

use crate::bundler::error::{ErrorExt, Result};
use serde::Deserialize;
use std::path::Path;

/// Artifact `type` value for compiled binaries.
pub const BINARY_ARTIFACT_TYPE: &str = "Binary";

/// One entry of `artifacts.json` as found on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct RawArtifact {
    /// Logical artifact name
    #[serde(default)]
    pub name: Option<String>,

    /// Path relative to the project root; its last directory encodes the platform
    #[serde(default)]
    pub path: Option<String>,

    /// Explicit builder tag
    #[serde(default)]
    pub builder: Option<String>,

    /// Target operating system in Go naming (`darwin`, `windows`, ...)
    #[serde(default)]
    pub goos: Option<String>,

    /// Target architecture in Go naming (`amd64`, `arm64`, ...)
    #[serde(default)]
    pub goarch: Option<String>,

    /// Artifact kind (`Binary`, `Archive`, `Checksum`, ...)
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Builder specific extras
    #[serde(default)]
    pub extra: Option<ArtifactExtra>,
}

/// The `extra` object GoReleaser attaches to binary artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct ArtifactExtra {
    /// Build id, used as the builder tag when `builder` is absent
    #[serde(default, rename = "ID")]
    pub id: Option<String>,
}

impl RawArtifact {
    /// Builder tag: explicit `builder`, otherwise `extra.ID`.
    pub fn builder_tag(&self) -> Option<&str> {
        self.builder
            .as_deref()
            .or_else(|| self.extra.as_ref().and_then(|extra| extra.id.as_deref()))
    }

    /// Whether the artifact is a binary produced by `builder`.
    ///
    /// Entries without a `type` are treated as binaries.
    pub fn is_binary_from(&self, builder: &str) -> bool {
        let is_binary = self
            .kind
            .as_deref()
            .is_none_or(|kind| kind == BINARY_ARTIFACT_TYPE);
        is_binary && self.builder_tag() == Some(builder)
    }
}

/// A binary artifact that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryArtifact {
    /// Logical artifact name
    pub name: String,
    /// Path relative to the project root
    pub path: String,
    /// Builder tag
    pub builder: String,
    /// Target OS in Go naming, when the descriptor carries it
    pub goos: Option<String>,
    /// Target architecture in Go naming, when the descriptor carries it
    pub goarch: Option<String>,
}

impl BinaryArtifact {
    /// Creates an artifact that only carries the platform in its path.
    pub fn new(name: impl Into<String>, path: impl Into<String>, builder: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            builder: builder.into(),
            goos: None,
            goarch: None,
        }
    }

    /// Sets the explicit Go target.
    pub fn with_target(mut self, goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        self.goos = Some(goos.into());
        self.goarch = Some(goarch.into());
        self
    }
}

/// Project-wide facts for the current release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct ReleaseMetadata {
    /// Project name, also the umbrella package name
    pub project_name: String,

    /// Release tag (e.g. `v1.2.3`)
    #[serde(default)]
    pub tag: String,

    /// Previous release tag
    #[serde(default)]
    pub previous_tag: String,

    /// Release version without the `v` prefix
    pub version: String,

    /// Commit the release was built from
    #[serde(default)]
    pub commit: String,

    /// Build date
    #[serde(default)]
    pub date: String,

    /// Host target of the build
    #[serde(default)]
    pub runtime: RuntimeTarget,
}

/// Go target of the machine that ran the build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct RuntimeTarget {
    /// Operating system in Go naming
    #[serde(default)]
    pub goos: String,
    /// Architecture in Go naming
    #[serde(default)]
    pub goarch: String,
}

/// Reads and parses `artifacts.json`.
pub async fn load_artifacts(path: &Path) -> Result<Vec<RawArtifact>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .fs_context("reading artifacts file", path)?;
    let artifacts: Vec<RawArtifact> = serde_json::from_str(&content)?;
    log::debug!("Loaded {} artifact(s) from {}", artifacts.len(), path.display());
    Ok(artifacts)
}

/// Reads and parses `metadata.json`.
pub async fn load_metadata(path: &Path) -> Result<ReleaseMetadata> {
    let content = tokio::fs::read_to_string(path)
        .await
        .fs_context("reading metadata file", path)?;
    let metadata: ReleaseMetadata = serde_json::from_str(&content)?;
    log::debug!(
        "Loaded metadata for {} {} from {}",
        metadata.project_name,
        metadata.version,
        path.display()
    );
    Ok(metadata)
}

/// Keeps the binary artifacts produced by `builder`.
pub fn binary_artifacts_from<'a>(artifacts: &'a [RawArtifact], builder: &str) -> Vec<&'a RawArtifact> {
    artifacts
        .iter()
        .filter(|artifact| artifact.is_binary_from(builder))
        .collect()
}
