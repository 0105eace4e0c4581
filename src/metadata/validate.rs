//! Shape validation for binary artifacts and release metadata.

use super::{BinaryArtifact, RawArtifact, ReleaseMetadata};
use serde::Serialize;
use std::fmt;

/// Descriptor a [`ValidationIssue`] points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSource {
    /// An entry of `artifacts.json`
    Artifact,
    /// `metadata.json`
    Metadata,
}

/// A single validation failure, addressed by source, entry index and field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Descriptor the issue was found in
    pub source: IssueSource,
    /// Index of the entry in the validated list; always 0 for metadata
    pub index: usize,
    /// Field that failed
    pub field: String,
    /// What is wrong with it
    pub message: String,
}

impl ValidationIssue {
    /// Issue in the artifact at `index`.
    pub fn artifact(index: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: IssueSource::Artifact,
            index,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Issue in the release metadata.
    pub fn metadata(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: IssueSource::Metadata,
            index: 0,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            IssueSource::Artifact => {
                write!(f, "artifacts[{}].{}: {}", self.index, self.field, self.message)
            }
            IssueSource::Metadata => write!(f, "metadata.{}: {}", self.field, self.message),
        }
    }
}

fn required<'a>(
    value: Option<&'a str>,
    index: usize,
    field: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'a str> {
    match value {
        None => {
            issues.push(ValidationIssue::artifact(index, field, "missing required field"));
            None
        }
        Some(v) if v.trim().is_empty() => {
            issues.push(ValidationIssue::artifact(index, field, "must not be empty"));
            None
        }
        Some(v) => Some(v),
    }
}

/// Validates the filtered binary artifacts.
///
/// Returns every issue found across all entries, so a broken descriptor can
/// be fixed in one pass. An empty input is reported as an issue as well.
pub fn validate_binary_artifacts(
    artifacts: &[&RawArtifact],
) -> Result<Vec<BinaryArtifact>, Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let mut valid = Vec::with_capacity(artifacts.len());

    if artifacts.is_empty() {
        issues.push(ValidationIssue::artifact(0, "", "at least one binary artifact is required"));
        return Err(issues);
    }

    for (index, artifact) in artifacts.iter().enumerate() {
        let name = required(artifact.name.as_deref(), index, "name", &mut issues);
        let path = required(artifact.path.as_deref(), index, "path", &mut issues);
        let builder = required(artifact.builder_tag(), index, "builder", &mut issues);

        // goos and goarch travel together; one without the other is ambiguous
        match (&artifact.goos, &artifact.goarch) {
            (Some(_), None) => {
                issues.push(ValidationIssue::artifact(index, "goarch", "required when goos is set"))
            }
            (None, Some(_)) => {
                issues.push(ValidationIssue::artifact(index, "goos", "required when goarch is set"))
            }
            _ => {}
        }

        if let (Some(name), Some(path), Some(builder)) = (name, path, builder) {
            valid.push(BinaryArtifact {
                name: name.to_string(),
                path: path.to_string(),
                builder: builder.to_string(),
                goos: artifact.goos.clone(),
                goarch: artifact.goarch.clone(),
            });
        }
    }

    if issues.is_empty() { Ok(valid) } else { Err(issues) }
}

/// Validates release metadata for npm publication.
///
/// npm rejects versions that are not semantic versions, so that is checked
/// here instead of failing at publish time.
pub fn validate_metadata(metadata: &ReleaseMetadata) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if metadata.project_name.trim().is_empty() {
        issues.push(ValidationIssue::metadata("project_name", "must not be empty"));
    }
    if let Err(e) = semver::Version::parse(&metadata.version) {
        issues.push(ValidationIssue::metadata(
            "version",
            format!("`{}` is not a semantic version: {e}", metadata.version),
        ));
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}
