//! Error types for npm bundling operations.
//!
//! Every failure aborts the whole build, so variants carry enough detail to
//! fix the input without re-running under a debugger.

use crate::metadata::ValidationIssue;
use std::{fmt::Display, io, path::PathBuf};

/// Result alias used throughout the bundler.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building or publishing npm packages.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The artifacts descriptor contained no entries at all.
    #[error("couldn't find any artifacts (expected binaries from the `{builder}` builder)")]
    EmptyArtifactSet {
        /// Builder tag the run was configured for
        builder: String,
    },

    /// No artifact matched the configured builder tag.
    #[error("couldn't find any binary artifacts from the `{builder}` builder")]
    EmptyBinaryArtifactSet {
        /// Builder tag the run was configured for
        builder: String,
    },

    /// One or more binary artifacts failed validation.
    #[error("invalid binary artifacts:\n{}", format_issues(.issues))]
    InvalidBinaryArtifact {
        /// Every issue found, not just the first
        issues: Vec<ValidationIssue>,
    },

    /// Release metadata failed validation.
    #[error("invalid release metadata:\n{}", format_issues(.issues))]
    InvalidMetadata {
        /// Every issue found
        issues: Vec<ValidationIssue>,
    },

    /// An artifact path could not be split into platform segment and file name.
    #[error("artifact `{name}` has a malformed path `{path}`: {reason}")]
    MalformedArtifactPath {
        /// Artifact name
        name: String,
        /// Offending path
        path: String,
        /// What was wrong with it
        reason: String,
    },

    /// A package definition value cannot be embedded in the dispatcher source.
    #[error("cannot embed `{value}` in the dispatcher: {reason}")]
    UnencodableDefinition {
        /// Offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Two artifacts resolved to the same `os_cpu` pair.
    #[error("artifacts `{first}` and `{second}` both target platform `{key}`")]
    DuplicatePlatform {
        /// Platform key, `{os}_{cpu}`
        key: String,
        /// Package already registered for the key
        first: String,
        /// Package that collided with it
        second: String,
    },

    /// A required external tool is not on `PATH`.
    #[error("`{tool}` not found in PATH: {reason}")]
    ToolNotFound {
        /// Tool name
        tool: String,
        /// Lookup failure
        reason: String,
    },

    /// An external command could not be started.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// Spawn error
        error: io::Error,
    },

    /// An external command ran but exited unsuccessfully.
    #[error("`{command}` exited with status {status}")]
    CommandStatus {
        /// Command line that failed
        command: String,
        /// Exit status description
        status: String,
    },

    /// File-system error with the operation and path that caused it.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// Operation being performed
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        error: io::Error,
    },

    /// Plain IO error.
    #[error(transparent)]
    IoError(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// TOML parse error.
    #[error(transparent)]
    TomlError(#[from] toml::de::Error),

    /// Dispatcher template failed to register or render.
    #[error("dispatcher template error: {0}")]
    Template(String),

    /// Invalid glob pattern for extra files.
    #[error(transparent)]
    Glob(#[from] glob::PatternError),

    /// Error with an attached description of what was being done.
    #[error("{context}: {source}")]
    Context {
        /// Description of the failed step
        context: String,
        /// Underlying error
        source: Box<Error>,
    },

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Innermost error behind any [`Error::Context`] wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Attach a human readable context to an error or a missing value.
pub trait Context<T> {
    /// Wrap the error with a static description.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Wrap the error with a lazily built description.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|source| Error::Context {
            context: context.to_string(),
            source: Box::new(source),
        })
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|source| Error::Context {
            context: f().to_string(),
            source: Box::new(source),
        })
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Attach the operation and path to IO errors.
pub trait ErrorExt<T> {
    /// Convert an IO error into [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Return early with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_artifact_message_lists_every_issue() {
        let err = Error::InvalidBinaryArtifact {
            issues: vec![
                ValidationIssue::artifact(0, "name", "missing required field"),
                ValidationIssue::artifact(2, "path", "must not be empty"),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("artifacts[0].name: missing required field"));
        assert!(message.contains("artifacts[2].path: must not be empty"));
    }

    #[test]
    fn invalid_metadata_message_points_at_metadata() {
        let err = Error::InvalidMetadata {
            issues: vec![ValidationIssue::metadata("version", "`latest` is not a semantic version")],
        };
        let message = err.to_string();
        assert!(message.contains("metadata.version: `latest`"));
        assert!(!message.contains("artifacts["));
    }

    #[test]
    fn fs_context_keeps_path() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result
            .fs_context("copying binary", "/tmp/tool")
            .unwrap_err();
        assert_eq!(err.to_string(), "copying binary /tmp/tool: gone");
    }

    #[test]
    fn root_cause_skips_context() {
        let result: Result<()> = Err(Error::ToolNotFound {
            tool: "npm".into(),
            reason: "not on PATH".into(),
        });
        let err = result.context("publishing mytool").unwrap_err();
        assert!(err.to_string().contains("publishing mytool"));
        assert!(matches!(err.root_cause(), Error::ToolNotFound { .. }));
    }

    #[test]
    fn option_context_becomes_generic_error() {
        let err = None::<u8>.context("project name is required").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "project name is required"));
    }
}
