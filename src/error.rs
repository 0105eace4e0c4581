//! Application-level error types.
//!
//! Library code returns [`crate::bundler::Error`]; the CLI wraps it together
//! with argument errors in [`BundlerError`].

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as E;

        let Self::Bundler(err) = self else {
            return vec!["Check the error message above for specific details".to_string()];
        };

        match err.root_cause() {
            E::EmptyArtifactSet { .. } => vec![
                "Run the release build first so that artifacts.json lists the binaries".to_string(),
            ],
            E::EmptyBinaryArtifactSet { builder } => vec![format!(
                "Check that the build id is `{builder}` or pass --builder with the right one"
            )],
            E::InvalidBinaryArtifact { .. } => {
                vec!["Fix every listed artifact entry and run again".to_string()]
            }
            E::DuplicatePlatform { .. } => vec![
                "Build each OS/architecture pair only once, or split builds with --builder"
                    .to_string(),
            ],
            E::ToolNotFound { tool, .. } => {
                vec![format!("Install `{tool}` and make sure it is on PATH")]
            }
            E::Fs { .. } | E::IoError(_) => vec![
                "The npm output directory may be incomplete; do not publish it".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_name_the_builder() {
        let err = BundlerError::from(crate::bundler::Error::EmptyBinaryArtifactSet {
            builder: "mytool".into(),
        });
        assert!(err.recovery_suggestions()[0].contains("`mytool`"));
        assert!(err.to_string().contains("mytool"));
    }
}
