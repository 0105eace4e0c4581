//! Multi-platform npm packaging library
//!
//! Turns the binaries of a multi-platform release build into:
//! - one npm package per OS/architecture pair, restricted with `os`/`cpu`
//! - one umbrella package whose launcher runs the matching binary
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
