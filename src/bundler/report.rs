//! Progress reporting seam.
//!
//! The orchestrator and publisher never print directly; they talk to a
//! [`Reporter`] handed in by the caller. The CLI implements it on top of its
//! output manager, tests collect the messages.

use std::io;

/// Receives user-facing progress from bundling operations.
pub trait Reporter {
    /// Start a group of related messages.
    fn section(&self, title: &str) -> io::Result<()>;

    /// Detail shown only in verbose mode.
    fn verbose(&self, message: &str) -> io::Result<()>;

    /// Normal progress message.
    fn progress(&self, message: &str) -> io::Result<()>;

    /// A step completed.
    fn success(&self, message: &str) -> io::Result<()>;

    /// Something worth attention that does not stop the run.
    fn warn(&self, message: &str) -> io::Result<()>;
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn section(&self, _title: &str) -> io::Result<()> {
        Ok(())
    }

    fn verbose(&self, _message: &str) -> io::Result<()> {
        Ok(())
    }

    fn progress(&self, _message: &str) -> io::Result<()> {
        Ok(())
    }

    fn success(&self, _message: &str) -> io::Result<()> {
        Ok(())
    }

    fn warn(&self, _message: &str) -> io::Result<()> {
        Ok(())
    }
}
