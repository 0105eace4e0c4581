//! File system helpers used by the orchestrator.

pub mod files;
pub mod fs;
