//! Build orchestration and coordination.
//!
//! This module provides the [`NpmBundler`] orchestrator that turns the
//! binaries of a multi-platform release into npm packages.
//!
//! # Overview
//!
//! The bundler:
//! 1. Loads `artifacts.json` and `metadata.json`
//! 2. Keeps and validates the binaries of the configured builder
//! 3. Derives one platform package per binary and renders the dispatcher
//! 4. Writes every platform package
//! 5. Writes the umbrella package that depends on all of them
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_npm::bundler::{NpmBundler, SettingsBuilder, SilentReporter};
//!
//! # async fn example() -> kodegen_bundler_npm::bundler::Result<()> {
//! let settings = SettingsBuilder::new().project_directory(".").build()?;
//! let report = NpmBundler::new(settings).build(&SilentReporter).await?;
//!
//! for package in &report.platform_packages {
//!     println!("Created: {} ({}_{})", package.name, package.os, package.cpu);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`orchestrator`] - Main [`NpmBundler`] struct and build pipeline
//! - [`tool_detection`] - `npm` availability checking

mod orchestrator;
pub mod tool_detection;

pub use orchestrator::{BuildReport, NpmBundler};
