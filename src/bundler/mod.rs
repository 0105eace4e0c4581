//! npm packaging of multi-platform release binaries.
//!
//! - [`settings`] - project layout and npm metadata
//! - [`package`] - platform package definitions and manifests
//! - [`dispatcher`] - the umbrella package's launcher program
//! - [`builder`] - the [`NpmBundler`] pipeline
//! - [`publish`] - `npm publish` for the generated packages
//! - [`utils`] - file system helpers

pub mod builder;
pub mod dispatcher;
pub mod error;
pub mod package;
pub mod publish;
mod report;
pub mod settings;
pub mod utils;

pub use builder::{BuildReport, NpmBundler};
pub use error::{Error, Result};
pub use package::{PackageDefinition, PackageManifest};
pub use publish::PublishOptions;
pub use report::{Reporter, SilentReporter};
pub use settings::{PackageSettings, Settings, SettingsBuilder};
