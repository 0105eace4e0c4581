//! Platform package model.
//!
//! - [`platform`] - Go target names to npm `os`/`cpu` names
//! - [`transform`] - binary artifact to [`PackageDefinition`]
//! - [`manifest`] - `package.json` for platform and umbrella packages

pub mod manifest;
pub mod platform;
pub mod transform;

pub use manifest::{BinEntry, PackageManifest, format_main_package_json, format_package_json};
pub use transform::{PackageDefinition, transform_package};
