//! Configuration structures for npm bundling.
//!
//! [`Settings`] carries the project layout (where the release output lives
//! and where packages are written) and [`PackageSettings`] the npm metadata
//! applied to every generated package.

mod builder;
mod core;
mod package;

pub use builder::SettingsBuilder;
pub use core::{DEFAULT_DIST_DIR, NPM_DIR, Settings};
pub use package::PackageSettings;
