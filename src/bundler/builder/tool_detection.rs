//! External tool detection and availability checking.
//!
//! Publishing shells out to `npm`; it is located once and cached.

use std::path::PathBuf;
use std::sync::LazyLock;

/// Location of `npm`, or the reason it could not be found.
///
/// Cached result to avoid repeated PATH scans while publishing many packages.
pub static NPM: LazyLock<Result<PathBuf, String>> = LazyLock::new(|| match which::which("npm") {
    Ok(path) => {
        log::debug!("Found npm at: {}", path.display());
        Ok(path)
    }
    Err(e) => {
        log::debug!("npm not found in PATH: {}", e);
        Err(e.to_string())
    }
});
