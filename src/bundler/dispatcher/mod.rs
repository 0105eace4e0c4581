//! Dispatcher program generation.
//!
//! The umbrella package has no binary of its own. Its entry point is a small
//! Node.js program that maps `process.platform`/`process.arch` to the
//! installed platform package and runs its binary with the caller's
//! arguments, streams, environment and exit status.
//!
//! Generation is pure: [`platform_mapping`] builds the lookup table,
//! [`modules_directory`] picks how far to climb from the umbrella package, and
//! [`render_dispatcher`] fills the fixed template. [`generate_dispatcher`]
//! chains the three.

mod encode;
mod template;

pub use encode::{check_prefix, check_segment, mapping_literal};

use crate::bundler::{
    error::{Error, Result},
    package::PackageDefinition,
};
use handlebars::Handlebars;
use std::collections::{BTreeMap, btree_map::Entry};
use template::DISPATCHER_TEMPLATE;

/// Modules directory for an unscoped umbrella package:
/// `node_modules/<pkg>/index.js` climbs one level.
pub const MODULES_DIRECTORY: &str = "path.dirname(__dirname)";

/// Modules directory for a scoped umbrella package:
/// `node_modules/@scope/<pkg>/index.js` climbs two levels.
pub const SCOPED_MODULES_DIRECTORY: &str = "path.dirname(path.dirname(__dirname))";

/// Builds the platform key to path-segment mapping.
///
/// Each value is `[prefix?, package name, binary name]`, relative to the
/// modules directory.
///
/// # Errors
///
/// - [`Error::DuplicatePlatform`] when two definitions share `os_cpu`
/// - [`Error::UnencodableDefinition`] when a segment cannot be embedded
pub fn platform_mapping(
    defs: &[PackageDefinition],
    prefix: Option<&str>,
) -> Result<BTreeMap<String, Vec<String>>> {
    if let Some(prefix) = prefix {
        check_prefix(prefix)?;
    }

    let mut mapping = BTreeMap::new();
    for def in defs {
        check_segment(&def.name)?;
        check_segment(&def.bin)?;

        let segments: Vec<String> = prefix
            .map(String::from)
            .into_iter()
            .chain([def.name.clone(), def.bin.clone()])
            .collect();

        match mapping.entry(def.platform_key()) {
            Entry::Vacant(entry) => {
                entry.insert(segments);
            }
            Entry::Occupied(entry) => {
                let first = entry.get().iter().rev().nth(1).cloned().unwrap_or_default();
                return Err(Error::DuplicatePlatform {
                    key: entry.key().clone(),
                    first,
                    second: def.name.clone(),
                });
            }
        }
    }
    Ok(mapping)
}

/// Directory expression the dispatcher resolves packages against.
pub fn modules_directory(prefix: Option<&str>) -> &'static str {
    match prefix {
        Some(p) if !p.is_empty() => SCOPED_MODULES_DIRECTORY,
        _ => MODULES_DIRECTORY,
    }
}

/// Renders the dispatcher source from a mapping and a directory expression.
pub fn render_dispatcher(
    mapping: &BTreeMap<String, Vec<String>>,
    directory_expression: &str,
) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    handlebars
        .register_template_string("dispatcher", DISPATCHER_TEMPLATE)
        .map_err(|e| Error::Template(format!("failed to register dispatcher template: {e}")))?;

    let data = BTreeMap::from([
        ("mapping", mapping_literal(mapping)?),
        ("modules_directory", directory_expression.to_string()),
    ]);

    handlebars
        .render("dispatcher", &data)
        .map_err(|e| Error::Template(format!("failed to render dispatcher: {e}")))
}

/// Generates the dispatcher source for a set of platform packages.
pub fn generate_dispatcher(defs: &[PackageDefinition], prefix: Option<&str>) -> Result<String> {
    let prefix = prefix.filter(|p| !p.is_empty());
    let mapping = platform_mapping(defs, prefix)?;
    log::debug!(
        "Dispatcher maps {} platform(s): {}",
        mapping.len(),
        mapping.keys().cloned().collect::<Vec<_>>().join(", ")
    );
    render_dispatcher(&mapping, modules_directory(prefix))
}
