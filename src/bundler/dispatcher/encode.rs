//! Escaping of package data embedded in the dispatcher source.
//!
//! Segments become `path.join` arguments, so anything that could change
//! which file is resolved is rejected rather than escaped. The mapping itself
//! is emitted as JSON, which is a valid JavaScript literal once the two line
//! separators JavaScript engines before ES2019 reject are escaped.

use crate::bundler::error::{Error, Result};
use std::collections::BTreeMap;

fn unencodable(value: &str, reason: &str) -> Error {
    Error::UnencodableDefinition {
        value: value.escape_debug().to_string(),
        reason: reason.to_string(),
    }
}

/// Checks that `segment` can be embedded as one path component.
pub fn check_segment(segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(unencodable(segment, "empty path segment"));
    }
    if segment == "." || segment == ".." {
        return Err(unencodable(segment, "relative path segment"));
    }
    if segment.contains(['/', '\\']) {
        return Err(unencodable(segment, "path separator inside a segment"));
    }
    if segment.chars().any(char::is_control) {
        return Err(unencodable(segment, "control character"));
    }
    Ok(())
}

/// Checks a scope prefix, which is `@scope` and embedded as one segment.
pub fn check_prefix(prefix: &str) -> Result<()> {
    check_segment(prefix)?;
    if !prefix.starts_with('@') {
        return Err(unencodable(prefix, "scope must start with `@`"));
    }
    Ok(())
}

/// Serializes the platform mapping as a JavaScript object literal.
pub fn mapping_literal(mapping: &BTreeMap<String, Vec<String>>) -> Result<String> {
    let json = serde_json::to_string_pretty(mapping)?;
    Ok(json.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029"))
}
