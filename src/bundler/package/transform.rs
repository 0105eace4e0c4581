//! Binary artifact to platform package definition.

use super::platform::{node_cpu, node_os, parse_platform_segment};
use crate::bundler::error::{Error, Result};
use crate::metadata::{BinaryArtifact, ReleaseMetadata};

/// Everything needed to lay out and describe one platform package.
///
/// Created once per binary artifact and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDefinition {
    /// Unscoped package name, `{project}-{os}-{cpu}`
    pub name: String,
    /// npm `os` value
    pub os: String,
    /// npm `cpu` value
    pub cpu: String,
    /// Binary file name inside the package
    pub bin: String,
    /// Binary path relative to the npm output directory
    pub destination_binary: String,
    /// Release version
    pub version: String,
    /// Artifact path relative to the project root
    pub source: String,
}

impl PackageDefinition {
    /// Key the dispatcher looks up at run time, `{os}_{cpu}`.
    pub fn platform_key(&self) -> String {
        format!("{}_{}", self.os, self.cpu)
    }
}

fn malformed(artifact: &BinaryArtifact, reason: &str) -> Error {
    Error::MalformedArtifactPath {
        name: artifact.name.clone(),
        path: artifact.path.clone(),
        reason: reason.to_string(),
    }
}

/// Derives the platform package for one binary artifact.
///
/// The last directory of `artifact.path` is the platform segment and the
/// final component the binary. The Go target comes from the artifact when it
/// carries one, otherwise from the platform segment.
pub fn transform_package(
    artifact: &BinaryArtifact,
    metadata: &ReleaseMetadata,
) -> Result<PackageDefinition> {
    let components: Vec<&str> = artifact
        .path
        .split(['/', '\\'])
        .filter(|c| !c.is_empty() && *c != ".")
        .collect();

    let [.., segment, bin] = components.as_slice() else {
        return Err(malformed(artifact, "expected `<platform>/<binary>`"));
    };
    if artifact.path.ends_with(['/', '\\']) {
        return Err(malformed(artifact, "missing binary file name"));
    }

    let (goos, goarch) = match (artifact.goos.as_deref(), artifact.goarch.as_deref()) {
        (Some(goos), Some(goarch)) => (goos, goarch),
        _ => parse_platform_segment(segment)
            .ok_or_else(|| malformed(artifact, "no platform in path segment"))?,
    };

    let os = node_os(goos).to_string();
    let cpu = node_cpu(goarch).to_string();
    let name = format!("{}-{}-{}", metadata.project_name, os, cpu);
    let destination_binary = format!("{name}/{bin}");

    Ok(PackageDefinition {
        name,
        os,
        cpu,
        bin: (*bin).to_string(),
        destination_binary,
        version: metadata.version.clone(),
        source: artifact.path.clone(),
    })
}
