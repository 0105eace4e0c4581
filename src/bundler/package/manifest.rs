//! `package.json` generation for platform and umbrella packages.

use super::PackageDefinition;
use crate::bundler::{error::Result, settings::PackageSettings};
use crate::metadata::ReleaseMetadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File name of the dispatcher inside the umbrella package.
pub const DISPATCHER_FILE: &str = "index.js";

/// The `bin` field: a single path (command named after the package) or an
/// explicit command map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BinEntry {
    /// `"bin": "mytool"`
    Path(String),
    /// `"bin": { "mytool": "index.js" }`
    Commands(BTreeMap<String, String>),
}

/// npm package descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Package name, scoped when a prefix is configured
    pub name: String,
    /// Package version
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Operating systems the package installs on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub os: Vec<String>,
    /// CPU architectures the package installs on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cpu: Vec<String>,
    /// Executable entry point
    pub bin: BinEntry,
    /// Files included in the published tarball
    pub files: Vec<String>,
    /// Platform packages of the umbrella package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_dependencies: Option<BTreeMap<String, String>>,
}

impl PackageManifest {
    fn base(name: String, version: String, package: &PackageSettings, bin: BinEntry, files: Vec<String>) -> Self {
        Self {
            name,
            version,
            description: package.description.clone(),
            keywords: package.keywords.clone(),
            license: package.license.clone(),
            homepage: package.homepage.clone(),
            repository: package.repository.clone(),
            author: package.author.clone(),
            os: Vec::new(),
            cpu: Vec::new(),
            bin,
            files,
            optional_dependencies: None,
        }
    }

    /// Pretty JSON with a trailing newline, as npm writes it.
    pub fn to_json_string(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Builds the manifest of one platform package.
///
/// The binary is the executable entry and the first listed file; `files`
/// follow verbatim.
pub fn format_package_json(
    def: &PackageDefinition,
    package: &PackageSettings,
    files: &[String],
) -> PackageManifest {
    let mut included = Vec::with_capacity(files.len() + 1);
    included.push(def.bin.clone());
    included.extend(files.iter().cloned());

    let mut manifest = PackageManifest::base(
        package.scoped_name(&def.name),
        def.version.clone(),
        package,
        BinEntry::Path(def.bin.clone()),
        included,
    );
    manifest.os = vec![def.os.clone()];
    manifest.cpu = vec![def.cpu.clone()];
    manifest
}

/// Builds the umbrella manifest.
///
/// Every platform package becomes an optional dependency pinned to the
/// release version, so npm installs only the one matching the host.
pub fn format_main_package_json(
    defs: &[PackageDefinition],
    metadata: &ReleaseMetadata,
    package: &PackageSettings,
    files: &[String],
) -> PackageManifest {
    let mut included = Vec::with_capacity(files.len() + 1);
    included.push(DISPATCHER_FILE.to_string());
    included.extend(files.iter().cloned());

    let commands = BTreeMap::from([(metadata.project_name.clone(), DISPATCHER_FILE.to_string())]);

    let dependencies = defs
        .iter()
        .map(|def| (package.scoped_name(&def.name), metadata.version.clone()))
        .collect();

    let mut manifest = PackageManifest::base(
        package.scoped_name(&metadata.project_name),
        metadata.version.clone(),
        package,
        BinEntry::Commands(commands),
        included,
    );
    manifest.optional_dependencies = Some(dependencies);
    manifest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::RuntimeTarget;
    use serde_json::json;

    fn metadata() -> ReleaseMetadata {
        ReleaseMetadata {
            project_name: "mytool".into(),
            tag: "v1.2.3".into(),
            previous_tag: String::new(),
            version: "1.2.3".into(),
            commit: String::new(),
            date: String::new(),
            runtime: RuntimeTarget::default(),
        }
    }

    fn definition(os: &str, cpu: &str, bin: &str) -> PackageDefinition {
        let name = format!("mytool-{os}-{cpu}");
        PackageDefinition {
            destination_binary: format!("{name}/{bin}"),
            name,
            os: os.into(),
            cpu: cpu.into(),
            bin: bin.into(),
            version: "1.2.3".into(),
            source: format!("dist/mytool_{os}_{cpu}/{bin}"),
        }
    }

    #[test]
    fn platform_manifest_declares_constraints() {
        let package = PackageSettings {
            description: Some("My tool".into()),
            keywords: vec!["cli".into()],
            ..Default::default()
        };
        let manifest = format_package_json(
            &definition("win32", "x64", "mytool.exe"),
            &package,
            &["README.md".into()],
        );
        let value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "mytool-win32-x64",
                "version": "1.2.3",
                "description": "My tool",
                "keywords": ["cli"],
                "os": ["win32"],
                "cpu": ["x64"],
                "bin": "mytool.exe",
                "files": ["mytool.exe", "README.md"]
            })
        );
    }

    #[test]
    fn platform_manifest_applies_scope() {
        let package = PackageSettings {
            prefix: Some("@acme".into()),
            ..Default::default()
        };
        let manifest = format_package_json(&definition("linux", "arm64", "mytool"), &package, &[]);
        assert_eq!(manifest.name, "@acme/mytool-linux-arm64");
    }

    #[test]
    fn umbrella_pins_every_platform_package() {
        let package = PackageSettings {
            prefix: Some("@acme".into()),
            license: Some("MIT".into()),
            ..Default::default()
        };
        let defs = [
            definition("darwin", "x64", "mytool"),
            definition("linux", "arm64", "mytool"),
        ];
        let manifest = format_main_package_json(&defs, &metadata(), &package, &["LICENSE".into()]);
        let value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "@acme/mytool",
                "version": "1.2.3",
                "license": "MIT",
                "bin": { "mytool": "index.js" },
                "files": ["index.js", "LICENSE"],
                "optionalDependencies": {
                    "@acme/mytool-darwin-x64": "1.2.3",
                    "@acme/mytool-linux-arm64": "1.2.3"
                }
            })
        );
    }

    #[test]
    fn umbrella_without_platforms_is_still_valid() {
        let manifest = format_main_package_json(&[], &metadata(), &PackageSettings::default(), &[]);
        let json = manifest.to_json_string().unwrap();
        assert!(json.ends_with("}\n"));
        let parsed: PackageManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.optional_dependencies, Some(BTreeMap::new()));
    }
}
