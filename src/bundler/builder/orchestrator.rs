//! Main build orchestration.
//!
//! This module provides the [`NpmBundler`] orchestrator that coordinates the
//! pure package transformations with the file-system writes.

use crate::bundler::{
    Reporter, Settings,
    dispatcher::generate_dispatcher,
    error::{Context, Error, Result},
    package::{
        PackageDefinition, format_main_package_json, format_package_json,
        manifest::DISPATCHER_FILE, transform_package,
    },
    utils::{files::find_files, fs},
};
use crate::metadata::{
    self, BinaryArtifact, ReleaseMetadata, binary_artifacts_from, validate_binary_artifacts,
    validate_metadata,
};
use std::path::PathBuf;

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Release metadata the packages were built from
    pub metadata: ReleaseMetadata,
    /// One entry per written platform package, in artifact order
    pub platform_packages: Vec<PackageDefinition>,
    /// Directory of the umbrella package
    pub umbrella_directory: PathBuf,
    /// Extra files copied into every package, project-relative
    pub files: Vec<String>,
}

/// Main npm bundler orchestrator.
///
/// Runs `Load → Validate → PerPlatform* → Umbrella`. Everything that can be
/// rejected without touching the disk (validation, path decomposition,
/// duplicate platforms, dispatcher encoding) is checked before the first
/// directory is created. Any failure aborts the run; a failed run may leave
/// an incomplete `npm/` tree that must not be published.
#[derive(Debug, Clone)]
pub struct NpmBundler {
    settings: Settings,
}

impl NpmBundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Builds every platform package and the umbrella package.
    pub async fn build<R: Reporter + ?Sized>(&self, reporter: &R) -> Result<BuildReport> {
        let settings = &self.settings;
        reporter.verbose(&format!(
            "Start build package in {}",
            settings.project_directory().display()
        ))?;

        let artifacts = metadata::load_artifacts(&settings.artifacts_path()).await?;
        let metadata = metadata::load_metadata(&settings.metadata_path()).await?;
        let builder = settings.builder_or(&metadata.project_name).to_string();

        if artifacts.is_empty() {
            return Err(Error::EmptyArtifactSet { builder });
        }
        reporter.verbose(&format!("Found {} artifact(s)", artifacts.len()))?;
        for artifact in &artifacts {
            reporter.verbose(&format!(
                "{}: {}",
                artifact.name.as_deref().unwrap_or("<unnamed>"),
                artifact.path.as_deref().unwrap_or("<no path>")
            ))?;
        }

        validate_metadata(&metadata).map_err(|issues| Error::InvalidMetadata { issues })?;
        report_metadata(&metadata, reporter)?;

        let candidates = binary_artifacts_from(&artifacts, &builder);
        if candidates.is_empty() {
            return Err(Error::EmptyBinaryArtifactSet { builder });
        }
        let binaries = validate_binary_artifacts(&candidates).map_err(|issues| {
            log::error!("Invalid binary artifacts");
            for issue in &issues {
                log::error!("{issue}");
            }
            Error::InvalidBinaryArtifact { issues }
        })?;
        reporter.verbose(&format!(
            "Found {} binary artifact(s) from {} builder",
            binaries.len(),
            builder
        ))?;

        let matches = find_files(settings.project_directory(), settings.files())?;
        for pattern in &matches.unmatched {
            reporter.warn(&format!("Pattern `{pattern}` matched no files"))?;
        }
        let files = matches.files;
        reporter.verbose(&format!("Found {} extra file(s)", files.len()))?;
        for file in &files {
            reporter.verbose(&format!("  {file}"))?;
        }

        let definitions = binaries
            .iter()
            .map(|artifact| transform_package(artifact, &metadata))
            .collect::<Result<Vec<_>>>()?;
        let dispatcher = generate_dispatcher(&definitions, settings.package().prefix())?;

        reporter.progress(&format!(
            "Writing {} platform package(s) to {}",
            definitions.len(),
            settings.npm_directory().display()
        ))?;
        for (artifact, definition) in binaries.iter().zip(&definitions) {
            self.write_platform_package(artifact, definition, &files, reporter)
                .await
                .with_context(|| format!("writing package {}", definition.name))?;
        }
        reporter.verbose(&format!(
            "Built {} platform package(s)",
            definitions.len()
        ))?;

        let umbrella_directory = self
            .write_umbrella_package(&definitions, &metadata, &files, &dispatcher, reporter)
            .await?;

        reporter.success(&format!(
            "Created {} with {} platform package(s) in {}",
            settings.package().scoped_name(&metadata.project_name),
            definitions.len(),
            settings.npm_directory().display()
        ))?;

        Ok(BuildReport {
            metadata,
            platform_packages: definitions,
            umbrella_directory,
            files,
        })
    }

    async fn write_platform_package<R: Reporter + ?Sized>(
        &self,
        artifact: &BinaryArtifact,
        definition: &PackageDefinition,
        files: &[String],
        reporter: &R,
    ) -> Result<()> {
        let settings = &self.settings;
        reporter.section(&format!("Built package {}", definition.name))?;

        let package_dir = settings.package_directory(&definition.name);
        fs::create_dir_all(&package_dir, true).await?;
        reporter.verbose(&format!("Created package path: {}", package_dir.display()))?;

        let source = settings.project_path(&artifact.path);
        let destination = settings.npm_directory().join(&definition.destination_binary);
        fs::copy_file(&source, &destination).await?;
        reporter.verbose(&format!(
            "Created package {}: {}",
            definition.name, definition.destination_binary
        ))?;

        let manifest = format_package_json(definition, settings.package(), files);
        let manifest_path = settings.package_json(&definition.name);
        fs::write_file(&manifest_path, manifest.to_json_string()?).await?;
        reporter.verbose(&format!(
            "Written package json file: {}",
            manifest_path.display()
        ))?;

        self.copy_package_files(&definition.name, files).await?;
        reporter.verbose(&format!("Copied {} extra file(s)", files.len()))?;
        log::info!("Built platform package {}", definition.name);
        Ok(())
    }

    async fn write_umbrella_package<R: Reporter + ?Sized>(
        &self,
        definitions: &[PackageDefinition],
        metadata: &ReleaseMetadata,
        files: &[String],
        dispatcher: &str,
        reporter: &R,
    ) -> Result<PathBuf> {
        let settings = &self.settings;
        let name = &metadata.project_name;
        reporter.section(&format!("Built package {name}"))?;

        let package_dir = settings.package_directory(name);
        fs::create_dir_all(&package_dir, true).await?;
        reporter.verbose(&format!("Created package path: {}", package_dir.display()))?;

        let manifest = format_main_package_json(definitions, metadata, settings.package(), files);
        let manifest_path = settings.package_json(name);
        fs::write_file(&manifest_path, manifest.to_json_string()?).await?;
        reporter.verbose(&format!(
            "Written package json file: {}",
            manifest_path.display()
        ))?;

        let dispatcher_path = package_dir.join(DISPATCHER_FILE);
        fs::write_executable(&dispatcher_path, dispatcher).await?;
        reporter.verbose(&format!(
            "Written package {} file: {}",
            DISPATCHER_FILE,
            dispatcher_path.display()
        ))?;

        self.copy_package_files(name, files).await?;
        reporter.verbose(&format!("Copied {} extra file(s)", files.len()))?;
        log::info!("Built umbrella package {name}");
        Ok(package_dir)
    }

    async fn copy_package_files(&self, name: &str, files: &[String]) -> Result<()> {
        for file in files {
            let source = self.settings.project_path(file);
            let destination = self.settings.package_directory(name).join(file);
            fs::copy_file(&source, &destination).await?;
        }
        Ok(())
    }
}

fn report_metadata<R: Reporter + ?Sized>(metadata: &ReleaseMetadata, reporter: &R) -> Result<()> {
    reporter.verbose("Loaded metadata:")?;
    for (key, value) in [
        ("project_name", &metadata.project_name),
        ("tag", &metadata.tag),
        ("previous_tag", &metadata.previous_tag),
        ("version", &metadata.version),
        ("commit", &metadata.commit),
        ("date", &metadata.date),
        ("runtime_goos", &metadata.runtime.goos),
        ("runtime_goarch", &metadata.runtime.goarch),
    ] {
        reporter.verbose(&format!("  {key}: {value}"))?;
    }
    Ok(())
}
