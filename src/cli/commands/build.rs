//! `build` subcommand.

use crate::bundler::{NpmBundler, PackageSettings, Settings, SettingsBuilder};
use crate::cli::{BuildArgs, RuntimeConfig};
use crate::error::Result;
use crate::metadata::{ProjectConfig, load_project_config};

/// Builds every package and prints a summary.
pub async fn execute(args: &BuildArgs, config: &RuntimeConfig) -> Result<i32> {
    let layout = super::layout(&args.project)?;
    let project = super::project_directory(&args.project)?;
    let file_config = load_project_config(&project).await?.unwrap_or_default();
    let settings = merge_settings(layout, args, file_config)?;

    let report = NpmBundler::new(settings).build(config).await?;

    let output = config.output();
    for package in &report.platform_packages {
        output.indent(&format!("{}_{} → {}", package.os, package.cpu, package.name))?;
    }
    output.indent(&format!("umbrella → {}", report.umbrella_directory.display()))?;
    Ok(0)
}

/// Combines command line options with `npm-bundle.toml`; the command line wins.
pub fn merge_settings(
    layout: SettingsBuilder,
    args: &BuildArgs,
    file: ProjectConfig,
) -> Result<Settings> {
    fn pick(cli: &Option<String>, file: Option<String>) -> Option<String> {
        cli.clone().or(file)
    }
    fn pick_list(cli: &[String], file: Option<Vec<String>>) -> Vec<String> {
        if cli.is_empty() {
            file.unwrap_or_default()
        } else {
            cli.to_vec()
        }
    }

    let package = PackageSettings {
        description: pick(&args.description, file.description),
        prefix: pick(&args.prefix, file.prefix),
        keywords: pick_list(&args.keywords, file.keywords),
        license: pick(&args.license, file.license),
        homepage: pick(&args.homepage, file.homepage),
        repository: pick(&args.repository, file.repository),
        author: pick(&args.author, file.author),
    };

    Ok(layout
        .package_settings(package)
        .builder(pick(&args.builder, file.builder))
        .files(pick_list(&args.files, file.files))
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Args, Command};
    use clap::Parser;

    fn build_args(argv: &[&str]) -> BuildArgs {
        let mut full = vec!["kodegen_bundler_npm", "build"];
        full.extend_from_slice(argv);
        match Args::try_parse_from(full).unwrap().command {
            Command::Build(build) => build,
            Command::Publish(_) => unreachable!(),
        }
    }

    #[test]
    fn command_line_wins_over_config_file() {
        let args = build_args(&["--project", "/work", "--prefix", "@cli", "-k", "a,b"]);
        let file = ProjectConfig {
            prefix: Some("@file".into()),
            description: Some("from file".into()),
            keywords: Some(vec!["file".into()]),
            files: Some(vec!["README.md".into()]),
            builder: Some("tool".into()),
            ..Default::default()
        };
        let settings =
            merge_settings(SettingsBuilder::new().project_directory("/work"), &args, file).unwrap();

        let package = settings.package();
        assert_eq!(package.prefix(), Some("@cli"));
        assert_eq!(package.description.as_deref(), Some("from file"));
        assert_eq!(package.keywords, vec!["a", "b"]);
        assert_eq!(settings.files(), ["README.md".to_string()]);
        assert_eq!(settings.builder(), Some("tool"));
    }
}
