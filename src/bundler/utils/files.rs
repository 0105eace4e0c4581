//! Extra file discovery.

use crate::bundler::error::{Error, Result};
use std::collections::BTreeSet;
use std::path::Path;

/// Result of expanding the extra-file patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMatches {
    /// Project-relative paths with `/` separators, sorted, no duplicates
    pub files: Vec<String>,
    /// Patterns that matched no file, in the order given
    pub unmatched: Vec<String>,
}

/// Expands glob `patterns` relative to `project_dir`.
///
/// The project directory is matched literally, so glob metacharacters in its
/// path do not change what a pattern selects. Directories are skipped.
pub fn find_files(project_dir: &Path, patterns: &[String]) -> Result<FileMatches> {
    let base = project_dir.to_str().ok_or_else(|| {
        Error::GenericError(format!("project path is not valid UTF-8: {project_dir:?}"))
    })?;
    let base = glob::Pattern::escape(base);

    let mut found = BTreeSet::new();
    let mut unmatched = Vec::new();

    for pattern in patterns {
        let absolute = Path::new(&base).join(pattern);
        let absolute = absolute
            .to_str()
            .ok_or_else(|| Error::GenericError(format!("pattern is not valid UTF-8: {pattern:?}")))?;

        let mut matched = 0usize;
        for entry in glob::glob(absolute)? {
            let path = entry.map_err(|e| Error::GenericError(format!("reading {pattern}: {e}")))?;
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(project_dir).map_err(|e| {
                Error::GenericError(format!("{} is outside the project: {e}", path.display()))
            })?;
            let relative: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            found.insert(relative.join("/"));
            matched += 1;
        }

        if matched == 0 {
            log::debug!("Pattern `{pattern}` matched no files");
            unmatched.push(pattern.clone());
        }
    }

    Ok(FileMatches {
        files: found.into_iter().collect(),
        unmatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_patterns_relative_to_project() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "readme").unwrap();
        std::fs::write(dir.path().join("LICENSE"), "license").unwrap();
        std::fs::create_dir_all(dir.path().join("docs/guide")).unwrap();
        std::fs::write(dir.path().join("docs/guide/intro.md"), "intro").unwrap();

        let matches = find_files(
            dir.path(),
            &["README.md".into(), "docs/**/*.md".into(), "LICENSE".into(), "*.md".into()],
        )
        .unwrap();
        assert_eq!(matches.files, vec!["LICENSE", "README.md", "docs/guide/intro.md"]);
        assert!(matches.unmatched.is_empty());
    }

    #[test]
    fn unmatched_pattern_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let matches = find_files(dir.path(), &["missing.txt".into()]).unwrap();
        assert!(matches.files.is_empty());
        assert_eq!(matches.unmatched, vec!["missing.txt"]);
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_files(dir.path(), &["[".into()]).is_err());
    }

    #[test]
    fn project_path_with_glob_characters_is_literal() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("proj[1]");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join("README.md"), "readme").unwrap();
        std::fs::create_dir_all(dir.path().join("proj1")).unwrap();
        std::fs::write(dir.path().join("proj1/README.md"), "decoy").unwrap();

        let matches = find_files(&project, &["README.md".into(), "*.md".into()]).unwrap();
        assert_eq!(matches.files, vec!["README.md"]);
        assert!(matches.unmatched.is_empty());
    }
}
