//! Package metadata applied to every generated manifest.

/// npm metadata shared by the platform packages and the umbrella package.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_npm::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     description: Some("My tool, installable from npm".into()),
///     prefix: Some("@acme".into()),
///     keywords: vec!["cli".into()],
///     ..Default::default()
/// };
/// assert_eq!(settings.scoped_name("mytool"), "@acme/mytool");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSettings {
    /// Package description.
    pub description: Option<String>,

    /// npm scope the packages are published under, e.g. `@acme`.
    ///
    /// Default: None (unscoped packages)
    pub prefix: Option<String>,

    /// Keywords listed in every manifest.
    pub keywords: Vec<String>,

    /// SPDX license identifier.
    pub license: Option<String>,

    /// Homepage URL.
    pub homepage: Option<String>,

    /// Repository URL.
    pub repository: Option<String>,

    /// Package author, `Name <email>`.
    pub author: Option<String>,
}

impl PackageSettings {
    /// Returns the scope prefix, ignoring an empty one.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// Returns `name` qualified with the scope prefix when one is set.
    pub fn scoped_name(&self, name: &str) -> String {
        match self.prefix() {
            Some(prefix) => format!("{prefix}/{name}"),
            None => name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscoped_without_prefix() {
        let settings = PackageSettings::default();
        assert_eq!(settings.scoped_name("mytool-linux-x64"), "mytool-linux-x64");
    }

    #[test]
    fn empty_prefix_is_ignored() {
        let settings = PackageSettings {
            prefix: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(settings.prefix(), None);
        assert_eq!(settings.scoped_name("mytool"), "mytool");
    }
}
