//! Generator configuration and the optional `docblock.toml` file.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Description line written into every new block unless disabled
pub const DEFAULT_DESCRIPTION: &str = "Insert description here";

/// File extensions treated as PHP sources
pub const DEFAULT_EXTENSIONS: &[&str] = &[".php", ".php4", ".php5", ".phps", ".inc"];

/// Conventional config file name looked up next to the working directory
pub const CONFIG_FILE_NAME: &str = "docblock.toml";

/// Errors that can occur when loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid extension '{0}': extensions must start with '.'")]
    InvalidExtension(String),

    #[error("at least one extension is required")]
    NoExtensions,
}

/// Settings for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct GeneratorConfig {
    /// Placeholder description line; empty disables it
    pub description: String,
    /// Emit the empty `@see`/`@since` (and class metadata) tag lines
    pub full: bool,
    /// Document closures under a surrogate name
    pub anonymous: bool,
    /// Count insertions without writing files
    pub dry_run: bool,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Path fragments; any candidate containing one is skipped
    pub exclude: Vec<String>,
    /// Allow-list of declaration names; empty means every name
    pub functions: Vec<String>,
    /// Accepted file extensions, compared case-insensitively
    pub extensions: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
            full: false,
            anonymous: false,
            dry_run: false,
            recursive: false,
            exclude: Vec::new(),
            functions: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or names an unknown key.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        if let Some(bad) = self.extensions.iter().find(|e| !e.starts_with('.')) {
            return Err(ConfigError::InvalidExtension(bad.clone()));
        }
        Ok(())
    }

    /// The placeholder description, if enabled
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        Some(self.description.as_str()).filter(|d| !d.is_empty())
    }

    /// True if the path ends in one of the accepted extensions
    #[must_use]
    pub fn accepts_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|accepted| {
                accepted
                    .strip_prefix('.')
                    .unwrap_or(accepted)
                    .eq_ignore_ascii_case(ext)
            })
    }

    /// True if the path contains any exclusion fragment
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.exclude
            .iter()
            .filter(|fragment| !fragment.is_empty())
            .any(|fragment| path.contains(fragment.as_str()))
    }

    /// Build the declaration name filter
    #[must_use]
    pub fn name_filter(&self) -> NameFilter {
        NameFilter::new(&self.functions)
    }
}

/// Exact-match allow-list of declaration names
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    names: Option<HashSet<String>>,
}

impl NameFilter {
    /// An empty list allows everything
    #[must_use]
    pub fn new(names: &[String]) -> Self {
        let names: HashSet<String> = names
            .iter()
            .filter(|n| !n.is_empty())
            .cloned()
            .collect();
        Self {
            names: (!names.is_empty()).then_some(names),
        }
    }

    #[must_use]
    pub fn allows(&self, name: &str) -> bool {
        self.names.as_ref().map_or(true, |names| names.contains(name))
    }

    #[must_use]
    pub fn is_restricted(&self) -> bool {
        self.names.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.description(), Some("Insert description here"));
        assert!(!config.full);
        assert!(!config.dry_run);
        assert_eq!(config.extensions.len(), 5);
        assert!(!config.name_filter().is_restricted());
    }

    #[test]
    fn parse_empty_file_gives_defaults() {
        let config = GeneratorConfig::parse("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn parse_full_file() {
        let toml = r#"
description = ""
full = true
anonymous = true
dry-run = true
recursive = true
exclude = ["vendor/", "cache"]
functions = ["init", "Main"]
extensions = [".php", ".module"]
"#;
        let config = GeneratorConfig::parse(toml).unwrap();
        assert_eq!(config.description(), None);
        assert!(config.full && config.anonymous && config.dry_run && config.recursive);
        assert_eq!(config.exclude, vec!["vendor/", "cache"]);
        assert!(config.accepts_extension(Path::new("x.module")));
        assert!(!config.accepts_extension(Path::new("x.inc")));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = GeneratorConfig::parse("verbose = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn snake_case_key_rejected() {
        assert!(GeneratorConfig::parse("dry_run = true").is_err());
    }

    #[test]
    fn invalid_extension_rejected() {
        let err = GeneratorConfig::parse(r#"extensions = ["php"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidExtension(e) if e == "php"));
        let err = GeneratorConfig::parse("extensions = []").unwrap_err();
        assert!(matches!(err, ConfigError::NoExtensions));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "full = true\n").unwrap();
        assert!(GeneratorConfig::from_path(&path).unwrap().full);
        assert!(matches!(
            GeneratorConfig::from_path(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let config = GeneratorConfig::default();
        assert!(config.accepts_extension(Path::new("a/B.PHP")));
        assert!(config.accepts_extension(Path::new("lib.Inc")));
        assert!(config.accepts_extension(Path::new("old.php4")));
        assert!(!config.accepts_extension(Path::new("notes.txt")));
        assert!(!config.accepts_extension(Path::new("Makefile")));
        assert!(!config.accepts_extension(Path::new("archive.php.bak")));
    }

    #[test]
    fn exclusion_is_substring_match() {
        let config = GeneratorConfig {
            exclude: vec!["vendor".into(), String::new()],
            ..Default::default()
        };
        assert!(config.is_excluded(&PathBuf::from("src/vendor/lib.php")));
        assert!(config.is_excluded(&PathBuf::from("myvendorlib.php")));
        assert!(!config.is_excluded(&PathBuf::from("src/app.php")));
    }

    #[test]
    fn name_filter_is_exact() {
        let filter = NameFilter::new(&["init".to_string()]);
        assert!(filter.is_restricted());
        assert!(filter.allows("init"));
        assert!(!filter.allows("Init"));
        assert!(!filter.allows("initialize"));
        assert!(NameFilter::new(&[]).allows("anything"));
    }
}
