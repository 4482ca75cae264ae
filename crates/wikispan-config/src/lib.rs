//! Wikispan Config
//!
//! This crate handles configuration loading and management
//! for wikispan, supporting TOML configuration files.
//!
//! # Overview
//!
//! Configuration is loaded from platform-specific locations:
//! - Linux: `~/.config/wikispan/config.toml`
//! - macOS: `~/Library/Application Support/wikispan/config.toml`
//! - Windows: `%APPDATA%\wikispan\config.toml`
//!
//! Besides scan settings and builtin selection, a config file can declare
//! any number of custom inline constructs as `[[token]]` tables.
//!
//! # Example
//!
//! ```no_run
//! use wikispan_config::Config;
//!
//! // Load config with defaults
//! let config = Config::load().unwrap();
//!
//! // Or load with an override file
//! let config = Config::load_with_override(Some("./custom.toml")).unwrap();
//! ```

mod builtins;
mod scan;
mod tokens;

pub use builtins::BuiltinsConfig;
pub use scan::ScanConfig;
pub use tokens::{FieldConfig, TokenConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wikispan_core::{Result, WikispanError};

/// Default TOML configuration string.
const DEFAULT_TOML: &str = r#"[scan]
MaxDepth = 4
Nested   = true

[builtins]
Include = []
Exclude = []
"#;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Builtin definition selection
    #[serde(default)]
    pub builtins: BuiltinsConfig,

    /// Custom token definitions, registered after the builtins
    #[serde(default, rename = "token")]
    pub tokens: Vec<TokenConfig>,
}

impl Config {
    /// Returns the default TOML configuration string.
    ///
    /// # Example
    ///
    /// ```
    /// use wikispan_config::Config;
    /// let toml = Config::default_toml();
    /// assert!(toml.contains("[scan]"));
    /// assert!(toml.contains("[builtins]"));
    /// ```
    pub fn default_toml() -> &'static str {
        DEFAULT_TOML
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "wikispan")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Load configuration from the default platform-specific path.
    ///
    /// If no config file exists, returns the default configuration.
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| WikispanError::Config(format!("Parse error in {}: {}", path.display(), e)))
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Example
    ///
    /// ```
    /// use wikispan_config::Config;
    /// let config = Config::parse("[scan]\nMaxDepth = 2").unwrap();
    /// assert_eq!(config.scan.max_depth(), 2);
    /// assert!(config.tokens.is_empty());
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| WikispanError::Config(format!("Parse error: {}", e)))
    }

    /// Load configuration with an optional override file or string.
    ///
    /// 1. Load the base config from the default location
    /// 2. If `override_config` is a path to an existing file, load and merge it
    /// 3. Otherwise treat it as an inline TOML string and merge that
    pub fn load_with_override(override_config: Option<&str>) -> Result<Self> {
        let mut config = Self::load()?;

        if let Some(override_str) = override_config {
            let override_path = Path::new(override_str);

            let override_config = if override_path.exists() {
                Self::load_from(override_path)?
            } else {
                toml::from_str(override_str)
                    .map_err(|e| WikispanError::Config(format!("Override parse error: {}", e)))?
            };

            config.merge(&override_config);
        }

        Ok(config)
    }

    /// Merge another config into this one.
    ///
    /// Scan and builtin keys set in `other` replace those in `self`; keys
    /// `other` leaves out keep their current value. Token definitions from
    /// `other` are appended, so an override file adds constructs on top of
    /// the base file.
    ///
    /// # Example
    ///
    /// ```
    /// use wikispan_config::Config;
    ///
    /// let mut base = Config::default();
    /// let override_config: Config = toml::from_str(r#"
    ///     [scan]
    ///     Nested = false
    /// "#).unwrap();
    ///
    /// base.merge(&override_config);
    /// assert!(!base.scan.nested());
    /// ```
    pub fn merge(&mut self, other: &Config) {
        self.scan.merge(&other.scan);
        self.builtins.merge(&other.builtins);
        self.tokens.extend(other.tokens.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikispan_core::GroupRef;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.max_depth(), 4);
        assert!(config.scan.nested());
        assert!(config.builtins.include().is_empty());
        assert!(config.tokens.is_empty());
    }

    #[test]
    fn test_default_toml_parses() {
        let config: Config = toml::from_str(DEFAULT_TOML).unwrap();
        let defaults = Config::default();
        assert_eq!(config.scan.max_depth(), defaults.scan.max_depth());
        assert_eq!(config.scan.nested(), defaults.scan.nested());
        assert!(config.builtins.include().is_empty());
        assert!(config.builtins.exclude().is_empty());
        assert!(config.tokens.is_empty());
    }

    #[test]
    fn test_tokens_section() {
        let config = Config::parse(
            r#"
            [[token]]
            Name = "mention"
            Pattern = '@(\w+)'
            Fields = [{ Name = "user", Group = 1 }]

            [[token]]
            Name = "kbd"
            Pattern = '<kbd>(.+?)</kbd>'
            Priority = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.tokens.len(), 2);
        assert_eq!(config.tokens[0].name, "mention");
        assert_eq!(config.tokens[0].fields[0].group, GroupRef::Index(1));
        assert_eq!(config.tokens[1].priority, 5);
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[scan]\nMaxDepth = \"deep\"").unwrap_err();
        assert!(matches!(err, WikispanError::Config(_)));
    }

    #[test]
    fn test_merge() {
        let mut base = Config::parse(
            r#"
            [[token]]
            Name = "mention"
            Pattern = '@(\w+)'
            "#,
        )
        .unwrap();

        let override_config = Config::parse(
            r#"
            [scan]
            MaxDepth = 1
            [builtins]
            Exclude = ["wiki_comment"]
            [[token]]
            Name = "kbd"
            Pattern = '<kbd>(.+?)</kbd>'
            "#,
        )
        .unwrap();

        base.merge(&override_config);
        assert_eq!(base.scan.max_depth(), 1);
        assert_eq!(base.builtins.exclude(), ["wiki_comment".to_string()]);
        let names: Vec<_> = base.tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["mention", "kbd"]);
    }

    #[test]
    fn test_merge_tokens_only_keeps_base_settings() {
        let mut base = Config::parse(
            r#"
            [scan]
            MaxDepth = 1
            [builtins]
            Exclude = ["wiki_comment"]
            "#,
        )
        .unwrap();

        let override_config = Config::parse(
            r#"
            [[token]]
            Name = "kbd"
            Pattern = '<kbd>(.+?)</kbd>'
            "#,
        )
        .unwrap();

        base.merge(&override_config);
        assert_eq!(base.scan.max_depth(), 1);
        assert_eq!(base.builtins.exclude(), ["wiki_comment".to_string()]);
        assert_eq!(base.tokens.len(), 1);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = Config::parse("[scan]\nMergeText = true").unwrap_err();
        assert!(matches!(err, WikispanError::Config(_)));
        assert!(Config::parse("[[token]]\nName = \"a\"\nPattern = \"a\"\nGruop = 1").is_err());
    }

    #[test]
    fn test_load_with_inline_override() {
        let config = Config::load_with_override(Some("[scan]\nMaxDepth = 1\nNested = false")).unwrap();
        assert_eq!(config.scan.max_depth(), 1);
        assert!(!config.scan.nested());
    }

    #[test]
    fn test_load_with_file_override() {
        let path = std::env::temp_dir().join(format!("wikispan-override-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[[token]]\nName = \"mention\"\nPattern = '@(\\w+)'\nFields = [{ Name = \"user\", Group = \"1\" }]\n",
        )
        .unwrap();

        let config = Config::load_with_override(path.to_str()).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mention = config.tokens.last().unwrap();
        assert_eq!(mention.name, "mention");
        assert_eq!(mention.fields[0].group, GroupRef::Index(1));
    }

    #[test]
    fn test_load_with_bad_inline_override() {
        let err = Config::load_with_override(Some("[scan\nMaxDepth")).unwrap_err();
        assert!(matches!(err, WikispanError::Config(_)));
    }

    #[test]
    fn test_config_path() {
        // On CI/containers this might be None, so we just check it doesn't panic
        if let Some(p) = Config::config_path() {
            assert!(p.to_string_lossy().contains("wikispan"));
        }
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = Config::parse(
            r#"
            [scan]
            MaxDepth = 2
            [[token]]
            Name = "mention"
            Pattern = '@(\w+)'
            Inner = "body"
            Fields = [{ Name = "user", Group = 1 }]
            "#,
        )
        .unwrap();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
