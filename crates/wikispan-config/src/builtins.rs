//! Builtin definition selection.

use serde::{Deserialize, Serialize};

/// Which builtin token definitions to load.
///
/// An empty `include` list means "all builtins". `exclude` may contain
/// `"*"` to drop everything not explicitly included. Unset lists are left
/// alone by [`BuiltinsConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct BuiltinsConfig {
    /// Builtins to load (empty = all)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    /// Builtins to skip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl BuiltinsConfig {
    /// Effective include list.
    pub fn include(&self) -> &[String] {
        self.include.as_deref().unwrap_or_default()
    }

    /// Effective exclude list.
    pub fn exclude(&self) -> &[String] {
        self.exclude.as_deref().unwrap_or_default()
    }

    /// Merge another BuiltinsConfig into this one.
    ///
    /// Only lists set in `other` replace those in `self`.
    pub fn merge(&mut self, other: &BuiltinsConfig) {
        if other.include.is_some() {
            self.include = other.include.clone();
        }
        if other.exclude.is_some() {
            self.exclude = other.exclude.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unset_lists() {
        let mut base: BuiltinsConfig = toml::from_str(r#"Exclude = ["wiki_comment"]"#).unwrap();
        let other: BuiltinsConfig = toml::from_str(r#"Include = ["wiki_link"]"#).unwrap();
        base.merge(&other);

        assert_eq!(base.include(), ["wiki_link".to_string()]);
        assert_eq!(base.exclude(), ["wiki_comment".to_string()]);
    }

    #[test]
    fn test_explicit_empty_list_clears() {
        let mut base: BuiltinsConfig = toml::from_str(r#"Exclude = ["wiki_comment"]"#).unwrap();
        base.merge(&toml::from_str("Exclude = []").unwrap());
        assert!(base.exclude().is_empty());
    }
}
