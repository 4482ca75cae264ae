//! User-defined token definitions.
//!
//! Each `[[token]]` table in the configuration file describes one inline
//! construct: its name, pattern, priority and how fields are pulled out of
//! the match.

use serde::{Deserialize, Serialize};
use wikispan_core::GroupRef;

/// One `[[token]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct TokenConfig {
    /// Unique definition name
    pub name: String,

    /// Regular expression matched against raw inline text
    pub pattern: String,

    /// Priority rank (lower = tried first on ties).
    /// Default: 100
    #[serde(default = "default_priority")]
    pub priority: i32,

    /// Capture group whose text is scanned again for nested tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<GroupRef>,

    /// Fields extracted from the match
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// One field extracted from a capture group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct FieldConfig {
    /// Field name on the produced token
    pub name: String,

    /// Capture group providing the value
    pub group: GroupRef,

    /// Whether a missing group makes the match malformed.
    /// Default: true
    #[serde(default = "default_true")]
    pub required: bool,
}

fn default_priority() -> i32 {
    100
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token() {
        let token: TokenConfig = toml::from_str(
            r##"
            Name = "tag"
            Pattern = '#(?P<tag>[A-Za-z][\w-]*)'
            Priority = 50
            Fields = [{ Name = "tag", Group = "tag" }, { Name = "whole", Group = 0, Required = false }]
            "##,
        )
        .unwrap();

        assert_eq!(token.name, "tag");
        assert_eq!(token.priority, 50);
        assert_eq!(token.inner, None);
        assert_eq!(token.fields.len(), 2);
        assert_eq!(token.fields[0].group, GroupRef::Name("tag".into()));
        assert!(token.fields[0].required);
        assert_eq!(token.fields[1].group, GroupRef::Index(0));
        assert!(!token.fields[1].required);
    }

    #[test]
    fn test_defaults() {
        let token: TokenConfig = toml::from_str(
            r#"
            Name = "bang"
            Pattern = '!!'
            Inner = 1
            "#,
        )
        .unwrap();

        assert_eq!(token.priority, 100);
        assert_eq!(token.inner, Some(GroupRef::Index(1)));
        assert!(token.fields.is_empty());
    }
}
