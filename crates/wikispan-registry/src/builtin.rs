//! Built-in definitions and definition filtering.
//!
//! This module provides:
//! - The wiki-syntax definitions shipped with wikispan
//! - Metadata about them for listings
//! - A filter for selective loading

use crate::TokenDefinition;
use wikispan_config::BuiltinsConfig;

/// `![[ alt | target ]]`
pub const WIKI_IMAGE: &str = "wiki_image";
/// `[[ display | target ]]`
pub const WIKI_LINK: &str = "wiki_link";
/// `%% text %%`
pub const WIKI_COMMENT: &str = "wiki_comment";

const WIKI_IMAGE_PATTERN: &str = r"!\[\[ *(.+?) *\| *(.+?) *\]\]";
const WIKI_LINK_PATTERN: &str = r"\[\[ *(.+?) *\| *(.+?) *\]\]";
const WIKI_COMMENT_PATTERN: &str = r"%%(.+?)%%";

/// Get all built-in definitions, in registration order.
pub fn builtin_definitions() -> Vec<TokenDefinition> {
    builtin_definition_info()
        .iter()
        .filter_map(|info| create_builtin(info.name))
        .collect()
}

/// Definition metadata.
#[derive(Debug, Clone)]
pub struct DefinitionInfo {
    /// Definition name
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
    /// Priority (lower = higher priority)
    pub priority: i32,
}

/// Get information about all built-in definitions.
pub fn builtin_definition_info() -> Vec<DefinitionInfo> {
    vec![
        DefinitionInfo {
            name: WIKI_IMAGE,
            description: "Embedded image `![[ alt | target ]]`",
            priority: 10,
        },
        DefinitionInfo {
            name: WIKI_LINK,
            description: "Wiki link `[[ display | target ]]`; the display text may hold other tokens",
            priority: 20,
        },
        DefinitionInfo {
            name: WIKI_COMMENT,
            description: "Inline comment `%% text %%`",
            priority: 30,
        },
    ]
}

/// Create a built-in definition by name.
///
/// # Returns
/// - `Some(definition)` if the name matches a built-in
/// - `None` if the name is not recognized
pub fn create_builtin(name: &str) -> Option<TokenDefinition> {
    let priority = builtin_definition_info()
        .into_iter()
        .find(|info| info.name == name)?
        .priority;

    let definition = match name {
        WIKI_IMAGE => TokenDefinition::new(WIKI_IMAGE, WIKI_IMAGE_PATTERN)
            .field("alt", 1)
            .field("target", 2),
        WIKI_LINK => TokenDefinition::new(WIKI_LINK, WIKI_LINK_PATTERN)
            .field("display", 1)
            .field("target", 2)
            .inner(1),
        WIKI_COMMENT => TokenDefinition::new(WIKI_COMMENT, WIKI_COMMENT_PATTERN).field("text", 1),
        _ => return None,
    };
    Some(definition.priority(priority))
}

/// Definition filter for selective loading.
#[derive(Debug, Clone, Default)]
pub struct DefinitionFilter {
    /// Definitions to include (if empty, include all)
    pub include: Vec<String>,
    /// Definitions to exclude
    pub exclude: Vec<String>,
}

impl DefinitionFilter {
    /// Check if a definition should be loaded.
    pub fn should_load(&self, name: &str) -> bool {
        if self.exclude.iter().any(|n| n == "*") {
            return self.include.iter().any(|n| n == name);
        }
        if self.exclude.iter().any(|n| n == name) {
            return false;
        }

        if self.include.is_empty() {
            return true;
        }
        self.include.iter().any(|n| n == name)
    }
}

impl From<&BuiltinsConfig> for DefinitionFilter {
    fn from(config: &BuiltinsConfig) -> Self {
        Self {
            include: config.include().to_vec(),
            exclude: config.exclude().to_vec(),
        }
    }
}

/// Load built-in definitions with a filter.
pub fn load_builtin_definitions(filter: &DefinitionFilter) -> Vec<TokenDefinition> {
    builtin_definition_info()
        .iter()
        .filter(|info| filter.should_load(info.name))
        .filter_map(|info| create_builtin(info.name))
        .collect()
}
