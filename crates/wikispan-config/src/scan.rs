//! Scan settings.
//!
//! This module contains the `ScanConfig` struct which controls how
//! text spans are scanned once the registry is built. Keys left out of a
//! file stay unset, so merging an override only touches what it names.

use serde::{Deserialize, Serialize};

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Scan settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ScanConfig {
    /// Maximum nesting depth when re-scanning inner content of a token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    /// Re-scan the inner group of definitions that declare one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<bool>,
}

impl ScanConfig {
    /// Effective maximum nesting depth. Default: 4
    pub fn max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    /// Whether inner groups are scanned. Default: true
    pub fn nested(&self) -> bool {
        self.nested.unwrap_or(true)
    }

    /// Merge another ScanConfig into this one.
    ///
    /// Only keys set in `other` replace those in `self`.
    pub fn merge(&mut self, other: &ScanConfig) {
        self.max_depth = other.max_depth.or(self.max_depth);
        self.nested = other.nested.or(self.nested);
    }
}
