//! Wikispan Registry
//!
//! This crate holds the inline construct definitions a scan consults.
//! Hosts describe each construct as a [`TokenDefinition`] and register it;
//! the registry rejects anything that would make scanning ambiguous or
//! non-terminating.
//!
//! # Lifecycle
//!
//! construct → populate → freeze → scan
//!
//! - [`Registry::register`] compiles a definition and keeps the list sorted
//!   by priority, then by registration order
//! - [`Registry::freeze`] turns the registry into a [`FrozenRegistry`], a cheap
//!   clonable handle that can be shared between threads and offers no way to
//!   register further definitions
//!
//! # Example
//!
//! ```
//! use wikispan_registry::{Registry, TokenDefinition};
//!
//! let mut registry = Registry::new();
//! registry
//!     .register(
//!         TokenDefinition::new("wiki_link", r"\[\[ *(.+?) *\| *(.+?) *\]\]")
//!             .field("display", 1)
//!             .field("target", 2),
//!     )
//!     .unwrap();
//!
//! // Same pattern under another name is rejected
//! let dup = registry.register(TokenDefinition::new("wiki_comment", r"\[\[ *(.+?) *\| *(.+?) *\]\]"));
//! assert!(dup.is_err());
//!
//! let frozen = registry.freeze();
//! assert_eq!(frozen.names(), vec!["wiki_link"]);
//! ```

pub mod builtin;
pub mod definition;

pub use builtin::DefinitionFilter;
pub use definition::{capture, CompiledDefinition, Construct, FieldSpec, Fields, TokenDefinition};

use log::debug;
use std::ops::Deref;
use std::sync::Arc;
use wikispan_config::{Config, TokenConfig};
use wikispan_core::RegistrationError;

/// Ordered collection of compiled token definitions.
#[derive(Debug, Default)]
pub struct Registry {
    /// Registered definitions (sorted by priority, then registration order)
    definitions: Vec<CompiledDefinition>,
    /// Sequence number handed to the next registration
    next_order: usize,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every builtin definition.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for definition in builtin::builtin_definitions() {
            if let Err(e) = registry.register(definition) {
                log::error!("builtin definition rejected: {}", e);
            }
        }
        registry
    }

    /// Build a registry from configuration.
    ///
    /// Builtins selected by `[builtins]` are registered first, followed by the
    /// `[[token]]` definitions in file order. The first rejected definition
    /// aborts the build.
    pub fn from_config(config: &Config) -> Result<Self, RegistrationError> {
        let mut registry = Self::new();
        let filter = DefinitionFilter::from(&config.builtins);

        for definition in builtin::load_builtin_definitions(&filter) {
            registry.register(definition)?;
        }
        for token in &config.tokens {
            registry.register(TokenDefinition::from(token))?;
        }

        Ok(registry)
    }

    /// Register a definition.
    ///
    /// # Errors
    /// - [`RegistrationError::DuplicateName`] if the name is taken
    /// - [`RegistrationError::DuplicatePattern`] if another definition has the
    ///   exact same pattern text
    /// - [`RegistrationError::InvalidPattern`] if the pattern does not compile or
    ///   can match an empty string
    pub fn register(&mut self, definition: TokenDefinition) -> Result<(), RegistrationError> {
        if self.get(definition.name()).is_some() {
            return Err(RegistrationError::DuplicateName {
                name: definition.name().to_string(),
            });
        }
        if let Some(existing) = self
            .definitions
            .iter()
            .find(|d| d.pattern() == definition.pattern())
        {
            return Err(RegistrationError::DuplicatePattern {
                name: definition.name().to_string(),
                existing: existing.name().to_string(),
                pattern: definition.pattern().to_string(),
            });
        }

        let compiled = definition.compile(self.next_order)?;
        debug!(
            "registered `{}` (priority {}, order {}): {}",
            compiled.name(),
            compiled.priority(),
            compiled.order(),
            compiled.pattern()
        );

        self.next_order += 1;
        self.definitions.push(compiled);
        self.definitions.sort_by_key(|d| (d.priority(), d.order()));
        Ok(())
    }

    /// Get the number of registered definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether no definition is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions in scan order.
    pub fn definitions(&self) -> &[CompiledDefinition] {
        &self.definitions
    }

    /// Definition names in scan order.
    pub fn names(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.name()).collect()
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<&CompiledDefinition> {
        self.definitions.iter().find(|d| d.name() == name)
    }

    /// Finish configuration.
    pub fn freeze(self) -> FrozenRegistry {
        FrozenRegistry {
            inner: Arc::new(self),
        }
    }
}

/// Read-only, shareable registry.
///
/// Dereferences to [`Registry`] for lookups; registration needs `&mut
/// Registry` and is therefore unreachable once frozen.
#[derive(Debug, Clone)]
pub struct FrozenRegistry {
    inner: Arc<Registry>,
}

impl Deref for FrozenRegistry {
    type Target = Registry;

    fn deref(&self) -> &Registry {
        &self.inner
    }
}

impl From<&TokenConfig> for TokenDefinition {
    fn from(config: &TokenConfig) -> Self {
        let mut definition =
            TokenDefinition::new(config.name.clone(), config.pattern.clone()).priority(config.priority);
        for field in &config.fields {
            definition = definition.field_spec(FieldSpec {
                name: field.name.clone(),
                group: field.group.clone(),
                required: field.required,
            });
        }
        if let Some(inner) = &config.inner {
            definition = definition.inner(inner.clone());
        }
        definition
    }
}
