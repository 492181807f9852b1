/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Field grammar registry.
//!
//! A [`Registry`] maps tag names to shared, immutable [`FieldGrammar`]s.
//! Grammars are fully built, label index included, before they are
//! registered, so lookups never mutate shared state.

use crate::catalog;
use crate::schema::FieldGrammar;
use ironswift_core::error::ConfigError;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::debug;

static STANDARD: OnceLock<Result<Registry, ConfigError>> = OnceLock::new();

/// Tag name to grammar map.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    grammars: HashMap<String, Arc<FieldGrammar>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry holding the built-in catalog.
    ///
    /// # Errors
    /// Returns `ConfigError` if a catalog entry is inconsistent.
    pub fn standard() -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for grammar in catalog::standard_grammars()? {
            registry.register(grammar);
        }
        Ok(registry)
    }

    /// Returns the process-wide registry holding the built-in catalog.
    ///
    /// The catalog is built on first access; later calls return the same
    /// instance.
    ///
    /// # Errors
    /// Returns the `ConfigError` the catalog failed with, on every call.
    pub fn global() -> Result<&'static Self, ConfigError> {
        STANDARD
            .get_or_init(Self::standard)
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Registers a grammar, replacing any grammar with the same tag.
    ///
    /// # Returns
    /// The shared handle stored in the registry.
    pub fn register(&mut self, grammar: FieldGrammar) -> Arc<FieldGrammar> {
        debug!(
            tag = grammar.tag(),
            layout = %grammar.layout(),
            components = grammar.components_size(),
            "registering field grammar"
        );
        let grammar = Arc::new(grammar);
        self.grammars
            .insert(grammar.tag().to_string(), Arc::clone(&grammar));
        grammar
    }

    /// Gets the grammar for a tag.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&Arc<FieldGrammar>> {
        self.grammars.get(tag)
    }

    /// Gets the grammar for a tag, failing if none is registered.
    ///
    /// # Errors
    /// Returns `ConfigError::UnknownField` if the tag is not registered.
    pub fn require(&self, tag: &str) -> Result<&Arc<FieldGrammar>, ConfigError> {
        self.get(tag)
            .ok_or_else(|| ConfigError::UnknownField(tag.to_string()))
    }

    /// Returns true if a grammar is registered for the tag.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.grammars.contains_key(tag)
    }

    /// Returns the registered tag names, sorted.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.grammars.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Returns the number of registered grammars.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    /// Returns true if no grammar is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Layout;
    use crate::schema::SemanticType;

    #[test]
    fn test_register_and_get() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        let grammar = FieldGrammar::builder("20", "S")
            .component(SemanticType::Text, "Reference")
            .build()
            .unwrap();
        registry.register(grammar);

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("20"));
        assert_eq!(registry.get("20").unwrap().tag(), "20");
        assert!(registry.get("21").is_none());
    }

    #[test]
    fn test_require_unknown() {
        let registry = Registry::new();
        assert_eq!(
            registry.require("99Z").unwrap_err(),
            ConfigError::UnknownField("99Z".to_string())
        );
    }

    #[test]
    fn test_standard_catalog() {
        let registry = Registry::standard().unwrap();
        assert!(registry.len() >= 35);
        assert_eq!(registry.require("32A").unwrap().layout(), Layout::Fixed);
        assert_eq!(registry.require("31F").unwrap().layout(), Layout::Delimited);
        assert_eq!(registry.require("133").unwrap().layout(), Layout::AlphaNumeric);
        assert_eq!(registry.require("70").unwrap().layout(), Layout::MultiLine);
        assert_eq!(registry.require("95S").unwrap().layout(), Layout::Generic);
        assert_eq!(registry.require("94T").unwrap().layout(), Layout::Unsupported);
    }

    #[test]
    fn test_global_is_shared() {
        let first = Registry::global().unwrap();
        let second = Registry::global().unwrap();
        assert!(std::ptr::eq(first, second));
        let tags = first.tags();
        assert!(tags.windows(2).all(|w| w[0] <= w[1]));
    }
}
