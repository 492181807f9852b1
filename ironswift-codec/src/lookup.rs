/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Field lookup in tag containers.
//!
//! The container is any [`TagSource`]; an absent container behaves like an
//! empty one.

use crate::field::Field;
use ironswift_core::error::Result;
use ironswift_core::tag::{Tag, TagSource};
use ironswift_grammar::{FieldGrammar, Registry};
use std::sync::Arc;

/// Returns the first occurrence of the grammar's tag, parsed.
///
/// # Errors
/// Returns the decode error of the matching tag.
pub fn get<T>(source: Option<&T>, grammar: &Arc<FieldGrammar>) -> Result<Option<Field>>
where
    T: TagSource + ?Sized,
{
    source
        .and_then(|s| s.first_by_name(grammar.tag()))
        .map(|tag| Field::from_tag(Arc::clone(grammar), tag))
        .transpose()
}

/// Returns every occurrence of the grammar's tag, parsed, in container order.
///
/// # Errors
/// Returns the first decode error among the matching tags.
pub fn get_all<T>(source: Option<&T>, grammar: &Arc<FieldGrammar>) -> Result<Vec<Field>>
where
    T: TagSource + ?Sized,
{
    let Some(source) = source else {
        return Ok(Vec::new());
    };
    source
        .all_by_name(grammar.tag())
        .map(|tag| Field::from_tag(Arc::clone(grammar), tag))
        .collect()
}

/// Like [`get`], resolving the grammar from the registry.
///
/// # Errors
/// Returns `ConfigError::UnknownField` if the tag is not registered.
pub fn get_by_name<T>(source: Option<&T>, registry: &Registry, tag: &str) -> Result<Option<Field>>
where
    T: TagSource + ?Sized,
{
    get(source, registry.require(tag)?)
}

/// Like [`get_all`], resolving the grammar from the registry.
///
/// # Errors
/// Returns `ConfigError::UnknownField` if the tag is not registered.
pub fn get_all_by_name<T>(source: Option<&T>, registry: &Registry, tag: &str) -> Result<Vec<Field>>
where
    T: TagSource + ?Sized,
{
    get_all(source, registry.require(tag)?)
}

/// Parses a single tag with the grammar registered for its name.
///
/// # Errors
/// Returns `ConfigError::UnknownField` if the tag is not registered, or the
/// decode error of its value.
pub fn parse_tag(registry: &Registry, tag: &Tag) -> Result<Field> {
    let grammar = registry.require(tag.name())?;
    Field::from_tag(Arc::clone(grammar), tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironswift_core::error::{ConfigError, DecodeError, SwiftError};
    use ironswift_core::tag::TagBlock;

    fn registry() -> &'static Registry {
        Registry::global().unwrap()
    }

    fn block() -> TagBlock {
        TagBlock::new()
            .with("20", "REF1")
            .with("32A", "210101USD1000,")
            .with("72", "/ACC/FIRST")
            .with("72", "/INS/SECOND$MORE")
    }

    #[test]
    fn test_get_first() {
        let block = block();
        let field = get_by_name(Some(&block), registry(), "72").unwrap().unwrap();
        assert_eq!(field.component(1).unwrap(), Some("/ACC/FIRST"));
    }

    #[test]
    fn test_get_absent() {
        let block = block();
        assert!(get_by_name(Some(&block), registry(), "50H").unwrap().is_none());
        assert!(get_by_name::<TagBlock>(None, registry(), "20").unwrap().is_none());
    }

    #[test]
    fn test_get_all_in_order() {
        let block = block();
        let fields = get_all_by_name(Some(&block), registry(), "72").unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].lines(), vec!["/INS/SECOND", "MORE"]);
    }

    #[test]
    fn test_get_all_never_null() {
        let grammar = registry().require("72").unwrap();
        assert!(get_all::<TagBlock>(None, grammar).unwrap().is_empty());
        assert!(get_all(Some(&TagBlock::new()), grammar).unwrap().is_empty());

        let tags: Vec<Tag> = Vec::new();
        assert!(get_all(Some(tags.as_slice()), grammar).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_tag() {
        let block = block();
        assert!(matches!(
            get_by_name(Some(&block), registry(), "99Z"),
            Err(SwiftError::Config(ConfigError::UnknownField(_)))
        ));
    }

    #[test]
    fn test_decode_error_propagates() {
        let block = TagBlock::new().with("50H", "NO-SLASH$NAME");
        assert!(matches!(
            get_by_name(Some(&block), registry(), "50H"),
            Err(SwiftError::Decode(DecodeError::MissingDelimiter { .. }))
        ));
    }

    #[test]
    fn test_parse_tag() {
        let field = parse_tag(registry(), &Tag::new("31F", "210101//NOTE")).unwrap();
        assert_eq!(field.get("Period Details").unwrap(), Some("NOTE"));
        assert_eq!(field.get("Period Date").unwrap(), None);
    }
}
