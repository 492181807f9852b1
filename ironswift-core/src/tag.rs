/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Tag and tag container types.
//!
//! This module provides:
//! - [`Tag`]: A raw name/value pair as it appears in a message block
//! - [`TagSource`]: Trait for ordered, possibly repeated tag collections
//! - [`TagBlock`]: Owned, ordered list of tags

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw field occurrence: tag name (e.g. `32A`) and unparsed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    name: String,
    value: String,
}

impl Tag {
    /// Creates a new tag.
    ///
    /// # Arguments
    /// * `name` - The tag name, e.g. `32A`
    /// * `value` - The raw field value
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the tag name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if the tag has the given name.
    #[inline]
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}:{}", self.name, self.value)
    }
}

/// Ordered collection of tags where names may repeat.
///
/// This is the only view of a message block the field lookups rely on.
pub trait TagSource {
    /// Returns all tags in block order.
    fn tags(&self) -> &[Tag];

    /// Returns the first tag with the given name.
    fn first_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags().iter().find(|t| t.is(name))
    }

    /// Returns every tag with the given name, in block order.
    fn all_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags().iter().filter(move |t| t.is(name))
    }
}

impl TagSource for [Tag] {
    fn tags(&self) -> &[Tag] {
        self
    }
}

impl TagSource for Vec<Tag> {
    fn tags(&self) -> &[Tag] {
        self
    }
}

/// Owned, ordered list of tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagBlock {
    tags: Vec<Tag>,
}

impl TagBlock {
    /// Creates an empty block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tag at the end of the block.
    pub fn push(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Appends a tag and returns the block for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(name, value));
        self
    }

    /// Returns the number of tags.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if the block holds no tags.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns an iterator over the tags.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }
}

impl TagSource for TagBlock {
    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

impl FromIterator<Tag> for TagBlock {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Tag>> for TagBlock {
    fn from(tags: Vec<Tag>) -> Self {
        Self { tags }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> TagBlock {
        TagBlock::new()
            .with("20", "REF1")
            .with("32A", "210101USD1000,")
            .with("72", "FIRST")
            .with("72", "SECOND")
    }

    #[test]
    fn test_tag_display() {
        let tag = Tag::new("20", "REFERENCE");
        assert_eq!(tag.to_string(), ":20:REFERENCE");
        assert!(tag.is("20"));
        assert!(!tag.is("21"));
    }

    #[test]
    fn test_first_by_name() {
        let block = block();
        assert_eq!(block.first_by_name("72").unwrap().value(), "FIRST");
        assert!(block.first_by_name("50K").is_none());
    }

    #[test]
    fn test_all_by_name_keeps_order() {
        let block = block();
        let values: Vec<_> = block.all_by_name("72").map(Tag::value).collect();
        assert_eq!(values, vec!["FIRST", "SECOND"]);
        assert_eq!(block.all_by_name("71A").count(), 0);
    }

    #[test]
    fn test_slice_source() {
        let tags = vec![Tag::new("20", "A"), Tag::new("20", "B")];
        assert_eq!(tags.as_slice().all_by_name("20").count(), 2);
        assert_eq!(tags.first_by_name("20").unwrap().value(), "A");
    }
}
