/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # IronSwift Grammar
//!
//! Field grammar definitions for the IronSwift SWIFT MT field codec.
//!
//! This crate provides:
//! - **Parser patterns**: Lexing of pattern strings such as `S[/S]` into component slots
//! - **Layout inference**: Classification of each pattern into the shape the codec decodes
//! - **Schema definitions**: Component descriptors, capabilities and field grammars
//! - **Registry**: Immutable tag-to-grammar map with the built-in field catalog

pub mod catalog;
pub mod pattern;
pub mod registry;
pub mod schema;

pub use pattern::{Layout, ParserPattern, PatternSlot, Width};
pub use registry::Registry;
pub use schema::{
    Capabilities, ComponentDef, FieldGrammar, FieldGrammarBuilder, SemanticType, TAG_JSON_KEY,
};
