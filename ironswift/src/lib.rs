/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # IronSwift
//!
//! A grammar-driven codec for SWIFT MT field values.
//!
//! Every SWIFT MT field tag (`20`, `32A`, `50H`, `95P`, ...) is described by
//! a compact parser pattern such as `<DATE2><CUR><AMOUNT>` or
//! `:4!c/[8c]/4!c`. IronSwift turns each pattern into a field grammar and
//! runs one parametric codec over it, instead of one hand-written type per
//! field.
//!
//! ## Features
//!
//! - **Zero-copy decoding**: Components are slices of the raw value
//! - **Canonical encoding**: `encode(decode(v)) == v` for canonical values
//! - **Typed access**: Amounts, dates, currencies, countries and BICs
//! - **Lookup**: Find and parse fields in any ordered tag container
//! - **JSON**: Flat camelCase object per field
//!
//! ## Quick Start
//!
//! ```rust
//! use ironswift::prelude::*;
//!
//! let registry = Registry::global()?;
//! let field = Field::parse_value(registry.require("32A")?.clone(), "210101USD1234,56")?;
//!
//! assert_eq!(field.get("Currency")?, Some("USD"));
//! assert_eq!(field.component_as_decimal(3)?, Some(Decimal::new(123456, 2)));
//! assert_eq!(field.value()?, "210101USD1234,56");
//! # Ok::<(), SwiftError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Value types, tag containers, conversions and errors
//! - [`grammar`]: Parser patterns, field grammars and the built-in catalog
//! - [`codec`]: Decoder, encoder, field instances, lookup and JSON

pub mod core {
    //! Value types, tag containers, conversions and errors.
    pub use ironswift_core::*;
}

pub mod grammar {
    //! Parser patterns, field grammars and the built-in catalog.
    pub use ironswift_grammar::*;
}

pub mod codec {
    //! Decoder, encoder, field instances, lookup and JSON.
    pub use ironswift_codec::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use ironswift_core::{
        Bic, ComponentError, ConfigError, Country, Currency, DecodeError, Number, Result,
        SwiftError, Tag, TagBlock, TagSource,
    };
    pub use ironswift_core::convert::{format_amount, parse_decimal};

    // Grammar
    pub use ironswift_grammar::{FieldGrammar, Layout, Registry, SemanticType};

    // Codec
    pub use ironswift_codec::lookup::{get, get_all, get_all_by_name, get_by_name, parse_tag};
    pub use ironswift_codec::{CodecConfig, Field, FieldCodec, LineOverflow};

    pub use rust_decimal::Decimal;
}
