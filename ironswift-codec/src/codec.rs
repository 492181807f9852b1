/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Parametric field codec.
//!
//! One [`FieldCodec`] serves every field tag: the grammar passed to
//! [`FieldCodec::decode`] and [`FieldCodec::encode`] carries everything that
//! differs between fields.

use crate::config::CodecConfig;
use ironswift_core::error::{ConfigError, SwiftError};
use ironswift_grammar::FieldGrammar;
use smallvec::SmallVec;
use tracing::debug;

/// Decoded component values, borrowed from the raw field value.
///
/// Always holds exactly `components_size()` entries; `None` marks an absent
/// component.
pub type Components<'a> = SmallVec<[Option<&'a str>; 8]>;

/// Grammar-driven decoder and encoder for SWIFT MT field values.
///
/// The codec holds no per-field state; decode and encode are pure functions
/// of the grammar, the input and the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCodec {
    config: CodecConfig,
}

impl FieldCodec {
    /// Creates a codec with the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            config: CodecConfig::new(),
        }
    }

    /// Creates a codec with the given configuration.
    #[must_use]
    pub const fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }
}

/// Error for a grammar whose layout the codec does not implement.
pub(crate) fn unsupported(grammar: &FieldGrammar) -> SwiftError {
    debug!(
        tag = grammar.tag(),
        pattern = grammar.parser_pattern(),
        "unsupported field grammar"
    );
    ConfigError::UnsupportedGrammar {
        tag: grammar.tag().to_string(),
        pattern: grammar.parser_pattern().to_string(),
    }
    .into()
}
