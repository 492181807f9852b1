/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Field value encoder.
//!
//! Encoding is the inverse of decoding for canonical values: components are
//! written with their separators up to the last present component, so the
//! output never ends in a dangling separator.

use crate::codec::{FieldCodec, unsupported};
use ironswift_core::error::{ConfigError, Result};
use ironswift_grammar::{FieldGrammar, Layout};
use tracing::trace;

impl FieldCodec {
    /// Encodes component values into the raw field value.
    ///
    /// # Arguments
    /// * `grammar` - The grammar of the field
    /// * `values` - One entry per component, `None` for absent components
    ///
    /// # Returns
    /// The wire value. Fixed-width components are concatenated as given,
    /// without padding or truncation. All-absent components encode to an
    /// empty string.
    ///
    /// # Errors
    /// Returns `ConfigError::ComponentCountMismatch` if `values` does not
    /// have one entry per component, and `ConfigError::UnsupportedGrammar`
    /// for a grammar the codec does not implement.
    pub fn encode<S: AsRef<str>>(&self, grammar: &FieldGrammar, values: &[Option<S>]) -> Result<String> {
        if values.len() != grammar.components_size() {
            return Err(ConfigError::ComponentCountMismatch {
                tag: grammar.tag().to_string(),
                expected: grammar.components_size(),
                actual: values.len(),
            }
            .into());
        }
        let Some(last) = values.iter().rposition(Option::is_some) else {
            return Ok(String::new());
        };

        let capacity = values.iter().flatten().map(|v| v.as_ref().len() + 2).sum::<usize>() + 1;
        let mut out = String::with_capacity(capacity);
        let present = &values[..=last];

        match grammar.layout() {
            Layout::Single | Layout::Fixed | Layout::AlphaNumeric => {
                for value in present.iter().flatten() {
                    out.push_str(value.as_ref());
                }
            }
            layout @ (Layout::Delimited | Layout::Generic) => {
                if let Some(prefix) = grammar.prefix() {
                    out.push_str(prefix);
                }
                for (index, (slot, value)) in grammar.slots().iter().zip(present).enumerate() {
                    if index > 0 {
                        // absent optional components drop their separator,
                        // except at fixed qualifier positions
                        if value.is_none() && slot.optional && layout == Layout::Delimited {
                            continue;
                        }
                        if let Some(separator) = slot.separator.as_deref() {
                            out.push_str(separator);
                        }
                    }
                    if let Some(value) = value {
                        out.push_str(value.as_ref());
                    }
                }
            }
            Layout::MultiLine => {
                if let Some(prefix) = grammar.prefix() {
                    out.push_str(prefix);
                }
                let separator = self.config().line_separator.as_ref();
                for (index, value) in present.iter().enumerate() {
                    if index > 0 {
                        out.push_str(separator);
                    }
                    if let Some(value) = value {
                        out.push_str(value.as_ref());
                    }
                }
            }
            Layout::Unsupported => return Err(unsupported(grammar)),
        }

        trace!(tag = grammar.tag(), value = %out, "encoded field");
        Ok(out)
    }
}
