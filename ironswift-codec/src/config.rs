/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Codec configuration.
//!
//! This module provides the options that tune how multi-line values are
//! split and joined.

use std::borrow::Cow;

/// Line separator used by the SWIFT MT text notation.
pub const DEFAULT_LINE_SEPARATOR: &str = "$";

/// Line separator of the raw FIN wire format.
pub const CRLF: &str = "\r\n";

/// What to do with a multi-line value that has more lines than components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineOverflow {
    /// Fail with `DecodeError::TooManyLines`.
    #[default]
    Reject,
    /// Keep the extra lines in the last component and log a warning.
    MergeIntoLast,
}

/// Configuration for a [`FieldCodec`](crate::FieldCodec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Token separating lines of a multi-line value.
    pub line_separator: Cow<'static, str>,
    /// Policy for values with more lines than the grammar allows.
    pub line_overflow: LineOverflow,
}

impl CodecConfig {
    /// Creates the default configuration: `$` separated lines, overflow rejected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            line_separator: Cow::Borrowed(DEFAULT_LINE_SEPARATOR),
            line_overflow: LineOverflow::Reject,
        }
    }

    /// Creates a configuration for raw FIN text, where lines end in CRLF.
    #[must_use]
    pub const fn crlf() -> Self {
        Self {
            line_separator: Cow::Borrowed(CRLF),
            line_overflow: LineOverflow::Reject,
        }
    }

    /// Sets the line separator.
    ///
    /// An empty separator is ignored.
    #[must_use]
    pub fn with_line_separator(mut self, separator: impl Into<Cow<'static, str>>) -> Self {
        let separator = separator.into();
        if !separator.is_empty() {
            self.line_separator = separator;
        }
        self
    }

    /// Sets the overflow policy.
    #[must_use]
    pub fn with_line_overflow(mut self, policy: LineOverflow) -> Self {
        self.line_overflow = policy;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}
