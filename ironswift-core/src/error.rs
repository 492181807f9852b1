/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Error types for the IronSwift field codec.
//!
//! This module provides a unified error hierarchy using `thiserror`. Only
//! hard failures live here: configuration problems, malformed input that
//! cannot be located at all, and caller misuse. Typed accessors that cannot
//! convert a component return `None` instead of an error.

use thiserror::Error;

/// Result type alias using [`SwiftError`] as the error type.
pub type Result<T> = std::result::Result<T, SwiftError>;

/// Top-level error type for all IronSwift operations.
#[derive(Debug, Error)]
pub enum SwiftError {
    /// Grammar definition or registry problem.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error while decoding a raw field value.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Invalid component access on a field instance.
    #[error("component error: {0}")]
    Component(#[from] ComponentError),

    /// JSON document could not be read or written.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors in field grammar definitions.
///
/// These are fatal: they indicate a grammar the codec cannot honour and are
/// surfaced as soon as they are detected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Parser pattern could not be lexed.
    #[error("invalid parser pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why the pattern was rejected.
        reason: String,
    },

    /// Number of component descriptors differs from the pattern slots.
    #[error("field {tag}: grammar declares {expected} components, got {actual}")]
    ComponentCountMismatch {
        /// Field tag name.
        tag: String,
        /// Number of components declared by the grammar.
        expected: usize,
        /// Number of components supplied.
        actual: usize,
    },

    /// Optional components are not a trailing suffix in a non-generic grammar.
    #[error("field {tag}: optional component {position} is followed by a mandatory one")]
    OptionalNotSuffix {
        /// Field tag name.
        tag: String,
        /// 1-based position of the misplaced optional component.
        position: usize,
    },

    /// Two components resolve to the same label.
    #[error("field {tag}: duplicate component label '{label}'")]
    DuplicateLabel {
        /// Field tag name.
        tag: String,
        /// The duplicated label.
        label: String,
    },

    /// A label would take the JSON key that holds the tag name.
    #[error("field {tag}: component label '{label}' is reserved")]
    ReservedLabel {
        /// Field tag name.
        tag: String,
        /// The reserved label.
        label: String,
    },

    /// Pattern shape is not implemented by the codec.
    #[error("field {tag}: parser pattern '{pattern}' is not supported by the codec")]
    UnsupportedGrammar {
        /// Field tag name.
        tag: String,
        /// The unsupported pattern.
        pattern: String,
    },

    /// No grammar registered for the requested tag.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Errors that occur while decoding a raw field value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A mandatory leading delimiter is missing.
    #[error("field {tag}: expected value to start with '{delimiter}'")]
    MissingDelimiter {
        /// Field tag name.
        tag: String,
        /// The literal that was expected.
        delimiter: String,
    },

    /// A multi-line value has more lines than the grammar allows.
    #[error("field {tag}: {actual} lines exceed the maximum of {max}")]
    TooManyLines {
        /// Field tag name.
        tag: String,
        /// Maximum number of lines.
        max: usize,
        /// Number of lines found.
        actual: usize,
    },

    /// Tag name does not match the grammar it is parsed with.
    #[error("tag mismatch: expected {expected}, found {actual}")]
    TagMismatch {
        /// Tag name of the grammar.
        expected: String,
        /// Tag name that was supplied.
        actual: String,
    },

    /// JSON document does not have the expected shape.
    #[error("invalid json for field {tag}: {reason}")]
    InvalidJson {
        /// Field tag name.
        tag: String,
        /// Description of the problem.
        reason: String,
    },
}

/// Errors raised by component access on a field instance.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// Component number outside `1..=size`.
    #[error("component {position} out of range 1..={size}")]
    OutOfRange {
        /// Requested 1-based position.
        position: usize,
        /// Number of components in the grammar.
        size: usize,
    },

    /// No component carries the requested label.
    #[error("unknown component label '{0}'")]
    UnknownLabel(String),

    /// Text does not have the shape of the requested code.
    #[error("invalid {kind} code '{value}'")]
    InvalidCode {
        /// Kind of code, e.g. `currency`.
        kind: &'static str,
        /// The rejected text.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::TooManyLines {
            tag: "70".to_string(),
            max: 4,
            actual: 6,
        };
        assert_eq!(err.to_string(), "field 70: 6 lines exceed the maximum of 4");
    }

    #[test]
    fn test_swift_error_from_config() {
        let config_err = ConfigError::UnknownField("99Z".to_string());
        let err: SwiftError = config_err.into();
        assert!(matches!(err, SwiftError::Config(ConfigError::UnknownField(_))));
    }

    #[test]
    fn test_component_error_display() {
        let err = ComponentError::OutOfRange {
            position: 4,
            size: 3,
        };
        assert_eq!(err.to_string(), "component 4 out of range 1..=3");
    }

    #[test]
    fn test_unsupported_grammar_display() {
        let err = ConfigError::UnsupportedGrammar {
            tag: "94T".to_string(),
            pattern: ":S//9!SS".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "field 94T: parser pattern ':S//9!SS' is not supported by the codec"
        );
    }
}
