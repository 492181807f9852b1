/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Parser pattern lexing and layout inference.
//!
//! A parser pattern such as `<DATE2>[/<DATE2>][//35x]` is lexed into an
//! ordered list of [`PatternSlot`]s, one per component. Each slot records
//! the literal that precedes it (its separator), its width constraint and
//! whether it sits inside an optional group. The slot list then determines
//! the [`Layout`] the codec uses for the field.

use ironswift_core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest repetition count accepted in a `[...]min-max` group.
pub const MAX_REPETITION: usize = 100;

/// Width constraint of a pattern slot, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Width {
    /// Exactly `n` characters (`6!S`, `<DATE2>`).
    Exact(usize),
    /// At most `n` characters (`35x`, `<BIC>`).
    Max(usize),
    /// No limit (`S`, `N`).
    Unbounded,
}

impl Width {
    /// Returns the character limit, if any.
    #[inline]
    #[must_use]
    pub const fn limit(self) -> Option<usize> {
        match self {
            Self::Exact(n) | Self::Max(n) => Some(n),
            Self::Unbounded => None,
        }
    }

    /// Returns true if the width has an upper bound.
    #[inline]
    #[must_use]
    pub const fn is_bounded(self) -> bool {
        !matches!(self, Self::Unbounded)
    }
}

/// One typed component position in a parser pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSlot {
    /// Source token, e.g. `6!S`, `<CUR>` or `c`.
    pub token: String,
    /// Width constraint.
    pub width: Width,
    /// Literal preceding the slot. For the first slot this is the field prefix.
    pub separator: Option<String>,
    /// Whether the slot is inside an optional group.
    pub optional: bool,
    /// Whether the token is a named token (`<...>`).
    pub named: bool,
}

/// Component layout of a field, derived from its parser pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// Whole value is the only component (`S`, `N`).
    Single,
    /// Components separated by literals (`S[/S]`, `<DATE2>[/<DATE2>][//35x]`).
    Delimited,
    /// Components sliced at fixed character offsets (`6!S5!NS`).
    Fixed,
    /// Fixed-width prefix plus trailing numeric run (`c3!S<CC>N`).
    AlphaNumeric,
    /// One component per line (`S[$S]0-2`).
    MultiLine,
    /// Qualifier / data source scheme convention (`:4!c/[8c]/4!c`).
    Generic,
    /// Shape the codec does not implement (`:S//9!SS`).
    Unsupported,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Single => "single",
            Self::Delimited => "delimited",
            Self::Fixed => "fixed",
            Self::AlphaNumeric => "alpha-numeric",
            Self::MultiLine => "multi-line",
            Self::Generic => "generic",
            Self::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// Lexed parser pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParserPattern {
    source: String,
    slots: Vec<PatternSlot>,
}

impl ParserPattern {
    /// Lexes a parser pattern.
    ///
    /// # Arguments
    /// * `source` - The pattern text, e.g. `S[$S]0-3`
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidPattern` if the pattern is malformed or
    /// declares no components.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let mut lexer = Lexer::new(source);
        let nodes = lexer.nodes(0)?;

        let mut slots = Vec::new();
        let mut pending = None;
        flatten(&nodes, false, &mut pending, &mut slots);

        if let Some(literal) = pending {
            return Err(lexer.error(format!(
                "literal '{literal}' is not followed by a component"
            )));
        }
        if slots.is_empty() {
            return Err(lexer.error("pattern declares no components"));
        }

        Ok(Self {
            source: source.to_string(),
            slots,
        })
    }

    /// Returns the pattern text.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the slots in component order.
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[PatternSlot] {
        &self.slots
    }

    /// Returns the literal that must open the value, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.slots.first().and_then(|s| s.separator.as_deref())
    }

    /// Infers the component layout from the slot list.
    #[must_use]
    pub fn layout(&self) -> Layout {
        let (first, rest) = match self.slots.split_first() {
            Some(split) => split,
            None => return Layout::Unsupported,
        };

        if first.separator.as_deref() == Some(":") {
            return if rest.iter().all(|s| s.separator.is_some()) {
                Layout::Generic
            } else {
                Layout::Unsupported
            };
        }

        if rest.is_empty() {
            return if first.separator.is_none() {
                Layout::Single
            } else {
                Layout::Delimited
            };
        }

        if rest.iter().all(|s| s.separator.as_deref() == Some("$")) {
            return Layout::MultiLine;
        }

        if rest.iter().all(|s| s.separator.is_none()) {
            let (last, leading) = match self.slots.split_last() {
                Some(split) => split,
                None => return Layout::Unsupported,
            };
            if first.separator.is_some() || !leading.iter().all(|s| s.width.is_bounded()) {
                return Layout::Unsupported;
            }
            return if last.token == "N" && leading.iter().any(|s| s.named) {
                Layout::AlphaNumeric
            } else {
                Layout::Fixed
            };
        }

        if rest.iter().all(|s| s.separator.is_some()) {
            Layout::Delimited
        } else {
            Layout::Unsupported
        }
    }
}

impl fmt::Display for ParserPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Pattern syntax tree before optional groups are expanded.
#[derive(Debug)]
enum Node {
    Literal(String),
    Slot {
        token: String,
        width: Width,
        named: bool,
    },
    Group {
        nodes: Vec<Node>,
        max: usize,
    },
}

/// Expands groups and attaches pending literals to the slot that follows.
fn flatten(
    nodes: &[Node],
    optional: bool,
    pending: &mut Option<String>,
    out: &mut Vec<PatternSlot>,
) {
    for node in nodes {
        match node {
            Node::Literal(literal) => pending.get_or_insert_with(String::new).push_str(literal),
            Node::Slot {
                token,
                width,
                named,
            } => out.push(PatternSlot {
                token: token.clone(),
                width: *width,
                separator: pending.take(),
                optional,
                named: *named,
            }),
            Node::Group { nodes, max } => {
                for _ in 0..*max {
                    flatten(nodes, true, pending, out);
                }
            }
        }
    }
}

/// Width of a named token.
fn named_width(name: &str) -> Option<Width> {
    Some(match name {
        "DATE2" => Width::Exact(6),
        "DATE4" => Width::Exact(8),
        "CUR" => Width::Exact(3),
        "CC" => Width::Exact(2),
        "HHMM" => Width::Exact(4),
        "DC" => Width::Exact(1),
        "BIC" => Width::Max(11),
        "AMOUNT" => Width::Max(15),
        _ => return None,
    })
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> ConfigError {
        ConfigError::InvalidPattern {
            pattern: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn number(&mut self) -> usize {
        let mut value = 0usize;
        while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
            value = value.saturating_mul(10).saturating_add(usize::from(b - b'0'));
            self.pos += 1;
        }
        value
    }

    fn nodes(&mut self, depth: usize) -> Result<Vec<Node>, ConfigError> {
        let mut nodes = Vec::new();

        while let Some(b) = self.peek() {
            match b {
                b'[' => {
                    self.pos += 1;
                    let inner = self.nodes(depth + 1)?;
                    let max = self.repetition()?;
                    nodes.push(Node::Group { nodes: inner, max });
                }
                b']' => {
                    if depth == 0 {
                        return Err(self.error(format!("unbalanced ']' at {}", self.pos)));
                    }
                    self.pos += 1;
                    return Ok(nodes);
                }
                b'<' => nodes.push(self.named()?),
                b'0'..=b'9' => nodes.push(self.sized()?),
                b if b.is_ascii_alphabetic() => {
                    self.pos += 1;
                    let width = if b.is_ascii_uppercase() {
                        Width::Unbounded
                    } else {
                        Width::Exact(1)
                    };
                    nodes.push(Node::Slot {
                        token: char::from(b).to_string(),
                        width,
                        named: false,
                    });
                }
                b'/' => {
                    self.pos += 1;
                    if self.peek() == Some(b'/') {
                        self.pos += 1;
                        nodes.push(Node::Literal("//".to_string()));
                    } else {
                        nodes.push(Node::Literal("/".to_string()));
                    }
                }
                b if b.is_ascii_punctuation() => {
                    self.pos += 1;
                    nodes.push(Node::Literal(char::from(b).to_string()));
                }
                _ => {
                    return Err(self.error(format!("unexpected character at {}", self.pos)));
                }
            }
        }

        if depth > 0 {
            return Err(self.error("unterminated '['"));
        }
        Ok(nodes)
    }

    /// Reads `<NAME>`.
    fn named(&mut self) -> Result<Node, ConfigError> {
        let start = self.pos + 1;
        let end = self.bytes[start..]
            .iter()
            .position(|&b| b == b'>')
            .map(|offset| start + offset)
            .ok_or_else(|| self.error("unterminated '<'"))?;
        let name = &self.source[start..end];
        let width = named_width(name).ok_or_else(|| self.error(format!("unknown token <{name}>")))?;
        self.pos = end + 1;
        Ok(Node::Slot {
            token: format!("<{name}>"),
            width,
            named: true,
        })
    }

    /// Reads `n!X` or `nX`.
    fn sized(&mut self) -> Result<Node, ConfigError> {
        let start = self.pos;
        let n = self.number();
        let exact = self.peek() == Some(b'!');
        if exact {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'*') => Err(self.error("multi-line tokens are not allowed, use [$..] groups")),
            Some(b) if b.is_ascii_alphabetic() => {
                self.pos += 1;
                let width = if exact { Width::Exact(n) } else { Width::Max(n) };
                Ok(Node::Slot {
                    token: self.source[start..self.pos].to_string(),
                    width,
                    named: false,
                })
            }
            _ => Err(self.error(format!("expected character class at {}", self.pos))),
        }
    }

    /// Reads an optional `min-max` repetition after `]`.
    fn repetition(&mut self) -> Result<usize, ConfigError> {
        let start = self.pos;
        if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
            return Ok(1);
        }
        let min = self.number();
        if self.peek() != Some(b'-') {
            // digits belong to the next token, e.g. `[N]15d`
            self.pos = start;
            return Ok(1);
        }
        self.pos += 1;
        if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
            return Err(self.error(format!("incomplete repetition at {start}")));
        }
        let max = self.number();
        if max == 0 || max < min {
            return Err(self.error(format!("invalid repetition {min}-{max}")));
        }
        if max > MAX_REPETITION {
            return Err(self.error(format!(
                "repetition {min}-{max} exceeds the maximum of {MAX_REPETITION}"
            )));
        }
        Ok(max)
    }
}
