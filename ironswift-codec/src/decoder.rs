/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Zero-copy field value decoder.
//!
//! Decoding splits a raw value into component slices without allocating
//! for the component text. Separator search uses `memchr::memmem`.

use crate::codec::{Components, FieldCodec, unsupported};
use crate::config::LineOverflow;
use ironswift_core::error::{DecodeError, Result};
use ironswift_grammar::{FieldGrammar, Layout, PatternSlot};
use memchr::memmem;
use smallvec::smallvec;
use tracing::{trace, warn};

impl FieldCodec {
    /// Decodes a raw field value into its components.
    ///
    /// # Arguments
    /// * `grammar` - The grammar of the field
    /// * `raw` - The raw value, or `None` for an absent value
    ///
    /// # Returns
    /// Exactly `grammar.components_size()` entries, each a slice of `raw`
    /// or `None`. An absent value yields all `None`; an empty value yields
    /// an empty first component.
    ///
    /// Generic fields are read leniently after the leading `:`. A missing
    /// separator ends the value, so later components decode as `None` even
    /// when mandatory (`:TRAD` for 98A gives the qualifier only). Delimited
    /// fields reject the same shape with `MissingDelimiter`.
    ///
    /// # Errors
    /// Returns `DecodeError::MissingDelimiter` if a mandatory leading literal
    /// or separator is missing, `DecodeError::TooManyLines` for a multi-line
    /// overflow under `LineOverflow::Reject`, and
    /// `ConfigError::UnsupportedGrammar` for a grammar the codec does not
    /// implement.
    pub fn decode<'a>(&self, grammar: &FieldGrammar, raw: Option<&'a str>) -> Result<Components<'a>> {
        let mut out: Components<'a> = smallvec![None; grammar.components_size()];
        let Some(value) = raw else {
            return Ok(out);
        };
        if !grammar.is_supported() {
            return Err(unsupported(grammar));
        }
        if value.is_empty() {
            out[0] = Some(value);
            return Ok(out);
        }

        match grammar.layout() {
            Layout::Single => out[0] = Some(value),
            Layout::Delimited => decode_delimited(grammar, value, &mut out)?,
            Layout::Generic => decode_generic(grammar, value, &mut out)?,
            Layout::Fixed => decode_fixed(grammar.slots(), value, &mut out),
            Layout::AlphaNumeric => decode_alpha_numeric(grammar.slots(), value, &mut out),
            Layout::MultiLine => self.decode_lines(grammar, value, &mut out)?,
            Layout::Unsupported => return Err(unsupported(grammar)),
        }

        trace!(tag = grammar.tag(), value, components = ?out, "decoded field");
        Ok(out)
    }

    fn decode_lines<'a>(
        &self,
        grammar: &FieldGrammar,
        value: &'a str,
        out: &mut Components<'a>,
    ) -> Result<()> {
        let body = strip_prefix(grammar, value)?;
        let separator = self.config().line_separator.as_bytes();
        let max = out.len();

        let lines = memmem::find_iter(body.as_bytes(), separator).count() + 1;
        if lines > max {
            match self.config().line_overflow {
                LineOverflow::Reject => {
                    return Err(DecodeError::TooManyLines {
                        tag: grammar.tag().to_string(),
                        max,
                        actual: lines,
                    }
                    .into());
                }
                LineOverflow::MergeIntoLast => warn!(
                    tag = grammar.tag(),
                    max,
                    actual = lines,
                    "extra lines kept in the last component"
                ),
            }
        }

        let mut rest = body;
        for (index, slot) in out.iter_mut().enumerate() {
            if index + 1 == max {
                *slot = Some(rest);
                break;
            }
            match memmem::find(rest.as_bytes(), separator) {
                Some(at) => {
                    *slot = Some(&rest[..at]);
                    rest = &rest[at + separator.len()..];
                }
                None => {
                    *slot = Some(rest);
                    break;
                }
            }
        }
        Ok(())
    }
}

/// Removes the grammar's leading literal from the value.
fn strip_prefix<'a>(grammar: &FieldGrammar, value: &'a str) -> Result<&'a str> {
    match grammar.prefix() {
        Some(prefix) => value.strip_prefix(prefix).ok_or_else(|| {
            DecodeError::MissingDelimiter {
                tag: grammar.tag().to_string(),
                delimiter: prefix.to_string(),
            }
            .into()
        }),
        None => Ok(value),
    }
}

/// Splits `s` after `n` characters.
fn split_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((at, _)) => s.split_at(at),
        None => (s, ""),
    }
}

/// Finds where the component at `current` ends.
///
/// Candidates are the separators of the next slot and of every later slot
/// reachable by skipping optional ones. The earliest match wins; on a tie the
/// longer separator wins, so `//` is not mistaken for `/`.
///
/// Returns `(slot index, byte offset, separator length)`.
fn next_boundary(slots: &[PatternSlot], current: usize, rest: &str) -> Option<(usize, usize, usize)> {
    let mut best: Option<(usize, usize, usize)> = None;
    for (index, slot) in slots.iter().enumerate().skip(current + 1) {
        if let Some(separator) = slot.separator.as_deref() {
            if let Some(at) = memmem::find(rest.as_bytes(), separator.as_bytes()) {
                let better = best.is_none_or(|(_, best_at, best_len)| {
                    at < best_at || (at == best_at && separator.len() > best_len)
                });
                if better {
                    best = Some((index, at, separator.len()));
                }
            }
        }
        if !slot.optional {
            break;
        }
    }
    best
}

fn decode_delimited<'a>(grammar: &FieldGrammar, value: &'a str, out: &mut Components<'a>) -> Result<()> {
    let slots = grammar.slots();
    let mut rest = strip_prefix(grammar, value)?;
    let mut current = 0;

    while let Some((next, at, len)) = next_boundary(slots, current, rest) {
        out[current] = Some(&rest[..at]);
        rest = &rest[at + len..];
        current = next;
    }
    out[current] = Some(rest);

    if let Some(missing) = slots[current + 1..].iter().find(|s| !s.optional) {
        return Err(DecodeError::MissingDelimiter {
            tag: grammar.tag().to_string(),
            delimiter: missing.separator.clone().unwrap_or_default(),
        }
        .into());
    }
    Ok(())
}

/// Qualifier fields: every component sits at a fixed position, so each
/// separator is consumed in order and an empty DSS segment means absent.
fn decode_generic<'a>(grammar: &FieldGrammar, value: &'a str, out: &mut Components<'a>) -> Result<()> {
    let slots = grammar.slots();
    let mut rest = strip_prefix(grammar, value)?;

    for index in 0..slots.len() {
        let boundary = slots
            .get(index + 1)
            .and_then(|next| next.separator.as_deref())
            .and_then(|sep| memmem::find(rest.as_bytes(), sep.as_bytes()).map(|at| (at, sep.len())));
        match boundary {
            Some((at, len)) => {
                out[index] = Some(&rest[..at]);
                rest = &rest[at + len..];
            }
            None => {
                out[index] = Some(rest);
                break;
            }
        }
    }

    if let Some(position) = grammar.dss_position() {
        let dss = &mut out[position - 1];
        if *dss == Some("") {
            *dss = None;
        }
    }
    Ok(())
}

fn decode_fixed<'a>(slots: &[PatternSlot], value: &'a str, out: &mut Components<'a>) {
    let last = slots.len() - 1;
    let mut rest = value;
    for (index, slot) in slots.iter().enumerate() {
        if rest.is_empty() {
            break;
        }
        let (part, tail) = match slot.width.limit() {
            Some(n) if index < last => split_chars(rest, n),
            _ => (rest, ""),
        };
        out[index] = Some(part);
        rest = tail;
    }
}

/// Trailing numeric run feeds the last component; the leading slots are
/// sliced by width, the last of them taking whatever text is left.
fn decode_alpha_numeric<'a>(slots: &[PatternSlot], value: &'a str, out: &mut Components<'a>) {
    let last = slots.len() - 1;
    let digits = value
        .bytes()
        .rev()
        .take_while(|b| b.is_ascii_digit() || *b == b',' || *b == b'.')
        .count();
    let (head, number) = value.split_at(value.len() - digits);

    let mut rest = head;
    for (index, slot) in slots[..last].iter().enumerate() {
        if rest.is_empty() {
            break;
        }
        let (part, tail) = match slot.width.limit() {
            Some(n) if index + 1 < last => split_chars(rest, n),
            _ => (rest, ""),
        };
        out[index] = Some(part);
        rest = tail;
    }
    if !number.is_empty() {
        out[last] = Some(number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecConfig;
    use ironswift_core::error::{ConfigError, SwiftError};
    use ironswift_grammar::{Registry, SemanticType};
    use std::sync::Arc;

    fn grammar(tag: &str) -> &'static Arc<FieldGrammar> {
        Registry::global().unwrap().require(tag).unwrap()
    }

    fn decode<'a>(tag: &str, raw: &'a str) -> Vec<Option<&'a str>> {
        FieldCodec::new()
            .decode(grammar(tag), Some(raw))
            .unwrap()
            .into_vec()
    }

    #[test]
    fn test_null_input_all_layouts() {
        let codec = FieldCodec::new();
        for tag in Registry::global().unwrap().tags() {
            let grammar = grammar(tag);
            let components = codec.decode(grammar, None).unwrap();
            assert_eq!(components.len(), grammar.components_size(), "field {tag}");
            assert!(components.iter().all(Option::is_none), "field {tag}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode("31F", ""), vec![Some(""), None, None]);
        assert_eq!(decode("95S", ""), vec![Some(""), None, None, None, None]);
    }

    #[test]
    fn test_single() {
        assert_eq!(decode("20", "REF/WITH/SLASH"), vec![Some("REF/WITH/SLASH")]);
    }

    #[test]
    fn test_delimited() {
        assert_eq!(decode("23E", "CHQB"), vec![Some("CHQB"), None]);
        assert_eq!(
            decode("23E", "PHON/CALL/ME"),
            vec![Some("PHON"), Some("CALL/ME")]
        );
        assert_eq!(decode("28C", "1/2"), vec![Some("1"), Some("2")]);
    }

    #[test]
    fn test_mandatory_optional_boundary() {
        assert_eq!(decode("31F", "210101"), vec![Some("210101"), None, None]);
        assert_eq!(
            decode("31F", "210101/210201//NOTE"),
            vec![Some("210101"), Some("210201"), Some("NOTE")]
        );
        assert_eq!(
            decode("31F", "210101//NOTE"),
            vec![Some("210101"), None, Some("NOTE")]
        );
    }

    #[test]
    fn test_missing_mandatory_separator() {
        let grammar = FieldGrammar::builder("99A", "S/S")
            .component(SemanticType::Text, "First")
            .component(SemanticType::Text, "Second")
            .build()
            .unwrap();
        let err = FieldCodec::new().decode(&grammar, Some("ONLY")).unwrap_err();
        assert!(matches!(
            err,
            SwiftError::Decode(DecodeError::MissingDelimiter { ref delimiter, .. }) if delimiter == "/"
        ));
    }

    #[test]
    fn test_fixed_width_slicing() {
        assert_eq!(
            decode("336", "ABCDEF12345XYZ"),
            vec![Some("ABCDEF"), Some("12345"), Some("XYZ")]
        );
        assert_eq!(decode("336", "ABCDEF123"), vec![Some("ABCDEF"), Some("123"), None]);
        assert_eq!(decode("336", "ABC"), vec![Some("ABC"), None, None]);
        assert_eq!(
            decode("32A", "210101USD1234,56"),
            vec![Some("210101"), Some("USD"), Some("1234,56")]
        );
    }

    #[test]
    fn test_alpha_numeric_split() {
        assert_eq!(
            decode("133", "A123USD0042"),
            vec![Some("A"), Some("123"), Some("USD"), Some("0042")]
        );
        assert_eq!(
            decode("137", "B456EUR"),
            vec![Some("B"), Some("456"), Some("EUR"), None]
        );
    }

    #[test]
    fn test_multi_line() {
        let grammar = FieldGrammar::builder("77X", "S[$S]0-2")
            .component(SemanticType::Text, "Narrative")
            .component(SemanticType::Text, "Narrative 2")
            .component(SemanticType::Text, "Narrative 3")
            .build()
            .unwrap();
        let codec = FieldCodec::new();
        assert_eq!(
            codec.decode(&grammar, Some("LINE1$LINE2")).unwrap().into_vec(),
            vec![Some("LINE1"), Some("LINE2"), None]
        );
        assert_eq!(
            codec.decode(&grammar, Some("A$$C")).unwrap().into_vec(),
            vec![Some("A"), Some(""), Some("C")]
        );
    }

    #[test]
    fn test_multi_line_overflow_rejected() {
        let err = FieldCodec::new()
            .decode(grammar("70"), Some("1$2$3$4$5"))
            .unwrap_err();
        assert!(matches!(
            err,
            SwiftError::Decode(DecodeError::TooManyLines {
                max: 4,
                actual: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_multi_line_overflow_merged() {
        let codec = FieldCodec::with_config(
            CodecConfig::new().with_line_overflow(LineOverflow::MergeIntoLast),
        );
        let components = codec.decode(grammar("70"), Some("1$2$3$4$5")).unwrap();
        assert_eq!(components[3], Some("4$5"));
    }

    #[test]
    fn test_multi_line_crlf() {
        let codec = FieldCodec::with_config(CodecConfig::crlf());
        let components = codec.decode(grammar("72"), Some("/ACC/\r\n//MORE")).unwrap();
        assert_eq!(components[0], Some("/ACC/"));
        assert_eq!(components[1], Some("//MORE"));
        assert_eq!(components[2], None);
    }

    #[test]
    fn test_prefixed_multi_line() {
        assert_eq!(
            decode("50H", "/12345$JOHN DOE$MAIN ST"),
            vec![Some("12345"), Some("JOHN DOE"), Some("MAIN ST"), None, None]
        );
        let err = FieldCodec::new()
            .decode(grammar("50H"), Some("12345$JOHN"))
            .unwrap_err();
        assert!(matches!(
            err,
            SwiftError::Decode(DecodeError::MissingDelimiter { .. })
        ));
    }

    #[test]
    fn test_generic_dss_detection() {
        assert_eq!(
            decode("95S", ":QUAL//TYPE/US/ALT"),
            vec![Some("QUAL"), None, Some("TYPE"), Some("US"), Some("ALT")]
        );
        assert_eq!(
            decode("95S", ":QUAL/SCHEME/TYPE/US/ALT/ID"),
            vec![
                Some("QUAL"),
                Some("SCHEME"),
                Some("TYPE"),
                Some("US"),
                Some("ALT/ID")
            ]
        );
        assert_eq!(
            decode("22F", ":PRIC//PLAI"),
            vec![Some("PRIC"), None, Some("PLAI")]
        );
    }

    #[test]
    fn test_generic_without_dss() {
        assert_eq!(
            decode("95P", ":BUYR//DEUTDEFF"),
            vec![Some("BUYR"), Some("DEUTDEFF")]
        );
        assert_eq!(decode("20C", ":SEME//REF/1"), vec![Some("SEME"), Some("REF/1")]);
    }

    #[test]
    fn test_generic_missing_colon() {
        let err = FieldCodec::new()
            .decode(grammar("98A"), Some("TRAD//20240101"))
            .unwrap_err();
        assert!(matches!(
            err,
            SwiftError::Decode(DecodeError::MissingDelimiter { ref delimiter, .. }) if delimiter == ":"
        ));
    }

    #[test]
    fn test_generic_missing_separator_is_lenient() {
        assert_eq!(decode("98A", ":TRAD"), vec![Some("TRAD"), None]);
        assert_eq!(
            decode("98A", ":TRAD//20240101"),
            vec![Some("TRAD"), Some("20240101")]
        );
    }

    #[test]
    fn test_unsupported_grammar_fails_loudly() {
        let codec = FieldCodec::new();
        let err = codec.decode(grammar("94T"), Some(":SAFE//CUST")).unwrap_err();
        assert!(matches!(
            err,
            SwiftError::Config(ConfigError::UnsupportedGrammar { .. })
        ));
        assert!(codec.decode(grammar("94T"), Some("")).is_err());
    }

    #[test]
    fn test_decode_is_deterministic() {
        let codec = FieldCodec::new();
        let first = codec.decode(grammar("31F"), Some("210101/210201//X")).unwrap();
        let second = codec.decode(grammar("31F"), Some("210101/210201//X")).unwrap();
        assert_eq!(first, second);
    }
}
