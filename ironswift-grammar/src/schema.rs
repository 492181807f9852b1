/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Schema definitions for SWIFT MT fields.
//!
//! This module defines the structures that describe a field type:
//! - [`SemanticType`]: What a component's text means
//! - [`ComponentDef`]: One component slot of a field
//! - [`Capabilities`]: Which typed views a field offers
//! - [`FieldGrammar`]: Complete, immutable description of one field tag

use crate::pattern::{Layout, ParserPattern, PatternSlot};
use ironswift_core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// JSON key that carries the tag name of a field.
pub const TAG_JSON_KEY: &str = "name";

/// Semantic type of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    /// Free text or code.
    Text,
    /// Plain base-10 integer.
    Integer,
    /// Decimal amount (`,` separator).
    Decimal,
    /// Date as `YYMMDD`.
    Date2,
    /// Date as `YYYYMMDD`.
    Date4,
    /// Time as `HHMM`.
    Time,
    /// ISO 4217 currency code.
    Currency,
    /// ISO 3166 country code.
    Country,
    /// Business Identifier Code.
    Bic,
    /// Exchange or interest rate (`,` separator).
    RateNumber,
}

impl SemanticType {
    /// Returns true if this type represents a numeric value.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Decimal | Self::RateNumber)
    }

    /// Returns true if this type represents a date.
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date2 | Self::Date4)
    }

    /// Returns true if this type carries a decimal amount or rate.
    #[must_use]
    pub const fn is_decimal(&self) -> bool {
        matches!(self, Self::Decimal | Self::RateNumber)
    }
}

impl std::str::FromStr for SemanticType {
    type Err = std::convert::Infallible;

    /// Creates a SemanticType from a type name; unknown names map to `Text`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "INTEGER" | "NUMBER" | "LONG" => Self::Integer,
            "DECIMAL" | "AMOUNT" => Self::Decimal,
            "DATE2" => Self::Date2,
            "DATE4" => Self::Date4,
            "TIME" => Self::Time,
            "CURRENCY" | "CUR" => Self::Currency,
            "COUNTRY" | "CC" => Self::Country,
            "BIC" => Self::Bic,
            "RATE" | "RATENUMBER" => Self::RateNumber,
            _ => Self::Text,
        })
    }
}

/// Definition of one component slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDef {
    /// 1-based position in the field.
    pub position: usize,
    /// Semantic type of the component.
    pub semantic_type: SemanticType,
    /// Whether the component may be absent.
    pub optional: bool,
    /// Human label, e.g. `Period Date`.
    pub label: String,
    /// Deprecated alternate labels for the same component.
    pub aliases: Vec<String>,
}

impl ComponentDef {
    /// Returns the camelCase JSON key for this component, e.g. `periodDate`.
    #[must_use]
    pub fn json_key(&self) -> String {
        camel_case(&self.label)
    }

    /// Returns the camelCase JSON keys of the aliases.
    pub fn alias_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.aliases.iter().map(|a| camel_case(a))
    }
}

/// Typed views a field supports, derived from its components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    /// At least one BIC component.
    pub bic: bool,
    /// At least one currency component.
    pub currency: bool,
    /// At least one date component.
    pub date: bool,
    /// At least one amount or rate component.
    pub amount: bool,
    /// Value spans several lines.
    pub multi_line: bool,
    /// Follows the qualifier / DSS convention.
    pub generic: bool,
}

/// Complete description of a field tag.
///
/// Built once through [`FieldGrammar::builder`] and immutable afterwards;
/// the label index is populated at build time. The serialized form is the
/// builder input, so deserializing runs the same checks as `build()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "FieldGrammarBuilder", into = "FieldGrammarBuilder")]
pub struct FieldGrammar {
    tag: String,
    pattern: ParserPattern,
    validator: Option<String>,
    layout: Layout,
    components: Vec<ComponentDef>,
    labels: HashMap<String, usize>,
    capabilities: Capabilities,
}

impl FieldGrammar {
    /// Starts a grammar definition.
    ///
    /// # Arguments
    /// * `tag` - The field tag name, e.g. `32A`
    /// * `pattern` - The parser pattern, e.g. `<DATE2><CUR><AMOUNT>`
    #[must_use]
    pub fn builder(tag: impl Into<String>, pattern: impl Into<String>) -> FieldGrammarBuilder {
        FieldGrammarBuilder {
            tag: tag.into(),
            pattern: pattern.into(),
            validator: None,
            components: Vec::new(),
        }
    }

    /// Returns the field tag name.
    #[inline]
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the numeric part of the tag (`32` for `32A`).
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        let end = self
            .tag
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.tag.len());
        self.tag[..end].parse().ok()
    }

    /// Returns the letter option of the tag (`A` for `32A`).
    #[must_use]
    pub fn letter_option(&self) -> Option<char> {
        self.tag.chars().last().filter(char::is_ascii_alphabetic)
    }

    /// Returns the lexed parser pattern.
    #[inline]
    #[must_use]
    pub fn pattern(&self) -> &ParserPattern {
        &self.pattern
    }

    /// Returns the parser pattern text.
    #[inline]
    #[must_use]
    pub fn parser_pattern(&self) -> &str {
        self.pattern.source()
    }

    /// Returns the validator pattern, used for documentation only.
    #[must_use]
    pub fn validator_pattern(&self) -> &str {
        self.validator.as_deref().unwrap_or(self.pattern.source())
    }

    /// Returns the component layout.
    #[inline]
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the pattern slots, one per component.
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[PatternSlot] {
        self.pattern.slots()
    }

    /// Returns the literal every value must start with, if any.
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.pattern.prefix()
    }

    /// Returns the component definitions.
    #[inline]
    #[must_use]
    pub fn components(&self) -> &[ComponentDef] {
        &self.components
    }

    /// Returns the number of components.
    #[inline]
    #[must_use]
    pub fn components_size(&self) -> usize {
        self.components.len()
    }

    /// Gets a component definition by 1-based position.
    #[must_use]
    pub fn component(&self, position: usize) -> Option<&ComponentDef> {
        position
            .checked_sub(1)
            .and_then(|index| self.components.get(index))
    }

    /// Resolves a label or alias to its 1-based position.
    ///
    /// Matching ignores case, spaces and punctuation, so `Period Date`,
    /// `periodDate` and `PERIOD_DATE` are the same label.
    #[must_use]
    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.labels.get(&normalize_label(label)).copied()
    }

    /// Returns the typed views this field supports.
    #[inline]
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns true if the field follows the qualifier / DSS convention.
    #[inline]
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.layout == Layout::Generic
    }

    /// Returns true if the value spans several lines.
    #[inline]
    #[must_use]
    pub fn is_multi_line(&self) -> bool {
        self.layout == Layout::MultiLine
    }

    /// Returns true if the codec implements this field's layout.
    #[inline]
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.layout != Layout::Unsupported
    }

    /// Returns the 1-based position of the data source scheme component.
    ///
    /// Only generic fields whose second slot is optional carry a DSS.
    #[must_use]
    pub fn dss_position(&self) -> Option<usize> {
        let has_dss = self.is_generic() && self.slots().get(1).is_some_and(|s| s.optional);
        has_dss.then_some(2)
    }
}

/// Builder for [`FieldGrammar`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldGrammarBuilder {
    tag: String,
    pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validator: Option<String>,
    components: Vec<ComponentSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ComponentSpec {
    semantic_type: SemanticType,
    label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<String>,
}

impl FieldGrammarBuilder {
    /// Appends a component.
    #[must_use]
    pub fn component(mut self, semantic_type: SemanticType, label: impl Into<String>) -> Self {
        self.components.push(ComponentSpec {
            semantic_type,
            label: label.into(),
            aliases: Vec::new(),
        });
        self
    }

    /// Adds an alternate label to the most recently added component.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        if let Some(entry) = self.components.last_mut() {
            entry.aliases.push(alias.into());
        }
        self
    }

    /// Sets the validator pattern.
    #[must_use]
    pub fn validator(mut self, validator: impl Into<String>) -> Self {
        self.validator = Some(validator.into());
        self
    }

    /// Builds the grammar.
    ///
    /// # Errors
    /// Returns `ConfigError` if the pattern is invalid, the component count
    /// differs from the pattern slots, optional components of a non-generic
    /// field are not a trailing suffix, two labels collide, or a label
    /// takes the JSON key reserved for the tag.
    pub fn build(self) -> Result<FieldGrammar, ConfigError> {
        let pattern = ParserPattern::parse(&self.pattern)?;
        let slots = pattern.slots();

        if slots.len() != self.components.len() {
            return Err(ConfigError::ComponentCountMismatch {
                tag: self.tag,
                expected: slots.len(),
                actual: self.components.len(),
            });
        }

        let layout = pattern.layout();
        if layout != Layout::Generic {
            let misplaced = slots
                .windows(2)
                .position(|pair| pair[0].optional && !pair[1].optional);
            if let Some(index) = misplaced {
                return Err(ConfigError::OptionalNotSuffix {
                    tag: self.tag,
                    position: index + 1,
                });
            }
        }

        let mut components = Vec::with_capacity(slots.len());
        let mut labels = HashMap::new();
        for (index, (entry, slot)) in self.components.into_iter().zip(slots).enumerate() {
            let ComponentSpec {
                semantic_type,
                label,
                aliases,
            } = entry;
            let position = index + 1;
            for name in std::iter::once(&label).chain(aliases.iter()) {
                if camel_case(name) == TAG_JSON_KEY {
                    return Err(ConfigError::ReservedLabel {
                        tag: self.tag,
                        label: name.clone(),
                    });
                }
                if labels.insert(normalize_label(name), position).is_some() {
                    return Err(ConfigError::DuplicateLabel {
                        tag: self.tag,
                        label: name.clone(),
                    });
                }
            }
            components.push(ComponentDef {
                position,
                semantic_type,
                optional: slot.optional,
                label,
                aliases,
            });
        }

        let has = |pred: fn(SemanticType) -> bool| {
            components.iter().any(|c: &ComponentDef| pred(c.semantic_type))
        };
        let capabilities = Capabilities {
            bic: has(|t| t == SemanticType::Bic),
            currency: has(|t| t == SemanticType::Currency),
            date: has(|t| t.is_date()),
            amount: has(|t| t.is_decimal()),
            multi_line: layout == Layout::MultiLine,
            generic: layout == Layout::Generic,
        };

        Ok(FieldGrammar {
            tag: self.tag,
            pattern,
            validator: self.validator,
            layout,
            components,
            labels,
            capabilities,
        })
    }
}

impl TryFrom<FieldGrammarBuilder> for FieldGrammar {
    type Error = ConfigError;

    fn try_from(builder: FieldGrammarBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl From<FieldGrammar> for FieldGrammarBuilder {
    fn from(grammar: FieldGrammar) -> Self {
        Self {
            tag: grammar.tag,
            pattern: grammar.pattern.source().to_string(),
            validator: grammar.validator,
            components: grammar
                .components
                .into_iter()
                .map(|c| ComponentSpec {
                    semantic_type: c.semantic_type,
                    label: c.label,
                    aliases: c.aliases,
                })
                .collect(),
        }
    }
}

/// Lowercases a label and drops everything but letters and digits.
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Converts a label to camelCase (`Name And Address 2` -> `nameAndAddress2`).
fn camel_case(label: &str) -> String {
    let mut result = String::with_capacity(label.len());
    for (index, word) in label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        if index == 0 {
            result.push_str(&word.to_ascii_lowercase());
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                result.push(first.to_ascii_uppercase());
                result.push_str(&chars.as_str().to_ascii_lowercase());
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_31f() -> FieldGrammar {
        FieldGrammar::builder("31F", "<DATE2>[/<DATE2>][//35x]")
            .component(SemanticType::Date2, "Date")
            .component(SemanticType::Date2, "Period Date")
            .component(SemanticType::Text, "Period Details")
            .build()
            .unwrap()
    }

    #[test]
    fn test_semantic_type_from_str() {
        assert_eq!("DATE2".parse::<SemanticType>().unwrap(), SemanticType::Date2);
        assert_eq!("bic".parse::<SemanticType>().unwrap(), SemanticType::Bic);
        assert_eq!("unknown".parse::<SemanticType>().unwrap(), SemanticType::Text);
    }

    #[test]
    fn test_semantic_type_classes() {
        assert!(SemanticType::RateNumber.is_numeric());
        assert!(SemanticType::Date4.is_date());
        assert!(!SemanticType::Currency.is_numeric());
    }

    #[test]
    fn test_grammar_components() {
        let grammar = field_31f();
        assert_eq!(grammar.tag(), "31F");
        assert_eq!(grammar.components_size(), 3);
        assert_eq!(grammar.layout(), Layout::Delimited);
        assert!(!grammar.component(1).unwrap().optional);
        assert!(grammar.component(2).unwrap().optional);
        assert!(grammar.component(0).is_none());
        assert!(grammar.component(4).is_none());
        assert!(grammar.capabilities().date);
        assert!(!grammar.capabilities().currency);
    }

    #[test]
    fn test_label_lookup() {
        let grammar = field_31f();
        assert_eq!(grammar.position_of("Period Date"), Some(2));
        assert_eq!(grammar.position_of("periodDate"), Some(2));
        assert_eq!(grammar.position_of("PERIOD_DETAILS"), Some(3));
        assert_eq!(grammar.position_of("Amount"), None);
        assert_eq!(grammar.component(2).unwrap().json_key(), "periodDate");
    }

    #[test]
    fn test_tag_parts() {
        let grammar = field_31f();
        assert_eq!(grammar.number(), Some(31));
        assert_eq!(grammar.letter_option(), Some('F'));

        let plain = FieldGrammar::builder("20", "S")
            .component(SemanticType::Text, "Reference")
            .build()
            .unwrap();
        assert_eq!(plain.number(), Some(20));
        assert_eq!(plain.letter_option(), None);
        assert_eq!(plain.validator_pattern(), "S");
    }

    #[test]
    fn test_component_count_mismatch() {
        let err = FieldGrammar::builder("23E", "S[/S]")
            .component(SemanticType::Text, "Instruction Code")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ComponentCountMismatch {
                tag: "23E".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_optional_must_be_suffix() {
        let err = FieldGrammar::builder("99X", "[S/]S")
            .component(SemanticType::Text, "First")
            .component(SemanticType::Text, "Second")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::OptionalNotSuffix { position: 1, .. }));
    }

    #[test]
    fn test_generic_allows_positional_optional() {
        let grammar = FieldGrammar::builder("22F", ":4!c/[8c]/4!c")
            .component(SemanticType::Text, "Qualifier")
            .component(SemanticType::Text, "Data Source Scheme")
            .alias("DSS")
            .component(SemanticType::Text, "Indicator")
            .build()
            .unwrap();
        assert!(grammar.is_generic());
        assert_eq!(grammar.dss_position(), Some(2));
        assert_eq!(grammar.position_of("dss"), Some(2));
        assert!(grammar.capabilities().generic);
    }

    #[test]
    fn test_duplicate_label() {
        let err = FieldGrammar::builder("23E", "S[/S]")
            .component(SemanticType::Text, "Code")
            .component(SemanticType::Text, "code")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateLabel { .. }));
    }

    #[test]
    fn test_reserved_label() {
        let err = FieldGrammar::builder("59", "S")
            .component(SemanticType::Text, "Name")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReservedLabel { ref label, .. } if label == "Name"));

        let err = FieldGrammar::builder("59", "S")
            .component(SemanticType::Text, "Party")
            .alias("NAME")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReservedLabel { .. }));
    }

    #[test]
    fn test_serde_round_trip_rebuilds() {
        let grammar = FieldGrammar::builder("22F", ":4!c/[8c]/4!c")
            .validator(":4!c/[8c]/4!c")
            .component(SemanticType::Text, "Qualifier")
            .component(SemanticType::Text, "Data Source Scheme")
            .alias("DSS")
            .component(SemanticType::Text, "Indicator")
            .build()
            .unwrap();
        let json = serde_json::to_value(&grammar).unwrap();
        assert_eq!(json["pattern"], ":4!c/[8c]/4!c");

        let restored: FieldGrammar = serde_json::from_value(json).unwrap();
        assert_eq!(restored.layout(), Layout::Generic);
        assert_eq!(restored.position_of("dss"), Some(2));
        assert_eq!(restored.components(), grammar.components());
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_grammar() {
        let grammar = FieldGrammar::builder("99F", "6!S5!NS")
            .component(SemanticType::Text, "Code")
            .component(SemanticType::Integer, "Number")
            .component(SemanticType::Text, "Rest")
            .build()
            .unwrap();
        let mut json = serde_json::to_value(&grammar).unwrap();
        json["components"].as_array_mut().unwrap().truncate(1);

        let err = serde_json::from_value::<FieldGrammar>(json).unwrap_err();
        assert!(err.to_string().contains("grammar declares 3 components, got 1"));
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("Name And Address 2"), "nameAndAddress2");
        assert_eq!(camel_case("DC Mark"), "dcMark");
        assert_eq!(camel_case("BIC"), "bic");
        assert_eq!(camel_case("Type Of ID"), "typeOfId");
    }
}
