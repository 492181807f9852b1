/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Field instances.
//!
//! This module provides [`Field`], one concrete occurrence of a SWIFT MT
//! field: a shared grammar plus the owned component values.
//!
//! Components are addressed by 1-based position or by label. Typed getters
//! return `Ok(None)` when a component is absent or cannot be converted;
//! only out-of-range positions and unknown labels are errors.

use crate::codec::FieldCodec;
use chrono::{NaiveDate, NaiveTime};
use ironswift_core::convert::{
    format_amount, format_date2, format_date4, format_time, parse_date2, parse_date4,
    parse_decimal, parse_integer, parse_time,
};
use ironswift_core::error::{ComponentError, ConfigError, DecodeError, Result};
use ironswift_core::tag::Tag;
use ironswift_core::types::{Bic, Country, Currency, Number};
use ironswift_grammar::{FieldGrammar, SemanticType};
use rust_decimal::Decimal;
use smallvec::SmallVec;
use std::sync::Arc;

/// Owned component values.
pub type Values = SmallVec<[Option<String>; 6]>;

/// One occurrence of a field.
///
/// Many instances share one grammar. An instance can be read from several
/// threads once it is no longer mutated.
#[derive(Debug, Clone)]
pub struct Field {
    grammar: Arc<FieldGrammar>,
    values: Values,
}

impl Field {
    /// Creates an instance with every component absent.
    #[must_use]
    pub fn new(grammar: Arc<FieldGrammar>) -> Self {
        let values = SmallVec::from_elem(None, grammar.components_size());
        Self { grammar, values }
    }

    /// Creates an instance by decoding a raw value.
    ///
    /// # Errors
    /// Returns an error if the value cannot be decoded with the grammar.
    pub fn parse_value(grammar: Arc<FieldGrammar>, raw: &str) -> Result<Self> {
        let mut field = Self::new(grammar);
        field.parse(Some(raw))?;
        Ok(field)
    }

    /// Creates an instance from a tag occurrence.
    ///
    /// # Errors
    /// Returns `DecodeError::TagMismatch` if the tag name differs from the
    /// grammar's tag, or any decode error of the value.
    pub fn from_tag(grammar: Arc<FieldGrammar>, tag: &Tag) -> Result<Self> {
        if tag.name() != grammar.tag() {
            return Err(DecodeError::TagMismatch {
                expected: grammar.tag().to_string(),
                actual: tag.name().to_string(),
            }
            .into());
        }
        Self::parse_value(grammar, tag.value())
    }

    /// Creates an instance from component values.
    ///
    /// # Errors
    /// Returns `ConfigError::ComponentCountMismatch` if the number of values
    /// differs from the grammar's component count.
    pub fn from_components<I, S>(grammar: Arc<FieldGrammar>, components: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let values: Values = components.into_iter().map(|c| c.map(Into::into)).collect();
        if values.len() != grammar.components_size() {
            return Err(ConfigError::ComponentCountMismatch {
                tag: grammar.tag().to_string(),
                expected: grammar.components_size(),
                actual: values.len(),
            }
            .into());
        }
        Ok(Self { grammar, values })
    }

    /// Replaces every component with the decoded raw value.
    ///
    /// # Errors
    /// Returns the decode error; the components are left unchanged.
    pub fn parse(&mut self, raw: Option<&str>) -> Result<()> {
        self.parse_with(&FieldCodec::new(), raw)
    }

    /// Replaces every component using the given codec.
    ///
    /// # Errors
    /// Returns the decode error; the components are left unchanged.
    pub fn parse_with(&mut self, codec: &FieldCodec, raw: Option<&str>) -> Result<()> {
        let decoded = codec.decode(&self.grammar, raw)?;
        self.values = decoded.iter().map(|c| c.map(str::to_string)).collect();
        Ok(())
    }

    /// Returns the wire value.
    ///
    /// # Errors
    /// Returns `ConfigError::UnsupportedGrammar` for a grammar the codec
    /// does not implement.
    pub fn value(&self) -> Result<String> {
        self.value_with(&FieldCodec::new())
    }

    /// Returns the wire value using the given codec.
    ///
    /// # Errors
    /// Returns `ConfigError::UnsupportedGrammar` for a grammar the codec
    /// does not implement.
    pub fn value_with(&self, codec: &FieldCodec) -> Result<String> {
        codec.encode(&self.grammar, &self.values)
    }

    /// Returns the field as a tag occurrence.
    ///
    /// # Errors
    /// Returns the encode error.
    pub fn as_tag(&self) -> Result<Tag> {
        Ok(Tag::new(self.grammar.tag(), self.value()?))
    }

    /// Returns the grammar.
    #[inline]
    #[must_use]
    pub fn grammar(&self) -> &Arc<FieldGrammar> {
        &self.grammar
    }

    /// Returns the tag name, e.g. `32A`.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.grammar.tag()
    }

    /// Returns all component values in order.
    #[inline]
    #[must_use]
    pub fn components(&self) -> &[Option<String>] {
        &self.values
    }

    /// Returns the number of components.
    #[inline]
    #[must_use]
    pub fn components_size(&self) -> usize {
        self.values.len()
    }

    /// Returns true if every component is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    fn index(&self, position: usize) -> Result<usize> {
        if (1..=self.values.len()).contains(&position) {
            Ok(position - 1)
        } else {
            Err(ComponentError::OutOfRange {
                position,
                size: self.values.len(),
            }
            .into())
        }
    }

    fn position_of(&self, label: &str) -> Result<usize> {
        self.grammar
            .position_of(label)
            .ok_or_else(|| ComponentError::UnknownLabel(label.to_string()).into())
    }

    /// Gets a component by 1-based position.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` if the position is not in
    /// `1..=components_size()`.
    pub fn component(&self, position: usize) -> Result<Option<&str>> {
        let index = self.index(position)?;
        Ok(self.values[index].as_deref())
    }

    /// Sets a component by 1-based position.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` if the position is not in
    /// `1..=components_size()`.
    pub fn set_component(&mut self, position: usize, value: impl Into<String>) -> Result<()> {
        let index = self.index(position)?;
        self.values[index] = Some(value.into());
        Ok(())
    }

    /// Marks a component as absent.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` if the position is not in
    /// `1..=components_size()`.
    pub fn clear_component(&mut self, position: usize) -> Result<()> {
        let index = self.index(position)?;
        self.values[index] = None;
        Ok(())
    }

    /// Gets a component by label or alias.
    ///
    /// # Errors
    /// Returns `ComponentError::UnknownLabel` if no component has the label.
    pub fn get(&self, label: &str) -> Result<Option<&str>> {
        let position = self.position_of(label)?;
        self.component(position)
    }

    /// Sets a component by label or alias.
    ///
    /// # Errors
    /// Returns `ComponentError::UnknownLabel` if no component has the label.
    pub fn set(&mut self, label: &str, value: impl Into<String>) -> Result<()> {
        let position = self.position_of(label)?;
        self.set_component(position, value)
    }

    /// Gets a component as an integer.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` for an invalid position.
    pub fn component_as_integer(&self, position: usize) -> Result<Option<i64>> {
        Ok(self.component(position)?.and_then(parse_integer))
    }

    /// Gets a component as a decimal number.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` for an invalid position.
    pub fn component_as_decimal(&self, position: usize) -> Result<Option<Decimal>> {
        Ok(self.component(position)?.and_then(parse_decimal))
    }

    /// Gets a component as a number, integer or decimal per its semantic type.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` for an invalid position.
    pub fn component_as_number(&self, position: usize) -> Result<Option<Number>> {
        let text = self.component(position)?;
        let number = match self.semantic_type(position) {
            SemanticType::Integer => text.and_then(parse_integer).map(Number::Integer),
            _ => text.and_then(parse_decimal).map(Number::Decimal),
        };
        Ok(number)
    }

    /// Gets a component as a date.
    ///
    /// `Date4` components are read as `YYYYMMDD`, all others as `YYMMDD`.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` for an invalid position.
    pub fn component_as_date(&self, position: usize) -> Result<Option<NaiveDate>> {
        let text = self.component(position)?;
        let date = match self.semantic_type(position) {
            SemanticType::Date4 => text.and_then(parse_date4),
            _ => text.and_then(parse_date2),
        };
        Ok(date)
    }

    /// Gets a component as a time.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` for an invalid position.
    pub fn component_as_time(&self, position: usize) -> Result<Option<NaiveTime>> {
        Ok(self.component(position)?.and_then(parse_time))
    }

    /// Gets a component as a currency code.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` for an invalid position.
    pub fn component_as_currency(&self, position: usize) -> Result<Option<Currency>> {
        Ok(self.component(position)?.and_then(Currency::new))
    }

    /// Gets a component as a country code.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` for an invalid position.
    pub fn component_as_country(&self, position: usize) -> Result<Option<Country>> {
        Ok(self.component(position)?.and_then(Country::new))
    }

    /// Gets a component as a BIC.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` for an invalid position.
    pub fn component_as_bic(&self, position: usize) -> Result<Option<Bic>> {
        Ok(self.component(position)?.and_then(Bic::new))
    }

    /// Sets a numeric component in SWIFT notation.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` for an invalid position.
    pub fn set_number(&mut self, position: usize, number: impl Into<Number>) -> Result<()> {
        self.set_component(position, number.into().to_swift_string())
    }

    /// Sets an amount component, e.g. `1234,` for 1234.00.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` for an invalid position.
    pub fn set_amount(&mut self, position: usize, amount: Decimal) -> Result<()> {
        self.set_component(position, format_amount(amount))
    }

    /// Sets a date component in the width its semantic type requires.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` for an invalid position.
    pub fn set_date(&mut self, position: usize, date: NaiveDate) -> Result<()> {
        self.index(position)?;
        let text = match self.semantic_type(position) {
            SemanticType::Date4 => format_date4(date),
            _ => format_date2(date),
        };
        self.set_component(position, text)
    }

    /// Sets a time component as `HHMM`.
    ///
    /// # Errors
    /// Returns `ComponentError::OutOfRange` for an invalid position.
    pub fn set_time(&mut self, position: usize, time: NaiveTime) -> Result<()> {
        self.set_component(position, format_time(time))
    }

    fn semantic_type(&self, position: usize) -> SemanticType {
        self.grammar
            .component(position)
            .map_or(SemanticType::Text, |c| c.semantic_type)
    }

    fn typed<'s, T>(
        &'s self,
        matches: impl Fn(SemanticType) -> bool,
        convert: impl Fn(usize, &'s str) -> Option<T>,
    ) -> Vec<T> {
        self.grammar
            .components()
            .iter()
            .zip(&self.values)
            .filter(|(def, _)| matches(def.semantic_type))
            .filter_map(|(def, value)| convert(def.position, value.as_deref()?))
            .collect()
    }

    /// Returns the valid currency codes among the currency components.
    #[must_use]
    pub fn currencies(&self) -> Vec<Currency> {
        self.typed(|t| t == SemanticType::Currency, |_, v| Currency::new(v))
    }

    /// Returns the valid BICs among the BIC components.
    #[must_use]
    pub fn bics(&self) -> Vec<Bic> {
        self.typed(|t| t == SemanticType::Bic, |_, v| Bic::new(v))
    }

    /// Returns the valid dates among the date components.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.typed(|t| t.is_date(), |position, v| {
            match self.semantic_type(position) {
                SemanticType::Date4 => parse_date4(v),
                _ => parse_date2(v),
            }
        })
    }

    /// Returns the valid amounts among the amount and rate components.
    #[must_use]
    pub fn amounts(&self) -> Vec<Decimal> {
        self.typed(|t| t.is_decimal(), |_, v| parse_decimal(v))
    }

    /// Returns the present lines of a multi-line field.
    ///
    /// Fields that do not span lines return an empty list.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        if !self.grammar.is_multi_line() {
            return Vec::new();
        }
        let skip = usize::from(self.grammar.prefix().is_some());
        self.values
            .iter()
            .skip(skip)
            .filter_map(Option::as_deref)
            .collect()
    }

    /// Returns the qualifier of a generic field.
    #[must_use]
    pub fn qualifier(&self) -> Option<&str> {
        if self.grammar.is_generic() {
            self.values.first().and_then(Option::as_deref)
        } else {
            None
        }
    }

    /// Returns the data source scheme, if the field has one and it is set.
    #[must_use]
    pub fn dss(&self) -> Option<&str> {
        let index = self.grammar.dss_position()? - 1;
        self.values[index].as_deref().filter(|v| !v.is_empty())
    }

    /// Returns true if the data source scheme is set.
    #[must_use]
    pub fn is_dss_present(&self) -> bool {
        self.dss().is_some()
    }

    /// Returns the component that follows the data source scheme.
    #[must_use]
    pub fn conditional_qualifier(&self) -> Option<&str> {
        let index = self.grammar.dss_position()?;
        self.values.get(index).and_then(Option::as_deref)
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.grammar.tag() == other.grammar.tag() && self.values == other.values
    }
}

impl Eq for Field {}
