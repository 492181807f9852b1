/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Typed component values.
//!
//! This module provides the semantic value types that field components
//! convert into:
//! - [`Currency`]: ISO 4217 alphabetic currency code
//! - [`Country`]: ISO 3166 alpha-2 country code
//! - [`Bic`]: Business Identifier Code (8 or 11 characters)
//! - [`Number`]: Integer or decimal value resolved at the call boundary
//!
//! Validation is syntactic only; no registry lookups are performed.

use crate::convert::{format_amount, format_integer};
use crate::error::ComponentError;
use arrayvec::ArrayString;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a currency code.
pub const CURRENCY_LEN: usize = 3;

/// Length of a country code.
pub const COUNTRY_LEN: usize = 2;

/// Maximum length of a BIC.
pub const BIC_MAX_LEN: usize = 11;

/// ISO 4217 currency code, e.g. `USD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(ArrayString<CURRENCY_LEN>);

impl Currency {
    /// Creates a currency code from a string slice.
    ///
    /// # Returns
    /// `Some(Currency)` if the text is exactly three uppercase ASCII letters.
    #[must_use]
    pub fn new(s: &str) -> Option<Self> {
        if s.len() == CURRENCY_LEN && s.bytes().all(|b| b.is_ascii_uppercase()) {
            ArrayString::from(s).ok().map(Self)
        } else {
            None
        }
    }

    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Currency {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Currency {
    type Error = ComponentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or(ComponentError::InvalidCode { kind: "currency", value })
    }
}

impl From<Currency> for String {
    fn from(code: Currency) -> Self {
        code.as_str().to_string()
    }
}

/// ISO 3166 alpha-2 country code, e.g. `US`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "String", into = "String")]
pub struct Country(ArrayString<COUNTRY_LEN>);

impl Country {
    /// Creates a country code from a string slice.
    ///
    /// # Returns
    /// `Some(Country)` if the text is exactly two uppercase ASCII letters.
    #[must_use]
    pub fn new(s: &str) -> Option<Self> {
        if s.len() == COUNTRY_LEN && s.bytes().all(|b| b.is_ascii_uppercase()) {
            ArrayString::from(s).ok().map(Self)
        } else {
            None
        }
    }

    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Country {
    type Error = ComponentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or(ComponentError::InvalidCode { kind: "country", value })
    }
}

impl From<Country> for String {
    fn from(code: Country) -> Self {
        code.as_str().to_string()
    }
}

/// Business Identifier Code.
///
/// Layout: 4-letter institution code, 2-letter country code, 2-character
/// location code and an optional 3-character branch code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "String", into = "String")]
pub struct Bic(ArrayString<BIC_MAX_LEN>);

impl Bic {
    /// Creates a BIC from a string slice.
    ///
    /// # Returns
    /// `Some(Bic)` if the text has the 8 or 11 character BIC shape.
    #[must_use]
    pub fn new(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 8 && bytes.len() != BIC_MAX_LEN {
            return None;
        }
        let letters = bytes[..6].iter().all(|b| b.is_ascii_uppercase());
        let alnum = bytes[6..]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if letters && alnum {
            ArrayString::from(s).ok().map(Self)
        } else {
            None
        }
    }

    /// Returns the full BIC as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the 4-letter institution code.
    #[must_use]
    pub fn institution(&self) -> &str {
        &self.0[..4]
    }

    /// Returns the country part of the BIC.
    #[must_use]
    pub fn country(&self) -> Country {
        Country(ArrayString::from(&self.0[4..6]).unwrap_or_default())
    }

    /// Returns the 2-character location code.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.0[6..8]
    }

    /// Returns the branch code, if present.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        (self.0.len() == BIC_MAX_LEN).then(|| &self.0[8..])
    }

    /// Returns true for test and training BICs (location ending in `0`).
    #[must_use]
    pub fn is_test_and_training(&self) -> bool {
        self.0.as_bytes()[7] == b'0'
    }
}

impl AsRef<str> for Bic {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Bic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Bic {
    type Error = ComponentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or(ComponentError::InvalidCode { kind: "BIC", value })
    }
}

impl From<Bic> for String {
    fn from(code: Bic) -> Self {
        code.as_str().to_string()
    }
}

/// Numeric component value.
///
/// Setters take a `Number` so integer and decimal inputs are told apart
/// once, when the value is built, and each is formatted its own way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Number {
    /// Plain base-10 integer.
    Integer(i64),
    /// Decimal amount or rate.
    Decimal(Decimal),
}

impl Number {
    /// Formats the number in SWIFT notation.
    ///
    /// Integers are written as plain digits; decimals use `,` as separator
    /// and drop trailing fractional zeros.
    #[must_use]
    pub fn to_swift_string(&self) -> String {
        match self {
            Self::Integer(v) => format_integer(*v),
            Self::Decimal(v) => format_amount(*v),
        }
    }

    /// Returns the value as an i64 when it has no fractional part.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Decimal(v) if v.fract().is_zero() => v.to_i64(),
            Self::Decimal(_) => None,
        }
    }

    /// Returns the value as a Decimal.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        match self {
            Self::Integer(v) => Decimal::from(*v),
            Self::Decimal(v) => *v,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_swift_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_currency() {
        assert_eq!(Currency::new("USD").unwrap().as_str(), "USD");
        assert!(Currency::new("usd").is_none());
        assert!(Currency::new("US").is_none());
        assert!(Currency::new("USD1").is_none());
    }

    #[test]
    fn test_country() {
        assert_eq!(Country::new("AR").unwrap().to_string(), "AR");
        assert!(Country::new("ARG").is_none());
    }

    #[test]
    fn test_bic_parts() {
        let bic = Bic::new("DEUTDEFFXXX").unwrap();
        assert_eq!(bic.institution(), "DEUT");
        assert_eq!(bic.country().as_str(), "DE");
        assert_eq!(bic.location(), "FF");
        assert_eq!(bic.branch(), Some("XXX"));
        assert!(!bic.is_test_and_training());

        let short = Bic::new("BANKUS30").unwrap();
        assert_eq!(short.branch(), None);
        assert!(short.is_test_and_training());
    }

    #[test]
    fn test_codes_deserialize_through_validation() {
        let bic: Bic = serde_json::from_str("\"DEUTDEFF\"").unwrap();
        assert_eq!(bic.institution(), "DEUT");
        assert_eq!(serde_json::to_string(&bic).unwrap(), "\"DEUTDEFF\"");

        let currency: Currency = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(currency.as_str(), "USD");

        assert!(serde_json::from_str::<Bic>("\"AB\"").is_err());
        assert!(serde_json::from_str::<Currency>("\"x\"").is_err());
        assert!(serde_json::from_str::<Country>("\"ARG\"").is_err());
        assert_eq!(
            Bic::try_from("AB".to_string()),
            Err(ComponentError::InvalidCode {
                kind: "BIC",
                value: "AB".to_string(),
            })
        );
    }

    #[test]
    fn test_bic_invalid() {
        assert!(Bic::new("DEUTDEF").is_none());
        assert!(Bic::new("DEU1DEFF").is_none());
        assert!(Bic::new("deutdeff").is_none());
        assert!(Bic::new("DEUTDEFFXX").is_none());
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(Number::from(42i64).to_swift_string(), "42");
        let amount = Decimal::from_str("1234.56").unwrap();
        assert_eq!(Number::from(amount).to_swift_string(), "1234,56");
    }

    #[test]
    fn test_number_as_i64() {
        assert_eq!(Number::Decimal(Decimal::from(7)).as_i64(), Some(7));
        assert_eq!(
            Number::Decimal(Decimal::from_str("7.5").unwrap()).as_i64(),
            None
        );
        assert_eq!(Number::Integer(3).as_decimal(), Decimal::from(3));
    }
}
