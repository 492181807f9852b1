/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Conversions between raw component text and typed values.
//!
//! Every `parse_*` function is total: malformed text yields `None`. Every
//! `format_*` function produces the canonical SWIFT wire notation.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a plain base-10 integer.
///
/// # Example
/// ```
/// use ironswift_core::convert::parse_integer;
///
/// assert_eq!(parse_integer("0042"), Some(42));
/// assert_eq!(parse_integer("4,2"), None);
/// ```
#[must_use]
pub fn parse_integer(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        return None;
    }
    s.parse().ok()
}

/// Formats an integer as plain digits.
#[inline]
#[must_use]
pub fn format_integer(value: i64) -> String {
    let mut buf = itoa::Buffer::new();
    buf.format(value).to_string()
}

/// Parses a SWIFT decimal number.
///
/// Both `,` (SWIFT) and `.` are accepted as decimal separator. A separator
/// without fractional digits (`1234,`) and without integer digits (`,5`)
/// are both valid.
#[must_use]
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    let mut separators = 0;
    for b in s.bytes() {
        match b {
            b'0'..=b'9' | b'-' => {}
            b',' | b'.' => separators += 1,
            _ => return None,
        }
    }
    if separators > 1 {
        return None;
    }
    let normalized = s.replace(',', ".");
    let trimmed = normalized.trim_end_matches('.');
    let text = if trimmed.starts_with('.') {
        format!("0{trimmed}")
    } else {
        trimmed.to_string()
    };
    Decimal::from_str(&text).ok()
}

/// Formats an amount in SWIFT notation.
///
/// The decimal separator is always `,` and trailing fractional zeros are
/// dropped, keeping the separator itself:
///
/// ```
/// use ironswift_core::convert::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(123400, 2)), "1234,");
/// assert_eq!(format_amount(Decimal::new(123456, 2)), "1234,56");
/// ```
#[must_use]
pub fn format_amount(value: Decimal) -> String {
    let text = value.normalize().to_string();
    match text.split_once('.') {
        Some((int, frac)) => format!("{int},{frac}"),
        None => format!("{text},"),
    }
}

/// Parses a `YYMMDD` date.
#[must_use]
pub fn parse_date2(s: &str) -> Option<NaiveDate> {
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%y%m%d").ok()
}

/// Formats a date as `YYMMDD`.
#[must_use]
pub fn format_date2(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}

/// Parses a `YYYYMMDD` date.
#[must_use]
pub fn parse_date4(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y%m%d").ok()
}

/// Formats a date as `YYYYMMDD`.
#[must_use]
pub fn format_date4(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Parses a `HHMM` or `HHMMSS` time.
#[must_use]
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match s.len() {
        4 => NaiveTime::parse_from_str(s, "%H%M").ok(),
        6 => NaiveTime::parse_from_str(s, "%H%M%S").ok(),
        _ => None,
    }
}

/// Formats a time as `HHMM`.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("12345"), Some(12345));
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("12a"), None);
        assert_eq!(parse_integer("+5"), None);
    }

    #[test]
    fn test_format_integer() {
        assert_eq!(format_integer(0), "0");
        assert_eq!(format_integer(-17), "-17");
    }

    #[test]
    fn test_parse_decimal_separators() {
        assert_eq!(parse_decimal("1234,56"), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_decimal("1234.56"), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_decimal("1234,"), Some(Decimal::from(1234)));
        assert_eq!(parse_decimal(",5"), Some(Decimal::new(5, 1)));
    }

    #[test]
    fn test_parse_decimal_invalid() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("1,2,3"), None);
        assert_eq!(parse_decimal("12 3"), None);
        assert_eq!(parse_decimal("USD"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(123400, 2)), "1234,");
        assert_eq!(format_amount(Decimal::new(123456, 2)), "1234,56");
        assert_eq!(format_amount(Decimal::new(5, 1)), "0,5");
        assert_eq!(format_amount(Decimal::ZERO), "0,");
    }

    #[test]
    fn test_date2() {
        let date = parse_date2("210101").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(format_date2(date), "210101");
        assert_eq!(parse_date2("211301"), None);
        assert_eq!(parse_date2("21011"), None);
        assert_eq!(parse_date2("2101a1"), None);
    }

    #[test]
    fn test_date4() {
        let date = parse_date4("20240229").unwrap();
        assert_eq!(format_date4(date), "20240229");
        assert_eq!(parse_date4("20230229"), None);
    }

    #[test]
    fn test_time() {
        let time = parse_time("1530").unwrap();
        assert_eq!(format_time(time), "1530");
        assert!(parse_time("153045").is_some());
        assert_eq!(parse_time("2460"), None);
        assert_eq!(parse_time("15:30"), None);
    }
}
