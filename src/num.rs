//! Numeric syntax for `Double` option values.
//!
//! The textual form of a floating-point value differs between locales:
//! decimal comma versus decimal point, grouping separators or none. The
//! parser core does not reimplement those rules; it delegates to a
//! [`NumberFormat`] chosen per parse call.

/// Converts locale-formatted numeric text into a number.
///
/// This is the seam for plugging in real locale tables. The stock
/// implementations cover computer syntax ([`PlainNumber`]) and simple
/// separator conventions ([`DelimitedNumber`]).
pub trait NumberFormat {
    /// Parse `text` as a floating-point number, or `None` if it is
    /// malformed under this syntax.
    fn parse_number(&self, text: &str) -> Option<f64>;
}

/// Computer syntax: `.` as the decimal separator, no grouping.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNumber;

impl NumberFormat for PlainNumber {
    fn parse_number(&self, text: &str) -> Option<f64> {
        text.parse().ok()
    }
}

/// A configurable separator convention, e.g. `1.234,5` where `,` is the
/// decimal separator and `.` groups thousands.
///
/// Grouping separators are stripped, the decimal separator becomes `.`,
/// and the rest must be ordinary float syntax. A `.` that is neither the
/// decimal nor the grouping separator is rejected rather than passed
/// through.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedNumber {
    decimal: char,
    grouping: Option<char>,
}

impl DelimitedNumber {
    /// Create a syntax with the given decimal separator and an optional
    /// grouping separator.
    pub fn new(decimal: char, grouping: impl Into<Option<char>>) -> DelimitedNumber {
        DelimitedNumber {
            decimal,
            grouping: grouping.into(),
        }
    }
}

impl NumberFormat for DelimitedNumber {
    fn parse_number(&self, text: &str) -> Option<f64> {
        let mut normalized = String::with_capacity(text.len());
        for ch in text.chars() {
            if Some(ch) == self.grouping {
                continue;
            } else if ch == self.decimal {
                normalized.push('.');
            } else if ch == '.' {
                return None;
            } else {
                normalized.push(ch);
            }
        }
        normalized.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain() {
        assert_eq!(PlainNumber.parse_number("0.5"), Some(0.5));
        assert_eq!(PlainNumber.parse_number("-2"), Some(-2.0));
        assert_eq!(PlainNumber.parse_number("1e3"), Some(1000.0));
        assert_eq!(PlainNumber.parse_number("ten"), None);
        assert_eq!(PlainNumber.parse_number("1,5"), None);
        assert_eq!(PlainNumber.parse_number(""), None);
    }

    #[test]
    fn test_delimited() {
        let german = DelimitedNumber::new(',', '.');
        assert_eq!(german.parse_number("1.234,5"), Some(1234.5));
        assert_eq!(german.parse_number("2,5"), Some(2.5));
        assert_eq!(german.parse_number("-1.000.000"), Some(-1_000_000.0));
        assert_eq!(german.parse_number("42"), Some(42.0));
        assert_eq!(german.parse_number("2,5,0"), None);
        assert_eq!(german.parse_number("abc"), None);
    }

    #[test]
    fn test_delimited_without_grouping() {
        let comma = DelimitedNumber::new(',', None);
        assert_eq!(comma.parse_number("2,5"), Some(2.5));
        // The canonical separator is foreign under this convention.
        assert_eq!(comma.parse_number("1.5"), None);
    }
}
