//! Runtime value types for field comparison.
//!
//! The [`Value`] enum is what a record hands back when the engine asks for
//! one of its attributes. It covers the three attribute shapes the query
//! language knows about: scalar strings, scalar numbers, and lists of strings.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

/// Runtime value for comparison, borrowed from the source record.
///
/// # Example
///
/// ```
/// use cardseek::{Number, Value};
///
/// struct Card {
///     title: String,
///     power: i64,
///     icons: Vec<String>,
/// }
///
/// fn accessor<'a>(card: &'a Card, field: &str) -> Value<'a> {
///     match field {
///         "title" => Value::String(&card.title),
///         "power" => Value::Number(Number::I64(card.power)),
///         "icons" => Value::List(&card.icons),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// List of strings (borrowed).
    List(&'a [String]),
    /// Attribute not present, null, or unsupported.
    None,
}

impl<'a> Value<'a> {
    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Coerces the value to a number.
    ///
    /// Numbers pass through; strings are parsed with [`Number::parse`]
    /// (card stats are frequently stored as text). Lists never coerce.
    pub fn to_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => Number::parse(s.trim()),
            _ => None,
        }
    }
}

/// Numeric value.
///
/// Integers stay exact; anything with a fractional part (or too large for
/// `i64`) is `F64`. Mixed comparisons go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// 64-bit floating point.
    F64(f64),
}

static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(?:\d+(?:\.\d*)?|\.\d+)$").unwrap_or_else(|e| panic!("numeric literal: {e}"))
});

impl Number {
    /// Parses a numeric literal: an integer or decimal with an optional
    /// leading `-`. Anything else (including the empty string) is `None`.
    ///
    /// ```
    /// use cardseek::Number;
    ///
    /// assert_eq!(Number::parse("9"), Some(Number::I64(9)));
    /// assert_eq!(Number::parse("-1.5"), Some(Number::F64(-1.5)));
    /// assert_eq!(Number::parse("abc"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Number> {
        if !NUMERIC_LITERAL.is_match(text) {
            return None;
        }
        if !text.contains('.') {
            if let Ok(n) = text.parse::<i64>() {
                return Some(Number::I64(n));
            }
        }
        text.parse::<f64>().ok().map(Number::F64)
    }

    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),

            // Mixed type comparisons - convert to f64
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_as_str() {
        assert_eq!(Value::String("hello").as_str(), Some("hello"));
        assert_eq!(Value::Number(Number::I64(1)).as_str(), None);
        assert_eq!(Value::None.as_str(), None);
    }

    #[test]
    fn value_coerces_to_number() {
        let list = vec!["3".to_string()];
        assert_eq!(Value::Number(Number::I64(4)).to_number(), Some(Number::I64(4)));
        assert_eq!(Value::String(" 3 ").to_number(), Some(Number::I64(3)));
        assert_eq!(Value::String("2.5").to_number(), Some(Number::F64(2.5)));
        assert_eq!(Value::String("*").to_number(), None);
        assert_eq!(Value::List(&list).to_number(), None);
        assert_eq!(Value::None.to_number(), None);
    }

    #[test]
    fn parse_accepts_integers_and_decimals() {
        assert_eq!(Number::parse("0"), Some(Number::I64(0)));
        assert_eq!(Number::parse("-7"), Some(Number::I64(-7)));
        assert_eq!(Number::parse("1.5"), Some(Number::F64(1.5)));
        assert_eq!(Number::parse("3."), Some(Number::F64(3.0)));
        assert_eq!(Number::parse(".5"), Some(Number::F64(0.5)));
    }

    #[test]
    fn parse_rejects_non_numbers() {
        assert_eq!(Number::parse(""), None);
        assert_eq!(Number::parse("-"), None);
        assert_eq!(Number::parse("abc"), None);
        assert_eq!(Number::parse("1e5"), None);
        assert_eq!(Number::parse("+3"), None);
        assert_eq!(Number::parse("9 9"), None);
        assert_eq!(Number::parse("nan"), None);
    }

    #[test]
    fn parse_falls_back_to_float_on_overflow() {
        assert_eq!(
            Number::parse("99999999999999999999"),
            Some(Number::F64(1e20))
        );
    }

    #[test]
    fn number_comparisons_same_type() {
        assert_eq!(Number::I64(5).compare(Number::I64(10)), Some(Ordering::Less));
        assert_eq!(Number::I64(10).compare(Number::I64(5)), Some(Ordering::Greater));
        assert_eq!(Number::I64(5).compare(Number::I64(5)), Some(Ordering::Equal));
        assert_eq!(Number::F64(5.0).compare(Number::F64(10.0)), Some(Ordering::Less));
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(Number::I64(5).compare(Number::F64(10.0)), Some(Ordering::Less));
        assert_eq!(Number::I64(5).compare(Number::F64(5.0)), Some(Ordering::Equal));
        assert_eq!(Number::I64(10).compare(Number::F64(5.5)), Some(Ordering::Greater));
    }

    #[test]
    fn number_nan_comparison() {
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
        assert_eq!(Number::F64(1.0).compare(Number::F64(f64::NAN)), None);
    }
}
