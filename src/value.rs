//! Field values stored in records
//!
//! A record field holds one of five kinds of value:
//! - `Null`: an explicit SQL-style null
//! - `Bool`: a boolean flag
//! - `Number`: any numeric column (counts, ports, ...)
//! - `Text`: strings, identifiers, serialized JSON
//! - `Date`: a UTC timestamp
//!
//! A field that is missing from a record is not a `Value` at all; lookups
//! return `Option<&Value>` and `None` plays the role of "undefined".

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single field value.
///
/// Serialized untagged, so JSON fixtures map naturally: `null`, booleans,
/// numbers, date strings (RFC 3339 or `YYYY-MM-DD`) and any other string
/// (text). A date string always decodes to `Date`, so stored dates order
/// against date filters no matter how the fixture spelled them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl Value {
    /// Get the name of the value kind
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Date(_) => "date",
            Value::Text(_) => "text",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Interpret the value as a timestamp.
    ///
    /// Text is accepted when it parses as RFC 3339 or as a plain
    /// `YYYY-MM-DD` date (midnight UTC).
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Text(s) => parse_date(s),
            _ => None,
        }
    }

    /// Natural ordering between two values of the same kind.
    ///
    /// Returns `None` for mixed kinds, for `Null`, and for NaN numbers.
    /// Ordering operators treat `None` as "does not match".
    pub fn partial_order(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// Wire shape before strings are sorted into dates and text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawValue::deserialize(deserializer)? {
            RawValue::Null => Value::Null,
            RawValue::Bool(b) => Value::Bool(b),
            RawValue::Number(n) => Value::Number(n),
            RawValue::Text(s) => match parse_date(&s) {
                Some(date) => Value::Date(date),
                None => Value::Text(s),
            },
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Date(d) => write!(f, "{}", d.to_rfc3339()),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ordering_same_kind_only() {
        assert_eq!(Value::from(5).partial_order(&Value::from(10)), Some(Ordering::Less));
        assert_eq!(Value::from("b").partial_order(&Value::from("a")), Some(Ordering::Greater));
        assert_eq!(Value::from(5).partial_order(&Value::from("5")), None);
        assert_eq!(Value::Null.partial_order(&Value::Null), None);
        assert_eq!(Value::from(f64::NAN).partial_order(&Value::from(1.0)), None);
    }

    #[test]
    fn test_strict_equality() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::from(1), Value::from("1"));
        assert_ne!(Value::from(f64::NAN), Value::from(f64::NAN));
    }

    #[test]
    fn test_json_decoding() {
        let values: Vec<Value> = serde_json::from_str(
            r#"[null, true, 3, "2023-03-15T00:00:00Z", "hello", "2023-03-15", "2023-13-45"]"#,
        )
        .unwrap();
        assert_eq!(values[0], Value::Null);
        assert_eq!(values[1], Value::Bool(true));
        assert_eq!(values[2], Value::Number(3.0));
        assert_eq!(
            values[3],
            Value::Date(Utc.with_ymd_and_hms(2023, 3, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(values[4], Value::from("hello"));
        // plain dates decode to the same kind as RFC 3339 ones
        assert_eq!(values[5], values[3]);
        assert_eq!(values[6], Value::from("2023-13-45"));
    }

    #[test]
    fn test_as_date_accepts_plain_dates() {
        let expected = Utc.with_ymd_and_hms(2023, 2, 10, 0, 0, 0).unwrap();
        assert_eq!(Value::from("2023-02-10").as_date(), Some(expected));
        assert_eq!(Value::from("not a date").as_date(), None);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
        assert_eq!(Value::from(None::<&str>), Value::Null);
    }
}
