//! Value enum for dynamic cell and field values

use std::borrow::Cow;
use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use chrono::NaiveTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::Serialize;

/// A dynamic value held by a row attribute or a draft field.
///
/// Rows are opaque to the engines; every attribute they expose is surfaced
/// through this enum so the pipeline can stringify, filter, and compare it,
/// and so the form engine can validate and format it.
///
/// # Example
///
/// ```
/// use adminkit::model::Value;
///
/// let name = Value::from("Abilene");
/// let score = Value::from(42i64);
/// let empty = Value::Null;
///
/// assert_eq!(name.to_display_string(), "Abilene");
/// assert_eq!(score.to_display_string(), "42");
/// assert!(empty.is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal (currency amounts).
    Decimal(Decimal),
    /// Text value.
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for null and for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
        }
    }

    /// Returns the text content if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns `true` for integer, float, and decimal values.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Decimal(_))
    }

    /// Stringified form used for filtering and display.
    ///
    /// Floats never use exponent notation: Rust's `Display` for `f64`
    /// always prints positional digits.
    pub fn to_display_string(&self) -> String {
        self.as_text().into_owned()
    }

    /// Borrowing variant of [`to_display_string`](Self::to_display_string).
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::Float(f) if f.is_finite() => Cow::Owned(f.to_string()),
            Value::Float(_) => Cow::Borrowed(""),
            Value::Decimal(d) => Cow::Owned(d.to_string()),
            Value::Text(s) => Cow::Borrowed(s.as_str()),
            Value::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            Value::Time(t) => Cow::Owned(t.format("%H:%M").to_string()),
        }
    }

    /// Fixed-point text for numeric values headed to a text editor.
    ///
    /// Returns `None` for non-numeric values. Non-finite floats become
    /// an empty string.
    pub fn to_fixed_point(&self) -> Option<String> {
        match self {
            Value::Int(_) | Value::Float(_) | Value::Decimal(_) => Some(self.to_display_string()),
            _ => None,
        }
    }

    /// Numeric reading used by the sort comparator.
    ///
    /// Text counts as numeric when, after trimming and dropping thousands
    /// separators, it parses to a finite number.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) if f.is_finite() => Some(*f),
            Value::Decimal(d) => d.to_f64(),
            Value::Text(s) => parse_numeric(s),
            _ => None,
        }
    }

    /// Parses a decimal amount, tolerating thousands separators and a
    /// leading currency sign.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Int(i) => Some(Decimal::from(*i)),
            Value::Float(f) if f.is_finite() => Decimal::from_str(&f.to_string()).ok(),
            Value::Decimal(d) => Some(*d),
            Value::Text(s) => parse_decimal(s),
            _ => None,
        }
    }

    /// Reads a date from a date value or an ISO `YYYY-MM-DD` string.
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => None,
        }
    }

    /// Converts a JSON value into a cell value.
    ///
    /// Arrays and objects are kept as their JSON text.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Text(s.clone()),
            other => Value::Text(other.to_string()),
        }
    }

    /// Type-aware ordering used by the sort stage.
    ///
    /// Numeric-looking values sort before everything else and compare
    /// numerically; the rest compare lexicographically on their display
    /// string. Ranking the two classes keeps this a total order even on
    /// columns that mix numbers and words.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self.sort_key(), other.sort_key()) {
            (Some(a), Some(b)) => a.compare(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.as_text().cmp(&other.as_text()),
        }
    }
}

/// Exact numeric sort key. Integers and decimals compare without going
/// through `f64`; only floats beyond the decimal range stay as floats.
#[derive(Debug, Clone, Copy)]
enum NumericKey {
    Exact(Decimal),
    Huge(f64),
}

impl NumericKey {
    fn from_f64(f: f64) -> Self {
        match Decimal::from_f64(f) {
            Some(d) => NumericKey::Exact(d),
            None => NumericKey::Huge(f),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NumericKey::Exact(a), NumericKey::Exact(b)) => a.cmp(b),
            (NumericKey::Huge(a), NumericKey::Huge(b)) => a.total_cmp(b),
            (NumericKey::Exact(_), NumericKey::Huge(b)) => {
                if b.is_sign_positive() { Ordering::Less } else { Ordering::Greater }
            }
            (NumericKey::Huge(a), NumericKey::Exact(_)) => {
                if a.is_sign_positive() { Ordering::Greater } else { Ordering::Less }
            }
        }
    }
}

impl Value {
    fn sort_key(&self) -> Option<NumericKey> {
        match self {
            Value::Int(i) => Some(NumericKey::Exact(Decimal::from(*i))),
            Value::Decimal(d) => Some(NumericKey::Exact(*d)),
            Value::Float(f) if f.is_finite() => Some(NumericKey::from_f64(*f)),
            Value::Text(s) => match parse_decimal(s) {
                Some(d) => Some(NumericKey::Exact(d)),
                None => parse_numeric(s).map(NumericKey::from_f64),
            },
            _ => None,
        }
    }
}

fn strip_amount(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    trimmed.chars().filter(|c| *c != ',').collect()
}

fn parse_numeric(s: &str) -> Option<f64> {
    let cleaned = strip_amount(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned = strip_amount(s);
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_text())
    }
}
