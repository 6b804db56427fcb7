//! Value formatters for the input-change, blur, and focus paths.
//!
//! Every built-in formatter is idempotent: applying it to its own output
//! returns the same value.

use std::fmt;
use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::Value;

type FormatFn = dyn Fn(&Value) -> Value + Send + Sync;

/// A value transformation applied when the user edits a field.
#[derive(Clone)]
pub struct Formatter {
    format: Arc<FormatFn>,
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Formatter")
    }
}

impl Formatter {
    /// Wrap a formatting closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self { format: Arc::new(f) }
    }

    /// Wrap a text-to-text function. Null passes through untouched.
    pub fn text<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::new(move |value| match value {
            Value::Null => Value::Null,
            other => Value::Text(f(other.as_text().as_ref())),
        })
    }

    /// Apply the formatter.
    pub fn apply(&self, value: &Value) -> Value {
        (self.format)(value)
    }

    /// Phone and fax grouping: `(NNN)-NNN-NNNN`.
    pub fn phone() -> Self {
        Self::text(format_phone)
    }

    /// Keep only ASCII digits.
    pub fn digits_only() -> Self {
        Self::text(digits_only)
    }

    /// Currency for display: two decimals with thousands separators.
    pub fn currency_display() -> Self {
        Self::text(format_currency)
    }

    /// Currency for editing: thousands separators removed.
    pub fn currency_edit() -> Self {
        Self::text(strip_commas)
    }
}

/// Keep only ASCII digits.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Group up to ten digits as `(NNN)-NNN-NNNN`.
///
/// Partial input is grouped as far as it goes: `"32555"` becomes
/// `"(325)-55"`. Digits past the tenth are dropped.
pub fn format_phone(input: &str) -> String {
    let digits: String = digits_only(input).chars().take(10).collect();
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({})-{}", &digits[..3], &digits[3..]),
        _ => format!("({})-{}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

/// Remove thousands separators.
pub fn strip_commas(input: &str) -> String {
    input.chars().filter(|c| *c != ',').collect()
}

/// Normalise an amount to two decimals with thousands separators.
///
/// Text that does not parse as an amount is returned unchanged so the
/// currency validator can report it.
pub fn format_currency(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match Value::from(trimmed).to_decimal() {
        Some(amount) => group_thousands(amount),
        None => input.to_string(),
    }
}

fn group_thousands(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_grouping() {
        assert_eq!(format_phone("3255550100"), "(325)-555-0100");
        assert_eq!(format_phone("325-555-0100 ext"), "(325)-555-0100");
        assert_eq!(format_phone("32555"), "(325)-55");
        assert_eq!(format_phone("32"), "32");
        assert_eq!(format_phone("325555010099"), "(325)-555-0100");
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(format_currency("1234.5"), "1,234.50");
        assert_eq!(format_currency("1,234,567"), "1,234,567.00");
        assert_eq!(format_currency("0.005"), "0.01");
        assert_eq!(format_currency("-1500"), "-1,500.00");
        assert_eq!(format_currency("999"), "999.00");
        assert_eq!(format_currency("abc"), "abc");
        assert_eq!(format_currency("  "), "");
    }

    #[test]
    fn test_currency_edit() {
        assert_eq!(strip_commas("1,234.50"), "1234.50");
    }

    #[test]
    fn test_formatter_passes_null() {
        assert_eq!(Formatter::phone().apply(&Value::Null), Value::Null);
        assert_eq!(
            Formatter::digits_only().apply(&Value::Int(42)),
            Value::from("42")
        );
    }
}
