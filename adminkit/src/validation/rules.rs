//! Built-in validation rules.
//!
//! Apart from `required` and `required_select`, every rule treats a blank
//! value as valid, so rules compose after `required` without double
//! reporting an empty field.

use std::borrow::Cow;
use std::str::FromStr;
use std::sync::LazyLock;

use email_address::EmailAddress;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::ConfigError;
use crate::model::{Row, Value};

use super::Validator;

static ZIP_US: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(?:-?[0-9]{4})?$").expect("valid ZIP pattern"));

fn text(value: &Value) -> Cow<'_, str> {
    value.as_text()
}

/// Fails when the value is null or empty after trimming.
pub fn required<R: 'static>(label: &str) -> Validator<R> {
    Validator::rule(|v| !v.is_blank(), format!("{label} is required"))
}

/// Fails when no option is chosen.
pub fn required_select<R: 'static>(label: &str) -> Validator<R> {
    Validator::rule(|v| !text(v).trim().is_empty(), format!("Please select {label}"))
}

/// Require a valid email address with a dotted domain.
pub fn email<R: 'static>(label: &str) -> Validator<R> {
    Validator::rule(
        |v| {
            if v.is_blank() {
                return true;
            }
            let candidate = text(v);
            let candidate = candidate.trim();
            match candidate.parse::<EmailAddress>() {
                Ok(address) => {
                    let domain = address.domain();
                    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
                }
                Err(_) => false,
            }
        },
        format!("{label} must be a valid email address"),
    )
}

/// Require the value to match a regex pattern.
///
/// Fails at construction when the pattern does not compile.
pub fn pattern<R: 'static>(label: &str, pattern: &str) -> Result<Validator<R>, ConfigError> {
    let re = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(Validator::rule(
        move |v| v.is_blank() || re.is_match(text(v).trim()),
        format!("{label} is not in the expected format"),
    ))
}

/// Require exactly `count` digits, ignoring any other characters.
pub fn exact_digit_count<R: 'static>(label: &str, count: usize) -> Validator<R> {
    Validator::rule(
        move |v| v.is_blank() || text(v).chars().filter(char::is_ascii_digit).count() == count,
        format!("{label} must contain exactly {count} digits"),
    )
}

/// US ZIP code: `NNNNN`, `NNNNNNNNN`, or `NNNNN-NNNN`.
pub fn zip_us<R: 'static>(label: &str) -> Validator<R> {
    Validator::rule(
        |v| v.is_blank() || ZIP_US.is_match(text(v).trim()),
        format!("{label} must be a 5 or 9 digit ZIP code"),
    )
}

/// Require a whole number within `min..=max`.
pub fn integer_range<R: 'static>(label: &str, min: i64, max: i64) -> Validator<R> {
    Validator::rule(
        move |v| {
            if v.is_blank() {
                return true;
            }
            parse_integer(v).is_some_and(|n| (min..=max).contains(&n))
        },
        format!("{label} must be a whole number between {min} and {max}"),
    )
}

fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            // Saturating cast; out-of-range floats land on the i64 bounds.
            Some(*f as i64)
        }
        Value::Decimal(d) => integral(*d),
        Value::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| Decimal::from_str(s).ok().and_then(integral))
        }
        _ => None,
    }
}

fn integral(d: Decimal) -> Option<i64> {
    if d.fract().is_zero() { d.to_i64() } else { None }
}

/// Require at least `min` characters.
pub fn min_length<R: 'static>(label: &str, min: usize) -> Validator<R> {
    Validator::rule(
        move |v| v.is_blank() || text(v).trim().chars().count() >= min,
        format!("{label} must be at least {min} characters"),
    )
}

/// Require at most `max` characters.
pub fn max_length<R: 'static>(label: &str, max: usize) -> Validator<R> {
    Validator::rule(
        move |v| text(v).trim().chars().count() <= max,
        format!("{label} must be at most {max} characters"),
    )
}

/// Require a non-negative amount with at most two decimal places.
///
/// Thousands separators and a leading `$` are accepted.
pub fn currency<R: 'static>(label: &str) -> Validator<R> {
    Validator::rule(
        |v| {
            if v.is_blank() {
                return true;
            }
            v.to_decimal()
                .is_some_and(|d| !d.is_sign_negative() && d.normalize().scale() <= 2)
        },
        format!("{label} must be a valid amount"),
    )
}

/// Require an ISO `YYYY-MM-DD` date.
pub fn date<R: 'static>(label: &str) -> Validator<R> {
    Validator::rule(
        |v| v.is_blank() || v.to_date().is_some(),
        format!("{label} must be a valid date"),
    )
}

/// Require the date to fall on or after the date held in `other_key`.
///
/// Passes while either date is blank or unparseable; pair with [`date`]
/// to report malformed input.
pub fn date_not_before<R: Row + 'static>(label: &str, other_key: &str, other_label: &str) -> Validator<R> {
    let other_key = other_key.to_string();
    let msg = format!("{label} must be on or after {other_label}");
    Validator::new(move |value, record: &R| {
        let start = record.value(&other_key).to_date()?;
        let end = value.to_date()?;
        if end < start { Some(msg.clone()) } else { None }
    })
}

/// A rule written as a closure over the value and the whole record.
///
/// Return `Some(message)` to fail.
pub fn custom<R, F>(f: F) -> Validator<R>
where
    R: 'static,
    F: Fn(&Value, &R) -> Option<String> + Send + Sync + 'static,
{
    Validator::new(f)
}
