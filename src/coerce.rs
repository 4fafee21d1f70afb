//! Coercion
//!
//! Quote inputs come from form fields and loosely typed backend payloads, so a
//! value can be missing, empty, non-numeric or negative at any moment (an input
//! emptied mid-edit, for example). These helpers turn anything that is not a
//! finite, non-negative number into zero, or into a caller supplied default for
//! counts, instead of failing.

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use tracing::debug;

/// Clamp a decimal amount to be non-negative.
pub fn non_negative(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        debug!(%value, "negative amount coerced to zero");
        Decimal::ZERO
    } else {
        value
    }
}

/// Convert a floating point amount, treating `NaN`, infinities, negatives and
/// values outside the decimal range as zero.
pub fn amount_from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        debug!(value, "non-finite amount coerced to zero");
        return Decimal::ZERO;
    }

    Decimal::from_f64(value).map_or_else(
        || {
            debug!(value, "unrepresentable amount coerced to zero");
            Decimal::ZERO
        },
        non_negative,
    )
}

/// Leniently parse an amount typed by a user or sent as a string by the backend.
///
/// Surrounding whitespace, a leading `$` and thousands separators are ignored,
/// so `" $1,250.50 "` parses as `1250.50`. Anything else that does not parse
/// becomes zero.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    if let Ok(value) = cleaned.parse::<Decimal>() {
        return non_negative(value);
    }

    // Scientific notation and the like
    match cleaned.parse::<f64>() {
        Ok(value) => amount_from_f64(value),
        Err(_err) => {
            debug!(raw, "unparsable amount coerced to zero");
            Decimal::ZERO
        }
    }
}

/// Returns `value` when it is a positive count, otherwise `default`.
pub fn count_or(value: i64, default: u32) -> u32 {
    if value < 1 {
        debug!(value, default, "non-positive count replaced by default");
        return default;
    }

    u32::try_from(value).unwrap_or(default)
}

/// Convert a floating point count, truncating fractions. Non-finite or
/// non-positive values yield `default`.
pub fn count_from_f64(value: f64, default: u32) -> u32 {
    if !value.is_finite() {
        return default;
    }

    Decimal::from_f64(value.trunc())
        .and_then(|count| count.to_i64())
        .map_or(default, |count| count_or(count, default))
}

/// Leniently parse a count, e.g. a quantity typed into a form field.
pub fn parse_count(raw: &str, default: u32) -> u32 {
    let trimmed = raw.trim();

    if let Ok(count) = trimmed.parse::<i64>() {
        return count_or(count, default);
    }

    trimmed
        .parse::<f64>()
        .map_or(default, |count| count_from_f64(count, default))
}
