//! Number and duration formatting for the route views.
//!
//! Rounding is half away from zero (`f64::round`). Grouping uses a comma
//! every three digits regardless of locale.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Placeholder shown where a value is absent.
pub const MISSING: &str = "-";

/// Round to the nearest integer. Non-finite input maps to zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_to_i64(value: f64) -> i64 {
    if value.is_finite() { value.round() as i64 } else { 0 }
}

/// `1234567` -> `"1,234,567"`.
#[must_use]
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Round then group.
#[must_use]
pub fn format_grouped(value: f64) -> String {
    group_thousands(round_to_i64(value))
}

/// Whole-ISK price with a currency prefix, or [`MISSING`].
#[must_use]
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() => format!("ISK {}", format_grouped(p)),
        _ => MISSING.to_owned(),
    }
}

/// Integral quantities are grouped; fractional ones print as-is.
#[must_use]
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract().abs() < f64::EPSILON {
        format_grouped(quantity)
    } else {
        quantity.to_string()
    }
}

/// Fraction as a percentage with two decimals: `0.1` -> `"10.00%"`.
#[must_use]
pub fn format_percent(fraction: f64) -> String {
    let hundredths = (fraction * 100.0 * 100.0).round() / 100.0;
    format!("{hundredths:.2}%")
}

/// Seconds as `"{minutes}m {seconds}s"`.
///
/// Seconds are rounded after the remainder is taken, so 119.6 renders as
/// `1m 60s`.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let minutes = round_to_i64((seconds / 60.0).floor());
    let rest = round_to_i64(seconds % 60.0);
    format!("{minutes}m {rest}s")
}
