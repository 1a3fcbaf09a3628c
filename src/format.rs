//! Locale-aware number formatting backed by ICU4X compiled CLDR data.

use bevy::log::warn;
use icu::decimal::DecimalFormatter;
use icu::decimal::input::Decimal;
use icu::locale::locale;

use crate::locale::Locale;

/// Fraction digits kept for decimals, matching `Intl.NumberFormat` defaults.
const MAX_FRACTION_DIGITS: u32 = 3;

/// 2^53: every `f64` at or above this magnitude is an integer.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// A number accepted by [`format_number`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value.into())
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Int(value.into())
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::UInt(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Formats `value` with the grouping and digits of `locale`'s numbering
/// convention (`en-EG` or `ar-EG`).
///
/// NaN and infinities are not localized: they render through `Display`
/// (`NaN`, `inf`, `-inf`) in both locales.
pub fn format_number(value: impl Into<Number>, locale: Locale) -> String {
    match value.into() {
        Number::Float(value) if !value.is_finite() => value.to_string(),
        number => format_plain_text(&plain_text(number), locale),
    }
}

/// Latin digits with an optional `-` and `.` fraction, no grouping.
/// Floats are rounded to [`MAX_FRACTION_DIGITS`] with trailing zeros dropped.
fn plain_text(number: Number) -> String {
    match number {
        Number::Int(value) => value.to_string(),
        Number::UInt(value) => value.to_string(),
        Number::Float(value) => float_text(value),
    }
}

fn float_text(value: f64) -> String {
    if value.abs() >= EXACT_INTEGER_LIMIT {
        return format!("{:.0}", value);
    }

    // below 2^53 the scaled value stays well inside i64
    let scale = 10_i64.pow(MAX_FRACTION_DIGITS);
    let scaled = (value * scale as f64).round() as i64;
    if scaled == 0 {
        return "0".to_string();
    }

    let sign = if scaled < 0 { "-" } else { "" };
    let magnitude = scaled.unsigned_abs();
    let int_part = magnitude / scale as u64;
    let fraction = format!("{:03}", magnitude % scale as u64);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}{}", sign, int_part)
    } else {
        format!("{}{}.{}", sign, int_part, fraction)
    }
}

fn format_plain_text(text: &str, locale: Locale) -> String {
    let icu_locale = match locale {
        Locale::En => locale!("en-EG"),
        Locale::Ar => locale!("ar-EG"),
    };

    let decimal = match text.parse::<Decimal>() {
        Ok(decimal) => decimal,
        Err(e) => {
            warn!("Cannot read '{}' as a decimal: {:?}", text, e);
            return format_plain(text);
        }
    };

    match DecimalFormatter::try_new(icu_locale.into(), Default::default()) {
        Ok(formatter) => formatter.format(&decimal).to_string(),
        Err(e) => {
            warn!("No number format data for '{}': {}", locale.numbering_locale(), e);
            format_plain(text)
        }
    }
}

/// Groups the integer part of plain text with `,`.
fn format_plain(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut result = String::with_capacity(text.len() + int_part.len() / 3);
    result.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    if let Some(frac_part) = frac_part {
        result.push('.');
        result.push_str(frac_part);
    }
    result
}
