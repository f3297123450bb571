#![forbid(unsafe_code)]

//! Number formatting: decimal, percent, currency and compact notation.

use lingo_catalog::Locale;

use crate::error::FormatError;
use crate::locale_data::{CURRENCY_GAP, LocaleData};
use crate::options::{CurrencyDisplay, Notation, NumberFormatOptions, NumberStyle, SignDisplay};

/// Upper bound for fraction digits.
const MAX_FRACTION_DIGITS: u8 = 20;

/// Format `value` for `locale`.
///
/// Defaults: decimal style, grouping on, at most three fraction digits
/// (none for percent, the currency's minor units for currency).
///
/// # Errors
/// [`FormatError::InvalidOptions`] when fraction digit bounds contradict
/// each other, [`FormatError::MissingCurrency`] / [`FormatError::InvalidCurrency`]
/// for a currency style without a usable ISO 4217 code.
pub fn format_number(
    value: f64,
    options: &NumberFormatOptions,
    locale: &Locale,
) -> Result<String, FormatError> {
    let data = LocaleData::for_locale(locale);
    let style = options.style.unwrap_or(NumberStyle::Decimal);

    let currency = match style {
        NumberStyle::Currency => Some(currency_code(options)?),
        _ => None,
    };

    if value.is_nan() {
        return Ok("NaN".to_owned());
    }

    let scaled = match style {
        NumberStyle::Percent => value * 100.0,
        _ => value,
    };

    let (default_min, default_max) = match (style, &currency) {
        (NumberStyle::Currency, Some(code)) => {
            let minor = minor_units(code);
            (minor, minor)
        }
        (NumberStyle::Percent, _) => (0, 0),
        _ => (0, 3),
    };
    let (mut min_fraction, mut max_fraction) =
        fraction_bounds(options, default_min, default_max)?;

    let negative = scaled.is_sign_negative() && scaled != 0.0;
    let mut magnitude = scaled.abs();

    let mut compact_suffix = "";
    if options.notation == Some(Notation::Compact) && magnitude.is_finite() {
        let (scaled, suffix, max) =
            compact_unit(magnitude, options.maximum_fraction_digits, max_fraction, data);
        magnitude = scaled;
        compact_suffix = suffix;
        max_fraction = max;
        min_fraction = min_fraction.min(max_fraction);
    }

    let body = if magnitude.is_infinite() {
        "∞".to_owned()
    } else {
        let digits = round_to_string(magnitude, min_fraction, max_fraction);
        localize_digits(&digits, options, data)
    };

    let is_zero = body.chars().all(|c| !c.is_ascii_digit() || c == '0') && !magnitude.is_infinite();
    let sign = match options.sign_display.unwrap_or(SignDisplay::Auto) {
        SignDisplay::Auto => (negative && !is_zero).then_some("-"),
        SignDisplay::Always => Some(if negative && !is_zero { "-" } else { "+" }),
        SignDisplay::Never => None,
        SignDisplay::ExceptZero => {
            if is_zero {
                None
            } else if negative {
                Some("-")
            } else {
                Some("+")
            }
        }
    }
    .unwrap_or("");

    let number = format!("{body}{compact_suffix}");
    let out = match (style, currency) {
        (NumberStyle::Percent, _) => format!("{sign}{number}{}", data.percent_suffix),
        (NumberStyle::Currency, Some(code)) => {
            let display = options.currency_display.unwrap_or(CurrencyDisplay::Symbol);
            let (mark, symbolic) = match display {
                CurrencyDisplay::Symbol => match currency_symbol(&code) {
                    Some(symbol) => (symbol.to_owned(), true),
                    None => (code.clone(), false),
                },
                CurrencyDisplay::Code => (code.clone(), false),
            };
            if data.currency_before {
                let gap = if symbolic { "" } else { CURRENCY_GAP };
                format!("{sign}{mark}{gap}{number}")
            } else {
                format!("{sign}{number}{CURRENCY_GAP}{mark}")
            }
        }
        _ => format!("{sign}{number}"),
    };
    Ok(out)
}

fn currency_code(options: &NumberFormatOptions) -> Result<String, FormatError> {
    let code = options
        .currency
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .ok_or(FormatError::MissingCurrency)?;
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FormatError::InvalidCurrency(code.to_owned()));
    }
    Ok(code.to_ascii_uppercase())
}

fn minor_units(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" | "HUF" => 0,
        "BHD" | "KWD" | "OMR" | "JOD" | "TND" => 3,
        _ => 2,
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        _ => None,
    }
}

fn fraction_bounds(
    options: &NumberFormatOptions,
    default_min: u8,
    default_max: u8,
) -> Result<(u8, u8), FormatError> {
    let min = options.minimum_fraction_digits;
    let max = options.maximum_fraction_digits;
    for digits in [min, max].into_iter().flatten() {
        if digits > MAX_FRACTION_DIGITS {
            return Err(FormatError::InvalidOptions(format!(
                "fraction digits must be at most {MAX_FRACTION_DIGITS}, got {digits}"
            )));
        }
    }
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(FormatError::InvalidOptions(format!(
            "minimumFractionDigits ({min}) exceeds maximumFractionDigits ({max})"
        ))),
        (Some(min), Some(max)) => Ok((min, max)),
        (Some(min), None) => Ok((min, default_max.max(min))),
        (None, Some(max)) => Ok((default_min.min(max), max)),
        (None, None) => Ok((default_min, default_max)),
    }
}

/// Round to `max` fraction digits and drop trailing zeros down to `min`.
/// Returns ASCII digits with `.` as the decimal point.
/// Pick the compact unit for `magnitude`, moving up a unit when rounding
/// reaches the next threshold (`999_999` is `1M`, not `1,000K`).
///
/// Returns the scaled magnitude, its suffix and the fraction digits to keep.
fn compact_unit(
    magnitude: f64,
    explicit_max: Option<u8>,
    max_fraction: u8,
    data: &LocaleData,
) -> (f64, &'static str, u8) {
    let table = data.compact;
    let mut unit = table.iter().position(|(threshold, _)| magnitude >= *threshold);
    loop {
        let (threshold, suffix) = unit
            .and_then(|i| table.get(i))
            .copied()
            .unwrap_or((1.0, ""));
        let scaled = magnitude / threshold;
        // Two significant digits unless told otherwise.
        let max = explicit_max.map_or(if scaled < 10.0 { 1 } else { 0 }, |_| max_fraction);
        let rounded = round_half_away(scaled, max) * threshold;
        let larger = match unit {
            Some(i) => i.checked_sub(1),
            None => table.len().checked_sub(1),
        };
        match larger.and_then(|i| table.get(i).map(|entry| (i, entry.0))) {
            Some((i, next)) if rounded >= next => unit = Some(i),
            _ => return (scaled, suffix, max),
        }
    }
}

fn round_to_string(magnitude: f64, min: u8, max: u8) -> String {
    let rounded = round_half_away(magnitude, max);
    let mut text = format!("{rounded:.prec$}", prec = usize::from(max));
    if let Some(dot) = text.find('.') {
        let keep = dot + 1 + usize::from(min);
        while text.len() > keep && text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

/// `format!` rounds ties to even; number formatting rounds them away from
/// zero (`1234.5` → `1235`).
fn round_half_away(magnitude: f64, digits: u8) -> f64 {
    if digits > 15 {
        return magnitude;
    }
    let factor = 10f64.powi(i32::from(digits));
    let shifted = magnitude * factor;
    if shifted.is_finite() {
        shifted.round() / factor
    } else {
        magnitude
    }
}

fn localize_digits(digits: &str, options: &NumberFormatOptions, data: &LocaleData) -> String {
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let min_integer = usize::from(options.minimum_integer_digits.unwrap_or(1).max(1));
    let padded = if integer.len() < min_integer {
        format!("{}{integer}", "0".repeat(min_integer - integer.len()))
    } else {
        integer.to_owned()
    };

    let grouped = if options.use_grouping.unwrap_or(true) && padded.len() >= data.min_grouping_digits
    {
        group_digits(&padded, data.group)
    } else {
        padded
    };

    match fraction {
        Some(fraction) => format!("{grouped}{}{fraction}", data.decimal),
        None => grouped,
    }
}

fn group_digits(integer: &str, separator: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(digit);
    }
    out
}
