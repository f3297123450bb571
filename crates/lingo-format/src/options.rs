#![forbid(unsafe_code)]

//! Formatting options and named presets.
//!
//! Every option is optional. [`patch`](DateTimeFormatOptions::patch)
//! overlays one option set onto another (fields set on the overlay win),
//! and [`Formats::merge`] applies that preset by preset, so a call-site
//! preset only has to spell out what it changes.
//!
//! Field names serialize in camelCase (`dateStyle`, `maximumFractionDigits`)
//! to match the JSON message-format conventions catalogs are usually
//! written against.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared enums
// ---------------------------------------------------------------------------

/// Predefined date or time length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateTimeStyle {
    Full,
    Long,
    Medium,
    Short,
}

impl DateTimeStyle {
    /// Parse `short`, `medium`, `long` or `full`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "full" => Some(Self::Full),
            "long" => Some(Self::Long),
            "medium" => Some(Self::Medium),
            "short" => Some(Self::Short),
            _ => None,
        }
    }
}

/// Width of a numeric date/time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericWidth {
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
}

/// Width of a month component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthWidth {
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
    #[serde(rename = "long")]
    Long,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "narrow")]
    Narrow,
}

/// Width of a textual component (weekday names, list and unit words).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextWidth {
    Long,
    Short,
    Narrow,
}

// ---------------------------------------------------------------------------
// Date/time
// ---------------------------------------------------------------------------

/// Options for dates and times.
///
/// `date_style`/`time_style` select a predefined layout; the component
/// fields select individual parts. When both are present the styles win.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateTimeFormatOptions {
    pub date_style: Option<DateTimeStyle>,
    pub time_style: Option<DateTimeStyle>,
    pub weekday: Option<TextWidth>,
    pub year: Option<NumericWidth>,
    pub month: Option<MonthWidth>,
    pub day: Option<NumericWidth>,
    pub hour: Option<NumericWidth>,
    pub minute: Option<NumericWidth>,
    pub second: Option<NumericWidth>,
    /// Force 12-hour (`true`) or 24-hour (`false`) clock.
    pub hour12: Option<bool>,
    /// IANA zone overriding the scope's time zone for this format.
    pub time_zone: Option<String>,
}

impl DateTimeFormatOptions {
    /// Options with only a date style.
    pub fn date(style: DateTimeStyle) -> Self {
        Self {
            date_style: Some(style),
            ..Self::default()
        }
    }

    /// Options with only a time style.
    pub fn time(style: DateTimeStyle) -> Self {
        Self {
            time_style: Some(style),
            ..Self::default()
        }
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn patch(&self, other: &Self) -> Self {
        Self {
            date_style: other.date_style.or(self.date_style),
            time_style: other.time_style.or(self.time_style),
            weekday: other.weekday.or(self.weekday),
            year: other.year.or(self.year),
            month: other.month.or(self.month),
            day: other.day.or(self.day),
            hour: other.hour.or(self.hour),
            minute: other.minute.or(self.minute),
            second: other.second.or(self.second),
            hour12: other.hour12.or(self.hour12),
            time_zone: other.time_zone.clone().or_else(|| self.time_zone.clone()),
        }
    }

    pub(crate) fn has_date_components(&self) -> bool {
        self.weekday.is_some() || self.year.is_some() || self.month.is_some() || self.day.is_some()
    }

    pub(crate) fn has_time_components(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.second.is_some()
    }
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Number style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberStyle {
    Decimal,
    Percent,
    Currency,
}

/// How a currency is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyDisplay {
    Symbol,
    Code,
}

/// Standard or compact (`1.2K`) notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    Standard,
    Compact,
}

/// When to print the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignDisplay {
    Auto,
    Always,
    Never,
    ExceptZero,
}

/// Options for numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberFormatOptions {
    pub style: Option<NumberStyle>,
    /// ISO 4217 code, required for the currency style.
    pub currency: Option<String>,
    pub currency_display: Option<CurrencyDisplay>,
    pub minimum_integer_digits: Option<u8>,
    pub minimum_fraction_digits: Option<u8>,
    pub maximum_fraction_digits: Option<u8>,
    pub use_grouping: Option<bool>,
    pub notation: Option<Notation>,
    pub sign_display: Option<SignDisplay>,
}

impl NumberFormatOptions {
    /// Percent style.
    pub fn percent() -> Self {
        Self {
            style: Some(NumberStyle::Percent),
            ..Self::default()
        }
    }

    /// Currency style for an ISO 4217 code.
    pub fn currency(code: impl Into<String>) -> Self {
        Self {
            style: Some(NumberStyle::Currency),
            currency: Some(code.into()),
            ..Self::default()
        }
    }

    /// Decimal style with no fraction digits.
    pub fn integer() -> Self {
        Self {
            maximum_fraction_digits: Some(0),
            ..Self::default()
        }
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn patch(&self, other: &Self) -> Self {
        Self {
            style: other.style.or(self.style),
            currency: other.currency.clone().or_else(|| self.currency.clone()),
            currency_display: other.currency_display.or(self.currency_display),
            minimum_integer_digits: other.minimum_integer_digits.or(self.minimum_integer_digits),
            minimum_fraction_digits: other
                .minimum_fraction_digits
                .or(self.minimum_fraction_digits),
            maximum_fraction_digits: other
                .maximum_fraction_digits
                .or(self.maximum_fraction_digits),
            use_grouping: other.use_grouping.or(self.use_grouping),
            notation: other.notation.or(self.notation),
            sign_display: other.sign_display.or(self.sign_display),
        }
    }
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// Kind of list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    /// "A, B, and C"
    Conjunction,
    /// "A, B, or C"
    Disjunction,
    /// "A, B, C"
    Unit,
}

/// Options for lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListFormatOptions {
    #[serde(rename = "type")]
    pub list_type: Option<ListType>,
    pub style: Option<TextWidth>,
}

impl ListFormatOptions {
    /// Options for a list of the given type.
    pub fn of(list_type: ListType) -> Self {
        Self {
            list_type: Some(list_type),
            style: None,
        }
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn patch(&self, other: &Self) -> Self {
        Self {
            list_type: other.list_type.or(self.list_type),
            style: other.style.or(self.style),
        }
    }
}

// ---------------------------------------------------------------------------
// Relative time
// ---------------------------------------------------------------------------

/// Unit for relative time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeTimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl RelativeTimeUnit {
    /// Nominal length in seconds; months and years use 365-day years.
    pub const fn seconds(self) -> i64 {
        const DAY: i64 = 86_400;
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => DAY,
            Self::Week => 7 * DAY,
            Self::Month => 365 * DAY / 12,
            Self::Quarter => 365 * DAY / 4,
            Self::Year => 365 * DAY,
        }
    }
}

/// `always`: "in 1 day"; `auto`: "tomorrow".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeNumeric {
    Always,
    Auto,
}

/// Options for relative time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelativeTimeFormatOptions {
    /// Fixed unit; chosen from the distance when absent.
    pub unit: Option<RelativeTimeUnit>,
    pub numeric: Option<RelativeNumeric>,
    pub style: Option<TextWidth>,
    /// Reference instant overriding the scope's "now".
    #[serde(skip)]
    pub now: Option<DateTime<Utc>>,
}

impl RelativeTimeFormatOptions {
    /// Options with a fixed unit.
    pub fn in_unit(unit: RelativeTimeUnit) -> Self {
        Self {
            unit: Some(unit),
            ..Self::default()
        }
    }

    /// Options relative to an explicit instant.
    pub fn relative_to(now: DateTime<Utc>) -> Self {
        Self {
            now: Some(now),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Named presets, declared once globally and referenced by name from
/// messages (`{d, date, short}`) or formatter calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Formats {
    pub date_time: BTreeMap<String, DateTimeFormatOptions>,
    pub number: BTreeMap<String, NumberFormatOptions>,
    pub list: BTreeMap<String, ListFormatOptions>,
}

impl Formats {
    /// Whether no preset is defined.
    pub fn is_empty(&self) -> bool {
        self.date_time.is_empty() && self.number.is_empty() && self.list.is_empty()
    }

    /// Add a date/time preset.
    #[must_use]
    pub fn with_date_time(mut self, name: impl Into<String>, options: DateTimeFormatOptions) -> Self {
        self.date_time.insert(name.into(), options);
        self
    }

    /// Add a number preset.
    #[must_use]
    pub fn with_number(mut self, name: impl Into<String>, options: NumberFormatOptions) -> Self {
        self.number.insert(name.into(), options);
        self
    }

    /// Add a list preset.
    #[must_use]
    pub fn with_list(mut self, name: impl Into<String>, options: ListFormatOptions) -> Self {
        self.list.insert(name.into(), options);
        self
    }

    /// Combine global and call-site presets.
    ///
    /// Presets only in one side are kept as-is. Presets defined on both
    /// sides are patched option by option, the call-site value winning.
    pub fn merge(global: &Formats, call_site: &Formats) -> Formats {
        Formats {
            date_time: merge_presets(&global.date_time, &call_site.date_time, |g, c| g.patch(c)),
            number: merge_presets(&global.number, &call_site.number, |g, c| g.patch(c)),
            list: merge_presets(&global.list, &call_site.list, |g, c| g.patch(c)),
        }
    }
}

fn merge_presets<T: Clone>(
    global: &BTreeMap<String, T>,
    call_site: &BTreeMap<String, T>,
    patch: impl Fn(&T, &T) -> T,
) -> BTreeMap<String, T> {
    let mut merged = global.clone();
    for (name, options) in call_site {
        let value = match global.get(name) {
            Some(base) => patch(base, options),
            None => options.clone(),
        };
        merged.insert(name.clone(), value);
    }
    merged
}
