#![forbid(unsafe_code)]

//! Date and time formatting.
//!
//! Two ways to describe the output:
//!
//! - **Styles** (`dateStyle`/`timeStyle`): predefined layouts per language.
//! - **Components** (`year`, `month`, `day`, `weekday`, `hour`, ...): the
//!   listed parts in the language's order.
//!
//! With neither, a numeric date (`11/20/2020` in English) is produced.
//! Instants are converted to wall-clock time in the options' `timeZone`,
//! else in the zone passed by the caller, else in UTC.

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use lingo_catalog::Locale;

use crate::error::FormatError;
use crate::locale_data::LocaleData;
use crate::options::{DateTimeFormatOptions, DateTimeStyle, MonthWidth, NumericWidth, TextWidth};
use crate::time_zone::TimeZone;

/// Separator between the two ends of a range.
const RANGE_SEPARATOR: &str = " – ";

/// Format an instant.
///
/// # Errors
/// [`FormatError::InvalidTimeZone`] when the options name an unknown zone,
/// [`FormatError::OutOfRange`] when the instant has no wall-clock time there.
pub fn format_date_time(
    instant: DateTime<Utc>,
    options: &DateTimeFormatOptions,
    locale: &Locale,
    time_zone: Option<TimeZone>,
) -> Result<String, FormatError> {
    let zone = effective_zone(options, time_zone)?;
    let local = zone.local(instant)?;
    let data = LocaleData::for_locale(locale);
    let abbreviation = || zone.abbreviation(instant);
    Ok(render(&local, options, data, abbreviation))
}

/// Format the range `start`–`end`.
///
/// Ends that render identically collapse into one value.
///
/// # Errors
/// Same as [`format_date_time`].
pub fn format_date_time_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    options: &DateTimeFormatOptions,
    locale: &Locale,
    time_zone: Option<TimeZone>,
) -> Result<String, FormatError> {
    let from = format_date_time(start, options, locale, time_zone)?;
    let to = format_date_time(end, options, locale, time_zone)?;
    if from == to {
        Ok(from)
    } else {
        Ok(format!("{from}{RANGE_SEPARATOR}{to}"))
    }
}

fn effective_zone(
    options: &DateTimeFormatOptions,
    fallback: Option<TimeZone>,
) -> Result<TimeZone, FormatError> {
    match options.time_zone.as_deref() {
        Some(name) => TimeZone::parse(name),
        None => Ok(fallback.unwrap_or(TimeZone::UTC)),
    }
}

fn render(
    local: &NaiveDateTime,
    options: &DateTimeFormatOptions,
    data: &LocaleData,
    abbreviation: impl Fn() -> String,
) -> String {
    if options.date_style.is_some() || options.time_style.is_some() {
        let date = options.date_style.map(|style| styled_date(local, style, data));
        let time = options
            .time_style
            .map(|style| styled_time(local, style, options.hour12, data, &abbreviation));
        return match (date, time) {
            (Some(date), Some(time)) => {
                let long = matches!(
                    options.date_style,
                    Some(DateTimeStyle::Long | DateTimeStyle::Full)
                );
                let join = if long {
                    data.date_time_join_long
                } else {
                    data.date_time_join
                };
                format!("{date}{join}{time}")
            }
            (Some(part), None) | (None, Some(part)) => part,
            (None, None) => String::new(),
        };
    }

    let has_date = options.has_date_components();
    let has_time = options.has_time_components();
    if !has_date && !has_time {
        let numeric = DateTimeFormatOptions {
            year: Some(NumericWidth::Numeric),
            month: Some(MonthWidth::Numeric),
            day: Some(NumericWidth::Numeric),
            ..DateTimeFormatOptions::default()
        };
        return component_date(local, &numeric, data);
    }

    let date = has_date.then(|| component_date(local, options, data));
    let time = has_time.then(|| component_time(local, options, data));
    match (date, time) {
        (Some(date), Some(time)) => format!("{date}{}{time}", data.date_time_join),
        (Some(part), None) | (None, Some(part)) => part,
        (None, None) => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

fn styled_date(local: &NaiveDateTime, style: DateTimeStyle, data: &LocaleData) -> String {
    let (year, month, day) = (local.year(), local.month(), local.day());
    let yy = year.rem_euclid(100);
    let month_long = data.months_long[month0(local)];
    let month_short = data.months_short[month0(local)];
    let weekday = data.weekdays_long[weekday0(local)];

    match (data.language, style) {
        ("de", DateTimeStyle::Short) => format!("{day:02}.{month:02}.{yy:02}"),
        ("de", DateTimeStyle::Medium) => format!("{day:02}.{month:02}.{year}"),
        ("de", DateTimeStyle::Long) => format!("{day}. {month_long} {year}"),
        ("de", DateTimeStyle::Full) => format!("{weekday}, {day}. {month_long} {year}"),

        ("fr", DateTimeStyle::Short) => format!("{day:02}/{month:02}/{year}"),
        ("fr", DateTimeStyle::Medium) => format!("{day} {month_short} {year}"),
        ("fr", DateTimeStyle::Long) => format!("{day} {month_long} {year}"),
        ("fr", DateTimeStyle::Full) => format!("{weekday} {day} {month_long} {year}"),

        ("es", DateTimeStyle::Short) => format!("{day}/{month}/{yy:02}"),
        ("es", DateTimeStyle::Medium) => format!("{day} {month_short} {year}"),
        ("es", DateTimeStyle::Long) => format!("{day} de {month_long} de {year}"),
        ("es", DateTimeStyle::Full) => format!("{weekday}, {day} de {month_long} de {year}"),

        ("ja", DateTimeStyle::Short | DateTimeStyle::Medium) => {
            format!("{year}/{month:02}/{day:02}")
        }
        ("ja", DateTimeStyle::Long) => format!("{year}年{month}月{day}日"),
        ("ja", DateTimeStyle::Full) => format!("{year}年{month}月{day}日{weekday}"),

        (_, DateTimeStyle::Short) => format!("{month}/{day}/{yy:02}"),
        (_, DateTimeStyle::Medium) => format!("{month_short} {day}, {year}"),
        (_, DateTimeStyle::Long) => format!("{month_long} {day}, {year}"),
        (_, DateTimeStyle::Full) => format!("{weekday}, {month_long} {day}, {year}"),
    }
}

fn styled_time(
    local: &NaiveDateTime,
    style: DateTimeStyle,
    hour12: Option<bool>,
    data: &LocaleData,
    abbreviation: &impl Fn() -> String,
) -> String {
    let seconds = !matches!(style, DateTimeStyle::Short);
    let text = clock(local, hour12.unwrap_or(data.hour12), seconds, false, data);
    match style {
        DateTimeStyle::Long | DateTimeStyle::Full => format!("{text} {}", abbreviation()),
        DateTimeStyle::Short | DateTimeStyle::Medium => text,
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

fn component_date(
    local: &NaiveDateTime,
    options: &DateTimeFormatOptions,
    data: &LocaleData,
) -> String {
    let textual_month = matches!(
        options.month,
        Some(MonthWidth::Long | MonthWidth::Short | MonthWidth::Narrow)
    );
    let weekday = options.weekday.map(|width| weekday_name(local, width, data));
    let year = options.year.map(|width| match width {
        NumericWidth::Numeric => local.year().to_string(),
        NumericWidth::TwoDigit => format!("{:02}", local.year().rem_euclid(100)),
    });
    let pad_numeric = data.language == "fr";
    let day = options.day.map(|width| numeric(local.day(), width, pad_numeric));

    if textual_month {
        let month = match options.month {
            Some(MonthWidth::Long) => data.months_long[month0(local)].to_owned(),
            Some(MonthWidth::Narrow) => narrow(
                data.months_long[month0(local)],
                data.months_short[month0(local)],
                data,
            ),
            _ => data.months_short[month0(local)].to_owned(),
        };
        return textual_date(data, weekday, year, Some(month), day);
    }

    let month = options
        .month
        .map(|width| match width {
            MonthWidth::TwoDigit => NumericWidth::TwoDigit,
            _ => NumericWidth::Numeric,
        })
        .map(|width| numeric(local.month(), width, pad_numeric));

    let parts: Vec<String> = match data.language {
        "de" => [day.map(|d| format!("{d}.")), month.map(|m| format!("{m}.")), year]
            .into_iter()
            .flatten()
            .collect(),
        "fr" | "es" => [day, month, year].into_iter().flatten().collect(),
        "ja" => [year, month, day].into_iter().flatten().collect(),
        _ => [month, day, year].into_iter().flatten().collect(),
    };
    let numeric_date = match data.language {
        "de" => trim_trailing_dot(parts.join("")),
        _ => parts.join("/"),
    };

    match weekday {
        Some(weekday) if numeric_date.is_empty() => weekday,
        Some(weekday) => match data.language {
            "ja" => format!("{numeric_date}({weekday})"),
            "fr" => format!("{weekday} {numeric_date}"),
            _ => format!("{weekday}, {numeric_date}"),
        },
        None => numeric_date,
    }
}

fn textual_date(
    data: &LocaleData,
    weekday: Option<String>,
    year: Option<String>,
    month: Option<String>,
    day: Option<String>,
) -> String {
    let mut out = String::new();
    match data.language {
        "de" => {
            let body = [day.map(|d| format!("{d}.")), month, year]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            push_weekday_prefix(&mut out, weekday, ", ", &body);
            out.push_str(&body);
        }
        "fr" => {
            let body = [day, month, year]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            push_weekday_prefix(&mut out, weekday, " ", &body);
            out.push_str(&body);
        }
        "es" => {
            let body = [day, month, year]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" de ");
            push_weekday_prefix(&mut out, weekday, ", ", &body);
            out.push_str(&body);
        }
        "ja" => {
            if let Some(year) = year {
                out.push_str(&year);
                out.push('年');
            }
            if let Some(month) = month {
                out.push_str(&month);
            }
            if let Some(day) = day {
                out.push_str(&day);
                out.push('日');
            }
            if let Some(weekday) = weekday {
                out.push_str(&weekday);
            }
        }
        _ => {
            let month_day = [month, day]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            let body = match year {
                Some(year) if month_day.is_empty() => year,
                Some(year) => format!("{month_day}, {year}"),
                None => month_day,
            };
            push_weekday_prefix(&mut out, weekday, ", ", &body);
            out.push_str(&body);
        }
    }
    out
}

fn push_weekday_prefix(out: &mut String, weekday: Option<String>, join: &str, body: &str) {
    if let Some(weekday) = weekday {
        out.push_str(&weekday);
        if !body.is_empty() {
            out.push_str(join);
        }
    }
}

fn component_time(
    local: &NaiveDateTime,
    options: &DateTimeFormatOptions,
    data: &LocaleData,
) -> String {
    let twelve = options.hour12.unwrap_or(data.hour12);
    let pad_hour = options.hour == Some(NumericWidth::TwoDigit);
    match (options.hour, options.minute, options.second) {
        (Some(_), None, None) => {
            if twelve {
                let (hour, period) = twelve_hour(local.hour(), data);
                if pad_hour {
                    format!("{hour:02} {period}")
                } else {
                    format!("{hour} {period}")
                }
            } else {
                format!("{:02}", local.hour())
            }
        }
        (None, Some(_), None) => local.minute().to_string(),
        (None, None, Some(_)) => local.second().to_string(),
        (None, Some(_), Some(_)) => format!("{:02}:{:02}", local.minute(), local.second()),
        (_, _, seconds) => clock(local, twelve, seconds.is_some(), pad_hour, data),
    }
}

/// `10:36`, `10:36:01`, `10:36 AM`.
fn clock(
    local: &NaiveDateTime,
    twelve: bool,
    seconds: bool,
    pad_hour: bool,
    data: &LocaleData,
) -> String {
    let mut out = if twelve {
        let (hour, _) = twelve_hour(local.hour(), data);
        if pad_hour {
            format!("{hour:02}")
        } else {
            hour.to_string()
        }
    } else if data.language == "ja" && !pad_hour {
        local.hour().to_string()
    } else {
        format!("{:02}", local.hour())
    };
    out.push_str(&format!(":{:02}", local.minute()));
    if seconds {
        out.push_str(&format!(":{:02}", local.second()));
    }
    if twelve {
        let (_, period) = twelve_hour(local.hour(), data);
        if data.language == "ja" {
            out.insert_str(0, period);
        } else {
            out.push(' ');
            out.push_str(period);
        }
    }
    out
}

fn twelve_hour(hour: u32, data: &LocaleData) -> (u32, &'static str) {
    let period = if hour < 12 { data.am_pm[0] } else { data.am_pm[1] };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    (display, period)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn month0(local: &NaiveDateTime) -> usize {
    local.month0() as usize
}

fn weekday0(local: &NaiveDateTime) -> usize {
    local.weekday().num_days_from_monday() as usize
}

fn weekday_name(local: &NaiveDateTime, width: TextWidth, data: &LocaleData) -> String {
    match width {
        TextWidth::Long => data.weekdays_long[weekday0(local)].to_owned(),
        TextWidth::Short => data.weekdays_short[weekday0(local)].to_owned(),
        TextWidth::Narrow => narrow(
            data.weekdays_long[weekday0(local)],
            data.weekdays_short[weekday0(local)],
            data,
        ),
    }
}

/// First letter, uppercased. Japanese names are already short.
fn narrow(long: &str, short: &str, data: &LocaleData) -> String {
    if data.language == "ja" {
        return short.to_owned();
    }
    long.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

fn numeric(value: u32, width: NumericWidth, pad: bool) -> String {
    match width {
        NumericWidth::TwoDigit => format!("{:02}", value % 100),
        NumericWidth::Numeric if pad => format!("{value:02}"),
        NumericWidth::Numeric => value.to_string(),
    }
}

fn trim_trailing_dot(mut text: String) -> String {
    if text.ends_with('.') {
        text.pop();
    }
    text
}
