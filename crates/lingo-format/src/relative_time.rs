#![forbid(unsafe_code)]

//! Relative time ("in 3 days", "2 hours ago", "yesterday").
//!
//! The distance between `date` and `now` is measured in seconds. Without a
//! fixed unit the largest unit whose length fits is chosen (seconds below a
//! minute, minutes below an hour, ... years from 365 days on), and the
//! value is rounded to the nearest whole unit.

use chrono::{DateTime, Utc};
use lingo_catalog::{Locale, PluralCategory, PluralRule};

use crate::locale_data::LocaleData;
use crate::number::format_number;
use crate::options::{
    NumberFormatOptions, RelativeNumeric, RelativeTimeFormatOptions, RelativeTimeUnit, TextWidth,
};

/// Describe `date` relative to `now`.
///
/// `options.now` takes precedence over the `now` argument.
pub fn format_relative_time(
    date: DateTime<Utc>,
    now: DateTime<Utc>,
    options: &RelativeTimeFormatOptions,
    locale: &Locale,
) -> String {
    let now = options.now.unwrap_or(now);
    let seconds = (date - now).num_milliseconds() as f64 / 1000.0;
    let unit = options.unit.unwrap_or_else(|| best_unit(seconds.abs()));
    let value = (seconds / unit.seconds() as f64).round() as i64;
    let past = value < 0 || (value == 0 && seconds < 0.0);

    let data = LocaleData::for_locale(locale);
    if options.numeric == Some(RelativeNumeric::Auto) {
        if let Some(word) = idiom(data.language, unit, value) {
            return word.to_owned();
        }
    }

    let count = value.unsigned_abs();
    let number = format_number(count as f64, &NumberFormatOptions::integer(), locale)
        .unwrap_or_else(|_| count.to_string());
    let category = PluralRule::for_locale(data.language).categorize(value);
    let style = options.style.unwrap_or(TextWidth::Long);
    let (one, other) = unit_words(data.language, unit, style);
    let word = if category == PluralCategory::One { one } else { other };
    phrase(data.language, &number, word, past)
}

/// Unit chosen for a distance of `seconds` (absolute).
pub fn best_unit(seconds: f64) -> RelativeTimeUnit {
    use RelativeTimeUnit::*;
    [Year, Month, Week, Day, Hour, Minute]
        .into_iter()
        .find(|unit| seconds >= unit.seconds() as f64)
        .unwrap_or(Second)
}

fn phrase(language: &str, number: &str, word: &str, past: bool) -> String {
    match (language, past) {
        ("de", false) => format!("in {number} {word}"),
        ("de", true) => format!("vor {number} {word}"),
        ("fr", false) => format!("dans {number} {word}"),
        ("fr", true) => format!("il y a {number} {word}"),
        ("es", false) => format!("dentro de {number} {word}"),
        ("es", true) => format!("hace {number} {word}"),
        ("ja", false) => format!("{number} {word}後"),
        ("ja", true) => format!("{number} {word}前"),
        (_, false) => format!("in {number} {word}"),
        (_, true) => format!("{number} {word} ago"),
    }
}

fn unit_words(
    language: &str,
    unit: RelativeTimeUnit,
    style: TextWidth,
) -> (&'static str, &'static str) {
    use RelativeTimeUnit::*;
    match language {
        "de" => match unit {
            Second => ("Sekunde", "Sekunden"),
            Minute => ("Minute", "Minuten"),
            Hour => ("Stunde", "Stunden"),
            Day => ("Tag", "Tagen"),
            Week => ("Woche", "Wochen"),
            Month => ("Monat", "Monaten"),
            Quarter => ("Quartal", "Quartalen"),
            Year => ("Jahr", "Jahren"),
        },
        "fr" => match unit {
            Second => ("seconde", "secondes"),
            Minute => ("minute", "minutes"),
            Hour => ("heure", "heures"),
            Day => ("jour", "jours"),
            Week => ("semaine", "semaines"),
            Month => ("mois", "mois"),
            Quarter => ("trimestre", "trimestres"),
            Year => ("an", "ans"),
        },
        "es" => match unit {
            Second => ("segundo", "segundos"),
            Minute => ("minuto", "minutos"),
            Hour => ("hora", "horas"),
            Day => ("día", "días"),
            Week => ("semana", "semanas"),
            Month => ("mes", "meses"),
            Quarter => ("trimestre", "trimestres"),
            Year => ("año", "años"),
        },
        "ja" => {
            let word = match unit {
                Second => "秒",
                Minute => "分",
                Hour => "時間",
                Day => "日",
                Week => "週間",
                Month => "か月",
                Quarter => "四半期",
                Year => "年",
            };
            (word, word)
        }
        _ if style != TextWidth::Long => match unit {
            Second => ("sec.", "sec."),
            Minute => ("min.", "min."),
            Hour => ("hr.", "hr."),
            Day => ("day", "days"),
            Week => ("wk.", "wk."),
            Month => ("mo.", "mo."),
            Quarter => ("qtr.", "qtrs."),
            Year => ("yr.", "yr."),
        },
        _ => match unit {
            Second => ("second", "seconds"),
            Minute => ("minute", "minutes"),
            Hour => ("hour", "hours"),
            Day => ("day", "days"),
            Week => ("week", "weeks"),
            Month => ("month", "months"),
            Quarter => ("quarter", "quarters"),
            Year => ("year", "years"),
        },
    }
}

/// Words replacing small offsets under `numeric: auto`.
fn idiom(language: &str, unit: RelativeTimeUnit, value: i64) -> Option<&'static str> {
    use RelativeTimeUnit::*;
    let word = match (language, unit, value) {
        ("de", Second, 0) => "jetzt",
        ("de", Day, -2) => "vorgestern",
        ("de", Day, -1) => "gestern",
        ("de", Day, 0) => "heute",
        ("de", Day, 1) => "morgen",
        ("de", Day, 2) => "übermorgen",
        ("de", Year, -1) => "letztes Jahr",
        ("de", Year, 0) => "dieses Jahr",
        ("de", Year, 1) => "nächstes Jahr",

        ("fr", Second, 0) => "maintenant",
        ("fr", Day, -2) => "avant-hier",
        ("fr", Day, -1) => "hier",
        ("fr", Day, 0) => "aujourd’hui",
        ("fr", Day, 1) => "demain",
        ("fr", Day, 2) => "après-demain",
        ("fr", Year, -1) => "l’année dernière",
        ("fr", Year, 0) => "cette année",
        ("fr", Year, 1) => "l’année prochaine",

        ("es", Second, 0) => "ahora",
        ("es", Day, -2) => "anteayer",
        ("es", Day, -1) => "ayer",
        ("es", Day, 0) => "hoy",
        ("es", Day, 1) => "mañana",
        ("es", Day, 2) => "pasado mañana",
        ("es", Year, -1) => "el año pasado",
        ("es", Year, 0) => "este año",
        ("es", Year, 1) => "el próximo año",

        ("ja", Second, 0) => "今",
        ("ja", Day, -2) => "一昨日",
        ("ja", Day, -1) => "昨日",
        ("ja", Day, 0) => "今日",
        ("ja", Day, 1) => "明日",
        ("ja", Day, 2) => "明後日",
        ("ja", Year, -1) => "昨年",
        ("ja", Year, 0) => "今年",
        ("ja", Year, 1) => "来年",

        ("de" | "fr" | "es" | "ja", _, _) => return None,

        (_, Second, 0) => "now",
        (_, Minute, 0) => "this minute",
        (_, Hour, 0) => "this hour",
        (_, Day, -1) => "yesterday",
        (_, Day, 0) => "today",
        (_, Day, 1) => "tomorrow",
        (_, Week, -1) => "last week",
        (_, Week, 0) => "this week",
        (_, Week, 1) => "next week",
        (_, Month, -1) => "last month",
        (_, Month, 0) => "this month",
        (_, Month, 1) => "next month",
        (_, Quarter, -1) => "last quarter",
        (_, Quarter, 0) => "this quarter",
        (_, Quarter, 1) => "next quarter",
        (_, Year, -1) => "last year",
        (_, Year, 0) => "this year",
        (_, Year, 1) => "next year",
        _ => return None,
    };
    Some(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone as _};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 11, 20, 10, 36, 1).unwrap() + Duration::milliseconds(516)
    }

    fn rel(offset: Duration, options: &RelativeTimeFormatOptions, tag: &str) -> String {
        format_relative_time(now() + offset, now(), options, &Locale::parse(tag).unwrap())
    }

    #[test]
    fn picks_best_unit() {
        let opts = RelativeTimeFormatOptions::default();
        assert_eq!(rel(Duration::seconds(-30), &opts, "en"), "30 seconds ago");
        assert_eq!(rel(Duration::minutes(5), &opts, "en"), "in 5 minutes");
        assert_eq!(rel(Duration::hours(-3), &opts, "en"), "3 hours ago");
        assert_eq!(rel(Duration::days(2), &opts, "en"), "in 2 days");
        assert_eq!(rel(Duration::days(-14), &opts, "en"), "2 weeks ago");
        assert_eq!(rel(Duration::days(61), &opts, "en"), "in 2 months");
        assert_eq!(rel(Duration::days(-800), &opts, "en"), "2 years ago");
    }

    #[test]
    fn singular_forms() {
        let opts = RelativeTimeFormatOptions::default();
        assert_eq!(rel(Duration::days(1), &opts, "en"), "in 1 day");
        assert_eq!(rel(Duration::days(-1), &opts, "de"), "vor 1 Tag");
        assert_eq!(rel(Duration::days(-3), &opts, "de"), "vor 3 Tagen");
    }

    #[test]
    fn other_languages() {
        let opts = RelativeTimeFormatOptions::default();
        assert_eq!(rel(Duration::hours(2), &opts, "fr"), "dans 2 heures");
        assert_eq!(rel(Duration::hours(-2), &opts, "es"), "hace 2 horas");
        assert_eq!(rel(Duration::days(3), &opts, "ja"), "3 日後");
    }

    #[test]
    fn fixed_unit() {
        let opts = RelativeTimeFormatOptions::in_unit(RelativeTimeUnit::Hour);
        assert_eq!(rel(Duration::days(2), &opts, "en"), "in 48 hours");
        let opts = RelativeTimeFormatOptions::in_unit(RelativeTimeUnit::Second);
        assert_eq!(rel(Duration::hours(-1), &opts, "en"), "3,600 seconds ago");
    }

    #[test]
    fn auto_numeric_idioms() {
        let auto = RelativeTimeFormatOptions {
            numeric: Some(RelativeNumeric::Auto),
            ..Default::default()
        };
        assert_eq!(rel(Duration::days(-1), &auto, "en"), "yesterday");
        assert_eq!(rel(Duration::days(1), &auto, "en"), "tomorrow");
        assert_eq!(rel(Duration::zero(), &auto, "en"), "now");
        assert_eq!(rel(Duration::days(-1), &auto, "de"), "gestern");
        assert_eq!(rel(Duration::days(5), &auto, "en"), "in 5 days");
        assert_eq!(rel(Duration::weeks(1), &auto, "de"), "in 1 Woche");
    }

    #[test]
    fn options_now_overrides_argument() {
        let opts = RelativeTimeFormatOptions::relative_to(now() - Duration::hours(1));
        assert_eq!(
            format_relative_time(now(), now(), &opts, &Locale::parse("en").unwrap()),
            "in 1 hour"
        );
    }

    #[test]
    fn short_style() {
        let opts = RelativeTimeFormatOptions {
            style: Some(TextWidth::Short),
            ..Default::default()
        };
        assert_eq!(rel(Duration::hours(3), &opts, "en"), "in 3 hr.");
    }
}
