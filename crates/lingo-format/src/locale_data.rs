#![forbid(unsafe_code)]

//! Built-in formatting conventions.
//!
//! One static table per supported language. Lookups go by primary language
//! subtag, so `de-AT` and `de-CH` share the German table. Languages without
//! a table use English conventions.
//!
//! # How it fits in the system
//! [`format_number`](crate::format_number), [`format_list`](crate::format_list)
//! and the date/time formatters read separators, names and connectors from
//! here and never branch on the language themselves except for word order.

use lingo_catalog::Locale;

/// Separators of a two-item list and the final separator of a longer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConnector {
    /// `"A{pair}B"`
    pub pair: &'static str,
    /// `"A, B{last}C"`
    pub last: &'static str,
}

/// Formatting conventions for one language.
#[derive(Debug, PartialEq)]
pub struct LocaleData {
    pub language: &'static str,
    pub decimal: &'static str,
    pub group: &'static str,
    /// Integer digits required before grouping applies (`es` leaves
    /// four-digit numbers ungrouped).
    pub min_grouping_digits: usize,
    /// Appended to percent values, including any spacing.
    pub percent_suffix: &'static str,
    /// Currency symbol before the number (`$1.00`) or after (`1,00 €`).
    pub currency_before: bool,
    /// Compact suffixes by threshold, largest first.
    pub compact: &'static [(f64, &'static str)],
    pub months_long: [&'static str; 12],
    pub months_short: [&'static str; 12],
    /// Monday first.
    pub weekdays_long: [&'static str; 7],
    pub weekdays_short: [&'static str; 7],
    /// Whether times default to a 12-hour clock.
    pub hour12: bool,
    pub am_pm: [&'static str; 2],
    /// Joins a date and a time for short and medium styles.
    pub date_time_join: &'static str,
    /// Joins a date and a time for long and full styles.
    pub date_time_join_long: &'static str,
    pub list_separator: &'static str,
    pub and: ListConnector,
    pub or: ListConnector,
}

impl LocaleData {
    /// Conventions for `locale`, English when the language is not built in.
    pub fn for_locale(locale: &Locale) -> &'static LocaleData {
        Self::for_language(locale.language())
    }

    /// Conventions for a primary language subtag.
    pub fn for_language(language: &str) -> &'static LocaleData {
        match language {
            "de" => &DE,
            "fr" => &FR,
            "es" => &ES,
            "ja" => &JA,
            _ => &EN,
        }
    }

    /// Whether a language has its own table.
    pub fn is_built_in(language: &str) -> bool {
        matches!(language, "en" | "de" | "fr" | "es" | "ja")
    }
}

const NBSP: &str = "\u{a0}";

static EN: LocaleData = LocaleData {
    language: "en",
    decimal: ".",
    group: ",",
    min_grouping_digits: 4,
    percent_suffix: "%",
    currency_before: true,
    compact: &[(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")],
    months_long: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    months_short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    weekdays_long: [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ],
    weekdays_short: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    hour12: true,
    am_pm: ["AM", "PM"],
    date_time_join: ", ",
    date_time_join_long: " at ",
    list_separator: ", ",
    and: ListConnector {
        pair: " and ",
        last: ", and ",
    },
    or: ListConnector {
        pair: " or ",
        last: ", or ",
    },
};

static DE: LocaleData = LocaleData {
    language: "de",
    decimal: ",",
    group: ".",
    min_grouping_digits: 4,
    percent_suffix: "\u{a0}%",
    currency_before: false,
    compact: &[
        (1e12, "\u{a0}Bio."),
        (1e9, "\u{a0}Mrd."),
        (1e6, "\u{a0}Mio."),
        (1e3, "\u{a0}Tsd."),
    ],
    months_long: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    months_short: [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
        "Dez.",
    ],
    weekdays_long: [
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
        "Sonntag",
    ],
    weekdays_short: ["Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa.", "So."],
    hour12: false,
    am_pm: ["AM", "PM"],
    date_time_join: ", ",
    date_time_join_long: " um ",
    list_separator: ", ",
    and: ListConnector {
        pair: " und ",
        last: " und ",
    },
    or: ListConnector {
        pair: " oder ",
        last: " oder ",
    },
};

static FR: LocaleData = LocaleData {
    language: "fr",
    decimal: ",",
    group: "\u{202f}",
    min_grouping_digits: 4,
    percent_suffix: "\u{202f}%",
    currency_before: false,
    compact: &[
        (1e12, "\u{a0}Bn"),
        (1e9, "\u{a0}Md"),
        (1e6, "\u{a0}M"),
        (1e3, "\u{a0}k"),
    ],
    months_long: [
        "janvier",
        "février",
        "mars",
        "avril",
        "mai",
        "juin",
        "juillet",
        "août",
        "septembre",
        "octobre",
        "novembre",
        "décembre",
    ],
    months_short: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
        "déc.",
    ],
    weekdays_long: [
        "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
    ],
    weekdays_short: ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."],
    hour12: false,
    am_pm: ["AM", "PM"],
    date_time_join: " ",
    date_time_join_long: " à ",
    list_separator: ", ",
    and: ListConnector {
        pair: " et ",
        last: " et ",
    },
    or: ListConnector {
        pair: " ou ",
        last: " ou ",
    },
};

static ES: LocaleData = LocaleData {
    language: "es",
    decimal: ",",
    group: ".",
    min_grouping_digits: 5,
    percent_suffix: "\u{a0}%",
    currency_before: false,
    compact: &[
        (1e12, "\u{a0}B"),
        (1e9, "\u{a0}mil\u{a0}M"),
        (1e6, "\u{a0}M"),
        (1e3, "\u{a0}mil"),
    ],
    months_long: [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ],
    months_short: [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
    ],
    weekdays_long: [
        "lunes",
        "martes",
        "miércoles",
        "jueves",
        "viernes",
        "sábado",
        "domingo",
    ],
    weekdays_short: ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"],
    hour12: false,
    am_pm: ["a.\u{a0}m.", "p.\u{a0}m."],
    date_time_join: ", ",
    date_time_join_long: ", ",
    list_separator: ", ",
    and: ListConnector {
        pair: " y ",
        last: " y ",
    },
    or: ListConnector {
        pair: " o ",
        last: " o ",
    },
};

static JA: LocaleData = LocaleData {
    language: "ja",
    decimal: ".",
    group: ",",
    min_grouping_digits: 4,
    percent_suffix: "%",
    currency_before: true,
    compact: &[(1e12, "兆"), (1e8, "億"), (1e4, "万")],
    months_long: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    months_short: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    weekdays_long: [
        "月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日", "日曜日",
    ],
    weekdays_short: ["月", "火", "水", "木", "金", "土", "日"],
    hour12: false,
    am_pm: ["午前", "午後"],
    date_time_join: " ",
    date_time_join_long: " ",
    list_separator: "、",
    and: ListConnector {
        pair: "、",
        last: "、",
    },
    or: ListConnector {
        pair: "または",
        last: "、または",
    },
};

/// Spacing used between a number and a trailing currency symbol or code.
pub(crate) const CURRENCY_GAP: &str = NBSP;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regional_variants_share_language_table() {
        let at = Locale::parse("de-AT").unwrap();
        assert_eq!(LocaleData::for_locale(&at).language, "de");
    }

    #[test]
    fn unknown_languages_use_english() {
        let sw = Locale::parse("sw").unwrap();
        assert_eq!(LocaleData::for_locale(&sw).language, "en");
        assert!(!LocaleData::is_built_in("sw"));
        assert!(LocaleData::is_built_in("ja"));
    }

    #[test]
    fn compact_thresholds_descend() {
        for language in ["en", "de", "fr", "es", "ja"] {
            let data = LocaleData::for_language(language);
            assert!(
                data.compact.windows(2).all(|w| w[0].0 > w[1].0),
                "{language} compact table out of order"
            );
        }
    }
}
