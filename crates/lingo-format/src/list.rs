#![forbid(unsafe_code)]

//! List formatting ("A, B, and C").

use lingo_catalog::Locale;

use crate::locale_data::{ListConnector, LocaleData};
use crate::options::{ListFormatOptions, ListType, TextWidth};

/// Join `items` with the locale's separators.
///
/// Conjunction is the default type, long the default style.
pub fn format_list<S: AsRef<str>>(
    items: &[S],
    options: &ListFormatOptions,
    locale: &Locale,
) -> String {
    let data = LocaleData::for_locale(locale);
    let list_type = options.list_type.unwrap_or(ListType::Conjunction);
    let style = options.style.unwrap_or(TextWidth::Long);

    let connector = match (list_type, style) {
        (ListType::Conjunction, TextWidth::Short) if data.language == "en" => ListConnector {
            pair: " & ",
            last: ", & ",
        },
        (ListType::Conjunction, TextWidth::Narrow) if data.language == "en" => ListConnector {
            pair: ", ",
            last: ", ",
        },
        (ListType::Conjunction, _) => data.and,
        (ListType::Disjunction, _) => data.or,
        (ListType::Unit, TextWidth::Narrow) if data.language != "ja" => ListConnector {
            pair: " ",
            last: " ",
        },
        (ListType::Unit, _) => ListConnector {
            pair: data.list_separator,
            last: data.list_separator,
        },
    };
    let separator = match (list_type, style) {
        (ListType::Unit, TextWidth::Narrow) if data.language != "ja" => " ",
        _ => data.list_separator,
    };

    match items {
        [] => String::new(),
        [only] => only.as_ref().to_owned(),
        [first, second] => format!("{}{}{}", first.as_ref(), connector.pair, second.as_ref()),
        [init @ .., last] => {
            let mut out = String::new();
            for (i, item) in init.iter().enumerate() {
                if i > 0 {
                    out.push_str(separator);
                }
                out.push_str(item.as_ref());
            }
            out.push_str(connector.last);
            out.push_str(last.as_ref());
            out
        }
    }
}
