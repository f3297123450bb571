#![forbid(unsafe_code)]

//! Locale-aware value formatting for lingo.
//!
//! Formats dates, times, date ranges, numbers, lists and relative times
//! using a small set of built-in locale conventions (`en`, `de`, `fr`,
//! `es`, `ja`). Other locales use English conventions.
//!
//! # Role in lingo
//! The runtime hands these functions the active scope's locale, time zone
//! and "now" reference. Option types are plain data with `serde` support so
//! global presets can be declared in configuration files and merged with
//! call-site overrides via [`Formats::merge`].
//!
//! ```
//! use lingo_catalog::Locale;
//! use lingo_format::{NumberFormatOptions, format_number};
//!
//! let de = Locale::parse("de").unwrap();
//! let text = format_number(1234.5, &NumberFormatOptions::default(), &de).unwrap();
//! assert_eq!(text, "1.234,5");
//! ```

pub mod date_time;
pub mod error;
pub mod list;
pub mod locale_data;
pub mod number;
pub mod options;
pub mod relative_time;
pub mod time_zone;

pub use date_time::{format_date_time, format_date_time_range};
pub use error::FormatError;
pub use list::format_list;
pub use locale_data::LocaleData;
pub use number::format_number;
pub use options::{
    CurrencyDisplay, DateTimeFormatOptions, DateTimeStyle, Formats, ListFormatOptions, ListType,
    MonthWidth, Notation, NumberFormatOptions, NumberStyle, NumericWidth, RelativeNumeric,
    RelativeTimeFormatOptions, RelativeTimeUnit, SignDisplay, TextWidth,
};
pub use relative_time::format_relative_time;
pub use time_zone::TimeZone;
