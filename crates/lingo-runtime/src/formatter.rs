#![forbid(unsafe_code)]

//! Value formatting against a scope.
//!
//! A [`Formatter`] binds the lingo-format functions to the scope's locale,
//! time zone, "now" and global presets. Like translation, formatting never
//! fails from the caller's point of view: problems go to `on_error` and the
//! raw value is shown instead.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use lingo_format::{
    DateTimeFormatOptions, ListFormatOptions, NumberFormatOptions, RelativeTimeFormatOptions,
    format_date_time, format_date_time_range, format_list, format_number, format_relative_time,
};

use crate::error::{IntlError, IntlErrorCode};
use crate::scope::IntlScope;

/// How a call picks its options.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormatSpec<'a, O> {
    /// Built-in defaults for the locale.
    #[default]
    Default,
    /// A global preset by name.
    Preset(&'a str),
    /// Options given at the call site.
    Inline(O),
    /// A global preset with call-site options patched over it.
    PresetWith(&'a str, O),
}

impl<'a, O> From<&'a str> for FormatSpec<'a, O> {
    fn from(name: &'a str) -> Self {
        Self::Preset(name)
    }
}

impl<O> From<O> for FormatSpec<'_, O>
where
    O: Patch,
{
    fn from(options: O) -> Self {
        Self::Inline(options)
    }
}

/// Option types that can be layered over a preset.
pub trait Patch: Clone + Default {
    fn patch_with(&self, other: &Self) -> Self;
}

impl Patch for DateTimeFormatOptions {
    fn patch_with(&self, other: &Self) -> Self {
        self.patch(other)
    }
}

impl Patch for NumberFormatOptions {
    fn patch_with(&self, other: &Self) -> Self {
        self.patch(other)
    }
}

impl Patch for ListFormatOptions {
    fn patch_with(&self, other: &Self) -> Self {
        self.patch(other)
    }
}

/// Formats values with the scope's configuration.
#[derive(Clone, Debug)]
pub struct Formatter {
    scope: IntlScope,
}

impl Formatter {
    pub(crate) fn new(scope: IntlScope) -> Self {
        Self { scope }
    }

    /// Format an instant. Falls back to RFC 3339 on failure.
    pub fn date_time<'a>(
        &self,
        value: DateTime<Utc>,
        spec: impl Into<FormatSpec<'a, DateTimeFormatOptions>>,
    ) -> String {
        let result = self
            .resolve(spec.into(), &self.scope.formats().date_time, "date/time")
            .and_then(|options| {
                self.check_time_zone(&options);
                format_date_time(value, &options, self.scope.locale(), self.scope.time_zone())
                    .map_err(|e| IntlError::from_format(&e))
            });
        self.or_fallback(result, || value.to_rfc3339())
    }

    /// Format the range `start`–`end`.
    pub fn date_time_range<'a>(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        spec: impl Into<FormatSpec<'a, DateTimeFormatOptions>>,
    ) -> String {
        let result = self
            .resolve(spec.into(), &self.scope.formats().date_time, "date/time")
            .and_then(|options| {
                self.check_time_zone(&options);
                format_date_time_range(
                    start,
                    end,
                    &options,
                    self.scope.locale(),
                    self.scope.time_zone(),
                )
                .map_err(|e| IntlError::from_format(&e))
            });
        self.or_fallback(result, || {
            format!("{} – {}", start.to_rfc3339(), end.to_rfc3339())
        })
    }

    /// Format a number. Falls back to its plain display on failure.
    pub fn number<'a>(
        &self,
        value: f64,
        spec: impl Into<FormatSpec<'a, NumberFormatOptions>>,
    ) -> String {
        let result = self
            .resolve(spec.into(), &self.scope.formats().number, "number")
            .and_then(|options| {
                format_number(value, &options, self.scope.locale())
                    .map_err(|e| IntlError::from_format(&e))
            });
        self.or_fallback(result, || value.to_string())
    }

    /// Join `items` with the locale's list separators.
    pub fn list<'a, S: AsRef<str>>(
        &self,
        items: &[S],
        spec: impl Into<FormatSpec<'a, ListFormatOptions>>,
    ) -> String {
        let result = self
            .resolve(spec.into(), &self.scope.formats().list, "list")
            .map(|options| format_list(items, &options, self.scope.locale()));
        self.or_fallback(result, || {
            items
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(", ")
        })
    }

    /// Describe `date` relative to the scope's "now", or to `options.now`
    /// when set.
    pub fn relative_time(&self, date: DateTime<Utc>, options: &RelativeTimeFormatOptions) -> String {
        if options.now.is_none() {
            self.scope.report_implicit_now();
        }
        format_relative_time(date, self.scope.now(), options, self.scope.locale())
    }

    fn resolve<O: Patch>(
        &self,
        spec: FormatSpec<'_, O>,
        presets: &BTreeMap<String, O>,
        kind: &str,
    ) -> Result<O, IntlError> {
        let preset = |name: &str| {
            presets.get(name).cloned().ok_or_else(|| {
                IntlError::new(
                    IntlErrorCode::MissingFormat,
                    format!("missing {kind} format `{name}`"),
                )
            })
        };
        match spec {
            FormatSpec::Default => Ok(O::default()),
            FormatSpec::Inline(options) => Ok(options),
            FormatSpec::Preset(name) => preset(name),
            FormatSpec::PresetWith(name, options) => Ok(preset(name)?.patch_with(&options)),
        }
    }

    fn check_time_zone(&self, options: &DateTimeFormatOptions) {
        if options.time_zone.is_none() {
            self.scope.report_missing_time_zone();
        }
    }

    fn or_fallback(&self, result: Result<String, IntlError>, raw: impl FnOnce() -> String) -> String {
        result.unwrap_or_else(|error| {
            self.scope.report(&error);
            raw()
        })
    }
}
