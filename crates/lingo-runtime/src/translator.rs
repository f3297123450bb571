#![forbid(unsafe_code)]

//! Translation function bound to a scope and an optional namespace.

use std::borrow::Cow;

use lingo_format::Formats;

use crate::error::{IntlError, IntlErrorCode};
use crate::render::{RenderContext, render};
use crate::scope::IntlScope;
use crate::values::{Layered, Values};

/// Resolves message keys against the scope's catalog.
///
/// Never fails: every problem is reported once through the scope's
/// `on_error` hook and replaced by the `get_message_fallback` result.
#[derive(Clone, Debug)]
pub struct Translator {
    scope: IntlScope,
    namespace: Option<String>,
}

impl Translator {
    pub(crate) fn new(scope: IntlScope, namespace: Option<String>) -> Self {
        let namespace = namespace.filter(|ns| !ns.is_empty());
        Self { scope, namespace }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Render `key` with `values`, falling back to the scope's defaults for
    /// arguments the call does not supply.
    pub fn t(&self, key: &str, values: &Values) -> String {
        self.translate(key, values, None)
    }

    /// Like [`t`](Self::t), with call-site presets merged over the scope's.
    pub fn t_with(&self, key: &str, values: &Values, formats: &Formats) -> String {
        self.translate(key, values, Some(formats))
    }

    /// The unrendered template source for `key`.
    pub fn raw(&self, key: &str) -> String {
        match self.source(key) {
            Ok(source) => source.to_owned(),
            Err(error) => self.fail(key, error),
        }
    }

    /// Whether `key` resolves to a message. Never reports.
    pub fn has(&self, key: &str) -> bool {
        self.scope
            .messages()
            .is_some_and(|messages| messages.get(&self.full_path(key)).is_ok())
    }

    fn translate(&self, key: &str, values: &Values, call_site: Option<&Formats>) -> String {
        match self.try_translate(key, values, call_site) {
            Ok(text) => text,
            Err(error) => self.fail(key, error),
        }
    }

    fn try_translate(
        &self,
        key: &str,
        values: &Values,
        call_site: Option<&Formats>,
    ) -> Result<String, IntlError> {
        let path = self.full_path(key);
        let source = self.source(key)?;
        let template = self
            .scope
            .template(&path, source)
            .map_err(|e| IntlError::from_template(&e))?;

        let formats: Cow<'_, Formats> = match call_site {
            Some(overrides) if !overrides.is_empty() => {
                Cow::Owned(Formats::merge(self.scope.formats(), overrides))
            }
            _ => Cow::Borrowed(self.scope.formats()),
        };
        let ctx = RenderContext {
            locale: self.scope.locale(),
            time_zone: self.scope.time_zone(),
            formats: &formats,
            values: Layered {
                call_site: values,
                defaults: self.scope.default_translation_values(),
            },
            missing_time_zone: &|| self.scope.report_missing_time_zone(),
        };
        render(&template, &ctx)
    }

    fn source(&self, key: &str) -> Result<&str, IntlError> {
        let messages = self.scope.messages().ok_or_else(|| {
            IntlError::new(
                IntlErrorCode::MissingMessage,
                format!("no messages configured for locale `{}`", self.scope.locale()),
            )
        })?;
        messages
            .get(&self.full_path(key))
            .map_err(|e| IntlError::from_lookup(&e))
    }

    fn fail(&self, key: &str, error: IntlError) -> String {
        let error = error.with_path(self.namespace(), key);
        tracing::trace!(
            target: "lingo.intl",
            code = error.code.as_str(),
            key,
            namespace = self.namespace(),
            "translation failed"
        );
        self.scope.report(&error);
        self.scope.policy().fallback(self.namespace(), key, &error)
    }

    fn full_path(&self, key: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{key}"),
            None => key.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntlConfig;
    use lingo_catalog::{Locale, Messages};
    use lingo_format::NumberFormatOptions;
    use std::sync::{Arc, Mutex};

    fn scope_with(messages: Messages, seen: &Arc<Mutex<Vec<IntlError>>>) -> IntlScope {
        let sink = Arc::clone(seen);
        IntlScope::new(
            IntlConfig::new(Locale::parse("en").unwrap())
                .with_messages(messages)
                .with_on_error(move |e| sink.lock().unwrap().push(e.clone())),
        )
    }

    fn catalog() -> Messages {
        Messages::new()
            .with("Index.title", "Hello {name}!")
            .with("Index.count", "{n, plural, one {# item} other {# items}}")
            .with("Index.broken", "{oops")
            .with("Index.price", "{p, number, money}")
            .with("plain", "Top level")
    }

    #[test]
    fn translates_with_namespace() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let t = scope_with(catalog(), &seen).translator(Some("Index"));
        assert_eq!(t.t("title", &Values::new().with("name", "Ada")), "Hello Ada!");
        assert_eq!(t.t("count", &Values::new().with("n", 1)), "1 item");
        assert_eq!(t.t("count", &Values::new().with("n", 3)), "3 items");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_key_reports_once_and_falls_back() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let t = scope_with(catalog(), &seen).translator(Some("Index"));
        assert_eq!(t.t("nope", &Values::new()), "Index.nope");
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].code, IntlErrorCode::MissingMessage);
        assert_eq!(seen[0].path().as_deref(), Some("Index.nope"));
    }

    #[test]
    fn namespace_key_is_insufficient_path() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let t = scope_with(catalog(), &seen).translator(None);
        assert_eq!(t.t("Index", &Values::new()), "Index");
        assert_eq!(seen.lock().unwrap()[0].code, IntlErrorCode::InsufficientPath);
    }

    #[test]
    fn invalid_template_is_reported() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let t = scope_with(catalog(), &seen).translator(Some("Index"));
        assert_eq!(t.t("broken", &Values::new()), "Index.broken");
        assert_eq!(seen.lock().unwrap()[0].code, IntlErrorCode::InvalidMessage);
    }

    #[test]
    fn no_messages_reports_missing() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let scope = IntlScope::new(
            IntlConfig::new(Locale::parse("en").unwrap())
                .with_on_error(move |e| sink.lock().unwrap().push(e.clone())),
        );
        assert_eq!(scope.translator(None).t("plain", &Values::new()), "plain");
        assert_eq!(seen.lock().unwrap()[0].code, IntlErrorCode::MissingMessage);
    }

    #[test]
    fn call_site_formats_are_merged() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let t = scope_with(catalog(), &seen).translator(Some("Index"));
        let formats = Formats::default().with_number("money", NumberFormatOptions::currency("USD"));
        assert_eq!(
            t.t_with("price", &Values::new().with("p", 12.5), &formats),
            "$12.50"
        );
        assert!(seen.lock().unwrap().is_empty());

        assert_eq!(t.t("price", &Values::new().with("p", 12.5)), "Index.price");
        assert_eq!(seen.lock().unwrap()[0].code, IntlErrorCode::MissingFormat);
    }

    #[test]
    fn raw_and_has() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let t = scope_with(catalog(), &seen).translator(Some("Index"));
        assert_eq!(t.raw("title"), "Hello {name}!");
        assert!(t.has("title"));
        assert!(!t.has("missing"));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn defaults_fill_missing_arguments() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let scope = IntlScope::new(
            IntlConfig::new(Locale::parse("en").unwrap())
                .with_messages(catalog())
                .with_default_translation_values(Values::new().with("name", "friend"))
                .with_on_error(move |e| sink.lock().unwrap().push(e.clone())),
        );
        let t = scope.translator(Some("Index"));
        assert_eq!(t.t("title", &Values::new()), "Hello friend!");
        assert_eq!(t.t("title", &Values::new().with("name", "Bo")), "Hello Bo!");
    }

    #[test]
    fn message_dates_report_the_missing_zone_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let messages = Messages::new().with("when", "On {d, date, short} at {d, time}");
        let scope = scope_with(messages, &seen);
        let d = chrono::DateTime::parse_from_rfc3339("2020-11-20T10:36:01Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let t = scope.translator(None);
        assert_eq!(t.t("when", &Values::new().with("d", d)), "On 11/20/20 at 10:36:01 AM");
        scope.formatter().date_time(d, lingo_format::DateTimeFormatOptions::default());
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].code, IntlErrorCode::EnvironmentFallback);
    }

    #[test]
    fn unrepresentable_message_date_falls_back() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let scope = IntlScope::new(
            IntlConfig::new(Locale::parse("de").unwrap())
                .with_messages(Messages::new().with("Log.when", "Am {d, date}"))
                .with_time_zone(lingo_format::TimeZone::parse("Europe/Vienna").unwrap())
                .with_on_error(move |e| sink.lock().unwrap().push(e.clone())),
        );
        let t = scope.translator(Some("Log"));
        let edge = chrono::DateTime::<chrono::Utc>::MAX_UTC;
        assert_eq!(t.t("when", &Values::new().with("d", edge)), "Log.when");
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].code, IntlErrorCode::FormattingError);
    }
}
