#![forbid(unsafe_code)]

//! Configuration carried by scopes.
//!
//! [`IntlConfig`] is a complete configuration for a root scope; every
//! field except the locale is optional and defaults sensibly.
//! [`ScopeOverrides`] is the subset a child scope replaces. Each field it
//! sets wins over the parent as a whole: messages, formats and default
//! values are replaced, not merged, and everything left unset is inherited.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use lingo_catalog::{Locale, Messages};
use lingo_format::{Formats, TimeZone};

use crate::error::IntlError;
use crate::policy::{MessageFallback, MessageFallbackInfo, OnError};
use crate::values::Values;

/// Configuration of a root scope.
#[derive(Clone)]
pub struct IntlConfig {
    pub locale: Locale,
    /// Catalog for the locale. `None` means "no messages"; every lookup
    /// then reports a missing message.
    pub messages: Option<Arc<Messages>>,
    pub time_zone: Option<TimeZone>,
    /// Fixed reference instant. Captured on first read when `None`.
    pub now: Option<DateTime<Utc>>,
    pub formats: Formats,
    pub default_translation_values: Values,
    pub on_error: Option<OnError>,
    pub get_message_fallback: Option<MessageFallback>,
}

impl IntlConfig {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            messages: None,
            time_zone: None,
            now: None,
            formats: Formats::default(),
            default_translation_values: Values::default(),
            on_error: None,
            get_message_fallback: None,
        }
    }

    #[must_use]
    pub fn with_messages(mut self, messages: impl Into<Arc<Messages>>) -> Self {
        self.messages = Some(messages.into());
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = Some(time_zone);
        self
    }

    #[must_use]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    #[must_use]
    pub fn with_formats(mut self, formats: Formats) -> Self {
        self.formats = formats;
        self
    }

    #[must_use]
    pub fn with_default_translation_values(mut self, values: Values) -> Self {
        self.default_translation_values = values;
        self
    }

    #[must_use]
    pub fn with_on_error(mut self, hook: impl Fn(&IntlError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_message_fallback(
        mut self,
        hook: impl Fn(&MessageFallbackInfo<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.get_message_fallback = Some(Arc::new(hook));
        self
    }
}

impl std::fmt::Debug for IntlConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntlConfig")
            .field("locale", &self.locale)
            .field("messages", &self.messages.as_ref().map(|m| m.leaf_paths().len()))
            .field("time_zone", &self.time_zone)
            .field("now", &self.now)
            .field("formats", &self.formats)
            .field("on_error", &self.on_error.is_some())
            .field("get_message_fallback", &self.get_message_fallback.is_some())
            .finish_non_exhaustive()
    }
}

/// Fields a child scope replaces. `None` inherits from the parent.
#[derive(Clone, Default)]
pub struct ScopeOverrides {
    pub locale: Option<Locale>,
    pub messages: Option<Arc<Messages>>,
    pub time_zone: Option<TimeZone>,
    pub now: Option<DateTime<Utc>>,
    pub formats: Option<Formats>,
    pub default_translation_values: Option<Values>,
    pub on_error: Option<OnError>,
    pub get_message_fallback: Option<MessageFallback>,
}

impl ScopeOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    #[must_use]
    pub fn messages(mut self, messages: impl Into<Arc<Messages>>) -> Self {
        self.messages = Some(messages.into());
        self
    }

    #[must_use]
    pub fn time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = Some(time_zone);
        self
    }

    #[must_use]
    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    #[must_use]
    pub fn formats(mut self, formats: Formats) -> Self {
        self.formats = Some(formats);
        self
    }

    #[must_use]
    pub fn default_translation_values(mut self, values: Values) -> Self {
        self.default_translation_values = Some(values);
        self
    }

    #[must_use]
    pub fn on_error(mut self, hook: impl Fn(&IntlError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn message_fallback(
        mut self,
        hook: impl Fn(&MessageFallbackInfo<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.get_message_fallback = Some(Arc::new(hook));
        self
    }
}
