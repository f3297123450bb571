#![forbid(unsafe_code)]

//! Configuration scopes.
//!
//! An [`IntlScope`] makes one configuration reachable by everything rendered
//! beneath it. Scopes form a tree: [`IntlScope::child`] derives a scope that
//! replaces some fields and inherits the rest from its parent. A scope
//! never changes after construction; deriving is the only way to get a
//! different configuration.
//!
//! # How it fits in the system
//! A [`RequestScope`](crate::RequestScope) builds the root scope once per
//! request. Rendering code passes `&IntlScope` (or a cheap clone) down and
//! reads it through the accessors here, or through a [`Translator`] and a
//! [`Formatter`].
//!
//! # "Now"
//! A root scope without an explicit `now` captures the wall clock the first
//! time anything reads it. Children that do not override `now` share that
//! captured instant, so every relative time rendered under one root agrees.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use lingo_catalog::{Locale, Messages, Template, TemplateError};
use lingo_format::{Formats, TimeZone};

use crate::config::{IntlConfig, ScopeOverrides};
use crate::error::{IntlError, IntlErrorCode};
use crate::formatter::Formatter;
use crate::policy::{ErrorPolicy, default_message_fallback, default_on_error};
use crate::translator::Translator;
use crate::values::Values;

/// Parsed templates by full message path.
type TemplateCache = Mutex<AHashMap<String, Result<Arc<Template>, TemplateError>>>;

#[derive(Clone, Debug)]
enum NowRef {
    Fixed(DateTime<Utc>),
    Lazy(Arc<OnceLock<DateTime<Utc>>>),
}

impl NowRef {
    fn get(&self) -> DateTime<Utc> {
        match self {
            Self::Fixed(now) => *now,
            Self::Lazy(cell) => *cell.get_or_init(Utc::now),
        }
    }
}

/// "Report once per scope tree" switches.
#[derive(Debug, Default)]
struct OnceFlags {
    time_zone: AtomicBool,
    now: AtomicBool,
}

struct ScopeState {
    locale: Locale,
    messages: Option<Arc<Messages>>,
    time_zone: Option<TimeZone>,
    now: NowRef,
    formats: Arc<Formats>,
    defaults: Arc<Values>,
    policy: ErrorPolicy,
    templates: Arc<TemplateCache>,
    flags: Arc<OnceFlags>,
    depth: usize,
}

/// A node of the configuration tree. Cloning is cheap.
#[derive(Clone)]
pub struct IntlScope {
    state: Arc<ScopeState>,
}

impl IntlScope {
    /// Root scope for `config`.
    ///
    /// Catalog keys containing `.` are reported as
    /// [`IntlErrorCode::InvalidKey`]; the scope is still created.
    pub fn new(config: IntlConfig) -> Self {
        let policy = ErrorPolicy {
            on_error: config.on_error.unwrap_or_else(default_on_error),
            get_message_fallback: config
                .get_message_fallback
                .unwrap_or_else(default_message_fallback),
        };
        let now = match config.now {
            Some(now) => NowRef::Fixed(now),
            None => NowRef::Lazy(Arc::new(OnceLock::new())),
        };
        let scope = Self {
            state: Arc::new(ScopeState {
                locale: config.locale,
                messages: config.messages,
                time_zone: config.time_zone,
                now,
                formats: Arc::new(config.formats),
                defaults: Arc::new(config.default_translation_values),
                policy,
                templates: Arc::default(),
                flags: Arc::default(),
                depth: 0,
            }),
        };
        tracing::debug!(
            target: "lingo.intl",
            locale = scope.state.locale.as_str(),
            time_zone = scope.state.time_zone.map(|tz| tz.name()),
            has_messages = scope.state.messages.is_some(),
            "root scope created"
        );
        scope.check_keys();
        scope
    }

    /// Derive a scope that replaces the fields set in `overrides`.
    pub fn child(&self, overrides: ScopeOverrides) -> Self {
        let parent = &self.state;
        let replaces_messages = overrides.messages.is_some();
        let state = ScopeState {
            locale: overrides.locale.unwrap_or_else(|| parent.locale.clone()),
            messages: overrides.messages.or_else(|| parent.messages.clone()),
            time_zone: overrides.time_zone.or(parent.time_zone),
            now: overrides
                .now
                .map(NowRef::Fixed)
                .unwrap_or_else(|| parent.now.clone()),
            formats: overrides
                .formats
                .map(Arc::new)
                .unwrap_or_else(|| Arc::clone(&parent.formats)),
            defaults: overrides
                .default_translation_values
                .map(Arc::new)
                .unwrap_or_else(|| Arc::clone(&parent.defaults)),
            policy: ErrorPolicy {
                on_error: overrides
                    .on_error
                    .unwrap_or_else(|| Arc::clone(&parent.policy.on_error)),
                get_message_fallback: overrides
                    .get_message_fallback
                    .unwrap_or_else(|| Arc::clone(&parent.policy.get_message_fallback)),
            },
            templates: if replaces_messages {
                Arc::default()
            } else {
                Arc::clone(&parent.templates)
            },
            flags: Arc::clone(&parent.flags),
            depth: parent.depth + 1,
        };
        let scope = Self {
            state: Arc::new(state),
        };
        tracing::trace!(
            target: "lingo.intl",
            depth = scope.state.depth,
            locale = scope.state.locale.as_str(),
            replaces_messages,
            "child scope created"
        );
        if replaces_messages {
            scope.check_keys();
        }
        scope
    }

    /// Child scope that only sees the listed top-level namespaces.
    pub fn with_namespaces<S: AsRef<str>>(&self, namespaces: &[S]) -> Self {
        let picked = self
            .state
            .messages
            .as_deref()
            .map(|messages| messages.pick(namespaces))
            .unwrap_or_default();
        self.child(ScopeOverrides::new().messages(picked))
    }

    // -- Accessors -----------------------------------------------------------

    pub fn locale(&self) -> &Locale {
        &self.state.locale
    }

    pub fn time_zone(&self) -> Option<TimeZone> {
        self.state.time_zone
    }

    /// The reference instant for relative times.
    pub fn now(&self) -> DateTime<Utc> {
        self.state.now.get()
    }

    /// Whether `now` was given explicitly rather than captured from the clock.
    pub fn has_fixed_now(&self) -> bool {
        matches!(self.state.now, NowRef::Fixed(_))
    }

    pub fn messages(&self) -> Option<&Messages> {
        self.state.messages.as_deref()
    }

    /// The subset of the catalog under `namespace`.
    pub fn messages_in(&self, namespace: &str) -> Option<Messages> {
        self.messages()?.namespace(namespace)
    }

    pub fn formats(&self) -> &Formats {
        &self.state.formats
    }

    pub fn default_translation_values(&self) -> &Values {
        &self.state.defaults
    }

    /// Nesting depth; the root is 0.
    pub fn depth(&self) -> usize {
        self.state.depth
    }

    /// Translation function, optionally bound to a namespace.
    pub fn translator(&self, namespace: Option<&str>) -> Translator {
        Translator::new(self.clone(), namespace.map(str::to_owned))
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.clone())
    }

    // -- Crate internals -----------------------------------------------------

    pub(crate) fn policy(&self) -> &ErrorPolicy {
        &self.state.policy
    }

    pub(crate) fn report(&self, error: &IntlError) {
        self.state.policy.report(error);
    }

    /// Parse `source` once per catalog and path.
    pub(crate) fn template(&self, path: &str, source: &str) -> Result<Arc<Template>, TemplateError> {
        let mut cache = self
            .state
            .templates
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.get(path) {
            return cached.clone();
        }
        let parsed = Template::parse(source).map(Arc::new);
        cache.insert(path.to_owned(), parsed.clone());
        parsed
    }

    /// Report a missing time zone, once per scope tree.
    pub(crate) fn report_missing_time_zone(&self) {
        if self.state.time_zone.is_none() && !self.state.flags.time_zone.swap(true, Ordering::Relaxed)
        {
            self.report(&IntlError::new(
                IntlErrorCode::EnvironmentFallback,
                "no time zone configured; dates are formatted in UTC",
            ));
        }
    }

    /// Report that relative times use a clock-captured "now", once per scope tree.
    pub(crate) fn report_implicit_now(&self) {
        if !self.has_fixed_now() && !self.state.flags.now.swap(true, Ordering::Relaxed) {
            self.report(&IntlError::new(
                IntlErrorCode::EnvironmentFallback,
                "no `now` configured; relative times use the instant of first use",
            ));
        }
    }

    fn check_keys(&self) {
        let Some(messages) = self.messages() else {
            return;
        };
        let invalid = messages.invalid_keys();
        if invalid.is_empty() {
            return;
        }
        self.report(&IntlError::new(
            IntlErrorCode::InvalidKey,
            format!(
                "catalog keys cannot contain `.` because it separates nesting levels; \
                 invalid keys: {}",
                invalid.join(", ")
            ),
        ));
    }
}

impl std::fmt::Debug for IntlScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntlScope")
            .field("locale", &self.state.locale)
            .field("time_zone", &self.state.time_zone)
            .field("now", &self.state.now)
            .field("depth", &self.state.depth)
            .finish_non_exhaustive()
    }
}
