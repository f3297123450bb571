#![forbid(unsafe_code)]

//! Error types for the runtime layer.
//!
//! Two families live here:
//!
//! - [`IntlError`] is a *report*: accessors never return it, they hand it to
//!   the scope's `on_error` hook and render a fallback string instead.
//! - [`ConfigError`] / [`ResolveError`] are ordinary `Result` errors raised
//!   while building a configuration, before any rendering happens.

use std::fmt;
use std::sync::Arc;

use lingo_catalog::{CatalogError, LookupError, TemplateError};
use lingo_format::FormatError;

use crate::settings::SettingsError;

/// Kind of a rendering-time failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntlErrorCode {
    /// No message for the key (or the namespace does not exist).
    MissingMessage,
    /// The key names a namespace, not a message.
    InsufficientPath,
    /// The message template could not be parsed.
    InvalidMessage,
    /// A catalog key contains `.` and can never be addressed.
    InvalidKey,
    /// A value could not be formatted with the requested options.
    FormattingError,
    /// A named preset was requested but not configured.
    MissingFormat,
    /// A value was formatted without an explicit time zone.
    EnvironmentFallback,
}

impl IntlErrorCode {
    /// Stable upper-snake-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingMessage => "MISSING_MESSAGE",
            Self::InsufficientPath => "INSUFFICIENT_PATH",
            Self::InvalidMessage => "INVALID_MESSAGE",
            Self::InvalidKey => "INVALID_KEY",
            Self::FormattingError => "FORMATTING_ERROR",
            Self::MissingFormat => "MISSING_FORMAT",
            Self::EnvironmentFallback => "ENVIRONMENT_FALLBACK",
        }
    }
}

impl fmt::Display for IntlErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendering-time failure, passed to the error policy.
#[derive(Debug, Clone, PartialEq)]
pub struct IntlError {
    pub code: IntlErrorCode,
    pub message: String,
    /// Namespace of the translator that failed, if any.
    pub namespace: Option<String>,
    /// Key relative to the namespace, if the failure concerns a message.
    pub key: Option<String>,
}

impl IntlError {
    pub fn new(code: IntlErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            namespace: None,
            key: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, namespace: Option<&str>, key: &str) -> Self {
        self.namespace = namespace.map(str::to_owned);
        self.key = Some(key.to_owned());
        self
    }

    /// `namespace.key`, `key`, or `None` when the error is not about a message.
    pub fn path(&self) -> Option<String> {
        match (&self.namespace, &self.key) {
            (Some(ns), Some(key)) => Some(format!("{ns}.{key}")),
            (None, Some(key)) => Some(key.clone()),
            _ => None,
        }
    }

    pub(crate) fn from_lookup(error: &LookupError) -> Self {
        let code = match error {
            LookupError::Missing { .. } => IntlErrorCode::MissingMessage,
            LookupError::InsufficientPath { .. } => IntlErrorCode::InsufficientPath,
        };
        Self::new(code, error.to_string())
    }

    pub(crate) fn from_template(error: &TemplateError) -> Self {
        Self::new(IntlErrorCode::InvalidMessage, error.to_string())
    }

    pub(crate) fn from_format(error: &FormatError) -> Self {
        Self::new(IntlErrorCode::FormattingError, error.to_string())
    }
}

impl fmt::Display for IntlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}: {} ({path})", self.code, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for IntlError {}

/// Failure to build a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// Routing needs at least one locale.
    #[error("no locales configured")]
    NoLocales,
    /// The default locale is not among the supported locales.
    #[error("default locale `{0}` is not in the supported locales")]
    DefaultLocaleUnsupported(String),
    /// No catalog file exists for a configured locale.
    #[error("no catalog for locale `{locale}`")]
    MissingCatalog { locale: String },
    /// Catalog loading was requested without a messages directory.
    #[error("messages directory not configured")]
    MissingMessagesDir,
}

/// Failure to resolve a request's configuration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    /// The locale is not one the application supports. Surface as a 404.
    #[error("locale `{locale}` is not supported")]
    NotFound { locale: String },
    /// The application's configuration source failed.
    #[error("failed to load configuration for `{locale}`: {source}")]
    Load {
        locale: String,
        #[source]
        source: Arc<ConfigError>,
    },
}

impl ResolveError {
    /// Whether the routing layer should answer with "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
