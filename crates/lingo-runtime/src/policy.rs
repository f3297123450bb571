#![forbid(unsafe_code)]

//! Error policy: how rendering failures are reported and what is shown
//! in their place.
//!
//! Both hooks are plain function values stored in the configuration, so a
//! child scope can swap one without touching the other.

use std::fmt;
use std::sync::Arc;

use crate::error::{IntlError, IntlErrorCode};

/// Reporting hook, called once per failure.
pub type OnError = Arc<dyn Fn(&IntlError) + Send + Sync>;

/// Computes the string shown instead of a failed message.
pub type MessageFallback = Arc<dyn Fn(&MessageFallbackInfo<'_>) -> String + Send + Sync>;

/// Input of the fallback hook.
#[derive(Debug, Clone, Copy)]
pub struct MessageFallbackInfo<'a> {
    pub namespace: Option<&'a str>,
    pub key: &'a str,
    pub error: &'a IntlError,
}

/// The pair of hooks a scope carries.
#[derive(Clone)]
pub struct ErrorPolicy {
    pub on_error: OnError,
    pub get_message_fallback: MessageFallback,
}

impl ErrorPolicy {
    pub fn report(&self, error: &IntlError) {
        (self.on_error)(error);
    }

    pub fn fallback(&self, namespace: Option<&str>, key: &str, error: &IntlError) -> String {
        (self.get_message_fallback)(&MessageFallbackInfo {
            namespace,
            key,
            error,
        })
    }
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self {
            on_error: default_on_error(),
            get_message_fallback: default_message_fallback(),
        }
    }
}

impl fmt::Debug for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorPolicy").finish_non_exhaustive()
    }
}

/// Logs through `tracing` under `lingo.intl`; environment fallbacks are
/// warnings, everything else an error.
pub fn default_on_error() -> OnError {
    Arc::new(|error: &IntlError| {
        let path = error.path().unwrap_or_default();
        if error.code == IntlErrorCode::EnvironmentFallback {
            tracing::warn!(
                target: "lingo.intl",
                code = error.code.as_str(),
                "{}",
                error.message
            );
        } else {
            tracing::error!(
                target: "lingo.intl",
                code = error.code.as_str(),
                path = %path,
                "{}",
                error.message
            );
        }
    })
}

/// `namespace.key`, or `key` without a namespace.
pub fn default_message_fallback() -> MessageFallback {
    Arc::new(|info: &MessageFallbackInfo<'_>| match info.namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}.{}", info.key),
        _ => info.key.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn default_fallback_joins_namespace_and_key() {
        let policy = ErrorPolicy::default();
        let error = IntlError::new(IntlErrorCode::MissingMessage, "missing");
        assert_eq!(policy.fallback(Some("Index"), "title", &error), "Index.title");
        assert_eq!(policy.fallback(None, "title", &error), "title");
        assert_eq!(policy.fallback(Some(""), "title", &error), "title");
    }

    #[test]
    fn custom_hooks_are_called() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let policy = ErrorPolicy {
            on_error: Arc::new(move |e: &IntlError| sink.lock().unwrap().push(e.code)),
            get_message_fallback: Arc::new(|info: &MessageFallbackInfo<'_>| {
                format!("[{}]", info.error.code)
            }),
        };
        let error = IntlError::new(IntlErrorCode::FormattingError, "bad");
        policy.report(&error);
        assert_eq!(policy.fallback(None, "k", &error), "[FORMATTING_ERROR]");
        assert_eq!(*seen.lock().unwrap(), vec![IntlErrorCode::FormattingError]);
    }

    #[tracing_test::traced_test]
    #[test]
    fn default_reporter_logs() {
        let error = IntlError::new(IntlErrorCode::MissingMessage, "no message for key")
            .with_path(Some("Index"), "title");
        default_on_error()(&error);
        assert!(logs_contain("no message for key"));
        assert!(logs_contain("MISSING_MESSAGE"));
    }
}
