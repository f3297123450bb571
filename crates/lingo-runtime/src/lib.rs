#![forbid(unsafe_code)]

//! lingo Runtime
//!
//! Request-scoped internationalization configuration: resolve a locale's
//! configuration once per request, distribute it through a tree of scopes,
//! and read it through accessors that never fail.
//!
//! # Key Components
//!
//! - [`RequestResolver`] / [`RequestScope`] - validate the locale and load
//!   the configuration at most once per request
//! - [`IntlScope`] - a node of the configuration tree; children override
//!   some fields and inherit the rest
//! - [`Translator`] - message lookup and interpolation
//! - [`Formatter`] - dates, numbers, lists and relative times
//! - [`ErrorPolicy`] - the `on_error` / `get_message_fallback` hook pair
//! - [`IntlSettings`] / [`CatalogStore`] - file-based settings and catalogs
//! - [`Routing`] - supported locales, negotiation and locale-prefixed paths
//!
//! # Role in lingo
//! `lingo-runtime` is the glue between the data model (`lingo-catalog`),
//! value formatting (`lingo-format`) and the host's request handling. It
//! holds no process-wide state: configuration always travels as an explicit
//! [`IntlScope`] value.
//!
//! # Failure model
//! Building configuration returns `Result` ([`ConfigError`],
//! [`ResolveError`]). Rendering does not: accessors report an
//! [`IntlError`] through the scope's policy and return a fallback string.
//!
//! ```
//! use lingo_catalog::{Locale, Messages};
//! use lingo_runtime::{IntlConfig, IntlScope, ScopeOverrides, Values};
//!
//! let messages = Messages::from_json_str(r#"{"greeting": "Hello, {name}"}"#).unwrap();
//! let scope = IntlScope::new(
//!     IntlConfig::new(Locale::parse("en").unwrap())
//!         .with_messages(messages)
//!         .with_default_translation_values(Values::new().with("name", "World")),
//! );
//! let t = scope.translator(None);
//! assert_eq!(t.t("greeting", &Values::new()), "Hello, World");
//! assert_eq!(t.t("greeting", &Values::new().with("name", "Ada")), "Hello, Ada");
//!
//! let child = scope.child(ScopeOverrides::new().messages(Messages::new()));
//! assert_eq!(child.locale(), scope.locale());
//! ```

pub mod config;
pub mod error;
pub mod formatter;
#[cfg(feature = "subscriber")]
pub mod logging;
pub mod policy;
mod render;
pub mod request;
pub mod routing;
pub mod scope;
pub mod settings;
pub mod store;
pub mod translator;
pub mod values;

pub use config::{IntlConfig, ScopeOverrides};
pub use error::{ConfigError, IntlError, IntlErrorCode, ResolveError};
pub use formatter::{FormatSpec, Formatter, Patch};
pub use policy::{
    ErrorPolicy, MessageFallback, MessageFallbackInfo, OnError, default_message_fallback,
    default_on_error,
};
pub use request::{RequestConfigSource, RequestContext, RequestResolver, RequestScope};
pub use routing::{LocalePrefix, Routing};
pub use scope::IntlScope;
pub use settings::{IntlSettings, MessagesSettings, RoutingSettings, SettingsError};
pub use store::{CatalogStore, StoreConfigSource};
pub use translator::Translator;
pub use values::{RichFn, Value, Values};
