#![forbid(unsafe_code)]

//! lingo public facade crate.
//!
//! Re-exports the common types of `lingo-catalog`, `lingo-format` and
//! `lingo-runtime`, and offers [`bootstrap`] for the usual file-based setup.

use std::path::Path;
use std::sync::Arc;

// --- Catalog re-exports ----------------------------------------------------

pub use lingo_catalog::{
    CatalogError, Locale, LookupError, MessageNode, Messages, PluralCategory, PluralRule,
    Template, TemplateError,
};

// --- Format re-exports -----------------------------------------------------

pub use lingo_format::{
    CurrencyDisplay, DateTimeFormatOptions, DateTimeStyle, FormatError, Formats,
    ListFormatOptions, ListType, MonthWidth, Notation, NumberFormatOptions, NumberStyle,
    NumericWidth, RelativeNumeric, RelativeTimeFormatOptions, RelativeTimeUnit, SignDisplay,
    TextWidth, TimeZone,
};

// --- Runtime re-exports ----------------------------------------------------

pub use lingo_runtime::{
    CatalogStore, ConfigError, ErrorPolicy, FormatSpec, Formatter, IntlConfig, IntlError,
    IntlErrorCode, IntlScope, IntlSettings, LocalePrefix, MessageFallbackInfo,
    RequestConfigSource, RequestContext, RequestResolver, RequestScope, ResolveError, Routing,
    ScopeOverrides, SettingsError, Translator, Value, Values,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for lingo setup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The settings file could not be read or is invalid.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// Catalogs or routing could not be built from the settings.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Standard result type for lingo setup.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bootstrap ------------------------------------------------------------

/// Everything a host needs to serve requests from a settings file.
#[derive(Debug)]
pub struct Bootstrap {
    pub settings: IntlSettings,
    pub store: Arc<CatalogStore>,
    pub resolver: RequestResolver,
}

/// Load settings, open the catalog store and build a resolver over it.
///
/// Keep `store` to call [`CatalogStore::reload`] later; the resolver sees
/// reloaded catalogs on its next request.
pub fn bootstrap(settings_path: impl AsRef<Path>) -> Result<Bootstrap> {
    let settings = IntlSettings::from_file(settings_path)?;
    let store = Arc::new(CatalogStore::open(&settings)?);
    let source = store.config_source(&settings)?;
    let resolver = RequestResolver::new(store.routing().clone(), source);
    tracing::info!(
        target: "lingo",
        locales = store.routing().locales().len(),
        default_locale = store.routing().default_locale().as_str(),
        "lingo ready"
    );
    Ok(Bootstrap {
        settings,
        store,
        resolver,
    })
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, FormatSpec, Formatter, IntlConfig, IntlScope, Locale, Messages, RequestResolver,
        Result, ScopeOverrides, Translator, Values,
    };

    pub use crate::{catalog, format, runtime};
}

pub use lingo_catalog as catalog;
pub use lingo_format as format;
pub use lingo_runtime as runtime;
