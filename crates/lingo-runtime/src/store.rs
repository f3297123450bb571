#![forbid(unsafe_code)]

//! On-disk message catalogs with atomic reload.
//!
//! A [`CatalogStore`] reads `<dir>/<tag>.json` for every configured locale.
//! Regional locales are layered over their language (`de-AT` over `de`),
//! and, when `fallback_to_default_locale` is set, the default locale sits
//! underneath everything so untranslated keys still render.
//!
//! Readers get an `Arc<Messages>` snapshot; [`CatalogStore::reload`] swaps
//! in a new set atomically. Configurations already handed out keep the
//! snapshot they were built with.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use lingo_catalog::{Locale, Messages};
use lingo_format::{Formats, TimeZone};

use crate::config::IntlConfig;
use crate::error::ConfigError;
use crate::request::{RequestConfigSource, RequestContext};
use crate::routing::Routing;
use crate::settings::IntlSettings;

#[derive(Debug, Default)]
struct CatalogSet {
    generation: u64,
    catalogs: BTreeMap<String, Arc<Messages>>,
}

/// Loaded catalogs for every supported locale.
#[derive(Debug)]
pub struct CatalogStore {
    routing: Routing,
    dir: Option<PathBuf>,
    fallback: bool,
    current: ArcSwap<CatalogSet>,
    /// Held for the whole of a reload so generations stay strictly ordered.
    reload_lock: Mutex<()>,
}

impl CatalogStore {
    /// Load every locale's catalog from `settings.messages.dir`.
    ///
    /// # Errors
    /// [`ConfigError::MissingMessagesDir`] without a directory,
    /// [`ConfigError::MissingCatalog`] when a locale has no file in its
    /// chain, and catalog read or parse failures.
    pub fn open(settings: &IntlSettings) -> Result<Self, ConfigError> {
        let routing = settings.to_routing()?;
        let dir = settings
            .messages
            .dir
            .clone()
            .ok_or(ConfigError::MissingMessagesDir)?;
        let fallback = settings.messages.fallback_to_default_locale;
        let catalogs = load_all(&routing, &dir, fallback)?;
        tracing::info!(
            target: "lingo.store",
            dir = %dir.display(),
            locales = catalogs.len(),
            "catalogs loaded"
        );
        Ok(Self {
            routing,
            dir: Some(dir),
            fallback,
            current: ArcSwap::from_pointee(CatalogSet {
                generation: 1,
                catalogs,
            }),
            reload_lock: Mutex::new(()),
        })
    }

    /// A store over catalogs already in memory. Cannot be reloaded.
    pub fn from_catalogs(
        routing: Routing,
        catalogs: impl IntoIterator<Item = (Locale, Messages)>,
    ) -> Self {
        let catalogs = catalogs
            .into_iter()
            .map(|(locale, messages)| (locale.as_str().to_owned(), Arc::new(messages)))
            .collect();
        Self {
            routing,
            dir: None,
            fallback: false,
            current: ArcSwap::from_pointee(CatalogSet {
                generation: 1,
                catalogs,
            }),
            reload_lock: Mutex::new(()),
        }
    }

    pub fn routing(&self) -> &Routing {
        &self.routing
    }

    /// Bumped by every successful reload.
    pub fn generation(&self) -> u64 {
        self.current.load().generation
    }

    /// Snapshot of the catalog for `locale`, or for the nearest locale in
    /// its fallback chain.
    pub fn catalog(&self, locale: &Locale) -> Option<Arc<Messages>> {
        let set = self.current.load();
        locale
            .fallback_chain()
            .iter()
            .find_map(|candidate| set.catalogs.get(candidate.as_str()).cloned())
    }

    /// Re-read every catalog and swap them in.
    ///
    /// On failure the previous catalogs stay active. Concurrent reloads run
    /// one after another, each publishing the next generation.
    pub fn reload(&self) -> Result<u64, ConfigError> {
        let dir = self.dir.as_deref().ok_or(ConfigError::MissingMessagesDir)?;
        let _reloading = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let catalogs = match load_all(&self.routing, dir, self.fallback) {
            Ok(catalogs) => catalogs,
            Err(error) => {
                tracing::warn!(
                    target: "lingo.store",
                    %error,
                    generation = self.generation(),
                    "catalog reload failed; keeping previous catalogs"
                );
                return Err(error);
            }
        };
        let generation = self.generation() + 1;
        self.current.store(Arc::new(CatalogSet {
            generation,
            catalogs,
        }));
        tracing::info!(target: "lingo.store", generation, "catalogs reloaded");
        Ok(generation)
    }

    /// A request source that serves this store's catalogs with the
    /// settings' time zone and formats.
    pub fn config_source(
        self: &Arc<Self>,
        settings: &IntlSettings,
    ) -> Result<StoreConfigSource, ConfigError> {
        Ok(StoreConfigSource {
            store: Arc::clone(self),
            time_zone: settings.time_zone()?,
            formats: settings.formats.clone(),
        })
    }
}

/// [`RequestConfigSource`] backed by a [`CatalogStore`].
#[derive(Debug, Clone)]
pub struct StoreConfigSource {
    store: Arc<CatalogStore>,
    time_zone: Option<TimeZone>,
    formats: Formats,
}

impl RequestConfigSource for StoreConfigSource {
    fn load(&self, request: &RequestContext) -> Result<IntlConfig, ConfigError> {
        let messages =
            self.store
                .catalog(&request.locale)
                .ok_or_else(|| ConfigError::MissingCatalog {
                    locale: request.locale.as_str().to_owned(),
                })?;
        let mut config = IntlConfig::new(request.locale.clone())
            .with_messages(messages)
            .with_formats(self.formats.clone());
        config.time_zone = self.time_zone;
        Ok(config)
    }
}

fn load_all(
    routing: &Routing,
    dir: &Path,
    fallback: bool,
) -> Result<BTreeMap<String, Arc<Messages>>, ConfigError> {
    routing
        .locales()
        .iter()
        .map(|locale| -> Result<_, ConfigError> {
            let base = fallback.then(|| routing.default_locale());
            let messages = load_locale(dir, locale, base)?;
            Ok((locale.as_str().to_owned(), Arc::new(messages)))
        })
        .collect()
}

/// Merge the files for `locale`'s chain, least specific first, over the
/// chain of `base` when given.
fn load_locale(dir: &Path, locale: &Locale, base: Option<&Locale>) -> Result<Messages, ConfigError> {
    let own: Vec<Locale> = locale.fallback_chain().into_iter().rev().collect();
    let mut layers: Vec<Locale> = base
        .filter(|base| *base != locale)
        .map(|base| base.fallback_chain().into_iter().rev().collect())
        .unwrap_or_default();
    layers.retain(|layer| !own.contains(layer));

    let mut merged = Messages::new();
    for layer in &layers {
        if let Some(messages) = read_catalog(dir, layer)? {
            merged = merged.deep_merge(&messages);
        }
    }
    let mut found = false;
    for layer in &own {
        if let Some(messages) = read_catalog(dir, layer)? {
            merged = merged.deep_merge(&messages);
            found = true;
        }
    }
    if !found {
        return Err(ConfigError::MissingCatalog {
            locale: locale.as_str().to_owned(),
        });
    }
    tracing::debug!(
        target: "lingo.store",
        locale = locale.as_str(),
        layers = layers.len() + own.len(),
        "catalog assembled"
    );
    Ok(merged)
}

fn read_catalog(dir: &Path, locale: &Locale) -> Result<Option<Messages>, ConfigError> {
    let path = dir.join(format!("{locale}.json"));
    if !path.is_file() {
        return Ok(None);
    }
    Ok(Some(Messages::from_json_file(&path)?))
}
