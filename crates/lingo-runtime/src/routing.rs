#![forbid(unsafe_code)]

//! Supported locales, the default locale and locale-prefixed paths.
//!
//! # Negotiation
//! [`Routing::negotiate`] reads an `Accept-Language` value. Candidates are
//! tried by descending `q` weight (ties keep header order); each candidate
//! matches a supported locale exactly first, then by language. Nothing
//! matching yields the default locale.
//!
//! # Prefixes
//! | [`LocalePrefix`] | default locale    | other locales     |
//! |------------------|-------------------|-------------------|
//! | `Always`         | `/en/about`       | `/de/about`       |
//! | `AsNeeded`       | `/about`          | `/de/about`       |
//! | `Never`          | `/about`          | `/about`          |

use serde::{Deserialize, Serialize};

use lingo_catalog::Locale;

use crate::error::ConfigError;

/// When paths carry a locale segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocalePrefix {
    #[default]
    Always,
    AsNeeded,
    Never,
}

/// The application's locale set.
#[derive(Debug, Clone, PartialEq)]
pub struct Routing {
    locales: Vec<Locale>,
    default_locale: Locale,
    locale_prefix: LocalePrefix,
}

impl Routing {
    /// # Errors
    /// [`ConfigError::NoLocales`] for an empty list and
    /// [`ConfigError::DefaultLocaleUnsupported`] when the default is not
    /// listed.
    pub fn new(locales: Vec<Locale>, default_locale: Locale) -> Result<Self, ConfigError> {
        if locales.is_empty() {
            return Err(ConfigError::NoLocales);
        }
        if !locales.contains(&default_locale) {
            return Err(ConfigError::DefaultLocaleUnsupported(
                default_locale.as_str().to_owned(),
            ));
        }
        Ok(Self {
            locales,
            default_locale,
            locale_prefix: LocalePrefix::default(),
        })
    }

    /// Parse tags, then [`new`](Self::new).
    pub fn from_tags<S: AsRef<str>>(locales: &[S], default_locale: &str) -> Result<Self, ConfigError> {
        let locales = locales
            .iter()
            .map(|tag| Locale::parse(tag.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(locales, Locale::parse(default_locale)?)
    }

    #[must_use]
    pub fn with_locale_prefix(mut self, locale_prefix: LocalePrefix) -> Self {
        self.locale_prefix = locale_prefix;
        self
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn locale_prefix(&self) -> LocalePrefix {
        self.locale_prefix
    }

    pub fn is_supported(&self, tag: &str) -> bool {
        self.find(tag).is_some()
    }

    /// The supported locale equal to `tag` (case-insensitive).
    pub fn find(&self, tag: &str) -> Option<&Locale> {
        let parsed = Locale::parse(tag).ok()?;
        self.locales.iter().find(|locale| **locale == parsed)
    }

    /// Pick the best supported locale for an `Accept-Language` value.
    pub fn negotiate(&self, accept_language: Option<&str>) -> &Locale {
        let Some(header) = accept_language else {
            return &self.default_locale;
        };
        let mut candidates: Vec<(Locale, f32)> = header
            .split(',')
            .filter_map(parse_language_range)
            .filter(|(_, q)| *q > 0.0)
            .collect();
        // Stable, so equal weights keep header order.
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (candidate, _) in &candidates {
            if let Some(exact) = self.locales.iter().find(|l| *l == candidate) {
                return exact;
            }
            if let Some(related) = self.locales.iter().find(|l| l.same_language(candidate)) {
                return related;
            }
        }
        &self.default_locale
    }

    /// `path` under `locale` according to the prefix mode.
    pub fn localized_path(&self, locale: &Locale, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_owned()
        } else {
            format!("/{path}")
        };
        let prefixed = match self.locale_prefix {
            LocalePrefix::Always => true,
            LocalePrefix::AsNeeded => *locale != self.default_locale,
            LocalePrefix::Never => false,
        };
        if !prefixed {
            return path;
        }
        if path == "/" {
            format!("/{locale}")
        } else {
            format!("/{locale}{path}")
        }
    }

    /// Split a leading supported-locale segment off `path`.
    pub fn strip_locale<'p>(&self, path: &'p str) -> (Option<&Locale>, &'p str) {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let (segment, rest) = match trimmed.find('/') {
            Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
            None => (trimmed, "/"),
        };
        match self.find(segment) {
            Some(locale) if !segment.is_empty() => (Some(locale), rest),
            _ => (None, path),
        }
    }
}

/// One `tag;q=0.8` entry. `*` and unparsable tags are skipped.
fn parse_language_range(entry: &str) -> Option<(Locale, f32)> {
    let mut parts = entry.split(';');
    let tag = parts.next()?.trim();
    if tag.is_empty() || tag == "*" {
        return None;
    }
    let mut q = 1.0;
    for param in parts {
        if let Some(value) = param.trim().strip_prefix("q=") {
            q = value.trim().parse().ok()?;
        }
    }
    let locale = Locale::parse(tag).ok()?;
    Some((locale, q))
}
