#![forbid(unsafe_code)]

//! Application settings loaded from TOML or JSON.
//!
//! All sections use `serde(default)`, so a file only needs the values it
//! changes:
//!
//! ```toml
//! [routing]
//! locales = ["en", "de", "de-AT"]
//! default_locale = "en"
//! locale_prefix = "as-needed"
//!
//! [messages]
//! dir = "messages"
//!
//! time_zone = "Europe/Vienna"
//!
//! [formats.number.precise]
//! maximumFractionDigits = 3
//! ```
//!
//! Loading does not validate. Call [`IntlSettings::validate`], or use
//! [`IntlSettings::from_file`], which does both.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lingo_catalog::Locale;
use lingo_format::{Formats, TimeZone};

use crate::error::ConfigError;
use crate::routing::{LocalePrefix, Routing};

/// Root settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntlSettings {
    pub routing: RoutingSettings,
    pub messages: MessagesSettings,
    /// IANA zone applied to every request scope.
    pub time_zone: Option<String>,
    /// Global format presets.
    pub formats: Formats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    pub locales: Vec<String>,
    pub default_locale: String,
    pub locale_prefix: LocalePrefix,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            locales: vec!["en".into()],
            default_locale: "en".into(),
            locale_prefix: LocalePrefix::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesSettings {
    /// Directory holding one `<locale>.json` catalog per locale.
    pub dir: Option<PathBuf>,
    /// Layer the default locale's catalog under every other locale.
    pub fallback_to_default_locale: bool,
}

impl Default for MessagesSettings {
    fn default() -> Self {
        Self {
            dir: None,
            fallback_to_default_locale: true,
        }
    }
}

impl IntlSettings {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        toml::from_str(s).map_err(SettingsError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SettingsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(s).map_err(SettingsError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SettingsError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load by extension (`.json`, anything else as TOML) and validate.
    ///
    /// A relative `messages.dir` is resolved against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let mut settings = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_file(path)?,
            _ => Self::from_toml_file(path)?,
        };
        if let (Some(dir), Some(base)) = (settings.messages.dir.as_ref(), path.parent())
            && dir.is_relative()
        {
            settings.messages.dir = Some(base.join(dir));
        }
        let errors = settings.validate();
        if !errors.is_empty() {
            return Err(SettingsError::Validation(errors));
        }
        tracing::debug!(
            target: "lingo.settings",
            path = %path.display(),
            locales = settings.routing.locales.len(),
            "settings loaded"
        );
        Ok(settings)
    }

    /// Describe every problem; empty when the settings are usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.routing.locales.is_empty() {
            errors.push("routing.locales must not be empty".into());
        }
        let mut seen = HashSet::new();
        for tag in &self.routing.locales {
            match Locale::parse(tag) {
                Ok(locale) => {
                    if !seen.insert(locale.as_str().to_owned()) {
                        errors.push(format!("routing.locales lists `{tag}` twice"));
                    }
                }
                Err(_) => errors.push(format!("routing.locales: invalid locale tag `{tag}`")),
            }
        }
        match Locale::parse(&self.routing.default_locale) {
            Ok(default) if !seen.contains(default.as_str()) => errors.push(format!(
                "routing.default_locale `{}` is not in routing.locales",
                self.routing.default_locale
            )),
            Ok(_) => {}
            Err(_) => errors.push(format!(
                "routing.default_locale: invalid locale tag `{}`",
                self.routing.default_locale
            )),
        }

        if let Some(zone) = &self.time_zone
            && TimeZone::parse(zone).is_err()
        {
            errors.push(format!("time_zone: unknown time zone `{zone}`"));
        }

        for (name, preset) in &self.formats.number {
            if let (Some(min), Some(max)) =
                (preset.minimum_fraction_digits, preset.maximum_fraction_digits)
                && min > max
            {
                errors.push(format!(
                    "formats.number.{name}: minimumFractionDigits ({min}) exceeds \
                     maximumFractionDigits ({max})"
                ));
            }
        }
        for (name, preset) in &self.formats.date_time {
            if let Some(zone) = &preset.time_zone
                && TimeZone::parse(zone).is_err()
            {
                errors.push(format!(
                    "formats.dateTime.{name}: unknown time zone `{zone}`"
                ));
            }
        }

        errors
    }

    /// Build the routing table.
    pub fn to_routing(&self) -> Result<Routing, ConfigError> {
        Ok(
            Routing::from_tags(&self.routing.locales, &self.routing.default_locale)?
                .with_locale_prefix(self.routing.locale_prefix),
        )
    }

    /// The configured zone, parsed.
    pub fn time_zone(&self) -> Result<Option<TimeZone>, ConfigError> {
        self.time_zone
            .as_deref()
            .map(TimeZone::parse)
            .transpose()
            .map_err(ConfigError::from)
    }
}

/// Errors from loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
