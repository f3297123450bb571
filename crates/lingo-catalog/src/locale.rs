#![forbid(unsafe_code)]

//! Validated BCP-47 locale tags.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use unic_langid::LanguageIdentifier;

use crate::error::CatalogError;

/// Languages written right-to-left.
const RTL_LANGUAGES: &[&str] = &["ar", "dv", "fa", "he", "ps", "sd", "ug", "ur", "yi"];

/// A canonicalized locale tag such as `en`, `de-AT` or `zh-Hant-TW`.
///
/// Cloning is cheap; the canonical tag string is shared.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    tag: Arc<str>,
    id: LanguageIdentifier,
}

impl Locale {
    /// Parse and canonicalize a tag. Accepts `-` or `_` as separators.
    pub fn parse(tag: &str) -> Result<Self, CatalogError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::InvalidLocale { tag: tag.into() });
        }
        let id: LanguageIdentifier = trimmed
            .parse()
            .map_err(|_| CatalogError::InvalidLocale { tag: tag.into() })?;
        Ok(Self::from_identifier(id))
    }

    fn from_identifier(id: LanguageIdentifier) -> Self {
        Self {
            tag: Arc::from(id.to_string()),
            id,
        }
    }

    /// The canonical tag.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// The primary language subtag (`de` for `de-AT`).
    pub fn language(&self) -> &str {
        self.id.language.as_str()
    }

    /// The region subtag, if any.
    pub fn region(&self) -> Option<&str> {
        self.id.region.as_ref().map(|region| region.as_str())
    }

    /// Whether text in this locale runs right-to-left.
    pub fn is_rtl(&self) -> bool {
        RTL_LANGUAGES.contains(&self.language())
    }

    /// The lookup chain from most to least specific: `de-AT` yields
    /// `[de-AT, de]`, a bare language yields just itself.
    pub fn fallback_chain(&self) -> Vec<Locale> {
        let mut chain = vec![self.clone()];
        let bare = LanguageIdentifier::from_parts(self.id.language.clone(), None, None, &[]);
        if bare != self.id {
            chain.push(Self::from_identifier(bare));
        }
        chain
    }

    /// Whether both locales share a primary language.
    pub fn same_language(&self, other: &Locale) -> bool {
        self.language() == other.language()
    }
}

impl FromStr for Locale {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Locale({})", self.tag)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.tag
    }
}

impl PartialEq<str> for Locale {
    fn eq(&self, other: &str) -> bool {
        &*self.tag == other
    }
}

impl PartialEq<&str> for Locale {
    fn eq(&self, other: &&str) -> bool {
        &*self.tag == *other
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Self::parse(&tag).map_err(serde::de::Error::custom)
    }
}
