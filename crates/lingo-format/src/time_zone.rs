#![forbid(unsafe_code)]

//! IANA time zones.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Offset, TimeZone as _, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FormatError;

/// A named time zone such as `Europe/Vienna` or `UTC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeZone(Tz);

impl TimeZone {
    /// Coordinated Universal Time.
    pub const UTC: TimeZone = TimeZone(Tz::UTC);

    /// Parse an IANA zone name.
    pub fn parse(name: &str) -> Result<Self, FormatError> {
        name.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| FormatError::InvalidTimeZone(name.to_owned()))
    }

    /// The IANA name.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Wall-clock time in this zone.
    ///
    /// # Errors
    /// [`FormatError::OutOfRange`] when the shifted time does not fit a
    /// [`NaiveDateTime`] (instants at the very ends of the supported range).
    pub fn local(&self, instant: DateTime<Utc>) -> Result<NaiveDateTime, FormatError> {
        let utc = instant.naive_utc();
        let offset = self.0.offset_from_utc_datetime(&utc).fix();
        utc.checked_add_offset(offset)
            .ok_or_else(|| FormatError::OutOfRange(instant.to_rfc3339()))
    }

    /// Short zone designation at the given instant (`CET`, `EST`, `UTC`).
    pub fn abbreviation(&self, instant: DateTime<Utc>) -> String {
        instant.with_timezone(&self.0).format("%Z").to_string()
    }
}

impl FromStr for TimeZone {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TimeZone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TimeZone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse(&name).map_err(serde::de::Error::custom)
    }
}
