#![forbid(unsafe_code)]

//! Interpolation values.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Renders the children of a rich-text tag (`<b>..</b>`) to a string.
pub type RichFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A value substituted into a message.
#[derive(Clone)]
pub enum Value {
    Str(String),
    Number(f64),
    Int(i64),
    Date(DateTime<Utc>),
    /// Rendering function for a tag of the same name.
    Rich(RichFn),
}

impl Value {
    /// Wrap a tag renderer.
    pub fn rich(render: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::Rich(Arc::new(render))
    }

    /// Numeric view used by plural selection and number formatting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Int(n) => Some(*n as f64),
            Self::Str(s) => s.trim().parse().ok(),
            Self::Date(_) | Self::Rich(_) => None,
        }
    }

    /// Key used by `select` arms.
    pub fn select_key(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Date(d) => f.write_str(&d.to_rfc3339()),
            Self::Rich(_) => f.write_str(""),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::Date(d) => f.debug_tuple("Date").field(d).finish(),
            Self::Rich(_) => f.write_str("Rich(..)"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

/// Named values for one translation call.
///
/// ```
/// use lingo_runtime::Values;
///
/// let values = Values::new().with("name", "Ada").with("count", 3);
/// assert_eq!(values.get("name").map(ToString::to_string).as_deref(), Some("Ada"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Values {
    entries: BTreeMap<String, Value>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a tag renderer.
    #[must_use]
    pub fn with_rich(
        self,
        tag: impl Into<String>,
        render: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.with(tag, Value::rich(render))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

/// Call-site values layered over a scope's defaults.
#[derive(Clone, Copy)]
pub(crate) struct Layered<'a> {
    pub call_site: &'a Values,
    pub defaults: &'a Values,
}

impl<'a> Layered<'a> {
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.call_site.get(name).or_else(|| self.defaults.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_site_shadows_defaults() {
        let defaults = Values::new().with("name", "World").with("app", "lingo");
        let call_site = Values::new().with("name", "Ada");
        let layered = Layered {
            call_site: &call_site,
            defaults: &defaults,
        };
        assert_eq!(layered.get("name").map(ToString::to_string).as_deref(), Some("Ada"));
        assert_eq!(layered.get("app").map(ToString::to_string).as_deref(), Some("lingo"));
        assert!(layered.get("missing").is_none());
    }

    #[test]
    fn numeric_views() {
        assert_eq!(Value::from(3).as_f64(), Some(3.0));
        assert_eq!(Value::from("2.5").as_f64(), Some(2.5));
        assert_eq!(Value::from("many").as_f64(), None);
        assert_eq!(Value::rich(|s| s.to_owned()).as_f64(), None);
    }

    #[test]
    fn rich_values_debug_opaque() {
        let value = Value::rich(|s| format!("<b>{s}</b>"));
        assert_eq!(format!("{value:?}"), "Rich(..)");
    }
}
