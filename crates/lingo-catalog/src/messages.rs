#![forbid(unsafe_code)]

//! Nested message catalogs.
//!
//! A catalog is a tree: leaves hold message templates, inner nodes group
//! them into namespaces. Keys are addressed with dotted paths
//! (`"Auth.SignIn.title"`), which is why individual keys must not contain
//! `.` themselves (see [`Messages::invalid_keys`]).
//!
//! ```
//! use lingo_catalog::Messages;
//!
//! let messages = Messages::from_json_str(r#"{"Home": {"title": "Welcome"}}"#).unwrap();
//! assert_eq!(messages.get("Home.title"), Ok("Welcome"));
//! assert!(messages.get("Home").is_err());
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, LookupError};

/// A node in a message catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageNode {
    /// A translatable template.
    Leaf(String),
    /// A group of nodes.
    Namespace(BTreeMap<String, MessageNode>),
}

impl MessageNode {
    fn merged_with(&self, overlay: &MessageNode) -> MessageNode {
        match (self, overlay) {
            (MessageNode::Namespace(base), MessageNode::Namespace(top)) => {
                MessageNode::Namespace(merge_maps(base, top))
            }
            (_, top) => top.clone(),
        }
    }
}

/// The root of a message catalog for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages {
    root: BTreeMap<String, MessageNode>,
}

impl Messages {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a catalog from an already decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CatalogError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read and parse a catalog file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Insert a template at a dotted path, creating namespaces on the way.
    ///
    /// A leaf standing where a namespace is needed is replaced.
    pub fn insert(&mut self, path: &str, template: impl Into<String>) {
        let mut segments = path.split('.').peekable();
        let mut map = &mut self.root;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                map.insert(segment.to_owned(), MessageNode::Leaf(template.into()));
                return;
            }
            let slot = map
                .entry(segment.to_owned())
                .or_insert_with(|| MessageNode::Namespace(BTreeMap::new()));
            if let MessageNode::Leaf(_) = slot {
                *slot = MessageNode::Namespace(BTreeMap::new());
            }
            map = match slot {
                MessageNode::Namespace(children) => children,
                MessageNode::Leaf(_) => return,
            };
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, path: &str, template: impl Into<String>) -> Self {
        self.insert(path, template);
        self
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The node at a dotted path. An empty path is not a node.
    pub fn node(&self, path: &str) -> Option<&MessageNode> {
        if path.is_empty() {
            return None;
        }
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut node = self.root.get(first)?;
        for segment in segments {
            match node {
                MessageNode::Namespace(children) => node = children.get(segment)?,
                MessageNode::Leaf(_) => return None,
            }
        }
        Some(node)
    }

    /// Resolve a dotted path to a template.
    pub fn get(&self, path: &str) -> Result<&str, LookupError> {
        match self.node(path) {
            Some(MessageNode::Leaf(template)) => Ok(template),
            Some(MessageNode::Namespace(_)) => Err(LookupError::InsufficientPath {
                path: path.to_owned(),
            }),
            None => Err(LookupError::Missing {
                path: path.to_owned(),
            }),
        }
    }

    /// Whether a template exists at the path.
    pub fn contains(&self, path: &str) -> bool {
        matches!(self.node(path), Some(MessageNode::Leaf(_)))
    }

    /// The subtree under a namespace. An empty namespace returns the whole
    /// catalog; a leaf or a missing path returns `None`.
    pub fn namespace(&self, namespace: &str) -> Option<Messages> {
        if namespace.is_empty() {
            return Some(self.clone());
        }
        match self.node(namespace)? {
            MessageNode::Namespace(children) => Some(Messages {
                root: children.clone(),
            }),
            MessageNode::Leaf(_) => None,
        }
    }

    /// A catalog containing only the listed namespaces (or leaves), at their
    /// original paths. Unknown paths are skipped.
    pub fn pick<S: AsRef<str>>(&self, paths: &[S]) -> Messages {
        let mut picked = Messages::new();
        for path in paths {
            let path = path.as_ref();
            if let Some(node) = self.node(path) {
                picked.graft(path, node.clone());
            }
        }
        picked
    }

    fn graft(&mut self, path: &str, node: MessageNode) {
        let (parents, last) = match path.rsplit_once('.') {
            Some((parents, last)) => (Some(parents), last),
            None => (None, path),
        };
        let mut map = &mut self.root;
        if let Some(parents) = parents {
            for segment in parents.split('.') {
                let slot = map
                    .entry(segment.to_owned())
                    .or_insert_with(|| MessageNode::Namespace(BTreeMap::new()));
                if let MessageNode::Leaf(_) = slot {
                    *slot = MessageNode::Namespace(BTreeMap::new());
                }
                map = match slot {
                    MessageNode::Namespace(children) => children,
                    MessageNode::Leaf(_) => return,
                };
            }
        }
        let merged = match map.get(last) {
            Some(existing) => existing.merged_with(&node),
            None => node,
        };
        map.insert(last.to_owned(), merged);
    }

    /// Recursively merge `overlay` on top of `self`.
    ///
    /// Namespaces present in both are merged; for everything else the
    /// overlay wins. Typical use is layering a partial translation over the
    /// default locale's catalog.
    #[must_use]
    pub fn deep_merge(&self, overlay: &Messages) -> Messages {
        Messages {
            root: merge_maps(&self.root, &overlay.root),
        }
    }

    /// Dotted paths of every key that itself contains a `.`.
    pub fn invalid_keys(&self) -> Vec<String> {
        let mut invalid = Vec::new();
        walk(&self.root, "", &mut |path, key, _| {
            if key.contains('.') {
                invalid.push(path.to_owned());
            }
        });
        invalid
    }

    /// Dotted paths of every leaf, in sorted order.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        walk(&self.root, "", &mut |path, _, node| {
            if let MessageNode::Leaf(_) = node {
                paths.push(path.to_owned());
            }
        });
        paths
    }

    /// Compare key coverage across locale catalogs.
    ///
    /// The union of all leaf paths is the reference set; each locale reports
    /// which of those it lacks.
    pub fn coverage(catalogs: &[(&str, &Messages)]) -> CoverageReport {
        let mut all: Vec<String> = catalogs
            .iter()
            .flat_map(|(_, messages)| messages.leaf_paths())
            .collect();
        all.sort();
        all.dedup();

        let locales = catalogs
            .iter()
            .map(|(locale, messages)| {
                let missing: Vec<String> = all
                    .iter()
                    .filter(|path| !messages.contains(path))
                    .cloned()
                    .collect();
                let present = all.len() - missing.len();
                let coverage_percent = if all.is_empty() {
                    100.0
                } else {
                    present as f64 / all.len() as f64 * 100.0
                };
                LocaleCoverage {
                    locale: (*locale).to_owned(),
                    present,
                    missing,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            total_keys: all.len(),
            locales,
        }
    }
}

/// Key coverage across several catalogs.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    /// Size of the union of all leaf paths.
    pub total_keys: usize,
    /// Per-locale results, in input order.
    pub locales: Vec<LocaleCoverage>,
}

/// Coverage for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCoverage {
    pub locale: String,
    pub present: usize,
    pub missing: Vec<String>,
    /// In `[0, 100]`.
    pub coverage_percent: f64,
}

fn merge_maps(
    base: &BTreeMap<String, MessageNode>,
    overlay: &BTreeMap<String, MessageNode>,
) -> BTreeMap<String, MessageNode> {
    let mut merged = base.clone();
    for (key, top) in overlay {
        let node = match base.get(key) {
            Some(existing) => existing.merged_with(top),
            None => top.clone(),
        };
        merged.insert(key.clone(), node);
    }
    merged
}

fn walk(
    map: &BTreeMap<String, MessageNode>,
    prefix: &str,
    visit: &mut dyn FnMut(&str, &str, &MessageNode),
) {
    for (key, node) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        visit(&path, key, node);
        if let MessageNode::Namespace(children) = node {
            walk(children, &path, visit);
        }
    }
}
