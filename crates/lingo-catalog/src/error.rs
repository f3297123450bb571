#![forbid(unsafe_code)]

//! Error types for catalog loading, key lookup and template parsing.

use std::path::PathBuf;

/// Errors raised while loading catalogs or parsing locale tags.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The locale tag is not a well-formed BCP-47 identifier.
    #[error("invalid locale tag `{tag}`")]
    InvalidLocale {
        /// The rejected input.
        tag: String,
    },
    /// The catalog document is not a nested object of strings.
    #[error("invalid catalog: {0}")]
    Json(#[from] serde_json::Error),
    /// The catalog file could not be read.
    #[error("failed to read catalog `{}`: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Why a dotted key did not resolve to a template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Nothing is stored under the path.
    #[error("no message at `{path}`")]
    Missing {
        /// The requested path.
        path: String,
    },
    /// The path names a namespace rather than a message.
    #[error("`{path}` is a namespace, not a message")]
    InsufficientPath {
        /// The requested path.
        path: String,
    },
}

/// Syntax errors in a message template.
///
/// Positions are byte offsets into the template source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A `}` appeared with no open placeholder.
    #[error("unexpected `}}` at {pos}")]
    UnexpectedBrace {
        /// Byte offset.
        pos: usize,
    },
    /// The template ended inside a placeholder, arm or tag.
    #[error("unterminated {what}")]
    Unterminated {
        /// What was left open.
        what: &'static str,
    },
    /// A placeholder with no argument name.
    #[error("empty argument name at {pos}")]
    EmptyArgument {
        /// Byte offset.
        pos: usize,
    },
    /// An argument type other than number, date, time, plural, selectordinal or select.
    #[error("unknown argument type `{kind}` at {pos}")]
    UnknownArgumentType {
        /// The unrecognized type keyword.
        kind: String,
        /// Byte offset.
        pos: usize,
    },
    /// A plural or select arm selector that cannot be parsed.
    #[error("invalid selector `{selector}`")]
    InvalidSelector {
        /// The offending selector.
        selector: String,
    },
    /// A plural or select without the mandatory `other` arm.
    #[error("`{arg}` has no `other` arm")]
    MissingOther {
        /// The argument being selected on.
        arg: String,
    },
    /// A closing tag that does not match the innermost open tag.
    #[error("expected `</{expected}>`, found `</{found}>`")]
    MismatchedTag {
        /// The open tag.
        expected: String,
        /// The closing tag encountered.
        found: String,
    },
    /// A specific character was required.
    #[error("expected `{expected}` at {pos}")]
    Expected {
        /// The required character.
        expected: char,
        /// Byte offset.
        pos: usize,
    },
}
