#![forbid(unsafe_code)]

//! Message catalogs and templates for lingo.
//!
//! Provides validated locale tags, nested message catalogs with dotted-key
//! lookup, CLDR-style plural rules, and a parser for ICU-style message
//! templates (arguments, plurals, selects and rich-text tags).
//!
//! # Role in lingo
//! `lingo-catalog` holds the data model. It knows nothing about scopes,
//! requests or formatting, so catalogs can be loaded, merged and checked
//! in isolation (build scripts, coverage tools, tests).
//!
//! # How it fits in the system
//! `lingo-format` uses [`Locale`] and the plural rules to format values;
//! `lingo-runtime` renders [`Template`]s against a scope's configuration.

pub mod error;
pub mod locale;
pub mod messages;
pub mod plural;
pub mod template;

pub use error::{CatalogError, LookupError, TemplateError};
pub use locale::Locale;
pub use messages::{CoverageReport, LocaleCoverage, MessageNode, Messages};
pub use plural::{OrdinalRule, PluralCategory, PluralRule};
pub use template::{PluralArm, PluralSelector, Segment, SelectArm, Template};
