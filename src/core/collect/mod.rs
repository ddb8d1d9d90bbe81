//! Metadata grammars: doc-comment tags and registration attributes.
//!
//! Both grammars are text-only and never fail: fragments that do not match
//! are skipped.

pub mod annotations;
pub mod tag_parser;

pub use annotations::{Directive, KnownProperty};
pub use tag_parser::parse_tags;
