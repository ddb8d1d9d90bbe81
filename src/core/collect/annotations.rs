//! Attribute-based registration of third-party types.
//!
//! A registration point is a template specialization whose attributes carry
//! directives such as `RegisterRuntime` or `RegisterField[x:X]`. Directives may
//! be spelled with the `RG3_` prefix. Unknown attributes are ignored.

use std::path::PathBuf;

use super::tag_parser::parse_tags;
use crate::core::model::Tags;

const DIRECTIVE_PREFIX: &str = "RG3_";

const REGISTER_RUNTIME: &str = "RegisterRuntime";
const REGISTER_FIELD: &str = "RegisterField";
const REGISTER_FUNCTION: &str = "RegisterFunction";
const REGISTER_TAG: &str = "RegisterTag";
const OVERRIDE_LOCATION: &str = "OverrideLocation";
const MAKE_TYPE_TRIVIAL: &str = "MakeTypeTrivial";

/// A field named in `RegisterField[orig:alias]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownProperty {
    pub name: String,
    pub alias: String,
}

/// Everything the attributes of one declaration ask for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directive {
    pub is_runtime: bool,
    pub known_properties: Vec<KnownProperty>,
    pub known_functions: Vec<String>,
    pub additional_tags: Tags,
    pub override_location: Option<PathBuf>,
    pub interpret_as_trivial: bool,
}

impl Directive {
    /// Interpret a declaration's attribute strings.
    pub fn from_attributes<S: AsRef<str>>(attributes: &[S]) -> Self {
        let mut directive = Directive::default();

        for attribute in attributes {
            let text = attribute.as_ref();
            let text = text.strip_prefix(DIRECTIVE_PREFIX).unwrap_or(text);

            if text == REGISTER_RUNTIME {
                directive.is_runtime = true;
            } else if text == MAKE_TYPE_TRIVIAL {
                directive.interpret_as_trivial = true;
            } else if text.starts_with(REGISTER_FIELD) {
                directive.add_property(text);
            } else if text.starts_with(REGISTER_FUNCTION) {
                if let Some(name) = bracket_payload(text) {
                    directive.known_functions.push(name.to_string());
                }
            } else if text.starts_with(REGISTER_TAG) {
                if let Some(fragment) = bracket_payload(text) {
                    directive.additional_tags.merge(&parse_tags(fragment));
                }
            } else if text.starts_with(OVERRIDE_LOCATION) {
                if let Some(path) = bracket_payload(text) {
                    directive.override_location = Some(PathBuf::from(path));
                }
            }
        }

        directive
    }

    /// `RegisterField[x]` or `RegisterField[x:X]`: split on any of `[`, `]`, `:`
    /// and drop empty parts together with the directive name itself.
    fn add_property(&mut self, text: &str) {
        let parts: Vec<&str> = text
            .split(['[', ']', ':'])
            .filter(|part| !part.is_empty() && *part != REGISTER_FIELD)
            .collect();

        let Some(name) = parts.first() else {
            return;
        };
        let alias = if parts.len() == 2 { parts[1] } else { name };

        self.known_properties.push(KnownProperty {
            name: name.to_string(),
            alias: alias.to_string(),
        });
    }

    /// Alias registered for field `name`, if the allow-list names it.
    pub fn property_alias(&self, name: &str) -> Option<&str> {
        self.known_properties
            .iter()
            .find(|property| property.name == name)
            .map(|property| property.alias.as_str())
    }

    pub fn allows_function(&self, name: &str) -> bool {
        self.known_functions.iter().any(|known| known == name)
    }
}

/// Second part of a split on `[` and `]`: `Name[payload]` gives `payload`.
fn bracket_payload(text: &str) -> Option<&str> {
    text.split(['[', ']']).nth(1)
}
