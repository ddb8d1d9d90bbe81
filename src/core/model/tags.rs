//! Tags attached to declarations through doc comments (`@name(args)`).

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use super::TypeReference;

/// Opts a declaration into extraction.
pub const RUNTIME_TAG: &str = "runtime";
/// Renames a field: `@property(newName)`.
pub const PROPERTY_TAG: &str = "property";

/// Literal argument of a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TagArgument {
    Bool(bool),
    Float(f32),
    I64(i64),
    String(String),
    TypeRef(TypeReference),
}

impl TagArgument {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TagArgument::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            TagArgument::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TagArgument::I64(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagArgument::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_type_ref(&self) -> Option<&TypeReference> {
        match self {
            TagArgument::TypeRef(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TagArgument>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments(name: impl Into<String>, arguments: Vec<TagArgument>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    pub fn has_arguments(&self) -> bool {
        !self.arguments.is_empty()
    }

    pub fn argument(&self, index: usize) -> Option<&TagArgument> {
        self.arguments.get(index)
    }
}

/// Tags keyed by name. Inserting a tag whose name is already present replaces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<String, Tag>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.0.get(name)
    }

    pub fn insert(&mut self, tag: Tag) {
        self.0.insert(tag.name.clone(), tag);
    }

    /// Map-union: tags from `other` replace tags with the same name.
    pub fn merge(&mut self, other: &Tags) {
        for tag in other.iter() {
            self.insert(tag.clone());
        }
    }

    pub fn is_runtime(&self) -> bool {
        self.has(RUNTIME_TAG)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tag> {
        self.0.values_mut()
    }

    /// All type references carried by tag arguments.
    pub fn type_references_mut(&mut self) -> impl Iterator<Item = &mut TypeReference> {
        self.0
            .values_mut()
            .flat_map(|tag| tag.arguments.iter_mut())
            .filter_map(|argument| match argument {
                TagArgument::TypeRef(reference) => Some(reference),
                _ => None,
            })
    }
}

impl FromIterator<Tag> for Tags {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}

impl AddAssign<Tag> for Tags {
    fn add_assign(&mut self, tag: Tag) {
        self.insert(tag);
    }
}

impl AddAssign<&Tags> for Tags {
    fn add_assign(&mut self, other: &Tags) {
        self.merge(other);
    }
}

impl IntoIterator for Tags {
    type Item = Tag;
    type IntoIter = btree_map::IntoValues<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_same_name() {
        let mut tags = Tags::new();
        tags += Tag::with_arguments("a", vec![TagArgument::I64(1)]);
        tags += Tag::with_arguments("a", vec![TagArgument::I64(2)]);

        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get("a").unwrap().arguments, vec![TagArgument::I64(2)]);
    }

    #[test]
    fn test_merge_later_wins() {
        let mut base: Tags = [Tag::new("runtime"), Tag::with_arguments("x", vec![TagArgument::Bool(false)])]
            .into_iter()
            .collect();
        let extra: Tags = [Tag::with_arguments("x", vec![TagArgument::Bool(true)])]
            .into_iter()
            .collect();

        base += &extra;

        assert!(base.is_runtime());
        assert_eq!(base.get("x").unwrap().argument(0), Some(&TagArgument::Bool(true)));
    }

    #[test]
    fn test_type_references_mut() {
        let mut tags: Tags = [
            Tag::with_arguments(
                "serialize",
                vec![
                    TagArgument::TypeRef(TypeReference::new("Serializers")),
                    TagArgument::String("json".into()),
                ],
            ),
            Tag::new("runtime"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = tags
            .type_references_mut()
            .map(|reference| reference.name().to_string())
            .collect();
        assert_eq!(names, vec!["Serializers"]);
    }

    #[test]
    fn test_argument_accessors() {
        assert_eq!(TagArgument::Bool(true).as_bool(), Some(true));
        assert_eq!(TagArgument::I64(7).as_str(), None);
        assert_eq!(TagArgument::String("x".into()).as_str(), Some("x"));
        assert_eq!(TagArgument::Float(1.5).as_float(), Some(1.5));
    }
}
