use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Position of a record inside a [`TypeRegistry`](crate::core::registry::TypeRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub usize);

/// Lazy cross-reference to another type, by qualified name.
///
/// `resolved` is filled by the resolve pass and never cleared afterwards.
/// Equality and hashing only look at the name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeReference {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolved: Option<RecordId>,
}

impl TypeReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolved: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resolved(&self) -> Option<RecordId> {
        self.resolved
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// An empty reference stands for "nothing" (e.g. the implicit `int` of an enum).
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Attach the registry key. A reference that is already resolved keeps its key.
    pub(crate) fn bind(&mut self, id: RecordId) {
        if self.resolved.is_none() {
            self.resolved = Some(id);
        }
    }
}

impl PartialEq for TypeReference {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeReference {}

impl Hash for TypeReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl From<&str> for TypeReference {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
