//! The `TypeRecord` family: one record per extracted type.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use super::{Tags, TypeBaseInfo, TypeIdentity, TypeKind, TypeReference, TypeStatement};

// ============================================================
// Member types
// ============================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

/// How a parent is inherited. `Virtual` replaces the access specifier entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InheritanceVisibility {
    #[default]
    Public,
    Private,
    Protected,
    Virtual,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassProperty {
    pub name: String,
    pub alias: String,
    #[serde(rename = "type")]
    pub ty: TypeStatement,
    pub visibility: Visibility,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionArgument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeStatement,
    pub has_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassFunction {
    pub name: String,
    /// Pretty name of the record that owns this method.
    pub owner: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_const: bool,
    pub is_noexcept: bool,
    pub return_type: TypeStatement,
    pub arguments: Vec<FunctionArgument>,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassParent {
    #[serde(rename = "type")]
    pub type_ref: TypeReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_info: Option<TypeBaseInfo>,
    pub modifier: InheritanceVisibility,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassFriend {
    pub info: TypeBaseInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumEntry {
    pub name: String,
    pub value: i64,
}

// ============================================================
// Flags
// ============================================================

/// How a record came to be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeFlags {
    pub produced_from_template: bool,
    pub produced_from_alias: bool,
    pub declared_in_another_type: bool,
}

impl TypeFlags {
    pub fn is_plain(&self) -> bool {
        !(self.produced_from_template || self.produced_from_alias || self.declared_in_another_type)
    }
}

// ============================================================
// Record bodies
// ============================================================

/// Per-variant behaviour of a record body.
#[enum_dispatch]
pub trait RecordBody {
    fn kind(&self) -> TypeKind;

    /// References the resolve pass must bind, with a short description of where each one lives.
    fn references_mut(&mut self) -> Vec<(String, &mut TypeReference)> {
        Vec::new()
    }

    /// Rewrite method owners that still point at `from`.
    fn retarget_owner(&mut self, _from: &str, _to: &str) {}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrivialBody {}

impl RecordBody for TrivialBody {
    fn kind(&self) -> TypeKind {
        TypeKind::Trivial
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnumBody {
    pub entries: Vec<EnumEntry>,
    pub scoped: bool,
    /// Empty when the enum uses the implicit `int`.
    pub underlying: TypeReference,
}

impl RecordBody for EnumBody {
    fn kind(&self) -> TypeKind {
        TypeKind::Enum
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassBody {
    pub is_struct: bool,
    pub is_trivially_constructible: bool,
    pub has_copy_constructor: bool,
    pub has_copy_assign_operator: bool,
    pub has_move_constructor: bool,
    pub has_move_assign_operator: bool,
    pub properties: Vec<ClassProperty>,
    pub functions: Vec<ClassFunction>,
    pub friends: Vec<ClassFriend>,
    pub parents: Vec<ClassParent>,
    /// Some dependent members could not be mapped to template arguments and were dropped.
    pub has_resolution_errors: bool,
}

impl ClassBody {
    pub fn property(&self, name: &str) -> Option<&ClassProperty> {
        self.properties.iter().find(|property| property.name == name)
    }

    pub fn function(&self, name: &str) -> Option<&ClassFunction> {
        self.functions.iter().find(|function| function.name == name)
    }
}

impl RecordBody for ClassBody {
    fn kind(&self) -> TypeKind {
        TypeKind::StructOrClass
    }

    fn references_mut(&mut self) -> Vec<(String, &mut TypeReference)> {
        let mut references = Vec::new();

        for parent in &mut self.parents {
            let parent_name = parent.type_ref.name().to_string();
            for reference in parent.tags.type_references_mut() {
                references.push((format!("tag of parent '{}'", parent_name), reference));
            }
            references.push(("parent".to_string(), &mut parent.type_ref));
        }

        for property in &mut self.properties {
            for reference in property.tags.type_references_mut() {
                references.push((format!("tag of property '{}'", property.name), reference));
            }
        }

        for function in &mut self.functions {
            for reference in function.tags.type_references_mut() {
                references.push((format!("tag of function '{}'", function.name), reference));
            }
        }

        references
    }

    fn retarget_owner(&mut self, from: &str, to: &str) {
        for function in &mut self.functions {
            if function.owner == from {
                function.owner = to.to_string();
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AliasBody {
    pub target: TypeStatement,
}

impl RecordBody for AliasBody {
    fn kind(&self) -> TypeKind {
        TypeKind::Alias
    }
}

#[enum_dispatch(RecordBody)]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeBody {
    Trivial(TrivialBody),
    Enum(EnumBody),
    StructOrClass(ClassBody),
    Alias(AliasBody),
}

// ============================================================
// TypeRecord
// ============================================================

/// One extracted type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRecord {
    #[serde(flatten)]
    pub identity: TypeIdentity,
    pub tags: Tags,
    pub flags: TypeFlags,
    #[serde(flatten)]
    pub body: TypeBody,
}

impl TypeRecord {
    pub fn new(identity: TypeIdentity, tags: Tags, body: impl Into<TypeBody>) -> Self {
        Self {
            identity,
            tags,
            flags: TypeFlags::default(),
            body: body.into(),
        }
    }

    pub fn trivial(identity: TypeIdentity, tags: Tags) -> Self {
        Self::new(identity, tags, TrivialBody {})
    }

    pub fn kind(&self) -> TypeKind {
        self.body.kind()
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn pretty_name(&self) -> &str {
        &self.identity.pretty_name
    }

    pub fn base_info(&self) -> TypeBaseInfo {
        TypeBaseInfo::new(self.kind(), self.identity.clone())
    }

    /// Hash of kind, name, namespace and location.
    ///
    /// Equal within one build of cppreflect. The hasher may change between
    /// Rust releases, so ids are not meant to be persisted.
    pub fn id(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.kind().hash(&mut hasher);
        self.identity.name.hash(&mut hasher);
        self.identity.namespace.hash(&mut hasher);
        self.identity.location.hash(&mut hasher);
        hasher.finish()
    }

    /// Plain classes and enums can be forward declared by generated code.
    pub fn is_forward_declarable(&self) -> bool {
        self.flags.is_plain() && matches!(self.kind(), TypeKind::StructOrClass | TypeKind::Enum)
    }

    pub fn as_class(&self) -> Option<&ClassBody> {
        match &self.body {
            TypeBody::StructOrClass(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassBody> {
        match &mut self.body {
            TypeBody::StructOrClass(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumBody> {
        match &self.body {
            TypeBody::Enum(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_alias(&self) -> Option<&AliasBody> {
        match &self.body {
            TypeBody::Alias(body) => Some(body),
            _ => None,
        }
    }

    /// Replace the identity and let method owners follow the new pretty name.
    pub fn rewrite_identity(&mut self, identity: TypeIdentity) {
        let previous = std::mem::replace(&mut self.identity, identity);
        self.body
            .retarget_owner(&previous.pretty_name, &self.identity.pretty_name);
    }

    /// Drop the body, keeping identity, tags and flags.
    pub fn into_trivial(self) -> Self {
        Self {
            identity: self.identity,
            tags: self.tags,
            flags: self.flags,
            body: TrivialBody {}.into(),
        }
    }

    /// Every reference the resolve pass must bind: record tags, then body references.
    pub fn references_mut(&mut self) -> Vec<(String, &mut TypeReference)> {
        let mut references: Vec<(String, &mut TypeReference)> = self
            .tags
            .type_references_mut()
            .map(|reference| ("tag".to_string(), reference))
            .collect();
        references.extend(self.body.references_mut());
        references
    }
}
