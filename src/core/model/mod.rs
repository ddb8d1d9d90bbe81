//! Reflection model produced by extraction.
//!
//! - `identity`: kinds, names, namespaces and locations
//! - `tags`: doc-comment tags and their literal arguments
//! - `reference`: lazy cross-references into the registry
//! - `statement`: uses of a type with qualifiers
//! - `record`: the `TypeRecord` variant family

mod identity;
mod record;
mod reference;
mod statement;
mod tags;

pub use identity::{CppNamespace, DefinitionLocation, TypeBaseInfo, TypeIdentity, TypeKind};
pub use record::{
    AliasBody, ClassBody, ClassFriend, ClassFunction, ClassParent, ClassProperty, EnumBody,
    EnumEntry, FunctionArgument, InheritanceVisibility, RecordBody, TrivialBody, TypeBody,
    TypeFlags, TypeRecord, Visibility,
};
pub use reference::{RecordId, TypeReference};
pub use statement::TypeStatement;
pub use tags::{PROPERTY_TAG, RUNTIME_TAG, Tag, TagArgument, Tags};
