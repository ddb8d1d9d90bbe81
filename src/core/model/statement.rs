use serde::{Deserialize, Serialize};

use super::{DefinitionLocation, TypeBaseInfo, TypeReference};

/// A use of a type: field type, argument, return value or alias target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStatement {
    #[serde(rename = "type")]
    pub type_ref: TypeReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_info: Option<TypeBaseInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_location: Option<DefinitionLocation>,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_pointer: bool,
    #[serde(default)]
    pub is_ptr_const: bool,
    #[serde(default)]
    pub is_reference: bool,
    #[serde(default)]
    pub is_template_specialization: bool,
}

impl TypeStatement {
    pub fn new(type_ref: TypeReference) -> Self {
        Self {
            type_ref,
            ..Self::default()
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(TypeReference::new(name))
    }

    /// `void` by value. `void*` is a pointer, not void.
    pub fn is_void(&self) -> bool {
        self.type_ref.name() == "void" && !self.is_pointer
    }

    pub fn type_name(&self) -> &str {
        self.type_ref.name()
    }

    /// Merge qualifiers from another form of the same type (OR-combine).
    pub fn combine_qualifiers(&mut self, other: &TypeStatement) {
        self.is_const |= other.is_const;
        self.is_pointer |= other.is_pointer;
        self.is_ptr_const |= other.is_ptr_const;
        self.is_reference |= other.is_reference;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_void() {
        assert!(TypeStatement::named("void").is_void());

        let mut void_ptr = TypeStatement::named("void");
        void_ptr.is_pointer = true;
        assert!(!void_ptr.is_void());

        assert!(!TypeStatement::named("int").is_void());
    }

    #[test]
    fn test_combine_qualifiers() {
        let mut substituted = TypeStatement::named("Vector3");
        substituted.is_const = true;

        let mut dependent = TypeStatement::named("T");
        dependent.is_pointer = true;
        dependent.is_ptr_const = true;

        substituted.combine_qualifiers(&dependent);

        assert!(substituted.is_const);
        assert!(substituted.is_pointer);
        assert!(substituted.is_ptr_const);
        assert!(!substituted.is_reference);
        assert_eq!(substituted.type_name(), "Vector3");
    }
}
