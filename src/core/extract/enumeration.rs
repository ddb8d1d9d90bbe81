//! Enum extraction.

use super::ExtractContext;
use crate::core::frontend::{Decl, EnumDecl, QualType};
use crate::core::model::{EnumBody, EnumEntry, TypeRecord, TypeReference};

/// Underlying type every enum has unless one is spelled out.
const IMPLICIT_UNDERLYING: &str = "int";

pub struct EnumExtractor<'a> {
    ctx: ExtractContext<'a>,
}

impl<'a> EnumExtractor<'a> {
    pub fn new(ctx: ExtractContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn extract(
        &self,
        decl: &Decl,
        enumeration: &EnumDecl,
        allow_non_runtime: bool,
    ) -> Option<TypeRecord> {
        let tags = self.ctx.tags_of(decl.comment.as_deref());
        if !enumeration.is_complete || !self.ctx.accepts(&tags, allow_non_runtime) {
            return None;
        }

        let body = EnumBody {
            entries: enumeration
                .enumerators
                .iter()
                .map(|enumerator| EnumEntry {
                    name: enumerator.name.clone(),
                    value: enumerator.value,
                })
                .collect(),
            scoped: enumeration.scoped,
            underlying: self.underlying(enumeration.underlying.as_ref()),
        };

        let mut record = TypeRecord::new(self.ctx.identity_of(decl), tags, body);
        record.flags.declared_in_another_type = decl.is_nested_in_record();
        Some(record)
    }

    fn underlying(&self, ty: Option<&QualType>) -> TypeReference {
        let Some(ty) = ty else {
            return TypeReference::default();
        };

        match self.ctx.tu.desugar(ty).unqualified() {
            QualType::Builtin(name) if name == IMPLICIT_UNDERLYING => TypeReference::default(),
            _ => TypeReference::new(self.ctx.tu.spelling(ty.unqualified())),
        }
    }
}
