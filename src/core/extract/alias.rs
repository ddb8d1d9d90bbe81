//! Typedef and `using` declarations.
//!
//! An alias of a class or enum is emitted as that class or enum under the
//! alias's name. Any other alias becomes an `Alias` record describing the
//! canonical target.

use super::{ClassExtractor, EnumExtractor, ExtractContext, SpecializationExtractor};
use crate::core::frontend::{Decl, DeclKind, QualType, TypedefDecl};
use crate::core::model::{AliasBody, TypeRecord};

pub struct AliasExtractor<'a> {
    ctx: ExtractContext<'a>,
}

impl<'a> AliasExtractor<'a> {
    pub fn new(ctx: ExtractContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn extract(&self, decl: &Decl, typedef: &TypedefDecl) -> Option<TypeRecord> {
        let tags = self.ctx.tags_of(decl.comment.as_deref());
        if !self.ctx.accepts(&tags, false) || typedef.underlying.is_dependent() {
            return None;
        }

        let identity = self.ctx.identity_of(decl);
        let canonical = self.ctx.tu.desugar(&typedef.underlying);

        let mut record = match self.rewrap(&canonical) {
            Some(mut record) => {
                record.rewrite_identity(identity);
                record.tags = tags;
                record.flags.produced_from_alias = true;
                record
            }
            None => TypeRecord::new(
                identity,
                tags,
                AliasBody {
                    target: self.ctx.statement_of(&canonical),
                },
            ),
        };

        record.flags.declared_in_another_type = decl.is_nested_in_record();
        Some(record)
    }

    /// Class or enum behind the canonical type, under its own identity.
    fn rewrap(&self, canonical: &QualType) -> Option<TypeRecord> {
        match canonical.unqualified() {
            QualType::Record(id) => {
                let decl = self.ctx.decl(*id)?;
                let record = match &decl.kind {
                    DeclKind::Record(record) => record,
                    DeclKind::Specialization(specialization) => &specialization.record,
                    _ => return None,
                };
                ClassExtractor::new(self.ctx).extract(decl, record, true)
            }
            QualType::Specialization { template, args } => {
                SpecializationExtractor::new(self.ctx).extract(*template, args, None)
            }
            QualType::Enum(id) => {
                let decl = self.ctx.decl(*id)?;
                let DeclKind::Enum(enumeration) = &decl.kind else {
                    return None;
                };
                EnumExtractor::new(self.ctx).extract(decl, enumeration, true)
            }
            _ => None,
        }
    }
}
