//! Registration of types through attributes on a registration point.
//!
//! ```cpp
//! template <> struct RegisterType<glm::vec2> {
//!     using Type = glm::vec2;
//! } RG3_RegisterRuntime RG3_RegisterField[x:X] RG3_RegisterField[y:Y];
//! ```
//!
//! The subject (`Type`) is extracted even without a `runtime` tag, and its
//! members are limited to what the directives name.

use super::{ClassExtractor, EnumExtractor, ExtractContext, SpecializationExtractor};
use crate::core::collect::Directive;
use crate::core::frontend::{DeclKind, QualType};
use crate::core::model::{
    DefinitionLocation, RUNTIME_TAG, Tag, Tags, TypeIdentity, TypeRecord,
};

/// Bound on typedef chains followed while adopting.
const MAX_ADOPTION_DEPTH: usize = 16;

pub struct Adopter<'a> {
    ctx: ExtractContext<'a>,
    directive: &'a Directive,
}

impl<'a> Adopter<'a> {
    pub fn new(ctx: ExtractContext<'a>, directive: &'a Directive) -> Self {
        Self { ctx, directive }
    }

    /// Adopt `subject`. `None` when nothing adoptable is behind it.
    pub fn adopt(&self, subject: &QualType) -> Option<TypeRecord> {
        let mut record = self.adopt_at(subject, true, 0)?;

        if self.directive.interpret_as_trivial {
            record = record.into_trivial();
        }
        if let Some(path) = &self.directive.override_location {
            record.identity.location = DefinitionLocation::angled(path);
        }
        record.tags.merge(&self.directive.additional_tags);
        record.tags.insert(Tag::new(RUNTIME_TAG));

        Some(record)
    }

    /// `direct` is false once a typedef has been followed; only a directly
    /// named specialization is renamed to its spelled form.
    fn adopt_at(&self, subject: &QualType, direct: bool, depth: usize) -> Option<TypeRecord> {
        if depth > MAX_ADOPTION_DEPTH {
            return None;
        }

        match subject.unqualified() {
            QualType::Typedef(id) => {
                let decl = self.ctx.decl(*id)?;
                let DeclKind::Typedef(typedef) = &decl.kind else {
                    return None;
                };

                let mut record = self.adopt_at(&typedef.underlying, false, depth + 1)?;
                record.rewrite_identity(self.ctx.identity_of(decl));
                record.flags.produced_from_alias = true;
                record.flags.declared_in_another_type = decl.is_nested_in_record();
                Some(record)
            }
            QualType::Enum(id) => {
                let decl = self.ctx.decl(*id)?;
                let DeclKind::Enum(enumeration) = &decl.kind else {
                    return None;
                };
                EnumExtractor::new(self.ctx).extract(decl, enumeration, true)
            }
            QualType::Builtin(name) => {
                let tags: Tags = [Tag::new(RUNTIME_TAG)].into_iter().collect();
                Some(TypeRecord::trivial(TypeIdentity::builtin(name.clone()), tags))
            }
            QualType::Specialization { template, args } => {
                let mut record = SpecializationExtractor::new(self.ctx).extract(
                    *template,
                    args,
                    Some(self.directive),
                )?;

                if direct {
                    let template_decl = self.ctx.decl(*template)?;
                    let name = format!("{}<{}>", template_decl.name, self.ctx.tu.spell_args(args));
                    let mut identity = record.identity.clone();
                    identity.pretty_name = identity.namespace.qualify(&name);
                    identity.name = name;
                    record.rewrite_identity(identity);
                }

                self.apply_allow_lists(&mut record);
                Some(record)
            }
            QualType::Record(id) => {
                let decl = self.ctx.decl(*id)?;
                let record = match &decl.kind {
                    DeclKind::Record(record) => record,
                    DeclKind::Specialization(specialization) => &specialization.record,
                    _ => return None,
                };

                let mut record = ClassExtractor::new(self.ctx).extract(decl, record, true)?;
                self.apply_allow_lists(&mut record);
                Some(record)
            }
            _ => None,
        }
    }

    /// Keep only registered members, renaming properties to their aliases.
    fn apply_allow_lists(&self, record: &mut TypeRecord) {
        let Some(class) = record.as_class_mut() else {
            return;
        };

        class.properties.retain_mut(|property| {
            match self.directive.property_alias(&property.name) {
                Some(alias) => {
                    property.alias = alias.to_string();
                    true
                }
                None => false,
            }
        });
        class
            .functions
            .retain(|function| self.directive.allows_function(&function.name));
    }
}
