//! Identity snapshots and type statements computed from front-end types.

use crate::config::CompilerConfig;
use crate::core::collect::parse_tags;
use crate::core::frontend::{Decl, DeclId, DeclKind, QualType, TranslationUnit};
use crate::core::model::{
    DefinitionLocation, Tags, TypeBaseInfo, TypeIdentity, TypeKind, TypeReference, TypeStatement,
};

/// Shared, read-only state of one extraction session.
#[derive(Debug, Clone, Copy)]
pub struct ExtractContext<'a> {
    pub tu: &'a TranslationUnit,
    /// Collect types that lack the `runtime` tag.
    pub collect_non_runtime: bool,
}

impl<'a> ExtractContext<'a> {
    pub fn new(tu: &'a TranslationUnit, config: &CompilerConfig) -> Self {
        Self {
            tu,
            collect_non_runtime: config.collect_non_runtime,
        }
    }

    pub fn decl(&self, id: DeclId) -> Option<&'a Decl> {
        self.tu.decl(id)
    }

    /// Tags attached to a declaration through its doc comment.
    pub fn tags_of(&self, comment: Option<&str>) -> Tags {
        comment.map(parse_tags).unwrap_or_default()
    }

    /// Whether a declaration with these tags should be collected.
    pub fn accepts(&self, tags: &Tags, allow_non_runtime: bool) -> bool {
        allow_non_runtime || self.collect_non_runtime || tags.is_runtime()
    }

    pub fn identity_of(&self, decl: &Decl) -> TypeIdentity {
        TypeIdentity {
            name: decl.name.clone(),
            pretty_name: decl.qualified_name(),
            namespace: decl.namespace(),
            location: decl.definition_location(),
        }
    }

    /// Identity snapshot of the type a use names. Qualifiers are ignored.
    pub fn base_info_of(&self, ty: &QualType) -> Option<TypeBaseInfo> {
        let tu = self.tu;
        match ty.unqualified() {
            QualType::Builtin(name) => Some(TypeBaseInfo::new(
                TypeKind::Trivial,
                TypeIdentity::builtin(name.clone()),
            )),
            QualType::Record(id) => {
                let decl = tu.decl(*id)?;
                Some(TypeBaseInfo::new(TypeKind::StructOrClass, self.identity_of(decl)))
            }
            QualType::Enum(id) => {
                let decl = tu.decl(*id)?;
                Some(TypeBaseInfo::new(TypeKind::Enum, self.identity_of(decl)))
            }
            QualType::Typedef(id) => {
                let decl = tu.decl(*id)?;
                let kind = canonical_kind(&tu.desugar(ty.unqualified()));
                Some(TypeBaseInfo::new(kind, self.identity_of(decl)))
            }
            specialization @ QualType::Specialization { template, args } => {
                let decl = tu.decl(*template)?;
                let identity = TypeIdentity {
                    name: format!("{}<{}>", decl.name, tu.spell_args(args)),
                    pretty_name: tu.spelling(specialization),
                    namespace: decl.namespace(),
                    location: decl.definition_location(),
                };
                Some(TypeBaseInfo::new(TypeKind::TemplateSpecialization, identity))
            }
            _ => None,
        }
    }

    /// Describe a use of `ty`: the named type plus its qualifiers.
    ///
    /// For pointers and references the statement names the pointee and the
    /// indirection becomes a flag. Typedefs are followed only as far as needed
    /// to find the indirection, so the named type keeps its alias spelling.
    pub fn statement_of(&self, ty: &QualType) -> TypeStatement {
        let tu = self.tu;
        let top = tu.desugar_top(ty);

        let indirection = match top.unqualified() {
            QualType::Pointer(pointee) => Some((pointee.as_ref(), false)),
            QualType::Reference(pointee) => Some((pointee.as_ref(), true)),
            _ => None,
        };
        let named = match indirection {
            Some((pointee, _)) => pointee.unqualified(),
            None => ty.unqualified(),
        };

        let base_info = self.base_info_of(named);
        let reference = match &base_info {
            Some(info) => TypeReference::new(info.pretty_name()),
            None => TypeReference::new(tu.spelling(named)),
        };

        let mut statement = TypeStatement::new(reference);
        statement.base_info = base_info;
        statement.definition_location = self.definition_location_of(named);
        statement.is_const = top.is_const();
        statement.is_template_specialization =
            matches!(top.unqualified(), QualType::Specialization { .. });

        if let Some((pointee, is_reference)) = indirection {
            statement.is_pointer = !is_reference;
            statement.is_reference = is_reference;
            statement.is_ptr_const = tu.desugar_top(pointee).is_const();
        }

        statement
    }

    /// Location of the declaration behind a type, looking through typedefs.
    /// Specializations point at their template.
    pub fn definition_location_of(&self, ty: &QualType) -> Option<DefinitionLocation> {
        let id = match self.tu.desugar(ty).unqualified() {
            QualType::Record(id) | QualType::Enum(id) => *id,
            QualType::Specialization { template, .. } => *template,
            _ => return None,
        };
        self.tu
            .decl(id)?
            .location
            .as_ref()
            .map(DefinitionLocation::from)
    }

    /// Tags declared on the record or template a parent type names, if visible here.
    pub fn tags_of_type(&self, ty: &QualType) -> Tags {
        let decl = match self.tu.desugar(ty).unqualified() {
            QualType::Record(id) => self.tu.decl(*id),
            QualType::Specialization { template, .. } => {
                match self.tu.decl(*template).map(|decl| &decl.kind) {
                    Some(DeclKind::ClassTemplate(template)) => {
                        template.definition.and_then(|id| self.tu.decl(id))
                    }
                    _ => None,
                }
            }
            _ => None,
        };

        self.tags_of(decl.and_then(|decl| decl.comment.as_deref()))
    }
}

fn canonical_kind(ty: &QualType) -> TypeKind {
    match ty.unqualified() {
        QualType::Record(_) | QualType::Specialization { .. } => TypeKind::StructOrClass,
        QualType::Enum(_) => TypeKind::Enum,
        QualType::Builtin(_) => TypeKind::Trivial,
        _ => TypeKind::Alias,
    }
}
