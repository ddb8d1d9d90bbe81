//! Struct and class extraction.

use std::collections::HashSet;

use super::ExtractContext;
use crate::core::frontend::{
    Access, BaseSpecifier, Decl, MethodDecl, QualType, RecordDecl, RecordTag,
};
use crate::core::model::{
    ClassBody, ClassFriend, ClassFunction, ClassParent, ClassProperty, FunctionArgument,
    InheritanceVisibility, PROPERTY_TAG, TypeIdentity, TypeRecord, TypeReference, TypeStatement,
    Visibility,
};

pub struct ClassExtractor<'a> {
    ctx: ExtractContext<'a>,
}

impl<'a> ClassExtractor<'a> {
    pub fn new(ctx: ExtractContext<'a>) -> Self {
        Self { ctx }
    }

    /// Extract `record` as declared by `decl`.
    ///
    /// Returns `None` for incomplete records and, unless `allow_non_runtime`
    /// is set, for records without the `runtime` tag.
    pub fn extract(
        &self,
        decl: &Decl,
        record: &RecordDecl,
        allow_non_runtime: bool,
    ) -> Option<TypeRecord> {
        let tags = self.ctx.tags_of(decl.comment.as_deref());
        if !record.is_complete || !self.ctx.accepts(&tags, allow_non_runtime) {
            return None;
        }

        let identity = self.ctx.identity_of(decl);
        let body = self.body(record, &identity);

        let mut result = TypeRecord::new(identity, tags, body);
        result.flags.declared_in_another_type = decl.is_nested_in_record();
        Some(result)
    }

    fn body(&self, record: &RecordDecl, identity: &TypeIdentity) -> ClassBody {
        let is_struct = record.tag != RecordTag::Class;
        let mut body = shell(record);

        body.parents = record
            .bases
            .iter()
            .map(|base| parent_of(self.ctx, base, is_struct, &base.ty))
            .collect();
        body.friends = record
            .friends
            .iter()
            .filter_map(|friend| self.ctx.base_info_of(friend))
            .map(|info| ClassFriend { info })
            .collect();

        let mut seen = HashSet::new();
        for field in &record.fields {
            if !seen.insert(field.name.as_str()) {
                continue;
            }

            let tags = self.ctx.tags_of(field.comment.as_deref());
            let alias = tags
                .get(PROPERTY_TAG)
                .and_then(|tag| tag.argument(0))
                .and_then(|argument| argument.as_str())
                .unwrap_or(field.name.as_str())
                .to_string();

            body.properties.push(ClassProperty {
                name: field.name.clone(),
                alias,
                ty: self.ctx.statement_of(&field.ty),
                visibility: visibility_of(field.access, is_struct),
                tags,
            });
        }

        let mut seen = HashSet::new();
        for method in user_methods(record) {
            if !seen.insert(method.name.as_str()) {
                continue;
            }

            let arguments = method
                .params
                .iter()
                .map(|param| FunctionArgument {
                    name: param.name.clone(),
                    ty: self.ctx.statement_of(&param.ty),
                    has_default: param.has_default,
                })
                .collect();

            body.functions.push(function_of(
                self.ctx,
                method,
                is_struct,
                &identity.pretty_name,
                self.ctx.statement_of(&method.return_type),
                arguments,
            ));
        }

        body
    }
}

// ============================================================
// Helpers shared with the specialization extractor
// ============================================================

/// Class body with the record-level flags filled in and no members.
pub(super) fn shell(record: &RecordDecl) -> ClassBody {
    ClassBody {
        is_struct: record.tag != RecordTag::Class,
        is_trivially_constructible: record.has_default_constructor,
        has_copy_constructor: record.has_copy_constructor,
        has_copy_assign_operator: record.has_copy_assign_operator,
        has_move_constructor: record.has_move_constructor,
        has_move_assign_operator: record.has_move_assign_operator,
        ..ClassBody::default()
    }
}

/// Unspecified member access falls back to the default of the record kind.
pub(super) fn visibility_of(access: Option<Access>, is_struct: bool) -> Visibility {
    match access {
        Some(Access::Public) => Visibility::Public,
        Some(Access::Protected) => Visibility::Protected,
        Some(Access::Private) => Visibility::Private,
        None if is_struct => Visibility::Public,
        None => Visibility::Private,
    }
}

pub(super) fn inheritance_of(base: &BaseSpecifier, is_struct: bool) -> InheritanceVisibility {
    if base.is_virtual {
        return InheritanceVisibility::Virtual;
    }

    match base.access {
        Some(Access::Public) => InheritanceVisibility::Public,
        Some(Access::Protected) => InheritanceVisibility::Protected,
        Some(Access::Private) => InheritanceVisibility::Private,
        None if is_struct => InheritanceVisibility::Public,
        None => InheritanceVisibility::Private,
    }
}

/// `ty` is the base type after any template substitution.
pub(super) fn parent_of(
    ctx: ExtractContext<'_>,
    base: &BaseSpecifier,
    is_struct: bool,
    ty: &QualType,
) -> ClassParent {
    let base_info = ctx.base_info_of(ty);
    let type_ref = match &base_info {
        Some(info) => TypeReference::new(info.pretty_name()),
        None => TypeReference::new(ctx.tu.spelling(ty.unqualified())),
    };

    ClassParent {
        type_ref,
        base_info,
        modifier: inheritance_of(base, is_struct),
        tags: ctx.tags_of_type(ty),
    }
}

/// Methods written by the user with a known source position.
pub(super) fn user_methods(record: &RecordDecl) -> impl Iterator<Item = &MethodDecl> {
    record
        .methods
        .iter()
        .filter(|method| !method.is_implicit && method.location.is_some())
}

pub(super) fn function_of(
    ctx: ExtractContext<'_>,
    method: &MethodDecl,
    is_struct: bool,
    owner: &str,
    return_type: TypeStatement,
    arguments: Vec<FunctionArgument>,
) -> ClassFunction {
    ClassFunction {
        name: method.name.clone(),
        owner: owner.to_string(),
        visibility: visibility_of(method.access, is_struct),
        is_static: method.is_static,
        is_const: method.is_const,
        is_noexcept: method.is_noexcept,
        return_type,
        arguments,
        tags: ctx.tags_of(method.comment.as_deref()),
    }
}
