//! Members of template specializations (`Vector2D<float>`), resolved against
//! the template arguments.

use std::collections::{HashMap, HashSet};

use super::ExtractContext;
use super::class::{function_of, parent_of, shell, user_methods, visibility_of};
use crate::core::collect::Directive;
use crate::core::frontend::{
    DeclId, DeclKind, QualType, RecordTag, TemplateArg, TemplateParamKind,
};
use crate::core::model::{ClassProperty, FunctionArgument, TypeRecord, TypeStatement};

/// Template parameter name to the type it was instantiated with.
type Substitution<'t> = HashMap<&'t str, &'t QualType>;

pub struct SpecializationExtractor<'a> {
    ctx: ExtractContext<'a>,
}

impl<'a> SpecializationExtractor<'a> {
    pub fn new(ctx: ExtractContext<'a>) -> Self {
        Self { ctx }
    }

    /// Extract `template<args>` from the template's definition.
    ///
    /// Returns `None` when the template is undefined or has a non-type or
    /// pack parameter. With a `filter`, only members named by its
    /// allow-lists are kept.
    pub fn extract(
        &self,
        template: DeclId,
        args: &[TemplateArg],
        filter: Option<&Directive>,
    ) -> Option<TypeRecord> {
        let template_decl = self.ctx.decl(template)?;
        let DeclKind::ClassTemplate(class_template) = &template_decl.kind else {
            return None;
        };
        let pattern_decl = self.ctx.decl(class_template.definition?)?;
        let DeclKind::Record(pattern) = &pattern_decl.kind else {
            return None;
        };
        if !pattern.is_complete {
            return None;
        }

        let mut substitution = Substitution::new();
        for (index, param) in class_template.params.iter().enumerate() {
            if param.kind != TemplateParamKind::Type {
                return None;
            }
            let Some(TemplateArg::Type(ty)) = args.get(index) else {
                return None;
            };
            substitution.insert(param.name.as_str(), ty);
        }

        let identity = self.ctx.identity_of(pattern_decl);
        let is_struct = pattern.tag != RecordTag::Class;
        let mut body = shell(pattern);

        for base in &pattern.bases {
            match substitute(&base.ty, &substitution) {
                Some(ty) => body.parents.push(parent_of(self.ctx, base, is_struct, &ty)),
                None => body.has_resolution_errors = true,
            }
        }

        let mut seen = HashSet::new();
        for field in &pattern.fields {
            if !seen.insert(field.name.as_str()) {
                continue;
            }
            let alias = match filter {
                Some(directive) => match directive.property_alias(&field.name) {
                    Some(alias) => alias.to_string(),
                    None => continue,
                },
                None => field.name.clone(),
            };
            let Some(ty) = self.member_statement(&field.ty, &substitution) else {
                body.has_resolution_errors = true;
                continue;
            };

            body.properties.push(ClassProperty {
                name: field.name.clone(),
                alias,
                ty,
                visibility: visibility_of(field.access, is_struct),
                tags: self.ctx.tags_of(field.comment.as_deref()),
            });
        }

        let mut seen = HashSet::new();
        for method in user_methods(pattern) {
            if !seen.insert(method.name.as_str()) {
                continue;
            }
            if filter.is_some_and(|directive| !directive.allows_function(&method.name)) {
                continue;
            }

            let Some(return_type) = self.member_statement(&method.return_type, &substitution)
            else {
                body.has_resolution_errors = true;
                continue;
            };
            let arguments: Option<Vec<FunctionArgument>> = method
                .params
                .iter()
                .map(|param| {
                    Some(FunctionArgument {
                        name: param.name.clone(),
                        ty: self.member_statement(&param.ty, &substitution)?,
                        has_default: param.has_default,
                    })
                })
                .collect();
            let Some(arguments) = arguments else {
                body.has_resolution_errors = true;
                continue;
            };

            body.functions.push(function_of(
                self.ctx,
                method,
                is_struct,
                &identity.pretty_name,
                return_type,
                arguments,
            ));
        }

        let tags = self.ctx.tags_of(pattern_decl.comment.as_deref());
        let mut record = TypeRecord::new(identity, tags, body);
        record.flags.produced_from_template = true;
        record.flags.declared_in_another_type = pattern_decl.is_nested_in_record();
        Some(record)
    }

    /// Statement for a member type of the pattern.
    ///
    /// A dependent type may be the parameter itself or a pointer to it. The
    /// statement keeps the qualifiers of the dependent form and adds those of
    /// the argument. Anything else dependent cannot be mapped.
    fn member_statement(&self, ty: &QualType, substitution: &Substitution) -> Option<TypeStatement> {
        if !ty.is_dependent() {
            return Some(self.ctx.statement_of(ty));
        }

        let parameter = match ty.unqualified() {
            QualType::Pointer(pointee) => pointee.unqualified(),
            other => other,
        };
        let QualType::TemplateParam(name) = parameter else {
            return None;
        };
        let argument = substitution.get(name.as_str())?;

        let resolved = self.ctx.statement_of(argument);
        let mut statement = self.ctx.statement_of(ty);
        statement.type_ref = resolved.type_ref.clone();
        statement.base_info = resolved.base_info.clone();
        statement.definition_location = resolved.definition_location.clone();
        statement.is_template_specialization |= resolved.is_template_specialization;
        statement.combine_qualifiers(&resolved);
        Some(statement)
    }
}

/// Replace every template parameter in `ty`. `None` if one has no argument.
fn substitute(ty: &QualType, substitution: &Substitution) -> Option<QualType> {
    let substituted = match ty {
        QualType::TemplateParam(name) => (*substitution.get(name.as_str())?).clone(),
        QualType::Pointer(inner) => QualType::pointer_to(substitute(inner, substitution)?),
        QualType::Reference(inner) => QualType::reference_to(substitute(inner, substitution)?),
        QualType::Const(inner) => QualType::constant(substitute(inner, substitution)?),
        QualType::Specialization { template, args } => QualType::Specialization {
            template: *template,
            args: args
                .iter()
                .map(|arg| substitute_arg(arg, substitution))
                .collect::<Option<_>>()?,
        },
        other => other.clone(),
    };
    Some(substituted)
}

fn substitute_arg(arg: &TemplateArg, substitution: &Substitution) -> Option<TemplateArg> {
    match arg {
        TemplateArg::Type(ty) => Some(TemplateArg::Type(substitute(ty, substitution)?)),
        TemplateArg::NonType(value) => Some(TemplateArg::NonType(value.clone())),
        TemplateArg::Pack(items) => Some(TemplateArg::Pack(
            items
                .iter()
                .map(|item| substitute_arg(item, substitution))
                .collect::<Option<_>>()?,
        )),
    }
}
