//! Decides what a declaration means.

use crate::core::collect::Directive;
use crate::core::frontend::{
    Decl, DeclKind, EnumDecl, QualType, RecordDecl, TemplateArg, TranslationUnit, TypedefDecl,
};

/// Name of the member alias a registration point uses to name its subject.
pub const SUBJECT_MEMBER: &str = "Type";

/// Where a declaration goes.
#[derive(Debug)]
pub enum Route<'a> {
    Class {
        decl: &'a Decl,
        record: &'a RecordDecl,
    },
    /// Registration point: adopt `subject` as directed.
    Adopt {
        subject: &'a QualType,
        directive: Directive,
    },
    Enum {
        decl: &'a Decl,
        enumeration: &'a EnumDecl,
    },
    Alias {
        decl: &'a Decl,
        typedef: &'a TypedefDecl,
    },
    Skip,
}

/// Classify one declaration.
///
/// Records that are incomplete or part of a template pattern are skipped,
/// as are explicit specializations without `RegisterRuntime`.
pub fn route<'a>(tu: &'a TranslationUnit, decl: &'a Decl) -> Route<'a> {
    match &decl.kind {
        DeclKind::Record(record) if record.is_complete && !record.is_templated => {
            Route::Class { decl, record }
        }
        DeclKind::Specialization(specialization) => {
            let directive = Directive::from_attributes(&decl.attributes);
            if !directive.is_runtime {
                return Route::Skip;
            }
            if !matches!(specialization.args.first(), Some(TemplateArg::Type(_))) {
                return Route::Skip;
            }

            match subject_of(tu, &specialization.record) {
                Some(subject) => Route::Adopt { subject, directive },
                None => Route::Skip,
            }
        }
        DeclKind::Enum(enumeration) if enumeration.is_complete => Route::Enum { decl, enumeration },
        DeclKind::Typedef(typedef) => Route::Alias { decl, typedef },
        _ => Route::Skip,
    }
}

/// Underlying type of the `Type` member alias.
fn subject_of<'a>(tu: &'a TranslationUnit, record: &'a RecordDecl) -> Option<&'a QualType> {
    record.members.iter().find_map(|id| {
        let member = tu.decl(*id)?;
        match &member.kind {
            DeclKind::Typedef(typedef) if member.name == SUBJECT_MEMBER => {
                Some(&typedef.underlying)
            }
            _ => None,
        }
    })
}
