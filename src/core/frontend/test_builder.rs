//! Test-only builder for translation units.
//!
//! ```ignore
//! let mut tu = TuBuilder::new("math.h");
//! let v2 = tu.add(
//!     DeclBuilder::record("V2")
//!         .in_namespace("engine")
//!         .comment("/// @runtime")
//!         .field("x", QualType::builtin("float")),
//! );
//! ```

use std::path::PathBuf;

use super::ast::*;
use crate::issues::Severity;

pub struct TuBuilder {
    unit: TranslationUnit,
}

impl TuBuilder {
    pub fn new(main_file: &str) -> Self {
        Self {
            unit: TranslationUnit {
                main_file: PathBuf::from(main_file),
                ..TranslationUnit::default()
            },
        }
    }

    /// Append a declaration. Unless told otherwise it is located at
    /// `main_file:<index + 1>:1`.
    pub fn add(&mut self, builder: DeclBuilder) -> DeclId {
        let id = DeclId(self.unit.decls.len());
        let mut decl = builder.decl;
        if decl.location.is_none() && builder.located {
            decl.location = Some(SourceLocation {
                path: self.unit.main_file.clone(),
                line: id.0 as u32 + 1,
                column: 1,
                angled: false,
            });
        }
        self.unit.decls.push(decl);
        id
    }

    /// Id the next added declaration will get.
    pub fn next_id(&self) -> DeclId {
        DeclId(self.unit.decls.len())
    }

    /// Attach `member` to the record `owner` after both were added.
    pub fn nest(&mut self, owner: DeclId, member: DeclId) {
        record_of(&mut self.unit.decls[owner.0].kind).members.push(member);
    }

    pub fn diagnostic(&mut self, severity: Severity, line: u32, message: &str) {
        let file = self.unit.main_file.display().to_string();
        self.unit.diagnostics.push(Diagnostic {
            severity,
            file,
            line,
            column: 1,
            message: message.to_string(),
        });
    }

    pub fn build(self) -> TranslationUnit {
        self.unit
    }
}

pub struct DeclBuilder {
    decl: Decl,
    located: bool,
}

impl DeclBuilder {
    fn new(name: &str, kind: DeclKind) -> Self {
        Self {
            decl: Decl {
                name: name.to_string(),
                scope: Vec::new(),
                location: None,
                comment: None,
                attributes: Vec::new(),
                kind,
            },
            located: true,
        }
    }

    pub fn record(name: &str) -> Self {
        Self::new(name, DeclKind::Record(RecordDecl::default()))
    }

    pub fn class(name: &str) -> Self {
        Self::new(
            name,
            DeclKind::Record(RecordDecl {
                tag: RecordTag::Class,
                ..RecordDecl::default()
            }),
        )
    }

    pub fn enumeration(name: &str) -> Self {
        Self::new(
            name,
            DeclKind::Enum(EnumDecl {
                is_complete: true,
                scoped: false,
                underlying: None,
                enumerators: Vec::new(),
            }),
        )
    }

    pub fn typedef(name: &str, underlying: QualType) -> Self {
        Self::new(name, DeclKind::Typedef(TypedefDecl { underlying }))
    }

    /// Template whose parameters are all type parameters.
    pub fn class_template(name: &str, params: &[&str], definition: Option<DeclId>) -> Self {
        let params = params
            .iter()
            .map(|name| TemplateParam {
                name: name.to_string(),
                kind: TemplateParamKind::Type,
            })
            .collect();
        Self::template_with(name, params, definition)
    }

    pub fn template_with(
        name: &str,
        params: Vec<TemplateParam>,
        definition: Option<DeclId>,
    ) -> Self {
        Self::new(
            name,
            DeclKind::ClassTemplate(ClassTemplateDecl { params, definition }),
        )
    }

    pub fn specialization(name: &str, template: DeclId, args: Vec<QualType>) -> Self {
        Self::new(
            name,
            DeclKind::Specialization(SpecializationDecl {
                template,
                args: args.into_iter().map(TemplateArg::Type).collect(),
                record: RecordDecl::default(),
            }),
        )
    }

    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.decl.scope.extend(
            namespace
                .split("::")
                .filter(|segment| !segment.is_empty())
                .map(|segment| Scope::Namespace(segment.to_string())),
        );
        self
    }

    pub fn in_record(mut self, name: &str) -> Self {
        self.decl.scope.push(Scope::Record(name.to_string()));
        self
    }

    pub fn comment(mut self, text: &str) -> Self {
        self.decl.comment = Some(text.to_string());
        self
    }

    pub fn attributes(mut self, attributes: &[&str]) -> Self {
        self.decl.attributes = attributes.iter().map(|text| text.to_string()).collect();
        self
    }

    pub fn at(mut self, path: &str, line: u32) -> Self {
        self.decl.location = Some(SourceLocation {
            path: PathBuf::from(path),
            line,
            column: 1,
            angled: false,
        });
        self
    }

    pub fn without_location(mut self) -> Self {
        self.located = false;
        self
    }

    pub fn incomplete(mut self) -> Self {
        match &mut self.decl.kind {
            DeclKind::Enum(enumeration) => enumeration.is_complete = false,
            kind => record_of(kind).is_complete = false,
        }
        self
    }

    pub fn templated(mut self) -> Self {
        self.record_mut().is_templated = true;
        self
    }

    pub fn default_constructible(mut self) -> Self {
        self.record_mut().has_default_constructor = true;
        self
    }

    pub fn field(self, name: &str, ty: QualType) -> Self {
        self.field_with(FieldDecl {
            name: name.to_string(),
            ty,
            access: None,
            comment: None,
        })
    }

    pub fn field_with(mut self, field: FieldDecl) -> Self {
        self.record_mut().fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.record_mut().methods.push(method);
        self
    }

    pub fn base(mut self, ty: QualType, access: Option<Access>, is_virtual: bool) -> Self {
        self.record_mut().bases.push(BaseSpecifier {
            ty,
            access,
            is_virtual,
        });
        self
    }

    pub fn friend(mut self, ty: QualType) -> Self {
        self.record_mut().friends.push(ty);
        self
    }

    pub fn member(mut self, id: DeclId) -> Self {
        self.record_mut().members.push(id);
        self
    }

    pub fn scoped(mut self) -> Self {
        self.enum_mut().scoped = true;
        self
    }

    pub fn underlying(mut self, ty: QualType) -> Self {
        self.enum_mut().underlying = Some(ty);
        self
    }

    pub fn enumerator(mut self, name: &str, value: i64) -> Self {
        self.enum_mut().enumerators.push(Enumerator {
            name: name.to_string(),
            value,
        });
        self
    }

    fn record_mut(&mut self) -> &mut RecordDecl {
        record_of(&mut self.decl.kind)
    }

    fn enum_mut(&mut self) -> &mut EnumDecl {
        match &mut self.decl.kind {
            DeclKind::Enum(enumeration) => enumeration,
            other => panic!("not an enum: {:?}", other),
        }
    }
}

fn record_of(kind: &mut DeclKind) -> &mut RecordDecl {
    match kind {
        DeclKind::Record(record) => record,
        DeclKind::Specialization(specialization) => &mut specialization.record,
        other => panic!("not a record: {:?}", other),
    }
}

/// Public, user-written method at `test.h:1:1`.
pub fn method(name: &str, return_type: QualType) -> MethodDecl {
    MethodDecl {
        name: name.to_string(),
        access: Some(Access::Public),
        is_static: false,
        is_const: false,
        is_noexcept: false,
        is_implicit: false,
        location: Some(SourceLocation {
            path: PathBuf::from("test.h"),
            line: 1,
            column: 1,
            angled: false,
        }),
        comment: None,
        return_type,
        params: Vec::new(),
    }
}

pub fn param(name: &str, ty: QualType) -> ParamDecl {
    ParamDecl {
        name: name.to_string(),
        ty,
        has_default: false,
    }
}
