//! Declaration stream handed over by a front end.
//!
//! A [`TranslationUnit`] is an arena: declarations are stored in document order
//! and refer to each other through [`DeclId`] indexes.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::model::{CppNamespace, DefinitionLocation};
use crate::issues::Severity;

/// Recursion bound when following typedef chains.
const MAX_DESUGAR_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub usize);

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================
// Translation unit
// ============================================================

/// A message reported by the front end while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationUnit {
    #[serde(default)]
    pub main_file: PathBuf,
    #[serde(default)]
    pub decls: Vec<Decl>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl TranslationUnit {
    pub fn decl(&self, id: DeclId) -> Option<&Decl> {
        self.decls.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Decl)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(index, decl)| (DeclId(index), decl))
    }

    /// Fully scoped name of a declaration (`ns::Outer::Name`).
    pub fn qualified_name(&self, id: DeclId) -> Option<String> {
        self.decl(id).map(Decl::qualified_name)
    }

    /// Follow typedefs down to the canonical type. Qualifiers are kept.
    pub fn desugar(&self, ty: &QualType) -> QualType {
        self.desugar_bounded(ty, MAX_DESUGAR_DEPTH)
    }

    /// Follow typedefs at the top level only: `bytes` (= `u8*`) becomes `u8*`,
    /// not `unsigned char*`. A `const` met on the way is kept.
    pub fn desugar_top(&self, ty: &QualType) -> QualType {
        let mut current = ty.clone();
        let mut is_const = false;

        for _ in 0..MAX_DESUGAR_DEPTH {
            match current {
                QualType::Const(inner) => {
                    is_const = true;
                    current = *inner;
                }
                QualType::Typedef(id) => match self.decl(id).map(|decl| &decl.kind) {
                    Some(DeclKind::Typedef(typedef)) => current = typedef.underlying.clone(),
                    _ => break,
                },
                _ => break,
            }
        }

        if is_const {
            QualType::Const(Box::new(current))
        } else {
            current
        }
    }

    fn desugar_bounded(&self, ty: &QualType, depth: usize) -> QualType {
        if depth == 0 {
            return QualType::Unknown(self.spelling(ty));
        }

        match ty {
            QualType::Typedef(id) => match self.decl(*id).map(|decl| &decl.kind) {
                Some(DeclKind::Typedef(typedef)) => {
                    self.desugar_bounded(&typedef.underlying, depth - 1)
                }
                _ => QualType::Unknown(self.spelling(ty)),
            },
            QualType::Const(inner) => match self.desugar_bounded(inner, depth - 1) {
                already @ QualType::Const(_) => already,
                desugared => QualType::Const(Box::new(desugared)),
            },
            QualType::Pointer(inner) => {
                QualType::Pointer(Box::new(self.desugar_bounded(inner, depth - 1)))
            }
            QualType::Reference(inner) => {
                QualType::Reference(Box::new(self.desugar_bounded(inner, depth - 1)))
            }
            other => other.clone(),
        }
    }

    /// C++ spelling of a type, with qualified names for declarations.
    pub fn spelling(&self, ty: &QualType) -> String {
        match ty {
            QualType::Builtin(name) | QualType::TemplateParam(name) | QualType::Unknown(name) => {
                name.clone()
            }
            QualType::Record(id) | QualType::Enum(id) | QualType::Typedef(id) => self
                .qualified_name(*id)
                .unwrap_or_else(|| format!("<invalid {}>", id)),
            QualType::Specialization { template, args } => {
                let name = self
                    .qualified_name(*template)
                    .unwrap_or_else(|| format!("<invalid {}>", template));
                format!("{}<{}>", name, self.spell_args(args))
            }
            QualType::Pointer(inner) => format!("{} *", self.spelling(inner)),
            QualType::Reference(inner) => format!("{} &", self.spelling(inner)),
            QualType::Const(inner) => match inner.as_ref() {
                QualType::Pointer(_) => format!("{}const", self.spelling(inner)),
                _ => format!("const {}", self.spelling(inner)),
            },
        }
    }

    pub fn spell_args(&self, args: &[TemplateArg]) -> String {
        args.iter()
            .map(|arg| match arg {
                TemplateArg::Type(ty) => self.spelling(ty),
                TemplateArg::NonType(value) => value.clone(),
                TemplateArg::Pack(items) => self.spell_args(items),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============================================================
// Declarations
// ============================================================

/// One enclosing scope of a declaration, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Namespace(String),
    Record(String),
}

impl Scope {
    pub fn name(&self) -> &str {
        match self {
            Scope::Namespace(name) | Scope::Record(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub path: PathBuf,
    pub line: u32,
    pub column: u32,
    #[serde(default)]
    pub angled: bool,
}

impl From<&SourceLocation> for DefinitionLocation {
    fn from(location: &SourceLocation) -> Self {
        DefinitionLocation {
            path: location.path.clone(),
            line: location.line,
            column: location.column,
            angled: location.angled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decl {
    pub name: String,
    #[serde(default)]
    pub scope: Vec<Scope>,
    /// `None` when the front end has no valid source information.
    #[serde(default)]
    pub location: Option<SourceLocation>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
    pub kind: DeclKind,
}

impl Decl {
    pub fn qualified_name(&self) -> String {
        let mut segments: Vec<&str> = self.scope.iter().map(Scope::name).collect();
        segments.push(&self.name);
        segments.join(CppNamespace::DELIMITER)
    }

    /// Enclosing namespaces only; record scopes are not part of the namespace.
    pub fn namespace(&self) -> CppNamespace {
        CppNamespace::new(
            self.scope
                .iter()
                .filter_map(|scope| match scope {
                    Scope::Namespace(name) => Some(name.clone()),
                    Scope::Record(_) => None,
                })
                .collect(),
        )
    }

    pub fn is_nested_in_record(&self) -> bool {
        self.scope.iter().any(|scope| matches!(scope, Scope::Record(_)))
    }

    pub fn definition_location(&self) -> DefinitionLocation {
        self.location
            .as_ref()
            .map(DefinitionLocation::from)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Record(RecordDecl),
    Enum(EnumDecl),
    Typedef(TypedefDecl),
    ClassTemplate(ClassTemplateDecl),
    Specialization(SpecializationDecl),
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordTag {
    #[default]
    Struct,
    Class,
    Union,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Public,
    Protected,
    Private,
}

fn complete_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDecl {
    #[serde(default)]
    pub tag: RecordTag,
    #[serde(default = "complete_by_default")]
    pub is_complete: bool,
    /// Pattern of a class template or a member of one.
    #[serde(default)]
    pub is_templated: bool,
    #[serde(default)]
    pub has_default_constructor: bool,
    #[serde(default)]
    pub has_copy_constructor: bool,
    #[serde(default)]
    pub has_copy_assign_operator: bool,
    #[serde(default)]
    pub has_move_constructor: bool,
    #[serde(default)]
    pub has_move_assign_operator: bool,
    #[serde(default)]
    pub bases: Vec<BaseSpecifier>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub friends: Vec<QualType>,
    /// Nested declarations (member typedefs, inner records, ...).
    #[serde(default)]
    pub members: Vec<DeclId>,
}

impl Default for RecordDecl {
    fn default() -> Self {
        Self {
            tag: RecordTag::Struct,
            is_complete: true,
            is_templated: false,
            has_default_constructor: false,
            has_copy_constructor: false,
            has_copy_assign_operator: false,
            has_move_constructor: false,
            has_move_assign_operator: false,
            bases: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            friends: Vec::new(),
            members: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseSpecifier {
    #[serde(rename = "type")]
    pub ty: QualType,
    #[serde(default)]
    pub access: Option<Access>,
    #[serde(default)]
    pub is_virtual: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: QualType,
    #[serde(default)]
    pub access: Option<Access>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDecl {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: QualType,
    #[serde(default)]
    pub has_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub access: Option<Access>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_noexcept: bool,
    /// Compiler-generated (implicit constructors, operators, ...).
    #[serde(default)]
    pub is_implicit: bool,
    #[serde(default)]
    pub location: Option<SourceLocation>,
    #[serde(default)]
    pub comment: Option<String>,
    pub return_type: QualType,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumerator {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDecl {
    #[serde(default = "complete_by_default")]
    pub is_complete: bool,
    #[serde(default)]
    pub scoped: bool,
    /// Integer type; `None` means the implicit `int`.
    #[serde(default)]
    pub underlying: Option<QualType>,
    #[serde(default)]
    pub enumerators: Vec<Enumerator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedefDecl {
    pub underlying: QualType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateParamKind {
    #[default]
    Type,
    NonType,
    Pack,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParam {
    pub name: String,
    #[serde(default)]
    pub kind: TemplateParamKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassTemplateDecl {
    #[serde(default)]
    pub params: Vec<TemplateParam>,
    /// The templated record holding the definition, if this template is defined.
    #[serde(default)]
    pub definition: Option<DeclId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateArg {
    Type(QualType),
    NonType(String),
    Pack(Vec<TemplateArg>),
}

/// Explicit specialization `template <> struct Name<Args> { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecializationDecl {
    pub template: DeclId,
    #[serde(default)]
    pub args: Vec<TemplateArg>,
    #[serde(default)]
    pub record: RecordDecl,
}

// ============================================================
// Types
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualType {
    Builtin(String),
    Record(DeclId),
    Enum(DeclId),
    Typedef(DeclId),
    Specialization {
        template: DeclId,
        #[serde(default)]
        args: Vec<TemplateArg>,
    },
    TemplateParam(String),
    Pointer(Box<QualType>),
    Reference(Box<QualType>),
    Const(Box<QualType>),
    Unknown(String),
}

impl QualType {
    pub fn builtin(name: &str) -> Self {
        QualType::Builtin(name.to_string())
    }

    pub fn pointer_to(inner: QualType) -> Self {
        QualType::Pointer(Box::new(inner))
    }

    pub fn reference_to(inner: QualType) -> Self {
        QualType::Reference(Box::new(inner))
    }

    pub fn constant(inner: QualType) -> Self {
        QualType::Const(Box::new(inner))
    }

    pub fn is_const(&self) -> bool {
        matches!(self, QualType::Const(_))
    }

    /// Drop top-level `const`.
    pub fn unqualified(&self) -> &QualType {
        match self {
            QualType::Const(inner) => inner.unqualified(),
            other => other,
        }
    }

    /// Mentions a template parameter somewhere.
    pub fn is_dependent(&self) -> bool {
        match self {
            QualType::TemplateParam(_) => true,
            QualType::Pointer(inner) | QualType::Reference(inner) | QualType::Const(inner) => {
                inner.is_dependent()
            }
            QualType::Specialization { args, .. } => args.iter().any(TemplateArg::is_dependent),
            _ => false,
        }
    }
}

impl TemplateArg {
    pub fn is_dependent(&self) -> bool {
        match self {
            TemplateArg::Type(ty) => ty.is_dependent(),
            TemplateArg::NonType(_) => false,
            TemplateArg::Pack(items) => items.iter().any(TemplateArg::is_dependent),
        }
    }
}
