//! Identity of a type: who it is and where it was defined.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Discriminant of a [`TypeRecord`](super::TypeRecord) or an identity snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Trivial,
    Enum,
    StructOrClass,
    Alias,
    /// Only produced for identity snapshots of specialization uses (e.g. `std::vector<int>`).
    TemplateSpecialization,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Trivial => write!(f, "trivial"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::StructOrClass => write!(f, "struct-or-class"),
            TypeKind::Alias => write!(f, "alias"),
            TypeKind::TemplateSpecialization => write!(f, "template-specialization"),
        }
    }
}

/// Where a declaration lives.
///
/// `angled` marks locations that should be included as `<path>` (system headers,
/// or locations overridden through `OverrideLocation[...]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefinitionLocation {
    pub path: PathBuf,
    pub line: u32,
    pub column: u32,
    #[serde(default)]
    pub angled: bool,
}

impl DefinitionLocation {
    pub fn new(path: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
            angled: false,
        }
    }

    /// A system-style location with no line information.
    pub fn angled(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            line: 0,
            column: 0,
            angled: true,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}

impl fmt::Display for DefinitionLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.angled {
            write!(f, "<{}>", self.path.display())
        } else {
            write!(f, "{}:{}:{}", self.path.display(), self.line, self.column)
        }
    }
}

/// Ordered namespace path, outermost segment first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CppNamespace(Vec<String>);

impl CppNamespace {
    pub const DELIMITER: &'static str = "::";

    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Parse `a::b::c`. Empty segments are dropped.
    pub fn parse(text: &str) -> Self {
        Self(
            text.split(Self::DELIMITER)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    pub fn prepend(&mut self, segment: impl Into<String>) {
        self.0.insert(0, segment.into());
    }

    /// Prefix `name` with this namespace (`ns::name`), or return it untouched at global scope.
    pub fn qualify(&self, name: &str) -> String {
        if self.is_empty() {
            name.to_string()
        } else {
            format!("{}{}{}", self, Self::DELIMITER, name)
        }
    }
}

impl fmt::Display for CppNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(Self::DELIMITER))
    }
}

/// Name, qualified ("pretty") name, namespace and location of a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeIdentity {
    pub name: String,
    pub pretty_name: String,
    pub namespace: CppNamespace,
    pub location: DefinitionLocation,
}

impl TypeIdentity {
    pub fn new(
        name: impl Into<String>,
        namespace: CppNamespace,
        location: DefinitionLocation,
    ) -> Self {
        let name = name.into();
        Self {
            pretty_name: namespace.qualify(&name),
            name,
            namespace,
            location,
        }
    }

    /// Identity of a builtin scalar: no namespace, no location.
    pub fn builtin(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            pretty_name: name.clone(),
            name,
            namespace: CppNamespace::default(),
            location: DefinitionLocation::default(),
        }
    }
}

/// Snapshot of a type's identity together with its kind.
///
/// Cached on type uses (statements, parents, friends) so consumers can inspect
/// the referenced type without a registry lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBaseInfo {
    pub kind: TypeKind,
    #[serde(flatten)]
    pub identity: TypeIdentity,
}

impl TypeBaseInfo {
    pub fn new(kind: TypeKind, identity: TypeIdentity) -> Self {
        Self { kind, identity }
    }

    pub fn pretty_name(&self) -> &str {
        &self.identity.pretty_name
    }
}
