//! Front end reading JSON declaration dumps.
//!
//! A dump is the serde form of [`TranslationUnit`], typically written by a
//! compiler plugin. Every `DeclId` is checked before the unit is handed out,
//! so extraction can follow references without re-validating them.

use std::fs;

use super::{
    CompilerEnvironment, DeclId, DeclKind, FrontEnd, FrontEndError, QualType, RecordDecl,
    SourceInput, TemplateArg, TranslationUnit,
};
use crate::config::CompilerConfig;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFrontEnd;

impl JsonFrontEnd {
    pub fn new() -> Self {
        Self
    }

    /// Parse dump text. `name` is used for error messages and as the default main file.
    pub fn parse_str(&self, name: &str, contents: &str) -> Result<TranslationUnit, FrontEndError> {
        let mut unit: TranslationUnit =
            serde_json::from_str(contents).map_err(|source| FrontEndError::Malformed {
                path: name.to_string(),
                source,
            })?;

        if unit.main_file.as_os_str().is_empty() {
            unit.main_file = name.into();
        }

        validate(name, &unit)?;
        Ok(unit)
    }
}

impl FrontEnd for JsonFrontEnd {
    fn parse(
        &self,
        source: &SourceInput,
        _config: &CompilerConfig,
        _environment: Option<&CompilerEnvironment>,
    ) -> Result<TranslationUnit, FrontEndError> {
        match source {
            SourceInput::File(path) => {
                let contents = fs::read_to_string(path).map_err(|source| FrontEndError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                self.parse_str(&path.display().to_string(), &contents)
            }
            SourceInput::Buffer { name, contents } => self.parse_str(name, contents),
        }
    }
}

// ============================================================
// Validation
// ============================================================

#[derive(Clone, Copy)]
enum Expected {
    Any,
    Record,
    Enum,
    Typedef,
    ClassTemplate,
}

impl Expected {
    fn accepts(self, kind: &DeclKind) -> bool {
        match self {
            Expected::Any => true,
            Expected::Record => matches!(kind, DeclKind::Record(_) | DeclKind::Specialization(_)),
            Expected::Enum => matches!(kind, DeclKind::Enum(_)),
            Expected::Typedef => matches!(kind, DeclKind::Typedef(_)),
            Expected::ClassTemplate => matches!(kind, DeclKind::ClassTemplate(_)),
        }
    }
}

struct Validator<'a> {
    path: &'a str,
    unit: &'a TranslationUnit,
}

impl Validator<'_> {
    fn check(&self, id: DeclId, expected: Expected, context: &str) -> Result<(), FrontEndError> {
        match self.unit.decl(id) {
            Some(decl) if expected.accepts(&decl.kind) => Ok(()),
            _ => Err(FrontEndError::InvalidReference {
                path: self.path.to_string(),
                id,
                context: context.to_string(),
            }),
        }
    }

    fn check_type(&self, ty: &QualType, context: &str) -> Result<(), FrontEndError> {
        match ty {
            QualType::Record(id) => self.check(*id, Expected::Record, context),
            QualType::Enum(id) => self.check(*id, Expected::Enum, context),
            QualType::Typedef(id) => self.check(*id, Expected::Typedef, context),
            QualType::Specialization { template, args } => {
                self.check(*template, Expected::ClassTemplate, context)?;
                self.check_args(args, context)
            }
            QualType::Pointer(inner) | QualType::Reference(inner) | QualType::Const(inner) => {
                self.check_type(inner, context)
            }
            QualType::Builtin(_) | QualType::TemplateParam(_) | QualType::Unknown(_) => Ok(()),
        }
    }

    fn check_args(&self, args: &[TemplateArg], context: &str) -> Result<(), FrontEndError> {
        for arg in args {
            match arg {
                TemplateArg::Type(ty) => self.check_type(ty, context)?,
                TemplateArg::NonType(_) => {}
                TemplateArg::Pack(items) => self.check_args(items, context)?,
            }
        }
        Ok(())
    }

    fn check_record(&self, record: &RecordDecl, owner: &str) -> Result<(), FrontEndError> {
        for base in &record.bases {
            self.check_type(&base.ty, &format!("base of '{}'", owner))?;
        }
        for field in &record.fields {
            self.check_type(&field.ty, &format!("field '{}::{}'", owner, field.name))?;
        }
        for method in &record.methods {
            let context = format!("method '{}::{}'", owner, method.name);
            self.check_type(&method.return_type, &context)?;
            for param in &method.params {
                self.check_type(&param.ty, &context)?;
            }
        }
        for friend in &record.friends {
            self.check_type(friend, &format!("friend of '{}'", owner))?;
        }
        for member in &record.members {
            self.check(*member, Expected::Any, &format!("member of '{}'", owner))?;
        }
        Ok(())
    }
}

fn validate(path: &str, unit: &TranslationUnit) -> Result<(), FrontEndError> {
    let validator = Validator { path, unit };

    for (_, decl) in unit.iter() {
        let owner = decl.qualified_name();
        match &decl.kind {
            DeclKind::Record(record) => validator.check_record(record, &owner)?,
            DeclKind::Enum(enumeration) => {
                if let Some(underlying) = &enumeration.underlying {
                    validator.check_type(underlying, &format!("underlying type of '{}'", owner))?;
                }
            }
            DeclKind::Typedef(typedef) => {
                validator.check_type(&typedef.underlying, &format!("typedef '{}'", owner))?
            }
            DeclKind::ClassTemplate(template) => {
                if let Some(definition) = template.definition {
                    validator.check(
                        definition,
                        Expected::Record,
                        &format!("definition of '{}'", owner),
                    )?;
                }
            }
            DeclKind::Specialization(specialization) => {
                let context = format!("specialization '{}'", owner);
                validator.check(specialization.template, Expected::ClassTemplate, &context)?;
                validator.check_args(&specialization.args, &context)?;
                validator.check_record(&specialization.record, &owner)?;
            }
            DeclKind::Other => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID: &str = r#"{
        "mainFile": "math.h",
        "decls": [
            {
                "name": "V2",
                "scope": [{"namespace": "engine"}],
                "location": {"path": "math.h", "line": 2, "column": 8},
                "comment": "/// @runtime",
                "kind": {"record": {
                    "fields": [{"name": "x", "type": {"builtin": "float"}, "access": "public"}]
                }}
            },
            {
                "name": "Vec2",
                "kind": {"typedef": {"underlying": {"record": 0}}}
            }
        ],
        "diagnostics": [
            {"severity": "warning", "file": "math.h", "line": 9, "column": 1, "message": "unused"}
        ]
    }"#;

    #[test]
    fn test_parse_buffer() {
        let unit = JsonFrontEnd::new()
            .parse(
                &SourceInput::buffer("math.json", VALID),
                &CompilerConfig::default(),
                None,
            )
            .unwrap();

        assert_eq!(unit.decls.len(), 2);
        assert_eq!(unit.main_file.to_str(), Some("math.h"));
        assert_eq!(unit.diagnostics.len(), 1);
        assert_eq!(unit.qualified_name(DeclId(0)).unwrap(), "engine::V2");
    }

    #[test]
    fn test_parse_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        let unit = JsonFrontEnd::new()
            .parse(
                &SourceInput::file(file.path()),
                &CompilerConfig::default(),
                None,
            )
            .unwrap();
        assert_eq!(unit.decls.len(), 2);
    }

    #[test]
    fn test_main_file_defaults_to_input_name() {
        let unit = JsonFrontEnd::new().parse_str("empty.json", "{}").unwrap();
        assert_eq!(unit.main_file.to_str(), Some("empty.json"));
        assert!(unit.decls.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = JsonFrontEnd::new()
            .parse_str("broken.json", "{ not json")
            .unwrap_err();
        assert!(matches!(err, FrontEndError::Malformed { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_missing_file() {
        let err = JsonFrontEnd::new()
            .parse(
                &SourceInput::file("/definitely/not/here.json"),
                &CompilerConfig::default(),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, FrontEndError::Io { .. }));
    }

    #[test]
    fn test_dangling_reference() {
        let json = r#"{"decls": [
            {"name": "Alias", "kind": {"typedef": {"underlying": {"record": 7}}}}
        ]}"#;
        let err = JsonFrontEnd::new().parse_str("bad.json", json).unwrap_err();

        let FrontEndError::InvalidReference { id, context, .. } = err else {
            panic!("expected invalid reference");
        };
        assert_eq!(id, DeclId(7));
        assert_eq!(context, "typedef 'Alias'");
    }

    #[test]
    fn test_reference_to_wrong_kind() {
        let json = r#"{"decls": [
            {"name": "E", "kind": {"enum": {}}},
            {"name": "Alias", "kind": {"typedef": {"underlying": {"record": 0}}}}
        ]}"#;
        let err = JsonFrontEnd::new().parse_str("bad.json", json).unwrap_err();
        assert!(matches!(err, FrontEndError::InvalidReference { .. }));
    }
}
