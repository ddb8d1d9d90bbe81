//! One extraction pass over one translation unit.

use super::router::{Route, route};
use super::{Adopter, AliasExtractor, ClassExtractor, EnumExtractor, ExtractContext};
use crate::config::CompilerConfig;
use crate::core::frontend::TranslationUnit;
use crate::core::model::TypeRecord;
use crate::issues::Issue;

/// What one file contributed: its records in document order and the front
/// end's diagnostics.
#[derive(Debug, Default)]
pub struct FileAnalysis {
    pub records: Vec<TypeRecord>,
    pub issues: Vec<Issue>,
}

/// Fresh per file; holds nothing shared with other files.
pub struct ExtractionSession<'a> {
    ctx: ExtractContext<'a>,
}

impl<'a> ExtractionSession<'a> {
    pub fn new(tu: &'a TranslationUnit, config: &CompilerConfig) -> Self {
        Self {
            ctx: ExtractContext::new(tu, config),
        }
    }

    pub fn run(self) -> FileAnalysis {
        let tu = self.ctx.tu;
        let mut analysis = FileAnalysis {
            records: Vec::new(),
            issues: self.diagnostics(),
        };

        for (_, decl) in tu.iter() {
            let record = match route(tu, decl) {
                Route::Class { decl, record } => {
                    ClassExtractor::new(self.ctx).extract(decl, record, false)
                }
                Route::Adopt { subject, directive } => {
                    Adopter::new(self.ctx, &directive).adopt(subject)
                }
                Route::Enum { decl, enumeration } => {
                    EnumExtractor::new(self.ctx).extract(decl, enumeration, false)
                }
                Route::Alias { decl, typedef } => {
                    AliasExtractor::new(self.ctx).extract(decl, typedef)
                }
                Route::Skip => None,
            };
            analysis.records.extend(record);
        }

        analysis
    }

    fn diagnostics(&self) -> Vec<Issue> {
        let main_file = self.ctx.tu.main_file.display().to_string();
        self.ctx
            .tu
            .diagnostics
            .iter()
            .map(|diagnostic| {
                let file = if diagnostic.file.is_empty() {
                    main_file.clone()
                } else {
                    diagnostic.file.clone()
                };
                Issue::new(
                    diagnostic.severity,
                    file,
                    diagnostic.line,
                    diagnostic.column,
                    diagnostic.message.clone(),
                )
            })
            .collect()
    }
}
