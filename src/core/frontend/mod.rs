//! Boundary to the C++ front end.
//!
//! - `ast`: the declaration stream (`TranslationUnit`, `Decl`, `QualType`)
//! - `json`: front end reading JSON declaration dumps
//! - `environment`: compiler environment and its probe

pub mod ast;
pub mod environment;
pub mod json;
#[cfg(test)]
pub mod test_builder;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::CompilerConfig;

pub use ast::*;
pub use environment::{CompilerEnvironment, EnvError, EnvironmentProbe, FixedEnvironment};
pub use json::JsonFrontEnd;

/// One unit of input: a file on disk or an in-memory buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    File(PathBuf),
    Buffer { name: String, contents: String },
}

impl SourceInput {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SourceInput::File(path.into())
    }

    pub fn buffer(name: impl Into<String>, contents: impl Into<String>) -> Self {
        SourceInput::Buffer {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Name used when reporting issues for this input.
    pub fn display_name(&self) -> String {
        match self {
            SourceInput::File(path) => path.display().to_string(),
            SourceInput::Buffer { name, .. } => name.clone(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SourceInput::File(path) => Some(path),
            SourceInput::Buffer { .. } => None,
        }
    }
}

impl fmt::Display for SourceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Error)]
pub enum FrontEndError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed declaration dump {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid declaration reference {id} in {context} ({path})")]
    InvalidReference {
        path: String,
        id: DeclId,
        context: String,
    },
}

/// Turns one input into a declaration stream.
///
/// Implementors are shared between workers; each call parses one input and
/// keeps no state between calls.
pub trait FrontEnd: Send + Sync {
    fn parse(
        &self,
        source: &SourceInput,
        config: &CompilerConfig,
        environment: Option<&CompilerEnvironment>,
    ) -> Result<TranslationUnit, FrontEndError>;
}
