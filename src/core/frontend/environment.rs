//! Compiler environment: system include paths and target description.
//!
//! Probing a host toolchain is left to implementors of [`EnvironmentProbe`].
//! Callers that already know their environment use [`FixedEnvironment`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CompilerConfig;

/// Why the compiler environment could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("PATH is not set")]
    NoPath,
    #[error("no front end found on PATH")]
    NoFrontEnd,
    #[error("malformed probe output: {0}")]
    MalformedOutput(String),
    #[error("no system include directories found")]
    NoSystemIncludes,
    #[error("unsupported host: {0}")]
    UnsupportedHost(String),
}

/// What a probe discovered about the host toolchain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerEnvironment {
    /// System include paths and flags the toolchain adds implicitly.
    pub config: CompilerConfig,
    #[serde(default)]
    pub triple: String,
    #[serde(default)]
    pub version: String,
}

pub trait EnvironmentProbe: Send + Sync {
    fn probe(&self) -> Result<CompilerEnvironment, EnvError>;
}

/// Probe that always answers with a caller-supplied environment.
#[derive(Debug, Clone)]
pub struct FixedEnvironment(CompilerEnvironment);

impl FixedEnvironment {
    pub fn new(environment: CompilerEnvironment) -> Self {
        Self(environment)
    }
}

impl EnvironmentProbe for FixedEnvironment {
    fn probe(&self) -> Result<CompilerEnvironment, EnvError> {
        Ok(self.0.clone())
    }
}
