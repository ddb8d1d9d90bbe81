//! Issues reported by an analysis run.
//!
//! Issues come from three places: front-end diagnostics, front-end failures
//! for a whole file, and the session-wide environment probe.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Source used for issues that do not belong to any input file.
pub const GLOBAL_SCOPE_SOURCE: &str = "<global>";

/// Severity level of an issue. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub severity: Severity,
    pub source_file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl Issue {
    pub fn new(
        severity: Severity,
        source_file: impl Into<String>,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            source_file: source_file.into(),
            line,
            column,
            message: message.into(),
        }
    }

    /// File-level error without a position.
    pub fn file_error(source_file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, source_file, 0, 0, message)
    }

    /// Session-wide error.
    pub fn global_error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, GLOBAL_SCOPE_SOURCE, 0, 0, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(
                f,
                "{}:{}:{}: {}: {}",
                self.source_file, self.line, self.column, self.severity, self.message
            )
        } else {
            write!(f, "{}: {}: {}", self.source_file, self.severity, self.message)
        }
    }
}

/// True when no issue is an error or worse.
pub fn is_success(issues: &[Issue]) -> bool {
    !issues.iter().any(Issue::is_error)
}
