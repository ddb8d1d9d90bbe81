//! Report formatting and printing.
//!
//! Kept apart from the engine so cppreflect can be used as a library.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;

use crate::core::AnalysisOutcome;
use crate::core::model::TypeRecord;
use crate::issues::{Issue, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print the text report to stdout.
pub fn print(outcome: &AnalysisOutcome, input_count: usize) {
    print_to(outcome, input_count, &mut io::stdout().lock());
}

/// Print the text report to a custom writer.
///
/// One line per extracted type, then issues in cargo style, then a summary.
pub fn print_to<W: Write>(outcome: &AnalysisOutcome, input_count: usize, writer: &mut W) {
    let kind_width = outcome
        .types()
        .iter()
        .map(|record| record.kind().to_string().len())
        .max()
        .unwrap_or(0);

    for record in outcome.types() {
        print_type(record, kind_width, writer);
    }

    if !outcome.types().is_empty() && (!outcome.issues().is_empty() || outcome.resolve_error.is_some())
    {
        let _ = writeln!(writer);
    }

    for issue in outcome.issues() {
        print_issue(issue, writer);
    }

    if let Some(err) = &outcome.resolve_error {
        let _ = writeln!(writer, "{}: {}", "error".bold().red(), err);
    }

    print_summary(outcome, input_count, writer);
}

/// Print the JSON document `{types, issues, resolveError}` to stdout.
pub fn print_json(outcome: &AnalysisOutcome) -> Result<()> {
    print_json_to(outcome, &mut io::stdout().lock())
}

pub fn print_json_to<W: Write>(outcome: &AnalysisOutcome, writer: &mut W) -> Result<()> {
    let document = json!({
        "types": outcome.types(),
        "issues": outcome.issues(),
        "resolveError": outcome.resolve_error.as_ref().map(ToString::to_string),
    });

    serde_json::to_writer_pretty(&mut *writer, &document).context("Failed to write JSON report")?;
    writeln!(writer).context("Failed to write JSON report")?;
    Ok(())
}

// ============================================================
// Internal Functions
// ============================================================

fn print_type<W: Write>(record: &TypeRecord, kind_width: usize, writer: &mut W) {
    let kind = format!("{:<width$}", record.kind().to_string(), width = kind_width);
    let location = &record.identity.location;

    if location.is_unknown() {
        let _ = writeln!(writer, "{}  {}", kind.cyan(), record.pretty_name().bold());
    } else {
        let _ = writeln!(
            writer,
            "{}  {}  {}",
            kind.cyan(),
            record.pretty_name().bold(),
            location.to_string().dimmed()
        );
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity = match issue.severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
        Severity::Info => "info".bold().blue(),
    };
    let _ = writeln!(writer, "{}: {}", severity, issue.message);

    let location = if issue.line > 0 {
        format!("{}:{}:{}", issue.source_file, issue.line, issue.column)
    } else {
        issue.source_file.clone()
    };
    let _ = writeln!(writer, "  {} {}", "-->".blue(), location);
}

fn print_summary<W: Write>(outcome: &AnalysisOutcome, input_count: usize, writer: &mut W) {
    let extracted = format!(
        "Extracted {} {} from {} {}",
        outcome.types().len(),
        plural(outcome.types().len(), "type", "types"),
        input_count,
        plural(input_count, "file", "files"),
    );

    if outcome.is_success() {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), extracted.green());
        return;
    }

    let errors = outcome.issues().iter().filter(|issue| issue.is_error()).count()
        + usize::from(outcome.resolve_error.is_some());
    let _ = writeln!(
        writer,
        "{} {}",
        FAILURE_MARK.red(),
        format!("{}, {} {}", extracted, errors, plural(errors, "error", "errors")).red()
    );
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
