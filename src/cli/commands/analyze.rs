use std::path::{Path, PathBuf};

use anyhow::Result;

use super::super::args::{AnalyzeCommand, OutputFormat};
use super::super::exit_status::ExitStatus;
use super::super::report;
use crate::config::{CONFIG_FILE_NAME, Config, ConfigLoadResult, load_config};
use crate::core::frontend::{JsonFrontEnd, SourceInput};
use crate::core::scan::scan_dumps;
use crate::core::{AnalysisOptions, AnalysisOrchestrator};

pub fn analyze(cmd: AnalyzeCommand) -> Result<ExitStatus> {
    let verbose = cmd.common.verbose;
    let source_root = cmd
        .common
        .source_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let ConfigLoadResult {
        mut config,
        from_file,
    } = load_config(&source_root)?;
    if verbose && !from_file {
        eprintln!("Note: no {} found, using defaults", CONFIG_FILE_NAME);
    }

    apply_overrides(&mut config, &cmd);
    config.validate()?;

    let inputs = discover_inputs(&source_root, &config, &cmd.paths, verbose);
    let input_count = inputs.len();
    let sources = inputs.into_iter().map(SourceInput::file).collect();

    let orchestrator = AnalysisOrchestrator::new(
        JsonFrontEnd::new(),
        AnalysisOptions {
            workers: config.worker_count(),
            verbose,
        },
    );
    let outcome = orchestrator.analyze(sources, &config.compiler)?;

    match cmd.format {
        OutputFormat::Text => report::print(&outcome, input_count),
        OutputFormat::Json => report::print_json(&outcome)?,
    }

    if outcome.is_success() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}

/// CLI values win over the config file.
fn apply_overrides(config: &mut Config, cmd: &AnalyzeCommand) {
    if let Some(workers) = cmd.workers {
        config.workers = Some(workers);
    }
    if let Some(standard) = cmd.standard {
        config.compiler.cpp_standard = standard;
    }
    if cmd.collect_all {
        config.compiler.collect_non_runtime = true;
    }
}

/// Explicit paths as given, otherwise every dump the config selects.
fn discover_inputs(
    source_root: &Path,
    config: &Config,
    paths: &[PathBuf],
    verbose: bool,
) -> Vec<PathBuf> {
    if !paths.is_empty() {
        return paths.to_vec();
    }

    let scan = scan_dumps(source_root, &config.includes, &config.ignores, verbose);
    if scan.skipped_count > 0 && !verbose {
        eprintln!(
            "Warning: {} path(s) could not be accessed (use -v for details)",
            scan.skipped_count
        );
    }
    scan.files
}
