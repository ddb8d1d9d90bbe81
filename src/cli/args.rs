//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `analyze`: Extract the reflection model from declaration dumps
//! - `init`: Initialize cppreflect configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::config::CxxStandard;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Analyze(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source root directory searched for declaration dumps and the config file
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    /// Declaration dumps to analyze (default: files matching the config `includes`)
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of worker threads (overrides config file)
    #[arg(long, env = "CPPREFLECT_WORKERS")]
    pub workers: Option<usize>,

    /// C++ standard: 11, 14, 17, 20, 23 or 26 (overrides config file)
    #[arg(long = "std", value_parser = parse_standard)]
    pub standard: Option<CxxStandard>,

    /// Collect every complete declaration, not only `@runtime` ones
    #[arg(long)]
    pub collect_all: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

fn parse_standard(value: &str) -> Result<CxxStandard, String> {
    let year: u8 = value
        .parse()
        .map_err(|_| format!("'{}' is not a C++ standard year", value))?;
    CxxStandard::try_from(year)
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract reflection types from C++ declaration dumps
    Analyze(AnalyzeCommand),
    /// Initialize a new .cppreflectrc.json configuration file
    Init,
}
