use std::{
    fmt, fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    thread,
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".cppreflectrc.json";

// ============================================================
// Compiler configuration
// ============================================================

/// C++ language standard passed to the front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CxxStandard {
    #[default]
    Cxx11,
    Cxx14,
    Cxx17,
    Cxx20,
    Cxx23,
    Cxx26,
}

impl CxxStandard {
    pub const ALL: [CxxStandard; 6] = [
        CxxStandard::Cxx11,
        CxxStandard::Cxx14,
        CxxStandard::Cxx17,
        CxxStandard::Cxx20,
        CxxStandard::Cxx23,
        CxxStandard::Cxx26,
    ];

    pub fn year(self) -> u8 {
        match self {
            CxxStandard::Cxx11 => 11,
            CxxStandard::Cxx14 => 14,
            CxxStandard::Cxx17 => 17,
            CxxStandard::Cxx20 => 20,
            CxxStandard::Cxx23 => 23,
            CxxStandard::Cxx26 => 26,
        }
    }

    /// Front-end flag, e.g. `-std=c++17`.
    pub fn as_flag(self) -> String {
        format!("-std=c++{}", self.year())
    }
}

impl TryFrom<u8> for CxxStandard {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|standard| standard.year() == value)
            .ok_or_else(|| {
                format!(
                    "unsupported C++ standard {} (expected one of 11, 14, 17, 20, 23, 26)",
                    value
                )
            })
    }
}

impl From<CxxStandard> for u8 {
    fn from(standard: CxxStandard) -> Self {
        standard.year()
    }
}

impl fmt::Display for CxxStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C++{}", self.year())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludeKind {
    #[default]
    Project,
    System,
    CSystem,
    Sysroot,
    ThirdParty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeInfo {
    pub path: PathBuf,
    #[serde(default)]
    pub kind: IncludeKind,
}

impl IncludeInfo {
    pub fn new(path: impl Into<PathBuf>, kind: IncludeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Per-file front-end configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerConfig {
    #[serde(default)]
    pub cpp_standard: CxxStandard,
    #[serde(default)]
    pub includes: Vec<IncludeInfo>,
    /// Macro definitions (`NAME` or `NAME=VALUE`).
    #[serde(default)]
    pub definitions: Vec<String>,
    /// Raw extra front-end flags.
    #[serde(default)]
    pub compiler_args: Vec<String>,
    /// Ignore the `runtime` tag and collect every eligible declaration.
    #[serde(default)]
    pub collect_non_runtime: bool,
}

impl CompilerConfig {
    /// Flags in the order a clang-like front end expects them.
    pub fn front_end_flags(&self) -> Vec<String> {
        let mut flags = vec![self.cpp_standard.as_flag()];
        for include in &self.includes {
            let switch = match include.kind {
                IncludeKind::Project | IncludeKind::ThirdParty => "-I",
                IncludeKind::System => "-isystem",
                IncludeKind::CSystem => "-idirafter",
                IncludeKind::Sysroot => "--sysroot=",
            };
            flags.push(format!("{}{}", switch, include.path.display()));
        }
        flags.extend(self.definitions.iter().map(|definition| format!("-D{}", definition)));
        flags.extend(self.compiler_args.iter().cloned());
        flags
    }
}

// ============================================================
// Project configuration
// ============================================================

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Glob patterns selecting declaration dumps, relative to the source root.
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Worker count; available parallelism when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    #[serde(default)]
    pub compiler: CompilerConfig,
}

fn default_includes() -> Vec<String> {
    vec!["**/*.json".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: Vec::new(),
            workers: None,
            compiler: CompilerConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns or a zero worker count.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for pattern in &self.includes {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'includes': \"{}\"", pattern))?;
        }

        if self.workers == Some(0) {
            bail!("'workers' must be at least 1");
        }

        Ok(())
    }

    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(default_worker_count)
    }
}

pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
