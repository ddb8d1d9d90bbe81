//! Discovery of declaration dumps under a source root.

use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::config::CONFIG_FILE_NAME;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Matching files, sorted. The order is the input order of the run.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Find files under `root` whose relative path matches one of `includes` and
/// none of `ignores`. The project config file is never included.
pub fn scan_dumps(root: &Path, includes: &[String], ignores: &[String], verbose: bool) -> ScanResult {
    let include_patterns = compile(includes, "include", verbose);

    let mut literal_ignores: Vec<PathBuf> = Vec::new();
    let mut ignore_patterns: Vec<Pattern> = Vec::new();
    for ignore in ignores {
        if is_glob_pattern(ignore) {
            ignore_patterns.extend(compile(std::slice::from_ref(ignore), "ignore", verbose));
        } else {
            literal_ignores.push(PathBuf::from(ignore));
        }
    }

    let mut result = ScanResult::default();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                result.skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), err);
                }
                continue;
            }
        };

        if !entry.file_type().is_file() || entry.file_name() == CONFIG_FILE_NAME {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };

        if literal_ignores.iter().any(|ignore| relative.starts_with(ignore)) {
            continue;
        }
        if ignore_patterns.iter().any(|p| p.matches_path(relative)) {
            continue;
        }
        if include_patterns.iter().any(|p| p.matches_path(relative)) {
            result.files.push(path.to_path_buf());
        }
    }

    result.files.sort();
    result
}

fn compile(patterns: &[String], what: &str, verbose: bool) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|pattern| match Pattern::new(pattern) {
            Ok(compiled) => Some(compiled),
            Err(err) => {
                if verbose {
                    eprintln!(
                        "{} Invalid {} pattern '{}': {}",
                        "warning:".bold().yellow(),
                        what,
                        pattern,
                        err
                    );
                }
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn names(result: &ScanResult, root: &Path) -> Vec<String> {
        result
            .files
            .iter()
            .map(|path| {
                path.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    fn all_json() -> Vec<String> {
        vec!["**/*.json".to_string()]
    }

    #[test]
    fn test_scan_json_dumps_sorted() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::create_dir(root.join("engine")).unwrap();
        File::create(root.join("engine/math.json")).unwrap();
        File::create(root.join("b.json")).unwrap();
        File::create(root.join("a.json")).unwrap();
        File::create(root.join("notes.txt")).unwrap();

        let result = scan_dumps(root, &all_json(), &[], false);

        assert_eq!(names(&result, root), vec!["a.json", "b.json", "engine/math.json"]);
        assert_eq!(result.skipped_count, 0);
    }

    #[test]
    fn test_scan_skips_config_file() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        File::create(root.join(CONFIG_FILE_NAME)).unwrap();
        File::create(root.join("types.json")).unwrap();

        let result = scan_dumps(root, &all_json(), &[], false);

        assert_eq!(names(&result, root), vec!["types.json"]);
    }

    #[test]
    fn test_scan_ignores() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("build/gen")).unwrap();
        fs::create_dir(root.join("vendor")).unwrap();
        File::create(root.join("build/gen/out.json")).unwrap();
        File::create(root.join("vendor/lib.json")).unwrap();
        File::create(root.join("app.json")).unwrap();

        let result = scan_dumps(
            root,
            &all_json(),
            &["build/**".to_string(), "vendor".to_string()],
            false,
        );

        assert_eq!(names(&result, root), vec!["app.json"]);
    }

    #[test]
    fn test_scan_with_includes() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::create_dir(root.join("dumps")).unwrap();
        File::create(root.join("dumps/a.json")).unwrap();
        File::create(root.join("package.json")).unwrap();

        let result = scan_dumps(root, &["dumps/*.json".to_string()], &[], false);

        assert_eq!(names(&result, root), vec!["dumps/a.json"]);
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        File::create(root.join("a.json")).unwrap();

        let result = scan_dumps(root, &["[".to_string(), "*.json".to_string()], &[], false);

        assert_eq!(names(&result, root), vec!["a.json"]);
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("**/*.json"));
        assert!(is_glob_pattern("a?.json"));
        assert!(!is_glob_pattern("vendor"));
    }
}
