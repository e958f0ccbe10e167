use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Result of walking the source corpus.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Matching files, sorted.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

fn compile_globs(field: &str, patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| {
                Error::config(format!("invalid glob pattern in '{}': \"{}\": {}", field, p, e))
            })
        })
        .collect()
}

/// Collect every file under `root` whose root-relative path matches one of
/// `includes` and none of `ignores`.
///
/// Entries that cannot be accessed are counted and skipped.
pub fn scan_files(root: &Path, includes: &[String], ignores: &[String]) -> Result<ScanResult> {
    if !root.is_dir() {
        return Err(Error::config(format!(
            "source root '{}' does not exist.\n\
             Hint: check the 'sourceRoot' setting in your config file.",
            root.display()
        )));
    }

    let include_patterns = compile_globs("includes", includes)?;
    let ignore_patterns = compile_globs("ignores", ignores)?;

    let mut result = ScanResult::default();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped_count += 1;
                warn!("cannot access path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);

        if ignore_patterns.iter().any(|p| p.matches_path(relative)) {
            continue;
        }
        if include_patterns.iter().any(|p| p.matches_path(relative)) {
            result.files.push(path.to_path_buf());
        }
    }

    result.files.sort();
    debug!(
        root = %root.display(),
        files = result.files.len(),
        skipped = result.skipped_count,
        "scanned source corpus"
    );
    Ok(result)
}
