//! Source key extraction.
//!
//! Walks the source corpus and collects every literal translation key it
//! references, under a pluggable list of reference syntaxes.
//!
//! Keys built at runtime (`t('Errors.' + code)`, `` t(`x.${y}`) ``) are not
//! literals and cannot be seen here. Branches reached only that way must be
//! protected with `keepPrefixes` in the config.
//!
//! - `patterns`: reference syntaxes and the built-in defaults
//! - `scanner`: corpus file discovery

pub mod patterns;
pub mod scanner;

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use tracing::{debug, warn};

pub use patterns::{CompiledPattern, ReferencePattern, compile_all, default_patterns};
pub use scanner::{ScanResult, scan_files};

use crate::{
    catalog::KeyPath,
    error::{Error, Result},
};

/// Every key path the corpus provably references, closed under ancestors:
/// inserting `A.B.C` also inserts `A.B` and `A`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    keys: HashSet<KeyPath>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key and all of its ancestors.
    pub fn insert(&mut self, key: KeyPath) {
        for ancestor in key.ancestors() {
            self.keys.insert(ancestor);
        }
        self.keys.insert(key);
    }

    pub fn contains(&self, key: &KeyPath) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in canonical order, for stable output.
    pub fn sorted(&self) -> Vec<&KeyPath> {
        let mut keys: Vec<&KeyPath> = self.keys.iter().collect();
        keys.sort();
        keys
    }

    pub fn extend(&mut self, other: ReferenceSet) {
        self.keys.extend(other.keys);
    }
}

impl FromIterator<KeyPath> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = KeyPath>>(iter: I) -> Self {
        let mut set = Self::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// A corpus file that could not be read. The scan continues without it.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: Error,
}

#[derive(Debug, Default)]
pub struct ExtractResult {
    pub references: ReferenceSet,
    pub files_scanned: usize,
    pub skipped: Vec<SkippedFile>,
}

/// Apply every pattern to one file's text.
pub fn extract_from_text(text: &str, patterns: &[CompiledPattern]) -> ReferenceSet {
    patterns.iter().flat_map(|p| p.keys(text)).collect()
}

fn extract_from_file(path: &Path, patterns: &[CompiledPattern]) -> Result<ReferenceSet> {
    let text = fs::read_to_string(path).map_err(|e| Error::io_read(path, e))?;
    let references = extract_from_text(&text, patterns);
    debug!(path = %path.display(), keys = references.len(), "extracted references");
    Ok(references)
}

/// Extract references from every file.
///
/// Files are read and matched in parallel. Per-file sets are merged into
/// the result only after all files are done.
pub fn extract_references(files: &[PathBuf], patterns: &[CompiledPattern]) -> ExtractResult {
    let per_file: Vec<(&PathBuf, Result<ReferenceSet>)> = files
        .par_iter()
        .map(|path| (path, extract_from_file(path, patterns)))
        .collect();

    let mut result = ExtractResult::default();
    for (path, outcome) in per_file {
        match outcome {
            Ok(references) => {
                result.files_scanned += 1;
                result.references.extend(references);
            }
            Err(error) => {
                warn!("skipping unreadable file: {}", error);
                result.skipped.push(SkippedFile {
                    path: path.clone(),
                    error,
                });
            }
        }
    }
    result
}

/// Scan the corpus under `root` and extract its references.
pub fn extract_corpus(
    root: &Path,
    includes: &[String],
    ignores: &[String],
    patterns: &[ReferencePattern],
) -> Result<(ScanResult, ExtractResult)> {
    let compiled = compile_all(patterns)?;
    let scan = scan_files(root, includes, ignores)?;
    let extracted = extract_references(&scan.files, &compiled);
    Ok((scan, extracted))
}
