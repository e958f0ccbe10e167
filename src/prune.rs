//! Unused key pruning.
//!
//! [`prune_tree`] is a pure rebuild: the input tree is never modified, so a
//! catalog loaded once can also be handed to the checker. Leaves survive only
//! if their exact path is referenced (or falls under a protected prefix).
//! Branches survive only while they still hold a surviving leaf.
//!
//! Writes go backup first, then the pruned catalog. Locales are processed one
//! at a time and a failed write only affects its own locale. Nothing guards
//! against another process editing the catalog files during a run.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{
    catalog::{CatalogTree, KeyPath, TranslationCatalog},
    error::{Error, Result},
    extract::ReferenceSet,
};

/// What the pruner may do with a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneMode {
    /// Dry run: compute unused keys, touch nothing.
    ReportOnly,
    /// Write `<locale>.backup.json`, then overwrite the catalog.
    BackupAndWrite,
}

/// Decides whether a leaf is in use.
#[derive(Debug, Clone, Copy)]
pub struct Usage<'a> {
    pub references: &'a ReferenceSet,
    /// Subtrees kept whole, regardless of references.
    pub keep_prefixes: &'a [KeyPath],
}

impl<'a> Usage<'a> {
    pub fn new(references: &'a ReferenceSet, keep_prefixes: &'a [KeyPath]) -> Self {
        Self {
            references,
            keep_prefixes,
        }
    }

    pub fn is_used(&self, key: &KeyPath) -> bool {
        self.references.contains(key) || self.keep_prefixes.iter().any(|p| key.starts_with(p))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrunedTree {
    pub tree: CatalogTree,
    /// Leaves dropped, in document order.
    pub removed: Vec<KeyPath>,
}

/// Rebuild `tree` without its unused leaves and without branches left empty.
pub fn prune_tree(tree: &CatalogTree, usage: &Usage<'_>) -> PrunedTree {
    let mut removed = Vec::new();
    let tree = prune_branch(tree, None, usage, &mut removed);
    PrunedTree { tree, removed }
}

fn prune_branch(
    branch: &CatalogTree,
    path: Option<&KeyPath>,
    usage: &Usage<'_>,
    removed: &mut Vec<KeyPath>,
) -> CatalogTree {
    let mut kept = Map::new();

    for (key, value) in branch {
        let child_path = match path {
            Some(parent) => parent.child(key.as_str()),
            None => KeyPath::root(key.as_str()),
        };

        match value {
            Value::Object(children) => {
                let pruned = prune_branch(children, Some(&child_path), usage, removed);
                // A referenced branch is still dropped once it has no leaves.
                if !pruned.is_empty() {
                    kept.insert(key.clone(), Value::Object(pruned));
                }
            }
            leaf => {
                if usage.is_used(&child_path) {
                    kept.insert(key.clone(), leaf.clone());
                } else {
                    removed.push(child_path);
                }
            }
        }
    }

    kept
}

/// Unused-key analysis of one locale.
#[derive(Debug, Clone)]
pub struct PrunePlan {
    pub locale: String,
    pub total_keys: usize,
    pub pruned: PrunedTree,
    /// False if the pruned tree equals the original.
    pub changed: bool,
}

impl PrunePlan {
    pub fn unused(&self) -> &[KeyPath] {
        &self.pruned.removed
    }

    pub fn used_count(&self) -> usize {
        self.total_keys - self.pruned.removed.len()
    }
}

pub fn plan(catalog: &TranslationCatalog, usage: &Usage<'_>) -> PrunePlan {
    let pruned = prune_tree(&catalog.tree, usage);
    let total_keys = catalog.flatten().len();
    let changed = pruned.tree != catalog.tree;
    debug!(
        locale = %catalog.locale,
        total = total_keys,
        unused = pruned.removed.len(),
        "planned prune"
    );
    PrunePlan {
        locale: catalog.locale.clone(),
        total_keys,
        pruned,
        changed,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneResult {
    pub locale: String,
    pub removed_keys: Vec<KeyPath>,
    pub original_bytes: usize,
    pub new_bytes: usize,
    pub backup_path: PathBuf,
}

impl PruneResult {
    /// Signed size change as a percentage of the original file.
    ///
    /// Negative when the file shrank. A compact catalog can grow, since the
    /// rewrite is always indented.
    pub fn size_change_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        let delta = self.new_bytes as f64 - self.original_bytes as f64;
        delta / self.original_bytes as f64 * 100.0
    }
}

/// Render a catalog tree the way pruned files are written:
/// 2-space indentation, document key order, trailing newline.
pub fn render_tree(tree: &CatalogTree) -> serde_json::Result<String> {
    let mut content = serde_json::to_string_pretty(tree)?;
    content.push('\n');
    Ok(content)
}

/// Back up the original catalog, then write the pruned tree over it.
///
/// The backup is the file's original text, byte for byte. If writing the
/// backup fails, or the pruned tree cannot be rendered, the catalog is left
/// untouched.
pub fn apply(
    catalog: &TranslationCatalog,
    plan: &PrunePlan,
    backup_path: &Path,
) -> Result<PruneResult> {
    let content = render_tree(&plan.pruned.tree)
        .map_err(|e| Error::io_write(&catalog.file_path, e.into()))?;

    fs::write(backup_path, catalog.source.as_bytes())
        .map_err(|e| Error::io_write(backup_path, e))?;

    write_catalog(&catalog.file_path, &content)?;

    info!(
        locale = %catalog.locale,
        removed = plan.pruned.removed.len(),
        backup = %backup_path.display(),
        "pruned catalog"
    );

    Ok(PruneResult {
        locale: catalog.locale.clone(),
        removed_keys: plan.pruned.removed.clone(),
        original_bytes: catalog.source.len(),
        new_bytes: content.len(),
        backup_path: backup_path.to_path_buf(),
    })
}

fn write_catalog(path: &Path, content: &str) -> Result<()> {
    if path.is_dir() {
        return Err(Error::io_write(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "catalog path is a directory"),
        ));
    }
    fs::write(path, content).map_err(|e| Error::io_write(path, e))
}
