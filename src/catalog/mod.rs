//! Locale catalogs and their flattened key-path views.
//!
//! - `key_path`: canonical dot-joined keys
//! - `loader`: reading catalog files, flattening and rebuilding trees

pub mod key_path;
pub mod loader;

use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::{Map, Value};

pub use key_path::KeyPath;
pub use loader::{backup_path, catalog_path, discover_locales, flatten, load_catalog, unflatten};

/// Branch node of a catalog tree. Non-object values are leaves.
pub type CatalogTree = Map<String, Value>;

/// One locale's parsed translation file.
///
/// Loaded once per run and never mutated; the pruner derives new trees.
#[derive(Debug, Clone)]
pub struct TranslationCatalog {
    pub locale: String,
    pub file_path: PathBuf,
    pub tree: CatalogTree,
    /// Raw file text, kept for byte-identical backups and size reports.
    pub source: String,
}

impl TranslationCatalog {
    pub fn flatten(&self) -> FlattenedCatalog {
        FlattenedCatalog {
            locale: self.locale.clone(),
            entries: flatten(&self.tree),
        }
    }

    pub fn file_size(&self) -> usize {
        self.source.len()
    }
}

/// Leaf key paths of a catalog, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedCatalog {
    pub locale: String,
    pub entries: IndexMap<KeyPath, Value>,
}

impl FlattenedCatalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &KeyPath) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &KeyPath) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &KeyPath> {
        self.entries.keys()
    }
}
