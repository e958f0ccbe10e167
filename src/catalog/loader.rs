use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::de::Error as _;
use serde_json::{Map, Value};
use tracing::debug;

use super::{CatalogTree, FlattenedCatalog, KeyPath, TranslationCatalog};
use crate::error::{Error, Result};

pub const CATALOG_EXTENSION: &str = "json";
pub const BACKUP_SUFFIX: &str = ".backup.json";

/// `<root>/<locale>.json`
pub fn catalog_path(root: &Path, locale: &str) -> PathBuf {
    root.join(format!("{}.{}", locale, CATALOG_EXTENSION))
}

/// `<root>/<locale>.backup.json`
pub fn backup_path(root: &Path, locale: &str) -> PathBuf {
    root.join(format!("{}{}", locale, BACKUP_SUFFIX))
}

/// Read and parse one locale's catalog.
///
/// The parser message is carried in [`Error::Parse`] rather than replaced.
/// A document whose root is not an object is rejected the same way.
pub fn load_catalog(path: &Path, locale: &str) -> Result<TranslationCatalog> {
    let source = fs::read_to_string(path).map_err(|e| Error::io_read(path, e))?;

    let parse_error = |source| Error::Parse {
        locale: locale.to_string(),
        file_path: path.to_path_buf(),
        source,
    };

    let tree = match serde_json::from_str::<Value>(&source).map_err(parse_error)? {
        Value::Object(map) => map,
        other => {
            return Err(parse_error(serde_json::Error::custom(format!(
                "catalog root must be an object, found {}",
                json_kind(&other)
            ))));
        }
    };

    debug!(locale, path = %path.display(), bytes = source.len(), "loaded catalog");

    Ok(TranslationCatalog {
        locale: locale.to_string(),
        file_path: path.to_path_buf(),
        tree,
        source,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Flatten a catalog tree into leaf key paths, depth first, in document order.
///
/// Objects are branches. Everything else, arrays included, is an opaque leaf.
/// Empty objects contribute no entries.
pub fn flatten(tree: &CatalogTree) -> IndexMap<KeyPath, Value> {
    let mut entries = IndexMap::new();
    for (key, value) in tree {
        flatten_node(value, KeyPath::root(key.as_str()), &mut entries);
    }
    entries
}

fn flatten_node(value: &Value, path: KeyPath, entries: &mut IndexMap<KeyPath, Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_node(child, path.child(key.as_str()), entries);
            }
        }
        leaf => {
            entries.insert(path, leaf.clone());
        }
    }
}

/// Rebuild a nested tree from a flattened catalog.
pub fn unflatten(catalog: &FlattenedCatalog) -> CatalogTree {
    let mut tree = Map::new();
    'paths: for (path, value) in &catalog.entries {
        let Some((leaf, branches)) = path.segments().split_last() else {
            continue;
        };

        let mut node = &mut tree;
        for segment in branches {
            let child = node
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            let Some(map) = child.as_object_mut() else {
                continue 'paths;
            };
            node = map;
        }
        node.insert(leaf.clone(), value.clone());
    }
    tree
}

/// Extracts locale from a catalog filename.
///
/// - "en.json" -> Some("en")
/// - "/path/to/i18n/pt-BR.json" -> Some("pt-BR")
/// - "en.backup.json" -> None
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    let name = path.file_name()?.to_str()?;
    if name.ends_with(BACKUP_SUFFIX) {
        return None;
    }
    if path.extension().and_then(|e| e.to_str()) != Some(CATALOG_EXTENSION) {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// List the locales present in a catalog directory, sorted.
pub fn discover_locales(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(Error::config(format!(
            "locales directory '{}' does not exist.\n\
             Hint: check the 'localesRoot' setting in your config file.",
            root.display()
        )));
    }

    let mut locales = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| Error::io_read(root, e))? {
        let entry = entry.map_err(|e| Error::io_read(root, e))?;
        let path = entry.path();
        if path.is_file()
            && let Some(locale) = extract_locale(&path)
        {
            locales.push(locale);
        }
    }
    locales.sort();
    Ok(locales)
}
