use std::path::{Component, Path, PathBuf};

use anyhow::{Context as _, Result};

use super::args::CommonArgs;
use crate::{
    catalog::{self, KeyPath},
    config::{Config, load_config},
};

/// Resolved settings for one command run.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--locales-root ./assets/i18n`)
/// 2. `.lexicatrc.json` config file
/// 3. Built-in defaults
///
/// Relative paths from the config file resolve against the directory that
/// holds it. Relative CLI paths resolve against the working directory.
pub struct ProjectContext {
    pub config: Config,
    pub root_dir: PathBuf,
    pub locales_root: PathBuf,
    pub source_root: PathBuf,
    pub locales: Vec<String>,
    pub keep_prefixes: Vec<KeyPath>,
}

impl ProjectContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read working directory")?;
        Self::from_dir(&cwd, args)
    }

    pub fn from_dir(cwd: &Path, args: &CommonArgs) -> Result<Self> {
        let loaded = load_config(cwd)?;
        let root_dir = loaded.base_dir(cwd);
        let config = loaded.config;

        let locales_root = match &args.locales_root {
            Some(p) => resolve(cwd, p),
            None => resolve(&root_dir, Path::new(&config.locales_root)),
        };
        let source_root = match &args.source_root {
            Some(p) => resolve(cwd, p),
            None => resolve(&root_dir, Path::new(&config.source_root)),
        };

        let locales = if !args.locales.is_empty() {
            args.locales.clone()
        } else if !config.locales.is_empty() {
            config.locales.clone()
        } else {
            catalog::discover_locales(&locales_root)?
        };

        let keep_prefixes = config.keep_prefix_paths()?;

        Ok(Self {
            config,
            root_dir,
            locales_root,
            source_root,
            locales,
            keep_prefixes,
        })
    }

    pub fn catalog_path(&self, locale: &str) -> PathBuf {
        catalog::catalog_path(&self.locales_root, locale)
    }

    pub fn backup_path(&self, locale: &str) -> PathBuf {
        catalog::backup_path(&self.locales_root, locale)
    }
}

fn resolve(base: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = p.components().all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        return base.to_path_buf();
    }
    let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
    base.join(rel)
}
