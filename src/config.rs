use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::{catalog::KeyPath, extract::ReferencePattern};

pub const CONFIG_FILE_NAME: &str = ".lexicatrc.json";

pub const VALIDATION_REPORT_FILE_NAME: &str = "translation-validation-report.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_locales_root")]
    pub locales_root: String,
    /// Locales to load. Empty means every catalog found in `locales_root`.
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "crate::extract::default_patterns")]
    pub patterns: Vec<ReferencePattern>,
    /// Key prefixes whose subtrees are never pruned, for namespaces that
    /// code fetches as a whole object.
    #[serde(default)]
    pub keep_prefixes: Vec<String>,
}

fn default_locales_root() -> String {
    "./i18n".to_string()
}

fn default_source_root() -> String {
    "./src".to_string()
}

fn default_includes() -> Vec<String> {
    ["**/*.ts", "**/*.html", "**/*.js", "**/*.tsx", "**/*.jsx"]
        .map(String::from)
        .to_vec()
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/*.spec.ts"]
        .map(String::from)
        .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales_root: default_locales_root(),
            locales: Vec::new(),
            source_root: default_source_root(),
            includes: default_includes(),
            ignores: default_ignores(),
            patterns: crate::extract::default_patterns(),
            keep_prefixes: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid globs, uncompilable reference patterns and malformed
    /// key prefixes, naming the offending field.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.includes {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'includes': \"{}\"", pattern))?;
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for pattern in &self.patterns {
            pattern
                .compile()
                .with_context(|| format!("Invalid entry in 'patterns': \"{}\"", pattern.pattern))?;
        }

        self.keep_prefix_paths()?;

        Ok(())
    }

    pub fn keep_prefix_paths(&self) -> Result<Vec<KeyPath>> {
        self.keep_prefixes
            .iter()
            .map(|prefix| {
                KeyPath::parse(prefix).with_context(|| {
                    format!("Invalid key path in 'keepPrefixes': \"{}\"", prefix)
                })
            })
            .collect()
    }
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
    /// Path of the config file, or None when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    /// Directory relative paths in the config are resolved against.
    pub fn base_dir(&self, fallback: &Path) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| fallback.to_path_buf())
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
