//! Lexicat - translation catalog consistency checker and unused-key pruner
//!
//! Lexicat loads nested per-locale JSON catalogs, reports keys missing from
//! some locales and values left empty, and removes keys that no source file
//! references.
//!
//! ## Module Structure
//!
//! - `catalog`: Loading catalogs and flattening them into key paths
//! - `extract`: Scanning the source corpus for literal key references
//! - `check`: Cross-locale missing-key and empty-value checks
//! - `prune`: Rebuilding catalogs without unreferenced keys
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `error`: Error types

pub mod catalog;
pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod prune;

pub use error::{Error, Result};
