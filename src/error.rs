//! Error taxonomy for catalog loading, corpus scanning and pruning writes.

use std::path::PathBuf;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A locale catalog is not valid JSON. Aborts only that locale.
    #[error("failed to parse '{locale}' catalog {}: {source}", file_path.display())]
    Parse {
        locale: String,
        file_path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A backup or a pruned catalog could not be written.
    #[error("failed to write {}: {source}", path.display())]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid reference pattern \"{pattern}\": {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("config: {0}")]
    Config(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoRead {
            path: path.into(),
            source,
        }
    }

    pub fn io_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoWrite {
            path: path.into(),
            source,
        }
    }
}
