//! Error types
//!
//! Widget operations themselves do not fail: empty lists and torn-down
//! widgets are no-ops. The errors here cover the two places that can:
//! compiling a highlight pattern from user text and reading configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Filter text could not be turned into a highlight pattern
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("invalid highlight pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Configuration could not be read, parsed or written
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
