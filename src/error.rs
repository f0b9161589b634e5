//! Error types for collection extraction and persistence.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollectionError>;

#[derive(Error, Debug)]
pub enum CollectionError {
    /// File could not be opened
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or UTF-8 decoding failed part way through the source
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination could not be created or written
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed collection JSON, or serialization failure
    #[error("invalid collection json in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
}
