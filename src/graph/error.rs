//! Graph access error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while reading the metadata graph.
#[derive(Error, Debug)]
pub enum GraphError {
    /// No entity exists with the given guid.
    #[error("entity not found: {0}")]
    NotFound(String),

    /// Failed to read a graph snapshot file.
    #[error("failed to read graph snapshot {path}: {source}")]
    Io {
        /// Path of the snapshot file.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Snapshot contents are not valid JSON.
    #[error("failed to parse graph snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GraphError {
    /// Whether this error is a missing-entity lookup failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
