//! Builder error types.
//!
//! Only structural failures surface here: an unusable database reference, a
//! schema name that matches nothing, or a graph fault during the top-level
//! traversal. Leaf resolution failures (columns, foreign-key ancestors,
//! candidate fetches) are fail-soft and never reach the caller.

use thiserror::Error;

use crate::graph::GraphError;

/// Result type for module builds.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that abort a module build.
#[derive(Error, Debug)]
pub enum BuildError {
    /// No schema with the requested display name, or the database entity
    /// itself is missing (cause attached).
    #[error("schema not found: {name}")]
    SchemaNotFound {
        /// The requested schema display name.
        name: String,
        #[source]
        source: Option<GraphError>,
    },

    /// The database reference cannot identify an entity.
    #[error("invalid entity reference: {guid:?}")]
    InvalidReference {
        /// The offending guid.
        guid: String,
    },

    /// Graph fault during the top-level traversal.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl BuildError {
    /// Convenience constructor for a missing schema.
    pub fn schema_not_found(name: impl Into<String>) -> Self {
        Self::SchemaNotFound {
            name: name.into(),
            source: None,
        }
    }
}
