//! Schema resolution.
//!
//! Locates the schema entity for a database given a human-readable schema
//! name. Candidate schemas that fail to resolve are skipped; only the
//! database fetch itself and the relationship listing are structural.

use crate::graph::ontology::rel;
use crate::graph::{Entity, GraphAccessor, GraphResult};

use super::error::{BuildError, BuildResult};

/// All schema entities reachable from the database entity.
///
/// Fails `NotFound` when the database guid matches nothing; unresolvable
/// candidates are logged and skipped.
pub async fn candidates(
    graph: &dyn GraphAccessor,
    database_guid: &str,
) -> GraphResult<Vec<Entity>> {
    let database = graph.entity_by_guid(database_guid).await?;
    graph
        .related_entities(&database.guid, rel::DB_CONTAINS_SCHEMA)
        .await
}

/// Resolve the schema entity whose display name matches `schema_name`
/// exactly (case-sensitive). Returns the first match in relationship order.
pub async fn resolve(
    graph: &dyn GraphAccessor,
    database_guid: &str,
    schema_name: &str,
) -> BuildResult<Entity> {
    let candidates = candidates(graph, database_guid).await.map_err(|err| {
        if err.is_not_found() {
            BuildError::SchemaNotFound {
                name: schema_name.to_string(),
                source: Some(err),
            }
        } else {
            BuildError::Graph(err)
        }
    })?;

    candidates
        .into_iter()
        .find(|schema| schema.display_name() == Some(schema_name))
        .ok_or_else(|| BuildError::schema_not_found(schema_name))
}
