//! GraphAccessor trait definition.
//!
//! The GraphAccessor trait abstracts over different ways of reaching the
//! metadata graph. The crate ships one implementation, [`SnapshotGraph`],
//! backed by an in-memory snapshot; services embedding the builder inject
//! their own client-backed implementation.
//!
//! [`SnapshotGraph`]: super::SnapshotGraph

use async_trait::async_trait;
use tracing::warn;

use super::error::GraphResult;
use super::types::{Entity, Relationship};

/// Point lookups and typed-relationship traversal over the metadata graph.
///
/// The graph is read-only from the builder's perspective; implementations own
/// retry/backoff for transient repository faults, this trait defines none.
///
/// # Example
///
/// ```ignore
/// use trellis::graph::{ontology::rel, GraphAccessor};
///
/// async fn example(graph: &impl GraphAccessor) -> trellis::graph::GraphResult<()> {
///     let database = graph.entity_by_guid("db-guid").await?;
///     let edges = graph
///         .relationships_for_entity(&database.guid, rel::DB_CONTAINS_SCHEMA)
///         .await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait GraphAccessor: Send + Sync {
    /// Fetch an entity by guid. Fails with `GraphError::NotFound` if absent.
    async fn entity_by_guid(&self, guid: &str) -> GraphResult<Entity>;

    /// All relationships of the given type touching the given entity, on
    /// either end. An empty list is a valid answer, not an error.
    async fn relationships_for_entity(
        &self,
        guid: &str,
        relationship_type: &str,
    ) -> GraphResult<Vec<Relationship>>;

    /// Resolve the entities on the far end of the given relationship type.
    ///
    /// Listing failures propagate; a far-end entity that cannot be fetched is
    /// logged and skipped, since a federated graph may reference entities it
    /// no longer holds. Result order follows relationship order.
    async fn related_entities(
        &self,
        guid: &str,
        relationship_type: &str,
    ) -> GraphResult<Vec<Entity>> {
        let relationships = self.relationships_for_entity(guid, relationship_type).await?;

        let mut entities = Vec::with_capacity(relationships.len());
        for relationship in &relationships {
            let Some(far_end) = relationship.other_end(guid) else {
                continue;
            };
            match self.entity_by_guid(&far_end.guid).await {
                Ok(entity) => entities.push(entity),
                Err(err) => {
                    warn!(
                        guid = %far_end.guid,
                        relationship_type,
                        %err,
                        "skipping unresolvable related entity"
                    );
                }
            }
        }
        Ok(entities)
    }
}
