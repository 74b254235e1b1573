//! SnapshotGraph implementation.
//!
//! An in-memory [`GraphAccessor`] over a point-in-time graph snapshot,
//! deserialized from a JSON document of the form
//! `{ "entities": [...], "relationships": [...] }`. Lookup indexes are built
//! once at load time; reads never touch the filesystem again.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::accessor::GraphAccessor;
use super::error::{GraphError, GraphResult};
use super::types::{Entity, Relationship};

/// On-disk snapshot document.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// GraphAccessor backed by an in-memory snapshot.
#[derive(Debug)]
pub struct SnapshotGraph {
    /// guid → entity.
    entities: HashMap<String, Entity>,
    /// guid → relationship type → relationships touching that guid.
    relationships: HashMap<String, HashMap<String, Vec<Relationship>>>,
}

impl SnapshotGraph {
    /// Load a snapshot from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: GraphSnapshot = serde_json::from_str(&raw)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Build the indexes from a deserialized snapshot document.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Self {
        Self::from_parts(snapshot.entities, snapshot.relationships)
    }

    /// Build the indexes from loose entities and relationships.
    pub fn from_parts(entities: Vec<Entity>, relationships: Vec<Relationship>) -> Self {
        let entities: HashMap<String, Entity> = entities
            .into_iter()
            .map(|entity| (entity.guid.clone(), entity))
            .collect();

        let mut index: HashMap<String, HashMap<String, Vec<Relationship>>> = HashMap::new();
        for relationship in relationships {
            let mut register = |guid: &str| {
                index
                    .entry(guid.to_string())
                    .or_default()
                    .entry(relationship.type_name.clone())
                    .or_default()
                    .push(relationship.clone());
            };
            register(&relationship.end1.guid);
            // Self-edges are indexed once.
            if relationship.end2.guid != relationship.end1.guid {
                register(&relationship.end2.guid);
            }
        }

        Self {
            entities,
            relationships: index,
        }
    }

    /// Number of entities in the snapshot.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

#[async_trait]
impl GraphAccessor for SnapshotGraph {
    async fn entity_by_guid(&self, guid: &str) -> GraphResult<Entity> {
        self.entities
            .get(guid)
            .cloned()
            .ok_or_else(|| GraphError::NotFound(guid.to_string()))
    }

    async fn relationships_for_entity(
        &self,
        guid: &str,
        relationship_type: &str,
    ) -> GraphResult<Vec<Relationship>> {
        Ok(self
            .relationships
            .get(guid)
            .and_then(|by_type| by_type.get(relationship_type))
            .cloned()
            .unwrap_or_default())
    }
}
