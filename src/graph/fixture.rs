//! Test fixtures for building in-memory metadata graphs.
//!
//! Provides a fluent builder over entities and relationships, with
//! relational-shaped helpers (database, schema, table, column, type info)
//! matching the ontology the module builder traverses. Used by the crate's
//! integration tests; exported so embedders can exercise the builder without
//! a real graph store.

use std::collections::HashMap;

use serde_json::{json, Value};
use uuid::Uuid;

use super::ontology::{attr, classification, rel};
use super::snapshot::SnapshotGraph;
use super::types::{Classification, Entity, EntityRef, Relationship};

/// Fluent in-memory graph builder.
#[derive(Debug, Default)]
pub struct GraphFixture {
    entities: Vec<Entity>,
    relationships: Vec<Relationship>,
}

impl GraphFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity with a generated guid and no attributes.
    pub fn entity(&mut self, type_name: &str) -> String {
        self.entity_with(type_name, HashMap::new())
    }

    /// Add an entity with a generated guid and a `displayName` attribute.
    pub fn named_entity(&mut self, type_name: &str, display_name: &str) -> String {
        let mut attributes = HashMap::new();
        attributes.insert(attr::DISPLAY_NAME.to_string(), json!(display_name));
        self.entity_with(type_name, attributes)
    }

    /// Add an entity with a generated guid and the given attribute bag.
    pub fn entity_with(
        &mut self,
        type_name: &str,
        attributes: HashMap<String, Value>,
    ) -> String {
        let guid = Uuid::new_v4().to_string();
        self.entities.push(Entity {
            guid: guid.clone(),
            type_name: type_name.to_string(),
            attributes,
            classifications: Vec::new(),
        });
        guid
    }

    /// Set an attribute on an existing entity.
    pub fn set_attr(&mut self, guid: &str, name: &str, value: Value) -> &mut Self {
        if let Some(entity) = self.entities.iter_mut().find(|e| e.guid == guid) {
            entity.attributes.insert(name.to_string(), value);
        }
        self
    }

    /// Attach a classification to an existing entity.
    pub fn classify(
        &mut self,
        guid: &str,
        name: &str,
        properties: HashMap<String, Value>,
    ) -> &mut Self {
        if let Some(entity) = self.entities.iter_mut().find(|e| e.guid == guid) {
            entity.classifications.push(Classification {
                name: name.to_string(),
                properties,
            });
        }
        self
    }

    /// Add a directed relationship between two existing entities.
    pub fn relate(&mut self, type_name: &str, end1: &str, end2: &str) -> &mut Self {
        let end1 = self.entity_ref(end1);
        let end2 = self.entity_ref(end2);
        self.relationships.push(Relationship {
            type_name: type_name.to_string(),
            end1,
            end2,
        });
        self
    }

    fn entity_ref(&self, guid: &str) -> EntityRef {
        let type_name = self
            .entities
            .iter()
            .find(|e| e.guid == guid)
            .map(|e| e.type_name.clone())
            .unwrap_or_default();
        EntityRef {
            guid: guid.to_string(),
            type_name,
        }
    }

    // -------------------------------------------------------------------------
    // Relational-shaped helpers
    // -------------------------------------------------------------------------

    /// Add a database entity.
    pub fn database(&mut self, name: &str) -> String {
        self.named_entity("database", name)
    }

    /// Add a schema entity under a database.
    pub fn schema(&mut self, database: &str, name: &str) -> String {
        let schema = self.named_entity("schema", name);
        self.relate(rel::DB_CONTAINS_SCHEMA, database, &schema);
        schema
    }

    /// Add a catalog entity owning a schema.
    pub fn catalog(&mut self, name: &str, schema: &str) -> String {
        let catalog = self.named_entity("catalog", name);
        self.relate(rel::CATALOG_CONTAINS_SCHEMA, &catalog, schema);
        catalog
    }

    /// Add the schema-type entity for a schema.
    pub fn schema_type(&mut self, schema: &str) -> String {
        let schema_type = self.entity("schema-type");
        self.relate(rel::SCHEMA_HAS_TYPE, schema, &schema_type);
        schema_type
    }

    /// Add a table entity under a schema-type.
    pub fn table(&mut self, schema_type: &str, name: &str) -> String {
        let table = self.named_entity("table", name);
        self.relate(rel::ATTRIBUTE_FOR_SCHEMA, schema_type, &table);
        table
    }

    /// Add a column entity under a table, without type information.
    pub fn bare_column(&mut self, table: &str, name: &str, position: i64) -> String {
        let mut attributes = HashMap::new();
        attributes.insert(attr::DISPLAY_NAME.to_string(), json!(name));
        attributes.insert(attr::POSITION.to_string(), json!(position));
        let column = self.entity_with("column", attributes);
        self.relate(rel::NESTED_ATTRIBUTE, table, &column);
        column
    }

    /// Add a column entity under a table with an attached type description.
    pub fn column(&mut self, table: &str, name: &str, position: i64, odbc_type: &str) -> String {
        let column = self.bare_column(table, name, position);
        self.type_info(&column, odbc_type, odbc_type, None);
        column
    }

    /// Attach a type-description entity to a column.
    pub fn type_info(
        &mut self,
        column: &str,
        vendor_type: &str,
        odbc_type: &str,
        length: Option<&str>,
    ) -> String {
        let mut attributes = HashMap::new();
        attributes.insert(attr::TYPE.to_string(), json!(vendor_type));
        attributes.insert(attr::ODBC_TYPE.to_string(), json!(odbc_type));
        if let Some(length) = length {
            attributes.insert(attr::LENGTH.to_string(), json!(length));
        }
        let info = self.entity_with("type-info", attributes);
        self.relate(rel::ATTACHED_TYPE_INFO, column, &info);
        info
    }

    /// Tag a column with a named PrimaryKey classification.
    pub fn primary_key(&mut self, column: &str, pk_name: &str) -> &mut Self {
        let mut properties = HashMap::new();
        properties.insert(classification::PK_NAME.to_string(), json!(pk_name));
        self.classify(column, classification::PRIMARY_KEY, properties)
    }

    /// Record a foreign-key edge from a referenced (parent) column to a
    /// referencing (child) column.
    pub fn foreign_key(&mut self, parent_column: &str, child_column: &str) -> &mut Self {
        self.relate(rel::FOREIGN_KEY, parent_column, child_column)
    }

    /// Consume the fixture into a snapshot-backed graph.
    pub fn build(self) -> SnapshotGraph {
        SnapshotGraph::from_parts(self.entities, self.relationships)
    }

    /// The raw entities and relationships, for serializing snapshot files.
    pub fn into_parts(self) -> (Vec<Entity>, Vec<Relationship>) {
        (self.entities, self.relationships)
    }
}
