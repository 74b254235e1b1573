//! Core metadata graph types.
//!
//! Entities, relationships, and classifications are owned by the external
//! graph store; this crate only ever reads them. The attribute bag is kept as
//! raw JSON values so the graph can carry whatever the harvester wrote, with
//! typed accessors layered on top.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ontology::attr;

/// A node in the metadata graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Opaque unique identifier.
    pub guid: String,
    /// Entity type name (e.g. a table type, a column type).
    pub type_name: String,
    /// Loosely typed attribute bag.
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
    /// Classifications attached to this entity.
    #[serde(default)]
    pub classifications: Vec<Classification>,
}

impl Entity {
    /// Read a string attribute. Absent when unset or not a string.
    pub fn string_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    /// Read a boolean attribute. Unset attributes read as `false`.
    pub fn bool_attr(&self, name: &str) -> bool {
        self.attributes
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Read an integer attribute. Unset attributes read as `0`.
    pub fn int_attr(&self, name: &str) -> i64 {
        self.attributes
            .get(name)
            .and_then(Value::as_i64)
            .unwrap_or(0)
    }

    /// Look up a classification by name.
    pub fn classification(&self, name: &str) -> Option<&Classification> {
        self.classifications.iter().find(|c| c.name == name)
    }

    /// The entity's human-readable display name, when present.
    pub fn display_name(&self) -> Option<&str> {
        self.string_attr(attr::DISPLAY_NAME)
    }
}

/// A lightweight reference to one end of a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub guid: String,
    pub type_name: String,
}

/// A typed, directed edge between two entities.
///
/// `end1` is the source end, `end2` the target end. Containment
/// relationships point from container to contained (a schema is `end1` of
/// the edges to its schema type, a table is `end1` of the edges to its
/// columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub type_name: String,
    pub end1: EntityRef,
    pub end2: EntityRef,
}

impl Relationship {
    /// The end opposite the given guid, if the guid sits on this edge.
    pub fn other_end(&self, guid: &str) -> Option<&EntityRef> {
        if self.end1.guid == guid {
            Some(&self.end2)
        } else if self.end2.guid == guid {
            Some(&self.end1)
        } else {
            None
        }
    }

    /// Whether the given guid is this edge's target end.
    pub fn targets(&self, guid: &str) -> bool {
        self.end2.guid == guid
    }
}

/// A typed tag with its own properties, attached to an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub name: String,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

impl Classification {
    /// Read a string property. Absent when unset or not a string.
    pub fn string_property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }
}
