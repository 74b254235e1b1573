//! The relational-schema module document.
//!
//! Output of a module build: one [`Module`] wrapping one [`DataSource`] per
//! requested (catalog, schema) pair, with tables, ordered columns, a primary
//! key, and grouped foreign keys. Field names and nesting are the wire
//! contract; everything serializes as camelCase JSON.
//!
//! The whole tree is transient: constructed fresh per request from graph
//! reads and discarded after the response is returned.

use serde::{Deserialize, Serialize};

/// Identifier carried by every physical module document.
pub const MODULE_IDENTIFIER: &str = "physicalmodule";

/// Root of the module document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub identifier: String,
    pub data_sources: Vec<DataSource>,
}

impl Module {
    /// Wrap a single data source in a physical module document.
    pub fn physical(data_source: DataSource) -> Self {
        Self {
            identifier: MODULE_IDENTIFIER.to_string(),
            data_sources: vec![data_source],
        }
    }
}

/// A named collection of tables scoped to one catalog + schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub catalog: String,
    pub schema: String,
    /// Display name, `catalog.schema`.
    pub name: String,
    pub tables: Vec<Table>,
    /// Guid of the schema entity this data source was resolved from.
    pub source_guid: String,
}

impl DataSource {
    pub fn new(
        catalog: impl Into<String>,
        schema: impl Into<String>,
        tables: Vec<Table>,
        source_guid: impl Into<String>,
    ) -> Self {
        let catalog = catalog.into();
        let schema = schema.into();
        let name = format!("{catalog}.{schema}");
        Self {
            catalog,
            schema,
            name,
            tables,
            source_guid: source_guid.into(),
        }
    }
}

/// One table, with items ordered ascending by position.
///
/// A table with zero resolvable items is never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub name: String,
    pub items: Vec<TableItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKey>,
    pub foreign_keys: Vec<ForeignKey>,
}

/// One column slot within a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableItem {
    pub column: Column,
    pub position: i64,
    /// Name of the primary-key constraint this column belongs to, if tagged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pk_name: Option<String>,
    /// Guids of the referenced (parent) columns, if this column is a
    /// foreign-key member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_column_guids: Option<Vec<String>>,
}

/// A column with its resolved physical type.
///
/// A column whose datatype cannot be resolved is never materialized; the
/// enclosing item is dropped instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    pub nullable: bool,
    pub vendor_type: String,
    pub datatype: String,
}

/// The single primary key of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKey {
    pub name: String,
    /// Member column names, lexicographically sorted.
    pub keyed_columns: Vec<String>,
}

/// One foreign key, grouping every reference into one parent table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    pub name: String,
    pub columns: Vec<ForeignColumn>,
}

/// One column-level foreign-key reference.
///
/// `pk_schema` and `pk_catalog` are best effort: absence signals a partially
/// resolved ancestor chain, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignColumn {
    /// Referencing column in the child table.
    pub column_name: String,
    /// Referenced column in the parent table.
    pub pk_column: String,
    pub pk_table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pk_schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pk_catalog: Option<String>,
}
