//! Names of the relationship types, attributes, and classifications the
//! builder traverses.
//!
//! The exact strings are part of the graph's wire contract and must match
//! what the metadata harvesters write.

/// Relationship type names.
pub mod rel {
    /// Database entity → schema entity.
    pub const DB_CONTAINS_SCHEMA: &str = "database-contains-schema";
    /// Schema entity → schema-type entity.
    pub const SCHEMA_HAS_TYPE: &str = "schema-has-schema-type";
    /// Schema-type entity → table entity.
    pub const ATTRIBUTE_FOR_SCHEMA: &str = "attribute-for-schema";
    /// Table entity → column entity.
    pub const NESTED_ATTRIBUTE: &str = "nested-schema-attribute";
    /// Referenced (parent) column → referencing (child) column.
    pub const FOREIGN_KEY: &str = "ForeignKey";
    /// Column entity → type-description entity.
    pub const ATTACHED_TYPE_INFO: &str = "AttachedTypeInfo";
    /// Catalog entity → schema entity.
    pub const CATALOG_CONTAINS_SCHEMA: &str = "catalog-contains-schema";
}

/// Attribute names.
pub mod attr {
    pub const DISPLAY_NAME: &str = "displayName";
    pub const POSITION: &str = "position";
    pub const IS_NULLABLE: &str = "isNullable";
    /// Vendor/physical type name on a type-description entity.
    pub const TYPE: &str = "type";
    pub const LENGTH: &str = "length";
    pub const ODBC_TYPE: &str = "odbcType";
}

/// Classification names and properties.
pub mod classification {
    pub const PRIMARY_KEY: &str = "PrimaryKey";
    /// Property on the PrimaryKey classification carrying the constraint name.
    pub const PK_NAME: &str = "name";
}
