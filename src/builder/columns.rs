//! Column resolution.
//!
//! Builds one table's column descriptors: position, name, nullability,
//! primary-key tag, foreign-key reference guids, and the resolved physical
//! data type. Type information is mandatory: a column whose type description
//! cannot be resolved is dropped, and a table left with no resolvable column
//! is dropped entirely, distinguishing harvest noise from a genuinely
//! columnless schema object.

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::graph::ontology::{attr, classification, rel};
use crate::graph::{Entity, GraphAccessor};
use crate::module::{Column, Table, TableItem};

use super::error::BuildResult;

/// Build a table document from a table entity, resolving columns with the
/// given fan-out bound. `Ok(None)` when no column resolves.
pub async fn build_table(
    graph: &dyn GraphAccessor,
    table: &Entity,
    fanout: usize,
) -> BuildResult<Option<Table>> {
    let Some(name) = table.display_name() else {
        warn!(guid = %table.guid, "dropping unnamed table entity");
        return Ok(None);
    };

    let relationships = graph
        .relationships_for_entity(&table.guid, rel::NESTED_ATTRIBUTE)
        .await?;
    let column_guids: Vec<String> = relationships
        .iter()
        .filter_map(|relationship| relationship.other_end(&table.guid))
        .map(|end| end.guid.clone())
        .collect();

    let mut items: Vec<TableItem> = stream::iter(column_guids)
        .map(|guid| async move { build_item(graph, &guid).await })
        .buffered(fanout.max(1))
        .filter_map(|item| async move { item })
        .collect()
        .await;

    if items.is_empty() {
        warn!(table = name, "dropping table with no resolvable columns");
        return Ok(None);
    }
    items.sort_by_key(|item| item.position);

    Ok(Some(Table {
        name: name.to_string(),
        items,
        primary_key: None,
        foreign_keys: Vec::new(),
    }))
}

/// Resolve one column entity into a table item. Every failure path drops the
/// item and keeps the build going.
async fn build_item(graph: &dyn GraphAccessor, guid: &str) -> Option<TableItem> {
    let entity = match graph.entity_by_guid(guid).await {
        Ok(entity) => entity,
        Err(err) => {
            warn!(guid, %err, "skipping unresolvable column entity");
            return None;
        }
    };

    let Some(name) = entity.display_name().map(str::to_owned) else {
        warn!(guid, "skipping unnamed column entity");
        return None;
    };
    let position = entity.int_attr(attr::POSITION);
    let nullable = entity.bool_attr(attr::IS_NULLABLE);

    let pk_name = entity
        .classification(classification::PRIMARY_KEY)
        .and_then(|tag| tag.string_property(classification::PK_NAME))
        .map(str::to_owned);

    let referenced_column_guids = referenced_columns(graph, &entity).await;

    let Some((vendor_type, datatype)) = resolve_datatype(graph, &entity).await else {
        warn!(column = %name, "dropping column with unresolved data type");
        return None;
    };

    Some(TableItem {
        column: Column {
            name,
            nullable,
            vendor_type,
            datatype,
        },
        position,
        pk_name,
        referenced_column_guids,
    })
}

/// Guids of the parent columns this column references, in relationship
/// order. Key membership is optional metadata: a listing fault degrades to
/// "no references" rather than dropping the column.
async fn referenced_columns(graph: &dyn GraphAccessor, column: &Entity) -> Option<Vec<String>> {
    let relationships = match graph
        .relationships_for_entity(&column.guid, rel::FOREIGN_KEY)
        .await
    {
        Ok(relationships) => relationships,
        Err(err) => {
            debug!(guid = %column.guid, %err, "foreign-key lookup failed for column");
            return None;
        }
    };

    let guids: Vec<String> = relationships
        .iter()
        .filter(|relationship| relationship.targets(&column.guid))
        .map(|relationship| relationship.end1.guid.clone())
        .collect();
    if guids.is_empty() {
        None
    } else {
        Some(guids)
    }
}

/// Resolve the column's type description through the single AttachedTypeInfo
/// hop. Returns `(vendor_type, datatype)`, or `None` when the hop, the far
/// end, or the ODBC type is missing.
async fn resolve_datatype(graph: &dyn GraphAccessor, column: &Entity) -> Option<(String, String)> {
    let relationships = graph
        .relationships_for_entity(&column.guid, rel::ATTACHED_TYPE_INFO)
        .await
        .ok()?;
    let far_end = relationships
        .first()
        .and_then(|relationship| relationship.other_end(&column.guid))?;
    let type_entity = graph.entity_by_guid(&far_end.guid).await.ok()?;

    let odbc_type = type_entity.string_attr(attr::ODBC_TYPE)?;
    let mapped = remap_odbc_type(odbc_type);
    let datatype = match type_entity.string_attr(attr::LENGTH) {
        Some(length) => format!("{mapped}({length})"),
        None => mapped.to_string(),
    };
    let vendor_type = type_entity
        .string_attr(attr::TYPE)
        .unwrap_or(odbc_type)
        .to_string();

    Some((vendor_type, datatype))
}

/// Fixed ODBC type remap; identity for everything it does not name.
fn remap_odbc_type(odbc_type: &str) -> &str {
    match odbc_type {
        "WVARCHAR" => "NVARCHAR",
        other => other,
    }
}
