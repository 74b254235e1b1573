//! Key assembly.
//!
//! Derives the single primary key and the grouped, named foreign keys for a
//! table from its resolved items. Foreign-key references resolve their
//! ancestor chain best-effort across a possibly federated graph: a missing
//! step truncates the chain, only a missing parent table drops the reference.

use tracing::debug;

use crate::graph::ontology::rel;
use crate::graph::{Entity, GraphAccessor};
use crate::module::{ForeignColumn, ForeignKey, PrimaryKey, TableItem};

/// Derive the table's primary key from PK-tagged items.
///
/// All PK-tagged columns in a table are assumed to share one constraint
/// name; the first tagged item (items arrive position-sorted) names the key.
pub fn primary_key(items: &[TableItem]) -> Option<PrimaryKey> {
    let keyed: Vec<&TableItem> = items.iter().filter(|item| item.pk_name.is_some()).collect();
    let name = keyed.first()?.pk_name.clone()?;

    let mut keyed_columns: Vec<String> =
        keyed.iter().map(|item| item.column.name.clone()).collect();
    keyed_columns.sort();

    Some(PrimaryKey { name, keyed_columns })
}

/// One foreign-key reference resolved far enough to report.
struct ResolvedReference {
    parent_table_guid: String,
    parent_table_name: String,
    column: ForeignColumn,
}

/// Derive the table's foreign keys, one per distinct referenced parent
/// table, sorted ascending by name. Never fails: unresolvable references are
/// skipped.
pub async fn foreign_keys(
    graph: &dyn GraphAccessor,
    child_table_name: &str,
    items: &[TableItem],
) -> Vec<ForeignKey> {
    // Grouping is a pure reduce over sequentially resolved references, so
    // encounter order (item position order, then reference order within an
    // item) is stable and needs no coordination.
    let mut groups: Vec<(String, String, Vec<ForeignColumn>)> = Vec::new();
    for item in items {
        let Some(guids) = &item.referenced_column_guids else {
            continue;
        };
        for guid in guids {
            let Some(resolved) = resolve_reference(graph, &item.column.name, guid).await else {
                continue;
            };
            match groups
                .iter_mut()
                .find(|(parent_guid, _, _)| *parent_guid == resolved.parent_table_guid)
            {
                Some((_, _, columns)) => columns.push(resolved.column),
                None => groups.push((
                    resolved.parent_table_guid,
                    resolved.parent_table_name,
                    vec![resolved.column],
                )),
            }
        }
    }

    let mut keys: Vec<ForeignKey> = groups
        .into_iter()
        .map(|(_, parent_name, columns)| ForeignKey {
            name: foreign_key_name(child_table_name, &parent_name, &columns),
            columns,
        })
        .collect();
    keys.sort_by(|a, b| a.name.cmp(&b.name));
    keys
}

/// `FK_<child>_<parent>_<child columns>`, child columns distinct in
/// encounter order.
fn foreign_key_name(child_table: &str, parent_table: &str, columns: &[ForeignColumn]) -> String {
    let mut child_columns: Vec<&str> = Vec::new();
    for column in columns {
        if !child_columns.contains(&column.column_name.as_str()) {
            child_columns.push(&column.column_name);
        }
    }
    format!(
        "FK_{child_table}_{parent_table}_{}",
        child_columns.join("_")
    )
}

/// Resolve one referenced-column guid into a foreign column plus its parent
/// table identity. `None` when the column or its owning table cannot be
/// resolved; schema and catalog stay best-effort.
async fn resolve_reference(
    graph: &dyn GraphAccessor,
    child_column_name: &str,
    referenced_guid: &str,
) -> Option<ResolvedReference> {
    let column = match graph.entity_by_guid(referenced_guid).await {
        Ok(entity) => entity,
        Err(err) => {
            debug!(guid = referenced_guid, %err, "skipping unresolvable foreign-key reference");
            return None;
        }
    };
    let pk_column = column.display_name()?.to_string();

    let table = parent_of(graph, &column.guid, rel::NESTED_ATTRIBUTE).await?;
    let pk_table = table.display_name()?.to_string();

    // Beyond the parent table everything is optional; each missing step
    // truncates the chain without discarding the reference.
    let schema_type = parent_of(graph, &table.guid, rel::ATTRIBUTE_FOR_SCHEMA).await;
    let schema = match &schema_type {
        Some(schema_type) => parent_of(graph, &schema_type.guid, rel::SCHEMA_HAS_TYPE).await,
        None => None,
    };
    let pk_schema = schema
        .as_ref()
        .and_then(|schema| schema.display_name())
        .map(str::to_string);
    let catalog = match &schema {
        Some(schema) => parent_of(graph, &schema.guid, rel::CATALOG_CONTAINS_SCHEMA).await,
        None => None,
    };
    let pk_catalog = catalog
        .as_ref()
        .and_then(|catalog| catalog.display_name())
        .map(str::to_string);

    Some(ResolvedReference {
        parent_table_guid: table.guid.clone(),
        parent_table_name: pk_table.clone(),
        column: ForeignColumn {
            column_name: child_column_name.to_string(),
            pk_column,
            pk_table,
            pk_schema,
            pk_catalog,
        },
    })
}

/// Walk one reverse containment hop: find the relationship of the given type
/// whose target end is `child_guid` and resolve its source end.
async fn parent_of(
    graph: &dyn GraphAccessor,
    child_guid: &str,
    relationship_type: &str,
) -> Option<Entity> {
    let relationships = graph
        .relationships_for_entity(child_guid, relationship_type)
        .await
        .ok()?;
    let parent_guid = relationships
        .iter()
        .find(|relationship| relationship.targets(child_guid))
        .map(|relationship| relationship.end1.guid.clone())?;

    match graph.entity_by_guid(&parent_guid).await {
        Ok(entity) => Some(entity),
        Err(err) => {
            debug!(guid = %parent_guid, relationship_type, %err, "ancestor step unresolvable");
            None
        }
    }
}
