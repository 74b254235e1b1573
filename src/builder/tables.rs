//! Table collection.
//!
//! The two-hop traversal from a schema entity to its table entities:
//! schema → schema-type → tables, with optional display-name filtering.
//! Output order is whatever the graph returned; the assembler applies the
//! final name sort after column resolution.

use tracing::warn;

use crate::graph::ontology::rel;
use crate::graph::{Entity, GraphAccessor};

use super::error::BuildResult;
use super::TableFilter;

/// Collect the candidate table entities exposed by a schema.
///
/// A schema without a schema-type relationship legitimately exposes zero
/// tables. Candidates that fail to resolve are logged and skipped.
pub async fn collect(
    graph: &dyn GraphAccessor,
    schema: &Entity,
    name_filter: Option<&TableFilter>,
) -> BuildResult<Vec<Entity>> {
    let schema_types = graph
        .related_entities(&schema.guid, rel::SCHEMA_HAS_TYPE)
        .await?;
    let Some(schema_type) = schema_types.into_iter().next() else {
        return Ok(Vec::new());
    };

    let mut tables = graph
        .related_entities(&schema_type.guid, rel::ATTRIBUTE_FOR_SCHEMA)
        .await?;

    if let Some(filter) = name_filter {
        tables.retain(|table| match table.display_name() {
            Some(name) => filter(name),
            None => {
                warn!(guid = %table.guid, "rejecting unnamed table candidate from filter");
                false
            }
        });
    }

    Ok(tables)
}
