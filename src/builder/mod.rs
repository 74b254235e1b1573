//! Module building.
//!
//! Orchestrates the traversal from one (database, catalog, schema) request to
//! a finished module document.
//!
//! # Architecture
//!
//! ```text
//! ModuleBuilder::build(request)
//!        │
//!        ▼
//!  schema::resolve ──▶ tables::collect ──▶ columns::build_table (fan-out)
//!        │                                        │
//!        ▼                                        ▼
//!   Module document ◀──────────────────── keys::{primary_key, foreign_keys}
//! ```
//!
//! All output ordering (tables by name, items by position, foreign keys by
//! name, primary-key columns by name) is a deterministic post-processing
//! sort, independent of fetch completion order. Nothing is retained between
//! builds; each module is a point-in-time read of the graph.

pub mod columns;
pub mod keys;
pub mod schema;
pub mod tables;

mod error;

pub use error::{BuildError, BuildResult};

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::graph::GraphAccessor;
use crate::module::{DataSource, Module, Table};

/// Predicate over table display names.
pub type TableFilter = dyn Fn(&str) -> bool + Send + Sync;

/// Fan-out bounds for graph reads.
///
/// Table-level and column-level resolution are independent reads, so both
/// run concurrently up to these bounds to hide graph I/O latency.
#[derive(Debug, Clone, Copy)]
pub struct FanoutLimits {
    /// Concurrent table builds per module.
    pub tables: usize,
    /// Concurrent column resolutions per table.
    pub columns: usize,
}

impl Default for FanoutLimits {
    fn default() -> Self {
        Self {
            tables: 8,
            columns: 16,
        }
    }
}

/// One module-build request.
pub struct ModuleRequest {
    /// Guid of the database entity. Required, non-empty.
    pub database_guid: String,
    /// Catalog display label; not resolved against the graph.
    pub catalog: String,
    /// Schema display name; must match a schema entity exactly.
    pub schema: String,
    /// Optional predicate over table display names.
    pub table_filter: Option<Box<TableFilter>>,
}

impl ModuleRequest {
    pub fn new(
        database_guid: impl Into<String>,
        catalog: impl Into<String>,
        schema: impl Into<String>,
    ) -> Self {
        Self {
            database_guid: database_guid.into(),
            catalog: catalog.into(),
            schema: schema.into(),
            table_filter: None,
        }
    }

    /// Restrict the build to tables whose display name satisfies the
    /// predicate.
    pub fn with_table_filter(
        mut self,
        filter: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.table_filter = Some(Box::new(filter));
        self
    }
}

/// Builds relational-schema module documents from the metadata graph.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use trellis::builder::{ModuleBuilder, ModuleRequest};
/// use trellis::graph::SnapshotGraph;
///
/// let graph = Arc::new(SnapshotGraph::from_file("graph.json")?);
/// let builder = ModuleBuilder::new(graph);
/// let module = builder
///     .build(&ModuleRequest::new("db-guid", "CAT", "SALES"))
///     .await?;
/// ```
pub struct ModuleBuilder {
    graph: Arc<dyn GraphAccessor>,
    limits: FanoutLimits,
}

impl ModuleBuilder {
    pub fn new(graph: Arc<dyn GraphAccessor>) -> Self {
        Self {
            graph,
            limits: FanoutLimits::default(),
        }
    }

    /// Override the default fan-out bounds.
    pub fn with_limits(self, limits: FanoutLimits) -> Self {
        Self { limits, ..self }
    }

    /// Build the module document for one (database, catalog, schema) triple.
    pub async fn build(&self, request: &ModuleRequest) -> BuildResult<Module> {
        if request.database_guid.is_empty() {
            return Err(BuildError::InvalidReference {
                guid: request.database_guid.clone(),
            });
        }
        let graph = self.graph.as_ref();

        let schema_entity = schema::resolve(graph, &request.database_guid, &request.schema).await?;
        let candidates =
            tables::collect(graph, &schema_entity, request.table_filter.as_deref()).await?;

        let mut tables: Vec<Table> = stream::iter(&candidates)
            .map(|entity| columns::build_table(graph, entity, self.limits.columns))
            .buffered(self.limits.tables.max(1))
            .try_collect::<Vec<_>>()
            .await?
            .into_iter()
            .flatten()
            .collect();
        tables.sort_by(|a, b| a.name.cmp(&b.name));

        for table in &mut tables {
            table.primary_key = keys::primary_key(&table.items);
            table.foreign_keys = keys::foreign_keys(graph, &table.name, &table.items).await;
        }

        let data_source = DataSource::new(
            request.catalog.clone(),
            request.schema.clone(),
            tables,
            schema_entity.guid,
        );
        Ok(Module::physical(data_source))
    }

    /// Display names of the schemas reachable from a database entity, in
    /// relationship order. Unnamed schema entities are omitted.
    pub async fn list_schemas(&self, database_guid: &str) -> BuildResult<Vec<String>> {
        if database_guid.is_empty() {
            return Err(BuildError::InvalidReference {
                guid: database_guid.to_string(),
            });
        }
        let candidates = schema::candidates(self.graph.as_ref(), database_guid).await?;
        Ok(candidates
            .iter()
            .filter_map(|schema| schema.display_name())
            .map(str::to_string)
            .collect())
    }
}
