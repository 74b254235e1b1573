//! # Trellis
//!
//! Materializes relational-schema module documents from a typed
//! entity-relationship metadata graph.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            Metadata graph (external store)              │
//! │   (catalogs, schemas, tables, columns, relationships)   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [graph::GraphAccessor]
//! ┌─────────────────────────────────────────────────────────┐
//! │       Entities / Relationships / Classifications        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [builder::ModuleBuilder]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Module document (tables, columns, primary key, FKs)   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The graph is read-only from this crate's perspective. Structural failures
//! (bad database reference, unknown schema name) abort a build; leaf
//! resolution failures (a column's type, a foreign-key ancestor) drop the
//! affected piece and keep going, so a federated, partially populated graph
//! still yields a best-effort relational view.

pub mod builder;
pub mod config;
pub mod graph;
pub mod module;

pub use builder::{BuildError, BuildResult, FanoutLimits, ModuleBuilder, ModuleRequest};
pub use graph::{GraphAccessor, GraphError, GraphResult, SnapshotGraph};
pub use module::Module;
