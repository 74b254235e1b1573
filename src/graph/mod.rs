//! Metadata graph access.
//!
//! This module provides the read-only view of the entity-relationship
//! metadata graph the module builder walks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       GraphAccessor                         │
//! │  - entity_by_guid()                                         │
//! │  - relationships_for_entity()                               │
//! │  - related_entities()   (provided, fail-soft far ends)      │
//! └─────────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       SnapshotGraph                         │
//! │        (in-memory indexes over a JSON snapshot)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Services embedding the builder substitute their own client-backed
//! `GraphAccessor`; the snapshot implementation serves the CLI and tests.

mod accessor;
mod error;
mod snapshot;
mod types;

pub mod fixture;
pub mod ontology;

pub use accessor::GraphAccessor;
pub use error::{GraphError, GraphResult};
pub use snapshot::{GraphSnapshot, SnapshotGraph};
pub use types::{Classification, Entity, EntityRef, Relationship};
