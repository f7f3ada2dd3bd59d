//! Muvin: timeline network model for provenance research
//!
//! Entities (people, institutions, artworks) are nodes; dated records they
//! take part in are items; every pair of nodes sharing an item gets a link.
//! Views over this graph are filtered at read time by type, time window
//! and focus node.
//!
//! # Core Concepts
//!
//! - **Nodes**: explored entities, each with a derived collaborator list
//! - **Items**: dated records flattened from every node's perspective
//! - **Links**: co-occurrence edges derived from shared item ids
//! - **Transforms**: dataset adapters that resolve a value into a node and its items
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use muvin::{DataModel, RecordTransform};
//!
//! let model = DataModel::new(Arc::new(RecordTransform::new("empty", vec![])));
//! assert!(model.is_empty());
//! ```

pub mod adapter;
pub mod config;
mod graph;
pub mod model;
pub mod query;

pub use adapter::{
    AdapterError, AdapterKind, AdapterResult, CachedTransform, JsonFileTransform, LabelIndex,
    NodeData, NodeLabel, NodeRequest, Record, RecordTransform, Transform, TransformRegistry,
};
pub use config::{ConfigError, ConfigResult, MuvinConfig};
pub use graph::{
    derive_links, stable_key, year_from_date, Collaborator, Contributor, ContributorRecord,
    GraphError, GraphResult, GraphStore, Item, ItemRecord, Link, Node, NodeKey, NodeRef,
    OneOrMany, SortMode, YearValue, UNKNOWN_TYPE, YEAR_RANGE,
};
pub use model::{DataModel, LoadReport};
pub use query::{FilterUpdate, Filters};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
