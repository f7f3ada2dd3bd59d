//! Transform adapter layer
//!
//! Transforms turn a requested value into the canonical `{ node, items }`
//! payload the model consumes. Each dataset picks one transform kind.

mod cache;
mod error;
mod json_file;
mod labels;
mod records;
mod registry;
mod traits;
mod types;

pub use cache::CachedTransform;
pub use error::{AdapterError, AdapterResult};
pub use json_file::JsonFileTransform;
pub use labels::LabelIndex;
pub use records::{labels_from_records, transform_records, Record, RecordTransform};
pub use registry::{build_transform, AdapterKind, TransformRegistry};
pub use traits::{NodeRequest, Transform};
pub use types::{NodeData, NodeLabel, TransformResponse};
