//! Payload types exchanged with transforms

use super::error::AdapterError;
use crate::graph::{ItemRecord, Node, NodeRef};
use serde::{Deserialize, Serialize};

/// A successful transform result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub node: NodeRef,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

impl NodeData {
    /// The node descriptor to register in the store
    pub fn to_node(&self) -> Node {
        Node::with_key(
            self.node.key.clone(),
            self.node.name.clone(),
            self.node.node_type.clone(),
        )
    }
}

/// A transform response as serialized by a backend or a cache file:
/// either `{ "message": ... }` or `{ "node": ..., "items": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformResponse {
    Failure { message: String },
    Success(NodeData),
}

impl TransformResponse {
    pub fn into_result(self) -> Result<NodeData, AdapterError> {
        match self {
            Self::Failure { message } => Err(AdapterError::NotFound(message)),
            Self::Success(data) => Ok(data),
        }
    }
}

/// An explorable value offered for autocompletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLabel {
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub label_type: Option<String>,
}

impl NodeLabel {
    pub fn new(value: impl Into<String>, label_type: Option<String>) -> Self {
        Self {
            value: value.into(),
            label_type,
        }
    }
}
