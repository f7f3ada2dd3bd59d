//! Transform trait: the contract dataset adapters implement
//!
//! A transform resolves a requested value into a canonical node and the
//! flat list of items it takes part in.

use super::error::AdapterError;
use super::types::{NodeData, NodeLabel};
use crate::graph::{Node, NodeKey};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What the model asks a transform for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRequest {
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
}

impl NodeRequest {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            node_type: None,
        }
    }

    pub fn typed(value: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            node_type: Some(node_type.into()),
        }
    }

    /// Key the requested entity would get
    pub fn key(&self) -> NodeKey {
        NodeKey::for_entity(&self.value, self.node_type.as_deref())
    }
}

impl From<&Node> for NodeRequest {
    fn from(node: &Node) -> Self {
        Self {
            value: node.name.clone(),
            node_type: node.node_type.clone(),
        }
    }
}

/// The contract transforms implement.
///
/// Retries and timeouts are the transform's own business; an `Err` is
/// terminal for that request.
#[async_trait]
pub trait Transform: Send + Sync {
    /// Unique identifier for this transform
    fn id(&self) -> &str;

    /// Resolve one requested value into a node and its items.
    async fn fetch(&self, request: &NodeRequest) -> Result<NodeData, AdapterError>;

    /// Every value this transform can resolve, for autocompletion.
    async fn node_labels(&self) -> Result<Vec<NodeLabel>, AdapterError>;
}
