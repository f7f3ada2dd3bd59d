//! GraphStore: the single owner of nodes, items and derived links

use super::item::{Item, ItemRecord};
use super::link::{derive_links, Link};
use super::node::{compare_collaborators, Collaborator, Node, NodeKey, SortMode};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by store mutations
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeKey),

    #[error("Node position {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for store operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Nodes in insertion order, the items they own, and the links between them.
///
/// Links and collaborator lists are always recomputed in full from
/// `items`; they are never patched incrementally.
#[derive(Debug, Default, Clone)]
pub struct GraphStore {
    order: Vec<NodeKey>,
    nodes: HashMap<NodeKey, Node>,
    items: Vec<Item>,
    links: Vec<Link>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite a node and replace the items it owns.
    ///
    /// An overwritten node keeps its position. Records owned by another
    /// node, or without a usable year, are dropped; duplicate ids within
    /// `records` keep the first one. Returns the number of items stored
    /// for the node.
    pub fn add_node(&mut self, node: Node, records: Vec<ItemRecord>) -> usize {
        let key = node.key.clone();

        let previous = self.nodes.remove(&key);
        if previous.is_none() {
            self.order.push(key.clone());
        }
        let mut node = node;
        if let Some(prev) = previous {
            node.sorting = node.sorting.or(prev.sorting);
            node.collaborators = prev.collaborators;
        }
        self.nodes.insert(key.clone(), node);

        let mut seen = HashSet::new();
        let mut incoming = Vec::with_capacity(records.len());
        for record in records {
            if record.node.key != key {
                warn!(item = %record.id, node = %key, owner = %record.node.key, "dropping item owned by another node");
                continue;
            }
            if !seen.insert(record.id.clone()) {
                continue;
            }
            let id = record.id.clone();
            match Item::from_record(record) {
                Some(item) => incoming.push(item),
                None => warn!(item = %id, node = %key, "dropping item without a usable year"),
            }
        }
        let added = incoming.len();

        self.items.retain(|i| i.node.key != key);
        self.items.extend(incoming);
        self.sort_items();
        self.recompute_links();

        if let Err(e) = self.recompute_collaborators(&key) {
            warn!(error = %e, "collaborator recomputation failed");
        }

        debug!(node = %key, items = added, total = self.items.len(), "node added");
        added
    }

    /// Delete a node and every item it owns.
    pub fn remove_node(&mut self, key: &NodeKey) -> Option<Node> {
        let removed = self.nodes.remove(key)?;
        self.order.retain(|k| k != key);
        self.items.retain(|i| &i.node.key != key);
        self.recompute_links();
        debug!(node = %key, "node removed");
        Some(removed)
    }

    /// Rebuild the link list from the current items.
    pub fn recompute_links(&mut self) {
        self.links = derive_links(&self.items);
    }

    /// Rebuild a node's collaborator list from the items it owns, then sort it.
    ///
    /// `enabled` flags survive for collaborators that are still present.
    pub fn recompute_collaborators(&mut self, key: &NodeKey) -> GraphResult<()> {
        let previous: HashMap<NodeKey, bool> = self
            .nodes
            .get(key)
            .ok_or_else(|| GraphError::NodeNotFound(key.clone()))?
            .collaborators
            .iter()
            .map(|c| (c.key.clone(), c.enabled))
            .collect();

        let owned: Vec<&Item> = self.items.iter().filter(|i| &i.node.key == key).collect();

        let mut seen = HashSet::new();
        let collaborators: Vec<Collaborator> = owned
            .iter()
            .flat_map(|i| i.contributors.iter())
            .filter(|c| &c.key != key && seen.insert(c.key.clone()))
            .map(|c| Collaborator {
                key: c.key.clone(),
                name: c.name.clone(),
                collaborator_type: c.contributor_type.clone(),
                enabled: previous.get(&c.key).copied().unwrap_or(false),
                items: owned
                    .iter()
                    .filter(|i| i.mentions(&c.name))
                    .map(|i| i.id.clone())
                    .collect(),
            })
            .collect();

        let mode = match self.nodes.get_mut(key) {
            Some(node) => {
                node.collaborators = collaborators;
                node.sorting.unwrap_or_default()
            }
            None => return Err(GraphError::NodeNotFound(key.clone())),
        };
        self.sort_collaborators(key, mode)
    }

    /// Order a node's collaborators: enabled first, then by `mode`.
    pub fn sort_collaborators(&mut self, key: &NodeKey, mode: SortMode) -> GraphResult<()> {
        let node = self
            .nodes
            .get_mut(key)
            .ok_or_else(|| GraphError::NodeNotFound(key.clone()))?;
        node.sorting = Some(mode);
        node.collaborators
            .sort_by(|a, b| compare_collaborators(a, b, mode));
        Ok(())
    }

    /// Mark a collaborator as kept visible (or not) and re-sort.
    pub fn set_collaborator_enabled(
        &mut self,
        key: &NodeKey,
        collaborator: &NodeKey,
        enabled: bool,
    ) -> GraphResult<()> {
        let node = self
            .nodes
            .get_mut(key)
            .ok_or_else(|| GraphError::NodeNotFound(key.clone()))?;
        let target = node
            .collaborators
            .iter_mut()
            .find(|c| &c.key == collaborator)
            .ok_or_else(|| GraphError::NodeNotFound(collaborator.clone()))?;
        target.enabled = enabled;
        let mode = node.sorting.unwrap_or_default();
        self.sort_collaborators(key, mode)
    }

    /// Swap two nodes' positions, then re-derive item order and links.
    pub fn switch_nodes(&mut self, a: usize, b: usize) -> GraphResult<()> {
        let len = self.order.len();
        for index in [a, b] {
            if index >= len {
                return Err(GraphError::IndexOutOfRange { index, len });
            }
        }
        let order: Vec<NodeKey> = (0..len)
            .map(|i| {
                let from = if i == a {
                    b
                } else if i == b {
                    a
                } else {
                    i
                };
                self.order[from].clone()
            })
            .collect();
        self.order = order;
        self.sort_items();
        self.recompute_links();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.nodes.clear();
        self.items.clear();
        self.links.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Node keys in insertion order
    pub fn node_keys(&self) -> &[NodeKey] {
        &self.order
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|k| self.nodes.get(k))
    }

    pub fn node(&self, key: &NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn contains_node(&self, key: &NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// First stored item with the given id
    pub fn item_by_id(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Stable sort of items by the position of their owning node.
    fn sort_items(&mut self) {
        let position: HashMap<&NodeKey, usize> =
            self.order.iter().enumerate().map(|(i, k)| (k, i)).collect();
        let mut items = std::mem::take(&mut self.items);
        items.sort_by_key(|i| position.get(&i.node.key).copied().unwrap_or(usize::MAX));
        self.items = items;
    }
}
