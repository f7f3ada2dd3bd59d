//! Node representation in the timeline network

use super::key::entity_key;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Unique identifier for a node
///
/// Serializes as a plain string (the stable key of the node's name and type).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    /// Derive the key of an entity from its name and optional type
    pub fn for_entity(name: &str, entity_type: Option<&str>) -> Self {
        Self(entity_key(name, entity_type))
    }

    /// Create a NodeKey from an existing key string
    pub fn from_string(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Lightweight reference to a node, as carried by items and links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    pub key: NodeKey,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    /// Roles the node plays in the item that carries this reference
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contribution: Vec<String>,
}

impl NodeRef {
    pub fn new(name: impl Into<String>, node_type: Option<String>) -> Self {
        let name = name.into();
        Self {
            key: NodeKey::for_entity(&name, node_type.as_deref()),
            name,
            node_type,
            contribution: Vec::new(),
        }
    }

    pub fn with_contribution(mut self, contribution: Vec<String>) -> Self {
        self.contribution = contribution;
        self
    }
}

/// Ordering applied to a node's collaborator list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// By name
    #[serde(alias = "alpha")]
    Alphabetical,
    /// By number of shared items, most first
    #[default]
    Decreasing,
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpha" | "alphabetical" => Ok(Self::Alphabetical),
            "decreasing" => Ok(Self::Decreasing),
            other => Err(format!("unknown sort mode: {}", other)),
        }
    }
}

/// A contributor seen from one node's perspective, with the items they share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    pub key: NodeKey,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub collaborator_type: Option<String>,
    /// Kept visible by the rendering layer
    #[serde(default)]
    pub enabled: bool,
    /// Ids of the node's items that mention this collaborator
    pub items: Vec<String>,
}

impl Collaborator {
    pub fn shared_count(&self) -> usize {
        self.items.len()
    }
}

/// Enabled collaborators first, then the mode's own ordering.
pub(crate) fn compare_collaborators(a: &Collaborator, b: &Collaborator, mode: SortMode) -> Ordering {
    match (a.enabled, b.enabled) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }
    match mode {
        SortMode::Decreasing => b.shared_count().cmp(&a.shared_count()),
        SortMode::Alphabetical => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
    }
}

/// A first-level explorable entity (person, institution, place, artwork)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub key: NodeKey,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    /// Derived from the node's items on every update
    #[serde(default)]
    pub collaborators: Vec<Collaborator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting: Option<SortMode>,
}

impl Node {
    /// Create a node whose key derives from name and type
    pub fn new(name: impl Into<String>, node_type: Option<String>) -> Self {
        let name = name.into();
        Self {
            key: NodeKey::for_entity(&name, node_type.as_deref()),
            name,
            node_type,
            collaborators: Vec::new(),
            sorting: None,
        }
    }

    /// Create a node with an explicit key
    pub fn with_key(key: NodeKey, name: impl Into<String>, node_type: Option<String>) -> Self {
        Self {
            key,
            name: name.into(),
            node_type,
            collaborators: Vec::new(),
            sorting: None,
        }
    }

    pub fn to_ref(&self) -> NodeRef {
        NodeRef {
            key: self.key.clone(),
            name: self.name.clone(),
            node_type: self.node_type.clone(),
            contribution: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collab(name: &str, enabled: bool, count: usize) -> Collaborator {
        Collaborator {
            key: NodeKey::for_entity(name, None),
            name: name.to_string(),
            collaborator_type: None,
            enabled,
            items: (0..count).map(|i| format!("{}-{}", name, i)).collect(),
        }
    }

    #[test]
    fn node_key_serializes_as_string() {
        let key = NodeKey::from_string("abc");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"abc\"");
    }

    #[test]
    fn node_and_ref_share_key() {
        let node = Node::new("Musée du Louvre", Some("institution".to_string()));
        let r = NodeRef::new("Musée du Louvre", Some("institution".to_string()));
        assert_eq!(node.key, r.key);
    }

    #[test]
    fn sort_mode_parses_alias() {
        assert_eq!("alpha".parse::<SortMode>().unwrap(), SortMode::Alphabetical);
        let mode: SortMode = serde_json::from_str("\"alpha\"").unwrap();
        assert_eq!(mode, SortMode::Alphabetical);
        assert!("loudest".parse::<SortMode>().is_err());
    }

    #[test]
    fn enabled_overrides_count() {
        let b = collab("B", false, 5);
        let a = collab("A", true, 1);
        assert_eq!(compare_collaborators(&a, &b, SortMode::Decreasing), Ordering::Less);
        assert_eq!(compare_collaborators(&b, &a, SortMode::Alphabetical), Ordering::Greater);
    }

    #[test]
    fn alphabetical_ignores_case() {
        let a = collab("alice", false, 0);
        let b = collab("Bob", false, 0);
        assert_eq!(compare_collaborators(&a, &b, SortMode::Alphabetical), Ordering::Less);
    }
}
