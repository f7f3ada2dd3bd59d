//! Shared fixtures for the model integration tests
//!
//! `MockTransform` serves canned `{ node, items }` payloads keyed by the
//! requested value and counts how often it was asked.

#![allow(dead_code)]

use async_trait::async_trait;
use muvin::{AdapterError, NodeData, NodeKey, NodeLabel, NodeRequest, Transform};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn key(name: &str) -> NodeKey {
    NodeKey::for_entity(name, Some("person"))
}

/// An item owned by `owner`, shared with `others`.
pub fn item(id: &str, owner: &str, others: &[&str], year: i32, kind: &str) -> Value {
    let contributors: Vec<Value> = others
        .iter()
        .chain(std::iter::once(&owner))
        .map(|name| json!({ "name": name, "type": "person" }))
        .collect();
    json!({
        "id": id,
        "node": { "key": key(owner), "name": owner, "type": "person" },
        "title": id,
        "date": format!("{}-01-01", year),
        "type": kind,
        "contributors": contributors
    })
}

pub fn node_data(name: &str, items: Vec<Value>) -> NodeData {
    serde_json::from_value(json!({
        "node": { "key": key(name), "name": name, "type": "person" },
        "items": items
    }))
    .unwrap()
}

#[derive(Default)]
pub struct MockTransform {
    data: HashMap<String, NodeData>,
    failures: HashMap<String, String>,
    fetches: AtomicUsize,
}

impl MockTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, name: &str, items: Vec<Value>) -> Self {
        self.data.insert(name.to_string(), node_data(name, items));
        self
    }

    pub fn with_failure(mut self, name: &str, message: &str) -> Self {
        self.failures.insert(name.to_string(), message.to_string());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transform for MockTransform {
    fn id(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, request: &NodeRequest) -> Result<NodeData, AdapterError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.failures.get(&request.value) {
            return Err(AdapterError::NotFound(message.clone()));
        }
        self.data
            .get(&request.value)
            .cloned()
            .ok_or_else(|| AdapterError::NotFound(format!("Value: {}\nnot found", request.value)))
    }

    async fn node_labels(&self) -> Result<Vec<NodeLabel>, AdapterError> {
        let mut labels: Vec<NodeLabel> = self
            .data
            .keys()
            .map(|name| NodeLabel::new(name.clone(), Some("person".to_string())))
            .collect();
        labels.sort_by(|a, b| a.value.cmp(&b.value));
        Ok(labels)
    }
}

/// Three people: N1 and N2 share "deal", N2 and N3 share "loan".
pub fn three_people() -> MockTransform {
    MockTransform::new()
        .with_node(
            "N1",
            vec![item("deal", "N1", &["N2"], 1930, "sale"), item("solo", "N1", &[], 1925, "gift")],
        )
        .with_node(
            "N2",
            vec![item("deal", "N2", &["N1"], 1930, "sale"), item("loan", "N2", &["N3"], 1950, "loan")],
        )
        .with_node("N3", vec![item("loan", "N3", &["N2"], 1950, "loan")])
}
