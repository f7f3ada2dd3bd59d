//! RecordTransform: the generic ego/alter record transform
//!
//! Input is a flat table with one row per (item, ego, alter) triple, the
//! shape a SPARQL select or a spreadsheet export produces. Rows are grouped
//! by `uri` into items; the ego becomes the owning node and every alter a
//! contributor.

use super::error::AdapterError;
use super::traits::{NodeRequest, Transform};
use super::types::{NodeData, NodeLabel};
use crate::graph::{Contributor, ContributorRecord, ItemRecord, NodeRef, OneOrMany};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One row of an ego/alter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub uri: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    pub ego: String,
    #[serde(default, alias = "egoNature", skip_serializing_if = "Option::is_none")]
    pub ego_nature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alter: Option<String>,
    #[serde(default, alias = "alterNature", skip_serializing_if = "Option::is_none")]
    pub alter_nature: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Record {
    fn matches(&self, request: &NodeRequest) -> bool {
        self.ego == request.value
            && match &request.node_type {
                Some(t) => self.ego_nature.as_deref() == Some(t.as_str()),
                None => true,
            }
    }
}

/// Build the node and its items from the rows whose ego matches `request`.
pub fn transform_records(rows: &[Record], request: &NodeRequest) -> Result<NodeData, AdapterError> {
    let selected: Vec<&Record> = rows.iter().filter(|r| r.matches(request)).collect();
    let first = selected.first().ok_or_else(|| {
        AdapterError::NotFound(format!(
            "Value: {}\nThe query did not return any results.",
            request.value
        ))
    })?;

    let node_type = request.node_type.clone().or_else(|| first.ego_nature.clone());
    let node = NodeRef::new(request.value.clone(), node_type);

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Record>> = HashMap::new();
    for row in selected.iter().copied() {
        groups
            .entry(row.uri.as_str())
            .or_insert_with(|| {
                order.push(row.uri.as_str());
                Vec::new()
            })
            .push(row);
    }

    let items = order
        .into_iter()
        .map(|uri| item_from_group(uri, &groups[uri], &node))
        .collect();

    Ok(NodeData { node, items })
}

fn item_from_group(uri: &str, rows: &[&Record], node: &NodeRef) -> ItemRecord {
    let reference = rows[0];

    let mut seen = HashSet::new();
    let types: Vec<String> = rows
        .iter()
        .filter_map(|r| r.record_type.clone())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect();

    let mut seen = HashSet::new();
    let contributors: Vec<ContributorRecord> = rows
        .iter()
        .filter_map(|r| {
            r.alter
                .as_ref()
                .map(|name| Contributor::new(name.clone(), r.alter_nature.clone()))
        })
        .chain(std::iter::once(Contributor::from(node)))
        .filter(|c| seen.insert(c.key.clone()))
        .map(ContributorRecord::from)
        .collect();

    ItemRecord {
        id: uri.to_string(),
        node: node.clone().with_contribution(types.clone()),
        title: reference.title.clone(),
        date: reference.date.clone(),
        year: None,
        types: OneOrMany::Many(types),
        contributors,
        link: reference.link.clone(),
    }
}

/// Unique egos, sorted by value.
pub fn labels_from_records(rows: &[Record]) -> Vec<NodeLabel> {
    let mut seen = HashSet::new();
    let mut labels: Vec<NodeLabel> = rows
        .iter()
        .filter(|r| seen.insert((r.ego.as_str(), r.ego_nature.as_deref())))
        .map(|r| NodeLabel::new(r.ego.clone(), r.ego_nature.clone()))
        .collect();
    labels.sort_by(|a, b| a.value.cmp(&b.value));
    labels
}

/// Transform over rows held in memory
pub struct RecordTransform {
    id: String,
    rows: Vec<Record>,
}

impl RecordTransform {
    pub fn new(id: impl Into<String>, rows: Vec<Record>) -> Self {
        Self { id: id.into(), rows }
    }
}

#[async_trait]
impl Transform for RecordTransform {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self, request: &NodeRequest) -> Result<NodeData, AdapterError> {
        transform_records(&self.rows, request)
    }

    async fn node_labels(&self) -> Result<Vec<NodeLabel>, AdapterError> {
        Ok(labels_from_records(&self.rows))
    }
}
