//! JsonFileTransform: record rows read from a JSON file
//!
//! The file holds either a bare array of rows or `{ "data": [...] }`.
//! It is re-read on every request.

use super::error::AdapterError;
use super::records::{labels_from_records, transform_records, Record};
use super::traits::{NodeRequest, Transform};
use super::types::{NodeData, NodeLabel};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFile {
    Wrapped { data: Vec<Record> },
    Bare(Vec<Record>),
}

impl RecordFile {
    fn into_rows(self) -> Vec<Record> {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(rows) => rows,
        }
    }
}

/// Transform over a JSON file of ego/alter rows
pub struct JsonFileTransform {
    id: String,
    path: PathBuf,
}

impl JsonFileTransform {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }

    async fn read_rows(&self) -> Result<Vec<Record>, AdapterError> {
        debug!(path = %self.path.display(), "reading records");
        let bytes = tokio::fs::read(&self.path).await?;
        let file: RecordFile = serde_json::from_slice(&bytes)
            .map_err(|e| AdapterError::Malformed(format!("{}: {}", self.path.display(), e)))?;
        Ok(file.into_rows())
    }
}

#[async_trait]
impl Transform for JsonFileTransform {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self, request: &NodeRequest) -> Result<NodeData, AdapterError> {
        let rows = self.read_rows().await?;
        transform_records(&rows, request)
    }

    async fn node_labels(&self) -> Result<Vec<NodeLabel>, AdapterError> {
        let rows = self.read_rows().await?;
        Ok(labels_from_records(&rows))
    }
}
