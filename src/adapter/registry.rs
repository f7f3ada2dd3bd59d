//! Transform selection by dataset
//!
//! Adapter kinds form a closed set; `build_transform` is the only place
//! that maps a kind to an implementation.

use super::cache::CachedTransform;
use super::error::AdapterError;
use super::json_file::JsonFileTransform;
use super::records::{Record, RecordTransform};
use super::traits::Transform;
use crate::config::MuvinConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The kinds of transform a dataset can use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdapterKind {
    /// Rows embedded in the configuration
    Inline { records: Vec<Record> },
    /// Rows read from a JSON file
    JsonFile { path: PathBuf },
}

/// Build the transform for one dataset, wrapped in a cache when `cache_dir` is set.
pub fn build_transform(id: &str, kind: &AdapterKind, cache_dir: Option<&Path>) -> Arc<dyn Transform> {
    let transform: Arc<dyn Transform> = match kind {
        AdapterKind::Inline { records } => Arc::new(RecordTransform::new(id, records.clone())),
        AdapterKind::JsonFile { path } => Arc::new(JsonFileTransform::new(id, path.clone())),
    };
    match cache_dir {
        Some(dir) => Arc::new(CachedTransform::new(transform, dir)),
        None => transform,
    }
}

/// Transforms by app name
#[derive(Default)]
pub struct TransformRegistry {
    transforms: HashMap<String, Arc<dyn Transform>>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &MuvinConfig) -> Self {
        let mut registry = Self::new();
        for (name, kind) in &config.apps {
            let transform = build_transform(name, kind, config.cache_dir.as_deref());
            registry.register(name.clone(), transform);
        }
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, transform: Arc<dyn Transform>) {
        self.transforms.insert(name.into(), transform);
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Transform>, AdapterError> {
        self.transforms
            .get(name)
            .cloned()
            .ok_or_else(|| AdapterError::UnknownApp(name.to_string()))
    }

    /// Registered app names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.transforms.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::NodeRequest;

    #[test]
    fn kind_deserializes_from_tag() {
        let kind: AdapterKind =
            serde_yaml::from_str("kind: json_file\npath: data/records.json\n").unwrap();
        assert_eq!(kind, AdapterKind::JsonFile { path: PathBuf::from("data/records.json") });
    }

    #[tokio::test]
    async fn inline_kind_builds_a_record_transform() {
        let kind: AdapterKind = serde_yaml::from_str(
            "kind: inline\nrecords:\n  - { uri: u1, date: '1937', ego: Gurlitt }\n",
        )
        .unwrap();
        let transform = build_transform("sample", &kind, None);
        assert_eq!(transform.id(), "sample");
        let data = transform.fetch(&NodeRequest::new("Gurlitt")).await.unwrap();
        assert_eq!(data.items.len(), 1);
    }

    #[test]
    fn unknown_app_is_reported() {
        let registry = TransformRegistry::new();
        let err = registry.get("crobora").err().unwrap();
        assert_eq!(err.to_string(), "No transform registered for app 'crobora'");
    }

    #[test]
    fn registry_is_built_from_config() {
        let config = MuvinConfig::from_yaml(
            "apps:\n  b:\n    kind: inline\n    records: []\n  a:\n    kind: json_file\n    path: x.json\n",
        )
        .unwrap();
        let registry = TransformRegistry::from_config(&config);
        assert_eq!(registry.names(), vec!["a", "b"]);
        assert!(registry.get("a").is_ok());
    }
}
