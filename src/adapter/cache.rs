//! CachedTransform: per-node response cache on disk
//!
//! Successful responses are written to `<dir>/<transform id>/<node key>.json`
//! and served from there on later requests. Failures are never cached.

use super::error::AdapterError;
use super::traits::{NodeRequest, Transform};
use super::types::{NodeData, NodeLabel, TransformResponse};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Wraps another transform with a JSON file cache
pub struct CachedTransform {
    inner: Arc<dyn Transform>,
    dir: PathBuf,
}

impl CachedTransform {
    pub fn new(inner: Arc<dyn Transform>, dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            dir: dir.into(),
        }
    }

    fn path_for(&self, request: &NodeRequest) -> PathBuf {
        self.dir
            .join(self.inner.id())
            .join(format!("{}.json", request.key()))
    }

    async fn read_cached(&self, path: &Path) -> Option<NodeData> {
        let bytes = tokio::fs::read(path).await.ok()?;
        match serde_json::from_slice::<TransformResponse>(&bytes) {
            Ok(TransformResponse::Success(data)) => Some(data),
            Ok(TransformResponse::Failure { .. }) => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable cache entry");
                None
            }
        }
    }

    async fn write_cached(&self, path: &Path, data: &NodeData) -> Result<(), AdapterError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(data)?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl Transform for CachedTransform {
    fn id(&self) -> &str {
        self.inner.id()
    }

    async fn fetch(&self, request: &NodeRequest) -> Result<NodeData, AdapterError> {
        let path = self.path_for(request);
        if let Some(data) = self.read_cached(&path).await {
            debug!(value = %request.value, "cache hit");
            return Ok(data);
        }

        debug!(value = %request.value, "cache miss");
        let data = self.inner.fetch(request).await?;
        if let Err(e) = self.write_cached(&path, &data).await {
            warn!(path = %path.display(), error = %e, "failed to write cache entry");
        }
        Ok(data)
    }

    async fn node_labels(&self) -> Result<Vec<NodeLabel>, AdapterError> {
        self.inner.node_labels().await
    }
}
