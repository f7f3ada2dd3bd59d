//! DataModel: the single entry point the rendering layer talks to.
//!
//! Owns the graph store, the filter state, the label index and the
//! transform that feeds them. Every mutator takes `&mut self`, so writes
//! into the store are serialized by construction; fetches inside a batch
//! are awaited one after the other.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::adapter::{AdapterError, LabelIndex, NodeLabel, NodeRequest, Transform};
use crate::graph::{GraphResult, GraphStore, Item, Link, Node, NodeKey, SortMode};
use crate::query::{self, FilterUpdate, Filters};

/// Outcome of a batch load
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    /// Keys of the nodes that were merged into the store, in load order
    pub loaded: Vec<NodeKey>,
    /// One message per request the transform could not resolve
    pub failures: Vec<String>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// All failures joined into a single notification, if there were any.
    pub fn notification(&self) -> Option<String> {
        if self.failures.is_empty() {
            None
        } else {
            Some(self.failures.join("\n"))
        }
    }
}

/// Network/timeline state for one view
pub struct DataModel {
    transform: Arc<dyn Transform>,
    store: GraphStore,
    filters: Filters,
    labels: LabelIndex,
    link_types: Vec<String>,
}

impl DataModel {
    pub fn new(transform: Arc<dyn Transform>) -> Self {
        Self {
            transform,
            store: GraphStore::new(),
            filters: Filters::new(),
            labels: LabelIndex::default(),
            link_types: Vec::new(),
        }
    }

    // --- Lifecycle ---

    /// Fetch and merge each requested node, one at a time.
    ///
    /// A failed request never interrupts the batch: its message is collected
    /// and the store keeps every node that succeeded. Afterwards the time
    /// window is reset to the full padded date range.
    pub async fn load(&mut self, requests: &[NodeRequest]) -> LoadReport {
        info!(transform = self.transform.id(), requests = requests.len(), "loading nodes");
        let mut report = LoadReport::default();

        for request in requests {
            match self.transform.fetch(request).await {
                Ok(data) => {
                    let node = data.to_node();
                    let key = node.key.clone();
                    self.store.add_node(node, data.items);
                    report.loaded.push(key);
                }
                Err(e) => {
                    warn!(value = %request.value, error = %e, "transform failed");
                    report.failures.push(e.to_string());
                }
            }
        }

        self.update_time();
        self.link_types = query::link_types(self.store.items());

        info!(
            loaded = report.loaded.len(),
            failed = report.failures.len(),
            items = self.store.items().len(),
            links = self.store.links().len(),
            "load finished"
        );
        report
    }

    /// Remove a node, then re-fetch every remaining node.
    pub async fn remove(&mut self, key: &NodeKey) -> LoadReport {
        if self.store.remove_node(key).is_none() {
            debug!(node = %key, "remove requested for unknown node");
        }
        self.reload().await
    }

    /// Clear the store and load the current node list again.
    pub async fn reload(&mut self) -> LoadReport {
        let requests = self.nodes_requests();
        self.clear();
        self.load(&requests).await
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.link_types.clear();
    }

    /// Swap the display positions of two nodes.
    pub fn switch_nodes(&mut self, a: usize, b: usize) -> GraphResult<()> {
        self.store.switch_nodes(a, b)
    }

    /// Load the explorable values offered for autocompletion.
    pub async fn fetch_node_labels(&mut self) -> Result<usize, AdapterError> {
        let labels = self.transform.node_labels().await?;
        debug!(count = labels.len(), "node labels loaded");
        self.labels = LabelIndex::new(labels);
        Ok(self.labels.len())
    }

    // --- Filters and ordering ---

    pub fn update_filters(&mut self, update: FilterUpdate) {
        self.filters.apply(update);
    }

    pub fn sort_collaborators(&mut self, key: &NodeKey, mode: SortMode) -> GraphResult<()> {
        self.store.sort_collaborators(key, mode)
    }

    pub fn set_collaborator_enabled(
        &mut self,
        key: &NodeKey,
        collaborator: &NodeKey,
        enabled: bool,
    ) -> GraphResult<()> {
        self.store.set_collaborator_enabled(key, collaborator, enabled)
    }

    fn update_time(&mut self) {
        let dates = self.all_dates();
        let bounds = dates.first().copied().zip(dates.last().copied());
        self.filters.reset_window(bounds);
    }

    // --- Checks ---

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn is_node_valid(&self, key: &NodeKey) -> bool {
        self.store.contains_node(key)
    }

    pub fn is_node_explorable(&self, name: &str, category: Option<&str>) -> bool {
        self.labels.is_node_explorable(name, category)
    }

    // --- Getters ---

    pub fn items(&self, bypass_time: bool) -> Vec<&Item> {
        query::filtered_items(&self.store, &self.filters, bypass_time)
    }

    pub fn links(&self) -> Vec<&Link> {
        query::filtered_links(&self.store, &self.filters)
    }

    pub fn item_by_id(&self, id: &str) -> Option<&Item> {
        self.store.item_by_id(id)
    }

    pub fn all_dates(&self) -> Vec<i32> {
        query::all_dates(self.store.items())
    }

    pub fn dates(&self) -> Vec<i32> {
        query::dates(&self.store, &self.filters)
    }

    pub fn link_types(&self) -> &[String] {
        &self.link_types
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn focus(&self) -> Option<&NodeKey> {
        self.filters.focus.as_ref()
    }

    pub fn nodes_keys(&self) -> &[NodeKey] {
        self.store.node_keys()
    }

    pub fn nodes_list(&self) -> Vec<&Node> {
        self.store.nodes().collect()
    }

    pub fn node_by_key(&self, key: &NodeKey) -> Option<&Node> {
        self.store.node(key)
    }

    /// Exact label lookup
    pub fn node_label(&self, value: &str) -> Option<&NodeLabel> {
        self.labels.get(value)
    }

    pub fn matching_labels(&self, query: &str) -> Vec<&NodeLabel> {
        self.labels.matching_labels(query)
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    fn nodes_requests(&self) -> Vec<NodeRequest> {
        self.store.nodes().map(NodeRequest::from).collect()
    }
}
