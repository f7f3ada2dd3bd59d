//! Node-label lookup for autocompletion and explorability checks

use super::types::NodeLabel;

/// The values a transform can resolve
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    labels: Vec<NodeLabel>,
}

impl LabelIndex {
    pub fn new(labels: Vec<NodeLabel>) -> Self {
        Self { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[NodeLabel] {
        &self.labels
    }

    /// Exact match on value, and on category when the label carries one.
    pub fn is_node_explorable(&self, name: &str, category: Option<&str>) -> bool {
        self.labels.iter().any(|l| match &l.label_type {
            Some(t) => l.value == name && category == Some(t.as_str()),
            None => l.value == name,
        })
    }

    /// Case-insensitive substring match, sorted by value.
    pub fn matching_labels(&self, query: &str) -> Vec<&NodeLabel> {
        let query = query.to_lowercase();
        let mut matches: Vec<&NodeLabel> = self
            .labels
            .iter()
            .filter(|l| l.value.to_lowercase().contains(&query))
            .collect();
        matches.sort_by(|a, b| a.value.cmp(&b.value));
        matches
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, value: &str) -> Option<&NodeLabel> {
        self.labels.iter().find(|l| l.value == value)
    }
}
