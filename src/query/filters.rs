//! Read-time filter state

use crate::graph::NodeKey;
use serde::{Deserialize, Serialize};

/// View filters applied by every getter. Never touches stored data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    /// Excluded item/link types
    #[serde(default)]
    pub link_types: Vec<String>,
    #[serde(default)]
    pub time_from: Option<i32>,
    #[serde(default)]
    pub time_to: Option<i32>,
    #[serde(default)]
    pub focus: Option<NodeKey>,
}

/// A single filter mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filter", content = "value", rename_all = "snake_case")]
pub enum FilterUpdate {
    LinkTypes(Vec<String>),
    TimeFrom(Option<i32>),
    TimeTo(Option<i32>),
    Focus(Option<NodeKey>),
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::LinkTypes(types) => self.link_types = types,
            FilterUpdate::TimeFrom(year) => self.time_from = year,
            FilterUpdate::TimeTo(year) => self.time_to = year,
            FilterUpdate::Focus(key) => self.focus = key,
        }
    }

    pub fn is_excluded(&self, link_type: &str) -> bool {
        self.link_types.iter().any(|t| t == link_type)
    }

    /// Whether a year falls inside the time window; unset bounds are open.
    pub fn in_window(&self, year: i32) -> bool {
        self.time_from.map_or(true, |from| year >= from) && self.time_to.map_or(true, |to| year <= to)
    }

    /// Reset the time window to `[from, to]`, or clear it.
    pub(crate) fn reset_window(&mut self, bounds: Option<(i32, i32)>) {
        self.time_from = bounds.map(|(from, _)| from);
        self.time_to = bounds.map(|(_, to)| to);
    }
}
