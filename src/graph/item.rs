//! Dated items and their contributors

use super::node::{NodeKey, NodeRef};
use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Label given to items that arrive without any type
pub const UNKNOWN_TYPE: &str = "unknown";

/// A participant in an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub key: NodeKey,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub contributor_type: Option<String>,
}

impl Contributor {
    pub fn new(name: impl Into<String>, contributor_type: Option<String>) -> Self {
        let name = name.into();
        Self {
            key: NodeKey::for_entity(&name, contributor_type.as_deref()),
            name,
            contributor_type,
        }
    }
}

impl From<&NodeRef> for Contributor {
    fn from(node: &NodeRef) -> Self {
        Self {
            key: node.key.clone(),
            name: node.name.clone(),
            contributor_type: node.node_type.clone(),
        }
    }
}

/// A time-stamped event or document owned by one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub node: NodeRef,
    pub title: String,
    pub date: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub contributors: Vec<Contributor>,
    pub contnames: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Item {
    pub fn has_contributor(&self, key: &NodeKey) -> bool {
        self.contributors.iter().any(|c| &c.key == key)
    }

    pub fn mentions(&self, name: &str) -> bool {
        self.contnames.iter().any(|n| n == name)
    }

    /// Normalize a transform record into a stored item.
    ///
    /// Returns `None` when no year can be derived from the record, or when
    /// the year falls outside `YEAR_RANGE`.
    pub fn from_record(record: ItemRecord) -> Option<Item> {
        let year = match record.year {
            Some(YearValue::Number(y)) => i32::try_from(y).ok(),
            Some(YearValue::Text(ref s)) => s.trim().parse().ok().or_else(|| year_from_date(s)),
            None => None,
        }
        .or_else(|| year_from_date(&record.date))
        .filter(|y| YEAR_RANGE.contains(y))?;

        let mut seen = HashSet::new();
        let mut types: Vec<String> = record
            .types
            .into_vec()
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();
        if types.is_empty() {
            types.push(UNKNOWN_TYPE.to_string());
        }

        let mut seen = HashSet::new();
        let mut contributors: Vec<Contributor> = record
            .contributors
            .into_iter()
            .map(|c| Contributor {
                key: c
                    .key
                    .unwrap_or_else(|| NodeKey::for_entity(&c.name, c.contributor_type.as_deref())),
                name: c.name,
                contributor_type: c.contributor_type,
            })
            .filter(|c| seen.insert(c.key.clone()))
            .collect();
        if !seen.contains(&record.node.key) {
            contributors.push(Contributor::from(&record.node));
        }

        let contnames = contributors.iter().map(|c| c.name.clone()).collect();

        Some(Item {
            id: record.id,
            node: record.node,
            title: record.title,
            date: record.date,
            year,
            types,
            contributors,
            contnames,
            link: record.link,
        })
    }
}

/// Years an item may carry; the timeline spans every year in between.
pub const YEAR_RANGE: RangeInclusive<i32> = -9999..=9999;

/// Derive an integer year from an ISO-ish date or a bare year string.
pub fn year_from_date(date: &str) -> Option<i32> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(d.year());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.year());
    }
    date.split('-').next()?.trim().parse().ok()
}

/// Year as it may appear in a transform payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    Number(i64),
    Text(String),
}

/// A single string or a list of strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s],
            Self::Many(v) => v,
        }
    }
}

impl Default for OneOrMany {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

/// Contributor as delivered by a transform; the key may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributorRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<NodeKey>,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub contributor_type: Option<String>,
}

impl From<Contributor> for ContributorRecord {
    fn from(c: Contributor) -> Self {
        Self {
            key: Some(c.key),
            name: c.name,
            contributor_type: c.contributor_type,
        }
    }
}

/// Item as delivered by a transform, before normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub node: NodeRef,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<YearValue>,
    #[serde(rename = "type", default)]
    pub types: OneOrMany,
    #[serde(default)]
    pub contributors: Vec<ContributorRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}
