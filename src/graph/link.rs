//! Co-occurrence links derived from items
//!
//! The same logical item fetched from several node perspectives shares one
//! id. Every ordered pair of records in such a group, owned by distinct
//! nodes, yields one link per type of the pair's source record.

use super::item::Item;
use super::node::NodeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A derived edge between two nodes sharing an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: NodeRef,
    pub target: NodeRef,
    #[serde(rename = "type")]
    pub link_type: String,
    /// Id of the originating item
    pub item: String,
    pub year: i32,
}

/// Derive every link from scratch.
///
/// Groups are visited in the order their id first appears in `items`,
/// so the output is deterministic for a given item ordering.
pub fn derive_links(items: &[Item]) -> Vec<Link> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Item>> = HashMap::new();

    for item in items {
        let group = groups.entry(item.id.as_str()).or_insert_with(|| {
            order.push(item.id.as_str());
            Vec::new()
        });
        group.push(item);
    }

    let mut links = Vec::new();
    for id in order {
        let group = &groups[id];
        if group.len() < 2 {
            continue;
        }
        for v1 in group {
            for v2 in group {
                if v1.node.key == v2.node.key {
                    continue;
                }
                for link_type in &v1.types {
                    links.push(Link {
                        source: v1.node.clone(),
                        target: v2.node.clone(),
                        link_type: link_type.clone(),
                        item: id.to_string(),
                        year: v1.year,
                    });
                }
            }
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::item::Contributor;

    fn item(id: &str, owner: &str, types: &[&str], year: i32) -> Item {
        let node = NodeRef::new(owner, None);
        Item {
            id: id.to_string(),
            contributors: vec![Contributor::from(&node)],
            contnames: vec![owner.to_string()],
            node,
            title: id.to_string(),
            date: year.to_string(),
            year,
            types: types.iter().map(|t| t.to_string()).collect(),
            link: None,
        }
    }

    #[test]
    fn single_perspective_yields_no_links() {
        let items = vec![item("i1", "A", &["sale"], 1940), item("i2", "A", &["sale"], 1941)];
        assert!(derive_links(&items).is_empty());
    }

    #[test]
    fn shared_item_yields_ordered_pairs_typed_by_source() {
        let items = vec![item("i1", "A", &["sale"], 1940), item("i1", "B", &["loan"], 1940)];
        let links = derive_links(&items);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].source.name, "A");
        assert_eq!(links[0].target.name, "B");
        assert_eq!(links[0].link_type, "sale");
        assert_eq!(links[1].source.name, "B");
        assert_eq!(links[1].link_type, "loan");
        assert!(links.iter().all(|l| l.item == "i1" && l.year == 1940));
    }

    #[test]
    fn one_link_per_type() {
        let items = vec![
            item("i1", "A", &["sale", "seizure"], 1942),
            item("i1", "B", &["sale"], 1942),
        ];
        let links = derive_links(&items);
        let from_a = links.iter().filter(|l| l.source.name == "A").count();
        assert_eq!(from_a, 2);
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn same_owner_twice_is_not_a_pair() {
        let items = vec![item("i1", "A", &["sale"], 1940), item("i1", "A", &["sale"], 1940)];
        assert!(derive_links(&items).is_empty());
    }
}
