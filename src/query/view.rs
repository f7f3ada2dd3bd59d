//! Filtered views over the store
//!
//! Items and links go through the same three stages, in order: type
//! exclusion, time window, focus. Focus filtering relies on multi-contributor
//! items having survived the earlier stages.

use super::filters::Filters;
use crate::graph::{GraphStore, Item, Link};

/// Items visible under `filters`.
///
/// With `bypass_time` the time window is ignored (type and focus still apply).
pub fn filtered_items<'a>(store: &'a GraphStore, filters: &Filters, bypass_time: bool) -> Vec<&'a Item> {
    let mut items: Vec<&Item> = store
        .items()
        .iter()
        .filter(|i| !i.types.iter().all(|t| filters.is_excluded(t)))
        .collect();

    if !bypass_time {
        items.retain(|i| filters.in_window(i.year));
    }

    if let Some(focus) = &filters.focus {
        let nodes = store.node_keys();
        items.retain(|i| {
            i.contributors.len() > 1
                && i.has_contributor(focus)
                && i
                    .contributors
                    .iter()
                    .any(|c| &c.key != focus && nodes.contains(&c.key))
        });
    }

    items
}

/// Links visible under `filters`.
///
/// The focus stage checks the originating item's contributors, not the
/// link endpoints.
pub fn filtered_links<'a>(store: &'a GraphStore, filters: &Filters) -> Vec<&'a Link> {
    let mut links: Vec<&Link> = store
        .links()
        .iter()
        .filter(|l| !filters.is_excluded(&l.link_type))
        .collect();

    links.retain(|l| filters.in_window(l.year));

    if let Some(focus) = &filters.focus {
        links.retain(|l| {
            store
                .item_by_id(&l.item)
                .is_some_and(|i| i.has_contributor(focus))
        });
    }

    links
}

/// Contiguous year range from one before the earliest item to one after
/// the latest. Empty when there are no items.
pub fn all_dates(items: &[Item]) -> Vec<i32> {
    let min = items.iter().map(|i| i.year).min();
    let max = items.iter().map(|i| i.year).max();
    match (min, max) {
        (Some(min), Some(max)) => (min.saturating_sub(1)..=max.saturating_add(1)).collect(),
        _ => Vec::new(),
    }
}

/// The padded range clipped to the filters' time window.
pub fn dates(store: &GraphStore, filters: &Filters) -> Vec<i32> {
    all_dates(store.items())
        .into_iter()
        .filter(|y| filters.in_window(*y))
        .collect()
}

/// Unique item types in first-appearance order.
pub fn link_types(items: &[Item]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for t in items.iter().flat_map(|i| i.types.iter()) {
        if !types.contains(t) {
            types.push(t.clone());
        }
    }
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ItemRecord, Node, NodeKey, NodeRef};
    use crate::query::FilterUpdate;
    use serde_json::json;

    fn key(name: &str) -> NodeKey {
        NodeKey::for_entity(name, None)
    }

    fn record(id: &str, owner: &str, contributors: &[&str], year: i32, types: &[&str]) -> ItemRecord {
        serde_json::from_value(json!({
            "id": id,
            "node": NodeRef::new(owner, None),
            "date": year.to_string(),
            "type": types,
            "contributors": contributors.iter().map(|n| json!({ "name": n })).collect::<Vec<_>>()
        }))
        .unwrap()
    }

    fn ids(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn item_survives_while_one_type_is_allowed() {
        let mut store = GraphStore::new();
        store.add_node(
            Node::new("N", None),
            vec![
                record("a", "N", &[], 1990, &["A"]),
                record("ab", "N", &[], 1990, &["A", "B"]),
                record("b", "N", &[], 1990, &["B"]),
            ],
        );
        let mut filters = Filters::new();
        filters.apply(FilterUpdate::LinkTypes(vec!["A".into()]));
        assert_eq!(ids(&filtered_items(&store, &filters, false)), vec!["ab", "b"]);
    }

    #[test]
    fn padded_and_clipped_dates() {
        let mut store = GraphStore::new();
        store.add_node(
            Node::new("N", None),
            vec![
                record("1", "N", &[], 1990, &["A"]),
                record("2", "N", &[], 1995, &["A"]),
                record("3", "N", &[], 2001, &["A"]),
            ],
        );
        assert_eq!(all_dates(store.items()), (1989..=2002).collect::<Vec<_>>());

        let mut filters = Filters::new();
        filters.apply(FilterUpdate::TimeFrom(Some(1992)));
        filters.apply(FilterUpdate::TimeTo(Some(1998)));
        assert_eq!(dates(&store, &filters), (1992..=1998).collect::<Vec<_>>());
    }

    #[test]
    fn padding_saturates_at_integer_bounds() {
        let mut store = GraphStore::new();
        store.add_node(Node::new("N", None), vec![record("1", "N", &[], 2000, &["A"])]);
        let mut item = store.items()[0].clone();
        item.year = i32::MAX;
        assert_eq!(all_dates(&[item.clone()]), vec![i32::MAX - 1, i32::MAX]);
        item.year = i32::MIN;
        assert_eq!(all_dates(&[item]), vec![i32::MIN, i32::MIN + 1]);
    }

    #[test]
    fn no_items_no_dates() {
        let store = GraphStore::new();
        assert!(all_dates(store.items()).is_empty());
        assert!(dates(&store, &Filters::new()).is_empty());
    }

    #[test]
    fn time_window_can_be_bypassed() {
        let mut store = GraphStore::new();
        store.add_node(
            Node::new("N", None),
            vec![record("old", "N", &[], 1900, &["A"]), record("new", "N", &[], 2000, &["A"])],
        );
        let mut filters = Filters::new();
        filters.apply(FilterUpdate::TimeFrom(Some(1950)));
        assert_eq!(ids(&filtered_items(&store, &filters, false)), vec!["new"]);
        assert_eq!(filtered_items(&store, &filters, true).len(), 2);
    }

    #[test]
    fn focus_requires_another_visible_node() {
        let mut store = GraphStore::new();
        store.add_node(
            Node::new("F", None),
            vec![record("i1", "F", &["X"], 1990, &["A"]), record("solo", "F", &["Y"], 1990, &["A"])],
        );
        store.add_node(
            Node::new("X", None),
            vec![record("i1", "X", &["F"], 1990, &["A"]), record("i2", "X", &["Y"], 1991, &["A"])],
        );

        let mut filters = Filters::new();
        filters.apply(FilterUpdate::Focus(Some(key("F"))));
        let visible = filtered_items(&store, &filters, false);
        assert_eq!(ids(&visible), vec!["i1", "i1"]);
    }

    #[test]
    fn unknown_focus_empties_views() {
        let mut store = GraphStore::new();
        store.add_node(Node::new("F", None), vec![record("i1", "F", &["X"], 1990, &["A"])]);
        let mut filters = Filters::new();
        filters.apply(FilterUpdate::Focus(Some(key("ghost"))));
        assert!(filtered_items(&store, &filters, false).is_empty());
        assert!(filtered_links(&store, &filters).is_empty());
    }

    #[test]
    fn link_focus_checks_the_originating_item() {
        let mut store = GraphStore::new();
        // "shared" is owned by X and Y; F only appears in "with-f"
        store.add_node(
            Node::new("X", None),
            vec![record("shared", "X", &["Y"], 1990, &["A"]), record("with-f", "X", &["Y", "F"], 1991, &["B"])],
        );
        store.add_node(
            Node::new("Y", None),
            vec![record("shared", "Y", &["X"], 1990, &["A"]), record("with-f", "Y", &["X", "F"], 1991, &["B"])],
        );
        store.add_node(Node::new("F", None), vec![record("other", "F", &["X"], 1992, &["C"])]);

        assert_eq!(store.links().len(), 4);

        let mut filters = Filters::new();
        filters.apply(FilterUpdate::Focus(Some(key("F"))));
        let links = filtered_links(&store, &filters);
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.item == "with-f"));
    }

    #[test]
    fn links_follow_type_and_time_filters() {
        let mut store = GraphStore::new();
        store.add_node(Node::new("X", None), vec![record("s", "X", &["Y"], 1990, &["A", "B"])]);
        store.add_node(Node::new("Y", None), vec![record("s", "Y", &["X"], 1990, &["A"])]);
        assert_eq!(store.links().len(), 3);

        let mut filters = Filters::new();
        filters.apply(FilterUpdate::LinkTypes(vec!["A".into()]));
        assert_eq!(filtered_links(&store, &filters).len(), 1);

        filters.apply(FilterUpdate::TimeFrom(Some(1991)));
        assert!(filtered_links(&store, &filters).is_empty());
    }

    #[test]
    fn link_types_are_unique_in_order() {
        let mut store = GraphStore::new();
        store.add_node(
            Node::new("N", None),
            vec![record("1", "N", &[], 1990, &["sale", "loan"]), record("2", "N", &[], 1991, &["loan", "gift"])],
        );
        assert_eq!(link_types(store.items()), vec!["sale", "loan", "gift"]);
    }
}
