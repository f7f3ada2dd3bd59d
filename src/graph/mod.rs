//! Core graph data structures

mod item;
mod key;
mod link;
mod node;
mod store;


pub use item::{
    year_from_date, Contributor, ContributorRecord, Item, ItemRecord, OneOrMany, YearValue,
    UNKNOWN_TYPE, YEAR_RANGE,
};
pub use key::{entity_key, stable_key};
pub use link::{derive_links, Link};
pub use node::{Collaborator, Node, NodeKey, NodeRef, SortMode};
pub use store::{GraphError, GraphResult, GraphStore};
