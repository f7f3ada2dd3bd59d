//! Query layer: filter state and the filtered views derived from it

mod filters;
mod view;

pub use filters::{FilterUpdate, Filters};
pub use view::{all_dates, dates, filtered_items, filtered_links, link_types};
