//! Headless widgets coordinated over the event bus.
//!
//! Each widget owns its view state and exposes it as data; drawing it is
//! left to the embedding UI. Widgets never call each other. They talk only
//! through [`EventBus`](crate::EventBus) events:
//!
//! ```text
//! SearchWidget --FilterChanged--> ListWidget --EmployeeSelected--> DetailWidget
//! ```
//!
//! Query results are applied when a widget is polled. Every widget numbers
//! its queries and applies only the latest one, so a slow answer to an old
//! query never overwrites a newer one.

mod detail;
mod list;
mod search;
mod tracker;

pub use detail::{DetailView, DetailWidget};
pub use list::{ListView, ListWidget};
pub use search::SearchWidget;
pub use tracker::{Answer, QueryTracker};
