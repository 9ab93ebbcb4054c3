//! # Employee Directory
//!
//! A headless employee directory made of independent widgets that
//! coordinate only through a typed in-process event bus.
//!
//! ## Core Concepts
//!
//! - **Store**: A fixed, id-indexed table of employees
//! - **Query Service**: Lookups that complete after a simulated network delay
//! - **Event Bus**: Synchronous, ordered fan-out of typed events
//! - **Widgets**: Search, list, and detail view-models reacting to events
//!
//! ## Example
//!
//! ```ignore
//! use employee_directory::{Directory, DirectoryConfig, EmployeeId};
//!
//! let directory = Directory::start(DirectoryConfig::default())?;
//!
//! // Narrow the list
//! directory.search().set_name("john");
//! directory.search().submit();
//! directory.pump_until_idle(Duration::from_secs(10));
//!
//! // Show a record in the detail panel
//! directory.list().select(EmployeeId(1));
//! directory.pump_until_idle(Duration::from_secs(10));
//! println!("{:?}", directory.snapshot().detail);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod service;
pub mod types;
pub mod widgets;

// Re-exports
pub use app::{Directory, DirectorySnapshot};
pub use config::{DirectoryConfig, LatencyConfig, ServiceConfig};
pub use data::EmployeeStore;
pub use error::{DirectoryError, Result};
pub use events::{
    handler, Dispatch, Event, EventBus, EventKind, Handler, Subscription, SubscriptionId,
};
pub use service::{Completer, EmployeeQueries, PendingQuery, QueryService};
pub use types::*;
pub use widgets::{DetailView, DetailWidget, ListView, ListWidget, QueryTracker, SearchWidget};
