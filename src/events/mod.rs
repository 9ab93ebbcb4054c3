//! Typed publish/subscribe bus connecting the widgets.
//!
//! This module provides in-process, synchronous fan-out of directory events:
//! - Employee selection
//! - Filter changes
//! - List updates
//!
//! The bus supports:
//! - Handlers invoked in registration order
//! - Removal by handler identity, by registration id, or by dropping a
//!   scoped [`Subscription`]
//! - Nested publishing from inside a handler
//! - Isolation of panicking handlers
//!
//! # Example
//!
//! ```ignore
//! let bus = Arc::new(EventBus::new());
//!
//! let _sub = bus.subscribe_scoped(EventKind::EmployeeSelected, |event| {
//!     if let Event::EmployeeSelected(id) = event {
//!         println!("selected {id}");
//!     }
//! });
//!
//! bus.publish(Event::EmployeeSelected(EmployeeId(3)));
//! ```

mod bus;
mod types;

pub use bus::EventBus;
pub use types::{handler, Dispatch, Event, EventKind, Handler, Subscription, SubscriptionId};
