//! Event types for the directory bus.

use crate::types::{EmployeeFilter, EmployeeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Weak};

use super::bus::EventBus;

/// Discriminator identifying what an event represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "EMPLOYEE_SELECTED")]
    EmployeeSelected,
    #[serde(rename = "EMPLOYEE_FILTER_CHANGED")]
    FilterChanged,
    #[serde(rename = "EMPLOYEE_LIST_UPDATED")]
    ListUpdated,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::EmployeeSelected,
        EventKind::FilterChanged,
        EventKind::ListUpdated,
    ];
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::EmployeeSelected => "EMPLOYEE_SELECTED",
            EventKind::FilterChanged => "EMPLOYEE_FILTER_CHANGED",
            EventKind::ListUpdated => "EMPLOYEE_LIST_UPDATED",
        };
        f.write_str(name)
    }
}

/// Events carried by the bus. The payload shape is fixed by the variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Event {
    /// A row was clicked in the list (selection or deselection).
    #[serde(rename = "EMPLOYEE_SELECTED")]
    EmployeeSelected(EmployeeId),

    /// The search form's filter changed or was submitted.
    #[serde(rename = "EMPLOYEE_FILTER_CHANGED")]
    FilterChanged(EmployeeFilter),

    /// The list finished loading; carries the ids now shown.
    #[serde(rename = "EMPLOYEE_LIST_UPDATED")]
    ListUpdated(Vec<EmployeeId>),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::EmployeeSelected(_) => EventKind::EmployeeSelected,
            Event::FilterChanged(_) => EventKind::FilterChanged,
            Event::ListUpdated(_) => EventKind::ListUpdated,
        }
    }
}

/// A registered callback. Identity is the `Arc` allocation.
pub type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

/// Wrap a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Unique identifier for a registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Outcome of a single publish.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Handlers that returned normally.
    pub notified: usize,
    /// Handlers that panicked.
    pub faulted: usize,
}

impl Dispatch {
    /// Total handlers invoked.
    pub fn invoked(&self) -> usize {
        self.notified + self.faulted
    }
}

/// Scoped registration, released when dropped.
///
/// Holds only a weak reference to the bus, so an outstanding subscription
/// never keeps the bus alive.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    pub(super) bus: Weak<EventBus>,
    pub(super) kind: EventKind,
    pub(super) id: SubscriptionId,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Unsubscribe now. Equivalent to dropping.
    pub fn release(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe_id(self.kind, self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_wire_shape() {
        let event = Event::EmployeeSelected(EmployeeId(1));
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "EMPLOYEE_SELECTED", "payload": 1})
        );

        let event = Event::FilterChanged(EmployeeFilter::name("John"));
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "EMPLOYEE_FILTER_CHANGED", "payload": {"name": "John"}})
        );
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            Event::ListUpdated(vec![]).kind(),
            EventKind::ListUpdated
        );
        assert_eq!(
            Event::FilterChanged(EmployeeFilter::all()).kind().to_string(),
            "EMPLOYEE_FILTER_CHANGED"
        );
    }
}
