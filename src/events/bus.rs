//! Event bus dispatching directory events to registered handlers.

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

use super::types::{handler, Dispatch, Event, EventKind, Handler, Subscription, SubscriptionId};

/// Internal registration state.
struct Registration {
    id: SubscriptionId,
    handler: Handler,
}

/// Registry mapping each event kind to an ordered list of handlers.
///
/// Dispatch is synchronous: `publish` returns after every handler for the
/// event's kind has run. The registry lock is released before handlers are
/// called, so a handler may publish, subscribe, or unsubscribe. A nested
/// publish runs to completion before the outer dispatch resumes. Changes to
/// the registry made during a dispatch apply from the next publish.
pub struct EventBus {
    /// Registrations by kind, in registration order.
    handlers: RwLock<HashMap<EventKind, Vec<Registration>>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Append a handler to the list for `kind`.
    ///
    /// The same handler may be registered more than once; it is then invoked
    /// once per registration.
    pub fn subscribe(&self, kind: EventKind, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.handlers
            .write()
            .entry(kind)
            .or_default()
            .push(Registration { id, handler });
        debug!(%kind, id = id.0, "subscribed");
        id
    }

    /// Register a closure.
    pub fn subscribe_fn<F>(&self, kind: EventKind, f: F) -> SubscriptionId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.subscribe(kind, handler(f))
    }

    /// Register a closure for as long as the returned guard lives.
    pub fn subscribe_scoped<F>(self: &Arc<Self>, kind: EventKind, f: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = self.subscribe_fn(kind, f);
        Subscription {
            bus: Arc::downgrade(self),
            kind,
            id,
        }
    }

    /// Remove the first registration of `handler` for `kind`.
    ///
    /// Handlers are compared by allocation. Returns false if not found.
    pub fn unsubscribe(&self, kind: EventKind, handler: &Handler) -> bool {
        let target = Arc::as_ptr(handler) as *const ();
        self.remove_first(kind, |reg| Arc::as_ptr(&reg.handler) as *const () == target)
    }

    /// Remove the registration with the given id. Returns false if not found.
    pub fn unsubscribe_id(&self, kind: EventKind, id: SubscriptionId) -> bool {
        self.remove_first(kind, |reg| reg.id == id)
    }

    fn remove_first<F>(&self, kind: EventKind, pred: F) -> bool
    where
        F: Fn(&Registration) -> bool,
    {
        let mut handlers = self.handlers.write();
        let Some(regs) = handlers.get_mut(&kind) else {
            return false;
        };
        match regs.iter().position(pred) {
            Some(index) => {
                let removed = regs.remove(index);
                debug!(%kind, id = removed.id.0, "unsubscribed");
                true
            }
            None => false,
        }
    }

    /// Invoke every handler registered for the event's kind, in order.
    ///
    /// A handler that panics is logged and counted; the rest still run.
    /// With no handlers registered this does nothing.
    pub fn publish(&self, event: Event) -> Dispatch {
        let kind = event.kind();

        let snapshot: Vec<(SubscriptionId, Handler)> = {
            let handlers = self.handlers.read();
            match handlers.get(&kind) {
                Some(regs) if !regs.is_empty() => regs
                    .iter()
                    .map(|reg| (reg.id, Arc::clone(&reg.handler)))
                    .collect(),
                _ => {
                    trace!(%kind, "no subscribers");
                    return Dispatch::default();
                }
            }
        };

        debug!(%kind, subscribers = snapshot.len(), "dispatching");

        let mut dispatch = Dispatch::default();
        for (id, handler) in snapshot {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(&event))) {
                Ok(()) => dispatch.notified += 1,
                Err(payload) => {
                    dispatch.faulted += 1;
                    warn!(
                        %kind,
                        id = id.0,
                        reason = panic_message(payload.as_ref()),
                        "subscriber panicked during dispatch"
                    );
                }
            }
        }

        dispatch
    }

    /// Number of registrations for `kind`.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.handlers.read().get(&kind).map_or(0, Vec::len)
    }

    /// Remove every registration.
    pub fn clear(&self) {
        self.handlers.write().clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
