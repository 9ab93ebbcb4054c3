//! Detail panel for the selected employee.

use crate::events::{Event, EventBus, EventKind, Subscription};
use crate::service::EmployeeQueries;
use crate::types::{Employee, EmployeeId};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error};

use super::tracker::{Answer, QueryTracker};

pub const EMPTY_MESSAGE: &str = "Select an employee to view details.";

pub const LOADING_MESSAGE: &str = "Loading employee details...";

/// Message shown when a lookup fails for any reason other than not-found.
pub const FETCH_ERROR_MESSAGE: &str = "An error occurred while fetching employee details.";

/// What the panel presents. Exactly one state at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailView {
    /// Nothing selected yet.
    Empty,
    Loading,
    /// User-visible error text.
    Error(String),
    Loaded(Employee),
}

impl DetailView {
    pub fn employee(&self) -> Option<&Employee> {
        match self {
            DetailView::Loaded(employee) => Some(employee),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DetailView::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DetailView::Loading)
    }
}

/// Text shown when the requested employee does not exist.
pub fn not_found_message(id: EmployeeId) -> String {
    format!("Employee with ID {id} not found.")
}

struct DetailState {
    view: DetailView,
    /// Id of the most recent lookup.
    requested: Option<EmployeeId>,
    queries: QueryTracker<Option<Employee>, EmployeeId>,
}

/// Shows the employee most recently selected in the list.
pub struct DetailWidget {
    state: Arc<Mutex<DetailState>>,
    _subscription: Subscription,
}

impl DetailWidget {
    pub fn mount(bus: &Arc<EventBus>, service: Arc<dyn EmployeeQueries>) -> Self {
        let state = Arc::new(Mutex::new(DetailState {
            view: DetailView::Empty,
            requested: None,
            queries: QueryTracker::new(),
        }));

        let subscription = {
            let state = Arc::clone(&state);
            bus.subscribe_scoped(EventKind::EmployeeSelected, move |event| {
                if let Event::EmployeeSelected(id) = event {
                    let mut state = state.lock();
                    state.view = DetailView::Loading;
                    state.requested = Some(*id);
                    let generation = state.queries.issue_for(*id, service.get_by_id(*id));
                    debug!(%id, generation, "fetching employee details");
                }
            })
        };

        Self {
            state,
            _subscription: subscription,
        }
    }

    /// Apply an arrived lookup, if any. Returns true if the view changed.
    pub fn poll(&self) -> bool {
        let mut state = self.state.lock();
        let Some(Answer {
            generation,
            key: id,
            result,
        }) = state.queries.poll()
        else {
            return false;
        };

        state.view = match result {
            Ok(Some(employee)) => DetailView::Loaded(employee),
            Ok(None) => DetailView::Error(not_found_message(id)),
            Err(e) => {
                error!(generation, %id, error = %e, "error fetching employee details");
                DetailView::Error(FETCH_ERROR_MESSAGE.to_string())
            }
        };
        true
    }

    pub fn view(&self) -> DetailView {
        self.state.lock().view.clone()
    }

    /// Id of the most recent selection, if any.
    pub fn requested(&self) -> Option<EmployeeId> {
        self.state.lock().requested
    }

    pub fn is_idle(&self) -> bool {
        self.state.lock().queries.is_idle()
    }
}
