//! Search form state.

use crate::error::Result;
use crate::events::{Dispatch, Event, EventBus};
use crate::types::{Department, EmployeeFilter, EmployeeStatus};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct Draft {
    name: String,
    department: Option<Department>,
    status: Option<EmployeeStatus>,
}

impl Draft {
    fn to_filter(&self) -> EmployeeFilter {
        EmployeeFilter {
            name: (!self.name.is_empty()).then(|| self.name.clone()),
            department: self.department,
            status: self.status,
        }
    }
}

/// Draft filter edited by the user.
///
/// Every edit, submit, and reset publishes [`Event::FilterChanged`] carrying
/// only the fields that are set.
pub struct SearchWidget {
    bus: Arc<EventBus>,
    draft: Mutex<Draft>,
}

impl SearchWidget {
    pub fn mount(bus: Arc<EventBus>) -> Self {
        Self {
            bus,
            draft: Mutex::new(Draft::default()),
        }
    }

    pub fn set_name(&self, name: impl Into<String>) -> Dispatch {
        self.edit(|draft| draft.name = name.into())
    }

    pub fn set_department(&self, department: Option<Department>) -> Dispatch {
        self.edit(|draft| draft.department = department)
    }

    /// Set the department from a form label; `""` means all departments.
    pub fn set_department_label(&self, label: &str) -> Result<Dispatch> {
        let department = match label {
            "" => None,
            label => Some(label.parse()?),
        };
        Ok(self.set_department(department))
    }

    pub fn set_status(&self, status: Option<EmployeeStatus>) -> Dispatch {
        self.edit(|draft| draft.status = status)
    }

    /// Set the status from a form label; `""` means all statuses.
    pub fn set_status_label(&self, label: &str) -> Result<Dispatch> {
        let status = match label {
            "" => None,
            label => Some(label.parse()?),
        };
        Ok(self.set_status(status))
    }

    /// Publish the current draft.
    pub fn submit(&self) -> Dispatch {
        let filter = self.filter();
        debug!(?filter, "search submitted");
        self.bus.publish(Event::FilterChanged(filter))
    }

    /// Clear every field and publish the empty filter.
    pub fn reset(&self) -> Dispatch {
        *self.draft.lock() = Draft::default();
        debug!("search reset");
        self.bus.publish(Event::FilterChanged(EmployeeFilter::all()))
    }

    /// The draft as a filter, with unset fields omitted.
    pub fn filter(&self) -> EmployeeFilter {
        self.draft.lock().to_filter()
    }

    /// Current text of the name field.
    pub fn name(&self) -> String {
        self.draft.lock().name.clone()
    }

    pub fn department(&self) -> Option<Department> {
        self.draft.lock().department
    }

    pub fn status(&self) -> Option<EmployeeStatus> {
        self.draft.lock().status
    }

    fn edit<F>(&self, f: F) -> Dispatch
    where
        F: FnOnce(&mut Draft),
    {
        let filter = {
            let mut draft = self.draft.lock();
            f(&mut draft);
            draft.to_filter()
        };
        self.bus.publish(Event::FilterChanged(filter))
    }
}
