//! Application root wiring the bus, the query service, and the widgets.

use crate::config::DirectoryConfig;
use crate::data::EmployeeStore;
use crate::error::Result;
use crate::events::EventBus;
use crate::service::{EmployeeQueries, QueryService};
use crate::types::EmployeeFilter;
use crate::widgets::{DetailView, DetailWidget, ListView, ListWidget, SearchWidget};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// Interval between polls in [`Directory::pump_until_idle`].
const PUMP_INTERVAL: Duration = Duration::from_millis(5);

/// Everything a renderer needs to draw the directory.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectorySnapshot {
    /// The search form's draft filter.
    pub search: EmployeeFilter,
    /// Raw text of the name field.
    pub search_name: String,
    pub list: ListView,
    pub detail: DetailView,
}

/// The running directory.
///
/// Owns the one event bus for its lifetime. Widgets are mounted in
/// search, list, detail order; dropping the directory unmounts them and
/// releases their subscriptions.
pub struct Directory {
    bus: Arc<EventBus>,
    search: SearchWidget,
    list: ListWidget,
    detail: DetailWidget,
}

impl Directory {
    /// Start over the demo table.
    pub fn start(config: DirectoryConfig) -> Result<Self> {
        Self::with_store(EmployeeStore::demo(), config)
    }

    /// Start over a custom table.
    pub fn with_store(store: EmployeeStore, config: DirectoryConfig) -> Result<Self> {
        config.validate()?;
        let service = QueryService::new(store, config.service)?;
        info!(employees = service.store().len(), "directory started");
        Ok(Self::with_queries(Arc::new(service)))
    }

    /// Start over any query implementation.
    pub fn with_queries(service: Arc<dyn EmployeeQueries>) -> Self {
        let bus = Arc::new(EventBus::new());
        let search = SearchWidget::mount(Arc::clone(&bus));
        let list = ListWidget::mount(Arc::clone(&bus), Arc::clone(&service));
        let detail = DetailWidget::mount(&bus, service);

        Self {
            bus,
            search,
            list,
            detail,
        }
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn search(&self) -> &SearchWidget {
        &self.search
    }

    pub fn list(&self) -> &ListWidget {
        &self.list
    }

    pub fn detail(&self) -> &DetailWidget {
        &self.detail
    }

    /// Deliver arrived query results. Returns how many views changed.
    pub fn pump(&self) -> usize {
        usize::from(self.list.poll()) + usize::from(self.detail.poll())
    }

    /// True when neither list nor detail has a query outstanding.
    pub fn is_idle(&self) -> bool {
        self.list.is_idle() && self.detail.is_idle()
    }

    /// Pump until idle or until `timeout` passes. Returns whether idle.
    pub fn pump_until_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.pump();
            if self.is_idle() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(PUMP_INTERVAL);
        }
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        DirectorySnapshot {
            search: self.search.filter(),
            search_name: self.search.name(),
            list: self.list.view(),
            detail: self.detail.view(),
        }
    }
}
