//! Employee list: follows the search filter and publishes selections.

use crate::events::{Dispatch, Event, EventBus, EventKind, Subscription};
use crate::service::EmployeeQueries;
use crate::types::{Employee, EmployeeFilter, EmployeeId};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, trace};

use super::tracker::{Answer, QueryTracker};

/// Shown while the list is being fetched.
pub const LOADING_MESSAGE: &str = "Loading employees...";

/// Shown when a fetch returned no employees.
pub const EMPTY_MESSAGE: &str = "No employees found matching the filter criteria.";

/// What the list presents.
#[derive(Clone, Debug, PartialEq)]
pub enum ListView {
    Loading,
    Empty,
    Rows {
        employees: Vec<Employee>,
        selected: Option<EmployeeId>,
    },
}

impl ListView {
    /// Placeholder text, if the view is not showing rows.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ListView::Loading => Some(LOADING_MESSAGE),
            ListView::Empty => Some(EMPTY_MESSAGE),
            ListView::Rows { .. } => None,
        }
    }
}

struct ListState {
    employees: Vec<Employee>,
    /// True while the latest query is outstanding.
    loading: bool,
    /// Filter of the latest query.
    filter: EmployeeFilter,
    /// Filter whose rows are shown. `None` until a fetch succeeds.
    loaded: Option<EmployeeFilter>,
    selected: Option<EmployeeId>,
    queries: QueryTracker<Vec<Employee>>,
}

impl ListState {
    /// Refetch unless `filter` is already loading or, with nothing loading,
    /// already shown. A failed fetch leaves its filter eligible again.
    fn apply_filter(&mut self, service: &dyn EmployeeQueries, filter: &EmployeeFilter) {
        let filter = filter.normalized();
        let current = if self.loading {
            Some(&self.filter)
        } else {
            self.loaded.as_ref()
        };
        if current == Some(&filter) {
            trace!(?filter, "filter unchanged, not refetching");
            return;
        }

        self.loading = true;
        let generation = self.queries.issue(service.filter(&filter));
        debug!(?filter, generation, "refetching employee list");
        self.filter = filter;
    }
}

/// Table of employees matching the current filter.
///
/// Holds one `FilterChanged` subscription for as long as it is mounted.
pub struct ListWidget {
    bus: Arc<EventBus>,
    state: Arc<Mutex<ListState>>,
    _subscription: Subscription,
}

impl ListWidget {
    /// Start loading every employee and follow filter changes.
    pub fn mount(bus: Arc<EventBus>, service: Arc<dyn EmployeeQueries>) -> Self {
        let filter = EmployeeFilter::all();
        let mut queries: QueryTracker<Vec<Employee>> = QueryTracker::new();
        queries.issue(service.filter(&filter));

        let state = Arc::new(Mutex::new(ListState {
            employees: Vec::new(),
            loading: true,
            filter,
            loaded: None,
            selected: None,
            queries,
        }));

        let subscription = {
            let state = Arc::clone(&state);
            bus.subscribe_scoped(EventKind::FilterChanged, move |event| {
                if let Event::FilterChanged(filter) = event {
                    state.lock().apply_filter(service.as_ref(), filter);
                }
            })
        };

        Self {
            bus,
            state,
            _subscription: subscription,
        }
    }

    /// Toggle the highlight on a row and publish the selection.
    ///
    /// The id is published on every click, deselection included.
    pub fn select(&self, id: EmployeeId) -> Dispatch {
        {
            let mut state = self.state.lock();
            state.selected = if state.selected == Some(id) {
                None
            } else {
                Some(id)
            };
        }
        self.bus.publish(Event::EmployeeSelected(id))
    }

    /// Apply an arrived result, if any. Returns true if the view changed.
    ///
    /// A successful load publishes [`Event::ListUpdated`] with the ids now
    /// shown.
    pub fn poll(&self) -> bool {
        let shown = {
            let mut state = self.state.lock();
            let Some(Answer {
                generation, result, ..
            }) = state.queries.poll()
            else {
                return false;
            };
            state.loading = false;
            match result {
                Ok(employees) => {
                    debug!(generation, count = employees.len(), "employee list loaded");
                    let ids: Vec<EmployeeId> = employees.iter().map(|e| e.id).collect();
                    state.employees = employees;
                    state.loaded = Some(state.filter.clone());
                    ids
                }
                Err(e) => {
                    error!(generation, error = %e, "error fetching employees");
                    // The rows on screen still belong to the last good filter.
                    state.filter = state.loaded.clone().unwrap_or_default();
                    return true;
                }
            }
        };

        self.bus.publish(Event::ListUpdated(shown));
        true
    }

    pub fn view(&self) -> ListView {
        let state = self.state.lock();
        if state.loading {
            ListView::Loading
        } else if state.employees.is_empty() {
            ListView::Empty
        } else {
            ListView::Rows {
                employees: state.employees.clone(),
                selected: state.selected,
            }
        }
    }

    /// The filter the list is currently loading, or else showing.
    pub fn filter(&self) -> EmployeeFilter {
        self.state.lock().filter.clone()
    }

    pub fn selected(&self) -> Option<EmployeeId> {
        self.state.lock().selected
    }

    /// True when no query is outstanding.
    pub fn is_idle(&self) -> bool {
        self.state.lock().queries.is_idle()
    }

    /// Number of queries issued since mount.
    pub fn queries_issued(&self) -> u64 {
        self.state.lock().queries.latest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{Completer, PendingQuery};
    use crate::types::Department;

    /// Hands every filter query back to the test to complete by hand.
    #[derive(Default)]
    struct ManualQueries {
        filters: Mutex<Vec<(EmployeeFilter, Completer<Vec<Employee>>)>>,
    }

    impl ManualQueries {
        fn take(&self, index: usize) -> (EmployeeFilter, Completer<Vec<Employee>>) {
            self.filters.lock().remove(index)
        }

        fn pending(&self) -> usize {
            self.filters.lock().len()
        }
    }

    impl EmployeeQueries for ManualQueries {
        fn get_all(&self) -> PendingQuery<Vec<Employee>> {
            self.filter(&EmployeeFilter::all())
        }

        fn get_by_id(&self, _id: EmployeeId) -> PendingQuery<Option<Employee>> {
            PendingQuery::channel().1
        }

        fn filter(&self, filter: &EmployeeFilter) -> PendingQuery<Vec<Employee>> {
            let (completer, pending) = PendingQuery::channel();
            self.filters.lock().push((filter.clone(), completer));
            pending
        }
    }

    fn rows(ids: &[u32]) -> Vec<Employee> {
        let all = crate::data::demo_employees();
        ids.iter()
            .map(|id| all.iter().find(|e| e.id.0 == *id).unwrap().clone())
            .collect()
    }

    fn mounted() -> (Arc<EventBus>, Arc<ManualQueries>, ListWidget) {
        let bus = Arc::new(EventBus::new());
        let service = Arc::new(ManualQueries::default());
        let list = ListWidget::mount(Arc::clone(&bus), service.clone());
        (bus, service, list)
    }

    #[test]
    fn test_mount_loads_everything() {
        let (_bus, service, list) = mounted();
        assert_eq!(list.view(), ListView::Loading);
        assert_eq!(service.pending(), 1);

        let (filter, completer) = service.take(0);
        assert!(filter.is_empty());
        completer.succeed(rows(&[1, 2]));

        assert!(list.poll());
        assert!(matches!(list.view(), ListView::Rows { ref employees, .. } if employees.len() == 2));
    }

    #[test]
    fn test_unchanged_filter_does_not_refetch() {
        let (bus, service, list) = mounted();
        bus.publish(Event::FilterChanged(EmployeeFilter::all()));
        bus.publish(Event::FilterChanged(EmployeeFilter::name("")));
        assert_eq!(service.pending(), 1);
        assert_eq!(list.queries_issued(), 1);
    }

    #[test]
    fn test_stale_result_discarded() {
        let (bus, service, list) = mounted();
        service.take(0).1.succeed(rows(&[1]));
        list.poll();

        bus.publish(Event::FilterChanged(
            EmployeeFilter::all().with_department(Department::Sales),
        ));
        bus.publish(Event::FilterChanged(
            EmployeeFilter::all().with_department(Department::Finance),
        ));
        let (_, sales) = service.take(0);
        let (_, finance) = service.take(0);

        finance.succeed(rows(&[6, 10]));
        assert!(list.poll());
        sales.succeed(rows(&[4, 9]));
        assert!(!list.poll());

        match list.view() {
            ListView::Rows { employees, .. } => {
                let ids: Vec<u32> = employees.iter().map(|e| e.id.0).collect();
                assert_eq!(ids, vec![6, 10]);
            }
            other => panic!("Expected rows, got {:?}", other),
        }
        assert!(list.is_idle());
    }

    #[test]
    fn test_fetch_failure_keeps_rows() {
        let (bus, service, list) = mounted();
        service.take(0).1.succeed(rows(&[1, 2, 3]));
        list.poll();

        bus.publish(Event::FilterChanged(EmployeeFilter::name("zzz")));
        assert_eq!(list.view(), ListView::Loading);
        service.take(0).1.fail("network down");
        assert!(list.poll());

        assert!(matches!(list.view(), ListView::Rows { ref employees, .. } if employees.len() == 3));
        assert_eq!(list.filter(), EmployeeFilter::all());
    }

    #[test]
    fn test_same_filter_after_failure_refetches() {
        let (bus, service, list) = mounted();
        service.take(0).1.succeed(rows(&[1, 2, 3]));
        list.poll();

        let sales = EmployeeFilter::all().with_department(Department::Sales);
        bus.publish(Event::FilterChanged(sales.clone()));
        service.take(0).1.fail("network down");
        assert!(list.poll());
        let before = list.queries_issued();

        bus.publish(Event::FilterChanged(sales.clone()));
        assert_eq!(list.queries_issued(), before + 1);
        assert_eq!(list.view(), ListView::Loading);

        let (filter, completer) = service.take(0);
        assert_eq!(filter, sales);
        completer.succeed(rows(&[4, 9]));
        assert!(list.poll());
        assert_eq!(list.filter(), sales);
        assert!(matches!(list.view(), ListView::Rows { ref employees, .. } if employees.len() == 2));
    }

    #[test]
    fn test_reset_after_failed_mount_reloads() {
        let (bus, service, list) = mounted();
        service.take(0).1.fail("network down");
        assert!(list.poll());
        assert_eq!(list.view(), ListView::Empty);

        bus.publish(Event::FilterChanged(EmployeeFilter::all()));
        assert_eq!(list.queries_issued(), 2);
        service.take(0).1.succeed(rows(&[1, 2]));
        assert!(list.poll());
        assert!(matches!(list.view(), ListView::Rows { ref employees, .. } if employees.len() == 2));
    }

    #[test]
    fn test_returning_to_shown_filter_while_loading_refetches() {
        let (bus, service, list) = mounted();
        service.take(0).1.succeed(rows(&[1, 2, 3]));
        list.poll();

        bus.publish(Event::FilterChanged(EmployeeFilter::name("zzz")));
        bus.publish(Event::FilterChanged(EmployeeFilter::all()));
        assert_eq!(list.queries_issued(), 3);
        assert_eq!(list.filter(), EmployeeFilter::all());
    }

    #[test]
    fn test_select_toggles_and_always_publishes() {
        let (bus, _service, list) = mounted();
        let published = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&published);
        bus.subscribe_fn(EventKind::EmployeeSelected, move |event| {
            if let Event::EmployeeSelected(id) = event {
                sink.lock().push(*id);
            }
        });

        list.select(EmployeeId(3));
        assert_eq!(list.selected(), Some(EmployeeId(3)));
        list.select(EmployeeId(3));
        assert_eq!(list.selected(), None);

        assert_eq!(*published.lock(), vec![EmployeeId(3), EmployeeId(3)]);
    }

    #[test]
    fn test_unmount_releases_subscription() {
        let (bus, _service, list) = mounted();
        assert_eq!(bus.subscriber_count(EventKind::FilterChanged), 1);
        drop(list);
        assert_eq!(bus.subscriber_count(EventKind::FilterChanged), 0);
    }
}
