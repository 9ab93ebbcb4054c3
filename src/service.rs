//! Query service answering employee lookups with simulated latency.
//!
//! Every query returns a [`PendingQuery`] immediately. The answer is
//! computed and delivered later by a single timer thread that fires
//! completions in deadline order.

use crate::config::{LatencyConfig, ServiceConfig};
use crate::data::EmployeeStore;
use crate::error::{DirectoryError, Result};
use crate::types::{Employee, EmployeeFilter, EmployeeId};
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// The queries widgets issue against the directory.
pub trait EmployeeQueries: Send + Sync {
    /// Every employee, in store order.
    fn get_all(&self) -> PendingQuery<Vec<Employee>>;

    /// The employee with `id`, or `None` if there is no such employee.
    fn get_by_id(&self, id: EmployeeId) -> PendingQuery<Option<Employee>>;

    /// Employees matching every present field of `filter`.
    fn filter(&self, filter: &EmployeeFilter) -> PendingQuery<Vec<Employee>>;
}

/// Deferred result of a query.
#[derive(Debug)]
pub struct PendingQuery<T> {
    receiver: Receiver<Result<T>>,
    done: bool,
}

/// Producer side of a [`PendingQuery`].
///
/// Dropping a completer without completing resolves the query to
/// [`DirectoryError::FetchFailed`].
#[derive(Debug)]
pub struct Completer<T> {
    sender: Sender<Result<T>>,
}

impl<T> PendingQuery<T> {
    /// Create a linked completer/pending pair.
    pub fn channel() -> (Completer<T>, PendingQuery<T>) {
        let (sender, receiver) = bounded(1);
        (
            Completer { sender },
            PendingQuery {
                receiver,
                done: false,
            },
        )
    }

    /// Take the result if it has arrived (non-blocking).
    ///
    /// Returns `Some` exactly once; afterwards always `None`.
    pub fn try_take(&mut self) -> Option<Result<T>> {
        if self.done {
            return None;
        }
        let outcome = match self.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(abandoned()),
        };
        self.done = true;
        Some(outcome)
    }

    /// Wait up to `timeout` for the result.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Option<Result<T>> {
        if self.done {
            return None;
        }
        let outcome = match self.receiver.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => return None,
            Err(RecvTimeoutError::Disconnected) => Err(abandoned()),
        };
        self.done = true;
        Some(outcome)
    }

    /// Block until the result arrives.
    pub fn wait(mut self) -> Result<T> {
        if self.done {
            return Err(DirectoryError::FetchFailed("result already taken".to_string()));
        }
        self.done = true;
        self.receiver.recv().unwrap_or_else(|_| Err(abandoned()))
    }

    /// True once the result has been taken.
    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl<T> Completer<T> {
    pub fn complete(self, result: Result<T>) {
        // The query may have been dropped already; nobody is left to tell.
        let _ = self.sender.send(result);
    }

    pub fn succeed(self, value: T) {
        self.complete(Ok(value));
    }

    pub fn fail(self, reason: impl Into<String>) {
        self.complete(Err(DirectoryError::FetchFailed(reason.into())));
    }
}

fn abandoned() -> DirectoryError {
    DirectoryError::FetchFailed("query abandoned before completing".to_string())
}

// --- Timer ---

/// A completion waiting for its deadline.
struct TimedJob {
    due: Instant,
    seq: u64,
    run: Box<dyn FnOnce() + Send>,
}

impl PartialEq for TimedJob {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for TimedJob {}

impl PartialOrd for TimedJob {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimedJob {
    // Reversed: BinaryHeap is a max-heap and the earliest deadline must pop first.
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Single worker thread running jobs at their deadlines.
struct Timer {
    sender: Option<Sender<TimedJob>>,
    next_seq: AtomicU64,
    worker: Option<JoinHandle<()>>,
}

impl Timer {
    fn start() -> Result<Self> {
        let (sender, receiver) = unbounded();
        let worker = thread::Builder::new()
            .name("directory-latency".to_string())
            .spawn(move || run_timer(receiver))?;

        Ok(Self {
            sender: Some(sender),
            next_seq: AtomicU64::new(0),
            worker: Some(worker),
        })
    }

    fn schedule(&self, delay: Duration, run: Box<dyn FnOnce() + Send>) {
        let Some(due) = Instant::now().checked_add(delay) else {
            // Dropping the job abandons its query.
            warn!(?delay, "delay out of range, abandoning query");
            return;
        };
        let job = TimedJob {
            due,
            seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
            run,
        };
        if let Some(sender) = &self.sender {
            // A send failure drops the job, which abandons its query.
            let _ = sender.send(job);
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        // Disconnecting the channel stops the worker.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_timer(receiver: Receiver<TimedJob>) {
    let mut queue: BinaryHeap<TimedJob> = BinaryHeap::new();

    loop {
        let now = Instant::now();
        while queue.peek().is_some_and(|job| job.due <= now) {
            if let Some(job) = queue.pop() {
                trace!(seq = job.seq, "firing completion");
                (job.run)();
            }
        }

        let next = match queue.peek() {
            Some(job) => receiver.recv_timeout(job.due.saturating_duration_since(Instant::now())),
            None => receiver.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match next {
            Ok(job) => queue.push(job),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                debug!(abandoned = queue.len(), "latency timer shutting down");
                break;
            }
        }
    }
}

// --- Service ---

/// Answers queries against an [`EmployeeStore`] after a simulated delay.
pub struct QueryService {
    store: Arc<EmployeeStore>,
    config: ServiceConfig,
    timer: Timer,
}

impl QueryService {
    pub fn new(store: EmployeeStore, config: ServiceConfig) -> Result<Self> {
        Ok(Self {
            store: Arc::new(store),
            config,
            timer: Timer::start()?,
        })
    }

    /// Service over the demo table with the default latencies.
    pub fn demo() -> Result<Self> {
        Self::new(EmployeeStore::demo(), ServiceConfig::default())
    }

    /// Direct, synchronous access to the underlying table.
    pub fn store(&self) -> &EmployeeStore {
        &self.store
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn defer<T, F>(&self, op: &'static str, latency: LatencyConfig, answer: F) -> PendingQuery<T>
    where
        T: Send + 'static,
        F: FnOnce(&EmployeeStore) -> T + Send + 'static,
    {
        let (completer, pending) = PendingQuery::channel();
        let delay = latency.sample(&mut rand::thread_rng());
        let store = Arc::clone(&self.store);

        debug!(op, ?delay, "query issued");
        self.timer.schedule(
            delay,
            Box::new(move || {
                let value = answer(&store);
                debug!(op, "query completed");
                completer.succeed(value);
            }),
        );

        pending
    }
}

impl EmployeeQueries for QueryService {
    fn get_all(&self) -> PendingQuery<Vec<Employee>> {
        self.defer("get_all", self.config.get_all_latency, |store| {
            store.all().to_vec()
        })
    }

    fn get_by_id(&self, id: EmployeeId) -> PendingQuery<Option<Employee>> {
        self.defer("get_by_id", self.config.lookup_latency, move |store| {
            store.get(id).cloned()
        })
    }

    fn filter(&self, filter: &EmployeeFilter) -> PendingQuery<Vec<Employee>> {
        let filter = filter.clone();
        self.defer("filter", self.config.lookup_latency, move |store| {
            store.filter(&filter)
        })
    }
}
