//! Generation tracking for in-flight queries.

use crate::error::Result;
use crate::service::PendingQuery;
use tracing::debug;

/// Tracks a widget's in-flight queries and keeps only the newest answer.
///
/// Each issued query gets the next generation number and carries a key
/// (what was asked for) back out with its answer. When results arrive, the
/// one for the latest generation is returned and older ones are discarded.
#[derive(Debug)]
pub struct QueryTracker<T, K = ()> {
    latest: u64,
    in_flight: Vec<(u64, K, PendingQuery<T>)>,
}

/// The latest query's answer, with the key it was issued under.
#[derive(Debug)]
pub struct Answer<T, K = ()> {
    pub generation: u64,
    pub key: K,
    pub result: Result<T>,
}

impl<T> QueryTracker<T> {
    /// Start tracking an unkeyed query. Returns its generation.
    pub fn issue(&mut self, pending: PendingQuery<T>) -> u64 {
        self.issue_for((), pending)
    }
}

impl<T, K> QueryTracker<T, K> {
    pub fn new() -> Self {
        Self {
            latest: 0,
            in_flight: Vec::new(),
        }
    }

    /// Start tracking a query for `key`. Returns its generation.
    pub fn issue_for(&mut self, key: K, pending: PendingQuery<T>) -> u64 {
        self.latest += 1;
        self.in_flight.push((self.latest, key, pending));
        self.latest
    }

    /// Generation of the most recently issued query (0 if none).
    pub fn latest(&self) -> u64 {
        self.latest
    }

    /// Queries issued but not yet answered, stale ones included.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Collect arrived answers.
    ///
    /// Returns the latest generation's answer if it has arrived. Answers to
    /// superseded queries are dropped.
    pub fn poll(&mut self) -> Option<Answer<T, K>> {
        let latest = self.latest;
        let mut fresh = None;
        let mut waiting = Vec::with_capacity(self.in_flight.len());

        for (generation, key, mut pending) in self.in_flight.drain(..) {
            match pending.try_take() {
                None => waiting.push((generation, key, pending)),
                Some(result) if generation == latest => {
                    fresh = Some(Answer {
                        generation,
                        key,
                        result,
                    });
                }
                Some(_) => debug!(generation, latest, "discarding stale query result"),
            }
        }

        self.in_flight = waiting;
        fresh
    }
}

impl<T, K> Default for QueryTracker<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_result_wins() {
        let mut tracker: QueryTracker<&str> = QueryTracker::new();
        let (old_tx, old) = PendingQuery::channel();
        let (new_tx, new) = PendingQuery::channel();
        assert_eq!(tracker.issue(old), 1);
        assert_eq!(tracker.issue(new), 2);

        new_tx.succeed("new");
        let answer = tracker.poll().unwrap();
        assert_eq!(answer.generation, 2);
        assert_eq!(answer.result.unwrap(), "new");
        assert_eq!(tracker.in_flight(), 1);

        // The older answer lands afterwards and is dropped.
        old_tx.succeed("old");
        assert!(tracker.poll().is_none());
        assert!(tracker.is_idle());
    }

    #[test]
    fn test_nothing_arrived() {
        let mut tracker = QueryTracker::<u32>::new();
        let (_tx, pending) = PendingQuery::channel();
        tracker.issue(pending);
        assert!(tracker.poll().is_none());
        assert!(!tracker.is_idle());
    }

    #[test]
    fn test_answer_carries_its_key() {
        let mut tracker: QueryTracker<u32, &str> = QueryTracker::new();
        let (first_tx, first) = PendingQuery::channel();
        let (second_tx, second) = PendingQuery::channel();
        tracker.issue_for("first", first);
        tracker.issue_for("second", second);

        first_tx.succeed(1u32);
        second_tx.succeed(2u32);
        let answer = tracker.poll().unwrap();
        assert_eq!(answer.key, "second");
        assert_eq!(answer.result.unwrap(), 2);
        assert!(tracker.is_idle());
    }
}
