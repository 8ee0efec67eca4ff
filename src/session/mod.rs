//! Request bookkeeping for view state.
//!
//! Fetches that feed the same piece of state can overlap (a dropdown changes
//! twice before the first response lands). Each fetch takes a [`Ticket`]
//! before it starts and may only commit if no newer ticket has been issued,
//! so a late response never overwrites a newer one.

mod dashboard;

pub use dashboard::*;

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

/// Proof that a fetch was started at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Monotonically increasing request generation.
#[derive(Debug, Default)]
pub struct Generation {
    issued: AtomicU64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the newest one issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }
}

/// A value that only accepts results from the newest fetch.
#[derive(Debug, Default)]
pub struct Latest<T> {
    generation: Generation,
    value: RwLock<T>,
}

impl<T: Clone> Latest<T> {
    pub fn new(initial: T) -> Self {
        Self {
            generation: Generation::new(),
            value: RwLock::new(initial),
        }
    }

    pub fn begin(&self) -> Ticket {
        self.generation.begin()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.is_current(ticket)
    }

    /// Store `value` if `ticket` is still current. Returns whether it was stored.
    pub async fn commit(&self, ticket: Ticket, value: T) -> bool {
        let mut slot = self.value.write().await;
        if !self.generation.is_current(ticket) {
            debug!("Discarding stale result from {:?}", ticket);
            return false;
        }
        *slot = value;
        true
    }

    pub async fn get(&self) -> T {
        self.value.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes() {
        let generation = Generation::new();
        let first = generation.begin();
        assert!(generation.is_current(first));

        let second = generation.begin();
        assert!(second > first);
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[tokio::test]
    async fn test_late_response_does_not_clobber() {
        let latest = Latest::new(Vec::<i64>::new());

        let slow = latest.begin();
        let fast = latest.begin();

        assert!(latest.commit(fast, vec![2]).await);
        assert!(!latest.commit(slow, vec![1]).await);
        assert_eq!(latest.get().await, vec![2]);
    }

    #[tokio::test]
    async fn test_sequential_fetches_both_commit() {
        let latest = Latest::new(0);

        let first = latest.begin();
        assert!(latest.commit(first, 1).await);

        let second = latest.begin();
        assert!(latest.commit(second, 2).await);
        assert_eq!(latest.get().await, 2);
    }
}
