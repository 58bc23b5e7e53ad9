//! Search Debounce
//!
//! Only the last keystroke inside the quiet window triggers a refresh.
//! Each keystroke takes a ticket; a timer that wakes up holding an old
//! ticket does nothing.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct Debouncer {
    latest: Rc<Cell<u64>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a keystroke and get its ticket.
    pub fn ticket(&self) -> u64 {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        next
    }

    /// Whether no newer keystroke arrived since `ticket` was taken.
    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }

    /// Drop any pending timer, e.g. when the search is cleared explicitly.
    pub fn cancel(&self) {
        self.ticket();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_ticket_fires() {
        let debouncer = Debouncer::new();
        let first = debouncer.ticket();
        let second = debouncer.ticket();
        assert!(!debouncer.is_latest(first));
        assert!(debouncer.is_latest(second));
    }

    #[test]
    fn test_cancel_invalidates_pending() {
        let debouncer = Debouncer::new();
        let pending = debouncer.ticket();
        debouncer.cancel();
        assert!(!debouncer.is_latest(pending));
    }

    #[test]
    fn test_clones_share_tickets() {
        let debouncer = Debouncer::new();
        let other = debouncer.clone();
        let ticket = debouncer.ticket();
        assert!(other.is_latest(ticket));
        other.ticket();
        assert!(!debouncer.is_latest(ticket));
    }
}
