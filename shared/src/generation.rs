//! Per-request generation counter used to drop stale responses.

use std::cell::Cell;
use std::rc::Rc;

/// Shared counter handed to every load of one kind.
///
/// `begin` marks a new request; when its response arrives the caller checks
/// `is_current` and discards the result if a newer request has started since.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration(Rc<Cell<u64>>);

/// Ticket returned by [`RequestGeneration::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Generation {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        Generation(next)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.0.get() == generation.0
    }
}

impl PartialEq for RequestGeneration {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_request_is_current() {
        let counter = RequestGeneration::new();
        let first = counter.begin();
        assert!(counter.is_current(first));
        let second = counter.begin();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }

    #[test]
    fn test_clones_share_the_counter() {
        let counter = RequestGeneration::new();
        let clone = counter.clone();
        let ticket = counter.begin();
        clone.begin();
        assert!(!counter.is_current(ticket));
        assert_eq!(counter, clone);
        assert_ne!(counter, RequestGeneration::new());
    }
}
