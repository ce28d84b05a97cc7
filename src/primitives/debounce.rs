//! Debounce: coalesce a burst of triggers into one action after a quiet period.
//!
//! The debouncer holds at most one pending value. Every [`Debouncer::schedule`]
//! replaces that value and pushes the deadline out again, so only the last
//! trigger of a burst is delivered. Time is passed in explicitly; the caller's
//! event loop polls with [`Debouncer::poll`] and can sleep until
//! [`Debouncer::deadline`].

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `value` for delivery at `now + delay`, replacing any pending value.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
    }

    /// Drop the pending value without delivering it. Returns it, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_not_due_before_delay() {
        let start = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.schedule("a", start);

        assert_eq!(d.poll(start + Duration::from_millis(299)), None);
        assert!(d.deadline().is_some());
        assert_eq!(d.poll(start + DELAY), Some("a"));
        assert_eq!(d.deadline(), None);
        assert_eq!(d.poll(start + DELAY * 2), None);
    }

    #[test]
    fn test_reschedule_resets_timer_and_coalesces() {
        let start = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.schedule("g", start);
        d.schedule("gi", start + Duration::from_millis(200));
        d.schedule("git", start + Duration::from_millis(400));

        // First deadline would have been start+300; it was reset
        assert_eq!(d.poll(start + Duration::from_millis(500)), None);
        assert_eq!(d.deadline(), Some(start + Duration::from_millis(700)));
        assert_eq!(d.poll(start + Duration::from_millis(700)), Some("git"));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let start = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.schedule(1, start);

        assert_eq!(d.cancel(), Some(1));
        assert_eq!(d.deadline(), None);
        assert_eq!(d.poll(start + DELAY), None);
    }
}
