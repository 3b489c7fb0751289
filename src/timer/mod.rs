//! Cancellable timers on a virtual clock
//!
//! The controllers never sleep. They schedule events here and the owner of
//! the queue decides how time passes: tests call [`TimerQueue::advance`]
//! directly, the CLI sleeps on the tokio clock until the next deadline.

use std::time::Duration;
use tracing::trace;

/// Deferred UI work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The typed query settled; resolve it
    Debounce(String),
    /// Layout settled after a container change; recalculate the map size
    Resize,
}

/// Handle for a scheduled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Scheduled<E> {
    id: TimerId,
    deadline: Duration,
    event: E,
}

/// Pending events ordered by deadline
///
/// Time starts at zero and only moves forward.
#[derive(Debug)]
pub struct TimerQueue<E> {
    now: Duration,
    next_id: u64,
    pending: Vec<Scheduled<E>>,
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `event` once `delay` has elapsed
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now + delay;
        trace!(id = id.0, ?deadline, "timer scheduled");
        self.pending.push(Scheduled { id, deadline, event });
        id
    }

    /// Cancel a pending event. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        before != self.pending.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|s| s.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Time until the earliest pending event, if any
    pub fn next_delay(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|s| s.deadline)
            .min()
            .map(|deadline| deadline.saturating_sub(self.now))
    }

    /// Move the clock forward and return every event that came due,
    /// earliest first (ties in scheduling order)
    pub fn advance(&mut self, by: Duration) -> Vec<E> {
        self.now += by;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.deadline <= now);
        self.pending = pending;

        due.sort_by_key(|s| (s.deadline, s.id.0));
        due.into_iter().map(|s| s.event).collect()
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_at_deadline() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(300), "search");

        assert!(timers.advance(ms(299)).is_empty());
        assert_eq!(timers.advance(ms(1)), vec!["search"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(ms(100), 1);

        assert!(timers.is_pending(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.advance(ms(500)).is_empty());
    }

    #[test]
    fn test_order_by_deadline_then_schedule() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(300), "c");
        timers.schedule(ms(100), "a");
        timers.schedule(ms(100), "b");

        assert_eq!(timers.advance(ms(1000)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_next_delay_tracks_clock() {
        let mut timers = TimerQueue::new();
        assert_eq!(timers.next_delay(), None);

        timers.schedule(ms(300), ());
        timers.advance(ms(120));
        assert_eq!(timers.next_delay(), Some(ms(180)));
        assert_eq!(timers.now(), ms(120));
    }

    #[test]
    fn test_schedule_relative_to_now() {
        let mut timers = TimerQueue::new();
        timers.advance(ms(1000));
        timers.schedule(ms(50), "late");

        assert!(timers.advance(ms(49)).is_empty());
        assert_eq!(timers.advance(ms(1)), vec!["late"]);
        assert_eq!(timers.len(), 0);
    }
}
