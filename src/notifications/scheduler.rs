// SPDX-License-Identifier: MPL-2.0
//! Cancellable one-shot timers.
//!
//! Timers are plain data: a deadline plus a payload. Nothing runs on its own;
//! the owner asks for expired timers with [`Scheduler::pop_expired`] and
//! handles them one at a time. Cancelling removes the entry outright, so a
//! cancelled timer can never be returned later.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Deadline-ordered set of timers.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    /// Ordered by deadline, ties broken by scheduling order.
    queue: BTreeMap<(Instant, TimerId), T>,
    deadlines: HashMap<TimerId, Instant>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `payload` to expire at `deadline`.
    pub fn schedule(&mut self, deadline: Instant, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.insert((deadline, id), payload);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancels a timer, returning its payload if it was still scheduled.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let deadline = self.deadlines.remove(&id)?;
        self.queue.remove(&(deadline, id))
    }

    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes and returns the earliest timer whose deadline is `<= now`.
    pub fn pop_expired(&mut self, now: Instant) -> Option<(TimerId, T)> {
        let entry = self.queue.first_entry()?;
        if entry.key().0 > now {
            return None;
        }
        let ((_, id), payload) = entry.remove_entry();
        self.deadlines.remove(&id);
        Some((id, payload))
    }

    /// Cancels everything.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.deadlines.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn expired_timers_come_out_in_deadline_order() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(start + Duration::from_millis(30), "late");
        scheduler.schedule(start + Duration::from_millis(10), "early");
        scheduler.schedule(start + Duration::from_millis(20), "middle");

        let now = start + Duration::from_millis(30);
        let fired: Vec<_> = std::iter::from_fn(|| scheduler.pop_expired(now))
            .map(|(_, payload)| payload)
            .collect();
        assert_eq!(fired, vec!["early", "middle", "late"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn timers_in_the_future_are_kept() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(start + Duration::from_secs(1), ());

        assert!(scheduler.pop_expired(start).is_none());
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_deadline(), Some(start + Duration::from_secs(1)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(start, 7);

        assert_eq!(scheduler.cancel(id), Some(7));
        assert!(!scheduler.is_scheduled(id));
        assert!(scheduler.pop_expired(start + Duration::from_secs(10)).is_none());
        assert_eq!(scheduler.cancel(id), None);
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        let first = scheduler.schedule(start, "a");
        let second = scheduler.schedule(start, "b");

        assert_eq!(scheduler.pop_expired(start), Some((first, "a")));
        assert_eq!(scheduler.pop_expired(start), Some((second, "b")));
    }

    #[test]
    fn clear_drops_all_timers() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(start, ());
        scheduler.schedule(start, ());

        scheduler.clear();
        assert!(scheduler.is_empty());
        assert!(!scheduler.is_scheduled(id));
        assert_eq!(scheduler.next_deadline(), None);
    }
}
