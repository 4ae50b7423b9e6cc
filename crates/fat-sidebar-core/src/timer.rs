//! One-shot timer queue for Fat Sidebar.
//!
//! Timers are measured against an instant supplied by the caller rather than
//! read from the system clock. The host event loop passes its own `now` to
//! [`TimerManager::process_expired`], which keeps timer-driven state machines
//! deterministic under test.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::{TimerError, TimerResult};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// Manages pending one-shot timers.
#[derive(Debug, Default)]
pub struct TimerManager {
    /// Fire time of every pending timer.
    timers: SlotMap<TimerId, Instant>,
    /// Priority queue of pending timer fires. Entries for stopped timers are
    /// discarded lazily.
    queue: BinaryHeap<TimerQueueEntry>,
}

impl TimerManager {
    /// Create a new timer manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a one-shot timer that fires `duration` after `now`.
    pub fn start_one_shot(&mut self, now: Instant, duration: Duration) -> TimerId {
        let fire_time = now + duration;
        let id = self.timers.insert(fire_time);
        self.queue.push(TimerQueueEntry { id, fire_time });

        tracing::trace!(target: targets::TIMER, ?id, ?duration, "timer started");
        id
    }

    /// Stop and remove a pending timer.
    pub fn stop(&mut self, id: TimerId) -> TimerResult<()> {
        match self.timers.remove(id) {
            Some(_) => {
                tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
                Ok(())
            }
            None => Err(TimerError::InvalidTimerId),
        }
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Get the duration from `now` until the next timer fires, if any.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        self.discard_stopped();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_duration_since(now))
    }

    /// Remove and return every timer whose fire time is at or before `now`,
    /// earliest first.
    #[tracing::instrument(skip(self), target = "fat_sidebar_core::timer", level = "trace")]
    pub fn process_expired(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            if self.timers.remove(entry.id).is_some() {
                tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
                fired.push(entry.id);
            }
        }

        fired
    }

    /// Get the number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    fn discard_stopped(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = TimerManager::new();
        let start = Instant::now();
        let id = timers.start_one_shot(start, Duration::from_millis(400));

        assert!(timers.process_expired(start + Duration::from_millis(399)).is_empty());
        assert_eq!(timers.process_expired(start + Duration::from_millis(400)), vec![id]);
        assert!(timers.process_expired(start + Duration::from_secs(5)).is_empty());
        assert!(!timers.is_active(id));
    }

    #[test]
    fn test_stop_prevents_fire() {
        let mut timers = TimerManager::new();
        let start = Instant::now();
        let id = timers.start_one_shot(start, Duration::from_millis(10));

        assert!(timers.stop(id).is_ok());
        assert_eq!(timers.stop(id), Err(TimerError::InvalidTimerId));
        assert!(timers.process_expired(start + Duration::from_secs(1)).is_empty());
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_expired_in_fire_order() {
        let mut timers = TimerManager::new();
        let start = Instant::now();
        let late = timers.start_one_shot(start, Duration::from_millis(30));
        let early = timers.start_one_shot(start, Duration::from_millis(10));

        let fired = timers.process_expired(start + Duration::from_millis(50));
        assert_eq!(fired, vec![early, late]);
    }

    #[test]
    fn test_time_until_next_skips_stopped() {
        let mut timers = TimerManager::new();
        let start = Instant::now();
        let first = timers.start_one_shot(start, Duration::from_millis(10));
        timers.start_one_shot(start, Duration::from_millis(40));

        assert_eq!(timers.time_until_next(start), Some(Duration::from_millis(10)));
        timers.stop(first).unwrap();
        assert_eq!(timers.time_until_next(start), Some(Duration::from_millis(40)));
        assert_eq!(
            timers.time_until_next(start + Duration::from_secs(1)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_time_until_next_empty() {
        let mut timers = TimerManager::new();
        assert_eq!(timers.time_until_next(Instant::now()), None);
    }
}
