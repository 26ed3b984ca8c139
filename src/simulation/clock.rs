//! Logical simulation clock and pending-event schedule
//!
//! The clock owns the current logical time and every event that has been scheduled
//! but not yet delivered. Events are delivered in `(time, sequence)` order, where the
//! sequence is a counter stamped at scheduling time. Two events scheduled for the same
//! instant are therefore delivered in the order they were scheduled, regardless of how
//! the heap happens to arrange equal keys.

use crate::simulation::{SimulationError, SimulationResult};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

/// An event waiting in the schedule
#[derive(Debug, Clone)]
struct ScheduledEvent<E> {
    time: f64,
    sequence: u64,
    event: E,
}

impl<E> PartialEq for ScheduledEvent<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for ScheduledEvent<E> {}

impl<E> PartialOrd for ScheduledEvent<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for ScheduledEvent<E> {
    // Reversed so the max-heap pops the earliest (time, sequence) first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Discrete-event clock driving a single run
///
/// Time only moves when an event is taken off the schedule, and it never moves
/// backwards: scheduling anything before [`SimulationClock::now`] is rejected.
#[derive(Debug, Clone)]
pub struct SimulationClock<E> {
    /// Current logical time in seconds
    now: f64,
    /// Sequence number handed to the next scheduled event
    next_sequence: u64,
    /// Events not yet delivered
    pending: BinaryHeap<ScheduledEvent<E>>,
    /// Events delivered so far
    delivered: u64,
}

impl<E> SimulationClock<E> {
    /// Create a clock at time zero with an empty schedule
    pub fn new() -> Self {
        Self { now: 0.0, next_sequence: 0, pending: BinaryHeap::new(), delivered: 0 }
    }

    /// Current logical time
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule `event` at absolute time `time`
    ///
    /// Returns the sequence number used to break ties with other events at the
    /// same instant.
    pub fn schedule_at(&mut self, time: f64, event: E) -> SimulationResult<u64> {
        if !time.is_finite() {
            return Err(SimulationError::invalid_parameter(format!(
                "event time must be finite, got {}",
                time
            )));
        }
        if time < self.now {
            return Err(SimulationError::invalid_parameter(format!(
                "cannot schedule an event at {} before the current time {}",
                time, self.now
            )));
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pending.push(ScheduledEvent { time, sequence, event });
        trace!(time, sequence, pending = self.pending.len(), "event scheduled");
        Ok(sequence)
    }

    /// Schedule `event` after `delay` seconds from now
    pub fn schedule_in(&mut self, delay: f64, event: E) -> SimulationResult<u64> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(SimulationError::invalid_parameter(format!(
                "delay must be a non-negative finite number, got {}",
                delay
            )));
        }
        self.schedule_at(self.now + delay, event)
    }

    /// Remove the earliest pending event and advance the clock to its time
    pub fn next_event(&mut self) -> Option<(f64, E)> {
        let scheduled = self.pending.pop()?;
        debug_assert!(
            scheduled.time >= self.now,
            "clock moved backwards: now={}, event={}",
            self.now,
            scheduled.time
        );
        self.now = scheduled.time;
        self.delivered += 1;
        Some((scheduled.time, scheduled.event))
    }

    /// Time of the earliest pending event, if any
    pub fn peek_time(&self) -> Option<f64> {
        self.pending.peek().map(|scheduled| scheduled.time)
    }

    /// Number of events still waiting to be delivered
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether the schedule has been drained
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of events delivered since the clock was created
    pub fn events_delivered(&self) -> u64 {
        self.delivered
    }
}

impl<E> Default for SimulationClock<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_at_zero() {
        let clock: SimulationClock<&str> = SimulationClock::new();
        assert_eq!(clock.now(), 0.0);
        assert!(clock.is_idle());
        assert_eq!(clock.peek_time(), None);
        assert_eq!(clock.events_delivered(), 0);
    }

    #[test]
    fn test_events_delivered_in_time_order() {
        let mut clock = SimulationClock::new();
        clock.schedule_at(5.0, "c").unwrap();
        clock.schedule_at(1.5, "a").unwrap();
        clock.schedule_at(3.0, "b").unwrap();

        assert_eq!(clock.peek_time(), Some(1.5));
        assert_eq!(clock.next_event(), Some((1.5, "a")));
        assert_eq!(clock.now(), 1.5);
        assert_eq!(clock.next_event(), Some((3.0, "b")));
        assert_eq!(clock.next_event(), Some((5.0, "c")));
        assert_eq!(clock.next_event(), None);
        assert_eq!(clock.now(), 5.0);
        assert_eq!(clock.events_delivered(), 3);
    }

    #[test]
    fn test_equal_times_are_fifo() {
        let mut clock = SimulationClock::new();
        for label in 0..50 {
            clock.schedule_at(2.0, label).unwrap();
        }
        clock.schedule_at(1.0, -1).unwrap();

        assert_eq!(clock.next_event(), Some((1.0, -1)));
        let order: Vec<i32> = std::iter::from_fn(|| clock.next_event().map(|(_, e)| e)).collect();
        assert_eq!(order, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_schedule_in_is_relative_to_now() {
        let mut clock = SimulationClock::new();
        clock.schedule_at(10.0, "first").unwrap();
        clock.next_event();

        clock.schedule_in(8.0, "second").unwrap();
        assert_eq!(clock.peek_time(), Some(18.0));

        clock.schedule_in(0.0, "now").unwrap();
        assert_eq!(clock.next_event(), Some((10.0, "now")));
    }

    #[test]
    fn test_rejects_past_and_non_finite_times() {
        let mut clock = SimulationClock::new();
        clock.schedule_at(4.0, ()).unwrap();
        clock.next_event();

        assert!(matches!(clock.schedule_at(3.9, ()), Err(SimulationError::InvalidParameter(_))));
        assert!(clock.schedule_at(f64::NAN, ()).is_err());
        assert!(clock.schedule_at(f64::INFINITY, ()).is_err());
        assert!(clock.schedule_in(-1.0, ()).is_err());
        assert!(clock.is_idle());
    }

    #[test]
    fn test_sequence_numbers_increase() {
        let mut clock = SimulationClock::new();
        let first = clock.schedule_at(1.0, ()).unwrap();
        let second = clock.schedule_at(0.5, ()).unwrap();
        assert!(second > first);
        assert_eq!(clock.pending_count(), 2);
    }
}
