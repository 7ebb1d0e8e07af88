//! Repeating timers on the cooperative timeline
//!
//! The wheel never calls back into anything. The host loop reads the
//! clock, asks `due` for every firing that has come due, and dispatches
//! them itself. Cancelling a timer removes it from the wheel before the
//! next `due` call, so a cancelled timer can never fire again.

use std::time::Duration;

/// Identifier of an armed timer.
///
/// Ids are unique for the lifetime of a wheel and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct TimerEntry {
    id: TimerId,
    interval: Duration,
    next_due: Duration,
}

/// Schedules repeating timers against an external clock reading.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use call_simulator_core_rs::core::timer::TimerWheel;
///
/// let mut wheel = TimerWheel::new();
/// let id = wheel.arm(Duration::from_secs(3), Duration::ZERO);
///
/// assert!(wheel.due(Duration::from_secs(2)).is_empty());
/// assert_eq!(wheel.due(Duration::from_secs(3)), vec![id]);
/// ```
#[derive(Debug, Default)]
pub struct TimerWheel {
    next_id: u64,
    entries: Vec<TimerEntry>,
}

impl TimerWheel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a repeating timer. The first firing is one `interval` after
    /// `now`, then every `interval` after that.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn arm(&mut self, interval: Duration, now: Duration) -> TimerId {
        assert!(!interval.is_zero(), "timer interval must be positive");

        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            id,
            interval,
            next_due: now + interval,
        });
        id
    }

    /// Disarm a timer. Returns whether it was armed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Whether `id` is currently armed.
    pub fn is_armed(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Number of armed timers.
    pub fn armed_count(&self) -> usize {
        self.entries.len()
    }

    /// Every firing due at or before `now`, oldest first.
    ///
    /// A repeating timer that fell several intervals behind (large clock
    /// jump) yields one firing per elapsed interval, so replay at any
    /// speed observes the same firing sequence. Firings are ordered by
    /// scheduled time; ties resolve in arming order.
    pub fn due(&mut self, now: Duration) -> Vec<TimerId> {
        let mut fired: Vec<(Duration, TimerId)> = Vec::new();

        for entry in &mut self.entries {
            while entry.next_due <= now {
                fired.push((entry.next_due, entry.id));
                entry.next_due += entry.interval;
            }
        }

        fired.sort_by_key(|(at, id)| (*at, id.0));
        fired.into_iter().map(|(_, id)| id).collect()
    }
}
