//! Time management for a run
//!
//! A run operates in ticks (loop iterations) measured against a wall clock.
//! This module provides the clock abstraction and the run window that the
//! scheduler uses for its evaluation and deadline checks.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source
///
/// `now()` returns the time elapsed since the clock's own origin. Only
/// differences between readings are meaningful.
pub trait Clock {
    /// Current time since the clock's origin
    fn now(&self) -> Duration;

    /// Cooperatively yield for `duration` between ticks
    fn pause(&self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn pause(&self, duration: Duration) {
        (**self).pause(duration)
    }
}

/// Wall clock backed by `std::time::Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Manually driven clock for tests and simulations
///
/// Clones share the same underlying time, so an environment and the
/// scheduler can observe one timeline.
///
/// # Example
/// ```
/// use autoclicker_core_rs::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(Duration::from_secs(2));
/// assert_eq!(clock.now(), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `delta`
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get().saturating_add(delta));
    }

    /// Jump to an absolute reading
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn pause(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// Temporal bookkeeping for a single run
///
/// Created once at run start and mutated only by the scheduler.
///
/// # Example
/// ```
/// use autoclicker_core_rs::RunWindow;
/// use std::time::Duration;
///
/// let mut window = RunWindow::open(
///     Duration::ZERO,
///     Duration::from_secs(5),
///     Duration::from_secs(300),
/// );
/// assert!(!window.evaluation_due(Duration::from_secs(4)));
/// assert!(window.evaluation_due(Duration::from_secs(5)));
///
/// window.reschedule_from(Duration::from_secs(6));
/// assert_eq!(window.next_evaluation(), Duration::from_secs(11));
/// ```
#[derive(Debug, Clone)]
pub struct RunWindow {
    start: Duration,
    next_evaluation: Duration,
    deadline: Duration,
    evaluation_interval: Duration,
    /// Ticks completed since the run started
    current_tick: usize,
}

impl RunWindow {
    /// Open a window at `start`
    ///
    /// The first evaluation is due one interval after start and the run
    /// ends `total_duration` after start. Offsets past the end of the
    /// representable range pin to `Duration::MAX`.
    pub fn open(start: Duration, evaluation_interval: Duration, total_duration: Duration) -> Self {
        Self {
            start,
            next_evaluation: start.saturating_add(evaluation_interval),
            deadline: start.saturating_add(total_duration),
            evaluation_interval,
            current_tick: 0,
        }
    }

    /// Whether an evaluation cycle should run at `now` (reached or passed)
    pub fn evaluation_due(&self, now: Duration) -> bool {
        now >= self.next_evaluation
    }

    /// Schedule the next evaluation one interval after `now`
    ///
    /// Measured from the evaluation moment, not the original schedule, so
    /// slow cycles push later ones back.
    pub fn reschedule_from(&mut self, now: Duration) {
        self.next_evaluation = now.saturating_add(self.evaluation_interval);
    }

    /// Whether the run's deadline has been reached or passed at `now`
    pub fn deadline_reached(&self, now: Duration) -> bool {
        now >= self.deadline
    }

    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Time since the window opened (saturating)
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.start)
    }

    pub fn next_evaluation(&self) -> Duration {
        self.next_evaluation
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_offsets_from_start() {
        let start = Duration::from_secs(100);
        let window = RunWindow::open(start, Duration::from_secs(5), Duration::from_secs(300));

        assert_eq!(window.next_evaluation(), Duration::from_secs(105));
        assert_eq!(window.deadline(), Duration::from_secs(400));
        assert_eq!(window.elapsed(Duration::from_secs(50)), Duration::ZERO);
    }

    #[test]
    fn test_window_offsets_saturate_instead_of_overflowing() {
        let start = Duration::from_secs(1_000_000_000_000_000_000);
        let mut window = RunWindow::open(start, Duration::MAX, Duration::MAX);

        assert_eq!(window.next_evaluation(), Duration::MAX);
        assert_eq!(window.deadline(), Duration::MAX);
        assert!(!window.deadline_reached(start));

        window.reschedule_from(Duration::MAX);
        assert_eq!(window.next_evaluation(), Duration::MAX);
    }

    #[test]
    fn test_manual_clock_pause_advances() {
        let clock = ManualClock::new();
        clock.pause(Duration::from_millis(250));
        assert_eq!(clock.now(), Duration::from_millis(250));
    }
}
