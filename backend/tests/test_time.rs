//! Tests for RunWindow and the clocks

use std::time::Duration;

use autoclicker_core_rs::{Clock, ManualClock, RunWindow, SystemClock};

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

#[test]
fn test_window_new() {
    let window = RunWindow::open(secs(0), secs(5), secs(300));
    assert_eq!(window.current_tick(), 0);
    assert_eq!(window.next_evaluation(), secs(5));
    assert_eq!(window.deadline(), secs(300));
}

#[test]
fn test_evaluation_due_is_inclusive() {
    let window = RunWindow::open(secs(0), secs(5), secs(300));

    assert!(!window.evaluation_due(Duration::from_millis(4_999)));
    assert!(window.evaluation_due(secs(5)));
    assert!(window.evaluation_due(secs(7)));
}

#[test]
fn test_reschedule_measures_from_evaluation_moment() {
    let mut window = RunWindow::open(secs(0), secs(5), secs(300));

    // Evaluation ran late, at t=7; the next one is due at 12, not 10
    window.reschedule_from(secs(7));
    assert_eq!(window.next_evaluation(), secs(12));
    assert!(!window.evaluation_due(secs(10)));
}

#[test]
fn test_deadline_is_inclusive() {
    let window = RunWindow::open(secs(10), secs(5), secs(300));

    assert!(!window.deadline_reached(secs(309)));
    assert!(window.deadline_reached(secs(310)));
}

#[test]
fn test_advance_tick() {
    let mut window = RunWindow::open(secs(0), secs(5), secs(300));

    window.advance_tick();
    window.advance_tick();
    assert_eq!(window.current_tick(), 2);
}

#[test]
fn test_elapsed_since_start() {
    let window = RunWindow::open(secs(100), secs(5), secs(300));
    assert_eq!(window.elapsed(secs(142)), secs(42));
}

#[test]
fn test_manual_clock_clones_share_time() {
    let clock = ManualClock::new();
    let handle = clock.clone();

    handle.advance(secs(3));
    clock.pause(secs(2));
    assert_eq!(handle.now(), secs(5));

    handle.set(secs(1));
    assert_eq!(clock.now(), secs(1));
}

#[test]
fn test_system_clock_is_monotonic() {
    let clock = SystemClock::new();
    let first = clock.now();
    clock.pause(Duration::from_millis(1));
    assert!(clock.now() >= first + Duration::from_millis(1));
}
