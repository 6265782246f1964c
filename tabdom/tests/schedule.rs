use std::time::Duration;

use tabdom::{Frames, Scheduler};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn frame(s: &mut Scheduler<&'static str, &'static str>) -> Vec<&'static str> {
    s.begin_frame(ms(16));
    let mut out = s.take_due_timers();
    out.extend(s.take_frame_callbacks());
    out
}

// =============================================================================
// Frame callbacks
// =============================================================================

#[test]
fn test_single_frame_runs_next_frame() {
    let mut s = Scheduler::new();
    s.after_layout("sync", Frames::Single, "sync");

    assert!(!s.is_idle());
    assert_eq!(frame(&mut s), ["sync"]);
    assert!(s.is_idle());
}

#[test]
fn test_double_frame_waits_one_more() {
    let mut s = Scheduler::new();
    s.after_layout("center", Frames::Double, "center");
    s.after_layout("sync", Frames::Single, "sync");

    assert_eq!(frame(&mut s), ["sync"]);
    assert_eq!(frame(&mut s), ["center"]);
    assert_eq!(s.frame_count(), 2);
}

#[test]
fn test_callbacks_queued_while_running_wait() {
    let mut s = Scheduler::new();
    s.after_layout("a", Frames::Single, "a");
    assert_eq!(frame(&mut s), ["a"]);

    // Queued by "a" while it runs.
    s.after_layout("b", Frames::Single, "b");
    assert!(s.is_pending(&"b"));
    assert_eq!(frame(&mut s), ["b"]);
}

#[test]
fn test_rearming_key_replaces_pending() {
    let mut s = Scheduler::new();
    s.after_layout("sync", Frames::Single, "first");
    s.after_layout("sync", Frames::Single, "second");

    assert_eq!(s.pending_count(), 1);
    assert_eq!(frame(&mut s), ["second"]);
}

#[test]
fn test_rearming_moves_between_queues() {
    let mut s = Scheduler::new();
    s.after("k", ms(100), "timer");
    s.after_layout("k", Frames::Single, "frame");

    assert_eq!(s.pending_count(), 1);
    assert_eq!(frame(&mut s), ["frame"]);
}

// =============================================================================
// Timers
// =============================================================================

#[test]
fn test_timer_fires_when_due() {
    let mut s = Scheduler::new();
    s.after("clear", ms(40), "clear");

    assert!(frame(&mut s).is_empty());
    assert!(frame(&mut s).is_empty());
    assert_eq!(frame(&mut s), ["clear"]);
    assert_eq!(s.now(), ms(48));
}

#[test]
fn test_zero_delay_fires_next_frame() {
    let mut s = Scheduler::new();
    s.after("now", Duration::ZERO, "now");
    assert_eq!(frame(&mut s), ["now"]);
}

#[test]
fn test_due_timers_in_order() {
    let mut s = Scheduler::new();
    s.after("late", ms(10), "late");
    s.after("early", ms(5), "early");
    s.after("tie", ms(10), "tie");

    assert_eq!(frame(&mut s), ["early", "late", "tie"]);
}

// =============================================================================
// Cancellation
// =============================================================================

#[test]
fn test_cancel() {
    let mut s = Scheduler::new();
    s.after("a", ms(10), "a");
    s.after_layout("b", Frames::Single, "b");

    assert!(s.is_pending(&"a"));
    assert!(s.cancel(&"a"));
    assert!(!s.cancel(&"a"));
    assert!(!s.is_pending(&"a"));
    assert_eq!(frame(&mut s), ["b"]);
}

#[test]
fn test_cancel_where() {
    let mut s: Scheduler<(u32, &str), &str> = Scheduler::new();
    s.after((1, "sync"), ms(10), "1-sync");
    s.after_layout((1, "center"), Frames::Double, "1-center");
    s.after_layout((2, "sync"), Frames::Single, "2-sync");

    assert_eq!(s.cancel_where(|&(owner, _)| owner == 1), 2);
    assert_eq!(s.pending_count(), 1);
    assert!(s.is_pending(&(2, "sync")));
}
