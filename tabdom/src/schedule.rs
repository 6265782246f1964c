//! Frame callbacks and timers on a virtual clock.
//!
//! Work that needs post-layout geometry is queued with
//! [`Scheduler::after_layout`] and runs at the end of the next frame
//! ([`Frames::Single`]) or of the frame after that ([`Frames::Double`]).
//! Longer waits use [`Scheduler::after`].
//!
//! Every entry carries a key. Arming a key that is already pending cancels
//! the pending entry first, so at most one update per key is ever in flight.

use std::time::Duration;

/// How many frame boundaries to wait before running a layout callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frames {
    /// Next frame, after the layout pass that follows the current mutation.
    Single,
    /// The frame after next; for reads that depend on a style change
    /// applied by a single-frame callback.
    Double,
}

impl Frames {
    fn count(self) -> u8 {
        match self {
            Frames::Single => 1,
            Frames::Double => 2,
        }
    }
}

#[derive(Debug)]
struct FrameEntry<K, T> {
    key: K,
    remaining: u8,
    task: T,
}

#[derive(Debug)]
struct TimerEntry<K, T> {
    key: K,
    due: Duration,
    seq: u64,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<K, T> {
    now: Duration,
    frame: u64,
    frames: Vec<FrameEntry<K, T>>,
    timers: Vec<TimerEntry<K, T>>,
    seq: u64,
}

impl<K, T> Default for Scheduler<K, T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            frame: 0,
            frames: Vec::new(),
            timers: Vec::new(),
            seq: 0,
        }
    }
}

impl<K: PartialEq, T> Scheduler<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of frames processed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Queue `task` to run after `frames` frame boundaries.
    pub fn after_layout(&mut self, key: K, frames: Frames, task: T) {
        self.cancel(&key);
        self.frames.push(FrameEntry {
            key,
            remaining: frames.count(),
            task,
        });
    }

    /// Queue `task` to run once `delay` has elapsed.
    pub fn after(&mut self, key: K, delay: Duration, task: T) {
        self.cancel(&key);
        self.seq += 1;
        self.timers.push(TimerEntry {
            key,
            due: self.now + delay,
            seq: self.seq,
            task,
        });
    }

    /// Drop any pending entry with this key. Returns true if one existed.
    pub fn cancel(&mut self, key: &K) -> bool {
        let before = self.frames.len() + self.timers.len();
        self.frames.retain(|e| &e.key != key);
        self.timers.retain(|e| &e.key != key);
        before != self.frames.len() + self.timers.len()
    }

    /// Drop every pending entry whose key matches. Returns how many were dropped.
    pub fn cancel_where(&mut self, pred: impl Fn(&K) -> bool) -> usize {
        let before = self.frames.len() + self.timers.len();
        self.frames.retain(|e| !pred(&e.key));
        self.timers.retain(|e| !pred(&e.key));
        before - (self.frames.len() + self.timers.len())
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.frames.iter().any(|e| &e.key == key) || self.timers.iter().any(|e| &e.key == key)
    }

    pub fn is_idle(&self) -> bool {
        self.frames.is_empty() && self.timers.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.frames.len() + self.timers.len()
    }

    /// Advance the clock and open a new frame.
    pub fn begin_frame(&mut self, dt: Duration) {
        self.now += dt;
        self.frame += 1;
    }

    /// Remove and return timers due at the current time, earliest first.
    pub fn take_due_timers(&mut self) -> Vec<T> {
        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|e| e.due <= now);
        self.timers = pending;
        due.sort_by_key(|e| (e.due, e.seq));
        due.into_iter().map(|e| e.task).collect()
    }

    /// Remove and return layout callbacks whose wait ends this frame.
    /// Callbacks queued while the returned tasks run wait for a later frame.
    pub fn take_frame_callbacks(&mut self) -> Vec<T> {
        let mut ready = Vec::new();
        let mut waiting = Vec::new();
        for mut entry in std::mem::take(&mut self.frames) {
            entry.remaining = entry.remaining.saturating_sub(1);
            if entry.remaining == 0 {
                ready.push(entry.task);
            } else {
                waiting.push(entry);
            }
        }
        self.frames = waiting;
        ready
    }
}
