//! Frame loop on the virtual clock.

use std::time::Duration;

use super::Runtime;

/// Frames [`Runtime::settle`] runs before giving up.
const MAX_SETTLE_FRAMES: usize = 1000;

impl Runtime {
    /// Advance one frame.
    ///
    /// Order: due timers, smooth-scroll steps, accordion height steps,
    /// layout, layout callbacks, then mutation delivery. Notifications are
    /// dispatched after each stage that can produce them.
    pub fn run_frame(&mut self) {
        self.scheduler.begin_frame(self.config.frame_interval());
        let now = self.scheduler.now();

        for task in self.scheduler.take_due_timers() {
            self.run_task(task);
        }
        self.flush();

        for (strip, x) in self.scrolls.step(now) {
            if self.doc.set_scroll_left(strip, x) {
                self.strip_scrolled(strip);
            }
        }

        for accordion in self.accordions.values_mut() {
            accordion.tick(&mut self.doc, now);
        }

        self.doc.layout_if_dirty();
        for task in self.scheduler.take_frame_callbacks() {
            self.run_task(task);
        }
        self.flush();

        self.deliver_mutations();
        self.flush();
    }

    /// Run frames until `duration` of virtual time has passed.
    pub fn advance(&mut self, duration: Duration) {
        let end = self.scheduler.now() + duration;
        while self.scheduler.now() < end {
            self.run_frame();
        }
    }

    /// Run frames until no task, scroll or transition is pending.
    /// Returns the number of frames run.
    pub fn settle(&mut self) -> usize {
        for frames in 0..MAX_SETTLE_FRAMES {
            if self.is_idle() {
                return frames;
            }
            self.run_frame();
        }
        log::warn!("[coordinator] still busy after {MAX_SETTLE_FRAMES} frames");
        MAX_SETTLE_FRAMES
    }

    /// True when nothing is scheduled, scrolling or animating.
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
            && !self.scrolls.has_active()
            && self.outbox.is_empty()
            && self.accordions.values().all(|a| !a.is_animating())
    }
}
