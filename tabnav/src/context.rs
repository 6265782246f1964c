//! Mutable view of the runtime handed to controllers.

use std::time::Duration;

use tabdom::{
    Document, Easing, FocusState, Frames, NodeId, Scheduler, ScrollAnimations, TransitionConfig,
};

use crate::config::TabsConfig;
use crate::runtime::{Notification, Task, TaskKey};

/// Everything a controller may touch while handling an operation.
///
/// Controllers never reach other controllers directly. Cross-component
/// effects go through [`Context::notify`] and are dispatched by the runtime
/// once the current operation returns.
pub struct Context<'a> {
    pub doc: &'a mut Document,
    pub scheduler: &'a mut Scheduler<TaskKey, Task>,
    pub scrolls: &'a mut ScrollAnimations,
    pub focus: &'a mut FocusState,
    pub config: &'a TabsConfig,
    outbox: &'a mut Vec<Notification>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        doc: &'a mut Document,
        scheduler: &'a mut Scheduler<TaskKey, Task>,
        scrolls: &'a mut ScrollAnimations,
        focus: &'a mut FocusState,
        config: &'a TabsConfig,
        outbox: &'a mut Vec<Notification>,
    ) -> Self {
        Self {
            doc,
            scheduler,
            scrolls,
            focus,
            config,
            outbox,
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Queue a notification for dispatch after the current operation.
    pub fn notify(&mut self, notification: Notification) {
        self.outbox.push(notification);
    }

    /// Run `task` once layout has settled. Replaces a pending task with the same key.
    pub fn after_layout(&mut self, frames: Frames, task: Task) {
        self.scheduler.after_layout(task.key(), frames, task);
    }

    /// Run `task` after a fixed delay. Replaces a pending task with the same key.
    pub fn after(&mut self, delay: Duration, task: Task) {
        self.scheduler.after(task.key(), delay, task);
    }

    /// Smoothly scroll `node` horizontally to `x`. The offset is applied on
    /// the following frames and reported as scroll events.
    pub fn smooth_scroll(&mut self, node: NodeId, x: f32) {
        let from = self.doc.scroll_left(node);
        let transition = TransitionConfig::new(self.config.smooth_scroll_duration(), Easing::EaseOut);
        self.scrolls.start(node, from, x, self.scheduler.now(), transition);
    }
}
