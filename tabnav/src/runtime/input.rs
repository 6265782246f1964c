//! Routing of host input to controllers.

use tabdom::{Event, Key, NodeId};

use super::Runtime;
use crate::dom;
use crate::widgets::EventResult;

impl Runtime {
    pub fn handle(&mut self, event: Event) -> EventResult {
        match event {
            Event::Click { target } => self.click(target),
            Event::Key { target, key, .. } => self.key(target, key),
            Event::Scroll { target, scroll_left } => self.user_scroll(target, scroll_left),
            Event::Resize { width } => {
                self.resize(width);
                EventResult::Consumed
            }
        }
    }

    /// Route a click to the tab, scroll control or accordion header under `target`.
    pub fn click(&mut self, target: NodeId) -> EventResult {
        if !self.doc.is_attached(target) {
            return EventResult::Ignored;
        }

        let control = self.doc.closest_where(target, |n| {
            dom::is_tab(n) || n.has_class(dom::PREV) || n.has_class(dom::NEXT)
        });
        if let Some(control) = control
            && let Some(container) = self.owning_container(control)
        {
            let result = self
                .with_tabs(container, |tabs, cx| tabs.on_click(cx, control))
                .unwrap_or(EventResult::Ignored);
            self.flush();
            return result;
        }

        if let Some(root) = self.header_accordion(target) {
            if let Err(err) = self.accordion_get_or_create(root) {
                log::debug!("[accordion] {root}: {err}");
                return EventResult::Ignored;
            }
            let result = self
                .with_accordion(root, |accordion, cx| accordion.on_click(cx, target))
                .unwrap_or(EventResult::Ignored);
            self.flush();
            return result;
        }
        EventResult::Ignored
    }

    /// Route a key press to the focused tab or accordion header. `target`
    /// defaults to the focused node.
    pub fn key(&mut self, target: Option<NodeId>, key: Key) -> EventResult {
        let Some(target) = target.or(self.focus.focused()) else {
            return EventResult::Ignored;
        };

        if let Some(tab) = self.doc.closest_where(target, dom::is_tab) {
            let Some(container) = self.owning_container(tab) else {
                return EventResult::Ignored;
            };
            let result = self
                .with_tabs(container, |tabs, cx| tabs.on_key(cx, tab, key))
                .unwrap_or(EventResult::Ignored);
            self.flush();
            return result;
        }

        if matches!(key, Key::Enter | Key::Char(' '))
            && let Some(root) = self.header_accordion(target)
        {
            return self.toggle_accordion(root).into();
        }
        EventResult::Ignored
    }

    /// The user scrolled `target` to `scroll_left`. Cancels any smooth scroll
    /// in flight on it.
    pub fn user_scroll(&mut self, target: NodeId, scroll_left: f32) -> EventResult {
        self.scrolls.cancel(target);
        self.doc.set_scroll_left(target, scroll_left);
        let handled = self.strip_scrolled(target);
        self.flush();
        handled.into()
    }

    /// The window was resized to `width`. One listener serves every
    /// registered container.
    pub fn resize(&mut self, width: f32) {
        self.doc.resize(width);
        if self.resize.listener_count() == 0 {
            return;
        }
        for container in self.resize.containers().to_vec() {
            self.with_tabs(container, |tabs, cx| tabs.on_resize(cx));
        }
        self.flush();
    }

    /// Container owning `node`, initializing it on first use.
    fn owning_container(&mut self, node: NodeId) -> Option<NodeId> {
        let container = self.doc.closest_where(node, dom::is_container)?;
        if !self.tabs.contains_key(&container)
            && let Err(err) = self.tabs_get_or_create(container)
        {
            log::debug!("[tabs] {container}: {err}");
            return None;
        }
        Some(container)
    }

    fn header_accordion(&self, target: NodeId) -> Option<NodeId> {
        let header = self
            .doc
            .closest_where(target, |n| n.has_class(dom::ACCORDION_HEADER))?;
        self.doc.closest_where(header, dom::is_accordion)
    }
}
