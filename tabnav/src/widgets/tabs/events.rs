//! Input handling and deferred strip work for tab controllers.

use tabdom::{Frames, Key, NodeId};

use super::item::TabItem;
use super::state::{Phase, TabController, TabLocation};
use crate::context::Context;
use crate::dom;
use crate::runtime::Task;
use crate::widgets::events::EventResult;

impl TabController {
    /// Handle a key pressed while `tab` has focus.
    ///
    /// Left/Right move to the neighbouring selectable tab of the same strip,
    /// wrapping at the ends. Home/End jump to the first/last selectable tab.
    /// Enter and Space activate the focused tab.
    pub fn on_key(&mut self, cx: &mut Context<'_>, tab: NodeId, key: Key) -> EventResult {
        if self.phase != Phase::Active {
            return EventResult::Ignored;
        }
        let Some(location) = self.locate_node(tab) else {
            return EventResult::Ignored;
        };
        let siblings = self.siblings(location);
        let current = match location {
            TabLocation::Depth1(i) | TabLocation::Depth2(_, i) => i,
        };

        let target = match key {
            Key::Left => step(siblings, current, -1),
            Key::Right => step(siblings, current, 1),
            Key::Home => siblings.iter().position(TabItem::is_selectable),
            Key::End => siblings.iter().rposition(TabItem::is_selectable),
            Key::Enter | Key::Char(' ') => Some(current),
            _ => return EventResult::Ignored,
        };
        let Some(target) = target else {
            return EventResult::Consumed;
        };

        let target = match location {
            TabLocation::Depth1(_) => TabLocation::Depth1(target),
            TabLocation::Depth2(g, _) => TabLocation::Depth2(g, target),
        };
        self.activate_location(cx, target, true);
        EventResult::Consumed
    }

    /// Handle a click on a tab or on one of this container's scroll controls.
    pub fn on_click(&mut self, cx: &mut Context<'_>, target: NodeId) -> EventResult {
        if let Some(location) = self.locate_node(target) {
            return self.activate_location(cx, location, true).into();
        }
        self.on_control_click(cx, target)
    }

    pub fn on_control_click(&mut self, cx: &mut Context<'_>, button: NodeId) -> EventResult {
        for strip in &mut self.strips {
            if let Some(direction) = strip.nav.direction_of(button) {
                strip.nav.scroll(cx, direction);
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }

    /// The strip scrolled, by the user or a smooth scroll step.
    pub fn on_scroll(&mut self, cx: &mut Context<'_>, strip: NodeId) -> bool {
        let tolerance = cx.config.scroll_tolerance;
        self.strips
            .iter_mut()
            .find(|s| s.node == strip)
            .is_some_and(|s| s.nav.update_state(cx.doc, tolerance, false))
    }

    /// The window was resized.
    pub fn on_resize(&mut self, cx: &mut Context<'_>) {
        if self.phase != Phase::Active {
            return;
        }
        let tolerance = cx.config.scroll_tolerance;
        for strip in &mut self.strips {
            strip.nav.update_state(cx.doc, tolerance, false);
        }
        let container = self.container;
        for strip in self.strips.iter().map(|s| s.node) {
            if self.selected_in_strip(strip).is_some() {
                cx.after_layout(Frames::Single, Task::SyncStrip { container, strip });
            }
        }
    }

    // -------------------------------------------------------------------------
    // Deferred work
    // -------------------------------------------------------------------------

    pub fn run_task(&mut self, cx: &mut Context<'_>, task: Task) {
        match task {
            Task::SyncStrip { strip, .. } => self.sync_strip(cx, strip),
            Task::EnableIndicator { strip, .. } => self.enable_indicator(cx, strip),
            Task::CenterTab { strip, tab, .. } => self.center_tab(cx, strip, tab),
            Task::SettleStrip { strip, .. } => self.settle_strip(cx, strip),
            Task::ClearActive { button, .. } => {
                cx.doc.remove_class(button, dom::ACTIVE);
            }
            Task::AccordionTransitionEnd { .. } => {}
        }
    }

    /// Move the indicator under the selected tab and re-derive scroll-nav state.
    fn sync_strip(&mut self, cx: &mut Context<'_>, strip: NodeId) {
        let container = self.container;
        let tolerance = cx.config.scroll_tolerance;
        let selected = self.selected_in_strip(strip);
        let Some(s) = self.strips.iter_mut().find(|s| s.node == strip) else {
            return;
        };

        if let (Some(indicator), Some(tab)) = (s.indicator.as_mut(), selected)
            && indicator.update(cx.doc, tab)
            && !indicator.transitions_enabled()
        {
            cx.after_layout(Frames::Single, Task::EnableIndicator { container, strip });
        }
        s.nav.update_state(cx.doc, tolerance, false);
    }

    fn enable_indicator(&mut self, cx: &mut Context<'_>, strip: NodeId) {
        if let Some(indicator) = self
            .strips
            .iter_mut()
            .find(|s| s.node == strip)
            .and_then(|s| s.indicator.as_mut())
            .filter(|i| i.is_positioned())
        {
            indicator.set_transitions(cx.doc, true);
        }
    }

    /// Scroll `tab` toward the horizontal middle of its strip.
    fn center_tab(&mut self, cx: &mut Context<'_>, strip: NodeId, tab: NodeId) {
        if !cx.doc.is_rendered(strip) || !cx.doc.is_attached(tab) {
            return;
        }
        let tolerance = cx.config.scroll_tolerance;
        let strip_box = cx.doc.metrics(strip);
        let tab_box = cx.doc.metrics(tab);
        let max = strip_box.max_scroll_left();

        let target = (tab_box.center_x() - strip_box.client_width / 2.0).clamp(0.0, max);
        if max <= 0.0 || (target - cx.doc.scroll_left(strip)).abs() < tolerance {
            self.settle_strip(cx, strip);
            return;
        }

        log::trace!("[tabs] {}: centering {tab} at {target}", self.name);
        cx.smooth_scroll(strip, target);
        let container = self.container;
        let delay = cx.config.scroll_settle_delay();
        cx.after(delay, Task::SettleStrip { container, strip });
    }

    fn settle_strip(&mut self, cx: &mut Context<'_>, strip: NodeId) {
        let tolerance = cx.config.scroll_tolerance;
        if let Some(s) = self.strips.iter_mut().find(|s| s.node == strip) {
            s.nav.update_state(cx.doc, tolerance, false);
        }
    }
}

/// Next selectable tab from `current` in `direction`, wrapping around.
fn step(tabs: &[TabItem], current: usize, direction: isize) -> Option<usize> {
    let len = tabs.len() as isize;
    (1..=len)
        .map(|n| (current as isize + direction * n).rem_euclid(len) as usize)
        .find(|&i| tabs[i].is_selectable())
}
