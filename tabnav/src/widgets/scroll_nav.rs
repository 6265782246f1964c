//! Prev/next controls for a horizontally scrollable strip.
//!
//! A strip only gets controls when its wrap is marked `has-arrows`. Without
//! that marker every operation here is a no-op and nothing is added to the
//! document.

use tabdom::{Document, Element, NodeId, Position, Size};

use crate::context::Context;
use crate::dom;
use crate::runtime::Task;

/// Which way a control scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Prev,
    Next,
}

/// Derived visibility of the prev/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollNavState {
    pub scroll_left: f32,
    /// `scroll_width - client_width`; zero or negative means no overflow.
    pub max: f32,
    pub prev_hidden: bool,
    pub next_hidden: bool,
}

impl ScrollNavState {
    pub fn compute(scroll_left: f32, scroll_width: f32, client_width: f32, tolerance: f32) -> Self {
        let max = scroll_width - client_width;
        if max <= 0.0 {
            return Self {
                scroll_left,
                max,
                prev_hidden: true,
                next_hidden: true,
            };
        }
        Self {
            scroll_left,
            max,
            prev_hidden: scroll_left <= tolerance,
            next_hidden: scroll_left >= max - tolerance,
        }
    }

    pub fn has_overflow(&self) -> bool {
        self.max > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct ScrollNavigation {
    owner: NodeId,
    strip: NodeId,
    wrap: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    state: ScrollNavState,
}

impl ScrollNavigation {
    /// Locate or create the controls for `strip`.
    ///
    /// Existing `scroll-prev` / `scroll-next` children of the wrap are reused,
    /// so calling this again on the same strip never duplicates them.
    pub fn init(doc: &mut Document, owner: NodeId, strip: NodeId) -> Self {
        let wrap = doc
            .ancestors(strip)
            .take_while(|&a| doc.contains(owner, a))
            .find(|&a| doc.has_class(a, dom::WRAP));

        let mut nav = Self {
            owner,
            strip,
            wrap,
            prev: None,
            next: None,
            state: ScrollNavState::default(),
        };

        let Some(wrap) = wrap.filter(|&w| doc.has_class(w, dom::HAS_ARROWS)) else {
            log::trace!("[scroll-nav] {strip}: wrap without arrows, staying inert");
            return nav;
        };

        nav.prev = Self::control(doc, wrap, dom::PREV, "‹", "Previous tabs");
        nav.next = Self::control(doc, wrap, dom::NEXT, "›", "Next tabs");
        log::debug!("[scroll-nav] {strip}: controls attached in {wrap}");
        nav
    }

    fn control(doc: &mut Document, wrap: NodeId, class: &str, glyph: &str, label: &str) -> Option<NodeId> {
        let existing = doc
            .children(wrap)
            .iter()
            .copied()
            .find(|&c| doc.has_class(c, class));
        existing.or_else(|| {
            doc.append(
                wrap,
                Element::button(glyph)
                    .class(class)
                    .attr("aria-label", label)
                    .position(Position::Absolute)
                    .width(Size::Fixed(24.0))
                    .hidden(true),
            )
        })
    }

    pub fn strip(&self) -> NodeId {
        self.strip
    }

    pub fn wrap(&self) -> Option<NodeId> {
        self.wrap
    }

    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn state(&self) -> ScrollNavState {
        self.state
    }

    /// True when controls exist for this strip.
    pub fn is_attached(&self) -> bool {
        self.prev.is_some() && self.next.is_some()
    }

    /// Which control `node` is, if it belongs to this strip.
    pub fn direction_of(&self, node: NodeId) -> Option<ScrollDirection> {
        if self.prev == Some(node) {
            Some(ScrollDirection::Prev)
        } else if self.next == Some(node) {
            Some(ScrollDirection::Next)
        } else {
            None
        }
    }

    /// Scroll one step in `direction`. Returns true if a scroll was started.
    pub fn scroll(&mut self, cx: &mut Context<'_>, direction: ScrollDirection) -> bool {
        if !self.is_attached() {
            return false;
        }

        let metrics = cx.doc.metrics(self.strip);
        let max = metrics.scroll_width - metrics.client_width;
        if max <= 0.0 {
            return false;
        }

        let current = cx.doc.scroll_left(self.strip);
        let step = metrics.client_width * cx.config.scroll_step_fraction;
        let target = match direction {
            ScrollDirection::Prev => current - step,
            ScrollDirection::Next => current + step,
        }
        .clamp(0.0, max);

        if (target - current).abs() < cx.config.scroll_tolerance {
            log::trace!("[scroll-nav] {}: already at {current}, skipping", self.strip);
            return false;
        }

        log::debug!("[scroll-nav] {}: {direction:?} {current} -> {target}", self.strip);
        cx.smooth_scroll(self.strip, target);

        let button = match direction {
            ScrollDirection::Prev => self.prev,
            ScrollDirection::Next => self.next,
        };
        if let Some(button) = button {
            cx.doc.add_class(button, dom::ACTIVE);
            let delay = cx.config.active_class_duration();
            cx.after(
                delay,
                Task::ClearActive {
                    container: self.owner,
                    button,
                },
            );
        }
        true
    }

    /// Recompute control visibility from the strip's scroll extents.
    ///
    /// Skipped while the wrap is not rendered, unless `force` is set.
    /// Returns true if the state was recomputed.
    pub fn update_state(&mut self, doc: &mut Document, tolerance: f32, force: bool) -> bool {
        let (Some(wrap), Some(prev), Some(next)) = (self.wrap, self.prev, self.next) else {
            return false;
        };
        if !force && !doc.is_rendered(wrap) {
            log::trace!("[scroll-nav] {}: wrap not rendered, deferring", self.strip);
            return false;
        }

        let metrics = doc.metrics(self.strip);
        let state = ScrollNavState::compute(
            doc.scroll_left(self.strip),
            metrics.scroll_width,
            metrics.client_width,
            tolerance,
        );

        doc.set_hidden(prev, state.prev_hidden);
        doc.set_hidden(next, state.next_hidden);
        doc.toggle_class(wrap, dom::SCROLLABLE, state.has_overflow());
        self.state = state;
        true
    }
}
