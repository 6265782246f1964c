//! Accordion state machine.

use std::time::Duration;

use tabdom::{Document, Easing, NodeId, TransitionConfig, Tween};

use crate::context::Context;
use crate::dom;
use crate::error::TabsError;
use crate::runtime::{Notification, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccordionState {
    Closed,
    Opening,
    Open,
    Closing,
}

impl AccordionState {
    pub fn is_open(self) -> bool {
        self == AccordionState::Open
    }

    pub fn is_transitioning(self) -> bool {
        matches!(self, AccordionState::Opening | AccordionState::Closing)
    }
}

/// Work to run when the current transition ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnSettled {
    /// Re-run initialization of a tab container that was waiting on this accordion.
    InitTabs(NodeId),
}

#[derive(Debug)]
pub struct AccordionController {
    root: NodeId,
    name: String,
    header: Option<NodeId>,
    content: NodeId,
    state: AccordionState,
    animating: bool,
    target_height: f32,
    tween: Option<Tween>,
    pending: Vec<OnSettled>,
}

impl AccordionController {
    /// Attach to the accordion rooted at `root`.
    ///
    /// The initial state follows the `is-open` class. Closed content is
    /// hidden; open content gets an explicit height and is observed for
    /// changes.
    pub fn attach(doc: &mut Document, root: NodeId) -> Result<Self, TabsError> {
        let node = doc.node(root).ok_or(TabsError::Detached(root))?;
        let name = node.id().to_string();
        let open = node.has_class(dom::OPEN);

        let scope = doc.descendants_until(root, &|n| doc.node(n).is_some_and(dom::is_accordion));
        let find = |class: &str| scope.iter().copied().find(|&n| doc.has_class(n, class));
        let header = find(dom::ACCORDION_HEADER);
        let content = find(dom::ACCORDION_CONTENT)
            .ok_or_else(|| TabsError::MissingAccordionContent(name.clone()))?;

        let mut accordion = Self {
            root,
            name,
            header,
            content,
            state: if open {
                AccordionState::Open
            } else {
                AccordionState::Closed
            },
            animating: false,
            target_height: 0.0,
            tween: None,
            pending: Vec::new(),
        };

        if open {
            doc.set_hidden(content, false);
            accordion.remeasure(doc);
        } else {
            doc.set_hidden(content, true);
            doc.set_style_height(content, None);
        }
        log::debug!("[accordion] {}: attached, {:?}", accordion.name, accordion.state);
        Ok(accordion)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> Option<NodeId> {
        self.header
    }

    pub fn content(&self) -> NodeId {
        self.content
    }

    pub fn state(&self) -> AccordionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Measured natural height of the content while open.
    pub fn target_height(&self) -> f32 {
        self.target_height
    }

    pub fn pending(&self) -> &[OnSettled] {
        &self.pending
    }

    /// Queue work for the end of the next transition.
    pub fn defer(&mut self, callback: OnSettled) {
        if !self.pending.contains(&callback) {
            self.pending.push(callback);
        }
    }

    /// Drop queued work that refers to removed nodes.
    pub fn forget(&mut self, removed: &[NodeId]) {
        self.pending.retain(|OnSettled::InitTabs(c)| !removed.contains(c));
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Toggle between open and closed. Ignored while a transition runs.
    pub fn open_content(&mut self, cx: &mut Context<'_>) -> bool {
        if self.animating {
            log::trace!("[accordion] {}: busy, ignoring toggle", self.name);
            return false;
        }
        match self.state {
            AccordionState::Closed => self.open(cx),
            AccordionState::Open => self.close(cx),
            AccordionState::Opening | AccordionState::Closing => false,
        }
    }

    pub fn open(&mut self, cx: &mut Context<'_>) -> bool {
        if self.animating || self.state != AccordionState::Closed {
            return false;
        }
        let doc = &mut *cx.doc;
        doc.set_hidden(self.content, false);
        doc.set_style_height(self.content, Some(0.0));
        // Forces layout with the content displayed.
        let target = doc.metrics(self.content).scroll_height;

        doc.add_class(self.root, dom::OPEN);
        self.target_height = target;
        self.begin(cx, AccordionState::Opening, 0.0, target);
        true
    }

    pub fn close(&mut self, cx: &mut Context<'_>) -> bool {
        if self.animating || self.state != AccordionState::Open {
            return false;
        }
        let doc = &mut *cx.doc;
        doc.disconnect(self.content);
        let from = doc.metrics(self.content).height;
        doc.remove_class(self.root, dom::OPEN);
        self.begin(cx, AccordionState::Closing, from, 0.0);
        true
    }

    fn begin(&mut self, cx: &mut Context<'_>, state: AccordionState, from: f32, to: f32) {
        let duration = cx.config.accordion_transition();
        self.state = state;
        self.animating = true;
        cx.doc.add_class(self.root, dom::ANIMATING);
        self.tween = Some(Tween::new(
            from,
            to,
            cx.now(),
            TransitionConfig::new(duration, Easing::EaseInOut),
        ));
        cx.after(duration, Task::AccordionTransitionEnd { accordion: self.root });
        log::debug!("[accordion] {}: {:?} {from} -> {to}", self.name, state);
    }

    /// Write the eased height for the current frame.
    pub fn tick(&mut self, doc: &mut Document, now: Duration) {
        if let Some(tween) = &self.tween {
            doc.set_style_height(self.content, Some(tween.value_at(now)));
        }
    }

    /// End the running transition. Returns the queued work to run now.
    pub fn finish_transition(&mut self, cx: &mut Context<'_>) -> Vec<OnSettled> {
        if !self.animating {
            return Vec::new();
        }
        self.tween = None;
        self.animating = false;
        cx.doc.remove_class(self.root, dom::ANIMATING);

        match self.state {
            AccordionState::Opening => {
                self.state = AccordionState::Open;
                self.remeasure(cx.doc);
                cx.notify(Notification::AccordionOpened { accordion: self.root });
            }
            AccordionState::Closing => {
                self.state = AccordionState::Closed;
                cx.doc.set_style_height(self.content, None);
                cx.doc.set_hidden(self.content, true);
                cx.notify(Notification::AccordionClosed { accordion: self.root });
            }
            AccordionState::Open | AccordionState::Closed => {}
        }
        log::debug!("[accordion] {}: settled {:?}", self.name, self.state);
        std::mem::take(&mut self.pending)
    }

    /// Re-measure the content after its shape changed. Only acts while open.
    pub fn on_content_changed(&mut self, doc: &mut Document) -> bool {
        if self.state != AccordionState::Open || self.animating {
            return false;
        }
        let before = self.target_height;
        self.remeasure(doc);
        (self.target_height - before).abs() > f32::EPSILON
    }

    /// Measure the natural height and pin it, with the observer disconnected
    /// so the write is not reported back.
    fn remeasure(&mut self, doc: &mut Document) {
        doc.disconnect(self.content);
        doc.set_style_height(self.content, None);
        let height = doc.metrics(self.content).scroll_height;
        doc.set_style_height(self.content, Some(height));
        doc.observe(self.content);
        if (height - self.target_height).abs() > f32::EPSILON {
            log::trace!("[accordion] {}: height {} -> {height}", self.name, self.target_height);
        }
        self.target_height = height;
    }
}
