//! The host side of the engine: owns the document, the scheduler and every
//! controller, and plays the role of the browser event loop.
//!
//! Every public operation runs to completion, then dispatches the
//! notifications it produced. Layout-dependent work waits for
//! [`Runtime::run_frame`].

mod dispatch;
mod event_loop;
mod input;
mod task;

use std::collections::HashMap;

use tabdom::{Document, Element, FocusState, NodeId, Scheduler, ScrollAnimations};

pub use task::{Notification, Task, TaskKey, TaskKind};

use crate::config::TabsConfig;
use crate::context::Context;
use crate::dom;
use crate::error::TabsError;
use crate::registry::{Instance, ResizeRegistry};
use crate::widgets::{AccordionController, InitOutcome, OnSettled, TabController};

pub struct Runtime {
    doc: Document,
    scheduler: Scheduler<TaskKey, Task>,
    scrolls: ScrollAnimations,
    focus: FocusState,
    config: TabsConfig,
    tabs: HashMap<NodeId, TabController>,
    accordions: HashMap<NodeId, AccordionController>,
    resize: ResizeRegistry,
    /// Notifications waiting for dispatch.
    outbox: Vec<Notification>,
    /// Most recent dispatched notifications, capped by the config.
    delivered: Vec<Notification>,
}

impl Runtime {
    /// Mount `root` in a fresh document `viewport_width` pixels wide.
    pub fn new(root: Element, viewport_width: f32, config: TabsConfig) -> Self {
        let doc = Document::with_text_metrics(root, viewport_width, config.text_metrics());
        Self::with_document(doc, config)
    }

    pub fn with_document(doc: Document, config: TabsConfig) -> Self {
        Self {
            doc,
            scheduler: Scheduler::new(),
            scrolls: ScrollAnimations::new(),
            focus: FocusState::new(),
            config,
            tabs: HashMap::new(),
            accordions: HashMap::new(),
            resize: ResizeRegistry::new(),
            outbox: Vec::new(),
            delivered: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Direct access to the document, for out-of-band mutations. Follow up
    /// with [`Runtime::resync`] when visibility changed.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn config(&self) -> &TabsConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler<TaskKey, Task> {
        &self.scheduler
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    /// Shortcut for [`Document::find_by_id`].
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.doc.find_by_id(id)
    }

    pub fn tabs(&self, container: NodeId) -> Option<&TabController> {
        self.tabs.get(&container)
    }

    pub fn accordion(&self, root: NodeId) -> Option<&AccordionController> {
        self.accordions.get(&root)
    }

    /// Containers with a live controller, in document order.
    pub fn containers(&self) -> Vec<NodeId> {
        let mut containers: Vec<NodeId> = self.tabs.keys().copied().collect();
        containers.sort();
        containers
    }

    pub fn is_initialized(&self, container: NodeId) -> bool {
        self.tabs.get(&container).is_some_and(TabController::is_initialized)
    }

    pub fn resize_registry(&self) -> &ResizeRegistry {
        &self.resize
    }

    /// Recently dispatched notifications, oldest first. Only the last
    /// [`TabsConfig::notification_log_limit`] are kept.
    pub fn notifications(&self) -> &[Notification] {
        &self.delivered
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.delivered)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Attach every accordion, then initialize every tab container, in
    /// document order. Returns how many tab controllers were created,
    /// including nested ones brought up by an outer container's cascade.
    pub fn init_all(&mut self) -> usize {
        let root = self.doc.root();
        let nodes: Vec<NodeId> = std::iter::once(root).chain(self.doc.descendants(root)).collect();

        for &node in &nodes {
            if self.doc.node(node).is_some_and(dom::is_accordion)
                && let Err(err) = self.accordion_get_or_create(node)
            {
                log::debug!("[accordion] {node}: {err}");
            }
        }

        let before = self.tabs.len();
        for &node in &nodes {
            if !self.doc.node(node).is_some_and(dom::is_container) {
                continue;
            }
            if let Err(err) = self.tabs_get_or_create(node) {
                log::debug!("[tabs] {node}: initialization aborted: {err}");
            }
        }
        let created = self.tabs.len().saturating_sub(before);
        log::debug!("[tabs] init_all: {created} controllers created");
        created
    }

    /// Initialize one container, logging failures instead of returning them.
    pub fn initialize(&mut self, container: NodeId) -> bool {
        match self.tabs_get_or_create(container) {
            Ok(_) => true,
            Err(err) => {
                log::debug!("[tabs] {container}: initialization aborted: {err}");
                false
            }
        }
    }

    /// Return the live controller for `container`, creating and initializing
    /// one if none exists. Existing controllers are left untouched.
    pub fn tabs_get_or_create(&mut self, container: NodeId) -> Result<Instance, TabsError> {
        if self.tabs.contains_key(&container) {
            return Ok(Instance::Existing);
        }
        self.resync_container(container)?;
        self.flush();
        Ok(Instance::Created)
    }

    /// Return the live accordion controller for `root`, attaching one if needed.
    pub fn accordion_get_or_create(&mut self, root: NodeId) -> Result<Instance, TabsError> {
        if self.accordions.contains_key(&root) {
            return Ok(Instance::Existing);
        }
        let accordion = AccordionController::attach(&mut self.doc, root)?;
        self.accordions.insert(root, accordion);
        Ok(Instance::Created)
    }

    /// Build or refresh the controller of `container` and run its depth-1
    /// initialization. Does not flush notifications.
    pub(crate) fn resync_container(&mut self, container: NodeId) -> Result<InitOutcome, TabsError> {
        if !self.doc.is_attached(container) {
            self.drop_tabs(container);
            return Err(TabsError::Detached(container));
        }

        let created = !self.tabs.contains_key(&container);
        if created {
            let controller = TabController::build(&mut self.doc, container)?;
            self.tabs.insert(container, controller);
            self.resize.register(container);
        }

        let gate = self.closed_accordion_ancestor(container);
        let gated = gate.is_some();
        let result = self
            .with_tabs(container, |tabs, cx| {
                if created {
                    Ok(tabs.initialize(cx, gated))
                } else {
                    tabs.refresh(cx, gated)
                }
            })
            .unwrap_or(Err(TabsError::NotAContainer(container)));

        match result {
            Ok(InitOutcome::Deferred) => {
                if let Some(accordion) = gate.and_then(|g| self.accordions.get_mut(&g)) {
                    accordion.defer(OnSettled::InitTabs(container));
                }
                Ok(InitOutcome::Deferred)
            }
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.drop_tabs(container);
                Err(err)
            }
        }
    }

    /// Nearest enclosing accordion that is not fully open. Accordions found
    /// on the way are attached if they were not yet.
    pub(crate) fn closed_accordion_ancestor(&mut self, node: NodeId) -> Option<NodeId> {
        let candidates: Vec<NodeId> = self
            .doc
            .ancestors(node)
            .filter(|&a| self.doc.node(a).is_some_and(dom::is_accordion))
            .collect();
        for accordion in candidates {
            if let Err(err) = self.accordion_get_or_create(accordion) {
                log::warn!("[accordion] {accordion}: {err}");
                continue;
            }
            if self.accordions.get(&accordion).is_some_and(|a| !a.is_open()) {
                return Some(accordion);
            }
        }
        None
    }

    /// Detach `node` and its subtree, destroying the controllers rooted in it.
    /// The nearest enclosing controller re-reads its registries so removed
    /// tabs, panels and strips drop out. Returns the number of nodes removed.
    pub fn remove(&mut self, node: NodeId) -> usize {
        let owner = self.doc.ancestors(node).find(|a| self.tabs.contains_key(a));
        let removed = self.doc.remove(node);
        if removed.is_empty() {
            return 0;
        }
        self.scheduler.cancel_where(|key| removed.contains(&key.target));
        for &id in &removed {
            self.drop_tabs(id);
            if self.accordions.remove(&id).is_some() {
                self.scheduler.cancel_where(|key| key.owner == id);
                log::debug!("[accordion] {id}: destroyed");
            }
            self.scrolls.cancel(id);
        }
        for accordion in self.accordions.values_mut() {
            accordion.forget(&removed);
        }
        self.focus.forget(&removed);

        if let Some(owner) = owner {
            if let Err(err) = self.resync_container(owner) {
                log::debug!("[tabs] {owner}: refresh after removal failed: {err}");
            }
            self.flush();
        }
        removed.len()
    }

    fn drop_tabs(&mut self, container: NodeId) {
        if self.tabs.remove(&container).is_some() {
            self.resize.unregister(container);
            let cancelled = self.scheduler.cancel_where(|key| key.owner == container);
            log::debug!("[tabs] {container}: destroyed, {cancelled} tasks cancelled");
        }
    }

    // -------------------------------------------------------------------------
    // Tab operations
    // -------------------------------------------------------------------------

    /// Activate a tab by element id. Returns false for unknown or disabled
    /// tabs, and for containers without a live controller.
    pub fn activate_tab(&mut self, container: NodeId, id: &str, focus: bool) -> bool {
        let done = self
            .with_tabs(container, |tabs, cx| tabs.activate_tab(cx, id, focus))
            .unwrap_or(false);
        self.flush();
        done
    }

    pub fn set_default_tab(&mut self, container: NodeId, id: &str) -> bool {
        let done = self
            .with_tabs(container, |tabs, cx| tabs.set_default_tab(cx, id))
            .unwrap_or(false);
        self.flush();
        done
    }

    pub fn set_tabs_title(&mut self, container: NodeId, id: &str, value: &str) -> bool {
        let done = self
            .with_tabs(container, |tabs, cx| tabs.set_tabs_title(cx, id, value))
            .unwrap_or(false);
        self.flush();
        done
    }

    pub fn set_tab_disabled(&mut self, container: NodeId, id: &str, disabled: bool) -> bool {
        self.with_tabs(container, |tabs, cx| tabs.set_tab_disabled(cx.doc, id, disabled))
            .unwrap_or(false)
    }

    pub fn reset_depth2(&mut self, container: NodeId, group: Option<&str>) -> bool {
        let done = self
            .with_tabs(container, |tabs, cx| tabs.reset_depth2(cx, group))
            .unwrap_or(false);
        self.flush();
        done
    }

    // -------------------------------------------------------------------------
    // Accordion operations
    // -------------------------------------------------------------------------

    pub fn open_accordion(&mut self, root: NodeId) -> bool {
        self.accordion_op(root, |accordion, cx| accordion.open(cx))
    }

    pub fn close_accordion(&mut self, root: NodeId) -> bool {
        self.accordion_op(root, |accordion, cx| accordion.close(cx))
    }

    /// Open if closed, close if open. Ignored while a transition runs.
    pub fn toggle_accordion(&mut self, root: NodeId) -> bool {
        self.accordion_op(root, |accordion, cx| accordion.open_content(cx))
    }

    /// Re-measure an open accordion after its content changed shape.
    pub fn content_changed(&mut self, root: NodeId) -> bool {
        self.accordion_op(root, |accordion, cx| accordion.on_content_changed(cx.doc))
    }

    fn accordion_op(
        &mut self,
        root: NodeId,
        f: impl FnOnce(&mut AccordionController, &mut Context<'_>) -> bool,
    ) -> bool {
        if let Err(err) = self.accordion_get_or_create(root) {
            log::debug!("[accordion] {root}: {err}");
            return false;
        }
        let done = self.with_accordion(root, f).unwrap_or(false);
        self.flush();
        done
    }

    // -------------------------------------------------------------------------
    // Controller access
    // -------------------------------------------------------------------------

    fn with_tabs<R>(
        &mut self,
        container: NodeId,
        f: impl FnOnce(&mut TabController, &mut Context<'_>) -> R,
    ) -> Option<R> {
        let tabs = self.tabs.get_mut(&container)?;
        let mut cx = Context::new(
            &mut self.doc,
            &mut self.scheduler,
            &mut self.scrolls,
            &mut self.focus,
            &self.config,
            &mut self.outbox,
        );
        Some(f(tabs, &mut cx))
    }

    fn with_accordion<R>(
        &mut self,
        root: NodeId,
        f: impl FnOnce(&mut AccordionController, &mut Context<'_>) -> R,
    ) -> Option<R> {
        let accordion = self.accordions.get_mut(&root)?;
        let mut cx = Context::new(
            &mut self.doc,
            &mut self.scheduler,
            &mut self.scrolls,
            &mut self.focus,
            &self.config,
            &mut self.outbox,
        );
        Some(f(accordion, &mut cx))
    }
}
