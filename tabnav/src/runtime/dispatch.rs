//! Notification dispatch and deferred task execution.
//!
//! A panel becoming visible or an accordion finishing its opening
//! transition cascades into the components nested inside it. Failures in
//! a nested component are logged where they happen so siblings and the
//! outer container still complete.

use tabdom::NodeId;

use super::{Notification, Runtime, Task};
use crate::dom;
use crate::widgets::OnSettled;

/// Upper bound on dispatch rounds for one flush.
const MAX_CASCADE_ROUNDS: usize = 64;

/// Upper bound on mutation delivery rounds per frame.
const MAX_MUTATION_ROUNDS: usize = 8;

impl Runtime {
    /// Dispatch queued notifications until none remain.
    pub(crate) fn flush(&mut self) {
        let mut rounds = 0;
        while !self.outbox.is_empty() {
            rounds += 1;
            if rounds > MAX_CASCADE_ROUNDS {
                log::warn!(
                    "[coordinator] cascade still running after {MAX_CASCADE_ROUNDS} rounds, dropping {} notifications",
                    self.outbox.len()
                );
                self.outbox.clear();
                break;
            }
            for notification in std::mem::take(&mut self.outbox) {
                self.delivered.push(notification);
                self.dispatch(notification);
            }
        }

        let limit = self.config.notification_log_limit;
        if self.delivered.len() > limit {
            let excess = self.delivered.len() - limit;
            self.delivered.drain(..excess);
        }
    }

    fn dispatch(&mut self, notification: Notification) {
        match notification {
            Notification::PanelShown { container, panel } => {
                log::trace!("[coordinator] {container}: panel {panel} shown");
                self.refresh_nested(panel);
            }
            Notification::AccordionOpened { accordion } => {
                let Some(content) = self.accordions.get(&accordion).map(|a| a.content()) else {
                    return;
                };
                self.refresh_nested(content);
            }
            Notification::AccordionClosed { accordion } => {
                log::trace!("[coordinator] {accordion}: closed");
            }
        }
    }

    /// Resynchronize the components directly nested in `scope` after it
    /// became visible. Open accordions are re-measured and searched in turn;
    /// closed ones keep their content waiting.
    fn refresh_nested(&mut self, scope: NodeId) {
        if !self.doc.is_attached(scope) {
            return;
        }
        let doc = &self.doc;
        let is_component = |n: NodeId| {
            doc.node(n)
                .is_some_and(|n| dom::is_container(n) || dom::is_accordion(n))
        };
        let nested: Vec<NodeId> = doc
            .descendants_until(scope, &is_component)
            .into_iter()
            .filter(|&n| is_component(n))
            .collect();

        for node in nested {
            if self.doc.node(node).is_some_and(dom::is_accordion) {
                if let Err(err) = self.accordion_get_or_create(node) {
                    log::warn!("[coordinator] {scope}: nested accordion {node} failed: {err}");
                    continue;
                }
                let Some(accordion) = self.accordions.get_mut(&node).filter(|a| a.is_open()) else {
                    continue;
                };
                accordion.on_content_changed(&mut self.doc);
                let content = accordion.content();
                self.refresh_nested(content);
            } else if let Err(err) = self.resync_container(node) {
                log::warn!("[coordinator] {scope}: nested tabs {node} failed: {err}");
            }
        }
    }

    pub(crate) fn run_task(&mut self, task: Task) {
        match task {
            Task::AccordionTransitionEnd { accordion } => self.finish_accordion(accordion),
            task => {
                let container = task.key().owner;
                self.with_tabs(container, |tabs, cx| tabs.run_task(cx, task));
            }
        }
    }

    fn finish_accordion(&mut self, root: NodeId) {
        let Some(pending) = self.with_accordion(root, |accordion, cx| accordion.finish_transition(cx)) else {
            return;
        };
        for OnSettled::InitTabs(container) in pending {
            match self.resync_container(container) {
                Ok(outcome) => log::debug!("[accordion] {root}: deferred tabs {container}: {outcome:?}"),
                Err(err) => log::warn!("[accordion] {root}: deferred tabs {container} failed: {err}"),
            }
        }
    }

    /// Re-measure open accordions whose observed content changed.
    pub(crate) fn deliver_mutations(&mut self) {
        for _ in 0..MAX_MUTATION_ROUNDS {
            let targets = self.doc.take_mutations();
            if targets.is_empty() {
                return;
            }
            let mut owners: Vec<NodeId> = self
                .accordions
                .iter()
                .filter(|(_, a)| targets.contains(&a.content()))
                .map(|(&root, _)| root)
                .collect();
            owners.sort();
            for root in owners {
                if let Some(accordion) = self.accordions.get_mut(&root) {
                    accordion.on_content_changed(&mut self.doc);
                }
            }
        }
    }

    /// A strip's scroll offset changed.
    pub(crate) fn strip_scrolled(&mut self, strip: NodeId) -> bool {
        let Some(container) = self.doc.closest_where(strip, dom::is_container) else {
            return false;
        };
        self.with_tabs(container, |tabs, cx| tabs.on_scroll(cx, strip))
            .unwrap_or(false)
    }
}
