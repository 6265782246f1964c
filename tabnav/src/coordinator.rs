//! Re-synchronization entry point for containers whose visibility changed
//! outside the engine's control.
//!
//! Geometry-dependent state (indicator position, scroll-nav visibility)
//! cannot be computed while a container is `display: none`. After showing
//! one out of band, call [`Runtime::resync`] on it.

use tabdom::{NodeId, Selector};

use crate::dom;
use crate::error::TabsError;
use crate::runtime::Runtime;

/// Which containers [`Runtime::resync`] processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResyncTarget<'a> {
    /// Every tab container in the document.
    All,
    Container(NodeId),
    Containers(&'a [NodeId]),
    /// Containers matching a selector.
    Selector(&'a str),
}

impl From<NodeId> for ResyncTarget<'_> {
    fn from(node: NodeId) -> Self {
        ResyncTarget::Container(node)
    }
}

impl<'a> From<&'a [NodeId]> for ResyncTarget<'a> {
    fn from(nodes: &'a [NodeId]) -> Self {
        ResyncTarget::Containers(nodes)
    }
}

impl<'a> From<&'a str> for ResyncTarget<'a> {
    fn from(selector: &'a str) -> Self {
        ResyncTarget::Selector(selector)
    }
}

impl Runtime {
    /// Re-run depth-1 initialization on the targeted containers, creating
    /// controllers where none is live.
    ///
    /// Per-container failures are logged and skipped. Returns how many
    /// containers were processed; fails only on an unparsable selector.
    pub fn resync<'a>(&mut self, target: impl Into<ResyncTarget<'a>>) -> Result<usize, TabsError> {
        let containers = self.resolve(target.into())?;
        let mut processed = 0;
        for container in containers {
            if self.document().is_attached(container) && !self.doc_is_container(container) {
                log::warn!("[coordinator] {container}: not a tab container, skipping");
                continue;
            }
            match self.resync_container(container) {
                Ok(outcome) => {
                    log::debug!("[coordinator] {container}: {outcome:?}");
                    processed += 1;
                }
                Err(err) => log::warn!("[coordinator] {container}: {err}"),
            }
            self.flush();
        }
        Ok(processed)
    }

    fn resolve(&self, target: ResyncTarget<'_>) -> Result<Vec<NodeId>, TabsError> {
        let doc = self.document();
        let root = doc.root();
        let everywhere = |pred: &dyn Fn(NodeId) -> bool| -> Vec<NodeId> {
            std::iter::once(root)
                .chain(doc.descendants(root))
                .filter(|&n| pred(n))
                .collect()
        };

        Ok(match target {
            ResyncTarget::All => everywhere(&|n| doc.node(n).is_some_and(dom::is_container)),
            ResyncTarget::Container(node) => vec![node],
            ResyncTarget::Containers(nodes) => nodes.to_vec(),
            ResyncTarget::Selector(source) => {
                let selector =
                    Selector::parse(source).ok_or_else(|| TabsError::InvalidSelector(source.to_string()))?;
                everywhere(&|n| doc.matches(n, &selector))
            }
        })
    }

    fn doc_is_container(&self, node: NodeId) -> bool {
        self.document().node(node).is_some_and(dom::is_container)
    }
}
