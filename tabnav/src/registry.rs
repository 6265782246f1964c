//! Per-document bookkeeping shared by the controllers of one runtime.

use tabdom::NodeId;

/// Result of a get-or-create lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instance {
    /// A live controller already existed.
    Existing,
    /// A controller was created by this call.
    Created,
}

impl Instance {
    pub fn is_created(self) -> bool {
        self == Instance::Created
    }
}

/// Containers that receive window resize notifications.
///
/// Every scroll-nav of every registered container is served by a single
/// listener, installed when the first container registers and dropped
/// when the last one leaves.
#[derive(Debug, Default)]
pub struct ResizeRegistry {
    containers: Vec<NodeId>,
}

impl ResizeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the container was already registered.
    pub fn register(&mut self, container: NodeId) -> bool {
        if self.contains(container) {
            return false;
        }
        if self.containers.is_empty() {
            log::debug!("[scroll-nav] installing resize listener");
        }
        self.containers.push(container);
        true
    }

    pub fn unregister(&mut self, container: NodeId) -> bool {
        let before = self.containers.len();
        self.containers.retain(|&c| c != container);
        let removed = before != self.containers.len();
        if removed && self.containers.is_empty() {
            log::debug!("[scroll-nav] removing resize listener");
        }
        removed
    }

    pub fn contains(&self, container: NodeId) -> bool {
        self.containers.contains(&container)
    }

    /// Registered containers in registration order.
    pub fn containers(&self) -> &[NodeId] {
        &self.containers
    }

    /// Number of installed resize listeners: one while anything is registered.
    pub fn listener_count(&self) -> usize {
        usize::from(!self.containers.is_empty())
    }
}
