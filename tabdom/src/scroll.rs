use std::collections::HashMap;
use std::time::Duration;

use crate::document::NodeId;
use crate::transitions::{TransitionConfig, Tween};

/// In-flight smooth scrolls, one per scroll container.
///
/// Starting a new scroll on a container replaces the previous one, so the
/// latest request always wins.
#[derive(Debug, Default)]
pub struct ScrollAnimations {
    active: HashMap<NodeId, Tween>,
}

impl ScrollAnimations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, node: NodeId, from: f32, to: f32, now: Duration, config: TransitionConfig) {
        self.active.insert(node, Tween::new(from, to, now, config));
    }

    /// Target offset of the in-flight scroll on `node`, if any.
    pub fn target(&self, node: NodeId) -> Option<f32> {
        self.active.get(&node).map(|t| t.to)
    }

    pub fn is_active(&self, node: NodeId) -> bool {
        self.active.contains_key(&node)
    }

    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn cancel(&mut self, node: NodeId) -> bool {
        self.active.remove(&node).is_some()
    }

    /// Sample every scroll at `now`. Finished scrolls are dropped after
    /// yielding their final offset.
    pub fn step(&mut self, now: Duration) -> Vec<(NodeId, f32)> {
        let mut out: Vec<(NodeId, f32)> = self
            .active
            .iter()
            .map(|(&node, tween)| (node, tween.value_at(now)))
            .collect();
        out.sort_by_key(|(node, _)| *node);
        self.active.retain(|_, tween| !tween.is_finished(now));
        out
    }
}
