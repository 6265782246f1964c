use std::collections::HashMap;
use std::fmt;

use crate::element::{Content, Element};
use crate::layout::{self, BoxMetrics, LayoutResult, TextMetrics};
use crate::selector::Selector;
use crate::types::{Direction, Overflow, Position, Size};

/// Handle to a live node. Stays valid until the node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A mounted element.
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    tag: String,
    classes: Vec<String>,
    attrs: HashMap<String, String>,
    text: Option<String>,

    parent: Option<NodeId>,
    children: Vec<NodeId>,

    pub(crate) width: Size,
    pub(crate) height: Size,
    pub(crate) padding_x: f32,
    pub(crate) direction: Direction,
    pub(crate) gap: f32,
    pub(crate) position: Position,
    pub(crate) overflow_x: Overflow,
    hidden: bool,

    // Inline style written by controllers
    pub(crate) style_left: Option<f32>,
    pub(crate) style_width: Option<f32>,
    pub(crate) style_height: Option<f32>,

    scroll_left: f32,
}

impl Node {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Own `display: none` flag. See [`Document::is_rendered`] for the
    /// effective state.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn style_left(&self) -> Option<f32> {
        self.style_left
    }

    pub fn style_width(&self) -> Option<f32> {
        self.style_width
    }

    pub fn style_height(&self) -> Option<f32> {
        self.style_height
    }

    pub fn scroll_left(&self) -> f32 {
        self.scroll_left
    }

    pub fn overflow_x(&self) -> Overflow {
        self.overflow_x
    }
}

/// Arena-backed live tree with lazy layout and mutation observation.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    viewport_width: f32,
    text_metrics: TextMetrics,

    layout: LayoutResult,
    dirty: bool,

    observers: Vec<NodeId>,
    records: Vec<NodeId>,
}

impl Document {
    pub fn new(root: Element, viewport_width: f32) -> Self {
        Self::with_text_metrics(root, viewport_width, TextMetrics::default())
    }

    pub fn with_text_metrics(root: Element, viewport_width: f32, text_metrics: TextMetrics) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            viewport_width,
            text_metrics,
            layout: LayoutResult::new(),
            dirty: true,
            observers: Vec::new(),
            records: Vec::new(),
        };
        doc.root = doc.mount(root, None);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn text_metrics(&self) -> TextMetrics {
        self.text_metrics
    }

    /// Change the viewport width (window resize).
    pub fn resize(&mut self, width: f32) {
        if self.viewport_width != width {
            self.viewport_width = width;
            self.dirty = true;
        }
    }

    fn mount(&mut self, element: Element, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let (text, children) = match element.content {
            Content::None => (None, Vec::new()),
            Content::Text(text) => (Some(text), Vec::new()),
            Content::Children(children) => (None, children),
        };
        self.nodes.push(Some(Node {
            id: element.id,
            tag: element.tag,
            classes: element.classes,
            attrs: element.attrs,
            text,
            parent,
            children: Vec::new(),
            width: element.width,
            height: element.height,
            padding_x: element.padding_x,
            direction: element.direction,
            gap: element.gap,
            position: element.position,
            overflow_x: element.overflow_x,
            hidden: element.hidden,
            style_left: element.left,
            style_width: None,
            style_height: None,
            scroll_left: 0.0,
        }));
        for child in children {
            let child_id = self.mount(child, Some(id));
            if let Some(node) = self.nodes[id.0].as_mut() {
                node.children.push(child_id);
            }
        }
        id
    }

    // -------------------------------------------------------------------------
    // Tree access
    // -------------------------------------------------------------------------

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or(&[])
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// True if `node` is `ancestor` or lies inside it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// All descendants of `scope` in document order, excluding `scope`.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(scope, &mut out, &|_| false);
        out
    }

    /// Descendants in document order, not descending into nodes for which
    /// `boundary` returns true (those nodes themselves are still included).
    pub fn descendants_until(&self, scope: NodeId, boundary: &dyn Fn(NodeId) -> bool) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(scope, &mut out, boundary);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>, boundary: &dyn Fn(NodeId) -> bool) {
        for &child in self.children(id) {
            out.push(child);
            if !boundary(child) {
                self.collect_descendants(child, out, boundary);
            }
        }
    }

    /// First node with the given `id` attribute in document order.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        if self.node(self.root).is_some_and(|n| n.id == id) {
            return Some(self.root);
        }
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.node(n).is_some_and(|node| node.id == id))
    }

    // -------------------------------------------------------------------------
    // Selectors
    // -------------------------------------------------------------------------

    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.node(id).is_some_and(|node| selector.matches(node))
    }

    /// Closest inclusive ancestor matching `selector`.
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        if self.matches(id, selector) {
            return Some(id);
        }
        self.ancestors(id).find(|&a| self.matches(a, selector))
    }

    pub fn query(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.query_all(scope, selector).into_iter().next()
    }

    pub fn query_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.matches(n, selector))
            .collect()
    }

    /// Closest inclusive ancestor for which `pred` holds.
    pub fn closest_where(&self, id: NodeId, pred: impl Fn(&Node) -> bool) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&n| self.node(n).is_some_and(&pred))
    }

    /// Descendants of `scope` for which `pred` holds, in document order.
    pub fn find_all(&self, scope: NodeId, pred: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.node(n).is_some_and(&pred))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        self.node(id)?.attr(key)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.has_class(class))
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id)?.text()
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.node(id).map_or(true, Node::is_hidden)
    }

    /// True when neither the node nor any ancestor is `display: none`.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| !n.hidden) && self.ancestors(id).all(|a| !self.is_hidden(a))
    }

    pub fn scroll_left(&self, id: NodeId) -> f32 {
        self.node(id).map(Node::scroll_left).unwrap_or(0.0)
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    fn write(&mut self, id: NodeId, relayout: bool, f: impl FnOnce(&mut Node) -> bool) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        if !f(node) {
            return false;
        }
        if relayout {
            self.dirty = true;
        }
        self.record_mutation(id);
        true
    }

    pub fn set_attr(&mut self, id: NodeId, key: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        self.write(id, false, |node| {
            if node.attrs.get(key) == Some(&value) {
                return false;
            }
            node.attrs.insert(key.to_string(), value);
            true
        })
    }

    pub fn remove_attr(&mut self, id: NodeId, key: &str) -> bool {
        self.write(id, false, |node| node.attrs.remove(key).is_some())
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        self.write(id, false, |node| {
            if node.has_class(class) {
                return false;
            }
            node.classes.push(class.to_string());
            true
        })
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        self.write(id, false, |node| {
            let before = node.classes.len();
            node.classes.retain(|c| c != class);
            node.classes.len() != before
        })
    }

    pub fn toggle_class(&mut self, id: NodeId, class: &str, on: bool) -> bool {
        if on {
            self.add_class(id, class)
        } else {
            self.remove_class(id, class)
        }
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> bool {
        self.write(id, true, |node| {
            if node.hidden == hidden {
                return false;
            }
            node.hidden = hidden;
            true
        })
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> bool {
        let text = text.into();
        self.write(id, true, |node| {
            if node.text.as_deref() == Some(text.as_str()) {
                return false;
            }
            node.text = Some(text);
            true
        })
    }

    pub fn set_style_left(&mut self, id: NodeId, left: Option<f32>) -> bool {
        self.write(id, true, |node| {
            if node.style_left == left {
                return false;
            }
            node.style_left = left;
            true
        })
    }

    pub fn set_style_width(&mut self, id: NodeId, width: Option<f32>) -> bool {
        self.write(id, true, |node| {
            if node.style_width == width {
                return false;
            }
            node.style_width = width;
            true
        })
    }

    pub fn set_style_height(&mut self, id: NodeId, height: Option<f32>) -> bool {
        self.write(id, true, |node| {
            if node.style_height == height {
                return false;
            }
            node.style_height = height;
            true
        })
    }

    /// Set the horizontal scroll offset, clamped to `[0, max]`.
    /// Returns true if the offset changed.
    pub fn set_scroll_left(&mut self, id: NodeId, x: f32) -> bool {
        let max = self.metrics(id).max_scroll_left();
        let x = x.clamp(0.0, max);
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        if (node.scroll_left - x).abs() < f32::EPSILON {
            return false;
        }
        node.scroll_left = x;
        true
    }

    /// Mount `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        if !self.is_attached(parent) {
            return None;
        }
        let id = self.mount(element, Some(parent));
        if let Some(node) = self.node_mut(parent) {
            node.children.push(id);
        }
        self.dirty = true;
        self.record_mutation(parent);
        Some(id)
    }

    /// Detach a subtree. Returns every removed node, `id` first.
    pub fn remove(&mut self, id: NodeId) -> Vec<NodeId> {
        if id == self.root || !self.is_attached(id) {
            return Vec::new();
        }
        let parent = self.parent(id);
        let mut removed = vec![id];
        removed.extend(self.descendants(id));

        if let Some(parent) = parent {
            self.record_mutation(parent);
            if let Some(node) = self.node_mut(parent) {
                node.children.retain(|&c| c != id);
            }
        }
        for &n in &removed {
            self.nodes[n.0] = None;
            self.layout.remove(&n);
        }
        self.observers.retain(|o| !removed.contains(o));
        self.records.retain(|o| !removed.contains(o));
        self.dirty = true;
        removed
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn layout_if_dirty(&mut self) {
        if self.dirty {
            self.layout = layout::layout(self, self.viewport_width, self.text_metrics);
            self.dirty = false;
            log::trace!("[layout] {} nodes measured", self.layout.len());
        }
    }

    /// Box metrics for a node, forcing a layout pass if the tree is dirty.
    pub fn metrics(&mut self, id: NodeId) -> BoxMetrics {
        self.layout_if_dirty();
        self.layout.get(&id).copied().unwrap_or_default()
    }

    /// Metrics from the last layout pass without forcing a new one.
    pub fn cached_metrics(&self, id: NodeId) -> BoxMetrics {
        self.layout.get(&id).copied().unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Mutation observation
    // -------------------------------------------------------------------------

    /// Start recording mutations inside the subtree rooted at `target`.
    pub fn observe(&mut self, target: NodeId) {
        if self.is_attached(target) && !self.observers.contains(&target) {
            self.observers.push(target);
        }
    }

    pub fn disconnect(&mut self, target: NodeId) {
        self.observers.retain(|&o| o != target);
        self.records.retain(|&o| o != target);
    }

    pub fn is_observed(&self, target: NodeId) -> bool {
        self.observers.contains(&target)
    }

    /// Observed roots whose subtree changed since the last call.
    pub fn take_mutations(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.records)
    }

    fn record_mutation(&mut self, target: NodeId) {
        let hits: Vec<NodeId> = self
            .observers
            .iter()
            .copied()
            .filter(|&o| self.contains(o, target))
            .collect();
        for observer in hits {
            if !self.records.contains(&observer) {
                self.records.push(observer);
            }
        }
    }
}

/// Iterator over the ancestors of a node.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}
