//! Marker under the active tab of a strip.

use tabdom::{Document, Element, NodeId, Position, Size};

use crate::dom;

#[derive(Debug, Clone)]
pub struct Indicator {
    strip: NodeId,
    node: NodeId,
    x: f32,
    width: f32,
    transitions_enabled: bool,
    positioned: bool,
}

impl Indicator {
    /// Locate the strip's indicator element or append one.
    pub fn init(doc: &mut Document, strip: NodeId) -> Option<Self> {
        let existing = doc
            .children(strip)
            .iter()
            .copied()
            .find(|&c| doc.has_class(c, dom::INDICATOR));
        let node = match existing {
            Some(node) => node,
            None => doc.append(
                strip,
                Element::div()
                    .class(dom::INDICATOR)
                    .position(Position::Absolute)
                    .width(Size::Fixed(0.0))
                    .height(Size::Fixed(2.0)),
            )?,
        };

        let (x, width) = doc
            .node(node)
            .map(|n| (n.style_left(), n.style_width()))
            .unwrap_or_default();

        Some(Self {
            strip,
            node,
            x: x.unwrap_or(0.0),
            width: width.unwrap_or(0.0),
            transitions_enabled: doc.has_class(node, dom::ANIMATED),
            positioned: x.is_some() && width.is_some(),
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn strip(&self) -> NodeId {
        self.strip
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn transitions_enabled(&self) -> bool {
        self.transitions_enabled
    }

    /// True once the indicator has been placed under a tab at least once.
    pub fn is_positioned(&self) -> bool {
        self.positioned
    }

    /// Move the indicator under `tab`. Does nothing while the strip is not
    /// rendered, since its geometry would read as zero.
    pub fn update(&mut self, doc: &mut Document, tab: NodeId) -> bool {
        if !doc.is_rendered(self.strip) || !doc.is_rendered(tab) {
            return false;
        }
        let metrics = doc.metrics(tab);
        if metrics.width <= 0.0 {
            return false;
        }

        doc.set_style_left(self.node, Some(metrics.x));
        doc.set_style_width(self.node, Some(metrics.width));
        self.x = metrics.x;
        self.width = metrics.width;
        self.positioned = true;
        log::trace!("[indicator] {}: x={} w={}", self.strip, self.x, self.width);
        true
    }

    pub fn set_transitions(&mut self, doc: &mut Document, enabled: bool) {
        doc.toggle_class(self.node, dom::ANIMATED, enabled);
        self.transitions_enabled = enabled;
    }
}
