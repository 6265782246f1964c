use std::collections::HashMap;

use super::{BoxMetrics, TextMetrics};
use crate::document::{Document, NodeId};
use crate::text::text_width;
use crate::types::{Direction, Position, Size};

pub type LayoutResult = HashMap<NodeId, BoxMetrics>;

pub fn layout(doc: &Document, viewport_width: f32, text: TextMetrics) -> LayoutResult {
    let mut result = LayoutResult::new();
    let mut pass = Pass {
        doc,
        text,
        result: &mut result,
    };
    pass.layout_node(doc.root(), 0.0, 0.0, viewport_width, false);
    result
}

struct Pass<'a> {
    doc: &'a Document,
    text: TextMetrics,
    result: &'a mut LayoutResult,
}

impl Pass<'_> {
    /// Lay out `id` at (`x`, `y`) inside `available` width. Returns the outer
    /// (width, height) the parent should advance by.
    fn layout_node(&mut self, id: NodeId, x: f32, y: f32, available: f32, in_row: bool) -> (f32, f32) {
        let Some(node) = self.doc.node(id) else {
            return (0.0, 0.0);
        };

        if node.is_hidden() {
            self.zero_subtree(id);
            return (0.0, 0.0);
        }

        let mut width = match node.width {
            Size::Fixed(w) => w,
            Size::Percent(p) if !in_row => available * p,
            Size::Fill if !in_row => available,
            _ => self.intrinsic_width(id),
        };
        let mut x = x;
        if node.position == Position::Absolute {
            x = node.style_left.unwrap_or(0.0);
        }
        if let Some(w) = node.style_width {
            width = w;
        }
        let width = width.max(0.0);

        let padding = node.padding_x;
        let inner = (width - 2.0 * padding).max(0.0);
        let (content_width, content_height) = match (node.text(), node.children().is_empty()) {
            (Some(text), _) => (
                text_width(text, self.text),
                self.text.line_height,
            ),
            (None, true) => (0.0, 0.0),
            (None, false) => self.layout_children(id, padding, inner),
        };

        let natural = match node.height {
            Size::Fixed(h) => h,
            _ => content_height,
        };
        let height = node.style_height.unwrap_or(natural).max(0.0);

        self.result.insert(
            id,
            BoxMetrics {
                x,
                y,
                width,
                height,
                client_width: width,
                scroll_width: (content_width + 2.0 * padding).max(width),
                scroll_height: content_height.max(height),
            },
        );

        if node.position == Position::Absolute {
            (0.0, 0.0)
        } else {
            (width, height)
        }
    }

    fn layout_children(&mut self, id: NodeId, padding: f32, inner: f32) -> (f32, f32) {
        let Some(node) = self.doc.node(id) else {
            return (0.0, 0.0);
        };
        let is_row = node.direction == Direction::Row;
        let gap = node.gap;

        let mut cursor = 0.0f32;
        let mut cross = 0.0f32;
        let mut placed = 0usize;

        for &child in node.children() {
            let Some(child_node) = self.doc.node(child) else {
                continue;
            };
            if child_node.position == Position::Absolute {
                self.layout_node(child, 0.0, 0.0, inner, is_row);
                continue;
            }
            if child_node.is_hidden() {
                self.zero_subtree(child);
                continue;
            }
            if placed > 0 {
                cursor += gap;
            }
            let (w, h) = if is_row {
                self.layout_node(child, padding + cursor, 0.0, inner, true)
            } else {
                self.layout_node(child, padding, cursor, inner, false)
            };
            if is_row {
                cursor += w;
                cross = cross.max(h);
            } else {
                cursor += h;
                cross = cross.max(w);
            }
            placed += 1;
        }

        if is_row {
            (cursor, cross)
        } else {
            (cross, cursor)
        }
    }

    fn intrinsic_width(&self, id: NodeId) -> f32 {
        let Some(node) = self.doc.node(id) else {
            return 0.0;
        };
        if node.is_hidden() {
            return 0.0;
        }
        if let Size::Fixed(w) = node.width {
            return w;
        }
        let padding = 2.0 * node.padding_x;
        if let Some(text) = node.text() {
            return text_width(text, self.text) + padding;
        }

        let flow: Vec<f32> = node
            .children()
            .iter()
            .filter(|&&c| {
                self.doc
                    .node(c)
                    .is_some_and(|n| n.position != Position::Absolute && !n.is_hidden())
            })
            .map(|&c| self.intrinsic_width(c))
            .collect();

        let content = if node.direction == Direction::Row {
            flow.iter().sum::<f32>() + node.gap * flow.len().saturating_sub(1) as f32
        } else {
            flow.iter().copied().fold(0.0, f32::max)
        };
        content + padding
    }

    fn zero_subtree(&mut self, id: NodeId) {
        self.result.insert(id, BoxMetrics::default());
        for child in self.doc.descendants(id) {
            self.result.insert(child, BoxMetrics::default());
        }
    }
}
