/// Measured box of a node after layout.
///
/// `x`/`y` are relative to the parent's border box and ignore the parent's
/// scroll offset, like `offsetLeft`/`offsetTop` against an offset parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMetrics {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub client_width: f32,
    pub scroll_width: f32,
    pub scroll_height: f32,
}

impl BoxMetrics {
    pub const fn right(&self) -> f32 {
        self.x + self.width
    }

    pub const fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Largest valid horizontal scroll offset.
    pub fn max_scroll_left(&self) -> f32 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    /// True when the box was laid out with no size (display none, or empty).
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 && self.height <= 0.0
    }
}

/// Font metrics used to size text runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Width of one display column.
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
        }
    }
}
