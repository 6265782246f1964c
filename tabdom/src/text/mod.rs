use unicode_width::UnicodeWidthStr;

use crate::layout::TextMetrics;

/// Number of terminal-style display columns `s` occupies.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Pixel width of a single-line label.
pub fn text_width(s: &str, metrics: TextMetrics) -> f32 {
    display_width(s) as f32 * metrics.char_width
}
