//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tabdom::TextMetrics;

/// Timing and geometry knobs shared by every controller of a runtime.
///
/// Durations are stored in milliseconds so the struct round-trips through
/// plain config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Virtual time between two frames.
    pub frame_interval_ms: u64,

    /// Pixels of slack when comparing scroll offsets against the strip ends.
    pub scroll_tolerance: f32,

    /// Fraction of the strip's client width moved by one prev/next press.
    pub scroll_step_fraction: f32,

    /// How long a pressed prev/next control keeps its active class.
    pub active_class_ms: u64,

    /// Duration of a smooth scroll.
    pub smooth_scroll_ms: u64,

    /// Delay before scroll-nav state is re-derived after a centering scroll.
    pub scroll_settle_ms: u64,

    /// Duration of the accordion height transition.
    pub accordion_duration_ms: u64,

    /// When true, transitions end on the next frame.
    pub reduced_motion: bool,

    /// Width of one display column of tab label text.
    pub char_width: f32,

    pub line_height: f32,

    /// How many dispatched notifications the runtime keeps for inspection.
    /// Older entries are dropped first.
    pub notification_log_limit: usize,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            scroll_tolerance: 1.0,
            scroll_step_fraction: 0.8,
            active_class_ms: 300,
            smooth_scroll_ms: 300,
            scroll_settle_ms: 350,
            accordion_duration_ms: 300,
            reduced_motion: false,
            char_width: 8.0,
            line_height: 20.0,
            notification_log_limit: 256,
        }
    }
}

impl TabsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scroll tolerance in pixels.
    pub fn scroll_tolerance(mut self, px: f32) -> Self {
        self.scroll_tolerance = px;
        self
    }

    /// Set the prev/next step as a fraction of the strip width.
    pub fn scroll_step_fraction(mut self, fraction: f32) -> Self {
        self.scroll_step_fraction = fraction;
        self
    }

    /// Set the accordion transition duration.
    pub fn accordion_duration(mut self, duration: Duration) -> Self {
        self.accordion_duration_ms = duration.as_millis() as u64;
        self
    }

    /// Set the smooth scroll duration.
    pub fn smooth_scroll(mut self, duration: Duration) -> Self {
        self.smooth_scroll_ms = duration.as_millis() as u64;
        self
    }

    /// Set how many dispatched notifications are retained.
    pub fn notification_log_limit(mut self, limit: usize) -> Self {
        self.notification_log_limit = limit;
        self
    }

    /// Make every transition finish on the next frame.
    pub fn reduced_motion(mut self) -> Self {
        self.reduced_motion = true;
        self
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    pub fn active_class_duration(&self) -> Duration {
        Duration::from_millis(self.active_class_ms)
    }

    pub fn smooth_scroll_duration(&self) -> Duration {
        self.motion(self.smooth_scroll_ms)
    }

    pub fn scroll_settle_delay(&self) -> Duration {
        self.motion(self.scroll_settle_ms)
    }

    pub fn accordion_transition(&self) -> Duration {
        self.motion(self.accordion_duration_ms)
    }

    pub fn text_metrics(&self) -> TextMetrics {
        TextMetrics {
            char_width: self.char_width,
            line_height: self.line_height,
        }
    }

    fn motion(&self, ms: u64) -> Duration {
        if self.reduced_motion {
            Duration::ZERO
        } else {
            Duration::from_millis(ms)
        }
    }
}
