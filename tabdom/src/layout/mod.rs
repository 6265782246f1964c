mod flow;
mod metrics;

pub use flow::{layout, LayoutResult};
pub use metrics::{BoxMetrics, TextMetrics};
