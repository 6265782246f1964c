//! Two-level tab navigation.
//!
//! A [`TabController`] owns the registries of one container: its depth-1
//! tabs, the depth-2 groups hanging off them, their panels, and one
//! [`Strip`] per tab list with its indicator and scroll controls.
//!
//! Selection and panel visibility change synchronously. Indicator placement,
//! scroll-nav state and centering of the active tab depend on layout and run
//! from scheduled tasks.

mod events;
mod item;
mod state;

pub use item::{Depth, Depth2Group, Panel, Strip, TabItem};
pub use state::{InitOutcome, Phase, Selection, StripVariant, TabController, TabOptions};
