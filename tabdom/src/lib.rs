pub mod document;
pub mod element;
pub mod event;
pub mod focus;
pub mod layout;
pub mod schedule;
pub mod scroll;
pub mod selector;
pub mod text;
pub mod transitions;
pub mod types;

pub use document::{Document, Node, NodeId};
pub use element::Element;
pub use event::{Event, Key, Modifiers};
pub use focus::FocusState;
pub use layout::{BoxMetrics, TextMetrics};
pub use schedule::{Frames, Scheduler};
pub use scroll::ScrollAnimations;
pub use selector::Selector;
pub use transitions::{Easing, TransitionConfig, Tween};
pub use types::*;
