//! Widgets driven by the runtime.

pub mod accordion;
pub mod events;
pub mod indicator;
pub mod scroll_nav;
pub mod tabs;

pub use accordion::{AccordionController, AccordionState, OnSettled};
pub use events::EventResult;
pub use indicator::Indicator;
pub use scroll_nav::{ScrollDirection, ScrollNavState, ScrollNavigation};
pub use tabs::{
    Depth, Depth2Group, InitOutcome, Panel, Phase, Selection, Strip, StripVariant, TabController, TabItem,
    TabOptions,
};
