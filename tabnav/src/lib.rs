pub mod config;
pub mod context;
pub mod coordinator;
pub mod dom;
pub mod error;
pub mod registry;
pub mod runtime;
pub mod widgets;

pub use config::TabsConfig;
pub use coordinator::ResyncTarget;
pub use error::TabsError;
pub use registry::{Instance, ResizeRegistry};
pub use runtime::{Notification, Runtime};

pub mod prelude {
    pub use crate::config::TabsConfig;
    pub use crate::coordinator::ResyncTarget;
    pub use crate::error::TabsError;
    pub use crate::registry::Instance;
    pub use crate::runtime::{Notification, Runtime};
    pub use crate::widgets::{
        AccordionState, Depth, EventResult, InitOutcome, Phase, ScrollDirection, ScrollNavState, Selection,
        StripVariant,
    };

    pub use tabdom::{Element, Event, Key, NodeId, Overflow, Position, Size};
}
