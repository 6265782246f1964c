//! Collapsible panel that gates the initialization of nested tab containers.
//!
//! Opening measures the content's natural height after forcing a layout,
//! animates the height from zero, then pins it and starts observing the
//! content so later changes can be re-measured. Closing animates back to
//! zero and hides the content.

mod events;
mod state;

pub use state::{AccordionController, AccordionState, OnSettled};
