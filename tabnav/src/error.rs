//! Error types for the tab engine.
//!
//! Initialization and cascade failures are logged where they are contained
//! and never escape the operations that abort silently. Only the explicitly
//! fallible entry points return them.

use tabdom::NodeId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TabsError {
    /// The node was removed from the document.
    #[error("{0} is not attached to the document")]
    Detached(NodeId),

    /// The node is not a tab container.
    #[error("{0} is not a tab container")]
    NotAContainer(NodeId),

    /// The container has no depth-1 tab list.
    #[error("tab container '{0}' has no tab list")]
    MissingTabList(String),

    /// The depth-1 tab list has no tabs.
    #[error("tab list in '{0}' has no tabs")]
    NoTabs(String),

    /// The accordion has no content element.
    #[error("accordion '{0}' has no content element")]
    MissingAccordionContent(String),

    /// A selector string could not be parsed.
    #[error("invalid selector '{0}'")]
    InvalidSelector(String),
}
