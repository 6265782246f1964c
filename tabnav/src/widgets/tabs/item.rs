//! Registry entries built from a container's markup.

use tabdom::{Document, NodeId};

use crate::dom;
use crate::widgets::indicator::Indicator;
use crate::widgets::scroll_nav::ScrollNavigation;

/// Tab level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    One,
    Two,
}

/// A single tab element.
#[derive(Debug, Clone)]
pub struct TabItem {
    pub node: NodeId,
    pub id: String,
    pub label: String,
    pub depth: Depth,
    /// Panel shown while this tab is selected.
    pub panel: Option<NodeId>,
    /// Depth-2 group owned by a depth-1 tab.
    pub group: Option<String>,
    pub selected: bool,
    pub disabled: bool,
    /// Mirrors `!selected`; unselected tabs leave the tab order.
    pub hidden: bool,
}

impl TabItem {
    pub(crate) fn read(doc: &Document, node: NodeId, depth: Depth) -> Option<Self> {
        let n = doc.node(node)?;
        let selected = dom::flag(n, dom::SELECTED_ATTR);
        Some(Self {
            node,
            id: n.id().to_string(),
            label: n.text().unwrap_or_default().to_string(),
            depth,
            panel: None,
            group: n.attr(dom::GROUP_ATTR).map(str::to_string),
            selected,
            disabled: dom::flag(n, dom::DISABLED_ATTR),
            hidden: !selected,
        })
    }

    /// Write the selection state back to the element.
    pub(crate) fn set_selected(&mut self, doc: &mut Document, selected: bool) {
        self.selected = selected;
        self.hidden = !selected;
        doc.set_attr(self.node, dom::SELECTED_ATTR, if selected { "true" } else { "false" });
        doc.set_attr(self.node, dom::TABINDEX_ATTR, if selected { "0" } else { "-1" });
    }

    pub fn is_selectable(&self) -> bool {
        !self.disabled
    }
}

/// A panel shown by exactly one tab.
#[derive(Debug, Clone)]
pub struct Panel {
    pub node: NodeId,
    pub id: String,
    pub depth: Depth,
    pub visible: bool,
}

impl Panel {
    pub(crate) fn set_visible(&mut self, doc: &mut Document, visible: bool) {
        self.visible = visible;
        doc.set_hidden(self.node, !visible);
    }
}

/// Depth-2 tabs scoped to one depth-1 tab.
#[derive(Debug, Clone)]
pub struct Depth2Group {
    pub id: String,
    /// Id of the depth-1 tab that owns the group.
    pub parent: Option<String>,
    pub strip: NodeId,
    /// Element hidden while the group is inactive: the wrap, or the strip itself.
    pub frame: NodeId,
    pub tabs: Vec<TabItem>,
}

impl Depth2Group {
    pub fn selected(&self) -> Option<&TabItem> {
        self.tabs.iter().find(|t| t.selected)
    }

    pub fn first_selectable(&self) -> Option<usize> {
        self.tabs.iter().position(TabItem::is_selectable)
    }

    pub fn is_visible(&self, doc: &Document) -> bool {
        !doc.is_hidden(self.frame)
    }
}

/// A tab strip with its scroll controls and indicator.
#[derive(Debug, Clone)]
pub struct Strip {
    pub node: NodeId,
    pub depth: Depth,
    pub nav: ScrollNavigation,
    /// Absent for label and chip variants.
    pub indicator: Option<Indicator>,
}
