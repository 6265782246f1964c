//! Markup contract shared by the controllers.

use tabdom::Node;

pub const CONTAINER: &str = "tabs";
pub const VARIANT_ATTR: &str = "data-variant";
pub const RESET_DEPTH2_ATTR: &str = "data-reset-depth2";

pub const WRAP: &str = "tabs-wrap";
pub const HAS_ARROWS: &str = "has-arrows";
pub const SCROLLABLE: &str = "is-scrollable";

pub const ROLE_ATTR: &str = "role";
pub const ROLE_TABLIST: &str = "tablist";
pub const ROLE_TAB: &str = "tab";
pub const DEPTH_ATTR: &str = "data-depth";
pub const PANEL_ATTR: &str = "data-panel";
pub const GROUP_ATTR: &str = "data-group";
pub const SELECTED_ATTR: &str = "aria-selected";
pub const DISABLED_ATTR: &str = "aria-disabled";
pub const TABINDEX_ATTR: &str = "tabindex";

pub const PANEL: &str = "tab-panel";
pub const INDICATOR: &str = "tab-indicator";
pub const ANIMATED: &str = "is-animated";

pub const PREV: &str = "scroll-prev";
pub const NEXT: &str = "scroll-next";
pub const ACTIVE: &str = "is-active";

pub const ACCORDION: &str = "accordion";
pub const ACCORDION_HEADER: &str = "accordion-header";
pub const ACCORDION_CONTENT: &str = "accordion-content";
pub const OPEN: &str = "is-open";
pub const ANIMATING: &str = "is-animating";

/// Boolean attribute semantics: present and not `"false"`.
pub fn flag(node: &Node, attr: &str) -> bool {
    node.attr(attr).is_some_and(|v| v != "false")
}

pub fn is_container(node: &Node) -> bool {
    node.has_class(CONTAINER)
}

pub fn is_accordion(node: &Node) -> bool {
    node.has_class(ACCORDION)
}

pub fn is_tab(node: &Node) -> bool {
    node.attr(ROLE_ATTR) == Some(ROLE_TAB)
}

pub fn is_tablist(node: &Node) -> bool {
    node.attr(ROLE_ATTR) == Some(ROLE_TABLIST)
}

pub fn is_depth2_list(node: &Node) -> bool {
    is_tablist(node) && node.attr(DEPTH_ATTR) == Some("2")
}

pub fn is_panel(node: &Node) -> bool {
    node.has_class(PANEL)
}
