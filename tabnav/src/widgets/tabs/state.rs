//! Tab controller state: registries, selection and activation.

use tabdom::{Document, Frames, NodeId};

use super::item::{Depth, Depth2Group, Panel, Strip, TabItem};
use crate::context::Context;
use crate::dom;
use crate::error::TabsError;
use crate::runtime::{Notification, Task};
use crate::widgets::indicator::Indicator;
use crate::widgets::scroll_nav::ScrollNavigation;

/// Visual style of a container's strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StripVariant {
    #[default]
    Line,
    Label,
    Chip,
}

impl StripVariant {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("label") => StripVariant::Label,
            Some("chip") => StripVariant::Chip,
            _ => StripVariant::Line,
        }
    }

    /// Label and chip strips render no indicator.
    pub fn has_indicator(self) -> bool {
        self == StripVariant::Line
    }
}

/// Options read from the container element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabOptions {
    pub variant: StripVariant,
    /// Select the first depth-2 tab whenever the depth-1 selection changes.
    pub reset_depth2: bool,
}

/// Lifecycle of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Registries built, no selection applied yet.
    #[default]
    Uninitialized,
    /// Waiting for an ancestor accordion to open.
    Deferred,
    Active,
}

/// The `(depth-1, depth-2)` selection pair of a container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub depth1: Option<String>,
    pub depth2: Option<String>,
}

/// What an initialization request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Initial selection applied.
    Activated,
    /// Already initialized; nothing changed.
    Unchanged,
    /// Selection re-applied and geometry rescheduled.
    Refreshed,
    /// Gated by a closed accordion.
    Deferred,
    /// No selectable tab exists.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TabLocation {
    Depth1(usize),
    Depth2(usize, usize),
}

/// Controller for one tab container.
#[derive(Debug)]
pub struct TabController {
    pub(crate) container: NodeId,
    pub(crate) name: String,
    pub(crate) options: TabOptions,
    pub(crate) phase: Phase,
    pub(crate) initialized: bool,
    /// Depth-1 strip.
    pub(crate) strip: NodeId,
    pub(crate) tabs: Vec<TabItem>,
    pub(crate) groups: Vec<Depth2Group>,
    pub(crate) panels: Vec<Panel>,
    pub(crate) strips: Vec<Strip>,
}

impl TabController {
    /// Scan `container` and build the registries.
    ///
    /// Creates the indicator and scroll controls of every strip, reusing the
    /// ones already present in the markup.
    pub fn build(doc: &mut Document, container: NodeId) -> Result<Self, TabsError> {
        let node = doc.node(container).ok_or(TabsError::Detached(container))?;
        if !dom::is_container(node) {
            return Err(TabsError::NotAContainer(container));
        }
        let name = node.id().to_string();
        let options = TabOptions {
            variant: StripVariant::parse(node.attr(dom::VARIANT_ATTR)),
            reset_depth2: dom::flag(node, dom::RESET_DEPTH2_ATTR),
        };

        let scope = doc.descendants_until(container, &|n| {
            doc.node(n)
                .is_some_and(|n| dom::is_container(n) || dom::is_accordion(n))
        });
        let is = |n: NodeId, pred: fn(&tabdom::Node) -> bool| doc.node(n).is_some_and(pred);

        let strip = scope
            .iter()
            .copied()
            .find(|&n| is(n, dom::is_tablist) && !is(n, dom::is_depth2_list))
            .ok_or_else(|| TabsError::MissingTabList(name.clone()))?;

        let mut tabs = read_tabs(doc, strip, Depth::One);
        if tabs.is_empty() {
            return Err(TabsError::NoTabs(name));
        }

        let panel_nodes: Vec<NodeId> = scope.iter().copied().filter(|&n| is(n, dom::is_panel)).collect();
        let find_panel = |tab: NodeId| {
            let id = doc.attr(tab, dom::PANEL_ATTR)?;
            panel_nodes
                .iter()
                .copied()
                .find(|&p| doc.node(p).is_some_and(|n| n.id() == id))
        };

        let mut groups: Vec<Depth2Group> = Vec::new();
        for list in scope.iter().copied().filter(|&n| is(n, dom::is_depth2_list)) {
            let id = doc.node(list).map(|n| n.id().to_string()).unwrap_or_default();
            if groups.iter().any(|g| g.id == id) {
                log::debug!("[tabs] {name}: duplicate depth-2 group '{id}', keeping the first");
                continue;
            }
            let mut group_tabs = read_tabs(doc, list, Depth::Two);
            for tab in &mut group_tabs {
                tab.panel = find_panel(tab.node);
            }
            groups.push(Depth2Group {
                parent: tabs
                    .iter()
                    .find(|t| t.group.as_deref() == Some(id.as_str()))
                    .map(|t| t.id.clone()),
                frame: wrap_of(doc, container, list, strip).unwrap_or(list),
                strip: list,
                tabs: group_tabs,
                id,
            });
        }

        let depth2_panels: Vec<NodeId> = groups
            .iter()
            .flat_map(|g| g.tabs.iter().filter_map(|t| t.panel))
            .collect();

        for tab in &mut tabs {
            tab.panel = find_panel(tab.node).or_else(|| {
                // A tab that only names a group shows the depth-1 panel
                // holding that group's first depth-2 panel.
                let group = groups.iter().find(|g| Some(&g.id) == tab.group.as_ref())?;
                let inner = group.tabs.iter().find_map(|t| t.panel)?;
                panel_nodes
                    .iter()
                    .copied()
                    .find(|&p| p != inner && !depth2_panels.contains(&p) && doc.contains(p, inner))
            });
        }

        let panels: Vec<Panel> = panel_nodes
            .iter()
            .filter_map(|&p| {
                let n = doc.node(p)?;
                Some(Panel {
                    node: p,
                    id: n.id().to_string(),
                    depth: if depth2_panels.contains(&p) {
                        Depth::Two
                    } else {
                        Depth::One
                    },
                    visible: !n.is_hidden(),
                })
            })
            .collect();

        let strip_nodes: Vec<(NodeId, Depth)> = std::iter::once((strip, Depth::One))
            .chain(groups.iter().map(|g| (g.strip, Depth::Two)))
            .collect();
        let strips = strip_nodes
            .into_iter()
            .map(|(node, depth)| Strip {
                node,
                depth,
                nav: ScrollNavigation::init(doc, container, node),
                indicator: if options.variant.has_indicator() {
                    Indicator::init(doc, node)
                } else {
                    None
                },
            })
            .collect();

        log::debug!(
            "[tabs] {name}: {} tabs, {} groups, {} panels",
            tabs.len(),
            groups.len(),
            panels.len()
        );

        Ok(Self {
            container,
            name,
            options,
            phase: Phase::Uninitialized,
            initialized: false,
            strip,
            tabs,
            groups,
            panels,
            strips,
        })
    }

    /// Re-read the registries from the document, keeping the lifecycle state.
    pub(crate) fn rebuild(&mut self, doc: &mut Document) -> Result<(), TabsError> {
        let fresh = Self::build(doc, self.container)?;
        *self = Self {
            phase: self.phase,
            initialized: self.initialized,
            ..fresh
        };
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Apply the initial selection once. Later calls are no-ops.
    pub fn initialize(&mut self, cx: &mut Context<'_>, gated: bool) -> InitOutcome {
        if self.initialized {
            return InitOutcome::Unchanged;
        }
        if gated {
            self.phase = Phase::Deferred;
            log::debug!("[tabs] {}: inside a closed accordion, deferring", self.name);
            return InitOutcome::Deferred;
        }
        if !self.init_depth1(cx, false) {
            log::debug!("[tabs] {}: no selectable tab", self.name);
            return InitOutcome::Empty;
        }
        self.phase = Phase::Active;
        self.initialized = true;
        InitOutcome::Activated
    }

    /// Rebuild from the document and re-run depth-1 initialization,
    /// preserving the current selection.
    pub fn refresh(&mut self, cx: &mut Context<'_>, gated: bool) -> Result<InitOutcome, TabsError> {
        self.rebuild(cx.doc)?;
        if !self.initialized {
            return Ok(self.initialize(cx, gated));
        }
        if gated {
            return Ok(InitOutcome::Deferred);
        }
        if self.init_depth1(cx, true) {
            Ok(InitOutcome::Refreshed)
        } else {
            Ok(InitOutcome::Empty)
        }
    }

    /// Select the marked tab, or the first selectable one.
    ///
    /// With `keep_current`, a selected tab stays selected even if it was
    /// disabled after selection.
    fn init_depth1(&mut self, cx: &mut Context<'_>, keep_current: bool) -> bool {
        let marked = self
            .tabs
            .iter()
            .position(|t| t.selected && (keep_current || t.is_selectable()));
        let Some(index) = marked.or_else(|| self.tabs.iter().position(TabItem::is_selectable)) else {
            return false;
        };
        self.activate_depth1(cx, index, false, true);
        true
    }

    fn init_depth2(&mut self, cx: &mut Context<'_>, group: usize, reset: bool) -> bool {
        let Some(g) = self.groups.get(group) else {
            return false;
        };
        let marked = if reset {
            None
        } else {
            g.tabs.iter().position(|t| t.selected)
        };
        let Some(index) = marked.or_else(|| g.first_selectable()) else {
            log::debug!("[tabs] {}: group '{}' has no selectable tab", self.name, g.id);
            return false;
        };
        self.activate_depth2(cx, group, index, false);
        true
    }

    // -------------------------------------------------------------------------
    // Activation
    // -------------------------------------------------------------------------

    /// Activate the tab with element id `id`.
    ///
    /// Unknown and disabled tabs are ignored. Before the controller is
    /// active the request only moves the selection markers, which the
    /// deferred initial activation then honours.
    pub fn activate_tab(&mut self, cx: &mut Context<'_>, id: &str, focus: bool) -> bool {
        match self.locate(id) {
            Some(location) => self.activate_location(cx, location, focus),
            None => {
                log::debug!("[tabs] {}: unknown tab '{id}'", self.name);
                false
            }
        }
    }

    pub(crate) fn activate_location(&mut self, cx: &mut Context<'_>, location: TabLocation, focus: bool) -> bool {
        if !self.is_selectable(location) {
            return false;
        }
        if !self.item(location).is_some_and(|t| cx.doc.is_attached(t.node)) {
            log::debug!("[tabs] {}: tab no longer in the document", self.name);
            return false;
        }
        if self.phase != Phase::Active {
            return self.mark_selected(cx.doc, location);
        }
        match location {
            TabLocation::Depth1(index) => self.activate_depth1(cx, index, focus, false),
            TabLocation::Depth2(group, index) => {
                let parent = self.groups[group]
                    .parent
                    .as_deref()
                    .and_then(|p| self.tabs.iter().position(|t| t.id == p));
                if let Some(parent) = parent.filter(|&p| !self.tabs[p].selected) {
                    self.activate_depth1(cx, parent, false, false);
                }
                self.activate_depth2(cx, group, index, focus);
            }
        }
        true
    }

    fn activate_depth1(&mut self, cx: &mut Context<'_>, index: usize, focus: bool, initial: bool) {
        let changed = !self.tabs[index].selected;
        for (i, tab) in self.tabs.iter_mut().enumerate() {
            tab.set_selected(cx.doc, i == index);
        }

        let shown = self.tabs[index].panel;
        let owned: Vec<NodeId> = self.tabs.iter().filter_map(|t| t.panel).collect();
        for panel in owned {
            self.set_panel_visible(cx.doc, panel, Some(panel) == shown);
        }

        let group = self.tabs[index].group.clone();
        let group_index = group
            .as_deref()
            .and_then(|g| self.groups.iter().position(|grp| grp.id == g));
        self.show_group(cx.doc, group_index);

        if let Some(panel) = shown {
            cx.notify(Notification::PanelShown {
                container: self.container,
                panel,
            });
        }
        if let Some(group_index) = group_index {
            let reset = self.options.reset_depth2 && changed && !initial;
            self.init_depth2(cx, group_index, reset);
        }

        let node = self.tabs[index].node;
        self.schedule_strip(cx, self.strip, node);
        if focus {
            cx.focus.focus(node);
        }
        log::debug!("[tabs] {}: depth-1 '{}' active", self.name, self.tabs[index].id);
    }

    fn activate_depth2(&mut self, cx: &mut Context<'_>, group: usize, index: usize, focus: bool) {
        let g = &mut self.groups[group];
        for (i, tab) in g.tabs.iter_mut().enumerate() {
            tab.set_selected(cx.doc, i == index);
        }
        let shown = g.tabs[index].panel;
        let node = g.tabs[index].node;
        let strip = g.strip;
        let owned: Vec<NodeId> = g.tabs.iter().filter_map(|t| t.panel).collect();

        for panel in owned {
            self.set_panel_visible(cx.doc, panel, Some(panel) == shown);
        }
        if let Some(panel) = shown {
            cx.notify(Notification::PanelShown {
                container: self.container,
                panel,
            });
        }

        self.schedule_strip(cx, strip, node);
        if focus {
            cx.focus.focus(node);
        }
        log::debug!("[tabs] {}: depth-2 '{}' active", self.name, self.groups[group].tabs[index].id);
    }

    /// Show the frame of the active group, hide every other group and its panels.
    fn show_group(&mut self, doc: &mut Document, active: Option<usize>) {
        let mut hidden_panels = Vec::new();
        for (i, group) in self.groups.iter().enumerate() {
            let is_active = Some(i) == active;
            doc.set_hidden(group.frame, !is_active);
            if !is_active {
                hidden_panels.extend(group.tabs.iter().filter_map(|t| t.panel));
            }
        }
        for panel in hidden_panels {
            self.set_panel_visible(doc, panel, false);
        }
    }

    fn set_panel_visible(&mut self, doc: &mut Document, node: NodeId, visible: bool) {
        match self.panels.iter_mut().find(|p| p.node == node) {
            Some(panel) => panel.set_visible(doc, visible),
            None => {
                doc.set_hidden(node, !visible);
            }
        }
    }

    /// Queue indicator and scroll-nav sync for the next frame, then center
    /// `tab` once that sync has been laid out.
    pub(crate) fn schedule_strip(&self, cx: &mut Context<'_>, strip: NodeId, tab: NodeId) {
        let container = self.container;
        cx.after_layout(Frames::Single, Task::SyncStrip { container, strip });
        cx.after_layout(
            Frames::Double,
            Task::CenterTab {
                container,
                strip,
                tab,
            },
        );
    }

    /// Move selection markers without touching panels.
    fn mark_selected(&mut self, doc: &mut Document, location: TabLocation) -> bool {
        let tabs = match location {
            TabLocation::Depth1(_) => &mut self.tabs,
            TabLocation::Depth2(group, _) => &mut self.groups[group].tabs,
        };
        let index = match location {
            TabLocation::Depth1(i) | TabLocation::Depth2(_, i) => i,
        };
        for (i, tab) in tabs.iter_mut().enumerate() {
            tab.set_selected(doc, i == index);
        }
        log::debug!("[tabs] {}: selection recorded for later activation", self.name);
        true
    }

    // -------------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------------

    /// Make `id` the selected tab. Activates it when the controller is
    /// active, otherwise only moves the markers.
    pub fn set_default_tab(&mut self, cx: &mut Context<'_>, id: &str) -> bool {
        let Some(location) = self.locate(id) else {
            return false;
        };
        if !self.is_selectable(location) {
            return false;
        }
        if self.phase == Phase::Active {
            self.activate_location(cx, location, false)
        } else {
            self.mark_selected(cx.doc, location)
        }
    }

    /// Replace a tab's label.
    pub fn set_tabs_title(&mut self, cx: &mut Context<'_>, id: &str, value: &str) -> bool {
        let Some(location) = self.locate(id) else {
            return false;
        };
        let Some(tab) = self.item_mut(location) else {
            return false;
        };
        tab.label = value.to_string();
        let node = tab.node;
        cx.doc.set_text(node, value);

        if self.phase == Phase::Active {
            let strip = self.strip_of(location);
            if let Some(selected) = self.selected_in_strip(strip) {
                self.schedule_strip(cx, strip, selected);
            }
        }
        true
    }

    /// Enable or disable a tab. A selected tab stays selected.
    pub fn set_tab_disabled(&mut self, doc: &mut Document, id: &str, disabled: bool) -> bool {
        let Some(tab) = self.locate(id).and_then(|l| self.item_mut(l)) else {
            return false;
        };
        tab.disabled = disabled;
        if disabled {
            doc.set_attr(tab.node, dom::DISABLED_ATTR, "true");
        } else {
            doc.remove_attr(tab.node, dom::DISABLED_ATTR);
        }
        true
    }

    /// Move the selection of a depth-2 group back to its first selectable
    /// tab. `None` targets the active depth-1 tab's group. A group with no
    /// selectable tab is left as it is.
    pub fn reset_depth2(&mut self, cx: &mut Context<'_>, group: Option<&str>) -> bool {
        let index = match group {
            Some(id) => self.groups.iter().position(|g| g.id == id),
            None => self.active_group_index(),
        };
        let Some(index) = index else {
            return false;
        };
        let Some(first) = self.groups[index].first_selectable() else {
            log::debug!(
                "[tabs] {}: group '{}' has no selectable tab, keeping selection",
                self.name,
                self.groups[index].id
            );
            return false;
        };

        if self.phase == Phase::Active && self.active_group_index() == Some(index) {
            self.activate_depth2(cx, index, first, false);
            return true;
        }
        self.mark_selected(cx.doc, TabLocation::Depth2(index, first))
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    pub(crate) fn locate(&self, id: &str) -> Option<TabLocation> {
        if let Some(i) = self.tabs.iter().position(|t| t.id == id) {
            return Some(TabLocation::Depth1(i));
        }
        self.groups.iter().enumerate().find_map(|(g, group)| {
            group
                .tabs
                .iter()
                .position(|t| t.id == id)
                .map(|i| TabLocation::Depth2(g, i))
        })
    }

    pub(crate) fn locate_node(&self, node: NodeId) -> Option<TabLocation> {
        if let Some(i) = self.tabs.iter().position(|t| t.node == node) {
            return Some(TabLocation::Depth1(i));
        }
        self.groups.iter().enumerate().find_map(|(g, group)| {
            group
                .tabs
                .iter()
                .position(|t| t.node == node)
                .map(|i| TabLocation::Depth2(g, i))
        })
    }

    pub(crate) fn item(&self, location: TabLocation) -> Option<&TabItem> {
        match location {
            TabLocation::Depth1(i) => self.tabs.get(i),
            TabLocation::Depth2(g, i) => self.groups.get(g)?.tabs.get(i),
        }
    }

    fn is_selectable(&self, location: TabLocation) -> bool {
        self.item(location).is_some_and(TabItem::is_selectable)
    }

    fn item_mut(&mut self, location: TabLocation) -> Option<&mut TabItem> {
        match location {
            TabLocation::Depth1(i) => self.tabs.get_mut(i),
            TabLocation::Depth2(g, i) => self.groups.get_mut(g)?.tabs.get_mut(i),
        }
    }

    pub(crate) fn siblings(&self, location: TabLocation) -> &[TabItem] {
        match location {
            TabLocation::Depth1(_) => &self.tabs,
            TabLocation::Depth2(g, _) => &self.groups[g].tabs,
        }
    }

    fn strip_of(&self, location: TabLocation) -> NodeId {
        match location {
            TabLocation::Depth1(_) => self.strip,
            TabLocation::Depth2(g, _) => self.groups[g].strip,
        }
    }

    pub(crate) fn selected_in_strip(&self, strip: NodeId) -> Option<NodeId> {
        if strip == self.strip {
            return self.tabs.iter().find(|t| t.selected).map(|t| t.node);
        }
        self.groups
            .iter()
            .find(|g| g.strip == strip)?
            .selected()
            .map(|t| t.node)
    }

    fn active_group_index(&self) -> Option<usize> {
        let group = self.tabs.iter().find(|t| t.selected)?.group.as_deref()?;
        self.groups.iter().position(|g| g.id == group)
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> TabOptions {
        self.options
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn tabs(&self) -> &[TabItem] {
        &self.tabs
    }

    pub fn groups(&self) -> &[Depth2Group] {
        &self.groups
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    pub fn tab(&self, id: &str) -> Option<&TabItem> {
        self.locate(id).and_then(|l| self.item(l))
    }

    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&Depth2Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn active_group(&self) -> Option<&Depth2Group> {
        self.active_group_index().map(|i| &self.groups[i])
    }

    pub fn strip(&self, node: NodeId) -> Option<&Strip> {
        self.strips.iter().find(|s| s.node == node)
    }

    pub fn depth1_strip(&self) -> &Strip {
        &self.strips[0]
    }

    pub fn selection(&self) -> Selection {
        Selection {
            depth1: self.tabs.iter().find(|t| t.selected).map(|t| t.id.clone()),
            depth2: self
                .active_group()
                .and_then(Depth2Group::selected)
                .map(|t| t.id.clone()),
        }
    }
}

fn read_tabs(doc: &Document, strip: NodeId, depth: Depth) -> Vec<TabItem> {
    doc.children(strip)
        .iter()
        .filter(|&&c| doc.node(c).is_some_and(dom::is_tab))
        .filter_map(|&c| TabItem::read(doc, c, depth))
        .collect()
}

/// Nearest wrap around `list` inside `container` that does not also hold
/// the depth-1 strip.
fn wrap_of(doc: &Document, container: NodeId, list: NodeId, depth1: NodeId) -> Option<NodeId> {
    doc.ancestors(list)
        .take_while(|&a| a != container)
        .find(|&a| doc.has_class(a, dom::WRAP))
        .filter(|&w| !doc.contains(w, depth1))
}
