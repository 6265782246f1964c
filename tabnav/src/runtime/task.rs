//! Deferred work and cross-component notifications.

use tabdom::NodeId;

/// Work queued on the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Reposition the strip's indicator and re-derive its scroll-nav state.
    SyncStrip { container: NodeId, strip: NodeId },
    /// Turn on indicator transitions after its first positioning.
    EnableIndicator { container: NodeId, strip: NodeId },
    /// Scroll the activated tab toward the middle of its strip.
    CenterTab {
        container: NodeId,
        strip: NodeId,
        tab: NodeId,
    },
    /// Re-derive scroll-nav state once a smooth scroll has finished.
    SettleStrip { container: NodeId, strip: NodeId },
    /// Drop the transient active class from a prev/next control.
    ClearActive { container: NodeId, button: NodeId },
    /// An accordion height transition reached its end.
    AccordionTransitionEnd { accordion: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SyncStrip,
    EnableIndicator,
    CenterTab,
    SettleStrip,
    ClearActive,
    AccordionTransitionEnd,
}

/// Cancellation key: one pending task per (owner, target, kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskKey {
    /// Component root the task belongs to.
    pub owner: NodeId,
    pub target: NodeId,
    pub kind: TaskKind,
}

impl Task {
    pub fn key(&self) -> TaskKey {
        let (owner, target, kind) = match *self {
            Task::SyncStrip { container, strip } => (container, strip, TaskKind::SyncStrip),
            Task::EnableIndicator { container, strip } => {
                (container, strip, TaskKind::EnableIndicator)
            }
            Task::CenterTab {
                container, strip, ..
            } => (container, strip, TaskKind::CenterTab),
            Task::SettleStrip { container, strip } => (container, strip, TaskKind::SettleStrip),
            Task::ClearActive { container, button } => (container, button, TaskKind::ClearActive),
            Task::AccordionTransitionEnd { accordion } => {
                (accordion, accordion, TaskKind::AccordionTransitionEnd)
            }
        };
        TaskKey {
            owner,
            target,
            kind,
        }
    }
}

/// Notifications dispatched by the runtime after an operation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// A panel became visible. Components nested in the panel are
    /// resynchronized.
    PanelShown { container: NodeId, panel: NodeId },
    /// An accordion finished opening.
    AccordionOpened { accordion: NodeId },
    /// An accordion finished closing.
    AccordionClosed { accordion: NodeId },
}
