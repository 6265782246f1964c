use tabdom::NodeId;

use super::state::AccordionController;
use crate::context::Context;
use crate::dom;
use crate::widgets::events::EventResult;

impl AccordionController {
    /// Toggle when the click lands inside this accordion's header.
    pub fn on_click(&mut self, cx: &mut Context<'_>, target: NodeId) -> EventResult {
        let Some(header) = self.header() else {
            return EventResult::Ignored;
        };
        if !cx.doc.contains(header, target) {
            return EventResult::Ignored;
        }
        // A header belonging to a nested accordion is not ours.
        let owner = cx.doc.closest_where(target, dom::is_accordion);
        if owner != Some(self.root()) {
            return EventResult::Ignored;
        }
        self.open_content(cx);
        EventResult::Consumed
    }
}
