use super::super::state::App;
use super::Effect;
use iced::widget::scrollable::RelativeOffset;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_select_tutorial(&mut self, tutorial_id: u32, effects: &mut Vec<Effect>) {
        if self.current_tutorial_id() == Some(tutorial_id) {
            effects.push(Effect::ScrollTo(RelativeOffset::START));
            return;
        }
        if !self.mount_tutorial(tutorial_id) {
            warn!(tutorial = tutorial_id, "Tutorial is not available yet");
            return;
        }
        effects.push(Effect::ScrollTo(RelativeOffset::START));
    }

    pub(super) fn handle_next_tutorial(&mut self, effects: &mut Vec<Effect>) {
        if let Some(id) = self.neighbor_tutorial(1) {
            self.handle_select_tutorial(id, effects);
        }
    }

    pub(super) fn handle_previous_tutorial(&mut self, effects: &mut Vec<Effect>) {
        if let Some(id) = self.neighbor_tutorial(-1) {
            self.handle_select_tutorial(id, effects);
        }
    }

    /// Available tutorial `step` places away from the current one.
    pub(in crate::app) fn neighbor_tutorial(&self, step: isize) -> Option<u32> {
        let current = self.current_tutorial_id()?;
        let idx = self.lesson_index(current)?;
        let target = idx.checked_add_signed(step)?;
        self.lessons.get(target).map(|lesson| lesson.tutorial_id)
    }

    pub(super) fn handle_jump_to_section(&mut self, id: &str, effects: &mut Vec<Effect>) {
        self.refresh_stale_layout();
        match self.scroll_offset_for_section(id) {
            Some(offset) => {
                info!(section = %id, fraction = offset.y, "Jumping to section");
                effects.push(Effect::ScrollTo(offset));
            }
            None => debug!(section = %id, "Section has no rendered anchor; not jumping"),
        }
    }

    pub(super) fn handle_next_section(&mut self, effects: &mut Vec<Effect>) {
        let Some(target) = self.neighbor_section(true) else {
            return;
        };
        self.handle_jump_to_section(&target, effects);
    }

    pub(super) fn handle_previous_section(&mut self, effects: &mut Vec<Effect>) {
        let Some(target) = self.neighbor_section(false) else {
            return;
        };
        self.handle_jump_to_section(&target, effects);
    }

    /// Nearest section after (or before) the active one that has an anchor.
    fn neighbor_section(&self, forward: bool) -> Option<String> {
        let page = self.page.as_ref()?;
        let outline = page.tracker.outline();
        let active = page.active_id();
        let idx = outline.position(&active)?;
        let has_anchor = |i: &usize| {
            outline
                .get(*i)
                .is_some_and(|section| page.layout.anchor(&section.id).is_some())
        };
        let found = if forward {
            (idx + 1..outline.len()).find(has_anchor)
        } else {
            (0..idx).rev().find(has_anchor)
        };
        found.and_then(|i| outline.get(i)).map(|section| section.id.clone())
    }
}
