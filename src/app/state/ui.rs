use super::constants::COPY_NOTICE_DURATION;
use iced::widget::scrollable::RelativeOffset;
use std::collections::BTreeSet;
use std::time::Instant;
use tutorial_core::TutorialLevel;

/// Which level groups of the sidebar are expanded. All start open.
pub struct SidebarState {
    pub(in crate::app) expanded: BTreeSet<TutorialLevel>,
}

impl SidebarState {
    pub(in crate::app) fn all_expanded() -> Self {
        Self {
            expanded: TutorialLevel::ALL.into_iter().collect(),
        }
    }

    pub(in crate::app) fn is_expanded(&self, level: TutorialLevel) -> bool {
        self.expanded.contains(&level)
    }

    pub(in crate::app) fn toggle(&mut self, level: TutorialLevel) {
        if !self.expanded.remove(&level) {
            self.expanded.insert(level);
        }
    }
}

/// Last geometry reported by the lesson scrollable.
pub struct ViewportState {
    pub(in crate::app) last_offset: RelativeOffset,
    pub(in crate::app) viewport_width: f32,
    pub(in crate::app) viewport_height: f32,
    pub(in crate::app) content_height: f32,
}

impl ViewportState {
    pub(in crate::app) fn unknown() -> Self {
        Self {
            last_offset: RelativeOffset::START,
            viewport_width: 0.0,
            viewport_height: 0.0,
            content_height: 0.0,
        }
    }

    pub(in crate::app) fn is_known(&self) -> bool {
        self.viewport_height > 0.0 && self.content_height > 0.0
    }
}

/// "Copied" feedback for the code sample most recently copied.
pub struct CopyNotice {
    pub(in crate::app) code: String,
    pub(in crate::app) copied_at: Instant,
}

impl CopyNotice {
    pub(in crate::app) fn new(code: String, copied_at: Instant) -> Self {
        Self { code, copied_at }
    }

    pub(in crate::app) fn expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.copied_at) >= COPY_NOTICE_DURATION
    }
}
