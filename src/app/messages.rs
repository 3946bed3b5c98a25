use iced::Rectangle;
use iced::keyboard::{Key, Modifiers};
use iced::widget::scrollable::RelativeOffset;
use std::time::Instant;
use tutorial_core::{Track, TutorialLevel};

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    SelectTutorial(u32),
    NextTutorial,
    PreviousTutorial,
    ToggleSidebar,
    ToggleLevel(TutorialLevel),
    SelectTrack(Track),
    CycleTrack,
    JumpToSection(String),
    NextSection,
    PreviousSection,
    ToggleAccordion(usize),
    SelectTab {
        widget: usize,
        tab: usize,
    },
    ToggleTheme,
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    Scrolled {
        offset: RelativeOffset,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
    },
    SectionMeasured(SectionMeasurement),
    CopyCode(String),
    Tick(Instant),
    Quit,
}

/// Visible bounds of one section container, in window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionMeasurement {
    pub id: String,
    /// Bounds of the lesson viewport.
    pub frame: Option<Rectangle>,
    pub bounds: Option<Rectangle>,
    /// Scroll position, in pixels, when the measurement was requested.
    pub scroll_px: f32,
}
