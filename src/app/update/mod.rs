use iced::widget::scrollable::RelativeOffset;

mod core;
mod navigation;
mod scroll;
mod track;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    SaveConfig,
    ScrollTo(RelativeOffset),
    CopyToClipboard(String),
    /// Ask the renderer for the visible bounds of these sections.
    MeasureSections {
        ids: Vec<String>,
        scroll_px: f32,
    },
    Quit,
}
