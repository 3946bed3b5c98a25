use iced::widget::container::Id as ContainerId;
use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Limits for reader controls.
pub(crate) const MIN_FONT_SIZE: u32 = 12;
pub(crate) const MAX_FONT_SIZE: u32 = 28;

/// Lesson layout. The scroll-spy estimates section positions from these,
/// so keep them in sync with `view.rs`.
pub(crate) const LINE_HEIGHT: f32 = 1.45;
pub(crate) const GLYPH_WIDTH_SCALE: f32 = 0.55;
pub(crate) const TITLE_SCALE: f32 = 2.0;
pub(crate) const HEADING_SCALE: f32 = 1.5;
pub(crate) const CODE_FONT_SCALE: f32 = 0.9;
pub(crate) const CODE_LINE_HEIGHT: f32 = 1.35;
pub(crate) const CODE_PADDING_PX: f32 = 12.0;
pub(crate) const CODE_HEADER_PX: f32 = 28.0;
pub(crate) const CALLOUT_PADDING_PX: f32 = 12.0;
pub(crate) const CONTROL_ROW_PX: f32 = 36.0;
pub(crate) const SELECTOR_FULL_PX: f32 = 64.0;
pub(crate) const NESTED_INDENT_PX: f32 = 16.0;
pub(crate) const BULLET_INDENT_PX: f32 = 20.0;
pub(crate) const BULLET_SPACING_PX: f32 = 4.0;
pub(crate) const BLOCK_SPACING_PX: f32 = 14.0;
pub(crate) const SECTION_SPACING_PX: f32 = 36.0;
pub(crate) const PAGE_PADDING_PX: f32 = 24.0;
pub(crate) const SIDEBAR_WIDTH_PX: f32 = 280.0;

/// Measured section edges closer than this to the estimate are ignored.
pub(crate) const MEASURE_TOLERANCE_PX: f32 = 2.0;

pub(crate) const COPY_NOTICE_DURATION: Duration = Duration::from_secs(2);

pub(crate) static LESSON_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("lesson-scroll"));

/// Container wrapping the lesson scrollable; its bounds are the viewport.
pub(crate) static LESSON_FRAME_ID: Lazy<ContainerId> =
    Lazy::new(|| ContainerId::new("lesson-frame"));

pub(crate) fn section_container_id(section_id: &str) -> ContainerId {
    ContainerId::new(format!("section-{section_id}"))
}
