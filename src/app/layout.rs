//! Estimated vertical layout of a rendered lesson.
//!
//! The lesson scrollable only reports its own offset and size, so section
//! positions are estimated from the same sizing constants the view uses and
//! stored as fractions of the total content height. Callers scale them by
//! the real content height reported by the scrollable. Sections the
//! renderer has measured override their estimate.

use super::state::{
    BLOCK_SPACING_PX, BULLET_INDENT_PX, BULLET_SPACING_PX, CALLOUT_PADDING_PX, CODE_FONT_SCALE,
    CODE_HEADER_PX, CODE_LINE_HEIGHT, CODE_PADDING_PX, CONTROL_ROW_PX, GLYPH_WIDTH_SCALE,
    HEADING_SCALE, LINE_HEIGHT, NESTED_INDENT_PX, PAGE_PADDING_PX, SECTION_SPACING_PX,
    SELECTOR_FULL_PX, TITLE_SCALE,
};
use std::collections::{HashMap, HashSet};
use tutorial_core::{AnchorLookup, Block, CodeSample, Lesson, Track, resolve};

/// Rendered span of one section, as fractions of the content height.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SectionAnchor {
    pub id: String,
    pub top: f32,
    pub bottom: f32,
}

/// Everything the rendered height depends on besides the lesson itself.
pub(super) struct LayoutInputs<'a> {
    pub track: Track,
    pub font_size: f32,
    pub text_width: f32,
    pub open_accordions: &'a HashSet<usize>,
    pub selected_tabs: &'a HashMap<usize, usize>,
}

/// Rendered span of one section in content pixels, as measured on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct MeasuredSpan {
    pub top_px: f32,
    pub bottom_px: f32,
}

/// Control row above a track-aware code sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TrackCodeHeader {
    Switcher,
    Indicator,
}

/// Header shown above a track-aware code sample. Only samples authored for
/// more than one track get one, and the switcher replaces the badge.
pub(super) fn track_code_header(
    authored_tracks: usize,
    show_indicator: bool,
    show_inline_switcher: bool,
) -> Option<TrackCodeHeader> {
    if authored_tracks < 2 {
        return None;
    }
    if show_inline_switcher {
        Some(TrackCodeHeader::Switcher)
    } else if show_indicator {
        Some(TrackCodeHeader::Indicator)
    } else {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub(super) struct LessonLayout {
    anchors: Vec<SectionAnchor>,
    total_px: f32,
}

impl LessonLayout {
    pub fn estimate(lesson: &Lesson, inputs: &LayoutInputs<'_>) -> Self {
        let mut cursor = PAGE_PADDING_PX + header_height(lesson, inputs);
        let mut spans = Vec::with_capacity(lesson.sections.len());

        for section in &lesson.sections {
            cursor += SECTION_SPACING_PX;
            let top = cursor;
            cursor += text_height(&section.heading, inputs.font_size * HEADING_SCALE, inputs.text_width);
            let body = blocks_height(&section.blocks, inputs, inputs.text_width);
            if body > 0.0 {
                cursor += BLOCK_SPACING_PX + body;
            }
            spans.push((section.id.clone(), top, cursor));
        }
        // Previous/next footer.
        cursor += SECTION_SPACING_PX + CONTROL_ROW_PX + PAGE_PADDING_PX;

        let total_px = cursor.max(1.0);
        let anchors = spans
            .into_iter()
            .map(|(id, top, bottom)| SectionAnchor {
                id,
                top: (top / total_px).clamp(0.0, 1.0),
                bottom: (bottom / total_px).clamp(0.0, 1.0),
            })
            .collect();

        Self { anchors, total_px }
    }

    /// Replace estimated anchors with measured spans. `content_height` is the
    /// real content height the spans were measured against.
    pub fn with_measured(mut self, measured: &HashMap<String, MeasuredSpan>, content_height: f32) -> Self {
        if content_height <= 0.0 {
            return self;
        }
        for anchor in &mut self.anchors {
            if let Some(span) = measured.get(&anchor.id) {
                anchor.top = (span.top_px / content_height).clamp(0.0, 1.0);
                anchor.bottom = (span.bottom_px / content_height).clamp(anchor.top, 1.0);
            }
        }
        self
    }

    #[cfg(test)]
    pub fn from_anchors(anchors: Vec<SectionAnchor>, total_px: f32) -> Self {
        Self { anchors, total_px }
    }

    pub fn anchor(&self, id: &str) -> Option<&SectionAnchor> {
        self.anchors.iter().find(|anchor| anchor.id == id)
    }

    pub fn anchors(&self) -> &[SectionAnchor] {
        &self.anchors
    }

    /// Estimated content height in pixels.
    pub fn total_px(&self) -> f32 {
        self.total_px
    }
}

impl AnchorLookup for LessonLayout {
    type Anchor = SectionAnchor;

    fn anchor_by_id(&self, id: &str) -> Option<SectionAnchor> {
        self.anchor(id).cloned()
    }
}

fn header_height(lesson: &Lesson, inputs: &LayoutInputs<'_>) -> f32 {
    let mut height = text_height(&lesson.title, inputs.font_size * TITLE_SCALE, inputs.text_width);
    if !lesson.subtitle.is_empty() {
        height += BLOCK_SPACING_PX + text_height(&lesson.subtitle, inputs.font_size, inputs.text_width);
    }
    height
}

/// Height of the rendered blocks, including the spacing between them.
fn blocks_height(blocks: &[Block], inputs: &LayoutInputs<'_>, width: f32) -> f32 {
    let heights: Vec<f32> = blocks
        .iter()
        .filter_map(|block| block_height(block, inputs, width))
        .collect();
    if heights.is_empty() {
        return 0.0;
    }
    heights.iter().sum::<f32>() + BLOCK_SPACING_PX * (heights.len() - 1) as f32
}

/// `None` when the block renders nothing for the current track.
fn block_height(block: &Block, inputs: &LayoutInputs<'_>, width: f32) -> Option<f32> {
    let font = inputs.font_size;
    match block {
        Block::Paragraph(text) => Some(text_height(text, font, width)),
        Block::Bullets(items) => {
            if items.is_empty() {
                return None;
            }
            let inner = (width - BULLET_INDENT_PX).max(1.0);
            let lines: f32 = items.iter().map(|item| text_height(item, font, inner)).sum();
            Some(lines + BULLET_SPACING_PX * (items.len() - 1) as f32)
        }
        Block::Callout { title, text, .. } => {
            let inner = (width - CALLOUT_PADDING_PX * 2.0).max(1.0);
            let mut height = CALLOUT_PADDING_PX * 2.0 + text_height(text, font, inner);
            if title.is_some() {
                height += font * LINE_HEIGHT;
            }
            Some(height)
        }
        Block::Code(sample) => Some(code_height(sample, font)),
        Block::TrackCode {
            content,
            fallback,
            show_indicator,
            show_inline_switcher,
        } => {
            let sample = resolve(content, inputs.track, fallback.as_ref())?;
            let mut height = code_height(sample, font);
            if track_code_header(content.len(), *show_indicator, *show_inline_switcher).is_some() {
                height += CONTROL_ROW_PX;
            }
            Some(height)
        }
        Block::TrackOnly { gate, text } => gate
            .visible_for(inputs.track)
            .then(|| text_height(text, font, width)),
        Block::TrackSelector { compact, label } => {
            if *compact {
                Some(CONTROL_ROW_PX)
            } else {
                let label_height = label.as_ref().map_or(0.0, |_| font * LINE_HEIGHT);
                Some(label_height + SELECTOR_FULL_PX)
            }
        }
        Block::Accordion {
            widget, blocks, ..
        } => {
            let mut height = CONTROL_ROW_PX;
            if inputs.open_accordions.contains(widget) {
                let body = blocks_height(blocks, inputs, (width - NESTED_INDENT_PX).max(1.0));
                if body > 0.0 {
                    height += BLOCK_SPACING_PX + body;
                }
            }
            Some(height)
        }
        Block::Tabs { widget, tabs } => {
            if tabs.is_empty() {
                return None;
            }
            let selected = inputs
                .selected_tabs
                .get(widget)
                .copied()
                .unwrap_or(0)
                .min(tabs.len() - 1);
            let mut height = CONTROL_ROW_PX;
            let body = blocks_height(&tabs[selected].blocks, inputs, width);
            if body > 0.0 {
                height += BLOCK_SPACING_PX + body;
            }
            Some(height)
        }
    }
}

/// Every sample has a header row with its label and copy button.
fn code_height(sample: &CodeSample, font_size: f32) -> f32 {
    CODE_HEADER_PX
        + CODE_PADDING_PX * 2.0
        + sample.line_count() as f32 * font_size * CODE_FONT_SCALE * CODE_LINE_HEIGHT
}

/// Wrapped height of `text` at `size` within `width`.
fn text_height(text: &str, size: f32, width: f32) -> f32 {
    let glyph = (size * GLYPH_WIDTH_SCALE).max(1.0);
    let per_line = (width / glyph).max(8.0);
    let lines: f32 = text
        .split('\n')
        .map(|line| (line.chars().count() as f32 / per_line).ceil().max(1.0))
        .sum();
    lines * size * LINE_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutorial_core::parse_lesson;

    const LESSON: &str = r#"
tutorial = 1
title = "Getting Started"
subtitle = "First steps"

[[outline]]
id = "install"
short = "Install"

[[outline]]
id = "first-run"
short = "First run"

[[outline]]
id = "later"
short = "Later"

[[sections]]
id = "install"
heading = "Install"

[[sections.blocks]]
type = "paragraph"
text = "Install the command line tool and sign in."

[[sections.blocks]]
type = "track_code"
show_indicator = true
variants = [
  { track = "nextjs", code = "npx create-next-app\ncd app\nnpm run dev" },
  { track = "fastapi", code = "pip install fastapi" },
]

[[sections]]
id = "first-run"
heading = "First run"

[[sections.blocks]]
type = "accordion"
title = "Details"

[[sections.blocks.blocks]]
type = "paragraph"
text = "Hidden until opened."
"#;

    fn inputs<'a>(
        track: Track,
        open: &'a HashSet<usize>,
        tabs: &'a HashMap<usize, usize>,
    ) -> LayoutInputs<'a> {
        LayoutInputs {
            track,
            font_size: 16.0,
            text_width: 700.0,
            open_accordions: open,
            selected_tabs: tabs,
        }
    }

    #[test]
    fn sections_are_ordered_and_within_content() {
        let lesson = parse_lesson(LESSON).expect("lesson");
        let open = HashSet::new();
        let tabs = HashMap::new();
        let layout = LessonLayout::estimate(&lesson, &inputs(Track::NextJs, &open, &tabs));

        let install = layout.anchor("install").expect("install anchor");
        let first_run = layout.anchor("first-run").expect("first-run anchor");
        assert!(install.top > 0.0);
        assert!(install.top < install.bottom);
        assert!(install.bottom <= first_run.top);
        assert!(first_run.bottom < 1.0);
    }

    #[test]
    fn outline_entries_without_body_have_no_anchor() {
        let lesson = parse_lesson(LESSON).expect("lesson");
        let open = HashSet::new();
        let tabs = HashMap::new();
        let layout = LessonLayout::estimate(&lesson, &inputs(Track::NextJs, &open, &tabs));
        assert!(layout.anchor_by_id("later").is_none());
        assert_eq!(layout.anchors().len(), 2);
    }

    #[test]
    fn selected_track_changes_estimated_height() {
        let lesson = parse_lesson(LESSON).expect("lesson");
        let open = HashSet::new();
        let tabs = HashMap::new();
        let next = LessonLayout::estimate(&lesson, &inputs(Track::NextJs, &open, &tabs));
        let fast = LessonLayout::estimate(&lesson, &inputs(Track::FastApi, &open, &tabs));
        assert!(next.total_px() > fast.total_px());
    }

    #[test]
    fn opening_an_accordion_grows_the_page() {
        let lesson = parse_lesson(LESSON).expect("lesson");
        let closed = HashSet::new();
        let open: HashSet<usize> = [0].into_iter().collect();
        let tabs = HashMap::new();
        let before = LessonLayout::estimate(&lesson, &inputs(Track::NextJs, &closed, &tabs));
        let after = LessonLayout::estimate(&lesson, &inputs(Track::NextJs, &open, &tabs));
        assert!(after.total_px() > before.total_px());
    }

    fn single_block_lesson(block: &str) -> String {
        format!(
            r#"
tutorial = 1

[[outline]]
id = "only"
short = "Only"

[[sections]]
id = "only"
heading = "Only"

[[sections.blocks]]
{block}
"#
        )
    }

    fn estimate_total(contents: &str) -> f32 {
        let lesson = parse_lesson(contents).expect("lesson");
        let open = HashSet::new();
        let tabs = HashMap::new();
        LessonLayout::estimate(&lesson, &inputs(Track::NextJs, &open, &tabs)).total_px()
    }

    #[test]
    fn single_track_sample_has_no_header_row() {
        let flagged = single_block_lesson(
            r#"type = "track_code"
show_indicator = true
show_inline_switcher = true
variants = [{ track = "fastapi", code = "pip install fastapi" }]"#,
        );
        let plain = single_block_lesson(
            r#"type = "track_code"
variants = [{ track = "fastapi", code = "pip install fastapi" }]"#,
        );
        assert_eq!(estimate_total(&flagged), estimate_total(&plain));
    }

    #[test]
    fn switcher_and_badge_share_one_row() {
        let variants = r#"variants = [
  { track = "nextjs", code = "npm run dev" },
  { track = "fastapi", code = "uvicorn main:app" },
]"#;
        let both = single_block_lesson(&format!(
            "type = \"track_code\"\nshow_indicator = true\nshow_inline_switcher = true\n{variants}"
        ));
        let badge = single_block_lesson(&format!(
            "type = \"track_code\"\nshow_indicator = true\n{variants}"
        ));
        let none = single_block_lesson(&format!("type = \"track_code\"\n{variants}"));
        assert_eq!(estimate_total(&both), estimate_total(&badge));
        let grown = estimate_total(&badge) - estimate_total(&none);
        assert!((grown - CONTROL_ROW_PX).abs() < 1e-3);
    }

    #[test]
    fn header_kind_follows_authored_tracks_and_flags() {
        assert_eq!(track_code_header(1, true, true), None);
        assert_eq!(track_code_header(2, true, true), Some(TrackCodeHeader::Switcher));
        assert_eq!(track_code_header(2, true, false), Some(TrackCodeHeader::Indicator));
        assert_eq!(track_code_header(2, false, false), None);
    }

    #[test]
    fn code_samples_always_reserve_a_header() {
        let bare = single_block_lesson("type = \"code\"\ncode = \"ls\"");
        let named = single_block_lesson(
            "type = \"code\"\ncode = \"ls\"\nfilename = \"terminal\"",
        );
        assert_eq!(estimate_total(&bare), estimate_total(&named));
    }

    #[test]
    fn measured_spans_replace_estimates() {
        let lesson = parse_lesson(LESSON).expect("lesson");
        let open = HashSet::new();
        let tabs = HashMap::new();
        let estimated = LessonLayout::estimate(&lesson, &inputs(Track::NextJs, &open, &tabs));
        let install = estimated.anchor("install").cloned().expect("install anchor");

        let measured: HashMap<String, MeasuredSpan> = [(
            "first-run".to_string(),
            MeasuredSpan {
                top_px: 500.0,
                bottom_px: 700.0,
            },
        )]
        .into_iter()
        .collect();
        let layout = estimated.with_measured(&measured, 1000.0);

        let first_run = layout.anchor("first-run").expect("first-run anchor");
        assert_eq!((first_run.top, first_run.bottom), (0.5, 0.7));
        assert_eq!(layout.anchor("install"), Some(&install));
    }
}
