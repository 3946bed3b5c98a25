//! Lesson documents.
//!
//! Each available tutorial ships as one TOML file: a navigation outline
//! (`[[outline]]`) followed by the page body (`[[sections]]`, each a list
//! of typed blocks). Outline entries without a matching body are allowed
//! and simply never become active while scrolling.

use crate::catalog::tutorial_by_id;
use crate::content::{CodeSample, TrackContent, TrackOnly};
use crate::sections::{Section, SectionOutline};
use crate::track::Track;
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalloutKind {
    #[default]
    Info,
    Warning,
    Tip,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabPanel {
    pub label: String,
    pub blocks: Vec<Block>,
}

/// Renderable unit of a lesson section.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(String),
    Bullets(Vec<String>),
    Callout {
        kind: CalloutKind,
        title: Option<String>,
        text: String,
    },
    Code(CodeSample),
    TrackCode {
        content: TrackContent<CodeSample>,
        fallback: Option<CodeSample>,
        show_indicator: bool,
        show_inline_switcher: bool,
    },
    TrackOnly {
        gate: TrackOnly,
        text: String,
    },
    TrackSelector {
        compact: bool,
        label: Option<String>,
    },
    /// `widget` is unique within the lesson and keys its open/closed state.
    Accordion {
        widget: usize,
        title: String,
        default_open: bool,
        blocks: Vec<Block>,
    },
    /// `widget` is unique within the lesson and keys the selected tab.
    Tabs {
        widget: usize,
        tabs: Vec<TabPanel>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LessonSection {
    pub id: String,
    pub heading: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    pub tutorial_id: u32,
    pub title: String,
    pub subtitle: String,
    pub outline: SectionOutline,
    pub sections: Vec<LessonSection>,
}

impl Lesson {
    pub fn section(&self, id: &str) -> Option<&LessonSection> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Number of accordion and tab widgets in the lesson.
    pub fn widget_count(&self) -> usize {
        fn count(blocks: &[Block]) -> usize {
            blocks
                .iter()
                .map(|block| match block {
                    Block::Accordion { blocks, .. } => 1 + count(blocks),
                    Block::Tabs { tabs, .. } => {
                        1 + tabs.iter().map(|tab| count(&tab.blocks)).sum::<usize>()
                    }
                    _ => 0,
                })
                .sum()
        }
        self.sections
            .iter()
            .map(|section| count(&section.blocks))
            .sum()
    }
}

#[derive(Debug, Deserialize)]
struct RawLesson {
    tutorial: u32,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    outline: Vec<Section>,
    #[serde(default)]
    sections: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    id: String,
    heading: String,
    #[serde(default)]
    blocks: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
struct RawVariant {
    track: String,
    code: String,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    lang: Option<String>,
}

impl RawVariant {
    fn sample(self) -> CodeSample {
        CodeSample {
            code: self.code,
            filename: self.filename,
            lang: self.lang,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTab {
    label: String,
    #[serde(default)]
    blocks: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawBlock {
    Paragraph {
        text: String,
    },
    Bullets {
        items: Vec<String>,
    },
    Callout {
        #[serde(default)]
        kind: CalloutKind,
        #[serde(default)]
        title: Option<String>,
        text: String,
    },
    Code {
        code: String,
        #[serde(default)]
        filename: Option<String>,
        #[serde(default)]
        lang: Option<String>,
    },
    TrackCode {
        variants: Vec<RawVariant>,
        #[serde(default)]
        fallback: Option<CodeSample>,
        #[serde(default)]
        show_indicator: bool,
        #[serde(default)]
        show_inline_switcher: bool,
    },
    TrackOnly {
        tracks: Vec<String>,
        text: String,
    },
    TrackSelector {
        #[serde(default)]
        compact: bool,
        #[serde(default)]
        label: Option<String>,
    },
    Accordion {
        title: String,
        #[serde(default)]
        default_open: bool,
        #[serde(default)]
        blocks: Vec<RawBlock>,
    },
    Tabs {
        tabs: Vec<RawTab>,
    },
}

/// Known tracks among `raw`, in order. Unknown ids are dropped with a warning.
fn known_tracks<'a>(raw: impl IntoIterator<Item = &'a String>) -> Vec<Track> {
    raw.into_iter()
        .filter_map(|id| {
            let track = Track::parse(id);
            if track.is_none() {
                warn!(track = %id, "Skipping unknown track in lesson content");
            }
            track
        })
        .collect()
}

struct BlockBuilder {
    next_widget: usize,
}

impl BlockBuilder {
    fn widget(&mut self) -> usize {
        let id = self.next_widget;
        self.next_widget += 1;
        id
    }

    fn build_all(&mut self, raw: Vec<RawBlock>) -> Vec<Block> {
        raw.into_iter().map(|block| self.build(block)).collect()
    }

    fn build(&mut self, raw: RawBlock) -> Block {
        match raw {
            RawBlock::Paragraph { text } => Block::Paragraph(text),
            RawBlock::Bullets { items } => Block::Bullets(items),
            RawBlock::Callout { kind, title, text } => Block::Callout { kind, title, text },
            RawBlock::Code {
                code,
                filename,
                lang,
            } => Block::Code(CodeSample {
                code,
                filename,
                lang,
            }),
            RawBlock::TrackCode {
                variants,
                fallback,
                show_indicator,
                show_inline_switcher,
            } => {
                let content = variants
                    .into_iter()
                    .filter_map(|variant| match Track::parse(&variant.track) {
                        Some(track) => Some((track, variant.sample())),
                        None => {
                            warn!(track = %variant.track, "Skipping unknown track in lesson content");
                            None
                        }
                    })
                    .collect();
                Block::TrackCode {
                    content,
                    fallback,
                    show_indicator,
                    show_inline_switcher,
                }
            }
            RawBlock::TrackOnly { tracks, text } => Block::TrackOnly {
                gate: TrackOnly::new(known_tracks(&tracks)),
                text,
            },
            RawBlock::TrackSelector { compact, label } => Block::TrackSelector { compact, label },
            RawBlock::Accordion {
                title,
                default_open,
                blocks,
            } => {
                let widget = self.widget();
                Block::Accordion {
                    widget,
                    title,
                    default_open,
                    blocks: self.build_all(blocks),
                }
            }
            RawBlock::Tabs { tabs } => {
                let widget = self.widget();
                let tabs = tabs
                    .into_iter()
                    .map(|tab| TabPanel {
                        label: tab.label,
                        blocks: self.build_all(tab.blocks),
                    })
                    .collect();
                Block::Tabs { widget, tabs }
            }
        }
    }
}

/// Parse one lesson document.
pub fn parse_lesson(contents: &str) -> Result<Lesson> {
    let raw: RawLesson = toml::from_str(contents).context("invalid lesson TOML")?;
    let tutorial = tutorial_by_id(raw.tutorial)
        .ok_or_else(|| anyhow!("tutorial {} is not in the catalog", raw.tutorial))?;
    let outline = SectionOutline::new(raw.outline)
        .with_context(|| format!("invalid outline for tutorial {}", raw.tutorial))?;

    let mut builder = BlockBuilder { next_widget: 0 };
    let sections = raw
        .sections
        .into_iter()
        .map(|section| LessonSection {
            id: section.id,
            heading: section.heading,
            blocks: builder.build_all(section.blocks),
        })
        .collect::<Vec<_>>();

    for entry in outline.iter() {
        if !sections.iter().any(|section| section.id == entry.id) {
            warn!(
                tutorial = raw.tutorial,
                id = %entry.id,
                "Outline entry has no section body"
            );
        }
    }

    Ok(Lesson {
        tutorial_id: tutorial.id,
        title: raw.title.unwrap_or_else(|| tutorial.title.to_string()),
        subtitle: raw
            .subtitle
            .unwrap_or_else(|| tutorial.description.to_string()),
        outline,
        sections,
    })
}

/// Load every `*.toml` lesson under `dir`, sorted by tutorial id.
///
/// Unreadable or invalid files are logged and skipped. When two files
/// describe the same tutorial the first one (by file name) wins.
pub fn load_lessons(dir: &Path) -> Result<Vec<Lesson>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading lessons from {}", dir.display()))?;
    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    let mut lessons: Vec<Lesson> = Vec::new();
    for path in paths {
        let parsed = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))
            .and_then(|contents| parse_lesson(&contents));
        match parsed {
            Ok(lesson) => {
                if lessons.iter().any(|l| l.tutorial_id == lesson.tutorial_id) {
                    warn!(
                        path = %path.display(),
                        tutorial = lesson.tutorial_id,
                        "Duplicate lesson ignored"
                    );
                    continue;
                }
                debug!(
                    path = %path.display(),
                    tutorial = lesson.tutorial_id,
                    sections = lesson.outline.len(),
                    "Loaded lesson"
                );
                lessons.push(lesson);
            }
            Err(err) => warn!(path = %path.display(), "Skipping lesson: {err:#}"),
        }
    }
    lessons.sort_by_key(|lesson| lesson.tutorial_id);
    info!(count = lessons.len(), dir = %dir.display(), "Lessons loaded");
    Ok(lessons)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
tutorial = 2

outline = [
  { id = "overview", short = "Overview" },
  { id = "setup", short = "Setup" },
  { id = "missing", short = "Missing" },
]

[[sections]]
id = "overview"
heading = "Overview"

[[sections.blocks]]
type = "paragraph"
text = "Hello."

[[sections.blocks]]
type = "callout"
kind = "tip"
title = "Heads up"
text = "Read this."

[[sections]]
id = "setup"
heading = "Setup"

[[sections.blocks]]
type = "track_code"
show_inline_switcher = true
variants = [
  { track = "nextjs", code = "npm install", lang = "bash" },
  { track = "rails", code = "bundle install" },
  { track = "fastapi", code = "pip install -r requirements.txt" },
]

[[sections.blocks]]
type = "track_only"
tracks = ["fastapi", "perl"]
text = "Activate your virtualenv first."

[[sections.blocks]]
type = "accordion"
title = "Details"

[[sections.blocks.blocks]]
type = "tabs"
tabs = [
  { label = "One", blocks = [{ type = "paragraph", text = "1" }] },
  { label = "Two" },
]
"#;

    #[test]
    fn parses_outline_sections_and_blocks() {
        let lesson = parse_lesson(SAMPLE).expect("lesson parses");
        assert_eq!(lesson.tutorial_id, 2);
        assert!(lesson.title.starts_with("CLAUDE.md"));
        assert_eq!(lesson.outline.len(), 3);
        assert_eq!(lesson.sections.len(), 2);
        assert!(lesson.section("missing").is_none());
        assert!(matches!(
            lesson.sections[0].blocks[1],
            Block::Callout {
                kind: CalloutKind::Tip,
                ..
            }
        ));
    }

    #[test]
    fn unknown_tracks_are_dropped_from_content() {
        let lesson = parse_lesson(SAMPLE).expect("lesson parses");
        let setup = lesson.section("setup").expect("setup section");
        match &setup.blocks[0] {
            Block::TrackCode {
                content,
                show_inline_switcher,
                ..
            } => {
                assert!(*show_inline_switcher);
                assert_eq!(content.available_tracks(), vec![Track::NextJs, Track::FastApi]);
            }
            other => panic!("expected track code, got {other:?}"),
        }
        match &setup.blocks[1] {
            Block::TrackOnly { gate, .. } => assert_eq!(gate.tracks(), &[Track::FastApi]),
            other => panic!("expected track-only block, got {other:?}"),
        }
    }

    #[test]
    fn nested_widgets_get_distinct_ids() {
        let lesson = parse_lesson(SAMPLE).expect("lesson parses");
        assert_eq!(lesson.widget_count(), 2);
        let setup = lesson.section("setup").expect("setup section");
        match &setup.blocks[2] {
            Block::Accordion { widget, blocks, .. } => {
                assert_eq!(*widget, 0);
                assert!(matches!(blocks[0], Block::Tabs { widget: 1, .. }));
            }
            other => panic!("expected accordion, got {other:?}"),
        }
    }

    #[test]
    fn rejects_lessons_outside_the_catalog() {
        let err = parse_lesson("tutorial = 42\noutline = [{ id = \"a\", short = \"A\" }]")
            .expect_err("unknown tutorial");
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn rejects_empty_outline() {
        assert!(parse_lesson("tutorial = 1\noutline = []").is_err());
    }

    #[test]
    fn loads_directory_sorted_and_skips_bad_files() {
        let dir = std::env::temp_dir().join(format!("tutorial-lessons-test-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("mkdir");
        fs::write(dir.join("b.toml"), SAMPLE).expect("write sample");
        fs::write(
            dir.join("a.toml"),
            "tutorial = 1\noutline = [{ id = \"overview\", short = \"Overview\" }]",
        )
        .expect("write minimal");
        fs::write(dir.join("c.toml"), "tutorial = ").expect("write broken");
        fs::write(dir.join("notes.txt"), "ignored").expect("write txt");

        let lessons = load_lessons(&dir).expect("load");
        let ids: Vec<u32> = lessons.iter().map(|l| l.tutorial_id).collect();
        assert_eq!(ids, vec![1, 2]);
        let _ = fs::remove_dir_all(&dir);
    }
}
