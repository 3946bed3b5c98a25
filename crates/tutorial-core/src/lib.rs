//! Reader-state core for the tutorial viewer.
//!
//! This crate has no GUI dependency. It holds:
//! - the selected technology track, its persistence and fan-out
//!   (`track`, `storage`, `preference`),
//! - per-block content selection by track (`content`),
//! - scroll-driven section tracking (`sections`, `visibility`),
//! - the tutorial catalog and lesson documents (`catalog`, `lesson`).

pub mod catalog;
pub mod content;
pub mod lesson;
pub mod preference;
pub mod sections;
pub mod storage;
pub mod track;
pub mod visibility;

pub use catalog::{
    TUTORIAL_COUNT, TUTORIALS, Tutorial, TutorialLevel, deep_link_for, parse_deep_link,
    tutorial_by_id, tutorials_in_level,
};
pub use content::{CodeSample, TrackContent, TrackOnly, resolve};
pub use lesson::{Block, CalloutKind, Lesson, LessonSection, TabPanel, load_lessons, parse_lesson};
pub use preference::{TrackListener, TrackPreferenceStore};
pub use sections::{ActiveSectionState, Section, SectionOutline};
pub use storage::{FileStorage, MemoryStorage, PreferenceStorage, TRACK_STORAGE_KEY};
pub use track::{Track, TrackMetadata};
pub use visibility::{
    AnchorLookup, DetachHandle, IntersectionCallback, IntersectionEntry, SectionVisibilityTracker,
    TriggerBand, ViewportObserver,
};
