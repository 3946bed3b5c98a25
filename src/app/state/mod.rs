mod constants;
mod page;
mod ui;

use crate::config::{AppConfig, ThemeMode};
use iced::Task;
use tutorial_core::{
    FileStorage, Lesson, MemoryStorage, PreferenceStorage, TrackPreferenceStore, deep_link_for,
};

use super::messages::Message;

pub(crate) use constants::*;
pub(in crate::app) use page::{LayoutMetrics, PageSession};
pub(in crate::app) use ui::{CopyNotice, SidebarState, ViewportState};

pub(in crate::app) type TrackStore = TrackPreferenceStore<Box<dyn PreferenceStorage>>;

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) store: TrackStore,
    pub(super) lessons: Vec<Lesson>,
    pub(super) page: Option<PageSession>,
    pub(super) sidebar: SidebarState,
    pub(super) viewport: ViewportState,
    pub(super) copied: Option<CopyNotice>,
}

impl App {
    pub fn bootstrap(
        mut config: AppConfig,
        lessons: Vec<Lesson>,
        initial_tutorial: Option<u32>,
    ) -> (App, Task<Message>) {
        clamp_config(&mut config);
        let store = TrackPreferenceStore::initialize(storage_for(&config));

        let mut app = App {
            config,
            store,
            lessons,
            page: None,
            sidebar: SidebarState::all_expanded(),
            viewport: ViewportState::unknown(),
            copied: None,
        };

        let start = initial_tutorial
            .filter(|id| {
                let loaded = app.lesson_index(*id).is_some();
                if !loaded {
                    tracing::warn!(tutorial = id, "Requested tutorial is not available");
                }
                loaded
            })
            .or_else(|| app.lessons.first().map(|lesson| lesson.tutorial_id));

        match start {
            Some(id) => {
                app.mount_tutorial(id);
            }
            None => tracing::warn!("No lessons to show"),
        }

        tracing::info!(
            track = %app.store.current(),
            night_mode = matches!(app.config.theme, ThemeMode::Night),
            lessons = app.lessons.len(),
            "Initialized app state"
        );

        (app, Task::none())
    }

    pub(super) fn lesson_index(&self, tutorial_id: u32) -> Option<usize> {
        self.lessons
            .iter()
            .position(|lesson| lesson.tutorial_id == tutorial_id)
    }

    pub(super) fn current_lesson(&self) -> Option<&Lesson> {
        let page = self.page.as_ref()?;
        self.lessons
            .iter()
            .find(|lesson| lesson.tutorial_id == page.tutorial_id)
    }

    pub(super) fn current_tutorial_id(&self) -> Option<u32> {
        self.page.as_ref().map(|page| page.tutorial_id)
    }

    /// Replace the mounted page with `tutorial_id`. The previous page is
    /// dropped first, which detaches its observer and listener.
    pub(super) fn mount_tutorial(&mut self, tutorial_id: u32) -> bool {
        let Some(idx) = self.lesson_index(tutorial_id) else {
            return false;
        };
        self.page = None;
        let metrics = self.layout_metrics();
        let band = self.config.trigger_band();
        self.page = Some(PageSession::mount(
            &self.lessons[idx],
            &mut self.store,
            metrics,
            band,
        ));
        self.viewport.last_offset = iced::widget::scrollable::RelativeOffset::START;
        tracing::info!(
            tutorial = tutorial_id,
            link = deep_link_for(tutorial_id).as_deref().unwrap_or("/"),
            "Opened tutorial"
        );
        true
    }

    pub(super) fn layout_metrics(&self) -> LayoutMetrics {
        let width = if self.viewport.viewport_width > 0.0 {
            self.viewport.viewport_width
        } else {
            let mut fallback = self.config.window_width.max(1.0);
            if self.config.show_sidebar {
                fallback = (fallback - SIDEBAR_WIDTH_PX).max(1.0);
            }
            fallback
        };
        LayoutMetrics {
            font_size: self.config.font_size as f32,
            text_width: (width - PAGE_PADDING_PX * 2.0).max(1.0),
        }
    }
}

fn storage_for(config: &AppConfig) -> Box<dyn PreferenceStorage> {
    if config.persist_track {
        let storage = FileStorage::in_cache_dir(&config.cache_path());
        tracing::debug!(path = %storage.path().display(), "Persisting track selection");
        Box::new(storage)
    } else {
        tracing::debug!("Track selection kept for this session only");
        Box::new(MemoryStorage::new())
    }
}

fn clamp_config(config: &mut AppConfig) {
    fn normalize_key_binding(value: &mut String, fallback: String) {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            *value = fallback;
        } else {
            *value = normalized;
        }
    }

    config.font_size = config.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    config.window_width = config.window_width.clamp(320.0, 7680.0);
    config.window_height = config.window_height.clamp(240.0, 4320.0);
    let band = config.trigger_band();
    config.band_top_inset = band.top_inset;
    config.band_bottom_inset = band.bottom_inset;
    normalize_key_binding(&mut config.key_toggle_sidebar, "m".to_string());
    normalize_key_binding(&mut config.key_next_section, "j".to_string());
    normalize_key_binding(&mut config.key_prev_section, "k".to_string());
    normalize_key_binding(&mut config.key_cycle_track, "t".to_string());
    normalize_key_binding(&mut config.key_toggle_theme, "ctrl+t".to_string());
    normalize_key_binding(&mut config.key_quit, "q".to_string());
}
