use super::super::super::messages::Message;
use super::super::super::state::{App, CopyNotice};
use super::super::Effect;
use std::time::Instant;
use tracing::{debug, info};

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::SelectTutorial(id) => self.handle_select_tutorial(id, &mut effects),
            Message::NextTutorial => self.handle_next_tutorial(&mut effects),
            Message::PreviousTutorial => self.handle_previous_tutorial(&mut effects),
            Message::ToggleSidebar => self.handle_toggle_sidebar(&mut effects),
            Message::ToggleLevel(level) => self.sidebar.toggle(level),
            Message::SelectTrack(track) => self.handle_select_track(track),
            Message::CycleTrack => self.handle_cycle_track(),
            Message::JumpToSection(id) => self.handle_jump_to_section(&id, &mut effects),
            Message::NextSection => self.handle_next_section(&mut effects),
            Message::PreviousSection => self.handle_previous_section(&mut effects),
            Message::ToggleAccordion(widget) => self.handle_toggle_accordion(widget),
            Message::SelectTab { widget, tab } => self.handle_select_tab(widget, tab),
            Message::ToggleTheme => self.handle_toggle_theme(&mut effects),
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height);
            }
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::Scrolled {
                offset,
                viewport_width,
                viewport_height,
                content_height,
            } => {
                self.handle_scrolled(offset, viewport_width, viewport_height, content_height);
                effects.extend(self.section_measure_request());
            }
            Message::SectionMeasured(measurement) => self.handle_section_measured(measurement),
            Message::CopyCode(code) => self.handle_copy_code(code, &mut effects),
            Message::Tick(now) => self.handle_tick(now),
            Message::Quit => effects.push(Effect::Quit),
        }

        effects
    }

    fn handle_toggle_sidebar(&mut self, effects: &mut Vec<Effect>) {
        self.config.show_sidebar = !self.config.show_sidebar;
        if self.viewport.viewport_width <= 0.0 {
            // Text width is derived from the window until the first scroll report.
            if let Some(page) = self.page.as_ref() {
                page.mark_stale();
            }
        }
        info!(visible = self.config.show_sidebar, "Toggled sidebar");
        effects.push(Effect::SaveConfig);
    }

    fn handle_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        self.config.theme = self.config.theme.toggled();
        info!(theme = %self.config.theme, "Toggled theme");
        effects.push(Effect::SaveConfig);
    }

    fn handle_copy_code(&mut self, code: String, effects: &mut Vec<Effect>) {
        debug!(lines = code.lines().count(), "Copying code sample");
        self.copied = Some(CopyNotice::new(code.clone(), Instant::now()));
        effects.push(Effect::CopyToClipboard(code));
    }

    fn handle_tick(&mut self, now: Instant) {
        if self.copied.as_ref().is_some_and(|notice| notice.expired(now)) {
            self.copied = None;
        }
    }

    fn handle_window_resized(&mut self, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return;
        }
        self.config.window_width = width;
        self.config.window_height = height;
        if let Some(page) = self.page.as_ref() {
            page.mark_stale();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::update::core::tests_support::{build_test_app, scroll_message};
    use crate::config::ThemeMode;
    use std::time::Duration;
    use tutorial_core::{PreferenceStorage, TRACK_STORAGE_KEY, Track};

    #[test]
    fn bootstrap_opens_first_lesson_by_default() {
        let app = build_test_app(None);
        assert_eq!(app.current_tutorial_id(), Some(1));
        assert_eq!(app.page.as_ref().map(|p| p.active_id()).as_deref(), Some("install"));
    }

    #[test]
    fn bootstrap_honors_requested_tutorial() {
        let app = build_test_app(Some(4));
        assert_eq!(app.current_tutorial_id(), Some(4));
    }

    #[test]
    fn bootstrap_ignores_unavailable_tutorial() {
        let app = build_test_app(Some(9));
        assert_eq!(app.current_tutorial_id(), Some(1));
    }

    #[test]
    fn selecting_track_updates_store_and_storage() {
        let mut app = build_test_app(None);
        let effects = app.reduce(Message::SelectTrack(Track::FastApi));
        assert!(effects.is_empty());
        assert_eq!(app.store.current(), Track::FastApi);
        assert_eq!(
            app.store
                .storage()
                .get(TRACK_STORAGE_KEY)
                .expect("memory storage"),
            Some("fastapi".to_string())
        );
    }

    #[test]
    fn track_change_marks_page_layout_stale() {
        let mut app = build_test_app(None);
        assert!(!app.page.as_ref().is_some_and(|p| p.is_stale()));
        app.reduce(Message::CycleTrack);
        assert_eq!(app.store.current(), Track::FastApi);
        assert!(app.page.as_ref().is_some_and(|p| p.is_stale()));
    }

    #[test]
    fn switching_tutorials_keeps_one_listener() {
        let mut app = build_test_app(None);
        assert_eq!(app.store.listener_count(), 1);
        app.reduce(Message::SelectTutorial(4));
        app.reduce(Message::SelectTutorial(1));
        assert_eq!(app.store.listener_count(), 1);
    }

    #[test]
    fn switching_tutorials_scrolls_to_top_and_resets_active_section() {
        let mut app = build_test_app(None);
        app.reduce(scroll_message(1.0));
        let effects = app.reduce(Message::SelectTutorial(4));
        assert!(effects.iter().any(|e| matches!(e, Effect::ScrollTo(offset) if offset.y == 0.0)));
        assert_eq!(app.page.as_ref().map(|p| p.active_id()).as_deref(), Some("define"));
    }

    #[test]
    fn unknown_tutorial_is_ignored() {
        let mut app = build_test_app(None);
        let effects = app.reduce(Message::SelectTutorial(12));
        assert!(effects.is_empty());
        assert_eq!(app.current_tutorial_id(), Some(1));
    }

    #[test]
    fn theme_toggle_requests_config_save() {
        let mut app = build_test_app(None);
        let effects = app.reduce(Message::ToggleTheme);
        assert_eq!(app.config.theme, ThemeMode::Day);
        assert!(effects.iter().any(|e| matches!(e, Effect::SaveConfig)));
    }

    #[test]
    fn sidebar_levels_toggle_independently() {
        let mut app = build_test_app(None);
        let level = tutorial_core::TutorialLevel::Advanced;
        assert!(app.sidebar.is_expanded(level));
        app.reduce(Message::ToggleLevel(level));
        assert!(!app.sidebar.is_expanded(level));
        assert!(app.sidebar.is_expanded(tutorial_core::TutorialLevel::Foundations));
    }

    #[test]
    fn quit_is_an_effect() {
        let mut app = build_test_app(None);
        let effects = app.reduce(Message::Quit);
        assert_eq!(effects, vec![Effect::Quit]);
    }

    #[test]
    fn copying_code_writes_clipboard_and_shows_notice() {
        let mut app = build_test_app(None);
        let code = "npm run dev".to_string();
        let effects = app.reduce(Message::CopyCode(code.clone()));
        assert_eq!(effects, vec![Effect::CopyToClipboard(code.clone())]);
        assert_eq!(app.copied.as_ref().map(|n| n.code.as_str()), Some("npm run dev"));
    }

    #[test]
    fn copy_notice_clears_after_two_seconds() {
        let mut app = build_test_app(None);
        app.reduce(Message::CopyCode("ls".to_string()));
        let copied_at = app.copied.as_ref().map(|n| n.copied_at).expect("notice");

        app.reduce(Message::Tick(copied_at + Duration::from_millis(1500)));
        assert!(app.copied.is_some());
        app.reduce(Message::Tick(copied_at + Duration::from_secs(2)));
        assert!(app.copied.is_none());
    }
}
