use super::super::state::App;
use tracing::debug;
use tutorial_core::Track;

impl App {
    pub(super) fn handle_select_track(&mut self, track: Track) {
        self.store.select(track);
    }

    pub(super) fn handle_cycle_track(&mut self) {
        let next = self.store.current().cycle();
        self.store.select(next);
    }

    pub(super) fn handle_toggle_accordion(&mut self, widget: usize) {
        if let Some(page) = self.page.as_mut() {
            page.toggle_accordion(widget);
            debug!(widget, open = page.open_accordions.contains(&widget), "Toggled accordion");
        }
    }

    pub(super) fn handle_select_tab(&mut self, widget: usize, tab: usize) {
        if let Some(page) = self.page.as_mut() {
            page.select_tab(widget, tab);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::tests_support::{build_test_app, scroll_message};
    use crate::app::messages::Message;
    use tutorial_core::Track;

    #[test]
    fn reselecting_the_current_track_keeps_layout_fresh() {
        let mut app = build_test_app(None);
        app.reduce(Message::SelectTrack(Track::NextJs));
        assert!(!app.page.as_ref().is_some_and(|p| p.is_stale()));
    }

    #[test]
    fn cycling_wraps_around() {
        let mut app = build_test_app(None);
        app.reduce(Message::CycleTrack);
        app.reduce(Message::CycleTrack);
        assert_eq!(app.store.current(), Track::NextJs);
    }

    #[test]
    fn accordion_toggle_grows_layout_after_next_scroll() {
        let mut app = build_test_app(None);
        app.reduce(scroll_message(0.0));
        let before = app.page.as_ref().map(|p| p.layout.total_px()).unwrap_or(0.0);

        app.reduce(Message::ToggleAccordion(0));
        assert!(app.page.as_ref().is_some_and(|p| p.is_stale()));
        app.reduce(scroll_message(0.0));

        let page = app.page.as_ref().expect("page");
        assert!(page.open_accordions.contains(&0));
        assert!(page.layout.total_px() > before);
    }

    #[test]
    fn accordion_state_is_sized_for_every_widget() {
        let app = build_test_app(None);
        let widgets = app.current_lesson().map(|l| l.widget_count()).unwrap_or(0);
        let page = app.page.as_ref().expect("page");
        assert!(widgets > 0);
        assert!(page.open_accordions.capacity() >= widgets);
    }

    #[test]
    fn selecting_same_tab_twice_is_not_a_layout_change() {
        let mut app = build_test_app(Some(4));
        app.reduce(Message::SelectTab { widget: 0, tab: 1 });
        app.reduce(scroll_message(0.0));
        app.reduce(Message::SelectTab { widget: 0, tab: 1 });
        let page = app.page.as_ref().expect("page");
        assert_eq!(page.selected_tab(0), 1);
        assert!(!page.is_stale());
    }
}
