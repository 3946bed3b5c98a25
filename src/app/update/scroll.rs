use super::super::layout::MeasuredSpan;
use super::super::messages::SectionMeasurement;
use super::super::observer::ViewportGeometry;
use super::super::state::App;
use super::Effect;
use iced::widget::scrollable::RelativeOffset;
use tracing::debug;

/// Gap between the band's top edge and a section heading after a jump.
const JUMP_BAND_MARGIN_PX: f32 = 8.0;
/// Bounds this close to a viewport edge are treated as clipped.
const CLIP_EPSILON_PX: f32 = 0.5;

impl App {
    pub(super) fn handle_scrolled(
        &mut self,
        offset: RelativeOffset,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
    ) {
        let sanitized = Self::sanitize_offset(offset);
        let sanitize_len = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let width_changed = (sanitize_len(viewport_width) - self.viewport.viewport_width).abs() > 0.5;

        self.viewport.last_offset = sanitized;
        self.viewport.viewport_width = sanitize_len(viewport_width);
        self.viewport.viewport_height = sanitize_len(viewport_height);
        self.viewport.content_height = sanitize_len(content_height);

        if width_changed {
            if let Some(page) = self.page.as_ref() {
                page.mark_stale();
            }
        }
        self.refresh_stale_layout();

        let geometry = self.viewport_geometry();
        if let Some(page) = self.page.as_mut() {
            page.report_viewport(geometry);
        }
    }

    /// Request the rendered bounds of every anchored section.
    pub(super) fn section_measure_request(&self) -> Option<Effect> {
        let page = self.page.as_ref()?;
        if !self.viewport.is_known() {
            return None;
        }
        let ids: Vec<String> = page
            .layout
            .anchors()
            .iter()
            .map(|anchor| anchor.id.clone())
            .collect();
        if ids.is_empty() {
            return None;
        }
        Some(Effect::MeasureSections {
            ids,
            scroll_px: self.scroll_px(),
        })
    }

    fn scroll_px(&self) -> f32 {
        let range = (self.viewport.content_height - self.viewport.viewport_height).max(0.0);
        self.viewport.last_offset.y * range
    }

    /// Fold a fully visible section's bounds into the layout. Sections cut
    /// by the viewport edge only show part of their extent and are skipped.
    pub(super) fn handle_section_measured(&mut self, measurement: SectionMeasurement) {
        let SectionMeasurement {
            id,
            frame,
            bounds,
            scroll_px,
        } = measurement;
        let (Some(frame), Some(bounds)) = (frame, bounds) else {
            return;
        };
        if !self.viewport.is_known() {
            return;
        }
        let clipped = bounds.y <= frame.y + CLIP_EPSILON_PX
            || bounds.y + bounds.height >= frame.y + frame.height - CLIP_EPSILON_PX;
        if clipped {
            return;
        }

        let top_px = bounds.y - frame.y + scroll_px;
        let span = MeasuredSpan {
            top_px,
            bottom_px: top_px + bounds.height,
        };
        let content_height = self.viewport.content_height;
        if let Some(page) = self.page.as_mut() {
            if page.record_measurement(&id, span, content_height) {
                debug!(section = %id, top_px, "Section rendered away from its estimate");
            }
        }
    }

    /// Re-attach the section observer if the layout went stale.
    pub(super) fn refresh_stale_layout(&mut self) {
        let stale = self.page.as_ref().is_some_and(|page| page.is_stale());
        if !stale {
            return;
        }
        let metrics = self.layout_metrics();
        let track = self.store.current();
        let content_height = self.viewport.content_height;
        let Some(page) = self.page.as_mut() else {
            return;
        };
        let Some(lesson) = self
            .lessons
            .iter()
            .find(|lesson| lesson.tutorial_id == page.tutorial_id)
        else {
            return;
        };
        page.reattach(lesson, track, metrics, content_height);
    }

    pub(super) fn viewport_geometry(&self) -> ViewportGeometry {
        ViewportGeometry {
            offset_y: self.viewport.last_offset.y,
            viewport_height: self.viewport.viewport_height,
            content_height: self.viewport.content_height,
        }
    }

    /// Offset that puts the start of section `id` just inside the trigger
    /// band. `None` for sections without a rendered anchor.
    pub(super) fn scroll_offset_for_section(&self, id: &str) -> Option<RelativeOffset> {
        let page = self.page.as_ref()?;
        let anchor = page.layout.anchor(id)?;

        let (content_height, viewport_height) = if self.viewport.is_known() {
            (self.viewport.content_height, self.viewport.viewport_height)
        } else {
            (page.layout.total_px(), self.config.window_height.max(1.0))
        };
        if content_height <= viewport_height {
            return Some(RelativeOffset::START);
        }

        let band_top_px = page.band.top_inset * viewport_height;
        let desired_top_px = anchor.top * content_height - band_top_px + JUMP_BAND_MARGIN_PX;

        // `snap_to` expects offset over the scrollable range (content - viewport).
        let scrollable_px = (content_height - viewport_height).max(1.0);
        let y = (desired_top_px / scrollable_px).clamp(0.0, 1.0);
        debug!(section = %id, y, "Computed section scroll target");
        Some(RelativeOffset { x: 0.0, y })
    }

    pub(super) fn sanitize_offset(offset: RelativeOffset) -> RelativeOffset {
        let clamp = |v: f32| {
            if v.is_finite() {
                v.clamp(0.0, 1.0)
            } else {
                0.0
            }
        };
        RelativeOffset {
            x: clamp(offset.x),
            y: clamp(offset.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::tests_support::{build_test_app, scroll_message};
    use super::*;
    use crate::app::messages::Message;
    use iced::{Point, Rectangle, Size};
    use tutorial_core::Track;

    fn active(app: &App) -> String {
        app.page.as_ref().map(|p| p.active_id()).unwrap_or_default()
    }

    #[test]
    fn first_section_is_active_at_top() {
        let mut app = build_test_app(None);
        app.reduce(scroll_message(0.0));
        assert_eq!(active(&app), "install");
    }

    #[test]
    fn scrolling_to_bottom_activates_last_rendered_section() {
        let mut app = build_test_app(None);
        app.reduce(scroll_message(0.0));
        app.reduce(scroll_message(1.0));
        assert_eq!(active(&app), "next-steps");
    }

    #[test]
    fn offsets_are_sanitized() {
        let offset = App::sanitize_offset(RelativeOffset {
            x: f32::NAN,
            y: 1.7,
        });
        assert_eq!(offset, RelativeOffset { x: 0.0, y: 1.0 });
    }

    #[test]
    fn section_targets_are_monotonic() {
        let mut app = build_test_app(None);
        app.reduce(scroll_message(0.0));
        let ids = ["install", "first-run", "next-steps"];
        let mut previous = -1.0f32;
        for id in ids {
            let y = app
                .scroll_offset_for_section(id)
                .expect("section has an anchor")
                .y;
            assert!(y + 1e-6 >= previous, "targets should follow section order");
            previous = y;
        }
    }

    #[test]
    fn jump_target_activates_that_section() {
        let mut app = build_test_app(None);
        app.reduce(scroll_message(0.0));
        let target = app
            .scroll_offset_for_section("first-run")
            .expect("first-run anchor");
        app.reduce(scroll_message(target.y));
        assert_eq!(active(&app), "first-run");
    }

    #[test]
    fn track_change_reattaches_on_next_scroll() {
        let mut app = build_test_app(None);
        app.reduce(scroll_message(0.0));
        app.reduce(Message::SelectTrack(Track::FastApi));
        assert!(app.page.as_ref().is_some_and(|p| p.is_stale()));

        app.reduce(scroll_message(1.0));
        let page = app.page.as_ref().expect("page");
        assert!(!page.is_stale());
        assert!(!page.observer.is_detached());
        assert_eq!(page.active_id(), "next-steps");
    }

    fn measured(id: &str, frame_y: f32, top: f32, height: f32) -> Message {
        Message::SectionMeasured(SectionMeasurement {
            id: id.to_string(),
            frame: Some(Rectangle::new(Point::new(0.0, frame_y), Size::new(800.0, 600.0))),
            bounds: Some(Rectangle::new(
                Point::new(0.0, frame_y + top),
                Size::new(800.0, height),
            )),
            scroll_px: 0.0,
        })
    }

    #[test]
    fn scrolling_requests_section_measurements() {
        let mut app = build_test_app(None);
        let effects = app.reduce(scroll_message(0.0));
        assert_eq!(
            effects,
            vec![Effect::MeasureSections {
                ids: vec![
                    "install".to_string(),
                    "first-run".to_string(),
                    "next-steps".to_string()
                ],
                scroll_px: 0.0,
            }]
        );
    }

    #[test]
    fn measured_section_replaces_its_estimate_on_next_scroll() {
        let mut app = build_test_app(None);
        app.reduce(scroll_message(0.0));

        app.reduce(measured("first-run", 100.0, 300.0, 150.0));
        assert!(app.page.as_ref().is_some_and(|p| p.is_stale()));

        app.reduce(scroll_message(0.0));
        let page = app.page.as_ref().expect("page");
        assert!(!page.is_stale());
        let anchor = page.layout.anchor("first-run").expect("first-run anchor");
        assert!((anchor.top - 0.1).abs() < 1e-6);
        assert!((anchor.bottom - 0.15).abs() < 1e-6);
    }

    #[test]
    fn clipped_section_bounds_are_ignored() {
        let mut app = build_test_app(None);
        app.reduce(scroll_message(0.0));
        // Cut off by the bottom edge of the viewport.
        app.reduce(measured("next-steps", 100.0, 500.0, 100.0));
        let page = app.page.as_ref().expect("page");
        assert!(!page.is_stale());
        assert!(page.measured.is_empty());
    }

    #[test]
    fn track_change_discards_measurements() {
        let mut app = build_test_app(None);
        app.reduce(scroll_message(0.0));
        app.reduce(measured("first-run", 100.0, 300.0, 150.0));
        app.reduce(scroll_message(0.0));

        app.reduce(Message::SelectTrack(Track::FastApi));
        app.reduce(scroll_message(0.0));
        let page = app.page.as_ref().expect("page");
        assert!(page.measured.is_empty());
        let anchor = page.layout.anchor("first-run").expect("first-run anchor");
        assert!((anchor.top - 0.1).abs() > 1e-3);
    }
}
