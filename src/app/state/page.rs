use super::super::layout::{LayoutInputs, LessonLayout, MeasuredSpan};
use super::constants::MEASURE_TOLERANCE_PX;
use super::super::observer::{ScrollBandObserver, ViewportGeometry};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tutorial_core::{
    Block, DetachHandle, Lesson, PreferenceStorage, SectionVisibilityTracker, Track, TrackListener,
    TrackPreferenceStore, TriggerBand,
};

/// Width-dependent inputs for estimating the lesson layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(in crate::app) struct LayoutMetrics {
    pub font_size: f32,
    pub text_width: f32,
}

/// Everything that lives exactly as long as one lesson is on screen.
///
/// Dropping the session detaches the section observer and unsubscribes the
/// track listener.
pub struct PageSession {
    pub(in crate::app) tutorial_id: u32,
    pub(in crate::app) tracker: SectionVisibilityTracker,
    pub(in crate::app) observer: DetachHandle<ScrollBandObserver>,
    pub(in crate::app) layout: LessonLayout,
    pub(in crate::app) layout_stale: Rc<Cell<bool>>,
    pub(in crate::app) open_accordions: HashSet<usize>,
    pub(in crate::app) selected_tabs: HashMap<usize, usize>,
    pub(in crate::app) band: TriggerBand,
    /// Spans the renderer reported for the current layout inputs.
    pub(in crate::app) measured: HashMap<String, MeasuredSpan>,
    layout_track: Track,
    layout_metrics: LayoutMetrics,
    _track_listener: TrackListener,
}

impl PageSession {
    pub(in crate::app) fn mount<S: PreferenceStorage>(
        lesson: &Lesson,
        store: &mut TrackPreferenceStore<S>,
        metrics: LayoutMetrics,
        band: TriggerBand,
    ) -> Self {
        let open_accordions = default_open_accordions(lesson);
        let selected_tabs = HashMap::new();
        let track = store.current();
        let layout = estimate(lesson, track, metrics, &open_accordions, &selected_tabs);

        let tracker = SectionVisibilityTracker::new(lesson.outline.clone());
        let observer = tracker.attach(&layout, |callback| ScrollBandObserver::new(band, callback));

        let layout_stale = Rc::new(Cell::new(false));
        let stale = Rc::clone(&layout_stale);
        let track_listener = store.subscribe(move |track| {
            tracing::debug!(%track, "Track changed; section layout needs refresh");
            stale.set(true);
        });

        tracing::info!(
            tutorial = lesson.tutorial_id,
            sections = lesson.outline.len(),
            "Mounted lesson page"
        );

        Self {
            tutorial_id: lesson.tutorial_id,
            tracker,
            observer,
            layout,
            layout_stale,
            open_accordions,
            selected_tabs,
            band,
            measured: HashMap::new(),
            layout_track: track,
            layout_metrics: metrics,
            _track_listener: track_listener,
        }
    }

    pub(in crate::app) fn active_id(&self) -> String {
        self.tracker.active_id()
    }

    pub(in crate::app) fn mark_stale(&self) {
        self.layout_stale.set(true);
    }

    pub(in crate::app) fn is_stale(&self) -> bool {
        self.layout_stale.get()
    }

    /// Re-estimate the layout and replace the observer with one watching
    /// the new anchors. The active section carries over. Measurements taken
    /// under a different track or width are dropped.
    pub(in crate::app) fn reattach(
        &mut self,
        lesson: &Lesson,
        track: Track,
        metrics: LayoutMetrics,
        content_height: f32,
    ) {
        if track != self.layout_track || metrics != self.layout_metrics {
            self.measured.clear();
        }
        self.layout_track = track;
        self.layout_metrics = metrics;
        self.layout = estimate(
            lesson,
            track,
            metrics,
            &self.open_accordions,
            &self.selected_tabs,
        )
        .with_measured(&self.measured, content_height);
        let band = self.band;
        self.observer = self
            .tracker
            .attach(&self.layout, |callback| ScrollBandObserver::new(band, callback));
        self.layout_stale.set(false);
        tracing::debug!(
            tutorial = self.tutorial_id,
            anchors = self.layout.anchors().len(),
            measured = self.measured.len(),
            "Re-attached section observer"
        );
    }

    pub(in crate::app) fn report_viewport(&mut self, geometry: ViewportGeometry) {
        if let Some(observer) = self.observer.observer_mut() {
            observer.update_viewport(geometry);
        }
    }

    /// Record where section `id` was rendered. Marks the layout stale when
    /// the span moved away from the current anchor.
    pub(in crate::app) fn record_measurement(
        &mut self,
        id: &str,
        span: MeasuredSpan,
        content_height: f32,
    ) -> bool {
        let Some(anchor) = self.layout.anchor(id) else {
            return false;
        };
        let moved = (anchor.top * content_height - span.top_px).abs() > MEASURE_TOLERANCE_PX
            || (anchor.bottom * content_height - span.bottom_px).abs() > MEASURE_TOLERANCE_PX;
        if moved {
            self.measured.insert(id.to_string(), span);
            self.mark_stale();
        }
        moved
    }

    pub(in crate::app) fn toggle_accordion(&mut self, widget: usize) {
        if !self.open_accordions.remove(&widget) {
            self.open_accordions.insert(widget);
        }
        self.measured.clear();
        self.mark_stale();
    }

    pub(in crate::app) fn select_tab(&mut self, widget: usize, tab: usize) {
        if self.selected_tabs.insert(widget, tab) != Some(tab) {
            self.measured.clear();
            self.mark_stale();
        }
    }

    pub(in crate::app) fn selected_tab(&self, widget: usize) -> usize {
        self.selected_tabs.get(&widget).copied().unwrap_or(0)
    }
}

fn estimate(
    lesson: &Lesson,
    track: Track,
    metrics: LayoutMetrics,
    open_accordions: &HashSet<usize>,
    selected_tabs: &HashMap<usize, usize>,
) -> LessonLayout {
    LessonLayout::estimate(
        lesson,
        &LayoutInputs {
            track,
            font_size: metrics.font_size,
            text_width: metrics.text_width,
            open_accordions,
            selected_tabs,
        },
    )
}

fn default_open_accordions(lesson: &Lesson) -> HashSet<usize> {
    fn collect(blocks: &[Block], open: &mut HashSet<usize>) {
        for block in blocks {
            match block {
                Block::Accordion {
                    widget,
                    default_open,
                    blocks,
                    ..
                } => {
                    if *default_open {
                        open.insert(*widget);
                    }
                    collect(blocks, open);
                }
                Block::Tabs { tabs, .. } => {
                    for tab in tabs {
                        collect(&tab.blocks, open);
                    }
                }
                _ => {}
            }
        }
    }

    let mut open = HashSet::with_capacity(lesson.widget_count());
    for section in &lesson.sections {
        collect(&section.blocks, &mut open);
    }
    open
}
