//! Scroll-spy for lesson pages.
//!
//! A `SectionVisibilityTracker` asks a `ViewportObserver` to watch every
//! section anchor it can find and keeps `active_id` pointed at the section
//! that most recently entered the trigger band. The observer is owned by
//! the `DetachHandle` returned from `attach`; dropping or detaching the
//! handle disconnects it and stops all further transitions.

use crate::sections::{ActiveSectionState, SectionOutline};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Vertical slice of the viewport that decides which section is being read,
/// as fractions of the viewport height cut from the top and the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerBand {
    pub top_inset: f32,
    pub bottom_inset: f32,
}

impl Default for TriggerBand {
    fn default() -> Self {
        Self {
            top_inset: 0.20,
            bottom_inset: 0.70,
        }
    }
}

impl TriggerBand {
    /// Clamp insets so the band always keeps a non-empty middle slice.
    /// Non-finite or overlapping insets fall back to the default band.
    pub fn new(top_inset: f32, bottom_inset: f32) -> Self {
        if !top_inset.is_finite() || !bottom_inset.is_finite() {
            return Self::default();
        }
        let top = top_inset.clamp(0.0, 0.95);
        let bottom = bottom_inset.clamp(0.0, 0.95);
        if top + bottom >= 0.99 {
            return Self::default();
        }
        Self {
            top_inset: top,
            bottom_inset: bottom,
        }
    }

    /// Band edges in content coordinates for a viewport starting at
    /// `viewport_top` with height `viewport_height`.
    pub fn bounds(&self, viewport_top: f32, viewport_height: f32) -> (f32, f32) {
        let height = viewport_height.max(0.0);
        (
            viewport_top + height * self.top_inset,
            viewport_top + height * (1.0 - self.bottom_inset),
        )
    }

    /// Whether the span `[top, bottom)` overlaps the band.
    pub fn intersects(&self, top: f32, bottom: f32, viewport_top: f32, viewport_height: f32) -> bool {
        let (band_top, band_bottom) = self.bounds(viewport_top, viewport_height);
        top < band_bottom && bottom > band_top
    }
}

/// One crossing report from an observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub target_id: String,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn entered(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            is_intersecting: true,
        }
    }

    pub fn left(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            is_intersecting: false,
        }
    }
}

pub type IntersectionCallback = Rc<dyn Fn(&[IntersectionEntry])>;

/// Finds the rendered anchor for a section id.
pub trait AnchorLookup {
    type Anchor;

    fn anchor_by_id(&self, id: &str) -> Option<Self::Anchor>;
}

/// Watches anchors and reports band crossings through the callback it was
/// built with.
pub trait ViewportObserver {
    type Anchor;

    fn observe(&mut self, anchor: Self::Anchor);
    fn disconnect(&mut self);
}

pub struct SectionVisibilityTracker {
    outline: Rc<SectionOutline>,
    state: Rc<RefCell<ActiveSectionState>>,
}

impl SectionVisibilityTracker {
    pub fn new(outline: SectionOutline) -> Self {
        let state = ActiveSectionState::for_outline(&outline);
        Self {
            outline: Rc::new(outline),
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn outline(&self) -> &SectionOutline {
        &self.outline
    }

    pub fn active_id(&self) -> String {
        self.state.borrow().active_id.clone()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.state.borrow().active_id == id
    }

    /// Watch every section anchor `document` can resolve.
    ///
    /// `make_observer` receives the callback the observer must report
    /// through. Sections without an anchor are skipped; they can never
    /// become active. The active section is kept across re-attachment.
    pub fn attach<D, O, F>(&self, document: &D, make_observer: F) -> DetachHandle<O>
    where
        D: AnchorLookup,
        O: ViewportObserver<Anchor = D::Anchor>,
        F: FnOnce(IntersectionCallback) -> O,
    {
        let live = Rc::new(Cell::new(true));
        let callback = intersection_callback(
            Rc::downgrade(&self.state),
            Rc::clone(&self.outline),
            Rc::clone(&live),
        );
        let mut observer = make_observer(callback);

        let mut observed = 0usize;
        for section in self.outline.iter() {
            match document.anchor_by_id(&section.id) {
                Some(anchor) => {
                    observer.observe(anchor);
                    observed += 1;
                }
                None => debug!(id = %section.id, "No anchor for section; not observed"),
            }
        }
        debug!(
            observed,
            sections = self.outline.len(),
            "Attached section observer"
        );

        DetachHandle {
            observer: Some(observer),
            live,
        }
    }
}

fn intersection_callback(
    state: Weak<RefCell<ActiveSectionState>>,
    outline: Rc<SectionOutline>,
    live: Rc<Cell<bool>>,
) -> IntersectionCallback {
    Rc::new(move |entries: &[IntersectionEntry]| {
        if !live.get() {
            return;
        }
        let Some(state) = state.upgrade() else {
            return;
        };
        // Last intersecting entry wins.
        let winner = entries
            .iter()
            .filter(|entry| entry.is_intersecting && outline.contains(&entry.target_id))
            .last();
        if let Some(entry) = winner {
            let mut state = state.borrow_mut();
            if state.active_id != entry.target_id {
                trace!(from = %state.active_id, to = %entry.target_id, "Active section changed");
                state.active_id = entry.target_id.clone();
            }
        }
    })
}

/// Owns an attached observer. Detaches on drop.
pub struct DetachHandle<O: ViewportObserver> {
    observer: Option<O>,
    live: Rc<Cell<bool>>,
}

impl<O: ViewportObserver> DetachHandle<O> {
    /// Stop observing. Safe to call more than once.
    pub fn detach(&mut self) {
        self.live.set(false);
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
            debug!("Detached section observer");
        }
    }

    pub fn is_detached(&self) -> bool {
        self.observer.is_none()
    }

    /// The attached observer, for feeding it viewport changes.
    pub fn observer_mut(&mut self) -> Option<&mut O> {
        self.observer.as_mut()
    }
}

impl<O: ViewportObserver> Drop for DetachHandle<O> {
    fn drop(&mut self) {
        self.detach();
    }
}
