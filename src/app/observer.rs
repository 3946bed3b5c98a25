//! Trigger-band observer driven by the lesson scrollable.
//!
//! Every observed anchor remembers whether it was inside the band at the
//! last viewport report. The first report after attaching announces every
//! anchor; later reports only announce anchors that crossed the band.

use super::layout::SectionAnchor;
use tutorial_core::{IntersectionCallback, IntersectionEntry, TriggerBand, ViewportObserver};

/// Scroll position and size as reported by the lesson scrollable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ViewportGeometry {
    /// Relative vertical offset, 0 at the top and 1 at the bottom.
    pub offset_y: f32,
    pub viewport_height: f32,
    pub content_height: f32,
}

impl ViewportGeometry {
    fn viewport_top(&self) -> f32 {
        let scrollable = (self.content_height - self.viewport_height).max(0.0);
        self.offset_y.clamp(0.0, 1.0) * scrollable
    }
}

struct ObservedAnchor {
    anchor: SectionAnchor,
    inside: Option<bool>,
}

pub(super) struct ScrollBandObserver {
    band: TriggerBand,
    callback: IntersectionCallback,
    targets: Vec<ObservedAnchor>,
    connected: bool,
}

impl ScrollBandObserver {
    pub fn new(band: TriggerBand, callback: IntersectionCallback) -> Self {
        Self {
            band,
            callback,
            targets: Vec::new(),
            connected: true,
        }
    }

    #[cfg(test)]
    pub fn observed(&self) -> usize {
        self.targets.len()
    }

    /// Recompute band membership and report the anchors whose state changed.
    pub fn update_viewport(&mut self, geometry: ViewportGeometry) {
        if !self.connected || geometry.content_height <= 0.0 || geometry.viewport_height <= 0.0 {
            return;
        }
        let viewport_top = geometry.viewport_top();
        let mut entries = Vec::new();
        for target in &mut self.targets {
            let top = target.anchor.top * geometry.content_height;
            let bottom = target.anchor.bottom * geometry.content_height;
            let inside = self
                .band
                .intersects(top, bottom, viewport_top, geometry.viewport_height);
            if target.inside != Some(inside) {
                target.inside = Some(inside);
                entries.push(IntersectionEntry {
                    target_id: target.anchor.id.clone(),
                    is_intersecting: inside,
                });
            }
        }
        if !entries.is_empty() {
            tracing::trace!(changed = entries.len(), viewport_top, "Trigger band crossings");
            (self.callback)(&entries);
        }
    }
}

impl ViewportObserver for ScrollBandObserver {
    type Anchor = SectionAnchor;

    fn observe(&mut self, anchor: SectionAnchor) {
        if !self.connected {
            return;
        }
        self.targets.push(ObservedAnchor {
            anchor,
            inside: None,
        });
    }

    fn disconnect(&mut self) {
        self.connected = false;
        self.targets.clear();
    }
}
