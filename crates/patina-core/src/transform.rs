use kurbo::{Point, Rect, Vec2};

use crate::consts::{REST_ZOOM, ZOOM_EPSILON};
use crate::frame::Transform;

/// Where a zoom change is anchored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Focus {
    /// Scale about the container center; the offset is left alone.
    Center,
    /// Keep the content point at this displacement from the container
    /// center (untransformed container pixels) fixed on screen.
    Anchor(Vec2),
}

/// Outcome of one zoom update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomChange {
    pub old: f64,
    pub new: f64,
}

impl ZoomChange {
    pub fn changed(&self) -> bool {
        self.old != self.new
    }

    pub fn decreased(&self) -> bool {
        self.new < self.old
    }

    /// The update left the view at rest.
    pub fn at_rest(&self) -> bool {
        self.new == REST_ZOOM
    }
}

/// Authoritative zoom factor and pan offset.
#[derive(Clone, Debug)]
pub struct TransformEngine {
    zoom: f64,
    offset: Vec2,
    max_zoom: f64,
}

impl TransformEngine {
    pub fn new(max_zoom: f64) -> Self {
        Self {
            zoom: REST_ZOOM,
            offset: Vec2::ZERO,
            max_zoom: max_zoom.max(REST_ZOOM),
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn is_at_rest(&self) -> bool {
        self.zoom == REST_ZOOM
    }

    pub fn apply_zoom_delta(&mut self, delta: f64, focus: Focus) -> ZoomChange {
        if !delta.is_finite() {
            return self.unchanged();
        }
        self.set_zoom(self.zoom + delta, focus)
    }

    /// Set an absolute zoom level, clamped to `[1, max_zoom]`.
    ///
    /// Reaching rest zeroes the offset regardless of `focus`.
    pub fn set_zoom(&mut self, target: f64, focus: Focus) -> ZoomChange {
        if !target.is_finite() {
            return self.unchanged();
        }
        let old = self.zoom;
        let mut new = target.clamp(REST_ZOOM, self.max_zoom);
        if new - REST_ZOOM < ZOOM_EPSILON {
            new = REST_ZOOM;
        }

        if let Focus::Anchor(anchor) = focus {
            self.offset -= anchor * (new - old);
        }
        self.zoom = new;
        if new == REST_ZOOM {
            self.offset = Vec2::ZERO;
        }

        ZoomChange { old, new }
    }

    /// Set the offset to `base + delta`. Panning at rest is a no-op.
    pub fn apply_pan_delta(&mut self, base: Vec2, delta: Vec2) -> bool {
        if self.is_at_rest() {
            self.offset = Vec2::ZERO;
            return false;
        }
        self.offset = base + delta;
        true
    }

    pub fn reset(&mut self) {
        self.zoom = REST_ZOOM;
        self.offset = Vec2::ZERO;
    }

    /// Displacement of the content point under `screen` from the container
    /// center, in untransformed container pixels. `screen` is clamped to the
    /// container first.
    pub fn anchor_for(&self, screen: Point, container: Rect) -> Vec2 {
        let bounds = container.abs();
        let screen = Point::new(
            screen.x.max(bounds.x0).min(bounds.x1),
            screen.y.max(bounds.y0).min(bounds.y1),
        );
        (screen - container.center() - self.offset) / self.zoom
    }

    pub fn transform(&self, container: Rect) -> Transform {
        Transform {
            zoom: self.zoom,
            offset: self.offset,
            origin: container.center(),
        }
    }

    fn unchanged(&self) -> ZoomChange {
        ZoomChange {
            old: self.zoom,
            new: self.zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_round_trips_through_transform() {
        let container = Rect::new(0.0, 0.0, 400.0, 300.0);
        let mut engine = TransformEngine::new(10.0);
        engine.set_zoom(2.0, Focus::Center);
        engine.apply_pan_delta(Vec2::ZERO, Vec2::new(30.0, -10.0));

        let pointer = Point::new(310.0, 90.0);
        let anchor = engine.anchor_for(pointer, container);
        let content = container.center() + anchor;
        let on_screen = engine.transform(container).to_affine() * content;
        assert!((on_screen - pointer).hypot() < 1e-9);
    }

    #[test]
    fn anchor_is_clamped_to_container() {
        let engine = TransformEngine::new(10.0);
        let container = Rect::new(0.0, 0.0, 400.0, 300.0);
        let anchor = engine.anchor_for(Point::new(-50.0, 1.0e9), container);
        assert_eq!(anchor, Vec2::new(-200.0, 150.0));

        let empty = Rect::new(50.0, 50.0, 50.0, 50.0);
        assert_eq!(engine.anchor_for(Point::new(1.0e6, -1.0e6), empty), Vec2::ZERO);
    }

    #[test]
    fn near_rest_snaps_to_rest() {
        let mut engine = TransformEngine::new(10.0);
        engine.set_zoom(2.0, Focus::Center);
        let change = engine.set_zoom(1.0 + 1e-12, Focus::Anchor(Vec2::new(5.0, 5.0)));
        assert!(change.at_rest());
        assert_eq!(engine.offset(), Vec2::ZERO);
    }
}
