//! View transform for pan/zoom.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_ZOOM: f64 = 0.2;
pub const DEFAULT_MAX_ZOOM: f64 = 5.0;

/// Affine map from world space to device space: `device = world * scale + offset`.
///
/// Device coordinates are logical (density-independent) pixels; the renderer applies
/// the surface's pixel ratio on top. Not part of undo history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Current zoom level (1.0 = 100%).
    pub scale: f64,
    /// Translation in device pixels.
    pub offset: Vec2,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
    }
}

impl ViewTransform {
    /// Identity transform with the given zoom limits.
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            min_zoom,
            max_zoom,
        }
    }

    /// World → device transform for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Convert a device point to world coordinates.
    pub fn to_world(&self, device: Point) -> Point {
        Point::new(
            (device.x - self.offset.x) / self.scale,
            (device.y - self.offset.y) / self.scale,
        )
    }

    /// Convert a world point to device coordinates.
    pub fn to_device(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset.x,
            world.y * self.scale + self.offset.y,
        )
    }

    /// Convert a device-space length to world units.
    pub fn to_world_length(&self, length: f64) -> f64 {
        length / self.scale
    }

    /// Pan by a delta in device pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_zoom, self.max_zoom)
    }

    /// Set the zoom level, keeping the world point under `focal` fixed.
    ///
    /// The requested scale is clamped first so zooming against a limit never drifts
    /// the focal point.
    pub fn zoom_at(&mut self, focal: Point, new_scale: f64) {
        let new_scale = self.clamp_scale(new_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }
        let ratio = new_scale / self.scale;
        self.offset = Vec2::new(
            focal.x - (focal.x - self.offset.x) * ratio,
            focal.y - (focal.y - self.offset.y) * ratio,
        );
        self.scale = new_scale;
    }

    /// Multiply the zoom level by `factor` around `focal`.
    pub fn zoom_by(&mut self, focal: Point, factor: f64) {
        self.zoom_at(focal, self.scale * factor);
    }

    /// Back to 100% with no pan.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transform_is_identity() {
        let view = ViewTransform::default();
        let p = Point::new(100.0, 200.0);
        assert_eq!(view.to_world(p), p);
        assert_eq!(view.to_device(p), p);
    }

    #[test]
    fn test_to_world_with_offset_and_scale() {
        let mut view = ViewTransform::default();
        view.offset = Vec2::new(50.0, 100.0);
        view.scale = 2.0;
        let world = view.to_world(Point::new(150.0, 300.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut view = ViewTransform::default();
        view.offset = Vec2::new(30.0, -20.0);
        view.scale = 1.5;

        let original = Point::new(123.0, 456.0);
        let back = view.to_device(view.to_world(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);

        let affine = view.transform() * Point::new(10.0, 10.0);
        let direct = view.to_device(Point::new(10.0, 10.0));
        assert!((affine.x - direct.x).abs() < 1e-10);
        assert!((affine.y - direct.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_keeps_focal_world_point() {
        let mut view = ViewTransform::default();
        view.offset = Vec2::new(-40.0, 25.0);
        view.scale = 0.8;

        for (focal, target) in [
            (Point::new(300.0, 200.0), 2.5),
            (Point::new(-10.0, 900.0), 0.3),
            (Point::new(0.0, 0.0), 5.0),
        ] {
            let before = view.to_world(focal);
            view.zoom_at(focal, target);
            let after = view.to_world(focal);
            assert!((before.x - after.x).abs() < 1e-9);
            assert!((before.y - after.y).abs() < 1e-9);
            assert!((view.scale - target).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zoom_clamp_does_not_drift() {
        let mut view = ViewTransform::default();
        let focal = Point::new(200.0, 100.0);
        let before = view.to_world(focal);

        view.zoom_at(focal, 1000.0);
        assert!((view.scale - DEFAULT_MAX_ZOOM).abs() < f64::EPSILON);
        let after = view.to_world(focal);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);

        view.zoom_by(focal, 0.0001);
        assert!((view.scale - DEFAULT_MIN_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut view = ViewTransform::default();
        view.pan(Vec2::new(10.0, 20.0));
        assert!((view.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((view.offset.y - 20.0).abs() < f64::EPSILON);
        view.reset();
        assert_eq!(view.offset, Vec2::ZERO);
    }
}
