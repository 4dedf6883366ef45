//! Ellipse walks for circles, ovals and the curved parts of solids.

use super::{Drag, MIN_RADIUS, Polyline, closed};
use kurbo::Point;
use std::f64::consts::{PI, TAU};

/// Segment count for an ellipse: grows with the perimeter, never below 32.
pub fn ellipse_steps(rx: f64, ry: f64) -> usize {
    let by_size = (PI * (rx + ry) / 4.0).floor();
    if by_size.is_finite() && by_size > 32.0 {
        by_size as usize
    } else {
        32
    }
}

/// Closed polyline approximating an axis-aligned ellipse.
pub(super) fn ellipse_points(center: Point, rx: f64, ry: f64) -> Polyline {
    let steps = ellipse_steps(rx, ry);
    let points = (0..steps)
        .map(|i| {
            let theta = i as f64 / steps as f64 * TAU;
            Point::new(center.x + rx * theta.cos(), center.y + ry * theta.sin())
        })
        .collect();
    closed(points)
}

/// Circle inscribed in the drag rectangle, centered on it.
pub(super) fn circle(drag: Drag) -> Vec<Polyline> {
    let r = drag.rx().min(drag.ry());
    if r < MIN_RADIUS {
        return Vec::new();
    }
    vec![ellipse_points(drag.center(), r, r)]
}

/// Ellipse filling the drag rectangle.
pub(super) fn oval(drag: Drag) -> Vec<Polyline> {
    let (rx, ry) = (drag.rx(), drag.ry());
    if rx < MIN_RADIUS || ry < MIN_RADIUS {
        return Vec::new();
    }
    vec![ellipse_points(drag.center(), rx, ry)]
}
