//! Directional shapes: straight lines and arrows.

use super::{Drag, MIN_SIDE, Polyline};
use kurbo::Point;

/// Longest arrow head, in world units.
const MAX_HEAD_LENGTH: f64 = 20.0;
/// Half-angle between the shaft and each head segment.
const HEAD_HALF_ANGLE: f64 = std::f64::consts::PI / 6.0;

pub(super) fn line(drag: Drag) -> Vec<Polyline> {
    if drag.length() < MIN_SIDE {
        return Vec::new();
    }
    vec![vec![drag.start, drag.end]]
}

/// Shaft plus a two-segment chevron at the end point.
///
/// The head is capped at a third of the shaft so short drags keep proportions.
pub(super) fn arrow(drag: Drag) -> Vec<Polyline> {
    let length = drag.length();
    if length < MIN_SIDE {
        return Vec::new();
    }
    let head = MAX_HEAD_LENGTH.min(length / 3.0);
    let angle = (drag.end.y - drag.start.y).atan2(drag.end.x - drag.start.x);
    let wing = |theta: f64| {
        Point::new(
            drag.end.x - head * theta.cos(),
            drag.end.y - head * theta.sin(),
        )
    };
    vec![
        vec![drag.start, drag.end],
        vec![
            wing(angle - HEAD_HALF_ANGLE),
            drag.end,
            wing(angle + HEAD_HALF_ANGLE),
        ],
    ]
}
