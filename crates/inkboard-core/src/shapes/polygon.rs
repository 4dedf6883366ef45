//! Equilateral triangles, regular polygons and stars.

use super::{Drag, MIN_RADIUS, MIN_SIDE, Polyline, closed};
use kurbo::Point;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Ratio between a star's outer and inner radius.
const STAR_INNER_DIVISOR: f64 = 2.5;
const STAR_POINTS: usize = 5;

/// Equilateral triangle with the drag as one edge.
///
/// The apex sits on the perpendicular bisector at `edge * sqrt(3) / 2`, on the
/// screen-up side when dragging left to right.
pub(super) fn equilateral_triangle(drag: Drag) -> Vec<Polyline> {
    let edge = drag.length();
    if edge < MIN_SIDE {
        return Vec::new();
    }
    let dx = drag.end.x - drag.start.x;
    let dy = drag.end.y - drag.start.y;
    let height = edge * 3f64.sqrt() / 2.0;
    let mid = drag.center();
    let apex = Point::new(mid.x + dy / edge * height, mid.y - dx / edge * height);
    vec![closed(vec![drag.start, drag.end, apex])]
}

/// Regular polygon inscribed in the drag rectangle with its first vertex pointing up.
pub(super) fn regular(drag: Drag, sides: usize) -> Vec<Polyline> {
    let radius = drag.rx().min(drag.ry());
    if radius < MIN_RADIUS || sides < 3 {
        return Vec::new();
    }
    let c = drag.center();
    let points = (0..sides)
        .map(|i| {
            let theta = i as f64 / sides as f64 * TAU - FRAC_PI_2;
            Point::new(c.x + radius * theta.cos(), c.y + radius * theta.sin())
        })
        .collect();
    vec![closed(points)]
}

/// Five-pointed star alternating the outer radius and `outer / 2.5`.
pub(super) fn star(drag: Drag) -> Vec<Polyline> {
    let outer = drag.rx().min(drag.ry());
    if outer < MIN_RADIUS {
        return Vec::new();
    }
    let inner = outer / STAR_INNER_DIVISOR;
    let c = drag.center();
    let vertices = STAR_POINTS * 2;
    let points = (0..vertices)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let theta = i as f64 / vertices as f64 * TAU - FRAC_PI_2;
            Point::new(c.x + r * theta.cos(), c.y + r * theta.sin())
        })
        .collect();
    vec![closed(points)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::distance;

    #[test]
    fn test_triangle_is_equilateral() {
        let t = equilateral_triangle(Drag {
            start: Point::new(0.0, 100.0),
            end: Point::new(60.0, 100.0),
        });
        let p = &t[0];
        assert!((distance(p[0], p[1]) - 60.0).abs() < 1e-9);
        assert!((distance(p[1], p[2]) - 60.0).abs() < 1e-9);
        assert!((distance(p[2], p[0]) - 60.0).abs() < 1e-9);
        // Apex above the edge in screen space.
        assert!(p[2].y < 100.0);
    }

    #[test]
    fn test_regular_polygon_first_vertex_up() {
        let hex = regular(
            Drag {
                start: Point::new(0.0, 0.0),
                end: Point::new(100.0, 100.0),
            },
            6,
        );
        assert_eq!(hex[0].len(), 7);
        assert!((hex[0][0].x - 50.0).abs() < 1e-9);
        assert!((hex[0][0].y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_star_radii_alternate() {
        let s = star(Drag {
            start: Point::new(0.0, 0.0),
            end: Point::new(100.0, 100.0),
        });
        let c = Point::new(50.0, 50.0);
        assert_eq!(s[0].len(), 11);
        assert!((distance(s[0][0], c) - 50.0).abs() < 1e-9);
        assert!((distance(s[0][1], c) - 20.0).abs() < 1e-9);
    }
}
