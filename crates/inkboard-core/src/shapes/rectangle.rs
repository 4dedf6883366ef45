//! Rectilinear and skewed quadrilateral outlines.

use super::{Drag, MIN_SIDE, Polyline, closed};
use kurbo::Point;

/// Horizontal skew of parallelograms and trapezoids, as a fraction of the half-width.
const SKEW_RATIO: f64 = 0.25;

fn too_small(drag: Drag) -> bool {
    drag.width() < MIN_SIDE || drag.height() < MIN_SIDE
}

/// Rectangle anchored at the drag start, walking start → end.x → end → end.y.
pub(super) fn rectangle(drag: Drag) -> Vec<Polyline> {
    if too_small(drag) {
        return Vec::new();
    }
    let Drag { start, end } = drag;
    vec![closed(vec![
        start,
        Point::new(end.x, start.y),
        end,
        Point::new(start.x, end.y),
    ])]
}

/// Square anchored at the drag start. Both axes take the larger magnitude and keep
/// the drag's own sign, so any of the four diagonal directions works.
pub(super) fn square(drag: Drag) -> Vec<Polyline> {
    let dx = drag.end.x - drag.start.x;
    let dy = drag.end.y - drag.start.y;
    let side = dx.abs().max(dy.abs());
    if side < MIN_SIDE {
        return Vec::new();
    }
    let end = Point::new(
        drag.start.x + side * dx.signum(),
        drag.start.y + side * dy.signum(),
    );
    rectangle(Drag {
        start: drag.start,
        end,
    })
}

/// Right triangle with the right angle at the bottom-left of the drag rectangle.
pub(super) fn right_triangle(drag: Drag) -> Vec<Polyline> {
    if too_small(drag) {
        return Vec::new();
    }
    let (x0, y0, x1, y1) = (drag.x0(), drag.y0(), drag.x1(), drag.y1());
    vec![closed(vec![
        Point::new(x0, y0),
        Point::new(x0, y1),
        Point::new(x1, y1),
    ])]
}

/// Diamond touching the midpoint of each side of the drag rectangle.
pub(super) fn rhombus(drag: Drag) -> Vec<Polyline> {
    if too_small(drag) {
        return Vec::new();
    }
    let c = drag.center();
    vec![closed(vec![
        Point::new(c.x, drag.y0()),
        Point::new(drag.x1(), c.y),
        Point::new(c.x, drag.y1()),
        Point::new(drag.x0(), c.y),
    ])]
}

/// Parallelogram leaning right: the top edge is pushed right, the bottom edge left.
pub(super) fn parallelogram(drag: Drag) -> Vec<Polyline> {
    if too_small(drag) {
        return Vec::new();
    }
    let skew = SKEW_RATIO * drag.rx();
    let (x0, y0, x1, y1) = (drag.x0(), drag.y0(), drag.x1(), drag.y1());
    vec![closed(vec![
        Point::new(x0 + skew, y0),
        Point::new(x1, y0),
        Point::new(x1 - skew, y1),
        Point::new(x0, y1),
    ])]
}

/// Trapezoid whose top edge is inset on both ends.
pub(super) fn trapezoid(drag: Drag) -> Vec<Polyline> {
    if too_small(drag) {
        return Vec::new();
    }
    let skew = SKEW_RATIO * drag.rx();
    let (x0, y0, x1, y1) = (drag.x0(), drag.y0(), drag.x1(), drag.y1());
    vec![closed(vec![
        Point::new(x0 + skew, y0),
        Point::new(x1 - skew, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ])]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(sx: f64, sy: f64, ex: f64, ey: f64) -> Drag {
        Drag {
            start: Point::new(sx, sy),
            end: Point::new(ex, ey),
        }
    }

    #[test]
    fn test_square_keeps_drag_direction() {
        let up_left = square(drag(100.0, 100.0, 40.0, 70.0));
        let pts = &up_left[0];
        assert_eq!(pts[0], Point::new(100.0, 100.0));
        assert_eq!(pts[2], Point::new(40.0, 40.0));

        let down_right = square(drag(0.0, 0.0, 30.0, 10.0));
        assert_eq!(down_right[0][2], Point::new(30.0, 30.0));
    }

    #[test]
    fn test_square_from_flat_drag() {
        // A purely horizontal drag still yields a square.
        let s = square(drag(0.0, 0.0, 20.0, 0.0));
        assert_eq!(s[0][2], Point::new(20.0, 20.0));
        assert!(square(drag(0.0, 0.0, 1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_rectangle_rejects_flat_drag() {
        assert!(rectangle(drag(0.0, 0.0, 100.0, 1.0)).is_empty());
    }

    #[test]
    fn test_parallelogram_skew() {
        let p = parallelogram(drag(0.0, 0.0, 80.0, 40.0));
        // half-width 40, skew 10
        assert_eq!(p[0][0], Point::new(10.0, 0.0));
        assert_eq!(p[0][2], Point::new(70.0, 40.0));
    }

    #[test]
    fn test_trapezoid_top_inset() {
        let t = trapezoid(drag(80.0, 40.0, 0.0, 0.0));
        assert_eq!(t[0][0], Point::new(10.0, 0.0));
        assert_eq!(t[0][1], Point::new(70.0, 0.0));
        assert_eq!(t[0][2], Point::new(80.0, 40.0));
    }

    #[test]
    fn test_rhombus_vertices() {
        let r = rhombus(drag(0.0, 0.0, 40.0, 20.0));
        assert_eq!(
            r[0],
            vec![
                Point::new(20.0, 0.0),
                Point::new(40.0, 10.0),
                Point::new(20.0, 20.0),
                Point::new(0.0, 10.0),
                Point::new(20.0, 0.0),
            ]
        );
    }
}
