//! Compound 3-D impressions built from several independent strokes.

use super::ellipse::ellipse_points;
use super::{Drag, MIN_SOLID, Polyline, closed};
use kurbo::Point;

/// Depth offset of cuboids and pyramids relative to the smaller drag side.
const DEPTH_RATIO: f64 = 0.25;
/// Vertical radius of cylinder and cone caps relative to the drag height.
const CAP_RATIO: f64 = 0.12;
/// Flattening of a sphere's cross-ellipses relative to its radius.
const SPHERE_CROSS_RATIO: f64 = 0.3;

fn too_small(drag: Drag) -> bool {
    drag.width().min(drag.height()) < MIN_SOLID
}

/// Front face, back face and the four edges joining them.
pub(super) fn cuboid(drag: Drag) -> Vec<Polyline> {
    if too_small(drag) {
        return Vec::new();
    }
    let d = drag.width().min(drag.height()) * DEPTH_RATIO;
    let (x0, y0, x1, y1) = (drag.x0(), drag.y0(), drag.x1(), drag.y1());

    let front = [
        Point::new(x0, y0 + d),
        Point::new(x1 - d, y0 + d),
        Point::new(x1 - d, y1),
        Point::new(x0, y1),
    ];
    let back = [
        Point::new(x0 + d, y0),
        Point::new(x1, y0),
        Point::new(x1, y1 - d),
        Point::new(x0 + d, y1 - d),
    ];

    let mut strokes = vec![closed(front.to_vec()), closed(back.to_vec())];
    strokes.extend(front.iter().zip(back.iter()).map(|(f, b)| vec![*f, *b]));
    strokes
}

/// Square base seen in perspective with four edges rising to the apex.
pub(super) fn pyramid(drag: Drag) -> Vec<Polyline> {
    if too_small(drag) {
        return Vec::new();
    }
    let d = drag.width().min(drag.height()) * DEPTH_RATIO;
    let (x0, y0, x1, y1) = (drag.x0(), drag.y0(), drag.x1(), drag.y1());
    let apex = Point::new(drag.center().x, y0);

    let base = [
        Point::new(x0, y1),
        Point::new(x1 - d, y1),
        Point::new(x1, y1 - d),
        Point::new(x0 + d, y1 - d),
    ];

    let mut strokes = vec![closed(base.to_vec())];
    strokes.extend(base.iter().map(|corner| vec![apex, *corner]));
    strokes
}

/// Top and bottom caps joined by the two silhouette edges.
pub(super) fn cylinder(drag: Drag) -> Vec<Polyline> {
    if too_small(drag) {
        return Vec::new();
    }
    let rx = drag.rx();
    let cap = drag.height() * CAP_RATIO;
    let (x0, y0, x1, y1) = (drag.x0(), drag.y0(), drag.x1(), drag.y1());
    let cx = drag.center().x;
    let top_y = y0 + cap;
    let bottom_y = y1 - cap;

    vec![
        ellipse_points(Point::new(cx, top_y), rx, cap),
        ellipse_points(Point::new(cx, bottom_y), rx, cap),
        vec![Point::new(x0, top_y), Point::new(x0, bottom_y)],
        vec![Point::new(x1, top_y), Point::new(x1, bottom_y)],
    ]
}

/// Outline circle plus a flattened equator and meridian to suggest volume.
pub(super) fn sphere(drag: Drag) -> Vec<Polyline> {
    if too_small(drag) {
        return Vec::new();
    }
    let r = drag.rx().min(drag.ry());
    let c = drag.center();
    vec![
        ellipse_points(c, r, r),
        ellipse_points(c, r, r * SPHERE_CROSS_RATIO),
        ellipse_points(c, r * SPHERE_CROSS_RATIO, r),
    ]
}

/// Elliptical base with two edges meeting at the apex.
pub(super) fn cone(drag: Drag) -> Vec<Polyline> {
    if too_small(drag) {
        return Vec::new();
    }
    let rx = drag.rx();
    let cap = drag.height() * CAP_RATIO;
    let (x0, y0, x1, y1) = (drag.x0(), drag.y0(), drag.x1(), drag.y1());
    let cx = drag.center().x;
    let base_y = y1 - cap;
    let apex = Point::new(cx, y0);

    vec![
        ellipse_points(Point::new(cx, base_y), rx, cap),
        vec![apex, Point::new(x0, base_y)],
        vec![apex, Point::new(x1, base_y)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag() -> Drag {
        Drag {
            start: Point::new(0.0, 0.0),
            end: Point::new(100.0, 80.0),
        }
    }

    #[test]
    fn test_stroke_counts() {
        assert_eq!(cuboid(drag()).len(), 6);
        assert_eq!(pyramid(drag()).len(), 5);
        assert_eq!(cylinder(drag()).len(), 4);
        assert_eq!(sphere(drag()).len(), 3);
        assert_eq!(cone(drag()).len(), 3);
    }

    #[test]
    fn test_cuboid_edges_join_faces() {
        let c = cuboid(drag());
        // d = 80 * 0.25 = 20
        assert_eq!(c[2], vec![Point::new(0.0, 20.0), Point::new(20.0, 0.0)]);
        assert_eq!(c[0][0], c[2][0]);
        assert_eq!(c[1][0], c[2][1]);
    }

    #[test]
    fn test_thin_solids_are_rejected() {
        let thin = Drag {
            start: Point::new(0.0, 0.0),
            end: Point::new(200.0, 4.0),
        };
        assert!(cuboid(thin).is_empty());
        assert!(pyramid(thin).is_empty());
        assert!(cylinder(thin).is_empty());
        assert!(sphere(thin).is_empty());
        assert!(cone(thin).is_empty());
    }
}
