//! Parametric shape synthesis.
//!
//! Every shape reduces to one or more polylines so the renderer and hit-tester only
//! ever deal with strokes. Closed shapes repeat their first point at the end.

mod arrow;
mod ellipse;
mod polygon;
mod rectangle;
mod solid;

pub use ellipse::ellipse_steps;

use crate::document::{ItemId, Stroke};
use crate::style::SerializableColor;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Minimum radius for curved shapes and regular polygons.
pub const MIN_RADIUS: f64 = 1.0;
/// Minimum side length for outlines, lines and arrows.
pub const MIN_SIDE: f64 = 2.0;
/// Minimum width and height for the 3-D impressions.
pub const MIN_SOLID: f64 = 5.0;

/// Shape primitives available to the shape tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Arrow,
    #[default]
    Rectangle,
    Square,
    Circle,
    Oval,
    Triangle,
    RightTriangle,
    Pentagon,
    Hexagon,
    Star,
    Rhombus,
    Parallelogram,
    Trapezoid,
    Cuboid,
    Pyramid,
    Cylinder,
    Sphere,
    Cone,
}

impl ShapeKind {
    pub fn all() -> &'static [ShapeKind] {
        &[
            ShapeKind::Line,
            ShapeKind::Arrow,
            ShapeKind::Rectangle,
            ShapeKind::Square,
            ShapeKind::Circle,
            ShapeKind::Oval,
            ShapeKind::Triangle,
            ShapeKind::RightTriangle,
            ShapeKind::Pentagon,
            ShapeKind::Hexagon,
            ShapeKind::Star,
            ShapeKind::Rhombus,
            ShapeKind::Parallelogram,
            ShapeKind::Trapezoid,
            ShapeKind::Cuboid,
            ShapeKind::Pyramid,
            ShapeKind::Cylinder,
            ShapeKind::Sphere,
            ShapeKind::Cone,
        ]
    }

    /// Display name for toolbars.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Line => "Line",
            ShapeKind::Arrow => "Arrow",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Square => "Square",
            ShapeKind::Circle => "Circle",
            ShapeKind::Oval => "Oval",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::RightTriangle => "Right Triangle",
            ShapeKind::Pentagon => "Pentagon",
            ShapeKind::Hexagon => "Hexagon",
            ShapeKind::Star => "Star",
            ShapeKind::Rhombus => "Rhombus",
            ShapeKind::Parallelogram => "Parallelogram",
            ShapeKind::Trapezoid => "Trapezoid",
            ShapeKind::Cuboid => "Cuboid",
            ShapeKind::Pyramid => "Pyramid",
            ShapeKind::Cylinder => "Cylinder",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Cone => "Cone",
        }
    }
}

/// Drag rectangle spanned by the pointer-down point and the current point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Drag {
    pub start: Point,
    pub end: Point,
}

impl Drag {
    pub fn x0(&self) -> f64 {
        self.start.x.min(self.end.x)
    }

    pub fn y0(&self) -> f64 {
        self.start.y.min(self.end.y)
    }

    pub fn x1(&self) -> f64 {
        self.start.x.max(self.end.x)
    }

    pub fn y1(&self) -> f64 {
        self.start.y.max(self.end.y)
    }

    pub fn width(&self) -> f64 {
        (self.end.x - self.start.x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.end.y - self.start.y).abs()
    }

    pub fn center(&self) -> Point {
        crate::geometry::midpoint(self.start, self.end)
    }

    pub fn rx(&self) -> f64 {
        self.width() / 2.0
    }

    pub fn ry(&self) -> f64 {
        self.height() / 2.0
    }

    pub fn length(&self) -> f64 {
        crate::geometry::distance(self.start, self.end)
    }
}

/// A polyline before it is given an identity and a style.
pub(crate) type Polyline = Vec<Point>;

/// Close a polyline by repeating its first point.
pub(crate) fn closed(mut points: Polyline) -> Polyline {
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

/// Synthesize the strokes for a shape dragged from `start` to `end`.
///
/// Pure and deterministic. Stroke `i` of the result gets id `base_id + i`, so one call
/// yields independently erasable strokes that still commit as a single step.
/// Degenerate drags yield an empty list.
pub fn synthesize(
    start: Point,
    end: Point,
    kind: ShapeKind,
    stroke_width: f64,
    color: SerializableColor,
    base_id: ItemId,
) -> Vec<Stroke> {
    let drag = Drag { start, end };
    let polylines = match kind {
        ShapeKind::Line => arrow::line(drag),
        ShapeKind::Arrow => arrow::arrow(drag),
        ShapeKind::Rectangle => rectangle::rectangle(drag),
        ShapeKind::Square => rectangle::square(drag),
        ShapeKind::RightTriangle => rectangle::right_triangle(drag),
        ShapeKind::Rhombus => rectangle::rhombus(drag),
        ShapeKind::Parallelogram => rectangle::parallelogram(drag),
        ShapeKind::Trapezoid => rectangle::trapezoid(drag),
        ShapeKind::Circle => ellipse::circle(drag),
        ShapeKind::Oval => ellipse::oval(drag),
        ShapeKind::Triangle => polygon::equilateral_triangle(drag),
        ShapeKind::Pentagon => polygon::regular(drag, 5),
        ShapeKind::Hexagon => polygon::regular(drag, 6),
        ShapeKind::Star => polygon::star(drag),
        ShapeKind::Cuboid => solid::cuboid(drag),
        ShapeKind::Pyramid => solid::pyramid(drag),
        ShapeKind::Cylinder => solid::cylinder(drag),
        ShapeKind::Sphere => solid::sphere(drag),
        ShapeKind::Cone => solid::cone(drag),
    };

    polylines
        .into_iter()
        .enumerate()
        .map(|(i, points)| Stroke::new(base_id + i as ItemId, points, stroke_width, color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(kind: ShapeKind, start: (f64, f64), end: (f64, f64)) -> Vec<Stroke> {
        synthesize(
            Point::new(start.0, start.1),
            Point::new(end.0, end.1),
            kind,
            5.0,
            SerializableColor::black(),
            100,
        )
    }

    #[test]
    fn test_rectangle_scenario() {
        let strokes = shape(ShapeKind::Rectangle, (0.0, 0.0), (100.0, 50.0));
        assert_eq!(strokes.len(), 1);
        assert_eq!(
            strokes[0].points,
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(0.0, 50.0),
                Point::new(0.0, 0.0),
            ]
        );
        assert!((strokes[0].stroke_width - 5.0).abs() < f64::EPSILON);
        assert_eq!(strokes[0].color, SerializableColor::from_hex("#000000").unwrap());
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        for &kind in ShapeKind::all() {
            let a = shape(kind, (10.0, 20.0), (170.0, 140.0));
            let b = shape(kind, (10.0, 20.0), (170.0, 140.0));
            assert_eq!(a, b, "{kind:?} is not deterministic");
            assert!(!a.is_empty(), "{kind:?} produced nothing for a large drag");
        }
    }

    #[test]
    fn test_every_kind_has_a_degenerate_drag() {
        for &kind in ShapeKind::all() {
            let strokes = shape(kind, (50.0, 50.0), (50.5, 50.5));
            assert!(strokes.is_empty(), "{kind:?} should reject a tiny drag");
        }
    }

    #[test]
    fn test_sub_stroke_ids_are_offsets_of_base() {
        let strokes = shape(ShapeKind::Cuboid, (0.0, 0.0), (100.0, 80.0));
        assert_eq!(strokes.len(), 6);
        for (i, stroke) in strokes.iter().enumerate() {
            assert_eq!(stroke.id, 100 + i as u64);
        }
    }

    #[test]
    fn test_closed_shapes_repeat_first_point() {
        for kind in [
            ShapeKind::Rectangle,
            ShapeKind::Square,
            ShapeKind::Circle,
            ShapeKind::Oval,
            ShapeKind::Triangle,
            ShapeKind::RightTriangle,
            ShapeKind::Pentagon,
            ShapeKind::Hexagon,
            ShapeKind::Star,
            ShapeKind::Rhombus,
            ShapeKind::Parallelogram,
            ShapeKind::Trapezoid,
        ] {
            let strokes = shape(kind, (0.0, 0.0), (120.0, 90.0));
            let points = &strokes[0].points;
            assert_eq!(points.first(), points.last(), "{kind:?} is not closed");
        }
    }
}
