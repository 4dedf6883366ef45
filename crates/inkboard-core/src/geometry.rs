//! Geometry kernel: stateless primitives over world-space points and bounds.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world space, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Normalize two opposite corners into a rectangle with non-negative size.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty iterator.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in iter {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(Self::new(x0, y0, x1 - x0, y1 - y0))
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grow the bounds by `amount` on all four sides.
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    pub fn translate(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    pub fn union(&self, other: &Bounds) -> Self {
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Bounds::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Midpoint of two points.
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Whether two bounds overlap. Rectangles that merely touch along an edge overlap;
/// only a strict gap on either axis separates them.
pub fn bounds_intersect(b1: &Bounds, b2: &Bounds) -> bool {
    !(b2.x > b1.right() || b2.right() < b1.x || b2.y > b1.bottom() || b2.bottom() < b1.y)
}

/// Whether a point lies inside the bounds, edges included.
pub fn point_in_bounds(point: Point, bounds: &Bounds) -> bool {
    point.x >= bounds.x
        && point.x <= bounds.right()
        && point.y >= bounds.y
        && point.y <= bounds.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((distance(a, b) - 5.0).abs() < f64::EPSILON);
        assert_eq!(midpoint(a, b), Point::new(1.5, 2.0));
    }

    #[test]
    fn test_from_corners_normalizes() {
        let b = Bounds::from_corners(Point::new(50.0, 80.0), Point::new(10.0, 20.0));
        assert_eq!(b, Bounds::new(10.0, 20.0, 40.0, 60.0));
    }

    #[test]
    fn test_point_in_bounds_is_inclusive() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(point_in_bounds(Point::new(0.0, 0.0), &b));
        assert!(point_in_bounds(Point::new(10.0, 10.0), &b));
        assert!(point_in_bounds(Point::new(5.0, 10.0), &b));
        assert!(!point_in_bounds(Point::new(10.01, 5.0), &b));
        assert!(!point_in_bounds(Point::new(5.0, -0.01), &b));
    }

    #[test]
    fn test_bounds_intersect() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(bounds_intersect(&a, &Bounds::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges still count as overlapping.
        assert!(bounds_intersect(&a, &Bounds::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!bounds_intersect(&a, &Bounds::new(10.5, 0.0, 5.0, 5.0)));
        assert!(!bounds_intersect(&a, &Bounds::new(0.0, -6.0, 5.0, 5.0)));
    }

    #[test]
    fn test_enclosing() {
        let pts = [Point::new(3.0, 1.0), Point::new(-2.0, 7.0), Point::new(0.0, 0.0)];
        let b = Bounds::enclosing(pts.iter()).unwrap();
        assert_eq!(b, Bounds::new(-2.0, 0.0, 5.0, 7.0));
        assert!(Bounds::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn test_inflate_and_union() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.inflate(2.0), Bounds::new(-2.0, -2.0, 14.0, 14.0));
        let u = a.union(&Bounds::new(20.0, 5.0, 5.0, 20.0));
        assert_eq!(u, Bounds::new(0.0, 0.0, 25.0, 25.0));
    }
}
