//! Integer-coordinate polygons.

use num_rational::Ratio;
use serde::{Deserialize, Serialize};

use crate::bbox::Bbox;
use crate::point::Point;
use crate::rect::Rect;
use crate::transform::{TransformMut, Transformation, TranslateMut};

/// A closed polygon, given by its vertices in order.
///
/// The closing edge from the last vertex back to the first is implicit.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon with the given vertices.
    pub fn from_verts(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// The vertices of the polygon, in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the polygon has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The signed area of the polygon via the shoelace formula.
    ///
    /// Positive for counterclockwise vertex order, negative for clockwise.
    /// Exact: the result is an integer or half-integer ratio.
    pub fn signed_area(&self) -> Ratio<i64> {
        let n = self.points.len();
        let mut twice_area = 0i64;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            twice_area += p.x * q.y - q.x * p.y;
        }
        Ratio::new(twice_area, 2)
    }

    /// The enclosed (unsigned) area of the polygon.
    pub fn area(&self) -> Ratio<i64> {
        let a = self.signed_area();
        if a < Ratio::from_integer(0) {
            -a
        } else {
            a
        }
    }

    /// Returns `true` if the vertices are in counterclockwise order.
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > Ratio::from_integer(0)
    }

    /// Returns `true` if the polygon is simple: no two non-adjacent edges
    /// intersect or touch.
    ///
    /// Runs in quadratic time in the number of edges.
    pub fn is_simple(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        for i in 0..n {
            for j in (i + 1)..n {
                // Adjacent edges share a vertex by construction; skip them.
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                let (a, b) = (self.points[i], self.points[(i + 1) % n]);
                let (c, d) = (self.points[j], self.points[(j + 1) % n]);
                if segments_intersect(a, b, c, d) {
                    return false;
                }
            }
        }
        true
    }

    /// The centroid of the vertex set, rounded down to the nearest DBU.
    pub fn center(&self) -> Point {
        let n = self.points.len() as i64;
        let x = self.points.iter().map(|p| p.x).sum::<i64>() / n;
        let y = self.points.iter().map(|p| p.y).sum::<i64>() / n;
        Point::new(x, y)
    }
}

/// Twice the signed area of the triangle `(a, b, c)`.
fn cross(a: Point, b: Point, c: Point) -> i64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Returns `true` if `p` lies on the closed segment `(a, b)`,
/// assuming `a`, `b`, and `p` are collinear.
fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Returns `true` if closed segments `(a, b)` and `(c, d)` share any point.
fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let d1 = cross(c, d, a).signum();
    let d2 = cross(c, d, b).signum();
    let d3 = cross(a, b, c).signum();
    let d4 = cross(a, b, d).signum();
    if d1 != d2 && d3 != d4 && d1 * d2 != 0 && d3 * d4 != 0 {
        return true;
    }
    (d1 == 0 && on_segment(c, d, a))
        || (d2 == 0 && on_segment(c, d, b))
        || (d3 == 0 && on_segment(a, b, c))
        || (d4 == 0 && on_segment(a, b, d))
}

impl Bbox for Polygon {
    fn bbox(&self) -> Option<Rect> {
        let mut iter = self.points.iter();
        let first = iter.next()?;
        let mut ll = *first;
        let mut ur = *first;
        for p in iter {
            ll.x = ll.x.min(p.x);
            ll.y = ll.y.min(p.y);
            ur.x = ur.x.max(p.x);
            ur.y = ur.y.max(p.y);
        }
        Some(Rect::new(ll, ur))
    }
}

impl TranslateMut for Polygon {
    fn translate_mut(&mut self, p: Point) {
        self.points.translate_mut(p);
    }
}

impl TransformMut for Polygon {
    fn transform_mut(&mut self, trans: Transformation) {
        self.points.transform_mut(trans);
    }
}

impl From<Rect> for Polygon {
    /// Converts a rectangle into its four corner vertices, counterclockwise.
    fn from(value: Rect) -> Self {
        Self::from_verts(vec![
            value.lower_left(),
            Point::new(value.right(), value.bot()),
            value.upper_right(),
            Point::new(value.left(), value.top()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: i64) -> Polygon {
        Polygon::from(Rect::from_sides(0, 0, size, size))
    }

    #[test]
    fn area_of_square_is_exact() {
        assert_eq!(square(40).area(), Ratio::from_integer(1600));
        assert!(square(40).is_ccw());
    }

    #[test]
    fn clockwise_polygon_has_negative_signed_area() {
        let p = Polygon::from_verts(vec![
            Point::new(0, 0),
            Point::new(0, 10),
            Point::new(10, 10),
            Point::new(10, 0),
        ]);
        assert_eq!(p.signed_area(), Ratio::from_integer(-100));
        assert_eq!(p.area(), Ratio::from_integer(100));
        assert!(!p.is_ccw());
    }

    #[test]
    fn simple_polygon_is_detected() {
        assert!(square(10).is_simple());
    }

    #[test]
    fn self_intersecting_polygon_is_detected() {
        // A bowtie.
        let p = Polygon::from_verts(vec![
            Point::new(0, 0),
            Point::new(10, 10),
            Point::new(10, 0),
            Point::new(0, 10),
        ]);
        assert!(!p.is_simple());
    }

    #[test]
    fn polygon_bbox_is_tight() {
        let p = Polygon::from_verts(vec![
            Point::new(-10, 25),
            Point::new(0, 16),
            Point::new(40, -20),
        ]);
        assert_eq!(p.bbox(), Some(Rect::from_sides(-10, -20, 40, 25)));
    }
}
