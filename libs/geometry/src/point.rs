//! 2-D points on the DBU grid.

use serde::{Deserialize, Serialize};

use crate::dir::Dir;
use crate::transform::{TransformMut, Transformation, TranslateMut};

/// A point in two-dimensional space, in database units.
#[derive(
    Debug, Copy, Clone, Default, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
)]
pub struct Point {
    /// The x-coordinate of the point.
    pub x: i64,
    /// The y-coordinate of the point.
    pub y: i64,
}

impl Point {
    /// Creates a new [`Point`] from (x, y) coordinates.
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the origin, `(0, 0)`.
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Gets the coordinate associated with direction `dir`.
    pub const fn coord(&self, dir: Dir) -> i64 {
        match dir {
            Dir::Horiz => self.x,
            Dir::Vert => self.y,
        }
    }

    /// Returns a point with the coordinate along `dir` replaced by `value`.
    pub const fn with_coord(&self, dir: Dir, value: i64) -> Self {
        match dir {
            Dir::Horiz => Self::new(value, self.y),
            Dir::Vert => Self::new(self.x, value),
        }
    }
}

impl std::ops::Add<Point> for Point {
    type Output = Self;
    fn add(self, rhs: Point) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign<Point> for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub<Point> for Point {
    type Output = Self;
    fn sub(self, rhs: Point) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::SubAssign<Point> for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl std::ops::Neg for Point {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl std::ops::Mul<i64> for Point {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(i64, i64)> for Point {
    fn from(value: (i64, i64)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl TranslateMut for Point {
    fn translate_mut(&mut self, p: Point) {
        *self += p;
    }
}

impl TransformMut for Point {
    fn transform_mut(&mut self, trans: Transformation) {
        *self = trans.apply(*self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Translate;

    #[test]
    fn point_arithmetic_works() {
        let p = Point::new(3, -5);
        assert_eq!(p + Point::new(1, 1), Point::new(4, -4));
        assert_eq!(p - Point::new(3, -5), Point::zero());
        assert_eq!(-p, Point::new(-3, 5));
        assert_eq!(p * 2, Point::new(6, -10));
    }

    #[test]
    fn point_coords_follow_dir() {
        let p = Point::new(7, 9);
        assert_eq!(p.coord(Dir::Horiz), 7);
        assert_eq!(p.coord(Dir::Vert), 9);
        assert_eq!(p.with_coord(Dir::Vert, 0), Point::new(7, 0));
    }

    #[test]
    fn point_translation_works() {
        let p = Point::new(1, 2).translate(Point::new(10, 20));
        assert_eq!(p, Point::new(11, 22));
    }
}
