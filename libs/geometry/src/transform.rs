//! Manhattan transformations and the traits for applying them.

use impl_trait_for_tuples::impl_for_tuples;
use serde::{Deserialize, Serialize};

use crate::point::Point;

/// A Manhattan rotation: 0, 90, 180, or 270 degrees counterclockwise.
#[derive(Debug, Clone, Copy, Default, Eq, Ord, PartialOrd, PartialEq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// 0 degrees; no rotation.
    #[default]
    R0,
    /// 90 degrees counterclockwise.
    R90,
    /// 180 degrees counterclockwise.
    R180,
    /// 270 degrees counterclockwise.
    R270,
}

impl Rotation {
    const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    /// The number of 90-degree counterclockwise steps in this rotation.
    pub const fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        }
    }

    /// The rotation consisting of `turns` 90-degree counterclockwise steps.
    pub const fn from_quarter_turns(turns: u8) -> Self {
        Self::ALL[(turns % 4) as usize]
    }

    /// The angle of this rotation, in degrees.
    pub const fn degrees(&self) -> i64 {
        90 * self.quarter_turns() as i64
    }

    /// The matrix entries `(cos, sin)` of this rotation.
    const fn cos_sin(&self) -> (i8, i8) {
        match self {
            Rotation::R0 => (1, 0),
            Rotation::R90 => (0, 1),
            Rotation::R180 => (-1, 0),
            Rotation::R270 => (0, -1),
        }
    }
}

impl std::ops::Add<Rotation> for Rotation {
    type Output = Rotation;
    fn add(self, rhs: Rotation) -> Self::Output {
        Self::from_quarter_turns(self.quarter_turns() + rhs.quarter_turns())
    }
}

impl std::ops::Sub<Rotation> for Rotation {
    type Output = Rotation;
    fn sub(self, rhs: Rotation) -> Self::Output {
        Self::from_quarter_turns(4 + self.quarter_turns() - rhs.quarter_turns())
    }
}

impl std::ops::Neg for Rotation {
    type Output = Rotation;
    fn neg(self) -> Self::Output {
        Rotation::R0 - self
    }
}

/// A rotation and/or vertical reflection, with no translation component.
///
/// The reflection, if any, is applied before the rotation.
#[derive(
    Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
pub struct Orientation {
    /// Reflect about the x-axis (i.e. negate y), before rotating.
    pub reflect_vert: bool,
    /// Counterclockwise rotation, applied after any reflection.
    pub angle: Rotation,
}

impl Orientation {
    /// The identity orientation.
    pub const fn identity() -> Self {
        Self {
            reflect_vert: false,
            angle: Rotation::R0,
        }
    }

    /// Creates an orientation from its reflection and rotation components.
    pub const fn from_reflect_and_angle(reflect_vert: bool, angle: Rotation) -> Self {
        Self {
            reflect_vert,
            angle,
        }
    }

    /// Composes orientation `o` on top of `self`.
    ///
    /// The result orients an object the way it would look after being
    /// oriented by `self` and then by `o`.
    pub fn apply(self, o: Orientation) -> Self {
        if o.reflect_vert {
            Self {
                reflect_vert: !self.reflect_vert,
                angle: o.angle - self.angle,
            }
        } else {
            Self {
                reflect_vert: self.reflect_vert,
                angle: self.angle + o.angle,
            }
        }
    }

    /// This orientation composed with a 180-degree rotation.
    pub fn r180(self) -> Self {
        self.apply(Orientation {
            reflect_vert: false,
            angle: Rotation::R180,
        })
    }

    /// All 8 rectangular orientations.
    pub fn all_rectangular() -> [Self; 8] {
        let mut out = [Self::identity(); 8];
        for (i, item) in out.iter_mut().enumerate() {
            *item = Self {
                reflect_vert: i >= 4,
                angle: Rotation::from_quarter_turns(i as u8 % 4),
            };
        }
        out
    }
}

impl From<Rotation> for Orientation {
    fn from(value: Rotation) -> Self {
        Self {
            reflect_vert: false,
            angle: value,
        }
    }
}

/// A transformation representing a Manhattan translation, rotation, and/or
/// reflection of geometry.
///
/// The matrix is always unitary: geometry is never scaled, so integer
/// coordinates map exactly to integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transformation {
    /// The unitary transformation matrix, applied first.
    mat: [[i8; 2]; 2],
    /// The x-y translation, applied after the matrix.
    b: Point,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    /// The identity transform, leaving any transformed object unmodified.
    pub const fn identity() -> Self {
        Self {
            mat: [[1, 0], [0, 1]],
            b: Point::zero(),
        }
    }

    /// A translation by `(x, y)`.
    pub const fn translate(x: i64, y: i64) -> Self {
        Self {
            mat: [[1, 0], [0, 1]],
            b: Point::new(x, y),
        }
    }

    /// A rotation by `angle` about the origin.
    pub const fn rotate(angle: Rotation) -> Self {
        let (cos, sin) = angle.cos_sin();
        Self {
            mat: [[cos, -sin], [sin, cos]],
            b: Point::zero(),
        }
    }

    /// A reflection about the x-axis.
    pub const fn reflect_vert() -> Self {
        Self {
            mat: [[1, 0], [0, -1]],
            b: Point::zero(),
        }
    }

    /// Creates a transform that applies only the given translation.
    pub const fn from_offset(offset: Point) -> Self {
        Self::translate(offset.x, offset.y)
    }

    /// Creates a transform from an offset and an [`Orientation`].
    pub fn from_offset_and_orientation(offset: Point, orientation: impl Into<Orientation>) -> Self {
        let o = orientation.into();
        let mut mat = Self::rotate(o.angle).mat;
        if o.reflect_vert {
            // Negate the second column: reflection happens before rotation.
            mat[0][1] = -mat[0][1];
            mat[1][1] = -mat[1][1];
        }
        Self { mat, b: offset }
    }

    /// Maps a point through this transformation.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.mat[0][0] as i64 * p.x + self.mat[0][1] as i64 * p.y + self.b.x,
            self.mat[1][0] as i64 * p.x + self.mat[1][1] as i64 * p.y + self.b.y,
        )
    }

    /// Creates a new [`Transformation`] that is the cascade of `parent` and `child`.
    ///
    /// "Parent" and "child" refer to layout-instance hierarchies: applying the
    /// cascade maps a point from the child's local coordinates all the way to
    /// the parent's coordinate system. This operation is not commutative.
    pub fn cascade(parent: Transformation, child: Transformation) -> Transformation {
        let b = parent.apply(child.b);
        let mut mat = [[0i8; 2]; 2];
        for (i, row) in mat.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = parent.mat[i][0] * child.mat[0][j] + parent.mat[i][1] * child.mat[1][j];
            }
        }
        Self { mat, b }
    }

    /// The point representing the translation of this transformation.
    pub const fn offset_point(&self) -> Point {
        self.b
    }

    /// The [`Orientation`] encoded by this transformation.
    pub fn orientation(&self) -> Orientation {
        let det = self.mat[0][0] * self.mat[1][1] - self.mat[0][1] * self.mat[1][0];
        let angle = match (self.mat[0][0], self.mat[1][0]) {
            (1, 0) => Rotation::R0,
            (0, 1) => Rotation::R90,
            (-1, 0) => Rotation::R180,
            (0, -1) => Rotation::R270,
            _ => panic!("transformation does not represent a valid Manhattan transformation"),
        };
        Orientation {
            reflect_vert: det < 0,
            angle,
        }
    }

    /// Returns the inverse of this transformation.
    pub fn inv(&self) -> Transformation {
        // Unitary matrices are orthogonal: the inverse is the transpose.
        let mat = [
            [self.mat[0][0], self.mat[1][0]],
            [self.mat[0][1], self.mat[1][1]],
        ];
        let inv = Self {
            mat,
            b: Point::zero(),
        };
        let b = -inv.apply(self.b);
        Self { mat, b }
    }
}

impl<T: Into<Orientation>> From<T> for Transformation {
    fn from(value: T) -> Self {
        Self::from_offset_and_orientation(Point::zero(), value)
    }
}

/// A trait for specifying how a shape is translated by a [`Point`].
#[impl_for_tuples(32)]
pub trait TranslateMut {
    /// Translates the shape by a [`Point`] through mutation.
    fn translate_mut(&mut self, p: Point);
}

impl<T: TranslateMut> TranslateMut for Vec<T> {
    fn translate_mut(&mut self, p: Point) {
        for i in self.iter_mut() {
            i.translate_mut(p);
        }
    }
}

impl<T: TranslateMut> TranslateMut for Option<T> {
    fn translate_mut(&mut self, p: Point) {
        if let Some(inner) = self.as_mut() {
            inner.translate_mut(p);
        }
    }
}

/// A trait for specifying how a shape is translated by a [`Point`].
///
/// Takes in an owned copy of the shape and returns the translated version.
pub trait Translate: TranslateMut + Sized {
    /// Creates a new shape at a location equal to the translation of the original.
    fn translate(mut self, p: Point) -> Self {
        self.translate_mut(p);
        self
    }
}

impl<T: TranslateMut + Sized> Translate for T {}

/// A trait for specifying how an object is changed by a [`Transformation`].
#[impl_for_tuples(32)]
pub trait TransformMut {
    /// Applies matrix-vector [`Transformation`] `trans`.
    fn transform_mut(&mut self, trans: Transformation);
}

impl<T: TransformMut> TransformMut for Vec<T> {
    fn transform_mut(&mut self, trans: Transformation) {
        for i in self.iter_mut() {
            i.transform_mut(trans);
        }
    }
}

impl<T: TransformMut> TransformMut for Option<T> {
    fn transform_mut(&mut self, trans: Transformation) {
        if let Some(inner) = self.as_mut() {
            inner.transform_mut(trans);
        }
    }
}

/// A trait for specifying how an object is changed by a [`Transformation`].
///
/// Takes in an owned copy of the shape and returns the transformed version.
pub trait Transform: TransformMut + Sized {
    /// Creates a new shape at a location equal to the transformation of the original.
    #[inline]
    fn transform(mut self, trans: Transformation) -> Self {
        self.transform_mut(trans);
        self
    }
}

impl<T: TransformMut + Sized> Transform for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Rect;

    #[test]
    fn rotation_arithmetic_wraps() {
        assert_eq!(Rotation::R270 + Rotation::R180, Rotation::R90);
        assert_eq!(Rotation::R90 - Rotation::R270, Rotation::R180);
        assert_eq!(-Rotation::R90, Rotation::R270);
        assert_eq!(Rotation::R180.degrees(), 180);
    }

    #[test]
    fn cascade_with_identity_preserves_transformation() {
        for orientation in Orientation::all_rectangular() {
            let tf = Transformation::from_offset_and_orientation(Point::new(520, 130), orientation);
            assert_eq!(Transformation::cascade(tf, Transformation::identity()), tf);
            assert_eq!(Transformation::cascade(Transformation::identity(), tf), tf);
        }
    }

    #[test]
    fn orientation_roundtrips_through_transformation() {
        for orientation in Orientation::all_rectangular() {
            let tf = Transformation::from_offset_and_orientation(Point::new(-3, 11), orientation);
            assert_eq!(tf.orientation(), orientation);
            assert_eq!(tf.offset_point(), Point::new(-3, 11));
        }
    }

    #[test]
    fn inverse_undoes_transformation() {
        let p = Point::new(37, -90);
        for orientation in Orientation::all_rectangular() {
            let tf = Transformation::from_offset_and_orientation(Point::new(85, 22), orientation);
            assert_eq!(tf.inv().apply(tf.apply(p)), p);
            assert_eq!(
                Transformation::cascade(tf.inv(), tf),
                Transformation::identity()
            );
        }
    }

    #[test]
    fn point_transformations_work() {
        let p = Point::new(2, 1);
        assert_eq!(
            Transformation::from_offset_and_orientation(
                Point::zero(),
                Orientation::from_reflect_and_angle(true, Rotation::R0)
            )
            .apply(p),
            Point::new(2, -1)
        );
        assert_eq!(
            Transformation::from_offset_and_orientation(Point::new(23, 11), Rotation::R90).apply(p),
            Point::new(22, 13)
        );
        assert_eq!(
            Transformation::from_offset_and_orientation(Point::new(-50, 10), Rotation::R180)
                .apply(p),
            Point::new(-52, 9)
        );
    }

    #[test]
    fn orientation_apply_matches_matrix_composition() {
        for a in Orientation::all_rectangular() {
            for b in Orientation::all_rectangular() {
                let composed = Transformation::cascade(
                    Transformation::from_offset_and_orientation(Point::zero(), b),
                    Transformation::from_offset_and_orientation(Point::zero(), a),
                );
                assert_eq!(
                    a.apply(b),
                    composed.orientation(),
                    "composing {a:?} then {b:?}"
                );
            }
        }
    }

    #[test]
    fn transform_works_for_vecs() {
        let mut v = vec![
            Rect::from_sides(0, 0, 100, 200),
            Rect::from_sides(50, -50, 150, 0),
        ];
        v.transform_mut(Transformation::rotate(Rotation::R90));
        assert_eq!(
            v,
            vec![
                Rect::from_sides(-200, 0, 0, 100),
                Rect::from_sides(0, 50, 50, 150)
            ]
        );
    }
}
