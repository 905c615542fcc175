//! Traits for aligning geometric objects.

use serde::{Deserialize, Serialize};

use crate::bbox::Bbox;
use crate::point::Point;
use crate::rect::Rect;
use crate::transform::TranslateMut;

/// An enumeration of possible alignment modes between two geometric shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignMode {
    /// Align the left sides of the two shapes.
    Left,
    /// Align the right sides of the two shapes.
    Right,
    /// Align the bottom sides of the two shapes.
    Bottom,
    /// Align the top sides of the two shapes.
    Top,
    /// Align the centers of the two shapes horizontally.
    CenterHorizontal,
    /// Align the centers of the two shapes vertically.
    CenterVertical,
    /// Place the left side of one shape at the right side of the other.
    ToTheRight,
    /// Place the right side of one shape at the left side of the other.
    ToTheLeft,
    /// Place the top side of one shape beneath the bottom side of the other.
    Beneath,
    /// Place the bottom side of one shape above the top side of the other.
    Above,
}

impl AlignMode {
    /// The translation that aligns `srect` with `orect` under this mode,
    /// offset by `offset` along the alignment axis.
    ///
    /// Center alignments round the translation down to the nearest DBU.
    pub fn offset_of(&self, srect: Rect, orect: Rect, offset: i64) -> Point {
        match self {
            AlignMode::Left => Point::new(orect.left() - srect.left() + offset, 0),
            AlignMode::Right => Point::new(orect.right() - srect.right() + offset, 0),
            AlignMode::Bottom => Point::new(0, orect.bot() - srect.bot() + offset),
            AlignMode::Top => Point::new(0, orect.top() - srect.top() + offset),
            AlignMode::ToTheRight => Point::new(orect.right() - srect.left() + offset, 0),
            AlignMode::ToTheLeft => Point::new(orect.left() - srect.right() + offset, 0),
            AlignMode::CenterHorizontal => Point::new(
                (orect.left() + orect.right() - srect.left() - srect.right()) / 2 + offset,
                0,
            ),
            AlignMode::CenterVertical => Point::new(
                0,
                (orect.bot() + orect.top() - srect.bot() - srect.top()) / 2 + offset,
            ),
            AlignMode::Beneath => Point::new(0, orect.bot() - srect.top() + offset),
            AlignMode::Above => Point::new(0, orect.top() - srect.bot() + offset),
        }
    }
}

/// A geometric shape that can be aligned using the relationship between two [`Rect`]s.
pub trait AlignRectMut: TranslateMut {
    /// Aligns `self` based on the relationship between `srect` and `orect`.
    ///
    /// `offset` shifts the result in the positive direction along the
    /// alignment axis.
    fn align_mut(&mut self, mode: AlignMode, srect: Rect, orect: Rect, offset: i64) {
        self.translate_mut(mode.offset_of(srect, orect, offset));
    }
}

impl<T: TranslateMut> AlignRectMut for T {}

/// A geometric shape that can be aligned with another shape using their
/// bounding boxes.
pub trait AlignBboxMut: AlignRectMut + Bbox {
    /// Aligns `self` using its bounding box and the bounding box of `other`.
    fn align_bbox_mut(&mut self, mode: AlignMode, other: impl Bbox, offset: i64) {
        self.align_mut(mode, self.bbox_rect(), other.bbox_rect(), offset);
    }
}

impl<T: AlignRectMut + Bbox> AlignBboxMut for T {}

/// [`AlignBboxMut`], taking and returning an owned shape.
pub trait AlignBbox: AlignBboxMut + Sized {
    /// Aligns `self` using its bounding box and the bounding box of `other`.
    fn align_bbox(mut self, mode: AlignMode, other: impl Bbox, offset: i64) -> Self {
        self.align_bbox_mut(mode, other, offset);
        self
    }
}

impl<T: AlignBboxMut + Sized> AlignBbox for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_alignment_modes_work() {
        let other = Rect::from_sides(500, 600, 700, 700);
        let base = Rect::from_sides(0, 0, 100, 200);

        let r = base.align_bbox(AlignMode::Left, other, 0);
        assert_eq!(r, Rect::from_sides(500, 0, 600, 200));

        let r = base.align_bbox(AlignMode::Top, other, 0);
        assert_eq!(r, Rect::from_sides(0, 500, 100, 700));

        let r = base.align_bbox(AlignMode::ToTheRight, other, 40);
        assert_eq!(r.left(), 740);

        let r = base.align_bbox(AlignMode::Beneath, other, 0);
        assert_eq!(r.top(), 600);

        let r = base.align_bbox(AlignMode::CenterHorizontal, other, 0);
        assert_eq!(r.center().x, other.center().x);
    }
}
