//! Bounding unions of geometric objects.

use crate::rect::Rect;

/// A trait for computing the smallest axis-aligned rectangle
/// containing two geometric objects.
pub trait BoundingUnion<T: ?Sized> {
    /// The type of the resulting bounding union.
    type Output;

    /// Computes the bounding union of `self` and `other`.
    fn bounding_union(&self, other: &T) -> Self::Output;
}

impl BoundingUnion<Option<Rect>> for Option<Rect> {
    type Output = Option<Rect>;
    fn bounding_union(&self, other: &Option<Rect>) -> Self::Output {
        match (self, other) {
            (Some(a), Some(b)) => Some(a.union(*b)),
            (Some(a), None) => Some(*a),
            (None, b) => *b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_bounding_union_works() {
        let a = Some(Rect::from_sides(0, 0, 10, 10));
        let b = Some(Rect::from_sides(-5, 5, 5, 25));
        assert_eq!(
            a.bounding_union(&b),
            Some(Rect::from_sides(-5, 0, 10, 25))
        );
        assert_eq!(a.bounding_union(&None), a);
        assert_eq!(None.bounding_union(&b), b);
        let empty: Option<Rect> = None;
        assert_eq!(empty.bounding_union(&None), None);
    }
}
