//! A prelude re-exporting the most commonly used items.

pub use crate::align::{AlignBbox, AlignBboxMut, AlignMode, AlignRectMut};
pub use crate::bbox::Bbox;
pub use crate::dir::Dir;
pub use crate::fillet::round_corners;
pub use crate::point::Point;
pub use crate::polygon::Polygon;
pub use crate::rect::Rect;
pub use crate::shape::Shape;
pub use crate::side::Side;
pub use crate::transform::{
    Orientation, Rotation, Transform, TransformMut, Transformation, Translate, TranslateMut,
};
pub use crate::union::BoundingUnion;
