//! 2-D Manhattan geometry on an integer database-unit (DBU) grid.
//!
//! All coordinates are `i64` multiples of one DBU. Transformations are
//! restricted to translations, 90-degree rotations, and reflections, so
//! transformed geometry stays on grid and bounding boxes remain exact.
//!
//! # Examples
//!
//! ```
//! # use geometry::prelude::*;
//! let rect = Rect::from_sides(0, 0, 100, 200);
//! assert_eq!(rect.center(), Point::new(50, 100));
//! ```
#![warn(missing_docs)]

pub mod align;
pub mod bbox;
pub mod dir;
pub mod fillet;
pub mod point;
pub mod polygon;
pub mod prelude;
pub mod rect;
pub mod shape;
pub mod side;
pub mod transform;
pub mod union;

/// Wraps an angle in degrees to the interval `[0, 360)`.
///
/// # Examples
///
/// ```
/// assert_eq!(geometry::wrap_angle(-90.), 270.);
/// assert_eq!(geometry::wrap_angle(405.), 45.);
/// assert_eq!(geometry::wrap_angle(360.), 0.);
/// ```
pub fn wrap_angle(angle: f64) -> f64 {
    ((angle % 360.) + 360.) % 360.
}
