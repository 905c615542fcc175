//! The sides of an axis-aligned rectangle.

use serde::{Deserialize, Serialize};

use crate::dir::Dir;

/// An enumeration of the sides of an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum Side {
    /// The side at the minimum x-coordinate.
    Left,
    /// The side at the minimum y-coordinate.
    Bot,
    /// The side at the maximum x-coordinate.
    Right,
    /// The side at the maximum y-coordinate.
    Top,
}

impl Side {
    /// The direction along which this side's coordinate varies.
    ///
    /// Left and right sides are positioned along the horizontal axis,
    /// top and bottom sides along the vertical axis.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// assert_eq!(Side::Left.coord_dir(), Dir::Horiz);
    /// assert_eq!(Side::Top.coord_dir(), Dir::Vert);
    /// ```
    pub const fn coord_dir(&self) -> Dir {
        match self {
            Self::Left | Self::Right => Dir::Horiz,
            Self::Bot | Self::Top => Dir::Vert,
        }
    }

    /// The side opposite this one.
    pub const fn other(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Bot => Self::Top,
            Self::Top => Self::Bot,
        }
    }

    /// Returns `true` if this side sits at the maximum coordinate of its axis.
    pub const fn is_positive(&self) -> bool {
        matches!(self, Self::Right | Self::Top)
    }

    /// All four sides, in `Left, Bot, Right, Top` order.
    pub const fn all() -> [Side; 4] {
        [Self::Left, Self::Bot, Self::Right, Self::Top]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_properties() {
        assert_eq!(Side::Left.other(), Side::Right);
        assert_eq!(Side::Top.other(), Side::Bot);
        assert!(Side::Right.is_positive());
        assert!(!Side::Bot.is_positive());
        assert_eq!(Side::Bot.coord_dir(), Dir::Vert);
    }
}
