//! Ports: named, oriented connection anchors.

use arcstr::ArcStr;
use geometry::point::Point;
use geometry::rect::Rect;
use geometry::side::Side;
use geometry::transform::{Orientation, Rotation, Transformation};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Element};
use crate::error::{Error, Result};

/// A compass direction, in 45-degree steps counterclockwise from east.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compass {
    /// East (+x).
    E,
    /// Northeast.
    Ne,
    /// North (+y).
    N,
    /// Northwest.
    Nw,
    /// West (-x).
    W,
    /// Southwest.
    Sw,
    /// South (-y).
    S,
    /// Southeast.
    Se,
}

impl Compass {
    const ALL: [Compass; 8] = [
        Compass::E,
        Compass::Ne,
        Compass::N,
        Compass::Nw,
        Compass::W,
        Compass::Sw,
        Compass::S,
        Compass::Se,
    ];

    const fn index(&self) -> u8 {
        match self {
            Compass::E => 0,
            Compass::Ne => 1,
            Compass::N => 2,
            Compass::Nw => 3,
            Compass::W => 4,
            Compass::Sw => 5,
            Compass::S => 6,
            Compass::Se => 7,
        }
    }

    /// The direction angle, in degrees counterclockwise from east.
    pub const fn degrees(&self) -> i64 {
        45 * self.index() as i64
    }

    /// Rotates this direction counterclockwise.
    pub const fn rotate(self, angle: Rotation) -> Self {
        Self::ALL[((self.index() + 2 * angle.quarter_turns()) % 8) as usize]
    }

    /// Reflects this direction about the x-axis.
    pub const fn reflect_vert(self) -> Self {
        Self::ALL[((8 - self.index()) % 8) as usize]
    }

    /// The opposite direction.
    pub const fn flip(self) -> Self {
        self.rotate(Rotation::R180)
    }

    /// The unit vector of this direction, if it is cardinal.
    pub const fn cardinal_vector(&self) -> Option<Point> {
        match self {
            Compass::E => Some(Point::new(1, 0)),
            Compass::N => Some(Point::new(0, 1)),
            Compass::W => Some(Point::new(-1, 0)),
            Compass::S => Some(Point::new(0, -1)),
            _ => None,
        }
    }

    /// The direction pointing outward through the given bounding-box side.
    pub const fn from_side(side: Side) -> Self {
        match side {
            Side::Left => Compass::W,
            Side::Bot => Compass::S,
            Side::Right => Compass::E,
            Side::Top => Compass::N,
        }
    }
}

/// The direction a route may depart from a port.
///
/// Manhattan assemblies use compass directions; the `Angle` form carries
/// orientations from non-Manhattan sources and cannot be routed directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PortOrientation {
    /// One of the 8 compass directions.
    Compass(Compass),
    /// An arbitrary angle, in degrees counterclockwise from east.
    Angle(f64),
}

impl PortOrientation {
    /// Applies a Manhattan orientation (reflection, then rotation).
    pub fn orient(self, o: Orientation) -> Self {
        match self {
            Self::Compass(c) => {
                let c = if o.reflect_vert { c.reflect_vert() } else { c };
                Self::Compass(c.rotate(o.angle))
            }
            Self::Angle(a) => {
                let a = if o.reflect_vert { -a } else { a };
                Self::Angle(geometry::wrap_angle(a + o.angle.degrees() as f64))
            }
        }
    }

    /// The opposite orientation.
    pub fn flip(self) -> Self {
        self.orient(Orientation::from_reflect_and_angle(false, Rotation::R180))
    }

    /// The unit vector of this orientation, if it is a cardinal direction.
    pub fn cardinal_vector(&self) -> Option<Point> {
        match self {
            Self::Compass(c) => c.cardinal_vector(),
            Self::Angle(_) => None,
        }
    }
}

impl From<Compass> for PortOrientation {
    fn from(value: Compass) -> Self {
        Self::Compass(value)
    }
}

/// A named connection anchor on a cell.
///
/// A port never outlives the cell that owns it; copying a port into a parent
/// cell applies the owning instance's transform first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port<L> {
    position: Point,
    orientation: PortOrientation,
    width: i64,
    layer: L,
}

impl<L> Port<L> {
    /// Creates a new port.
    pub fn new(
        position: Point,
        orientation: impl Into<PortOrientation>,
        width: i64,
        layer: L,
    ) -> Self {
        Self {
            position,
            orientation: orientation.into(),
            width,
            layer,
        }
    }

    /// The position of the port.
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// The direction a route departs from this port.
    #[inline]
    pub fn orientation(&self) -> PortOrientation {
        self.orientation
    }

    /// The connection width, in DBU.
    #[inline]
    pub fn width(&self) -> i64 {
        self.width
    }

    /// The layer this port connects on.
    #[inline]
    pub fn layer(&self) -> &L {
        &self.layer
    }
}

impl<L: Clone> Port<L> {
    /// This port as seen through `trans`.
    pub fn transformed(&self, trans: Transformation) -> Self {
        Self {
            position: trans.apply(self.position),
            orientation: self.orientation.orient(trans.orientation()),
            width: self.width,
            layer: self.layer.clone(),
        }
    }
}

/// How [`ports_from_labels`] decides a derived port's orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOrientation {
    /// Use the given orientation for every derived port.
    Explicit(Compass),
    /// Infer the orientation from the bounding-box edge nearest the label.
    NearestEdge,
}

/// Derives ports from the text labels of a leaf cell.
///
/// Every label on `layer` becomes a port named after its text, positioned at
/// the label origin, `width` wide, on the same layer. With
/// [`LabelOrientation::NearestEdge`], the port faces outward through the
/// bounding-box edge it sits nearest.
///
/// Labels with duplicate text produce [`Error::PortNameCollision`]; a cell
/// without geometry produces [`Error::EmptyCell`].
pub fn ports_from_labels<L: Clone + PartialEq>(
    cell: &Cell<L>,
    width: i64,
    layer: L,
    policy: LabelOrientation,
) -> Result<IndexMap<ArcStr, Port<L>>> {
    let bbox = cell
        .elements_bbox()
        .ok_or_else(|| Error::EmptyCell(cell.name().clone()))?;
    let mut ports = IndexMap::new();
    for element in cell.elements() {
        let Element::Text(text) = element else {
            continue;
        };
        if *text.layer() != layer {
            continue;
        }
        let orientation = match policy {
            LabelOrientation::Explicit(compass) => compass,
            LabelOrientation::NearestEdge => Compass::from_side(nearest_side(bbox, text.origin())),
        };
        let port = Port::new(text.origin(), orientation, width, layer.clone());
        if ports.insert(text.text().clone(), port).is_some() {
            return Err(Error::PortNameCollision(text.text().clone()));
        }
    }
    Ok(ports)
}

/// The side of `rect` closest to `p`.
fn nearest_side(rect: Rect, p: Point) -> Side {
    Side::all()
        .into_iter()
        .min_by_key(|side| {
            let coord = p.coord(side.coord_dir());
            (coord - rect.side(*side)).abs()
        })
        .unwrap()
}

/// A row of the port listing produced by
/// [`LibraryBuilder::list_ports`](crate::library::LibraryBuilder::list_ports).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortSummary<L> {
    /// The port name.
    pub name: ArcStr,
    /// The port position, in DBU.
    pub position: Point,
    /// The departure orientation.
    pub orientation: PortOrientation,
    /// The connection width, in DBU.
    pub width: i64,
    /// The connection layer.
    pub layer: L,
}

impl<L: std::fmt::Debug> std::fmt::Display for PortSummary<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: ({}, {}) {:?} w={} layer={:?}",
            self.name, self.position.x, self.position.y, self.orientation, self.width, self.layer
        )
    }
}
