//! Point-to-point Manhattan routing between ports.
//!
//! A route is computed in three stages: validate the port pair, compute a
//! rectilinear waypoint path, then emit the path as rectangles into a fresh
//! cell instanced in the parent. Validation and path computation touch
//! nothing, so a failed route leaves the library exactly as it was.

use geometry::point::Point;
use geometry::rect::Rect;

use crate::cell::{Cell, Instance, Shape};
use crate::error::{Error, IncompatiblePorts, Result};
use crate::library::{CellId, InstanceId, LibraryBuilder};
use crate::port::Port;

/// The layer and width of the wire a route is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection<L> {
    layer: L,
    width: i64,
}

impl<L> CrossSection<L> {
    /// Creates a cross-section, validating that the width is positive.
    pub fn new(layer: L, width: i64) -> Result<Self> {
        if width <= 0 {
            return Err(Error::InvalidWidth(width));
        }
        Ok(Self { layer, width })
    }

    /// The layer the wire is drawn on.
    #[inline]
    pub fn layer(&self) -> &L {
        &self.layer
    }

    /// The wire width, in DBU.
    #[inline]
    pub fn width(&self) -> i64 {
        self.width
    }
}

/// Routes between two ports of the cell `parent`, in its coordinates.
///
/// The ports must share a layer and have cardinal orientations. The router
/// connects them with the simplest path their orientations admit: straight,
/// a single L bend, a Z with a jog at the midpoint, or a U turning past both
/// ports by one wire width. Anything else fails with
/// [`Error::IncompatiblePorts`].
///
/// The wire is emitted as a new cell named `route` (uniquified) and
/// instanced into `parent`; the returned ID identifies that instance. The
/// wire covers both port positions exactly.
pub fn route<L: Clone + PartialEq>(
    lib: &mut LibraryBuilder<L>,
    parent: CellId,
    a: &Port<L>,
    b: &Port<L>,
    xs: &CrossSection<L>,
) -> Result<InstanceId> {
    if a.layer() != b.layer() {
        return Err(IncompatiblePorts::MismatchedLayers.into());
    }
    let mut points = waypoints(a, b, xs.width())?;
    points.dedup();
    lib.cell_mut(parent)?;

    tracing::debug!(
        from = ?a.position(),
        to = ?b.position(),
        bends = points.len().saturating_sub(2),
        "routing"
    );

    let mut cell = Cell::new("route");
    let last = points.len() - 1;
    for i in 0..last {
        let rect = segment_rect(points[i], points[i + 1], xs.width(), i > 0, i < last - 1);
        cell.add_element(Shape::new(xs.layer().clone(), rect));
    }
    let id = lib.add_cell(cell);
    let name = lib.cell(id).name().clone();
    lib.add_instance(parent, Instance::new(id, name))
}

fn dot(p: Point, q: Point) -> i64 {
    p.x * q.x + p.y * q.y
}

/// Computes the rectilinear waypoint path from `a` to `b`.
///
/// The path departs `a` along its orientation and arrives at `b` against
/// `b`'s orientation.
fn waypoints<L>(a: &Port<L>, b: &Port<L>, width: i64) -> Result<Vec<Point>> {
    let da = a
        .orientation()
        .cardinal_vector()
        .ok_or(IncompatiblePorts::NonCardinal)?;
    let db = b
        .orientation()
        .cardinal_vector()
        .ok_or(IncompatiblePorts::NonCardinal)?;
    let (pa, pb) = (a.position(), b.position());
    let d = pb - pa;
    // Decompose the separation along and across a's departure direction.
    let forward = dot(d, da);
    let normal = Point::new(-da.y, da.x);
    let lateral = dot(d, normal);

    if db == -da {
        // Facing ports: straight if collinear, otherwise a Z with the jog
        // halfway along.
        if forward <= 0 {
            return Err(IncompatiblePorts::Unroutable.into());
        }
        if lateral == 0 {
            return Ok(vec![pa, pb]);
        }
        let jog = pa + da * (forward / 2);
        Ok(vec![pa, jog, jog + normal * lateral, pb])
    } else if db == da {
        // Ports pointing the same way: turn past whichever sticks out
        // further, with one wire width of clearance.
        if lateral == 0 {
            return Err(IncompatiblePorts::Unroutable.into());
        }
        let turn = dot(pa, da).max(dot(pb, da)) + width;
        let qa = pa + da * (turn - dot(pa, da));
        let qb = pb + da * (turn - dot(pb, da));
        Ok(vec![pa, qa, qb, pb])
    } else {
        // Perpendicular ports: a single L bend, if the corner is in front
        // of both.
        let corner = pa + da * forward;
        if forward > 0 && dot(corner - pb, db) > 0 {
            Ok(vec![pa, corner, pb])
        } else {
            Err(IncompatiblePorts::Unroutable.into())
        }
    }
}

/// The rectangle covering one axis-aligned segment of a wire.
///
/// Interior ends are extended past the corner by the far half-width, so
/// consecutive segments tile the bend with no notch.
fn segment_rect(u: Point, v: Point, width: i64, extend_start: bool, extend_end: bool) -> Rect {
    let half = width / 2;
    let ext = width - half;
    let lo_is_start = if u.x == v.x { u.y <= v.y } else { u.x <= v.x };
    let (lo, hi) = if lo_is_start {
        (extend_start, extend_end)
    } else {
        (extend_end, extend_start)
    };
    let lo_ext = if lo { ext } else { 0 };
    let hi_ext = if hi { ext } else { 0 };
    if u.x == v.x {
        Rect::from_sides(
            u.x - half,
            u.y.min(v.y) - lo_ext,
            u.x - half + width,
            u.y.max(v.y) + hi_ext,
        )
    } else {
        Rect::from_sides(
            u.x.min(v.x) - lo_ext,
            u.y - half,
            u.x.max(v.x) + hi_ext,
            u.y - half + width,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Compass;
    use crate::units::Units;

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    enum Layer {
        Met1,
        Met2,
    }

    fn parent_lib() -> (LibraryBuilder<Layer>, CellId) {
        let mut lib = LibraryBuilder::new(Units::default());
        let parent = lib.add_cell(Cell::new("pixel"));
        (lib, parent)
    }

    fn flat_rects(lib: &LibraryBuilder<Layer>, cell: CellId, layer: Layer) -> Vec<Rect> {
        lib.flatten(cell)[&layer]
            .iter()
            .map(|s| s.rect().unwrap())
            .collect()
    }

    #[test]
    fn straight_route_spans_port_to_port() {
        let (mut lib, parent) = parent_lib();
        let a = Port::new(Point::new(0, 0), Compass::E, 72, Layer::Met1);
        let b = Port::new(Point::new(400, 0), Compass::W, 72, Layer::Met1);
        let xs = CrossSection::new(Layer::Met1, 72).unwrap();
        route(&mut lib, parent, &a, &b, &xs).unwrap();
        assert_eq!(
            flat_rects(&lib, parent, Layer::Met1),
            vec![Rect::from_sides(0, -36, 400, 36)]
        );
    }

    #[test]
    fn l_route_fills_its_corner() {
        let (mut lib, parent) = parent_lib();
        let a = Port::new(Point::new(0, 0), Compass::E, 72, Layer::Met1);
        let b = Port::new(Point::new(300, 200), Compass::S, 72, Layer::Met1);
        let xs = CrossSection::new(Layer::Met1, 72).unwrap();
        route(&mut lib, parent, &a, &b, &xs).unwrap();
        assert_eq!(
            flat_rects(&lib, parent, Layer::Met1),
            vec![
                Rect::from_sides(0, -36, 336, 36),
                Rect::from_sides(264, -36, 336, 200),
            ]
        );
    }

    #[test]
    fn z_route_jogs_at_the_midpoint() {
        let (mut lib, parent) = parent_lib();
        let a = Port::new(Point::new(0, 0), Compass::E, 20, Layer::Met1);
        let b = Port::new(Point::new(1000, 500), Compass::W, 20, Layer::Met1);
        let xs = CrossSection::new(Layer::Met1, 20).unwrap();
        route(&mut lib, parent, &a, &b, &xs).unwrap();
        let rects = flat_rects(&lib, parent, Layer::Met1);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0], Rect::from_sides(0, -10, 510, 10));
        assert_eq!(rects[1], Rect::from_sides(490, -10, 510, 510));
        assert_eq!(rects[2], Rect::from_sides(490, 490, 1000, 510));
    }

    #[test]
    fn u_route_clears_both_ports_by_a_wire_width() {
        let (mut lib, parent) = parent_lib();
        let a = Port::new(Point::new(0, 0), Compass::N, 20, Layer::Met1);
        let b = Port::new(Point::new(300, 40), Compass::N, 20, Layer::Met1);
        let xs = CrossSection::new(Layer::Met1, 20).unwrap();
        route(&mut lib, parent, &a, &b, &xs).unwrap();
        let rects = flat_rects(&lib, parent, Layer::Met1);
        // Turn at y = max(0, 40) + 20 = 60.
        assert_eq!(rects[0], Rect::from_sides(-10, 0, 10, 70));
        assert_eq!(rects[1], Rect::from_sides(-10, 50, 310, 70));
        assert_eq!(rects[2], Rect::from_sides(290, 40, 310, 70));
    }

    #[test]
    fn mismatched_layers_are_rejected() {
        let (mut lib, parent) = parent_lib();
        let a = Port::new(Point::new(0, 0), Compass::E, 20, Layer::Met1);
        let b = Port::new(Point::new(400, 0), Compass::W, 20, Layer::Met2);
        let xs = CrossSection::new(Layer::Met1, 20).unwrap();
        let err = route(&mut lib, parent, &a, &b, &xs).unwrap_err();
        assert_eq!(
            err,
            Error::IncompatiblePorts(IncompatiblePorts::MismatchedLayers)
        );
    }

    #[test]
    fn non_cardinal_ports_are_rejected() {
        use crate::port::PortOrientation;
        let (mut lib, parent) = parent_lib();
        let a = Port::new(Point::new(0, 0), PortOrientation::Angle(30.0), 20, Layer::Met1);
        let b = Port::new(Point::new(400, 0), Compass::W, 20, Layer::Met1);
        let xs = CrossSection::new(Layer::Met1, 20).unwrap();
        let err = route(&mut lib, parent, &a, &b, &xs).unwrap_err();
        assert_eq!(err, Error::IncompatiblePorts(IncompatiblePorts::NonCardinal));
    }

    #[test]
    fn failed_route_leaves_library_unchanged() {
        let (mut lib, parent) = parent_lib();
        // Back-to-back ports pointing away from each other.
        let a = Port::new(Point::new(0, 0), Compass::W, 20, Layer::Met1);
        let b = Port::new(Point::new(400, 0), Compass::E, 20, Layer::Met1);
        let xs = CrossSection::new(Layer::Met1, 20).unwrap();
        let err = route(&mut lib, parent, &a, &b, &xs).unwrap_err();
        assert_eq!(err, Error::IncompatiblePorts(IncompatiblePorts::Unroutable));
        assert_eq!(lib.cells().count(), 1);
        assert_eq!(lib.cell(parent).instances().count(), 0);
    }

    #[test]
    fn route_cells_get_unique_names() {
        let (mut lib, parent) = parent_lib();
        let xs = CrossSection::new(Layer::Met1, 20).unwrap();
        let a = Port::new(Point::new(0, 0), Compass::E, 20, Layer::Met1);
        let b = Port::new(Point::new(400, 0), Compass::W, 20, Layer::Met1);
        let r0 = route(&mut lib, parent, &a, &b, &xs).unwrap();
        let a2 = Port::new(Point::new(0, 100), Compass::E, 20, Layer::Met1);
        let b2 = Port::new(Point::new(400, 100), Compass::W, 20, Layer::Met1);
        let r1 = route(&mut lib, parent, &a2, &b2, &xs).unwrap();
        let cell = lib.cell(parent);
        assert_eq!(cell.instance(r0).name(), "route");
        assert_eq!(cell.instance(r1).name(), "route_1");
    }

    #[test]
    fn zero_width_cross_sections_are_rejected() {
        assert_eq!(
            CrossSection::new(Layer::Met1, 0).unwrap_err(),
            Error::InvalidWidth(0)
        );
    }
}
