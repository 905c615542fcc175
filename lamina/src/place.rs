//! Placement: moving, aligning, and orienting instances by bounding box.
//!
//! Every placement resolves to an exact integer delta against the instance's
//! current bounding box, then composes onto the instance transform. Repeating
//! a placement is therefore a no-op, and placements may be chained in any
//! order.

use geometry::align::AlignMode;
use geometry::dir::Dir;
use geometry::point::Point;
use geometry::rect::Rect;
use geometry::side::Side;
use geometry::transform::{Rotation, TransformMut, Transformation, TranslateMut};

use crate::cell::Instance;
use crate::error::{Error, Result};
use crate::library::{CellId, InstanceId, LibraryBuilder};

/// A single placement step for an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Moves the instance so its bounding-box center lands at the point.
    Center(Point),
    /// Moves the instance along one axis so the given bounding-box side
    /// lands at the coordinate. The other axis is untouched.
    Edge(Side, i64),
    /// Moves the instance along one axis so its bounding-box center lands
    /// at the coordinate. The other axis is untouched.
    Axis(Dir, i64),
    /// Aligns the instance's bounding box against a target rectangle.
    Align {
        /// The alignment mode.
        mode: AlignMode,
        /// The rectangle to align against, in the parent's coordinates.
        target: Rect,
        /// An extra offset applied along the alignment axis.
        offset: i64,
    },
    /// Rotates the instance about its bounding-box center.
    ///
    /// The center is snapped down onto the grid first, so geometry with
    /// odd-sized extents may shift by one database unit.
    Rotate(Rotation),
    /// Reflects the instance about the horizontal line through its
    /// bounding-box center.
    ReflectVert,
}

impl Placement {
    /// Applies this placement to an instance that is not yet attached to a
    /// parent cell.
    ///
    /// Fails with [`Error::EmptyCell`] if the instantiated cell has no
    /// geometry to derive a bounding box from.
    pub fn apply<L>(&self, lib: &LibraryBuilder<L>, instance: &mut Instance) -> Result<()> {
        let bbox = lib
            .instance_bbox(instance)
            .ok_or_else(|| Error::EmptyCell(lib.cell(instance.child()).name().clone()))?;
        match *self {
            Self::Center(point) => instance.translate_mut(point - bbox.center()),
            Self::Edge(side, coord) => {
                let delta = coord - bbox.side(side);
                instance.translate_mut(match side.coord_dir() {
                    Dir::Horiz => Point::new(delta, 0),
                    Dir::Vert => Point::new(0, delta),
                });
            }
            Self::Axis(dir, coord) => {
                let delta = coord - bbox.center().coord(dir);
                instance.translate_mut(Point::zero().with_coord(dir, delta));
            }
            Self::Align {
                mode,
                target,
                offset,
            } => instance.translate_mut(mode.offset_of(bbox, target, offset)),
            Self::Rotate(angle) => {
                instance.transform_mut(about(bbox.center(), Transformation::rotate(angle)));
            }
            Self::ReflectVert => {
                instance.transform_mut(about(bbox.center(), Transformation::reflect_vert()));
            }
        }
        Ok(())
    }
}

/// Conjugates `trans` so it acts about `center` instead of the origin.
fn about(center: Point, trans: Transformation) -> Transformation {
    Transformation::cascade(
        Transformation::from_offset(center),
        Transformation::cascade(trans, Transformation::from_offset(-center)),
    )
}

impl Instance {
    /// Moves this instance so its bounding-box center lands at `point`.
    pub fn align_center<L>(&mut self, lib: &LibraryBuilder<L>, point: Point) -> Result<()> {
        Placement::Center(point).apply(lib, self)
    }

    /// Moves this instance so the given bounding-box side lands at `value`.
    pub fn align_edge<L>(&mut self, lib: &LibraryBuilder<L>, side: Side, value: i64) -> Result<()> {
        Placement::Edge(side, value).apply(lib, self)
    }

    /// Moves this instance along `dir` so its bounding-box center coordinate
    /// equals `value`.
    pub fn align_axis<L>(&mut self, lib: &LibraryBuilder<L>, dir: Dir, value: i64) -> Result<()> {
        Placement::Axis(dir, value).apply(lib, self)
    }

    /// Aligns this instance's bounding box against `target`.
    pub fn align_bbox<L>(
        &mut self,
        lib: &LibraryBuilder<L>,
        mode: AlignMode,
        target: Rect,
        offset: i64,
    ) -> Result<()> {
        Placement::Align {
            mode,
            target,
            offset,
        }
        .apply(lib, self)
    }

    /// Rotates this instance about its bounding-box center.
    pub fn rotate_about_center<L>(
        &mut self,
        lib: &LibraryBuilder<L>,
        angle: Rotation,
    ) -> Result<()> {
        Placement::Rotate(angle).apply(lib, self)
    }

    /// Reflects this instance about the horizontal line through its
    /// bounding-box center.
    pub fn reflect_vert_about_center<L>(&mut self, lib: &LibraryBuilder<L>) -> Result<()> {
        Placement::ReflectVert.apply(lib, self)
    }
}

impl<L> LibraryBuilder<L> {
    /// Applies a placement to an instance already attached to `parent`.
    ///
    /// The bounding box is resolved first; on any failure the instance is
    /// left exactly where it was.
    ///
    /// # Panics
    ///
    /// Panics if `parent` or `instance` does not exist.
    pub fn place_instance(
        &mut self,
        parent: CellId,
        instance: InstanceId,
        placement: Placement,
    ) -> Result<()> {
        let mut inst = self.cell(parent).instance(instance).clone();
        placement.apply(self, &mut inst)?;
        let cell = self.cell_mut(parent)?;
        if let Some(slot) = cell.instance_mut(instance) {
            *slot = inst;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, Shape};
    use crate::port::{Compass, Port, PortOrientation};
    use crate::units::Units;

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    enum Layer {
        Nwell,
        Met1,
    }

    fn lib_with_leaf() -> (LibraryBuilder<Layer>, CellId) {
        let mut lib = LibraryBuilder::new(Units::default());
        let mut cell = Cell::new("pd");
        cell.add_element(Shape::new(Layer::Nwell, Rect::from_sides(0, 0, 100, 60)));
        cell.add_port(
            "e1",
            Port::new(Point::new(100, 30), Compass::E, 40, Layer::Met1),
        );
        let id = lib.add_cell(cell);
        (lib, id)
    }

    #[test]
    fn edge_placement_is_exact_after_arbitrary_transforms() {
        let (lib, leaf) = lib_with_leaf();
        let mut inst = Instance::with_transformation(
            leaf,
            "pd0",
            Transformation::from_offset_and_orientation(
                Point::new(-137, 9),
                geometry::transform::Orientation::from_reflect_and_angle(true, Rotation::R90),
            ),
        );
        inst.align_edge(&lib, Side::Right, 500).unwrap();
        let bbox = lib.instance_bbox(&inst).unwrap();
        assert_eq!(bbox.right(), 500);
        // Vertical position untouched by a horizontal edge placement.
        inst.align_edge(&lib, Side::Top, -20).unwrap();
        let bbox = lib.instance_bbox(&inst).unwrap();
        assert_eq!(bbox.right(), 500);
        assert_eq!(bbox.top(), -20);
    }

    #[test]
    fn axis_placement_centers_along_one_axis() {
        let (lib, leaf) = lib_with_leaf();
        let mut inst = Instance::new(leaf, "pd0");
        Placement::Axis(Dir::Vert, 500).apply(&lib, &mut inst).unwrap();
        let bbox = lib.instance_bbox(&inst).unwrap();
        assert_eq!(bbox.center().y, 500);
        assert_eq!(bbox.left(), 0);
    }

    #[test]
    fn placements_are_idempotent() {
        let (lib, leaf) = lib_with_leaf();
        let mut inst = Instance::new(leaf, "pd0");
        Placement::Center(Point::new(1000, 1000))
            .apply(&lib, &mut inst)
            .unwrap();
        let once = inst.transformation();
        Placement::Center(Point::new(1000, 1000))
            .apply(&lib, &mut inst)
            .unwrap();
        assert_eq!(inst.transformation(), once);
    }

    #[test]
    fn align_places_next_to_target() {
        let (mut lib, leaf) = lib_with_leaf();
        let parent = lib.add_cell(Cell::new("pixel"));
        let inst = lib.add_instance(parent, Instance::new(leaf, "pd0")).unwrap();
        let target = Rect::from_sides(0, 0, 1000, 1000);
        lib.place_instance(
            parent,
            inst,
            Placement::Align {
                mode: AlignMode::ToTheRight,
                target,
                offset: 80,
            },
        )
        .unwrap();
        let bbox = lib
            .instance_bbox(lib.cell(parent).instance(inst))
            .unwrap();
        assert_eq!(bbox.left(), 1080);
    }

    #[test]
    fn rotation_about_center_preserves_bbox_and_flips_ports() {
        let (lib, leaf) = lib_with_leaf();
        let mut inst = Instance::new(leaf, "pd0");
        let before = lib.instance_bbox(&inst).unwrap();
        inst.rotate_about_center(&lib, Rotation::R180).unwrap();
        assert_eq!(lib.instance_bbox(&inst).unwrap(), before);
        let port = lib.instance_port(&inst, "e1").unwrap();
        assert_eq!(port.orientation(), PortOrientation::Compass(Compass::W));
        assert_eq!(port.position(), Point::new(0, 30));
    }

    #[test]
    fn placement_failure_leaves_instance_unmoved() {
        let mut lib = LibraryBuilder::<Layer>::new(Units::default());
        let empty = lib.add_cell(Cell::new("empty"));
        let parent = lib.add_cell(Cell::new("pixel"));
        let inst = lib
            .add_instance(parent, Instance::new(empty, "e0"))
            .unwrap();
        let err = lib
            .place_instance(parent, inst, Placement::Center(Point::zero()))
            .unwrap_err();
        assert_eq!(err, Error::EmptyCell("empty".into()));
        assert_eq!(
            lib.cell(parent).instance(inst).transformation(),
            Transformation::identity()
        );
    }
}
