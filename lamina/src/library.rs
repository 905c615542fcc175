//! Libraries: arenas of cells referring to one another by ID.
//!
//! A [`LibraryBuilder`] owns every cell in an assembly. Cells reference each
//! other through [`CellId`]s rather than pointers, which lets the library
//! enforce the two structural rules of the hierarchy: the instance graph is
//! acyclic, and a cell referenced by another cell is read-only.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::Deref;

use arcstr::ArcStr;
use geometry::rect::Rect;
use geometry::transform::{Transform, Transformation};
use geometry::union::BoundingUnion;
use indexmap::IndexMap;

use crate::cell::{Cell, Element, Instance};
use crate::error::{Error, Result};
use crate::id::Id;
use crate::names::Names;
use crate::port::{Port, PortSummary};
use crate::units::Units;

/// Marker type for [`CellId`]s.
#[derive(Debug, Clone, Copy)]
pub struct Cells;

/// An identifier for a cell within one library.
pub type CellId = Id<Cells>;

/// An identifier for an instance within one cell.
pub type InstanceId = Id<Instance>;

/// How ports are renamed when copied from an instance into its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortRename {
    /// Keep the child's port names.
    Keep,
    /// Prepend the given prefix to each port name.
    Prefix(ArcStr),
    /// Append the given suffix to each port name.
    Suffix(ArcStr),
}

impl PortRename {
    fn apply(&self, name: &ArcStr) -> ArcStr {
        match self {
            Self::Keep => name.clone(),
            Self::Prefix(prefix) => arcstr::format!("{prefix}{name}"),
            Self::Suffix(suffix) => arcstr::format!("{name}{suffix}"),
        }
    }
}

/// A library of cells under construction.
#[derive(Debug, Clone)]
pub struct LibraryBuilder<L> {
    cell_id: CellId,
    cells: IndexMap<CellId, Cell<L>>,
    name_map: HashMap<ArcStr, CellId>,
    names: Names<CellId>,
    shared: HashSet<CellId>,
    units: Units,
}

impl<L> LibraryBuilder<L> {
    /// Creates a new, empty library on the given unit grid.
    ///
    /// The grid is fixed for the lifetime of the library.
    pub fn new(units: Units) -> Self {
        Self {
            cell_id: CellId::new(),
            cells: IndexMap::new(),
            name_map: HashMap::new(),
            names: Names::new(),
            shared: HashSet::new(),
            units,
        }
    }

    /// The unit grid of this library.
    #[inline]
    pub fn units(&self) -> Units {
        self.units
    }

    /// Adds a cell to the library, returning its ID.
    ///
    /// If the cell's name is already taken, it is renamed with a numeric
    /// suffix; read the final name back with [`Cell::name`]. Any cells the
    /// new cell instantiates become read-only.
    pub fn add_cell(&mut self, mut cell: Cell<L>) -> CellId {
        let id = self.cell_id.alloc();
        let name = self.names.assign(id, cell.name());
        if &name != cell.name() {
            tracing::debug!("renamed cell `{}` to `{}`", cell.name(), name);
        }
        cell.set_name(name.clone());
        for (_, inst) in cell.instances() {
            self.shared.insert(inst.child());
        }
        self.name_map.insert(name, id);
        self.cells.insert(id, cell);
        id
    }

    /// Gets the cell with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if no cell with the given ID exists.
    pub fn cell(&self, id: CellId) -> &Cell<L> {
        match self.cells.get(&id) {
            Some(cell) => cell,
            None => {
                tracing::error!("no cell with ID {:?} in library", id);
                panic!("no cell with ID {id:?} in library");
            }
        }
    }

    /// Gets the cell with the given ID.
    #[inline]
    pub fn try_cell(&self, id: CellId) -> Option<&Cell<L>> {
        self.cells.get(&id)
    }

    /// Gets the cell with the given name.
    ///
    /// # Panics
    ///
    /// Panics if no cell has the given name.
    pub fn cell_named(&self, name: &str) -> &Cell<L> {
        self.cell(self.cell_id_named(name))
    }

    /// Gets the cell with the given name.
    pub fn try_cell_named(&self, name: &str) -> Option<&Cell<L>> {
        self.try_cell_id_named(name).and_then(|id| self.try_cell(id))
    }

    /// Gets the ID of the cell with the given name.
    ///
    /// # Panics
    ///
    /// Panics if no cell has the given name.
    pub fn cell_id_named(&self, name: &str) -> CellId {
        match self.name_map.get(name) {
            Some(&id) => id,
            None => {
                tracing::error!("no cell named `{}` in library", name);
                panic!("no cell named `{name}` in library");
            }
        }
    }

    /// Gets the ID of the cell with the given name.
    pub fn try_cell_id_named(&self, name: &str) -> Option<CellId> {
        self.name_map.get(name).copied()
    }

    /// Iterates over the `(id, cell)` pairs of this library, in insertion
    /// order.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell<L>)> {
        self.cells.iter().map(|(id, cell)| (*id, cell))
    }

    /// Returns `true` if the given cell is referenced by another cell and
    /// therefore read-only.
    pub fn is_shared(&self, id: CellId) -> bool {
        self.shared.contains(&id)
    }

    pub(crate) fn mark_shared(&mut self, id: CellId) {
        self.shared.insert(id);
    }

    fn ensure_mutable(&self, id: CellId) -> Result<()> {
        if self.is_shared(id) {
            return Err(Error::CellShared(self.cell(id).name().clone()));
        }
        Ok(())
    }

    fn get_mut(&mut self, id: CellId) -> &mut Cell<L> {
        match self.cells.get_mut(&id) {
            Some(cell) => cell,
            None => {
                tracing::error!("no cell with ID {:?} in library", id);
                panic!("no cell with ID {id:?} in library");
            }
        }
    }

    /// Gets a mutable reference to the cell with the given ID.
    ///
    /// Fails with [`Error::CellShared`] if the cell is referenced by another
    /// cell: once shared, a cell renders identically at every site and may
    /// not change.
    ///
    /// # Panics
    ///
    /// Panics if no cell with the given ID exists.
    pub fn cell_mut(&mut self, id: CellId) -> Result<&mut Cell<L>> {
        self.ensure_mutable(id)?;
        Ok(self.get_mut(id))
    }

    /// Returns `true` if some cell reachable from `from` is `target`.
    fn reaches(&self, from: CellId, target: CellId) -> bool {
        if from == target {
            return true;
        }
        let Some(cell) = self.try_cell(from) else {
            return false;
        };
        cell.instances()
            .any(|(_, inst)| self.reaches(inst.child(), target))
    }

    /// Adds an instance to the cell with ID `parent`.
    ///
    /// Fails with [`Error::ReferenceCycle`] if the instance would make
    /// `parent` transitively contain itself, and with [`Error::CellShared`]
    /// if `parent` is already referenced elsewhere. On failure the library
    /// is unchanged. The instantiated cell becomes read-only.
    ///
    /// # Panics
    ///
    /// Panics if `parent` or the instantiated cell does not exist.
    pub fn add_instance(&mut self, parent: CellId, instance: Instance) -> Result<InstanceId> {
        let child = instance.child();
        let child_name = self.cell(child).name().clone();
        if self.reaches(child, parent) {
            return Err(Error::ReferenceCycle {
                parent: self.cell(parent).name().clone(),
                child: child_name,
            });
        }
        self.ensure_mutable(parent)?;
        self.shared.insert(child);
        Ok(self.get_mut(parent).add_instance(instance))
    }

    /// Adds an element to the cell with ID `parent`.
    ///
    /// Fails with [`Error::CellShared`] if `parent` is referenced elsewhere.
    pub fn add_element(&mut self, parent: CellId, element: impl Into<Element<L>>) -> Result<()> {
        self.ensure_mutable(parent)?;
        self.get_mut(parent).add_element(element);
        Ok(())
    }

    /// The bounding box of a cell, including transformed instances,
    /// recursively.
    ///
    /// Returns [`None`] if the hierarchy under `cell` contains no shapes.
    pub fn bbox(&self, cell: CellId) -> Option<Rect> {
        let cell = self.cell(cell);
        let mut bbox = cell.elements_bbox();
        for (_, inst) in cell.instances() {
            bbox = bbox.bounding_union(&self.instance_bbox(inst));
        }
        bbox
    }

    /// The bounding box of an instance, in its parent's coordinates.
    pub fn instance_bbox(&self, instance: &Instance) -> Option<Rect> {
        self.bbox(instance.child())
            .map(|rect| rect.transform(instance.transformation()))
    }
}

impl<L: Clone> LibraryBuilder<L> {
    /// Copies an instance's ports into its parent cell.
    ///
    /// Each child port is transformed through the instance's transform,
    /// renamed per `rename`, and added to the parent. If any resulting name
    /// collides with an existing parent port, the whole operation fails with
    /// [`Error::PortNameCollision`] and the parent is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `parent` or `instance` does not exist.
    pub fn add_ports(
        &mut self,
        parent: CellId,
        instance: InstanceId,
        rename: &PortRename,
    ) -> Result<()> {
        self.ensure_mutable(parent)?;
        let parent_cell = self.cell(parent);
        let inst = parent_cell.instance(instance);
        let trans = inst.transformation();
        let child = self.cell(inst.child());
        let mut renamed = Vec::with_capacity(child.ports().count());
        for (name, port) in child.ports() {
            let name = rename.apply(name);
            if parent_cell.has_port(&name) {
                return Err(Error::PortNameCollision(name));
            }
            renamed.push((name, port.transformed(trans)));
        }
        self.get_mut(parent).insert_ports(renamed);
        Ok(())
    }

    /// Gets a port of an instance, transformed into the parent's
    /// coordinates.
    pub fn instance_port(&self, instance: &Instance, name: &str) -> Result<Port<L>> {
        let child = self.cell(instance.child());
        let port = child
            .try_port(name)
            .ok_or_else(|| Error::MissingPort(ArcStr::from(name)))?;
        Ok(port.transformed(instance.transformation()))
    }

    /// All ports of an instance, transformed into the parent's coordinates.
    pub fn instance_ports(&self, instance: &Instance) -> Vec<(ArcStr, Port<L>)> {
        let child = self.cell(instance.child());
        child
            .ports()
            .map(|(name, port)| (name.clone(), port.transformed(instance.transformation())))
            .collect()
    }

    /// Lists the ports of a cell, in insertion order.
    pub fn list_ports(&self, cell: CellId) -> Vec<PortSummary<L>> {
        self.cell(cell)
            .ports()
            .map(|(name, port)| PortSummary {
                name: name.clone(),
                position: port.position(),
                orientation: port.orientation(),
                width: port.width(),
                layer: port.layer().clone(),
            })
            .collect()
    }
}

impl<L: Clone + Eq + Hash> LibraryBuilder<L> {
    /// Flattens a cell into per-layer shape lists.
    ///
    /// Walks the hierarchy under `cell`, cascading instance transforms, and
    /// collects every shape in `cell`'s coordinates. Text labels are
    /// dropped. The input hierarchy is not modified, so flattening may be
    /// repeated and always produces the same result.
    pub fn flatten(&self, cell: CellId) -> IndexMap<L, Vec<geometry::shape::Shape>> {
        let mut flat = IndexMap::new();
        self.flatten_into(cell, Transformation::identity(), &mut flat);
        flat
    }

    fn flatten_into(
        &self,
        cell: CellId,
        trans: Transformation,
        flat: &mut IndexMap<L, Vec<geometry::shape::Shape>>,
    ) {
        let cell = self.cell(cell);
        for element in cell.elements() {
            if let Element::Shape(shape) = element {
                flat.entry(shape.layer().clone())
                    .or_insert_with(Vec::new)
                    .push(shape.shape().clone().transform(trans));
            }
        }
        for (_, inst) in cell.instances() {
            self.flatten_into(
                inst.child(),
                Transformation::cascade(trans, inst.transformation()),
                flat,
            );
        }
    }
}

impl<L> LibraryBuilder<L> {
    /// Freezes this library into an immutable [`Library`].
    ///
    /// Validates that every instance refers to a cell present in this
    /// library. IDs from a different library are the only way to violate
    /// this.
    pub fn build(self) -> Result<Library<L>, BuildError> {
        for (_, cell) in self.cells.iter() {
            for (_, inst) in cell.instances() {
                if !self.cells.contains_key(&inst.child()) {
                    return Err(BuildError::DanglingInstance {
                        parent: cell.name().clone(),
                        instance: inst.name().clone(),
                    });
                }
            }
        }
        Ok(Library(self))
    }
}

/// A finished, immutable library.
///
/// Dereferences to [`LibraryBuilder`] for read access.
#[derive(Debug, Clone)]
pub struct Library<L>(LibraryBuilder<L>);

impl<L> Deref for Library<L> {
    type Target = LibraryBuilder<L>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The error type for [`LibraryBuilder::build`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// An instance refers to a cell that is not in this library.
    #[error("cell `{parent}` instance `{instance}` refers to a cell not in this library")]
    DanglingInstance {
        /// The name of the cell containing the instance.
        parent: ArcStr,
        /// The name of the offending instance.
        instance: ArcStr,
    },
}
