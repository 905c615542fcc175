//! Cells: hierarchical containers of geometry, ports, and instances.

use arcstr::ArcStr;
use geometry::bbox::Bbox;
use geometry::point::Point;
use geometry::rect::Rect;
use geometry::transform::{TransformMut, Transformation, TranslateMut};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::library::{CellId, InstanceId};
use crate::port::Port;

/// A primitive layout element: a shape or a text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element<L> {
    /// A layer-tagged geometric shape.
    Shape(Shape<L>),
    /// A layer-tagged text annotation.
    Text(Text<L>),
}

impl<L> Element<L> {
    /// The layer this element is drawn on.
    pub fn layer(&self) -> &L {
        match self {
            Self::Shape(shape) => shape.layer(),
            Self::Text(text) => text.layer(),
        }
    }
}

/// A layer-tagged geometric shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape<L> {
    layer: L,
    shape: geometry::shape::Shape,
}

impl<L> Shape<L> {
    /// Creates a new shape on the given layer.
    #[inline]
    pub fn new(layer: L, shape: impl Into<geometry::shape::Shape>) -> Self {
        Self {
            layer,
            shape: shape.into(),
        }
    }

    /// The layer this shape is drawn on.
    #[inline]
    pub fn layer(&self) -> &L {
        &self.layer
    }

    /// The underlying geometric shape.
    #[inline]
    pub fn shape(&self) -> &geometry::shape::Shape {
        &self.shape
    }
}

/// A text annotation, anchored at a point on a layer.
///
/// Leaf-cell generators place labels to mark signal positions; ports can be
/// derived from them with [`ports_from_labels`](crate::port::ports_from_labels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text<L> {
    layer: L,
    text: ArcStr,
    origin: Point,
}

impl<L> Text<L> {
    /// Creates a new text annotation at the given origin.
    pub fn new(layer: L, text: impl Into<ArcStr>, origin: Point) -> Self {
        Self {
            layer,
            text: text.into(),
            origin,
        }
    }

    /// The layer this text is attached to.
    #[inline]
    pub fn layer(&self) -> &L {
        &self.layer
    }

    /// The text string.
    #[inline]
    pub fn text(&self) -> &ArcStr {
        &self.text
    }

    /// The anchor point of the text.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }
}

/// A positioned, transformed reference to a shared cell.
///
/// An instance does not own its target: the target cell lives in the
/// library and may be instantiated many times with different transforms.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    child: CellId,
    name: ArcStr,
    trans: Transformation,
}

impl Instance {
    /// Creates an instance of `child` with the identity transform.
    pub fn new(child: CellId, name: impl Into<ArcStr>) -> Self {
        Self {
            child,
            name: name.into(),
            trans: Transformation::identity(),
        }
    }

    /// Creates an instance of `child` with the given transform.
    pub fn with_transformation(
        child: CellId,
        name: impl Into<ArcStr>,
        trans: impl Into<Transformation>,
    ) -> Self {
        Self {
            child,
            name: name.into(),
            trans: trans.into(),
        }
    }

    /// The cell this instance refers to.
    #[inline]
    pub fn child(&self) -> CellId {
        self.child
    }

    /// The name of this instance.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// The transform mapping child coordinates into the parent cell.
    #[inline]
    pub fn transformation(&self) -> Transformation {
        self.trans
    }

    /// Replaces this instance's transform.
    #[inline]
    pub fn set_transformation(&mut self, trans: impl Into<Transformation>) {
        self.trans = trans.into();
    }
}

impl TranslateMut for Instance {
    fn translate_mut(&mut self, p: Point) {
        self.trans = Transformation::cascade(Transformation::from_offset(p), self.trans);
    }
}

impl TransformMut for Instance {
    fn transform_mut(&mut self, trans: Transformation) {
        self.trans = Transformation::cascade(trans, self.trans);
    }
}

/// A hierarchical layout cell.
///
/// A cell owns its elements and ports outright, and holds instances of other
/// cells by ID. Cells are built incrementally, then published to a
/// [`LibraryBuilder`](crate::library::LibraryBuilder); once another cell
/// instantiates them they become read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell<L> {
    name: ArcStr,
    instance_id: InstanceId,
    instances: IndexMap<InstanceId, Instance>,
    elements: Vec<Element<L>>,
    ports: IndexMap<ArcStr, Port<L>>,
}

impl<L> Cell<L> {
    /// Creates a new, empty cell.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            instance_id: InstanceId::new(),
            instances: IndexMap::new(),
            elements: Vec::new(),
            ports: IndexMap::new(),
        }
    }

    /// The name of the cell.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: ArcStr) {
        self.name = name;
    }

    /// Adds an element to this cell.
    ///
    /// Insertion order is preserved, so output is deterministic.
    pub fn add_element(&mut self, element: impl Into<Element<L>>) {
        self.elements.push(element.into());
    }

    /// Iterates over the elements of this cell, in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element<L>> {
        self.elements.iter()
    }

    /// Adds an instance to this cell.
    pub fn add_instance(&mut self, instance: Instance) -> InstanceId {
        let id = self.instance_id.alloc();
        self.instances.insert(id, instance);
        id
    }

    /// Iterates over the `(id, instance)` pairs of this cell.
    pub fn instances(&self) -> impl Iterator<Item = (InstanceId, &Instance)> {
        self.instances.iter().map(|(id, inst)| (*id, inst))
    }

    /// Gets the instance with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if no instance with the given ID exists.
    #[inline]
    pub fn instance(&self, id: InstanceId) -> &Instance {
        self.try_instance(id).unwrap()
    }

    /// Gets the instance with the given ID.
    #[inline]
    pub fn try_instance(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(&id)
    }

    /// Gets a mutable reference to the instance with the given ID.
    #[inline]
    pub fn instance_mut(&mut self, id: InstanceId) -> Option<&mut Instance> {
        self.instances.get_mut(&id)
    }

    /// Adds a port to this cell, replacing any previous port with this name.
    pub fn add_port(&mut self, name: impl Into<ArcStr>, port: Port<L>) {
        self.ports.insert(name.into(), port);
    }

    /// Iterates over the ports of this cell, in insertion order.
    pub fn ports(&self) -> impl Iterator<Item = (&ArcStr, &Port<L>)> {
        self.ports.iter()
    }

    /// Gets a port of this cell by name.
    ///
    /// # Panics
    ///
    /// Panics if no port has the given name.
    #[inline]
    pub fn port(&self, name: &str) -> &Port<L> {
        match self.try_port(name) {
            Some(port) => port,
            None => {
                tracing::error!("no port named `{}` in cell `{}`", name, self.name);
                panic!("no port named `{}` in cell `{}`", name, self.name);
            }
        }
    }

    /// Gets a port of this cell by name.
    #[inline]
    pub fn try_port(&self, name: &str) -> Option<&Port<L>> {
        self.ports.get(name)
    }

    /// Returns `true` if any port has the given name.
    pub fn has_port(&self, name: &str) -> bool {
        self.ports.contains_key(name)
    }

    pub(crate) fn insert_ports(&mut self, ports: impl IntoIterator<Item = (ArcStr, Port<L>)>) {
        self.ports.extend(ports);
    }

    /// The bounding box of this cell's own shapes, ignoring instances.
    ///
    /// Text labels carry no extent and do not contribute. For the full
    /// recursive bounding box, see
    /// [`LibraryBuilder::bbox`](crate::library::LibraryBuilder::bbox).
    pub fn elements_bbox(&self) -> Option<Rect> {
        use geometry::union::BoundingUnion;
        self.elements.iter().fold(None, |acc, elt| match elt {
            Element::Shape(s) => acc.bounding_union(&s.shape().bbox()),
            Element::Text(_) => acc,
        })
    }
}

impl<L> From<Shape<L>> for Element<L> {
    fn from(value: Shape<L>) -> Self {
        Self::Shape(value)
    }
}

impl<L> From<Text<L>> for Element<L> {
    fn from(value: Text<L>) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geometry::rect::Rect;

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    enum Layer {
        Met1,
    }

    #[test]
    fn elements_preserve_insertion_order() {
        let mut cell = Cell::new("leaf");
        cell.add_element(Shape::new(Layer::Met1, Rect::from_sides(0, 0, 10, 10)));
        cell.add_element(Shape::new(Layer::Met1, Rect::from_sides(20, 0, 30, 10)));
        cell.add_element(Text::new(Layer::Met1, "e1", Point::new(5, 5)));
        let kinds: Vec<_> = cell
            .elements()
            .map(|e| matches!(e, Element::Shape(_)))
            .collect();
        assert_eq!(kinds, vec![true, true, false]);
    }

    #[test]
    fn elements_bbox_ignores_labels() {
        let mut cell = Cell::new("leaf");
        cell.add_element(Shape::new(Layer::Met1, Rect::from_sides(0, 0, 10, 10)));
        cell.add_element(Text::new(Layer::Met1, "far", Point::new(100, 100)));
        assert_eq!(cell.elements_bbox(), Some(Rect::from_sides(0, 0, 10, 10)));
    }

    #[test]
    fn instance_translation_composes_with_existing_transform() {
        use geometry::transform::{Rotation, Translate};
        let inst = Instance::with_transformation(
            crate::library::CellId::new(),
            "i0",
            Transformation::rotate(Rotation::R90),
        )
        .translate(Point::new(100, 0));
        assert_eq!(
            inst.transformation().apply(Point::new(1, 0)),
            Point::new(100, 1)
        );
    }
}
