//! The export boundary.
//!
//! Downstream format writers implement [`Export`] against a frozen
//! [`Library`]; the engine itself emits no file formats.

use crate::library::{CellId, Library};

/// A writer for some downstream layout format.
pub trait Export<L> {
    /// The successful output of the exporter.
    type Output;
    /// The exporter's error type.
    type Error;

    /// Exports the hierarchy under `top`.
    fn export(&mut self, lib: &Library<L>, top: CellId) -> Result<Self::Output, Self::Error>;
}

impl<L> Library<L> {
    /// Runs an exporter on the hierarchy under `top`.
    pub fn export<E: Export<L>>(
        &self,
        top: CellId,
        exporter: &mut E,
    ) -> Result<E::Output, E::Error> {
        exporter.export(self, top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, Instance, Shape};
    use crate::library::LibraryBuilder;
    use crate::units::Units;
    use geometry::rect::Rect;

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    enum Layer {
        Nwell,
    }

    /// An exporter that just counts flattened shapes.
    struct ShapeCounter;

    impl Export<Layer> for ShapeCounter {
        type Output = usize;
        type Error = std::convert::Infallible;

        fn export(&mut self, lib: &Library<Layer>, top: CellId) -> Result<usize, Self::Error> {
            Ok(lib.flatten(top).values().map(Vec::len).sum())
        }
    }

    #[test]
    fn exporters_see_the_frozen_hierarchy() {
        let mut lib = LibraryBuilder::new(Units::default());
        let mut leaf = Cell::new("pd");
        leaf.add_element(Shape::new(Layer::Nwell, Rect::from_sides(0, 0, 10, 10)));
        let leaf = lib.add_cell(leaf);
        let top = lib.add_cell(Cell::new("pixel"));
        lib.add_instance(top, Instance::new(leaf, "pd0")).unwrap();
        lib.add_instance(top, Instance::new(leaf, "pd1")).unwrap();
        let lib = lib.build().unwrap();
        assert_eq!(lib.export(top, &mut ShapeCounter).unwrap(), 2);
    }
}
