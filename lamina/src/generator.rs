//! Parameterized cell generation with caching.
//!
//! A generator is a plain function from parameters to a cell. The cache
//! guarantees that requesting the same generator name with equal parameters
//! yields the same [`CellId`], so repeated parts of an assembly share one
//! cell and one copy of its geometry.

use std::collections::HashMap;
use std::hash::Hash;

use arcstr::ArcStr;

use crate::error::Result;
use crate::library::{CellId, LibraryBuilder};

/// A cell generator: builds a cell into the library and returns its ID.
pub type GenerateFn<L, P> = fn(&P, &mut LibraryBuilder<L>) -> Result<CellId>;

/// Where a cell comes from: a generator invocation or an existing cell.
///
/// Assembly code that accepts either is explicit about which it got; a
/// generator and the cell it produces are distinct entities.
#[derive(Debug, Clone)]
pub enum CellSource<L, P> {
    /// Run (or fetch from cache) the named generator with these parameters.
    Generate {
        /// The generator name, used as the cache key and the cell name.
        name: ArcStr,
        /// The generator parameters.
        params: P,
        /// The generator itself.
        generate: GenerateFn<L, P>,
    },
    /// A cell that already exists in the library.
    Prebuilt(CellId),
}

/// A cache of generated cells, keyed by generator name and parameters.
#[derive(Debug, Clone)]
pub struct CellCache<P> {
    cells: HashMap<(ArcStr, P), CellId>,
}

impl<P> Default for CellCache<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> CellCache<P> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }
}

impl<P: Clone + Eq + Hash> CellCache<P> {
    /// Returns the cell for `(name, params)`, generating it on first use.
    ///
    /// On a repeat request the generator does not run again; the cached cell
    /// is marked shared, since it is about to appear in more than one place.
    pub fn generate<L>(
        &mut self,
        lib: &mut LibraryBuilder<L>,
        name: impl Into<ArcStr>,
        params: P,
        generate: GenerateFn<L, P>,
    ) -> Result<CellId> {
        let key = (name.into(), params);
        if let Some(&id) = self.cells.get(&key) {
            tracing::debug!(name = %key.0, "generator cache hit");
            lib.mark_shared(id);
            return Ok(id);
        }
        let id = generate(&key.1, lib)?;
        self.cells.insert(key, id);
        Ok(id)
    }

    /// Resolves a [`CellSource`] to a cell ID.
    pub fn resolve<L>(
        &mut self,
        lib: &mut LibraryBuilder<L>,
        source: CellSource<L, P>,
    ) -> Result<CellId> {
        match source {
            CellSource::Generate {
                name,
                params,
                generate,
            } => self.generate(lib, name, params, generate),
            CellSource::Prebuilt(id) => Ok(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, Shape};
    use crate::error::Error;
    use crate::units::Units;
    use geometry::rect::Rect;

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    enum Layer {
        Contact,
    }

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    struct SquareParams {
        size: i64,
    }

    fn square(params: &SquareParams, lib: &mut LibraryBuilder<Layer>) -> Result<CellId> {
        let mut cell = Cell::new("square");
        cell.add_element(Shape::new(
            Layer::Contact,
            Rect::from_sides(0, 0, params.size, params.size),
        ));
        Ok(lib.add_cell(cell))
    }

    #[test]
    fn equal_params_share_one_cell() {
        let mut lib = LibraryBuilder::new(Units::default());
        let mut cache = CellCache::new();
        let a = cache
            .generate(&mut lib, "square", SquareParams { size: 40 }, square)
            .unwrap();
        let b = cache
            .generate(&mut lib, "square", SquareParams { size: 40 }, square)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(lib.cells().count(), 1);
        // Fetched twice, so the cell is now shared and read-only.
        assert_eq!(lib.cell_mut(a).unwrap_err(), Error::CellShared("square".into()));
    }

    #[test]
    fn sources_resolve_to_cells() {
        let mut lib = LibraryBuilder::new(Units::default());
        let mut cache = CellCache::new();
        let generated = cache
            .resolve(
                &mut lib,
                CellSource::Generate {
                    name: "square".into(),
                    params: SquareParams { size: 40 },
                    generate: square,
                },
            )
            .unwrap();
        let prebuilt = cache
            .resolve(&mut lib, CellSource::Prebuilt(generated))
            .unwrap();
        assert_eq!(generated, prebuilt);
        assert_eq!(lib.cells().count(), 1);
    }

    #[test]
    fn distinct_params_get_distinct_cells() {
        let mut lib = LibraryBuilder::new(Units::default());
        let mut cache = CellCache::new();
        let a = cache
            .generate(&mut lib, "square", SquareParams { size: 40 }, square)
            .unwrap();
        let b = cache
            .generate(&mut lib, "square", SquareParams { size: 60 }, square)
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(lib.cells().count(), 2);
        assert_eq!(lib.cell(b).name(), "square_1");
        // A single fetch leaves the cell editable.
        assert!(lib.cell_mut(a).is_ok());
    }
}
