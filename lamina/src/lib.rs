//! A hierarchical layout composition and routing engine.
//!
//! `lamina` assembles reusable, parametric sub-components (cells) into
//! reference hierarchies. Cells own layer-tagged polygons, named ports, and
//! transformed instances of other cells; a [`LibraryBuilder`] arena holds the
//! shared cells and enforces that a cell becomes read-only once it is
//! referenced elsewhere. Placement is expressed against derived quantities
//! (bounding-box edges, centers, port positions) rather than raw coordinates,
//! and a Manhattan router connects ports across sub-component boundaries.
//!
//! Primitive device generation, on-disk serialization, visualization, and
//! design-rule checking live outside this crate, behind the
//! [`generator`](crate::generator) and [`export`](crate::export) boundaries.
#![warn(missing_docs)]

pub mod cell;
pub mod error;
pub mod export;
pub mod generator;
pub mod id;
pub mod library;
mod names;
pub mod place;
pub mod port;
pub mod route;
pub mod units;


pub use cell::{Cell, Element, Instance, Shape, Text};
pub use error::{Error, Result};
pub use generator::{CellCache, CellSource};
pub use library::{CellId, InstanceId, Library, LibraryBuilder, PortRename};
pub use place::Placement;
pub use port::{Compass, Port, PortOrientation};
pub use units::Units;
