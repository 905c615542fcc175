//! Error types for layout composition and routing.

use arcstr::ArcStr;

/// A result type returning composition errors.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for layout composition operations.
///
/// Every variant is a local, recoverable failure: a failed operation is
/// simply not applied, and previously resolved geometry stays valid.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A geometry transform (corner rounding) failed.
    #[error(transparent)]
    Geometry(#[from] geometry::fillet::FilletError),
    /// Two ports resolved to the same name while copying ports upward.
    #[error("port name collision: `{0}`")]
    PortNameCollision(ArcStr),
    /// Routing was requested between ports that cannot be connected.
    #[error("cannot route between incompatible ports: {0}")]
    IncompatiblePorts(#[from] IncompatiblePorts),
    /// An instance would make a cell transitively reference itself.
    #[error("instantiating `{child}` inside `{parent}` would create a reference cycle")]
    ReferenceCycle {
        /// The name of the would-be parent cell.
        parent: ArcStr,
        /// The name of the cell being instantiated.
        child: ArcStr,
    },
    /// A cell that is referenced elsewhere was asked to change.
    ///
    /// Once a cell is shared it renders identically everywhere; mutation is
    /// rejected unconditionally.
    #[error("cell `{0}` is referenced elsewhere and is read-only")]
    CellShared(ArcStr),
    /// A named port does not exist.
    #[error("no port named `{0}`")]
    MissingPort(ArcStr),
    /// An operation needed a bounding box, but the cell has no geometry.
    #[error("cell `{0}` has no geometry to derive a bounding box from")]
    EmptyCell(ArcStr),
    /// A routing cross-section width was not positive.
    #[error("route width must be positive, got {0}")]
    InvalidWidth(i64),
}

/// The reason two ports cannot be routed together.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompatiblePorts {
    /// The ports sit on different layers.
    #[error("ports are on different layers")]
    MismatchedLayers,
    /// A port orientation is not one of the four cardinal directions.
    #[error("port orientation is not a cardinal direction")]
    NonCardinal,
    /// The port orientations make a direct Manhattan route impossible.
    #[error("port orientations admit no direct Manhattan route")]
    Unroutable,
}
