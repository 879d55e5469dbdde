//! *Conversion between geographic coordinates and the US National Grid*
//!
//! USNG (and its close relative, the MGRS) identifies a position on the
//! Earth by a string like `15T VK 9016 6918`: A UTM zone number, a
//! latitude band letter, a two-letter 100 km grid square, and an equal
//! number of easting and northing digits. Poleward of the UTM limits,
//! the zone number is dropped, and the bands A, B, Y, Z refer to the
//! quadrants of the Universal Polar Stereographic grid.
//!
//! The heavy lifting happens in [`Usng`], which converts in both
//! directions, and resolves truncated references (`VK 1234 5678`, or
//! even just `1234 5678`) against an approximate reference location.
//!
//! ```
//! use usng::prelude::*;
//! let usng = Usng::new()?;
//! let reference = usng.from_lonlat(Coor2D::geo(44.876, -93.12456789), 4)?;
//! assert_eq!(reference, "15T VK 9016 6918");
//!
//! let location = usng.to_lonlat("vk 9016 6918", Some(Coor2D::geo(44.8, -93.)), false)?;
//! assert!((location.latitude() - 44.876).abs() < 1e-3);
//! # Ok::<(), usng::Error>(())
//! ```
//!
//! The polar stereographic computations needed for the UPS zones are
//! provided through the [`Context`] trait: Any projection provider able
//! to instantiate a `stere` operator from a textual definition will do.
//! The built in [`Minimal`] context covers the needs of the grid.

mod context;
mod coordinate;
mod ellipsoid;
mod grid;
mod inner_op;
mod math;
mod op;

// ----- E R R O R -----------------------------------------------------------------

/// The *Rust USNG* errors
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("i/o error")]
    Io(#[from] std::io::Error),

    #[error("error: {0}")]
    General(&'static str),

    #[error("invalid 100 km grid designator {0} for zone {1}")]
    InvalidGridDesignator(String, String),

    #[error("latitude {0} outside the valid range of {1}")]
    OutOfRange(f64, String),

    #[error("calculated coordinate not in the supplied zone: supplied {supplied}, calculated {calculated}")]
    ZoneMismatch {
        supplied: String,
        calculated: String,
    },

    #[error("no grid reference matching {0} found near the reference point")]
    NoMatch(String),

    #[error("not enough information to locate {0}")]
    InsufficientInformation(String),

    #[error("malformed grid reference {0}: {1}")]
    MalformedUsng(String, &'static str),

    #[error("unsupported: {0}")]
    Unsupported(&'static str),

    #[error("operator {0} not found{1}")]
    NotFound(String, String),

    #[error("missing required parameter {0}")]
    MissingParam(String),

    #[error("malformed value for parameter {0}: {1}")]
    BadParam(String, String),

    #[error("operator {0} is not invertible")]
    NonInvertible(String),
}

// ----- D I R E C T I O N ---------------------------------------------------------

/// `Fwd`: Indicate that a two-way operator, function, or method,
/// should run in the *forward* direction.
/// `Inv`: Indicate that a two-way operator, function, or method,
/// should run in the *inverse* direction.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Fwd,
    Inv,
}

pub use crate::context::Context;
pub use crate::context::Minimal;
pub use crate::coordinate::coor2d::Coor2D;
pub use crate::coordinate::CoordinateSet;
pub use crate::ellipsoid::Ellipsoid;
pub use crate::grid::distance;
pub use crate::grid::GridPoint;
pub use crate::grid::GridZone;
pub use crate::grid::Location;
pub use crate::grid::Square;
pub use crate::grid::UpsPoint;
pub use crate::grid::Usng;
pub use crate::grid::UtmPoint;
pub use crate::op::OpHandle;
pub use Direction::Fwd;
pub use Direction::Inv;

/// Preamble for application programs
pub mod prelude {
    pub use crate::Context;
    pub use crate::Coor2D;
    pub use crate::CoordinateSet;
    pub use crate::Direction;
    pub use crate::Ellipsoid;
    pub use crate::Error;
    pub use crate::GridPoint;
    pub use crate::GridZone;
    pub use crate::Location;
    pub use crate::Minimal;
    pub use crate::OpHandle;
    pub use crate::Square;
    pub use crate::UpsPoint;
    pub use crate::Usng;
    pub use crate::UtmPoint;
    pub use crate::{Fwd, Inv};
}

/// Preamble for crate-internal modules, and for implementors of user
/// defined `Context` providers and operators
pub mod authoring {
    pub use crate::prelude::*;

    pub use crate::inner_op::InnerOp;
    pub use crate::inner_op::OpConstructor;
    pub use crate::math::*;
    pub use crate::op::*;

    pub use log::debug;
    pub use log::error;
    pub use log::trace;
    pub use log::warn;

    pub use std::collections::BTreeMap;
    pub use std::collections::BTreeSet;

    #[cfg(test)]
    pub use float_eq::assert_float_eq;
}
