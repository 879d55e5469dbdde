//! Miscellaneous math functions for general use

/// Free functions used in more than one module of the crate.
pub mod ancillary;
pub use ancillary::pj_phi2;
pub use ancillary::ts;

/// Free functions for handling and normalizing angles.
pub mod angular;

/// Power series evaluation
pub mod series;
pub use series::horner;
