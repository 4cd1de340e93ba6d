//! The `nanofiche` envelope packing engine.
//!
//! Computes dense, deterministic placements of `n` equally-sized bins inside the smallest
//! square, rectangular, circular or elliptical envelope that holds them all, optionally keeping
//! a reserved rectangle free for a logo or metadata block.

/// Entities modelling a packing request and its result
pub mod entities;

/// Typed failures of a packing call
pub mod error;

/// Geometric primitives and the envelope boundary predicates
pub mod geometry;

/// Importing requests into and exporting results out of this library
pub mod io;

/// Placement, size search and reserve allocation algorithms
pub mod packing;

/// Helper functions which do not belong to any specific module
pub mod util;

#[doc(inline)]
pub use error::{PackError, Result};
#[doc(inline)]
pub use packing::{Packer, pack};
