mod events;
mod packer;

/// Per-shape envelopes whose size is minimized by the packer
pub mod envelopes;

/// Grid selection for square and rectangular envelopes
pub mod grid;

/// Row-by-row placement of bins inside an envelope boundary
pub mod raster;

/// Placement and sizing of the reserved rectangle
pub mod reserve;

/// Bisection on a single size parameter
pub mod search;

#[doc(inline)]
pub use events::{EventSink, LogSink, PackEvent};
#[doc(inline)]
pub use packer::{Packer, pack};
