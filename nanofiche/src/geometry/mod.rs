mod boundary;
mod point;
mod rect;

/// Set of traits for geometric primitives
pub mod geo_traits;

#[doc(inline)]
pub use boundary::{BoxBoundary, CircleBoundary, EllipseBoundary, RowAlignment, ShapeBoundary};
#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use rect::Rect;
