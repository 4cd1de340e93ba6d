/// Draws a [`PackingResult`](crate::entities::PackingResult) as an SVG document
pub mod result_to_svg;

/// Drawing options, themes and path helpers
pub mod svg_util;

#[doc(inline)]
pub use result_to_svg::result_to_svg;
#[doc(inline)]
pub use svg_util::{Color, SvgDrawOptions, SvgLayoutTheme};
