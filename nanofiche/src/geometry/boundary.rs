use crate::geometry::Point;
use anyhow::{Result, ensure};

/// How the slots of a row are laid out horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAlignment {
    /// The run of bins in a row is centered on the vertical axis of the envelope.
    Centered,
    /// All rows share the same column grid, centered in the canvas and filled left-to-right.
    Grid,
}

/// Inclusion predicates of an envelope, expressed relative to the center of its canvas.
///
/// The vertical offset `dy` used throughout is measured from the canvas center (positive downwards).
pub trait ShapeBoundary {
    /// Width and height of the canvas in pixels.
    fn canvas(&self) -> (u32, u32);

    /// Returns true if `point` (in canvas coordinates) lies inside the envelope.
    fn contains(&self, point: &Point) -> bool;

    /// Half of the widest contiguous horizontal span of the envelope at vertical offset `dy`.
    /// Zero outside the vertical extent of the envelope.
    fn half_width(&self, dy: f64) -> f64;

    fn alignment(&self) -> RowAlignment;

    fn center(&self) -> Point {
        let (w, h) = self.canvas();
        Point(w as f64 / 2.0, h as f64 / 2.0)
    }

    /// Number of bins of `bin_width` fitting side by side across the envelope at vertical offset `dy`.
    fn row_capacity(&self, dy: f64, bin_width: u32) -> usize {
        let hw = self.half_width(dy);
        if hw <= 0.0 {
            return 0;
        }
        (2.0 * hw / bin_width as f64).floor() as usize
    }
}

/// Circle of `radius` centered on a square canvas of side `ceil(2 * radius)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleBoundary {
    radius: f64,
    side: u32,
}

impl CircleBoundary {
    pub fn try_new(radius: f64) -> Result<Self> {
        ensure!(
            radius.is_finite() && radius > 0.0,
            "circle radius must be positive and finite: {radius}"
        );
        Ok(CircleBoundary {
            radius,
            side: (2.0 * radius).ceil() as u32,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl ShapeBoundary for CircleBoundary {
    fn canvas(&self) -> (u32, u32) {
        (self.side, self.side)
    }

    fn contains(&self, point: &Point) -> bool {
        point.sq_distance(&self.center()) <= self.radius.powi(2)
    }

    fn half_width(&self, dy: f64) -> f64 {
        let rem = self.radius.powi(2) - dy.powi(2);
        match rem > 0.0 {
            true => rem.sqrt(),
            false => 0.0,
        }
    }

    fn alignment(&self) -> RowAlignment {
        RowAlignment::Centered
    }
}

/// Axis-aligned ellipse with horizontal semi-axis `semi_x` and vertical semi-axis `semi_y`,
/// centered on a canvas of `ceil(2 * semi_x)` by `ceil(2 * semi_y)`.
///
/// Only the inner `margin` of the normalized ellipse equation counts as inside,
/// which keeps the corners of the outermost bins closer to the outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseBoundary {
    semi_x: f64,
    semi_y: f64,
    margin: f64,
    canvas: (u32, u32),
}

impl EllipseBoundary {
    pub fn try_new(semi_x: f64, semi_y: f64, margin: f64) -> Result<Self> {
        ensure!(
            semi_x.is_finite() && semi_x > 0.0 && semi_y.is_finite() && semi_y > 0.0,
            "ellipse semi-axes must be positive and finite: {semi_x}, {semi_y}"
        );
        ensure!(
            margin > 0.0 && margin <= 1.0,
            "ellipse margin must lie in (0, 1]: {margin}"
        );
        Ok(EllipseBoundary {
            semi_x,
            semi_y,
            margin,
            canvas: ((2.0 * semi_x).ceil() as u32, (2.0 * semi_y).ceil() as u32),
        })
    }

    pub fn semi_axes(&self) -> (f64, f64) {
        (self.semi_x, self.semi_y)
    }
}

impl ShapeBoundary for EllipseBoundary {
    fn canvas(&self) -> (u32, u32) {
        self.canvas
    }

    fn contains(&self, point: &Point) -> bool {
        let Point(ox, oy) = self.center();
        let nx = (point.x() - ox) / self.semi_x;
        let ny = (point.y() - oy) / self.semi_y;
        nx.powi(2) + ny.powi(2) <= self.margin
    }

    fn half_width(&self, dy: f64) -> f64 {
        let rem = self.margin - (dy / self.semi_y).powi(2);
        match rem > 0.0 {
            true => self.semi_x * rem.sqrt(),
            false => 0.0,
        }
    }

    fn alignment(&self) -> RowAlignment {
        RowAlignment::Centered
    }
}

/// Square or rectangular envelope spanning the entire canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxBoundary {
    width: u32,
    height: u32,
    columns: Option<usize>,
}

impl BoxBoundary {
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "box dimensions must be positive: {width}x{height}"
        );
        Ok(BoxBoundary {
            width,
            height,
            columns: None,
        })
    }

    /// Restricts every row to a fixed number of columns instead of as many as the width allows.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Number of grid columns for bins of `bin_width`.
    pub fn columns(&self, bin_width: u32) -> usize {
        let fitting = (self.width / bin_width) as usize;
        match self.columns {
            Some(cols) => usize::min(cols, fitting),
            None => fitting,
        }
    }
}

impl ShapeBoundary for BoxBoundary {
    fn canvas(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn contains(&self, point: &Point) -> bool {
        let Point(x, y) = *point;
        x >= 0.0 && x <= self.width as f64 && y >= 0.0 && y <= self.height as f64
    }

    fn half_width(&self, dy: f64) -> f64 {
        match dy.abs() <= self.height as f64 / 2.0 {
            true => self.width as f64 / 2.0,
            false => 0.0,
        }
    }

    fn alignment(&self) -> RowAlignment {
        RowAlignment::Grid
    }

    fn row_capacity(&self, dy: f64, bin_width: u32) -> usize {
        match self.half_width(dy) > 0.0 {
            true => self.columns(bin_width),
            false => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn circle_row_capacity_follows_chord() {
        let circle = CircleBoundary::try_new(100.0).unwrap();
        assert_eq!(circle.canvas(), (200, 200));
        assert_eq!(circle.row_capacity(0.0, 20), 10);
        // chord at dy = 60 is 2 * 80 = 160
        assert_eq!(circle.row_capacity(60.0, 20), 8);
        assert_eq!(circle.row_capacity(-60.0, 20), 8);
        assert_eq!(circle.row_capacity(100.0, 20), 0);
        assert_eq!(circle.row_capacity(150.0, 20), 0);
    }

    #[test]
    fn circle_contains_center_and_rim() {
        let circle = CircleBoundary::try_new(50.0).unwrap();
        assert!(circle.contains(&Point(50.0, 50.0)));
        assert!(circle.contains(&Point(100.0, 50.0)));
        assert!(!circle.contains(&Point(90.0, 90.0)));
    }

    #[test]
    fn ellipse_margin_shrinks_usable_area() {
        let strict = EllipseBoundary::try_new(150.0, 100.0, 1.0).unwrap();
        let margin = EllipseBoundary::try_new(150.0, 100.0, 0.98).unwrap();
        assert_eq!(strict.canvas(), (300, 200));
        assert!(strict.contains(&Point(300.0, 100.0)));
        assert!(!margin.contains(&Point(300.0, 100.0)));
        assert!(margin.half_width(0.0) < strict.half_width(0.0));
        assert_eq!(margin.half_width(100.0), 0.0);
    }

    #[test_case(0.0; "center")]
    #[test_case(35.5; "off center")]
    #[test_case(89.0; "near rim")]
    fn ellipse_half_width_is_symmetric(dy: f64) {
        let ellipse = EllipseBoundary::try_new(135.0, 90.0, 0.98).unwrap();
        assert_eq!(ellipse.half_width(dy), ellipse.half_width(-dy));
        assert_eq!(ellipse.row_capacity(dy, 13), ellipse.row_capacity(-dy, 13));
    }

    #[test]
    fn box_capacity_respects_column_override() {
        let b = BoxBoundary::try_new(105, 40).unwrap();
        assert_eq!(b.row_capacity(0.0, 10), 10);
        assert_eq!(b.with_columns(7).row_capacity(0.0, 10), 7);
        assert_eq!(b.with_columns(12).row_capacity(0.0, 10), 10);
        assert_eq!(b.row_capacity(25.0, 10), 0);
        assert_eq!(b.alignment(), RowAlignment::Grid);
    }

    #[test]
    fn invalid_boundaries_are_rejected() {
        assert!(CircleBoundary::try_new(0.0).is_err());
        assert!(CircleBoundary::try_new(f64::NAN).is_err());
        assert!(EllipseBoundary::try_new(10.0, -1.0, 0.98).is_err());
        assert!(EllipseBoundary::try_new(10.0, 10.0, 1.5).is_err());
        assert!(BoxBoundary::try_new(0, 10).is_err());
    }
}
