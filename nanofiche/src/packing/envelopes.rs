use crate::entities::{BinDimensions, EnvelopeGeometry, ReserveSpec};
use crate::geometry::{BoxBoundary, CircleBoundary, EllipseBoundary, Rect, ShapeBoundary};
use crate::packing::grid;
use crate::packing::raster::{self, FillRegion, RasterFill, RowBand};
use crate::packing::reserve::{fixed_reserve_rect, slot_reserve_rect};
use crate::util::PackerConfig;
use std::f64::consts::PI;

/// A complete layout for one concrete size of an envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub canvas: (u32, u32),
    pub fill: RasterFill,
    pub envelope: EnvelopeGeometry,
    pub reserve: Option<Rect>,
    /// Grid columns of a box, length of the widest row of a curved envelope
    pub columns: usize,
}

/// An envelope shape whose size is controlled by a single parameter, to be minimized by a size search.
pub trait SizedEnvelope {
    /// Size below which the envelope's area cannot hold `n` bins
    fn lower_bound(&self, n: usize) -> f64;

    /// Largest size whose canvas stays within the configured limit
    fn max_size(&self) -> f64;

    fn tolerance(&self, config: &PackerConfig) -> f64;

    /// Layout of `n` bins in the envelope of `size`, `None` if they do not all fit.
    fn try_place(&self, n: usize, size: f64) -> Option<Candidate>;
}

fn required_area(n: usize, bin: BinDimensions, reserve_area: f64) -> f64 {
    n as f64 * bin.area() + reserve_area
}

fn fill_region(
    n: usize,
    bin: BinDimensions,
    boundary: &dyn ShapeBoundary,
    band: RowBand,
    reserve: Option<Rect>,
) -> Option<RasterFill> {
    let region = FillRegion {
        boundary,
        band,
        reserve,
    };
    let fill = raster::place(n, bin, &region);
    fill.success.then_some(fill)
}

/// Resolves an optional fixed reserve in `canvas`.
/// The outer `None` signals a reserve that does not fit.
fn resolve_fixed(reserve: Option<&ReserveSpec>, canvas: (u32, u32)) -> Option<Option<Rect>> {
    match reserve {
        None => Some(None),
        Some(r) => fixed_reserve_rect(r, canvas).map(Some),
    }
}

/// Circle sized by its radius.
#[derive(Debug, Clone, Copy)]
pub struct CircleEnvelope {
    pub bin: BinDimensions,
    pub reserve: Option<ReserveSpec>,
    pub max_canvas_side: u32,
}

impl SizedEnvelope for CircleEnvelope {
    fn lower_bound(&self, n: usize) -> f64 {
        let reserve_area = self.reserve.map_or(0.0, |r| r.area());
        (required_area(n, self.bin, reserve_area) / PI).sqrt()
    }

    fn max_size(&self) -> f64 {
        self.max_canvas_side as f64 / 2.0
    }

    fn tolerance(&self, config: &PackerConfig) -> f64 {
        config.radius_tolerance
    }

    fn try_place(&self, n: usize, radius: f64) -> Option<Candidate> {
        let boundary = CircleBoundary::try_new(radius).ok()?;
        let canvas = boundary.canvas();
        let reserve = resolve_fixed(self.reserve.as_ref(), canvas)?;
        let band = RowBand::full(canvas.1, self.bin.height);
        let fill = fill_region(n, self.bin, &boundary, band, reserve)?;
        Some(Candidate {
            canvas,
            columns: fill.widest_row,
            fill,
            envelope: EnvelopeGeometry::Circle { radius },
            reserve,
        })
    }
}

/// Ellipse sized by its vertical semi-axis, the horizontal one following from the aspect `ratio`.
#[derive(Debug, Clone, Copy)]
pub struct EllipseEnvelope {
    pub bin: BinDimensions,
    /// Width over height
    pub ratio: f64,
    pub margin: f64,
    pub reserve: Option<ReserveSpec>,
    pub max_canvas_side: u32,
}

impl SizedEnvelope for EllipseEnvelope {
    fn lower_bound(&self, n: usize) -> f64 {
        let reserve_area = self.reserve.map_or(0.0, |r| r.area());
        (required_area(n, self.bin, reserve_area) / (PI * self.ratio)).sqrt()
    }

    fn max_size(&self) -> f64 {
        self.max_canvas_side as f64 / 2.0 / f64::max(1.0, self.ratio)
    }

    fn tolerance(&self, config: &PackerConfig) -> f64 {
        config.radius_tolerance
    }

    fn try_place(&self, n: usize, semi_y: f64) -> Option<Candidate> {
        let semi_x = semi_y * self.ratio;
        let boundary = EllipseBoundary::try_new(semi_x, semi_y, self.margin).ok()?;
        let canvas = boundary.canvas();
        let reserve = resolve_fixed(self.reserve.as_ref(), canvas)?;
        let band = RowBand::full(canvas.1, self.bin.height);
        let fill = fill_region(n, self.bin, &boundary, band, reserve)?;
        Some(Candidate {
            canvas,
            columns: fill.widest_row,
            fill,
            envelope: EnvelopeGeometry::Ellipse { semi_x, semi_y },
            reserve,
        })
    }
}

/// What a box envelope keeps free of bins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxReserve {
    None,
    Fixed(ReserveSpec),
    /// The top-left `rows` by `cols` slots of the grid, extended to the canvas origin
    Slots { rows: usize, cols: usize },
}

/// Square or rectangle sized by its canvas height, the width following from the aspect `ratio`.
#[derive(Debug, Clone, Copy)]
pub struct BoxEnvelope {
    pub bin: BinDimensions,
    /// Width over height
    pub ratio: f64,
    pub reserve: BoxReserve,
    pub max_canvas_side: u32,
}

impl BoxEnvelope {
    pub fn canvas_for(&self, height: f64) -> (u32, u32) {
        let height = height.ceil();
        ((height * self.ratio).ceil() as u32, height as u32)
    }

    /// Lays out `n` bins on a fixed canvas.
    ///
    /// * `band_rows` - limits the grid to this many rows, centered vertically
    /// * `columns` - limits the grid to this many columns, centered horizontally
    pub fn layout(
        &self,
        n: usize,
        canvas: (u32, u32),
        band_rows: Option<usize>,
        columns: Option<usize>,
    ) -> Option<Candidate> {
        let (width, height) = canvas;
        let boundary = {
            let boundary = BoxBoundary::try_new(width, height).ok()?;
            match columns {
                Some(cols) => boundary.with_columns(cols),
                None => boundary,
            }
        };
        let grid_cols = boundary.columns(self.bin.width);
        let band = match band_rows {
            Some(rows) => RowBand::trimmed(height, self.bin.height, rows),
            None => RowBand::full(height, self.bin.height),
        };

        let reserve = match self.reserve {
            BoxReserve::None => None,
            BoxReserve::Fixed(spec) => Some(fixed_reserve_rect(&spec, canvas)?),
            BoxReserve::Slots { rows, cols } => {
                if rows > band.rows || cols > grid_cols {
                    return None;
                }
                let x0 = grid::grid_offset(width, grid_cols as u32 * self.bin.width);
                Some(slot_reserve_rect((x0, band.y0), rows, cols, self.bin))
            }
        };

        let fill = fill_region(n, self.bin, &boundary, band, reserve)?;
        Some(Candidate {
            canvas,
            fill,
            envelope: EnvelopeGeometry::Box { width, height },
            reserve,
            columns: grid_cols,
        })
    }

    fn reserve_extent(&self) -> (f64, f64, f64) {
        match self.reserve {
            BoxReserve::None => (0.0, 0.0, 0.0),
            BoxReserve::Fixed(spec) => (spec.area(), spec.width as f64, spec.height as f64),
            BoxReserve::Slots { rows, cols } => {
                let (w, h) = (cols as f64 * self.bin.width as f64, rows as f64 * self.bin.height as f64);
                (w * h, w, h)
            }
        }
    }
}

impl SizedEnvelope for BoxEnvelope {
    fn lower_bound(&self, n: usize) -> f64 {
        let (reserve_area, reserve_width, reserve_height) = self.reserve_extent();
        let (bw, bh) = (self.bin.width as f64, self.bin.height as f64);
        [
            (required_area(n, self.bin, reserve_area) / self.ratio).sqrt(),
            bh,
            bw / self.ratio,
            reserve_height,
            reserve_width / self.ratio,
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }

    fn max_size(&self) -> f64 {
        self.max_canvas_side as f64 / f64::max(1.0, self.ratio)
    }

    fn tolerance(&self, config: &PackerConfig) -> f64 {
        config.side_tolerance
    }

    fn try_place(&self, n: usize, height: f64) -> Option<Candidate> {
        self.layout(n, self.canvas_for(height), None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ReservePosition;

    fn bin(w: u32, h: u32) -> BinDimensions {
        BinDimensions::try_new(w, h).unwrap()
    }

    #[test]
    fn circle_lower_bound_matches_area() {
        let env = CircleEnvelope {
            bin: bin(10, 10),
            reserve: None,
            max_canvas_side: 10_000,
        };
        let r = env.lower_bound(314);
        assert!((PI * r * r - 31_400.0).abs() < 1e-6);
        assert!(env.try_place(314, r).is_none());
        assert!(env.try_place(314, 2.0 * r).is_some());
    }

    #[test]
    fn ellipse_candidate_has_requested_aspect() {
        let env = EllipseEnvelope {
            bin: bin(10, 10),
            ratio: 1.5,
            margin: 0.98,
            reserve: None,
            max_canvas_side: 10_000,
        };
        let candidate = env.try_place(20, 60.0).unwrap();
        assert_eq!(candidate.canvas, (180, 120));
        assert_eq!(candidate.fill.placements.len(), 20);
    }

    #[test]
    fn box_with_fixed_reserve_needs_room_for_it() {
        let env = BoxEnvelope {
            bin: bin(10, 10),
            ratio: 1.0,
            reserve: BoxReserve::Fixed(ReserveSpec::fixed(30, 30, ReservePosition::TopLeft)),
            max_canvas_side: 10_000,
        };
        // one bin plus the reserve area outweighs the reserve side
        assert!((env.lower_bound(1) - 1000f64.sqrt()).abs() < 1e-9);
        let candidate = env.try_place(7, 40.0).unwrap();
        assert_eq!(candidate.fill.excluded, 9);
        assert!(env.try_place(8, 40.0).is_none());
    }

    #[test]
    fn slot_reserve_follows_grid_origin() {
        let env = BoxEnvelope {
            bin: bin(10, 10),
            ratio: 1.0,
            reserve: BoxReserve::Slots { rows: 1, cols: 2 },
            max_canvas_side: 10_000,
        };
        let candidate = env.layout(7, (45, 45), None, None).unwrap();
        assert_eq!(candidate.reserve, Some(Rect::try_new(0.0, 0.0, 22.0, 12.0).unwrap()));
        assert_eq!(candidate.fill.placements[0].x, 22);
        assert_eq!(candidate.columns, 4);
    }
}
