use crate::entities::{BinDimensions, Placement};
use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::{Point, Rect, RowAlignment, ShapeBoundary};
use crate::packing::grid;

/// Horizontal band of bin-high rows, vertically centered in the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// Pixel row of the top of the band
    pub y0: u32,
    pub rows: usize,
}

impl RowBand {
    /// As many rows as fit in the canvas.
    pub fn full(canvas_height: u32, bin_height: u32) -> Self {
        Self::trimmed(canvas_height, bin_height, usize::MAX)
    }

    /// At most `rows` rows, centered in the canvas.
    pub fn trimmed(canvas_height: u32, bin_height: u32, rows: usize) -> Self {
        let rows = usize::min(rows, (canvas_height / bin_height) as usize);
        let y0 = (canvas_height - rows as u32 * bin_height) / 2;
        RowBand { y0, rows }
    }

    /// Vertical offset of the center of row `i` from the center of the band.
    ///
    /// Computed from integers up to the final scaling, so rows equidistant from the center
    /// get offsets of exactly the same magnitude.
    pub fn row_offset(&self, i: usize, bin_height: u32) -> f64 {
        let twice = 2 * i as i64 + 1 - self.rows as i64;
        twice as f64 * bin_height as f64 / 2.0
    }

    pub fn row_top(&self, i: usize, bin_height: u32) -> u32 {
        self.y0 + i as u32 * bin_height
    }
}

/// Everything that constrains where bins may go.
#[derive(Clone, Copy)]
pub struct FillRegion<'a> {
    pub boundary: &'a dyn ShapeBoundary,
    pub band: RowBand,
    pub reserve: Option<Rect>,
}

/// Outcome of a raster fill.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterFill {
    /// Row-major placements, possibly fewer than requested
    pub placements: Vec<Placement>,
    /// Whether all requested bins were placed
    pub success: bool,
    /// Rows holding at least one bin
    pub rows_used: usize,
    /// Number of bins in the fullest row
    pub widest_row: usize,
    /// Slots skipped in the visited rows because they overlap the reserve
    pub excluded: usize,
}

/// Places up to `n` bins row by row, top to bottom, left to right.
///
/// Curved envelopes center the run of bins of each row on the vertical axis.
/// Boxes fill a shared column grid from the left, leaving the last row left-packed.
/// A row touched by the reserve keeps the slot positions of its full-capacity run and drops the overlapping slots.
pub fn place(n: usize, bin: BinDimensions, region: &FillRegion) -> RasterFill {
    let FillRegion {
        boundary,
        band,
        reserve,
    } = *region;
    let (canvas_width, _) = boundary.canvas();
    let center = boundary.center();
    let (bw, bh) = (bin.width, bin.height);

    let mut placements = Vec::with_capacity(n);
    let mut rows_used = 0;
    let mut widest_row = 0;
    let mut excluded = 0;

    for i in 0..band.rows {
        if placements.len() >= n {
            break;
        }
        let dy = band.row_offset(i, bh);
        let capacity = boundary.row_capacity(dy, bw);
        if capacity == 0 {
            continue;
        }
        let y = band.row_top(i, bh);
        let remaining = n - placements.len();

        let full_run = run_origin(canvas_width, capacity, bw);
        let touches_reserve = reserve.is_some_and(|r| {
            let span = Rect {
                x_min: full_run as f64,
                y_min: y as f64,
                x_max: full_run as f64 + capacity as f64 * bw as f64,
                y_max: y as f64 + bh as f64,
            };
            r.collides_with(&span)
        });

        //number of slots in the run and the logical x of its left edge
        let (run_len, x0, logical_x0) = match (boundary.alignment(), touches_reserve) {
            (RowAlignment::Grid, _) => (capacity, full_run, full_run as f64),
            (RowAlignment::Centered, true) => (
                capacity,
                full_run,
                center.x() - capacity as f64 * bw as f64 / 2.0,
            ),
            (RowAlignment::Centered, false) => {
                let k = usize::min(capacity, remaining);
                (
                    k,
                    run_origin(canvas_width, k, bw),
                    center.x() - k as f64 * bw as f64 / 2.0,
                )
            }
        };
        let logical_y = match boundary.alignment() {
            RowAlignment::Grid => y as f64 + bh as f64 / 2.0,
            RowAlignment::Centered => center.y() + dy,
        };

        let mut in_row = 0;
        for j in 0..run_len {
            if placements.len() >= n {
                break;
            }
            let placement = Placement::new(x0 + j as u32 * bw, y);
            if let Some(r) = &reserve {
                if r.collides_with(&Rect::from_placement(placement, bin)) {
                    excluded += 1;
                    continue;
                }
            }
            let slot_center = Point(logical_x0 + (j as f64 + 0.5) * bw as f64, logical_y);
            if !boundary.contains(&slot_center) {
                continue;
            }
            placements.push(placement);
            in_row += 1;
        }
        if in_row > 0 {
            rows_used += 1;
            widest_row = usize::max(widest_row, in_row);
        }
    }

    RasterFill {
        success: placements.len() == n,
        placements,
        rows_used,
        widest_row,
        excluded,
    }
}

/// Capacity of every row of `band`, top to bottom.
pub fn row_capacities(boundary: &dyn ShapeBoundary, band: RowBand, bin_width: u32, bin_height: u32) -> Vec<usize> {
    (0..band.rows)
        .map(|i| boundary.row_capacity(band.row_offset(i, bin_height), bin_width))
        .collect()
}

fn run_origin(canvas_width: u32, run_len: usize, bin_width: u32) -> u32 {
    grid::grid_offset(canvas_width, run_len as u32 * bin_width)
}
