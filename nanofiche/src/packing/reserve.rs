use crate::entities::{BinDimensions, ReservePosition, ReserveSpec};
use crate::geometry::Rect;
use crate::packing::grid::{SlotPlan, plan_slots};
use crate::util::PackerConfig;
use itertools::Itertools;
use log::trace;

/// Region of a fixed-size reserve in a canvas, `None` if the canvas is too small to hold it.
pub fn fixed_reserve_rect(reserve: &ReserveSpec, canvas: (u32, u32)) -> Option<Rect> {
    let (width, height) = canvas;
    if reserve.width > width || reserve.height > height {
        return None;
    }
    let (x, y) = match reserve.position {
        ReservePosition::Center => ((width - reserve.width) / 2, (height - reserve.height) / 2),
        ReservePosition::TopLeft => (0, 0),
    };
    Some(Rect {
        x_min: x as f64,
        y_min: y as f64,
        x_max: (x + reserve.width) as f64,
        y_max: (y + reserve.height) as f64,
    })
}

/// Region of a reserve covering the top-left `rows` by `cols` slots of a grid starting at `grid_origin`,
/// extended to the canvas origin.
pub fn slot_reserve_rect(grid_origin: (u32, u32), rows: usize, cols: usize, bin: BinDimensions) -> Rect {
    let (x0, y0) = grid_origin;
    Rect {
        x_min: 0.0,
        y_min: 0.0,
        x_max: x0 as f64 + cols as f64 * bin.width as f64,
        y_max: y0 as f64 + rows as f64 * bin.height as f64,
    }
}

/// Target width over height of an auto-sized reserve.
pub fn target_aspect(reserve: &ReserveSpec, bin: BinDimensions) -> f64 {
    match (reserve.reserve_aspect, reserve.width, reserve.height) {
        (Some((ax, ay)), _, _) => ax / ay,
        (None, w, h) if w > 0 && h > 0 => w as f64 / h as f64,
        _ => bin.aspect(),
    }
}

/// Smallest block of whole slots `(rows, cols)` covering the seed of an auto-sized reserve.
///
/// The seed is the caller's width and height if given,
/// otherwise `reserve_seed_bin_areas` bin areas at the target aspect.
pub fn seed_slots(reserve: &ReserveSpec, bin: BinDimensions, config: &PackerConfig) -> (usize, usize) {
    let (seed_width, seed_height) = match reserve.width > 0 && reserve.height > 0 {
        true => (reserve.width as f64, reserve.height as f64),
        false => {
            let area = config.reserve_seed_bin_areas * bin.area();
            let aspect = target_aspect(reserve, bin);
            let height = (area / aspect).sqrt();
            (height * aspect, height)
        }
    };
    let rows = usize::max(1, (seed_height / bin.height as f64).ceil() as usize);
    let cols = usize::max(1, (seed_width / bin.width as f64).ceil() as usize);
    (rows, cols)
}

/// An enlarged reserve block and the resulting occupation of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveBlock {
    pub rows: usize,
    pub cols: usize,
    pub plan: SlotPlan,
}

/// Grows the seed block of a `grid_rows` by `grid_cols` grid to absorb slots the `n` bins do not need.
///
/// Candidates span at most `reserve_max_fraction` of the grid in each direction and stay within
/// `reserve_aspect_slack` (relative) of `target_aspect`. The candidate leaving the fewest free slots wins,
/// ties going to the smaller block. The seed itself is always a candidate.
pub fn enlarge_reserve(
    n: usize,
    grid: (usize, usize),
    seed: (usize, usize),
    target_aspect: f64,
    bin: BinDimensions,
    config: &PackerConfig,
) -> Option<ReserveBlock> {
    let (grid_rows, grid_cols) = grid;
    let (seed_rows, seed_cols) = seed;
    let max_rows = usize::max(seed_rows, (grid_rows as f64 * config.reserve_max_fraction).floor() as usize);
    let max_cols = usize::max(seed_cols, (grid_cols as f64 * config.reserve_max_fraction).floor() as usize);

    let within_slack = |rows: usize, cols: usize| {
        let aspect = (cols as f64 * bin.width as f64) / (rows as f64 * bin.height as f64);
        (aspect - target_aspect).abs() / target_aspect <= config.reserve_aspect_slack
    };

    (seed_rows..=max_rows)
        .cartesian_product(seed_cols..=max_cols)
        .filter(|&(rows, cols)| (rows, cols) == seed || within_slack(rows, cols))
        .filter_map(|(rows, cols)| {
            plan_slots(n, grid_rows, grid_cols, rows, cols).map(|plan| ReserveBlock { rows, cols, plan })
        })
        .inspect(|b| trace!("[RESERVE] candidate {}x{} slots, leftover {}", b.rows, b.cols, b.plan.leftover))
        .min_by_key(|b| (b.plan.leftover, b.rows * b.cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(w: u32, h: u32) -> BinDimensions {
        BinDimensions::try_new(w, h).unwrap()
    }

    #[test]
    fn fixed_rect_positions() {
        let center = ReserveSpec::fixed(20, 10, ReservePosition::Center);
        let top_left = ReserveSpec::fixed(20, 10, ReservePosition::TopLeft);
        assert_eq!(
            fixed_reserve_rect(&center, (100, 50)),
            Some(Rect::try_new(40.0, 20.0, 60.0, 30.0).unwrap())
        );
        assert_eq!(
            fixed_reserve_rect(&top_left, (100, 50)),
            Some(Rect::try_new(0.0, 0.0, 20.0, 10.0).unwrap())
        );
        assert_eq!(fixed_reserve_rect(&center, (19, 50)), None);
    }

    #[test]
    fn seed_covers_two_bins() {
        let config = PackerConfig::default();
        // two bin areas at the bin aspect are ~1.41 bins wide and high
        assert_eq!(seed_slots(&ReserveSpec::auto(), bin(1300, 1900), &config), (2, 2));
        let mut wide = ReserveSpec::auto();
        wide.width = 2500;
        wide.height = 1000;
        assert_eq!(seed_slots(&wide, bin(1000, 1000), &config), (1, 3));
        assert_eq!(target_aspect(&wide, bin(1000, 1000)), 2.5);
    }

    #[test]
    fn enlarged_reserve_absorbs_leftover() {
        let config = PackerConfig::default();
        // 10x10 grid, 90 bins: a 3x3 block would leave a single free slot but exceeds the 20% cap
        let block = enlarge_reserve(90, (10, 10), (1, 1), 1.0, bin(10, 10), &config).unwrap();
        assert_eq!((block.rows, block.cols), (2, 2));
        assert_eq!(block.plan.leftover, 6);
        // without room to grow the seed is kept
        let block = enlarge_reserve(98, (10, 10), (1, 1), 1.0, bin(10, 10), &config).unwrap();
        assert_eq!((block.rows, block.cols), (1, 1));
        assert_eq!(block.plan.leftover, 1);
    }

    #[test]
    fn infeasible_seed_yields_nothing() {
        let config = PackerConfig::default();
        assert_eq!(enlarge_reserve(100, (10, 10), (1, 1), 1.0, bin(10, 10), &config), None);
    }
}
