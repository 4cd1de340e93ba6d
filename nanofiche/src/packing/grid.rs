use crate::entities::BinDimensions;
use crate::util::FPA;

/// Finds the `(rows, columns)` grid of `n` bins whose aspect best matches `target_aspect` (width over height).
///
/// Every row count from 1 to `n` is scored by its aspect error plus the fraction of grid slots left empty.
/// Near-equal scores are decided in favour of the smaller grid.
pub fn find_grid(n: usize, bin: BinDimensions, target_aspect: f64) -> (usize, usize) {
    let mut best: Option<(FPA, f64, usize, usize)> = None;

    for rows in 1..=n {
        let cols = n.div_ceil(rows);
        let grid_width = cols as f64 * bin.width as f64;
        let grid_height = rows as f64 * bin.height as f64;
        let area = grid_width * grid_height;

        let aspect_error = (grid_width / grid_height - target_aspect).abs();
        let normalized_area = area / (n as f64 * bin.area()) - 1.0;
        let score = FPA(aspect_error + normalized_area);

        let improves = match &best {
            None => true,
            Some((best_score, best_area, _, _)) => {
                score < *best_score || (score == *best_score && area < *best_area)
            }
        };
        if improves {
            best = Some((score, area, rows, cols));
        }
    }

    best.map_or((0, 0), |(_, _, rows, cols)| (rows, cols))
}

/// Smallest integer side of a square canvas whose bin grid holds at least `n` bins.
/// Returns `None` if no side up to `max_side` does.
pub fn min_square_side(n: usize, bin: BinDimensions, max_side: u32) -> Option<u32> {
    let capacity = |side: u64| (side / bin.width as u64) * (side / bin.height as u64);
    let n = n as u64;

    let mut side = (n as f64 * bin.area()).sqrt().ceil() as u64;
    while capacity(side) < n {
        side += 1;
        if side > max_side as u64 {
            return None;
        }
    }
    while side > 1 && capacity(side - 1) >= n {
        side -= 1;
    }
    match side <= max_side as u64 {
        true => Some(side as u32),
        false => None,
    }
}

/// Offset which centers a grid of `grid_dim` pixels in a canvas of `canvas_dim` pixels.
pub fn grid_offset(canvas_dim: u32, grid_dim: u32) -> u32 {
    canvas_dim.saturating_sub(grid_dim) / 2
}

/// Canvas of exactly `target_aspect` enclosing a `rows` by `cols` grid of bins.
/// The grid dimension that is relatively too short gets stretched (rounded up).
pub fn aspect_canvas(rows: usize, cols: usize, bin: BinDimensions, target_aspect: f64) -> (f64, f64) {
    let grid_width = cols as f64 * bin.width as f64;
    let grid_height = rows as f64 * bin.height as f64;
    match grid_width / grid_height > target_aspect {
        true => (grid_width, f64::max(grid_height, (grid_width / target_aspect).ceil())),
        false => (f64::max(grid_width, (grid_height * target_aspect).ceil()), grid_height),
    }
}

/// How `n` bins occupy a `rows` by `cols` grid with a `reserve_rows` by `reserve_cols` block removed from its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPlan {
    /// Rows holding at least one bin
    pub used_rows: usize,
    /// Free slots remaining in the whole grid
    pub leftover: usize,
}

pub fn plan_slots(
    n: usize,
    rows: usize,
    cols: usize,
    reserve_rows: usize,
    reserve_cols: usize,
) -> Option<SlotPlan> {
    if reserve_rows > rows || reserve_cols > cols {
        return None;
    }
    let excluded = reserve_rows * reserve_cols;
    let capacity = (rows * cols).checked_sub(excluded)?;
    if capacity < n || cols == 0 {
        return None;
    }

    let beside_reserve = cols - reserve_cols;
    let reserve_band_slots = reserve_rows * beside_reserve;
    let used_rows = match beside_reserve > 0 && n <= reserve_band_slots {
        true => n.div_ceil(beside_reserve),
        false => reserve_rows + (n - reserve_band_slots).div_ceil(cols),
    };

    Some(SlotPlan {
        used_rows,
        leftover: capacity - n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn bin(w: u32, h: u32) -> BinDimensions {
        BinDimensions::try_new(w, h).unwrap()
    }

    #[test_case(12, 1.0, (4, 3); "no waste, closest to square")]
    #[test_case(16, 1.0, (4, 4); "perfect square")]
    #[test_case(8, 2.0, (2, 4); "wide target")]
    #[test_case(1, 5.0, (1, 1); "single bin")]
    fn grid_factorization(n: usize, target: f64, expected: (usize, usize)) {
        assert_eq!(find_grid(n, bin(10, 10), target), expected);
    }

    #[test]
    fn grid_accounts_for_bin_aspect() {
        // tall bins favour more columns than rows
        let (rows, cols) = find_grid(6, bin(10, 30), 1.0);
        assert_eq!((rows, cols), (2, 3));
    }

    #[test]
    fn square_side_is_minimal() {
        let bin = bin(1300, 1900);
        let side = min_square_side(100, bin, 4_000_000).unwrap();
        let cap = |s: u32| (s / 1300) * (s / 1900);
        assert!(cap(side) >= 100);
        assert!(cap(side - 1) < 100);
        assert_eq!(side, 16900);
    }

    #[test]
    fn square_side_respects_limit() {
        assert_eq!(min_square_side(100, bin(10, 10), 50), None);
        assert_eq!(min_square_side(1, bin(7, 3), 50), Some(7));
    }

    #[test]
    fn aspect_canvas_stretches_short_side() {
        let (w, h) = aspect_canvas(2, 4, bin(10, 10), 1.0);
        assert_eq!((w, h), (40.0, 40.0));
        let (w, h) = aspect_canvas(4, 2, bin(10, 10), 1.5);
        assert_eq!((w, h), (60.0, 40.0));
        assert_eq!(grid_offset(60, 20), 20);
    }

    #[test]
    fn slot_plans() {
        // 4x4 grid, 2x2 reserve: 2 + 2 + 4 + 4 slots
        assert_eq!(
            plan_slots(9, 4, 4, 2, 2),
            Some(SlotPlan {
                used_rows: 4,
                leftover: 3
            })
        );
        assert_eq!(
            plan_slots(3, 4, 4, 2, 2),
            Some(SlotPlan {
                used_rows: 2,
                leftover: 9
            })
        );
        assert_eq!(plan_slots(13, 4, 4, 2, 2), None);
        assert_eq!(plan_slots(1, 4, 4, 5, 1), None);
        // reserve spanning all columns pushes bins below it
        assert_eq!(
            plan_slots(5, 4, 4, 1, 4),
            Some(SlotPlan {
                used_rows: 3,
                leftover: 7
            })
        );
    }
}
