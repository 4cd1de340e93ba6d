use crate::entities::{BinDimensions, PackingResult, Placement};
use crate::geometry::Rect;
use crate::geometry::geo_traits::CollidesWith;
use itertools::Itertools;
use log::error;

//Various checks to verify correctness of a layout
//Used in debug_assert!() blocks and tests

/// No two bins overlap (touching edges are allowed).
pub fn placements_disjoint(placements: &[Placement], bin: BinDimensions) -> bool {
    let sorted = placements
        .iter()
        .sorted_by(|a, b| a.row_major_cmp(b))
        .collect_vec();

    for (i, a) in sorted.iter().enumerate() {
        let a_rect = Rect::from_placement(**a, bin);
        //only bins starting less than a bin height lower can overlap with a
        for b in sorted[i + 1..]
            .iter()
            .take_while(|b| (b.y as u64) < a.y as u64 + bin.height as u64)
        {
            if a_rect.collides_with(&Rect::from_placement(**b, bin)) {
                error!("bins at {a:?} and {b:?} overlap");
                return false;
            }
        }
    }
    true
}

/// Every bin lies entirely within the canvas.
pub fn placements_within_canvas(result: &PackingResult) -> bool {
    result.placements.iter().all(|p| {
        let inside = p.x as u64 + result.bin.width as u64 <= result.canvas_width as u64
            && p.y as u64 + result.bin.height as u64 <= result.canvas_height as u64;
        if !inside {
            error!(
                "bin at {p:?} exceeds the {}x{} canvas",
                result.canvas_width, result.canvas_height
            );
        }
        inside
    })
}

/// Placements are strictly ordered top-to-bottom, then left-to-right.
pub fn placements_row_major(placements: &[Placement]) -> bool {
    placements
        .iter()
        .tuple_windows()
        .all(|(a, b)| a.row_major_cmp(b).is_lt())
}

/// No bin overlaps the reserve.
pub fn placements_avoid_reserve(result: &PackingResult) -> bool {
    match &result.reserve {
        None => true,
        Some(reserve) => result.placements.iter().all(|p| {
            let overlaps = reserve
                .rect
                .collides_with(&Rect::from_placement(*p, result.bin));
            if overlaps {
                error!("bin at {p:?} overlaps the reserve {:?}", reserve.rect);
            }
            !overlaps
        }),
    }
}

/// All invariants a returned layout of `n` bins has to satisfy.
pub fn layout_is_valid(result: &PackingResult, n: usize) -> bool {
    result.n_placed() == n
        && placements_row_major(&result.placements)
        && placements_disjoint(&result.placements, result.bin)
        && placements_within_canvas(result)
        && placements_avoid_reserve(result)
}
