use crate::entities::{
    BinDimensions, EnvelopeGeometry, EnvelopeShape, Placement, ResolvedReserve,
};
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Summary of a size search: the smallest size found to hold all bins and the largest one observed to fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Size parameter of the returned envelope (radius, vertical semi-axis or canvas height)
    pub size: f64,
    /// Largest size tested without fitting all bins, 0 if none was
    pub failed_size: f64,
    /// Number of bisection steps performed
    pub iterations: usize,
}

/// The layout of a single packing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingResult {
    /// Number of occupied rows
    pub rows: usize,
    /// Grid columns for square and rectangular envelopes, length of the widest row otherwise
    pub columns: usize,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Top-left pixel of every bin, in row-major order
    pub placements: Vec<Placement>,
    pub shape: EnvelopeShape,
    pub bin: BinDimensions,
    pub reserve: Option<ResolvedReserve>,
    pub envelope: EnvelopeGeometry,
    pub search: Option<SearchOutcome>,
}

impl PackingResult {
    /// Result for a request without any bins.
    pub fn empty(shape: EnvelopeShape, bin: BinDimensions) -> Self {
        let envelope = match shape {
            EnvelopeShape::Square | EnvelopeShape::Rectangle { .. } => EnvelopeGeometry::Box {
                width: 0,
                height: 0,
            },
            EnvelopeShape::Circle => EnvelopeGeometry::Circle { radius: 0.0 },
            EnvelopeShape::Ellipse { .. } => EnvelopeGeometry::Ellipse {
                semi_x: 0.0,
                semi_y: 0.0,
            },
        };
        PackingResult {
            rows: 0,
            columns: 0,
            canvas_width: 0,
            canvas_height: 0,
            placements: vec![],
            shape,
            bin,
            reserve: None,
            envelope,
            search: None,
        }
    }

    pub fn n_placed(&self) -> usize {
        self.placements.len()
    }

    /// Footprint of the `i`-th bin in canvas coordinates
    pub fn placement_rect(&self, i: usize) -> Option<Rect> {
        self.placements
            .get(i)
            .map(|p| Rect::from_placement(*p, self.bin))
    }

    /// Total bin area over the area of the envelope
    pub fn density(&self) -> f64 {
        ratio(self.bin_area(), self.envelope.area())
    }

    /// Total bin area over the area of the canvas
    pub fn canvas_density(&self) -> f64 {
        let canvas_area = self.canvas_width as f64 * self.canvas_height as f64;
        ratio(self.bin_area(), canvas_area)
    }

    pub fn canvas_pixels(&self) -> u64 {
        self.canvas_width as u64 * self.canvas_height as u64
    }

    fn bin_area(&self) -> f64 {
        self.n_placed() as f64 * self.bin.area()
    }
}

fn ratio(num: f64, denom: f64) -> f64 {
    match denom > 0.0 {
        true => num / denom,
        false => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_zero_density() {
        let bin = BinDimensions::try_new(10, 20).unwrap();
        let result = PackingResult::empty(EnvelopeShape::Circle, bin);
        assert_eq!(result.n_placed(), 0);
        assert_eq!(result.density(), 0.0);
        assert_eq!(result.canvas_density(), 0.0);
        assert!(result.placement_rect(0).is_none());
    }

    #[test]
    fn densities_of_a_full_grid() {
        let bin = BinDimensions::try_new(10, 20).unwrap();
        let mut result = PackingResult::empty(EnvelopeShape::Square, bin);
        result.canvas_width = 40;
        result.canvas_height = 40;
        result.envelope = EnvelopeGeometry::Box {
            width: 40,
            height: 40,
        };
        result.placements = (0..2)
            .flat_map(|r| (0..4).map(move |c| Placement::new(c * 10, r * 20)))
            .collect();
        assert_eq!(result.density(), 1.0);
        assert_eq!(result.canvas_density(), 1.0);
        assert_eq!(result.canvas_pixels(), 1600);
        assert_eq!(
            result.placement_rect(5),
            Some(Rect::try_new(10.0, 20.0, 20.0, 40.0).unwrap())
        );
    }
}
