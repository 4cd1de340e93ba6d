use crate::entities::{
    BinDimensions, EnvelopeShape, EnvelopeSpec, PackingResult, ReserveSpec, ResolvedReserve,
    SearchOutcome,
};
use crate::error::{PackError, Result};
use crate::packing::envelopes::{
    BoxEnvelope, BoxReserve, Candidate, CircleEnvelope, EllipseEnvelope, SizedEnvelope,
};
use crate::packing::events::{EventSink, LogSink, PackEvent};
use crate::packing::search::{BinarySearch, SearchExhausted, SearchProgress};
use crate::packing::{grid, reserve};
use crate::util::{PackerConfig, assertions};
use log::debug;

/// Computes layouts of equally-sized bins in envelopes of minimal size.
///
/// A `Packer` holds no state between calls, so the same instance can serve any number of
/// (concurrent) [`pack`](Packer::pack) calls.
pub struct Packer {
    bin: BinDimensions,
    config: PackerConfig,
    sink: Box<dyn EventSink + Send + Sync>,
}

impl Packer {
    /// Creates a packer reporting its progress to the [`log`] facade.
    pub fn new(bin: BinDimensions, config: PackerConfig) -> Self {
        Packer {
            bin,
            config,
            sink: Box::new(LogSink),
        }
    }

    /// Replaces the destination of the packer's [`PackEvent`]s.
    pub fn with_sink(mut self, sink: impl EventSink + Send + Sync + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn bin(&self) -> BinDimensions {
        self.bin
    }

    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Places `n` bins in the smallest envelope of the requested shape this packer can find.
    ///
    /// Either all `n` bins are placed, or an error is returned.
    pub fn pack(&self, n: usize, spec: &EnvelopeSpec) -> Result<PackingResult> {
        self.bin.validate()?;
        self.config.validate()?;
        spec.validate()?;

        let shape = spec.shape;
        self.sink.emit(&PackEvent::PackStarted {
            n,
            shape,
            bin: self.bin,
        });

        if n == 0 {
            let result = PackingResult::empty(shape, self.bin);
            self.finish(&result);
            return Ok(result);
        }

        let reserve = spec.active_reserve().copied();
        if let Some(r) = reserve.filter(|r| !r.auto_size) {
            let max_side = self.config.max_canvas_side;
            if r.width > max_side || r.height > max_side {
                return Err(PackError::ReserveInfeasible {
                    width: r.width,
                    height: r.height,
                    shape,
                });
            }
        }

        let result = match (shape, reserve) {
            (EnvelopeShape::Square, None) => self.pack_square(n)?,
            (EnvelopeShape::Rectangle { .. }, None) => self.pack_rectangle(n, shape)?,
            (EnvelopeShape::Square | EnvelopeShape::Rectangle { .. }, Some(r)) if r.auto_size => {
                self.pack_auto_reserve(n, shape, r)?
            }
            (EnvelopeShape::Square | EnvelopeShape::Rectangle { .. }, Some(r)) => {
                let envelope = BoxEnvelope {
                    bin: self.bin,
                    ratio: shape.ratio(),
                    reserve: BoxReserve::Fixed(r),
                    max_canvas_side: self.config.max_canvas_side,
                };
                self.pack_searched(n, shape, &envelope, Some(r))?
            }
            (EnvelopeShape::Circle, r) => {
                let envelope = CircleEnvelope {
                    bin: self.bin,
                    reserve: r,
                    max_canvas_side: self.config.max_canvas_side,
                };
                self.pack_searched(n, shape, &envelope, r)?
            }
            (EnvelopeShape::Ellipse { .. }, r) => {
                let envelope = EllipseEnvelope {
                    bin: self.bin,
                    ratio: shape.ratio(),
                    margin: self.config.ellipse_margin,
                    reserve: r,
                    max_canvas_side: self.config.max_canvas_side,
                };
                self.pack_searched(n, shape, &envelope, r)?
            }
        };

        if result.n_placed() != n {
            return Err(PackError::SizeSearchExhausted {
                shape,
                n,
                last_size: result.search.map_or(0.0, |s| s.size),
            });
        }
        debug_assert!(assertions::layout_is_valid(&result, n));

        self.finish(&result);
        Ok(result)
    }

    /// Smallest square canvas whose grid holds all bins.
    fn pack_square(&self, n: usize) -> Result<PackingResult> {
        let shape = EnvelopeShape::Square;
        let max_side = self.config.max_canvas_side;
        let side = grid::min_square_side(n, self.bin, max_side)
            .ok_or_else(|| self.exhausted(shape, n, None, max_side as f64))?;

        let cols = (side / self.bin.width) as usize;
        let rows = n.div_ceil(cols);
        let candidate = self
            .box_envelope(1.0, BoxReserve::None)
            .layout(n, (side, side), Some(rows), Some(cols))
            .ok_or_else(|| self.exhausted(shape, n, None, side as f64))?;

        Ok(self.build_result(shape, candidate, None, None))
    }

    /// Best-matching grid, in a canvas stretched to the exact aspect of the rectangle.
    fn pack_rectangle(&self, n: usize, shape: EnvelopeShape) -> Result<PackingResult> {
        let ratio = shape.ratio();
        let (rows, cols) = grid::find_grid(n, self.bin, ratio);
        let (width, height) = grid::aspect_canvas(rows, cols, self.bin, ratio);
        debug!("[PACK] {rows}x{cols} grid selected for a {width}x{height} canvas");

        let largest = f64::max(width, height);
        if largest > self.config.max_canvas_side as f64 {
            return Err(self.exhausted(shape, n, None, largest));
        }
        let candidate = self
            .box_envelope(ratio, BoxReserve::None)
            .layout(n, (width as u32, height as u32), Some(rows), Some(cols))
            .ok_or_else(|| self.exhausted(shape, n, None, height))?;

        Ok(self.build_result(shape, candidate, None, None))
    }

    /// Size search with a seed reserve, which is then enlarged to absorb slots the bins do not need.
    fn pack_auto_reserve(
        &self,
        n: usize,
        shape: EnvelopeShape,
        reserve: ReserveSpec,
    ) -> Result<PackingResult> {
        let (bw, bh) = (self.bin.width, self.bin.height);
        let seed = reserve::seed_slots(&reserve, self.bin, &self.config);
        let target_aspect = reserve::target_aspect(&reserve, self.bin);
        debug!(
            "[PACK] auto-sized reserve seeded with {}x{} slots (target aspect: {target_aspect:.3})",
            seed.0, seed.1
        );

        let seed_envelope = self.box_envelope(
            shape.ratio(),
            BoxReserve::Slots {
                rows: seed.0,
                cols: seed.1,
            },
        );
        let (outcome, seed_candidate) =
            self.search(n, &seed_envelope)
                .map_err(|_| PackError::ReserveInfeasible {
                    width: slot_extent(seed.1, bw),
                    height: slot_extent(seed.0, bh),
                    shape,
                })?;

        let canvas = seed_candidate.canvas;
        let grid = ((canvas.1 / bh) as usize, seed_candidate.columns);

        let enlarged = reserve::enlarge_reserve(n, grid, seed, target_aspect, self.bin, &self.config)
            .and_then(|block| {
                debug!(
                    "[PACK] reserve enlarged from {}x{} to {}x{} slots, {} slots left over",
                    seed.0, seed.1, block.rows, block.cols, block.plan.leftover
                );
                let envelope = BoxEnvelope {
                    reserve: BoxReserve::Slots {
                        rows: block.rows,
                        cols: block.cols,
                    },
                    ..seed_envelope
                };
                let band_rows = usize::max(block.plan.used_rows, block.rows);
                envelope.layout(n, canvas, Some(band_rows), None)
            });

        let candidate = enlarged
            .or_else(|| {
                debug!("[PACK] enlarged reserve rejected, falling back to the seed");
                let plan = grid::plan_slots(n, grid.0, grid.1, seed.0, seed.1)?;
                let band_rows = usize::max(plan.used_rows, seed.0);
                seed_envelope.layout(n, canvas, Some(band_rows), None)
            })
            .unwrap_or(seed_candidate);

        Ok(self.build_result(shape, candidate, Some(outcome), Some(reserve)))
    }

    /// Minimizes the size parameter of `envelope` by bisection.
    fn pack_searched(
        &self,
        n: usize,
        shape: EnvelopeShape,
        envelope: &impl SizedEnvelope,
        reserve: Option<ReserveSpec>,
    ) -> Result<PackingResult> {
        let (outcome, candidate) = self
            .search(n, envelope)
            .map_err(|e| self.exhausted(shape, n, reserve.as_ref(), e.last_size))?;
        Ok(self.build_result(shape, candidate, Some(outcome), reserve))
    }

    fn search(
        &self,
        n: usize,
        envelope: &impl SizedEnvelope,
    ) -> std::result::Result<(SearchOutcome, Candidate), SearchExhausted> {
        let search = BinarySearch {
            tolerance: envelope.tolerance(&self.config),
            max_iterations: self.config.max_iterations,
            max_bracket_steps: self.config.max_bracket_steps,
            growth: self.config.bracket_growth,
            max_size: envelope.max_size(),
        };
        search.minimize(
            envelope.lower_bound(n),
            |size| envelope.try_place(n, size),
            |progress| {
                let event = match progress {
                    SearchProgress::Probe { size, fits } => PackEvent::SearchStep { size, fits },
                    SearchProgress::Bracketed { lower, upper } => {
                        PackEvent::BoundsEstablished { lower, upper }
                    }
                };
                self.sink.emit(&event);
            },
        )
    }

    fn box_envelope(&self, ratio: f64, reserve: BoxReserve) -> BoxEnvelope {
        BoxEnvelope {
            bin: self.bin,
            ratio,
            reserve,
            max_canvas_side: self.config.max_canvas_side,
        }
    }

    fn build_result(
        &self,
        shape: EnvelopeShape,
        candidate: Candidate,
        search: Option<SearchOutcome>,
        reserve: Option<ReserveSpec>,
    ) -> PackingResult {
        let Candidate {
            canvas: (canvas_width, canvas_height),
            fill,
            envelope,
            reserve: reserve_rect,
            columns,
        } = candidate;

        let reserve = match (reserve, reserve_rect) {
            (Some(spec), Some(rect)) => {
                let resolved = ResolvedReserve {
                    spec: ReserveSpec {
                        width: rect.width() as u32,
                        height: rect.height() as u32,
                        ..spec
                    },
                    rect,
                    excluded_slots: fill.excluded,
                };
                self.sink.emit(&PackEvent::ReserveResolved {
                    width: resolved.spec.width,
                    height: resolved.spec.height,
                    excluded_slots: resolved.excluded_slots,
                });
                Some(resolved)
            }
            _ => None,
        };

        PackingResult {
            rows: fill.rows_used,
            columns,
            canvas_width,
            canvas_height,
            placements: fill.placements,
            shape,
            bin: self.bin,
            reserve,
            envelope,
            search,
        }
    }

    fn exhausted(
        &self,
        shape: EnvelopeShape,
        n: usize,
        reserve: Option<&ReserveSpec>,
        last_size: f64,
    ) -> PackError {
        match reserve {
            Some(r) => PackError::ReserveInfeasible {
                width: r.width,
                height: r.height,
                shape,
            },
            None => PackError::SizeSearchExhausted {
                shape,
                n,
                last_size,
            },
        }
    }

    fn finish(&self, result: &PackingResult) {
        self.sink.emit(&PackEvent::PackFinished {
            n: result.n_placed(),
            rows: result.rows,
            columns: result.columns,
            canvas_width: result.canvas_width,
            canvas_height: result.canvas_height,
            density: result.density(),
        });
    }
}

/// Length of `slots` consecutive bin sides, saturating at `u32::MAX`.
fn slot_extent(slots: usize, side: u32) -> u32 {
    u32::try_from(slots as u64 * side as u64).unwrap_or(u32::MAX)
}

/// Packs `n` bins of `bin_width` by `bin_height` with the default [`PackerConfig`].
pub fn pack(bin_width: u32, bin_height: u32, n: usize, spec: &EnvelopeSpec) -> Result<PackingResult> {
    let bin = BinDimensions::try_new(bin_width, bin_height)?;
    Packer::new(bin, PackerConfig::default()).pack(n, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EnvelopeGeometry, Placement, ReservePosition};
    use std::sync::{Arc, Mutex};

    fn packer(w: u32, h: u32) -> Packer {
        Packer::new(BinDimensions::try_new(w, h).unwrap(), PackerConfig::default())
    }

    #[test]
    fn zero_bins_give_an_empty_canvas() {
        let spec = EnvelopeSpec::new(EnvelopeShape::Circle)
            .with_reserve(ReserveSpec::fixed(10, 10, ReservePosition::Center));
        let result = packer(10, 10).pack(0, &spec).unwrap();
        assert!(result.placements.is_empty());
        assert_eq!((result.canvas_width, result.canvas_height), (0, 0));
        assert_eq!((result.rows, result.columns), (0, 0));
        assert!(result.reserve.is_none());
    }

    #[test]
    fn square_grid_is_centered() {
        let result = packer(1300, 1900).pack(100, &EnvelopeShape::Square.into()).unwrap();
        assert_eq!((result.canvas_width, result.canvas_height), (16900, 16900));
        assert_eq!((result.rows, result.columns), (8, 13));
        assert_eq!(result.placements[0], Placement::new(0, 850));
        assert_eq!(result.placements[99], Placement::new(8 * 1300, 850 + 7 * 1900));
        assert!(result.search.is_none());
    }

    #[test]
    fn rectangle_canvas_has_exact_aspect() {
        let shape = EnvelopeShape::Rectangle {
            aspect_x: 2.0,
            aspect_y: 1.0,
        };
        let result = packer(10, 10).pack(8, &shape.into()).unwrap();
        assert_eq!((result.rows, result.columns), (2, 4));
        assert_eq!((result.canvas_width, result.canvas_height), (40, 20));
        assert_eq!(
            result.envelope,
            EnvelopeGeometry::Box {
                width: 40,
                height: 20
            }
        );
    }

    #[test]
    fn invalid_requests_are_rejected() {
        let bad_aspect = EnvelopeShape::Ellipse {
            aspect_x: -3.0,
            aspect_y: 2.0,
        };
        assert!(matches!(
            packer(10, 10).pack(5, &bad_aspect.into()),
            Err(PackError::InvalidInput(_))
        ));
        let auto_center = ReserveSpec {
            position: ReservePosition::Center,
            ..ReserveSpec::auto()
        };
        let spec = EnvelopeSpec::new(EnvelopeShape::Square).with_reserve(auto_center);
        assert!(matches!(packer(10, 10).pack(5, &spec), Err(PackError::InvalidInput(_))));
        assert!(matches!(
            pack(0, 10, 5, &EnvelopeShape::Square.into()),
            Err(PackError::InvalidInput(_))
        ));
    }

    #[test]
    fn oversized_reserve_is_infeasible() {
        let config = PackerConfig {
            max_canvas_side: 1000,
            ..PackerConfig::default()
        };
        let packer = Packer::new(BinDimensions::try_new(10, 10).unwrap(), config);
        let spec = EnvelopeSpec::new(EnvelopeShape::Circle)
            .with_reserve(ReserveSpec::fixed(2000, 10, ReservePosition::Center));
        assert_eq!(
            packer.pack(5, &spec),
            Err(PackError::ReserveInfeasible {
                width: 2000,
                height: 10,
                shape: EnvelopeShape::Circle
            })
        );
        // a reserve filling the largest circle leaves no room for bins
        let spec = EnvelopeSpec::new(EnvelopeShape::Circle)
            .with_reserve(ReserveSpec::fixed(1000, 1000, ReservePosition::Center));
        assert!(matches!(packer.pack(5, &spec), Err(PackError::ReserveInfeasible { .. })));
    }

    #[test]
    fn auto_reserve_of_huge_bins_is_infeasible() {
        let spec = EnvelopeSpec::new(EnvelopeShape::Square).with_reserve(ReserveSpec::auto());
        // the 2x2 seed block is wider than any u32 extent
        assert_eq!(
            packer(3_000_000_000, 1).pack(1, &spec),
            Err(PackError::ReserveInfeasible {
                width: u32::MAX,
                height: 2,
                shape: EnvelopeShape::Square
            })
        );
        assert_eq!(slot_extent(3, 1900), 5700);
    }

    #[test]
    fn too_many_bins_exhaust_the_search() {
        let config = PackerConfig {
            max_canvas_side: 100,
            ..PackerConfig::default()
        };
        let packer = Packer::new(BinDimensions::try_new(10, 10).unwrap(), config);
        assert!(matches!(
            packer.pack(1000, &EnvelopeShape::Circle.into()),
            Err(PackError::SizeSearchExhausted { n: 1000, .. })
        ));
        assert!(matches!(
            packer.pack(1000, &EnvelopeShape::Square.into()),
            Err(PackError::SizeSearchExhausted { .. })
        ));
    }

    #[test]
    fn events_reach_the_sink() {
        let events = Arc::new(Mutex::new(vec![]));
        let recorded = events.clone();
        let packer = packer(13, 19).with_sink(move |e: &PackEvent| {
            recorded.lock().unwrap().push(e.clone());
        });
        packer.pack(40, &EnvelopeShape::Circle.into()).unwrap();

        let events = events.lock().unwrap();
        assert!(matches!(events.first(), Some(PackEvent::PackStarted { n: 40, .. })));
        assert!(matches!(events.last(), Some(PackEvent::PackFinished { n: 40, .. })));
        assert!(events.iter().any(|e| matches!(e, PackEvent::BoundsEstablished { .. })));
        assert!(events.iter().any(|e| matches!(e, PackEvent::SearchStep { fits: true, .. })));
    }

    #[test]
    fn fixed_reserve_is_echoed() {
        let spec = EnvelopeSpec::new(EnvelopeShape::Square)
            .with_reserve(ReserveSpec::fixed(25, 15, ReservePosition::Center));
        let result = packer(10, 10).pack(30, &spec).unwrap();
        let reserve = result.reserve.unwrap();
        assert_eq!((reserve.spec.width, reserve.spec.height), (25, 15));
        assert_eq!(reserve.rect.width(), 25.0);
        assert!(reserve.excluded_slots > 0);
        assert!(assertions::layout_is_valid(&result, 30));
    }
}
