use crate::entities::{BinDimensions, EnvelopeShape};
use log::{debug, info};

/// Notable moments of a packing call.
#[derive(Debug, Clone, PartialEq)]
pub enum PackEvent {
    PackStarted {
        n: usize,
        shape: EnvelopeShape,
        bin: BinDimensions,
    },
    /// The size search enclosed the minimum between a failing and a fitting size
    BoundsEstablished { lower: f64, upper: f64 },
    SearchStep { size: f64, fits: bool },
    ReserveResolved {
        width: u32,
        height: u32,
        excluded_slots: usize,
    },
    PackFinished {
        n: usize,
        rows: usize,
        columns: usize,
        canvas_width: u32,
        canvas_height: u32,
        density: f64,
    },
}

/// Receives the [`PackEvent`]s of a [`Packer`](crate::packing::Packer).
pub trait EventSink {
    fn emit(&self, event: &PackEvent);
}

impl<F> EventSink for F
where
    F: Fn(&PackEvent),
{
    fn emit(&self, event: &PackEvent) {
        self(event)
    }
}

/// Forwards every event to the [`log`] facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: &PackEvent) {
        match event {
            PackEvent::PackStarted { n, shape, bin } => {
                info!("[PACK] packing {n} bins of {}x{} into a {shape} envelope", bin.width, bin.height)
            }
            PackEvent::BoundsEstablished { lower, upper } => {
                debug!("[PACK] minimum enclosed in [{lower:.1}, {upper:.1}]")
            }
            PackEvent::SearchStep { size, fits } => {
                debug!("[PACK] size {size:.2}: {}", if *fits { "fits" } else { "too small" })
            }
            PackEvent::ReserveResolved {
                width,
                height,
                excluded_slots,
            } => info!("[PACK] reserve resolved to {width}x{height}, {excluded_slots} slots excluded"),
            PackEvent::PackFinished {
                n,
                rows,
                columns,
                canvas_width,
                canvas_height,
                density,
            } => info!(
                "[PACK] placed {n} bins in {rows} rows x {columns} cols on a {canvas_width}x{canvas_height} canvas (density: {:.3}%)",
                density * 100.0
            ),
        }
    }
}
