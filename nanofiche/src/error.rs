//! Error types for the packing engine.

use crate::entities::EnvelopeShape;
use thiserror::Error;

/// Result type alias for packing operations.
pub type Result<T> = std::result::Result<T, PackError>;

/// Failures reported by [`Packer::pack`](crate::packing::Packer::pack).
///
/// None of them are retried internally, and none of them come with a partial layout.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PackError {
    /// The request was rejected before any work was attempted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The size search hit its bracket or iteration cap without finding an envelope holding all bins.
    #[error("size search exhausted for {shape} envelope with {n} bins (last tested size: {last_size:.1})")]
    SizeSearchExhausted {
        shape: EnvelopeShape,
        n: usize,
        last_size: f64,
    },

    /// A fixed reserve leaves no envelope, up to the largest one allowed, able to hold all bins.
    #[error("reserve of {width}x{height} px cannot be accommodated in a {shape} envelope")]
    ReserveInfeasible {
        width: u32,
        height: u32,
        shape: EnvelopeShape,
    },
}

impl PackError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        PackError::InvalidInput(msg.into())
    }
}

impl From<anyhow::Error> for PackError {
    fn from(err: anyhow::Error) -> Self {
        PackError::InvalidInput(format!("{err:#}"))
    }
}
