use crate::entities::{BinDimensions, EnvelopeSpec};

/// Everything needed for a single packing call.
#[derive(Debug, Clone, PartialEq)]
pub struct PackRequest {
    pub bin: BinDimensions,
    pub n: usize,
    pub envelope: EnvelopeSpec,
}
