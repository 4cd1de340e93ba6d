use crate::entities::{
    BinDimensions, EnvelopeShape, EnvelopeSpec, PackRequest, ReservePosition, ReserveSpec,
};
use crate::error::{PackError, Result};
use crate::io::ext_repr::{ExtEnvelope, ExtPackRequest, ExtReserve, ExtReservePosition, ExtShape};
use log::debug;

/// Converts an external request into an internal one, rejecting anything the packer would refuse.
pub fn import_request(ext_request: &ExtPackRequest) -> Result<PackRequest> {
    let bin = BinDimensions::try_new(
        to_u32(ext_request.bin_width, "bin width")?,
        to_u32(ext_request.bin_height, "bin height")?,
    )?;
    let n = usize::try_from(ext_request.n)
        .map_err(|_| PackError::invalid(format!("number of bins must not be negative, got {}", ext_request.n)))?;
    let envelope = import_envelope(&ext_request.envelope)?;

    debug!("[IMPORT] request for {n} bins of {}x{} in a {} envelope", bin.width, bin.height, envelope.shape);

    Ok(PackRequest { bin, n, envelope })
}

pub fn import_envelope(ext_envelope: &ExtEnvelope) -> Result<EnvelopeSpec> {
    let spec = EnvelopeSpec {
        shape: import_shape(ext_envelope.shape),
        reserve: ext_envelope.reserve.as_ref().map(import_reserve).transpose()?,
    };
    spec.validate()?;
    Ok(spec)
}

pub fn import_shape(ext_shape: ExtShape) -> EnvelopeShape {
    match ext_shape {
        ExtShape::Square => EnvelopeShape::Square,
        ExtShape::Rectangle { aspect_x, aspect_y } => EnvelopeShape::Rectangle { aspect_x, aspect_y },
        ExtShape::Circle => EnvelopeShape::Circle,
        ExtShape::Ellipse { aspect_x, aspect_y } => EnvelopeShape::Ellipse { aspect_x, aspect_y },
    }
}

pub fn import_reserve(ext_reserve: &ExtReserve) -> Result<ReserveSpec> {
    Ok(ReserveSpec {
        enabled: ext_reserve.enabled,
        width: to_u32(ext_reserve.width, "reserve width")?,
        height: to_u32(ext_reserve.height, "reserve height")?,
        position: match ext_reserve.position {
            ExtReservePosition::Center => ReservePosition::Center,
            ExtReservePosition::TopLeft => ReservePosition::TopLeft,
        },
        auto_size: ext_reserve.auto_size,
        reserve_aspect: ext_reserve.reserve_aspect,
    })
}

fn to_u32(value: i64, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| PackError::invalid(format!("{what} must be between 0 and {}, got {value}", u32::MAX)))
}
