use crate::entities::{EnvelopeGeometry, EnvelopeShape, PackingResult, ReservePosition, ResolvedReserve};
use crate::io::ext_repr::{
    ExtGeometry, ExtPackingResult, ExtPlacement, ExtResolvedReserve, ExtReservePosition, ExtShape,
};

/// Exports a packing result to an external representation.
pub fn export_result(result: &PackingResult) -> ExtPackingResult {
    let placements = result
        .placements
        .iter()
        .enumerate()
        .map(|(index, p)| ExtPlacement { index, x: p.x, y: p.y })
        .collect();

    ExtPackingResult {
        shape: export_shape(result.shape),
        bin_width: result.bin.width,
        bin_height: result.bin.height,
        rows: result.rows,
        columns: result.columns,
        canvas_width: result.canvas_width,
        canvas_height: result.canvas_height,
        envelope: export_geometry(result.envelope),
        placements,
        reserve: result.reserve.as_ref().map(export_reserve),
        density: result.density(),
        search: result.search,
    }
}

pub fn export_shape(shape: EnvelopeShape) -> ExtShape {
    match shape {
        EnvelopeShape::Square => ExtShape::Square,
        EnvelopeShape::Rectangle { aspect_x, aspect_y } => ExtShape::Rectangle { aspect_x, aspect_y },
        EnvelopeShape::Circle => ExtShape::Circle,
        EnvelopeShape::Ellipse { aspect_x, aspect_y } => ExtShape::Ellipse { aspect_x, aspect_y },
    }
}

fn export_geometry(geometry: EnvelopeGeometry) -> ExtGeometry {
    match geometry {
        EnvelopeGeometry::Box { width, height } => ExtGeometry::Box { width, height },
        EnvelopeGeometry::Circle { radius } => ExtGeometry::Circle { radius },
        EnvelopeGeometry::Ellipse { semi_x, semi_y } => ExtGeometry::Ellipse { semi_x, semi_y },
    }
}

fn export_reserve(reserve: &ResolvedReserve) -> ExtResolvedReserve {
    ExtResolvedReserve {
        x: reserve.rect.x_min as u32,
        y: reserve.rect.y_min as u32,
        width: reserve.spec.width,
        height: reserve.spec.height,
        position: match reserve.spec.position {
            ReservePosition::Center => ExtReservePosition::Center,
            ReservePosition::TopLeft => ExtReservePosition::TopLeft,
        },
        auto_size: reserve.spec.auto_size,
        excluded_slots: reserve.excluded_slots,
    }
}
