use crate::entities::SearchOutcome;
use serde::{Deserialize, Serialize};

/// External representation of a [`PackRequest`](crate::entities::PackRequest).
///
/// Integers are signed so that negative values can be read and rejected with a proper error.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPackRequest {
    /// Width of every bin in pixels
    pub bin_width: i64,
    /// Height of every bin in pixels
    pub bin_height: i64,
    /// Number of bins to place
    pub n: i64,
    pub envelope: ExtEnvelope,
}

/// External representation of an [`EnvelopeSpec`](crate::entities::EnvelopeSpec).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtEnvelope {
    pub shape: ExtShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve: Option<ExtReserve>,
}

/// Shapes an envelope can take, aspects given as width:height
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum ExtShape {
    Square,
    Rectangle { aspect_x: f64, aspect_y: f64 },
    Circle,
    Ellipse { aspect_x: f64, aspect_y: f64 },
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExtReservePosition {
    #[default]
    Center,
    TopLeft,
}

/// External representation of a [`ReserveSpec`](crate::entities::ReserveSpec).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtReserve {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub position: ExtReservePosition,
    #[serde(default)]
    pub auto_size: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve_aspect: Option<(f64, f64)>,
}

fn enabled_by_default() -> bool {
    true
}

/// External representation of a [`PackingResult`](crate::entities::PackingResult).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPackingResult {
    pub shape: ExtShape,
    pub bin_width: u32,
    pub bin_height: u32,
    pub rows: usize,
    pub columns: usize,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Outline of the envelope on the canvas
    pub envelope: ExtGeometry,
    /// Top-left pixel of every bin, in row-major order
    pub placements: Vec<ExtPlacement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve: Option<ExtResolvedReserve>,
    /// Total bin area over the envelope area
    pub density: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchOutcome>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum ExtGeometry {
    Box { width: u32, height: u32 },
    Circle { radius: f64 },
    Ellipse { semi_x: f64, semi_y: f64 },
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtPlacement {
    /// Position of the bin in the row-major order
    pub index: usize,
    pub x: u32,
    pub y: u32,
}

/// The reserve as it ended up in the layout
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtResolvedReserve {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub position: ExtReservePosition,
    pub auto_size: bool,
    /// Number of grid slots skipped because they overlapped the reserve
    pub excluded_slots: usize,
}
