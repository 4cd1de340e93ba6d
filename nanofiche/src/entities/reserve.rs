use crate::geometry::Rect;
use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservePosition {
    /// Centered in the canvas
    #[default]
    Center,
    /// Anchored at the canvas origin
    TopLeft,
}

/// A rectangular region of the canvas that must stay free of bins, e.g. for a logo or metadata block.
///
/// When `auto_size` is set, `width` and `height` are only a seed (zero means "derive one")
/// and the final dimensions are chosen to absorb slots the layout does not need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReserveSpec {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub position: ReservePosition,
    #[serde(default)]
    pub auto_size: bool,
    /// Target width:height of an auto-sized reserve, the aspect of a bin if undefined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve_aspect: Option<(f64, f64)>,
}

fn default_enabled() -> bool {
    true
}

impl ReserveSpec {
    pub fn fixed(width: u32, height: u32, position: ReservePosition) -> Self {
        ReserveSpec {
            enabled: true,
            width,
            height,
            position,
            auto_size: false,
            reserve_aspect: None,
        }
    }

    /// An auto-sized reserve in the top-left corner, seeded from the bin dimensions.
    pub fn auto() -> Self {
        ReserveSpec {
            enabled: true,
            width: 0,
            height: 0,
            position: ReservePosition::TopLeft,
            auto_size: true,
            reserve_aspect: None,
        }
    }

    pub fn with_aspect(mut self, aspect_x: f64, aspect_y: f64) -> Self {
        self.reserve_aspect = Some((aspect_x, aspect_y));
        self
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    pub fn validate(&self) -> Result<()> {
        match self.auto_size {
            true => {
                ensure!(
                    self.position == ReservePosition::TopLeft,
                    "auto-sized reserves must be anchored top-left, got {:?}",
                    self.position
                );
                ensure!(
                    (self.width == 0) == (self.height == 0),
                    "auto-sized reserve seed must set both dimensions or neither, got {}x{}",
                    self.width,
                    self.height
                );
            }
            false => ensure!(
                self.width > 0 && self.height > 0,
                "reserve dimensions must be positive, got {}x{}",
                self.width,
                self.height
            ),
        }
        if let Some((ax, ay)) = self.reserve_aspect {
            ensure!(
                ax.is_finite() && ay.is_finite() && ax > 0.0 && ay > 0.0,
                "reserve aspect must be positive and finite, got {ax}:{ay}"
            );
        }
        Ok(())
    }
}

/// The reserve as it ended up in the layout, with auto-sized dimensions made concrete.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedReserve {
    /// Echo of the requested reserve, `width` and `height` set to the final dimensions
    pub spec: ReserveSpec,
    /// Region in canvas coordinates
    pub rect: Rect,
    /// Number of grid slots in the occupied rows that were skipped because they overlap the reserve
    pub excluded_slots: usize,
}
