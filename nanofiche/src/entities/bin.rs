use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Pixel dimensions shared by every bin of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinDimensions {
    pub width: u32,
    pub height: u32,
}

impl BinDimensions {
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        let bin = BinDimensions { width, height };
        bin.validate()?;
        Ok(bin)
    }

    /// Fails if either dimension is zero.
    /// Needed for values that were deserialized rather than built with [`BinDimensions::try_new`].
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "bin dimensions must be positive, got {}x{}",
            self.width,
            self.height
        );
        Ok(())
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    /// Width over height
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}
