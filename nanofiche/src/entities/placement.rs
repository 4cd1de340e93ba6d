use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Top-left pixel of a single placed bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
}

impl Placement {
    pub fn new(x: u32, y: u32) -> Self {
        Placement { x, y }
    }

    /// Orders placements top-to-bottom, then left-to-right.
    pub fn row_major_cmp(&self, other: &Placement) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl From<(u32, u32)> for Placement {
    fn from((x, y): (u32, u32)) -> Self {
        Placement { x, y }
    }
}
