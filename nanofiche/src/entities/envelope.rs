use crate::entities::ReserveSpec;
use anyhow::{Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt::{Display, Formatter};

/// Outline of the region the bins are packed into.
///
/// Aspects are expressed as a `aspect_x : aspect_y` ratio of width to height.
/// [`Square`](EnvelopeShape::Square) and [`Circle`](EnvelopeShape::Circle) are implicitly 1:1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnvelopeShape {
    Square,
    Rectangle { aspect_x: f64, aspect_y: f64 },
    Circle,
    Ellipse { aspect_x: f64, aspect_y: f64 },
}

impl EnvelopeShape {
    pub fn aspect(&self) -> (f64, f64) {
        match self {
            EnvelopeShape::Square | EnvelopeShape::Circle => (1.0, 1.0),
            EnvelopeShape::Rectangle { aspect_x, aspect_y }
            | EnvelopeShape::Ellipse { aspect_x, aspect_y } => (*aspect_x, *aspect_y),
        }
    }

    /// Width over height of the envelope
    pub fn ratio(&self) -> f64 {
        let (ax, ay) = self.aspect();
        ax / ay
    }

    /// Circles and ellipses, as opposed to squares and rectangles.
    pub fn is_curved(&self) -> bool {
        matches!(self, EnvelopeShape::Circle | EnvelopeShape::Ellipse { .. })
    }

    pub fn validate(&self) -> Result<()> {
        let (ax, ay) = self.aspect();
        ensure!(
            ax.is_finite() && ay.is_finite() && ax > 0.0 && ay > 0.0,
            "aspect of {self} envelope must be positive and finite, got {ax}:{ay}"
        );
        Ok(())
    }
}

impl Display for EnvelopeShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeShape::Square => write!(f, "square"),
            EnvelopeShape::Circle => write!(f, "circle"),
            EnvelopeShape::Rectangle { aspect_x, aspect_y } => {
                write!(f, "rectangle ({aspect_x}:{aspect_y})")
            }
            EnvelopeShape::Ellipse { aspect_x, aspect_y } => {
                write!(f, "ellipse ({aspect_x}:{aspect_y})")
            }
        }
    }
}

/// Shape of the envelope, optionally carrying a reserved region that must stay free of bins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeSpec {
    pub shape: EnvelopeShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve: Option<ReserveSpec>,
}

impl EnvelopeSpec {
    pub fn new(shape: EnvelopeShape) -> Self {
        EnvelopeSpec {
            shape,
            reserve: None,
        }
    }

    pub fn with_reserve(mut self, reserve: ReserveSpec) -> Self {
        self.reserve = Some(reserve);
        self
    }

    /// The reserve, if one is present and enabled.
    pub fn active_reserve(&self) -> Option<&ReserveSpec> {
        self.reserve.as_ref().filter(|r| r.enabled)
    }

    pub fn validate(&self) -> Result<()> {
        self.shape.validate()?;
        if let Some(reserve) = self.active_reserve() {
            reserve.validate()?;
            if reserve.auto_size && self.shape.is_curved() {
                bail!("auto-sized reserves are only supported for square and rectangle envelopes, not {}", self.shape);
            }
        }
        Ok(())
    }
}

impl From<EnvelopeShape> for EnvelopeSpec {
    fn from(shape: EnvelopeShape) -> Self {
        EnvelopeSpec::new(shape)
    }
}

/// Concrete outline of an envelope, centered on its canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnvelopeGeometry {
    Box { width: u32, height: u32 },
    Circle { radius: f64 },
    Ellipse { semi_x: f64, semi_y: f64 },
}

impl EnvelopeGeometry {
    pub fn area(&self) -> f64 {
        match self {
            EnvelopeGeometry::Box { width, height } => *width as f64 * *height as f64,
            EnvelopeGeometry::Circle { radius } => PI * radius.powi(2),
            EnvelopeGeometry::Ellipse { semi_x, semi_y } => PI * semi_x * semi_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ReservePosition;

    #[test]
    fn shape_aspects() {
        assert_eq!(EnvelopeShape::Circle.aspect(), (1.0, 1.0));
        let ellipse = EnvelopeShape::Ellipse {
            aspect_x: 3.0,
            aspect_y: 2.0,
        };
        assert_eq!(ellipse.ratio(), 1.5);
        assert!(ellipse.is_curved());
        assert_eq!(ellipse.to_string(), "ellipse (3:2)");
    }

    #[test]
    fn invalid_aspects_are_rejected() {
        let zero = EnvelopeShape::Rectangle {
            aspect_x: 0.0,
            aspect_y: 1.0,
        };
        let inf = EnvelopeShape::Ellipse {
            aspect_x: f64::INFINITY,
            aspect_y: 1.0,
        };
        assert!(zero.validate().is_err());
        assert!(inf.validate().is_err());
    }

    #[test]
    fn auto_reserve_on_curved_shape_is_rejected() {
        let spec = EnvelopeSpec::new(EnvelopeShape::Circle).with_reserve(ReserveSpec::auto());
        assert!(spec.validate().is_err());
        let spec = EnvelopeSpec::new(EnvelopeShape::Square).with_reserve(ReserveSpec::auto());
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn disabled_reserve_is_ignored() {
        let mut reserve = ReserveSpec::fixed(0, 0, ReservePosition::Center);
        reserve.enabled = false;
        let spec = EnvelopeSpec::new(EnvelopeShape::Circle).with_reserve(reserve);
        assert!(spec.active_reserve().is_none());
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn deserializes_tagged_shape() {
        let json = r#"{"shape": {"type": "rectangle", "aspect_x": 16.0, "aspect_y": 9.0}}"#;
        let spec: EnvelopeSpec = serde_json::from_str(json).unwrap();
        assert_eq!(
            spec.shape,
            EnvelopeShape::Rectangle {
                aspect_x: 16.0,
                aspect_y: 9.0
            }
        );
        assert!(spec.reserve.is_none());
    }
}
