use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Tunables of the [`Packer`](crate::packing::Packer).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct PackerConfig {
    ///Bisection stops once the bracket on a radius or semi-axis is narrower than this (px)
    pub radius_tolerance: f64,
    ///Bisection stops once the bracket on a canvas side is narrower than this (px)
    pub side_tolerance: f64,
    ///Maximum number of bisection steps
    pub max_iterations: usize,
    ///Maximum number of times the initial bracket is grown or shrunk
    pub max_bracket_steps: usize,
    ///Factor by which the bracket is grown or shrunk
    pub bracket_growth: f64,
    ///Fraction of the normalized ellipse equation that counts as inside the ellipse
    pub ellipse_margin: f64,
    ///Area of the initial auto-sized reserve, in bin areas
    pub reserve_seed_bin_areas: f64,
    ///An auto-sized reserve spans at most this fraction of the grid rows and columns
    pub reserve_max_fraction: f64,
    ///Allowed relative deviation of an enlarged reserve from its target aspect
    pub reserve_aspect_slack: f64,
    ///Largest canvas side (px) the size search will consider
    pub max_canvas_side: u32,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            radius_tolerance: 0.1,
            side_tolerance: 1.0,
            max_iterations: 50,
            max_bracket_steps: 40,
            bracket_growth: 2.0,
            ellipse_margin: 0.98,
            reserve_seed_bin_areas: 2.0,
            reserve_max_fraction: 0.2,
            reserve_aspect_slack: 0.3,
            max_canvas_side: 4_000_000,
        }
    }
}

impl PackerConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.radius_tolerance > 0.0 && self.side_tolerance > 0.0,
            "search tolerances must be positive"
        );
        ensure!(
            self.bracket_growth > 1.0,
            "bracket growth must exceed 1, got {}",
            self.bracket_growth
        );
        ensure!(
            self.ellipse_margin > 0.0 && self.ellipse_margin <= 1.0,
            "ellipse margin must lie in (0, 1], got {}",
            self.ellipse_margin
        );
        ensure!(
            self.reserve_seed_bin_areas > 0.0,
            "reserve seed must cover a positive number of bins"
        );
        ensure!(
            (0.0..=1.0).contains(&self.reserve_max_fraction) && self.reserve_aspect_slack >= 0.0,
            "invalid reserve enlargement limits"
        );
        ensure!(self.max_canvas_side > 0, "max canvas side must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PackerConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: PackerConfig = serde_json::from_str(r#"{"radius_tolerance": 0.5}"#).unwrap();
        assert_eq!(config.radius_tolerance, 0.5);
        assert_eq!(config.max_iterations, 50);
        let invalid = PackerConfig {
            bracket_growth: 1.0,
            ..config
        };
        assert!(invalid.validate().is_err());
    }
}
