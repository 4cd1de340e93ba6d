use nanofiche::io::svg::SvgDrawOptions;
use nanofiche::util::PackerConfig;
use serde::{Deserialize, Serialize};

/// Configuration of the `nanofiche` command line tool
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct NanoficheConfig {
    /// Tolerances, caps and reserve parameters of the packer
    pub packer_config: PackerConfig,
    /// Optional SVG drawing options
    pub svg_draw_options: SvgDrawOptions,
    /// Write an SVG preview of the layout next to the solution
    pub write_svg: bool,
    /// Write a manifest pairing every placement with its image file (requires an image folder)
    pub write_manifest: bool,
    /// Write a plain-text report of the run
    pub write_project_log: bool,
}

impl Default for NanoficheConfig {
    fn default() -> Self {
        Self {
            packer_config: PackerConfig::default(),
            svg_draw_options: SvgDrawOptions::default(),
            write_svg: true,
            write_manifest: true,
            write_project_log: true,
        }
    }
}
