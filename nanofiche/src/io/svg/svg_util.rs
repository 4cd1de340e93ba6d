use crate::geometry::Rect;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use svg::node::element::path::Data;
use svg::node::element::{Ellipse, Path};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgLayoutTheme,
    ///Write the index of every bin in its center
    #[serde(default = "default_true")]
    pub bin_labels: bool,
    ///Draw the outline of the envelope on top of the canvas
    #[serde(default = "default_true")]
    pub envelope_outline: bool,
    ///Draw the reserved region
    #[serde(default = "default_true")]
    pub reserve: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutTheme::default(),
            bin_labels: true,
            envelope_outline: true,
            reserve: true,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f64,
    pub canvas_fill: Color,
    pub envelope_fill: Color,
    pub bin_fill: Color,
    pub reserve_fill: Color,
    pub reserve_opac: f64,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        SvgLayoutTheme::EARTH_TONES
    }
}

impl SvgLayoutTheme {
    pub const EARTH_TONES: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.0,
        canvas_fill: Color(0xFF, 0xFF, 0xFF),
        envelope_fill: Color(0xCC, 0x82, 0x4A),
        bin_fill: Color(0xFF, 0xC8, 0x79),
        reserve_fill: Color(0xFF, 0x00, 0x00), // RED
        reserve_opac: 0.4,
    };

    pub const GRAY: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.5,
        canvas_fill: Color(0xFF, 0xFF, 0xFF),
        envelope_fill: Color(0xD3, 0xD3, 0xD3),
        bin_fill: Color(0x7A, 0x7A, 0x7A),
        reserve_fill: Color(0xD0, 0x00, 0x00),
        reserve_opac: 0.5,
    };
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl TryFrom<&str> for Color {
    type Error = anyhow::Error;

    fn try_from(s: &str) -> anyhow::Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        anyhow::ensure!(
            hex.len() == 6 && hex.is_ascii(),
            "color must be formatted as #RRGGBB, got {s:?}"
        );
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

pub fn ellipse(center: (f64, f64), radii: (f64, f64), params: &[(&str, &str)]) -> Ellipse {
    let mut ellipse = Ellipse::new()
        .set("cx", center.0)
        .set("cy", center.1)
        .set("rx", radii.0)
        .set("ry", radii.1);
    for param in params {
        ellipse = ellipse.set(param.0, param.1)
    }
    ellipse
}

pub fn aa_rect_data(rect: Rect) -> Data {
    Data::new()
        .move_to((rect.x_min, rect.y_min))
        .line_to((rect.x_max, rect.y_min))
        .line_to((rect.x_max, rect.y_max))
        .line_to((rect.x_min, rect.y_max))
        .close()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_format() {
        let color = Color::try_from("#cc824a").unwrap();
        assert_eq!(color, Color(0xCC, 0x82, 0x4A));
        assert_eq!(color.to_string(), "#CC824A");
        assert!(Color::try_from("#12345").is_err());
        assert!(Color::try_from("zzzzzz").is_err());
    }

    #[test]
    fn theme_deserializes_from_hex_strings() {
        let json = serde_json::to_string(&SvgLayoutTheme::GRAY).unwrap();
        let theme: SvgLayoutTheme = serde_json::from_str(&json).unwrap();
        assert_eq!(theme, SvgLayoutTheme::GRAY);
    }
}
