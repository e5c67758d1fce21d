//! Chart styling: palettes, fonts and continuous colour scales.

use plotters::style::RGBColor;
use socialdash_common::{DashError, Result};
use socialdash_config::schema::{OutputConfig, StylingConfig};

/// Resolved styling shared by every panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Background colour.
    pub background: RGBColor,
    /// Categorical palette, cycled.
    pub palette: Vec<RGBColor>,
    /// Font family of all text.
    pub font_family: String,
    /// Caption font size.
    pub title_font_size: u32,
    /// Axis and value label font size.
    pub label_font_size: u32,
    /// Whether to draw the background mesh.
    pub enable_grid: bool,
}

impl ChartStyle {
    /// Resolves the configured colours and dimensions.
    pub fn from_config(styling: &StylingConfig, output: &OutputConfig) -> Result<Self> {
        let palette = styling
            .palette
            .iter()
            .map(|c| parse_color(c))
            .collect::<Result<Vec<_>>>()?;
        if palette.is_empty() {
            return Err(DashError::validation_field(
                "palette needs at least one colour",
                "styling.palette",
            ));
        }

        Ok(Self {
            width: output.width,
            height: output.height,
            background: parse_color(&styling.background)?,
            palette,
            font_family: styling.font_family.clone(),
            title_font_size: styling.title_font_size,
            label_font_size: styling.label_font_size,
            enable_grid: styling.enable_grid,
        })
    }

    /// Palette colour `index`, cycling.
    pub fn color(&self, index: usize) -> RGBColor {
        self.palette[index % self.palette.len()]
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from_config(&StylingConfig::default(), &OutputConfig::default())
            .unwrap_or_else(|_| Self {
                width: 960,
                height: 560,
                background: RGBColor(255, 255, 255),
                palette: vec![RGBColor(99, 110, 250)],
                font_family: "sans-serif".to_string(),
                title_font_size: 22,
                label_font_size: 14,
                enable_grid: true,
            })
    }
}

/// Parses a `#rrggbb` colour.
pub fn parse_color(value: &str) -> Result<RGBColor> {
    let invalid = || DashError::validation(format!("'{value}' is not a #rrggbb colour"));
    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };
    Ok(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Continuous colour scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    /// Light to dark teal.
    Teal,
    /// Light to dark blue.
    Blues,
    /// Diverging red, white, blue.
    RdBu,
    /// Yellow through orange to red.
    YlOrRd,
    /// Perceptually uniform purple to yellow.
    Viridis,
}

impl ColorScale {
    fn stops(self) -> &'static [(u8, u8, u8)] {
        match self {
            Self::Teal => &[
                (209, 238, 234),
                (168, 219, 217),
                (133, 196, 201),
                (104, 171, 184),
                (79, 144, 166),
                (59, 115, 143),
                (42, 86, 116),
            ],
            Self::Blues => &[
                (247, 251, 255),
                (222, 235, 247),
                (198, 219, 239),
                (158, 202, 225),
                (107, 174, 214),
                (66, 146, 198),
                (33, 113, 181),
                (8, 81, 156),
                (8, 48, 107),
            ],
            Self::RdBu => &[
                (103, 0, 31),
                (178, 24, 43),
                (214, 96, 77),
                (244, 165, 130),
                (253, 219, 199),
                (247, 247, 247),
                (209, 229, 240),
                (146, 197, 222),
                (67, 147, 195),
                (33, 102, 172),
                (5, 48, 97),
            ],
            Self::YlOrRd => &[
                (255, 255, 204),
                (255, 237, 160),
                (254, 217, 118),
                (254, 178, 76),
                (253, 141, 60),
                (252, 78, 42),
                (227, 26, 28),
                (189, 0, 38),
                (128, 0, 38),
            ],
            Self::Viridis => &[
                (68, 1, 84),
                (72, 40, 120),
                (62, 73, 137),
                (49, 104, 142),
                (38, 130, 142),
                (31, 158, 137),
                (53, 183, 121),
                (110, 206, 88),
                (181, 222, 43),
                (253, 231, 37),
            ],
        }
    }

    /// Colour at position `t` in `[0, 1]`; out of range values are clamped.
    pub fn sample(self, t: f64) -> RGBColor {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * (stops.len() - 1) as f64;
        let lower = (scaled.floor() as usize).min(stops.len() - 1);
        let upper = (lower + 1).min(stops.len() - 1);
        let frac = scaled - lower as f64;

        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
        let (a, b) = (stops[lower], stops[upper]);
        RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }

    /// Colour of `value` within `[min, max]`; a degenerate range maps to the middle.
    pub fn sample_range(self, value: f64, min: f64, max: f64) -> RGBColor {
        if max > min {
            self.sample((value - min) / (max - min))
        } else {
            self.sample(0.5)
        }
    }
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_text(background: RGBColor) -> RGBColor {
    let RGBColor(r, g, b) = background;
    let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    if luma > 140.0 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#4ecdc4").unwrap(), RGBColor(78, 205, 196));
        assert_eq!(parse_color("#FFEAA7").unwrap(), RGBColor(255, 234, 167));
        assert!(parse_color("4ecdc4").is_err());
        assert!(parse_color("#4ecdc").is_err());
        assert!(parse_color("#zzzzzz").is_err());
        assert!(parse_color("#ééé").is_err());
    }

    #[test]
    fn test_scale_endpoints_and_clamping() {
        assert_eq!(ColorScale::Blues.sample(0.0), RGBColor(247, 251, 255));
        assert_eq!(ColorScale::Blues.sample(1.0), RGBColor(8, 48, 107));
        assert_eq!(ColorScale::Blues.sample(-3.0), ColorScale::Blues.sample(0.0));
        assert_eq!(ColorScale::Blues.sample(f64::NAN), ColorScale::Blues.sample(0.0));
        assert_eq!(ColorScale::RdBu.sample(0.5), RGBColor(247, 247, 247));
    }

    #[test]
    fn test_sample_range_degenerate() {
        assert_eq!(
            ColorScale::Viridis.sample_range(3.0, 3.0, 3.0),
            ColorScale::Viridis.sample(0.5)
        );
    }

    #[test]
    fn test_style_from_default_config() {
        let style = ChartStyle::default();
        assert_eq!(style.palette.len(), 8);
        assert_eq!(style.color(8), style.color(0));
        assert_eq!(style.background, RGBColor(255, 255, 255));
    }

    #[test]
    fn test_contrast_text() {
        assert_eq!(contrast_text(RGBColor(255, 255, 204)), RGBColor(0, 0, 0));
        assert_eq!(contrast_text(RGBColor(5, 48, 97)), RGBColor(255, 255, 255));
    }
}
