use std::io::Read;
use std::path::Path;

use anyhow::Result;
pub use csscolorparser::parse as parse_css_color;
pub use csscolorparser::Color as CssColor;
use serde::{Deserialize, Serialize};

/// How a bin layout is drawn. Sizes are millimetres on the page, colours
/// are anything CSS understands.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub stroke: CssColor,
    pub stroke_width: f64,
    /// Colour of the smallest value on a continuous scale.
    pub low_color: CssColor,
    /// Colour of the largest value on a continuous scale.
    pub high_color: CssColor,
    /// Categorical colours, handed out in sorted category order and reused
    /// once they run out.
    pub palette: Vec<CssColor>,
    pub missing_color: CssColor,
    /// Draw row 0 at the bottom of the page instead of the top.
    pub flip_y: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 297.0,
            height: 210.0,
            margin: 10.0,
            stroke: CssColor::from_rgba8(255, 255, 255, 255),
            stroke_width: 0.3,
            low_color: CssColor::from_rgba8(222, 235, 247, 255),
            high_color: CssColor::from_rgba8(8, 48, 107, 255),
            palette: vec![
                CssColor::from_rgba8(27, 158, 119, 255),
                CssColor::from_rgba8(217, 95, 2, 255),
                CssColor::from_rgba8(117, 112, 179, 255),
                CssColor::from_rgba8(231, 41, 138, 255),
                CssColor::from_rgba8(102, 166, 30, 255),
                CssColor::from_rgba8(230, 171, 2, 255),
                CssColor::from_rgba8(166, 118, 29, 255),
                CssColor::from_rgba8(102, 102, 102, 255),
            ],
            missing_color: CssColor::from_rgba8(204, 204, 204, 255),
            flip_y: false,
        }
    }
}

impl RenderConfig {
    pub fn from_ron_str(data: &str) -> Result<RenderConfig> {
        Ok(ron::from_str(data)?)
    }

    pub fn from_file(path: &Path) -> Result<RenderConfig> {
        let mut reader = std::fs::File::open(path)?;
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        RenderConfig::from_ron_str(data.as_str())
    }
}

/// `#rrggbb` for SVG attributes. Alpha goes to a separate opacity attribute.
pub fn css_hex(color: &CssColor) -> String {
    let [r, g, b, _a] = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
