//! Rendering adapter for bin layouts. Nothing in here feeds back into
//! placement: it reads a finished [`BinLayout`] and turns it into plot
//! records, polygons or an SVG page.
use std::path::Path as FsPath;

use geo::bounding_rect::BoundingRect;
use geo_types::MultiPolygon;
use serde::{Deserialize, Serialize};
use svg::node::element::{Group, Path};
use svg::Document;

use crate::config::{css_hex, CssColor, RenderConfig};
use crate::errors::BinPlotError;
use crate::geo_types::matrix::TransformGeometry;
use crate::geo_types::svg::{page, Arrangement, ToSvg};
use crate::layout::{BinLayout, FillScale};
use crate::riding::FillValue;

/// One tile for a declarative plotting layer: `x` is the column, `y` the
/// row, `group` the cell's shape id and `fill` its value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlotRecord {
    pub x: f64,
    pub y: f64,
    pub group: usize,
    pub fill: FillValue,
}

impl BinLayout {
    pub fn records(&self) -> Vec<PlotRecord> {
        self.iter()
            .map(|cell| PlotRecord {
                x: f64::from(cell.pos.col),
                y: f64::from(cell.pos.row),
                group: cell.shape_id,
                fill: cell.value.clone(),
            })
            .collect()
    }

    /// Tile outlines in grid units, in cell order.
    pub fn polygons(&self) -> MultiPolygon<f64> {
        MultiPolygon::new(self.iter().map(|cell| cell.polygon()).collect())
    }
}

fn lerp(low: &CssColor, high: &CssColor, t: f64) -> CssColor {
    let low = low.to_rgba8();
    let high = high.to_rgba8();
    let mix = |i: usize| {
        let (a, b) = (f64::from(low[i]), f64::from(high[i]));
        (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
    };
    CssColor::from_rgba8(mix(0), mix(1), mix(2), mix(3))
}

impl FillScale {
    /// Colour of a fill value on this scale. Values the scale doesn't know
    /// get the missing colour.
    pub fn color(&self, value: &FillValue, config: &RenderConfig) -> CssColor {
        match (self, value) {
            (FillScale::Continuous { min, max }, FillValue::Continuous(v)) => {
                let t = if max > min {
                    ((v - min) / (max - min)).clamp(0.0, 1.0)
                } else {
                    0.5
                };
                lerp(&config.low_color, &config.high_color, t)
            }
            (FillScale::Discrete { categories }, FillValue::Category(c)) => {
                match (categories.binary_search(c), config.palette.is_empty()) {
                    (Ok(i), false) => config.palette[i % config.palette.len()].clone(),
                    _ => config.missing_color.clone(),
                }
            }
            _ => config.missing_color.clone(),
        }
    }
}

/// Draws the layout as one filled path per tile, fitted into the page.
pub fn to_svg(layout: &BinLayout, config: &RenderConfig) -> Result<Document, BinPlotError> {
    let polygons = layout.polygons();
    let gbox = polygons
        .bounding_rect()
        .ok_or(BinPlotError::EmptyGeometry)?;
    let arrangement = Arrangement::FitCenterMargin(
        config.margin,
        page(config.width, config.height),
        config.flip_y,
    );
    let transform = arrangement.transform_for(&gbox);

    let mut tiles = Group::new()
        .set("stroke", css_hex(&config.stroke))
        .set("stroke-width", config.stroke_width)
        .set("stroke-linejoin", "round");
    for (cell, polygon) in layout.iter().zip(polygons.iter()) {
        let fill = layout.scale.color(&cell.value, config);
        let mut path = Path::new()
            .set("d", polygon.transformed(&transform).to_path_data())
            .set("fill", css_hex(&fill))
            .set("data-riding", cell.code.to_string())
            .set("data-region", cell.region.clone());
        let alpha = fill.to_rgba8()[3];
        if alpha < 255 {
            path = path.set("fill-opacity", f64::from(alpha) / 255.0);
        }
        tiles = tiles.add(path);
    }
    Ok(arrangement.create_svg_document().add(tiles))
}

pub fn save_svg(
    layout: &BinLayout,
    config: &RenderConfig,
    path: &FsPath,
) -> Result<(), BinPlotError> {
    let document = to_svg(layout, config)?;
    svg::save(path, &document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BinPlot, CellShape};
    use crate::table::{RidingTable, TableValue};

    fn party_layout() -> BinLayout {
        let mut table = RidingTable::new(&["riding_code", "party"]);
        for (code, party) in [(13001u32, "Liberal"), (13002, "Conservative"), (13003, "Liberal")] {
            table.push_row(vec![code.into(), party.into()]).unwrap();
        }
        table.push_row(vec![13004u32.into(), TableValue::Missing]).unwrap();
        BinPlot::new("party", "riding_code")
            .shape(CellShape::Hexagon)
            .layout(&table)
            .expect("Layout failed")
    }

    #[test]
    fn test_records_follow_cells() {
        let layout = party_layout();
        let records = layout.records();
        assert_eq!(records.len(), 4);
        for (record, cell) in records.iter().zip(layout.iter()) {
            assert_eq!(record.x, f64::from(cell.pos.col));
            assert_eq!(record.y, f64::from(cell.pos.row));
            assert_eq!(record.group, cell.shape_id);
            assert_eq!(record.fill, cell.value);
        }
    }

    #[test]
    fn test_continuous_colors() {
        let config = RenderConfig {
            low_color: CssColor::from_rgba8(0, 0, 0, 255),
            high_color: CssColor::from_rgba8(200, 100, 50, 255),
            ..Default::default()
        };
        let scale = FillScale::Continuous { min: 10.0, max: 20.0 };
        assert_eq!(css_hex(&scale.color(&FillValue::Continuous(10.0), &config)), "#000000");
        assert_eq!(css_hex(&scale.color(&FillValue::Continuous(20.0), &config)), "#c86432");
        assert_eq!(css_hex(&scale.color(&FillValue::Continuous(15.0), &config)), "#643219");
        assert_eq!(
            scale.color(&FillValue::Missing, &config),
            config.missing_color
        );

        let flat = FillScale::Continuous { min: 3.0, max: 3.0 };
        assert_eq!(css_hex(&flat.color(&FillValue::Continuous(3.0), &config)), "#643219");
    }

    #[test]
    fn test_palette_cycles() {
        let config = RenderConfig {
            palette: vec![
                CssColor::from_rgba8(255, 0, 0, 255),
                CssColor::from_rgba8(0, 0, 255, 255),
            ],
            ..Default::default()
        };
        let scale = FillScale::Discrete {
            categories: vec!["a".into(), "b".into(), "c".into()],
        };
        let hex = |c: &str| css_hex(&scale.color(&FillValue::Category(c.into()), &config));
        assert_eq!(hex("a"), "#ff0000");
        assert_eq!(hex("b"), "#0000ff");
        assert_eq!(hex("c"), "#ff0000");
        assert_eq!(hex("z"), css_hex(&config.missing_color));
    }

    #[test]
    fn test_svg_has_a_path_per_tile() {
        let layout = party_layout();
        let config = RenderConfig::default();
        let doc = to_svg(&layout, &config).expect("Render failed").to_string();
        assert_eq!(doc.matches("<path").count(), 4);
        assert!(doc.contains("data-riding=\"13001\""));
        assert!(doc.contains(&format!("fill=\"{}\"", css_hex(&config.missing_color))));
        // Liberal sorts after Conservative, so it takes the second palette colour.
        assert!(doc.contains(&format!("fill=\"{}\"", css_hex(&config.palette[1]))));
    }

    #[test]
    fn test_svg_fits_page() {
        let layout = party_layout();
        let config = RenderConfig::default();
        let polygons = layout.polygons();
        let arrangement =
            Arrangement::FitCenterMargin(config.margin, page(config.width, config.height), false);
        let fitted = polygons.arrange(&arrangement).expect("Arranged");
        let bounds = fitted.bounding_rect().unwrap();
        assert!(bounds.min().x >= config.margin - 1e-9);
        assert!(bounds.min().y >= config.margin - 1e-9);
        assert!(bounds.max().x <= config.width - config.margin + 1e-9);
        assert!(bounds.max().y <= config.height - config.margin + 1e-9);
    }

    #[test]
    fn test_save_svg() {
        let dir = tempfile::tempdir().expect("Temp dir");
        let path = dir.path().join("bins.svg");
        save_svg(&party_layout(), &RenderConfig::default(), &path).expect("Save failed");
        let written = std::fs::read_to_string(&path).expect("Read back");
        assert!(written.contains("<svg"));
        assert_eq!(written.matches("<path").count(), 4);
    }

    #[test]
    fn test_polygons_as_wkt() {
        use wkt::ToWkt;
        let layout = party_layout();
        let wkt = layout.polygons().wkt_string();
        assert!(wkt.starts_with("MULTIPOLYGON"));
        assert_eq!(layout.polygons().0.len(), layout.len());
    }
}
