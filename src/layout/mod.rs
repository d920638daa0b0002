//! Riding-to-bin layout: every matched riding gets exactly one tile on a
//! square or hexagonal grid, either at its hand-placed canonical cell or
//! packed together with the rest of its region.
//!
//! # Example
//!
//! ```rust
//! use riding_binplot::layout::{BinPlot, CellShape};
//! use riding_binplot::table::RidingTable;
//!
//! let mut table = RidingTable::new(&["riding_code", "party"]);
//! table.push_row(vec![35001u32.into(), "Liberal".into()]).unwrap();
//! table.push_row(vec![35002u32.into(), "Conservative".into()]).unwrap();
//!
//! let layout = BinPlot::new("party", "riding_code")
//!     .arrange(true)
//!     .shape(CellShape::Hexagon)
//!     .layout(&table)
//!     .unwrap();
//! assert_eq!(layout.len(), 2);
//! assert_eq!(layout.report.mismatched, 0);
//! ```
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use geo_types::{coord, Coord, Polygon};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::BinPlotError;
use crate::geo_types::shapes::{hex_cell, square_cell, HEX_ROW_SPACING};
use crate::reference::{ReferenceLayout, Scope};
use crate::riding::{FillValue, GridPos, Region, Riding, RidingCode};
use crate::table::{RidingTable, TableValue};

pub mod pack;

use pack::pack_offsets;

/// Tile geometry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CellShape {
    #[default]
    Square,
    Hexagon,
}

impl CellShape {
    /// Plane coordinates of a tile centre. Hexagons in odd rows shift half a
    /// tile east and rows are squeezed to [`HEX_ROW_SPACING`].
    pub fn center(&self, pos: GridPos) -> Coord<f64> {
        match self {
            CellShape::Square => coord! {x: f64::from(pos.col), y: f64::from(pos.row)},
            CellShape::Hexagon => {
                let shift = if pos.row.rem_euclid(2) == 1 { 0.5 } else { 0.0 };
                coord! {
                    x: f64::from(pos.col) + shift,
                    y: f64::from(pos.row) * HEX_ROW_SPACING
                }
            }
        }
    }

    pub fn polygon(&self, pos: GridPos) -> Polygon<f64> {
        let center = self.center(pos);
        match self {
            CellShape::Square => square_cell(center.x, center.y),
            CellShape::Hexagon => hex_cell(center.x, center.y),
        }
    }
}

/// One placed riding.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub code: RidingCode,
    pub region: String,
    pub pos: GridPos,
    pub shape: CellShape,
    /// Index of the cell in the layout, doubles as the polygon group id.
    pub shape_id: usize,
    pub value: FillValue,
}

impl GridCell {
    pub fn center(&self) -> Coord<f64> {
        self.shape.center(self.pos)
    }

    pub fn polygon(&self) -> Polygon<f64> {
        self.shape.polygon(self.pos)
    }
}

/// Row accounting for one layout call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutReport {
    pub matched: usize,
    /// Rows whose riding code isn't part of the selected scope.
    pub mismatched: usize,
    /// Rows repeating a code already placed. The first row wins.
    pub duplicates: usize,
}

/// How the renderer should read the fill values.
#[derive(Debug, Clone, PartialEq)]
pub enum FillScale {
    Continuous { min: f64, max: f64 },
    Discrete { categories: Vec<String> },
}

impl FillScale {
    fn from_cells(continuous: bool, cells: &[GridCell]) -> FillScale {
        if continuous {
            let values = cells.iter().filter_map(|cell| cell.value.as_f64());
            let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
            if min > max {
                FillScale::Continuous { min: 0.0, max: 0.0 }
            } else {
                FillScale::Continuous { min, max }
            }
        } else {
            let mut categories: Vec<String> = cells
                .iter()
                .filter_map(|cell| match &cell.value {
                    FillValue::Category(c) => Some(c.clone()),
                    _ => None,
                })
                .collect();
            categories.sort();
            categories.dedup();
            FillScale::Discrete { categories }
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, FillScale::Continuous { .. })
    }
}

/// Output of a layout call: the cells in region then placement order.
#[derive(Debug, Clone, PartialEq)]
pub struct BinLayout {
    pub cells: Vec<GridCell>,
    pub report: LayoutReport,
    pub scale: FillScale,
    pub shape: CellShape,
    pub arranged: bool,
}

impl BinLayout {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GridCell> {
        self.cells.iter()
    }

    pub fn cell(&self, code: RidingCode) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.code == code)
    }
}

/// Options of a riding bin plot.
///
/// `riding_column` and `value_column` name the columns of the input table.
/// `continuous` picks the fill scale, `arrange` packs ridings per region
/// instead of using their canonical cells, and `provincial`/`region` choose
/// the reference layout (see [`Scope::resolve`]).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BinPlot {
    pub value_column: String,
    pub riding_column: String,
    #[serde(default)]
    pub continuous: bool,
    #[serde(default)]
    pub arrange: bool,
    #[serde(default)]
    pub shape: CellShape,
    #[serde(default)]
    pub provincial: bool,
    #[serde(default)]
    pub region: Option<String>,
}

impl BinPlot {
    pub fn new(value_column: &str, riding_column: &str) -> BinPlot {
        BinPlot {
            value_column: value_column.to_string(),
            riding_column: riding_column.to_string(),
            continuous: false,
            arrange: false,
            shape: CellShape::Square,
            provincial: false,
            region: None,
        }
    }

    pub fn continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    pub fn arrange(mut self, arrange: bool) -> Self {
        self.arrange = arrange;
        self
    }

    pub fn shape(mut self, shape: CellShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn provincial(mut self, provincial: bool) -> Self {
        self.provincial = provincial;
        self
    }

    pub fn region(mut self, region: Option<&str>) -> Self {
        self.region = region.map(|r| r.to_string());
        self
    }

    pub fn from_ron_str(data: &str) -> anyhow::Result<BinPlot> {
        Ok(ron::from_str(data)?)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<BinPlot> {
        let mut reader = std::fs::File::open(path)?;
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        BinPlot::from_ron_str(data.as_str())
    }

    /// Lays the table out on one of the bundled reference layouts.
    pub fn layout(&self, table: &RidingTable) -> Result<BinLayout, BinPlotError> {
        let scope = Scope::resolve(self.provincial, self.region.as_deref())?;
        debug!("Riding bins for {:?}", scope);
        self.place(scope.reference()?, scope.region_filter(), table)
    }

    /// Lays the table out on a caller supplied reference. `provincial` is
    /// ignored here and `region`, when set, is matched against region ids.
    pub fn layout_with(
        &self,
        reference: &ReferenceLayout,
        table: &RidingTable,
    ) -> Result<BinLayout, BinPlotError> {
        self.place(reference, self.region.as_deref(), table)
    }

    fn place(
        &self,
        reference: &ReferenceLayout,
        region_filter: Option<&str>,
        table: &RidingTable,
    ) -> Result<BinLayout, BinPlotError> {
        let code_col = table.column(&self.riding_column)?;
        let value_col = table.column(&self.value_column)?;

        let mut regions: Vec<Region> = reference
            .regions()
            .iter()
            .map(|anchor| Region::new(&anchor.region, anchor.pos))
            .collect();
        let mut report = LayoutReport::default();
        let mut seen: HashSet<RidingCode> = HashSet::new();

        for row in table.rows() {
            let found = row[code_col]
                .as_code()
                .and_then(|code| reference.riding(code))
                .filter(|riding| region_filter.map_or(true, |region| riding.region == region));
            let Some(found) = found else {
                warn!(
                    "No riding '{}' in the {} layout, dropping row",
                    row[code_col],
                    reference.name()
                );
                report.mismatched += 1;
                continue;
            };
            if !seen.insert(found.code) {
                warn!("Riding {} appears more than once, keeping the first row", found.code);
                report.duplicates += 1;
                continue;
            }
            let value = self.fill_value(found.code, &row[value_col])?;
            let Some(index) = reference.region_index(&found.region) else {
                return Err(BinPlotError::InvalidReference(format!(
                    "riding {} belongs to unanchored region '{}'",
                    found.code, found.region
                )));
            };
            regions[index].push(Riding {
                code: found.code,
                region: found.region.clone(),
                canonical: found.pos,
                value,
            });
            report.matched += 1;
        }

        if report.matched == 0 {
            return Err(BinPlotError::NoMatchingRidings {
                mismatched: report.mismatched,
            });
        }
        if report.mismatched > 0 {
            warn!(
                "{} of {} rows did not match a riding",
                report.mismatched,
                table.len()
            );
        }

        let mut cells: Vec<GridCell> = Vec::with_capacity(report.matched);
        for mut region in regions.into_iter().filter(|region| !region.is_empty()) {
            region.sort();
            let positions: Vec<GridPos> = if self.arrange {
                pack_offsets(region.len())
                    .into_iter()
                    .map(|offset| {
                        region.anchor.checked_add(offset).ok_or_else(|| {
                            BinPlotError::InvalidReference(format!(
                                "region '{}' packs off the grid from {}",
                                region.id, region.anchor
                            ))
                        })
                    })
                    .collect::<Result<_, _>>()?
            } else {
                region.ridings.iter().map(|riding| riding.canonical).collect()
            };
            debug!(
                "Placed {} ridings of region {} from {}",
                region.len(),
                region.id,
                region.anchor
            );
            for (riding, pos) in region.ridings.into_iter().zip(positions) {
                cells.push(GridCell {
                    code: riding.code,
                    region: riding.region,
                    pos,
                    shape: self.shape,
                    shape_id: cells.len(),
                    value: riding.value,
                });
            }
        }

        Ok(BinLayout {
            scale: FillScale::from_cells(self.continuous, &cells),
            cells,
            report,
            shape: self.shape,
            arranged: self.arrange,
        })
    }

    fn fill_value(&self, code: RidingCode, raw: &TableValue) -> Result<FillValue, BinPlotError> {
        if raw.is_missing() {
            return Ok(FillValue::Missing);
        }
        if !self.continuous {
            return Ok(FillValue::Category(raw.to_string()));
        }
        match raw.as_number() {
            Some(v) if !v.is_finite() => Ok(FillValue::Missing),
            Some(v) => Ok(FillValue::Continuous(v)),
            None => Err(BinPlotError::NonNumericValue {
                code,
                value: raw.to_string(),
            }),
        }
    }
}

/// Lays out riding data on the square or hexagonal bin grid.
///
/// Same as building a [`BinPlot`] and calling [`BinPlot::layout`].
#[allow(clippy::too_many_arguments)]
pub fn riding_binplot(
    table: &RidingTable,
    value_column: &str,
    riding_column: &str,
    continuous: bool,
    arrange: bool,
    shape: CellShape,
    provincial: bool,
    region: Option<&str>,
) -> Result<BinLayout, BinPlotError> {
    BinPlot::new(value_column, riding_column)
        .continuous(continuous)
        .arrange(arrange)
        .shape(shape)
        .provincial(provincial)
        .region(region)
        .layout(table)
}
