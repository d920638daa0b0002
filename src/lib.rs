//! Tile and hex grid maps of Canadian electoral ridings.
//!
//! Every riding gets one uniformly sized square or hexagon, so big rural
//! ridings don't drown out dense urban ones. A riding either sits at its
//! hand-placed cell in a reference layout, which keeps a rough geographic
//! impression, or is packed together with the other ridings of its
//! province (or administrative region) into a compact block.
//!
//! Layout is pure data: [`layout::BinPlot`] turns a table of riding codes
//! and values into [`layout::GridCell`]s. Drawing them is a separate step,
//! see [`render`].
//!
//! ```rust
//! use riding_binplot::prelude::*;
//!
//! let mut table = RidingTable::new(&["riding_code", "turnout"]);
//! table.push_row(vec![24001u32.into(), 0.62.into()]).unwrap();
//! table.push_row(vec![24002u32.into(), 0.71.into()]).unwrap();
//!
//! let layout = riding_binplot(
//!     &table, "turnout", "riding_code", true, false, CellShape::Square, false, None,
//! ).unwrap();
//! let svg = to_svg(&layout, &RenderConfig::default()).unwrap();
//! assert_eq!(layout.records().len(), 2);
//! assert!(svg.to_string().contains("<path"));
//! ```

/// Error type shared by the whole crate.
pub mod errors;

/// Riding codes, grid positions and fill values.
pub mod riding;

/// Named-column input tables.
pub mod table;

/// Bundled reference layouts and scope selection.
pub mod reference;

/// Placement of ridings onto the bin grid.
pub mod layout;

/// Tile geometry and SVG helpers built on geo_types.
pub mod geo_types;

/// Turning layouts into plot records and SVG.
pub mod render;

/// Render settings, loadable from RON.
pub mod config;

/// Import prelude::* for the common bin plot workflow.
pub mod prelude {
    pub use crate::config::RenderConfig;
    pub use crate::errors::BinPlotError;
    pub use crate::layout::{riding_binplot, BinLayout, BinPlot, CellShape, FillScale, GridCell};
    pub use crate::reference::{Province, ReferenceLayout, Scope};
    pub use crate::render::{save_svg, to_svg, PlotRecord};
    pub use crate::riding::{FillValue, GridPos, RidingCode};
    pub use crate::table::{RidingTable, TableValue};
}
