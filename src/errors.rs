use thiserror::Error;

use crate::riding::RidingCode;

/// Everything that can go wrong while laying out or drawing a bin plot.
#[derive(Debug, Error)]
pub enum BinPlotError {
    /// The requested boundary/region combination has no reference layout.
    #[error("no reference layout for provincial={provincial} region={region:?}")]
    UnsupportedScope {
        provincial: bool,
        region: Option<String>,
    },

    /// Not a single input row matched a riding of the selected scope.
    #[error("no rows matched a riding in the selected scope ({mismatched} mismatched)")]
    NoMatchingRidings { mismatched: usize },

    #[error("column '{0}' not found in riding table")]
    MissingColumn(String),

    /// A continuous fill was requested but the value cannot be read as a number.
    #[error("riding {code}: value '{value}' is not numeric")]
    NonNumericValue { code: RidingCode, value: String },

    #[error("row has {found} values, table has {expected} columns")]
    RowWidth { expected: usize, found: usize },

    #[error("invalid reference layout: {0}")]
    InvalidReference(String),

    #[error("Empty/Invalid/Dimensionless geometry")]
    EmptyGeometry,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Ron(#[from] ron::error::SpannedError),
}
