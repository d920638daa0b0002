/// Square and hexagonal tile outlines, in grid units.
pub mod shapes;

/// Affine helpers for moving tile geometry around.
pub mod matrix;

/// Trait to convert tile geometry into SVG path data, and the page
/// arrangements used to fit it onto a document.
pub mod svg;
