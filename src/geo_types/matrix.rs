use geo::map_coords::MapCoords;
use geo_types::{coord, Coord, MultiPolygon, Polygon};
use nalgebra::{Affine2, Matrix3, Point2 as NPoint2};

/// Helper to create a scaling matrix
pub fn scale_matrix(sx: f64, sy: f64) -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0))
}

/// Helper to create a translation matrix
pub fn translate_matrix(tx: f64, ty: f64) -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0))
}

/// Mirrors y inside a band of the given height, so 0 and `height` swap.
pub fn flip_y_matrix(height: f64) -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(1.0, 0.0, 0.0, 0.0, -1.0, height, 0.0, 0.0, 1.0))
}

/// Unit matrix. Basically a no-op
pub fn unit_matrix() -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0))
}

pub fn xform_coord(xy: &Coord<f64>, affine: &Affine2<f64>) -> Coord<f64> {
    let out = affine * NPoint2::new(xy.x, xy.y);
    coord!(x: out.x, y: out.y)
}

/// Applies an affine transform to cell outlines.
pub trait TransformGeometry {
    fn transformed(&self, affine: &Affine2<f64>) -> Self;
}

impl TransformGeometry for Polygon<f64> {
    fn transformed(&self, affine: &Affine2<f64>) -> Self {
        self.map_coords(|xy| xform_coord(&xy, affine))
    }
}

impl TransformGeometry for MultiPolygon<f64> {
    fn transformed(&self, affine: &Affine2<f64>) -> Self {
        self.map_coords(|xy| xform_coord(&xy, affine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_types::shapes::square_cell;
    use geo::BoundingRect;

    #[test]
    fn test_translate() {
        let moved = square_cell(0.0, 0.0).transformed(&translate_matrix(10., 5.));
        let bounds = moved.bounding_rect().unwrap();
        assert_eq!(bounds.center(), coord! {x: 10.0, y: 5.0});
    }

    #[test]
    fn test_scale_then_translate() {
        let tx = translate_matrix(1.0, 1.0) * scale_matrix(4.0, 2.0);
        let out = xform_coord(&coord! {x: 1.0, y: 1.0}, &tx);
        assert_eq!(out, coord! {x: 5.0, y: 3.0});
        assert_eq!(xform_coord(&out, &unit_matrix()), out);
    }

    #[test]
    fn test_flip() {
        let out = xform_coord(&coord! {x: 3.0, y: 0.0}, &flip_y_matrix(10.0));
        assert_eq!(out, coord! {x: 3.0, y: 10.0});
    }
}
