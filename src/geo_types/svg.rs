use geo::bounding_rect::BoundingRect;
use geo_types::{coord, MultiPolygon, Polygon, Rect};
use nalgebra::Affine2;
use svg::node::element::path::Data;
use svg::node::element::Path;
use svg::Document;

use super::matrix::{flip_y_matrix, scale_matrix, translate_matrix, TransformGeometry};
use crate::errors::BinPlotError;

/// An arrangement is a plan for moving geometry onto a page. The bool
/// flips the y axis, for geometry whose y grows upward.
#[derive(Debug, Clone, PartialEq)]
pub enum Arrangement {
    Center(Rect<f64>, bool),
    FitCenter(Rect<f64>, bool),
    FitCenterMargin(f64, Rect<f64>, bool),
}

impl Arrangement {
    pub fn viewbox(&self) -> Rect<f64> {
        match self {
            Arrangement::Center(viewbox, _) => *viewbox,
            Arrangement::FitCenter(viewbox, _) => *viewbox,
            Arrangement::FitCenterMargin(_, viewbox, _) => *viewbox,
        }
    }

    /// Empty SVG document sized to the page, in millimetres.
    pub fn create_svg_document(&self) -> Document {
        let viewbox = self.viewbox();
        Document::new()
            .set(
                "viewBox",
                (viewbox.min().x, viewbox.min().y, viewbox.width(), viewbox.height()),
            )
            .set("width", format!("{}mm", viewbox.width()))
            .set("height", format!("{}mm", viewbox.height()))
    }

    /// The transform taking geometry bounded by `gbox` onto the page.
    pub fn transform_for(&self, gbox: &Rect<f64>) -> Affine2<f64> {
        let (scale, bounds, invert) = match self {
            Arrangement::Center(bounds, invert) => (1.0, bounds, invert),
            Arrangement::FitCenter(bounds, invert) => {
                (fit_scale(bounds, gbox, 0.0), bounds, invert)
            }
            Arrangement::FitCenterMargin(margin, bounds, invert) => {
                (fit_scale(bounds, gbox, *margin), bounds, invert)
            }
        };
        let bcenter = bounds.center();
        let gcenter = gbox.center();
        let tx = translate_matrix(bcenter.x - gcenter.x * scale, bcenter.y - gcenter.y * scale)
            * scale_matrix(scale, scale);
        if *invert {
            translate_matrix(0.0, bounds.min().y)
                * flip_y_matrix(bounds.height())
                * translate_matrix(0.0, -bounds.min().y)
                * tx
        } else {
            tx
        }
    }
}

fn fit_scale(bounds: &Rect<f64>, gbox: &Rect<f64>, margin: f64) -> f64 {
    let width = bounds.width() - 2.0 * margin;
    let height = bounds.height() - 2.0 * margin;
    match (gbox.width() > 0.0, gbox.height() > 0.0) {
        (true, true) => (width / gbox.width()).min(height / gbox.height()),
        (true, false) => width / gbox.width(),
        (false, true) => height / gbox.height(),
        (false, false) => 1.0,
    }
}

pub trait ToSvg {
    /// Given an [Arrangement], move the geometry onto the page.
    fn arrange(&self, arrangement: &Arrangement) -> Result<Self, BinPlotError>
    where
        Self: Sized;

    /// Convert the geometry into closed SVG path data
    fn to_path_data(&self) -> Data;

    /// Convert the geometry into an SVG Path, using the arrangement to Center/Fit it
    fn to_path(&self, arrangement: &Arrangement) -> Path
    where
        Self: Sized,
    {
        match self.arrange(arrangement) {
            Ok(arranged) => Path::new().set("d", arranged.to_path_data()),
            Err(_) => Path::new().set("d", ""),
        }
    }
}

fn ring_data(mut data: Data, poly: &Polygon<f64>) -> Data {
    for ring in std::iter::once(poly.exterior()).chain(poly.interiors().iter()) {
        for coord in ring.coords().take(1) {
            data = data.move_to((coord.x, coord.y));
        }
        // The ring repeats its first point, close() covers that edge.
        for coord in ring.coords().skip(1).take(ring.0.len().saturating_sub(2)) {
            data = data.line_to((coord.x, coord.y));
        }
        data = data.close();
    }
    data
}

impl ToSvg for Polygon<f64> {
    fn arrange(&self, arrangement: &Arrangement) -> Result<Self, BinPlotError> {
        let gbox = self.bounding_rect().ok_or(BinPlotError::EmptyGeometry)?;
        Ok(self.transformed(&arrangement.transform_for(&gbox)))
    }

    fn to_path_data(&self) -> Data {
        ring_data(Data::new(), self)
    }
}

impl ToSvg for MultiPolygon<f64> {
    fn arrange(&self, arrangement: &Arrangement) -> Result<Self, BinPlotError> {
        let gbox = self.bounding_rect().ok_or(BinPlotError::EmptyGeometry)?;
        Ok(self.transformed(&arrangement.transform_for(&gbox)))
    }

    fn to_path_data(&self) -> Data {
        self.iter().fold(Data::new(), ring_data)
    }
}

/// Page rectangle helper, in millimetres.
pub fn page(width: f64, height: f64) -> Rect<f64> {
    Rect::new(coord! {x: 0.0, y: 0.0}, coord! {x: width, y: height})
}
