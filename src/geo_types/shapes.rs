/// Tile outlines for the bin grid. Everything here is in grid units: a
/// square tile is 1 wide, a hexagon is 1 wide across its flats.
use geo_types::{coord, LineString, Polygon};
use std::f64::consts::PI;

/// Vertical distance between hexagon row centres, as a fraction of the
/// square grid spacing. Pointy-top hexagons of width 1 stack at sqrt(3)/2.
pub const HEX_ROW_SPACING: f64 = 0.866_025_403_784_438_6;

/// Circumradius of a pointy-top hexagon that is 1 wide across its flats.
pub const HEX_RADIUS: f64 = 0.577_350_269_189_625_7;

/// Regular polygon in mathematical orientation, first vertex at `radians`.
/// The ring is closed on its first vertex, so there are `sides + 1`
/// coordinates.
pub fn regular_poly_native(
    sides: usize,
    x: f64,
    y: f64,
    radius: f64,
    radians: f64,
) -> Polygon<f64> {
    let sides = sides.max(3);
    let mut coords: Vec<_> = (0..sides)
        .map(|i| {
            let angle = radians + (f64::from(i as i32) / f64::from(sides as i32)) * (2.0 * PI);
            coord! {x: x + angle.cos() * radius, y: y + angle.sin() * radius}
        })
        .collect();
    coords.push(coords[0]);
    Polygon::new(LineString::new(coords), vec![])
}

/// Unit square centred on `(x, y)`.
pub fn square_cell(x: f64, y: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::new(vec![
            coord! {x: x - 0.5, y: y - 0.5},
            coord! {x: x + 0.5, y: y - 0.5},
            coord! {x: x + 0.5, y: y + 0.5},
            coord! {x: x - 0.5, y: y + 0.5},
            coord! {x: x - 0.5, y: y - 0.5},
        ]),
        vec![],
    )
}

/// Pointy-top hexagon centred on `(x, y)`, one unit across the flats.
pub fn hex_cell(x: f64, y: f64) -> Polygon<f64> {
    regular_poly_native(6, x, y, HEX_RADIUS, PI / 6.0)
}
