use ndarray::{arr1, Array1, ArrayView1, ArrayView2};

use crate::error::GeoError;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A (latitude, longitude) pair in decimal degrees. Ranges are not validated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// Pointwise haversine function, `sin²(x / 2)` over angles in radians.
pub fn pointwise_haversine(x: ArrayView1<f64>) -> Array1<f64> {
    x.mapv(|v| (v / 2.0).sin().powi(2))
}

fn check_coordinate_rows(arr: &ArrayView2<f64>) -> Result<(), GeoError> {
    if arr.ncols() != 2 {
        return Err(GeoError::NotCoordinateRows(arr.dim()));
    }
    Ok(())
}

/// Rowwise haversine fraction between two N x 2 arrays of (lat, lon) degrees.
/// Maps (N x 2, N x 2) -> N. Values lie in [0, 1] for valid coordinates.
pub fn haversine_fraction(
    coords_a: ArrayView2<f64>,
    coords_b: ArrayView2<f64>,
) -> Result<Array1<f64>, GeoError> {
    if coords_a.dim() != coords_b.dim() {
        return Err(GeoError::ShapeMismatch {
            left: coords_a.dim(),
            right: coords_b.dim(),
        });
    }
    check_coordinate_rows(&coords_a)?;

    let rad_a = coords_a.mapv(f64::to_radians);
    let rad_b = coords_b.mapv(f64::to_radians);
    let (lat_a, lat_b) = (rad_a.column(0), rad_b.column(0));
    let dlat = &lat_a - &lat_b;
    let dlon = &rad_a.column(1) - &rad_b.column(1);

    let lat_term = lat_a.mapv(f64::cos) * &lat_b.mapv(f64::cos);
    Ok(pointwise_haversine(dlat.view()) + &(lat_term * &pointwise_haversine(dlon.view())))
}

/// Rowwise haversine fraction between an N x 2 array and a single point.
/// The point is broadcast to N rows, so the result equals the expanded
/// two-array call.
pub fn haversine_fraction_to_point(
    coords: ArrayView2<f64>,
    point: Coordinate,
) -> Result<Array1<f64>, GeoError> {
    check_coordinate_rows(&coords)?;
    let row = arr1(&[point.lat, point.lon]);
    let expanded = row
        .broadcast(coords.dim())
        .ok_or(GeoError::NotCoordinateRows(coords.dim()))?;
    haversine_fraction(coords, expanded)
}

fn fraction_to_meters(fraction: Array1<f64>) -> Array1<f64> {
    // Rounding can push near-antipodal fractions just past 1.
    fraction.mapv_into(|f| 2.0 * EARTH_RADIUS_M * f.clamp(0.0, 1.0).sqrt().asin())
}

/// Rowwise great-circle distance in meters between two N x 2 arrays.
pub fn geodesic_distance_meters(
    coords_a: ArrayView2<f64>,
    coords_b: ArrayView2<f64>,
) -> Result<Array1<f64>, GeoError> {
    haversine_fraction(coords_a, coords_b).map(fraction_to_meters)
}

/// Rowwise great-circle distance in meters from each row to `point`.
pub fn geodesic_distance_meters_to_point(
    coords: ArrayView2<f64>,
    point: Coordinate,
) -> Result<Array1<f64>, GeoError> {
    haversine_fraction_to_point(coords, point).map(fraction_to_meters)
}

/// Great-circle distance using the haversine formula.
/// Input lat/lon in degrees. Output in meters.
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat1 - lat2;
    let dlon = a.lon.to_radians() - b.lon.to_radians();
    let fraction =
        (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * fraction.clamp(0.0, 1.0).sqrt().asin()
}
