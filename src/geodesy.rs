//! Spherical-Earth geodesy: bearing and distance between lat/lon points.
//!
//! Treats the Earth as a sphere, which is accurate to well under a degree of
//! bearing at the city scale this engine operates on.

use crate::error::{GuidanceError, Result};

/// Mean Earth radius in meters (spherical approximation).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic point in decimal degrees.
///
/// Construction validates the coordinate ranges, so a `GeoPoint` held
/// anywhere in the engine is always a real place on the sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude_degrees: f64,
    longitude_degrees: f64,
}

impl GeoPoint {
    /// Create a point, requiring latitude in [-90, 90] and longitude in
    /// [-180, 180].
    pub fn new(latitude_degrees: f64, longitude_degrees: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude_degrees)
            || !(-180.0..=180.0).contains(&longitude_degrees)
            || latitude_degrees.is_nan()
            || longitude_degrees.is_nan()
        {
            return Err(GuidanceError::InvalidCoordinate {
                latitude: latitude_degrees,
                longitude: longitude_degrees,
            });
        }
        Ok(Self {
            latitude_degrees,
            longitude_degrees,
        })
    }

    pub fn latitude_degrees(&self) -> f64 {
        self.latitude_degrees
    }

    pub fn longitude_degrees(&self) -> f64 {
        self.longitude_degrees
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4},{:.4}", self.latitude_degrees, self.longitude_degrees)
    }
}

/// Normalize an angle to [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Signed shortest angular distance from `from` to `to`, in [-180, 180).
///
/// Adding the result to `from` (mod 360) lands on `to` without ever taking
/// the long way around the circle.
pub fn shortest_delta_degrees(from: f64, to: f64) -> f64 {
    (to - from + 540.0).rem_euclid(360.0) - 180.0
}

/// Initial great-circle bearing from `from` toward `to`, in [0, 360)
/// clockwise from north.
///
/// Coincident points have no meaningful direction; the result is defined
/// as 0 rather than an error.
pub fn initial_bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat1 = from.latitude_degrees().to_radians();
    let lat2 = to.latitude_degrees().to_radians();
    let delta_lon = (to.longitude_degrees() - from.longitude_degrees()).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Great-circle distance between two points in meters (haversine).
pub fn haversine_distance_m(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude_degrees().to_radians();
    let lat2 = to.latitude_degrees().to_radians();
    let delta_lat = (to.latitude_degrees() - from.latitude_degrees()).to_radians();
    let delta_lon = (to.longitude_degrees() - from.longitude_degrees()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}
