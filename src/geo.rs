//! Geographic primitives: points, validation, formatting, and the
//! equirectangular projection used to place markers in world space.

use bevy::prelude::*;
use thiserror::Error;

/// Meters per degree of latitude (spherical approximation).
const METERS_PER_DEG_LAT: f64 = 110_540.0;
/// Meters per degree of longitude at the equator.
const METERS_PER_DEG_LNG: f64 = 111_320.0;

/// Fallback center used when no device fix is available (Cebu City).
pub const FALLBACK_CENTER: GeoPoint = GeoPoint {
    lat: 10.3157,
    lng: 123.8854,
};

/// Default town center before any fix arrives (Puerto Princesa).
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    lat: 9.7393,
    lng: 118.735,
};

#[derive(Error, Debug, PartialEq)]
pub enum GeoError {
    #[error("invalid coordinate ({lat}, {lng}): out of range or not finite")]
    InvalidCoordinate { lat: f64, lng: f64 },
}

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Construct a point, rejecting non-finite or out-of-range coordinates.
    pub fn checked(lat: f64, lng: f64) -> Result<Self, GeoError> {
        let in_range =
            lat.is_finite() && lng.is_finite() && lat.abs() <= 90.0 && lng.abs() <= 180.0;
        if in_range {
            Ok(Self { lat, lng })
        } else {
            Err(GeoError::InvalidCoordinate { lat, lng })
        }
    }
}

/// "9.7393, 118.7350" style display for the location chip.
pub fn format_coords(point: GeoPoint) -> String {
    format!("{:.4}, {:.4}", point.lat, point.lng)
}

/// Maps geographic coordinates to 2D world space (meters) around a fixed
/// origin. The origin is pinned to the first resolved center so markers and
/// the camera share one frame of reference.
#[derive(Resource, Clone, Copy, Debug)]
pub struct MapProjection {
    pub origin: GeoPoint,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            origin: DEFAULT_CENTER,
        }
    }
}

impl MapProjection {
    pub fn new(origin: GeoPoint) -> Self {
        Self { origin }
    }

    /// World position (meters east/north of the origin) for a point.
    pub fn to_world(&self, point: GeoPoint) -> Vec2 {
        let lng_scale = METERS_PER_DEG_LNG * self.origin.lat.to_radians().cos();
        Vec2::new(
            ((point.lng - self.origin.lng) * lng_scale) as f32,
            ((point.lat - self.origin.lat) * METERS_PER_DEG_LAT) as f32,
        )
    }
}
