//! Great-circle distance between GPS coordinates.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A point on the Earth's surface in decimal degrees.
///
/// Equality is exact `f64` equality. Two coordinates that differ in the last
/// bit are different places as far as pricing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct GpsCoordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for GpsCoordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GpsCoordinate {
    /// Builds a coordinate, rejecting non-finite or out-of-range components.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::Latitude`] or [`CoordinateError::Longitude`]
    /// naming the offending component.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Builds a coordinate from a GeoJSON-style `[longitude, latitude]` pair.
    ///
    /// # Errors
    ///
    /// Same as [`GpsCoordinate::new`].
    pub fn from_lon_lat([longitude, latitude]: [f64; 2]) -> Result<Self, CoordinateError> {
        Self::new(latitude, longitude)
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.latitude
            .total_cmp(&other.latitude)
            .then(self.longitude.total_cmp(&other.longitude))
    }
}

/// Straight-line ground distance between `a` and `b` in whole meters.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_METERS`].
/// The fractional meter is discarded, not rounded. Exactly equal points are
/// zero meters apart without touching the trigonometry.
#[must_use]
pub fn distance_meters(a: GpsCoordinate, b: GpsCoordinate) -> u64 {
    if a == b {
        return 0;
    }

    // Evaluate in a canonical order so that swapping the arguments can never
    // change the last bit of the result.
    let (from, to) = match a.total_cmp(&b) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    };

    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let delta_phi = phi2 - phi1;
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1.0 for antipodal points.
    let central_angle = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let meters = (central_angle * EARTH_RADIUS_METERS).floor() as u64;

    tracing::debug!(
        from_lat = from.latitude,
        from_lon = from.longitude,
        to_lat = to.latitude,
        to_lon = to.longitude,
        meters,
        "computed straight-line distance"
    );
    meters
}
