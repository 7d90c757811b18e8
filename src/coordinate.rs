//! Validated coordinate and waypoint values.

use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// A geographic point in degrees.
///
/// Always finite and in range: every constructor (including serde
/// deserialization) validates, so distance and bearing math never sees NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if valid {
            Ok(Self { latitude, longitude })
        } else {
            Err(GeoError::InvalidCoordinate { latitude, longitude })
        }
    }

    /// For compile-time constants whose values are known to be valid.
    #[cfg(test)]
    pub(crate) const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// (lat, lng) tuple, the order map frontends expect.
    pub fn lat_lng(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = GeoError;

    fn try_from((lat, lng): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(lat, lng)
    }
}

/// A point a route passes through, optionally named for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Waypoint {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            name: None,
        }
    }

    pub fn named(coordinate: Coordinate, name: impl Into<String>) -> Self {
        Self {
            coordinate,
            name: Some(name.into()),
        }
    }
}

impl From<Coordinate> for Waypoint {
    fn from(coordinate: Coordinate) -> Self {
        Self::new(coordinate)
    }
}
