//! Error types for geo math, polyline decoding and route lookups.

use thiserror::Error;

/// Errors raised by coordinate validation and route summaries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude/longitude not finite or outside [-90,90] / [-180,180].
    #[error("invalid coordinate: lat={latitude}, lng={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("invalid average speed: {0} km/h")]
    InvalidSpeed(f64),

    /// A route needs at least two waypoints.
    #[error("route needs at least 2 waypoints, got {waypoints}")]
    EmptyRoute { waypoints: usize },
}

/// Malformed encoded polyline input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("polyline truncated at byte {position}")]
    Truncated { position: usize },

    #[error("invalid polyline byte 0x{byte:02x} at {position}")]
    InvalidCharacter { position: usize, byte: u8 },

    #[error("polyline value overflows at byte {position}")]
    Overflow { position: usize },

    #[error("decoded point {index} is not a valid coordinate")]
    OutOfRange { index: usize },

    #[error("invalid polyline precision: {0}")]
    InvalidPrecision(f64),
}

/// Failures while fetching or building a route.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("routing request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The routing service answered with a non-`Ok` code.
    #[error("routing service returned {code}: {message}")]
    Api { code: String, message: String },

    #[error("route geometry: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error("unknown OSRM geometry format: {0}")]
    UnknownGeometryFormat(String),
}
