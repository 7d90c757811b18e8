//! Depok Point geo core
//!
//! Distance and bearing math, OSRM route lookups with polyline decoding,
//! and the facility directory logic behind the public map page.

pub mod coordinate;
pub mod error;
pub mod format;
pub mod haversine;
pub mod osrm;
pub mod places;
pub mod polyline;
pub mod traits;

pub use coordinate::{Coordinate, Waypoint};
pub use error::{DecodeError, GeoError, RouteError};
pub use format::{format_distance, format_duration};
pub use haversine::{
    bearing_degrees, compass_direction, compass_label, distance_km, summarize_route,
    CompassDirection, RouteEstimator, RouteSummary,
};
pub use polyline::{decode_polyline, encode_polyline, Polyline, DEFAULT_PRECISION};
pub use traits::{DirectionStep, Located, RouteInfo, RouteProvider};
