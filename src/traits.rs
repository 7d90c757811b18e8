//! Seams between the geo core and its collaborators.
//!
//! Route lookups go through [`RouteProvider`] so callers can swap the HTTP
//! routing service for the straight-line estimate. Directory records expose
//! their position through [`Located`].

use serde::{Deserialize, Serialize};

use crate::coordinate::{Coordinate, Waypoint};
use crate::error::{GeoError, RouteError};
use crate::polyline::Polyline;

/// A route between two waypoints as returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub path: Polyline,
    pub steps: Vec<DirectionStep>,
}

/// One turn-by-turn step of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionStep {
    pub instruction: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Finds a route from `start` to `end`.
///
/// `Ok(None)` means the provider answered but found no route.
pub trait RouteProvider {
    fn route(&self, start: &Waypoint, end: &Waypoint) -> Result<Option<RouteInfo>, RouteError>;
}

/// Anything with a position on the map.
pub trait Located {
    fn coordinate(&self) -> Result<Coordinate, GeoError>;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Result<Coordinate, GeoError> {
        Ok(*self)
    }
}

impl Located for Waypoint {
    fn coordinate(&self) -> Result<Coordinate, GeoError> {
        Ok(self.coordinate)
    }
}
