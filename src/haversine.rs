//! Great-circle math: distance, bearing, compass direction and the naive
//! straight-line route estimate.
//!
//! The estimate ignores roads and uses one constant speed for every segment.
//! It doubles as the fallback [`RouteProvider`] when the routing service is
//! unavailable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coordinate::{Coordinate, Waypoint};
use crate::error::{GeoError, RouteError};
use crate::polyline::Polyline;
use crate::traits::{RouteInfo, RouteProvider};

/// Average driving speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 50.0;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1_rad = a.latitude().to_radians();
    let lat2_rad = b.latitude().to_radians();
    let delta_lat = (b.latitude() - a.latitude()).to_radians();
    let delta_lng = (b.longitude() - a.longitude()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // rounding can push near-antipodal points just past 1
    let h = h.min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial bearing from `a` towards `b`, degrees clockwise from north in
/// `[-180, 180]`.
pub fn bearing_degrees(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let delta_lng = (b.longitude() - a.longitude()).to_radians();

    let y = delta_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

    y.atan2(x).to_degrees()
}

/// One of the eight 45° compass sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassDirection {
    /// Sectors clockwise from north; index `i` is centered on `i * 45°`.
    pub const ALL: [CompassDirection; 8] = [
        CompassDirection::North,
        CompassDirection::NorthEast,
        CompassDirection::East,
        CompassDirection::SouthEast,
        CompassDirection::South,
        CompassDirection::SouthWest,
        CompassDirection::West,
        CompassDirection::NorthWest,
    ];

    /// Sector containing `bearing` (any real value, normalized into
    /// `[0, 360)` first). Exact sector boundaries round up to the next
    /// sector clockwise.
    pub fn from_bearing(bearing: f64) -> Self {
        let normalized = bearing.rem_euclid(360.0);
        // normalized >= 0, so f64::round is round-half-up here
        let index = (normalized / 45.0).round() as usize % 8;
        Self::ALL[index]
    }

    /// Indonesian label shown on the map page.
    pub fn label(&self) -> &'static str {
        match self {
            CompassDirection::North => "Utara",
            CompassDirection::NorthEast => "Timur Laut",
            CompassDirection::East => "Timur",
            CompassDirection::SouthEast => "Tenggara",
            CompassDirection::South => "Selatan",
            CompassDirection::SouthWest => "Barat Daya",
            CompassDirection::West => "Barat",
            CompassDirection::NorthWest => "Barat Laut",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            CompassDirection::North => "N",
            CompassDirection::NorthEast => "NE",
            CompassDirection::East => "E",
            CompassDirection::SouthEast => "SE",
            CompassDirection::South => "S",
            CompassDirection::SouthWest => "SW",
            CompassDirection::West => "W",
            CompassDirection::NorthWest => "NW",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn compass_direction(bearing: f64) -> CompassDirection {
    CompassDirection::from_bearing(bearing)
}

/// Localized label for a bearing, e.g. `"Timur Laut"` for 45°.
pub fn compass_label(bearing: f64) -> &'static str {
    CompassDirection::from_bearing(bearing).label()
}

/// Straight-line distance and time over a sequence of waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub estimated_seconds: f64,
    pub waypoints: Vec<Waypoint>,
}

impl RouteSummary {
    /// True when there are enough waypoints to form a path.
    pub fn has_path(&self) -> bool {
        self.waypoints.len() >= 2
    }

    /// Returns the summary, or [`GeoError::EmptyRoute`] if there is no path.
    pub fn require_path(self) -> Result<Self, GeoError> {
        if self.has_path() {
            Ok(self)
        } else {
            Err(GeoError::EmptyRoute {
                waypoints: self.waypoints.len(),
            })
        }
    }
}

/// Haversine-based route estimator.
///
/// Estimates travel time using straight-line distance and an assumed speed.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEstimator {
    speed_kmh: f64,
}

impl Default for RouteEstimator {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl RouteEstimator {
    /// `speed_kmh` must be finite and positive.
    pub fn new(speed_kmh: f64) -> Result<Self, GeoError> {
        if speed_kmh.is_finite() && speed_kmh > 0.0 {
            Ok(Self { speed_kmh })
        } else {
            Err(GeoError::InvalidSpeed(speed_kmh))
        }
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    /// Convert distance in km to travel time in seconds.
    fn km_to_seconds(&self, km: f64) -> f64 {
        km / self.speed_kmh * 3600.0
    }

    /// Sums per-segment distance and time over consecutive waypoints.
    ///
    /// Fewer than two waypoints yields zero distance and time; the waypoints
    /// are returned unchanged either way.
    pub fn summarize(&self, waypoints: Vec<Waypoint>) -> RouteSummary {
        let mut total_km = 0.0;
        let mut estimated_seconds = 0.0;

        for pair in waypoints.windows(2) {
            let km = distance_km(&pair[0].coordinate, &pair[1].coordinate);
            total_km += km;
            estimated_seconds += self.km_to_seconds(km);
        }

        RouteSummary {
            distance_meters: total_km * 1000.0,
            estimated_seconds,
            waypoints,
        }
    }
}

/// [`RouteEstimator::summarize`] at [`DEFAULT_SPEED_KMH`].
pub fn summarize_route(waypoints: Vec<Waypoint>) -> RouteSummary {
    RouteEstimator::default().summarize(waypoints)
}

impl RouteProvider for RouteEstimator {
    /// Always finds a route: the straight segment from `start` to `end`.
    fn route(&self, start: &Waypoint, end: &Waypoint) -> Result<Option<RouteInfo>, RouteError> {
        let km = distance_km(&start.coordinate, &end.coordinate);

        Ok(Some(RouteInfo {
            distance_meters: km * 1000.0,
            duration_seconds: self.km_to_seconds(km),
            path: Polyline::new(vec![start.coordinate, end.coordinate]),
            steps: Vec::new(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BALAI_KOTA: Coordinate = Coordinate::new_unchecked(-6.3937, 106.8227);
    const UI_DEPOK: Coordinate = Coordinate::new_unchecked(-6.3606, 106.8272);
    const MONAS: Coordinate = Coordinate::new_unchecked(-6.1754, 106.8272);

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn test_distance_same_point() {
        assert_eq!(distance_km(&BALAI_KOTA, &BALAI_KOTA), 0.0);
    }

    #[test]
    fn test_distance_one_degree_at_equator() {
        let dist = distance_km(&coord(0.0, 0.0), &coord(0.0, 1.0));
        assert!((dist - 111.19).abs() < 0.01, "got {}", dist);
    }

    #[test]
    fn test_distance_known() {
        // Depok city hall to Monas, ~24 km
        let dist = distance_km(&BALAI_KOTA, &MONAS);
        assert!(dist > 23.0 && dist < 26.0, "got {}", dist);
    }

    #[test]
    fn test_distance_symmetric() {
        let d1 = distance_km(&BALAI_KOTA, &UI_DEPOK);
        let d2 = distance_km(&UI_DEPOK, &BALAI_KOTA);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_cardinal() {
        let origin = coord(0.0, 0.0);
        assert!(bearing_degrees(&origin, &coord(1.0, 0.0)).abs() < 1e-9);
        assert!((bearing_degrees(&origin, &coord(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((bearing_degrees(&origin, &coord(0.0, -1.0)) + 90.0).abs() < 1e-9);
        assert!((bearing_degrees(&origin, &coord(-1.0, 0.0)).abs() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_not_antisymmetric_on_sphere() {
        let a = coord(10.0, 0.0);
        let b = coord(40.0, 50.0);
        let forward = bearing_degrees(&a, &b);
        let back = bearing_degrees(&b, &a);
        assert!((forward + back).abs() > 1.0);
    }

    #[test]
    fn test_compass_sector_centers() {
        for (i, direction) in CompassDirection::ALL.iter().enumerate() {
            assert_eq!(compass_direction(i as f64 * 45.0), *direction);
        }
        assert_eq!(compass_direction(-90.0), CompassDirection::West);
        assert_eq!(compass_direction(-180.0), CompassDirection::South);
        assert_eq!(compass_direction(359.0), CompassDirection::North);
        assert_eq!(compass_direction(720.0 + 90.0), CompassDirection::East);
    }

    #[test]
    fn test_compass_ties_round_up() {
        assert_eq!(compass_direction(22.5), CompassDirection::NorthEast);
        assert_eq!(compass_direction(22.4), CompassDirection::North);
        assert_eq!(compass_direction(337.5), CompassDirection::North);
        assert_eq!(compass_direction(-22.5), CompassDirection::North);
    }

    #[test]
    fn test_compass_labels() {
        assert_eq!(compass_label(0.0), "Utara");
        assert_eq!(compass_label(135.0), "Tenggara");
        assert_eq!(compass_label(-45.0), "Barat Laut");
        assert_eq!(CompassDirection::SouthWest.abbreviation(), "SW");
        assert_eq!(CompassDirection::East.to_string(), "Timur");
    }

    #[test]
    fn test_summarize_empty_and_single() {
        let empty = summarize_route(vec![]);
        assert_eq!(empty.distance_meters, 0.0);
        assert_eq!(empty.estimated_seconds, 0.0);
        assert!(empty.waypoints.is_empty());

        let single = summarize_route(vec![Waypoint::new(BALAI_KOTA)]);
        assert_eq!(single.distance_meters, 0.0);
        assert_eq!(single.estimated_seconds, 0.0);
        assert_eq!(single.waypoints.len(), 1);
        assert_eq!(
            single.require_path(),
            Err(GeoError::EmptyRoute { waypoints: 1 })
        );
    }

    #[test]
    fn test_summarize_accumulates_segments() {
        let waypoints = vec![
            Waypoint::new(BALAI_KOTA),
            Waypoint::new(UI_DEPOK),
            Waypoint::new(MONAS),
        ];
        let expected_km =
            distance_km(&BALAI_KOTA, &UI_DEPOK) + distance_km(&UI_DEPOK, &MONAS);

        let summary = summarize_route(waypoints).require_path().unwrap();
        assert!((summary.distance_meters - expected_km * 1000.0).abs() < 1e-6);
        assert!((summary.estimated_seconds - expected_km / 50.0 * 3600.0).abs() < 1e-6);
        assert_eq!(summary.waypoints.len(), 3);
    }

    #[test]
    fn test_reasonable_travel_time() {
        let estimator = RouteEstimator::new(40.0).unwrap();
        // 10 km at 40 km/h = 0.25 hours = 900 seconds
        assert!((estimator.km_to_seconds(10.0) - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_speed() {
        assert_eq!(RouteEstimator::new(0.0), Err(GeoError::InvalidSpeed(0.0)));
        assert!(RouteEstimator::new(-5.0).is_err());
        assert!(RouteEstimator::new(f64::NAN).is_err());
    }

    #[test]
    fn test_straight_line_route() {
        let estimator = RouteEstimator::default();
        let route = estimator
            .route(&Waypoint::new(BALAI_KOTA), &Waypoint::new(UI_DEPOK))
            .unwrap()
            .expect("straight line always routes");

        assert_eq!(route.path.points(), &[BALAI_KOTA, UI_DEPOK]);
        assert!(route.steps.is_empty());
        let km = distance_km(&BALAI_KOTA, &UI_DEPOK);
        assert!((route.duration_seconds - km / 50.0 * 3600.0).abs() < 1e-9);
    }
}
