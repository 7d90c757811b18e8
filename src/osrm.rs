//! OSRM HTTP adapter for point-to-point routes.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::coordinate::Waypoint;
use crate::error::RouteError;
use crate::polyline::{self, DEFAULT_PRECISION};
use crate::traits::{DirectionStep, RouteInfo, RouteProvider};

pub const OSRM_URL_ENV: &str = "DEPOK_OSRM_URL";
pub const OSRM_PROFILE_ENV: &str = "DEPOK_OSRM_PROFILE";
pub const OSRM_TIMEOUT_ENV: &str = "DEPOK_OSRM_TIMEOUT_SECS";
pub const OSRM_GEOMETRIES_ENV: &str = "DEPOK_OSRM_GEOMETRIES";

/// Geometry encodings OSRM can return. The requested format and the
/// decoding precision always come from the same value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeometryFormat {
    /// `polyline`, 1e-5.
    #[default]
    Polyline,
    /// `polyline6`, 1e-6.
    Polyline6,
}

impl GeometryFormat {
    pub fn precision(&self) -> f64 {
        match self {
            GeometryFormat::Polyline => DEFAULT_PRECISION,
            GeometryFormat::Polyline6 => 1e-6,
        }
    }

    /// Value of the `geometries` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryFormat::Polyline => "polyline",
            GeometryFormat::Polyline6 => "polyline6",
        }
    }
}

impl fmt::Display for GeometryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryFormat {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "polyline" => Ok(GeometryFormat::Polyline),
            "polyline6" => Ok(GeometryFormat::Polyline6),
            other => Err(RouteError::UnknownGeometryFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
    pub geometry: GeometryFormat,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
            geometry: GeometryFormat::default(),
        }
    }
}

impl OsrmConfig {
    /// Defaults overridden by `DEPOK_OSRM_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Like [`OsrmConfig::from_env`], reading variables through `lookup`.
    /// Unparseable values are logged and the default is kept.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(OSRM_URL_ENV) {
            config.base_url = url;
        }
        if let Some(profile) = lookup(OSRM_PROFILE_ENV) {
            config.profile = profile;
        }
        if let Some(raw) = lookup(OSRM_TIMEOUT_ENV) {
            match raw.parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => warn!(value = %raw, "ignoring invalid {}", OSRM_TIMEOUT_ENV),
            }
        }
        if let Some(raw) = lookup(OSRM_GEOMETRIES_ENV) {
            match raw.parse() {
                Ok(geometry) => config.geometry = geometry,
                Err(err) => warn!(error = %err, "ignoring invalid {}", OSRM_GEOMETRIES_ENV),
            }
        }

        config
    }

    /// `route` service URL for a start/end pair. OSRM takes `lng,lat`.
    pub fn route_url(&self, start: &Waypoint, end: &Waypoint) -> String {
        let (start_lat, start_lng) = start.coordinate.lat_lng();
        let (end_lat, end_lng) = end.coordinate.lat_lng();

        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}\
             ?overview=full&steps=true&geometries={}&annotations=distance,duration",
            self.base_url.trim_end_matches('/'),
            self.profile,
            start_lng,
            start_lat,
            end_lng,
            end_lat,
            self.geometry,
        )
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, RouteError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }
}

impl RouteProvider for OsrmClient {
    fn route(&self, start: &Waypoint, end: &Waypoint) -> Result<Option<RouteInfo>, RouteError> {
        let url = self.config.route_url(start, end);
        debug!(%url, "requesting OSRM route");

        let response = self.client.get(&url).send().map_err(|err| {
            warn!(error = %err, "OSRM request failed");
            err
        })?;
        let status = response.status();

        // OSRM reports NoRoute/InvalidQuery as JSON bodies on 4xx responses too.
        let body = match response.json::<OsrmRouteResponse>() {
            Ok(body) => body,
            Err(err) => {
                warn!(%status, error = %err, "unreadable OSRM response");
                return Err(err.into());
            }
        };

        route_from_response(body, self.config.geometry)
    }
}

/// Maps an OSRM `route` response onto a [`RouteInfo`].
///
/// `NoRoute` and an empty route list are `Ok(None)`; the geometry decoder is
/// only run when a route is present.
pub fn route_from_response(
    response: OsrmRouteResponse,
    geometry: GeometryFormat,
) -> Result<Option<RouteInfo>, RouteError> {
    match response.code.as_str() {
        "Ok" => {}
        "NoRoute" => return Ok(None),
        _ => {
            return Err(RouteError::Api {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }
    }

    let Some(route) = response.routes.unwrap_or_default().into_iter().next() else {
        debug!("OSRM returned no routes");
        return Ok(None);
    };

    let path = polyline::decode_polyline(&route.geometry, geometry.precision())?;
    debug!(points = path.len(), distance = route.distance, "decoded OSRM route");

    let steps = route
        .legs
        .into_iter()
        .flat_map(|leg| leg.steps)
        .map(|step| DirectionStep {
            instruction: step.instruction(),
            distance_meters: step.distance,
            duration_seconds: step.duration,
        })
        .collect();

    Ok(Some(RouteInfo {
        distance_meters: route.distance,
        duration_seconds: route.duration,
        path,
        steps,
    }))
}

#[derive(Debug, Deserialize)]
pub struct OsrmRouteResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Encoded polyline.
    pub geometry: String,
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
    #[serde(default)]
    pub legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmLeg {
    #[serde(default)]
    pub steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmStep {
    #[serde(default)]
    pub name: String,
    pub distance: f64,
    pub duration: f64,
    #[serde(default)]
    pub maneuver: Option<OsrmManeuver>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmManeuver {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub modifier: Option<String>,
}

impl OsrmStep {
    /// "turn left onto Jalan Margonda Raya" style text.
    fn instruction(&self) -> String {
        let action = self
            .maneuver
            .as_ref()
            .map(|m| match &m.modifier {
                Some(modifier) => format!("{} {}", m.kind, modifier),
                None => m.kind.clone(),
            })
            .unwrap_or_default();

        match (action.is_empty(), self.name.is_empty()) {
            (false, false) => format!("{} onto {}", action, self.name),
            (false, true) => action,
            (true, _) => self.name.clone(),
        }
    }
}
