//! Test fixtures for depok-point.
//!
//! Provides realistic test data including:
//! - Depok public facility locations (from OpenStreetMap)
//! - Recorded OSRM `route` responses

#![allow(dead_code)]

pub mod depok_locations;

pub use depok_locations::*;

pub const OSRM_ROUTE_BALAI_KOTA_TO_UI: &str =
    include_str!("osrm/route_balai_kota_to_ui.json");
pub const OSRM_NO_ROUTE: &str = include_str!("osrm/no_route.json");
pub const OSRM_EMPTY_ROUTES: &str = include_str!("osrm/empty_routes.json");
