//! Depok public facility locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap, rounded to four decimals.

use depok_point::places::{category, Place};
use depok_point::{Coordinate, Waypoint};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub category: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, category: &'static str, lat: f64, lng: f64) -> Self {
        Self {
            name,
            category,
            lat,
            lng,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng).expect("fixture coordinate")
    }

    pub fn waypoint(&self) -> Waypoint {
        Waypoint::named(self.coordinate(), self.name)
    }

    pub fn place(&self, id: usize) -> Place {
        Place {
            id: format!("place-{}", id),
            name: self.name.to_string(),
            category: self.category.to_string(),
            address: None,
            latitude: self.lat,
            longitude: self.lng,
            phone: None,
            image_url: None,
            description: None,
            updated_at: None,
        }
    }
}

pub const BALAI_KOTA: Location =
    Location::new("Balai Kota Depok", category::GOVERNMENT_OFFICE, -6.3937, 106.8227);
pub const UNIVERSITAS_INDONESIA: Location =
    Location::new("Universitas Indonesia", category::SCHOOL, -6.3606, 106.8272);

pub const FACILITIES: &[Location] = &[
    BALAI_KOTA,
    UNIVERSITAS_INDONESIA,
    Location::new("RSUD Kota Depok", category::HOSPITAL, -6.4133, 106.7950),
    Location::new("RS Universitas Indonesia", category::HOSPITAL, -6.3695, 106.8316),
    Location::new("Puskesmas Pancoran Mas", category::HEALTH_CENTER, -6.4005, 106.8115),
    Location::new("Polres Metro Depok", category::POLICE, -6.3953, 106.8196),
    Location::new("Damkar Kota Depok", category::FIRE_STATION, -6.4050, 106.8180),
    Location::new("Stasiun Depok Baru", category::TRANSPORTATION, -6.3911, 106.8175),
    Location::new("Terminal Jatijajar", category::TRANSPORTATION, -6.4306, 106.8560),
];

pub fn facility_places() -> Vec<Place> {
    FACILITIES
        .iter()
        .enumerate()
        .map(|(i, location)| location.place(i))
        .collect()
}
