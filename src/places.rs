//! Public facility directory: place records, search filtering,
//! nearest-facility ranking and per-category counts.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::coordinate::Coordinate;
use crate::error::GeoError;
use crate::haversine::distance_km;
use crate::traits::Located;

/// Well-known category names used by the directory.
pub mod category {
    pub const HOSPITAL: &str = "Rumah Sakit";
    pub const HEALTH_CENTER: &str = "Puskesmas";
    pub const POLICE: &str = "Kantor Polisi";
    pub const FIRE_STATION: &str = "Pemadam Kebakaran";
    pub const SCHOOL: &str = "Sekolah";
    pub const GOVERNMENT_OFFICE: &str = "Kantor Pemerintahan";
    pub const TRANSPORTATION: &str = "Transportasi";
    pub const OTHER: &str = "Lainnya";
}

fn default_category() -> String {
    category::OTHER.to_string()
}

/// A facility record as stored in the document database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Located for Place {
    /// Records are not validated on write, so the position is checked here.
    fn coordinate(&self) -> Result<Coordinate, GeoError> {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Search box and category dropdown of the map page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceFilter {
    pub query: Option<String>,
    /// `None` selects all categories.
    pub category: Option<String>,
}

impl PlaceFilter {
    pub fn matches(&self, place: &Place) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|category| place.category == category);

        category_ok && self.matches_query(place)
    }

    fn matches_query(&self, place: &Place) -> bool {
        let Some(query) = self.query.as_deref().map(str::to_lowercase) else {
            return true;
        };
        let contains = |field: &str| field.to_lowercase().contains(&query);

        contains(&place.name)
            || contains(&place.category)
            || place.address.as_deref().is_some_and(contains)
            || place.phone.as_deref().is_some_and(contains)
    }
}

pub fn filter_places<'a>(places: &'a [Place], filter: &PlaceFilter) -> Vec<&'a Place> {
    places.iter().filter(|place| filter.matches(place)).collect()
}

/// An item paired with its distance from the search origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub item: T,
    pub distance_km: f64,
}

/// Items sorted by distance from `origin`, closest first.
///
/// Items without a valid coordinate are skipped.
pub fn nearest_places<'a, T>(
    origin: &Coordinate,
    items: &'a [T],
    max_results: Option<usize>,
) -> Vec<Ranked<&'a T>>
where
    T: Located + Sync,
{
    let mut ranked: Vec<Ranked<&T>> = items
        .par_iter()
        .filter_map(|item| match item.coordinate() {
            Ok(coordinate) => Some(Ranked {
                item,
                distance_km: distance_km(origin, &coordinate),
            }),
            Err(err) => {
                warn!(error = %err, "skipping item without a valid location");
                None
            }
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    if let Some(max) = max_results {
        ranked.truncate(max);
    }

    ranked
}

/// Items within `radius_km` of `origin`, closest first.
pub fn within_radius<'a, T>(
    origin: &Coordinate,
    items: &'a [T],
    radius_km: f64,
) -> Vec<Ranked<&'a T>>
where
    T: Located + Sync,
{
    let mut ranked = nearest_places(origin, items, None);
    ranked.retain(|r| r.distance_km <= radius_km);
    ranked
}

/// Number of places per category, for the dashboard cards.
pub fn category_counts(places: &[Place]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for place in places {
        *counts.entry(place.category.clone()).or_insert(0) += 1;
    }
    counts
}
