//! The loaded country and city collections backing the list views.
//!
//! The two collections are loaded independently and replaced wholesale on
//! every reload; nothing patches them incrementally. Country-name lookups
//! are total and fall back to a sentinel while either side is still loading.

use shared::{
    domain::CountryId,
    protocol::{City, Country},
};
use tracing::error;

use crate::GazetteerApi;

/// Shown for a city whose country id has no match in the loaded set.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

#[derive(Debug, Clone, Default)]
pub struct Directory {
    countries: Vec<Country>,
    cities: Vec<City>,
}

impl Directory {
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn replace_countries(&mut self, countries: Vec<Country>) {
        self.countries = countries;
    }

    pub fn replace_cities(&mut self, cities: Vec<City>) {
        self.cities = cities;
    }

    /// Total lookup: the country's display name, or [`UNKNOWN_COUNTRY`]
    /// when the id is not (yet) in the loaded set.
    pub fn country_name(&self, id: CountryId) -> &str {
        self.countries
            .iter()
            .find(|country| country.id == id)
            .map(|country| country.name.as_str())
            .unwrap_or(UNKNOWN_COUNTRY)
    }

    /// Fetches both collections concurrently. Each side that loads replaces
    /// its collection; a side that fails is logged and leaves the previous
    /// contents in place.
    pub async fn refresh(&mut self, api: &dyn GazetteerApi) {
        let (countries, cities) = futures::join!(api.list_countries(), api.list_cities());
        match countries {
            Ok(countries) => self.countries = countries,
            Err(err) => error!("failed to load countries: {err:#}"),
        }
        match cities {
            Ok(cities) => self.cities = cities,
            Err(err) => error!("failed to load cities: {err:#}"),
        }
    }
}

#[cfg(test)]
#[path = "tests/directory_tests.rs"]
mod directory_tests;
