use serde::{Deserialize, Serialize};

use crate::domain::{CityId, CountryId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    pub iso2: String,
    pub iso3: String,
    /// Denormalized count of cities owned by this country.
    #[serde(default)]
    pub city_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country_id: CountryId,
    /// Denormalized owning country; the backend may send it partially
    /// populated or not at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    /// Reserved nested relationship. The backend schema allows a city to
    /// carry child city records, but no operation populates or reads them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cities: Option<Vec<City>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCountry {
    pub name: String,
    pub iso2: String,
    pub iso3: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCity {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country_id: CountryId,
}

/// List endpoints wrap their collection in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
}
