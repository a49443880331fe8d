use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::CityId,
    protocol::{City, Country, ListEnvelope, NewCity, NewCountry},
};
use tracing::info;
use url::Url;

pub mod directory;
pub mod form;
pub mod submit;

pub use directory::{Directory, UNKNOWN_COUNTRY};
pub use form::{CityForm, CityRow, EditSlot};
pub use submit::{submit_city_form, RowFailure, SubmitError, SubmitReport};

/// One method per backend endpoint. Every call is fire-once: no retries,
/// no caching, no pagination. Country update/delete endpoints exist on the
/// backend but are not exercised by this client.
#[async_trait]
pub trait GazetteerApi: Send + Sync {
    async fn list_countries(&self) -> Result<Vec<Country>>;
    async fn create_country(&self, draft: &NewCountry) -> Result<Country>;
    async fn list_cities(&self) -> Result<Vec<City>>;
    async fn create_city(&self, draft: &NewCity) -> Result<City>;
    async fn update_city(&self, id: CityId, city: &City) -> Result<City>;
    async fn delete_city(&self, id: CityId) -> Result<()>;
}

pub struct RestClient {
    http: Client,
    base_url: Url,
}

impl RestClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid server url: {base_url}"))?;
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

#[async_trait]
impl GazetteerApi for RestClient {
    async fn list_countries(&self) -> Result<Vec<Country>> {
        let envelope: ListEnvelope<Country> = self
            .http
            .get(self.endpoint("countries"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!(count = envelope.data.len(), "countries loaded");
        Ok(envelope.data)
    }

    async fn create_country(&self, draft: &NewCountry) -> Result<Country> {
        let country: Country = self
            .http
            .post(self.endpoint("countries"))
            .json(draft)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!(country_id = country.id.0, name = country.name.as_str(), "country created");
        Ok(country)
    }

    async fn list_cities(&self) -> Result<Vec<City>> {
        let envelope: ListEnvelope<City> = self
            .http
            .get(self.endpoint("cities"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!(count = envelope.data.len(), "cities loaded");
        Ok(envelope.data)
    }

    async fn create_city(&self, draft: &NewCity) -> Result<City> {
        let city: City = self
            .http
            .post(self.endpoint("cities"))
            .json(draft)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!(city_id = city.id.0, country_id = city.country_id.0, "city created");
        Ok(city)
    }

    async fn update_city(&self, id: CityId, city: &City) -> Result<City> {
        let city: City = self
            .http
            .put(self.endpoint(&format!("cities/{}", id.0)))
            .json(city)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!(city_id = city.id.0, "city updated");
        Ok(city)
    }

    async fn delete_city(&self, id: CityId) -> Result<()> {
        self.http
            .delete(self.endpoint(&format!("cities/{}", id.0)))
            .send()
            .await?
            .error_for_status()?;
        info!(city_id = id.0, "city deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod lib_tests;
