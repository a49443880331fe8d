//! The city-screen submit protocol: create-or-attach for the country, then
//! one independent create per city row.

use futures::future::join_all;
use shared::protocol::{City, Country};
use thiserror::Error;
use tracing::{error, info};

use crate::{form::CityForm, GazetteerApi};

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The parent create failed before any city row was attempted; there is
    /// nothing to roll back.
    #[error("failed to create country '{name}': {source}")]
    CountryCreate {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug)]
pub struct RowFailure {
    pub position: usize,
    pub name: String,
    pub error: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct SubmitReport {
    /// The country created for a sentinel submit, if any.
    pub country: Option<Country>,
    pub created: Vec<City>,
    pub failed: Vec<RowFailure>,
}

/// Submits a city form.
///
/// With the sentinel country id, the country is created first and every row
/// attaches to the returned id; if that create fails no row is attempted.
/// Rows are dispatched concurrently with no ordering guarantee among
/// themselves and joined before returning, so a reload issued after this
/// call reflects every row's outcome. Row failures do not abort siblings;
/// partial success is an accepted result and is reported per row.
pub async fn submit_city_form(
    api: &dyn GazetteerApi,
    form: &CityForm,
) -> Result<SubmitReport, SubmitError> {
    let mut report = SubmitReport::default();

    let country_id = if form.creates_new_country() {
        let draft = form.country_draft();
        let country = api
            .create_country(&draft)
            .await
            .map_err(|source| SubmitError::CountryCreate {
                name: draft.name.clone(),
                source,
            })?;
        let id = country.id;
        report.country = Some(country);
        id
    } else {
        form.country_id
    };

    let drafts = form.city_drafts(country_id);
    let outcomes = join_all(drafts.iter().map(|draft| api.create_city(draft))).await;
    for (position, (draft, outcome)) in drafts.iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(city) => report.created.push(city),
            Err(err) => {
                error!(position, name = draft.name.as_str(), "city create failed: {err:#}");
                report.failed.push(RowFailure {
                    position,
                    name: draft.name.clone(),
                    error: err,
                });
            }
        }
    }

    info!(
        created = report.created.len(),
        failed = report.failed.len(),
        "city form submitted"
    );
    Ok(report)
}
