use client_core::CityForm;
use shared::{domain::CityId, protocol::City};

/// Work the UI hands to the backend worker. Commands carry owned data so
/// the UI thread never blocks on network calls.
#[derive(Debug, Clone)]
pub enum BackendCommand {
    LoadCountries,
    LoadCities,
    /// Snapshot of the form session at the moment Save was pressed.
    SubmitCityForm { form: CityForm },
    /// Full replacement of one city, keyed by its id.
    SaveCityEdit { city: City },
    /// Only dispatched after the user confirmed the delete dialog.
    DeleteCity { id: CityId },
}
