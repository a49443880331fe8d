use shared::protocol::{City, Country};

/// Replies from the backend worker. Loaded collections replace the UI's
/// copies wholesale; everything else updates the status line.
#[derive(Debug, Clone)]
pub enum UiEvent {
    CountriesLoaded(Vec<Country>),
    CitiesLoaded(Vec<City>),
    /// The submit join completed; the form can be reset. Partial success is
    /// an accepted outcome, so failed row names travel alongside the count.
    SubmitFinished {
        created_country: Option<String>,
        created: usize,
        failed: Vec<String>,
    },
    CityUpdated,
    CityDeleted,
    Error(String),
    Info(String),
}

/// Status-line summary for a finished submit.
pub fn submit_status(created_country: Option<&str>, created: usize, failed: &[String]) -> String {
    let mut parts = Vec::new();
    if let Some(name) = created_country {
        parts.push(format!("created country '{name}'"));
    }
    parts.push(format!(
        "created {created} {}",
        if created == 1 { "city" } else { "cities" }
    ));
    if !failed.is_empty() {
        parts.push(format!("failed: {}", failed.join(", ")));
    }
    parts.join("; ")
}
