//! Form session state for the city screen: a country draft plus an ordered
//! list of city rows, and the exclusive edit-slot for in-place city edits.

use shared::{
    domain::{CityId, CountryId},
    protocol::{City, NewCity, NewCountry},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityRow {
    /// Present when the row mirrors an already-persisted city (edit mode).
    pub id: Option<CityId>,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Transient draft of a country plus the city rows to create under it.
/// Discarded after a successful submit or on cancellation; nothing here
/// touches the network.
#[derive(Debug, Clone, PartialEq)]
pub struct CityForm {
    /// Selected owning country; `CountryId::NEW` means the submit should
    /// create a country from the name/iso fields first.
    pub country_id: CountryId,
    pub name: String,
    pub iso2: String,
    pub iso3: String,
    rows: Vec<CityRow>,
}

impl Default for CityForm {
    fn default() -> Self {
        Self {
            country_id: CountryId::NEW,
            name: String::new(),
            iso2: String::new(),
            iso3: String::new(),
            rows: Vec::new(),
        }
    }
}

impl CityForm {
    pub fn add_row(&mut self) {
        self.rows.push(CityRow::default());
    }

    /// Removes the row at `position`, keeping the relative order of the
    /// remaining rows. Out-of-range positions are a no-op.
    pub fn remove_row(&mut self, position: usize) -> bool {
        if position >= self.rows.len() {
            return false;
        }
        self.rows.remove(position);
        true
    }

    pub fn rows(&self) -> &[CityRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [CityRow] {
        &mut self.rows
    }

    /// Populates the session from an existing city: parent fields from its
    /// denormalized country, rows from a snapshot of its nested children.
    /// The session owns copies; editing it never mutates the source entity.
    pub fn load_for_edit(&mut self, city: &City) {
        self.country_id = city.country_id;
        match &city.country {
            Some(country) => {
                self.name = country.name.clone();
                self.iso2 = country.iso2.clone();
                self.iso3 = country.iso3.clone();
            }
            None => {
                self.name.clear();
                self.iso2.clear();
                self.iso3.clear();
            }
        }
        self.rows = city
            .cities
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|child| CityRow {
                id: Some(child.id),
                name: child.name.clone(),
                lat: child.lat,
                lon: child.lon,
            })
            .collect();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn creates_new_country(&self) -> bool {
        self.country_id.is_new()
    }

    pub fn country_draft(&self) -> NewCountry {
        NewCountry {
            name: self.name.clone(),
            iso2: self.iso2.clone(),
            iso3: self.iso3.clone(),
        }
    }

    /// Create payloads for every row, each owned by `country_id`.
    pub fn city_drafts(&self, country_id: CountryId) -> Vec<NewCity> {
        self.rows
            .iter()
            .map(|row| NewCity {
                name: row.name.clone(),
                lat: row.lat,
                lon: row.lon,
                country_id,
            })
            .collect()
    }
}

/// Exclusive handle on the one city being edited. Opening a new target
/// returns the previously open draft so the discard is explicit at the
/// call site rather than a silent overwrite.
#[derive(Debug, Clone, Default)]
pub struct EditSlot {
    current: Option<City>,
}

impl EditSlot {
    pub fn open(&mut self, city: &City) -> Option<City> {
        self.current.replace(city.clone())
    }

    pub fn cancel(&mut self) {
        self.current = None;
    }

    pub fn take(&mut self) -> Option<City> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&City> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut City> {
        self.current.as_mut()
    }

    pub fn is_editing(&self, id: CityId) -> bool {
        self.current.as_ref().is_some_and(|city| city.id == id)
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod form_tests;
