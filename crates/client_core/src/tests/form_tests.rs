use super::*;
use shared::protocol::{City, Country};

fn city(id: i64, name: &str) -> City {
    City {
        id: CityId(id),
        name: name.to_string(),
        lat: 1.0,
        lon: 2.0,
        country_id: CountryId(4),
        country: None,
        cities: None,
    }
}

#[test]
fn new_form_defaults_to_the_create_country_sentinel() {
    let form = CityForm::default();
    assert!(form.creates_new_country());
    assert!(form.rows().is_empty());
}

#[test]
fn remove_row_preserves_relative_order() {
    let mut form = CityForm::default();
    for name in ["a", "b", "c"] {
        form.add_row();
        form.rows_mut().last_mut().expect("row").name = name.to_string();
    }

    assert!(form.remove_row(1));
    let names: Vec<&str> = form.rows().iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn remove_row_out_of_range_is_a_noop() {
    let mut form = CityForm::default();
    form.add_row();
    assert!(!form.remove_row(1));
    assert!(!form.remove_row(usize::MAX));
    assert_eq!(form.rows().len(), 1);
}

#[test]
fn load_for_edit_snapshots_the_entity() {
    let mut nested = city(21, "District");
    nested.lat = 9.5;
    let source = City {
        id: CityId(20),
        name: "Metropolis".to_string(),
        lat: 0.0,
        lon: 0.0,
        country_id: CountryId(4),
        country: Some(Country {
            id: CountryId(4),
            name: "Wakanda".to_string(),
            iso2: "WK".to_string(),
            iso3: "WKD".to_string(),
            city_count: 2,
        }),
        cities: Some(vec![nested]),
    };

    let mut form = CityForm::default();
    form.load_for_edit(&source);
    assert_eq!(form.country_id, CountryId(4));
    assert!(!form.creates_new_country());
    assert_eq!(form.name, "Wakanda");
    assert_eq!(form.iso2, "WK");
    assert_eq!(form.rows().len(), 1);
    assert_eq!(form.rows()[0].id, Some(CityId(21)));
    assert_eq!(form.rows()[0].lat, 9.5);

    // The session owns a copy; editing it leaves the source untouched.
    form.rows_mut()[0].name = "Renamed".to_string();
    assert_eq!(source.cities.as_ref().expect("children")[0].name, "District");
}

#[test]
fn load_for_edit_without_denormalized_country_clears_parent_fields() {
    let mut form = CityForm::default();
    form.name = "Stale".to_string();
    form.load_for_edit(&city(10, "Capital"));
    assert_eq!(form.country_id, CountryId(4));
    assert!(form.name.is_empty());
    assert!(form.rows().is_empty());
}

#[test]
fn reset_clears_back_to_default() {
    let mut form = CityForm::default();
    form.country_id = CountryId(9);
    form.name = "Genosha".to_string();
    form.add_row();

    form.reset();
    assert_eq!(form, CityForm::default());
}

#[test]
fn city_drafts_carry_the_resolved_country_id() {
    let mut form = CityForm::default();
    form.add_row();
    form.add_row();

    let drafts = form.city_drafts(CountryId(42));
    assert_eq!(drafts.len(), 2);
    assert!(drafts.iter().all(|draft| draft.country_id == CountryId(42)));
}

#[test]
fn edit_slot_holds_one_target_and_returns_the_discarded_draft() {
    let mut slot = EditSlot::default();
    assert!(slot.open(&city(1, "First")).is_none());
    assert!(slot.is_editing(CityId(1)));

    // Reopening hands back the previous draft instead of silently dropping it.
    let discarded = slot.open(&city(2, "Second")).expect("previous draft");
    assert_eq!(discarded.id, CityId(1));
    assert!(slot.is_editing(CityId(2)));
    assert!(!slot.is_editing(CityId(1)));

    slot.cancel();
    assert!(slot.current().is_none());
    assert!(slot.take().is_none());
}
