use client_core::{CityForm, Directory, EditSlot};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::Color32;
use shared::{domain::CountryId, protocol::City};
use tracing::warn;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{submit_status, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Countries,
    Cities,
}

struct StatusLine {
    text: String,
    is_error: bool,
}

pub struct GazetteerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: View,
    directory: Directory,
    form: CityForm,
    edit: EditSlot,
    pending_delete: Option<City>,
    status: Option<StatusLine>,
}

fn send(cmd_tx: &Sender<BackendCommand>, cmd: BackendCommand) {
    if let Err(err) = cmd_tx.try_send(cmd) {
        warn!("backend command queue full or closed: {err}");
    }
}

impl GazetteerApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        send(&cmd_tx, BackendCommand::LoadCountries);
        send(&cmd_tx, BackendCommand::LoadCities);
        Self {
            cmd_tx,
            ui_rx,
            // The app opens on the city view.
            view: View::Cities,
            directory: Directory::default(),
            form: CityForm::default(),
            edit: EditSlot::default(),
            pending_delete: None,
            status: None,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error,
        });
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::CountriesLoaded(countries) => {
                    self.directory.replace_countries(countries);
                }
                UiEvent::CitiesLoaded(cities) => {
                    self.directory.replace_cities(cities);
                }
                UiEvent::SubmitFinished {
                    created_country,
                    created,
                    failed,
                } => {
                    self.form.reset();
                    let is_error = !failed.is_empty();
                    let text = submit_status(created_country.as_deref(), created, &failed);
                    self.set_status(text, is_error);
                }
                UiEvent::CityUpdated => {
                    // Only a confirmed update releases the draft; on failure
                    // the dialog stays open so the user can retry.
                    self.edit.cancel();
                    self.set_status("city updated", false);
                }
                UiEvent::CityDeleted => self.set_status("city deleted", false),
                UiEvent::Error(text) => self.set_status(text, true),
                UiEvent::Info(text) => self.set_status(text, false),
            }
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        let cmd_tx = self.cmd_tx.clone();
        egui::TopBottomPanel::top("view_switcher").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Gazetteer");
                ui.separator();
                ui.selectable_value(&mut self.view, View::Cities, "Cities");
                ui.selectable_value(&mut self.view, View::Countries, "Countries");
                ui.separator();
                if ui.button("Reload").clicked() {
                    send(&cmd_tx, BackendCommand::LoadCountries);
                    send(&cmd_tx, BackendCommand::LoadCities);
                }
            });
        });
    }

    fn status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            if let Some(status) = &self.status {
                if status.is_error {
                    ui.colored_label(Color32::LIGHT_RED, &status.text);
                } else {
                    ui.label(&status.text);
                }
            } else {
                ui.label("ready");
            }
        });
    }

    fn countries_view(&self, ui: &mut egui::Ui) {
        ui.heading("Countries");
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("countries_table")
                .striped(true)
                .num_columns(4)
                .show(ui, |ui| {
                    ui.strong("Name");
                    ui.strong("ISO2");
                    ui.strong("ISO3");
                    ui.strong("Cities");
                    ui.end_row();
                    for country in self.directory.countries() {
                        ui.label(&country.name);
                        ui.label(&country.iso2);
                        ui.label(&country.iso3);
                        ui.label(country.city_count.to_string());
                        ui.end_row();
                    }
                });
        });
    }

    fn cities_view(&mut self, ui: &mut egui::Ui) {
        ui.heading("Cities");
        let mut open_edit: Option<City> = None;
        let mut ask_delete: Option<City> = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("cities_table")
                .striped(true)
                .num_columns(5)
                .show(ui, |ui| {
                    ui.strong("Name");
                    ui.strong("Latitude");
                    ui.strong("Longitude");
                    ui.strong("Country");
                    ui.strong("");
                    ui.end_row();
                    for city in self.directory.cities() {
                        ui.label(&city.name);
                        ui.label(format!("{:.4}", city.lat));
                        ui.label(format!("{:.4}", city.lon));
                        ui.label(self.directory.country_name(city.country_id));
                        ui.horizontal(|ui| {
                            if ui.button("Edit").clicked() {
                                open_edit = Some(city.clone());
                            }
                            if ui.button("Delete").clicked() {
                                ask_delete = Some(city.clone());
                            }
                        });
                        ui.end_row();
                    }
                });
        });

        if let Some(city) = open_edit {
            self.open_edit(&city);
        }
        if let Some(city) = ask_delete {
            self.pending_delete = Some(city);
        }
    }

    fn open_edit(&mut self, city: &City) {
        // Opening an edit also repopulates the batch form from the entity.
        self.form.load_for_edit(city);
        // Opening a new target hands back any unsaved draft; it is
        // discarded here, which is the last-writer-wins contract.
        if let Some(discarded) = self.edit.open(city) {
            self.set_status(format!("discarded unsaved edit of '{}'", discarded.name), false);
        }
    }

    fn confirm_delete(&mut self) {
        // The single network call happens only past this gate.
        if let Some(city) = self.pending_delete.take() {
            send(&self.cmd_tx, BackendCommand::DeleteCity { id: city.id });
        }
    }

    fn dismiss_delete(&mut self) {
        self.pending_delete = None;
    }

    fn city_form_panel(&mut self, ctx: &egui::Context) {
        let cmd_tx = self.cmd_tx.clone();
        egui::SidePanel::right("city_form_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.heading("New cities");

                let selected = if self.form.creates_new_country() {
                    "Create new country...".to_string()
                } else {
                    self.directory.country_name(self.form.country_id).to_string()
                };
                egui::ComboBox::from_label("Country")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.form.country_id,
                            CountryId::NEW,
                            "Create new country...",
                        );
                        for country in self.directory.countries() {
                            ui.selectable_value(
                                &mut self.form.country_id,
                                country.id,
                                &country.name,
                            );
                        }
                    });

                if self.form.creates_new_country() {
                    ui.horizontal(|ui| {
                        ui.label("Name");
                        ui.text_edit_singleline(&mut self.form.name);
                    });
                    ui.horizontal(|ui| {
                        ui.label("ISO2");
                        ui.text_edit_singleline(&mut self.form.iso2);
                    });
                    ui.horizontal(|ui| {
                        ui.label("ISO3");
                        ui.text_edit_singleline(&mut self.form.iso3);
                    });
                }

                ui.separator();
                let mut remove_at: Option<usize> = None;
                for (position, row) in self.form.rows_mut().iter_mut().enumerate() {
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut row.name);
                        ui.add(egui::DragValue::new(&mut row.lat).speed(0.1).prefix("lat "));
                        ui.add(egui::DragValue::new(&mut row.lon).speed(0.1).prefix("lon "));
                        if ui.button("Remove").clicked() {
                            remove_at = Some(position);
                        }
                    });
                }
                if let Some(position) = remove_at {
                    self.form.remove_row(position);
                }

                ui.horizontal(|ui| {
                    if ui.button("Add city").clicked() {
                        self.form.add_row();
                    }
                    if ui.button("Save").clicked() {
                        send(
                            &cmd_tx,
                            BackendCommand::SubmitCityForm {
                                form: self.form.clone(),
                            },
                        );
                    }
                });
            });
    }

    fn edit_dialog(&mut self, ctx: &egui::Context) {
        let mut save = false;
        let mut cancel = false;
        if let Some(draft) = self.edit.current_mut() {
            egui::Window::new("Edit city")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Name");
                        ui.text_edit_singleline(&mut draft.name);
                    });
                    ui.horizontal(|ui| {
                        ui.label("Latitude");
                        ui.add(egui::DragValue::new(&mut draft.lat).speed(0.1));
                        ui.label("Longitude");
                        ui.add(egui::DragValue::new(&mut draft.lon).speed(0.1));
                    });
                    ui.horizontal(|ui| {
                        save = ui.button("Save").clicked();
                        cancel = ui.button("Cancel").clicked();
                    });
                });
        }
        if save {
            // Dispatch a snapshot and keep the draft; the slot is released
            // only when the worker confirms the update.
            if let Some(city) = self.edit.current() {
                send(
                    &self.cmd_tx,
                    BackendCommand::SaveCityEdit { city: city.clone() },
                );
            }
        } else if cancel {
            self.edit.cancel();
        }
    }

    fn delete_dialog(&mut self, ctx: &egui::Context) {
        let Some(city) = self.pending_delete.clone() else {
            return;
        };
        egui::Window::new("Delete city")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Are you sure you want to delete '{}'?", city.name));
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        self.confirm_delete();
                    }
                    if ui.button("Cancel").clicked() {
                        self.dismiss_delete();
                    }
                });
            });
    }
}

impl eframe::App for GazetteerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        self.top_bar(ctx);
        self.status_bar(ctx);
        if self.view == View::Cities {
            self.city_form_panel(ctx);
        }
        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Countries => self.countries_view(ui),
            View::Cities => self.cities_view(ui),
        });
        self.edit_dialog(ctx);
        self.delete_dialog(ctx);

        // Worker replies arrive without user input; poll for them.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{bounded, Receiver};
    use shared::domain::CityId;
    use shared::protocol::Country;

    fn app_with_channels() -> (GazetteerApp, Sender<UiEvent>, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded(16);
        let (ui_tx, ui_rx) = bounded(16);
        let app = GazetteerApp::new(cmd_tx, ui_rx);
        // Drop the initial load commands so tests only see their own.
        while cmd_rx.try_recv().is_ok() {}
        (app, ui_tx, cmd_rx)
    }

    fn sample_city(id: i64) -> City {
        City {
            id: CityId(id),
            name: "Capital".to_string(),
            lat: 1.0,
            lon: 2.0,
            country_id: CountryId(4),
            country: Some(Country {
                id: CountryId(4),
                name: "Wakanda".to_string(),
                iso2: "WK".to_string(),
                iso3: "WKD".to_string(),
                city_count: 1,
            }),
            cities: None,
        }
    }

    #[test]
    fn failed_update_keeps_the_edit_draft() {
        let (mut app, ui_tx, _cmd_rx) = app_with_channels();
        app.open_edit(&sample_city(10));

        ui_tx
            .try_send(UiEvent::Error("failed to update city: backend down".to_string()))
            .expect("queue event");
        app.drain_events();

        // The dialog stays bound to the draft so the user can retry.
        assert!(app.edit.is_editing(CityId(10)));
    }

    #[test]
    fn confirmed_update_releases_the_edit_draft() {
        let (mut app, ui_tx, _cmd_rx) = app_with_channels();
        app.open_edit(&sample_city(10));

        ui_tx.try_send(UiEvent::CityUpdated).expect("queue event");
        app.drain_events();

        assert!(app.edit.current().is_none());
    }

    #[test]
    fn opening_an_edit_repopulates_the_batch_form() {
        let (mut app, _ui_tx, _cmd_rx) = app_with_channels();
        app.open_edit(&sample_city(10));

        assert!(app.edit.is_editing(CityId(10)));
        assert_eq!(app.form.country_id, CountryId(4));
        assert_eq!(app.form.name, "Wakanda");
        assert_eq!(app.form.iso2, "WK");
    }

    #[test]
    fn dismissed_delete_sends_no_command() {
        let (mut app, _ui_tx, cmd_rx) = app_with_channels();
        app.pending_delete = Some(sample_city(10));

        app.dismiss_delete();
        assert!(app.pending_delete.is_none());
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn confirmed_delete_sends_exactly_one_delete_command() {
        let (mut app, _ui_tx, cmd_rx) = app_with_channels();
        app.pending_delete = Some(sample_city(10));

        app.confirm_delete();
        match cmd_rx.try_recv().expect("command") {
            BackendCommand::DeleteCity { id } => assert_eq!(id, CityId(10)),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cmd_rx.try_recv().is_err());
        assert!(app.pending_delete.is_none());
    }
}
