//! Backend worker: a dedicated thread owning a tokio runtime and the REST
//! client. The UI talks to it exclusively through the command/event channels;
//! in-flight requests are never cancelled when dialogs close.

use client_core::{submit_city_form, GazetteerApi, RestClient};
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(format!(
                    "backend worker startup failure: {err}"
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match RestClient::new(&server_url) {
                Ok(client) => client,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(format!("{err:#}")));
                    error!("backend worker refused to start: {err:#}");
                    return;
                }
            };
            info!(server_url = server_url.as_str(), "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info("connected to backend worker".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadCountries => load_countries(&client, &ui_tx).await,
                    BackendCommand::LoadCities => load_cities(&client, &ui_tx).await,
                    BackendCommand::SubmitCityForm { form } => {
                        match submit_city_form(&client, &form).await {
                            Ok(report) => {
                                let _ = ui_tx.try_send(UiEvent::SubmitFinished {
                                    created_country: report.country.map(|country| country.name),
                                    created: report.created.len(),
                                    failed: report
                                        .failed
                                        .iter()
                                        .map(|failure| failure.name.clone())
                                        .collect(),
                                });
                                // The join above completed, so this reload
                                // observes every dispatched row's outcome.
                                load_countries(&client, &ui_tx).await;
                                load_cities(&client, &ui_tx).await;
                            }
                            Err(err) => {
                                // No rows were attempted; the form stays open
                                // so the user can retry.
                                let _ = ui_tx.try_send(UiEvent::Error(err.to_string()));
                            }
                        }
                    }
                    BackendCommand::SaveCityEdit { city } => {
                        match client.update_city(city.id, &city).await {
                            Ok(_) => {
                                let _ = ui_tx.try_send(UiEvent::CityUpdated);
                                load_cities(&client, &ui_tx).await;
                            }
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::Error(format!(
                                    "failed to update city: {err:#}"
                                )));
                            }
                        }
                    }
                    BackendCommand::DeleteCity { id } => match client.delete_city(id).await {
                        Ok(()) => {
                            let _ = ui_tx.try_send(UiEvent::CityDeleted);
                            load_cities(&client, &ui_tx).await;
                        }
                        Err(err) => {
                            // The row stays visible; the user may retry.
                            let _ = ui_tx
                                .try_send(UiEvent::Error(format!("failed to delete city: {err:#}")));
                        }
                    },
                }
            }
        });
    });
}

async fn load_countries(client: &RestClient, ui_tx: &Sender<UiEvent>) {
    match client.list_countries().await {
        Ok(countries) => {
            let _ = ui_tx.try_send(UiEvent::CountriesLoaded(countries));
        }
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(format!("failed to load countries: {err:#}")));
        }
    }
}

async fn load_cities(client: &RestClient, ui_tx: &Sender<UiEvent>) {
    match client.list_cities().await {
        Ok(cities) => {
            let _ = ui_tx.try_send(UiEvent::CitiesLoaded(cities));
        }
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(format!("failed to load cities: {err:#}")));
        }
    }
}
