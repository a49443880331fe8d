mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

#[derive(Parser, Debug)]
#[command(name = "gazetteer", about = "Desktop client for the gazetteer REST backend")]
struct Args {
    /// Base URL of the backend serving /countries and /cities.
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(args.server_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Gazetteer")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([800.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Gazetteer",
        options,
        Box::new(move |_cc| Ok(Box::new(ui::app::GazetteerApp::new(cmd_tx, ui_rx)))),
    )
}
