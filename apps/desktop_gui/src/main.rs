mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::config::{load_settings, normalize_api_url};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::StudentsApp;

#[derive(Parser, Debug)]
#[command(name = "alunos-gui", about = "Student records window")]
struct StartupArgs {
    /// Collection endpoint; overrides alunos.toml and ALUNOS_API_URL.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    let args = StartupArgs::parse();
    let mut settings = load_settings();
    if let Some(api_url) = args.api_url.as_deref() {
        settings.api_url = normalize_api_url(api_url);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(settings.api_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Students")
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Students",
        options,
        Box::new(|_cc| Ok(Box::new(StudentsApp::new(cmd_tx, ui_rx)))),
    )
}
