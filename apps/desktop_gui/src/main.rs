use std::path::PathBuf;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use backend_bridge::runtime::spawn_backend_thread;
use controller::events::UiEvent;
use ui::VitaCareApp;

#[derive(Debug, Parser)]
#[command(name = "vitacare", about = "VitaCare orientation desktop app")]
struct Args {
    /// Path to a settings file (defaults to ./vitacare.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the sqlite database url.
    #[arg(long)]
    database_url: Option<String>,

    /// Run on fallbacks only, ignoring any configured API key.
    #[arg(long)]
    offline: bool,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let mut settings = config::load_settings(args.config.as_ref());
    if let Some(database_url) = args.database_url {
        settings.database_url = database_url;
    }
    if args.offline {
        settings.gemini_api_key = None;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    spawn_backend_thread(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("VitaCare Global")
            .with_inner_size([480.0, 860.0])
            .with_min_inner_size([400.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "VitaCare Global",
        options,
        Box::new(|_cc| Ok(Box::new(VitaCareApp::new(cmd_tx, ui_rx)))),
    )
}
