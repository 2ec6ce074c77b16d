mod backend_bridge;
mod controller;
mod media;
mod ui;

use clap::Parser;
use client_core::{config::normalize_server_url, load_settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime::spawn_backend_thread};
use crate::controller::events::UiEvent;
use crate::ui::GalleryApp;

#[derive(Parser, Debug)]
#[command(name = "gallery-gui", about = "Desktop prompt gallery")]
struct Args {
    /// Overrides `server_url` from gallery.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url.as_deref() {
        settings.server_url = normalize_server_url(server_url);
    }
    let thumbnail_px = settings.thumbnail_px;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    spawn_backend_thread(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Prompt Gallery")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Prompt Gallery",
        options,
        Box::new(move |_cc| Ok(Box::new(GalleryApp::new(cmd_tx, ui_rx, thumbnail_px)))),
    )
}
