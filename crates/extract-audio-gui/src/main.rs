// Prevents an extra console window on Windows in release builds.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod worker;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("extract_audio_core=info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([720.0, 540.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Audio Extractor",
        options,
        Box::new(|_cc| Ok(Box::new(app::ExtractorApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start GUI: {e}"))
}
