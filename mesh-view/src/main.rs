//! Application entry point for the moving-mesh viewer.
//!
//! Usage: `mesh-view [settings.json]`
//!
//! The optional JSON file holds a partial [`Settings`] object; missing
//! fields keep their defaults. Logging goes through `tracing` and is
//! filtered with `RUST_LOG` (default `info`).

mod settings;
mod viewer;

use anyhow::Result;
use mesh_core::config::Settings;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => settings::load_settings(&path)?,
        None => Settings::default(),
    };
    info!(
        fps = settings.fps,
        vertices = settings.vertex_count,
        "starting moving mesh"
    );

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Moving Mesh",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(settings)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited with an error: {e}"))
}
