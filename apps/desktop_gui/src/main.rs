use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use eframe::egui;
use upload_core::load_settings;

use crate::{
    backend_bridge::runtime::build_timer_runtime,
    ui::{StartupConfig, UploadFormApp},
};

#[derive(Debug, Parser)]
#[command(name = "upload_desktop", about = "Video upload form for crowd density analysis")]
struct Args {
    /// Page location the form is opened at; paths containing `/process/`
    /// show the processing banner.
    #[arg(long, default_value = "/")]
    location: String,
    /// TOML settings file; defaults to `upload_ui.toml` when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref());
    let runtime = match build_timer_runtime() {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!("failed to build timer runtime: {err}");
            std::process::exit(1);
        }
    };
    let startup = StartupConfig {
        location: args.location,
        settings,
        ..StartupConfig::default()
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Crowd Density Detection")
            .with_inner_size([720.0, 560.0])
            .with_min_inner_size([480.0, 420.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Crowd Density Detection",
        options,
        Box::new(|cc| Ok(Box::new(UploadFormApp::new(cc, runtime, startup)))),
    )
}
