//! Dataset Insights GUI application entry point.
//!
//! Usage: `dsinsights-gui [DATA_ROOT]`

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod message;
mod pipeline;
mod state;
mod ui;
mod util;

use std::path::PathBuf;

use app::InsightsApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let data_root = std::env::args_os().nth(1).map(PathBuf::from);
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Dataset Insights",
        opts,
        Box::new(move |cc| {
            ui::theme::configure_style(&cc.egui_ctx);
            Ok(Box::new(InsightsApp::new(data_root)))
        }),
    )
}
