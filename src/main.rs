#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::too_many_lines)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::epaint::Vec2;
use eframe::NativeOptions;
use tracing_subscriber::EnvFilter;

mod ui;

fn main() -> eframe::Result<()> {
    let native_options = NativeOptions {
        initial_window_size: Some(Vec2 { x: 1280., y: 800. }),
        ..NativeOptions::default()
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    eframe::run_native(
        "Random Samples",
        native_options,
        Box::new(|cc| Box::new(ui::RandomSamples::new(cc))),
    )?;
    Ok(())
}
