//! RNA Mod Manager - enable, disable and delete game mods
//!
//! Mods are toggled by renaming their files with a `_Disabled` marker.

mod app;
mod core;
mod ui;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use app::ModManagerApp;
use crate::core::config::AppConfig;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting RNA Mod Manager...");

    let config_path = AppConfig::default_path();
    let mut config = AppConfig::load_from(&config_path).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable config: {:#}", e);
        AppConfig::default()
    });

    let Some(mod_folder) = resolve_mod_folder(&mut config, &config_path) else {
        tracing::error!("No mods folder selected, exiting");
        rfd::MessageDialog::new()
            .set_title("Error")
            .set_level(rfd::MessageLevel::Error)
            .set_description("You must select a mods folder.")
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
        return ExitCode::FAILURE;
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 480.0])
            .with_min_inner_size([480.0, 320.0])
            .with_title("Game Mod Manager"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Game Mod Manager",
        native_options,
        Box::new(|cc| Ok(Box::new(ModManagerApp::new(cc, config, config_path, mod_folder)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Window failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Use the configured folder, or ask for one and remember it
fn resolve_mod_folder(config: &mut AppConfig, config_path: &Path) -> Option<PathBuf> {
    if let Some(folder) = config.valid_mod_folder() {
        return Some(folder.to_path_buf());
    }

    if let Some(ref stale) = config.mod_folder {
        tracing::warn!("Configured mods folder is missing: {}", stale.display());
    }

    let folder = rfd::FileDialog::new()
        .set_title("Select Mods Folder")
        .pick_folder()?;

    config.set_mod_folder(folder.clone());
    if let Err(e) = config.save_to(config_path) {
        tracing::error!("Failed to save config: {:#}", e);
    }
    Some(folder)
}
