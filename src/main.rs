//! `GameBird` - a small desktop launcher for locally installed games
//!
//! Loads the game library from the application data directory and shows it
//! in a Slint window.

// Set Windows subsystem to hide console window
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![expect(
    missing_docs,
    reason = "Slint-generated code from include_modules! lacks doc comments"
)]
#![allow(clippy::unwrap_used)] // Slint-generated code from include_modules! uses .unwrap() extensively

// GUI module is only in the binary, not the library
mod gui;

use anyhow::{Context, Result};
use gamebird::{
    config::AppPaths,
    controller::GameLibrary,
    error::{GameBirdError, get_user_friendly_error},
    utils,
};
use gui::GuiController;
use tracing::{error, info};

// Include Slint-generated code
slint::include_modules!();

fn main() -> Result<()> {
    let paths = AppPaths::from_env();

    if let Err(e) = paths.ensure_data_dir() {
        show_error_and_exit(&get_user_friendly_error(&e));
        return Err(e).context("Failed to create application data directory");
    }

    utils::init_logging(&paths).context("Failed to initialize logging system")?;

    info!("GameBird v{} starting...", env!("CARGO_PKG_VERSION"));
    info!("Library file: {}", paths.library_file().display());

    let library = GameLibrary::from_paths(&paths);

    let gui_controller = match GuiController::new(library, &paths) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Failed to initialize GUI: {:#}", e);

            let message = if let Some(gamebird_error) = e.downcast_ref::<GameBirdError>() {
                get_user_friendly_error(gamebird_error)
            } else {
                format!("{e:#}")
            };
            show_error_and_exit(&format!("Failed to start GameBird:\n\n{message}"));
            return Err(e);
        }
    };

    info!("Starting GUI event loop");
    gui_controller
        .run()
        .context("GUI event loop terminated with error")?;

    info!("GameBird shutting down");

    Ok(())
}

/// Shows an error dialog and exits the application.
fn show_error_and_exit(message: &str) {
    use rfd::MessageDialog;

    MessageDialog::new()
        .set_title("GameBird - Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .set_level(rfd::MessageLevel::Error)
        .show();

    std::process::exit(1);
}
