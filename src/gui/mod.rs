//! GUI module
//!
//! Provides the Slint-based main window and keeps it in sync with the game library.

pub mod gui_controller;

pub use gui_controller::GuiController;
