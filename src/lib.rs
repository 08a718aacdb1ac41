//! `GameBird` - a small desktop launcher for locally installed games
//!
//! Keeps an ordered list of game executables (title, path, icon, favorite
//! flag) in `games.json` under the application data directory. The
//! `GameLibrary` controller mediates every change, rewrites the file after
//! each one and exposes the list to the UI as a role-based list model.

// Module declarations
pub mod config;
pub mod controller;
pub mod error;
pub mod library;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use controller::{GameLibrary, LibraryEvent};
pub use error::{GameBirdError, Result};
pub use library::Game;
