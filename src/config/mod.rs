//! Configuration module
//!
//! Resolves where the application keeps its data. The only persisted state
//! is the game library itself (`games.json` in the data directory); the log
//! level is taken from `RUST_LOG`.

pub mod paths;

pub use paths::{AppPaths, app_version_label};
