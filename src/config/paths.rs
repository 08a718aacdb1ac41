//! Application data locations
//!
//! The library file and the logs live in a per-application data directory:
//! `GAMEBIRD_DATA_DIR` when set, otherwise the platform data directory
//! (`~/.local/share/GameBird`, `~/Library/Application Support/GameBird`,
//! `%APPDATA%\GameBird`).

use crate::error::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application name, used as the data directory name
pub const APP_NAME: &str = "GameBird";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "GAMEBIRD_DATA_DIR";

/// File name of the persisted game library
pub const LIBRARY_FILE_NAME: &str = "games.json";

/// Resolved filesystem locations for one application instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    /// Use an explicit data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the data directory from the environment and platform defaults
    pub fn from_env() -> Self {
        let data_dir = resolve_data_dir(std::env::var_os(DATA_DIR_ENV), dirs::data_dir());
        debug!("Resolved data directory: {}", data_dir.display());
        Self { data_dir }
    }

    /// Directory holding the library file and logs
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path to `games.json`
    pub fn library_file(&self) -> PathBuf {
        self.data_dir.join(LIBRARY_FILE_NAME)
    }

    /// Directory for log files
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    /// Ensure the data directory exists, creating it if needed
    pub fn ensure_data_dir(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(&self.data_dir)
    }
}

/// Pick the data directory: a non-empty override wins, then the platform
/// data directory, then the working directory.
fn resolve_data_dir(override_dir: Option<OsString>, platform_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }

    platform_dir
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Version string shown in the window footer, e.g. `0.1.0 (MVP)`
pub fn app_version_label() -> String {
    format!("{} (MVP)", env!("CARGO_PKG_VERSION"))
}
