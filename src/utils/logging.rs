//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to `<data dir>/logs/app.log`
//! and rotation on application startup keeping 9 historical files.

use crate::config::AppPaths;
use crate::error::{GameBirdError, Result, StringError};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep (app.log.1 through app.log.9)
const MAX_LOG_FILES: u8 = 9;

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via `RUST_LOG`.
/// Rotates existing logs on startup so each session gets its own file.
pub fn init_logging(paths: &AppPaths) -> Result<()> {
    let log_dir = paths.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join("app.log");
    rotate_logs_on_startup(&log_path)?;

    // RollingFileAppender has no startup-based rotation, so it never rotates
    // on its own and rotate_logs_on_startup does the work instead
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("app")
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| GameBirdError::ConfigError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| GameBirdError::ConfigError(Box::new(e)))?;

    tracing::info!("GameBird v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Rotate log files on application startup
///
/// - app.log.9 is deleted (oldest log)
/// - app.log.8 -> app.log.9, ..., app.log.1 -> app.log.2
/// - app.log -> app.log.1
///
/// The logger then creates a fresh app.log.
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| GameBirdError::ConfigError(StringError::new("Invalid log path")))?;

    let log_name = log_path
        .file_name()
        .ok_or_else(|| GameBirdError::ConfigError(StringError::new("Invalid log filename")))?
        .to_string_lossy();

    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        let next_log = log_dir.join(format!("{log_name}.{}", i + 1));

        if current_log.exists() {
            std::fs::rename(&current_log, &next_log)?;
        }
    }

    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1")))?;

    Ok(())
}
