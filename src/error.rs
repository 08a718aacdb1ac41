//! Error types for `GameBird`
//!
//! Every failure in the game library is non-fatal: it is reported to the UI as
//! a single descriptive message and leaves the library usable. The `Display`
//! text of each variant is exactly that message.
//!
//! Error variants use `#[source]` to preserve error chains for logging.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `GameBird`
#[derive(Debug, Error)]
pub enum GameBirdError {
    /// A game with the same executable path is already in the library
    #[error("Game already exists in library")]
    DuplicateGame {
        /// The executable path that collided
        executable_path: String,
    },

    /// The executable of a game no longer exists on disk
    #[error("Executable not found: {0}")]
    ExecutableNotFound(String),

    /// The operating system refused to start the executable
    #[error("Failed to launch: {title}")]
    LaunchFailed {
        /// Title of the game that failed to start
        title: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The library file could not be written
    #[error("Failed to save library: {0}")]
    LibraryWriteFailed(#[source] std::io::Error),

    /// The library file exists but could not be read
    #[error("Failed to load library: {0}")]
    LibraryReadFailed(#[source] std::io::Error),

    /// The library file is not valid JSON
    #[error("Invalid library file format")]
    MalformedLibrary(#[source] serde_json::Error),

    /// Configuration or environment error (data directory, logging setup)
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for `GameBird` operations
pub type Result<T> = std::result::Result<T, GameBirdError>;

/// Convert an error to a user-friendly message
///
/// Returns a longer message with troubleshooting hints, suitable for an
/// error dialog rather than the status line.
pub fn get_user_friendly_error(error: &GameBirdError) -> String {
    match error {
        GameBirdError::DuplicateGame { executable_path } => {
            format!(
                "This game is already in your library:\n\n{executable_path}\n\n\
                 Each executable can only be added once."
            )
        }
        GameBirdError::ExecutableNotFound(path) => {
            format!(
                "The game executable could not be found:\n\n{path}\n\n\
                 The game may have been moved or uninstalled.\n\
                 Remove it from your library and add it again."
            )
        }
        GameBirdError::LaunchFailed { title, source } => {
            format!(
                "Failed to launch {title}:\n\n{source}\n\n\
                 Please check that the file is a valid executable\n\
                 and that you have permission to run it."
            )
        }
        GameBirdError::LibraryWriteFailed(e) => {
            format!(
                "Failed to save your game library:\n\n{e}\n\n\
                 Your changes may not persist.\n\
                 Please check file permissions and disk space."
            )
        }
        GameBirdError::LibraryReadFailed(e) => {
            format!(
                "Failed to read your game library:\n\n{e}\n\n\
                 Please check file permissions on the library file."
            )
        }
        GameBirdError::MalformedLibrary(e) => {
            format!(
                "Your game library file is corrupted:\n\n{e}\n\n\
                 The library will start empty."
            )
        }
        GameBirdError::ConfigError(e) => {
            format!(
                "Failed to prepare the application data directory:\n\n{e}\n\n\
                 Set GAMEBIRD_DATA_DIR to a writable directory and try again."
            )
        }
        GameBirdError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
    }
}
