//! Library file persistence
//!
//! The library is stored as a single JSON document:
//!
//! ```json
//! { "games": [ { "title": "...", "executablePath": "...", "iconPath": "...", "isFavorite": false } ],
//!   "version": "1.0" }
//! ```
//!
//! Writes are atomic: the document is written to a temporary file in the same
//! directory and then renamed over the library file, so a crash mid-write never
//! leaves a truncated library behind. An existing file keeps its permissions;
//! a newly created one is readable by its owner only.

use crate::error::{GameBirdError, Result};
use crate::library::game::Game;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Format version written to every library file
pub const LIBRARY_FORMAT_VERSION: &str = "1.0";

/// Top-level document as written to disk
#[derive(Debug, Serialize)]
struct LibraryDocument<'a> {
    games: Vec<Value>,
    version: &'a str,
}

/// Outcome of reading the library file
#[derive(Debug, PartialEq, Eq)]
pub enum StoreRead {
    /// No library file yet (first run)
    Missing,
    /// Games in file order
    Loaded(Vec<Game>),
}

/// Reads and writes the library file at a fixed path
#[derive(Debug, Clone)]
pub struct LibraryStore {
    path: PathBuf,
}

impl LibraryStore {
    /// Store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the library file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the library file.
    ///
    /// A missing file is not an error. An unreadable file yields
    /// [`GameBirdError::LibraryReadFailed`], invalid JSON yields
    /// [`GameBirdError::MalformedLibrary`].
    pub fn read(&self) -> Result<StoreRead> {
        if !self.path.exists() {
            info!(
                "Library file not found at {}, starting empty",
                self.path.display()
            );
            return Ok(StoreRead::Missing);
        }

        let bytes = std::fs::read(&self.path).map_err(GameBirdError::LibraryReadFailed)?;
        let games = parse_library(&bytes)?;
        debug!(
            "Read {} game(s) from {}",
            games.len(),
            self.path.display()
        );
        Ok(StoreRead::Loaded(games))
    }

    /// Overwrite the library file with `games`, in order
    pub fn write(&self, games: &[Game]) -> Result<()> {
        let document = LibraryDocument {
            games: games.iter().map(Game::to_json).collect(),
            version: LIBRARY_FORMAT_VERSION,
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| GameBirdError::LibraryWriteFailed(e.into()))?;

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(GameBirdError::LibraryWriteFailed)?;

        // Atomic write: temp file in the same directory, then rename
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(GameBirdError::LibraryWriteFailed)?;
        temp.write_all(json.as_bytes())
            .map_err(GameBirdError::LibraryWriteFailed)?;

        if let Ok(metadata) = std::fs::metadata(&self.path)
            && metadata.is_file()
        {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(GameBirdError::LibraryWriteFailed)?;
        }
        temp.persist(&self.path)
            .map_err(|e| GameBirdError::LibraryWriteFailed(e.error))?;

        debug!("Wrote {} game(s) to {}", games.len(), self.path.display());
        Ok(())
    }
}

/// Parse library file contents into games, in file order.
///
/// Only syntactically invalid JSON is an error. A root that is not an object,
/// or a missing or non-array `games` key, yields an empty list; entries that
/// are not objects become default records.
pub fn parse_library(bytes: &[u8]) -> Result<Vec<Game>> {
    let document: Value = serde_json::from_slice(bytes).map_err(GameBirdError::MalformedLibrary)?;

    let games = document
        .get("games")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(Game::from_json).collect())
        .unwrap_or_default();

    Ok(games)
}
