#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for `GameBird` unit tests.
//!
//! Only compiled during testing (`#[cfg(test)]`).

use crate::controller::{GameLibrary, LibraryEvent};
use crate::library::LibraryStore;
use crate::utils::RecordingLauncher;
use std::path::PathBuf;
use std::sync::mpsc;
use tempfile::TempDir;

/// Create a temporary test directory that cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Empty library stored in `temp_dir/games.json`, with an event channel and
/// a handle on its recording launcher.
pub fn library_in(
    temp_dir: &TempDir,
) -> (GameLibrary, mpsc::Receiver<LibraryEvent>, RecordingLauncher) {
    let launcher = RecordingLauncher::new();
    let mut library = GameLibrary::new(
        LibraryStore::new(temp_dir.path().join("games.json")),
        Box::new(launcher.clone()),
    );
    let events = library.subscribe_channel();
    (library, events, launcher)
}

/// Collect every queued event.
pub fn drain(events: &mpsc::Receiver<LibraryEvent>) -> Vec<LibraryEvent> {
    events.try_iter().collect()
}

/// Messages of the `ErrorOccurred` events in `events`.
pub fn errors(events: &[LibraryEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            LibraryEvent::ErrorOccurred(message) => Some(message.clone()),
            _ => None,
        })
        .collect()
}

/// Create an empty file standing in for a game executable.
pub fn touch_executable(temp_dir: &TempDir, name: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    std::fs::write(&path, b"").unwrap();
    path
}
