//! Icon and display-name lookup for executables
//!
//! Real icon extraction is not implemented yet: every game gets the bundled
//! placeholder icon. Display names fall back to the executable's file stem.

use std::path::Path;
use tracing::debug;

/// Placeholder icon assigned to every newly added game
pub const DEFAULT_ICON_PATH: &str = "icons/default-game.png";

/// Icon path for the given executable.
///
/// TODO: extract the embedded icon (PE resources on Windows, .desktop/icon
/// themes on Linux) and cache it next to the library file.
pub fn extract_icon_path(executable: &Path) -> String {
    debug!(
        "Icon extraction not implemented, using placeholder for {}",
        executable.display()
    );
    DEFAULT_ICON_PATH.to_string()
}

/// Suggested title for an executable picked in the file dialog
pub fn extract_display_name_from_exe(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("Unknown Game")
        .to_string()
}
