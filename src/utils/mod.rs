//! Utility modules
//!
//! Provides placeholder icon lookup, detached process launching and logging.

pub mod icon_extractor;
pub mod launcher;
pub mod logging;

pub use icon_extractor::{DEFAULT_ICON_PATH, extract_display_name_from_exe, extract_icon_path};
pub use launcher::{DetachedLauncher, Launcher, RecordingLauncher};
pub use logging::init_logging;
