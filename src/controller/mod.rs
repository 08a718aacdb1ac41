//! Game library controller module
//!
//! The controller sits between the UI and the persisted library:
//! - **Mediates all mutation**: add, remove, toggle favorite, launch
//! - **Persists on every change**: the whole library is rewritten after each
//!   successful mutation
//! - **Exposes a list model**: row count, role-based field access and
//!   insert/remove/reset/data-changed notifications
//!
//! # Event Flow
//!
//! ```text
//! UI request → GameLibrary → LibraryStore (games.json)
//!                   ↓
//!             LibraryEvent → subscribers (GUI mirror, tests)
//! ```
//!
//! Everything runs synchronously on the calling thread.

pub mod events;
pub mod game_library;
pub mod roles;

pub use events::LibraryEvent;
pub use game_library::{GameLibrary, RECENTLY_ADDED_LIMIT};
pub use roles::{GameRole, RoleValue, row_from_ui};
