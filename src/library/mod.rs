//! Game records and their on-disk representation
//!
//! - `Game`: one library entry with per-field change notifications
//! - `LibraryStore`: reads and atomically writes `games.json`

pub mod game;
pub mod store;

pub use game::{Game, GameField};
pub use store::{LIBRARY_FORMAT_VERSION, LibraryStore, StoreRead, parse_library};
