//! Notifications emitted by the game library
//!
//! Row changes are bracketed: `RowsAboutToBe*` / `ModelAboutToBeReset` is
//! emitted before the collection changes and the matching completion event
//! right after, so a mirroring view never observes a half-applied change.

use crate::controller::roles::GameRole;

/// Event delivered to library subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryEvent {
    /// Rows `first..=last` are about to be inserted
    RowsAboutToBeInserted {
        /// First inserted row
        first: usize,
        /// Last inserted row
        last: usize,
    },
    /// Rows `first..=last` were inserted
    RowsInserted {
        /// First inserted row
        first: usize,
        /// Last inserted row
        last: usize,
    },
    /// Rows `first..=last` are about to be removed
    RowsAboutToBeRemoved {
        /// First removed row
        first: usize,
        /// Last removed row
        last: usize,
    },
    /// Rows `first..=last` were removed
    RowsRemoved {
        /// First removed row
        first: usize,
        /// Last removed row
        last: usize,
    },
    /// The whole collection is about to be replaced
    ModelAboutToBeReset,
    /// The whole collection was replaced
    ModelReset,
    /// Fields of a single row changed
    DataChanged {
        /// Changed row
        row: usize,
        /// Roles whose values changed
        roles: Vec<GameRole>,
    },
    /// The number of games changed
    CountChanged,
    /// A game was added (title)
    GameAdded(String),
    /// A game was started (title)
    GameLaunched(String),
    /// An operation failed; the message is meant for the user
    ErrorOccurred(String),
}
