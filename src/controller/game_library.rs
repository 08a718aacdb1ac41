//! Game library controller
//!
//! Owns the ordered list of games, mediates every mutation, rewrites the
//! library file after each successful change and notifies subscribers.

use crate::config::AppPaths;
use crate::controller::events::LibraryEvent;
use crate::controller::roles::GameRole;
use crate::error::{GameBirdError, Result};
use crate::library::{Game, LibraryStore, StoreRead};
use crate::utils::{DetachedLauncher, Launcher, extract_icon_path};
use std::path::Path;
use std::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Number of trailing games reported as recently added
pub const RECENTLY_ADDED_LIMIT: usize = 10;

type Subscriber = Box<dyn FnMut(&LibraryEvent)>;

/// Ordered game collection with persistence and change notifications
pub struct GameLibrary {
    games: Vec<Game>,
    store: LibraryStore,
    launcher: Box<dyn Launcher>,
    subscribers: Vec<Subscriber>,
    channels: Vec<mpsc::Sender<LibraryEvent>>,
}

impl GameLibrary {
    /// Create an empty library backed by `store`.
    ///
    /// Nothing is read yet: subscribe first, then call
    /// [`GameLibrary::load_library`] so load errors reach the UI.
    pub fn new(store: LibraryStore, launcher: Box<dyn Launcher>) -> Self {
        Self {
            games: Vec::new(),
            store,
            launcher,
            subscribers: Vec::new(),
            channels: Vec::new(),
        }
    }

    /// Library stored in `paths.library_file()` that launches real processes
    pub fn from_paths(paths: &AppPaths) -> Self {
        Self::new(
            LibraryStore::new(paths.library_file()),
            Box::new(DetachedLauncher),
        )
    }

    /// Register a callback for every library event
    pub fn subscribe(&mut self, subscriber: impl FnMut(&LibraryEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Subscribe through a channel; events queue until the receiver drains them.
    ///
    /// The channel is unsubscribed on the first event after its receiver is
    /// dropped.
    pub fn subscribe_channel(&mut self) -> mpsc::Receiver<LibraryEvent> {
        let (tx, rx) = mpsc::channel();
        self.channels.push(tx);
        rx
    }

    /// Number of games
    pub fn count(&self) -> usize {
        self.games.len()
    }

    /// Whether the library has no games
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Game at `index`
    pub fn game(&self, index: usize) -> Option<&Game> {
        self.games.get(index)
    }

    /// All games in display order
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Path of the library file
    pub fn library_file(&self) -> &Path {
        self.store.path()
    }

    /// Add a game and persist the library. Returns the new row.
    ///
    /// Fails with [`GameBirdError::DuplicateGame`] when a game with the same
    /// executable path exists; nothing changes in that case.
    pub fn add_game(&mut self, title: &str, executable_path: &str) -> Result<usize> {
        if self
            .games
            .iter()
            .any(|game| game.executable_path() == executable_path)
        {
            warn!("Refusing duplicate game: {}", executable_path);
            return Err(self.report(GameBirdError::DuplicateGame {
                executable_path: executable_path.to_string(),
            }));
        }

        info!("Adding game: {} ({})", title, executable_path);

        let row = self.games.len();
        let mut game = Game::new(title, executable_path);
        game.set_icon_path(extract_icon_path(Path::new(executable_path)));

        self.emit(&LibraryEvent::RowsAboutToBeInserted {
            first: row,
            last: row,
        });
        self.games.push(game);
        self.emit(&LibraryEvent::RowsInserted {
            first: row,
            last: row,
        });

        self.emit(&LibraryEvent::CountChanged);
        self.emit(&LibraryEvent::GameAdded(title.to_string()));

        self.persist();
        Ok(row)
    }

    /// Remove the game at `index` and persist. Out-of-range indices are ignored.
    ///
    /// Returns `true` if a game was removed.
    pub fn remove_game(&mut self, index: usize) -> bool {
        if index >= self.games.len() {
            debug!("remove_game: index {} out of range", index);
            return false;
        }

        self.emit(&LibraryEvent::RowsAboutToBeRemoved {
            first: index,
            last: index,
        });
        let game = self.games.remove(index);
        self.emit(&LibraryEvent::RowsRemoved {
            first: index,
            last: index,
        });

        info!("Removed game: {} ({})", game.title(), game.executable_path());

        self.emit(&LibraryEvent::CountChanged);
        self.persist();
        true
    }

    /// Start the game at `index` as a detached process.
    ///
    /// Out-of-range indices are ignored. Does not change the library.
    pub fn launch_game(&mut self, index: usize) -> Result<()> {
        let Some(game) = self.games.get(index) else {
            debug!("launch_game: index {} out of range", index);
            return Ok(());
        };

        let title = game.title().to_string();
        let executable = game.executable_path().to_string();

        if !Path::new(&executable).exists() {
            warn!("Executable not found: {}", executable);
            return Err(self.report(GameBirdError::ExecutableNotFound(executable)));
        }

        match self.launcher.launch_detached(Path::new(&executable)) {
            Ok(()) => {
                info!("Launched {}", title);
                self.emit(&LibraryEvent::GameLaunched(title));
                Ok(())
            }
            Err(source) => {
                error!("Failed to launch {} ({}): {}", title, executable, source);
                Err(self.report(GameBirdError::LaunchFailed { title, source }))
            }
        }
    }

    /// Flip the favorite flag of the game at `index` and persist.
    ///
    /// Returns the new flag, or `None` for an out-of-range index.
    pub fn toggle_favorite(&mut self, index: usize) -> Option<bool> {
        let game = self.games.get_mut(index)?;

        let old_favorite = game.is_favorite();
        game.set_is_favorite(!old_favorite);
        debug!(
            "Toggling favorite for {} from {} to {}",
            game.title(),
            old_favorite,
            !old_favorite
        );

        self.emit(&LibraryEvent::DataChanged {
            row: index,
            roles: vec![GameRole::IsFavorite],
        });

        self.persist();
        Some(!old_favorite)
    }

    /// Rows of favorite games, in display order
    pub fn favorite_indices(&self) -> Vec<usize> {
        self.games
            .iter()
            .enumerate()
            .filter(|(_, game)| game.is_favorite())
            .map(|(index, _)| index)
            .collect()
    }

    /// The last [`RECENTLY_ADDED_LIMIT`] rows, in display order.
    ///
    /// No timestamps are stored, so insertion order stands in for recency.
    pub fn recently_added_indices(&self) -> Vec<usize> {
        let start = self.games.len().saturating_sub(RECENTLY_ADDED_LIMIT);
        (start..self.games.len()).collect()
    }

    /// Write the whole library to disk
    pub fn save_library(&mut self) -> Result<()> {
        match self.store.write(&self.games) {
            Ok(()) => {
                debug!("Library saved ({} games)", self.games.len());
                Ok(())
            }
            Err(e) => {
                error!("{}", e);
                Err(self.report(e))
            }
        }
    }

    /// Replace the in-memory library with the contents of the library file.
    ///
    /// A missing file leaves the library as is and is not an error. Read or
    /// parse failures are reported and leave the library unchanged. Returns
    /// the number of games after loading.
    pub fn load_library(&mut self) -> Result<usize> {
        let games = match self.store.read() {
            Ok(StoreRead::Missing) => return Ok(self.games.len()),
            Ok(StoreRead::Loaded(games)) => games,
            Err(e) => {
                error!("{}", e);
                return Err(self.report(e));
            }
        };

        self.emit(&LibraryEvent::ModelAboutToBeReset);
        self.games = games;
        self.emit(&LibraryEvent::ModelReset);
        self.emit(&LibraryEvent::CountChanged);

        info!("Library loaded with {} games", self.games.len());
        Ok(self.games.len())
    }

    /// Save after a successful mutation. The in-memory change stands even if
    /// the write fails; the failure has already been reported.
    fn persist(&mut self) {
        if self.save_library().is_err() {
            warn!(
                "Continuing with in-memory library. Changes will be lost on application restart."
            );
        }
    }

    /// Emit an `ErrorOccurred` for `error` and hand it back
    fn report(&mut self, error: GameBirdError) -> GameBirdError {
        self.emit(&LibraryEvent::ErrorOccurred(error.to_string()));
        error
    }

    fn emit(&mut self, event: &LibraryEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }

        let before = self.channels.len();
        self.channels.retain(|tx| tx.send(event.clone()).is_ok());
        if self.channels.len() < before {
            debug!(
                "Dropped {} library event channel(s) without a receiver",
                before - self.channels.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_dir, drain, errors, library_in, touch_executable};
    use crate::utils::{DEFAULT_ICON_PATH, RecordingLauncher};

    #[test]
    fn test_add_game_appends_with_defaults() {
        let temp_dir = create_test_dir();
        let (mut library, _events, _launcher) = library_in(&temp_dir);

        let row = library.add_game("Chess", "/bin/chess").unwrap();

        assert_eq!(row, 0);
        assert_eq!(library.count(), 1);
        let game = library.game(0).unwrap();
        assert_eq!(game.title(), "Chess");
        assert_eq!(game.executable_path(), "/bin/chess");
        assert_eq!(game.icon_path(), DEFAULT_ICON_PATH);
        assert!(!game.is_favorite());
    }

    #[test]
    fn test_add_game_event_order() {
        let temp_dir = create_test_dir();
        let (mut library, events, _launcher) = library_in(&temp_dir);
        library.add_game("Chess", "/bin/chess").unwrap();
        library.add_game("Go", "/bin/go").unwrap();

        assert_eq!(
            drain(&events),
            vec![
                LibraryEvent::RowsAboutToBeInserted { first: 0, last: 0 },
                LibraryEvent::RowsInserted { first: 0, last: 0 },
                LibraryEvent::CountChanged,
                LibraryEvent::GameAdded("Chess".to_string()),
                LibraryEvent::RowsAboutToBeInserted { first: 1, last: 1 },
                LibraryEvent::RowsInserted { first: 1, last: 1 },
                LibraryEvent::CountChanged,
                LibraryEvent::GameAdded("Go".to_string()),
            ]
        );
    }

    #[test]
    fn test_insert_is_bracketed_around_append() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let temp_dir = create_test_dir();
        let (mut library, _events, _launcher) = library_in(&temp_dir);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        library.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        library.add_game("Chess", "/bin/chess").unwrap();

        let seen = seen.borrow();
        let before = seen
            .iter()
            .position(|e| matches!(e, LibraryEvent::RowsAboutToBeInserted { .. }))
            .unwrap();
        let after = seen
            .iter()
            .position(|e| matches!(e, LibraryEvent::RowsInserted { .. }))
            .unwrap();
        assert!(before < after);
    }

    #[test]
    fn test_add_duplicate_changes_nothing() {
        let temp_dir = create_test_dir();
        let (mut library, events, _launcher) = library_in(&temp_dir);
        library.add_game("Chess", "/bin/chess").unwrap();
        let saved = std::fs::read_to_string(library.library_file()).unwrap();
        drain(&events);

        let result = library.add_game("Another Chess", "/bin/chess");

        assert!(matches!(result, Err(GameBirdError::DuplicateGame { .. })));
        assert_eq!(library.count(), 1);
        assert_eq!(library.game(0).unwrap().title(), "Chess");
        assert_eq!(
            drain(&events),
            vec![LibraryEvent::ErrorOccurred(
                "Game already exists in library".to_string()
            )]
        );
        assert_eq!(
            std::fs::read_to_string(library.library_file()).unwrap(),
            saved
        );
    }

    #[test]
    fn test_add_persists_immediately() {
        let temp_dir = create_test_dir();
        let (mut library, _events, _launcher) = library_in(&temp_dir);
        library.add_game("Chess", "/bin/chess").unwrap();

        let store = LibraryStore::new(library.library_file());
        let StoreRead::Loaded(games) = store.read().unwrap() else {
            panic!("library file should exist after add");
        };
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].executable_path(), "/bin/chess");
    }

    #[test]
    fn test_remove_game() {
        let temp_dir = create_test_dir();
        let (mut library, events, _launcher) = library_in(&temp_dir);
        library.add_game("Chess", "/bin/chess").unwrap();
        library.add_game("Go", "/bin/go").unwrap();
        drain(&events);

        assert!(library.remove_game(0));

        assert_eq!(library.count(), 1);
        assert_eq!(library.game(0).unwrap().title(), "Go");
        assert_eq!(
            drain(&events),
            vec![
                LibraryEvent::RowsAboutToBeRemoved { first: 0, last: 0 },
                LibraryEvent::RowsRemoved { first: 0, last: 0 },
                LibraryEvent::CountChanged,
            ]
        );
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let temp_dir = create_test_dir();
        let (mut library, events, _launcher) = library_in(&temp_dir);
        library.add_game("Chess", "/bin/chess").unwrap();
        let saved = std::fs::read(library.library_file()).unwrap();
        drain(&events);

        assert!(!library.remove_game(1));
        assert!(!library.remove_game(usize::MAX));

        assert_eq!(library.count(), 1);
        assert!(drain(&events).is_empty());
        assert_eq!(std::fs::read(library.library_file()).unwrap(), saved);
    }

    #[test]
    fn test_remove_on_empty_library_writes_nothing() {
        let temp_dir = create_test_dir();
        let (mut library, _events, _launcher) = library_in(&temp_dir);

        assert!(!library.remove_game(0));
        assert!(!library.library_file().exists());
    }

    #[test]
    fn test_toggle_favorite_flips_only_target() {
        let temp_dir = create_test_dir();
        let (mut library, events, _launcher) = library_in(&temp_dir);
        library.add_game("Chess", "/bin/chess").unwrap();
        library.add_game("Go", "/bin/go").unwrap();
        library.add_game("Shogi", "/bin/shogi").unwrap();
        drain(&events);

        assert_eq!(library.toggle_favorite(1), Some(true));

        assert!(!library.game(0).unwrap().is_favorite());
        assert!(library.game(1).unwrap().is_favorite());
        assert!(!library.game(2).unwrap().is_favorite());
        assert_eq!(library.favorite_indices(), vec![1]);
        assert_eq!(
            drain(&events),
            vec![LibraryEvent::DataChanged {
                row: 1,
                roles: vec![GameRole::IsFavorite]
            }]
        );

        assert_eq!(library.toggle_favorite(1), Some(false));
        assert!(library.favorite_indices().is_empty());
    }

    #[test]
    fn test_toggle_favorite_out_of_range() {
        let temp_dir = create_test_dir();
        let (mut library, events, _launcher) = library_in(&temp_dir);

        assert_eq!(library.toggle_favorite(0), None);
        assert!(drain(&events).is_empty());
    }

    #[test]
    fn test_recently_added_window() {
        let temp_dir = create_test_dir();
        let (mut library, _events, _launcher) = library_in(&temp_dir);

        for i in 0..3 {
            library.add_game(&format!("Game {i}"), &format!("/games/{i}")).unwrap();
        }
        assert_eq!(library.recently_added_indices(), vec![0, 1, 2]);

        for i in 3..15 {
            library.add_game(&format!("Game {i}"), &format!("/games/{i}")).unwrap();
        }
        assert_eq!(
            library.recently_added_indices(),
            (5..15).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_recently_added_empty() {
        let temp_dir = create_test_dir();
        let (library, _events, _launcher) = library_in(&temp_dir);
        assert!(library.recently_added_indices().is_empty());
    }

    #[test]
    fn test_launch_missing_executable() {
        let temp_dir = create_test_dir();
        let (mut library, events, launcher) = library_in(&temp_dir);
        let missing = temp_dir.path().join("gone.exe");
        library
            .add_game("Gone", missing.to_str().unwrap())
            .unwrap();
        drain(&events);

        let result = library.launch_game(0);

        assert!(matches!(result, Err(GameBirdError::ExecutableNotFound(_))));
        assert!(launcher.calls().is_empty());
        assert_eq!(
            errors(&drain(&events)),
            vec![format!("Executable not found: {}", missing.display())]
        );
    }

    #[test]
    fn test_launch_success_emits_launched() {
        let temp_dir = create_test_dir();
        let (mut library, events, launcher) = library_in(&temp_dir);
        let exe = touch_executable(&temp_dir, "chess");
        library.add_game("Chess", exe.to_str().unwrap()).unwrap();
        drain(&events);

        library.launch_game(0).unwrap();

        assert_eq!(launcher.calls(), vec![exe]);
        assert_eq!(
            drain(&events),
            vec![LibraryEvent::GameLaunched("Chess".to_string())]
        );
    }

    #[test]
    fn test_launch_failure_names_game() {
        let temp_dir = create_test_dir();
        let store = LibraryStore::new(temp_dir.path().join("games.json"));
        let mut library = GameLibrary::new(
            store,
            Box::new(RecordingLauncher::with_failure("exec format error")),
        );
        let events = library.subscribe_channel();
        let exe = touch_executable(&temp_dir, "broken");
        library.add_game("Broken", exe.to_str().unwrap()).unwrap();
        drain(&events);

        let result = library.launch_game(0);

        assert!(matches!(result, Err(GameBirdError::LaunchFailed { .. })));
        assert_eq!(
            errors(&drain(&events)),
            vec!["Failed to launch: Broken".to_string()]
        );
    }

    #[test]
    fn test_launch_out_of_range_is_noop() {
        let temp_dir = create_test_dir();
        let (mut library, events, launcher) = library_in(&temp_dir);

        assert!(library.launch_game(3).is_ok());
        assert!(launcher.calls().is_empty());
        assert!(drain(&events).is_empty());
    }

    #[test]
    fn test_load_missing_file_is_empty_without_error() {
        let temp_dir = create_test_dir();
        let (mut library, events, _launcher) = library_in(&temp_dir);

        assert_eq!(library.load_library().unwrap(), 0);
        assert!(library.is_empty());
        assert!(drain(&events).is_empty());
    }

    #[test]
    fn test_load_emits_reset_then_count() {
        let temp_dir = create_test_dir();
        {
            let (mut library, _events, _launcher) = library_in(&temp_dir);
            library.add_game("Chess", "/bin/chess").unwrap();
            library.add_game("Go", "/bin/go").unwrap();
            library.toggle_favorite(1);
        }

        let (mut library, events, _launcher) = library_in(&temp_dir);
        assert_eq!(library.load_library().unwrap(), 2);

        assert_eq!(
            drain(&events),
            vec![
                LibraryEvent::ModelAboutToBeReset,
                LibraryEvent::ModelReset,
                LibraryEvent::CountChanged,
            ]
        );
        assert_eq!(library.game(0).unwrap().title(), "Chess");
        assert!(library.game(1).unwrap().is_favorite());
        assert_eq!(library.favorite_indices(), vec![1]);
    }

    #[test]
    fn test_load_malformed_file_reports_and_keeps_state() {
        let temp_dir = create_test_dir();
        let (mut library, events, _launcher) = library_in(&temp_dir);
        std::fs::write(library.library_file(), "{ this is not json").unwrap();

        let result = library.load_library();

        assert!(matches!(result, Err(GameBirdError::MalformedLibrary(_))));
        assert!(library.is_empty());
        assert_eq!(
            drain(&events),
            vec![LibraryEvent::ErrorOccurred(
                "Invalid library file format".to_string()
            )]
        );
    }

    #[test]
    fn test_save_failure_keeps_in_memory_change() {
        let temp_dir = create_test_dir();
        // A directory where the library file should be makes every write fail
        let blocked = temp_dir.path().join("games.json");
        std::fs::create_dir(&blocked).unwrap();
        let mut library = GameLibrary::new(
            LibraryStore::new(&blocked),
            Box::new(RecordingLauncher::new()),
        );
        let events = library.subscribe_channel();

        assert_eq!(library.add_game("Chess", "/bin/chess").unwrap(), 0);

        assert_eq!(library.count(), 1);
        let messages = errors(&drain(&events));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Failed to save library: "));
    }

    #[test]
    fn test_dropped_channel_receiver_is_unsubscribed() {
        let temp_dir = create_test_dir();
        let (mut library, events, _launcher) = library_in(&temp_dir);
        let kept = library.subscribe_channel();
        assert_eq!(library.channels.len(), 2);
        drop(events);

        library.add_game("Chess", "/bin/chess").unwrap();

        assert_eq!(library.count(), 1);
        assert_eq!(library.channels.len(), 1);
        assert!(drain(&kept).contains(&LibraryEvent::GameAdded("Chess".to_string())));
    }

    #[test]
    fn test_load_unreadable_file_reports_read_failure() {
        let temp_dir = create_test_dir();
        let (mut library, events, _launcher) = library_in(&temp_dir);
        library.add_game("Chess", "/bin/chess").unwrap();
        std::fs::remove_file(library.library_file()).unwrap();
        // A directory at the library path exists but cannot be read as a file
        std::fs::create_dir(library.library_file()).unwrap();
        drain(&events);

        let result = library.load_library();

        assert!(matches!(result, Err(GameBirdError::LibraryReadFailed(_))));
        assert_eq!(library.count(), 1);
        let messages = errors(&drain(&events));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Failed to load library: "));
    }
}
