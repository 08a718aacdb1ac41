//! GUI controller
//!
//! Binds the `GameLibrary` to the Slint main window. The window shows a
//! `VecModel<GameItem>` that mirrors the library row for row; after every UI
//! request the queued `LibraryEvent`s are replayed onto the mirror, so only
//! the affected rows are touched.

use crate::{GameItem, MainWindow};
use anyhow::{Context, Result};
use gamebird::config::{AppPaths, app_version_label};
use gamebird::controller::{GameLibrary, LibraryEvent, row_from_ui};
use gamebird::library::Game;
use gamebird::utils::extract_display_name_from_exe;
use slint::{ComponentHandle, Model, ModelRc, SharedString, VecModel, Weak};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;
use tracing::{debug, info, warn};

/// Which subset of the library the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    All,
    Favorites,
    RecentlyAdded,
}

impl View {
    fn from_index(index: i32) -> Self {
        match index {
            1 => View::Favorites,
            2 => View::RecentlyAdded,
            _ => View::All,
        }
    }
}

/// State shared by the window callbacks
struct GuiState {
    library: RefCell<GameLibrary>,
    events: mpsc::Receiver<LibraryEvent>,
    rows: Rc<VecModel<GameItem>>,
    window: Weak<MainWindow>,
}

/// Owns the main window and wires it to the library
pub struct GuiController {
    window: MainWindow,
    state: Rc<GuiState>,
}

impl GuiController {
    /// Create the main window, load the library and connect callbacks
    pub fn new(mut library: GameLibrary, paths: &AppPaths) -> Result<Self> {
        let window = MainWindow::new().context("Failed to create main window")?;

        let events = library.subscribe_channel();
        if let Err(e) = library.load_library() {
            warn!("Starting with an empty library: {}", e);
        }

        let rows = Rc::new(VecModel::from(
            library
                .games()
                .iter()
                .enumerate()
                .map(|(row, game)| game_item(row, game))
                .collect::<Vec<_>>(),
        ));

        window.set_library_path(SharedString::from(paths.data_dir().display().to_string()));
        window.set_app_version(SharedString::from(app_version_label()));

        let state = Rc::new(GuiState {
            library: RefCell::new(library),
            events,
            rows,
            window: window.as_weak(),
        });

        Self::connect_callbacks(&window, &state);
        state.sync();

        Ok(Self { window, state })
    }

    /// Run the Slint event loop until the window closes
    pub fn run(self) -> Result<()> {
        info!(
            "Showing main window with {} games",
            self.state.library.borrow().count()
        );
        self.window.run().context("Slint event loop failed")?;
        Ok(())
    }

    fn connect_callbacks(window: &MainWindow, state: &Rc<GuiState>) {
        let s = Rc::clone(state);
        window.on_add_game_requested(move || {
            let Some(path) = open_file_dialog() else {
                debug!("File dialog cancelled");
                return;
            };
            let title = extract_display_name_from_exe(&path);
            let executable = path.to_string_lossy();
            if let Err(e) = s.library.borrow_mut().add_game(&title, &executable) {
                debug!("Add game rejected: {}", e);
            }
            s.sync();
        });

        let s = Rc::clone(state);
        window.on_remove_game(move |row| {
            if let Some(row) = row_from_ui(row) {
                s.library.borrow_mut().remove_game(row);
            }
            s.sync();
        });

        let s = Rc::clone(state);
        window.on_toggle_favorite(move |row| {
            if let Some(row) = row_from_ui(row) {
                s.library.borrow_mut().toggle_favorite(row);
            }
            s.sync();
        });

        let s = Rc::clone(state);
        window.on_launch_game(move |row| {
            if let Some(row) = row_from_ui(row)
                && let Err(e) = s.library.borrow_mut().launch_game(row)
            {
                debug!("Launch failed: {}", e);
            }
            s.sync();
        });

        let s = Rc::clone(state);
        window.on_view_changed(move |_| s.refresh_view());
    }
}

impl GuiState {
    /// Replay queued library events onto the mirror model and window
    fn sync(&self) {
        let Some(window) = self.window.upgrade() else {
            return;
        };

        let library = self.library.borrow();
        for event in self.events.try_iter() {
            match event {
                LibraryEvent::RowsInserted { first, last } => {
                    for row in first..=last {
                        if let Some(game) = library.game(row) {
                            self.rows.insert(row, game_item(row, game));
                        }
                    }
                    self.renumber_from(last + 1);
                }
                LibraryEvent::RowsRemoved { first, last } => {
                    for _ in first..=last {
                        if first < self.rows.row_count() {
                            self.rows.remove(first);
                        }
                    }
                    self.renumber_from(first);
                }
                LibraryEvent::ModelReset => {
                    self.rows.set_vec(
                        library
                            .games()
                            .iter()
                            .enumerate()
                            .map(|(row, game)| game_item(row, game))
                            .collect::<Vec<_>>(),
                    );
                }
                LibraryEvent::DataChanged { row, .. } => {
                    if let Some(game) = library.game(row) {
                        self.rows.set_row_data(row, game_item(row, game));
                    }
                }
                LibraryEvent::GameAdded(title) => {
                    window.set_status_text(SharedString::from(format!("Added {title}")));
                }
                LibraryEvent::GameLaunched(title) => {
                    window.set_status_text(SharedString::from(format!("Launched {title}")));
                }
                LibraryEvent::ErrorOccurred(message) => {
                    warn!("Library error: {}", message);
                    window.set_status_text(SharedString::from(message));
                }
                LibraryEvent::RowsAboutToBeInserted { .. }
                | LibraryEvent::RowsAboutToBeRemoved { .. }
                | LibraryEvent::ModelAboutToBeReset
                | LibraryEvent::CountChanged => {}
            }
        }

        window.set_game_count(i32::try_from(library.count()).unwrap_or(i32::MAX));
        drop(library);

        self.refresh_view();
    }

    /// Point the list at the rows of the current view
    fn refresh_view(&self) {
        let Some(window) = self.window.upgrade() else {
            return;
        };

        let library = self.library.borrow();
        let model: ModelRc<GameItem> = match View::from_index(window.get_current_view()) {
            View::All => ModelRc::from(Rc::clone(&self.rows)),
            View::Favorites => self.subset(&library.favorite_indices()),
            View::RecentlyAdded => self.subset(&library.recently_added_indices()),
        };
        window.set_games(model);
    }

    fn subset(&self, indices: &[usize]) -> ModelRc<GameItem> {
        let items: Vec<GameItem> = indices
            .iter()
            .filter_map(|&row| self.rows.row_data(row))
            .collect();
        ModelRc::new(VecModel::from(items))
    }

    /// Rows after an insert or removal shift; keep `row` in sync with the index
    fn renumber_from(&self, start: usize) {
        for index in start..self.rows.row_count() {
            if let Some(mut item) = self.rows.row_data(index) {
                item.row = i32::try_from(index).unwrap_or(i32::MAX);
                self.rows.set_row_data(index, item);
            }
        }
    }
}

fn game_item(row: usize, game: &Game) -> GameItem {
    GameItem {
        row: i32::try_from(row).unwrap_or(i32::MAX),
        title: SharedString::from(game.title()),
        executable_path: SharedString::from(game.executable_path()),
        icon_path: SharedString::from(game.icon_path()),
        is_favorite: game.is_favorite(),
    }
}

/// Ask the user for a game executable
fn open_file_dialog() -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title("Select Game Executable");

    if let Some(dir) = dirs::executable_dir().or_else(dirs::home_dir) {
        dialog = dialog.set_directory(dir);
    }

    for (name, extensions) in executable_filters() {
        dialog = dialog.add_filter(*name, *extensions);
    }

    dialog.pick_file()
}

/// File dialog filters for game executables.
///
/// Empty outside Windows: executables there usually have no extension, and
/// any extension filter (even `*`, which becomes `*.*`) would hide them.
fn executable_filters() -> &'static [(&'static str, &'static [&'static str])] {
    const WINDOWS_FILTERS: &[(&str, &[&str])] =
        &[("Executable Files", &["exe"]), ("All Files", &["*"])];

    if cfg!(windows) { WINDOWS_FILTERS } else { &[] }
}
