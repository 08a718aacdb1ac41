//! Game record
//!
//! One entry of the library: title, executable path, icon path and favorite
//! flag. Fields change only through setters, which skip no-op writes and
//! notify subscribers with the field that actually changed.

use serde_json::{Value, json};
use std::fmt;

/// Field of a [`Game`] that changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameField {
    /// `title`
    Title,
    /// `executablePath`
    ExecutablePath,
    /// `iconPath`
    IconPath,
    /// `isFavorite`
    IsFavorite,
}

type ChangeObserver = Box<dyn FnMut(GameField)>;

/// A single game in the library
#[derive(Default)]
pub struct Game {
    title: String,
    executable_path: String,
    icon_path: String,
    is_favorite: bool,
    observers: Vec<ChangeObserver>,
}

impl Game {
    /// Create a game with a title and executable path; icon empty, not a favorite
    pub fn new(title: impl Into<String>, executable_path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            executable_path: executable_path.into(),
            ..Self::default()
        }
    }

    /// Build a game from a JSON object, see [`Game::apply_json`]
    pub fn from_json(json: &Value) -> Self {
        let mut game = Self::default();
        game.apply_json(json);
        game
    }

    /// Display title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Path of the executable; unique within a library
    pub fn executable_path(&self) -> &str {
        &self.executable_path
    }

    /// Path of the icon shown for this game
    pub fn icon_path(&self) -> &str {
        &self.icon_path
    }

    /// Whether the game is marked as a favorite
    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Register a callback invoked after every real field change
    pub fn subscribe(&mut self, observer: impl FnMut(GameField) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Returns `true` if the title changed
    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        if self.title == title {
            return false;
        }
        self.title = title;
        self.notify(GameField::Title);
        true
    }

    /// Returns `true` if the executable path changed
    pub fn set_executable_path(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.executable_path == path {
            return false;
        }
        self.executable_path = path;
        self.notify(GameField::ExecutablePath);
        true
    }

    /// Returns `true` if the icon path changed
    pub fn set_icon_path(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.icon_path == path {
            return false;
        }
        self.icon_path = path;
        self.notify(GameField::IconPath);
        true
    }

    /// Returns `true` if the favorite flag changed
    pub fn set_is_favorite(&mut self, favorite: bool) -> bool {
        if self.is_favorite == favorite {
            return false;
        }
        self.is_favorite = favorite;
        self.notify(GameField::IsFavorite);
        true
    }

    /// Serialize to the on-disk object form
    pub fn to_json(&self) -> Value {
        json!({
            "title": self.title,
            "executablePath": self.executable_path,
            "iconPath": self.icon_path,
            "isFavorite": self.is_favorite,
        })
    }

    /// Apply the fields of a JSON object through the setters.
    ///
    /// Missing or mistyped keys fall back to `""` / `false`; a non-object
    /// value resets every field. Never fails.
    pub fn apply_json(&mut self, json: &Value) {
        let text = |key: &str| json.get(key).and_then(Value::as_str).unwrap_or_default();

        self.set_title(text("title"));
        self.set_executable_path(text("executablePath"));
        self.set_icon_path(text("iconPath"));
        self.set_is_favorite(
            json.get("isFavorite")
                .and_then(Value::as_bool)
                .unwrap_or_default(),
        );
    }

    fn notify(&mut self, field: GameField) {
        for observer in &mut self.observers {
            observer(field);
        }
    }
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.executable_path == other.executable_path
            && self.icon_path == other.icon_path
            && self.is_favorite == other.is_favorite
    }
}

impl Eq for Game {}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("title", &self.title)
            .field("executable_path", &self.executable_path)
            .field("icon_path", &self.icon_path)
            .field("is_favorite", &self.is_favorite)
            .finish_non_exhaustive()
    }
}
