//! List-model view of the library
//!
//! UI layers bind to rows by index and to fields by role. Role ids start at
//! 257 so they line up with item-model conventions where the first custom
//! role is `UserRole + 1`.

use crate::controller::game_library::GameLibrary;
use crate::library::Game;
use std::collections::BTreeMap;

/// Field exposed to the UI for each row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameRole {
    /// Game title
    Title = 257,
    /// Executable path
    ExecutablePath = 258,
    /// Icon path
    IconPath = 259,
    /// Favorite flag
    IsFavorite = 260,
}

impl GameRole {
    /// All roles in id order
    pub const ALL: [GameRole; 4] = [
        GameRole::Title,
        GameRole::ExecutablePath,
        GameRole::IconPath,
        GameRole::IsFavorite,
    ];

    /// Numeric role id
    pub fn id(self) -> i32 {
        self as i32
    }

    /// Look up a role by id
    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }

    /// Name the UI binds to
    pub fn name(self) -> &'static str {
        match self {
            GameRole::Title => "title",
            GameRole::ExecutablePath => "executablePath",
            GameRole::IconPath => "iconPath",
            GameRole::IsFavorite => "isFavorite",
        }
    }

    fn value_of(self, game: &Game) -> RoleValue {
        match self {
            GameRole::Title => RoleValue::Text(game.title().to_string()),
            GameRole::ExecutablePath => RoleValue::Text(game.executable_path().to_string()),
            GameRole::IconPath => RoleValue::Text(game.icon_path().to_string()),
            GameRole::IsFavorite => RoleValue::Bool(game.is_favorite()),
        }
    }
}

/// Value of one role for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleValue {
    /// Text field
    Text(String),
    /// Boolean field
    Bool(bool),
}

/// Convert a signed row coming from a UI layer; negative rows map to `None`
pub fn row_from_ui(row: i32) -> Option<usize> {
    usize::try_from(row).ok()
}

impl GameLibrary {
    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.count()
    }

    /// Value of `role` at `row`, `None` when the row is out of range
    pub fn data(&self, row: usize, role: GameRole) -> Option<RoleValue> {
        self.game(row).map(|game| role.value_of(game))
    }

    /// Value for a numeric role id, `None` for unknown roles or rows
    pub fn data_for_role_id(&self, row: usize, role_id: i32) -> Option<RoleValue> {
        GameRole::from_id(role_id).and_then(|role| self.data(row, role))
    }

    /// Mapping of role id to role name
    pub fn role_names(&self) -> BTreeMap<i32, &'static str> {
        GameRole::ALL
            .into_iter()
            .map(|role| (role.id(), role.name()))
            .collect()
    }
}
