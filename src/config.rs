use serde::{Deserialize, Serialize};

use crate::types::Color;

/// Options for a new game. Every field has a default, so JavaScript callers
/// may pass a partial object or nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Colour that rolls first, normally decided by the server's opening roll.
    pub first_player: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_player: Color::White,
        }
    }
}
