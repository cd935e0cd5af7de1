use std::fmt;

use serde::{Deserialize, Serialize};

/// Who is to move, or who won. The AI is the maximizing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// Search convention: the AI maximizes `ai_score - player_score`.
    #[inline]
    pub fn is_maximizing(self) -> bool {
        self == Side::Ai
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => f.write_str("player"),
            Side::Ai => f.write_str("ai"),
        }
    }
}

/// End of the coin line a move takes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum End {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

impl End {
    #[inline]
    pub fn all() -> [End; 2] {
        [End::Left, End::Right]
    }
}

impl fmt::Display for End {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            End::Left => f.write_str("L"),
            End::Right => f.write_str("R"),
        }
    }
}
