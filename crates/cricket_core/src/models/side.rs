use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two teams in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The person at the keyboard
    Human,
    /// The scripted side
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Human => Side::Opponent,
            Side::Opponent => Side::Human,
        }
    }

    /// Name shown on the scoreboard.
    pub fn team_name(self) -> &'static str {
        match self {
            Side::Human => "You",
            Side::Opponent => "AI",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Human => write!(f, "human"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}
