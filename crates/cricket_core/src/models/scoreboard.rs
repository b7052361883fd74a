use serde::{Deserialize, Serialize};
use std::fmt;

use super::side::Side;

/// Completed overs and balls into the current over, e.g. `1.4`.
pub fn overs_notation(balls: u32, balls_per_over: u32) -> String {
    let per_over = balls_per_over.max(1);
    format!("{}.{}", balls / per_over, balls % per_over)
}

/// What the scoreboard shows: always the side currently at the crease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardSnapshot {
    pub batting: Side,
    pub team_name: String,
    pub runs: u32,
    pub wickets: u32,
    pub balls: u32,
    /// `overs.balls` notation
    pub overs: String,
    pub target: Option<u32>,
    pub inning: u8,
    pub match_over: bool,
}

impl ScoreboardSnapshot {
    /// Target rendered the way the board shows it, a dash when unset.
    pub fn target_display(&self) -> String {
        self.target.map(|t| t.to_string()).unwrap_or_else(|| "—".to_string())
    }
}

impl fmt::Display for ScoreboardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}  {}/{}  Overs {}  Target {}  Inning {}",
            self.team_name,
            self.runs,
            self.wickets,
            self.overs,
            self.target_display(),
            self.inning
        )
    }
}
