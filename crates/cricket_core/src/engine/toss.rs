use serde::{Deserialize, Serialize};
use std::fmt;

use super::draws::DrawSource;
use crate::models::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coin {
    Heads,
    Tails,
}

impl Coin {
    fn from_draw(draw: f64) -> Self {
        if draw < 0.5 {
            Coin::Heads
        } else {
            Coin::Tails
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Coin::Heads => write!(f, "Heads"),
            Coin::Tails => write!(f, "Tails"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TossOutcome {
    pub coin: Coin,
    /// The human's call, drawn rather than asked for
    pub call: Coin,
    pub human_wins: bool,
    pub batting_first: Side,
}

impl TossOutcome {
    /// Flips the coin, then draws the human's call. A winning human always
    /// elects to bat.
    pub fn flip(draws: &mut impl DrawSource) -> Self {
        let coin = Coin::from_draw(draws.next_unit());
        let call = Coin::from_draw(draws.next_unit());
        let human_wins = coin == call;
        let batting_first = if human_wins { Side::Human } else { Side::Opponent };
        Self { coin, call, human_wins, batting_first }
    }

    pub fn result_text(&self) -> String {
        format!("Coin: {}. You {} toss", self.coin, if self.human_wins { "won" } else { "lost" })
    }

    pub fn mode_text(&self) -> &'static str {
        if self.human_wins {
            "You elected to bat first"
        } else {
            "Opponent bats first"
        }
    }
}
