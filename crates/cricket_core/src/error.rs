use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::side::Side;

/// Why the controller refused a request.
///
/// A rejected request never mutates the match state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionRejected {
    #[error("toss has not been taken yet")]
    TossPending,

    #[error("toss already taken for this match")]
    TossAlreadyTaken,

    #[error("match is over")]
    MatchOver,

    #[error("{0} side is not batting")]
    NotBatting(Side),

    #[error("{0} side is not bowling")]
    NotBowling(Side),

    #[error("another action is still awaiting its outcome")]
    ActionPending,

    #[error("no action is awaiting an outcome")]
    NothingPending,
}

impl ActionRejected {
    /// Stable machine-readable code for the JSON boundary.
    pub fn code(&self) -> &'static str {
        match self {
            ActionRejected::TossPending => "TOSS_PENDING",
            ActionRejected::TossAlreadyTaken => "TOSS_ALREADY_TAKEN",
            ActionRejected::MatchOver => "MATCH_OVER",
            ActionRejected::NotBatting(_) => "NOT_BATTING",
            ActionRejected::NotBowling(_) => "NOT_BOWLING",
            ActionRejected::ActionPending => "ACTION_PENDING",
            ActionRejected::NothingPending => "NOTHING_PENDING",
        }
    }
}

#[derive(Error, Debug)]
pub enum CricketError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid overs: {overs} is not one of {choices:?}")]
    InvalidOvers { overs: u8, choices: Vec<u8> },

    #[error("Action rejected: {0}")]
    Rejected(#[from] ActionRejected),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CricketError {
    /// Config and overs problems come from the caller's input and can be
    /// fixed by resubmitting; everything else reflects the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CricketError::InvalidConfig(_)
                | CricketError::InvalidOvers { .. }
                | CricketError::Rejected(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CricketError>;
