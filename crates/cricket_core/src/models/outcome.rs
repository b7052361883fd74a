use serde::{Deserialize, Serialize};
use std::fmt;

/// The only run values a ball can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(into = "u8", try_from = "u8")]
pub enum RunValue {
    Dot,
    One,
    Two,
    Four,
    Six,
}

impl RunValue {
    pub fn runs(self) -> u32 {
        match self {
            RunValue::Dot => 0,
            RunValue::One => 1,
            RunValue::Two => 2,
            RunValue::Four => 4,
            RunValue::Six => 6,
        }
    }
}

impl From<RunValue> for u8 {
    fn from(value: RunValue) -> Self {
        value.runs() as u8
    }
}

impl TryFrom<u8> for RunValue {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RunValue::Dot),
            1 => Ok(RunValue::One),
            2 => Ok(RunValue::Two),
            4 => Ok(RunValue::Four),
            6 => Ok(RunValue::Six),
            other => Err(format!("{other} is not a legal run value")),
        }
    }
}

/// Result of one delivery: a wicket or some runs, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallOutcome {
    Wicket,
    Runs(RunValue),
}

impl BallOutcome {
    pub fn is_wicket(&self) -> bool {
        matches!(self, BallOutcome::Wicket)
    }

    /// Runs added to the batting total (0 for a wicket).
    pub fn runs(&self) -> u32 {
        match self {
            BallOutcome::Wicket => 0,
            BallOutcome::Runs(value) => value.runs(),
        }
    }
}

impl fmt::Display for BallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BallOutcome::Wicket => write!(f, "W"),
            BallOutcome::Runs(value) => write!(f, "{}", value.runs()),
        }
    }
}
