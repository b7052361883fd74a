//! Bowling parameters chosen by the human (or drawn by autoplay).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bowling speed, slider positions 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum SpeedLevel {
    Slow,
    Medium,
    Fast,
}

impl SpeedLevel {
    pub const ALL: [SpeedLevel; 3] = [SpeedLevel::Slow, SpeedLevel::Medium, SpeedLevel::Fast];

    /// Slider position (1 = slow, 3 = fast).
    pub fn level(self) -> u8 {
        match self {
            SpeedLevel::Slow => 1,
            SpeedLevel::Medium => 2,
            SpeedLevel::Fast => 3,
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(SpeedLevel::Slow),
            2 => Some(SpeedLevel::Medium),
            3 => Some(SpeedLevel::Fast),
            _ => None,
        }
    }
}

impl fmt::Display for SpeedLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SpeedLevel::Slow => write!(f, "slow"),
            SpeedLevel::Medium => write!(f, "medium"),
            SpeedLevel::Fast => write!(f, "fast"),
        }
    }
}

impl FromStr for SpeedLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" | "1" => Ok(SpeedLevel::Slow),
            "medium" | "2" => Ok(SpeedLevel::Medium),
            "fast" | "3" => Ok(SpeedLevel::Fast),
            other => Err(format!("unknown speed '{other}' (expected slow, medium or fast)")),
        }
    }
}

/// Where the ball is pitched relative to the stumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum BowlingLine {
    Center,
    Off,
    Leg,
}

impl BowlingLine {
    pub const ALL: [BowlingLine; 3] = [BowlingLine::Center, BowlingLine::Off, BowlingLine::Leg];
}

impl fmt::Display for BowlingLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BowlingLine::Center => write!(f, "center"),
            BowlingLine::Off => write!(f, "off"),
            BowlingLine::Leg => write!(f, "leg"),
        }
    }
}

impl FromStr for BowlingLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "center" | "centre" => Ok(BowlingLine::Center),
            "off" => Ok(BowlingLine::Off),
            "leg" => Ok(BowlingLine::Leg),
            other => Err(format!("unknown line '{other}' (expected center, off or leg)")),
        }
    }
}

/// A single delivery: speed plus line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delivery {
    pub speed: SpeedLevel,
    pub line: BowlingLine,
}

impl Delivery {
    pub fn new(speed: SpeedLevel, line: BowlingLine) -> Self {
        Self { speed, line }
    }
}

impl Default for Delivery {
    fn default() -> Self {
        Self { speed: SpeedLevel::Medium, line: BowlingLine::Center }
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} / {}", self.speed, self.line)
    }
}
