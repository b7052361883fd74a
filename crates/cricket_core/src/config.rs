//! Match configuration
//!
//! Loaded from JSON or YAML. `CRICKET_CONFIG_PATH` points at a file that
//! overrides the defaults for the CLI and the JSON API.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use std::{env, fs};

use crate::error::{CricketError, Result};

pub const CONFIG_PATH_ENV: &str = "CRICKET_CONFIG_PATH";
/// Turns on per-ball tracing regardless of `MatchConfig::trace_balls`.
pub const BALL_TRACE_ENV: &str = "CRICKET_DEBUG_BALLS";

/// How the opponent's batting innings are played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentTable {
    /// Fixed 1/2-run bands after the wicket and dot subtraction; fours and
    /// sixes cannot occur.
    SourceParity,
    /// Every band weighted so the total mass is exactly 1.0.
    Normalized,
}

/// Who resolves balls while the opponent bats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentInningsMode {
    /// The scripted side draws its own deliveries.
    Autoplay,
    /// The human chooses speed and line for every ball.
    HumanBowls,
}

/// Delay between autoplay balls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayPacing {
    /// Opponent batting first (default: 650)
    pub innings_ms: u64,
    /// Opponent chasing (default: 700)
    pub chase_ms: u64,
}

impl Default for AutoplayPacing {
    fn default() -> Self {
        Self { innings_ms: 650, chase_ms: 700 }
    }
}

impl AutoplayPacing {
    pub fn delay(&self, chasing: bool) -> Duration {
        Duration::from_millis(if chasing { self.chase_ms } else { self.innings_ms })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Overs per innings (default: 2)
    pub overs: u8,
    /// Balls per over (default: 6)
    pub balls_per_over: u8,
    /// Wickets that end an innings; independent of `overs` (default: 3)
    pub wickets_per_innings: u8,
    /// Overs values a new-match request may choose from
    pub overs_choices: Vec<u8>,
    pub opponent_table: OpponentTable,
    pub opponent_innings: OpponentInningsMode,
    pub pacing: AutoplayPacing,
    /// Debug-log the draw and delivery behind every ball (default: false)
    pub trace_balls: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            overs: 2,
            balls_per_over: 6,
            wickets_per_innings: 3,
            overs_choices: vec![1, 2, 3, 5],
            opponent_table: OpponentTable::SourceParity,
            opponent_innings: OpponentInningsMode::Autoplay,
            pacing: AutoplayPacing::default(),
            trace_balls: false,
        }
    }
}

impl MatchConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Reads a config file; `.yaml`/`.yml` are parsed as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content)?,
            _ => Self::from_json(&content)?,
        };
        config.validate()?;
        log::debug!("Loaded match config from {}", path.display());
        Ok(config)
    }

    /// Defaults, overridden by the file named in `CRICKET_CONFIG_PATH` if set.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::load(Path::new(path)).map_err(|e| {
            CricketError::InvalidConfig(format!("{CONFIG_PATH_ENV}='{path}': {e}"))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.balls_per_over == 0 {
            return Err(CricketError::InvalidConfig("balls_per_over must be positive".into()));
        }
        if self.wickets_per_innings == 0 {
            return Err(CricketError::InvalidConfig(
                "wickets_per_innings must be positive".into(),
            ));
        }
        if self.overs_choices.is_empty() || self.overs_choices.contains(&0) {
            return Err(CricketError::InvalidConfig(
                "overs_choices must be non-empty positive values".into(),
            ));
        }
        self.check_overs(self.overs)
    }

    /// Overs must be one of the offered choices.
    pub fn check_overs(&self, overs: u8) -> Result<()> {
        if overs == 0 || !self.overs_choices.contains(&overs) {
            return Err(CricketError::InvalidOvers {
                overs,
                choices: self.overs_choices.clone(),
            });
        }
        Ok(())
    }

    /// Per-ball tracing from config, or from `CRICKET_DEBUG_BALLS=1|true`.
    pub fn trace_balls_enabled(&self) -> bool {
        self.trace_balls || ball_trace_env()
    }

    pub fn total_balls(&self) -> u32 {
        self.overs as u32 * self.balls_per_over as u32
    }

    pub fn with_overs(mut self, overs: u8) -> Self {
        self.overs = overs;
        self
    }

    pub fn with_opponent_table(mut self, table: OpponentTable) -> Self {
        self.opponent_table = table;
        self
    }
}

fn ball_trace_env() -> bool {
    static FROM_ENV: OnceLock<bool> = OnceLock::new();
    *FROM_ENV.get_or_init(|| {
        env::var(BALL_TRACE_ENV).is_ok_and(|value| {
            let value = value.trim();
            value == "1" || value.eq_ignore_ascii_case("true")
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_classic_game() {
        let config = MatchConfig::default();
        assert_eq!(config.total_balls(), 12);
        assert_eq!(config.wickets_per_innings, 3);
        assert_eq!(config.opponent_table, OpponentTable::SourceParity);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = MatchConfig::from_json(r#"{"overs": 5, "opponent_table": "normalized"}"#)
            .unwrap();
        assert_eq!(config.overs, 5);
        assert_eq!(config.opponent_table, OpponentTable::Normalized);
        assert_eq!(config.balls_per_over, 6);
        assert_eq!(config.pacing.chase_ms, 700);
    }

    #[test]
    fn rejects_overs_outside_choices() {
        let config = MatchConfig::default().with_overs(4);
        match config.validate() {
            Err(CricketError::InvalidOvers { overs, .. }) => assert_eq!(overs, 4),
            other => panic!("expected InvalidOvers, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_wicket_limit() {
        let config = MatchConfig { wickets_per_innings: 0, ..MatchConfig::default() };
        assert!(matches!(config.validate(), Err(CricketError::InvalidConfig(_))));
    }

    #[test]
    fn loads_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "overs: 3\nwickets_per_innings: 5\nopponent_innings: human_bowls").unwrap();

        let config = MatchConfig::load(file.path()).unwrap();
        assert_eq!(config.overs, 3);
        assert_eq!(config.wickets_per_innings, 5);
        assert_eq!(config.opponent_innings, OpponentInningsMode::HumanBowls);
    }

    #[test]
    fn load_validates_after_parsing() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"overs": 7}}"#).unwrap();

        assert!(matches!(
            MatchConfig::load(file.path()),
            Err(CricketError::InvalidOvers { overs: 7, .. })
        ));
    }

    #[test]
    fn trace_balls_toggle_from_file() {
        assert!(!MatchConfig::default().trace_balls);

        let config = MatchConfig::from_yaml("trace_balls: true").unwrap();
        assert!(config.trace_balls);
        assert!(config.trace_balls_enabled());
    }

    #[test]
    fn pacing_picks_chase_delay() {
        let pacing = AutoplayPacing::default();
        assert_eq!(pacing.delay(false), Duration::from_millis(650));
        assert_eq!(pacing.delay(true), Duration::from_millis(700));
    }
}
