use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{MatchConfig, OpponentTable};
use crate::error::{ActionRejected, CricketError};
use crate::engine::{
    BallReport, InningsTally, MatchController, MatchOutcome, RngDraws, TossOutcome,
};
use crate::models::{Delivery, LogEntry, ScoreboardSnapshot, Side};

pub const SCHEMA_VERSION: u8 = 1;

pub mod error_codes {
    pub const INVALID_JSON: &str = "INVALID_JSON";
    pub const UNSUPPORTED_SCHEMA: &str = "UNSUPPORTED_SCHEMA";
    pub const INVALID_CONFIG: &str = "INVALID_CONFIG";
    pub const INVALID_OVERS: &str = "INVALID_OVERS";
    pub const NO_RESULT: &str = "NO_RESULT";
    pub const SERIALIZATION_FAILED: &str = "SERIALIZATION_FAILED";
}

pub(crate) fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

pub(crate) fn error_code_for(e: &CricketError) -> &'static str {
    match e {
        CricketError::InvalidOvers { .. } => error_codes::INVALID_OVERS,
        CricketError::Rejected(reason) => reason.code(),
        _ => error_codes::INVALID_CONFIG,
    }
}

fn config_error(e: CricketError) -> String {
    err_code(error_code_for(&e), e)
}

fn default_true() -> bool {
    true
}

/// Headless match request (schema_version = 1).
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    /// Must be one of the configured overs choices
    #[serde(default)]
    pub overs: Option<u8>,
    #[serde(default)]
    pub wickets_per_innings: Option<u8>,
    #[serde(default)]
    pub opponent_table: Option<OpponentTable>,
    /// Skip the toss and send this side in first
    #[serde(default)]
    pub batting_first: Option<Side>,
    /// Bowl this delivery every ball instead of autoplaying the opponent
    #[serde(default)]
    pub human_delivery: Option<Delivery>,
    #[serde(default = "default_true")]
    pub include_balls: bool,
}

impl MatchRequest {
    pub fn new(seed: u64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            seed,
            overs: None,
            wickets_per_innings: None,
            opponent_table: None,
            batting_first: None,
            human_delivery: None,
            include_balls: true,
        }
    }

    fn apply_to(&self, mut config: MatchConfig) -> MatchConfig {
        if let Some(overs) = self.overs {
            config.overs = overs;
        }
        if let Some(wickets) = self.wickets_per_innings {
            config.wickets_per_innings = wickets;
        }
        if let Some(table) = self.opponent_table {
            config.opponent_table = table;
        }
        config
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub match_id: Uuid,
    pub seed: u64,
    pub overs: u8,
    pub opponent_table: OpponentTable,
    /// None when the request forced the first batting side
    pub toss: Option<TossOutcome>,
    pub batting_first: Side,
    pub target: u32,
    pub human: InningsTally,
    pub opponent: InningsTally,
    pub outcome: MatchOutcome,
    pub summary: String,
    pub scoreboard: ScoreboardSnapshot,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub balls: Vec<BallReport>,
    pub log: Vec<LogEntry>,
}

/// Plays a whole match from toss to result with no pacing.
pub fn simulate_match(
    request: &MatchRequest,
    base: MatchConfig,
) -> Result<MatchResponse, String> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(err_code(
            error_codes::UNSUPPORTED_SCHEMA,
            format!("expected {SCHEMA_VERSION}, got {}", request.schema_version),
        ));
    }

    let config = request.apply_to(base);
    config.validate().map_err(config_error)?;

    let overs = config.overs;
    let opponent_table = config.opponent_table;
    let mut controller = MatchController::new(config, RngDraws::seeded(request.seed))
        .map_err(config_error)?;
    let rejected = |e: ActionRejected| err_code(e.code(), e);

    let toss = match request.batting_first {
        Some(side) => {
            controller.start_without_toss(side).map_err(rejected)?;
            None
        }
        None => Some(controller.toss().map_err(rejected)?),
    };

    let mut balls = Vec::new();
    while !controller.state().is_match_over() {
        let report = if controller.state().human_is_batting() {
            controller.human_bat()
        } else if let Some(delivery) = request.human_delivery {
            controller.human_bowl(delivery)
        } else {
            controller.autoplay_ball()
        }
        .map_err(rejected)?;
        balls.push(report);
    }

    let state = controller.state();
    let outcome = state
        .outcome
        .ok_or_else(|| err_code(error_codes::NO_RESULT, "match ended without a result"))?;
    log::info!(
        "Simulated match {} (seed {}): {}",
        state.match_id,
        request.seed,
        outcome.summary()
    );

    Ok(MatchResponse {
        schema_version: SCHEMA_VERSION,
        match_id: state.match_id,
        seed: request.seed,
        overs,
        opponent_table,
        toss,
        batting_first: state.first_batting.unwrap_or(Side::Human),
        target: state.target.unwrap_or_default(),
        human: state.human,
        opponent: state.opponent,
        outcome,
        summary: outcome.summary(),
        scoreboard: controller.scoreboard(),
        balls: if request.include_balls { balls } else { Vec::new() },
        log: controller.log().entries().to_vec(),
    })
}

/// JSON entry point: config comes from `CRICKET_CONFIG_PATH` when set.
pub fn simulate_match_json(request_json: &str) -> Result<String, String> {
    let request: MatchRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_JSON, e))?;
    let base = MatchConfig::from_env().map_err(config_error)?;
    let response = simulate_match(&request, base)?;
    serde_json::to_string(&response).map_err(|e| err_code(error_codes::SERIALIZATION_FAILED, e))
}
