//! Step-by-step JSON driver for a live match.
//!
//! A front end keeps one `MatchController` alive and feeds it one
//! `ActionRequest` at a time. Every call answers with an `ActionResponse`;
//! refused requests come back with `ok: false` and the rejection code
//! while the match is left as it was.

use serde::{Deserialize, Serialize};

use super::json_api::{err_code, error_code_for, error_codes, SCHEMA_VERSION};
use crate::engine::{
    ActionStatus, AutoplaySession, BallReport, DrawSource, MatchController, NoPacing,
    TossOutcome,
};
use crate::models::{BowlingLine, Delivery, LogEntry, ScoreboardSnapshot, SpeedLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionRequest {
    /// Defaults to the configured overs
    NewMatch {
        #[serde(default)]
        overs: Option<u8>,
    },
    Toss,
    Bat,
    Bowl {
        speed: SpeedLevel,
        line: BowlingLine,
    },
    AutoplayBall,
    /// Autoplays until the opponent's innings ends
    AutoplayInnings,
    GetScoreboard,
    GetLog {
        /// Only entries after this sequence number
        #[serde(default)]
        since: Option<u32>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub schema_version: u8,
    pub ok: bool,
    /// Error code, e.g. `NOT_BOWLING`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toss: Option<TossOutcome>,
    pub mode_text: String,
    pub status: ActionStatus,
    pub scoreboard: ScoreboardSnapshot,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub balls: Vec<BallReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<LogEntry>,
}

impl ActionResponse {
    fn current<D: DrawSource>(controller: &MatchController<D>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            ok: true,
            error: None,
            message: None,
            overlay: None,
            announcement: None,
            toss: None,
            mode_text: controller.mode_text().to_string(),
            status: controller.status(),
            scoreboard: controller.scoreboard(),
            balls: Vec::new(),
            log: Vec::new(),
        }
    }

    fn failed<D: DrawSource>(
        controller: &MatchController<D>,
        code: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            ok: false,
            error: Some(code.to_string()),
            message: Some(message.into()),
            ..Self::current(controller)
        }
    }

    fn with_balls(mut self, balls: Vec<BallReport>) -> Self {
        if let Some(last) = balls.last() {
            self.overlay = Some(last.overlay.clone());
            self.announcement = last.announcement.clone();
        }
        self.balls = balls;
        self
    }
}

/// Applies one request and reports the resulting state.
pub fn apply_action<D: DrawSource>(
    controller: &mut MatchController<D>,
    request: ActionRequest,
) -> ActionResponse {
    let result = match request {
        ActionRequest::NewMatch { overs } => {
            let overs = overs.unwrap_or(controller.config().overs);
            if let Err(e) = controller.new_match(overs) {
                return ActionResponse::failed(controller, error_code_for(&e), e.to_string());
            }
            Ok(ActionResponse::current(controller))
        }
        ActionRequest::Toss => controller.toss().map(|toss| ActionResponse {
            toss: Some(toss),
            overlay: Some(toss.result_text()),
            ..ActionResponse::current(controller)
        }),
        ActionRequest::Bat => controller
            .human_bat()
            .map(|ball| ActionResponse::current(controller).with_balls(vec![ball])),
        ActionRequest::Bowl { speed, line } => controller
            .human_bowl(Delivery::new(speed, line))
            .map(|ball| ActionResponse::current(controller).with_balls(vec![ball])),
        ActionRequest::AutoplayBall => controller
            .autoplay_ball()
            .map(|ball| ActionResponse::current(controller).with_balls(vec![ball])),
        ActionRequest::AutoplayInnings => AutoplaySession::start(controller)
            .and_then(|session| session.run(&mut NoPacing))
            .map(|summary| ActionResponse::current(controller).with_balls(summary.balls)),
        ActionRequest::GetScoreboard => Ok(ActionResponse::current(controller)),
        ActionRequest::GetLog { since } => {
            let entries = match since {
                Some(seq) => controller.log().since(seq),
                None => controller.log().entries(),
            };
            Ok(ActionResponse { log: entries.to_vec(), ..ActionResponse::current(controller) })
        }
    };

    result.unwrap_or_else(|rejected| {
        log::debug!("Rejected {}: {}", rejected.code(), rejected);
        ActionResponse::failed(controller, rejected.code(), rejected.to_string())
    })
}

/// JSON wrapper around `apply_action`. Always answers with a JSON object.
pub fn apply_action_json<D: DrawSource>(
    controller: &mut MatchController<D>,
    request_json: &str,
) -> String {
    let response = match serde_json::from_str::<ActionRequest>(request_json) {
        Ok(request) => apply_action(controller, request),
        Err(e) => ActionResponse::failed(controller, error_codes::INVALID_JSON, e.to_string()),
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        serde_json::json!({
            "schema_version": SCHEMA_VERSION,
            "ok": false,
            "error": error_codes::SERIALIZATION_FAILED,
            "message": err_code(error_codes::SERIALIZATION_FAILED, e),
        })
        .to_string()
    })
}
