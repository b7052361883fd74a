//! JSON boundary: headless simulation and a step-by-step session driver.
//! All functions speak `schema_version = 1`.

pub mod json_api;
pub mod session_json;

pub use json_api::{
    error_codes, simulate_match, simulate_match_json, MatchRequest, MatchResponse,
    SCHEMA_VERSION,
};
pub use session_json::{apply_action, apply_action_json, ActionRequest, ActionResponse};
