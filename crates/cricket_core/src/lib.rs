//! # cricket_core - Mini Cricket Match Engine
//!
//! Two-innings limited-overs cricket between a human side and a scripted
//! opponent, driven one ball at a time.
//!
//! ## Features
//! - Explicit match state machine with guarded actions
//! - Probability tables for human batting and opponent batting
//! - Injectable draw source (seeded ChaCha8 or scripted) for reproducible matches
//! - Paced autoplay for the opponent's innings
//! - JSON API for headless simulation and step-by-step sessions

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

// Re-export main API functions
pub use api::{
    apply_action, apply_action_json, simulate_match, simulate_match_json, ActionRequest,
    ActionResponse, MatchRequest, MatchResponse, SCHEMA_VERSION,
};
pub use config::{AutoplayPacing, MatchConfig, OpponentInningsMode, OpponentTable};
pub use error::{ActionRejected, CricketError, Result};

// Re-export engine types
pub use engine::{
    AutoplaySession, BallReport, DrawSource, InningsTransition, MatchController, MatchOutcome,
    MatchState, RngDraws, ScriptedDraws, TossOutcome,
};
pub use models::{BallOutcome, BowlingLine, Delivery, ScoreboardSnapshot, Side, SpeedLevel};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
