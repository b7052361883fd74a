//! Match engine: draws, outcome tables, state machine and autoplay.

pub mod autoplay;
pub mod controller;
pub mod draws;
pub mod resolver;
pub mod state;
pub mod toss;

#[cfg(test)]
mod proptests;

pub use autoplay::{
    AutoplaySession, AutoplayStep, AutoplaySummary, NoPacing, Pacer, RecordingPacer,
    ThreadSleepPacer,
};
pub use controller::{ActionStatus, BallReport, MatchController, PendingAction};
pub use draws::{DrawSource, RngDraws, ScriptedDraws};
pub use resolver::{
    human_batting_outcome, opponent_outcome_normalized, opponent_outcome_source_parity,
    OpponentChances, OutcomeResolver, Resolution,
};
pub use state::{InningsTally, InningsTransition, MatchOutcome, MatchPhase, MatchState};
pub use toss::{Coin, TossOutcome};
