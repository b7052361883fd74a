//! Match state record and the end-of-innings rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::config::MatchConfig;
use crate::models::{overs_notation, BallOutcome, ScoreboardSnapshot, Side};

/// Runs, wickets and legal balls for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsTally {
    pub runs: u32,
    pub wickets: u32,
    pub balls: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    AwaitingToss,
    InProgress,
    Complete,
}

/// Final result, decided by comparing total runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MatchOutcome {
    HumanWin { human: u32, opponent: u32 },
    OpponentWin { human: u32, opponent: u32 },
    Tie { runs: u32 },
}

impl MatchOutcome {
    pub fn decide(human: u32, opponent: u32) -> Self {
        match human.cmp(&opponent) {
            std::cmp::Ordering::Greater => MatchOutcome::HumanWin { human, opponent },
            std::cmp::Ordering::Less => MatchOutcome::OpponentWin { human, opponent },
            std::cmp::Ordering::Equal => MatchOutcome::Tie { runs: human },
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            MatchOutcome::HumanWin { .. } => Some(Side::Human),
            MatchOutcome::OpponentWin { .. } => Some(Side::Opponent),
            MatchOutcome::Tie { .. } => None,
        }
    }

    /// Result line shown at match end.
    pub fn summary(&self) -> String {
        match *self {
            MatchOutcome::HumanWin { human, opponent } => format!("You win! {human} - {opponent}"),
            MatchOutcome::OpponentWin { human, opponent } => {
                format!("You lose. {opponent} - {human}")
            }
            MatchOutcome::Tie { runs } => format!("Match tied: {runs} - {runs}"),
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// What `check_after_ball` decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum InningsTransition {
    /// Same side keeps batting.
    Continue,
    /// First innings over; `next_batting` now chases `target`.
    InningsComplete { target: u32, next_batting: Side },
    MatchComplete(MatchOutcome),
}

impl InningsTransition {
    pub fn ends_innings(&self) -> bool {
        !matches!(self, InningsTransition::Continue)
    }
}

/// The single mutable record of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub match_id: Uuid,
    pub overs: u8,
    pub balls_per_over: u8,
    pub wickets_per_innings: u8,
    pub human: InningsTally,
    pub opponent: InningsTally,
    /// 1 or 2
    pub inning: u8,
    pub target: Option<u32>,
    pub batting: Side,
    /// Set by the toss
    pub first_batting: Option<Side>,
    pub phase: MatchPhase,
    pub outcome: Option<MatchOutcome>,
}

impl MatchState {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            match_id: Uuid::new_v4(),
            overs: config.overs,
            balls_per_over: config.balls_per_over,
            wickets_per_innings: config.wickets_per_innings,
            human: InningsTally::default(),
            opponent: InningsTally::default(),
            inning: 1,
            target: None,
            batting: Side::Human,
            first_batting: None,
            phase: MatchPhase::AwaitingToss,
            outcome: None,
        }
    }

    pub fn total_balls(&self) -> u32 {
        self.overs as u32 * self.balls_per_over as u32
    }

    pub fn is_match_over(&self) -> bool {
        self.phase == MatchPhase::Complete
    }

    pub fn bowling(&self) -> Side {
        self.batting.other()
    }

    /// The human bats whenever the opponent does not.
    pub fn human_is_batting(&self) -> bool {
        self.batting == Side::Human
    }

    pub fn tally(&self, side: Side) -> &InningsTally {
        match side {
            Side::Human => &self.human,
            Side::Opponent => &self.opponent,
        }
    }

    fn tally_mut(&mut self, side: Side) -> &mut InningsTally {
        match side {
            Side::Human => &mut self.human,
            Side::Opponent => &mut self.opponent,
        }
    }

    pub fn batting_tally(&self) -> &InningsTally {
        self.tally(self.batting)
    }

    /// Second innings with the target still to get.
    pub fn is_chasing(&self) -> bool {
        self.inning == 2 && self.target.is_some()
    }

    /// Runs still needed by the chasing side, if any.
    pub fn runs_required(&self) -> Option<u32> {
        let target = self.target?;
        Some(target.saturating_sub(self.batting_tally().runs))
    }

    pub fn balls_remaining(&self) -> u32 {
        self.total_balls().saturating_sub(self.batting_tally().balls)
    }

    /// Records the outcome of one ball for `side`. Counters only; innings
    /// and match transitions happen in `check_after_ball`. A ball beyond
    /// the innings' allotment is ignored and returns false.
    pub(crate) fn record_ball(&mut self, side: Side, outcome: BallOutcome) -> bool {
        let total_balls = self.total_balls();
        let tally = self.tally_mut(side);
        if tally.balls >= total_balls {
            return false;
        }

        match outcome {
            BallOutcome::Wicket => tally.wickets += 1,
            BallOutcome::Runs(value) => tally.runs += value.runs(),
        }
        tally.balls += 1;
        true
    }

    /// Balls or wickets of the batting side exhausted.
    pub fn innings_exhausted(&self) -> bool {
        let tally = self.batting_tally();
        tally.balls >= self.total_balls() || tally.wickets >= self.wickets_per_innings as u32
    }

    pub fn target_reached(&self) -> bool {
        matches!(self.target, Some(target) if self.batting_tally().runs >= target)
    }

    /// Applies the end-of-innings and end-of-match rules after a ball.
    pub fn check_after_ball(&mut self) -> InningsTransition {
        if self.phase != MatchPhase::InProgress {
            return InningsTransition::Continue;
        }

        if self.inning == 1 {
            if !self.innings_exhausted() {
                return InningsTransition::Continue;
            }
            return self.finish_first_innings();
        }

        if self.innings_exhausted() || self.target_reached() {
            return InningsTransition::MatchComplete(self.finish_match());
        }
        InningsTransition::Continue
    }

    fn finish_first_innings(&mut self) -> InningsTransition {
        let target = self.batting_tally().runs + 1;
        self.target = Some(target);

        self.batting = self.batting.other();
        self.inning = 2;
        let chasing = self.tally_mut(self.batting);
        chasing.balls = 0;
        chasing.wickets = 0;

        InningsTransition::InningsComplete { target, next_batting: self.batting }
    }

    fn finish_match(&mut self) -> MatchOutcome {
        let outcome = MatchOutcome::decide(self.human.runs, self.opponent.runs);
        self.phase = MatchPhase::Complete;
        self.outcome = Some(outcome);
        outcome
    }

    pub fn scoreboard(&self) -> ScoreboardSnapshot {
        let tally = self.batting_tally();
        ScoreboardSnapshot {
            batting: self.batting,
            team_name: self.batting.team_name().to_string(),
            runs: tally.runs,
            wickets: tally.wickets,
            balls: tally.balls,
            overs: overs_notation(tally.balls, self.balls_per_over as u32),
            target: self.target,
            inning: self.inning,
            match_over: self.is_match_over(),
        }
    }
}
