//! Match controller
//!
//! Owns the match state and is the only thing that mutates it. Every
//! request is guarded: a request that does not fit the current phase,
//! batting side or action status is refused with an `ActionRejected`
//! and leaves the state untouched.
//!
//! Human actions come in two halves so a front end can animate the
//! delivery in between: `begin_bat`/`begin_bowl` put the controller in
//! `AwaitingOutcome`, `complete_pending` resolves the ball. `human_bat` and
//! `human_bowl` do both in one call.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::draws::{DrawSource, RngDraws};
use super::resolver::{OutcomeResolver, Resolution};
use super::state::{InningsTransition, MatchOutcome, MatchPhase, MatchState};
use super::toss::TossOutcome;
use crate::config::MatchConfig;
use crate::error::{ActionRejected, Result};
use crate::models::{BallOutcome, Delivery, EventKind, EventLog, ScoreboardSnapshot, Side};

/// A delivery that has been started but not yet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PendingAction {
    /// Human swings at a ball from the opponent
    Bat,
    /// Human bowls to the opponent
    Bowl { delivery: Delivery },
    /// Opponent bats against a drawn delivery
    Autoplay { delivery: Delivery },
}

impl PendingAction {
    pub fn batting(&self) -> Side {
        match self {
            PendingAction::Bat => Side::Human,
            PendingAction::Bowl { .. } | PendingAction::Autoplay { .. } => Side::Opponent,
        }
    }

    pub fn delivery(&self) -> Option<Delivery> {
        match *self {
            PendingAction::Bat => None,
            PendingAction::Bowl { delivery } | PendingAction::Autoplay { delivery } => {
                Some(delivery)
            }
        }
    }

    /// Overlay shown while the ball is in the air.
    pub fn overlay(&self) -> &'static str {
        match self {
            PendingAction::Bat => "Ball delivered...",
            PendingAction::Bowl { .. } => "You bowl...",
            PendingAction::Autoplay { .. } => "AI batting...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionStatus {
    Idle,
    AwaitingOutcome(PendingAction),
}

/// Everything a front end needs to show after one ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallReport {
    pub batting: Side,
    /// 1-based ball number within the innings
    pub ball_number: u32,
    pub delivery: Option<Delivery>,
    pub draw: f64,
    pub outcome: BallOutcome,
    /// Per-ball overlay, e.g. `WICKET!` or `+4`
    pub overlay: String,
    pub transition: InningsTransition,
    /// Innings or match announcement, when the ball ended one
    pub announcement: Option<String>,
    pub scoreboard: ScoreboardSnapshot,
}

pub struct MatchController<D: DrawSource = RngDraws> {
    config: MatchConfig,
    state: MatchState,
    resolver: OutcomeResolver,
    draws: D,
    status: ActionStatus,
    toss: Option<TossOutcome>,
    mode_text: String,
    log: EventLog,
}

impl MatchController<RngDraws> {
    /// Controller with a ChaCha8 draw source seeded from `seed`.
    pub fn seeded(config: MatchConfig, seed: u64) -> Result<Self> {
        Self::new(config, RngDraws::seeded(seed))
    }
}

impl<D: DrawSource> MatchController<D> {
    pub fn new(config: MatchConfig, draws: D) -> Result<Self> {
        config.validate()?;
        let mut controller = Self {
            state: MatchState::new(&config),
            resolver: OutcomeResolver::new(config.opponent_table),
            config,
            draws,
            status: ActionStatus::Idle,
            toss: None,
            mode_text: String::new(),
            log: EventLog::new(),
        };
        controller.reset();
        Ok(controller)
    }

    // ========================
    // Accessors
    // ========================

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn status(&self) -> ActionStatus {
        self.status
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn toss_outcome(&self) -> Option<&TossOutcome> {
        self.toss.as_ref()
    }

    /// Status line: who bats, what the chase is.
    pub fn mode_text(&self) -> &str {
        &self.mode_text
    }

    pub fn scoreboard(&self) -> ScoreboardSnapshot {
        self.state.scoreboard()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.state.outcome
    }

    pub fn draws_mut(&mut self) -> &mut D {
        &mut self.draws
    }

    // ========================
    // Match lifecycle
    // ========================

    /// Discards the current match and starts a new one with `overs`.
    pub fn new_match(&mut self, overs: u8) -> Result<()> {
        self.config.check_overs(overs)?;
        self.config.overs = overs;
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.state = MatchState::new(&self.config);
        self.status = ActionStatus::Idle;
        self.toss = None;
        self.mode_text.clear();
        self.log = EventLog::new();
        self.log.push(EventKind::MatchCreated, "New match created");
        info!(
            "New match {} ({} overs, {} wickets)",
            self.state.match_id, self.config.overs, self.config.wickets_per_innings
        );
    }

    pub fn toss(&mut self) -> std::result::Result<TossOutcome, ActionRejected> {
        if self.state.phase != MatchPhase::AwaitingToss {
            return Err(ActionRejected::TossAlreadyTaken);
        }

        let toss = TossOutcome::flip(&mut self.draws);
        self.state.batting = toss.batting_first;
        self.state.first_batting = Some(toss.batting_first);
        self.state.phase = MatchPhase::InProgress;
        self.toss = Some(toss);
        self.mode_text = toss.mode_text().to_string();

        self.log.push(
            EventKind::Toss,
            format!("Toss: {}. {}", toss.coin, if toss.human_wins { "You won" } else { "You lost" }),
        );
        self.log.push(
            EventKind::Toss,
            if toss.human_wins { "You elected to bat first" } else { "Opponent will bat first" },
        );
        info!("Match {}: {} bats first", self.state.match_id, toss.batting_first);
        Ok(toss)
    }

    /// Starts play with `batting_first` at the crease, skipping the coin.
    pub fn start_without_toss(
        &mut self,
        batting_first: Side,
    ) -> std::result::Result<(), ActionRejected> {
        if self.state.phase != MatchPhase::AwaitingToss {
            return Err(ActionRejected::TossAlreadyTaken);
        }

        self.state.batting = batting_first;
        self.state.first_batting = Some(batting_first);
        self.state.phase = MatchPhase::InProgress;
        self.mode_text = match batting_first {
            Side::Human => "You bat first".to_string(),
            Side::Opponent => "Opponent bats first".to_string(),
        };
        self.log.push(EventKind::Toss, format!("No toss: {} bats first", batting_first.team_name()));
        info!("Match {}: {} bats first (no toss)", self.state.match_id, batting_first);
        Ok(())
    }

    // ========================
    // Actions
    // ========================

    fn guard_in_play(&self) -> std::result::Result<(), ActionRejected> {
        match self.state.phase {
            MatchPhase::AwaitingToss => return Err(ActionRejected::TossPending),
            MatchPhase::Complete => return Err(ActionRejected::MatchOver),
            MatchPhase::InProgress => {}
        }
        if let ActionStatus::AwaitingOutcome(_) = self.status {
            return Err(ActionRejected::ActionPending);
        }
        Ok(())
    }

    pub(crate) fn guard_opponent_batting(&self) -> std::result::Result<(), ActionRejected> {
        self.guard_in_play()?;
        if self.state.batting != Side::Opponent {
            return Err(ActionRejected::NotBowling(Side::Human));
        }
        Ok(())
    }

    pub fn begin_bat(&mut self) -> std::result::Result<PendingAction, ActionRejected> {
        self.guard_in_play()?;
        if self.state.batting != Side::Human {
            return Err(ActionRejected::NotBatting(Side::Human));
        }
        Ok(self.set_pending(PendingAction::Bat))
    }

    pub fn begin_bowl(
        &mut self,
        delivery: Delivery,
    ) -> std::result::Result<PendingAction, ActionRejected> {
        self.guard_opponent_batting()?;
        Ok(self.set_pending(PendingAction::Bowl { delivery }))
    }

    fn set_pending(&mut self, action: PendingAction) -> PendingAction {
        self.status = ActionStatus::AwaitingOutcome(action);
        action
    }

    /// Resolves the ball started by `begin_bat` or `begin_bowl`.
    pub fn complete_pending(&mut self) -> std::result::Result<BallReport, ActionRejected> {
        let ActionStatus::AwaitingOutcome(action) = self.status else {
            return Err(ActionRejected::NothingPending);
        };
        self.status = ActionStatus::Idle;
        Ok(self.play_ball(action))
    }

    /// One ball for the human batting side.
    pub fn human_bat(&mut self) -> std::result::Result<BallReport, ActionRejected> {
        self.begin_bat()?;
        self.complete_pending()
    }

    /// One ball bowled by the human to the opponent.
    pub fn human_bowl(
        &mut self,
        delivery: Delivery,
    ) -> std::result::Result<BallReport, ActionRejected> {
        self.begin_bowl(delivery)?;
        self.complete_pending()
    }

    /// One ball of the opponent batting against a randomly drawn delivery.
    pub fn autoplay_ball(&mut self) -> std::result::Result<BallReport, ActionRejected> {
        self.guard_opponent_batting()?;
        let delivery = OutcomeResolver::random_delivery(&mut self.draws);
        Ok(self.play_ball(PendingAction::Autoplay { delivery }))
    }

    // ========================
    // Ball resolution
    // ========================

    fn play_ball(&mut self, action: PendingAction) -> BallReport {
        let side = action.batting();
        debug_assert_eq!(side, self.state.batting);

        let Resolution { draw, outcome } = match action.delivery() {
            None => self.resolver.resolve_human_batting(&mut self.draws),
            Some(delivery) => self.resolver.resolve_opponent_batting(delivery, &mut self.draws),
        };

        let recorded = self.state.record_ball(side, outcome);
        debug_assert!(recorded, "guards admitted a ball after the innings ended");
        let ball_number = self.state.tally(side).balls;
        let chasing = self.state.inning == 2;

        if self.config.trace_balls_enabled() {
            debug!(
                "[BALL] {} #{} draw={:.4} delivery={:?} -> {}",
                side, ball_number, draw, action.delivery(), outcome
            );
        }

        let (message, overlay) = ball_texts(action, outcome, chasing);
        let kind = if outcome.is_wicket() { EventKind::Wicket } else { EventKind::Ball };
        self.log.push(kind, message);

        let transition = self.state.check_after_ball();
        let announcement = self.announce(transition, side);

        BallReport {
            batting: side,
            ball_number,
            delivery: action.delivery(),
            draw,
            outcome,
            overlay,
            transition,
            announcement,
            scoreboard: self.state.scoreboard(),
        }
    }

    fn announce(&mut self, transition: InningsTransition, finished: Side) -> Option<String> {
        match transition {
            InningsTransition::Continue => None,
            InningsTransition::InningsComplete { target, next_batting } => {
                let (log_line, overlay) = match finished {
                    Side::Human => (
                        format!("End of Innings. Target for AI: {target}"),
                        format!("End of innings. AI chase {target}"),
                    ),
                    Side::Opponent => (
                        format!("AI finished first innings. Target {target}"),
                        format!("Target {target} — You bat now"),
                    ),
                };
                self.mode_text = match next_batting {
                    Side::Human => format!("Chase: Target {target}"),
                    Side::Opponent => format!("AI chasing Target {target}"),
                };
                self.log.push(EventKind::InningsEnd, log_line);
                info!("Match {}: innings over, target {}", self.state.match_id, target);
                Some(overlay)
            }
            InningsTransition::MatchComplete(outcome) => {
                let summary = outcome.summary();
                self.mode_text = summary.clone();
                self.log.push(EventKind::MatchEnd, format!("Match over: {summary}"));
                info!("Match {}: {}", self.state.match_id, summary);
                Some(summary)
            }
        }
    }
}

/// Log line and overlay for one ball.
fn ball_texts(action: PendingAction, outcome: BallOutcome, chasing: bool) -> (String, String) {
    let chase_suffix = if chasing { " (chase)" } else { "" };
    match (action, outcome) {
        (PendingAction::Bat, BallOutcome::Wicket) => {
            ("OUT! (Got bowled)".to_string(), "WICKET!".to_string())
        }
        (PendingAction::Bat, BallOutcome::Runs(v)) => {
            (format!("Runs: {}", v.runs()), format!("+{}", v.runs()))
        }
        (PendingAction::Bowl { .. }, BallOutcome::Wicket) => {
            ("You took a wicket!".to_string(), "WICKET!".to_string())
        }
        (PendingAction::Bowl { .. }, BallOutcome::Runs(v)) => {
            (format!("AI scored {}", v.runs()), format!("AI +{}", v.runs()))
        }
        (PendingAction::Autoplay { .. }, BallOutcome::Wicket) => {
            (format!("AI lost a wicket{chase_suffix}"), "WICKET!".to_string())
        }
        (PendingAction::Autoplay { .. }, BallOutcome::Runs(v)) => {
            (format!("AI +{}{chase_suffix}", v.runs()), format!("AI +{}", v.runs()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OpponentTable;
    use crate::engine::draws::ScriptedDraws;
    use crate::models::{BowlingLine, RunValue, SpeedLevel};

    /// Toss draws that hand the bat to the human.
    const HUMAN_WINS_TOSS: [f64; 2] = [0.1, 0.1];
    /// Toss draws that send the opponent in.
    const HUMAN_LOSES_TOSS: [f64; 2] = [0.1, 0.9];

    // human table
    const H_WICKET: f64 = 0.05;
    const H_DOT: f64 = 0.2;
    const H_ONE: f64 = 0.5;

    // opponent parity table, medium pace outside off
    const O_DOT: f64 = 0.2;
    const O_ONE: f64 = 0.5;
    const O_TWO: f64 = 0.9;

    fn medium_off() -> Delivery {
        Delivery::new(SpeedLevel::Medium, BowlingLine::Off)
    }

    fn controller(draws: impl IntoIterator<Item = f64>) -> MatchController<ScriptedDraws> {
        MatchController::new(MatchConfig::default(), ScriptedDraws::new(draws)).unwrap()
    }

    fn script(toss: [f64; 2], balls: &[f64]) -> Vec<f64> {
        toss.iter().chain(balls.iter()).copied().collect()
    }

    #[test]
    fn actions_before_toss_are_rejected() {
        let mut ctl = controller([0.5]);
        assert_eq!(ctl.human_bat().unwrap_err(), ActionRejected::TossPending);
        assert_eq!(ctl.human_bowl(medium_off()).unwrap_err(), ActionRejected::TossPending);
        assert_eq!(ctl.autoplay_ball().unwrap_err(), ActionRejected::TossPending);
        assert_eq!(ctl.state().human.balls, 0);
    }

    #[test]
    fn toss_only_once() {
        let mut ctl = controller(HUMAN_WINS_TOSS);
        let toss = ctl.toss().unwrap();
        assert!(toss.human_wins);
        assert_eq!(ctl.mode_text(), "You elected to bat first");
        assert_eq!(ctl.toss().unwrap_err(), ActionRejected::TossAlreadyTaken);
    }

    #[test]
    fn wrong_side_requests_are_rejected() {
        let mut ctl = controller(script(HUMAN_WINS_TOSS, &[H_ONE]));
        ctl.toss().unwrap();
        assert_eq!(
            ctl.human_bowl(medium_off()).unwrap_err(),
            ActionRejected::NotBowling(Side::Human)
        );
        assert_eq!(ctl.autoplay_ball().unwrap_err(), ActionRejected::NotBowling(Side::Human));

        let mut ctl = controller(script(HUMAN_LOSES_TOSS, &[O_ONE]));
        ctl.toss().unwrap();
        assert_eq!(ctl.human_bat().unwrap_err(), ActionRejected::NotBatting(Side::Human));
    }

    #[test]
    fn pending_action_blocks_new_requests() {
        let mut ctl = controller(script(HUMAN_WINS_TOSS, &[H_ONE]));
        ctl.toss().unwrap();

        assert_eq!(ctl.begin_bat().unwrap(), PendingAction::Bat);
        assert_eq!(ctl.status(), ActionStatus::AwaitingOutcome(PendingAction::Bat));
        assert_eq!(ctl.human_bat().unwrap_err(), ActionRejected::ActionPending);
        assert_eq!(ctl.begin_bat().unwrap_err(), ActionRejected::ActionPending);
        assert_eq!(ctl.state().human.balls, 0);

        let report = ctl.complete_pending().unwrap();
        assert_eq!(report.outcome, BallOutcome::Runs(RunValue::One));
        assert_eq!(ctl.status(), ActionStatus::Idle);
        assert_eq!(ctl.complete_pending().unwrap_err(), ActionRejected::NothingPending);
    }

    #[test]
    fn human_bats_first_and_opponent_chases_down_target() {
        // 10 runs off 12 balls: ten singles and two dots
        let mut human = vec![H_ONE; 10];
        human.extend([H_DOT, H_DOT]);
        // 11 runs off 9 balls: a two, seven singles, a two
        let mut opponent = vec![O_TWO];
        opponent.extend([O_ONE; 7]);
        opponent.push(O_TWO);

        let mut ctl = controller(script(HUMAN_WINS_TOSS, &[human, opponent].concat()));
        ctl.toss().unwrap();

        for ball in 1..=11 {
            let report = ctl.human_bat().unwrap();
            assert_eq!(report.ball_number, ball);
            assert_eq!(report.transition, InningsTransition::Continue);
        }
        let last = ctl.human_bat().unwrap();
        assert_eq!(
            last.transition,
            InningsTransition::InningsComplete { target: 11, next_batting: Side::Opponent }
        );
        assert_eq!(ctl.state().human.runs, 10);
        assert_eq!(ctl.state().target, Some(11));
        assert_eq!(ctl.mode_text(), "AI chasing Target 11");

        for _ in 1..=8 {
            let report = ctl.human_bowl(medium_off()).unwrap();
            assert_eq!(report.transition, InningsTransition::Continue);
        }
        let winning = ctl.human_bowl(medium_off()).unwrap();
        assert_eq!(winning.ball_number, 9);
        assert_eq!(
            winning.transition,
            InningsTransition::MatchComplete(MatchOutcome::OpponentWin {
                human: 10,
                opponent: 11
            })
        );
        assert_eq!(winning.announcement.as_deref(), Some("You lose. 11 - 10"));
        assert_eq!(ctl.state().opponent.balls, 9);
        assert_eq!(ctl.human_bowl(medium_off()).unwrap_err(), ActionRejected::MatchOver);
        assert_eq!(ctl.state().target, Some(11));
    }

    #[test]
    fn three_wickets_on_ball_five_end_first_innings() {
        let balls = [H_ONE, H_WICKET, H_ONE, H_WICKET, H_WICKET];
        let mut ctl = controller(script(HUMAN_WINS_TOSS, &balls));
        ctl.toss().unwrap();

        let reports: Vec<BallReport> = (0..5).map(|_| ctl.human_bat().unwrap()).collect();
        assert!(reports[..4].iter().all(|r| !r.transition.ends_innings()));
        assert_eq!(
            reports[4].transition,
            InningsTransition::InningsComplete { target: 3, next_batting: Side::Opponent }
        );
        assert_eq!(ctl.state().human.balls, 5);
        assert_eq!(ctl.state().human.wickets, 3);
        assert_eq!(ctl.state().target, Some(3));
        assert_eq!(ctl.human_bat().unwrap_err(), ActionRejected::NotBatting(Side::Human));
    }

    #[test]
    fn opponent_batting_first_hands_chase_to_human() {
        // autoplay ball = speed draw, line draw, outcome draw
        let autoplay_dot = [0.5, 0.5, O_DOT];
        let balls: Vec<f64> = autoplay_dot.iter().copied().cycle().take(36).collect();
        let mut ctl = controller(script(HUMAN_LOSES_TOSS, &balls));
        ctl.toss().unwrap();
        assert_eq!(ctl.mode_text(), "Opponent bats first");

        let mut last = None;
        for _ in 0..12 {
            last = Some(ctl.autoplay_ball().unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last.delivery, Some(medium_off()));
        assert_eq!(
            last.transition,
            InningsTransition::InningsComplete { target: 1, next_batting: Side::Human }
        );
        assert_eq!(last.announcement.as_deref(), Some("Target 1 — You bat now"));
        assert_eq!(ctl.mode_text(), "Chase: Target 1");
        assert!(ctl.state().human_is_batting());
    }

    #[test]
    fn log_records_every_ball_and_result() {
        let mut ctl = controller(script(HUMAN_WINS_TOSS, &[H_WICKET; 3]));
        ctl.toss().unwrap();
        for _ in 0..3 {
            ctl.human_bat().unwrap();
        }
        let log = ctl.log();
        assert_eq!(log.count(EventKind::MatchCreated), 1);
        assert_eq!(log.count(EventKind::Toss), 2);
        assert_eq!(log.count(EventKind::Wicket), 3);
        assert_eq!(log.count(EventKind::InningsEnd), 1);
        assert_eq!(
            log.last().map(|e| e.message.as_str()),
            Some("End of Innings. Target for AI: 1")
        );
    }

    #[test]
    fn start_without_toss_sets_batting_side() {
        let mut ctl = controller(script(HUMAN_WINS_TOSS, &[O_ONE]));
        ctl.start_without_toss(Side::Opponent).unwrap();
        assert!(ctl.toss_outcome().is_none());
        assert_eq!(ctl.state().first_batting, Some(Side::Opponent));
        assert_eq!(ctl.toss().unwrap_err(), ActionRejected::TossAlreadyTaken);
        assert_eq!(
            ctl.start_without_toss(Side::Human).unwrap_err(),
            ActionRejected::TossAlreadyTaken
        );
        // first scripted draw feeds the ball, not a coin
        let report = ctl.human_bowl(medium_off()).unwrap();
        assert_eq!(report.draw, 0.1);
    }

    #[test]
    fn new_match_resets_everything() {
        let mut ctl = controller(script(HUMAN_WINS_TOSS, &[H_ONE]));
        ctl.toss().unwrap();
        ctl.human_bat().unwrap();
        let first_id = ctl.state().match_id;

        ctl.new_match(5).unwrap();
        assert_ne!(ctl.state().match_id, first_id);
        assert_eq!(ctl.state().phase, MatchPhase::AwaitingToss);
        assert_eq!(ctl.state().total_balls(), 30);
        assert_eq!(ctl.state().human.runs, 0);
        assert_eq!(ctl.log().len(), 1);
        assert!(ctl.toss_outcome().is_none());
    }

    #[test]
    fn new_match_rejects_unoffered_overs() {
        let mut ctl = controller([0.5]);
        assert!(ctl.new_match(4).is_err());
        assert_eq!(ctl.config().overs, 2);
    }

    #[test]
    fn normalized_table_reaches_boundaries() {
        let config = MatchConfig::default().with_opponent_table(OpponentTable::Normalized);
        let delivery = Delivery::new(SpeedLevel::Slow, BowlingLine::Center);
        let draws = ScriptedDraws::new(script(HUMAN_LOSES_TOSS, &[0.99]));
        let mut ctl = MatchController::new(config, draws).unwrap();
        ctl.toss().unwrap();

        let report = ctl.human_bowl(delivery).unwrap();
        assert_eq!(report.outcome, BallOutcome::Runs(RunValue::Six));
        assert_eq!(report.overlay, "AI +6");
    }

    #[test]
    fn seeded_controllers_agree() {
        let play = |seed| {
            let mut ctl = MatchController::seeded(MatchConfig::default(), seed).unwrap();
            ctl.toss().unwrap();
            while !ctl.state().is_match_over() {
                if ctl.state().human_is_batting() {
                    ctl.human_bat().unwrap();
                } else {
                    ctl.autoplay_ball().unwrap();
                }
            }
            (ctl.state().human, ctl.state().opponent, ctl.outcome())
        };
        assert_eq!(play(2024), play(2024));
    }
}
