//! Autoplay: the scripted side batting on its own.
//!
//! A session resolves one ball per `step()`. `run()` keeps stepping until
//! the innings (or the match) ends, pausing between balls through a
//! `Pacer`, so tests and headless runs never wait on a clock.

use std::time::Duration;

use super::controller::{BallReport, MatchController};
use super::draws::DrawSource;
use super::state::InningsTransition;
use crate::error::ActionRejected;

/// Pause between autoplay balls.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&mut self, _delay: Duration) {}
}

/// Blocks the current thread for the full delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleepPacer;

impl Pacer for ThreadSleepPacer {
    fn pause(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Records requested delays instead of sleeping.
#[derive(Debug, Clone, Default)]
pub struct RecordingPacer {
    pub delays: Vec<Duration>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, delay: Duration) {
        self.delays.push(delay);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AutoplayStep {
    /// A ball was played and the opponent is still batting
    Ball(BallReport),
    /// The ball that ended the innings or the match
    Finished(BallReport),
}

impl AutoplayStep {
    pub fn report(&self) -> &BallReport {
        match self {
            AutoplayStep::Ball(report) | AutoplayStep::Finished(report) => report,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutoplaySummary {
    pub balls: Vec<BallReport>,
    pub transition: InningsTransition,
}

impl AutoplaySummary {
    pub fn runs(&self) -> u32 {
        self.balls.iter().map(|b| b.outcome.runs()).sum()
    }

    pub fn wickets(&self) -> usize {
        self.balls.iter().filter(|b| b.outcome.is_wicket()).count()
    }
}

pub struct AutoplaySession<'a, D: DrawSource> {
    controller: &'a mut MatchController<D>,
    finished: bool,
}

impl<'a, D: DrawSource> AutoplaySession<'a, D> {
    /// Fails with the controller's own refusal unless the opponent is
    /// batting and nothing is pending.
    pub fn start(controller: &'a mut MatchController<D>) -> Result<Self, ActionRejected> {
        controller.guard_opponent_batting()?;
        Ok(Self { controller, finished: false })
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Delay before the next ball.
    pub fn next_delay(&self) -> Duration {
        self.controller.config().pacing.delay(self.controller.state().is_chasing())
    }

    pub fn step(&mut self) -> Result<AutoplayStep, ActionRejected> {
        let report = self.controller.autoplay_ball()?;
        if report.transition.ends_innings() {
            self.finished = true;
            Ok(AutoplayStep::Finished(report))
        } else {
            Ok(AutoplayStep::Ball(report))
        }
    }

    /// Plays until the opponent's innings ends, pausing before every ball.
    /// `on_ball` sees each report as it happens.
    pub fn run_with(
        mut self,
        pacer: &mut impl Pacer,
        mut on_ball: impl FnMut(&BallReport),
    ) -> Result<AutoplaySummary, ActionRejected> {
        let mut balls = Vec::new();
        loop {
            pacer.pause(self.next_delay());
            let step = self.step()?;
            on_ball(step.report());
            match step {
                AutoplayStep::Ball(report) => balls.push(report),
                AutoplayStep::Finished(report) => {
                    let transition = report.transition;
                    balls.push(report);
                    return Ok(AutoplaySummary { balls, transition });
                }
            }
        }
    }

    pub fn run(self, pacer: &mut impl Pacer) -> Result<AutoplaySummary, ActionRejected> {
        self.run_with(pacer, |_| {})
    }
}
