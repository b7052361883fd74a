//! Outcome tables
//!
//! All functions are pure - they take a draw in `[0, 1)` and return an
//! outcome. `OutcomeResolver` only adds the draw source and the configured
//! opponent table.

use serde::{Deserialize, Serialize};

use super::draws::DrawSource;
use crate::config::OpponentTable;
use crate::models::{BallOutcome, BowlingLine, Delivery, RunValue, SpeedLevel};

// ============================================================================
// Human batting
// ============================================================================

/// Cumulative upper bounds for wicket, 0, 1, 2, 4; the rest is 6.
pub const HUMAN_THRESHOLDS: [f64; 5] = [0.10, 0.35, 0.65, 0.85, 0.95];

pub fn human_batting_outcome(draw: f64) -> BallOutcome {
    match draw {
        r if r < HUMAN_THRESHOLDS[0] => BallOutcome::Wicket,
        r if r < HUMAN_THRESHOLDS[1] => BallOutcome::Runs(RunValue::Dot),
        r if r < HUMAN_THRESHOLDS[2] => BallOutcome::Runs(RunValue::One),
        r if r < HUMAN_THRESHOLDS[3] => BallOutcome::Runs(RunValue::Two),
        r if r < HUMAN_THRESHOLDS[4] => BallOutcome::Runs(RunValue::Four),
        _ => BallOutcome::Runs(RunValue::Six),
    }
}

// ============================================================================
// Opponent batting
// ============================================================================

/// Upper bound of the 1-run band after wicket and dot are subtracted.
pub const OPPONENT_ONE_BAND: f64 = 0.45;
/// Upper bound of the 2-run band after wicket and dot are subtracted.
pub const OPPONENT_TWO_BAND: f64 = 0.75;

/// Per-delivery chances for the bands that depend on speed and line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpponentChances {
    pub wicket: f64,
    pub dot: f64,
    pub four: f64,
    pub six: f64,
}

impl OpponentChances {
    pub fn for_delivery(delivery: Delivery) -> Self {
        let fast = delivery.speed == SpeedLevel::Fast;
        let center = delivery.line == BowlingLine::Center;

        let wicket = 0.08
            + match delivery.speed {
                SpeedLevel::Fast => 0.06,
                SpeedLevel::Slow => -0.01,
                SpeedLevel::Medium => 0.0,
            };
        let dot = 0.22 + if fast { 0.10 } else { 0.0 };
        let four = 0.10 + if center { 0.12 } else { 0.0 };
        let six = 0.05 + if center && !fast { 0.06 } else { 0.0 };

        Self { wicket, dot, four, six }
    }

    /// Sum of every band width as declared, with the fixed 1/2-run bands.
    /// Always above 1.0, which is why the parity table never reaches its
    /// four and six bands.
    pub fn declared_total(&self) -> f64 {
        self.wicket + self.dot + OPPONENT_TWO_BAND + self.four + self.six
    }

    /// Probability mass of each outcome under the normalized table, in
    /// order wicket, 0, 1, 2, 4, 6. Sums to 1.0.
    pub fn normalized_masses(&self) -> [(BallOutcome, f64); 6] {
        let rest = (1.0 - self.wicket - self.dot - self.four - self.six).max(0.0);
        let one = rest * OPPONENT_ONE_BAND / OPPONENT_TWO_BAND;
        let two = rest - one;
        [
            (BallOutcome::Wicket, self.wicket),
            (BallOutcome::Runs(RunValue::Dot), self.dot),
            (BallOutcome::Runs(RunValue::One), one),
            (BallOutcome::Runs(RunValue::Two), two),
            (BallOutcome::Runs(RunValue::Four), self.four),
            (BallOutcome::Runs(RunValue::Six), self.six),
        ]
    }
}

/// The opponent table exactly as the classic game plays it.
pub fn opponent_outcome_source_parity(draw: f64, delivery: Delivery) -> BallOutcome {
    let chances = OpponentChances::for_delivery(delivery);

    let mut r = draw;
    if r < chances.wicket {
        return BallOutcome::Wicket;
    }
    r -= chances.wicket;
    if r < chances.dot {
        return BallOutcome::Runs(RunValue::Dot);
    }
    r -= chances.dot;

    if r < OPPONENT_ONE_BAND {
        BallOutcome::Runs(RunValue::One)
    } else if r < OPPONENT_TWO_BAND {
        BallOutcome::Runs(RunValue::Two)
    } else if r < OPPONENT_TWO_BAND + chances.four {
        BallOutcome::Runs(RunValue::Four)
    } else if r < 1.0 {
        BallOutcome::Runs(RunValue::Six)
    } else {
        BallOutcome::Runs(RunValue::One)
    }
}

/// Same bands with the 1/2-run share scaled to the mass left over.
pub fn opponent_outcome_normalized(draw: f64, delivery: Delivery) -> BallOutcome {
    let masses = OpponentChances::for_delivery(delivery).normalized_masses();

    let mut upper = 0.0;
    for (outcome, mass) in masses {
        upper += mass;
        if draw < upper {
            return outcome;
        }
    }
    // float slack at the very top of the range
    BallOutcome::Runs(RunValue::Six)
}

// ============================================================================
// Resolver
// ============================================================================

/// One resolved ball plus the draw that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub draw: f64,
    pub outcome: BallOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeResolver {
    table: OpponentTable,
}

impl OutcomeResolver {
    pub fn new(table: OpponentTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> OpponentTable {
        self.table
    }

    pub fn opponent_outcome(&self, draw: f64, delivery: Delivery) -> BallOutcome {
        match self.table {
            OpponentTable::SourceParity => opponent_outcome_source_parity(draw, delivery),
            OpponentTable::Normalized => opponent_outcome_normalized(draw, delivery),
        }
    }

    pub fn resolve_human_batting(&self, draws: &mut impl DrawSource) -> Resolution {
        let draw = draws.next_unit();
        Resolution { draw, outcome: human_batting_outcome(draw) }
    }

    pub fn resolve_opponent_batting(
        &self,
        delivery: Delivery,
        draws: &mut impl DrawSource,
    ) -> Resolution {
        let draw = draws.next_unit();
        Resolution { draw, outcome: self.opponent_outcome(draw, delivery) }
    }

    /// Random speed then random line, each uniform over three choices.
    pub fn random_delivery(draws: &mut impl DrawSource) -> Delivery {
        let speed = SpeedLevel::ALL[draws.next_index(SpeedLevel::ALL.len())];
        let line = BowlingLine::ALL[draws.next_index(BowlingLine::ALL.len())];
        Delivery { speed, line }
    }
}

impl Default for OutcomeResolver {
    fn default() -> Self {
        Self::new(OpponentTable::SourceParity)
    }
}
