//! Property tests over whole seeded matches.

use proptest::prelude::*;

use super::controller::MatchController;
use super::state::{InningsTransition, MatchOutcome};
use crate::config::{MatchConfig, OpponentTable};
use crate::models::{BowlingLine, Delivery, Side, SpeedLevel};

fn table_strategy() -> impl Strategy<Value = OpponentTable> {
    prop_oneof![Just(OpponentTable::SourceParity), Just(OpponentTable::Normalized)]
}

fn delivery_strategy() -> impl Strategy<Value = Delivery> {
    (0usize..3, 0usize..3)
        .prop_map(|(s, l)| Delivery::new(SpeedLevel::ALL[s], BowlingLine::ALL[l]))
}

proptest! {
    /// Property: counters stay in bounds, only grow within an innings, the
    /// target is fixed once and the match ends exactly on a terminal rule.
    #[test]
    fn prop_match_invariants(
        seed in any::<u64>(),
        overs in prop::sample::select(vec![1u8, 2, 3, 5]),
        wickets in 1u8..=5,
        table in table_strategy(),
        bowl_by_hand in any::<bool>(),
        delivery in delivery_strategy(),
    ) {
        let config = MatchConfig {
            overs,
            wickets_per_innings: wickets,
            opponent_table: table,
            ..MatchConfig::default()
        };
        let total_balls = config.total_balls();
        let mut ctl = MatchController::seeded(config, seed).unwrap();
        let toss = ctl.toss().unwrap();
        let first = toss.batting_first;

        let mut last_balls = 0;
        let mut last_wickets = 0;
        let mut first_innings_runs = None;
        let mut balls_played = 0;

        while !ctl.state().is_match_over() {
            let report = if ctl.state().human_is_batting() {
                ctl.human_bat().unwrap()
            } else if bowl_by_hand {
                ctl.human_bowl(delivery).unwrap()
            } else {
                ctl.autoplay_ball().unwrap()
            };
            balls_played += 1;
            prop_assert!(balls_played <= 2 * total_balls);
            prop_assert!(matches!(report.outcome.runs(), 0 | 1 | 2 | 4 | 6));

            let tally = *ctl.state().tally(report.batting);
            prop_assert!(tally.balls <= total_balls);
            prop_assert!(tally.wickets <= wickets as u32);

            match report.transition {
                InningsTransition::Continue => {
                    prop_assert!(tally.balls > last_balls);
                    prop_assert!(tally.wickets >= last_wickets);
                    last_balls = tally.balls;
                    last_wickets = tally.wickets;
                }
                InningsTransition::InningsComplete { target, next_batting } => {
                    prop_assert_eq!(report.batting, first);
                    prop_assert_eq!(next_batting, first.other());
                    prop_assert!(tally.balls == total_balls || tally.wickets == wickets as u32);
                    prop_assert_eq!(target, tally.runs + 1);
                    prop_assert!(first_innings_runs.is_none());
                    first_innings_runs = Some(tally.runs);

                    let chasing = ctl.state().tally(next_batting);
                    prop_assert_eq!(chasing.balls, 0);
                    prop_assert_eq!(chasing.wickets, 0);
                    last_balls = 0;
                    last_wickets = 0;
                }
                InningsTransition::MatchComplete(outcome) => {
                    prop_assert_eq!(report.batting, first.other());
                    let target = ctl.state().target.unwrap();
                    prop_assert!(
                        tally.balls == total_balls
                            || tally.wickets == wickets as u32
                            || tally.runs >= target
                    );
                    let human = ctl.state().human.runs;
                    let opponent = ctl.state().opponent.runs;
                    prop_assert_eq!(outcome, MatchOutcome::decide(human, opponent));
                }
            }

            if let Some(runs) = first_innings_runs {
                prop_assert_eq!(ctl.state().target, Some(runs + 1));
                prop_assert_eq!(ctl.state().tally(first).runs, runs);
            }
        }

        let outcome = ctl.outcome().unwrap();
        match outcome.winner() {
            Some(Side::Human) => {
                prop_assert!(ctl.state().human.runs > ctl.state().opponent.runs);
            }
            Some(Side::Opponent) => {
                prop_assert!(ctl.state().opponent.runs > ctl.state().human.runs);
            }
            None => {
                prop_assert_eq!(ctl.state().human.runs, ctl.state().opponent.runs);
            }
        }
    }

    /// Property: a chase that reaches the target always wins it.
    #[test]
    fn prop_reaching_target_wins(seed in any::<u64>()) {
        let mut ctl = MatchController::seeded(MatchConfig::default(), seed).unwrap();
        ctl.toss().unwrap();
        while !ctl.state().is_match_over() {
            if ctl.state().human_is_batting() {
                ctl.human_bat().unwrap();
            } else {
                ctl.autoplay_ball().unwrap();
            }
        }
        let state = ctl.state();
        let target = state.target.unwrap();
        let chaser = state.batting;
        if state.tally(chaser).runs >= target {
            prop_assert_eq!(ctl.outcome().unwrap().winner(), Some(chaser));
        }
    }
}
