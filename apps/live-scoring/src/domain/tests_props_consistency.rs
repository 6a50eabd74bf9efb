//! Property-based tests for the scoring state machine invariants.

use proptest::prelude::*;

use crate::config::scoring::ScoringConfig;
use crate::domain::applicator::apply_event;
use crate::domain::events::EventEnvelope;
use crate::domain::ids::MatchId;
use crate::domain::innings::{InningStatus, InningsTracker};
use crate::domain::ledger::{BattingEntry, BowlingEntry, ScoreLedger};
use crate::domain::participants::{set_current_batsmen, set_current_bowler};
use crate::domain::state::MatchState;
use crate::domain::test_state_helpers::{add_batter, apply, ball, started_innings};
use crate::domain::{test_gens, test_prelude};
use crate::store::MatchStore;

fn squad() -> ScoreLedger {
    let mut ledger = ScoreLedger::new();
    for n in 1..=6u8 {
        ledger = ledger
            .add_batter(1, BattingEntry::new(format!("p{n}").into(), n))
            .expect("fresh batter");
    }
    for n in 1..=4u8 {
        ledger = ledger
            .add_bowler(1, BowlingEntry::new(format!("b{n}").into()))
            .expect("fresh bowler");
    }
    ledger
}

/// `started_innings` plus p3..=p6 waiting to bat.
fn full_order() -> MatchState {
    let mut state = started_innings();
    for n in 3..=6u8 {
        state = apply(&state, add_batter(&format!("p{n}"), n, false, false)).0;
    }
    state
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: Monotonic innings
    /// Once innings N is completed, no later request puts N back in play,
    /// and the pointer never moves backwards.
    #[test]
    fn prop_completed_innings_never_reopen(calls in test_gens::status_calls()) {
        let mut tracker = InningsTracker::new();
        let mut completed = std::collections::BTreeSet::new();

        for (status, target) in calls {
            let before = tracker.current_inning();
            if let Ok(next) = tracker.set_inning_status(status, target, None) {
                tracker = next;
            }
            prop_assert!(tracker.current_inning() >= before);
            if tracker.status() == InningStatus::Completed {
                completed.insert(tracker.current_inning());
            }
            if completed.contains(&tracker.current_inning()) {
                prop_assert_eq!(tracker.status(), InningStatus::Completed);
            }
        }
    }

    /// Property: At most one current bowler after any sequence of changes,
    /// including changes with a wrong previous id.
    #[test]
    fn prop_at_most_one_current_bowler(changes in test_gens::bowler_changes()) {
        let mut ledger = squad();
        for (bowler, previous) in changes {
            ledger = set_current_bowler(&ledger, 1, &bowler, previous.as_ref())
                .expect("all pool bowlers exist");
            let current: Vec<_> = ledger
                .innings(1)
                .unwrap()
                .bowling
                .iter()
                .filter(|b| b.is_current_bowler)
                .collect();
            prop_assert_eq!(current.len(), 1);
            prop_assert_eq!(&current[0].player_id, &bowler);
        }
    }

    /// Property: At most two current batters and at most one striker.
    #[test]
    fn prop_at_most_two_current_batters(pairs in test_gens::batter_pairs()) {
        let mut ledger = squad();
        for pair in pairs {
            if let Ok(next) = set_current_batsmen(&ledger, 1, &pair) {
                ledger = next;
            }
            let innings = ledger.innings(1).unwrap();
            let current = innings.batting.iter().filter(|e| e.is_currently_batting).count();
            let strikers = innings.batting.iter().filter(|e| e.is_striker).count();
            prop_assert!(current <= 2);
            prop_assert!(strikers <= 1);
        }
    }

    /// Property: Runs are conserved
    /// Team total always equals runs conceded by bowlers for legal balls.
    #[test]
    fn prop_legal_runs_balance(runs in prop::collection::vec(test_gens::runs(), 1..30)) {
        let mut state = started_innings();
        for (i, r) in runs.iter().enumerate() {
            let striker = state.striker(1).expect("pair intact").player_id.clone();
            let bowler = state.current_bowler(1).expect("bowler set").player_id.clone();
            let event = ball(striker.as_str(), bowler.as_str(), i as u32 + 1, *r);
            state = apply_event(&state, &event).expect("legal ball applies").0;
        }
        let innings = state.ledger.innings(1).unwrap();
        let conceded: u32 = innings.bowling.iter().map(|b| b.runs_conceded).sum();
        prop_assert_eq!(innings.total_runs(), conceded);
        prop_assert_eq!(innings.total_runs(), runs.iter().sum::<u32>());
        prop_assert_eq!(innings.legal_balls(), runs.len() as u32);
    }

    /// Property: The recent-event window never swallows a state change.
    /// Dispatching state-setting events through the store, resends
    /// included, ends in the same state as applying each one directly.
    #[test]
    fn prop_store_matches_direct_application(stream in test_gens::state_setting_stream()) {
        let mut store = MatchStore::new(MatchId::new("m-prop"), &ScoringConfig::default());
        store.load(full_order());
        let mut direct = full_order();

        for (event, resend) in stream {
            let copies = if resend { 2 } else { 1 };
            for _ in 0..copies {
                // Malformed pairs are rejected on both paths alike.
                let _ = store.dispatch(&EventEnvelope::local(event.clone()));
                if let Ok((next, _)) = apply_event(&direct, &event) {
                    direct = next;
                }
            }
            prop_assert_eq!(&*store.state(), &direct);
        }
    }
}
