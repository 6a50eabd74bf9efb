use crate::domain::applicator::{apply_event, Applied, BallApplied};
use crate::domain::events::{CurrentBatsmenSet, InningsAdvanced, ScoringEvent};
use crate::domain::innings::InningStatus;
use crate::domain::ledger::{BattingStatus, DismissalType};
use crate::domain::state::MatchState;
use crate::domain::test_state_helpers::{
    add_batter, apply, ball, change_bowler, extra, pid, started_innings, status, wicket,
};
use crate::errors::{NotFoundKind, ScoringError};

#[test]
fn boundary_credits_batter_and_bowler() {
    let (state, applied) = apply(&started_innings(), ball("p1", "b1", 1, 4));
    assert_eq!(
        applied,
        Applied::Ball(BallApplied {
            over_completed: false,
            strike_changed: false,
        })
    );
    let p1 = state.ledger.innings(1).unwrap().batter(&pid("p1")).unwrap();
    assert_eq!((p1.runs_scored, p1.balls_faced, p1.fours), (4, 1, 1));
    let b1 = state.current_bowler(1).unwrap();
    assert_eq!((b1.runs_conceded, b1.ball_number), (4, 1));
}

#[test]
fn odd_runs_rotate_strike() {
    let (state, applied) = apply(&started_innings(), ball("p1", "b1", 1, 1));
    assert!(matches!(
        applied,
        Applied::Ball(BallApplied {
            strike_changed: true,
            ..
        })
    ));
    assert_eq!(state.striker(1).unwrap().player_id, pid("p2"));

    let err = apply_event(&state, &ball("p1", "b1", 2, 0)).unwrap_err();
    assert!(matches!(err, ScoringError::InvalidTransition(_)), "{err:?}");
}

#[test]
fn over_completion_rotates_strike_and_is_reported() {
    let mut state = started_innings();
    for n in 1..=5 {
        state = apply(&state, ball("p1", "b1", n, 0)).0;
    }
    let (state, applied) = apply(&state, ball("p1", "b1", 6, 0));
    assert_eq!(
        applied,
        Applied::Ball(BallApplied {
            over_completed: true,
            strike_changed: true,
        })
    );
    assert_eq!(state.striker(1).unwrap().player_id, pid("p2"));
    assert_eq!(state.innings_score(1).unwrap().overs, "1.0");
}

#[test]
fn ball_number_gap_across_over_end_still_completes_over() {
    let mut state = started_innings();
    for n in 1..=5 {
        state = apply(&state, ball("p1", "b1", n, 0)).0;
    }
    let (state, applied) = apply(&state, ball("p1", "b1", 7, 0));
    assert!(matches!(
        applied,
        Applied::Ball(BallApplied {
            over_completed: true,
            ..
        })
    ));
    assert_eq!(state.striker(1).unwrap().player_id, pid("p2"));
}

#[test]
fn overflowing_runs_are_malformed_and_change_nothing() {
    let state = started_innings();
    let err = apply_event(&state, &extra("p1", "b1", 0, u32::MAX, true)).unwrap_err();
    assert!(matches!(err, ScoringError::Malformed(_)), "{err:?}");

    let (state, _) = apply(&state, ball("p1", "b1", 1, 2));
    let before = state.clone();
    let err = apply_event(&state, &ball("p1", "b1", 2, u32::MAX)).unwrap_err();
    assert!(matches!(err, ScoringError::Malformed(_)), "{err:?}");
    assert_eq!(state, before);
}

#[test]
fn single_off_last_ball_keeps_strike() {
    let mut state = started_innings();
    for n in 1..=5 {
        state = apply(&state, ball("p1", "b1", n, 0)).0;
    }
    let (state, applied) = apply(&state, ball("p1", "b1", 6, 1));
    assert_eq!(
        applied,
        Applied::Ball(BallApplied {
            over_completed: true,
            strike_changed: false,
        })
    );
    assert_eq!(state.striker(1).unwrap().player_id, pid("p1"));
}

#[test]
fn wide_is_extras_only() {
    let (state, _) = apply(&started_innings(), extra("p1", "b1", 0, 0, true));
    let innings = state.ledger.innings(1).unwrap();
    let p1 = innings.batter(&pid("p1")).unwrap();
    assert_eq!((p1.runs_scored, p1.balls_faced), (0, 0));
    let b1 = innings.bowler(&pid("b1")).unwrap();
    assert_eq!((b1.wides, b1.ball_number, b1.runs_conceded), (1, 0, 1));
    assert_eq!(innings.extras, 1);
    assert_eq!(innings.total_runs(), 1);
}

#[test]
fn no_ball_credits_runs_off_bat() {
    let (state, _) = apply(&started_innings(), extra("p1", "b1", 0, 4, false));
    let innings = state.ledger.innings(1).unwrap();
    let p1 = innings.batter(&pid("p1")).unwrap();
    assert_eq!((p1.runs_scored, p1.balls_faced, p1.fours), (4, 1, 1));
    let b1 = innings.bowler(&pid("b1")).unwrap();
    assert_eq!((b1.no_balls, b1.ball_number, b1.runs_conceded), (1, 0, 5));
    assert_eq!(innings.total_runs(), 5);
}

#[test]
fn replayed_ball_number_is_stale() {
    let state = apply(&started_innings(), ball("p1", "b1", 1, 2)).0;
    let err = apply_event(&state, &ball("p1", "b1", 1, 2)).unwrap_err();
    assert!(matches!(err, ScoringError::Stale(_)), "{err:?}");
}

#[test]
fn ball_requires_innings_in_progress() {
    let state = apply(&started_innings(), status(1, InningStatus::Break)).0;
    let err = apply_event(&state, &ball("p1", "b1", 1, 0)).unwrap_err();
    assert!(matches!(err, ScoringError::InvalidTransition(_)));

    let err = apply_event(&MatchState::default(), &ball("p1", "b1", 1, 0)).unwrap_err();
    assert!(matches!(err, ScoringError::InvalidTransition(_)));
}

#[test]
fn ball_from_waiting_bowler_switches_current() {
    let (state, _) = apply(&started_innings(), ball("p1", "b2", 1, 0));
    assert_eq!(state.current_bowler(1).unwrap().player_id, pid("b2"));
    let bowling = state.bowling_card(1);
    assert_eq!(bowling.iter().filter(|b| b.is_current_bowler).count(), 1);
}

#[test]
fn ball_from_unknown_bowler_is_not_found() {
    let err = apply_event(&started_innings(), &ball("p1", "b9", 1, 0)).unwrap_err();
    assert!(matches!(
        err,
        ScoringError::NotFound {
            kind: NotFoundKind::Bowler,
            ..
        }
    ));
}

#[test]
fn wicket_marks_out_and_logs() {
    let (state, applied) = apply(&started_innings(), wicket("p1", "b1", DismissalType::Bowled));
    assert_eq!(
        applied,
        Applied::Wicket {
            batsman_id: pid("p1"),
            wickets_down: 1,
        }
    );
    let innings = state.ledger.innings(1).unwrap();
    let p1 = innings.batter(&pid("p1")).unwrap();
    assert_eq!(p1.batting_status, BattingStatus::Out);
    assert!(!p1.is_currently_batting && !p1.is_striker);
    assert_eq!(innings.bowler(&pid("b1")).unwrap().wickets, 1);
    assert_eq!(innings.wickets.len(), 1);
    assert_eq!(state.current_batsmen(1).len(), 1);
    assert!(state.striker(1).is_none());
}

#[test]
fn run_out_does_not_credit_bowler() {
    let (state, _) = apply(&started_innings(), wicket("p2", "b1", DismissalType::RunOut));
    let innings = state.ledger.innings(1).unwrap();
    assert_eq!(innings.bowler(&pid("b1")).unwrap().wickets, 0);
    assert_eq!(innings.wickets[0].dismissal_type, DismissalType::RunOut);
}

#[test]
fn second_wicket_for_same_batter_is_duplicate() {
    let state = apply(&started_innings(), wicket("p1", "b1", DismissalType::Caught)).0;
    let err = apply_event(&state, &wicket("p1", "b1", DismissalType::Caught)).unwrap_err();
    assert!(matches!(err, ScoringError::Duplicate(_)));
}

#[test]
fn rejected_event_leaves_state_untouched() {
    let state = started_innings();
    let before = state.clone();
    // p3 is not in the ledger.
    assert!(apply_event(&state, &ball("p3", "b1", 1, 4)).is_err());
    assert_eq!(state, before);
}

#[test]
fn new_batter_takes_vacant_slot_after_wicket() {
    let state = apply(&started_innings(), wicket("p1", "b1", DismissalType::Lbw)).0;
    let (state, _) = apply(&state, add_batter("p3", 3, true, true));
    let ids: Vec<_> = state
        .current_batsmen(1)
        .iter()
        .map(|e| e.player_id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["p2".to_string(), "p3".to_string()]);
    assert_eq!(state.striker(1).unwrap().player_id, pid("p3"));
    let (state, _) = apply(&state, ball("p3", "b1", 1, 6));
    let p3 = state.ledger.innings(1).unwrap().batter(&pid("p3")).unwrap();
    assert_eq!((p3.runs_scored, p3.sixes), (6, 1));
}

#[test]
fn batsmen_set_honours_named_striker() {
    let state = apply(&started_innings(), add_batter("p3", 3, false, false)).0;
    let event = ScoringEvent::CurrentBatsmenSet(CurrentBatsmenSet {
        inning: 1,
        striker_id: pid("p2"),
        non_striker_id: pid("p3"),
    });
    let (state, applied) = apply(&state, event);
    assert_eq!(applied, Applied::CurrentBatsmenSet);
    assert_eq!(state.striker(1).unwrap().player_id, pid("p2"));
    assert_eq!(state.current_batsmen(1).len(), 2);
    let p1 = state.ledger.innings(1).unwrap().batter(&pid("p1")).unwrap();
    assert!(!p1.is_currently_batting);
}

#[test]
fn bowler_change_to_new_bowler_adds_entry() {
    let (state, applied) = apply(&started_innings(), change_bowler("b3", Some("b1")));
    assert_eq!(
        applied,
        Applied::BowlerChanged {
            player_id: pid("b3")
        }
    );
    assert_eq!(state.bowling_card(1).len(), 3);
    assert_eq!(state.current_bowler(1).unwrap().player_id, pid("b3"));
}

#[test]
fn additions_to_completed_innings_are_rejected() {
    let state = apply(&started_innings(), status(1, InningStatus::Completed)).0;
    let err = apply_event(&state, &add_batter("p5", 5, false, false)).unwrap_err();
    assert!(matches!(err, ScoringError::InvalidTransition(_)));
    let err = apply_event(&state, &change_bowler("b3", None)).unwrap_err();
    assert!(matches!(err, ScoringError::InvalidTransition(_)));
}

#[test]
fn innings_advance_then_stale_status_rejected() {
    let state = apply(&started_innings(), status(1, InningStatus::Completed)).0;
    let (state, applied) = apply(
        &state,
        ScoringEvent::InningsAdvanced(InningsAdvanced { inning: 2 }),
    );
    assert_eq!(
        applied,
        Applied::InningsAdvanced {
            inning: 2,
            left_open: false
        }
    );
    let err = apply_event(&state, &status(1, InningStatus::InProgress)).unwrap_err();
    assert!(matches!(err, ScoringError::Stale(_)));
    assert_eq!(state.innings_status().inning_number, 2);
    assert_eq!(state.innings_status().status, InningStatus::NotStarted);
}

#[test]
fn advance_to_innings_zero_is_malformed() {
    let state = started_innings();
    let err = apply_event(
        &state,
        &ScoringEvent::InningsAdvanced(InningsAdvanced { inning: 0 }),
    )
    .unwrap_err();
    assert!(matches!(err, ScoringError::Malformed(_)), "{err:?}");
    assert_eq!(state.innings_status().inning_number, 1);
}
