//! Test-only builders for match states and events.

use crate::domain::applicator::{apply_event, Applied};
use crate::domain::events::{
    BallBowled, BatsmanAdded, BowlerChanged, InningsStatusChanged, ScoringEvent, WicketFallen,
};
use crate::domain::ids::{InningNumber, PlayerId, TeamId};
use crate::domain::innings::InningStatus;
use crate::domain::ledger::{BattingEntry, BowlingEntry, DismissalType};
use crate::domain::state::MatchState;

pub fn pid(s: &str) -> PlayerId {
    PlayerId::new(s)
}

/// Apply an event that the test expects to succeed.
pub fn apply(state: &MatchState, event: ScoringEvent) -> (MatchState, Applied) {
    match apply_event(state, &event) {
        Ok(result) => result,
        Err(err) => panic!("expected {} to apply, got {err:?}", event.kind()),
    }
}

pub fn status(inning: InningNumber, status: InningStatus) -> ScoringEvent {
    ScoringEvent::InningsStatusChanged(InningsStatusChanged {
        inning,
        status,
        batting_team_id: Some(TeamId::new(format!("team-{inning}"))),
    })
}

pub fn add_batter(id: &str, position: u8, at_crease: bool, striker: bool) -> ScoringEvent {
    let mut entry = BattingEntry::new(pid(id), position);
    entry.is_currently_batting = at_crease;
    entry.is_striker = striker;
    ScoringEvent::BatsmanAdded(BatsmanAdded { inning: 1, entry })
}

pub fn change_bowler(id: &str, previous: Option<&str>) -> ScoringEvent {
    ScoringEvent::BowlerChanged(BowlerChanged {
        inning: 1,
        bowler: BowlingEntry::new(pid(id)),
        previous_bowler_id: previous.map(pid),
    })
}

pub fn ball(batsman: &str, bowler: &str, ball_number: u32, runs: u32) -> ScoringEvent {
    ScoringEvent::BallBowled(BallBowled {
        inning: 1,
        batsman_id: pid(batsman),
        bowler_id: pid(bowler),
        ball_number,
        runs,
        wide: false,
        no_ball: false,
    })
}

pub fn extra(
    batsman: &str,
    bowler: &str,
    ball_number: u32,
    runs: u32,
    wide: bool,
) -> ScoringEvent {
    ScoringEvent::BallBowled(BallBowled {
        inning: 1,
        batsman_id: pid(batsman),
        bowler_id: pid(bowler),
        ball_number,
        runs,
        wide,
        no_ball: !wide,
    })
}

pub fn wicket(batsman: &str, bowler: &str, dismissal_type: DismissalType) -> ScoringEvent {
    ScoringEvent::WicketFallen(WicketFallen {
        inning: 1,
        batsman_id: pid(batsman),
        bowler_id: pid(bowler),
        fielder_id: None,
        dismissal_type,
        ball_number: None,
    })
}

/// Innings 1 in progress: p1 on strike with p2, b1 bowling, b2 waiting.
pub fn started_innings() -> MatchState {
    let mut state = MatchState::default();
    for event in [
        status(1, InningStatus::InProgress),
        add_batter("p1", 1, true, true),
        add_batter("p2", 2, true, false),
        change_bowler("b2", None),
        change_bowler("b1", Some("b2")),
    ] {
        state = apply(&state, event).0;
    }
    state
}
