//! Event Applicator: the single write path into `MatchState`.
//!
//! `apply_event` works on copies and returns the next state only when every
//! step succeeded, so a rejected event leaves the current state untouched
//! and no intermediate state is ever observable.

use tracing::{debug, warn};

use crate::domain::events::{
    BallBowled, BatsmanAdded, BowlerChanged, CurrentBatsmenSet, InningsAdvanced,
    InningsStatusChanged, ScoringEvent, WicketFallen,
};
use crate::domain::ids::{InningNumber, PlayerId};
use crate::domain::innings::InningsView;
use crate::domain::ledger::{BattingStatus, WicketEvent};
use crate::domain::participants::{self, rotate_strike};
use crate::domain::rules::{add_runs, completes_over, rotates_strike, Delivery};
use crate::domain::state::MatchState;
use crate::errors::{NotFoundKind, ScoringError};

/// What a successfully applied event did, for callers that react to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Ball(BallApplied),
    Wicket { batsman_id: PlayerId, wickets_down: u32 },
    BatsmanAdded { player_id: PlayerId },
    BowlerChanged { player_id: PlayerId },
    CurrentBatsmenSet,
    InningsStatus(InningsView),
    InningsAdvanced { inning: InningNumber, left_open: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallApplied {
    /// The delivery ended the over; the UI should prompt for a new bowler.
    pub over_completed: bool,
    /// Strike ended up with the other batter.
    pub strike_changed: bool,
}

pub fn apply_event(
    state: &MatchState,
    event: &ScoringEvent,
) -> Result<(MatchState, Applied), ScoringError> {
    match event {
        ScoringEvent::BallBowled(ball) => apply_ball(state, ball),
        ScoringEvent::WicketFallen(wicket) => apply_wicket(state, wicket),
        ScoringEvent::BatsmanAdded(added) => apply_batsman_added(state, added),
        ScoringEvent::BowlerChanged(change) => apply_bowler_changed(state, change),
        ScoringEvent::CurrentBatsmenSet(pair) => apply_current_batsmen(state, pair),
        ScoringEvent::InningsStatusChanged(change) => apply_innings_status(state, change),
        ScoringEvent::InningsAdvanced(advance) => apply_innings_advanced(state, advance),
    }
}

fn ensure_open(state: &MatchState, inning: InningNumber) -> Result<(), ScoringError> {
    state.innings.ensure_not_stale(inning)?;
    if state.innings.is_completed(inning) {
        return Err(ScoringError::invalid(format!(
            "innings {inning} already completed"
        )));
    }
    Ok(())
}

fn apply_ball(state: &MatchState, ball: &BallBowled) -> Result<(MatchState, Applied), ScoringError> {
    let inning = ball.inning;
    state.innings.ensure_in_play(inning)?;
    let delivery = Delivery::from_flags(ball.wide, ball.no_ball)?;

    // The server names the bowler of record; follow it if the local
    // current-bowler flag lags behind.
    let bowler_is_current = state
        .current_bowler(inning)
        .is_some_and(|b| b.player_id == ball.bowler_id);
    let ledger = if bowler_is_current {
        state.ledger.clone()
    } else {
        debug!(inning, bowler = %ball.bowler_id, "ball from non-current bowler; switching");
        participants::set_current_bowler(&state.ledger, inning, &ball.bowler_id, None)?
    };

    let mut over_completed = false;
    let mut strike_changed = false;
    let ledger = ledger.edit(inning, |innings| {
        let batter = innings.batter(&ball.batsman_id).ok_or_else(|| {
            ScoringError::not_found(NotFoundKind::Batter, ball.batsman_id.to_string())
        })?;
        if !batter.is_currently_batting {
            return Err(ScoringError::invalid(format!(
                "batter {} is not at the crease",
                ball.batsman_id
            )));
        }
        if !batter.is_striker {
            return Err(ScoringError::invalid(format!(
                "batter {} is not on strike",
                ball.batsman_id
            )));
        }

        let recorded = innings.bowler_mut(&ball.bowler_id)?.ball_number;
        let behind = if delivery.is_legal() {
            ball.ball_number <= recorded
        } else {
            ball.ball_number < recorded
        };
        if behind {
            return Err(ScoringError::stale(format!(
                "ball {} already counted for bowler {} (at {recorded})",
                ball.ball_number, ball.bowler_id
            )));
        }

        let overflow = || ScoringError::malformed(format!("{} runs off one ball", ball.runs));
        let conceded = delivery.runs_conceded(ball.runs).ok_or_else(overflow)?;
        let extras = delivery.extras(ball.runs).ok_or_else(overflow)?;

        let batter = innings.batter_mut(&ball.batsman_id)?;
        if delivery != Delivery::Wide {
            batter.runs_scored = add_runs(batter.runs_scored, ball.runs, "batter runs")?;
            match ball.runs {
                4 => batter.fours = batter.fours.saturating_add(1),
                6 => batter.sixes = batter.sixes.saturating_add(1),
                _ => {}
            }
        }
        if delivery.counts_as_faced() {
            batter.balls_faced = batter.balls_faced.saturating_add(1);
        }

        let bowler = innings.bowler_mut(&ball.bowler_id)?;
        bowler.runs_conceded = add_runs(bowler.runs_conceded, conceded, "bowler runs conceded")?;
        match delivery {
            Delivery::Legal => {
                let expected = recorded.saturating_add(1);
                if ball.ball_number > expected {
                    debug!(
                        inning,
                        bowler = %ball.bowler_id,
                        expected,
                        got = ball.ball_number,
                        "gap in ball numbers; taking server count"
                    );
                }
                bowler.ball_number = ball.ball_number;
            }
            Delivery::Wide => bowler.wides = bowler.wides.saturating_add(1),
            Delivery::NoBall => bowler.no_balls = bowler.no_balls.saturating_add(1),
        }
        let legal_after = bowler.ball_number;
        innings.extras = add_runs(innings.extras, extras, "innings extras")?;

        if rotates_strike(ball.runs) {
            rotate_strike(innings);
            strike_changed = !strike_changed;
        }
        if delivery.is_legal() && completes_over(recorded, legal_after, state.balls_per_over) {
            rotate_strike(innings);
            strike_changed = !strike_changed;
            over_completed = true;
        }
        Ok(())
    })?;

    let next = MatchState {
        ledger,
        ..state.clone()
    };
    Ok((
        next,
        Applied::Ball(BallApplied {
            over_completed,
            strike_changed,
        }),
    ))
}

fn apply_wicket(
    state: &MatchState,
    wicket: &WicketFallen,
) -> Result<(MatchState, Applied), ScoringError> {
    let inning = wicket.inning;
    state.innings.ensure_in_play(inning)?;

    let ledger = state.ledger.edit(inning, |innings| {
        let batter = innings.batter(&wicket.batsman_id).ok_or_else(|| {
            ScoringError::not_found(NotFoundKind::Batter, wicket.batsman_id.to_string())
        })?;
        if batter.is_out() {
            return Err(ScoringError::duplicate(format!(
                "batter {} is already out",
                wicket.batsman_id
            )));
        }
        if !batter.is_currently_batting {
            return Err(ScoringError::invalid(format!(
                "batter {} is not at the crease",
                wicket.batsman_id
            )));
        }

        let bowler = innings.bowler_mut(&wicket.bowler_id)?;
        let ball_number = wicket.ball_number.unwrap_or(bowler.ball_number);
        if wicket.dismissal_type.credits_bowler() {
            bowler.wickets = bowler.wickets.saturating_add(1);
        }

        let batter = innings.batter_mut(&wicket.batsman_id)?;
        batter.batting_status = BattingStatus::Out;
        batter.is_currently_batting = false;
        batter.is_striker = false;

        innings.wickets.push(WicketEvent {
            inning_number: inning,
            batsman_id: wicket.batsman_id.clone(),
            bowler_id: wicket.bowler_id.clone(),
            fielder_id: wicket.fielder_id.clone(),
            dismissal_type: wicket.dismissal_type,
            ball_number,
        });
        Ok(())
    })?;

    let wickets_down = ledger
        .innings(inning)
        .map(|i| i.wickets_down())
        .unwrap_or_default();
    let next = MatchState {
        ledger,
        ..state.clone()
    };
    Ok((
        next,
        Applied::Wicket {
            batsman_id: wicket.batsman_id.clone(),
            wickets_down,
        },
    ))
}

fn apply_batsman_added(
    state: &MatchState,
    added: &BatsmanAdded,
) -> Result<(MatchState, Applied), ScoringError> {
    ensure_open(state, added.inning)?;
    let ledger = state.ledger.add_batter(added.inning, added.entry.clone())?;
    let next = MatchState {
        ledger,
        ..state.clone()
    };
    Ok((
        next,
        Applied::BatsmanAdded {
            player_id: added.entry.player_id.clone(),
        },
    ))
}

fn apply_bowler_changed(
    state: &MatchState,
    change: &BowlerChanged,
) -> Result<(MatchState, Applied), ScoringError> {
    let inning = change.inning;
    ensure_open(state, inning)?;
    let player_id = &change.bowler.player_id;

    let known = state
        .ledger
        .innings(inning)
        .is_some_and(|i| i.bowler(player_id).is_some());
    let ledger = if known {
        participants::set_current_bowler(
            &state.ledger,
            inning,
            player_id,
            change.previous_bowler_id.as_ref(),
        )?
    } else {
        let entry = change.bowler.clone().bowling_now();
        state.ledger.add_bowler(inning, entry)?
    };

    let next = MatchState {
        ledger,
        ..state.clone()
    };
    Ok((
        next,
        Applied::BowlerChanged {
            player_id: player_id.clone(),
        },
    ))
}

fn apply_current_batsmen(
    state: &MatchState,
    pair: &CurrentBatsmenSet,
) -> Result<(MatchState, Applied), ScoringError> {
    ensure_open(state, pair.inning)?;
    let ledger = participants::set_current_batsmen(
        &state.ledger,
        pair.inning,
        &[pair.striker_id.clone(), pair.non_striker_id.clone()],
    )?;
    // The pair is named striker-first; honour that over the kept striker.
    let ledger = ledger.edit(pair.inning, |innings| {
        innings.clear_striker_except(&pair.striker_id);
        innings.batter_mut(&pair.striker_id)?.is_striker = true;
        Ok(())
    })?;
    let next = MatchState {
        ledger,
        ..state.clone()
    };
    Ok((next, Applied::CurrentBatsmenSet))
}

fn apply_innings_status(
    state: &MatchState,
    change: &InningsStatusChanged,
) -> Result<(MatchState, Applied), ScoringError> {
    let innings = state.innings.set_inning_status(
        change.status,
        change.inning,
        change.batting_team_id.clone(),
    )?;
    let view = innings.view();
    let next = MatchState {
        innings,
        ..state.clone()
    };
    Ok((next, Applied::InningsStatus(view)))
}

fn apply_innings_advanced(
    state: &MatchState,
    advance: &InningsAdvanced,
) -> Result<(MatchState, Applied), ScoringError> {
    if advance.inning == 0 {
        return Err(ScoringError::malformed("innings numbers are 1-based"));
    }
    let (innings, left_open) = state.innings.advance_inning_number(advance.inning);
    if left_open {
        warn!(
            from = state.innings.current_inning(),
            to = advance.inning,
            "advancing innings pointer while previous innings is not completed"
        );
    }
    let next = MatchState {
        innings,
        ..state.clone()
    };
    Ok((
        next,
        Applied::InningsAdvanced {
            inning: advance.inning,
            left_open,
        },
    ))
}
