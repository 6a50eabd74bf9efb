//! Current-Participants Tracker: who is at the crease and who is bowling.
//!
//! The "current" flags live on the ledger entries themselves; these
//! functions are the only place that moves them between entries.

use tracing::{debug, warn};

use crate::domain::ids::{InningNumber, PlayerId};
use crate::domain::ledger::{BattingEntry, BowlingEntry, InningsLedger, ScoreLedger};
use crate::errors::{NotFoundKind, ScoringError};

/// Mark exactly `pair` as at the crease and clear everyone else.
///
/// The striker stays with whichever of the pair already had strike;
/// otherwise the first id takes it.
pub fn set_current_batsmen(
    ledger: &ScoreLedger,
    inning: InningNumber,
    pair: &[PlayerId; 2],
) -> Result<ScoreLedger, ScoringError> {
    let [first, second] = pair;
    if first == second {
        return Err(ScoringError::malformed(format!(
            "batter {first} named twice in current pair"
        )));
    }
    ledger.edit(inning, |innings| {
        for id in pair {
            let entry = innings
                .batter(id)
                .ok_or_else(|| ScoringError::not_found(NotFoundKind::Batter, id.to_string()))?;
            if entry.is_out() {
                return Err(ScoringError::invalid(format!(
                    "batter {id} is out and cannot return to the crease"
                )));
            }
        }
        let striker_kept = pair
            .iter()
            .any(|id| innings.batter(id).is_some_and(|e| e.is_striker));

        for entry in innings.batting.iter_mut() {
            let in_pair = pair.contains(&entry.player_id);
            entry.is_currently_batting = in_pair;
            if !in_pair {
                entry.is_striker = false;
            }
        }
        if !striker_kept {
            innings.batter_mut(first)?.is_striker = true;
        }
        Ok(())
    })
}

/// Make `player_id` the current bowler.
///
/// `previous` is cleared when given, and every other current flag in the
/// innings is cleared regardless, so a wrong or stale `previous` cannot
/// leave two bowlers current.
pub fn set_current_bowler(
    ledger: &ScoreLedger,
    inning: InningNumber,
    player_id: &PlayerId,
    previous: Option<&PlayerId>,
) -> Result<ScoreLedger, ScoringError> {
    ledger.edit(inning, |innings| {
        if innings.bowler(player_id).is_none() {
            return Err(ScoringError::not_found(
                NotFoundKind::Bowler,
                player_id.to_string(),
            ));
        }
        if let Some(prev) = previous.filter(|p| *p != player_id) {
            match innings.bowler_mut(prev) {
                Ok(entry) => entry.is_current_bowler = false,
                Err(_) => debug!(inning, previous = %prev, "previous bowler not in ledger"),
            }
        }
        let stray = innings.clear_current_bowler_except(player_id);
        if stray > 0 && previous.is_some() {
            warn!(
                inning,
                bowler = %player_id,
                cleared = stray,
                "explicit previous bowler was not the current one"
            );
        }
        let entry = innings.bowler_mut(player_id)?;
        entry.is_current_bowler = true;
        entry.bowling_status = true;
        Ok(())
    })
}

/// Hand strike to the other batter at the crease. No-op unless there is a
/// full pair with one of them on strike.
pub(crate) fn rotate_strike(innings: &mut InningsLedger) {
    let (at_crease, strikers) = innings
        .batting
        .iter()
        .filter(|e| e.is_currently_batting)
        .fold((0, 0), |(n, s), e| (n + 1, s + usize::from(e.is_striker)));
    if at_crease != 2 || strikers != 1 {
        return;
    }
    for entry in innings.batting.iter_mut().filter(|e| e.is_currently_batting) {
        entry.is_striker = !entry.is_striker;
    }
}

/// Batters at the crease; empty when the innings has no ledger yet.
pub fn current_batsmen(ledger: &ScoreLedger, inning: InningNumber) -> Vec<&BattingEntry> {
    ledger
        .innings(inning)
        .map(|innings| {
            innings
                .batting
                .iter()
                .filter(|e| e.is_currently_batting)
                .collect()
        })
        .unwrap_or_default()
}

pub fn striker(ledger: &ScoreLedger, inning: InningNumber) -> Option<&BattingEntry> {
    ledger
        .innings(inning)?
        .batting
        .iter()
        .find(|e| e.is_currently_batting && e.is_striker)
}

pub fn current_bowler(ledger: &ScoreLedger, inning: InningNumber) -> Option<&BowlingEntry> {
    ledger
        .innings(inning)?
        .bowling
        .iter()
        .find(|e| e.is_current_bowler)
}
