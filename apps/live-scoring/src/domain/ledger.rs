//! Score Ledger: per-innings batting and bowling entries plus the wicket log.
//!
//! The ledger is the only owner of entries. Trackers refer to entries by
//! innings number and player id. Every mutation returns a new ledger value;
//! the receiver is never modified, so a rejected mutation leaves no trace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::ids::{InningNumber, PlayerId, TeamId};
use crate::domain::rules::MAX_CURRENT_BATTERS;
use crate::errors::{NotFoundKind, ScoringError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattingStatus {
    #[default]
    NotOut,
    Out,
}

/// One batter's line in one innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingEntry {
    pub player_id: PlayerId,
    pub team_id: Option<TeamId>,
    /// Batting order position (1-based).
    pub position: u8,
    pub runs_scored: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    pub batting_status: BattingStatus,
    pub is_striker: bool,
    pub is_currently_batting: bool,
}

impl BattingEntry {
    /// Fresh entry for a batter walking in; not yet at the wicket.
    pub fn new(player_id: PlayerId, position: u8) -> Self {
        Self {
            player_id,
            team_id: None,
            position,
            runs_scored: 0,
            balls_faced: 0,
            fours: 0,
            sixes: 0,
            batting_status: BattingStatus::NotOut,
            is_striker: false,
            is_currently_batting: false,
        }
    }

    pub fn at_crease(mut self, striker: bool) -> Self {
        self.is_currently_batting = true;
        self.is_striker = striker;
        self
    }

    pub fn is_out(&self) -> bool {
        self.batting_status == BattingStatus::Out
    }

    /// Runs per 100 balls; `None` before the first ball faced.
    pub fn strike_rate(&self) -> Option<f64> {
        (self.balls_faced > 0).then(|| f64::from(self.runs_scored) * 100.0 / f64::from(self.balls_faced))
    }
}

/// One bowler's line in one innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlingEntry {
    pub player_id: PlayerId,
    pub team_id: Option<TeamId>,
    /// Legal deliveries bowled so far.
    pub ball_number: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub wides: u32,
    pub no_balls: u32,
    /// Set once the bowler has been brought on in this innings.
    pub bowling_status: bool,
    pub is_current_bowler: bool,
}

impl BowlingEntry {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            team_id: None,
            ball_number: 0,
            runs_conceded: 0,
            wickets: 0,
            wides: 0,
            no_balls: 0,
            bowling_status: false,
            is_current_bowler: false,
        }
    }

    pub fn bowling_now(mut self) -> Self {
        self.is_current_bowler = true;
        self.bowling_status = true;
        self
    }

    /// Runs conceded per over; `None` before the first legal ball.
    pub fn economy(&self, balls_per_over: u8) -> Option<f64> {
        (self.ball_number > 0).then(|| {
            f64::from(self.runs_conceded) * f64::from(balls_per_over) / f64::from(self.ball_number)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissalType {
    Bowled,
    Caught,
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
    RetiredOut,
    ObstructingTheField,
}

impl DismissalType {
    /// Whether the dismissal goes in the bowler's wickets column.
    pub fn credits_bowler(self) -> bool {
        matches!(
            self,
            DismissalType::Bowled
                | DismissalType::Caught
                | DismissalType::Lbw
                | DismissalType::Stumped
                | DismissalType::HitWicket
        )
    }
}

/// Append-only record of a dismissal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WicketEvent {
    pub inning_number: InningNumber,
    pub batsman_id: PlayerId,
    pub bowler_id: PlayerId,
    pub fielder_id: Option<PlayerId>,
    pub dismissal_type: DismissalType,
    pub ball_number: u32,
}

/// Field-wise merge for a batting entry; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattingPatch {
    pub runs_scored: Option<u32>,
    pub balls_faced: Option<u32>,
    pub fours: Option<u32>,
    pub sixes: Option<u32>,
    pub batting_status: Option<BattingStatus>,
    pub is_striker: Option<bool>,
    pub is_currently_batting: Option<bool>,
}

impl BattingPatch {
    fn apply_to(&self, entry: &mut BattingEntry) {
        if let Some(v) = self.runs_scored {
            entry.runs_scored = v;
        }
        if let Some(v) = self.balls_faced {
            entry.balls_faced = v;
        }
        if let Some(v) = self.fours {
            entry.fours = v;
        }
        if let Some(v) = self.sixes {
            entry.sixes = v;
        }
        if let Some(v) = self.batting_status {
            entry.batting_status = v;
        }
        if let Some(v) = self.is_striker {
            entry.is_striker = v;
        }
        if let Some(v) = self.is_currently_batting {
            entry.is_currently_batting = v;
        }
    }
}

/// Field-wise merge for a bowling entry; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BowlingPatch {
    pub ball_number: Option<u32>,
    pub runs_conceded: Option<u32>,
    pub wickets: Option<u32>,
    pub wides: Option<u32>,
    pub no_balls: Option<u32>,
    pub bowling_status: Option<bool>,
    pub is_current_bowler: Option<bool>,
}

impl BowlingPatch {
    fn apply_to(&self, entry: &mut BowlingEntry) {
        if let Some(v) = self.ball_number {
            entry.ball_number = v;
        }
        if let Some(v) = self.runs_conceded {
            entry.runs_conceded = v;
        }
        if let Some(v) = self.wickets {
            entry.wickets = v;
        }
        if let Some(v) = self.wides {
            entry.wides = v;
        }
        if let Some(v) = self.no_balls {
            entry.no_balls = v;
        }
        if let Some(v) = self.bowling_status {
            entry.bowling_status = v;
        }
        if let Some(v) = self.is_current_bowler {
            entry.is_current_bowler = v;
        }
    }
}

/// Everything recorded for one innings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsLedger {
    /// Batting order as added.
    pub batting: Vec<BattingEntry>,
    /// Bowlers in order of first appearance.
    pub bowling: Vec<BowlingEntry>,
    pub wickets: Vec<WicketEvent>,
    /// Wides, no-ball penalties and other runs not credited to a batter.
    pub extras: u32,
}

impl InningsLedger {
    pub fn batter(&self, player_id: &PlayerId) -> Option<&BattingEntry> {
        self.batting.iter().find(|e| &e.player_id == player_id)
    }

    pub fn bowler(&self, player_id: &PlayerId) -> Option<&BowlingEntry> {
        self.bowling.iter().find(|e| &e.player_id == player_id)
    }

    pub(crate) fn batter_mut(&mut self, player_id: &PlayerId) -> Result<&mut BattingEntry, ScoringError> {
        self.batting
            .iter_mut()
            .find(|e| &e.player_id == player_id)
            .ok_or_else(|| ScoringError::not_found(NotFoundKind::Batter, player_id.to_string()))
    }

    pub(crate) fn bowler_mut(&mut self, player_id: &PlayerId) -> Result<&mut BowlingEntry, ScoringError> {
        self.bowling
            .iter_mut()
            .find(|e| &e.player_id == player_id)
            .ok_or_else(|| ScoringError::not_found(NotFoundKind::Bowler, player_id.to_string()))
    }

    /// Legal deliveries bowled in the innings.
    /// Totals saturate; entries seeded from server rows are not bounded.
    pub fn legal_balls(&self) -> u32 {
        self.bowling
            .iter()
            .fold(0, |sum, b| sum.saturating_add(b.ball_number))
    }

    pub fn total_runs(&self) -> u32 {
        self.batting
            .iter()
            .fold(self.extras, |sum, b| sum.saturating_add(b.runs_scored))
    }

    pub fn wickets_down(&self) -> u32 {
        self.wickets.len() as u32
    }

    pub(crate) fn clear_striker_except(&mut self, keep: &PlayerId) {
        for entry in self.batting.iter_mut().filter(|e| &e.player_id != keep) {
            entry.is_striker = false;
        }
    }

    pub(crate) fn clear_current_bowler_except(&mut self, keep: &PlayerId) -> usize {
        let mut cleared = 0;
        for entry in self
            .bowling
            .iter_mut()
            .filter(|e| e.is_current_bowler && &e.player_id != keep)
        {
            entry.is_current_bowler = false;
            cleared += 1;
        }
        cleared
    }

    /// Check the at-most-two-batters, at-most-one-striker and
    /// at-most-one-bowler invariants.
    pub(crate) fn check_invariants(&self) -> Result<(), ScoringError> {
        let current = self.batting.iter().filter(|e| e.is_currently_batting).count();
        if current > MAX_CURRENT_BATTERS {
            return Err(ScoringError::invalid(format!(
                "{current} batters marked at the crease"
            )));
        }
        if let Some(e) = self
            .batting
            .iter()
            .find(|e| e.is_striker && !e.is_currently_batting)
        {
            return Err(ScoringError::invalid(format!(
                "striker {} is not at the crease",
                e.player_id
            )));
        }
        if let Some(e) = self
            .batting
            .iter()
            .find(|e| e.is_currently_batting && e.is_out())
        {
            return Err(ScoringError::invalid(format!(
                "dismissed batter {} marked at the crease",
                e.player_id
            )));
        }
        if self.batting.iter().filter(|e| e.is_striker).count() > 1 {
            return Err(ScoringError::invalid("more than one striker"));
        }
        if self.bowling.iter().filter(|e| e.is_current_bowler).count() > 1 {
            return Err(ScoringError::invalid("more than one current bowler"));
        }
        Ok(())
    }
}

/// Innings number to innings ledger. An absent key means the innings has
/// not started; it is never an implicit empty collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    innings: BTreeMap<InningNumber, InningsLedger>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn innings(&self, inning: InningNumber) -> Option<&InningsLedger> {
        self.innings.get(&inning)
    }

    pub fn innings_numbers(&self) -> impl Iterator<Item = InningNumber> + '_ {
        self.innings.keys().copied()
    }

    /// Append a batter. Any existing entry for the player is a duplicate,
    /// which covers retried add requests for a batter already at the crease.
    pub fn add_batter(
        &self,
        inning: InningNumber,
        entry: BattingEntry,
    ) -> Result<ScoreLedger, ScoringError> {
        if entry.is_striker && !entry.is_currently_batting {
            return Err(ScoringError::malformed(format!(
                "batter {} flagged striker but not at the crease",
                entry.player_id
            )));
        }
        self.edit_or_create(inning, |innings| {
            if let Some(existing) = innings.batter(&entry.player_id) {
                let state = if existing.is_currently_batting {
                    "already at the crease"
                } else {
                    "already in the batting card"
                };
                return Err(ScoringError::duplicate(format!(
                    "batter {} {state} in innings {inning}",
                    entry.player_id
                )));
            }
            if entry.is_currently_batting {
                let current = innings
                    .batting
                    .iter()
                    .filter(|e| e.is_currently_batting)
                    .count();
                if current >= MAX_CURRENT_BATTERS {
                    return Err(ScoringError::invalid(format!(
                        "cannot add {}: both batting slots are taken",
                        entry.player_id
                    )));
                }
            }
            if entry.is_striker {
                innings.clear_striker_except(&entry.player_id);
            }
            innings.batting.push(entry);
            Ok(())
        })
    }

    pub fn update_batter(
        &self,
        inning: InningNumber,
        player_id: &PlayerId,
        patch: &BattingPatch,
    ) -> Result<ScoreLedger, ScoringError> {
        self.edit(inning, |innings| {
            patch.apply_to(innings.batter_mut(player_id)?);
            Ok(())
        })
    }

    /// Append a bowler. A bowler added as current takes over from whoever
    /// was bowling before.
    pub fn add_bowler(
        &self,
        inning: InningNumber,
        entry: BowlingEntry,
    ) -> Result<ScoreLedger, ScoringError> {
        self.edit_or_create(inning, |innings| {
            if innings.bowler(&entry.player_id).is_some() {
                return Err(ScoringError::duplicate(format!(
                    "bowler {} already in the bowling card for innings {inning}",
                    entry.player_id
                )));
            }
            if entry.is_current_bowler {
                innings.clear_current_bowler_except(&entry.player_id);
            }
            innings.bowling.push(entry);
            Ok(())
        })
    }

    pub fn update_bowler(
        &self,
        inning: InningNumber,
        player_id: &PlayerId,
        patch: &BowlingPatch,
    ) -> Result<ScoreLedger, ScoringError> {
        self.edit(inning, |innings| {
            if patch.is_current_bowler == Some(true) {
                innings.clear_current_bowler_except(player_id);
            }
            patch.apply_to(innings.bowler_mut(player_id)?);
            Ok(())
        })
    }

    /// Append a dismissal to the wicket log. Entries are never edited.
    pub fn record_wicket(&self, wicket: WicketEvent) -> Result<ScoreLedger, ScoringError> {
        let inning = wicket.inning_number;
        self.edit(inning, |innings| {
            innings.wickets.push(wicket);
            Ok(())
        })
    }

    /// Apply `f` to a copy of an existing innings; the copy replaces the
    /// original only if `f` succeeds and the invariants still hold.
    pub(crate) fn edit<F>(&self, inning: InningNumber, f: F) -> Result<ScoreLedger, ScoringError>
    where
        F: FnOnce(&mut InningsLedger) -> Result<(), ScoringError>,
    {
        let mut innings = self
            .innings
            .get(&inning)
            .cloned()
            .ok_or_else(|| ScoringError::not_found(NotFoundKind::Innings, format!("innings {inning}")))?;
        f(&mut innings)?;
        innings.check_invariants()?;
        let mut next = self.clone();
        next.innings.insert(inning, innings);
        Ok(next)
    }

    fn edit_or_create<F>(&self, inning: InningNumber, f: F) -> Result<ScoreLedger, ScoringError>
    where
        F: FnOnce(&mut InningsLedger) -> Result<(), ScoringError>,
    {
        let mut innings = self.innings.get(&inning).cloned().unwrap_or_default();
        f(&mut innings)?;
        innings.check_invariants()?;
        let mut next = self.clone();
        next.innings.insert(inning, innings);
        Ok(next)
    }
}
