use serde::{Deserialize, Serialize};

use crate::domain::ids::InningNumber;
use crate::domain::innings::{InningsTracker, InningsView};
use crate::domain::ledger::{BattingEntry, BowlingEntry, ScoreLedger, WicketEvent};
use crate::domain::participants;
use crate::domain::rules::{overs_display, DEFAULT_BALLS_PER_OVER};

/// Entire scoring state for one match session.
///
/// Values are replaced wholesale by the applicator; readers hold an
/// immutable snapshot and query it through the selectors below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub ledger: ScoreLedger,
    pub innings: InningsTracker,
    /// Legal deliveries per over for this match format.
    pub balls_per_over: u8,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(DEFAULT_BALLS_PER_OVER)
    }
}

/// Score line for one innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsScore {
    pub inning_number: InningNumber,
    pub runs: u32,
    pub wickets: u32,
    pub extras: u32,
    pub legal_balls: u32,
    /// e.g. "3.4"
    pub overs: String,
}

impl MatchState {
    pub fn new(balls_per_over: u8) -> Self {
        Self {
            ledger: ScoreLedger::new(),
            innings: InningsTracker::new(),
            balls_per_over,
        }
    }

    pub fn current_batsmen(&self, inning: InningNumber) -> Vec<&BattingEntry> {
        participants::current_batsmen(&self.ledger, inning)
    }

    pub fn striker(&self, inning: InningNumber) -> Option<&BattingEntry> {
        participants::striker(&self.ledger, inning)
    }

    pub fn current_bowler(&self, inning: InningNumber) -> Option<&BowlingEntry> {
        participants::current_bowler(&self.ledger, inning)
    }

    pub fn innings_status(&self) -> InningsView {
        self.innings.view()
    }

    pub fn innings_score(&self, inning: InningNumber) -> Option<InningsScore> {
        let innings = self.ledger.innings(inning)?;
        let legal_balls = innings.legal_balls();
        Some(InningsScore {
            inning_number: inning,
            runs: innings.total_runs(),
            wickets: innings.wickets_down(),
            extras: innings.extras,
            legal_balls,
            overs: overs_display(legal_balls, self.balls_per_over),
        })
    }

    pub fn batting_card(&self, inning: InningNumber) -> &[BattingEntry] {
        self.ledger
            .innings(inning)
            .map(|i| i.batting.as_slice())
            .unwrap_or(&[])
    }

    pub fn bowling_card(&self, inning: InningNumber) -> &[BowlingEntry] {
        self.ledger
            .innings(inning)
            .map(|i| i.bowling.as_slice())
            .unwrap_or(&[])
    }

    pub fn wickets(&self, inning: InningNumber) -> &[WicketEvent] {
        self.ledger
            .innings(inning)
            .map(|i| i.wickets.as_slice())
            .unwrap_or(&[])
    }
}
