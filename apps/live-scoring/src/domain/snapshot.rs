//! Public snapshot API for rendering match state without exposing internals.

use serde::{Deserialize, Serialize};

use crate::domain::ids::InningNumber;
use crate::domain::innings::InningsView;
use crate::domain::ledger::{BattingEntry, BowlingEntry, WicketEvent};
use crate::domain::state::{InningsScore, MatchState};

/// Scorecard for one innings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InningsCard {
    pub inning_number: InningNumber,
    pub score: InningsScore,
    pub batting: Vec<BattingEntry>,
    pub bowling: Vec<BowlingEntry>,
    pub wickets: Vec<WicketEvent>,
}

/// Top-level snapshot: innings pointer, every scorecard, and who is on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub innings: InningsView,
    pub scorecards: Vec<InningsCard>,
    pub current_batsmen: Vec<BattingEntry>,
    pub current_bowler: Option<BowlingEntry>,
}

impl MatchSnapshot {
    pub fn from_state(state: &MatchState) -> Self {
        let current = state.innings.current_inning();
        let scorecards = state
            .ledger
            .innings_numbers()
            .filter_map(|n| {
                state.innings_score(n).map(|score| InningsCard {
                    inning_number: n,
                    score,
                    batting: state.batting_card(n).to_vec(),
                    bowling: state.bowling_card(n).to_vec(),
                    wickets: state.wickets(n).to_vec(),
                })
            })
            .collect();

        Self {
            innings: state.innings_status(),
            scorecards,
            current_batsmen: state.current_batsmen(current).into_iter().cloned().collect(),
            current_bowler: state.current_bowler(current).cloned(),
        }
    }
}
