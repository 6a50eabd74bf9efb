//! Match state container.
//!
//! `MatchStore` owns the current `MatchState` and the recent-event window.
//! Readers get an `Arc` snapshot; every write goes through `dispatch`, which
//! swaps the `Arc` only after the applicator returned a complete new state.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::scoring::ScoringConfig;
use crate::domain::applicator::{apply_event, Applied};
use crate::domain::dedup::RecentEvents;
use crate::domain::events::EventEnvelope;
use crate::domain::ids::{InningNumber, MatchId};
use crate::domain::innings::InningsView;
use crate::domain::ledger::{BattingEntry, BowlingEntry};
use crate::domain::snapshot::MatchSnapshot;
use crate::domain::state::{InningsScore, MatchState};
use crate::errors::ScoringError;
use crate::logging::scoring as scoring_log;

/// Result of dispatching one envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Applied(Applied),
    /// Key already in the recent window; nothing changed.
    Duplicate,
    /// Rejected by the state machine; logged, nothing changed.
    Ignored(ScoringError),
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DispatchOutcome::Applied(_))
    }
}

#[derive(Debug, Clone)]
pub struct MatchStore {
    match_id: MatchId,
    state: Arc<MatchState>,
    recent: RecentEvents,
    balls_per_over: u8,
}

impl MatchStore {
    pub fn new(match_id: MatchId, config: &ScoringConfig) -> Self {
        Self {
            match_id,
            state: Arc::new(MatchState::new(config.balls_per_over)),
            recent: RecentEvents::new(config.dedup_window),
            balls_per_over: config.balls_per_over,
        }
    }

    pub fn match_id(&self) -> &MatchId {
        &self.match_id
    }

    /// Applies one envelope. Only `Malformed` is returned as an error; every
    /// other rejection is logged and reported as `Ignored`.
    pub fn dispatch(&mut self, envelope: &EventEnvelope) -> Result<DispatchOutcome, ScoringError> {
        let key = envelope.dedup_key();
        if key.is_some_and(|key| self.recent.contains(key)) {
            scoring_log::duplicate_dropped(envelope);
            return Ok(DispatchOutcome::Duplicate);
        }

        match apply_event(&self.state, &envelope.event) {
            Ok((next, applied)) => {
                self.state = Arc::new(next);
                if let Some(key) = key {
                    self.recent.record(key);
                }
                trace!(
                    match_id = %self.match_id,
                    kind = envelope.event.kind(),
                    source = envelope.source.as_str(),
                    key = %envelope.key(),
                    "event applied"
                );
                Ok(DispatchOutcome::Applied(applied))
            }
            Err(err) => {
                scoring_log::event_dropped(envelope, &err);
                if err.is_recoverable() {
                    Ok(DispatchOutcome::Ignored(err))
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Dispatches in order and stops at the first malformed event; events
    /// before it stay applied.
    pub fn dispatch_all<'a, I>(&mut self, envelopes: I) -> Result<Vec<DispatchOutcome>, ScoringError>
    where
        I: IntoIterator<Item = &'a EventEnvelope>,
    {
        envelopes
            .into_iter()
            .map(|envelope| self.dispatch(envelope))
            .collect()
    }

    /// Cheap handle to the current state; later dispatches do not affect it.
    pub fn state(&self) -> Arc<MatchState> {
        Arc::clone(&self.state)
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::from_state(&self.state)
    }

    /// Replaces the state wholesale, e.g. after refetching the match. The
    /// recent window is cleared since its keys describe the old state.
    pub fn load(&mut self, state: MatchState) {
        debug!(
            match_id = %self.match_id,
            inning = state.innings.current_inning(),
            "loading match state"
        );
        self.state = Arc::new(state);
        self.recent.clear();
    }

    pub fn reset(&mut self) {
        self.load(MatchState::new(self.balls_per_over));
    }

    pub fn recent_len(&self) -> usize {
        self.recent.len()
    }

    pub fn current_batsmen(&self, inning: InningNumber) -> Vec<&BattingEntry> {
        self.state.current_batsmen(inning)
    }

    pub fn striker(&self, inning: InningNumber) -> Option<&BattingEntry> {
        self.state.striker(inning)
    }

    pub fn current_bowler(&self, inning: InningNumber) -> Option<&BowlingEntry> {
        self.state.current_bowler(inning)
    }

    pub fn innings_status(&self) -> InningsView {
        self.state.innings_status()
    }

    pub fn innings_score(&self, inning: InningNumber) -> Option<InningsScore> {
        self.state.innings_score(inning)
    }
}
