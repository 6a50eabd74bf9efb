//! Innings Progression Tracker.
//!
//! Holds a pointer to the current innings, its status and batting team.
//! Progression is monotonic: the pointer never moves backwards through a
//! status change, and an innings that reached `Completed` stays closed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::ids::{InningNumber, TeamId};
use crate::errors::ScoringError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningStatus {
    #[default]
    NotStarted,
    InProgress,
    /// Between overs or sessions; the innings is still open.
    Break,
    Completed,
}

impl InningStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InningStatus::NotStarted => "not_started",
            InningStatus::InProgress => "in_progress",
            InningStatus::Break => "break",
            InningStatus::Completed => "completed",
        }
    }

    /// At most one innings may be live at a time.
    pub fn is_live(self) -> bool {
        matches!(self, InningStatus::InProgress | InningStatus::Break)
    }
}

/// Read model returned by the `innings_status` selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsView {
    pub inning_number: InningNumber,
    pub status: InningStatus,
    pub batting_team_id: Option<TeamId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsTracker {
    current: InningNumber,
    status: InningStatus,
    batting_team_id: Option<TeamId>,
    /// Innings that reached `Completed`; terminal for their number.
    completed: BTreeSet<InningNumber>,
}

impl Default for InningsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InningsTracker {
    /// Tracker at match start: innings 1, not started.
    pub fn new() -> Self {
        Self {
            current: 1,
            status: InningStatus::NotStarted,
            batting_team_id: None,
            completed: BTreeSet::new(),
        }
    }

    pub fn current_inning(&self) -> InningNumber {
        self.current
    }

    pub fn status(&self) -> InningStatus {
        self.status
    }

    pub fn batting_team_id(&self) -> Option<&TeamId> {
        self.batting_team_id.as_ref()
    }

    pub fn is_completed(&self, inning: InningNumber) -> bool {
        self.completed.contains(&inning)
    }

    pub fn view(&self) -> InningsView {
        InningsView {
            inning_number: self.current,
            status: self.status,
            batting_team_id: self.batting_team_id.clone(),
        }
    }

    /// Reject events that target an innings behind the pointer.
    pub fn ensure_not_stale(&self, target: InningNumber) -> Result<(), ScoringError> {
        if target < self.current {
            return Err(ScoringError::stale(format!(
                "event targets innings {target} but tracker is at innings {}",
                self.current
            )));
        }
        Ok(())
    }

    /// Require `target` to be the current innings and in play.
    pub fn ensure_in_play(&self, target: InningNumber) -> Result<(), ScoringError> {
        self.ensure_not_stale(target)?;
        if target > self.current {
            return Err(ScoringError::invalid(format!(
                "innings {target} has not started (current is {})",
                self.current
            )));
        }
        if self.status != InningStatus::InProgress {
            return Err(ScoringError::invalid(format!(
                "innings {target} is {}, not in_progress",
                self.status.as_str()
            )));
        }
        Ok(())
    }

    /// Move the tracker to `status` for `target`.
    ///
    /// Stale targets and re-opening a completed innings are rejected; a
    /// target ahead of the pointer is adopted as an implicit advance.
    pub fn set_inning_status(
        &self,
        status: InningStatus,
        target: InningNumber,
        batting_team_id: Option<TeamId>,
    ) -> Result<InningsTracker, ScoringError> {
        if target == 0 {
            return Err(ScoringError::malformed("innings numbers are 1-based"));
        }
        self.ensure_not_stale(target)?;

        if self.completed.contains(&target) {
            if status == InningStatus::Completed {
                // Repeat of the terminal status: accepted, nothing changes.
                return Ok(self.clone());
            }
            return Err(ScoringError::invalid(format!(
                "innings {target} already completed; cannot move to {}",
                status.as_str()
            )));
        }

        if target == self.current
            && status == InningStatus::NotStarted
            && self.status != InningStatus::NotStarted
        {
            return Err(ScoringError::invalid(format!(
                "innings {target} is {}; cannot return to not_started",
                self.status.as_str()
            )));
        }

        let mut next = self.clone();
        if target != self.current {
            next.batting_team_id = None;
        }
        next.current = target;
        next.status = status;
        if let Some(team) = batting_team_id {
            next.batting_team_id = Some(team);
        }
        if status == InningStatus::Completed {
            next.completed.insert(target);
        }
        Ok(next)
    }

    /// Unconditionally point the tracker at innings `n`.
    ///
    /// Sequencing (only after the prior innings completed) is the caller's
    /// job; the returned flag reports whether the previous innings was still
    /// open so the caller can log it.
    pub fn advance_inning_number(&self, n: InningNumber) -> (InningsTracker, bool) {
        let left_open = !self.completed.contains(&self.current) && n != self.current;
        let mut next = self.clone();
        if n != self.current {
            next.batting_team_id = None;
        }
        next.current = n;
        next.status = if self.completed.contains(&n) {
            InningStatus::Completed
        } else if n == self.current {
            self.status
        } else {
            InningStatus::NotStarted
        };
        (next, left_open)
    }
}
