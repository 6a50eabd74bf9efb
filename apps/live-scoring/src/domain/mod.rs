//! Domain layer: pure scoring state machine types and helpers.

pub mod applicator;
pub mod dedup;
pub mod events;
pub mod ids;
pub mod innings;
pub mod ledger;
pub mod participants;
pub mod rules;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_applicator;
#[cfg(test)]
mod tests_props_consistency;

// Re-exports for ergonomics
pub use applicator::{apply_event, Applied, BallApplied};
pub use events::{EventEnvelope, EventKey, EventSource, ScoringEvent};
pub use ids::{InningNumber, MatchId, PlayerId, TeamId};
pub use innings::{InningStatus, InningsTracker, InningsView};
pub use ledger::{
    BattingEntry, BattingPatch, BattingStatus, BowlingEntry, BowlingPatch, DismissalType,
    InningsLedger, ScoreLedger, WicketEvent,
};
pub use snapshot::MatchSnapshot;
pub use state::{InningsScore, MatchState};
