#![allow(dead_code)]

use live_scoring::{DispatchOutcome, MatchStore, ScoringConfig};
use live_scoring::domain::ids::MatchId;
use live_scoring::protocol::socket_events;

// Logging is auto-installed for every test binary that includes this module
#[ctor::ctor]
fn init_logging() {
    scoring_test_support::logging::init();
}

pub fn new_store() -> MatchStore {
    MatchStore::new(
        MatchId::new(test_support::unique_match_id()),
        &ScoringConfig::default(),
    )
}

/// Normalizes and dispatches one socket frame, panicking on protocol or
/// malformed-event errors.
pub fn feed(store: &mut MatchStore, frame: &str) -> Vec<DispatchOutcome> {
    let envelopes = socket_events(frame).expect("frame should normalize");
    store
        .dispatch_all(&envelopes)
        .expect("frame should not carry malformed events")
}

/// Like `feed`, for frames expected to yield exactly one event.
pub fn feed_one(store: &mut MatchStore, frame: &str) -> DispatchOutcome {
    let mut outcomes = feed(store, frame);
    assert_eq!(outcomes.len(), 1, "expected one event from {frame}");
    outcomes.remove(0)
}
