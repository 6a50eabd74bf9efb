// Proptest generators for scoring domain types.

use proptest::prelude::*;

use crate::domain::events::{BowlerChanged, CurrentBatsmenSet, InningsStatusChanged, ScoringEvent};
use crate::domain::ids::{InningNumber, PlayerId};
use crate::domain::innings::InningStatus;
use crate::domain::ledger::BowlingEntry;

pub fn inning_status() -> impl Strategy<Value = InningStatus> {
    prop_oneof![
        Just(InningStatus::NotStarted),
        Just(InningStatus::InProgress),
        Just(InningStatus::Break),
        Just(InningStatus::Completed),
    ]
}

/// Innings numbers for a multi-day match.
pub fn inning_number() -> impl Strategy<Value = InningNumber> {
    1u8..=4
}

/// Sequence of `(status, target)` status requests.
pub fn status_calls() -> impl Strategy<Value = Vec<(InningStatus, InningNumber)>> {
    prop::collection::vec((inning_status(), inning_number()), 1..40)
}

/// One of a fixed pool of bowler ids: b1..=b4.
pub fn bowler_id() -> impl Strategy<Value = PlayerId> {
    (1u8..=4).prop_map(|n| PlayerId::new(format!("b{n}")))
}

/// Bowler change requests with an optional (possibly wrong) previous id.
pub fn bowler_changes() -> impl Strategy<Value = Vec<(PlayerId, Option<PlayerId>)>> {
    prop::collection::vec((bowler_id(), prop::option::of(bowler_id())), 1..30)
}

/// One of a fixed pool of batter ids: p1..=p6.
pub fn batter_id() -> impl Strategy<Value = PlayerId> {
    (1u8..=6).prop_map(|n| PlayerId::new(format!("p{n}")))
}

/// Pair requests; may name the same batter twice so rejection is covered.
pub fn batter_pairs() -> impl Strategy<Value = Vec<[PlayerId; 2]>> {
    prop::collection::vec((batter_id(), batter_id()).prop_map(|(a, b)| [a, b]), 1..30)
}

/// Runs off a single delivery, including the rare five.
pub fn runs() -> impl Strategy<Value = u32> {
    prop_oneof![
        6 => Just(0u32),
        4 => Just(1u32),
        2 => Just(2u32),
        1 => Just(3u32),
        2 => Just(4u32),
        1 => Just(5u32),
        1 => Just(6u32),
    ]
}

/// Events that set state outright: innings status (weighted towards the
/// in-play/break cycle), bowler changes and batter pairs in innings 1.
pub fn state_setting_event() -> impl Strategy<Value = ScoringEvent> {
    let status = prop_oneof![
        4 => Just(InningStatus::InProgress),
        3 => Just(InningStatus::Break),
        1 => Just(InningStatus::Completed),
        1 => Just(InningStatus::NotStarted),
    ];
    prop_oneof![
        (status, 1u8..=2).prop_map(|(status, inning)| {
            ScoringEvent::InningsStatusChanged(InningsStatusChanged {
                inning,
                status,
                batting_team_id: None,
            })
        }),
        (bowler_id(), prop::option::of(bowler_id())).prop_map(|(id, previous)| {
            ScoringEvent::BowlerChanged(BowlerChanged {
                inning: 1,
                bowler: BowlingEntry::new(id),
                previous_bowler_id: previous,
            })
        }),
        (batter_id(), batter_id()).prop_map(|(striker_id, non_striker_id)| {
            ScoringEvent::CurrentBatsmenSet(CurrentBatsmenSet {
                inning: 1,
                striker_id,
                non_striker_id,
            })
        }),
    ]
}

/// State-setting events, each flagged to be delivered twice in a row.
pub fn state_setting_stream() -> impl Strategy<Value = Vec<(ScoringEvent, bool)>> {
    prop::collection::vec((state_setting_event(), any::<bool>()), 1..40)
}
