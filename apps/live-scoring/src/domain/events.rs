//! Normalized domain events.
//!
//! Every source (local UI dispatch, WebSocket push, REST response) is
//! converted into one of these before it reaches the applicator, so the
//! applicator never needs to know where an event came from.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::domain::ids::{InningNumber, PlayerId, TeamId};
use crate::domain::innings::InningStatus;
use crate::domain::ledger::{BattingEntry, BowlingEntry, DismissalType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallBowled {
    pub inning: InningNumber,
    /// Must be the striker.
    pub batsman_id: PlayerId,
    pub bowler_id: PlayerId,
    /// Bowler's legal-ball count once this delivery is counted; extras
    /// repeat the current count.
    pub ball_number: u32,
    /// Runs off the bat, or runs taken on a wide.
    pub runs: u32,
    pub wide: bool,
    pub no_ball: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WicketFallen {
    pub inning: InningNumber,
    pub batsman_id: PlayerId,
    pub bowler_id: PlayerId,
    pub fielder_id: Option<PlayerId>,
    pub dismissal_type: DismissalType,
    /// Defaults to the bowler's current legal-ball count.
    pub ball_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatsmanAdded {
    pub inning: InningNumber,
    pub entry: BattingEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlerChanged {
    pub inning: InningNumber,
    /// Used as the initial line when the bowler is new to the innings.
    pub bowler: BowlingEntry,
    pub previous_bowler_id: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentBatsmenSet {
    pub inning: InningNumber,
    pub striker_id: PlayerId,
    pub non_striker_id: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsStatusChanged {
    pub inning: InningNumber,
    pub status: InningStatus,
    pub batting_team_id: Option<TeamId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsAdvanced {
    pub inning: InningNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoringEvent {
    BallBowled(BallBowled),
    WicketFallen(WicketFallen),
    BatsmanAdded(BatsmanAdded),
    BowlerChanged(BowlerChanged),
    CurrentBatsmenSet(CurrentBatsmenSet),
    InningsStatusChanged(InningsStatusChanged),
    InningsAdvanced(InningsAdvanced),
}

impl ScoringEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ScoringEvent::BallBowled(_) => "BALL_BOWLED",
            ScoringEvent::WicketFallen(_) => "WICKET_FALLEN",
            ScoringEvent::BatsmanAdded(_) => "BATSMAN_ADDED",
            ScoringEvent::BowlerChanged(_) => "BOWLER_CHANGED",
            ScoringEvent::CurrentBatsmenSet(_) => "CURRENT_BATSMEN_SET",
            ScoringEvent::InningsStatusChanged(_) => "INNINGS_STATUS_CHANGED",
            ScoringEvent::InningsAdvanced(_) => "INNINGS_ADVANCED",
        }
    }

    pub fn inning(&self) -> InningNumber {
        match self {
            ScoringEvent::BallBowled(e) => e.inning,
            ScoringEvent::WicketFallen(e) => e.inning,
            ScoringEvent::BatsmanAdded(e) => e.inning,
            ScoringEvent::BowlerChanged(e) => e.inning,
            ScoringEvent::CurrentBatsmenSet(e) => e.inning,
            ScoringEvent::InningsStatusChanged(e) => e.inning,
            ScoringEvent::InningsAdvanced(e) => e.inning,
        }
    }

    /// Events that would be counted twice if applied twice. The others set
    /// state outright, and the same setting may legitimately come round
    /// again (a resume after a break, a bowler back for a second spell).
    pub fn is_additive(&self) -> bool {
        matches!(
            self,
            ScoringEvent::BallBowled(_)
                | ScoringEvent::WicketFallen(_)
                | ScoringEvent::BatsmanAdded(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    Local,
    WebSocket,
    Rest,
}

impl EventSource {
    pub fn as_str(self) -> &'static str {
        match self {
            EventSource::Local => "local",
            EventSource::WebSocket => "websocket",
            EventSource::Rest => "rest",
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity used for deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKey(u64);

impl EventKey {
    /// Server-assigned ids win; otherwise hash the type plus canonical
    /// payload. The source is deliberately left out so a REST response and
    /// its WebSocket echo collide.
    pub fn of(event: &ScoringEvent, event_id: Option<&str>) -> Self {
        if let Some(id) = event_id {
            return EventKey(xxh3_64(format!("id:{id}").as_bytes()));
        }
        let bytes = serde_json::to_vec(event)
            .unwrap_or_else(|_| format!("{}:{event:?}", event.kind()).into_bytes());
        EventKey(xxh3_64(&bytes))
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEnvelope {
    pub source: EventSource,
    pub event_id: Option<String>,
    pub event: ScoringEvent,
}

impl EventEnvelope {
    pub fn new(source: EventSource, event: ScoringEvent) -> Self {
        Self {
            source,
            event_id: None,
            event,
        }
    }

    pub fn local(event: ScoringEvent) -> Self {
        Self::new(EventSource::Local, event)
    }

    pub fn with_event_id(mut self, event_id: Option<String>) -> Self {
        self.event_id = event_id.filter(|id| !id.is_empty());
        self
    }

    pub fn key(&self) -> EventKey {
        EventKey::of(&self.event, self.event_id.as_deref())
    }

    /// Key checked against the recent window. Without a server id only
    /// additive events are keyed; a payload hash cannot tell a resent
    /// state-setting event from the same setting made again later.
    pub fn dedup_key(&self) -> Option<EventKey> {
        (self.event_id.is_some() || self.event.is_additive()).then(|| self.key())
    }
}
