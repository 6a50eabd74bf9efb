//! Inbound WebSocket frames.
//!
//! Every frame is `{"type": "...", "payload": {...}}`, optionally with a
//! server-assigned `event_id`. Payloads stay as raw JSON until the message
//! type is known.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ids::{InningNumber, MatchId, PlayerId, TeamId};
use crate::domain::ledger::DismissalType;

pub const ADD_BATSMAN: &str = "ADD_BATSMAN";
pub const ADD_BOWLER: &str = "ADD_BOWLER";
pub const UPDATE_BALL: &str = "UPDATE_BALL";
pub const ADD_WICKET: &str = "ADD_WICKET";
pub const UPDATE_INNING: &str = "UPDATE_INNING";
pub const NEW_INNING: &str = "NEW_INNING";
pub const SET_CURRENT_BATSMEN: &str = "SET_CURRENT_BATSMEN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

/// `UPDATE_BALL`: one delivery as scored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallPayload {
    #[serde(default, alias = "match_id", alias = "id")]
    pub match_public_id: Option<MatchId>,
    pub inning_number: InningNumber,
    pub batsman_public_id: PlayerId,
    pub bowler_public_id: PlayerId,
    pub ball_number: u32,
    #[serde(default, alias = "runs_scored")]
    pub runs: u32,
    #[serde(default)]
    pub wide: bool,
    #[serde(default)]
    pub no_ball: bool,
}

/// `ADD_WICKET`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WicketPayload {
    #[serde(default, alias = "match_id", alias = "id")]
    pub match_public_id: Option<MatchId>,
    pub inning_number: InningNumber,
    pub batsman_public_id: PlayerId,
    pub bowler_public_id: PlayerId,
    #[serde(default)]
    pub fielder_public_id: Option<PlayerId>,
    #[serde(alias = "wicket_type")]
    pub dismissal_type: DismissalType,
    #[serde(default)]
    pub ball_number: Option<u32>,
}

/// `SET_CURRENT_BATSMEN`: striker first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBatsmenPayload {
    #[serde(default, alias = "match_id", alias = "id")]
    pub match_public_id: Option<MatchId>,
    pub inning_number: InningNumber,
    pub striker_public_id: PlayerId,
    pub non_striker_public_id: PlayerId,
}

/// `NEW_INNING`: the server moved the innings pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInningPayload {
    #[serde(default, alias = "match_id", alias = "id")]
    pub match_public_id: Option<MatchId>,
    pub inning_number: InningNumber,
    #[serde(default, alias = "team_id", alias = "batting_team_id")]
    pub team_public_id: Option<TeamId>,
}
