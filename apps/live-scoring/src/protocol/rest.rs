//! REST bodies for the scoring endpoints.
//!
//! The same row shapes arrive as REST responses and as WebSocket payloads,
//! so decoding is lenient about optional and aliased keys. Conversion into
//! domain types happens in `protocol::normalize`.

use serde::{Deserialize, Serialize};

use crate::domain::ids::{InningNumber, MatchId, PlayerId, TeamId};
use crate::domain::innings::InningStatus;
use crate::domain::ledger::{BattingEntry, BattingStatus, BowlingEntry};

/// `batting_status` arrives as a label or as a bare "is out" flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireBattingStatus {
    Flag(bool),
    Label(String),
}

impl Default for WireBattingStatus {
    fn default() -> Self {
        WireBattingStatus::Flag(false)
    }
}

impl WireBattingStatus {
    pub fn to_domain(&self) -> Result<BattingStatus, String> {
        match self {
            WireBattingStatus::Flag(true) => Ok(BattingStatus::Out),
            WireBattingStatus::Flag(false) => Ok(BattingStatus::NotOut),
            WireBattingStatus::Label(label) => {
                match label.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
                    "out" => Ok(BattingStatus::Out),
                    "not_out" | "notout" | "batting" | "" => Ok(BattingStatus::NotOut),
                    other => Err(format!("unknown batting_status {other:?}")),
                }
            }
        }
    }
}

impl From<BattingStatus> for WireBattingStatus {
    fn from(status: BattingStatus) -> Self {
        let label = match status {
            BattingStatus::NotOut => "not_out",
            BattingStatus::Out => "out",
        };
        WireBattingStatus::Label(label.to_string())
    }
}

/// Body of `POST /{sport}/addCricketBatScore`, its response, and the
/// `ADD_BATSMAN` socket payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatScoreBody {
    #[serde(default, alias = "match_id")]
    pub match_public_id: Option<MatchId>,
    #[serde(default, alias = "team_id")]
    pub team_public_id: Option<TeamId>,
    pub batsman_public_id: PlayerId,
    #[serde(default)]
    pub position: u8,
    #[serde(default)]
    pub runs_scored: u32,
    #[serde(default)]
    pub balls_faced: u32,
    #[serde(default)]
    pub fours: u32,
    #[serde(default)]
    pub sixes: u32,
    #[serde(default)]
    pub batting_status: WireBattingStatus,
    #[serde(default)]
    pub is_striker: bool,
    #[serde(default)]
    pub is_currently_batting: bool,
    pub inning_number: InningNumber,
}

impl BatScoreBody {
    pub fn from_entry(
        match_id: &MatchId,
        team_id: Option<&TeamId>,
        inning: InningNumber,
        entry: &BattingEntry,
    ) -> Self {
        Self {
            match_public_id: Some(match_id.clone()),
            team_public_id: team_id.or(entry.team_id.as_ref()).cloned(),
            batsman_public_id: entry.player_id.clone(),
            position: entry.position,
            runs_scored: entry.runs_scored,
            balls_faced: entry.balls_faced,
            fours: entry.fours,
            sixes: entry.sixes,
            batting_status: entry.batting_status.into(),
            is_striker: entry.is_striker,
            is_currently_batting: entry.is_currently_batting,
            inning_number: inning,
        }
    }
}

/// Body of `POST /{sport}/addCricketBall` (a bowler's row), its response,
/// and the `ADD_BOWLER` socket payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlerRowBody {
    #[serde(default, alias = "match_id")]
    pub match_public_id: Option<MatchId>,
    #[serde(default, alias = "team_id")]
    pub team_public_id: Option<TeamId>,
    pub bowler_public_id: PlayerId,
    #[serde(default)]
    pub prev_bowler_public_id: Option<PlayerId>,
    #[serde(default)]
    pub ball: u32,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub wickets: u32,
    #[serde(default)]
    pub wide: u32,
    #[serde(default)]
    pub no_ball: u32,
    pub inning_number: InningNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bowling_status: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_current_bowler: Option<bool>,
    /// Present on responses when the server has already picked who bowls next.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_bowler: Option<Box<BowlerRowBody>>,
}

impl BowlerRowBody {
    pub fn from_entry(
        match_id: &MatchId,
        team_id: Option<&TeamId>,
        inning: InningNumber,
        entry: &BowlingEntry,
        previous: Option<&PlayerId>,
    ) -> Self {
        Self {
            match_public_id: Some(match_id.clone()),
            team_public_id: team_id.or(entry.team_id.as_ref()).cloned(),
            bowler_public_id: entry.player_id.clone(),
            prev_bowler_public_id: previous.cloned(),
            ball: entry.ball_number,
            runs: entry.runs_conceded,
            wickets: entry.wickets,
            wide: entry.wides,
            no_ball: entry.no_balls,
            inning_number: inning,
            bowling_status: None,
            is_current_bowler: None,
            next_bowler: None,
        }
    }
}

/// Body of `PUT /{sport}/updateCricketInning`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInningRequest {
    /// Requested status.
    pub inning: InningStatus,
    pub inning_number: InningNumber,
    pub match_id: MatchId,
    pub team_id: Option<TeamId>,
}

/// Response of `updateCricketInning` and the `UPDATE_INNING` socket payload.
///
/// Match status payloads have been seen with `match_id`, `match_public_id`
/// and plain `id`; all three are accepted here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningStatusPayload {
    #[serde(default, alias = "match_id", alias = "id")]
    pub match_public_id: Option<MatchId>,
    #[serde(alias = "inning_status", alias = "inning")]
    pub status: InningStatus,
    pub inning_number: InningNumber,
    #[serde(default, alias = "team_id", alias = "batting_team_id")]
    pub team_public_id: Option<TeamId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

/// A request produced by one of the dispatchable intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringRequest {
    AddBatScore(BatScoreBody),
    AddBall(BowlerRowBody),
    UpdateInning(UpdateInningRequest),
}

/// Fully resolved call handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RestCall {
    pub method: HttpMethod,
    pub path: String,
    pub body: serde_json::Value,
}

impl ScoringRequest {
    pub fn method(&self) -> HttpMethod {
        match self {
            ScoringRequest::AddBatScore(_) | ScoringRequest::AddBall(_) => HttpMethod::Post,
            ScoringRequest::UpdateInning(_) => HttpMethod::Put,
        }
    }

    pub fn path(&self, sport: &str) -> String {
        let endpoint = match self {
            ScoringRequest::AddBatScore(_) => "addCricketBatScore",
            ScoringRequest::AddBall(_) => "addCricketBall",
            ScoringRequest::UpdateInning(_) => "updateCricketInning",
        };
        format!("/{sport}/{endpoint}")
    }

    pub fn to_call(&self, sport: &str) -> Result<RestCall, serde_json::Error> {
        let body = match self {
            ScoringRequest::AddBatScore(body) => serde_json::to_value(body)?,
            ScoringRequest::AddBall(body) => serde_json::to_value(body)?,
            ScoringRequest::UpdateInning(body) => serde_json::to_value(body)?,
        };
        Ok(RestCall {
            method: self.method(),
            path: self.path(sport),
            body,
        })
    }
}
