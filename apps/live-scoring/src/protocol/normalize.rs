//! Boundary normalization: wire shapes in, `EventEnvelope`s out.
//!
//! Key variance (`match_id` vs `id`, label vs flag) is resolved by the serde
//! aliases on the wire types; nothing past this module looks at raw JSON.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::events::{
    BallBowled, BatsmanAdded, BowlerChanged, CurrentBatsmenSet, EventEnvelope, EventSource,
    InningsAdvanced, InningsStatusChanged, ScoringEvent, WicketFallen,
};
use crate::domain::ids::PlayerId;
use crate::domain::ledger::{BattingEntry, BowlingEntry};
use crate::domain::rules::MAX_RUNS_PER_DELIVERY;
use crate::errors::ProtocolError;
use crate::protocol::rest::{BatScoreBody, BowlerRowBody, InningStatusPayload, ScoringRequest};
use crate::protocol::ws::{
    self, BallPayload, InboundMessage, NewInningPayload, SetBatsmenPayload, WicketPayload,
};

pub fn parse_socket_text(text: &str) -> Result<InboundMessage, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

/// Normalizes one inbound frame. Unknown message types yield no events.
pub fn from_socket(msg: &InboundMessage) -> Result<Vec<EventEnvelope>, ProtocolError> {
    let kind = msg.kind.as_str();
    let events = match kind {
        ws::ADD_BATSMAN => vec![batsman_added(&decode::<BatScoreBody>(kind, &msg.payload)?, kind)?],
        ws::ADD_BOWLER => bowler_changes(&decode::<BowlerRowBody>(kind, &msg.payload)?, kind)?,
        ws::UPDATE_BALL => vec![ball_bowled(decode::<BallPayload>(kind, &msg.payload)?, kind)?],
        ws::ADD_WICKET => vec![wicket_fallen(decode::<WicketPayload>(kind, &msg.payload)?, kind)?],
        ws::UPDATE_INNING => vec![inning_status(decode::<InningStatusPayload>(kind, &msg.payload)?)],
        ws::NEW_INNING => {
            vec![innings_advanced(decode::<NewInningPayload>(kind, &msg.payload)?, kind)?]
        }
        ws::SET_CURRENT_BATSMEN => {
            vec![current_batsmen(decode::<SetBatsmenPayload>(kind, &msg.payload)?, kind)?]
        }
        other => {
            debug!(message_type = other, "ignoring unhandled socket message");
            Vec::new()
        }
    };
    Ok(envelopes(EventSource::WebSocket, msg.event_id.as_deref(), events))
}

pub fn socket_events(text: &str) -> Result<Vec<EventEnvelope>, ProtocolError> {
    from_socket(&parse_socket_text(text)?)
}

/// Normalizes the response to a REST call; the request decides which body
/// shape to expect.
pub fn from_rest_response(
    request: &ScoringRequest,
    response: &Value,
) -> Result<Vec<EventEnvelope>, ProtocolError> {
    let events = match request {
        ScoringRequest::AddBatScore(_) => {
            let kind = "addCricketBatScore";
            vec![batsman_added(&decode::<BatScoreBody>(kind, response)?, kind)?]
        }
        ScoringRequest::AddBall(_) => {
            let kind = "addCricketBall";
            bowler_changes(&decode::<BowlerRowBody>(kind, response)?, kind)?
        }
        ScoringRequest::UpdateInning(_) => {
            vec![inning_status(decode::<InningStatusPayload>("updateCricketInning", response)?)]
        }
    };
    Ok(envelopes(EventSource::Rest, None, events))
}

fn decode<T: DeserializeOwned>(message_type: &str, payload: &Value) -> Result<T, ProtocolError> {
    T::deserialize(payload).map_err(|e| ProtocolError::bad_payload(message_type, e))
}

/// The first event keeps the server id; later events from the same frame get
/// a suffixed id so they do not collide in the dedup window.
fn envelopes(
    source: EventSource,
    event_id: Option<&str>,
    events: Vec<ScoringEvent>,
) -> Vec<EventEnvelope> {
    events
        .into_iter()
        .enumerate()
        .map(|(i, event)| {
            let id = event_id.map(|id| match i {
                0 => id.to_string(),
                n => format!("{id}#{n}"),
            });
            EventEnvelope::new(source, event).with_event_id(id)
        })
        .collect()
}

fn require_id(message_type: &str, field: &str, id: &PlayerId) -> Result<(), ProtocolError> {
    if id.as_str().trim().is_empty() {
        return Err(ProtocolError::bad_payload(
            message_type,
            format!("{field} is empty"),
        ));
    }
    Ok(())
}

fn optional_id(id: Option<&PlayerId>) -> Option<PlayerId> {
    id.filter(|id| !id.as_str().trim().is_empty()).cloned()
}

fn batsman_added(body: &BatScoreBody, message_type: &str) -> Result<ScoringEvent, ProtocolError> {
    require_id(message_type, "batsman_public_id", &body.batsman_public_id)?;
    if body.is_striker && !body.is_currently_batting {
        return Err(ProtocolError::bad_payload(
            message_type,
            "is_striker set for a batter not currently batting",
        ));
    }
    let batting_status = body
        .batting_status
        .to_domain()
        .map_err(|detail| ProtocolError::bad_payload(message_type, detail))?;

    let entry = BattingEntry {
        player_id: body.batsman_public_id.clone(),
        team_id: body.team_public_id.clone(),
        position: body.position,
        runs_scored: body.runs_scored,
        balls_faced: body.balls_faced,
        fours: body.fours,
        sixes: body.sixes,
        batting_status,
        is_striker: body.is_striker,
        is_currently_batting: body.is_currently_batting,
    };
    Ok(ScoringEvent::BatsmanAdded(BatsmanAdded {
        inning: body.inning_number,
        entry,
    }))
}

fn bowling_entry(row: &BowlerRowBody) -> BowlingEntry {
    BowlingEntry {
        player_id: row.bowler_public_id.clone(),
        team_id: row.team_public_id.clone(),
        ball_number: row.ball,
        runs_conceded: row.runs,
        wickets: row.wickets,
        wides: row.wide,
        no_balls: row.no_ball,
        bowling_status: row.bowling_status.unwrap_or(true),
        is_current_bowler: row.is_current_bowler.unwrap_or(true),
    }
}

/// A bowler row makes its bowler current; a `next_bowler` hands over to the
/// next bowler straight after.
fn bowler_changes(row: &BowlerRowBody, message_type: &str) -> Result<Vec<ScoringEvent>, ProtocolError> {
    require_id(message_type, "bowler_public_id", &row.bowler_public_id)?;
    let mut events = vec![ScoringEvent::BowlerChanged(BowlerChanged {
        inning: row.inning_number,
        bowler: bowling_entry(row),
        previous_bowler_id: optional_id(row.prev_bowler_public_id.as_ref()),
    })];

    if let Some(next) = row.next_bowler.as_deref() {
        require_id(message_type, "next_bowler.bowler_public_id", &next.bowler_public_id)?;
        if next.bowler_public_id != row.bowler_public_id {
            events.push(ScoringEvent::BowlerChanged(BowlerChanged {
                inning: next.inning_number,
                bowler: bowling_entry(next),
                previous_bowler_id: Some(row.bowler_public_id.clone()),
            }));
        }
    }
    Ok(events)
}

fn ball_bowled(ball: BallPayload, message_type: &str) -> Result<ScoringEvent, ProtocolError> {
    require_id(message_type, "batsman_public_id", &ball.batsman_public_id)?;
    require_id(message_type, "bowler_public_id", &ball.bowler_public_id)?;
    if ball.wide && ball.no_ball {
        return Err(ProtocolError::bad_payload(
            message_type,
            "delivery flagged both wide and no-ball",
        ));
    }
    if ball.runs > MAX_RUNS_PER_DELIVERY {
        return Err(ProtocolError::bad_payload(
            message_type,
            format!("{} runs off one delivery (max {MAX_RUNS_PER_DELIVERY})", ball.runs),
        ));
    }
    Ok(ScoringEvent::BallBowled(BallBowled {
        inning: ball.inning_number,
        batsman_id: ball.batsman_public_id,
        bowler_id: ball.bowler_public_id,
        ball_number: ball.ball_number,
        runs: ball.runs,
        wide: ball.wide,
        no_ball: ball.no_ball,
    }))
}

fn wicket_fallen(wicket: WicketPayload, message_type: &str) -> Result<ScoringEvent, ProtocolError> {
    require_id(message_type, "batsman_public_id", &wicket.batsman_public_id)?;
    require_id(message_type, "bowler_public_id", &wicket.bowler_public_id)?;
    Ok(ScoringEvent::WicketFallen(WicketFallen {
        inning: wicket.inning_number,
        fielder_id: optional_id(wicket.fielder_public_id.as_ref()),
        batsman_id: wicket.batsman_public_id,
        bowler_id: wicket.bowler_public_id,
        dismissal_type: wicket.dismissal_type,
        ball_number: wicket.ball_number,
    }))
}

fn current_batsmen(pair: SetBatsmenPayload, message_type: &str) -> Result<ScoringEvent, ProtocolError> {
    require_id(message_type, "striker_public_id", &pair.striker_public_id)?;
    require_id(message_type, "non_striker_public_id", &pair.non_striker_public_id)?;
    if pair.striker_public_id == pair.non_striker_public_id {
        return Err(ProtocolError::bad_payload(
            message_type,
            "striker and non-striker are the same player",
        ));
    }
    Ok(ScoringEvent::CurrentBatsmenSet(CurrentBatsmenSet {
        inning: pair.inning_number,
        striker_id: pair.striker_public_id,
        non_striker_id: pair.non_striker_public_id,
    }))
}

fn innings_advanced(payload: NewInningPayload, message_type: &str) -> Result<ScoringEvent, ProtocolError> {
    if payload.inning_number == 0 {
        return Err(ProtocolError::bad_payload(
            message_type,
            "inning_number must be 1 or more",
        ));
    }
    Ok(ScoringEvent::InningsAdvanced(InningsAdvanced {
        inning: payload.inning_number,
    }))
}

fn inning_status(payload: InningStatusPayload) -> ScoringEvent {
    ScoringEvent::InningsStatusChanged(InningsStatusChanged {
        inning: payload.inning_number,
        status: payload.status,
        batting_team_id: payload.team_public_id,
    })
}
