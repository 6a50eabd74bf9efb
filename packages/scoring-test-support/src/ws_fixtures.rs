//! JSON builders for wire messages.
//!
//! Payload builders return the bare body, which doubles as a REST response;
//! `frame` wraps one into a WebSocket text frame.

use serde_json::{json, Value};

pub fn frame(kind: &str, payload: Value) -> String {
    json!({ "type": kind, "payload": payload }).to_string()
}

pub fn frame_with_id(kind: &str, payload: Value, event_id: &str) -> String {
    json!({ "type": kind, "payload": payload, "event_id": event_id }).to_string()
}

pub fn inning_status(match_id: &str, inning: u8, status: &str) -> Value {
    json!({
        "match_id": match_id,
        "inning_status": status,
        "inning_number": inning,
    })
}

pub fn new_inning(inning: u8) -> Value {
    json!({ "inning_number": inning })
}

/// Batting row as sent by `addCricketBatScore`.
pub fn batsman(inning: u8, player: &str, position: u8, at_crease: bool, striker: bool) -> Value {
    json!({
        "batsman_public_id": player,
        "position": position,
        "runs_scored": 0,
        "balls_faced": 0,
        "fours": 0,
        "sixes": 0,
        "batting_status": "not_out",
        "is_striker": striker,
        "is_currently_batting": at_crease,
        "inning_number": inning,
    })
}

/// Bowler row as sent by `addCricketBall`.
pub fn bowler(inning: u8, player: &str, previous: Option<&str>) -> Value {
    json!({
        "bowler_public_id": player,
        "prev_bowler_public_id": previous.unwrap_or(""),
        "ball": 0,
        "runs": 0,
        "wickets": 0,
        "wide": 0,
        "no_ball": 0,
        "inning_number": inning,
    })
}

pub fn with_next_bowler(mut row: Value, next: &str) -> Value {
    let inning = row["inning_number"].clone();
    row["next_bowler"] = json!({ "bowler_public_id": next, "inning_number": inning });
    row
}

pub fn ball(inning: u8, batter: &str, bowler: &str, ball_number: u32, runs: u32) -> Value {
    json!({
        "inning_number": inning,
        "batsman_public_id": batter,
        "bowler_public_id": bowler,
        "ball_number": ball_number,
        "runs": runs,
    })
}

/// A wide (`wide = true`) or a no-ball.
pub fn extra(inning: u8, batter: &str, bowler: &str, ball_number: u32, runs: u32, wide: bool) -> Value {
    json!({
        "inning_number": inning,
        "batsman_public_id": batter,
        "bowler_public_id": bowler,
        "ball_number": ball_number,
        "runs": runs,
        "wide": wide,
        "no_ball": !wide,
    })
}

pub fn wicket(inning: u8, batter: &str, bowler: &str, dismissal: &str) -> Value {
    json!({
        "inning_number": inning,
        "batsman_public_id": batter,
        "bowler_public_id": bowler,
        "dismissal_type": dismissal,
    })
}

pub fn current_batsmen(inning: u8, striker: &str, non_striker: &str) -> Value {
    json!({
        "inning_number": inning,
        "striker_public_id": striker,
        "non_striker_public_id": non_striker,
    })
}
