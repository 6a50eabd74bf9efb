//! Wire formats for the scoring backend (REST and WebSocket) and their
//! normalization into domain events.

pub mod normalize;
pub mod rest;
pub mod ws;

pub use normalize::{from_rest_response, from_socket, parse_socket_text, socket_events};
pub use rest::{
    BatScoreBody, BowlerRowBody, HttpMethod, InningStatusPayload, RestCall, ScoringRequest,
    UpdateInningRequest, WireBattingStatus,
};
pub use ws::InboundMessage;
