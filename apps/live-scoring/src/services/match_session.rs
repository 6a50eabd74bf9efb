//! Match session: turns scoring intents into REST calls and feeds every
//! response and socket frame through the same store.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::scoring::ScoringConfig;
use crate::domain::events::{EventEnvelope, EventSource, ScoringEvent};
use crate::domain::ids::{InningNumber, MatchId, TeamId};
use crate::domain::innings::InningStatus;
use crate::domain::ledger::{BattingEntry, BowlingEntry};
use crate::domain::snapshot::MatchSnapshot;
use crate::domain::state::MatchState;
use crate::error::AppError;
use crate::errors::{NetworkError, ProtocolError};
use crate::logging::scoring as scoring_log;
use crate::protocol::normalize;
use crate::protocol::rest::{
    BatScoreBody, BowlerRowBody, RestCall, ScoringRequest, UpdateInningRequest,
};
use crate::store::{DispatchOutcome, MatchStore};

/// Sends REST calls to the scoring backend.
#[async_trait]
pub trait ScoringTransport: Send + Sync {
    async fn send(&self, call: RestCall) -> Result<Value, NetworkError>;
}

pub struct MatchSession<T: ScoringTransport> {
    config: ScoringConfig,
    transport: T,
    store: Mutex<MatchStore>,
}

impl<T: ScoringTransport> MatchSession<T> {
    pub fn new(match_id: MatchId, config: ScoringConfig, transport: T) -> Self {
        let store = MatchStore::new(match_id, &config);
        Self {
            config,
            transport,
            store: Mutex::new(store),
        }
    }

    pub fn match_id(&self) -> MatchId {
        self.store.lock().match_id().clone()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        self.store.lock().snapshot()
    }

    pub fn state(&self) -> std::sync::Arc<MatchState> {
        self.store.lock().state()
    }

    pub fn load(&self, state: MatchState) {
        self.store.lock().load(state);
    }

    #[instrument(skip(self, entry), fields(player = %entry.player_id))]
    pub async fn request_add_batsman(
        &self,
        inning: InningNumber,
        entry: BattingEntry,
        team_id: Option<TeamId>,
    ) -> Result<Vec<DispatchOutcome>, AppError> {
        let body = BatScoreBody::from_entry(&self.match_id(), team_id.as_ref(), inning, &entry);
        self.send_and_apply(ScoringRequest::AddBatScore(body)).await
    }

    /// The previous bowler sent to the server is whoever is current locally.
    #[instrument(skip(self, entry), fields(player = %entry.player_id))]
    pub async fn request_add_bowler(
        &self,
        inning: InningNumber,
        entry: BowlingEntry,
        team_id: Option<TeamId>,
    ) -> Result<Vec<DispatchOutcome>, AppError> {
        let body = {
            let store = self.store.lock();
            let previous = store
                .current_bowler(inning)
                .map(|b| b.player_id.clone())
                .filter(|id| *id != entry.player_id);
            BowlerRowBody::from_entry(
                store.match_id(),
                team_id.as_ref(),
                inning,
                &entry,
                previous.as_ref(),
            )
        };
        self.send_and_apply(ScoringRequest::AddBall(body)).await
    }

    #[instrument(skip(self))]
    pub async fn request_set_inning_status(
        &self,
        status: InningStatus,
        inning: InningNumber,
        team_id: Option<TeamId>,
    ) -> Result<Vec<DispatchOutcome>, AppError> {
        let request = ScoringRequest::UpdateInning(UpdateInningRequest {
            inning: status,
            inning_number: inning,
            match_id: self.match_id(),
            team_id,
        });
        self.send_and_apply(request).await
    }

    /// Feeds one inbound WebSocket text frame.
    pub fn on_socket_message(&self, text: &str) -> Result<Vec<DispatchOutcome>, AppError> {
        let envelopes = normalize::socket_events(text)
            .inspect_err(|err| scoring_log::payload_rejected(EventSource::WebSocket, err))?;
        self.apply_all(&envelopes)
    }

    /// Applies a locally produced event (e.g. a ball scored on this device).
    pub fn dispatch_local(&self, event: ScoringEvent) -> Result<DispatchOutcome, AppError> {
        let envelope = EventEnvelope::local(event);
        Ok(self.store.lock().dispatch(&envelope)?)
    }

    async fn send_and_apply(
        &self,
        request: ScoringRequest,
    ) -> Result<Vec<DispatchOutcome>, AppError> {
        let call = request.to_call(&self.config.sport).map_err(ProtocolError::from)?;
        debug!(method = call.method.as_str(), path = %call.path, "sending scoring request");

        // No lock is held across the await; state may move on meanwhile and
        // the stale checks decide whether the response still applies.
        let response = self.transport.send(call).await?;

        let envelopes = normalize::from_rest_response(&request, &response)
            .inspect_err(|err| scoring_log::payload_rejected(EventSource::Rest, err))?;
        self.apply_all(&envelopes)
    }

    fn apply_all(&self, envelopes: &[EventEnvelope]) -> Result<Vec<DispatchOutcome>, AppError> {
        let outcomes = self.store.lock().dispatch_all(envelopes)?;
        let applied = outcomes.iter().filter(|o| o.is_applied()).count();
        if applied < outcomes.len() {
            info!(
                applied,
                dropped = outcomes.len() - applied,
                "some events were not applied"
            );
        }
        Ok(outcomes)
    }
}
