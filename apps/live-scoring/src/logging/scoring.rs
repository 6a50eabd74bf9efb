use tracing::{debug, error, info, warn};

use crate::domain::events::{EventEnvelope, EventSource};
use crate::errors::{ProtocolError, ScoringError};

/// Log an event the state machine refused. Missing ledger rows point at a
/// data-integrity problem and are warnings; the rest are expected under
/// reordering and retries.
pub fn event_dropped(envelope: &EventEnvelope, err: &ScoringError) {
    let code = err.code();
    let key = envelope.key();
    let inning = envelope.event.inning();
    let kind = envelope.event.kind();
    let source = envelope.source.as_str();

    match err {
        ScoringError::NotFound { .. } => warn!(
            event = "SCORING_REFERENCE_MISSING",
            %code,
            inning,
            kind,
            source,
            %key,
            error = %err,
            "Event references an entry missing from the ledger"
        ),
        ScoringError::Stale(_) => info!(
            event = "SCORING_STALE_EVENT",
            %code,
            inning,
            kind,
            source,
            %key,
            error = %err,
            "Stale event dropped"
        ),
        ScoringError::InvalidTransition(_) => info!(
            event = "SCORING_INVALID_TRANSITION",
            %code,
            inning,
            kind,
            source,
            %key,
            error = %err,
            "Event rejected by state machine"
        ),
        ScoringError::Duplicate(_) => debug!(
            event = "SCORING_DUPLICATE_ENTRY",
            %code,
            inning,
            kind,
            source,
            %key,
            error = %err,
            "Event duplicates existing ledger data"
        ),
        ScoringError::Malformed(_) => error!(
            event = "SCORING_MALFORMED_EVENT",
            %code,
            inning,
            kind,
            source,
            %key,
            error = %err,
            "Malformed event"
        ),
    }
}

/// Log an event skipped because its key is still in the recent window.
pub fn duplicate_dropped(envelope: &EventEnvelope) {
    debug!(
        event = "SCORING_DUPLICATE_EVENT",
        inning = envelope.event.inning(),
        kind = envelope.event.kind(),
        source = envelope.source.as_str(),
        key = %envelope.key(),
        event_id = envelope.event_id.as_deref().unwrap_or(""),
        "Duplicate event dropped"
    );
}

/// Log a wire message that could not be normalized.
pub fn payload_rejected(source: EventSource, err: &ProtocolError) {
    warn!(
        event = "SCORING_BAD_PAYLOAD",
        code = %err.code(),
        source = source.as_str(),
        error = %err,
        "Wire message could not be normalized"
    );
}
