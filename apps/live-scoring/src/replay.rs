//! Replays a newline-delimited WebSocket log through a `MatchStore`.

use std::path::Path;

use serde::Serialize;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::config::scoring::ScoringConfig;
use crate::domain::events::EventSource;
use crate::domain::ids::MatchId;
use crate::error::AppError;
use crate::logging::scoring as scoring_log;
use crate::protocol::normalize;
use crate::store::{DispatchOutcome, MatchStore};

/// Counters for one replay run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub lines: usize,
    pub blank: usize,
    /// Lines that failed to decode or normalize.
    pub rejected_lines: usize,
    pub applied: usize,
    pub duplicates: usize,
    pub ignored: usize,
    pub malformed: usize,
}

impl ReplaySummary {
    pub fn is_clean(&self) -> bool {
        self.rejected_lines == 0 && self.malformed == 0
    }
}

/// Feeds every line of `reader` through normalization and dispatch. Bad
/// lines are counted and skipped; only I/O failures abort the run.
pub async fn replay<R>(reader: R, store: &mut MatchStore) -> Result<ReplaySummary, AppError>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = ReplaySummary::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        summary.lines += 1;
        if line.trim().is_empty() {
            summary.blank += 1;
            continue;
        }

        let envelopes = match normalize::socket_events(&line) {
            Ok(envelopes) => envelopes,
            Err(err) => {
                scoring_log::payload_rejected(EventSource::WebSocket, &err);
                summary.rejected_lines += 1;
                continue;
            }
        };

        for envelope in &envelopes {
            match store.dispatch(envelope) {
                Ok(DispatchOutcome::Applied(_)) => summary.applied += 1,
                Ok(DispatchOutcome::Duplicate) => summary.duplicates += 1,
                Ok(DispatchOutcome::Ignored(_)) => summary.ignored += 1,
                Err(err) => {
                    warn!(line = summary.lines, error = %err, "malformed event in replay");
                    summary.malformed += 1;
                }
            }
        }
    }

    info!(
        lines = summary.lines,
        applied = summary.applied,
        duplicates = summary.duplicates,
        ignored = summary.ignored,
        rejected_lines = summary.rejected_lines,
        malformed = summary.malformed,
        "replay finished"
    );
    Ok(summary)
}

pub async fn replay_file(
    path: &Path,
    match_id: MatchId,
    config: &ScoringConfig,
) -> Result<(MatchStore, ReplaySummary), AppError> {
    let file = File::open(path).await?;
    let mut store = MatchStore::new(match_id, config);
    let summary = replay(BufReader::new(file), &mut store).await?;
    Ok((store, summary))
}
