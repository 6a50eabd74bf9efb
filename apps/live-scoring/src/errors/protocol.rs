//! Errors raised while decoding wire payloads at the boundary.

use thiserror::Error;

use crate::errors::error_code::ErrorCode;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bad payload for {message_type}: {detail}")]
    BadPayload {
        message_type: String,
        detail: String,
    },
}

impl ProtocolError {
    pub fn bad_payload(message_type: impl Into<String>, detail: impl ToString) -> Self {
        Self::BadPayload {
            message_type: message_type.into(),
            detail: detail.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::BadPayload
    }
}
