use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::debug;
use wc_core::DecodeError;

use crate::store::RejectReason;

/// Why a `POST /clip` was refused.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("malformed snapshot: {0}")]
    Decode(#[from] DecodeError),

    #[error("malformed form field {field}: {reason}")]
    Form { field: &'static str, reason: String },

    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("request body rejected: {reason}")]
    Body { status: StatusCode, reason: String },

    #[error(transparent)]
    Rejected(#[from] RejectReason),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Decode(_) | RelayError::Form { .. } => StatusCode::BAD_REQUEST,
            RelayError::Multipart(err) => err.status(),
            RelayError::Body { status, .. } => *status,
            RelayError::Rejected(RejectReason::EmptyContent) => StatusCode::BAD_REQUEST,
            RelayError::Rejected(RejectReason::Stale { .. }) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(status = status.as_u16(), error = %self, "Rejected push");
        (status, self.to_string()).into_response()
    }
}
