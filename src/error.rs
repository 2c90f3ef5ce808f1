use axum::response::{IntoResponse, Response};
use http::StatusCode;
use tracing::{error, warn};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures of a single check request.
///
/// Pod listing failures share the 400 status with input errors; callers
/// cannot tell a bad threshold from an unreachable API server by status alone.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("invalid {field} threshold {value:?}: {source}")]
    InvalidThreshold {
        field: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("failed to list pods: {0}")]
    PodCount(#[source] BoxError),

    #[error("failed to encode response: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebhookError::MalformedBody(_)
            | WebhookError::InvalidThreshold { .. }
            | WebhookError::PodCount(_) => StatusCode::BAD_REQUEST,
            WebhookError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("check failed: {}", self);
        } else {
            warn!("check rejected: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
