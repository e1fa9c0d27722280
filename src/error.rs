//! Error taxonomy and the JSON error envelope returned to clients

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Failures talking to the routing decision service. Always recovered by the fallback.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("routing service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("routing decision timed out after {0}s")]
    Timeout(u64),

    #[error("routing service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("routing response could not be decoded: {0}")]
    Decode(String),

    #[error("routing service is not configured: {0}")]
    NotConfigured(&'static str)
}

/// Failures of the fallback provider. Never recovered.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("fallback provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("fallback provider timed out after {0}s")]
    Timeout(u64),

    #[error("fallback provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("fallback response could not be decoded: {0}")]
    Decode(String)
}

#[derive(Debug, Error)]
pub enum RouterError {
    /// Both the routing service and the fallback provider failed
    #[error("upstream unavailable: {provider} (routing failed first: {routing})")]
    UpstreamUnavailable {
        routing: RoutingError,
        provider: ProviderError
    }
}

#[derive(Debug, Error)]
#[error("feedback for session {session_id} was not recorded: {source}")]
pub struct FeedbackError {
    pub session_id: String,
    #[source]
    pub source: RoutingError
}

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Feedback(#[from] FeedbackError)
}

impl ApiError {

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Router(_) | Self::Feedback(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "invalid_request_error",
            Self::Router(_) => "internal_error",
            Self::Feedback(_) => "feedback_error"
        }
    }

}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {

        let error_type = self.error_type();

        // upstream messages are forwarded verbatim
        let body = json!({
            "error": {
                "message": self.to_string(),
                "type": error_type,
                "code": error_type
            }
        });

        (self.status_code(), Json(body)).into_response()

    }
}
