// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::store::StoreError;

/// Error taxonomy for the proxy surface. Every handler converts failures into
/// one of these at the boundary; nothing else crosses into a response.
#[derive(Debug, Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("{0}")]
    Validation(String),

    // 401 Unauthorized
    #[error("{0}")]
    Unauthenticated(String),

    // 404 Not Found (entity absent or ownership mismatch)
    #[error("{0}")]
    NotFound(String),

    // Upstream returned non-2xx; status forwarded verbatim
    #[error("{message}")]
    Upstream { status: u16, message: String },

    // 502 Bad Gateway (upstream response unparseable or missing fields)
    #[error("{0}")]
    Protocol(String),

    // 500, misconfigured deployment (e.g. upstream URL pointing at ourselves)
    #[error("{0}")]
    Configuration(String),

    // 500, unexpected failure; logged, generic message to the caller
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Protocol(_) => StatusCode::BAD_GATEWAY,
            ApiError::Configuration(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-safe error message. Internal details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.client_message(),
        })
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Upstream { status, message } => ApiError::Upstream { status, message },
            StoreError::Protocol(msg) => ApiError::Protocol(msg),
            StoreError::NotFound(msg) => ApiError::NotFound(msg),
            StoreError::Transport(e) => {
                tracing::error!("upstream transport failure: {e}");
                ApiError::Internal(e.to_string())
            }
        }
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!("internal error: {detail}");
        }
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
