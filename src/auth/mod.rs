//! Credential/session gateway: exchanges credentials for an opaque bearer
//! token with the upstream auth service and resolves the current user.

pub mod cookie;
pub mod gateway;

use async_trait::async_trait;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::model::SessionUser;

/// Successful credential exchange. The token is opaque to this application;
/// it is only ever stored in the session cookie and replayed as a bearer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSuccess {
    pub access_token: String,
    pub status: u16,
    pub id: String,
}

/// Auth-surface errors. Rendered as `{"success": false, "message", "status"}`
/// rather than the proxy envelope.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Protocol(String),

    #[error("{0}")]
    Configuration(String),

    #[error("internal server error")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AuthError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AuthError::Protocol(_) => StatusCode::BAD_GATEWAY,
            AuthError::Configuration(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn client_message(&self) -> String {
        match self {
            AuthError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        if let AuthError::Internal(detail) = &self {
            tracing::error!("auth internal error: {detail}");
        }
        let status = self.status_code();
        let body = json!({
            "success": false,
            "message": self.client_message(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}

/// The credential/session collaborator. The live implementation proxies the
/// upstream auth service; tests plug in a stub.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, AuthError>;

    /// Resolve the user behind a bearer token, deriving the display name
    /// from the email.
    async fn me(&self, token: &str) -> Result<SessionUser, AuthError>;
}
