use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::util::ServiceExt;

use makeapi_gateway::auth::{AuthError, AuthService, LoginSuccess};
use makeapi_gateway::model::user::display_name_from_email;
use makeapi_gateway::model::SessionUser;
use makeapi_gateway::store::MemoryStore;
use makeapi_gateway::{app, AppState};

/// Token the stub auth service issues and accepts.
pub const TEST_TOKEN: &str = "test-token";
pub const TEST_EMAIL: &str = "joao.silva@example.com";
pub const TEST_PASSWORD: &str = "segredo1";

/// Stub credential gateway: one known account, opaque fixed token.
pub struct StubAuth;

#[async_trait]
impl AuthService for StubAuth {
    async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, AuthError> {
        if email == TEST_EMAIL && password == TEST_PASSWORD {
            Ok(LoginSuccess {
                access_token: TEST_TOKEN.to_string(),
                status: 200,
                id: "user-1".to_string(),
            })
        } else {
            Err(AuthError::Upstream { status: 401, message: "invalid credentials".into() })
        }
    }

    async fn me(&self, token: &str) -> Result<SessionUser, AuthError> {
        if token == TEST_TOKEN {
            Ok(SessionUser {
                id: "user-1".to_string(),
                email: TEST_EMAIL.to_string(),
                name: display_name_from_email(TEST_EMAIL),
            })
        } else {
            Err(AuthError::Upstream { status: 401, message: "invalid token".into() })
        }
    }
}

/// Router wired to the in-memory store and the stub auth service. The store
/// is returned too so tests can seed or inspect it directly.
pub fn test_app() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let state = AppState::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(StubAuth),
    );
    (app(state), store)
}

/// Build a request. Cookie is the raw session token when given.
pub fn request(
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "localhost:3000");

    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("auth-token={token}"));
    }

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

/// Fire a request at the router and decode the JSON response.
pub async fn send(router: &Router, req: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = router.clone().oneshot(req).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    Ok((status, body))
}

/// Fire a request and hand back the raw response for header assertions.
pub async fn send_raw(
    router: &Router,
    req: Request<Body>,
) -> Result<axum::http::Response<Body>> {
    Ok(router.clone().oneshot(req).await?)
}
