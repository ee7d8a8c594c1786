// POST /api/auth/login - exchange credentials for a session cookie

use axum::{
    extract::{Host, State},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::auth::cookie::session_cookie;
use crate::auth::gateway::ensure_no_self_loop;
use crate::auth::AuthError;
use crate::config;
use crate::state::AppState;

/// Authenticate against the upstream auth service and store the issued
/// bearer token in the http-only session cookie. The response mirrors the
/// upstream exchange: `{access_token, status, id}`.
pub async fn login(
    State(state): State<AppState>,
    Host(host): Host,
    jar: CookieJar,
    body: Option<Json<Value>>,
) -> Result<impl IntoResponse, AuthError> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let email = body.get("email").and_then(Value::as_str).unwrap_or("");
    let password = body.get("password").and_then(Value::as_str).unwrap_or("");

    if email.is_empty() || password.is_empty() {
        return Err(AuthError::Validation("email and password are required".into()));
    }

    ensure_no_self_loop(
        &config::config().upstream.base_url,
        "/api/auth/login",
        Some(&host),
        "/api/auth/login",
    )?;

    let success = state.auth.login(email, password).await?;

    let jar = jar.add(session_cookie(&success.access_token));
    let response = json!({
        "access_token": success.access_token,
        "status": success.status,
        "id": success.id,
    });
    Ok((jar, Json(response)))
}
