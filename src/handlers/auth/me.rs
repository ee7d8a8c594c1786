// GET /api/me - resolve the authenticated user from the session cookie

use axum::{
    extract::{Host, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::auth::cookie::session_token;
use crate::auth::gateway::ensure_no_self_loop;
use crate::auth::AuthError;
use crate::config;
use crate::state::AppState;

/// Forward the cookie token to the upstream "me" endpoint and attach the
/// derived display name.
pub async fn me(
    State(state): State<AppState>,
    Host(host): Host,
    jar: CookieJar,
) -> Result<Json<Value>, AuthError> {
    let token = session_token(&jar)
        .ok_or_else(|| AuthError::Unauthenticated("authentication token not found".into()))?;

    ensure_no_self_loop(
        &config::config().upstream.base_url,
        "/api/auth/me",
        Some(&host),
        "/api/me",
    )?;

    let user = state.auth.me(&token).await?;
    Ok(Json(json!({ "success": true, "user": user })))
}
