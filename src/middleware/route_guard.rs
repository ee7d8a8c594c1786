//! Session gate for the page routes. API routes and static assets pass
//! through untouched; protected pages bounce unauthenticated visitors to the
//! login page (remembering where they were headed), and an authenticated
//! visit to the login page bounces straight to the dashboard.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::cookie::session_token;
use crate::state::AppState;

const PROTECTED_PREFIXES: &[&str] = &["/home", "/create"];
const PASSTHROUGH_PREFIXES: &[&str] = &["/api", "/assets", "/favicon", "/health"];

pub async fn route_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if path == "/" || PASSTHROUGH_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return next.run(request).await;
    }

    if PROTECTED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        if !session_is_valid(&state, &jar).await {
            return Redirect::temporary(&login_redirect(&path)).into_response();
        }
        return next.run(request).await;
    }

    if path == "/login" && session_is_valid(&state, &jar).await {
        return Redirect::temporary("/home").into_response();
    }

    next.run(request).await
}

/// A session is valid when the cookie token resolves to a user upstream.
async fn session_is_valid(state: &AppState, jar: &CookieJar) -> bool {
    match session_token(jar) {
        Some(token) => state.auth.me(&token).await.is_ok(),
        None => false,
    }
}

fn login_redirect(next_path: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("next", next_path)
        .finish();
    format!("/login?{query}")
}
