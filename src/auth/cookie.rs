//! Session cookie handling. The bearer token from the upstream auth service
//! is carried in an http-only cookie and replayed on mutating proxy calls.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::config;

/// Cookie name for the session token.
pub const AUTH_COOKIE: &str = "auth-token";

/// Build the http-only session cookie for a freshly minted token.
pub fn session_cookie(token: &str) -> Cookie<'static> {
    let session = &config::config().session;
    Cookie::build((AUTH_COOKIE.to_string(), token.to_string()))
        .http_only(true)
        .secure(session.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::seconds(session.cookie_max_age_secs))
        .build()
}

/// Read the session token from the request's cookie jar.
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(AUTH_COOKIE).map(|cookie| cookie.value().to_string())
}
