//! Live auth gateway: proxies login/me to the upstream auth service.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::{json, Value};
use url::Url;

use crate::auth::{AuthError, AuthService, LoginSuccess};
use crate::config;
use crate::model::user::display_name_from_email;
use crate::model::SessionUser;

pub struct UpstreamAuthGateway {
    client: Client,
    base_url: String,
}

impl UpstreamAuthGateway {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(&config::config().upstream.base_url)
    }

    async fn exchange(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, Value), AuthError> {
        let response = request
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|_| AuthError::Protocol("authentication API returned a non-JSON response".into()))?;
        Ok((status, body))
    }
}

/// Fail fast when the configured upstream would route a proxy call back to
/// the route currently handling it. Compares the resolved target's
/// host[:port] and path against the incoming request's.
pub fn ensure_no_self_loop(
    base_url: &str,
    target_path: &str,
    incoming_host: Option<&str>,
    incoming_path: &str,
) -> Result<(), AuthError> {
    let base = Url::parse(base_url)
        .map_err(|e| AuthError::Configuration(format!("invalid upstream base URL: {e}")))?;
    let target = base
        .join(target_path)
        .map_err(|e| AuthError::Configuration(format!("invalid upstream base URL: {e}")))?;

    let Some(host) = incoming_host else {
        return Ok(());
    };

    let target_authority = match (target.host_str(), target.port()) {
        (Some(h), Some(p)) => format!("{h}:{p}"),
        (Some(h), None) => h.to_string(),
        (None, _) => return Ok(()),
    };

    if target_authority.eq_ignore_ascii_case(host) && target.path() == incoming_path {
        return Err(AuthError::Configuration(
            "upstream base URL points back at this route; configure a different base to avoid a request loop"
                .into(),
        ));
    }
    Ok(())
}

fn opaque_id(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn upstream_rejection(status: StatusCode, body: &Value, fallback: &str) -> AuthError {
    let forwarded = body
        .get("status")
        .and_then(Value::as_u64)
        .map(|s| s as u16)
        .unwrap_or(status.as_u16());
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string();
    AuthError::Upstream { status: forwarded, message }
}

#[async_trait]
impl AuthService for UpstreamAuthGateway {
    async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, AuthError> {
        let (status, body) = self
            .exchange(
                self.client
                    .post(format!("{}/api/auth/login", self.base_url))
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;

        if !status.is_success() {
            return Err(upstream_rejection(status, &body, "authentication failed upstream"));
        }

        let access_token = body
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let id = opaque_id(body.get("id"));

        match (access_token, id) {
            (Some(access_token), Some(id)) => Ok(LoginSuccess {
                access_token,
                status: body
                    .get("status")
                    .and_then(Value::as_u64)
                    .map(|s| s as u16)
                    .unwrap_or(200),
                id,
            }),
            _ => Err(AuthError::Protocol(
                "authentication API response is missing access_token/id".into(),
            )),
        }
    }

    async fn me(&self, token: &str) -> Result<SessionUser, AuthError> {
        let (status, body) = self
            .exchange(
                self.client
                    .get(format!("{}/api/auth/me", self.base_url))
                    .header(header::ACCEPT, "application/json")
                    .bearer_auth(token),
            )
            .await?;

        if !status.is_success() {
            return Err(upstream_rejection(status, &body, "failed to resolve the authenticated user"));
        }

        let id = opaque_id(body.get("idUser"));
        let email = body.get("email").and_then(Value::as_str).map(str::to_string);

        match (id, email) {
            (Some(id), Some(email)) => {
                let name = display_name_from_email(&email);
                Ok(SessionUser { id, email, name })
            }
            _ => Err(AuthError::Protocol(
                "authentication API response is missing idUser/email".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_loop_is_detected() {
        let err = ensure_no_self_loop(
            "http://localhost:3000",
            "/api/auth/login",
            Some("localhost:3000"),
            "/api/auth/login",
        );
        assert!(matches!(err, Err(AuthError::Configuration(_))));
    }

    #[test]
    fn different_host_or_path_is_fine() {
        assert!(ensure_no_self_loop(
            "https://makeapi.netlify.app",
            "/api/auth/login",
            Some("localhost:3000"),
            "/api/auth/login",
        )
        .is_ok());

        // same origin, different path: /api/me proxying to /api/auth/me
        assert!(ensure_no_self_loop(
            "http://localhost:3000",
            "/api/auth/me",
            Some("localhost:3000"),
            "/api/me",
        )
        .is_ok());
    }

    #[test]
    fn invalid_base_url_is_a_configuration_error() {
        let err = ensure_no_self_loop("not a url", "/api/auth/login", None, "/x");
        assert!(matches!(err, Err(AuthError::Configuration(_))));
    }

    #[test]
    fn opaque_id_accepts_strings_and_numbers() {
        assert_eq!(opaque_id(Some(&Value::String("u1".into()))), Some("u1".into()));
        assert_eq!(opaque_id(Some(&serde_json::json!(42))), Some("42".into()));
        assert_eq!(opaque_id(Some(&Value::String(String::new()))), None);
        assert_eq!(opaque_id(None), None);
    }
}
