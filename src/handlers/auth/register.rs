// POST /api/auth/register - local account registration
//
// The upstream contract only documents login/me, so registration does not
// proxy anywhere: it validates input and mints an opaque token locally.
// The session cookie is not set here; the client logs in afterwards.

use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AuthError;

const MIN_PASSWORD_LEN: usize = 6;

pub async fn register(body: Option<Json<Value>>) -> Result<Json<Value>, AuthError> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let name = body.get("name").and_then(Value::as_str).unwrap_or("");
    let email = body.get("email").and_then(Value::as_str).unwrap_or("");
    let password = body.get("password").and_then(Value::as_str).unwrap_or("");

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AuthError::Validation("all fields are required".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let user = json!({
        "id": format!("user-{}", Uuid::new_v4().simple()),
        "email": email,
        "name": name,
    });
    let token = format!("mock-{}", Uuid::new_v4().simple());

    Ok(Json(json!({ "success": true, "user": user, "token": token })))
}
