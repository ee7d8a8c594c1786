// /api/endpoints - schema registry collection routes

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::Value;

use crate::auth::cookie::session_token;
use crate::error::ApiError;
use crate::form::validate::validate_draft_fields;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::model::endpoint::EndpointDraft;
use crate::model::{Endpoint, EndpointField};
use crate::state::AppState;

/// GET /api/endpoints - list all endpoint schemas. An empty upstream list is
/// a success, never an error.
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Endpoint>> {
    let endpoints = state.endpoints.list_endpoints().await?;
    Ok(ApiResponse::success(endpoints))
}

/// POST /api/endpoints - create an endpoint schema.
pub async fn create(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<Value>>,
) -> ApiResult<Endpoint> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let title = body.get("title").and_then(Value::as_str).unwrap_or("").trim();
    let campos_raw = body.get("campos");

    if title.is_empty() || !campos_raw.is_some_and(Value::is_array) {
        return Err(ApiError::validation("title and campos are required"));
    }

    let campos: Vec<EndpointField> = serde_json::from_value(campos_raw.cloned().unwrap_or_default())
        .map_err(|e| ApiError::validation(format!("invalid campos: {e}")))?;
    let campos = validate_draft_fields(&campos).map_err(|e| ApiError::validation(e.to_string()))?;

    let token = session_token(&jar)
        .ok_or_else(|| ApiError::unauthenticated("not authenticated (auth-token cookie missing)"))?;

    let draft = EndpointDraft { title: title.to_string(), campos };
    let created = state.endpoints.create_endpoint(&token, &draft).await?;
    Ok(ApiResponse::success(created))
}
