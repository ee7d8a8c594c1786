// /api/endpoints/:id/items - item collection routes

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::Value;

use crate::auth::cookie::session_token;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::model::EndpointItem;
use crate::state::AppState;

/// GET /api/endpoints/:id/items - list an endpoint's items through the
/// filtered upstream query. The token is forwarded when present but not
/// required for reading.
pub async fn list(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> ApiResult<Vec<EndpointItem>> {
    let token = session_token(&jar);
    let items = state.items.items_by_endpoint(token.as_deref(), &id).await?;
    Ok(ApiResponse::success(items))
}

/// POST /api/endpoints/:id/items - create an item under an endpoint. The
/// caller sends `{data}`; the upstream wire shape is `{endpointId, values}`.
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
    body: Option<Json<Value>>,
) -> ApiResult<EndpointItem> {
    let token = session_token(&jar)
        .ok_or_else(|| ApiError::unauthenticated("not authenticated (auth-token cookie missing)"))?;

    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let data = match body.get("data") {
        Some(Value::Object(map)) => map.clone(),
        _ => return Err(ApiError::validation("field 'data' is required")),
    };

    let created = state.items.create_item(&token, &id, &data).await?;
    Ok(ApiResponse::success(created))
}
