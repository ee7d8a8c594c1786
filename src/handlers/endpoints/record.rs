// /api/endpoints/:id - schema registry record routes

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::auth::cookie::session_token;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::model::Endpoint;
use crate::state::AppState;

/// GET /api/endpoints/:id - fetch one endpoint with its items attached.
///
/// Two sequential upstream calls at most: the endpoint fetch, then - only
/// when the upstream did not embed any items - the filtered item query. A
/// failing item query degrades to an empty list rather than failing the
/// whole response.
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Endpoint> {
    let mut endpoint = state.endpoints.fetch_endpoint(&id).await?;

    let items = match endpoint.items.take() {
        Some(items) if !items.is_empty() => items,
        _ => match state.items.items_by_endpoint(None, &id).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(endpoint = %id, "embedded item query failed: {e}");
                Vec::new()
            }
        },
    };

    endpoint.items = Some(items);
    Ok(ApiResponse::success(endpoint))
}

/// PUT /api/endpoints/:id - 1:1 passthrough update.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
    body: Option<Json<Value>>,
) -> ApiResult<Endpoint> {
    let token = session_token(&jar)
        .ok_or_else(|| ApiError::unauthenticated("not authenticated (auth-token cookie missing)"))?;

    let patch = body.map(|Json(v)| v).unwrap_or_else(|| json!({}));
    let updated = state.endpoints.update_endpoint(&token, &id, &patch).await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/endpoints/:id - delete a schema. The upstream cascades the
/// delete to every item with a matching endpointId.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> ApiResult<Value> {
    let token = session_token(&jar)
        .ok_or_else(|| ApiError::unauthenticated("not authenticated (auth-token cookie missing)"))?;

    state.endpoints.delete_endpoint(&token, &id).await?;
    Ok(ApiResponse::success(Value::Null))
}
