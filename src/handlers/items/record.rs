// /api/endpoints/:id/items/:item_id - item record routes
//
// Upstream items are addressed flat; the endpoint id in the route is an
// application-level consistency claim. A mismatch is reported as 404, not
// 403: items must not be discoverable outside their endpoint context.

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

/// GET /api/endpoints/:id/items/:item_id
pub async fn get(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
) -> ApiResult<EndpointItem> {
    let item = state.items.fetch_item(&item_id).await?;
    if item.owned_by_other(&id) {
        return Err(ApiError::not_found("item does not belong to this endpoint"));
    }
    Ok(ApiResponse::success(item))
}

/// PUT /api/endpoints/:id/items/:item_id - full overwrite of the item's
/// values. Accepts `{values}` or `{data}` from the caller and forwards the
/// upstream's PATCH shape `{values}`.
pub async fn update(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
    jar: CookieJar,
    body: Option<Json<Value>>,
) -> ApiResult<EndpointItem> {
    let token = session_token(&jar)
        .ok_or_else(|| ApiError::unauthenticated("not authenticated (auth-token cookie missing)"))?;

    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let values = match body.get("values").or_else(|| body.get("data")) {
        Some(Value::Object(map)) => map.clone(),
        _ => return Err(ApiError::validation("invalid body: send { values: { ... } }")),
    };

    let updated = state.items.update_item(&token, &item_id, &values).await?;
    if updated.owned_by_other(&id) {
        return Err(ApiError::not_found("item does not belong to this endpoint"));
    }
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/endpoints/:id/items/:item_id
pub async fn delete(
    State(state): State<AppState>,
    Path((_id, item_id)): Path<(String, String)>,
    jar: CookieJar,
) -> ApiResult<Value> {
    let token = session_token(&jar)
        .ok_or_else(|| ApiError::unauthenticated("not authenticated (auth-token cookie missing)"))?;

    state.items.delete_item(&token, &item_id).await?;
    Ok(ApiResponse::success(Value::Null))
}
