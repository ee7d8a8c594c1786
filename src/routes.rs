use axum::{
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::route_guard::route_guard;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Service info and liveness
        .route("/", get(root))
        .route("/health", get(health))
        // API surface
        .merge(auth_routes())
        .merge(endpoint_routes())
        .merge(item_routes())
        // Guarded frontend pages
        .merge(page_routes())
        // Global middleware
        .layer(axum::middleware::from_fn_with_state(state.clone(), route_guard))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/me", get(auth::me))
}

fn endpoint_routes() -> Router<AppState> {
    use handlers::endpoints;

    Router::new()
        .route("/api/endpoints", get(endpoints::list).post(endpoints::create))
        .route(
            "/api/endpoints/:id",
            get(endpoints::get)
                .put(endpoints::update)
                .delete(endpoints::delete),
        )
}

fn item_routes() -> Router<AppState> {
    use handlers::items;

    Router::new()
        .route(
            "/api/endpoints/:id/items",
            get(items::list).post(items::create),
        )
        .route(
            "/api/endpoints/:id/items/:item_id",
            get(items::get).put(items::update).delete(items::delete),
        )
}

fn page_routes() -> Router<AppState> {
    use handlers::pages;

    Router::new()
        .route("/login", get(pages::shell))
        .route("/create", get(pages::shell))
        .route("/home", get(pages::shell))
        .route("/home/:id", get(pages::shell))
        .route("/home/:id/:item_id", get(pages::shell))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "MakeAPI Gateway",
            "version": version,
            "description": "Backend-for-frontend for the MakeAPI dynamic API builder",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/api/auth/login, /api/auth/register (public), /api/me (cookie)",
                "endpoints": "/api/endpoints[/:id] (GET public, mutations need the session cookie)",
                "items": "/api/endpoints/:id/items[/:itemId]",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    let now = chrono::Utc::now();
    let config = crate::config::config();

    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": now,
            "upstream": config.upstream.base_url,
        }
    }))
}
