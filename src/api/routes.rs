//! Application route configuration.

use axum::{http::StatusCode, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::user_routes;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Test endpoint
        .route("/ping", get(ping))
        // User CRUD routes
        .nest("/users", user_routes())
        // Catch-all for unmatched routes
        .fallback(route_not_found)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness probe
async fn ping() -> &'static str {
    "pong"
}

/// Fallback for any unmatched method/path pair
async fn route_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}
