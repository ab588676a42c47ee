use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::shared::app_state::AppState;

/// Application routes. Anything outside `/api` is served from `static_dir`.
pub fn configure_routes(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // CATALOG
        // ========================================
        .route("/api/products", get(handlers::a001_product::list_all))
        // ========================================
        // ORDERS
        // ========================================
        .route("/api/order", post(handlers::a002_order::submit))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}
