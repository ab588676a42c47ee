use axum::{body::Bytes, extract::State, Json};
use contracts::domain::a002_order::{OrderRequest, OrderResponse};

use crate::shared::app_state::AppState;

/// POST /api/order
///
/// Never fails: an unreadable body is logged and handled as an empty order.
pub async fn submit(State(state): State<AppState>, body: Bytes) -> Json<OrderResponse> {
    let order = if body.is_empty() {
        OrderRequest::default()
    } else {
        serde_json::from_slice::<OrderRequest>(&body).unwrap_or_else(|e| {
            tracing::warn!("Malformed order payload, treating as empty order: {}", e);
            OrderRequest::default()
        })
    };

    Json(state.orders.submit(order).await)
}
