use axum::{extract::State, http::StatusCode, Json};
use contracts::domain::a001_product::ProductRecord;
use serde_json::{json, Value};

use crate::shared::app_state::AppState;

/// GET /api/products
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductRecord>>, (StatusCode, Json<Value>)> {
    match state.catalog.get_catalog().await {
        Ok(snapshot) => Ok(Json(snapshot.records.clone())),
        Err(e) => {
            tracing::error!("Failed to load products: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}
