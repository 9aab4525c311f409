use axum::Json;

use crate::models::HealthResponse;

// GET /api/health: no cache and no upstream call involved
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
