use axum::Json;

use crate::api::response::ApiResponse;

/// GET /health - Liveness probe, no session needed
pub async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("OK"))
}
