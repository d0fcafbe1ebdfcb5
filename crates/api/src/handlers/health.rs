//! Health probe.

use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /health
///
/// Liveness/readiness probe: succeeds only when the database answers.
pub async fn health(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    exchange_db::health_check(&state.pool).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
