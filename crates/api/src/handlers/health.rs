//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /healthz
///
/// Liveness probe that also pings the database.
pub async fn healthz(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    recetario_db::health_check(&state.pool).await?;
    Ok(Json(json!({ "status": "ok" })))
}
