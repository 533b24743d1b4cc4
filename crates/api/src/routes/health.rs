//! Root-level health check route.

use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Routes mounted at the application root.
///
/// ```text
/// GET /healthz -> healthz
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/healthz", get(health::healthz))
}
