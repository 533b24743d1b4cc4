//! Route definitions for family creation, joining, and detail.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::family;
use crate::state::AppState;

/// Family routes.
///
/// ```text
/// POST /families       -> create_family
/// POST /families/join  -> join_family
/// GET  /family         -> get_family (family context)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/families", post(family::create_family))
        .route("/families/join", post(family::join_family))
        .route("/family", get(family::get_family))
}
