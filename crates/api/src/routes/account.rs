//! Route definitions for the account/profile page.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/account`.
///
/// ```text
/// GET /               -> get_profile
/// PUT /display-name   -> update_display_name (family context)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(account::get_profile))
        .route("/display-name", put(account::update_display_name))
}
