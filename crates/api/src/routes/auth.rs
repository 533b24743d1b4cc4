//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /magic-link  -> request_magic_link (public)
/// POST /callback    -> callback (public)
/// POST /refresh     -> refresh (public)
/// POST /logout      -> logout (requires auth)
/// GET  /me          -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/magic-link", post(auth::request_magic_link))
        .route("/callback", post(auth::callback))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}
