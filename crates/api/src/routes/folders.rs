//! Route definitions for folder deletion.

use axum::routing::delete;
use axum::Router;

use crate::handlers::folders;
use crate::state::AppState;

/// Folder routes.
///
/// ```text
/// DELETE /folders/{id} -> delete_folder
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/folders/{id}", delete(folders::delete_folder))
}
