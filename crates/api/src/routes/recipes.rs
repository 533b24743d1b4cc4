//! Route definitions for recipe detail, edit, moves, photos, and cook-mode.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{cook_mode, recipes};
use crate::state::AppState;

/// Recipe routes.
///
/// ```text
/// GET    /recipes/{id}        -> get_recipe
/// PATCH  /recipes/{id}        -> update_recipe
/// DELETE /recipes/{id}        -> delete_recipe (author or owner)
/// POST   /recipes/{id}/move   -> move_recipe
/// POST   /recipes/{id}/photo  -> upload_photo (multipart)
/// GET    /recipes/{id}/cook   -> get_cook_view (x-device-key)
/// PUT    /recipes/{id}/cook   -> save_progress (x-device-key)
/// DELETE /recipes/{id}/cook   -> reset_progress (x-device-key)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes/{id}",
            get(recipes::get_recipe)
                .patch(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route("/recipes/{id}/move", post(recipes::move_recipe))
        .route("/recipes/{id}/photo", post(recipes::upload_photo))
        .route(
            "/recipes/{id}/cook",
            get(cook_mode::get_cook_view)
                .put(cook_mode::save_progress)
                .delete(cook_mode::reset_progress),
        )
}
