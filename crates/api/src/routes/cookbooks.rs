//! Route definitions for the library shelf and cookbook pages.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{cookbooks, folders, recipes};
use crate::state::AppState;

/// Cookbook routes.
///
/// ```text
/// GET /cookbooks                 -> list_cookbooks
/// GET /cookbooks/{id}            -> get_cookbook
/// PUT /cookbooks/{id}/color      -> update_color (owner only)
/// GET /cookbooks/{id}/recipes    -> list_recipes (?folder=, ?q=)
/// POST /cookbooks/{id}/recipes   -> create_recipe (wizard save)
/// POST /cookbooks/{id}/folders   -> create_folder
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cookbooks", get(cookbooks::list_cookbooks))
        .route("/cookbooks/{id}", get(cookbooks::get_cookbook))
        .route("/cookbooks/{id}/color", put(cookbooks::update_color))
        .route(
            "/cookbooks/{id}/recipes",
            get(cookbooks::list_recipes).post(recipes::create_recipe),
        )
        .route("/cookbooks/{id}/folders", post(folders::create_folder))
}
