pub mod account;
pub mod auth;
pub mod cookbooks;
pub mod family;
pub mod folders;
pub mod health;
pub mod recipes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/magic-link                      request login link (public)
/// /auth/callback                        exchange emailed token (public)
/// /auth/refresh                         refresh tokens (public)
/// /auth/logout                          revoke sessions (requires auth)
/// /auth/me                              current user (requires auth)
///
/// /families                             create family (POST)
/// /families/join                        join by code (POST)
/// /family                               family + members (GET, family ctx)
///
/// /account                              profile overview (GET)
/// /account/display-name                 rename within family (PUT)
///
/// /cookbooks                            library shelf (GET)
/// /cookbooks/{id}                       cookbook detail (GET)
/// /cookbooks/{id}/color                 change cover color (PUT, owner)
/// /cookbooks/{id}/recipes               index + wizard save (GET, POST)
/// /cookbooks/{id}/folders               create folder (POST)
///
/// /folders/{id}                         delete folder (DELETE)
///
/// /recipes/{id}                         detail, edit, delete (GET, PATCH, DELETE)
/// /recipes/{id}/move                    drag-and-drop folder move (POST)
/// /recipes/{id}/photo                   replace photo (POST, multipart)
/// /recipes/{id}/cook                    cook-mode view + progress (GET, PUT, DELETE)
/// ```
///
/// Everything below `/auth` requires a Bearer token; family-scoped routes
/// additionally require the `x-family-id` header, and cook-mode routes the
/// `x-device-key` header.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(family::router())
        .nest("/account", account::router())
        .merge(cookbooks::router())
        .merge(folders::router())
        .merge(recipes::router())
}
