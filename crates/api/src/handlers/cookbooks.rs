//! Handlers for the library shelf and cookbook pages: listing, cover color,
//! and the folder-scoped, searchable recipe index.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use recetario_core::color::{book_style_from_color, is_valid_color, BookStyle};
use recetario_core::cover::{cover_style, CoverStyle};
use recetario_core::error::CoreError;
use recetario_core::types::DbId;
use recetario_db::models::cookbook::Cookbook;
use recetario_db::models::folder::RecipeFolder;
use recetario_db::models::recipe::{FolderScope, RecipeSummary};
use recetario_db::repositories::{CookbookRepo, FolderRepo, RecipeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::family::FamilyContext;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response / query types
// ---------------------------------------------------------------------------

/// A cookbook annotated with its resolved visual style.
#[derive(Debug, Serialize)]
pub struct CookbookCard {
    #[serde(flatten)]
    pub cookbook: Cookbook,
    /// Style resolved from the saved color (preset or custom hex).
    pub style: BookStyle,
    /// Deterministic fallback cover derived from the cookbook id.
    pub cover: CoverStyle,
}

impl From<Cookbook> for CookbookCard {
    fn from(cookbook: Cookbook) -> Self {
        let style = book_style_from_color(cookbook.color.as_deref());
        let cover = cover_style(&format!("cookbook-{}", cookbook.id));
        Self { cookbook, style, cover }
    }
}

/// Query parameters for the recipe index.
#[derive(Debug, Default, Deserialize)]
pub struct ListRecipesQuery {
    /// `root` for folder-less recipes, a folder id for one folder, absent for
    /// every recipe in the cookbook.
    pub folder: Option<String>,
    /// Case-insensitive title substring filter.
    pub q: Option<String>,
}

/// Response for `GET /cookbooks/{id}/recipes`.
#[derive(Debug, Serialize)]
pub struct CookbookIndex {
    pub folders: Vec<RecipeFolder>,
    pub recipes: Vec<RecipeSummary>,
}

/// Request body for `PUT /cookbooks/{id}/color`.
#[derive(Debug, Deserialize)]
pub struct UpdateColorRequest {
    pub color: String,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load a cookbook and verify it belongs to the context family.
///
/// Cookbooks outside the family are reported as not found, not forbidden, so
/// the endpoint does not confirm their existence.
pub(crate) async fn cookbook_in_family(
    state: &AppState,
    ctx: &FamilyContext,
    cookbook_id: DbId,
) -> AppResult<Cookbook> {
    let cookbook = CookbookRepo::find_by_id(&state.pool, cookbook_id)
        .await?
        .filter(|cb| cb.family_id == ctx.family.id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Cookbook",
            id: cookbook_id,
        }))?;
    Ok(cookbook)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/cookbooks
///
/// The family's library shelf, newest first, with resolved cover styles.
pub async fn list_cookbooks(
    ctx: FamilyContext,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let cookbooks = CookbookRepo::list_for_family(&state.pool, ctx.family.id).await?;
    let cards: Vec<CookbookCard> = cookbooks.into_iter().map(CookbookCard::from).collect();

    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/cookbooks/{id}
///
/// One cookbook with its resolved style.
pub async fn get_cookbook(
    ctx: FamilyContext,
    State(state): State<AppState>,
    Path(cookbook_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let cookbook = cookbook_in_family(&state, &ctx, cookbook_id).await?;

    Ok(Json(DataResponse { data: CookbookCard::from(cookbook) }))
}

/// PUT /api/v1/cookbooks/{id}/color
///
/// Change the cover color. Owner only; accepts a preset key or strict hex.
pub async fn update_color(
    ctx: FamilyContext,
    State(state): State<AppState>,
    Path(cookbook_id): Path<DbId>,
    Json(input): Json<UpdateColorRequest>,
) -> AppResult<impl IntoResponse> {
    let cookbook = cookbook_in_family(&state, &ctx, cookbook_id).await?;

    if cookbook.owner_id != ctx.user_id() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Solo puedes cambiar el color de tu propio recetario.".into(),
        )));
    }
    if !is_valid_color(&input.color) {
        return Err(AppError::Core(CoreError::Validation(
            "Ese color no es válido.".into(),
        )));
    }

    let updated = CookbookRepo::update_color(&state.pool, cookbook.id, &input.color)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Cookbook",
            id: cookbook_id,
        }))?;

    tracing::info!(cookbook_id, color = %input.color, "Cookbook color updated");

    Ok(Json(DataResponse { data: CookbookCard::from(updated) }))
}

/// GET /api/v1/cookbooks/{id}/recipes
///
/// The cookbook index: recipes scoped by folder level, filtered by title
/// search, plus the folders of the requested level.
pub async fn list_recipes(
    ctx: FamilyContext,
    State(state): State<AppState>,
    Path(cookbook_id): Path<DbId>,
    Query(params): Query<ListRecipesQuery>,
) -> AppResult<impl IntoResponse> {
    let cookbook = cookbook_in_family(&state, &ctx, cookbook_id).await?;

    // Resolve the folder scope and the folder level to list.
    let (scope, parent) = match params.folder.as_deref().map(str::trim) {
        None | Some("") => (FolderScope::All, None),
        Some("root") => (FolderScope::Root, None),
        Some(raw) => {
            let folder_id: DbId = raw.parse().map_err(|_| {
                AppError::BadRequest(format!("Invalid folder parameter '{raw}'"))
            })?;
            let folder = FolderRepo::find_by_id(&state.pool, folder_id)
                .await?
                .filter(|f| f.cookbook_id == cookbook.id)
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "RecipeFolder",
                    id: folder_id,
                }))?;
            (FolderScope::In(folder.id), Some(folder.id))
        }
    };

    let folders = FolderRepo::list_children(&state.pool, cookbook.id, parent).await?;
    let recipes =
        RecipeRepo::list_for_cookbook(&state.pool, cookbook.id, scope, params.q.as_deref())
            .await?;

    Ok(Json(DataResponse { data: CookbookIndex { folders, recipes } }))
}
