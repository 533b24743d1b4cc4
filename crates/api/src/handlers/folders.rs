//! Handlers for folder creation and deletion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use recetario_core::error::CoreError;
use recetario_core::types::DbId;
use recetario_db::models::folder::CreateFolder;
use recetario_db::repositories::{CookbookRepo, FolderRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::cookbooks::cookbook_in_family;
use crate::middleware::family::FamilyContext;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /cookbooks/{id}/folders`.
#[derive(Debug, Deserialize)]
pub struct CreateFolderRequest {
    pub name: String,
    /// Folder to nest under; absent creates a root folder.
    #[serde(default)]
    pub parent_id: Option<DbId>,
}

/// POST /api/v1/cookbooks/{id}/folders
///
/// Create a folder as a child of the currently open folder (or at the root).
pub async fn create_folder(
    ctx: FamilyContext,
    State(state): State<AppState>,
    Path(cookbook_id): Path<DbId>,
    Json(input): Json<CreateFolderRequest>,
) -> AppResult<impl IntoResponse> {
    let cookbook = cookbook_in_family(&state, &ctx, cookbook_id).await?;

    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Pon el nombre de la carpeta.".into(),
        )));
    }

    // A parent folder must live in the same cookbook.
    if let Some(parent_id) = input.parent_id {
        FolderRepo::find_by_id(&state.pool, parent_id)
            .await?
            .filter(|f| f.cookbook_id == cookbook.id)
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "La carpeta no pertenece a este recetario.".into(),
                ))
            })?;
    }

    let folder = FolderRepo::create(
        &state.pool,
        &CreateFolder {
            cookbook_id: cookbook.id,
            name: name.to_string(),
            parent_id: input.parent_id,
        },
    )
    .await?;

    tracing::info!(folder_id = folder.id, cookbook_id, "Folder created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: folder })))
}

/// DELETE /api/v1/folders/{id}
///
/// Delete a folder. Contained recipes become folder-less and child folders
/// move up one level; nothing inside is deleted.
pub async fn delete_folder(
    ctx: FamilyContext,
    State(state): State<AppState>,
    Path(folder_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let folder = FolderRepo::find_by_id(&state.pool, folder_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RecipeFolder",
            id: folder_id,
        }))?;

    // The folder's cookbook must belong to the context family.
    let in_family = CookbookRepo::find_by_id(&state.pool, folder.cookbook_id)
        .await?
        .is_some_and(|cb| cb.family_id == ctx.family.id);
    if !in_family {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "RecipeFolder",
            id: folder_id,
        }));
    }

    let deleted = FolderRepo::delete_reassigning(&state.pool, folder.id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "RecipeFolder",
            id: folder_id,
        }));
    }

    tracing::info!(folder_id, "Folder deleted, contents reassigned");

    Ok(StatusCode::NO_CONTENT)
}
