//! Handlers for recipes: wizard save (with the photo saga), detail, edit,
//! delete, and drag-and-drop folder moves.

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use recetario_core::error::CoreError;
use recetario_core::text::{
    ingredients_to_text, normalize_steps_text, steps_to_text, IngredientRow, StepRow,
};
use recetario_core::types::DbId;
use recetario_core::wizard::validate_draft;
use recetario_db::models::recipe::{CreateRecipe, Recipe, UpdateRecipe};
use recetario_db::repositories::{CookbookRepo, FolderRepo, RecipeRepo};
use recetario_storage::photo_object_path;

use crate::error::{AppError, AppResult};
use crate::handlers::cookbooks::cookbook_in_family;
use crate::middleware::family::FamilyContext;
use crate::response::DataResponse;
use crate::state::AppState;

/// Accepted photo file extensions.
const SUPPORTED_PHOTO_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Wizard save payload: the structured rows as the wizard holds them, plus
/// the details step. Rows are flattened into text blobs server-side.
#[derive(Debug, Deserialize)]
pub struct RecipePayload {
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientRow>,
    #[serde(default)]
    pub steps: Vec<StepRow>,
    #[serde(default)]
    pub folder_id: Option<DbId>,
    #[serde(default)]
    pub prep_minutes: Option<i32>,
    #[serde(default)]
    pub cook_minutes: Option<i32>,
    #[serde(default)]
    pub servings: Option<i32>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// An uploaded photo part.
struct PhotoUpload {
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

/// Request body for `POST /recipes/{id}/move`.
#[derive(Debug, Deserialize)]
pub struct MoveRecipeRequest {
    /// Target folder; `null` (or absent) is the "remove from folder" target.
    #[serde(default)]
    pub folder_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Wizard save
// ---------------------------------------------------------------------------

/// POST /api/v1/cookbooks/{id}/recipes
///
/// Save a finished wizard draft. Accepts either plain JSON or multipart form
/// data with a `payload` JSON field and an optional `photo` file.
///
/// Validation happens before any write; with a photo attached, the insert +
/// upload + patch sequence is a small saga: if the upload or patch fails the
/// inserted row is deleted again, so no half-saved recipe survives.
pub async fn create_recipe(
    ctx: FamilyContext,
    State(state): State<AppState>,
    Path(cookbook_id): Path<DbId>,
    request: Request,
) -> AppResult<impl IntoResponse> {
    let cookbook = cookbook_in_family(&state, &ctx, cookbook_id).await?;

    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let (payload, photo) = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        read_multipart_payload(multipart).await?
    } else {
        let Json(payload) = Json::<RecipePayload>::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        (payload, None)
    };

    // Flatten the wizard rows and validate the finished draft. Nothing is
    // written until all three checks pass.
    let ingredients_text = ingredients_to_text(&payload.ingredients);
    let steps_text = steps_to_text(&payload.steps);
    validate_draft(&payload.title, &ingredients_text, &steps_text)?;

    // A target folder must live in the same cookbook.
    if let Some(folder_id) = payload.folder_id {
        FolderRepo::find_by_id(&state.pool, folder_id)
            .await?
            .filter(|f| f.cookbook_id == cookbook.id)
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "La carpeta no pertenece a este recetario.".into(),
                ))
            })?;
    }

    // Validate the photo before inserting anything so a bad extension fails
    // cheaply instead of triggering the compensation path.
    let photo = match photo {
        Some(upload) => Some(validated_photo(upload)?),
        None => None,
    };

    let recipe = RecipeRepo::create(
        &state.pool,
        &CreateRecipe {
            cookbook_id: cookbook.id,
            family_id: ctx.family.id,
            author_id: ctx.user_id(),
            title: payload.title.trim().to_string(),
            ingredients_text,
            steps_text,
            folder_id: payload.folder_id,
            prep_minutes: payload.prep_minutes,
            cook_minutes: payload.cook_minutes,
            servings: payload.servings,
            difficulty: payload.difficulty.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
            notes: payload.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        },
    )
    .await?;

    let recipe = match photo {
        None => recipe,
        Some(upload) => match store_photo(&state, &recipe, upload).await {
            Ok(updated) => updated,
            Err(err) => {
                // Compensating cleanup: the photo never made it, so the
                // half-saved recipe row goes away with it.
                if let Err(cleanup_err) = RecipeRepo::delete(&state.pool, recipe.id).await {
                    tracing::error!(
                        recipe_id = recipe.id,
                        error = %cleanup_err,
                        "Failed to clean up recipe after photo upload failure",
                    );
                }
                return Err(err);
            }
        },
    };

    tracing::info!(
        recipe_id = recipe.id,
        cookbook_id,
        user_id = ctx.user_id(),
        title = %recipe.title,
        "Recipe created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: recipe })))
}

/// Read the `payload` and `photo` parts of a multipart wizard save.
async fn read_multipart_payload(
    mut multipart: Multipart,
) -> AppResult<(RecipePayload, Option<PhotoUpload>)> {
    let mut payload: Option<RecipePayload> = None;
    let mut photo: Option<PhotoUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "payload" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                payload = Some(
                    serde_json::from_str(&text)
                        .map_err(|e| AppError::BadRequest(format!("Invalid payload JSON: {e}")))?,
                );
            }
            "photo" => {
                let filename = field.file_name().unwrap_or("foto.jpg").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("image/jpeg")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                photo = Some(PhotoUpload { filename, content_type, data: data.to_vec() });
            }
            _ => {} // ignore unknown fields
        }
    }

    let payload =
        payload.ok_or_else(|| AppError::BadRequest("Missing required 'payload' field".into()))?;
    Ok((payload, photo))
}

/// Check the photo's extension, returning the upload with its extension.
fn validated_photo(upload: PhotoUpload) -> AppResult<(PhotoUpload, String)> {
    let ext = upload
        .filename
        .rsplit('.')
        .next()
        .unwrap_or("jpg")
        .to_lowercase();
    if !SUPPORTED_PHOTO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported photo format '.{ext}'. Supported: .jpg, .jpeg, .png, .webp"
        )));
    }
    Ok((upload, ext))
}

/// Upload a photo for a recipe and patch the row with its public URL.
async fn store_photo(
    state: &AppState,
    recipe: &Recipe,
    (upload, ext): (PhotoUpload, String),
) -> AppResult<Recipe> {
    let path = photo_object_path(
        recipe.family_id,
        recipe.id,
        Utc::now().timestamp_millis(),
        &ext,
    );
    let url = state
        .photos
        .upload(&path, upload.data, &upload.content_type)
        .await?;

    RecipeRepo::set_photo_url(&state.pool, recipe.id, &url)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id: recipe.id,
        }))
}

// ---------------------------------------------------------------------------
// Detail / edit / delete
// ---------------------------------------------------------------------------

/// Load a recipe and verify it belongs to the context family.
pub(crate) async fn recipe_in_family(
    state: &AppState,
    ctx: &FamilyContext,
    recipe_id: DbId,
) -> AppResult<Recipe> {
    let recipe = RecipeRepo::find_by_id(&state.pool, recipe_id)
        .await?
        .filter(|r| r.family_id == ctx.family.id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id: recipe_id,
        }))?;
    Ok(recipe)
}

/// GET /api/v1/recipes/{id}
pub async fn get_recipe(
    ctx: FamilyContext,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let recipe = recipe_in_family(&state, &ctx, recipe_id).await?;
    Ok(Json(DataResponse { data: recipe }))
}

/// PATCH /api/v1/recipes/{id}
///
/// Partial edit. Text fields are trimmed; steps text is normalized into the
/// canonical encoding so legacy numbered lines migrate on write.
pub async fn update_recipe(
    ctx: FamilyContext,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
    Json(mut input): Json<UpdateRecipe>,
) -> AppResult<impl IntoResponse> {
    recipe_in_family(&state, &ctx, recipe_id).await?;

    if let Some(title) = &input.title {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Pon el nombre de la receta.".into(),
            )));
        }
        input.title = Some(trimmed.to_string());
    }
    if let Some(text) = &input.ingredients_text {
        input.ingredients_text = Some(text.trim().to_string());
    }
    if let Some(text) = &input.steps_text {
        input.steps_text = Some(normalize_steps_text(text));
    }

    let recipe = RecipeRepo::update(&state.pool, recipe_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id: recipe_id,
        }))?;

    tracing::info!(recipe_id, user_id = ctx.user_id(), "Recipe updated");

    Ok(Json(DataResponse { data: recipe }))
}

/// DELETE /api/v1/recipes/{id}
///
/// Only the author or the cookbook's owner may delete a recipe.
pub async fn delete_recipe(
    ctx: FamilyContext,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let recipe = recipe_in_family(&state, &ctx, recipe_id).await?;

    let is_author = recipe.author_id == ctx.user_id();
    let is_owner = CookbookRepo::find_by_id(&state.pool, recipe.cookbook_id)
        .await?
        .is_some_and(|cb| cb.owner_id == ctx.user_id());
    if !is_author && !is_owner {
        return Err(AppError::Core(CoreError::Forbidden(
            "Solo el autor o el dueño del recetario pueden eliminar esta receta.".into(),
        )));
    }

    RecipeRepo::delete(&state.pool, recipe.id).await?;

    tracing::info!(recipe_id, user_id = ctx.user_id(), "Recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Folder moves & photo replacement
// ---------------------------------------------------------------------------

/// POST /api/v1/recipes/{id}/move
///
/// Drag-and-drop reparenting: a folder id files the recipe there, `null`
/// (the "remove from folder" drop target) clears it.
pub async fn move_recipe(
    ctx: FamilyContext,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
    Json(input): Json<MoveRecipeRequest>,
) -> AppResult<impl IntoResponse> {
    let recipe = recipe_in_family(&state, &ctx, recipe_id).await?;

    if let Some(folder_id) = input.folder_id {
        FolderRepo::find_by_id(&state.pool, folder_id)
            .await?
            .filter(|f| f.cookbook_id == recipe.cookbook_id)
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "La carpeta no pertenece a este recetario.".into(),
                ))
            })?;
    }

    let moved = RecipeRepo::move_to_folder(&state.pool, recipe.id, input.folder_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id: recipe_id,
        }))?;

    tracing::info!(recipe_id, folder_id = ?input.folder_id, "Recipe moved");

    Ok(Json(DataResponse { data: moved }))
}

/// POST /api/v1/recipes/{id}/photo
///
/// Replace the recipe's photo. Multipart with a single `photo` file field.
pub async fn upload_photo(
    ctx: FamilyContext,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let recipe = recipe_in_family(&state, &ctx, recipe_id).await?;

    let mut photo: Option<PhotoUpload> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "photo" {
            let filename = field.file_name().unwrap_or("foto.jpg").to_string();
            let content_type = field.content_type().unwrap_or("image/jpeg").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            photo = Some(PhotoUpload { filename, content_type, data: data.to_vec() });
        }
    }
    let photo = photo.ok_or_else(|| AppError::BadRequest("Missing required 'photo' field".into()))?;

    let updated = store_photo(&state, &recipe, validated_photo(photo)?).await?;

    tracing::info!(recipe_id, user_id = ctx.user_id(), "Recipe photo replaced");

    Ok(Json(DataResponse { data: updated }))
}
