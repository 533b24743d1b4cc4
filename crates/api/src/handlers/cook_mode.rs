//! Handlers for the cook-mode step walker.
//!
//! Steps render one at a time with forward/back navigation bounded to the
//! step list, plus a per-line ingredient checklist. Progress persists per
//! (recipe, device) so it survives reloads on one device without syncing
//! across family members.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use recetario_core::text::{parse_lines, parse_steps, strip_bullet};
use recetario_core::types::DbId;
use recetario_db::models::cook_progress::UpsertCookProgress;
use recetario_db::repositories::CookProgressRepo;

use crate::error::AppResult;
use crate::handlers::recipes::recipe_in_family;
use crate::middleware::family::{DeviceKey, FamilyContext};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Saved walker position for one device.
#[derive(Debug, Serialize)]
pub struct Progress {
    pub step_index: i32,
    pub checked: serde_json::Value,
    pub sidebar_open: bool,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            step_index: 0,
            checked: serde_json::json!([]),
            sidebar_open: true,
        }
    }
}

/// Response for `GET /recipes/{id}/cook`.
#[derive(Debug, Serialize)]
pub struct CookView {
    pub recipe_id: DbId,
    pub title: String,
    /// Decoded steps, one per entry, legacy numbering stripped.
    pub steps: Vec<String>,
    /// Checklist lines with their leading bullets stripped.
    pub ingredients: Vec<String>,
    pub progress: Progress,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/recipes/{id}/cook
///
/// The decoded step list, ingredient checklist, and this device's saved
/// progress (defaults when none is saved yet).
pub async fn get_cook_view(
    ctx: FamilyContext,
    DeviceKey(device_key): DeviceKey,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let recipe = recipe_in_family(&state, &ctx, recipe_id).await?;

    let steps = parse_steps(&recipe.steps_text);
    let ingredients: Vec<String> = parse_lines(&recipe.ingredients_text)
        .iter()
        .map(|l| strip_bullet(l).to_string())
        .collect();

    let progress = CookProgressRepo::find(&state.pool, recipe.id, &device_key)
        .await?
        .map(|p| Progress {
            // Saved progress can outlive an edit that removed steps.
            step_index: clamp_step(p.step_index, steps.len()),
            checked: p.checked,
            sidebar_open: p.sidebar_open,
        })
        .unwrap_or_default();

    Ok(Json(DataResponse {
        data: CookView {
            recipe_id: recipe.id,
            title: recipe.title,
            steps,
            ingredients,
            progress,
        },
    }))
}

/// PUT /api/v1/recipes/{id}/cook
///
/// Save the walker position for this device. The step index is clamped to
/// the recipe's step range.
pub async fn save_progress(
    ctx: FamilyContext,
    DeviceKey(device_key): DeviceKey,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
    Json(mut input): Json<UpsertCookProgress>,
) -> AppResult<impl IntoResponse> {
    let recipe = recipe_in_family(&state, &ctx, recipe_id).await?;

    let steps = parse_steps(&recipe.steps_text);
    input.step_index = clamp_step(input.step_index, steps.len());

    let progress = CookProgressRepo::upsert(&state.pool, recipe.id, &device_key, &input).await?;

    Ok(Json(DataResponse {
        data: Progress {
            step_index: progress.step_index,
            checked: progress.checked,
            sidebar_open: progress.sidebar_open,
        },
    }))
}

/// DELETE /api/v1/recipes/{id}/cook
///
/// Reset this device's progress. Returns 204 whether or not progress existed.
pub async fn reset_progress(
    ctx: FamilyContext,
    DeviceKey(device_key): DeviceKey,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let recipe = recipe_in_family(&state, &ctx, recipe_id).await?;
    CookProgressRepo::reset(&state.pool, recipe.id, &device_key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Clamp a step index into `[0, steps - 1]` (or 0 for an empty step list).
fn clamp_step(index: i32, steps: usize) -> i32 {
    let max = steps.saturating_sub(1) as i32;
    index.clamp(0, max)
}
