//! Recipe models and DTOs.
//!
//! `ingredients_text` and `steps_text` are the flattened text blobs produced
//! by `recetario_core::text`; the database never sees structured rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use recetario_core::types::{DbId, Timestamp};

/// A full row from the `recipes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipe {
    pub id: DbId,
    pub cookbook_id: DbId,
    pub family_id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub photo_url: Option<String>,
    pub ingredients_text: String,
    pub steps_text: String,
    pub folder_id: Option<DbId>,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Narrow projection for the cookbook index cards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeSummary {
    pub id: DbId,
    pub title: String,
    pub photo_url: Option<String>,
    pub folder_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for inserting a recipe.
#[derive(Debug, Clone)]
pub struct CreateRecipe {
    pub cookbook_id: DbId,
    pub family_id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub ingredients_text: String,
    pub steps_text: String,
    pub folder_id: Option<DbId>,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<String>,
    pub notes: Option<String>,
}

/// DTO for partially updating a recipe. Only provided fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecipe {
    pub title: Option<String>,
    pub ingredients_text: Option<String>,
    pub steps_text: Option<String>,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<String>,
    pub notes: Option<String>,
}

/// Which folder scope a cookbook listing is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderScope {
    /// Every recipe in the cookbook regardless of folder.
    All,
    /// Only recipes outside any folder.
    Root,
    /// Only recipes inside the given folder.
    In(DbId),
}
