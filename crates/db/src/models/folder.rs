//! Recipe folder model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use recetario_core::types::{DbId, Timestamp};

/// A row from the `recipe_folders` table. Folders nest via `parent_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeFolder {
    pub id: DbId,
    pub cookbook_id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a folder.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFolder {
    pub cookbook_id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
}
