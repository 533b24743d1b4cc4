//! Cookbook model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use recetario_core::types::{DbId, Timestamp};

/// A row from the `cookbooks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cookbook {
    pub id: DbId,
    pub family_id: DbId,
    pub owner_id: DbId,
    pub title: String,
    /// Preset key or `#rrggbb`; `None` renders with the deterministic cover.
    pub color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a cookbook.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCookbook {
    pub family_id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub color: Option<String>,
}
