//! Cook-mode progress model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use recetario_core::types::{DbId, Timestamp};

/// A row from the `cook_progress` table.
///
/// Keyed by (recipe, device): progress survives page reloads on one device
/// without being shared across members or devices.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CookProgress {
    pub id: DbId,
    pub recipe_id: DbId,
    pub device_key: String,
    pub step_index: i32,
    /// Indexes of checked ingredient lines, stored as a JSONB array.
    pub checked: serde_json::Value,
    pub sidebar_open: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting progress.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertCookProgress {
    pub step_index: i32,
    #[serde(default)]
    pub checked: Vec<i32>,
    #[serde(default = "default_sidebar_open")]
    pub sidebar_open: bool,
}

fn default_sidebar_open() -> bool {
    true
}
