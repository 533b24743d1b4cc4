//! Repository for the `cook_progress` table.

use sqlx::PgPool;

use recetario_core::types::DbId;

use crate::models::cook_progress::{CookProgress, UpsertCookProgress};

const COLUMNS: &str =
    "id, recipe_id, device_key, step_index, checked, sidebar_open, created_at, updated_at";

/// Provides data access for per-device cook-mode progress.
pub struct CookProgressRepo;

impl CookProgressRepo {
    /// Insert or update the progress for one (recipe, device) pair.
    ///
    /// Uses `ON CONFLICT ... DO UPDATE` so every change from the step walker
    /// is an idempotent upsert.
    pub async fn upsert(
        pool: &PgPool,
        recipe_id: DbId,
        device_key: &str,
        dto: &UpsertCookProgress,
    ) -> Result<CookProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO cook_progress (recipe_id, device_key, step_index, checked, sidebar_open) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (recipe_id, device_key) DO UPDATE SET \
                 step_index = EXCLUDED.step_index, \
                 checked = EXCLUDED.checked, \
                 sidebar_open = EXCLUDED.sidebar_open, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CookProgress>(&query)
            .bind(recipe_id)
            .bind(device_key)
            .bind(dto.step_index)
            .bind(serde_json::json!(dto.checked))
            .bind(dto.sidebar_open)
            .fetch_one(pool)
            .await
    }

    /// Get the saved progress for one (recipe, device) pair.
    pub async fn find(
        pool: &PgPool,
        recipe_id: DbId,
        device_key: &str,
    ) -> Result<Option<CookProgress>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM cook_progress WHERE recipe_id = $1 AND device_key = $2");
        sqlx::query_as::<_, CookProgress>(&query)
            .bind(recipe_id)
            .bind(device_key)
            .fetch_optional(pool)
            .await
    }

    /// Reset (delete) the progress for one (recipe, device) pair.
    pub async fn reset(
        pool: &PgPool,
        recipe_id: DbId,
        device_key: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM cook_progress WHERE recipe_id = $1 AND device_key = $2")
                .bind(recipe_id)
                .bind(device_key)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
