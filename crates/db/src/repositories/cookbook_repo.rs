//! Repository for the `cookbooks` table.

use sqlx::PgPool;

use recetario_core::types::DbId;

use crate::models::cookbook::{Cookbook, CreateCookbook};

const COLUMNS: &str = "id, family_id, owner_id, title, color, created_at, updated_at";

/// Provides data access for cookbooks.
pub struct CookbookRepo;

impl CookbookRepo {
    /// Insert a cookbook, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCookbook) -> Result<Cookbook, sqlx::Error> {
        let query = format!(
            "INSERT INTO cookbooks (family_id, owner_id, title, color) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cookbook>(&query)
            .bind(input.family_id)
            .bind(input.owner_id)
            .bind(&input.title)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Find a cookbook by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Cookbook>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cookbooks WHERE id = $1");
        sqlx::query_as::<_, Cookbook>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a member's cookbook within a family, if one exists.
    pub async fn find_for_owner(
        pool: &PgPool,
        family_id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Cookbook>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM cookbooks WHERE family_id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Cookbook>(&query)
            .bind(family_id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List a family's cookbooks, newest first.
    pub async fn list_for_family(
        pool: &PgPool,
        family_id: DbId,
    ) -> Result<Vec<Cookbook>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cookbooks \
             WHERE family_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Cookbook>(&query)
            .bind(family_id)
            .fetch_all(pool)
            .await
    }

    /// Update a cookbook's cover color, returning the updated row.
    pub async fn update_color(
        pool: &PgPool,
        id: DbId,
        color: &str,
    ) -> Result<Option<Cookbook>, sqlx::Error> {
        let query = format!(
            "UPDATE cookbooks SET color = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cookbook>(&query)
            .bind(id)
            .bind(color)
            .fetch_optional(pool)
            .await
    }
}
