//! Repository for the `recipe_folders` table.

use sqlx::PgPool;

use recetario_core::types::DbId;

use crate::models::folder::{CreateFolder, RecipeFolder};

const COLUMNS: &str = "id, cookbook_id, name, parent_id, created_at, updated_at";

/// Provides data access for recipe folders.
pub struct FolderRepo;

impl FolderRepo {
    /// Insert a folder, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFolder) -> Result<RecipeFolder, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipe_folders (cookbook_id, name, parent_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecipeFolder>(&query)
            .bind(input.cookbook_id)
            .bind(&input.name)
            .bind(input.parent_id)
            .fetch_one(pool)
            .await
    }

    /// Find a folder by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RecipeFolder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipe_folders WHERE id = $1");
        sqlx::query_as::<_, RecipeFolder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the child folders of one breadcrumb level.
    ///
    /// `parent` of `None` lists the cookbook's root folders.
    pub async fn list_children(
        pool: &PgPool,
        cookbook_id: DbId,
        parent: Option<DbId>,
    ) -> Result<Vec<RecipeFolder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_folders \
             WHERE cookbook_id = $1 \
               AND ($2::BIGINT IS NULL AND parent_id IS NULL OR parent_id = $2) \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, RecipeFolder>(&query)
            .bind(cookbook_id)
            .bind(parent)
            .fetch_all(pool)
            .await
    }

    /// Delete a folder, reassigning its contents first.
    ///
    /// In one transaction: child folders are reparented to the deleted
    /// folder's parent, contained recipes become folder-less, then the row is
    /// deleted. Returns `false` if the folder does not exist.
    pub async fn delete_reassigning(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let parent_id: Option<Option<DbId>> =
            sqlx::query_scalar("SELECT parent_id FROM recipe_folders WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(parent_id) = parent_id else {
            return Ok(false);
        };

        sqlx::query(
            "UPDATE recipe_folders SET parent_id = $2, updated_at = NOW() WHERE parent_id = $1",
        )
        .bind(id)
        .bind(parent_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE recipes SET folder_id = NULL, updated_at = NOW() WHERE folder_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM recipe_folders WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
