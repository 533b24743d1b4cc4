//! Repository for the `recipes` table.

use sqlx::PgPool;

use recetario_core::types::DbId;

use crate::models::recipe::{CreateRecipe, FolderScope, Recipe, RecipeSummary, UpdateRecipe};

const COLUMNS: &str = "\
    id, cookbook_id, family_id, author_id, title, photo_url, \
    ingredients_text, steps_text, folder_id, prep_minutes, cook_minutes, \
    servings, difficulty, notes, created_at, updated_at";

/// Column list for the cookbook index cards.
const SUMMARY_COLUMNS: &str = "id, title, photo_url, folder_id, created_at";

/// Provides data access for recipes.
pub struct RecipeRepo;

impl RecipeRepo {
    /// Insert a recipe, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRecipe) -> Result<Recipe, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipes \
                 (cookbook_id, family_id, author_id, title, ingredients_text, \
                  steps_text, folder_id, prep_minutes, cook_minutes, servings, \
                  difficulty, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(input.cookbook_id)
            .bind(input.family_id)
            .bind(input.author_id)
            .bind(&input.title)
            .bind(&input.ingredients_text)
            .bind(&input.steps_text)
            .bind(input.folder_id)
            .bind(input.prep_minutes)
            .bind(input.cook_minutes)
            .bind(input.servings)
            .bind(&input.difficulty)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a recipe by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE id = $1");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a cookbook's recipe cards, newest first, optionally scoped to a
    /// folder level and filtered by case-insensitive title containment.
    pub async fn list_for_cookbook(
        pool: &PgPool,
        cookbook_id: DbId,
        scope: FolderScope,
        search: Option<&str>,
    ) -> Result<Vec<RecipeSummary>, sqlx::Error> {
        let (folder_id, root_only) = match scope {
            FolderScope::All => (None, false),
            FolderScope::Root => (None, true),
            FolderScope::In(id) => (Some(id), false),
        };
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM recipes \
             WHERE cookbook_id = $1 \
               AND ($2::BIGINT IS NULL OR folder_id = $2) \
               AND (NOT $3::BOOLEAN OR folder_id IS NULL) \
               AND ($4::TEXT IS NULL OR title ILIKE '%' || $4 || '%') \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, RecipeSummary>(&query)
            .bind(cookbook_id)
            .bind(folder_id)
            .bind(root_only)
            .bind(search)
            .fetch_all(pool)
            .await
    }

    /// Partially update a recipe.
    ///
    /// Uses `COALESCE` so only provided fields are changed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateRecipe,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!(
            "UPDATE recipes SET \
                 title = COALESCE($2, title), \
                 ingredients_text = COALESCE($3, ingredients_text), \
                 steps_text = COALESCE($4, steps_text), \
                 prep_minutes = COALESCE($5, prep_minutes), \
                 cook_minutes = COALESCE($6, cook_minutes), \
                 servings = COALESCE($7, servings), \
                 difficulty = COALESCE($8, difficulty), \
                 notes = COALESCE($9, notes), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.ingredients_text)
            .bind(&dto.steps_text)
            .bind(dto.prep_minutes)
            .bind(dto.cook_minutes)
            .bind(dto.servings)
            .bind(&dto.difficulty)
            .bind(&dto.notes)
            .fetch_optional(pool)
            .await
    }

    /// Move a recipe into a folder, or out of all folders with `None`.
    pub async fn move_to_folder(
        pool: &PgPool,
        id: DbId,
        folder_id: Option<DbId>,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!(
            "UPDATE recipes SET folder_id = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(folder_id)
            .fetch_optional(pool)
            .await
    }

    /// Set (or replace) the stored photo URL.
    pub async fn set_photo_url(
        pool: &PgPool,
        id: DbId,
        photo_url: &str,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!(
            "UPDATE recipes SET photo_url = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(photo_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a recipe. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
