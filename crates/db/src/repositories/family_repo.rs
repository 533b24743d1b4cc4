//! Repository for the `families` table.
//!
//! Family creation is a three-row write (family, admin membership, the
//! creator's cookbook) and runs in one transaction so a failure partway
//! leaves nothing behind.

use sqlx::PgPool;

use recetario_core::types::DbId;

use crate::models::cookbook::Cookbook;
use crate::models::family::{Family, FamilyMember, ROLE_ADMIN};

const COLUMNS: &str = "id, name, code, created_by, created_at, updated_at";

const MEMBER_COLUMNS: &str =
    "id, family_id, user_id, display_name, role, created_at, updated_at";

const COOKBOOK_COLUMNS: &str =
    "id, family_id, owner_id, title, color, created_at, updated_at";

/// Provides data access for families.
pub struct FamilyRepo;

impl FamilyRepo {
    /// Whether a join code is already taken.
    pub async fn code_exists(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM families WHERE code = $1)")
                .bind(code)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Create a family together with its admin membership and the creator's
    /// cookbook, atomically.
    pub async fn create_with_admin(
        pool: &PgPool,
        name: &str,
        code: &str,
        user_id: DbId,
        display_name: &str,
        cookbook_title: &str,
    ) -> Result<(Family, FamilyMember, Cookbook), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO families (name, code, created_by) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let family = sqlx::query_as::<_, Family>(&query)
            .bind(name)
            .bind(code)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO family_members (family_id, user_id, display_name, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {MEMBER_COLUMNS}"
        );
        let member = sqlx::query_as::<_, FamilyMember>(&query)
            .bind(family.id)
            .bind(user_id)
            .bind(display_name)
            .bind(ROLE_ADMIN)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO cookbooks (family_id, owner_id, title) \
             VALUES ($1, $2, $3) \
             RETURNING {COOKBOOK_COLUMNS}"
        );
        let cookbook = sqlx::query_as::<_, Cookbook>(&query)
            .bind(family.id)
            .bind(user_id)
            .bind(cookbook_title)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((family, member, cookbook))
    }

    /// Find a family by its join code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Family>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM families WHERE code = $1");
        sqlx::query_as::<_, Family>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Find a family by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Family>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM families WHERE id = $1");
        sqlx::query_as::<_, Family>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
