//! Repository for the `family_members` table.

use sqlx::PgPool;

use recetario_core::types::DbId;

use crate::models::family::{CreateMember, FamilyMember};

const COLUMNS: &str = "id, family_id, user_id, display_name, role, created_at, updated_at";

/// Provides data access for family memberships.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a membership row, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMember) -> Result<FamilyMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO family_members (family_id, user_id, display_name, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FamilyMember>(&query)
            .bind(input.family_id)
            .bind(input.user_id)
            .bind(&input.display_name)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find the membership of one user in one family.
    pub async fn find(
        pool: &PgPool,
        family_id: DbId,
        user_id: DbId,
    ) -> Result<Option<FamilyMember>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM family_members WHERE family_id = $1 AND user_id = $2");
        sqlx::query_as::<_, FamilyMember>(&query)
            .bind(family_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a family's members in join order.
    pub async fn list_for_family(
        pool: &PgPool,
        family_id: DbId,
    ) -> Result<Vec<FamilyMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM family_members \
             WHERE family_id = $1 \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, FamilyMember>(&query)
            .bind(family_id)
            .fetch_all(pool)
            .await
    }

    /// Update a member's display name, returning the updated row.
    pub async fn update_display_name(
        pool: &PgPool,
        family_id: DbId,
        user_id: DbId,
        display_name: &str,
    ) -> Result<Option<FamilyMember>, sqlx::Error> {
        let query = format!(
            "UPDATE family_members SET display_name = $3, updated_at = NOW() \
             WHERE family_id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FamilyMember>(&query)
            .bind(family_id)
            .bind(user_id)
            .bind(display_name)
            .fetch_optional(pool)
            .await
    }
}
