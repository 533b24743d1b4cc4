//! Family and family-member models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use recetario_core::types::{DbId, Timestamp};

/// The family creator's role.
pub const ROLE_ADMIN: &str = "admin";

/// Everyone who joined via the shared code.
pub const ROLE_MEMBER: &str = "member";

/// A row from the `families` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Family {
    pub id: DbId,
    pub name: String,
    /// Human-shareable six-digit join code.
    pub code: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `family_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FamilyMember {
    pub id: DbId,
    pub family_id: DbId,
    pub user_id: DbId,
    pub display_name: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a membership row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMember {
    pub family_id: DbId,
    pub user_id: DbId,
    pub display_name: String,
    pub role: String,
}
