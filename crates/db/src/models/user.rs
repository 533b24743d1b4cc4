//! User entity model.
//!
//! Authentication is passwordless (email magic links), so there is no
//! password material here; a user row is little more than a verified email.

use serde::Serialize;
use sqlx::FromRow;

use recetario_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
