//! Magic-link login token model.

use sqlx::FromRow;

use recetario_core::types::{DbId, Timestamp};

/// A row from the `magic_link_tokens` table.
///
/// Only the SHA-256 hash of the emailed token is stored; a database leak
/// does not expose usable login links.
#[derive(Debug, Clone, FromRow)]
pub struct MagicLinkToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub consumed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for minting a new magic-link token.
pub struct CreateMagicLinkToken {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
