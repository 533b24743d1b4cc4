//! Repository for the `magic_link_tokens` table.

use sqlx::PgPool;

use crate::models::magic_link::{CreateMagicLinkToken, MagicLinkToken};

const COLUMNS: &str = "id, user_id, token_hash, expires_at, consumed_at, created_at";

/// Provides data access for single-use login tokens.
pub struct MagicLinkRepo;

impl MagicLinkRepo {
    /// Insert a new token, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMagicLinkToken,
    ) -> Result<MagicLinkToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO magic_link_tokens (user_id, token_hash, expires_at) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MagicLinkToken>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Atomically consume an unexpired, unconsumed token by its hash.
    ///
    /// A single UPDATE guards against double use: the second caller sees no
    /// matching row and gets `None`.
    pub async fn consume(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<MagicLinkToken>, sqlx::Error> {
        let query = format!(
            "UPDATE magic_link_tokens SET consumed_at = NOW() \
             WHERE token_hash = $1 \
               AND consumed_at IS NULL \
               AND expires_at > NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MagicLinkToken>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Delete expired or consumed tokens. Returns the count of deleted rows.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM magic_link_tokens WHERE expires_at < NOW() OR consumed_at IS NOT NULL",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
