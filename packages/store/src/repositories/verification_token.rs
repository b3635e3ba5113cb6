//! Verification token repository
//!
//! Email sign-in tokens are single-use: consuming one deletes it and
//! returns the row, so a second attempt with the same token finds
//! nothing. Expiry is reported through the model, not enforced here.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::session::VerificationToken;
use crate::repositories::utils::VERIFICATION_TOKEN_COLUMNS;

/// Repository for verification token database operations
#[derive(Clone)]
pub struct VerificationTokenRepository {
    pool: PgPool,
}

impl VerificationTokenRepository {
    /// Create a new VerificationTokenRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a fresh token for an identifier
    ///
    /// # Arguments
    /// * `identifier` - What the token verifies, usually an email address
    /// * `token` - The token value; the (identifier, token) pair is unique
    /// * `expires_at` - Token expiration timestamp
    #[tracing::instrument(skip(self, token))]
    pub async fn create(
        &self,
        identifier: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<VerificationToken> {
        let row = sqlx::query_as::<_, VerificationToken>(&format!(
            r#"
            INSERT INTO verification_tokens (identifier, token, expires_at)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            VERIFICATION_TOKEN_COLUMNS
        ))
        .bind(identifier)
        .bind(token)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Consume a token: delete it and return what was stored
    ///
    /// Expired tokens are consumed too; callers check
    /// [`VerificationToken::is_expired`] before honoring the result.
    ///
    /// # Returns
    /// * `Ok(Some(VerificationToken))` - The token existed and is now gone
    /// * `Ok(None)` - No such (identifier, token) pair
    #[tracing::instrument(skip(self, token))]
    pub async fn consume(
        &self,
        identifier: &str,
        token: &str,
    ) -> StoreResult<Option<VerificationToken>> {
        let row = sqlx::query_as::<_, VerificationToken>(&format!(
            r#"
            DELETE FROM verification_tokens
            WHERE identifier = $1 AND token = $2
            RETURNING {}
            "#,
            VERIFICATION_TOKEN_COLUMNS
        ))
        .bind(identifier)
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Invalidate every outstanding token for an identifier
    ///
    /// Called when a new token is issued so older emails stop working.
    ///
    /// # Returns
    /// * `Ok(u64)` - The number of tokens that were removed
    #[tracing::instrument(skip(self))]
    pub async fn delete_for_identifier(&self, identifier: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM verification_tokens WHERE identifier = $1")
            .bind(identifier)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete expired tokens, for a periodic cleanup job
    ///
    /// # Returns
    /// * `Ok(u64)` - The number of expired tokens that were deleted
    #[tracing::instrument(skip(self))]
    pub async fn delete_expired(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM verification_tokens WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
