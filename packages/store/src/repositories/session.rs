//! Session repository for centralized database operations
//!
//! Sessions are opaque tokens with a sliding expiry. Lookup by token is
//! the hot path and joins the owner in one round trip.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::session::{Session, SessionWithUser};
use crate::repositories::utils::SESSION_COLUMNS;

/// Repository for session database operations
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new SessionRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new session for a user
    ///
    /// # Arguments
    /// * `user_id` - ID of the user who owns this session
    /// * `session_token` - Opaque token the client will present (unique)
    /// * `expires_at` - Session expiration timestamp
    ///
    /// # Returns
    /// * `Ok(Session)` - The stored session
    /// * `Err(StoreError::UniqueViolation)` - If the token is already in use
    /// * `Err(StoreError::ForeignKeyViolation)` - If the user does not exist
    #[tracing::instrument(skip(self, session_token))]
    pub async fn create(
        &self,
        user_id: Uuid,
        session_token: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<Session> {
        let session = sqlx::query_as::<_, Session>(&format!(
            r#"
            INSERT INTO sessions (session_token, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            SESSION_COLUMNS
        ))
        .bind(session_token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    /// Find a session by its token, expired or not
    pub async fn find_by_token(&self, session_token: &str) -> StoreResult<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(&format!(
            "SELECT {} FROM sessions WHERE session_token = $1",
            SESSION_COLUMNS
        ))
        .bind(session_token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Find an unexpired session together with its owner
    ///
    /// The single-join shape session middleware wants: one round trip
    /// from token to user.
    pub async fn find_with_user(
        &self,
        session_token: &str,
    ) -> StoreResult<Option<SessionWithUser>> {
        let row = sqlx::query_as::<_, SessionWithUser>(
            r#"
            SELECT
                s.id, s.session_token, s.user_id, s.expires_at,
                u.name AS user_name,
                u.email AS user_email,
                u.image AS user_image
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.session_token = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(session_token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Slide a session's expiry forward
    ///
    /// # Returns
    /// * `Ok(Session)` - The session with its new expiry
    /// * `Err(StoreError::NotFound)` - If no session has this token
    #[tracing::instrument(skip(self, session_token))]
    pub async fn touch(
        &self,
        session_token: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<Session> {
        let session = sqlx::query_as::<_, Session>(&format!(
            r#"
            UPDATE sessions
            SET expires_at = $2
            WHERE session_token = $1
            RETURNING {}
            "#,
            SESSION_COLUMNS
        ))
        .bind(session_token)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await?;

        session.ok_or_else(|| StoreError::not_found("session", session_token))
    }

    /// Delete a session by token (logout)
    ///
    /// # Returns
    /// * `Ok(true)` - If the session existed and was deleted
    /// * `Ok(false)` - If no session with the given token exists
    #[tracing::instrument(skip(self, session_token))]
    pub async fn delete_by_token(&self, session_token: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE session_token = $1")
            .bind(session_token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every session a user holds (logout all devices)
    ///
    /// # Returns
    /// * `Ok(u64)` - The number of sessions that were deleted
    #[tracing::instrument(skip(self))]
    pub async fn delete_all_for_user(&self, user_id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete expired sessions from the database
    ///
    /// Meant for a periodic cleanup job. Deletion is batched so a large
    /// backlog never holds long locks; call until it returns 0.
    ///
    /// # Arguments
    /// * `batch_size` - Maximum number of sessions to delete per call
    ///
    /// # Returns
    /// * `Ok(u64)` - The number of expired sessions that were deleted
    /// * `Err(StoreError::InvalidInput)` - If `batch_size` is negative
    #[tracing::instrument(skip(self))]
    pub async fn delete_expired(&self, batch_size: i64) -> StoreResult<u64> {
        if batch_size < 0 {
            return Err(StoreError::InvalidInput(format!(
                "batch_size must be non-negative, got {}",
                batch_size
            )));
        }

        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE id IN (
                SELECT id FROM sessions
                WHERE expires_at < NOW()
                LIMIT $1
            )
            "#,
        )
        .bind(batch_size)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
