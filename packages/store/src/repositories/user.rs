//! User repository for centralized database operations
//!
//! All user-related queries live here so middleware, services, and jobs
//! share one source of truth for user access.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::user::{NewUser, UpdateUser, User, UserProfileStats};
use crate::repositories::utils::{clamp_page, escape_ilike, USER_COLUMNS};

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new user
    ///
    /// # Arguments
    /// * `input` - Profile fields; the email is stored lowercase
    ///
    /// # Returns
    /// * `Ok(User)` - The newly created user
    /// * `Err(StoreError::UniqueViolation)` - If the email is already registered
    #[tracing::instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: NewUser) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, image)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&input.name)
        .bind(input.email.to_lowercase())
        .bind(&input.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by their unique ID
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the user to find
    ///
    /// # Returns
    /// * `Ok(Some(User))` - If the user exists
    /// * `Ok(None)` - If no user with the given ID exists
    pub async fn find_by_id(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by their email address (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if an email address is already registered (case-insensitive)
    pub async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let exists = sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)"#)
            .bind(email.to_lowercase())
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Apply a profile patch to a user
    ///
    /// `None` fields keep their stored values. An all-`None` patch reads the
    /// row back without writing.
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(StoreError::NotFound)` - If the user does not exist
    #[tracing::instrument(skip(self, update))]
    pub async fn update(&self, user_id: Uuid, update: UpdateUser) -> StoreResult<User> {
        if update.is_empty() {
            return self
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| StoreError::not_found("user", user_id));
        }

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                image = COALESCE($4, image)
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user_id)
        .bind(&update.name)
        .bind(update.email.as_deref().map(str::to_lowercase))
        .bind(&update.image)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| StoreError::not_found("user", user_id))
    }

    /// Stamp the user's email as verified at the given time
    ///
    /// # Returns
    /// * `Ok(true)` - If a row was updated
    /// * `Ok(false)` - If the user does not exist
    #[tracing::instrument(skip(self))]
    pub async fn mark_email_verified(
        &self,
        user_id: Uuid,
        verified_at: chrono::DateTime<chrono::Utc>,
    ) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE users SET email_verified = $2 WHERE id = $1")
            .bind(user_id)
            .bind(verified_at)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a user and, through cascades, everything they own
    ///
    /// # Returns
    /// * `Ok(true)` - If the user existed and was deleted
    /// * `Ok(false)` - If no user with the given ID exists
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List users ordered by email
    pub async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<User>> {
        let (limit, offset) = clamp_page(limit, offset)?;

        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {}
            FROM users
            ORDER BY email
            LIMIT $1 OFFSET $2
            "#,
            USER_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Search users by display name, prefix matches first
    pub async fn search_by_name(&self, query: &str, limit: i64) -> StoreResult<Vec<User>> {
        let (limit, _) = clamp_page(limit, 0)?;
        let escaped = escape_ilike(query.trim());

        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {}
            FROM users
            WHERE name ILIKE '%' || $1 || '%'
            ORDER BY
                CASE WHEN name ILIKE $1 || '%' THEN 0 ELSE 1 END,
                name
            LIMIT $2
            "#,
            USER_COLUMNS
        ))
        .bind(escaped)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Total number of users
    pub async fn count(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Activity counts for a profile page
    ///
    /// # Returns
    /// * `Ok(UserProfileStats)` - Playlist, post, and follow totals
    /// * `Err(StoreError::NotFound)` - If the user does not exist
    pub async fn profile_stats(&self, user_id: Uuid) -> StoreResult<UserProfileStats> {
        let stats = sqlx::query_as::<_, UserProfileStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM playlists WHERE user_id = u.id) AS playlist_count,
                (SELECT COUNT(*) FROM social_posts WHERE user_id = u.id) AS post_count,
                (SELECT COUNT(*) FROM follows WHERE following_id = u.id) AS follower_count,
                (SELECT COUNT(*) FROM follows WHERE follower_id = u.id) AS following_count
            FROM users u
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        stats.ok_or_else(|| StoreError::not_found("user", user_id))
    }
}
