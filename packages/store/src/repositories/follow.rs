//! Follow repository
//!
//! Directed edges between users. Self-follows are rejected here and by
//! a table CHECK, duplicates by the unique pair. Either endpoint going
//! away removes the edge by cascade.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::follow::{Follow, FollowCounts};
use crate::models::user::User;
use crate::repositories::utils::{clamp_page, FOLLOW_COLUMNS};

/// Repository for follow database operations
#[derive(Clone)]
pub struct FollowRepository {
    pool: PgPool,
}

impl FollowRepository {
    /// Create a new FollowRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Follow another user
    ///
    /// # Returns
    /// * `Ok(Follow)` - The created edge
    /// * `Err(StoreError::InvalidInput)` - If follower and following are the same user
    /// * `Err(StoreError::UniqueViolation)` - If the edge already exists
    /// * `Err(StoreError::ForeignKeyViolation)` - If either user does not exist
    #[tracing::instrument(skip(self))]
    pub async fn follow(&self, follower_id: Uuid, following_id: Uuid) -> StoreResult<Follow> {
        if follower_id == following_id {
            return Err(StoreError::InvalidInput(
                "users cannot follow themselves".to_string(),
            ));
        }

        let follow = sqlx::query_as::<_, Follow>(&format!(
            r#"
            INSERT INTO follows (follower_id, following_id)
            VALUES ($1, $2)
            RETURNING {}
            "#,
            FOLLOW_COLUMNS
        ))
        .bind(follower_id)
        .bind(following_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(follow)
    }

    /// Remove a follow edge
    ///
    /// # Returns
    /// * `Ok(true)` - If the edge existed and was removed
    /// * `Ok(false)` - If the follower was not following the user
    #[tracing::instrument(skip(self))]
    pub async fn unfollow(&self, follower_id: Uuid, following_id: Uuid) -> StoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
                .bind(follower_id)
                .bind(following_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether one user follows another
    pub async fn is_following(&self, follower_id: Uuid, following_id: Uuid) -> StoreResult<bool> {
        let following: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM follows
                WHERE follower_id = $1 AND following_id = $2
            )
            "#,
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(following)
    }

    /// Users who follow the given user
    ///
    /// Follows carry no timestamp, so the list is ordered by user name
    /// for a stable render.
    pub async fn followers_of(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<User>> {
        let (limit, offset) = clamp_page(limit, offset)?;

        let followers = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email, u.email_verified, u.image
            FROM follows f
            JOIN users u ON u.id = f.follower_id
            WHERE f.following_id = $1
            ORDER BY u.name ASC NULLS LAST, u.email ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(followers)
    }

    /// Users the given user follows
    pub async fn following_of(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<User>> {
        let (limit, offset) = clamp_page(limit, offset)?;

        let following = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email, u.email_verified, u.image
            FROM follows f
            JOIN users u ON u.id = f.following_id
            WHERE f.follower_id = $1
            ORDER BY u.name ASC NULLS LAST, u.email ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(following)
    }

    /// Follower and following totals for a user
    pub async fn counts(&self, user_id: Uuid) -> StoreResult<FollowCounts> {
        let counts = sqlx::query_as::<_, FollowCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM follows WHERE following_id = $1) AS followers,
                (SELECT COUNT(*) FROM follows WHERE follower_id = $1) AS following
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }
}
