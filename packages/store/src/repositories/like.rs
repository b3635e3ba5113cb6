//! Like repository
//!
//! One like per (user, post), enforced by a unique pair. `toggle` is
//! the tap-the-heart path; `counts_for_posts` is the bulk lookup feed
//! rendering uses so a page of posts costs one query, not N.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::like::{Like, PostLikeCount};
use crate::models::user::User;
use crate::repositories::utils::{clamp_page, LIKE_COLUMNS};

/// Repository for like database operations
#[derive(Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    /// Create a new LikeRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Like a post
    ///
    /// # Returns
    /// * `Ok(Like)` - The created like
    /// * `Err(StoreError::UniqueViolation)` - If the user already likes the post
    /// * `Err(StoreError::ForeignKeyViolation)` - If the user or post does not exist
    #[tracing::instrument(skip(self))]
    pub async fn like(&self, user_id: Uuid, post_id: Uuid) -> StoreResult<Like> {
        let like = sqlx::query_as::<_, Like>(&format!(
            r#"
            INSERT INTO likes (user_id, social_post_id)
            VALUES ($1, $2)
            RETURNING {}
            "#,
            LIKE_COLUMNS
        ))
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(like)
    }

    /// Remove a user's like from a post
    ///
    /// # Returns
    /// * `Ok(true)` - If the like existed and was removed
    /// * `Ok(false)` - If the user did not like the post
    #[tracing::instrument(skip(self))]
    pub async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> StoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM likes WHERE user_id = $1 AND social_post_id = $2")
                .bind(user_id)
                .bind(post_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Flip a user's like on a post
    ///
    /// Inserts with ON CONFLICT DO NOTHING; when the insert is a no-op
    /// the like already existed and is removed instead.
    ///
    /// # Returns
    /// * `Ok(true)` - The post is liked after the call
    /// * `Ok(false)` - The post is not liked after the call
    #[tracing::instrument(skip(self))]
    pub async fn toggle(&self, user_id: Uuid, post_id: Uuid) -> StoreResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO likes (user_id, social_post_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, social_post_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        if inserted.rows_affected() > 0 {
            return Ok(true);
        }

        sqlx::query("DELETE FROM likes WHERE user_id = $1 AND social_post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(false)
    }

    /// Whether a user likes a post
    pub async fn is_liked(&self, user_id: Uuid, post_id: Uuid) -> StoreResult<bool> {
        let liked: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM likes WHERE user_id = $1 AND social_post_id = $2)",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(liked)
    }

    /// Number of likes on a post
    pub async fn count_for_post(&self, post_id: Uuid) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE social_post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Like counts for a batch of posts
    ///
    /// Posts with no likes are absent from the result. An empty input
    /// returns an empty vec without touching the database.
    pub async fn counts_for_posts(&self, post_ids: &[Uuid]) -> StoreResult<Vec<PostLikeCount>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let counts = sqlx::query_as::<_, PostLikeCount>(
            r#"
            SELECT social_post_id, COUNT(*) AS like_count
            FROM likes
            WHERE social_post_id = ANY($1)
            GROUP BY social_post_id
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Users who like a post
    ///
    /// Likes carry no timestamp, so the list is ordered by user name
    /// for a stable render.
    pub async fn likers(&self, post_id: Uuid, limit: i64) -> StoreResult<Vec<User>> {
        let (limit, _) = clamp_page(limit, 0)?;

        let likers = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email, u.email_verified, u.image
            FROM likes l
            JOIN users u ON u.id = l.user_id
            WHERE l.social_post_id = $1
            ORDER BY u.name ASC NULLS LAST, u.email ASC
            LIMIT $2
            "#,
        )
        .bind(post_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(likers)
    }
}
