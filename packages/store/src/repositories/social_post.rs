//! Social post repository
//!
//! Posts share a playlist to the feed. Each playlist can be shared at
//! most once; likes and comments hang off the post and are folded into
//! [`FeedPost`] rows so feed pages render from a single query.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::social::{
    FeedPost, NewSocialPost, PostEngagement, SocialPost, UpdateSocialPost,
};
use crate::repositories::utils::{clamp_page, SOCIAL_POST_COLUMNS};

/// Shared SELECT for feed queries. `$1` is always the viewer.
const FEED_SELECT: &str = r#"
    SELECT sp.id, sp.caption, sp.user_id, sp.playlist_id, sp.created_at, sp.updated_at,
           u.name AS author_name, u.image AS author_image,
           p.name AS playlist_name,
           COALESCE(l.like_count, 0) AS like_count,
           COALESCE(c.comment_count, 0) AS comment_count,
           EXISTS (
               SELECT 1 FROM likes
               WHERE social_post_id = sp.id AND user_id = $1
           ) AS viewer_has_liked
    FROM social_posts sp
    JOIN users u ON u.id = sp.user_id
    JOIN playlists p ON p.id = sp.playlist_id
    LEFT JOIN (
        SELECT social_post_id, COUNT(*) AS like_count
        FROM likes GROUP BY social_post_id
    ) l ON l.social_post_id = sp.id
    LEFT JOIN (
        SELECT social_post_id, COUNT(*) AS comment_count
        FROM comments GROUP BY social_post_id
    ) c ON c.social_post_id = sp.id
"#;

/// Repository for social post database operations
#[derive(Clone)]
pub struct SocialPostRepository {
    pool: PgPool,
}

impl SocialPostRepository {
    /// Create a new SocialPostRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Share a playlist to the feed
    ///
    /// # Arguments
    /// * `user_id` - The author sharing the playlist
    /// * `input` - The playlist to share and an optional caption
    ///
    /// # Returns
    /// * `Ok(SocialPost)` - The created post
    /// * `Err(StoreError::UniqueViolation)` - If the playlist is already shared
    /// * `Err(StoreError::ForeignKeyViolation)` - If the user or playlist does not exist
    #[tracing::instrument(skip(self, input), fields(playlist_id = %input.playlist_id))]
    pub async fn share(&self, user_id: Uuid, input: NewSocialPost) -> StoreResult<SocialPost> {
        let post = sqlx::query_as::<_, SocialPost>(&format!(
            r#"
            INSERT INTO social_posts (caption, user_id, playlist_id)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            SOCIAL_POST_COLUMNS
        ))
        .bind(input.caption)
        .bind(user_id)
        .bind(input.playlist_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Find a post by its id
    pub async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<SocialPost>> {
        let post = sqlx::query_as::<_, SocialPost>(&format!(
            "SELECT {} FROM social_posts WHERE id = $1",
            SOCIAL_POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// The post sharing a playlist, if it has been shared
    pub async fn find_by_playlist(&self, playlist_id: Uuid) -> StoreResult<Option<SocialPost>> {
        let post = sqlx::query_as::<_, SocialPost>(&format!(
            "SELECT {} FROM social_posts WHERE playlist_id = $1",
            SOCIAL_POST_COLUMNS
        ))
        .bind(playlist_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Posts authored by a user, newest first
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<SocialPost>> {
        let (limit, offset) = clamp_page(limit, offset)?;

        let posts = sqlx::query_as::<_, SocialPost>(&format!(
            r#"
            SELECT {}
            FROM social_posts
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            SOCIAL_POST_COLUMNS
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// The global feed, newest first
    ///
    /// # Arguments
    /// * `viewer_id` - The user reading the feed; drives `viewer_has_liked`
    /// * `limit` - Maximum number of posts to return
    /// * `offset` - Number of posts to skip
    pub async fn recent(
        &self,
        viewer_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<FeedPost>> {
        let (limit, offset) = clamp_page(limit, offset)?;

        let sql = format!(
            "{} ORDER BY sp.created_at DESC LIMIT $2 OFFSET $3",
            FEED_SELECT
        );
        let posts = sqlx::query_as::<_, FeedPost>(&sql)
            .bind(viewer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    /// The home feed: posts by users the viewer follows, newest first
    ///
    /// A viewer who follows nobody gets an empty page, not an error.
    pub async fn feed(
        &self,
        viewer_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<FeedPost>> {
        let (limit, offset) = clamp_page(limit, offset)?;

        let sql = format!(
            r#"
            {}
            WHERE sp.user_id IN (
                SELECT following_id FROM follows WHERE follower_id = $1
            )
            ORDER BY sp.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            FEED_SELECT
        );
        let posts = sqlx::query_as::<_, FeedPost>(&sql)
            .bind(viewer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    /// Replace a post's caption
    ///
    /// The caption is replaced wholesale; `None` clears it. `updated_at`
    /// is bumped either way.
    ///
    /// # Returns
    /// * `Ok(SocialPost)` - The updated post
    /// * `Err(StoreError::NotFound)` - If the post does not exist
    #[tracing::instrument(skip(self, update))]
    pub async fn update_caption(
        &self,
        id: Uuid,
        update: UpdateSocialPost,
    ) -> StoreResult<SocialPost> {
        let post = sqlx::query_as::<_, SocialPost>(&format!(
            r#"
            UPDATE social_posts
            SET caption = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SOCIAL_POST_COLUMNS
        ))
        .bind(id)
        .bind(update.caption)
        .fetch_optional(&self.pool)
        .await?;

        post.ok_or_else(|| StoreError::not_found("social post", id))
    }

    /// Delete a post
    ///
    /// Likes and comments on the post are removed by cascade.
    ///
    /// # Returns
    /// * `Ok(true)` - If the post existed and was deleted
    /// * `Ok(false)` - If the post did not exist
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM social_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Like and comment totals for a post
    ///
    /// # Returns
    /// * `Ok(PostEngagement)` - Zero-filled counts for a post with no activity
    /// * `Err(StoreError::NotFound)` - If the post does not exist
    pub async fn engagement(&self, post_id: Uuid) -> StoreResult<PostEngagement> {
        let engagement = sqlx::query_as::<_, PostEngagement>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM likes WHERE social_post_id = sp.id) AS like_count,
                (SELECT COUNT(*) FROM comments WHERE social_post_id = sp.id) AS comment_count
            FROM social_posts sp
            WHERE sp.id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        engagement.ok_or_else(|| StoreError::not_found("social post", post_id))
    }
}
