//! Comment repository
//!
//! Threads are flat and render oldest first. Edits and deletes are
//! author-scoped in the WHERE clause, so a non-author touching someone
//! else's comment looks the same as the comment not existing.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::comment::{Comment, NewComment, PostCommentCount};
use crate::repositories::utils::{clamp_page, COMMENT_COLUMNS};

/// Repository for comment database operations
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new CommentRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Comment on a post
    ///
    /// # Arguments
    /// * `user_id` - The comment author
    /// * `input` - The post to comment on and the comment body
    ///
    /// # Returns
    /// * `Ok(Comment)` - The created comment
    /// * `Err(StoreError::InvalidInput)` - If the content is blank
    /// * `Err(StoreError::ForeignKeyViolation)` - If the user or post does not exist
    #[tracing::instrument(skip(self, input), fields(social_post_id = %input.social_post_id))]
    pub async fn create(&self, user_id: Uuid, input: NewComment) -> StoreResult<Comment> {
        if input.content.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "comment content cannot be empty".to_string(),
            ));
        }

        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            INSERT INTO comments (content, user_id, social_post_id)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            COMMENT_COLUMNS
        ))
        .bind(input.content.trim())
        .bind(user_id)
        .bind(input.social_post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Find a comment by its id
    pub async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {} FROM comments WHERE id = $1",
            COMMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Comments on a post in thread order, oldest first
    pub async fn find_by_post(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Comment>> {
        let (limit, offset) = clamp_page(limit, offset)?;

        let comments = sqlx::query_as::<_, Comment>(&format!(
            r#"
            SELECT {}
            FROM comments
            WHERE social_post_id = $1
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
            "#,
            COMMENT_COLUMNS
        ))
        .bind(post_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    /// Edit a comment's body
    ///
    /// Scoped to the author: editing someone else's comment reports
    /// NotFound, the same as a missing id.
    ///
    /// # Returns
    /// * `Ok(Comment)` - The updated comment
    /// * `Err(StoreError::InvalidInput)` - If the new content is blank
    /// * `Err(StoreError::NotFound)` - If no comment matches id and author
    #[tracing::instrument(skip(self, content))]
    pub async fn update_content(
        &self,
        id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> StoreResult<Comment> {
        if content.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "comment content cannot be empty".to_string(),
            ));
        }

        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            UPDATE comments
            SET content = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            COMMENT_COLUMNS
        ))
        .bind(id)
        .bind(author_id)
        .bind(content.trim())
        .fetch_optional(&self.pool)
        .await?;

        comment.ok_or_else(|| StoreError::not_found("comment", id))
    }

    /// Delete a comment, scoped to the author
    ///
    /// # Returns
    /// * `Ok(true)` - If the author's comment existed and was deleted
    /// * `Ok(false)` - If no comment matches id and author
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Uuid, author_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of comments on a post
    pub async fn count_for_post(&self, post_id: Uuid) -> StoreResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE social_post_id = $1")
                .bind(post_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Comment counts for a batch of posts
    ///
    /// Posts with no comments are absent from the result. An empty
    /// input returns an empty vec without touching the database.
    pub async fn counts_for_posts(&self, post_ids: &[Uuid]) -> StoreResult<Vec<PostCommentCount>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let counts = sqlx::query_as::<_, PostCommentCount>(
            r#"
            SELECT social_post_id, COUNT(*) AS comment_count
            FROM comments
            WHERE social_post_id = ANY($1)
            GROUP BY social_post_id
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}
