//! Swipe repository
//!
//! One verdict per (user, song). Recording a swipe upserts, so changing
//! your mind about a song never errors. The discovery deck is the
//! anti-join of the catalog against a user's swipe history.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::song::Song;
use crate::models::swipe::{NewSwipe, SwipeAction, SwipeDirection, SwipeSummary};
use crate::repositories::utils::{clamp_page, SWIPE_COLUMNS};

/// Repository for swipe database operations
#[derive(Clone)]
pub struct SwipeRepository {
    pool: PgPool,
}

impl SwipeRepository {
    /// Create a new SwipeRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a user's verdict on a song
    ///
    /// Re-swiping replaces the stored direction instead of erroring.
    ///
    /// # Returns
    /// * `Ok(SwipeAction)` - The stored swipe
    /// * `Err(StoreError::ForeignKeyViolation)` - If the user or song does not exist
    #[tracing::instrument(skip(self, input), fields(action = %input.action))]
    pub async fn record(&self, user_id: Uuid, input: NewSwipe) -> StoreResult<SwipeAction> {
        let swipe = sqlx::query_as::<_, SwipeAction>(&format!(
            r#"
            INSERT INTO swipe_actions (action, user_id, song_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, song_id) DO UPDATE SET action = EXCLUDED.action
            RETURNING {}
            "#,
            SWIPE_COLUMNS
        ))
        .bind(input.action)
        .bind(user_id)
        .bind(input.song_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(swipe)
    }

    /// The user's stored verdict on a song, if any
    pub async fn find(&self, user_id: Uuid, song_id: Uuid) -> StoreResult<Option<SwipeAction>> {
        let swipe = sqlx::query_as::<_, SwipeAction>(&format!(
            "SELECT {} FROM swipe_actions WHERE user_id = $1 AND song_id = $2",
            SWIPE_COLUMNS
        ))
        .bind(user_id)
        .bind(song_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(swipe)
    }

    /// A user's swipe history, optionally filtered by direction
    ///
    /// Ordered by id for stable pagination.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        direction: Option<SwipeDirection>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<SwipeAction>> {
        let (limit, offset) = clamp_page(limit, offset)?;

        let swipes = sqlx::query_as::<_, SwipeAction>(&format!(
            r#"
            SELECT {}
            FROM swipe_actions
            WHERE user_id = $1
              AND ($2::swipe_direction IS NULL OR action = $2)
            ORDER BY id ASC
            LIMIT $3 OFFSET $4
            "#,
            SWIPE_COLUMNS
        ))
        .bind(user_id)
        .bind(direction)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(swipes)
    }

    /// Songs the user swiped right on, ordered like the catalog
    pub async fn liked_songs(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Song>> {
        let (limit, offset) = clamp_page(limit, offset)?;

        let songs = sqlx::query_as::<_, Song>(
            r#"
            SELECT s.id, s.title, s.artist, s.album, s.external_id, s.duration_ms
            FROM swipe_actions sa
            JOIN songs s ON s.id = sa.song_id
            WHERE sa.user_id = $1 AND sa.action = 'liked'
            ORDER BY s.artist ASC, s.title ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(songs)
    }

    /// Verdict totals for a user, zero-filled for unused directions
    pub async fn summary(&self, user_id: Uuid) -> StoreResult<SwipeSummary> {
        let rows: Vec<(SwipeDirection, i64)> = sqlx::query_as(
            r#"
            SELECT action, COUNT(*)
            FROM swipe_actions
            WHERE user_id = $1
            GROUP BY action
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut summary = SwipeSummary::default();
        for (action, count) in rows {
            match action {
                SwipeDirection::Liked => summary.liked = count,
                SwipeDirection::Disliked => summary.disliked = count,
            }
        }

        Ok(summary)
    }

    /// The discovery deck: catalog songs the user has not swiped yet
    ///
    /// Both directions count as swiped; the deck never repeats a song
    /// the user has already judged. Order is randomized per call.
    pub async fn next_for_user(&self, user_id: Uuid, limit: i64) -> StoreResult<Vec<Song>> {
        let (limit, _) = clamp_page(limit, 0)?;

        let songs = sqlx::query_as::<_, Song>(
            r#"
            SELECT s.id, s.title, s.artist, s.album, s.external_id, s.duration_ms
            FROM songs s
            WHERE NOT EXISTS (
                SELECT 1 FROM swipe_actions sa
                WHERE sa.song_id = s.id AND sa.user_id = $1
            )
            ORDER BY random()
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(songs)
    }

    /// Forget a user's verdict on a song
    ///
    /// # Returns
    /// * `Ok(true)` - If a swipe existed and was removed
    /// * `Ok(false)` - If the user never swiped this song
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid, song_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM swipe_actions WHERE user_id = $1 AND song_id = $2")
            .bind(user_id)
            .bind(song_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
